/*
 * ==========================================================================
 * PROWL - Parse with Claws!
 * ==========================================================================
 *
 * File:      heuristics.rs
 * Purpose:   The lookahead override layer that papers over the known gaps
 *            and mismatches in the supplied parsing table.
 *
 * Author:    Sam Wilcox
 * Email:     sam@prowl-lang.com
 * Website:   https://www.prowl-lang.com
 * GitHub:    https://github.com/samwilcox/prowl
 *
 * License:
 * This file is part of the PROWL language toolchain project.
 *
 * PROWL is dual-licensed under the terms of:
 *   - The MIT License
 *   - The Apache License, Version 2.0
 *
 * You may choose either license to govern your use of this software.
 * Full license text available at:
 *    https://license.prowl-lang.com
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under these licenses is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 *
 * ==========================================================================
 */

//! Contract: `resolve(nonterminal, remaining input) -> Some(production)`
//! to override the table, or `None` to defer to it. Each rule inspects a
//! bounded lookahead window (1 to 3 terminals, plus bracket- and
//! parenthesis-depth-aware skipping over index and argument runs) and
//! never consumes input.
//!
//! These rules are not general ambiguity resolution. They exist because
//! the table conflates variables with calls, lists the member-access chain
//! link backwards, and over-applies continuation entries; the exact
//! triggering conditions are part of the compatibility surface.

use crate::grammar::symbol::{NonTerm, Symbol, Terminal};
use crate::parser::parser::MappedToken;

fn t(terminal: Terminal) -> Symbol {
    Symbol::Terminal(terminal)
}

fn nt(nonterminal: NonTerm) -> Symbol {
    Symbol::NonTerminal(nonterminal)
}

/// Terminal at `pos` in the remaining input, or the end marker past it.
fn term_at(rest: &[MappedToken], pos: usize) -> Terminal {
    rest.get(pos).map_or(Terminal::End, |mapped| mapped.term)
}

/// Advances `pos` past a run of `[ ... ]` index groups, tracking bracket
/// depth so nested indices count as one group.
fn skip_index_runs(rest: &[MappedToken], mut pos: usize) -> usize {
    while pos < rest.len() && rest[pos].term == Terminal::LSqBr {
        let mut depth = 1;
        pos += 1;
        while pos < rest.len() && depth > 0 {
            match rest[pos].term {
                Terminal::LSqBr => depth += 1,
                Terminal::RSqBr => depth -= 1,
                _ => {}
            }
            pos += 1;
        }
    }
    pos
}

/// Advances `pos` past one `( ... )` argument group. `pos` must sit on the
/// opening parenthesis.
fn skip_paren_group(rest: &[MappedToken], mut pos: usize) -> usize {
    let mut depth = 1;
    pos += 1;
    while pos < rest.len() && depth > 0 {
        match rest[pos].term {
            Terminal::LPar => depth += 1,
            Terminal::RPar => depth -= 1,
            _ => {}
        }
        pos += 1;
    }
    pos
}

/// True when `id` at position 0 begins a function call: `id(...)` or
/// `id[...].member[...](...)` after skipping index runs.
fn id_starts_call(rest: &[MappedToken]) -> bool {
    let mut pos = skip_index_runs(rest, 1);

    match term_at(rest, pos) {
        Terminal::LPar => true,
        Terminal::Dot => {
            pos += 1;
            if term_at(rest, pos) != Terminal::Id {
                return false;
            }
            pos = skip_index_runs(rest, pos + 1);
            term_at(rest, pos) == Terminal::LPar
        }
        _ => false,
    }
}

/// Applies the override rules for `nonterminal` against the remaining
/// input (`rest[0]` is the lookahead). Returns the forced production, or
/// `None` to defer to the table.
pub fn resolve(nonterminal: NonTerm, rest: &[MappedToken]) -> Option<Vec<Symbol>> {
    let lookahead = term_at(rest, 0);

    match nonterminal {
        // The table's FACTOR entry for id cannot tell a variable reference
        // from a call; decide by scanning the shape of what follows.
        NonTerm::Factor if lookahead == Terminal::Id => {
            if id_starts_call(rest) {
                Some(vec![nt(NonTerm::FunctionCall)])
            } else {
                Some(vec![nt(NonTerm::Variable)])
            }
        }

        // Array size with or without an explicit bound: [ intlit ] vs [ ].
        NonTerm::ArraySize if lookahead == Terminal::LSqBr => {
            if term_at(rest, 1) == Terminal::IntLit {
                Some(vec![
                    t(Terminal::LSqBr),
                    t(Terminal::IntLit),
                    t(Terminal::RSqBr),
                ])
            } else {
                Some(vec![t(Terminal::LSqBr), t(Terminal::RSqBr)])
            }
        }

        // A statement opening with id is an assignment per the table, but
        // call statements and member-access variants start the same way.
        NonTerm::Statement if lookahead == Terminal::Id => {
            match term_at(rest, 1) {
                Terminal::LPar => Some(vec![nt(NonTerm::FunctionCall), t(Terminal::Semi)]),
                Terminal::Dot => {
                    if term_at(rest, 2) != Terminal::Id {
                        return None;
                    }
                    let pos = skip_index_runs(rest, 3);
                    match term_at(rest, pos) {
                        Terminal::LPar => {
                            Some(vec![nt(NonTerm::FunctionCall), t(Terminal::Semi)])
                        }
                        Terminal::Equal => Some(vec![
                            t(Terminal::Id),
                            t(Terminal::Dot),
                            t(Terminal::Id),
                            t(Terminal::Equal),
                            nt(NonTerm::Expr),
                            t(Terminal::Semi),
                        ]),
                        Terminal::Dot => Some(vec![
                            nt(NonTerm::Variable),
                            nt(NonTerm::AssignOp),
                            nt(NonTerm::Expr),
                            t(Terminal::Semi),
                        ]),
                        _ => None,
                    }
                }
                _ => None,
            }
        }

        // The table expands the variable prefix chain on id, but a chain
        // link starts with a dot; force epsilon everywhere else.
        NonTerm::ReptVariable0 if lookahead != Terminal::Dot => Some(vec![Symbol::Epsilon]),

        // Suffix indices continue only on an opening bracket.
        NonTerm::ReptVariable2 if lookahead != Terminal::LSqBr => Some(vec![Symbol::Epsilon]),

        // Operator-chain tails continue only on their own operators.
        NonTerm::RightRecTerm
            if !matches!(lookahead, Terminal::Mult | Terminal::Div | Terminal::And) =>
        {
            Some(vec![Symbol::Epsilon])
        }
        NonTerm::RightRecArithExpr
            if !matches!(lookahead, Terminal::Plus | Terminal::Minus | Terminal::Or) =>
        {
            Some(vec![Symbol::Epsilon])
        }

        // Statement lists continue only on a statement start.
        NonTerm::ReptStatBlock1 if !starts_statement(lookahead) => Some(vec![Symbol::Epsilon]),
        NonTerm::ReptFuncBody1
            if lookahead != Terminal::LocalVar && !starts_statement(lookahead) =>
        {
            Some(vec![Symbol::Epsilon])
        }

        NonTerm::ReptStart0 if lookahead == Terminal::End => Some(vec![Symbol::Epsilon]),

        // The table lists the chain link as `id ... dot`; the shape
        // consumed on a dot lookahead is `dot id ...`, optionally a method
        // call or further indices.
        NonTerm::IdNest if lookahead == Terminal::Dot => {
            if term_at(rest, 1) != Terminal::Id {
                return None;
            }
            if term_at(rest, 2) == Terminal::LPar {
                Some(vec![
                    t(Terminal::Dot),
                    t(Terminal::Id),
                    t(Terminal::LPar),
                    nt(NonTerm::AParams),
                    t(Terminal::RPar),
                ])
            } else {
                Some(vec![
                    t(Terminal::Dot),
                    t(Terminal::Id),
                    nt(NonTerm::ReptIdNest1),
                ])
            }
        }

        NonTerm::ReptVariableOrFunctionCall if lookahead != Terminal::Dot => {
            Some(vec![Symbol::Epsilon])
        }

        // A call prefix chain continues only when the id (past its indices,
        // and past one argument group) is followed by a dot.
        NonTerm::ReptFunctionCall0 if lookahead == Terminal::Id => {
            let mut pos = skip_index_runs(rest, 1);
            let mut is_chain_link = false;
            match term_at(rest, pos) {
                Terminal::Dot => is_chain_link = true,
                Terminal::LPar => {
                    pos = skip_paren_group(rest, pos);
                    if term_at(rest, pos) == Terminal::Dot {
                        is_chain_link = true;
                    }
                }
                _ => {}
            }
            if is_chain_link {
                Some(vec![nt(NonTerm::IdNest), nt(NonTerm::ReptFunctionCall0)])
            } else {
                Some(vec![Symbol::Epsilon])
            }
        }

        // Constructor-call local declaration: localvar x : Type ( ... ) ;
        NonTerm::LocalVarDecl
            if lookahead == Terminal::LocalVar && term_at(rest, 4) == Terminal::LPar =>
        {
            Some(vec![
                t(Terminal::LocalVar),
                t(Terminal::Id),
                t(Terminal::Colon),
                nt(NonTerm::Type),
                t(Terminal::LPar),
                nt(NonTerm::AParams),
                t(Terminal::RPar),
                t(Terminal::Semi),
            ])
        }

        // Optional scope qualifier: only when `id` is followed by `::`.
        NonTerm::OptFuncHead1 if lookahead == Terminal::Id => {
            if term_at(rest, 1) == Terminal::Sr {
                Some(vec![t(Terminal::Id), t(Terminal::Sr)])
            } else {
                Some(vec![Symbol::Epsilon])
            }
        }

        // Class-qualified constructor header: function Name::constructor(...).
        NonTerm::FuncHead
            if lookahead == Terminal::Function
                && term_at(rest, 1) == Terminal::Id
                && term_at(rest, 2) == Terminal::Sr
                && term_at(rest, 3) == Terminal::Constructor =>
        {
            Some(vec![
                t(Terminal::Function),
                t(Terminal::Id),
                t(Terminal::Sr),
                t(Terminal::Constructor),
                t(Terminal::LPar),
                nt(NonTerm::FParams),
                t(Terminal::RPar),
            ])
        }

        _ => None,
    }
}

fn starts_statement(terminal: Terminal) -> bool {
    matches!(
        terminal,
        Terminal::Id
            | Terminal::If
            | Terminal::While
            | Terminal::Read
            | Terminal::Write
            | Terminal::Return
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::map_tokens_lossy;
    use pretty_assertions::assert_eq;

    /// Lexes a fragment into the mapped-terminal form the engine feeds the
    /// heuristics (comments dropped, no end marker appended).
    fn input(source: &str) -> Vec<MappedToken> {
        map_tokens_lossy(source)
    }

    fn resolved(nonterminal: NonTerm, source: &str) -> Option<String> {
        resolve(nonterminal, &input(source)).map(|rhs| {
            rhs.iter()
                .map(|symbol| symbol.name())
                .collect::<Vec<_>>()
                .join(" ")
        })
    }

    #[test]
    fn factor_distinguishes_calls_from_variables() {
        assert_eq!(resolved(NonTerm::Factor, "x + 1"), Some("VARIABLE".into()));
        assert_eq!(
            resolved(NonTerm::Factor, "f(1)"),
            Some("FUNCTIONCALL".into())
        );
        assert_eq!(
            resolved(NonTerm::Factor, "a[1][2].m(3)"),
            Some("FUNCTIONCALL".into())
        );
        assert_eq!(
            resolved(NonTerm::Factor, "a[i].b"),
            Some("VARIABLE".into())
        );
        assert_eq!(
            resolved(NonTerm::Factor, "a.b[2](0)"),
            Some("FUNCTIONCALL".into())
        );
        // Not an id lookahead: defer.
        assert_eq!(resolved(NonTerm::Factor, "42"), None);
    }

    #[test]
    fn array_size_with_and_without_bound() {
        assert_eq!(
            resolved(NonTerm::ArraySize, "[4]"),
            Some("lsqbr intlit rsqbr".into())
        );
        assert_eq!(
            resolved(NonTerm::ArraySize, "[]"),
            Some("lsqbr rsqbr".into())
        );
        assert_eq!(resolved(NonTerm::ArraySize, "x"), None);
    }

    #[test]
    fn statement_call_and_member_shapes() {
        assert_eq!(
            resolved(NonTerm::Statement, "f(1);"),
            Some("FUNCTIONCALL semi".into())
        );
        assert_eq!(
            resolved(NonTerm::Statement, "obj.m(1);"),
            Some("FUNCTIONCALL semi".into())
        );
        assert_eq!(
            resolved(NonTerm::Statement, "self.a = 1;"),
            Some("id dot id equal EXPR semi".into())
        );
        assert_eq!(
            resolved(NonTerm::Statement, "a.b.c = 1;"),
            Some("VARIABLE ASSIGNOP EXPR semi".into())
        );
        // Plain assignment defers to the table's ASSIGNSTAT entry.
        assert_eq!(resolved(NonTerm::Statement, "x = 1;"), None);
        assert_eq!(resolved(NonTerm::Statement, "x[0] = 1;"), None);
    }

    #[test]
    fn continuation_tails_force_epsilon_off_their_operators() {
        assert_eq!(
            resolved(NonTerm::RightRecArithExpr, "; x"),
            Some("EPSILON".into())
        );
        assert_eq!(resolved(NonTerm::RightRecArithExpr, "+ 1"), None);
        assert_eq!(resolved(NonTerm::RightRecArithExpr, "or b"), None);
        assert_eq!(
            resolved(NonTerm::RightRecTerm, "+ 1"),
            Some("EPSILON".into())
        );
        assert_eq!(resolved(NonTerm::RightRecTerm, "and b"), None);
        assert_eq!(
            resolved(NonTerm::ReptVariable0, "x"),
            Some("EPSILON".into())
        );
        assert_eq!(resolved(NonTerm::ReptVariable0, ". b"), None);
        assert_eq!(
            resolved(NonTerm::ReptVariable2, "+ 1"),
            Some("EPSILON".into())
        );
        assert_eq!(resolved(NonTerm::ReptVariable2, "[1]"), None);
        assert_eq!(
            resolved(NonTerm::ReptStatBlock1, "}"),
            Some("EPSILON".into())
        );
        assert_eq!(resolved(NonTerm::ReptStatBlock1, "while"), None);
        assert_eq!(
            resolved(NonTerm::ReptFuncBody1, "}"),
            Some("EPSILON".into())
        );
        assert_eq!(resolved(NonTerm::ReptFuncBody1, "localvar"), None);
        assert_eq!(resolved(NonTerm::ReptStart0, ""), Some("EPSILON".into()));
        assert_eq!(resolved(NonTerm::ReptStart0, "class"), None);
        assert_eq!(
            resolved(NonTerm::ReptVariableOrFunctionCall, "+ 1"),
            Some("EPSILON".into())
        );
        assert_eq!(resolved(NonTerm::ReptVariableOrFunctionCall, ". b"), None);
    }

    #[test]
    fn idnest_corrects_the_backwards_chain_link() {
        assert_eq!(
            resolved(NonTerm::IdNest, ". m ( 1 )"),
            Some("dot id lpar APARAMS rpar".into())
        );
        assert_eq!(
            resolved(NonTerm::IdNest, ". b [ 2 ]"),
            Some("dot id REPTIDNEST1".into())
        );
        // Dot not followed by id, or no dot at all: defer to the table.
        assert_eq!(resolved(NonTerm::IdNest, ". ("), None);
        assert_eq!(resolved(NonTerm::IdNest, "a ."), None);
    }

    #[test]
    fn call_prefix_chain_scans_past_indices_and_arguments() {
        assert_eq!(
            resolved(NonTerm::ReptFunctionCall0, "a.b(1);"),
            Some("IDNEST REPTFUNCTIONCALL0".into())
        );
        assert_eq!(
            resolved(NonTerm::ReptFunctionCall0, "a[0].b(1);"),
            Some("IDNEST REPTFUNCTIONCALL0".into())
        );
        assert_eq!(
            resolved(NonTerm::ReptFunctionCall0, "a(1).b(2);"),
            Some("IDNEST REPTFUNCTIONCALL0".into())
        );
        assert_eq!(
            resolved(NonTerm::ReptFunctionCall0, "f(1);"),
            Some("EPSILON".into())
        );
        assert_eq!(resolved(NonTerm::ReptFunctionCall0, ". b"), None);
    }

    #[test]
    fn constructor_call_local_declaration() {
        assert_eq!(
            resolved(NonTerm::LocalVarDecl, "localvar p : Point(1, 2);"),
            Some("localvar id colon TYPE lpar APARAMS rpar semi".into())
        );
        assert_eq!(resolved(NonTerm::LocalVarDecl, "localvar x : integer;"), None);
    }

    #[test]
    fn scope_qualifier_and_constructor_header() {
        assert_eq!(
            resolved(NonTerm::OptFuncHead1, "Point :: build"),
            Some("id sr".into())
        );
        assert_eq!(
            resolved(NonTerm::OptFuncHead1, "build ("),
            Some("EPSILON".into())
        );
        assert_eq!(
            resolved(NonTerm::FuncHead, "function Point :: constructor ( )"),
            Some("function id sr constructor lpar FPARAMS rpar".into())
        );
        assert_eq!(
            resolved(NonTerm::FuncHead, "function build ( )"),
            None
        );
    }
}
