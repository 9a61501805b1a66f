/*
 * ==========================================================================
 * PROWL - Parse with Claws!
 * ==========================================================================
 *
 * Core Predictive Parser Engine
 *
 * This file defines the primary `Parser` structure and the public `parse()`
 * driver function used to transform a mapped token stream into an abstract
 * syntax tree, a leftmost-derivation trace, and an ordered error log.
 *
 * The parsing implementation is split across multiple modules:
 * - `heuristics.rs`  → Lookahead overrides for known table gaps
 * - `actions.rs`     → Per-production semantic actions
 * - `derivation.rs`  → Sentential-form bookkeeping
 * - `stack.rs`       → The semantic value stack
 *
 * This file serves as the **root coordinator** of the parsing process.
 *
 * --------------------------------------------------------------------------
 * Author:   Sam Wilcox
 * Email:    sam@prowl-lang.com
 * Website:  https://www.prowl-lang.com
 * Github:   https://github.com/samwilcox/prowl
 *
 * License:
 * This file is part of the PROWL language toolchain project.
 *
 * PROWL is dual-licensed under the terms of:
 *   - The MIT license
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

use crate::ast::TreeNode;
use crate::error::{SyntaxError, SyntaxErrorKind};
use crate::grammar::symbol::{is_epsilon_production, NonTerm, Symbol, Terminal};
use crate::grammar::table::ParseTable;
use crate::lexer::token::Token;
use crate::parser::actions::{self, ChildValue};
use crate::parser::derivation::Derivation;
use crate::parser::heuristics;
use crate::parser::stack::SemanticStack;

/// One unit of parser input: a token together with the grammar terminal it
/// mapped to. The mapping itself lives in the driver; the engine never
/// looks at raw token kinds.
#[derive(Debug, Clone)]
pub struct MappedToken {
    pub term: Terminal,
    pub token: Token,
}

/// Everything one parse produces, returned by value.
///
/// `root` is present whenever the semantic stack ended non-empty; callers
/// distinguish a clean parse from a recovered one via `errors`, not via
/// the root being absent.
#[derive(Debug)]
pub struct ParseOutput {
    pub root: Option<TreeNode>,
    pub errors: Vec<SyntaxError>,
    pub derivation: Vec<String>,
}

impl ParseOutput {
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

/// One item of the parse stack: a grammar symbol awaiting matching, or a
/// marker for a pending semantic-action frame.
///
/// Markers sit directly below the symbols of the production they summarize,
/// so a marker surfaces exactly when all of that production's symbols have
/// been resolved and popped.
#[derive(Debug, Clone, Copy)]
enum StackItem {
    Symbol(Symbol),
    Action(usize),
}

/// The provenance needed to synthesize a node once a production's symbols
/// are all resolved.
#[derive(Debug, Clone)]
struct ActionFrame {
    nonterminal: NonTerm,
    rhs: Vec<Symbol>,
}

/// Public entry point: parse a mapped token stream against a table,
/// starting from `START`.
pub fn parse(table: &ParseTable, input: Vec<MappedToken>) -> ParseOutput {
    Parser::new(table, input).run()
}

/// Like `parse`, but from an arbitrary start symbol. Lets tests and tools
/// drive a sub-grammar directly.
pub fn parse_with_start(table: &ParseTable, input: Vec<MappedToken>, start: NonTerm) -> ParseOutput {
    Parser::with_start(table, input, start).run()
}

/// The pushdown automaton driving one translation unit.
pub struct Parser<'t> {
    table: &'t ParseTable,
    input: Vec<MappedToken>,
    cursor: usize,
    stack: Vec<StackItem>,
    frames: Vec<ActionFrame>,
    values: SemanticStack,
    derivation: Derivation,
    errors: Vec<SyntaxError>,
}

impl<'t> Parser<'t> {
    pub fn new(table: &'t ParseTable, input: Vec<MappedToken>) -> Self {
        Self::with_start(table, input, NonTerm::Start)
    }

    pub fn with_start(table: &'t ParseTable, input: Vec<MappedToken>, start: NonTerm) -> Self {
        Self {
            table,
            input,
            cursor: 0,
            stack: vec![
                StackItem::Symbol(Symbol::Terminal(Terminal::End)),
                StackItem::Symbol(Symbol::NonTerminal(start)),
            ],
            frames: Vec::new(),
            values: SemanticStack::new(),
            derivation: Derivation::new(start),
            errors: Vec::new(),
        }
    }

    /// Runs the automaton to completion.
    ///
    /// Every iteration either consumes one input token or shrinks the
    /// stack, so the loop always terminates. No anomaly aborts it; each is
    /// logged and recovered from in place.
    pub fn run(mut self) -> ParseOutput {
        while let Some(item) = self.stack.pop() {
            match item {
                StackItem::Action(index) => {
                    let frame = self.frames[index].clone();
                    self.reduce(&frame);
                }
                StackItem::Symbol(Symbol::Terminal(Terminal::End)) => {
                    if self.lookahead() != Terminal::End {
                        if let Some(line) = self.current_line() {
                            self.record(SyntaxErrorKind::ExtraTokens { line });
                        }
                    }
                    break;
                }
                StackItem::Symbol(Symbol::Terminal(expected)) => self.match_terminal(expected),
                StackItem::Symbol(Symbol::NonTerminal(nonterminal)) => self.expand(nonterminal),
                // Epsilon never reaches the stack; expansions skip it.
                StackItem::Symbol(Symbol::Epsilon) => {}
            }
        }

        self.finish()
    }

    /// Terminal dispatch: match-and-advance, or single-token-skip recovery.
    fn match_terminal(&mut self, expected: Terminal) {
        let lookahead = self.lookahead();

        if expected == lookahead {
            if self.cursor < self.input.len() {
                let node = actions::leaf_for_terminal(expected, &self.input[self.cursor].token);
                self.values.push(node);
                self.cursor += 1;
            }
        } else if self.cursor < self.input.len() {
            let token = &self.input[self.cursor].token;
            self.errors.push(
                SyntaxError::new(SyntaxErrorKind::Mismatch {
                    expected: expected.name(),
                    found: lookahead.name(),
                    line: token.span.line,
                })
                .with_span(token.span),
            );
            // Treat the token as matched and move on; no rollback.
            self.values.push(None);
            self.cursor += 1;
        } else {
            self.values.push(None);
        }
    }

    /// Nonterminal dispatch: heuristic override first, then table lookup,
    /// then forced-epsilon recovery.
    fn expand(&mut self, nonterminal: NonTerm) {
        let lookahead = self.lookahead();

        let rhs = heuristics::resolve(nonterminal, &self.input[self.cursor..])
            .or_else(|| self.table.lookup(nonterminal, lookahead).map(<[_]>::to_vec));

        let Some(rhs) = rhs else {
            let error = SyntaxError::new(SyntaxErrorKind::NoRule {
                nonterminal: nonterminal.name(),
                lookahead: lookahead.name(),
                line: self.current_line(),
            });
            self.errors.push(match self.current_span() {
                Some(span) => error.with_span(span),
                None => error,
            });
            // Panic-mode single step: the nonterminal vanishes, its value
            // slot stays occupied by a null.
            self.derivation.apply(&[Symbol::Epsilon]);
            self.values.push(None);
            return;
        };

        let index = self.frames.len();
        self.frames.push(ActionFrame {
            nonterminal,
            rhs: rhs.clone(),
        });
        self.stack.push(StackItem::Action(index));

        if !is_epsilon_production(&rhs) {
            for symbol in rhs.iter().rev() {
                self.stack.push(StackItem::Symbol(*symbol));
            }
        }

        self.derivation.apply(&rhs);
    }

    /// Fires one semantic-action frame: pop one value per non-epsilon
    /// symbol (rightmost first), restore order, synthesize, push back.
    fn reduce(&mut self, frame: &ActionFrame) {
        let mut children = Vec::new();
        let mut underflow = false;

        for symbol in frame.rhs.iter().rev() {
            if *symbol == Symbol::Epsilon {
                continue;
            }
            match self.values.pop() {
                Some(node) => children.push(ChildValue::new(*symbol, node)),
                None => {
                    underflow = true;
                    break;
                }
            }
        }

        if underflow {
            self.record(SyntaxErrorKind::StackUnderflow {
                nonterminal: frame.nonterminal.name(),
            });
            self.values.push(None);
            return;
        }

        children.reverse();
        let node = actions::build_node(frame.nonterminal, &frame.rhs, children);
        self.values.push(node);
    }

    fn finish(mut self) -> ParseOutput {
        let root = self.values.pop().flatten();

        if !self.values.is_empty() {
            self.record(SyntaxErrorKind::LeftoverValues {
                count: self.values.len(),
            });
        }
        if root.is_none() {
            self.record(SyntaxErrorKind::MissingRoot);
        }
        if self.cursor + 1 < self.input.len() {
            self.record(SyntaxErrorKind::UnparsedInput {
                line: self.current_line(),
            });
        }

        ParseOutput {
            root,
            errors: self.errors,
            derivation: self.derivation.into_trace(),
        }
    }

    /// The terminal form of the next unconsumed token, or the end marker
    /// once input is exhausted.
    fn lookahead(&self) -> Terminal {
        self.input
            .get(self.cursor)
            .map_or(Terminal::End, |mapped| mapped.term)
    }

    fn current_line(&self) -> Option<usize> {
        self.input
            .get(self.cursor)
            .map(|mapped| mapped.token.span.line)
    }

    fn current_span(&self) -> Option<crate::span::Span> {
        self.input.get(self.cursor).map(|mapped| mapped.token.span)
    }

    fn record(&mut self, kind: SyntaxErrorKind) {
        self.errors.push(SyntaxError::new(kind));
    }
}
