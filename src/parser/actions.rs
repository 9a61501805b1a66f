/*
 * ==========================================================================
 * PROWL - Parse with Claws!
 * ==========================================================================
 *
 * File:      actions.rs
 * Purpose:   Per-production semantic actions: turning matched right-hand
 *            sides into typed AST nodes.
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

//! Synthesis is an exhaustive match over the nonterminal vocabulary, so a
//! new grammar symbol cannot be added without a compile error here. The
//! recurring shapes:
//!
//! - **Pass-through**: wrapper nonterminals forward their only meaningful
//!   child.
//! - **List accumulation**: zero-or-more repetitions flatten the tail list
//!   into one node instead of nesting.
//! - **Binary-chain folding**: a left operand plus a flat (operator,
//!   operand) tail folds left-associatively into nested `BinaryExpr`s.
//! - **Structural synthesis**: fixed-shape productions pick named children
//!   by grammar symbol (repeated takes walk successive occurrences) and
//!   assemble a tagged node with a fixed child layout.

use crate::ast::factory;
use crate::ast::node::TreeNode;
use crate::grammar::symbol::{is_epsilon_production, NonTerm, Symbol, Terminal};
use crate::lexer::token::Token;
use crate::span::SourceSpan;

/// One matched child of a production: the grammar symbol it satisfied and
/// the value it produced (null for punctuation and recovered slots).
#[derive(Debug)]
pub(crate) struct ChildValue {
    pub symbol: Symbol,
    pub node: Option<TreeNode>,
    taken: bool,
}

impl ChildValue {
    pub fn new(symbol: Symbol, node: Option<TreeNode>) -> Self {
        Self {
            symbol,
            node,
            taken: false,
        }
    }
}

/// Takes the child at a fixed right-hand-side position.
fn take_at(children: &mut [ChildValue], index: usize) -> Option<TreeNode> {
    let child = children.get_mut(index)?;
    child.taken = true;
    child.node.take()
}

/// Takes the next untaken child matching `symbol`.
///
/// Calling twice with the same symbol yields successive occurrences, which
/// is how fixed-shape productions with a repeated symbol (the two blocks of
/// an if/else) address each one. A matching slot counts as an occurrence
/// even when its value is null, so relative positions survive recovery.
fn take_symbol(children: &mut [ChildValue], symbol: Symbol) -> Option<TreeNode> {
    let child = children
        .iter_mut()
        .find(|child| !child.taken && child.symbol == symbol)?;
    child.taken = true;
    child.node.take()
}

fn take_terminal(children: &mut [ChildValue], terminal: Terminal) -> Option<TreeNode> {
    take_symbol(children, Symbol::Terminal(terminal))
}

fn take_nonterm(children: &mut [ChildValue], nonterminal: NonTerm) -> Option<TreeNode> {
    take_symbol(children, Symbol::NonTerminal(nonterminal))
}

/// Moves every child of `node` into `list` (flattening).
fn extend_with_children(list: &mut TreeNode, node: TreeNode) {
    for child in node.into_children() {
        list.add_child(child);
    }
}

fn append_if_present(parent: &mut TreeNode, child: Option<TreeNode>) {
    if let Some(child) = child {
        parent.add_child(child);
    }
}

/// Folds `left` with a flat (operator, operand, operator, operand, ...)
/// chain into left-associative `BinaryExpr` nesting.
fn fold_binary_chain(left: Option<TreeNode>, chain: Option<TreeNode>) -> Option<TreeNode> {
    let left = left?;
    let Some(chain) = chain else {
        return Some(left);
    };

    let mut current = left;
    let mut items = chain.into_children().into_iter();
    while let Some(op) = items.next() {
        let Some(rhs) = items.next() else {
            break;
        };
        let spelling = op
            .value()
            .map(str::to_string)
            .unwrap_or_else(|| op.kind().to_string());
        current = factory::make_binary(spelling, Some(current), Some(rhs));
    }
    Some(current)
}

/// Builds the leaf node for a matched terminal, or `None` for punctuation
/// that carries no semantic value of its own.
///
/// Operators are canonicalized: the `neq` token `<>` yields an `Operator`
/// spelled `!=`.
pub(crate) fn leaf_for_terminal(terminal: Terminal, token: &Token) -> Option<TreeNode> {
    let lexeme_span = SourceSpan::of_lexeme(token.span, token.lexeme.chars().count());
    let operator = |spelling: &str| {
        Some(TreeNode::leaf(
            "Operator",
            spelling,
            SourceSpan::of_lexeme(token.span, spelling.chars().count()),
        ))
    };

    match terminal {
        Terminal::Id => Some(TreeNode::leaf("Identifier", token.lexeme.clone(), lexeme_span)),
        Terminal::IntLit => Some(TreeNode::leaf("IntLiteral", token.lexeme.clone(), lexeme_span)),
        Terminal::FloatLit => {
            Some(TreeNode::leaf("FloatLiteral", token.lexeme.clone(), lexeme_span))
        }

        Terminal::Plus => operator("+"),
        Terminal::Minus => operator("-"),
        Terminal::Mult => operator("*"),
        Terminal::Div => operator("/"),
        Terminal::And => operator("and"),
        Terminal::Or => operator("or"),
        Terminal::Not => operator("not"),
        Terminal::Eq => operator("=="),
        Terminal::Neq => operator("!="),
        Terminal::Lt => operator("<"),
        Terminal::Gt => operator(">"),
        Terminal::Leq => operator("<="),
        Terminal::Geq => operator(">="),
        Terminal::Equal => operator("="),

        Terminal::Class
        | Terminal::Function
        | Terminal::Return
        | Terminal::While
        | Terminal::If
        | Terminal::Then
        | Terminal::Else
        | Terminal::Read
        | Terminal::Write
        | Terminal::Public
        | Terminal::Private
        | Terminal::Attribute
        | Terminal::Constructor
        | Terminal::LocalVar => {
            Some(TreeNode::leaf("Keyword", token.lexeme.clone(), lexeme_span))
        }

        Terminal::Void | Terminal::Integer | Terminal::Float => {
            Some(TreeNode::leaf("TypeName", token.lexeme.clone(), lexeme_span))
        }

        _ => None,
    }
}

/// Synthesizes the node for one completed production.
///
/// `children` holds one slot per non-epsilon right-hand-side symbol, in
/// left-to-right order. Returning `None` is a valid result: elided
/// optional parts push a null slot for their parent to skip.
pub(crate) fn build_node(
    nonterminal: NonTerm,
    rhs: &[Symbol],
    mut children: Vec<ChildValue>,
) -> Option<TreeNode> {
    let children = &mut children;

    match nonterminal {
        // START ::= REPTSTART0, wrapped in the Program root.
        NonTerm::Start => {
            let mut program = TreeNode::new("Program");
            if let Some(units) = take_at(children, 0) {
                extend_with_children(&mut program, units);
            }
            Some(program)
        }

        // Flatten the list of translation units.
        NonTerm::ReptStart0 => {
            let mut list = TreeNode::new("TranslationUnitList");
            for child in children.iter_mut() {
                if let Some(node) = child.node.take() {
                    if node.kind() == "TranslationUnitList" {
                        extend_with_children(&mut list, node);
                    } else {
                        list.add_child(node);
                    }
                }
            }
            Some(list)
        }

        // Wrapper alternations forward their selected child.
        NonTerm::ClassDeclOrFuncDef
        | NonTerm::Visibility
        | NonTerm::MemberDecl
        | NonTerm::LocalVarDeclOrStmt
        | NonTerm::Expr
        | NonTerm::ReturnType
        | NonTerm::Type
        | NonTerm::AssignOp
        | NonTerm::AddOp
        | NonTerm::MultOp
        | NonTerm::Sign
        | NonTerm::RelOp => take_at(children, 0),

        // CLASSDECL ::= class id OPTCLASSDECL2 { REPTCLASSDECL4 } ;
        NonTerm::ClassDecl => {
            let mut class_node = TreeNode::new("ClassDecl");
            append_if_present(&mut class_node, take_terminal(children, Terminal::Id));
            append_if_present(
                &mut class_node,
                take_nonterm(children, NonTerm::OptClassDecl2),
            );
            if let Some(members) = take_nonterm(children, NonTerm::ReptClassDecl4) {
                extend_with_children(&mut class_node, members);
            }
            Some(class_node)
        }

        // Optional inheritance list: isa id, id, ...
        NonTerm::OptClassDecl2 => {
            if is_epsilon_production(rhs) {
                return None;
            }
            let mut list = TreeNode::new("InheritList");
            append_if_present(&mut list, take_terminal(children, Terminal::Id));
            if let Some(tail) = take_nonterm(children, NonTerm::ReptOptClassDecl22) {
                extend_with_children(&mut list, tail);
            }
            Some(list)
        }

        NonTerm::ReptOptClassDecl22 => {
            let mut list = TreeNode::new("InheritTail");
            if is_epsilon_production(rhs) {
                return Some(list);
            }
            append_if_present(&mut list, take_terminal(children, Terminal::Id));
            if let Some(rest) = take_nonterm(children, NonTerm::ReptOptClassDecl22) {
                extend_with_children(&mut list, rest);
            }
            Some(list)
        }

        // Class members, each optionally wrapped with its visibility.
        NonTerm::ReptClassDecl4 => {
            let mut list = TreeNode::new("MemberList");
            if is_epsilon_production(rhs) {
                return Some(list);
            }
            let visibility = take_nonterm(children, NonTerm::Visibility);
            let member = take_nonterm(children, NonTerm::MemberDecl);
            if let Some(member) = member {
                if let Some(visibility) = visibility {
                    let mut wrapper = TreeNode::new("MemberDecl");
                    wrapper.add_child(visibility);
                    wrapper.add_child(member);
                    list.add_child(wrapper);
                } else {
                    list.add_child(member);
                }
            }
            if let Some(rest) = take_nonterm(children, NonTerm::ReptClassDecl4) {
                extend_with_children(&mut list, rest);
            }
            Some(list)
        }

        // MEMBERFUNCDECL ::= function id ( FPARAMS ) => RETURNTYPE ;
        //                  | constructor ( FPARAMS ) ;
        NonTerm::MemberFuncDecl => {
            if rhs.first() == Some(&Symbol::Terminal(Terminal::Constructor)) {
                let mut ctor = TreeNode::new("Constructor");
                if let Some(params) = take_nonterm(children, NonTerm::FParams) {
                    extend_with_children(&mut ctor, params);
                }
                return Some(ctor);
            }
            let mut decl = TreeNode::new("MemberFuncDecl");
            append_if_present(&mut decl, take_terminal(children, Terminal::Id));
            if let Some(params) = take_nonterm(children, NonTerm::FParams) {
                extend_with_children(&mut decl, params);
            }
            append_if_present(&mut decl, take_nonterm(children, NonTerm::ReturnType));
            Some(decl)
        }

        // MEMBERVARDECL ::= attribute id : TYPE dims ;
        NonTerm::MemberVarDecl => {
            let id = take_terminal(children, Terminal::Id);
            let ty = take_nonterm(children, NonTerm::Type);
            let mut var = factory::make_var_decl(id, ty, None);
            if let Some(dims) = take_nonterm(children, NonTerm::ReptMemberVarDecl4) {
                extend_with_children(&mut var, dims);
            }
            Some(var)
        }

        // FUNCDEF ::= FUNCHEAD FUNCBODY
        NonTerm::FuncDef => Some(factory::make_func_def(
            take_nonterm(children, NonTerm::FuncHead),
            take_nonterm(children, NonTerm::FuncBody),
        )),

        // FUNCHEAD: declaration with optional scope, params, return type.
        NonTerm::FuncHead => {
            let mut decl = TreeNode::new("FunctionDecl");
            append_if_present(&mut decl, take_nonterm(children, NonTerm::OptFuncHead1));
            append_if_present(&mut decl, take_terminal(children, Terminal::Id));
            if let Some(params) = take_nonterm(children, NonTerm::FParams) {
                extend_with_children(&mut decl, params);
            }
            append_if_present(&mut decl, take_nonterm(children, NonTerm::ReturnType));
            Some(decl)
        }

        // Optional class scope qualifier: id ::
        NonTerm::OptFuncHead1 => {
            if is_epsilon_production(rhs) {
                return None;
            }
            take_terminal(children, Terminal::Id).map(|id| {
                let mut scope = TreeNode::new("ScopeResolution");
                scope.add_child(id);
                scope
            })
        }

        NonTerm::FuncBody => {
            let mut block = TreeNode::new("Block");
            if let Some(stmts) = take_nonterm(children, NonTerm::ReptFuncBody1) {
                extend_with_children(&mut block, stmts);
            }
            Some(block)
        }

        NonTerm::ReptFuncBody1 => {
            let mut list = TreeNode::new("StmtList");
            if is_epsilon_production(rhs) {
                return Some(list);
            }
            append_if_present(&mut list, take_nonterm(children, NonTerm::LocalVarDeclOrStmt));
            if let Some(rest) = take_nonterm(children, NonTerm::ReptFuncBody1) {
                extend_with_children(&mut list, rest);
            }
            Some(list)
        }

        NonTerm::ReptStatBlock1 => {
            let mut list = TreeNode::new("StmtList");
            if is_epsilon_production(rhs) {
                return Some(list);
            }
            append_if_present(&mut list, take_nonterm(children, NonTerm::Statement));
            if let Some(rest) = take_nonterm(children, NonTerm::ReptStatBlock1) {
                extend_with_children(&mut list, rest);
            }
            Some(list)
        }

        // LOCALVARDECL ::= localvar id : TYPE dims ; or the inlined
        // constructor-call form with APARAMS.
        NonTerm::LocalVarDecl => {
            let id = take_terminal(children, Terminal::Id);
            let ty = take_nonterm(children, NonTerm::Type);
            let init = take_nonterm(children, NonTerm::AParams).map(|params| {
                let mut init = TreeNode::new("InitializerCall");
                extend_with_children(&mut init, params);
                init
            });
            let mut var = factory::make_var_decl(id, ty, init);
            if let Some(dims) = take_nonterm(children, NonTerm::ReptLocalVarDecl4) {
                extend_with_children(&mut var, dims);
            }
            Some(var)
        }

        // STATEMENT: discriminate on the first right-hand-side symbol.
        NonTerm::Statement => match rhs.first().copied() {
            Some(Symbol::NonTerminal(NonTerm::AssignStat)) => take_at(children, 0),

            Some(Symbol::NonTerminal(NonTerm::FunctionCall)) => {
                let mut stmt = TreeNode::new("CallStmt");
                append_if_present(&mut stmt, take_at(children, 0));
                Some(stmt)
            }

            Some(Symbol::Terminal(Terminal::Return)) => {
                let mut stmt = TreeNode::new("ReturnStmt");
                append_if_present(&mut stmt, take_nonterm(children, NonTerm::Expr));
                Some(stmt)
            }

            Some(Symbol::Terminal(Terminal::Write)) => {
                let mut stmt = TreeNode::new("WriteStmt");
                append_if_present(&mut stmt, take_nonterm(children, NonTerm::Expr));
                Some(stmt)
            }

            Some(Symbol::Terminal(Terminal::Read)) => {
                let mut stmt = TreeNode::new("ReadStmt");
                append_if_present(&mut stmt, take_nonterm(children, NonTerm::Variable));
                Some(stmt)
            }

            Some(Symbol::Terminal(Terminal::While)) => Some(factory::make_while(
                take_nonterm(children, NonTerm::RelExpr),
                take_nonterm(children, NonTerm::StatBlock),
            )),

            Some(Symbol::Terminal(Terminal::If)) => {
                let cond = take_nonterm(children, NonTerm::RelExpr);
                let then_block = take_nonterm(children, NonTerm::StatBlock);
                // Second STATBLOCK occurrence in the two-block shape, or
                // the OPTELSE wrapper in the optional-else shape.
                let else_block = take_nonterm(children, NonTerm::StatBlock)
                    .or_else(|| take_nonterm(children, NonTerm::OptElse));
                Some(factory::make_if(cond, then_block, else_block))
            }

            // Inlined member assignment: id . id = EXPR ;
            Some(Symbol::Terminal(Terminal::Id)) => {
                let object = take_terminal(children, Terminal::Id);
                let member = take_terminal(children, Terminal::Id);
                let expr = take_nonterm(children, NonTerm::Expr);

                let mut access = TreeNode::new("MemberAccess");
                append_if_present(&mut access, object);
                let mut target = TreeNode::new("Variable");
                target.add_child(access);
                append_if_present(&mut target, member);

                Some(factory::make_assign(Some(target), expr))
            }

            // Chained member assignment: VARIABLE ASSIGNOP EXPR ;
            Some(Symbol::NonTerminal(NonTerm::Variable)) => Some(factory::make_assign(
                take_nonterm(children, NonTerm::Variable),
                take_nonterm(children, NonTerm::Expr),
            )),

            _ => take_at(children, 0),
        },

        NonTerm::AssignStat => Some(factory::make_assign(
            take_nonterm(children, NonTerm::Variable),
            take_nonterm(children, NonTerm::Expr),
        )),

        // Normalize the three block forms into one Block node.
        NonTerm::StatBlock => {
            if rhs.len() == 1 && rhs[0] == Symbol::NonTerminal(NonTerm::Statement) {
                return take_at(children, 0);
            }
            let mut block = TreeNode::new("Block");
            if is_epsilon_production(rhs) {
                return Some(block);
            }
            if let Some(stmts) = take_nonterm(children, NonTerm::ReptStatBlock1) {
                extend_with_children(&mut block, stmts);
            }
            Some(block)
        }

        // The else part elides entirely when absent.
        NonTerm::OptElse => {
            if is_epsilon_production(rhs) {
                return None;
            }
            take_nonterm(children, NonTerm::StatBlock)
        }

        // RELEXPR ::= ARITHEXPR RELEXPRTAIL (or the flat three-symbol
        // comparison shape).
        NonTerm::RelExpr => {
            let left = take_nonterm(children, NonTerm::ArithExpr);
            if let Some(tail) = take_nonterm(children, NonTerm::RelExprTail) {
                let mut parts = tail.into_children().into_iter();
                let op = parts.next();
                let right = parts.next();
                let spelling = op
                    .as_ref()
                    .and_then(|op| op.value())
                    .map(str::to_string)
                    .or_else(|| op.as_ref().map(|op| op.kind().to_string()))
                    .unwrap_or_default();
                return Some(factory::make_binary(spelling, left, right));
            }
            if rhs.contains(&Symbol::NonTerminal(NonTerm::RelOp)) {
                let op = take_nonterm(children, NonTerm::RelOp);
                let right = take_nonterm(children, NonTerm::ArithExpr);
                let spelling = op
                    .as_ref()
                    .and_then(|op| op.value())
                    .map(str::to_string)
                    .or_else(|| op.as_ref().map(|op| op.kind().to_string()))
                    .unwrap_or_default();
                return Some(factory::make_binary(spelling, left, right));
            }
            left
        }

        NonTerm::RelExprTail => {
            if is_epsilon_production(rhs) {
                return None;
            }
            let mut tail = TreeNode::new("RelTail");
            append_if_present(&mut tail, take_nonterm(children, NonTerm::RelOp));
            append_if_present(&mut tail, take_nonterm(children, NonTerm::ArithExpr));
            Some(tail)
        }

        // Fold the additive chain left-associatively.
        NonTerm::ArithExpr => fold_binary_chain(
            take_nonterm(children, NonTerm::Term),
            take_nonterm(children, NonTerm::RightRecArithExpr),
        ),

        // Fold the multiplicative chain left-associatively.
        NonTerm::Term => fold_binary_chain(
            take_nonterm(children, NonTerm::Factor),
            take_nonterm(children, NonTerm::RightRecTerm),
        ),

        // Accumulate (operator, operand) pairs for later folding; the
        // recursive tail is flattened into the same list.
        NonTerm::RightRecArithExpr | NonTerm::RightRecTerm => {
            let mut list = TreeNode::new(nonterminal.name());
            if is_epsilon_production(rhs) {
                return Some(list);
            }
            append_if_present(&mut list, take_at(children, 0));
            append_if_present(&mut list, take_at(children, 1));
            if let Some(rest) = take_at(children, 2) {
                if rest.kind() == nonterminal.name() {
                    extend_with_children(&mut list, rest);
                } else {
                    list.add_child(rest);
                }
            }
            Some(list)
        }

        // FACTOR: literals, parenthesized expressions, unary operators,
        // and the heuristic-selected variable/call alternatives.
        NonTerm::Factor => {
            if rhs.len() == 3 && rhs.first() == Some(&Symbol::Terminal(Terminal::LPar)) {
                return take_nonterm(children, NonTerm::ArithExpr);
            }
            if rhs.len() == 2 && rhs.first() == Some(&Symbol::NonTerminal(NonTerm::Sign)) {
                let sign = take_at(children, 0);
                let operand = take_at(children, 1);
                let spelling = sign
                    .as_ref()
                    .and_then(|sign| sign.value())
                    .map(str::to_string)
                    .or_else(|| sign.as_ref().map(|sign| sign.kind().to_string()))
                    .unwrap_or_else(|| "+".to_string());
                return Some(factory::make_unary(spelling, operand));
            }
            if rhs.len() == 2 && rhs.first() == Some(&Symbol::Terminal(Terminal::Not)) {
                return Some(factory::make_unary("not", take_at(children, 1)));
            }
            take_at(children, 0)
        }

        // VARIABLE ::= prefix-chain id suffix-indices, all flattened.
        NonTerm::Variable => {
            let mut variable = TreeNode::new("Variable");
            if let Some(prefix) = take_nonterm(children, NonTerm::ReptVariable0) {
                extend_with_children(&mut variable, prefix);
            }
            append_if_present(&mut variable, take_terminal(children, Terminal::Id));
            if let Some(suffix) = take_nonterm(children, NonTerm::ReptVariable2) {
                extend_with_children(&mut variable, suffix);
            }
            Some(variable)
        }

        // FUNCTIONCALL ::= prefix-chain id ( APARAMS ), all flattened.
        NonTerm::FunctionCall => {
            let mut call = TreeNode::new("FunctionCall");
            if let Some(prefix) = take_nonterm(children, NonTerm::ReptFunctionCall0) {
                extend_with_children(&mut call, prefix);
            }
            append_if_present(&mut call, take_terminal(children, Terminal::Id));
            if let Some(args) = take_nonterm(children, NonTerm::AParams) {
                extend_with_children(&mut call, args);
            }
            Some(call)
        }

        // One member-access chain link, in either of its shapes.
        NonTerm::IdNest => {
            let mut nest = TreeNode::new("MemberAccess");
            append_if_present(&mut nest, take_terminal(children, Terminal::Id));
            if let Some(indices) = take_nonterm(children, NonTerm::ReptIdNest1) {
                extend_with_children(&mut nest, indices);
            }
            if let Some(args) = take_nonterm(children, NonTerm::AParams) {
                let mut call = TreeNode::new("MethodCall");
                extend_with_children(&mut call, args);
                nest.add_child(call);
            }
            Some(nest)
        }

        NonTerm::ReptIdNest1 => {
            let mut list = TreeNode::new("IndiceList");
            if is_epsilon_production(rhs) {
                return Some(list);
            }
            append_if_present(&mut list, take_nonterm(children, NonTerm::Indice));
            if let Some(rest) = take_nonterm(children, NonTerm::ReptIdNest1) {
                extend_with_children(&mut list, rest);
            }
            Some(list)
        }

        NonTerm::ReptVariable0 => {
            let mut list = TreeNode::new("PrefixChain");
            if is_epsilon_production(rhs) {
                return Some(list);
            }
            append_if_present(&mut list, take_nonterm(children, NonTerm::IdNest));
            if let Some(rest) = take_nonterm(children, NonTerm::ReptVariable0) {
                extend_with_children(&mut list, rest);
            }
            Some(list)
        }

        NonTerm::ReptVariable2 => {
            let mut list = TreeNode::new("SuffixIndices");
            if is_epsilon_production(rhs) {
                return Some(list);
            }
            append_if_present(&mut list, take_nonterm(children, NonTerm::Indice));
            if let Some(rest) = take_nonterm(children, NonTerm::ReptVariable2) {
                extend_with_children(&mut list, rest);
            }
            Some(list)
        }

        NonTerm::ReptFunctionCall0 => {
            let mut list = TreeNode::new("CallPrefix");
            if is_epsilon_production(rhs) {
                return Some(list);
            }
            append_if_present(&mut list, take_nonterm(children, NonTerm::IdNest));
            if let Some(rest) = take_nonterm(children, NonTerm::ReptFunctionCall0) {
                extend_with_children(&mut list, rest);
            }
            Some(list)
        }

        NonTerm::ReptVariableOrFunctionCall => {
            let mut list = TreeNode::new(nonterminal.name());
            if is_epsilon_production(rhs) {
                return Some(list);
            }
            append_if_present(&mut list, take_nonterm(children, NonTerm::IdNest));
            if let Some(rest) = take_nonterm(children, NonTerm::ReptVariableOrFunctionCall) {
                extend_with_children(&mut list, rest);
            }
            Some(list)
        }

        // INDICE ::= [ ARITHEXPR ]
        NonTerm::Indice => {
            let mut index = TreeNode::new("Index");
            append_if_present(&mut index, take_nonterm(children, NonTerm::ArithExpr));
            Some(index)
        }

        // ARRAYSIZE ::= [ intlit ] | [ ]
        NonTerm::ArraySize => {
            let mut dim = TreeNode::new("ArrayDim");
            append_if_present(&mut dim, take_terminal(children, Terminal::IntLit));
            Some(dim)
        }

        // Array dimension lists share one shape.
        NonTerm::ReptMemberVarDecl4
        | NonTerm::ReptLocalVarDecl4
        | NonTerm::ReptFParams3
        | NonTerm::ReptFParamsTail4 => {
            let mut list = TreeNode::new("DimList");
            if is_epsilon_production(rhs) {
                return Some(list);
            }
            append_if_present(&mut list, take_nonterm(children, NonTerm::ArraySize));
            if let Some(rest) = take_nonterm(children, nonterminal) {
                extend_with_children(&mut list, rest);
            }
            Some(list)
        }

        // FPARAMS ::= id : TYPE dims tail | EPSILON
        NonTerm::FParams => {
            let mut param_list = TreeNode::new("ParamList");
            if is_epsilon_production(rhs) {
                return Some(param_list);
            }
            let mut param = TreeNode::new("Param");
            append_if_present(&mut param, take_terminal(children, Terminal::Id));
            append_if_present(&mut param, take_nonterm(children, NonTerm::Type));
            if let Some(dims) = take_nonterm(children, NonTerm::ReptFParams3) {
                extend_with_children(&mut param, dims);
            }
            param_list.add_child(param);
            if let Some(tail) = take_nonterm(children, NonTerm::ReptFParams4) {
                extend_with_children(&mut param_list, tail);
            }
            Some(param_list)
        }

        NonTerm::ReptFParams4 => {
            let mut list = TreeNode::new("ParamTail");
            if is_epsilon_production(rhs) {
                return Some(list);
            }
            append_if_present(&mut list, take_nonterm(children, NonTerm::FParamsTail));
            if let Some(rest) = take_nonterm(children, NonTerm::ReptFParams4) {
                extend_with_children(&mut list, rest);
            }
            Some(list)
        }

        // FPARAMSTAIL ::= , id : TYPE dims
        NonTerm::FParamsTail => {
            let mut param = TreeNode::new("Param");
            append_if_present(&mut param, take_terminal(children, Terminal::Id));
            append_if_present(&mut param, take_nonterm(children, NonTerm::Type));
            if let Some(dims) = take_nonterm(children, NonTerm::ReptFParamsTail4) {
                extend_with_children(&mut param, dims);
            }
            Some(param)
        }

        // APARAMS: argument list, unwrapping tail ArgumentExpr wrappers.
        NonTerm::AParams => {
            let mut list = TreeNode::new("ArgumentList");
            if is_epsilon_production(rhs) {
                return Some(list);
            }
            append_if_present(&mut list, take_nonterm(children, NonTerm::Expr));
            if let Some(tail) = take_nonterm(children, NonTerm::ReptAParams1) {
                for arg in tail.into_children() {
                    if arg.kind() == "ArgumentExpr" && !arg.is_leaf() {
                        if let Some(first) = arg.into_children().into_iter().next() {
                            list.add_child(first);
                        }
                    } else {
                        list.add_child(arg);
                    }
                }
            }
            Some(list)
        }

        NonTerm::ReptAParams1 => {
            let mut list = TreeNode::new("ArgumentTail");
            if is_epsilon_production(rhs) {
                return Some(list);
            }
            if let Some(tail) = take_nonterm(children, NonTerm::AParamsTail) {
                extend_with_children(&mut list, tail);
            }
            if let Some(rest) = take_nonterm(children, NonTerm::ReptAParams1) {
                extend_with_children(&mut list, rest);
            }
            Some(list)
        }

        // APARAMSTAIL ::= , EXPR
        NonTerm::AParamsTail => {
            let mut arg = TreeNode::new("ArgumentExpr");
            append_if_present(&mut arg, take_nonterm(children, NonTerm::Expr));
            Some(arg)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn nt(nonterminal: NonTerm) -> Symbol {
        Symbol::NonTerminal(nonterminal)
    }

    fn t(terminal: Terminal) -> Symbol {
        Symbol::Terminal(terminal)
    }

    fn child(symbol: Symbol, node: TreeNode) -> ChildValue {
        ChildValue::new(symbol, Some(node))
    }

    fn int_leaf(text: &str) -> TreeNode {
        TreeNode::with_value("IntLiteral", text)
    }

    fn op_leaf(text: &str) -> TreeNode {
        TreeNode::with_value("Operator", text)
    }

    #[test]
    fn additive_chain_folds_left_associatively() {
        // 1 + 2 + 3 arrives as TERM plus the flat chain [+ 2 + 3].
        let mut chain = TreeNode::new("RIGHTRECARITHEXPR");
        chain.add_child(op_leaf("+"));
        chain.add_child(int_leaf("2"));
        chain.add_child(op_leaf("+"));
        chain.add_child(int_leaf("3"));

        let children = vec![
            child(nt(NonTerm::Term), int_leaf("1")),
            child(nt(NonTerm::RightRecArithExpr), chain),
        ];
        let rhs = [nt(NonTerm::Term), nt(NonTerm::RightRecArithExpr)];
        let node = build_node(NonTerm::ArithExpr, &rhs, children).unwrap();

        // ((1 + 2) + 3): the outer node's left child is itself a BinaryExpr.
        assert_eq!(node.kind(), "BinaryExpr");
        assert_eq!(node.value(), Some("+"));
        assert_eq!(node.children()[0].kind(), "BinaryExpr");
        assert_eq!(node.children()[0].children()[0].value(), Some("1"));
        assert_eq!(node.children()[0].children()[1].value(), Some("2"));
        assert_eq!(node.children()[1].value(), Some("3"));
    }

    #[test]
    fn chain_tails_flatten_instead_of_nesting() {
        // RIGHTRECARITHEXPR ::= ADDOP TERM RIGHTRECARITHEXPR where the tail
        // is already a two-entry list.
        let mut tail = TreeNode::new("RIGHTRECARITHEXPR");
        tail.add_child(op_leaf("+"));
        tail.add_child(int_leaf("3"));

        let rhs = [
            nt(NonTerm::AddOp),
            nt(NonTerm::Term),
            nt(NonTerm::RightRecArithExpr),
        ];
        let children = vec![
            child(nt(NonTerm::AddOp), op_leaf("+")),
            child(nt(NonTerm::Term), int_leaf("2")),
            child(nt(NonTerm::RightRecArithExpr), tail),
        ];
        let node = build_node(NonTerm::RightRecArithExpr, &rhs, children).unwrap();

        assert_eq!(node.kind(), "RIGHTRECARITHEXPR");
        let labels: Vec<_> = node.children().iter().map(TreeNode::label).collect();
        assert_eq!(
            labels,
            vec!["Operator: +", "IntLiteral: 2", "Operator: +", "IntLiteral: 3"]
        );
    }

    #[test]
    fn statement_lists_flatten() {
        let mut rest = TreeNode::new("StmtList");
        rest.add_child(TreeNode::new("ReadStmt"));
        rest.add_child(TreeNode::new("WriteStmt"));

        let rhs = [nt(NonTerm::Statement), nt(NonTerm::ReptStatBlock1)];
        let children = vec![
            child(nt(NonTerm::Statement), TreeNode::new("AssignStmt")),
            child(nt(NonTerm::ReptStatBlock1), rest),
        ];
        let node = build_node(NonTerm::ReptStatBlock1, &rhs, children).unwrap();

        assert_eq!(node.kind(), "StmtList");
        assert_eq!(node.children().len(), 3);
        assert!(node.children().iter().all(|c| c.kind().ends_with("Stmt")));
    }

    #[test]
    fn if_without_else_has_two_children() {
        let rhs = [
            t(Terminal::If),
            nt(NonTerm::RelExpr),
            t(Terminal::Then),
            nt(NonTerm::StatBlock),
            nt(NonTerm::OptElse),
            t(Terminal::Semi),
        ];
        let children = vec![
            child(t(Terminal::If), TreeNode::with_value("Keyword", "if")),
            child(nt(NonTerm::RelExpr), TreeNode::with_value("Identifier", "a")),
            ChildValue::new(t(Terminal::Then), None),
            child(nt(NonTerm::StatBlock), TreeNode::new("Block")),
            ChildValue::new(nt(NonTerm::OptElse), None),
            ChildValue::new(t(Terminal::Semi), None),
        ];
        let node = build_node(NonTerm::Statement, &rhs, children).unwrap();

        assert_eq!(node.kind(), "IfStmt");
        assert_eq!(node.children().len(), 2);
    }

    #[test]
    fn repeated_takes_walk_occurrences_even_past_null_slots() {
        let mut children = vec![
            ChildValue::new(t(Terminal::Id), None),
            child(t(Terminal::Id), TreeNode::with_value("Identifier", "second")),
        ];
        // The first take consumes the null slot; the second reaches the
        // real node.
        assert_eq!(take_terminal(&mut children, Terminal::Id), None);
        let second = take_terminal(&mut children, Terminal::Id).unwrap();
        assert_eq!(second.value(), Some("second"));
        assert_eq!(take_terminal(&mut children, Terminal::Id), None);
    }

    #[test]
    fn epsilon_lists_are_empty() {
        let rhs = [Symbol::Epsilon];
        let node = build_node(NonTerm::ReptStatBlock1, &rhs, Vec::new()).unwrap();
        assert_eq!(node.kind(), "StmtList");
        assert!(node.is_leaf());

        assert!(build_node(NonTerm::OptElse, &rhs, Vec::new()).is_none());
        assert!(build_node(NonTerm::OptClassDecl2, &rhs, Vec::new()).is_none());
    }

    #[test]
    fn leaf_synthesis_canonicalizes_operators() {
        use crate::lexer::token::TokenKind;
        use crate::span::Span;

        let token = Token {
            kind: TokenKind::NotEq,
            lexeme: "<>".to_string(),
            span: Span { line: 3, column: 5 },
        };
        let leaf = leaf_for_terminal(Terminal::Neq, &token).unwrap();
        assert_eq!(leaf.kind(), "Operator");
        assert_eq!(leaf.value(), Some("!="));
        let span = leaf.span().unwrap();
        assert_eq!((span.line_start, span.column_start), (3, 5));
        assert_eq!((span.line_end, span.column_end), (3, 7));

        // Punctuation synthesizes no value of its own.
        let semi = Token {
            kind: TokenKind::Semi,
            lexeme: ";".to_string(),
            span: Span { line: 3, column: 8 },
        };
        assert!(leaf_for_terminal(Terminal::Semi, &semi).is_none());
    }
}
