/*
 * ==========================================================================
 * PROWL - Parse with Claws!
 * ==========================================================================
 *
 * File:      symbol.rs
 * Purpose:   The closed grammar-symbol vocabulary: terminals, nonterminals,
 *            and the epsilon sentinel.
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

use std::fmt;

/// A grammar terminal, matched directly against mapped input tokens.
///
/// Every variant knows its grammar spelling (`name`), which is also the
/// spelling used in parsing-table headers and in derivation output. The
/// end-of-input marker `$` is a terminal like any other; it only gets
/// special treatment in the engine's dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Terminal {
    Id,
    IntLit,
    FloatLit,
    Integer,
    Float,
    Void,
    Class,
    Isa,
    Function,
    Constructor,
    Attribute,
    Public,
    Private,
    LocalVar,
    If,
    Then,
    Else,
    While,
    Read,
    Write,
    Return,
    And,
    Or,
    Not,
    Eq,
    Neq,
    Lt,
    Gt,
    Leq,
    Geq,
    Plus,
    Minus,
    Mult,
    Div,
    Equal,
    Arrow,
    Sr,
    LPar,
    RPar,
    LSqBr,
    RSqBr,
    LCurBr,
    RCurBr,
    Semi,
    Comma,
    Colon,
    Dot,
    /// The `$` end-of-input marker.
    End,
}

impl Terminal {
    /// The grammar spelling of this terminal.
    pub fn name(self) -> &'static str {
        match self {
            Terminal::Id => "id",
            Terminal::IntLit => "intlit",
            Terminal::FloatLit => "floatlit",
            Terminal::Integer => "integer",
            Terminal::Float => "float",
            Terminal::Void => "void",
            Terminal::Class => "class",
            Terminal::Isa => "isa",
            Terminal::Function => "function",
            Terminal::Constructor => "constructor",
            Terminal::Attribute => "attribute",
            Terminal::Public => "public",
            Terminal::Private => "private",
            Terminal::LocalVar => "localvar",
            Terminal::If => "if",
            Terminal::Then => "then",
            Terminal::Else => "else",
            Terminal::While => "while",
            Terminal::Read => "read",
            Terminal::Write => "write",
            Terminal::Return => "return",
            Terminal::And => "and",
            Terminal::Or => "or",
            Terminal::Not => "not",
            Terminal::Eq => "eq",
            Terminal::Neq => "neq",
            Terminal::Lt => "lt",
            Terminal::Gt => "gt",
            Terminal::Leq => "leq",
            Terminal::Geq => "geq",
            Terminal::Plus => "plus",
            Terminal::Minus => "minus",
            Terminal::Mult => "mult",
            Terminal::Div => "div",
            Terminal::Equal => "equal",
            Terminal::Arrow => "arrow",
            Terminal::Sr => "sr",
            Terminal::LPar => "lpar",
            Terminal::RPar => "rpar",
            Terminal::LSqBr => "lsqbr",
            Terminal::RSqBr => "rsqbr",
            Terminal::LCurBr => "lcurbr",
            Terminal::RCurBr => "rcurbr",
            Terminal::Semi => "semi",
            Terminal::Comma => "comma",
            Terminal::Colon => "colon",
            Terminal::Dot => "dot",
            Terminal::End => "$",
        }
    }

    /// Parses a grammar spelling back into a terminal.
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "id" => Terminal::Id,
            "intlit" | "intLit" => Terminal::IntLit,
            "floatlit" | "floatLit" => Terminal::FloatLit,
            "integer" => Terminal::Integer,
            "float" => Terminal::Float,
            "void" => Terminal::Void,
            "class" => Terminal::Class,
            "isa" => Terminal::Isa,
            "function" => Terminal::Function,
            "constructor" => Terminal::Constructor,
            "attribute" => Terminal::Attribute,
            "public" => Terminal::Public,
            "private" => Terminal::Private,
            "localvar" => Terminal::LocalVar,
            "if" => Terminal::If,
            "then" => Terminal::Then,
            "else" => Terminal::Else,
            "while" => Terminal::While,
            "read" => Terminal::Read,
            "write" => Terminal::Write,
            "return" => Terminal::Return,
            "and" => Terminal::And,
            "or" => Terminal::Or,
            "not" => Terminal::Not,
            "eq" => Terminal::Eq,
            "neq" => Terminal::Neq,
            "lt" => Terminal::Lt,
            "gt" => Terminal::Gt,
            "leq" => Terminal::Leq,
            "geq" => Terminal::Geq,
            "plus" => Terminal::Plus,
            "minus" => Terminal::Minus,
            "mult" => Terminal::Mult,
            "div" => Terminal::Div,
            "equal" => Terminal::Equal,
            "arrow" => Terminal::Arrow,
            "sr" => Terminal::Sr,
            "lpar" => Terminal::LPar,
            "rpar" => Terminal::RPar,
            "lsqbr" => Terminal::LSqBr,
            "rsqbr" => Terminal::RSqBr,
            "lcurbr" => Terminal::LCurBr,
            "rcurbr" => Terminal::RCurBr,
            "semi" => Terminal::Semi,
            "comma" => Terminal::Comma,
            "colon" => Terminal::Colon,
            "dot" => Terminal::Dot,
            "$" => Terminal::End,
            _ => return None,
        })
    }
}

/// A grammar nonterminal, expanded via productions.
///
/// The set is closed over the full table vocabulary, so synthesis dispatch
/// is an exhaustive match and an unknown name is caught when the table is
/// loaded, not in the middle of a parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NonTerm {
    Start,
    ReptStart0,
    ClassDeclOrFuncDef,
    ClassDecl,
    OptClassDecl2,
    ReptOptClassDecl22,
    ReptClassDecl4,
    Visibility,
    MemberDecl,
    MemberFuncDecl,
    MemberVarDecl,
    ReptMemberVarDecl4,
    FuncDef,
    FuncHead,
    OptFuncHead1,
    FuncBody,
    ReptFuncBody1,
    LocalVarDeclOrStmt,
    LocalVarDecl,
    ReptLocalVarDecl4,
    Statement,
    AssignStat,
    AssignOp,
    OptElse,
    StatBlock,
    ReptStatBlock1,
    Expr,
    RelExpr,
    RelExprTail,
    ArithExpr,
    RightRecArithExpr,
    Term,
    RightRecTerm,
    Factor,
    Variable,
    ReptVariable0,
    ReptVariable2,
    Indice,
    FunctionCall,
    ReptFunctionCall0,
    IdNest,
    ReptIdNest1,
    ReptVariableOrFunctionCall,
    ArraySize,
    FParams,
    ReptFParams3,
    ReptFParams4,
    FParamsTail,
    ReptFParamsTail4,
    AParams,
    ReptAParams1,
    AParamsTail,
    ReturnType,
    Type,
    AddOp,
    MultOp,
    RelOp,
    Sign,
}

impl NonTerm {
    /// The grammar spelling of this nonterminal.
    pub fn name(self) -> &'static str {
        match self {
            NonTerm::Start => "START",
            NonTerm::ReptStart0 => "REPTSTART0",
            NonTerm::ClassDeclOrFuncDef => "CLASSDECLORFUNCDEF",
            NonTerm::ClassDecl => "CLASSDECL",
            NonTerm::OptClassDecl2 => "OPTCLASSDECL2",
            NonTerm::ReptOptClassDecl22 => "REPTOPTCLASSDECL22",
            NonTerm::ReptClassDecl4 => "REPTCLASSDECL4",
            NonTerm::Visibility => "VISIBILITY",
            NonTerm::MemberDecl => "MEMBERDECL",
            NonTerm::MemberFuncDecl => "MEMBERFUNCDECL",
            NonTerm::MemberVarDecl => "MEMBERVARDECL",
            NonTerm::ReptMemberVarDecl4 => "REPTMEMBERVARDECL4",
            NonTerm::FuncDef => "FUNCDEF",
            NonTerm::FuncHead => "FUNCHEAD",
            NonTerm::OptFuncHead1 => "OPTFUNCHEAD1",
            NonTerm::FuncBody => "FUNCBODY",
            NonTerm::ReptFuncBody1 => "REPTFUNCBODY1",
            NonTerm::LocalVarDeclOrStmt => "LOCALVARDECLORSTMT",
            NonTerm::LocalVarDecl => "LOCALVARDECL",
            NonTerm::ReptLocalVarDecl4 => "REPTLOCALVARDECL4",
            NonTerm::Statement => "STATEMENT",
            NonTerm::AssignStat => "ASSIGNSTAT",
            NonTerm::AssignOp => "ASSIGNOP",
            NonTerm::OptElse => "OPTELSE",
            NonTerm::StatBlock => "STATBLOCK",
            NonTerm::ReptStatBlock1 => "REPTSTATBLOCK1",
            NonTerm::Expr => "EXPR",
            NonTerm::RelExpr => "RELEXPR",
            NonTerm::RelExprTail => "RELEXPRTAIL",
            NonTerm::ArithExpr => "ARITHEXPR",
            NonTerm::RightRecArithExpr => "RIGHTRECARITHEXPR",
            NonTerm::Term => "TERM",
            NonTerm::RightRecTerm => "RIGHTRECTERM",
            NonTerm::Factor => "FACTOR",
            NonTerm::Variable => "VARIABLE",
            NonTerm::ReptVariable0 => "REPTVARIABLE0",
            NonTerm::ReptVariable2 => "REPTVARIABLE2",
            NonTerm::Indice => "INDICE",
            NonTerm::FunctionCall => "FUNCTIONCALL",
            NonTerm::ReptFunctionCall0 => "REPTFUNCTIONCALL0",
            NonTerm::IdNest => "IDNEST",
            NonTerm::ReptIdNest1 => "REPTIDNEST1",
            NonTerm::ReptVariableOrFunctionCall => "REPTVARIABLEORFUNCTIONCALL",
            NonTerm::ArraySize => "ARRAYSIZE",
            NonTerm::FParams => "FPARAMS",
            NonTerm::ReptFParams3 => "REPTFPARAMS3",
            NonTerm::ReptFParams4 => "REPTFPARAMS4",
            NonTerm::FParamsTail => "FPARAMSTAIL",
            NonTerm::ReptFParamsTail4 => "REPTFPARAMSTAIL4",
            NonTerm::AParams => "APARAMS",
            NonTerm::ReptAParams1 => "REPTAPARAMS1",
            NonTerm::AParamsTail => "APARAMSTAIL",
            NonTerm::ReturnType => "RETURNTYPE",
            NonTerm::Type => "TYPE",
            NonTerm::AddOp => "ADDOP",
            NonTerm::MultOp => "MULTOP",
            NonTerm::RelOp => "RELOP",
            NonTerm::Sign => "SIGN",
        }
    }

    /// Parses a grammar spelling back into a nonterminal.
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "START" => NonTerm::Start,
            "REPTSTART0" => NonTerm::ReptStart0,
            "CLASSDECLORFUNCDEF" => NonTerm::ClassDeclOrFuncDef,
            "CLASSDECL" => NonTerm::ClassDecl,
            "OPTCLASSDECL2" => NonTerm::OptClassDecl2,
            "REPTOPTCLASSDECL22" => NonTerm::ReptOptClassDecl22,
            "REPTCLASSDECL4" => NonTerm::ReptClassDecl4,
            "VISIBILITY" => NonTerm::Visibility,
            "MEMBERDECL" => NonTerm::MemberDecl,
            "MEMBERFUNCDECL" => NonTerm::MemberFuncDecl,
            "MEMBERVARDECL" => NonTerm::MemberVarDecl,
            "REPTMEMBERVARDECL4" => NonTerm::ReptMemberVarDecl4,
            "FUNCDEF" => NonTerm::FuncDef,
            "FUNCHEAD" => NonTerm::FuncHead,
            "OPTFUNCHEAD1" => NonTerm::OptFuncHead1,
            "FUNCBODY" => NonTerm::FuncBody,
            "REPTFUNCBODY1" => NonTerm::ReptFuncBody1,
            "LOCALVARDECLORSTMT" => NonTerm::LocalVarDeclOrStmt,
            "LOCALVARDECL" => NonTerm::LocalVarDecl,
            "REPTLOCALVARDECL4" => NonTerm::ReptLocalVarDecl4,
            "STATEMENT" => NonTerm::Statement,
            "ASSIGNSTAT" => NonTerm::AssignStat,
            "ASSIGNOP" => NonTerm::AssignOp,
            "OPTELSE" => NonTerm::OptElse,
            "STATBLOCK" => NonTerm::StatBlock,
            "REPTSTATBLOCK1" => NonTerm::ReptStatBlock1,
            "EXPR" => NonTerm::Expr,
            "RELEXPR" => NonTerm::RelExpr,
            "RELEXPRTAIL" => NonTerm::RelExprTail,
            "ARITHEXPR" => NonTerm::ArithExpr,
            "RIGHTRECARITHEXPR" => NonTerm::RightRecArithExpr,
            "TERM" => NonTerm::Term,
            "RIGHTRECTERM" => NonTerm::RightRecTerm,
            "FACTOR" => NonTerm::Factor,
            "VARIABLE" => NonTerm::Variable,
            "REPTVARIABLE0" => NonTerm::ReptVariable0,
            "REPTVARIABLE2" => NonTerm::ReptVariable2,
            "INDICE" => NonTerm::Indice,
            "FUNCTIONCALL" => NonTerm::FunctionCall,
            "REPTFUNCTIONCALL0" => NonTerm::ReptFunctionCall0,
            "IDNEST" => NonTerm::IdNest,
            "REPTIDNEST1" => NonTerm::ReptIdNest1,
            "REPTVARIABLEORFUNCTIONCALL" => NonTerm::ReptVariableOrFunctionCall,
            "ARRAYSIZE" => NonTerm::ArraySize,
            "FPARAMS" => NonTerm::FParams,
            "REPTFPARAMS3" => NonTerm::ReptFParams3,
            "REPTFPARAMS4" => NonTerm::ReptFParams4,
            "FPARAMSTAIL" => NonTerm::FParamsTail,
            "REPTFPARAMSTAIL4" => NonTerm::ReptFParamsTail4,
            "APARAMS" => NonTerm::AParams,
            "REPTAPARAMS1" => NonTerm::ReptAParams1,
            "APARAMSTAIL" => NonTerm::AParamsTail,
            "RETURNTYPE" => NonTerm::ReturnType,
            "TYPE" => NonTerm::Type,
            "ADDOP" => NonTerm::AddOp,
            "MULTOP" => NonTerm::MultOp,
            "RELOP" => NonTerm::RelOp,
            "SIGN" => NonTerm::Sign,
            _ => return None,
        })
    }
}

/// One symbol of a production right-hand side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Symbol {
    Terminal(Terminal),
    NonTerminal(NonTerm),
    /// The empty production sentinel: matches nothing, consumes no input.
    Epsilon,
}

/// The epsilon sentinel spelling and its HTML-entity alias, both accepted
/// in table cells.
const EPSILON_NAMES: [&str; 2] = ["EPSILON", "&epsilon"];

/// The naming convention that classifies a spelling as a nonterminal:
/// a leading uppercase letter, or `<...>` delimiters.
///
/// Derivation bookkeeping and table loading both rely on this exact rule.
pub fn looks_like_nonterminal(name: &str) -> bool {
    if name.is_empty() {
        return false;
    }
    if name.starts_with('<') && name.ends_with('>') {
        return true;
    }
    name.chars().next().is_some_and(|c| c.is_ascii_uppercase())
}

impl Symbol {
    /// Classifies and parses one spelling from a table cell.
    ///
    /// Angle-bracket delimiters are stripped before the nonterminal lookup,
    /// so `<ARITHEXPR>` and `ARITHEXPR` name the same symbol.
    pub fn from_name(name: &str) -> Option<Self> {
        if EPSILON_NAMES.contains(&name) {
            return Some(Symbol::Epsilon);
        }
        if looks_like_nonterminal(name) {
            let bare = name
                .strip_prefix('<')
                .and_then(|n| n.strip_suffix('>'))
                .unwrap_or(name);
            return NonTerm::from_name(bare).map(Symbol::NonTerminal);
        }
        Terminal::from_name(name).map(Symbol::Terminal)
    }

    /// The grammar spelling of this symbol.
    pub fn name(self) -> &'static str {
        match self {
            Symbol::Terminal(t) => t.name(),
            Symbol::NonTerminal(nt) => nt.name(),
            Symbol::Epsilon => "EPSILON",
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// True for the single-symbol epsilon right-hand side.
pub fn is_epsilon_production(rhs: &[Symbol]) -> bool {
    rhs.len() == 1 && rhs[0] == Symbol::Epsilon
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification_follows_the_naming_convention() {
        assert_eq!(
            Symbol::from_name("ARITHEXPR"),
            Some(Symbol::NonTerminal(NonTerm::ArithExpr))
        );
        assert_eq!(
            Symbol::from_name("<ARITHEXPR>"),
            Some(Symbol::NonTerminal(NonTerm::ArithExpr))
        );
        assert_eq!(
            Symbol::from_name("id"),
            Some(Symbol::Terminal(Terminal::Id))
        );
        assert_eq!(
            Symbol::from_name("$"),
            Some(Symbol::Terminal(Terminal::End))
        );
        assert_eq!(Symbol::from_name("EPSILON"), Some(Symbol::Epsilon));
        assert_eq!(Symbol::from_name("&epsilon"), Some(Symbol::Epsilon));
        assert_eq!(Symbol::from_name("NOSUCHRULE"), None);
        assert_eq!(Symbol::from_name("nosuchterm"), None);
    }

    #[test]
    fn names_round_trip() {
        for symbol in [
            Symbol::Terminal(Terminal::LSqBr),
            Symbol::Terminal(Terminal::End),
            Symbol::NonTerminal(NonTerm::ReptFunctionCall0),
            Symbol::NonTerminal(NonTerm::Start),
        ] {
            assert_eq!(Symbol::from_name(symbol.name()), Some(symbol));
        }
    }

    #[test]
    fn epsilon_production_shape() {
        assert!(is_epsilon_production(&[Symbol::Epsilon]));
        assert!(!is_epsilon_production(&[
            Symbol::Terminal(Terminal::Id),
            Symbol::Epsilon
        ]));
        assert!(!is_epsilon_production(&[]));
    }
}
