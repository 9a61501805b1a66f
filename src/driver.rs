/*
 * ==========================================================================
 * PROWL - Parse with Claws!
 * ==========================================================================
 *
 * File:      driver.rs
 * Purpose:   Per-unit orchestration: tokenize, map tokens to grammar
 *            terminals, parse, and write the artifact set.
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

use crate::ast::{printer, TreeNode};
use crate::diagnostics::DiagnosticPrinter;
use crate::error::{DriverError, SyntaxError, SyntaxErrorKind};
use crate::grammar::symbol::Terminal;
use crate::grammar::table::ParseTable;
use crate::lexer::token::{Token, TokenKind};
use crate::lexer::tokenize;
use crate::parser::{self, MappedToken};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// The outcome of the token→terminal mapping, with its three reserved
/// non-terminal results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenClass {
    /// Maps to a grammar terminal.
    Terminal(Terminal),
    /// Consumed but never enters the parser (comments).
    Skip,
    /// Malformed token; logged, then skipped.
    LexError,
    /// No terminal mapping exists; logged, then skipped.
    Unknown,
    /// The end-of-input token.
    End,
}

impl TokenClass {
    /// The bracketed label written to the `.outtokens` artifact.
    pub fn label(self) -> &'static str {
        match self {
            TokenClass::Terminal(terminal) => terminal.name(),
            TokenClass::Skip => "__SKIP__",
            TokenClass::LexError => "__LEXERR__",
            TokenClass::Unknown => "__UNKNOWN__",
            TokenClass::End => "$",
        }
    }
}

/// Maps one token to its grammar terminal.
///
/// Keywords map by lexeme; `self` deliberately maps to the `id` terminal
/// because the grammar treats it as an ordinary variable name. The
/// catch-all keyword arm is the only road to `Unknown`: the keyword set
/// and this mapping are maintained together, so it fires only if they
/// drift apart.
pub fn classify(token: &Token) -> TokenClass {
    use TokenClass::Terminal as Term;

    match token.kind {
        TokenKind::IntNum => Term(Terminal::IntLit),
        TokenKind::FloatNum => Term(Terminal::FloatLit),
        TokenKind::Id => Term(Terminal::Id),

        TokenKind::Keyword => match token.lexeme.as_str() {
            "integer" => Term(Terminal::Integer),
            "float" => Term(Terminal::Float),
            "void" => Term(Terminal::Void),
            "class" => Term(Terminal::Class),
            "return" => Term(Terminal::Return),
            "while" => Term(Terminal::While),
            "if" => Term(Terminal::If),
            "then" => Term(Terminal::Then),
            "else" => Term(Terminal::Else),
            "function" => Term(Terminal::Function),
            "constructor" => Term(Terminal::Constructor),
            "attribute" => Term(Terminal::Attribute),
            "public" => Term(Terminal::Public),
            "private" => Term(Terminal::Private),
            "read" => Term(Terminal::Read),
            "write" => Term(Terminal::Write),
            "and" => Term(Terminal::And),
            "or" => Term(Terminal::Or),
            "not" => Term(Terminal::Not),
            "isa" => Term(Terminal::Isa),
            "localvar" => Term(Terminal::LocalVar),
            "self" => Term(Terminal::Id),
            _ => TokenClass::Unknown,
        },

        TokenKind::Eq => Term(Terminal::Eq),
        TokenKind::NotEq => Term(Terminal::Neq),
        TokenKind::Lt => Term(Terminal::Lt),
        TokenKind::Gt => Term(Terminal::Gt),
        TokenKind::Leq => Term(Terminal::Leq),
        TokenKind::Geq => Term(Terminal::Geq),
        TokenKind::ReturnType => Term(Terminal::Arrow),
        TokenKind::ScopeOp => Term(Terminal::Sr),
        TokenKind::Assign => Term(Terminal::Equal),

        TokenKind::OpenPar => Term(Terminal::LPar),
        TokenKind::ClosePar => Term(Terminal::RPar),
        TokenKind::OpenSqBr => Term(Terminal::LSqBr),
        TokenKind::CloseSqBr => Term(Terminal::RSqBr),
        TokenKind::OpenCuBr => Term(Terminal::LCurBr),
        TokenKind::CloseCuBr => Term(Terminal::RCurBr),
        TokenKind::Semi => Term(Terminal::Semi),
        TokenKind::Comma => Term(Terminal::Comma),
        TokenKind::Colon => Term(Terminal::Colon),
        TokenKind::Dot => Term(Terminal::Dot),
        TokenKind::Plus => Term(Terminal::Plus),
        TokenKind::Minus => Term(Terminal::Minus),
        TokenKind::Mult => Term(Terminal::Mult),
        TokenKind::Div => Term(Terminal::Div),

        TokenKind::InlineCmt | TokenKind::BlockCmt => TokenClass::Skip,

        TokenKind::InvalidId
        | TokenKind::InvalidNum
        | TokenKind::InvalidChar
        | TokenKind::InvalidComment => TokenClass::LexError,

        TokenKind::Eof => TokenClass::End,
    }
}

/// Builds the parser input from a token stream.
///
/// Comments are dropped silently, invalid and unmappable tokens are
/// dropped with a logged error, and the end-of-input token becomes the `$`
/// entry closing the stream.
pub fn map_tokens(tokens: &[Token]) -> (Vec<MappedToken>, Vec<SyntaxError>) {
    let mut input = Vec::new();
    let mut errors = Vec::new();

    for token in tokens {
        match classify(token) {
            TokenClass::Skip => {}
            TokenClass::LexError => {
                errors.push(
                    SyntaxError::new(SyntaxErrorKind::Lexical {
                        line: token.span.line,
                        lexeme: token.lexeme.clone(),
                    })
                    .with_span(token.span),
                );
            }
            TokenClass::End => {
                input.push(MappedToken {
                    term: Terminal::End,
                    token: token.clone(),
                });
                break;
            }
            TokenClass::Unknown => {
                errors.push(
                    SyntaxError::new(SyntaxErrorKind::UnknownToken {
                        line: token.span.line,
                        kind: token.kind_name().to_string(),
                    })
                    .with_span(token.span),
                );
            }
            TokenClass::Terminal(term) => {
                input.push(MappedToken {
                    term,
                    token: token.clone(),
                });
            }
        }
    }

    (input, errors)
}

/// Maps a source fragment to parser input, dropping comments and invalid
/// tokens and omitting the `$` entry.
///
/// Meant for driving sub-grammars (and the heuristic layer) directly; whole
/// units go through `map_tokens` so errors are kept.
pub fn map_tokens_lossy(source: &str) -> Vec<MappedToken> {
    let tokens = tokenize(source);
    let (mut input, _) = map_tokens(&tokens);
    if input.last().is_some_and(|mapped| mapped.term == Terminal::End) {
        input.pop();
    }
    input
}

/// Per-unit driver options.
#[derive(Debug, Clone, Copy, Default)]
pub struct DriveOptions {
    /// Also write a pretty-printed `.ast.json` export.
    pub emit_json: bool,
    /// Render the error log as caret diagnostics on stderr.
    pub render_diagnostics: bool,
}

/// Where one parsed unit left its artifacts, plus the parse result itself.
#[derive(Debug)]
pub struct ParseOutcome {
    pub source_path: PathBuf,
    pub derivation_path: PathBuf,
    pub error_path: PathBuf,
    pub tokens_path: PathBuf,
    pub ast_text_path: Option<PathBuf>,
    pub ast_dot_path: Option<PathBuf>,
    pub ast_json_path: Option<PathBuf>,
    pub root: Option<TreeNode>,
    pub errors: Vec<SyntaxError>,
}

impl ParseOutcome {
    /// A unit counts as failed when anything at all was logged, even
    /// though a best-effort tree may still exist.
    pub fn had_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Parses one source file and writes its artifact set next to it:
/// `.outtokens`, `.outderivation`, `.outsyntaxerrors`, and (when a root
/// was produced) `.outast` and `.dot`.
pub fn parse_file(
    source_path: &Path,
    table: &ParseTable,
    options: &DriveOptions,
) -> Result<ParseOutcome, DriverError> {
    let source = fs::read_to_string(source_path).map_err(|error| DriverError::ReadSource {
        path: source_path.to_path_buf(),
        source: error,
    })?;

    let tokens = tokenize(&source);
    let (input, mut errors) = map_tokens(&tokens);

    let tokens_path = artifact_path(source_path, "outtokens");
    write_token_dump(&tokens, &tokens_path)?;

    let output = parser::parse(table, input);
    errors.extend(output.errors);

    let derivation_path = artifact_path(source_path, "outderivation");
    {
        let mut out = create_artifact(&derivation_path)?;
        for sentential in &output.derivation {
            writeln!(out, "{}", sentential).map_err(|error| DriverError::WriteArtifact {
                path: derivation_path.clone(),
                source: error,
            })?;
        }
    }

    let mut ast_text_path = None;
    let mut ast_dot_path = None;
    let mut ast_json_path = None;

    if let Some(root) = &output.root {
        let text_path = artifact_path(source_path, "outast");
        let mut out = create_artifact(&text_path)?;
        printer::write_text(root, &mut out).map_err(|error| DriverError::WriteArtifact {
            path: text_path.clone(),
            source: error,
        })?;
        ast_text_path = Some(text_path);

        let dot_path = artifact_path(source_path, "dot");
        let mut out = create_artifact(&dot_path)?;
        printer::write_dot(root, &mut out).map_err(|error| DriverError::WriteArtifact {
            path: dot_path.clone(),
            source: error,
        })?;
        ast_dot_path = Some(dot_path);

        if options.emit_json {
            let json_path = artifact_path(source_path, "ast.json");
            let mut out = create_artifact(&json_path)?;
            printer::write_json(root, &mut out).map_err(|error| DriverError::SerializeAst {
                path: json_path.clone(),
                source: error,
            })?;
            ast_json_path = Some(json_path);
        }
    }

    let error_path = artifact_path(source_path, "outsyntaxerrors");
    {
        let mut out = create_artifact(&error_path)?;
        for error in &errors {
            writeln!(out, "{}", error).map_err(|error| DriverError::WriteArtifact {
                path: error_path.clone(),
                source: error,
            })?;
        }
    }

    tracing::debug!(
        source = %source_path.display(),
        tokens = tokens.len(),
        errors = errors.len(),
        has_root = output.root.is_some(),
        "unit parsed"
    );

    if options.render_diagnostics && !errors.is_empty() {
        let file_name = source_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| source_path.display().to_string());
        DiagnosticPrinter::new(file_name, source).print_all(&errors);
    }

    Ok(ParseOutcome {
        source_path: source_path.to_path_buf(),
        derivation_path,
        error_path,
        tokens_path,
        ast_text_path,
        ast_dot_path,
        ast_json_path,
        root: output.root,
        errors,
    })
}

/// Writes the token dump: one line per token, invalid tokens and comments
/// included, with the mapped terminal (or reserved label) in brackets.
fn write_token_dump(tokens: &[Token], path: &Path) -> Result<(), DriverError> {
    let mut out = create_artifact(path)?;
    for token in tokens {
        let mut line = format!(
            "{}:{} {}",
            token.span.line,
            token.span.column,
            token.kind_name()
        );
        if !token.lexeme.is_empty() {
            line.push_str(&format!(" \"{}\"", token.lexeme));
        }
        line.push_str(&format!(" [{}]", classify(token).label()));
        writeln!(out, "{}", line).map_err(|error| DriverError::WriteArtifact {
            path: path.to_path_buf(),
            source: error,
        })?;
    }
    Ok(())
}

/// `<dir>/<stem>.<extension>` beside the source file.
fn artifact_path(source_path: &Path, extension: &str) -> PathBuf {
    source_path.with_extension(extension)
}

fn create_artifact(path: &Path) -> Result<BufWriter<File>, DriverError> {
    File::create(path)
        .map(BufWriter::new)
        .map_err(|error| DriverError::WriteArtifact {
            path: path.to_path_buf(),
            source: error,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn classify_covers_the_reserved_outcomes() {
        let tokens = tokenize("x 1 1.5 // note\n_bad");
        let classes: Vec<TokenClass> = tokens.iter().map(classify).collect();
        assert_eq!(
            classes,
            vec![
                TokenClass::Terminal(Terminal::Id),
                TokenClass::Terminal(Terminal::IntLit),
                TokenClass::Terminal(Terminal::FloatLit),
                TokenClass::Skip,
                TokenClass::LexError,
                TokenClass::End,
            ]
        );
    }

    #[test]
    fn self_maps_to_the_id_terminal() {
        let tokens = tokenize("self");
        assert_eq!(classify(&tokens[0]), TokenClass::Terminal(Terminal::Id));
    }

    #[test]
    fn map_tokens_drops_and_logs() {
        let tokens = tokenize("x = _bad 1 ;");
        let (input, errors) = map_tokens(&tokens);

        let terms: Vec<Terminal> = input.iter().map(|mapped| mapped.term).collect();
        assert_eq!(
            terms,
            vec![
                Terminal::Id,
                Terminal::Equal,
                Terminal::IntLit,
                Terminal::Semi,
                Terminal::End,
            ]
        );
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors[0].to_string(),
            "Syntax error due to lexical error at line 1 near \"_bad\"."
        );
    }

    #[test]
    fn lossy_mapping_omits_the_end_marker() {
        let input = map_tokens_lossy("a + b");
        let terms: Vec<Terminal> = input.iter().map(|mapped| mapped.term).collect();
        assert_eq!(terms, vec![Terminal::Id, Terminal::Plus, Terminal::Id]);
    }
}
