/*
 * ==========================================================================
 * PROWL - Parse with Claws!
 * ==========================================================================
 *
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

use crate::span::Span;
use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// A recoverable anomaly recorded while parsing one translation unit.
///
/// These are data, not control flow: the engine never aborts on one. They
/// accumulate in an ordered log and the `Display` impl produces the exact
/// line written to the `.outsyntaxerrors` artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    /// What went wrong.
    pub kind: SyntaxErrorKind,

    /// Where it went wrong, when a precise token position is known.
    ///
    /// Used only by the diagnostic renderer; the artifact line carries its
    /// own line number inside the message.
    pub span: Option<Span>,
}

/// Every anomaly kind the parser can record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyntaxErrorKind {
    /// The lexer produced an invalid token; it was discarded.
    Lexical { line: usize, lexeme: String },

    /// The lexer produced a token kind with no terminal mapping.
    UnknownToken { line: usize, kind: String },

    /// A required terminal did not match the lookahead. Recovery consumed
    /// one input token.
    Mismatch {
        expected: &'static str,
        found: &'static str,
        line: usize,
    },

    /// No table entry and no heuristic for a (nonterminal, lookahead)
    /// pair. Recovery forced epsilon for the nonterminal.
    NoRule {
        nonterminal: &'static str,
        lookahead: &'static str,
        line: Option<usize>,
    },

    /// Fewer semantic values available than a production's symbol count.
    StackUnderflow { nonterminal: &'static str },

    /// Input remained when the end marker was reached.
    ExtraTokens { line: usize },

    /// Values remained on the semantic stack after the root was taken.
    LeftoverValues { count: usize },

    /// The semantic stack was empty at completion.
    MissingRoot,

    /// The cursor never reached the end-of-input token.
    UnparsedInput { line: Option<usize> },
}

impl SyntaxError {
    pub fn new(kind: SyntaxErrorKind) -> Self {
        Self { kind, span: None }
    }

    /// Attach the token position the error was observed at (builder-style).
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    /// Stable error code, used by the diagnostic renderer.
    pub fn code(&self) -> &'static str {
        match self.kind {
            SyntaxErrorKind::Lexical { .. } => "E_LEX",
            SyntaxErrorKind::UnknownToken { .. } => "E_UNKNOWN_TOKEN",
            SyntaxErrorKind::Mismatch { .. } => "E_MISMATCH",
            SyntaxErrorKind::NoRule { .. } => "E_NO_RULE",
            SyntaxErrorKind::StackUnderflow { .. } => "E_UNDERFLOW",
            SyntaxErrorKind::ExtraTokens { .. } => "E_EXTRA_INPUT",
            SyntaxErrorKind::LeftoverValues { .. } => "E_LEFTOVER",
            SyntaxErrorKind::MissingRoot => "E_NO_ROOT",
            SyntaxErrorKind::UnparsedInput { .. } => "E_UNPARSED",
        }
    }
}

impl fmt::Display for SyntaxError {
    /// Renders the exact `.outsyntaxerrors` line for this error.
    ///
    /// The wording is part of the external toolchain contract; do not
    /// reword without versioning the artifact format.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            SyntaxErrorKind::Lexical { line, lexeme } => write!(
                f,
                "Syntax error due to lexical error at line {} near \"{}\".",
                line, lexeme
            ),
            SyntaxErrorKind::UnknownToken { line, kind } => {
                write!(f, "Unknown token \"{}\" at line {}.", kind, line)
            }
            SyntaxErrorKind::Mismatch {
                expected,
                found,
                line,
            } => write!(
                f,
                "Syntax error: expected \"{}\" but found \"{}\" at line {}.",
                expected, found, line
            ),
            SyntaxErrorKind::NoRule {
                nonterminal,
                lookahead,
                line,
            } => {
                write!(
                    f,
                    "Syntax error: no rule for {} with lookahead \"{}\" at line ",
                    nonterminal, lookahead
                )?;
                match line {
                    Some(line) => write!(f, "{}", line)?,
                    None => write!(f, "EOF")?,
                }
                write!(f, ". Recovering by popping.")
            }
            SyntaxErrorKind::StackUnderflow { nonterminal } => write!(
                f,
                "Semantic stack underflow while processing {}.",
                nonterminal
            ),
            SyntaxErrorKind::ExtraTokens { line } => {
                write!(f, "Extra tokens at end near line {}.", line)
            }
            SyntaxErrorKind::LeftoverValues { count } => write!(
                f,
                "Semantic stack contains {} leftover entries after parsing.",
                count
            ),
            SyntaxErrorKind::MissingRoot => {
                write!(f, "No AST root generated for this translation unit.")
            }
            SyntaxErrorKind::UnparsedInput { line } => {
                write!(f, "Syntax error: unparsed input remains near line ")?;
                match line {
                    Some(line) => write!(f, "{}", line)?,
                    None => write!(f, "EOF")?,
                }
                write!(f, ".")
            }
        }
    }
}

/// Unrecoverable driver-level failures: a table that cannot be loaded or
/// an artifact that cannot be written. These propagate with `?` up to
/// `main`; they never cross the parse loop.
#[derive(Debug, Error)]
pub enum DriverError {
    #[error("cannot open {path}: {source}")]
    ReadSource {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot write {path}: {source}")]
    WriteArtifact {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot serialize AST to {path}: {source}")]
    SerializeAst {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Table(#[from] crate::grammar::table::TableError),
}
