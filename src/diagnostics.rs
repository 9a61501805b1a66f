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

use crate::error::SyntaxError;

/// Renders recorded syntax errors as human-friendly, compiler-style
/// diagnostics on stderr.
///
/// This printer:
/// - Formats errors with file/line/column information
/// - Displays the offending source line
/// - Highlights the error position using a caret (`^`)
///
/// The output is intentionally inspired by `rustc` diagnostics but kept
/// readable without color. It is display-only; the `.outsyntaxerrors`
/// artifact keeps its own exact format.
pub struct DiagnosticPrinter {
    /// Full source code of the unit being parsed, kept as one string so
    /// individual lines can be extracted for display.
    source: String,

    /// Name of the source file, used only for display.
    file_name: String,
}

impl DiagnosticPrinter {
    /// Creates a new diagnostic printer for a given source file.
    pub fn new(file_name: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            source: source.into(),
        }
    }

    /// Prints one formatted diagnostic to stderr.
    ///
    /// # Output Example
    /// ```text
    /// error[E_MISMATCH]: Syntax error: expected "semi" but found "rcurbr" at line 4.
    ///   --> demo.src:4:3
    ///    |
    ///  4 | x = 1
    ///    |   ^
    /// ```
    pub fn print(&self, error: &SyntaxError) {
        match error.span {
            Some(span) => {
                let lines: Vec<&str> = self.source.lines().collect();
                let src_line = lines.get(span.line.saturating_sub(1)).unwrap_or(&"");

                eprintln!(
                    "error[{}]: {}\n  --> {}:{}:{}",
                    error.code(),
                    error,
                    self.file_name,
                    span.line,
                    span.column
                );
                eprintln!("   |");
                eprintln!("{:>3} | {}", span.line, src_line);

                let mut underline = String::new();
                for _ in 1..span.column {
                    underline.push(' ');
                }
                underline.push('^');
                eprintln!("   | {}", underline);
            }
            None => {
                eprintln!("error[{}]: {}", error.code(), error);
            }
        }
    }

    /// Prints a whole error log in order.
    pub fn print_all(&self, errors: &[SyntaxError]) {
        for error in errors {
            self.print(error);
        }
    }
}
