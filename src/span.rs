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

use serde::Serialize;

/// A single point in the source text.
///
/// Both `line` and `column` are 1-based, matching what users see in their
/// editor and what every diagnostic prints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Span {
    pub line: usize,
    pub column: usize,
}

/// A contiguous region of source text covered by a token or an AST node.
///
/// Leaf nodes get the span of the token they were built from; interior
/// nodes currently carry no span of their own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SourceSpan {
    pub line_start: usize,
    pub column_start: usize,
    pub line_end: usize,
    pub column_end: usize,
}

impl SourceSpan {
    /// Span of a lexeme of `len` characters starting at `start`.
    ///
    /// Lexemes never cross a line boundary, so the end line equals the
    /// start line.
    pub fn of_lexeme(start: Span, len: usize) -> Self {
        Self {
            line_start: start.line,
            column_start: start.column,
            line_end: start.line,
            column_end: start.column + len,
        }
    }
}
