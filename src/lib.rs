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

//! The PROWL syntax analyzer: a table-driven predictive parser that turns
//! PROWL source text into an abstract syntax tree, a leftmost-derivation
//! trace, and an ordered error log, all in a single pass with panic-mode
//! recovery.
//!
//! # Pipeline
//! ```text
//! Source → Lexer → Tokens → terminal mapping → Parser → AST + artifacts
//! ```

/// The tree model, node factory, and serializers.
pub mod ast;

/// Compiler-style caret rendering of recorded errors.
pub mod diagnostics;

/// Per-unit orchestration: tokenize, map, parse, write artifacts.
pub mod driver;

/// Syntax-error kinds and driver-level failures.
pub mod error;

/// Grammar symbols and the CSV-backed parsing table.
pub mod grammar;

/// The character-level scanner.
pub mod lexer;

/// The predictive parsing engine and its semantic actions.
pub mod parser;

/// Source location types.
pub mod span;

pub use ast::TreeNode;
pub use error::{DriverError, SyntaxError, SyntaxErrorKind};
pub use grammar::{NonTerm, ParseTable, Symbol, Terminal};
pub use parser::{parse, parse_with_start, MappedToken, ParseOutput};
