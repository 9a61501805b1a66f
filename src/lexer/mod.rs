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

/// Reserved keyword lookup.
pub mod keywords;

/// The character-level scanner and the `tokenize` entry point.
pub mod lexer;

/// Token kinds and the `Token` record.
pub mod token;

pub use lexer::{tokenize, Lexer};
pub use token::{Token, TokenKind};
