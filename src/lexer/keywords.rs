/*
 * ==========================================================================
 * PROWL - Parse with Claws!
 * ==========================================================================
 *
 * File:      keywords.rs
 * Purpose:   Defines all reserved keywords for the PROWL language.
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

/// Determines whether a given identifier is a **reserved keyword** in PROWL.
///
/// Used exclusively by the lexer during tokenization to distinguish
/// user-defined identifiers from language-defined keywords. Keywords lex as
/// `TokenKind::Keyword` with the keyword itself as lexeme.
///
/// # Parameters
/// - `word`: The identifier string extracted from source code.
///
/// # Returns
/// - `true` if the word is a reserved PROWL keyword.
/// - `false` if the word should be treated as a normal identifier.
pub fn is_keyword(word: &str) -> bool {
    matches!(
        word,
        "integer"
            | "float"
            | "void"
            | "class"
            | "return"
            | "while"
            | "if"
            | "then"
            | "else"
            | "function"
            | "constructor"
            | "attribute"
            | "public"
            | "private"
            | "self"
            | "localvar"
            | "read"
            | "write"
            | "and"
            | "or"
            | "not"
            | "isa"
    )
}
