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

use crate::lexer::keywords::is_keyword;
use crate::lexer::token::{Token, TokenKind};
use crate::span::Span;

/// The core PROWL lexer.
///
/// A pull-based scanner over the source text: every call to `next_token`
/// produces exactly one classified token, ending with a final
/// `TokenKind::Eof`. Invalid input never stops the scan; it surfaces as one
/// of the `Invalid*` token kinds for the parser to log and discard.
pub struct Lexer {
    chars: Vec<char>,
    current: usize,
    line: usize,
    column: usize,
}

/// Public entry point for the PROWL lexing phase.
///
/// Scans the complete source text and returns every token, comments and
/// invalid tokens included, terminated by the `Eof` marker.
///
/// # PROWL Pipeline
/// ```text
/// Source → Lexer → Tokens → terminal mapping → Parser → AST
/// ```
pub fn tokenize(source: &str) -> Vec<Token> {
    let mut lexer = Lexer::new(source);
    let mut tokens = Vec::new();

    loop {
        let token = lexer.next_token();
        let done = token.kind == TokenKind::Eof;
        tokens.push(token);
        if done {
            return tokens;
        }
    }
}

impl Lexer {
    /// Creates a new PROWL lexer over the given source text.
    pub fn new(source: &str) -> Self {
        Self {
            chars: source.chars().collect(),
            current: 0,
            line: 1,
            column: 1,
        }
    }

    /// Scans and returns the next token.
    ///
    /// Whitespace is skipped; everything else, including comments and
    /// malformed input, becomes a token. After the end of input this keeps
    /// returning `Eof` tokens, so callers can treat `Eof` as a fixpoint.
    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();

        let start = Span {
            line: self.line,
            column: self.column,
        };

        if self.is_at_end() {
            return Token {
                kind: TokenKind::Eof,
                lexeme: String::new(),
                span: start,
            };
        }

        let c = self.peek();

        if c == '/' && self.peek_at(1) == '/' {
            return self.read_inline_comment(start);
        }
        if c == '/' && self.peek_at(1) == '*' {
            return self.read_block_comment(start);
        }

        if Self::is_letter(c) {
            return self.read_identifier(start);
        }
        if c == '_' {
            return self.read_invalid_identifier(start);
        }
        if Self::is_digit(c) {
            return self.read_number(start);
        }

        // Two-character operators before their one-character prefixes.
        if let Some(token) = self.match_pair('=', '=', TokenKind::Eq, "==", start) {
            return token;
        }
        if let Some(token) = self.match_pair('<', '>', TokenKind::NotEq, "<>", start) {
            return token;
        }
        if let Some(token) = self.match_pair('<', '=', TokenKind::Leq, "<=", start) {
            return token;
        }
        if let Some(token) = self.match_pair('>', '=', TokenKind::Geq, ">=", start) {
            return token;
        }
        if let Some(token) = self.match_pair('=', '>', TokenKind::ReturnType, "=>", start) {
            return token;
        }
        if let Some(token) = self.match_pair(':', ':', TokenKind::ScopeOp, "::", start) {
            return token;
        }

        let single = match c {
            '+' => Some(TokenKind::Plus),
            '-' => Some(TokenKind::Minus),
            '*' => Some(TokenKind::Mult),
            '/' => Some(TokenKind::Div),
            '(' => Some(TokenKind::OpenPar),
            ')' => Some(TokenKind::ClosePar),
            '[' => Some(TokenKind::OpenSqBr),
            ']' => Some(TokenKind::CloseSqBr),
            '{' => Some(TokenKind::OpenCuBr),
            '}' => Some(TokenKind::CloseCuBr),
            ';' => Some(TokenKind::Semi),
            ',' => Some(TokenKind::Comma),
            ':' => Some(TokenKind::Colon),
            '.' => Some(TokenKind::Dot),
            '<' => Some(TokenKind::Lt),
            '>' => Some(TokenKind::Gt),
            '=' => Some(TokenKind::Assign),
            _ => None,
        };

        if let Some(kind) = single {
            let ch = self.advance();
            return Token {
                kind,
                lexeme: ch.to_string(),
                span: start,
            };
        }

        let bad = self.advance();
        Token {
            kind: TokenKind::InvalidChar,
            lexeme: bad.to_string(),
            span: start,
        }
    }

    // ------------------------------------------------------------
    // SPECIALIZED READERS
    // ------------------------------------------------------------

    /// Reads a `//` comment up to (not including) the newline.
    fn read_inline_comment(&mut self, start: Span) -> Token {
        let mut lexeme = String::from("//");
        self.advance();
        self.advance();
        while !self.is_at_end() && self.peek() != '\n' {
            lexeme.push(self.advance());
        }
        Token {
            kind: TokenKind::InlineCmt,
            lexeme,
            span: start,
        }
    }

    /// Reads a `/* ... */` comment, tracking nesting depth.
    ///
    /// A comment still open at end of input is an `InvalidComment` token.
    fn read_block_comment(&mut self, start: Span) -> Token {
        let mut lexeme = String::new();
        lexeme.push(self.advance()); // '/'
        lexeme.push(self.advance()); // '*'
        let mut depth = 1;

        while !self.is_at_end() {
            if self.peek() == '/' && self.peek_at(1) == '*' {
                lexeme.push(self.advance());
                lexeme.push(self.advance());
                depth += 1;
            } else if self.peek() == '*' && self.peek_at(1) == '/' {
                lexeme.push(self.advance());
                lexeme.push(self.advance());
                depth -= 1;
                if depth == 0 {
                    return Token {
                        kind: TokenKind::BlockCmt,
                        lexeme,
                        span: start,
                    };
                }
            } else {
                lexeme.push(self.advance());
            }
        }

        Token {
            kind: TokenKind::InvalidComment,
            lexeme,
            span: start,
        }
    }

    /// Reads an identifier, reclassifying it as a keyword when reserved.
    fn read_identifier(&mut self, start: Span) -> Token {
        let mut lexeme = String::new();
        lexeme.push(self.advance());
        while Self::is_alphanum_underscore(self.peek()) {
            lexeme.push(self.advance());
        }

        let kind = if is_keyword(&lexeme) {
            TokenKind::Keyword
        } else {
            TokenKind::Id
        };

        Token {
            kind,
            lexeme,
            span: start,
        }
    }

    /// Reads an identifier-shaped lexeme that starts with `_`.
    ///
    /// PROWL identifiers must begin with a letter, so the whole run is one
    /// invalid token.
    fn read_invalid_identifier(&mut self, start: Span) -> Token {
        let mut lexeme = String::new();
        lexeme.push(self.advance());
        while Self::is_alphanum_underscore(self.peek()) {
            lexeme.push(self.advance());
        }
        Token {
            kind: TokenKind::InvalidId,
            lexeme,
            span: start,
        }
    }

    /// Reads a number greedily, then validates the whole lexeme.
    ///
    /// Greedy means the scan also swallows a trailing run of letters and
    /// underscores, so `12ab` is a single `invalidnum` token rather than a
    /// number followed by an identifier.
    fn read_number(&mut self, start: Span) -> Token {
        let mut lexeme = String::new();
        while Self::is_digit(self.peek()) {
            lexeme.push(self.advance());
        }

        let mut saw_dot = false;
        if self.peek() == '.' {
            saw_dot = true;
            lexeme.push(self.advance());
            while Self::is_digit(self.peek()) {
                lexeme.push(self.advance());
            }
            if self.peek() == 'e' || self.peek() == 'E' {
                lexeme.push(self.advance());
                if self.peek() == '+' || self.peek() == '-' {
                    lexeme.push(self.advance());
                }
                while Self::is_digit(self.peek()) {
                    lexeme.push(self.advance());
                }
            }
        }
        while Self::is_letter(self.peek()) || self.peek() == '_' {
            lexeme.push(self.advance());
        }

        Token {
            kind: Self::validate_number(&lexeme, saw_dot),
            lexeme,
            span: start,
        }
    }

    /// Validates a greedily scanned number lexeme.
    ///
    /// Integer rule: digits only, no leading zero unless the literal is
    /// exactly `0`. Float rule: a valid integer part, a fraction that does
    /// not end in `0` unless it is exactly `0`, and an optional exponent
    /// whose digits follow the integer rule again.
    fn validate_number(lexeme: &str, saw_dot: bool) -> TokenKind {
        let bytes = lexeme.as_bytes();

        let has_e = bytes.iter().any(|&b| b == b'e' || b == b'E');
        let has_alpha = bytes
            .iter()
            .any(|&b| b.is_ascii_alphabetic() || b == b'_');

        if !saw_dot && !has_e && !has_alpha {
            return if Self::valid_integer_part(bytes) {
                TokenKind::IntNum
            } else {
                TokenKind::InvalidNum
            };
        }

        let mut pos = 0;
        while pos < bytes.len() && bytes[pos].is_ascii_digit() {
            pos += 1;
        }
        let int_part = &bytes[..pos];
        if pos >= bytes.len() || bytes[pos] != b'.' {
            return TokenKind::InvalidNum;
        }
        pos += 1;

        let frac_start = pos;
        while pos < bytes.len() && bytes[pos].is_ascii_digit() {
            pos += 1;
        }
        let frac_digits = &bytes[frac_start..pos];

        let mut has_exp = false;
        let mut exp_digits: &[u8] = &[];
        if pos < bytes.len() && (bytes[pos] == b'e' || bytes[pos] == b'E') {
            has_exp = true;
            pos += 1;
            if pos < bytes.len() && (bytes[pos] == b'+' || bytes[pos] == b'-') {
                pos += 1;
            }
            let exp_start = pos;
            while pos < bytes.len() && bytes[pos].is_ascii_digit() {
                pos += 1;
            }
            exp_digits = &bytes[exp_start..pos];
        }

        if pos != bytes.len() {
            return TokenKind::InvalidNum;
        }
        if !Self::valid_integer_part(int_part) {
            return TokenKind::InvalidNum;
        }

        if frac_digits != b"0" {
            if frac_digits.is_empty() {
                return TokenKind::InvalidNum;
            }
            if frac_digits[frac_digits.len() - 1] == b'0' {
                return TokenKind::InvalidNum;
            }
        }

        if has_exp && !Self::valid_integer_part(exp_digits) {
            return TokenKind::InvalidNum;
        }

        TokenKind::FloatNum
    }

    /// Digits only, no leading zero unless the value is exactly `0`.
    fn valid_integer_part(digits: &[u8]) -> bool {
        if digits.is_empty() || !digits.iter().all(u8::is_ascii_digit) {
            return false;
        }
        digits == b"0" || digits[0] != b'0'
    }

    // ------------------------------------------------------------
    // CURSOR PRIMITIVES
    // ------------------------------------------------------------

    fn match_pair(
        &mut self,
        a: char,
        b: char,
        kind: TokenKind,
        lexeme: &str,
        start: Span,
    ) -> Option<Token> {
        if self.peek() == a && self.peek_at(1) == b {
            self.advance();
            self.advance();
            return Some(Token {
                kind,
                lexeme: lexeme.to_string(),
                span: start,
            });
        }
        None
    }

    fn skip_whitespace(&mut self) {
        while Self::is_space(self.peek()) {
            self.advance();
        }
    }

    /// Advances one character, maintaining the line/column counters.
    fn advance(&mut self) -> char {
        let c = self.peek();
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        self.current += 1;
        c
    }

    fn peek(&self) -> char {
        self.peek_at(0)
    }

    fn peek_at(&self, offset: usize) -> char {
        self.chars
            .get(self.current + offset)
            .copied()
            .unwrap_or('\0')
    }

    fn is_at_end(&self) -> bool {
        self.current >= self.chars.len()
    }

    fn is_letter(c: char) -> bool {
        c.is_ascii_alphabetic()
    }

    fn is_digit(c: char) -> bool {
        c.is_ascii_digit()
    }

    fn is_alphanum_underscore(c: char) -> bool {
        Self::is_letter(c) || Self::is_digit(c) || c == '_'
    }

    fn is_space(c: char) -> bool {
        c == ' ' || c == '\t' || c == '\r' || c == '\n'
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn kinds(source: &str) -> Vec<TokenKind> {
        tokenize(source).into_iter().map(|t| t.kind).collect()
    }

    fn single(source: &str) -> Token {
        let mut tokens = tokenize(source);
        assert_eq!(tokens.len(), 2, "expected one token plus eof in {source:?}");
        tokens.remove(0)
    }

    #[test]
    fn identifiers_and_keywords() {
        let tokens = tokenize("localvar counter");
        assert_eq!(tokens[0].kind, TokenKind::Keyword);
        assert_eq!(tokens[0].lexeme, "localvar");
        assert_eq!(tokens[1].kind, TokenKind::Id);
        assert_eq!(tokens[1].lexeme, "counter");
    }

    #[test]
    fn underscore_identifier_is_invalid() {
        let token = single("_abc1");
        assert_eq!(token.kind, TokenKind::InvalidId);
        assert_eq!(token.lexeme, "_abc1");
    }

    #[test]
    fn integer_literals() {
        assert_eq!(single("0").kind, TokenKind::IntNum);
        assert_eq!(single("12345").kind, TokenKind::IntNum);
        assert_eq!(single("012").kind, TokenKind::InvalidNum);
    }

    #[test]
    fn float_literals() {
        assert_eq!(single("1.0").kind, TokenKind::FloatNum);
        assert_eq!(single("1.23").kind, TokenKind::FloatNum);
        assert_eq!(single("0.0").kind, TokenKind::FloatNum);
        assert_eq!(single("1.5e+2").kind, TokenKind::FloatNum);
        assert_eq!(single("1.5e0").kind, TokenKind::FloatNum);

        // Trailing zero in the fraction is only legal when the fraction is
        // exactly "0".
        assert_eq!(single("1.10").kind, TokenKind::InvalidNum);
        assert_eq!(single("1.").kind, TokenKind::InvalidNum);
        assert_eq!(single("1.5e05").kind, TokenKind::InvalidNum);
        assert_eq!(single("12ab").kind, TokenKind::InvalidNum);
    }

    #[test]
    fn exponent_without_fraction_is_not_a_float() {
        // The exponent is only scanned after a fraction, so "12e3" reads
        // greedily as "12e" (invalid) followed by "3".
        let tokens = tokenize("12e3");
        assert_eq!(tokens[0].kind, TokenKind::InvalidNum);
        assert_eq!(tokens[0].lexeme, "12e");
        assert_eq!(tokens[1].kind, TokenKind::IntNum);
        assert_eq!(tokens[1].lexeme, "3");
    }

    #[test]
    fn operators() {
        assert_eq!(
            kinds("== <> <= >= => :: = < > + - * /"),
            vec![
                TokenKind::Eq,
                TokenKind::NotEq,
                TokenKind::Leq,
                TokenKind::Geq,
                TokenKind::ReturnType,
                TokenKind::ScopeOp,
                TokenKind::Assign,
                TokenKind::Lt,
                TokenKind::Gt,
                TokenKind::Plus,
                TokenKind::Minus,
                TokenKind::Mult,
                TokenKind::Div,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn comments() {
        let tokens = tokenize("// note\nx /* a /* nested */ b */ y");
        assert_eq!(tokens[0].kind, TokenKind::InlineCmt);
        assert_eq!(tokens[0].lexeme, "// note");
        assert_eq!(tokens[1].kind, TokenKind::Id);
        assert_eq!(tokens[2].kind, TokenKind::BlockCmt);
        assert_eq!(tokens[2].lexeme, "/* a /* nested */ b */");
        assert_eq!(tokens[3].kind, TokenKind::Id);
    }

    #[test]
    fn unterminated_block_comment() {
        let tokens = tokenize("/* open");
        assert_eq!(tokens[0].kind, TokenKind::InvalidComment);
        assert_eq!(tokens[0].lexeme, "/* open");
    }

    #[test]
    fn line_and_column_tracking() {
        let tokens = tokenize("a\n  bb\n5");
        assert_eq!(tokens[0].span, Span { line: 1, column: 1 });
        assert_eq!(tokens[1].span, Span { line: 2, column: 3 });
        assert_eq!(tokens[2].span, Span { line: 3, column: 1 });
    }

    #[test]
    fn invalid_character() {
        let token = single("@");
        assert_eq!(token.kind, TokenKind::InvalidChar);
        assert_eq!(token.lexeme, "@");
    }

    #[test]
    fn eof_is_always_last() {
        let tokens = tokenize("");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, TokenKind::Eof);
    }
}
