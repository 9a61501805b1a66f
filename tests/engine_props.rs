/*
 * ==========================================================================
 * PROWL - Parse with Claws!
 * ==========================================================================
 *
 * Property tests for the parsing engine: termination, determinism, and
 * left-associative folding over generated inputs.
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

use proptest::prelude::*;
use prowl::driver::{map_tokens, map_tokens_lossy};
use prowl::grammar::table::ParseTable;
use prowl::grammar::NonTerm;
use prowl::lexer::tokenize;
use prowl::parser::{parse, parse_with_start};

fn table() -> ParseTable {
    ParseTable::from_csv(include_str!("../grammar/parsing_table.csv"))
        .expect("shipped table must load")
}

/// A soup of valid lexemes in arbitrary order: rarely a valid program, but
/// the engine must always terminate and log rather than abort.
fn lexeme_soup() -> impl Strategy<Value = String> {
    let lexeme = prop::sample::select(vec![
        "class", "function", "constructor", "attribute", "public", "private",
        "localvar", "if", "then", "else", "while", "read", "write", "return",
        "isa", "integer", "float", "void", "self", "x", "y", "point", "42",
        "0", "1.5", "+", "-", "*", "/", "==", "<>", "<", ">", "<=", ">=",
        "=>", "::", "=", "(", ")", "[", "]", "{", "}", ";", ",", ":", ".",
    ]);
    prop::collection::vec(lexeme, 0..40).prop_map(|lexemes| lexemes.join(" "))
}

/// Chains like `7 + 2 * 9 - 4` with single-digit operands, so the lexer
/// never rejects an operand and the only shape left to check is the fold.
fn additive_chain() -> impl Strategy<Value = (u8, Vec<(char, u8)>)> {
    let op = prop::sample::select(vec!['+', '-']);
    (0u8..10, prop::collection::vec((op, 0u8..10), 1..8))
}

proptest! {
    #[test]
    fn arbitrary_token_soup_terminates_deterministically(source in lexeme_soup()) {
        let table = table();

        let (input, lex_errors) = map_tokens(&tokenize(&source));
        prop_assert!(lex_errors.is_empty());

        let first = parse(&table, input.clone());
        let second = parse(&table, input);

        prop_assert_eq!(first.root, second.root);
        prop_assert_eq!(first.errors, second.errors);
        prop_assert_eq!(first.derivation, second.derivation);
    }

    #[test]
    fn additive_chains_parse_clean_and_fold_left((head, tail) in additive_chain()) {
        let table = table();

        let mut source = head.to_string();
        for (op, operand) in &tail {
            source.push(' ');
            source.push(*op);
            source.push(' ');
            source.push_str(&operand.to_string());
        }

        let output = parse_with_start(&table, map_tokens_lossy(&source), NonTerm::Expr);
        prop_assert!(output.is_clean(), "errors: {:?}", output.errors);

        // Walking the left spine passes one BinaryExpr per operator and
        // bottoms out at the first operand.
        let mut node = output.root.as_ref().expect("root");
        for _ in 0..tail.len() {
            prop_assert_eq!(node.kind(), "BinaryExpr");
            node = &node.children()[0];
        }
        prop_assert_eq!(node.kind(), "IntLiteral");
        let head_str = head.to_string();
        prop_assert_eq!(node.value(), Some(head_str.as_str()));

        // The outermost operator is the last one in source order.
        if let Some((last_op, _)) = tail.last() {
            let root = output.root.as_ref().expect("root");
            let last_op_str = last_op.to_string();
            prop_assert_eq!(root.value(), Some(last_op_str.as_str()));
        }
    }
}
