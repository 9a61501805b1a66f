/*
 * ==========================================================================
 * PROWL - Parse with Claws!
 * ==========================================================================
 *
 * End-to-end artifact writing for one parsed unit.
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

use pretty_assertions::assert_eq;
use prowl::driver::{parse_file, DriveOptions};
use prowl::grammar::table::ParseTable;
use std::fs;
use std::path::PathBuf;

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("prowl-{}-{}", name, std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).expect("create scratch dir");
    dir
}

#[test]
fn artifacts_land_next_to_the_source() {
    let dir = scratch_dir("artifacts");
    let source_path = dir.join("demo.src");
    fs::write(
        &source_path,
        "// demo unit\nfunction main ( ) => void {\n  localvar x : integer ;\n  x = 1 + 2 ;\n}\n",
    )
    .expect("write source");

    let table = ParseTable::from_csv(include_str!("../grammar/parsing_table.csv"))
        .expect("shipped table must load");

    let options = DriveOptions {
        emit_json: true,
        render_diagnostics: false,
    };
    let outcome = parse_file(&source_path, &table, &options).expect("drive unit");

    assert!(!outcome.had_errors(), "errors: {:?}", outcome.errors);
    assert_eq!(outcome.tokens_path, dir.join("demo.outtokens"));
    assert_eq!(outcome.derivation_path, dir.join("demo.outderivation"));
    assert_eq!(outcome.error_path, dir.join("demo.outsyntaxerrors"));
    assert_eq!(outcome.ast_text_path, Some(dir.join("demo.outast")));
    assert_eq!(outcome.ast_dot_path, Some(dir.join("demo.dot")));
    assert_eq!(outcome.ast_json_path, Some(dir.join("demo.ast.json")));

    // Token dump: positions, kind names, lexemes, and mapped terminals,
    // comments included.
    let tokens = fs::read_to_string(&outcome.tokens_path).expect("token dump");
    let mut lines = tokens.lines();
    assert_eq!(lines.next(), Some("1:1 inlinecmt \"// demo unit\" [__SKIP__]"));
    assert_eq!(lines.next(), Some("2:1 function \"function\" [function]"));
    assert_eq!(lines.next(), Some("2:10 id \"main\" [id]"));
    // Trailing whitespace is consumed before the end marker is stamped.
    assert_eq!(tokens.lines().last(), Some("6:1 eof [$]"));

    // The derivation opens with the start symbol and ends at the yield.
    let derivation = fs::read_to_string(&outcome.derivation_path).expect("derivation");
    assert_eq!(derivation.lines().next(), Some("START"));
    assert_eq!(
        derivation.lines().last(),
        Some(
            "function id lpar rpar arrow void lcurbr localvar id colon integer semi \
             id equal intlit plus intlit semi rcurbr"
        )
    );

    // Clean parse: the error log exists and is empty.
    let errors = fs::read_to_string(&outcome.error_path).expect("error log");
    assert_eq!(errors, "");

    // The text dump carries the tree.
    let ast = fs::read_to_string(outcome.ast_text_path.as_ref().expect("ast path"))
        .expect("ast dump");
    assert!(ast.starts_with("Program\n  FunctionDef\n"));
    assert!(ast.contains("      Identifier: x\n"));

    // The DOT dump is a well-formed digraph.
    let dot = fs::read_to_string(outcome.ast_dot_path.as_ref().expect("dot path"))
        .expect("dot dump");
    assert!(dot.starts_with("digraph AST {\n  rankdir=TB;\n  node [shape=box];\n"));
    assert!(dot.trim_end().ends_with('}'));

    // The JSON export round-trips through serde_json.
    let json = fs::read_to_string(outcome.ast_json_path.as_ref().expect("json path"))
        .expect("json dump");
    let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");
    assert_eq!(value["kind"], "Program");

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn failed_units_keep_their_error_log() {
    let dir = scratch_dir("failures");
    let source_path = dir.join("broken.src");
    fs::write(
        &source_path,
        "function main ( ) => void { read ( ) ; }\n",
    )
    .expect("write source");

    let table = ParseTable::from_csv(include_str!("../grammar/parsing_table.csv"))
        .expect("shipped table must load");

    let outcome =
        parse_file(&source_path, &table, &DriveOptions::default()).expect("drive unit");

    assert!(outcome.had_errors());
    assert!(outcome.root.is_some(), "best-effort tree expected");
    assert!(outcome.ast_json_path.is_none(), "json export is opt-in");

    let errors = fs::read_to_string(&outcome.error_path).expect("error log");
    assert_eq!(
        errors,
        "Syntax error: no rule for VARIABLE with lookahead \"rpar\" at line 1. \
         Recovering by popping.\n"
    );

    let _ = fs::remove_dir_all(&dir);
}
