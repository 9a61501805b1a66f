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

//! Serializers over an already-built tree. Pure formatting: the text and
//! DOT layouts are external toolchain contracts and must stay byte-exact.

use crate::ast::node::TreeNode;
use std::io::{self, Write};

/// Writes the indented text dump (`.outast` format).
///
/// Two spaces of indent per depth; `kind` or `kind: value` per line.
pub fn write_text<W: Write>(root: &TreeNode, out: &mut W) -> io::Result<()> {
    write_text_node(root, out, 0)
}

fn write_text_node<W: Write>(node: &TreeNode, out: &mut W, depth: usize) -> io::Result<()> {
    let padding = "  ".repeat(depth);
    match node.value() {
        Some(value) => writeln!(out, "{}{}: {}", padding, node.kind(), value)?,
        None => writeln!(out, "{}{}", padding, node.kind())?,
    }
    for child in node.children() {
        write_text_node(child, out, depth + 1)?;
    }
    Ok(())
}

/// Renders the text dump into a `String`.
pub fn text_string(root: &TreeNode) -> String {
    let mut buffer = Vec::new();
    // Writing into a Vec cannot fail.
    let _ = write_text(root, &mut buffer);
    String::from_utf8_lossy(&buffer).into_owned()
}

/// Writes the Graphviz dump (`.dot` format).
///
/// Nodes are numbered in preorder; each node line is followed by the edges
/// to its children, each edge immediately followed by that child's subtree.
pub fn write_dot<W: Write>(root: &TreeNode, out: &mut W) -> io::Result<()> {
    writeln!(out, "digraph AST {{")?;
    writeln!(out, "  rankdir=TB;")?;
    writeln!(out, "  node [shape=box];")?;
    write_dot_node(root, 0, out)?;
    writeln!(out, "}}")
}

fn write_dot_node<W: Write>(node: &TreeNode, id: usize, out: &mut W) -> io::Result<()> {
    writeln!(
        out,
        "  node{} [label=\"{}\"];",
        id,
        escape_dot_label(&dot_label(node))
    )?;

    let mut child_id = id + 1;
    for child in node.children() {
        writeln!(out, "  node{} -> node{};", id, child_id)?;
        write_dot_node(child, child_id, out)?;
        child_id += subtree_size(child);
    }
    Ok(())
}

fn subtree_size(node: &TreeNode) -> usize {
    1 + node.children().iter().map(subtree_size).sum::<usize>()
}

fn dot_label(node: &TreeNode) -> String {
    let mut label = node.kind().to_string();
    if let Some(value) = node.value() {
        label.push_str("\\n");
        label.push_str(value);
    }
    if let Some(span) = node.span() {
        label.push_str(&format!(
            "\\n[{}:{}-{}:{}]",
            span.line_start, span.column_start, span.line_end, span.column_end
        ));
    }
    label
}

/// Escapes quotes and backslashes for a DOT label.
fn escape_dot_label(label: &str) -> String {
    let mut escaped = String::with_capacity(label.len());
    for ch in label.chars() {
        if ch == '"' || ch == '\\' {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

/// Writes the pretty-printed JSON export (`.ast.json`).
pub fn write_json<W: Write>(root: &TreeNode, out: &mut W) -> serde_json::Result<()> {
    serde_json::to_writer_pretty(out, root)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::span::SourceSpan;
    use pretty_assertions::assert_eq;

    fn sample_tree() -> TreeNode {
        let mut root = TreeNode::new("AssignStmt");
        let mut var = TreeNode::new("Variable");
        var.add_child(TreeNode::leaf(
            "Identifier",
            "x",
            SourceSpan {
                line_start: 1,
                column_start: 1,
                line_end: 1,
                column_end: 2,
            },
        ));
        root.add_child(var);
        root.add_child(TreeNode::with_value("IntLiteral", "7"));
        root
    }

    #[test]
    fn text_dump_layout() {
        assert_eq!(
            text_string(&sample_tree()),
            "AssignStmt\n  Variable\n    Identifier: x\n  IntLiteral: 7\n"
        );
    }

    #[test]
    fn dot_dump_layout() {
        let mut out = Vec::new();
        write_dot(&sample_tree(), &mut out).unwrap();
        let dot = String::from_utf8(out).unwrap();
        assert_eq!(
            dot,
            "digraph AST {\n\
             \x20 rankdir=TB;\n\
             \x20 node [shape=box];\n\
             \x20 node0 [label=\"AssignStmt\"];\n\
             \x20 node0 -> node1;\n\
             \x20 node1 [label=\"Variable\"];\n\
             \x20 node1 -> node2;\n\
             \x20 node2 [label=\"Identifier\\\\nx\\\\n[1:1-1:2]\"];\n\
             \x20 node0 -> node3;\n\
             \x20 node3 [label=\"IntLiteral\\\\n7\"];\n\
             }\n"
        );
    }

    #[test]
    fn dot_escaping() {
        assert_eq!(escape_dot_label("a\"b\\c"), "a\\\"b\\\\c");
    }

    #[test]
    fn json_export_shape() {
        let mut out = Vec::new();
        write_json(&sample_tree(), &mut out).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["kind"], "AssignStmt");
        assert_eq!(value["children"][0]["kind"], "Variable");
        assert_eq!(value["children"][1]["value"], "7");
    }
}
