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

//! Constructors for the fixed-shape AST nodes the semantic actions emit.
//!
//! Every constructor takes optional children and silently skips the absent
//! ones, so recovery (which synthesizes nulls) produces partial nodes
//! instead of failing.

use crate::ast::node::TreeNode;

fn append_if_present(parent: &mut TreeNode, child: Option<TreeNode>) {
    if let Some(child) = child {
        parent.add_child(child);
    }
}

/// `BinaryExpr` with the operator spelling as value.
pub fn make_binary(op: impl Into<String>, left: Option<TreeNode>, right: Option<TreeNode>) -> TreeNode {
    let mut node = TreeNode::with_value("BinaryExpr", op);
    append_if_present(&mut node, left);
    append_if_present(&mut node, right);
    node
}

/// `UnaryExpr` with the operator spelling as value.
pub fn make_unary(op: impl Into<String>, operand: Option<TreeNode>) -> TreeNode {
    let mut node = TreeNode::with_value("UnaryExpr", op);
    append_if_present(&mut node, operand);
    node
}

/// `VarDecl` over name, type and optional initializer; array dimensions
/// are appended by the caller.
pub fn make_var_decl(
    id: Option<TreeNode>,
    ty: Option<TreeNode>,
    init: Option<TreeNode>,
) -> TreeNode {
    let mut node = TreeNode::new("VarDecl");
    append_if_present(&mut node, id);
    append_if_present(&mut node, ty);
    append_if_present(&mut node, init);
    node
}

/// `AssignStmt` over a target and an expression.
pub fn make_assign(lhs: Option<TreeNode>, rhs: Option<TreeNode>) -> TreeNode {
    let mut node = TreeNode::new("AssignStmt");
    append_if_present(&mut node, lhs);
    append_if_present(&mut node, rhs);
    node
}

/// `IfStmt` over condition, then-block and optional else-block.
///
/// A missing else leaves a two-child node; no placeholder is inserted.
pub fn make_if(
    cond: Option<TreeNode>,
    then_block: Option<TreeNode>,
    else_block: Option<TreeNode>,
) -> TreeNode {
    let mut node = TreeNode::new("IfStmt");
    append_if_present(&mut node, cond);
    append_if_present(&mut node, then_block);
    append_if_present(&mut node, else_block);
    node
}

/// `WhileStmt` over condition and body.
pub fn make_while(cond: Option<TreeNode>, body: Option<TreeNode>) -> TreeNode {
    let mut node = TreeNode::new("WhileStmt");
    append_if_present(&mut node, cond);
    append_if_present(&mut node, body);
    node
}

/// `FunctionDef` pairing a declaration with its body block.
pub fn make_func_def(decl: Option<TreeNode>, body: Option<TreeNode>) -> TreeNode {
    let mut node = TreeNode::new("FunctionDef");
    append_if_present(&mut node, decl);
    append_if_present(&mut node, body);
    node
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_children_are_elided() {
        let node = make_if(Some(TreeNode::new("BinaryExpr")), Some(TreeNode::new("Block")), None);
        assert_eq!(node.kind(), "IfStmt");
        assert_eq!(node.children().len(), 2);
    }

    #[test]
    fn binary_carries_operator_spelling() {
        let node = make_binary("+", Some(TreeNode::with_value("IntLiteral", "1")), None);
        assert_eq!(node.value(), Some("+"));
        assert_eq!(node.children().len(), 1);
    }
}
