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

use crate::span::SourceSpan;
use serde::Serialize;

/// One node of the abstract syntax tree.
///
/// A node is a tagged record: a kind (`"BinaryExpr"`, `"Identifier"`,
/// `"Block"`, ...), an optional literal value, an optional source span, and
/// ordered children.
///
/// # Ownership
/// Every node exclusively owns its children; the parse root is owned by the
/// parse result. Children are only ever appended while the node is being
/// built and nothing aliases them afterwards, so the tree is a pure `Vec`
/// structure with no reference counting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TreeNode {
    kind: &'static str,

    #[serde(skip_serializing_if = "Option::is_none")]
    value: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    span: Option<SourceSpan>,

    children: Vec<TreeNode>,
}

impl TreeNode {
    /// An interior node with no value and no span.
    pub fn new(kind: &'static str) -> Self {
        Self {
            kind,
            value: None,
            span: None,
            children: Vec::new(),
        }
    }

    /// An interior node carrying a value (operators keep their spelling).
    pub fn with_value(kind: &'static str, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: Some(value.into()),
            span: None,
            children: Vec::new(),
        }
    }

    /// A leaf built from a matched token.
    pub fn leaf(kind: &'static str, value: impl Into<String>, span: SourceSpan) -> Self {
        Self {
            kind,
            value: Some(value.into()),
            span: Some(span),
            children: Vec::new(),
        }
    }

    /// Appends a child. Only valid during construction.
    pub fn add_child(&mut self, child: TreeNode) {
        self.children.push(child);
    }

    pub fn kind(&self) -> &'static str {
        self.kind
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    pub fn span(&self) -> Option<SourceSpan> {
        self.span
    }

    pub fn children(&self) -> &[TreeNode] {
        &self.children
    }

    /// Consumes the node and yields its children, for re-parenting during
    /// list flattening.
    pub fn into_children(self) -> Vec<TreeNode> {
        self.children
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Human-readable one-line label: `kind` or `kind: value`.
    pub fn label(&self) -> String {
        match &self.value {
            Some(value) => format!("{}: {}", self.kind, value),
            None => self.kind.to_string(),
        }
    }
}
