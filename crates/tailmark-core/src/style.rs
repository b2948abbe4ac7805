//! Generated style-rule trees.

use serde::{Deserialize, Serialize};

/// A node in the style tree a design system generates for a valid token.
///
/// The tree is rooted at a [`Rule`](Self::Rule) or an
/// [`AtRule`](Self::AtRule); declarations are always leaves.
///
/// # Example
///
/// ```
/// use tailmark_core::StyleNode;
///
/// let tree = StyleNode::at_rule(
///     "media",
///     "(min-width: 768px)",
///     vec![StyleNode::rule(
///         ".md\\:flex",
///         vec![StyleNode::declaration("display", "flex")],
///     )],
/// );
/// assert!(matches!(tree, StyleNode::AtRule { .. }));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StyleNode {
    /// A qualified rule such as `.flex { … }`.
    Rule {
        /// The rule selector.
        selector: String,
        /// Nested declarations and rules.
        children: Vec<StyleNode>,
    },
    /// An at-rule such as `@media (min-width: 768px) { … }`.
    AtRule {
        /// At-rule name without the leading `@`.
        name: String,
        /// Prelude text after the name; may be empty.
        params: String,
        /// Nested rules and declarations.
        children: Vec<StyleNode>,
    },
    /// A single `property: value` pair.
    Declaration {
        /// The property name.
        property: String,
        /// The property value.
        value: String,
    },
}

impl StyleNode {
    /// Creates a rule node.
    #[must_use]
    pub fn rule(selector: impl Into<String>, children: Vec<Self>) -> Self {
        Self::Rule {
            selector: selector.into(),
            children,
        }
    }

    /// Creates an at-rule node.
    #[must_use]
    pub fn at_rule(name: impl Into<String>, params: impl Into<String>, children: Vec<Self>) -> Self {
        Self::AtRule {
            name: name.into(),
            params: params.into(),
            children,
        }
    }

    /// Creates a declaration node.
    #[must_use]
    pub fn declaration(property: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Declaration {
            property: property.into(),
            value: value.into(),
        }
    }

    /// Returns the children of a rule or at-rule; declarations have none.
    #[must_use]
    pub fn children(&self) -> &[Self] {
        match self {
            Self::Rule { children, .. } | Self::AtRule { children, .. } => children,
            Self::Declaration { .. } => &[],
        }
    }
}
