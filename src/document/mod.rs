//! Snapshot of the host page's content tree
//!
//! The host hands over the document as a tree of [`ContentNode`]s. Everything
//! the presenter needs to know about the page (which elements are blocks,
//! whether a block is empty, which toggles are collapsed) is answered from
//! this snapshot, so no live DOM is required.

use serde::{Deserialize, Serialize};

pub mod blocks;
pub mod emptiness;
pub mod toggles;

pub use blocks::{Block, BlockList, BlockSource, ContentTree};
pub use emptiness::is_block_empty;
pub use toggles::collapsed_toggles;

/// Attribute carrying a block's stable identifier
pub const BLOCK_ID_ATTRIBUTE: &str = "data-block-id";

/// Class of the element that holds the page's blocks
pub const CONTENT_REGION_CLASS: &str = "notion-page-content";

/// A name/value attribute pair on an element
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq, uniffi::Record)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq, uniffi::Enum)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ContentNode {
    Element {
        tag: String,
        classes: Vec<String>,
        attributes: Vec<Attribute>,
        children: Vec<ContentNode>,
    },
    Text {
        text: String,
    },
}

impl ContentNode {
    #[must_use]
    pub fn element(tag: impl Into<String>) -> Self {
        Self::Element {
            tag: tag.into(),
            classes: Vec::new(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    /// Add a class. No-op on text nodes.
    #[must_use]
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        if let Self::Element { classes, .. } = &mut self {
            classes.push(class.into());
        }
        self
    }

    /// Add an attribute. No-op on text nodes.
    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        if let Self::Element { attributes, .. } = &mut self {
            attributes.push(Attribute {
                name: name.into(),
                value: value.into(),
            });
        }
        self
    }

    /// Append a child. No-op on text nodes.
    #[must_use]
    pub fn with_child(mut self, child: Self) -> Self {
        if let Self::Element { children, .. } = &mut self {
            children.push(child);
        }
        self
    }

    #[must_use]
    pub fn with_children(self, children: impl IntoIterator<Item = Self>) -> Self {
        children.into_iter().fold(self, Self::with_child)
    }

    #[must_use]
    pub fn tag(&self) -> Option<&str> {
        match self {
            Self::Element { tag, .. } => Some(tag),
            Self::Text { .. } => None,
        }
    }

    #[must_use]
    pub fn children(&self) -> &[Self] {
        match self {
            Self::Element { children, .. } => children,
            Self::Text { .. } => &[],
        }
    }

    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        match self {
            Self::Element { classes, .. } => classes.iter().any(|c| c == class),
            Self::Text { .. } => false,
        }
    }

    /// Value of the first attribute with the given name
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        match self {
            Self::Element { attributes, .. } => attributes
                .iter()
                .find(|attr| attr.name == name)
                .map(|attr| attr.value.as_str()),
            Self::Text { .. } => None,
        }
    }

    #[must_use]
    pub fn has_attribute(&self, name: &str) -> bool {
        self.attribute(name).is_some()
    }

    #[must_use]
    pub fn block_id(&self) -> Option<&str> {
        self.attribute(BLOCK_ID_ATTRIBUTE)
    }

    /// All nodes below this one in document order, excluding the node itself
    #[must_use]
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants {
            stack: self.children().iter().rev().collect(),
        }
    }
}

/// Pre-order walk over a subtree
pub struct Descendants<'a> {
    stack: Vec<&'a ContentNode>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a ContentNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children().iter().rev());
        Some(node)
    }
}
