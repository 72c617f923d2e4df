//! Document type - the root container handed from reader to writer.

use crate::Node;

/// A parsed document ready to be rendered.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Document {
    /// Root content node (kind `document`).
    pub content: Node,
}

impl Document {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self {
            content: Node::new("document"),
        }
    }

    /// Set the root content node.
    pub fn with_content(mut self, content: Node) -> Self {
        self.content = content;
        self
    }

    /// Top-level block nodes.
    pub fn blocks(&self) -> &[Node] {
        &self.content.children
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}
