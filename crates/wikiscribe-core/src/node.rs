//! Node types for the document tree.

use crate::Properties;

/// A content node in the document tree.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Node {
    /// Node type (e.g., "paragraph", "heading", "table").
    pub kind: NodeKind,
    pub props: Properties,
    pub children: Vec<Node>,
    /// Source location for error reporting.
    pub span: Option<Span>,
}

/// Node kind - open newtype so readers can emit kinds the writer does not
/// know about. Standard kinds live in `wikiscribe-std`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeKind(pub String);

/// Byte range in the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Node {
    /// Create a new node with the given kind.
    pub fn new(kind: impl Into<NodeKind>) -> Self {
        Self {
            kind: kind.into(),
            props: Properties::new(),
            children: Vec::new(),
            span: None,
        }
    }

    /// Add a property.
    pub fn prop(mut self, key: impl Into<String>, value: impl Into<PropValue>) -> Self {
        self.props.set(key, value);
        self
    }

    /// Add a child node.
    pub fn child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    /// Add multiple child nodes.
    pub fn children(mut self, children: impl IntoIterator<Item = Node>) -> Self {
        self.children.extend(children);
        self
    }

    /// Set the source span.
    pub fn span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    /// Whether this node has the given kind.
    pub fn is(&self, kind: &str) -> bool {
        self.kind.as_str() == kind
    }
}

impl NodeKind {
    pub fn new(s: impl Into<String>) -> Self {
        NodeKind(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for NodeKind {
    fn from(s: &str) -> Self {
        NodeKind(s.to_string())
    }
}

impl From<String> for NodeKind {
    fn from(s: String) -> Self {
        NodeKind(s)
    }
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// Re-export PropValue for the prop() method
pub use crate::properties::PropValue;
