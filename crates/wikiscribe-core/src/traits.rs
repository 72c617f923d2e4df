//! Parser and Emitter traits.

use crate::{ConversionResult, Document};

/// Options for parsing.
#[derive(Debug, Clone, Default)]
pub struct ParseOptions {
    /// Record byte-offset spans on every node.
    pub preserve_source_info: bool,
}

/// Error during parsing.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("invalid input: {0}")]
    Invalid(String),
}

/// Error during emitting.
#[derive(Debug, thiserror::Error)]
pub enum EmitError {
    #[error("{kind} node is missing required property `{prop}`")]
    MissingProperty { kind: String, prop: &'static str },
    #[error("{kind} node has invalid `{prop}`: {reason}")]
    InvalidProperty {
        kind: String,
        prop: &'static str,
        reason: String,
    },
}

/// Parse a format into the document tree.
pub trait Parser: Send + Sync {
    /// Formats this parser can handle.
    fn formats(&self) -> &[&str];

    /// Parse bytes into a document.
    fn parse(
        &self,
        input: &[u8],
        options: &ParseOptions,
    ) -> Result<ConversionResult<Document>, ParseError>;
}

/// Emit the document tree to a format.
pub trait Emitter: Send + Sync {
    /// Formats this emitter can produce.
    fn formats(&self) -> &[&str];

    /// Emit a document to bytes.
    fn emit(&self, doc: &Document) -> Result<ConversionResult<Vec<u8>>, EmitError>;
}
