//! wikiscribe - Markdown to Confluence wiki markup.
//!
//! Markdown is parsed by `pulldown-cmark` into a small document tree, and
//! the tree is rendered node by node into Confluence's wiki markup.
//!
//! # Quick Start
//!
//! ```rust
//! use wikiscribe::{ConfluenceOptions, convert};
//!
//! let out = convert("# Hello\n\n**World**", &ConfluenceOptions::default()).unwrap();
//! assert_eq!(out.value, "h1. Hello\n\n*World*\n\n");
//! ```
//!
//! # Features
//!
//! - `markdown` - Markdown reader (default)
//! - `confluence` - Confluence writer (default)
//! - `std` - Standard node kinds and builders (default)
//! - `serde` - (De)serialize the document tree and [`ConfluenceOptions`]
//!
//! # Architecture
//!
//! Documents are trees of `Node`s with:
//! - `kind`: a string identifying the node type (e.g., "paragraph", "heading")
//! - `props`: a property bag with typed values
//! - `children`: child nodes
//!
//! The writer walks the tree leaves first and hands each node's rendered
//! children to a [`confluence::Renderer`] method.

// Re-export core types
pub use wikiscribe_core::*;

#[cfg(feature = "confluence")]
pub use wikiscribe_write_confluence::ConfluenceOptions;

/// Standard node kinds and helpers.
#[cfg(feature = "std")]
pub mod std {
    pub use wikiscribe_std::*;
}

/// Markdown format support.
#[cfg(feature = "markdown")]
pub mod markdown {
    pub use wikiscribe_read_markdown::{MarkdownParser, parse, parse_with_options};
}

/// Confluence wiki markup support.
#[cfg(feature = "confluence")]
pub mod confluence {
    pub use wikiscribe_write_confluence::{
        CellFlags, ConfluenceEmitter, ConfluenceOptions, ConfluenceRenderer, MAX_CODE_LINES,
        NO_HIGHLIGHT, Renderer, emit, emit_with_options, render, resolve_language,
    };
}

/// Error from a whole markdown-to-Confluence conversion.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to parse input: {0}")]
    Parse(#[from] ParseError),
    #[error("failed to render output: {0}")]
    Emit(#[from] EmitError),
    #[error("input is not valid UTF-8: {0}")]
    Utf8(#[from] ::std::str::Utf8Error),
}

/// Convert markdown source to Confluence wiki markup.
///
/// Warnings from parsing come before warnings from rendering.
#[cfg(all(feature = "markdown", feature = "confluence"))]
pub fn convert(
    markdown: &str,
    options: &ConfluenceOptions,
) -> Result<ConversionResult<String>, Error> {
    let parsed = markdown::parse(markdown)?;
    let renderer = confluence::ConfluenceRenderer::new(*options);
    let rendered = confluence::render(&parsed.value, &renderer)?;
    tracing::debug!(
        input_bytes = markdown.len(),
        output_bytes = rendered.value.len(),
        warnings = parsed.warnings.len() + rendered.warnings.len(),
        "converted markdown to confluence"
    );
    Ok(rendered.after(parsed.warnings))
}

/// Convert raw markdown bytes, rejecting input that is not UTF-8.
#[cfg(all(feature = "markdown", feature = "confluence"))]
pub fn convert_bytes(
    input: &[u8],
    options: &ConfluenceOptions,
) -> Result<ConversionResult<String>, Error> {
    convert(::std::str::from_utf8(input)?, options)
}

/// Common imports for typical usage.
pub mod prelude {
    pub use crate::{ConversionResult, Document, Node, PropValue, Properties};

    #[cfg(feature = "std")]
    pub use crate::std::{builder, node, prop};

    #[cfg(feature = "confluence")]
    pub use crate::confluence::{ConfluenceOptions, Renderer};
}
