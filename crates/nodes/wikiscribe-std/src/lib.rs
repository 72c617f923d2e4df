//! Node kinds and property keys understood by the Confluence writer.
//!
//! The markdown reader produces trees using these names and the writer
//! matches on them. `wikiscribe-core` is re-exported, so depending on this
//! crate alone is enough to build and inspect documents.

pub mod builder;

pub use wikiscribe_core::*;

/// Values of [`Node::kind`].
pub mod node {
    // Blocks
    /// Root of every document.
    pub const DOCUMENT: &str = "document";
    pub const PARAGRAPH: &str = "paragraph";
    /// Requires `level`.
    pub const HEADING: &str = "heading";
    /// Requires `content`; `language` is optional.
    pub const CODE_BLOCK: &str = "code_block";
    pub const BLOCKQUOTE: &str = "blockquote";
    /// `ordered` selects `#` over `*` markers.
    pub const LIST: &str = "list";
    pub const LIST_ITEM: &str = "list_item";
    pub const TABLE: &str = "table";
    /// Rows under this section render with header delimiters.
    pub const TABLE_HEAD: &str = "table_head";
    pub const TABLE_BODY: &str = "table_body";
    pub const TABLE_FOOT: &str = "table_foot";
    pub const TABLE_ROW: &str = "table_row";
    /// Header cells carry `header = true`.
    pub const TABLE_CELL: &str = "table_cell";
    /// Alternative to a flagged `table_cell` for hand-built trees.
    pub const TABLE_HEADER: &str = "table_header";
    pub const HORIZONTAL_RULE: &str = "horizontal_rule";
    /// Transparent grouping; only its children are rendered.
    pub const DIV: &str = "div";
    /// Requires `content`, which is copied to the output untouched.
    pub const RAW_BLOCK: &str = "raw_block";

    // Inlines
    /// Requires `content`.
    pub const TEXT: &str = "text";
    pub const EMPHASIS: &str = "emphasis";
    pub const STRONG: &str = "strong";
    pub const STRIKEOUT: &str = "strikeout";
    /// Inline code span; requires `content`.
    pub const CODE: &str = "code";
    /// Requires `url`; children form the display text.
    pub const LINK: &str = "link";
    /// Requires `url`.
    pub const IMAGE: &str = "image";
    pub const LINE_BREAK: &str = "line_break";
    /// Newline inside a paragraph that was not a hard break.
    pub const SOFT_BREAK: &str = "soft_break";
    /// Transparent inline grouping.
    pub const SPAN: &str = "span";
    pub const RAW_INLINE: &str = "raw_inline";
}

/// Keys into [`Node::props`].
pub mod prop {
    /// Integer 1-6.
    pub const LEVEL: &str = "level";
    pub const ORDERED: &str = "ordered";
    /// Code block language tag as written in the source.
    pub const LANGUAGE: &str = "language";
    pub const URL: &str = "url";
    pub const TITLE: &str = "title";
    pub const ALT: &str = "alt";
    /// Literal text of text, code and raw nodes.
    pub const CONTENT: &str = "content";
    pub const HEADER: &str = "header";
}

/// Free functions for assembling nodes without the builder.
pub mod helpers {
    use crate::{Node, node, prop};

    pub fn text(content: impl Into<String>) -> Node {
        Node::new(node::TEXT).prop(prop::CONTENT, content.into())
    }

    pub fn paragraph(children: impl IntoIterator<Item = Node>) -> Node {
        Node::new(node::PARAGRAPH).children(children)
    }

    pub fn heading(level: i64, children: impl IntoIterator<Item = Node>) -> Node {
        Node::new(node::HEADING)
            .prop(prop::LEVEL, level)
            .children(children)
    }

    pub fn bullet_list(items: impl IntoIterator<Item = Node>) -> Node {
        Node::new(node::LIST)
            .prop(prop::ORDERED, false)
            .children(items)
    }

    pub fn list_item(children: impl IntoIterator<Item = Node>) -> Node {
        Node::new(node::LIST_ITEM).children(children)
    }

    /// `header` picks `||` over `|` when rendered.
    pub fn table_cell(header: bool, children: impl IntoIterator<Item = Node>) -> Node {
        Node::new(node::TABLE_CELL)
            .prop(prop::HEADER, header)
            .children(children)
    }

    pub fn table_row(cells: impl IntoIterator<Item = Node>) -> Node {
        Node::new(node::TABLE_ROW).children(cells)
    }

    /// Root node for [`crate::Document::with_content`].
    pub fn document(children: impl IntoIterator<Item = Node>) -> Node {
        Node::new(node::DOCUMENT).children(children)
    }
}
