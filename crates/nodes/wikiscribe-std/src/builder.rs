//! Closure-based construction of document trees.
//!
//! Block and inline content have separate builder types, so a heading can
//! only ever receive inline children and a list item chooses up front
//! whether it holds inlines or blocks.
//!
//! ```rust
//! use wikiscribe_std::builder::*;
//!
//! let doc = doc(|d| {
//!     d.h1(|h| h.text("Release notes"))
//!         .para(|p| p.text("Now with ").strong(|s| s.text("tables")))
//!         .bullet_list(|l| l.item(|i| i.text("faster")).item(|i| i.text("smaller")))
//! });
//! assert_eq!(doc.blocks().len(), 3);
//! ```

use crate::{Document, Node, node, prop};

/// Build a document from a sequence of blocks.
pub fn doc<F>(f: F) -> Document
where
    F: FnOnce(BlockBuilder) -> BlockBuilder,
{
    let blocks = f(BlockBuilder::default());
    Document::new().with_content(Node::new(node::DOCUMENT).children(blocks.nodes))
}

#[derive(Default)]
pub struct BlockBuilder {
    nodes: Vec<Node>,
}

impl BlockBuilder {
    fn push(mut self, node: Node) -> Self {
        self.nodes.push(node);
        self
    }

    pub fn h1<F>(self, f: F) -> Self
    where
        F: FnOnce(InlineBuilder) -> InlineBuilder,
    {
        self.heading(1, f)
    }

    /// `level` is stored as given; the writer rejects values outside 1..=6.
    pub fn heading<F>(self, level: i64, f: F) -> Self
    where
        F: FnOnce(InlineBuilder) -> InlineBuilder,
    {
        let text = f(InlineBuilder::default());
        self.push(
            Node::new(node::HEADING)
                .prop(prop::LEVEL, level)
                .children(text.nodes),
        )
    }

    pub fn para<F>(self, f: F) -> Self
    where
        F: FnOnce(InlineBuilder) -> InlineBuilder,
    {
        let text = f(InlineBuilder::default());
        self.push(Node::new(node::PARAGRAPH).children(text.nodes))
    }

    pub fn code_block(self, content: impl Into<String>, language: Option<&str>) -> Self {
        let mut code = Node::new(node::CODE_BLOCK).prop(prop::CONTENT, content.into());
        if let Some(language) = language {
            code = code.prop(prop::LANGUAGE, language);
        }
        self.push(code)
    }

    pub fn blockquote<F>(self, f: F) -> Self
    where
        F: FnOnce(BlockBuilder) -> BlockBuilder,
    {
        let inner = f(BlockBuilder::default());
        self.push(Node::new(node::BLOCKQUOTE).children(inner.nodes))
    }

    pub fn bullet_list<F>(self, f: F) -> Self
    where
        F: FnOnce(ListBuilder) -> ListBuilder,
    {
        self.push(f(ListBuilder::default()).finish(false))
    }

    pub fn ordered_list<F>(self, f: F) -> Self
    where
        F: FnOnce(ListBuilder) -> ListBuilder,
    {
        self.push(f(ListBuilder::default()).finish(true))
    }

    pub fn hr(self) -> Self {
        self.push(Node::new(node::HORIZONTAL_RULE))
    }

    pub fn table<F>(self, f: F) -> Self
    where
        F: FnOnce(TableBuilder) -> TableBuilder,
    {
        self.push(f(TableBuilder::default()).finish())
    }

    /// Markup copied to the output verbatim.
    pub fn raw(self, content: impl Into<String>) -> Self {
        self.push(Node::new(node::RAW_BLOCK).prop(prop::CONTENT, content.into()))
    }

    /// Append a node built elsewhere, e.g. with [`crate::helpers`].
    pub fn node(self, node: Node) -> Self {
        self.push(node)
    }
}

#[derive(Default)]
pub struct InlineBuilder {
    nodes: Vec<Node>,
}

impl InlineBuilder {
    fn push(mut self, node: Node) -> Self {
        self.nodes.push(node);
        self
    }

    fn wrap<F>(self, kind: &str, f: F) -> Self
    where
        F: FnOnce(InlineBuilder) -> InlineBuilder,
    {
        let inner = f(InlineBuilder::default());
        self.push(Node::new(kind).children(inner.nodes))
    }

    pub fn text(self, content: impl Into<String>) -> Self {
        self.push(Node::new(node::TEXT).prop(prop::CONTENT, content.into()))
    }

    pub fn em<F>(self, f: F) -> Self
    where
        F: FnOnce(InlineBuilder) -> InlineBuilder,
    {
        self.wrap(node::EMPHASIS, f)
    }

    pub fn strong<F>(self, f: F) -> Self
    where
        F: FnOnce(InlineBuilder) -> InlineBuilder,
    {
        self.wrap(node::STRONG, f)
    }

    pub fn strike<F>(self, f: F) -> Self
    where
        F: FnOnce(InlineBuilder) -> InlineBuilder,
    {
        self.wrap(node::STRIKEOUT, f)
    }

    /// Inline code span.
    pub fn code(self, content: impl Into<String>) -> Self {
        self.push(Node::new(node::CODE).prop(prop::CONTENT, content.into()))
    }

    /// A link whose display text is built by `f`; leave it empty to show
    /// the bare URL.
    pub fn link<F>(self, url: impl Into<String>, title: Option<&str>, f: F) -> Self
    where
        F: FnOnce(InlineBuilder) -> InlineBuilder,
    {
        let text = f(InlineBuilder::default());
        let mut link = Node::new(node::LINK)
            .prop(prop::URL, url.into())
            .children(text.nodes);
        if let Some(title) = title {
            link = link.prop(prop::TITLE, title);
        }
        self.push(link)
    }

    pub fn image(
        self,
        url: impl Into<String>,
        alt: impl Into<String>,
        title: Option<&str>,
    ) -> Self {
        let mut image = Node::new(node::IMAGE)
            .prop(prop::URL, url.into())
            .prop(prop::ALT, alt.into());
        if let Some(title) = title {
            image = image.prop(prop::TITLE, title);
        }
        self.push(image)
    }

    /// Hard line break.
    pub fn br(self) -> Self {
        self.push(Node::new(node::LINE_BREAK))
    }

    pub fn soft_break(self) -> Self {
        self.push(Node::new(node::SOFT_BREAK))
    }
}

#[derive(Default)]
pub struct ListBuilder {
    items: Vec<Node>,
}

impl ListBuilder {
    /// Tight item: inline content directly under the item.
    pub fn item<F>(mut self, f: F) -> Self
    where
        F: FnOnce(InlineBuilder) -> InlineBuilder,
    {
        let text = f(InlineBuilder::default());
        self.items.push(Node::new(node::LIST_ITEM).children(text.nodes));
        self
    }

    /// Item holding blocks, such as the paragraphs of a loose list or a
    /// nested list.
    pub fn item_block<F>(mut self, f: F) -> Self
    where
        F: FnOnce(BlockBuilder) -> BlockBuilder,
    {
        let blocks = f(BlockBuilder::default());
        self.items.push(Node::new(node::LIST_ITEM).children(blocks.nodes));
        self
    }

    fn finish(self, ordered: bool) -> Node {
        Node::new(node::LIST)
            .prop(prop::ORDERED, ordered)
            .children(self.items)
    }
}

/// Header rows go to a `table_head` section, data rows to `table_body`,
/// the same shape the markdown reader produces.
#[derive(Default)]
pub struct TableBuilder {
    head: Vec<Node>,
    body: Vec<Node>,
}

impl TableBuilder {
    pub fn header<F>(mut self, f: F) -> Self
    where
        F: FnOnce(RowBuilder) -> RowBuilder,
    {
        self.head.push(f(RowBuilder::new(true)).finish());
        self
    }

    pub fn row<F>(mut self, f: F) -> Self
    where
        F: FnOnce(RowBuilder) -> RowBuilder,
    {
        self.body.push(f(RowBuilder::new(false)).finish());
        self
    }

    fn finish(self) -> Node {
        let sections = [(node::TABLE_HEAD, self.head), (node::TABLE_BODY, self.body)];
        sections
            .into_iter()
            .filter(|(_, rows)| !rows.is_empty())
            .fold(Node::new(node::TABLE), |table, (kind, rows)| {
                table.child(Node::new(kind).children(rows))
            })
    }
}

pub struct RowBuilder {
    header: bool,
    cells: Vec<Node>,
}

impl RowBuilder {
    fn new(header: bool) -> Self {
        Self {
            header,
            cells: Vec::new(),
        }
    }

    /// Cells inherit the row's header flag.
    pub fn cell<F>(mut self, f: F) -> Self
    where
        F: FnOnce(InlineBuilder) -> InlineBuilder,
    {
        let text = f(InlineBuilder::default());
        self.cells.push(
            Node::new(node::TABLE_CELL)
                .prop(prop::HEADER, self.header)
                .children(text.nodes),
        );
        self
    }

    fn finish(self) -> Node {
        Node::new(node::TABLE_ROW).children(self.cells)
    }
}
