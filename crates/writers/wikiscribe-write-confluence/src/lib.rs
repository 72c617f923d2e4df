//! Confluence wiki markup writer for wikiscribe.
//!
//! The tree is walked depth-first, leaves first: each node's children are
//! rendered to text, and that text is handed to the matching [`Renderer`]
//! method. [`ConfluenceRenderer`] supplies the Confluence rules; any other
//! `Renderer` can be plugged into [`render`].

mod lang;
mod render;

pub use lang::{NO_HIGHLIGHT, resolve_language};
pub use render::{CellFlags, ConfluenceOptions, ConfluenceRenderer, MAX_CODE_LINES, Renderer};

use wikiscribe_core::{
    ConversionResult, Document, EmitError, Emitter, FidelityWarning, Severity, WarningKind,
};
use wikiscribe_std::{Node, node, prop};

/// Emit a document as Confluence wiki markup.
pub fn emit(doc: &Document) -> Result<ConversionResult<Vec<u8>>, EmitError> {
    emit_with_options(doc, &ConfluenceOptions::default())
}

/// Emit a document as Confluence wiki markup with custom options.
pub fn emit_with_options(
    doc: &Document,
    options: &ConfluenceOptions,
) -> Result<ConversionResult<Vec<u8>>, EmitError> {
    let result = render(doc, &ConfluenceRenderer::new(*options))?;
    Ok(result.map(String::into_bytes))
}

/// Render a document with any [`Renderer`].
pub fn render<R: Renderer>(
    doc: &Document,
    renderer: &R,
) -> Result<ConversionResult<String>, EmitError> {
    let mut ctx = EmitContext {
        renderer,
        warnings: Vec::new(),
    };
    let output = ctx.render_node(&doc.content)?;
    tracing::trace!(bytes = output.len(), "rendered document");
    Ok(ConversionResult::with_warnings(output, ctx.warnings))
}

/// [`Emitter`] implementation for callers that dispatch on format name.
#[derive(Debug, Clone, Default)]
pub struct ConfluenceEmitter {
    pub options: ConfluenceOptions,
}

impl ConfluenceEmitter {
    pub fn new(options: ConfluenceOptions) -> Self {
        Self { options }
    }
}

impl Emitter for ConfluenceEmitter {
    fn formats(&self) -> &[&str] {
        &["confluence", "confluence-wiki"]
    }

    fn emit(&self, doc: &Document) -> Result<ConversionResult<Vec<u8>>, EmitError> {
        emit_with_options(doc, &self.options)
    }
}

/// Block kinds that must start on their own line inside a list item.
const ITEM_BLOCKS: &[&str] = &[
    node::LIST,
    node::PARAGRAPH,
    node::CODE_BLOCK,
    node::BLOCKQUOTE,
    node::TABLE,
    node::HEADING,
    node::RAW_BLOCK,
];

struct EmitContext<'r, R> {
    renderer: &'r R,
    warnings: Vec<FidelityWarning>,
}

impl<R: Renderer> EmitContext<'_, R> {
    fn render_children(&mut self, node: &Node) -> Result<String, EmitError> {
        let mut out = String::new();
        for child in &node.children {
            out.push_str(&self.render_node(child)?);
        }
        Ok(out)
    }

    fn render_node(&mut self, node: &Node) -> Result<String, EmitError> {
        let r = self.renderer;
        let out = match node.kind.as_str() {
            node::DOCUMENT | node::DIV | node::SPAN => self.render_children(node)?,

            node::PARAGRAPH => r.paragraph(&self.render_children(node)?),

            node::HEADING => {
                let level = heading_level(node)?;
                r.heading(&self.render_children(node)?, level)
            }

            node::BLOCKQUOTE => r.blockquote(&self.render_children(node)?),

            node::CODE_BLOCK => {
                let content = required_str(node, prop::CONTENT)?;
                // The fence's closing newline is not part of the code.
                let code = content.strip_suffix('\n').unwrap_or(content);
                r.code_block(code, node.props.get_str(prop::LANGUAGE))
            }

            node::LIST => {
                let ordered = node.props.get_bool(prop::ORDERED).unwrap_or(false);
                r.list(&self.render_children(node)?, ordered)
            }

            node::LIST_ITEM => r.list_item(&self.render_item_body(node)?),

            node::TABLE => self.render_table(node)?,

            // Sections outside a table render as plain rows.
            node::TABLE_HEAD | node::TABLE_BODY | node::TABLE_FOOT => {
                self.render_children(node)?
            }

            node::TABLE_ROW => r.table_row(&self.render_children(node)?),

            node::TABLE_CELL | node::TABLE_HEADER => {
                let flags = CellFlags {
                    header: is_header_cell(node),
                };
                r.table_cell(&self.render_children(node)?, flags)
            }

            node::HORIZONTAL_RULE => r.horizontal_rule(),

            node::RAW_BLOCK | node::RAW_INLINE => r.raw(required_str(node, prop::CONTENT)?),

            node::TEXT => r.text(required_str(node, prop::CONTENT)?),

            node::STRONG => r.strong(&self.render_children(node)?),

            node::EMPHASIS => r.emphasis(&self.render_children(node)?),

            node::STRIKEOUT => r.strikeout(&self.render_children(node)?),

            node::CODE => r.code_span(required_str(node, prop::CONTENT)?),

            node::LINK => {
                let href = required_str(node, prop::URL)?;
                let text = self.render_children(node)?;
                let text = (!text.is_empty()).then_some(text.as_str());
                r.link(href, node.props.get_str(prop::TITLE), text)
            }

            node::IMAGE => r.image(
                required_str(node, prop::URL)?,
                node.props.get_str(prop::TITLE),
                node.props.get_str(prop::ALT),
            ),

            node::LINE_BREAK => r.line_break(),

            node::SOFT_BREAK => r.soft_break(),

            other => {
                tracing::debug!(kind = other, "no Confluence rule for node kind");
                let mut warning = FidelityWarning::new(
                    Severity::Minor,
                    WarningKind::UnsupportedNode(other.to_string()),
                    format!("{other} has no Confluence equivalent; rendering its content only"),
                );
                if let Some(span) = node.span {
                    warning = warning.at(span);
                }
                self.warnings.push(warning);
                self.render_children(node)?
            }
        };
        Ok(out)
    }

    /// Render a list item's children, putting nested blocks on their own
    /// line so the enclosing list sees one marker-prefixed line per entry.
    fn render_item_body(&mut self, item: &Node) -> Result<String, EmitError> {
        let mut body = String::new();
        for child in &item.children {
            let rendered = self.render_node(child)?;
            let is_block = ITEM_BLOCKS.iter().any(|kind| child.is(kind));
            if is_block && !body.is_empty() && !body.ends_with('\n') {
                body.push('\n');
            }
            body.push_str(&rendered);
        }
        Ok(body)
    }

    fn render_table(&mut self, table: &Node) -> Result<String, EmitError> {
        let mut header = String::new();
        let mut body = String::new();
        for child in &table.children {
            match child.kind.as_str() {
                node::TABLE_HEAD => header.push_str(&self.render_children(child)?),
                node::TABLE_ROW if is_header_row(child) => {
                    header.push_str(&self.render_node(child)?)
                }
                _ => body.push_str(&self.render_node(child)?),
            }
        }
        Ok(self.renderer.table(&header, &body))
    }
}

fn required_str<'a>(node: &'a Node, key: &'static str) -> Result<&'a str, EmitError> {
    node.props
        .get_str(key)
        .ok_or_else(|| EmitError::MissingProperty {
            kind: node.kind.to_string(),
            prop: key,
        })
}

fn heading_level(node: &Node) -> Result<u8, EmitError> {
    let level = node
        .props
        .get_int(prop::LEVEL)
        .ok_or_else(|| EmitError::MissingProperty {
            kind: node.kind.to_string(),
            prop: prop::LEVEL,
        })?;
    u8::try_from(level)
        .ok()
        .filter(|l| (1..=6).contains(l))
        .ok_or_else(|| EmitError::InvalidProperty {
            kind: node.kind.to_string(),
            prop: prop::LEVEL,
            reason: format!("{level} is outside 1..=6"),
        })
}

fn is_header_cell(cell: &Node) -> bool {
    cell.is(node::TABLE_HEADER) || cell.props.get_bool(prop::HEADER) == Some(true)
}

/// A bare row directly under a table counts as a header row when its
/// first cell is a header cell.
fn is_header_row(row: &Node) -> bool {
    row.children.first().is_some_and(is_header_cell)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wikiscribe_std::builder::*;
    use wikiscribe_std::helpers;

    fn emit_str(doc: &Document) -> String {
        let result = emit(doc).unwrap();
        String::from_utf8(result.value).unwrap()
    }

    fn emit_node(node: Node) -> Result<String, EmitError> {
        let doc = Document::new().with_content(helpers::document([node]));
        render(&doc, &ConfluenceRenderer::default()).map(|r| r.value)
    }

    #[test]
    fn test_emit_heading() {
        let doc = doc(|d| d.heading(3, |h| h.text("Title")));
        assert_eq!(emit_str(&doc), "h3. Title\n\n");
    }

    #[test]
    fn test_emit_paragraph_inline() {
        let doc = doc(|d| {
            d.para(|p| {
                p.text("a ")
                    .strong(|s| s.text("b"))
                    .text(" ")
                    .em(|e| e.text("c"))
                    .text(" ")
                    .strike(|s| s.text("d"))
                    .text(" ")
                    .code("e")
            })
        });
        assert_eq!(emit_str(&doc), "a *b* _c_ -d- {{e}}\n\n");
    }

    #[test]
    fn test_emit_nested_inline() {
        let doc = doc(|d| d.para(|p| p.strong(|s| s.em(|e| e.text("both")))));
        assert_eq!(emit_str(&doc), "*_both_*\n\n");
    }

    #[test]
    fn test_emit_links() {
        let doc = doc(|d| {
            d.para(|p| {
                p.link("http://x", None, |l| l.text("Go"))
                    .text(" ")
                    .link("http://y", Some("ignored"), |l| l)
            })
        });
        assert_eq!(emit_str(&doc), "[Go|http://x] [http://y]\n\n");
    }

    #[test]
    fn test_emit_link_with_formatted_text() {
        let doc = doc(|d| d.para(|p| p.link("http://x", None, |l| l.strong(|s| s.text("Go")))));
        assert_eq!(emit_str(&doc), "[*Go*|http://x]\n\n");
    }

    #[test]
    fn test_emit_image() {
        let doc = doc(|d| d.para(|p| p.image("http://i.png", "alt", Some("title"))));
        assert_eq!(emit_str(&doc), "!http://i.png!\n\n");
    }

    #[test]
    fn test_emit_breaks() {
        let doc = doc(|d| {
            d.para(|p| {
                p.text("one")
                    .soft_break()
                    .text("two")
                    .br()
                    .text("three")
            })
        });
        assert_eq!(emit_str(&doc), "one\ntwo\nthree\n\n");
    }

    #[test]
    fn test_emit_blockquote() {
        let doc = doc(|d| d.blockquote(|q| q.para(|p| p.text("wise"))));
        assert_eq!(emit_str(&doc), "{quote}wise\n\n{quote}");
    }

    #[test]
    fn test_emit_hr_and_raw() {
        let doc = doc(|d| d.hr().raw("<br/>"));
        assert_eq!(emit_str(&doc), "----<br/>");
    }

    #[test]
    fn test_emit_code_block_strips_fence_newline() {
        let doc = doc(|d| d.code_block("print('hi')\n", Some("Python")));
        assert_eq!(
            emit_str(&doc),
            "{code:language=python|theme=Confluence}\nprint('hi')\n{code}\n\n"
        );
    }

    #[test]
    fn test_emit_code_block_without_language() {
        let doc = doc(|d| d.code_block("x", None));
        assert_eq!(
            emit_str(&doc),
            "{code:language=none|theme=Confluence}\nx\n{code}\n\n"
        );
    }

    #[test]
    fn test_emit_code_block_linenumbers_option() {
        let doc = doc(|d| d.code_block("x\n", Some("sql")));
        let options = ConfluenceOptions { linenumbers: true };
        let out = String::from_utf8(emit_with_options(&doc, &options).unwrap().value).unwrap();
        assert_eq!(
            out,
            "{code:language=sql|theme=Confluence|linenumbers=true}\nx\n{code}\n\n"
        );
    }

    #[test]
    fn test_emit_list() {
        let doc = doc(|d| d.bullet_list(|l| l.item(|i| i.text("one")).item(|i| i.text("two"))));
        assert_eq!(emit_str(&doc), "* one\n* two\n\n");
    }

    #[test]
    fn test_emit_ordered_list() {
        let doc = doc(|d| d.ordered_list(|l| l.item(|i| i.text("a")).item(|i| i.text("b"))));
        assert_eq!(emit_str(&doc), "# a\n# b\n\n");
    }

    #[test]
    fn test_emit_loose_list_items() {
        let doc = doc(|d| {
            d.bullet_list(|l| {
                l.item_block(|b| b.para(|p| p.text("one")))
                    .item_block(|b| b.para(|p| p.text("two")))
            })
        });
        assert_eq!(emit_str(&doc), "* one\n* two\n\n");
    }

    #[test]
    fn test_emit_nested_lists() {
        let doc = doc(|d| {
            d.bullet_list(|l| {
                l.item_block(|b| {
                    b.node(helpers::text("parent"))
                        .ordered_list(|l| l.item(|i| i.text("child")))
                })
                .item(|i| i.text("sibling"))
            })
        });
        assert_eq!(emit_str(&doc), "* parent\n*# child\n* sibling\n\n");
    }

    #[test]
    fn test_emit_table() {
        let doc = doc(|d| {
            d.table(|t| {
                t.header(|r| r.cell(|c| c.text("Name")).cell(|c| c.text("Value")))
                    .row(|r| r.cell(|c| c.text("foo")).cell(|c| c.text("42")))
            })
        });
        assert_eq!(emit_str(&doc), "||Name||Value\n|foo|42\n\n");
    }

    #[test]
    fn test_emit_table_with_bare_rows() {
        let table = Node::new(node::TABLE)
            .child(helpers::table_row([Node::new(node::TABLE_HEADER)
                .child(helpers::text("h"))]))
            .child(helpers::table_row([helpers::table_cell(
                false,
                [helpers::text("c")],
            )]));
        assert_eq!(emit_node(table).unwrap(), "||h\n|c\n\n");
    }

    #[test]
    fn test_unknown_node_renders_children_with_warning() {
        let doc = Document::new().with_content(helpers::document([Node::new("underline")
            .child(helpers::text("kept"))]));
        let result = render(&doc, &ConfluenceRenderer::default()).unwrap();
        assert_eq!(result.value, "kept");
        assert_eq!(result.warnings.len(), 1);
        assert!(matches!(
            &result.warnings[0].kind,
            WarningKind::UnsupportedNode(kind) if kind == "underline"
        ));
    }

    #[test]
    fn test_missing_heading_level_is_rejected() {
        let err = emit_node(Node::new(node::HEADING).child(helpers::text("x"))).unwrap_err();
        assert!(matches!(
            err,
            EmitError::MissingProperty { prop: "level", .. }
        ));
    }

    #[test]
    fn test_out_of_range_heading_level_is_rejected() {
        let err = emit_node(helpers::heading(7, [helpers::text("x")])).unwrap_err();
        assert!(matches!(err, EmitError::InvalidProperty { prop: "level", .. }));
        assert!(emit_node(helpers::heading(0, [helpers::text("x")])).is_err());
    }

    #[test]
    fn test_missing_link_url_is_rejected() {
        let err = emit_node(Node::new(node::LINK).child(helpers::text("x"))).unwrap_err();
        assert_eq!(err.to_string(), "link node is missing required property `url`");
    }

    #[test]
    fn test_emitter_trait() {
        let emitter = ConfluenceEmitter::default();
        assert!(emitter.formats().contains(&"confluence"));
        let doc = doc(|d| d.h1(|h| h.text("T")));
        let bytes = Emitter::emit(&emitter, &doc).unwrap().value;
        assert_eq!(bytes, b"h1. T\n\n");
    }

    #[test]
    fn test_custom_renderer() {
        struct Shouty;
        impl Renderer for Shouty {
            fn paragraph(&self, text: &str) -> String {
                format!("{}!\n", text.to_uppercase())
            }
            fn raw(&self, raw: &str) -> String {
                raw.to_string()
            }
            fn heading(&self, text: &str, _level: u8) -> String {
                text.to_string()
            }
            fn strong(&self, text: &str) -> String {
                text.to_string()
            }
            fn emphasis(&self, text: &str) -> String {
                text.to_string()
            }
            fn strikeout(&self, text: &str) -> String {
                text.to_string()
            }
            fn code_span(&self, code: &str) -> String {
                code.to_string()
            }
            fn blockquote(&self, quote: &str) -> String {
                quote.to_string()
            }
            fn line_break(&self) -> String {
                String::new()
            }
            fn horizontal_rule(&self) -> String {
                String::new()
            }
            fn link(&self, href: &str, _title: Option<&str>, _text: Option<&str>) -> String {
                href.to_string()
            }
            fn image(&self, href: &str, _title: Option<&str>, _alt: Option<&str>) -> String {
                href.to_string()
            }
            fn list(&self, body: &str, _ordered: bool) -> String {
                body.to_string()
            }
            fn list_item(&self, body: &str) -> String {
                body.to_string()
            }
            fn table(&self, header: &str, body: &str) -> String {
                format!("{header}{body}")
            }
            fn table_row(&self, content: &str) -> String {
                content.to_string()
            }
            fn table_cell(&self, content: &str, _flags: CellFlags) -> String {
                content.to_string()
            }
            fn code_block(&self, code: &str, _lang: Option<&str>) -> String {
                code.to_string()
            }
        }

        let doc = doc(|d| d.para(|p| p.text("hi")));
        assert_eq!(render(&doc, &Shouty).unwrap().value, "HI!\n");
    }
}
