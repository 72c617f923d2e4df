//! Markdown reader for wikiscribe.
//!
//! Lowers the `pulldown-cmark` event stream into wikiscribe's document tree.
//! Only the GFM extensions the Confluence writer understands are enabled:
//! tables and strikethrough.

use std::ops::Range;

use pulldown_cmark::{CodeBlockKind, Event, HeadingLevel, Options, Tag, TagEnd};
use wikiscribe_core::{ConversionResult, Document, ParseError, ParseOptions, Parser, Span};
use wikiscribe_std::{Node, node, prop};

type SpannedEvent<'a> = (Event<'a>, Range<usize>);

/// Parse markdown text into a wikiscribe Document.
pub fn parse(input: &str) -> Result<ConversionResult<Document>, ParseError> {
    parse_with_options(input, &ParseOptions::default())
}

/// Parse markdown with custom options.
pub fn parse_with_options(
    input: &str,
    options: &ParseOptions,
) -> Result<ConversionResult<Document>, ParseError> {
    let mut opts = Options::empty();
    opts.insert(Options::ENABLE_TABLES);
    opts.insert(Options::ENABLE_STRIKETHROUGH);

    let events: Vec<_> = pulldown_cmark::Parser::new_ext(input, opts)
        .into_offset_iter()
        .collect();
    tracing::trace!(events = events.len(), bytes = input.len(), "tokenized markdown");

    let ctx = ParseContext {
        preserve_spans: options.preserve_source_info,
    };
    let children = ctx.parse_events(&events);

    let root = Node::new(node::DOCUMENT).children(children);
    Ok(ConversionResult::ok(Document::new().with_content(root)))
}

/// [`Parser`] implementation for callers that dispatch on format name.
#[derive(Debug, Default, Clone, Copy)]
pub struct MarkdownParser;

impl Parser for MarkdownParser {
    fn formats(&self) -> &[&str] {
        &["markdown", "md"]
    }

    fn parse(
        &self,
        input: &[u8],
        options: &ParseOptions,
    ) -> Result<ConversionResult<Document>, ParseError> {
        let text = std::str::from_utf8(input)
            .map_err(|e| ParseError::Invalid(format!("markdown input is not UTF-8: {e}")))?;
        parse_with_options(text, options)
    }
}

struct ParseContext {
    preserve_spans: bool,
}

impl ParseContext {
    /// Parse a slice of events into nodes.
    fn parse_events(&self, events: &[SpannedEvent<'_>]) -> Vec<Node> {
        let mut nodes = Vec::new();
        let mut idx = 0;

        while idx < events.len() {
            let (node, consumed) = self.parse_event(&events[idx..]);
            if let Some(n) = node {
                nodes.push(n);
            }
            idx += consumed.max(1);
        }

        nodes
    }

    fn with_span(&self, mut node: Node, range: &Range<usize>) -> Node {
        if self.preserve_spans {
            node.span = Some(Span {
                start: range.start,
                end: range.end,
            });
        }
        node
    }

    /// Parse a single event or matched tag pair, returning the node and the
    /// number of events consumed.
    fn parse_event(&self, events: &[SpannedEvent<'_>]) -> (Option<Node>, usize) {
        let (event, range) = &events[0];
        let node = match event {
            Event::Start(tag) => return self.parse_tag(tag.clone(), events),
            Event::End(_) => return (None, 1),
            Event::Text(text) => Node::new(node::TEXT).prop(prop::CONTENT, text.to_string()),
            Event::Code(code) => Node::new(node::CODE).prop(prop::CONTENT, code.to_string()),
            Event::SoftBreak => Node::new(node::SOFT_BREAK),
            Event::HardBreak => Node::new(node::LINE_BREAK),
            Event::Rule => Node::new(node::HORIZONTAL_RULE),
            Event::Html(html) => Node::new(node::RAW_BLOCK).prop(prop::CONTENT, html.to_string()),
            Event::InlineHtml(html) => {
                Node::new(node::RAW_INLINE).prop(prop::CONTENT, html.to_string())
            }
            // Only produced by extensions left disabled in `parse_with_options`.
            Event::FootnoteReference(_)
            | Event::InlineMath(_)
            | Event::DisplayMath(_)
            | Event::TaskListMarker(_) => return (None, 1),
        };
        (Some(self.with_span(node, range)), 1)
    }

    /// Parse a tag and its contents.
    fn parse_tag(&self, tag: Tag<'_>, events: &[SpannedEvent<'_>]) -> (Option<Node>, usize) {
        let end_idx = find_matching_end(&events[1..], &tag);
        let inner_events = &events[1..(end_idx + 1).min(events.len())];
        let children = self.parse_events(inner_events);
        let consumed = end_idx + 2; // +1 for start, +1 for end

        let tag_range = {
            let start = events[0].1.start;
            let end = events
                .get(end_idx + 1)
                .map_or(events[0].1.end, |(_, range)| range.end);
            start..end
        };

        let node = match tag {
            Tag::Paragraph => Node::new(node::PARAGRAPH).children(children),

            Tag::Heading { level, .. } => {
                let level_num: i64 = match level {
                    HeadingLevel::H1 => 1,
                    HeadingLevel::H2 => 2,
                    HeadingLevel::H3 => 3,
                    HeadingLevel::H4 => 4,
                    HeadingLevel::H5 => 5,
                    HeadingLevel::H6 => 6,
                };
                Node::new(node::HEADING)
                    .prop(prop::LEVEL, level_num)
                    .children(children)
            }

            Tag::BlockQuote(_) => Node::new(node::BLOCKQUOTE).children(children),

            Tag::CodeBlock(kind) => {
                let mut code =
                    Node::new(node::CODE_BLOCK).prop(prop::CONTENT, plain_text(&children));
                // Only the first word of the info string names the language.
                if let CodeBlockKind::Fenced(info) = kind
                    && let Some(lang) = info.split_whitespace().next()
                {
                    code = code.prop(prop::LANGUAGE, lang);
                }
                code
            }

            Tag::HtmlBlock => {
                let content: String = children
                    .iter()
                    .filter_map(|n| n.props.get_str(prop::CONTENT))
                    .collect();
                Node::new(node::RAW_BLOCK).prop(prop::CONTENT, content)
            }

            // Confluence numbers every list from one, so the start number is dropped.
            Tag::List(start) => Node::new(node::LIST)
                .prop(prop::ORDERED, start.is_some())
                .children(children),

            Tag::Item => Node::new(node::LIST_ITEM).children(children),

            // Confluence table markup has no column alignment.
            Tag::Table(_) => build_table(children),

            // The head carries its cells directly; give it a row so every
            // table section has the same shape.
            Tag::TableHead => {
                let cells = children
                    .into_iter()
                    .map(|cell| cell.prop(prop::HEADER, true));
                Node::new(node::TABLE_HEAD).child(Node::new(node::TABLE_ROW).children(cells))
            }

            Tag::TableRow => {
                let cells = children
                    .into_iter()
                    .map(|cell| cell.prop(prop::HEADER, false));
                Node::new(node::TABLE_ROW).children(cells)
            }

            Tag::TableCell => Node::new(node::TABLE_CELL).children(children),

            Tag::Emphasis => Node::new(node::EMPHASIS).children(children),

            Tag::Strong => Node::new(node::STRONG).children(children),

            Tag::Strikethrough => Node::new(node::STRIKEOUT).children(children),

            Tag::Link {
                dest_url, title, ..
            } => {
                let mut link = Node::new(node::LINK)
                    .prop(prop::URL, dest_url.to_string())
                    .children(children);
                if !title.is_empty() {
                    link = link.prop(prop::TITLE, title.to_string());
                }
                link
            }

            Tag::Image {
                dest_url, title, ..
            } => {
                let mut img = Node::new(node::IMAGE)
                    .prop(prop::URL, dest_url.to_string())
                    .prop(prop::ALT, plain_text(&children));
                if !title.is_empty() {
                    img = img.prop(prop::TITLE, title.to_string());
                }
                img
            }

            // Only produced by extensions left disabled in `parse_with_options`.
            Tag::FootnoteDefinition(_)
            | Tag::DefinitionList
            | Tag::DefinitionListTitle
            | Tag::DefinitionListDefinition
            | Tag::MetadataBlock(_) => return (None, consumed),
        };

        (Some(self.with_span(node, &tag_range)), consumed)
    }
}

/// Split table children into a head section and a body section.
fn build_table(children: Vec<Node>) -> Node {
    let mut table = Node::new(node::TABLE);
    let mut body = Vec::new();
    for child in children {
        if child.is(node::TABLE_HEAD) {
            table = table.child(child);
        } else {
            body.push(child);
        }
    }
    if !body.is_empty() {
        table = table.child(Node::new(node::TABLE_BODY).children(body));
    }
    table
}

/// Concatenate the text content of a subtree (code block bodies, image alt).
fn plain_text(nodes: &[Node]) -> String {
    let mut out = String::new();
    for n in nodes {
        if let Some(content) = n.props.get_str(prop::CONTENT) {
            out.push_str(content);
        }
        out.push_str(&plain_text(&n.children));
    }
    out
}

/// Find the index of the matching end tag.
fn find_matching_end(events: &[SpannedEvent<'_>], start_tag: &Tag<'_>) -> usize {
    let mut depth = 1;
    for (i, (event, _)) in events.iter().enumerate() {
        match event {
            Event::Start(t) if tags_match(t, start_tag) => depth += 1,
            Event::End(t) if tag_end_matches(t, start_tag) => {
                depth -= 1;
                if depth == 0 {
                    return i;
                }
            }
            _ => {}
        }
    }
    events.len().saturating_sub(1)
}

/// Check if two start tags are the same type.
fn tags_match(a: &Tag<'_>, b: &Tag<'_>) -> bool {
    std::mem::discriminant(a) == std::mem::discriminant(b)
}

/// Check if an end tag matches a start tag.
fn tag_end_matches(end: &TagEnd, start: &Tag<'_>) -> bool {
    matches!(
        (end, start),
        (TagEnd::Paragraph, Tag::Paragraph)
            | (TagEnd::Heading(_), Tag::Heading { .. })
            | (TagEnd::BlockQuote(_), Tag::BlockQuote(_))
            | (TagEnd::CodeBlock, Tag::CodeBlock(_))
            | (TagEnd::List(_), Tag::List(_))
            | (TagEnd::Item, Tag::Item)
            | (TagEnd::Table, Tag::Table(_))
            | (TagEnd::TableHead, Tag::TableHead)
            | (TagEnd::TableRow, Tag::TableRow)
            | (TagEnd::TableCell, Tag::TableCell)
            | (TagEnd::Emphasis, Tag::Emphasis)
            | (TagEnd::Strong, Tag::Strong)
            | (TagEnd::Strikethrough, Tag::Strikethrough)
            | (TagEnd::Link, Tag::Link { .. })
            | (TagEnd::Image, Tag::Image { .. })
            | (TagEnd::HtmlBlock, Tag::HtmlBlock)
    )
}
