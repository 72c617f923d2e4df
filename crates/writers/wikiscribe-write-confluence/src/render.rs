//! Per-node rendering rules.
//!
//! Every method receives the already-rendered text of the node's children
//! (or the node's literal content) and returns the markup for that node.
//! Methods never see sibling or parent state, so rendering the same tree
//! twice gives byte-identical output.

use crate::lang::resolve_language;

/// Code blocks longer than this many lines are collapsed by default.
pub const MAX_CODE_LINES: usize = 20;

/// Options recognized by [`ConfluenceRenderer`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ConfluenceOptions {
    /// Ask the `{code}` macro to number lines.
    pub linenumbers: bool,
}

/// Flags passed alongside a table cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CellFlags {
    pub header: bool,
}

/// One rendering method per node kind.
pub trait Renderer {
    fn paragraph(&self, text: &str) -> String;

    /// Raw embedded markup, passed through untouched.
    fn raw(&self, raw: &str) -> String;

    /// `level` is always within 1..=6.
    fn heading(&self, text: &str, level: u8) -> String;

    fn strong(&self, text: &str) -> String;

    fn emphasis(&self, text: &str) -> String;

    fn strikeout(&self, text: &str) -> String;

    fn code_span(&self, code: &str) -> String;

    fn blockquote(&self, quote: &str) -> String;

    fn line_break(&self) -> String;

    fn horizontal_rule(&self) -> String;

    fn link(&self, href: &str, title: Option<&str>, text: Option<&str>) -> String;

    fn image(&self, href: &str, title: Option<&str>, alt: Option<&str>) -> String;

    /// `body` is the concatenation of the rendered items, one line each.
    fn list(&self, body: &str, ordered: bool) -> String;

    fn list_item(&self, body: &str) -> String;

    fn table(&self, header: &str, body: &str) -> String;

    fn table_row(&self, content: &str) -> String;

    fn table_cell(&self, content: &str, flags: CellFlags) -> String;

    /// `code` excludes the fence's closing newline.
    fn code_block(&self, code: &str, lang: Option<&str>) -> String;

    fn text(&self, text: &str) -> String {
        text.to_string()
    }

    /// A newline inside a paragraph is kept as-is.
    fn soft_break(&self) -> String {
        "\n".to_string()
    }
}

/// Renders nodes as Confluence wiki markup.
#[derive(Debug, Clone, Default)]
pub struct ConfluenceRenderer {
    options: ConfluenceOptions,
}

impl ConfluenceRenderer {
    pub fn new(options: ConfluenceOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ConfluenceOptions {
        &self.options
    }
}

impl Renderer for ConfluenceRenderer {
    fn paragraph(&self, text: &str) -> String {
        format!("{text}\n\n")
    }

    fn raw(&self, raw: &str) -> String {
        raw.to_string()
    }

    fn heading(&self, text: &str, level: u8) -> String {
        format!("h{level}. {text}\n\n")
    }

    fn strong(&self, text: &str) -> String {
        format!("*{text}*")
    }

    fn emphasis(&self, text: &str) -> String {
        format!("_{text}_")
    }

    fn strikeout(&self, text: &str) -> String {
        format!("-{text}-")
    }

    fn code_span(&self, code: &str) -> String {
        format!("{{{{{code}}}}}")
    }

    fn blockquote(&self, quote: &str) -> String {
        format!("{{quote}}{quote}{{quote}}")
    }

    fn line_break(&self) -> String {
        "\n".to_string()
    }

    fn horizontal_rule(&self) -> String {
        "----".to_string()
    }

    fn link(&self, href: &str, _title: Option<&str>, text: Option<&str>) -> String {
        match text {
            Some(text) if !text.is_empty() => format!("[{text}|{href}]"),
            _ => format!("[{href}]"),
        }
    }

    fn image(&self, href: &str, _title: Option<&str>, _alt: Option<&str>) -> String {
        format!("!{href}!")
    }

    fn list(&self, body: &str, ordered: bool) -> String {
        let marker = if ordered { '#' } else { '*' };
        let lines: Vec<String> = body
            .trim()
            .split('\n')
            .filter(|line| !line.is_empty())
            .map(|line| prefix_list_line(marker, line))
            .collect();
        format!("{}\n\n", lines.join("\n"))
    }

    fn list_item(&self, body: &str) -> String {
        format!("{body}\n")
    }

    fn table(&self, header: &str, body: &str) -> String {
        format!("{header}{body}\n")
    }

    fn table_row(&self, content: &str) -> String {
        format!("{content}\n")
    }

    fn table_cell(&self, content: &str, flags: CellFlags) -> String {
        let delimiter = if flags.header { "||" } else { "|" };
        format!("{delimiter}{content}")
    }

    fn code_block(&self, code: &str, lang: Option<&str>) -> String {
        let mut params = vec![
            ("language", resolve_language(lang)),
            ("theme", "Confluence"),
        ];
        if self.options.linenumbers {
            params.push(("linenumbers", "true"));
        }
        if code.split('\n').count() > MAX_CODE_LINES {
            params.push(("collapse", "true"));
        }

        let params: Vec<String> = params
            .iter()
            .map(|(key, value)| format!("{key}={value}"))
            .collect();
        format!("{{code:{}}}\n{code}\n{{code}}\n\n", params.join("|"))
    }
}

/// Prefix one rendered item line with a list marker.
///
/// A line that already starts with a marker run followed by a space comes
/// from a nested list, so the new marker joins that run: `* b` under `*`
/// becomes `** b`, `# b` under `*` becomes `*# b`.
fn prefix_list_line(marker: char, line: &str) -> String {
    let run = line
        .find(|c: char| c != '#' && c != '*')
        .unwrap_or(line.len());
    if run > 0 && line[run..].starts_with(' ') {
        format!("{marker}{line}")
    } else {
        format!("{marker} {line}")
    }
}
