//! Code macro language table.
//!
//! Confluence's `{code}` macro only highlights a fixed set of languages;
//! everything else is rendered with `language=none`.

/// Language used when the source tag is absent or unknown.
pub const NO_HIGHLIGHT: &str = "none";

/// Source tags that map to a different macro language. Checked before
/// [`LANGUAGES`].
const ALIASES: &[(&str, &str)] = &[
    ("shell", "bash"),
    ("html", "html"),
    ("xml", "xml"),
    ("js", "javascript"),
];

/// Languages the macro accepts verbatim.
const LANGUAGES: &[&str] = &[
    "actionscript3",
    "bash",
    "csharp",
    "coldfusion",
    "cpp",
    "css",
    "delphi",
    "diff",
    "erlang",
    "groovy",
    "java",
    "javafx",
    "javascript",
    "perl",
    "php",
    "none",
    "powershell",
    "python",
    "ruby",
    "scala",
    "sql",
    "vb",
    "html/xml",
];

/// Resolve a code block's language tag to a `{code}` macro language.
///
/// Matching is case-insensitive. Unknown or missing tags resolve to
/// [`NO_HIGHLIGHT`].
pub fn resolve_language(tag: Option<&str>) -> &'static str {
    let Some(tag) = tag.filter(|t| !t.is_empty()) else {
        return NO_HIGHLIGHT;
    };
    let tag = tag.to_lowercase();

    if let Some(&(_, lang)) = ALIASES.iter().find(|(alias, _)| *alias == tag) {
        return lang;
    }
    match LANGUAGES.iter().find(|lang| **lang == tag) {
        Some(lang) => *lang,
        None => {
            tracing::debug!(tag = %tag, "no code macro language for tag, using none");
            NO_HIGHLIGHT
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aliases() {
        assert_eq!(resolve_language(Some("shell")), "bash");
        assert_eq!(resolve_language(Some("js")), "javascript");
        assert_eq!(resolve_language(Some("html")), "html");
        assert_eq!(resolve_language(Some("xml")), "xml");
    }

    #[test]
    fn test_identity() {
        for lang in LANGUAGES {
            assert_eq!(resolve_language(Some(*lang)), *lang);
        }
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(resolve_language(Some("Python")), "python");
        assert_eq!(resolve_language(Some("JS")), "javascript");
        assert_eq!(resolve_language(Some("SHELL")), "bash");
    }

    #[test]
    fn test_unknown_and_missing() {
        assert_eq!(resolve_language(Some("cobol")), NO_HIGHLIGHT);
        assert_eq!(resolve_language(Some("rust")), NO_HIGHLIGHT);
        assert_eq!(resolve_language(Some("")), NO_HIGHLIGHT);
        assert_eq!(resolve_language(None), NO_HIGHLIGHT);
    }
}
