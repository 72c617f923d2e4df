//! Whole-document conversion tests: markdown in, Confluence markup out.

use wikiscribe::{ConfluenceOptions, convert};

fn confluence(input: &str) -> String {
    convert(input, &ConfluenceOptions::default()).unwrap().value
}

fn code_lines(n: usize) -> String {
    (1..=n).map(|i| format!("echo {i}\n")).collect()
}

mod blocks {
    use super::*;

    #[test]
    fn test_heading_levels() {
        for level in 1..=6 {
            let input = format!("{} Title", "#".repeat(level));
            assert_eq!(confluence(&input), format!("h{level}. Title\n\n"));
        }
    }

    #[test]
    fn test_heading_then_paragraph() {
        assert_eq!(confluence("# Title\n\nPara"), "h1. Title\n\nPara\n\n");
    }

    #[test]
    fn test_blockquote() {
        assert_eq!(confluence("> quote\n"), "{quote}quote\n\n{quote}");
    }

    #[test]
    fn test_horizontal_rule_has_no_newline() {
        assert_eq!(confluence("a\n\n---\n\nb"), "a\n\n----b\n\n");
    }

    #[test]
    fn test_raw_html_passes_through() {
        assert_eq!(confluence("<div>x</div>\n"), "<div>x</div>\n");
    }

    #[test]
    fn test_line_breaks() {
        assert_eq!(confluence("a  \nb"), "a\nb\n\n");
        assert_eq!(confluence("a\nb"), "a\nb\n\n");
    }
}

mod inline {
    use super::*;

    #[test]
    fn test_emphasis_family() {
        assert_eq!(
            confluence("**b** *i* ~~s~~ `c`"),
            "*b* _i_ -s- {{c}}\n\n"
        );
    }

    #[test]
    fn test_links() {
        assert_eq!(confluence("[Go](http://x)"), "[Go|http://x]\n\n");
        assert_eq!(confluence("[Go](http://x \"title\")"), "[Go|http://x]\n\n");
        assert_eq!(confluence("[](http://x)"), "[http://x]\n\n");
        assert_eq!(confluence("<http://x>"), "[http://x|http://x]\n\n");
    }

    #[test]
    fn test_image_drops_alt_and_title() {
        assert_eq!(
            confluence("![alt text](http://i.png \"t\")"),
            "!http://i.png!\n\n"
        );
    }

    #[test]
    fn test_entities_are_decoded() {
        assert_eq!(confluence("Tom &amp; Jerry"), "Tom & Jerry\n\n");
    }
}

mod lists {
    use super::*;

    #[test]
    fn test_ordered() {
        assert_eq!(confluence("1. a\n2. b\n"), "# a\n# b\n\n");
    }

    #[test]
    fn test_unordered() {
        assert_eq!(confluence("- a\n- b\n"), "* a\n* b\n\n");
    }

    #[test]
    fn test_loose_items() {
        assert_eq!(confluence("- a\n\n- b\n"), "* a\n* b\n\n");
    }

    #[test]
    fn test_nested_two_levels() {
        assert_eq!(confluence("- a\n  - b\n- c\n"), "* a\n** b\n* c\n\n");
    }

    #[test]
    fn test_nested_three_levels() {
        assert_eq!(
            confluence("- a\n  - b\n    - c\n"),
            "* a\n** b\n*** c\n\n"
        );
    }

    #[test]
    fn test_mixed_markers() {
        assert_eq!(confluence("1. a\n   - b\n"), "# a\n#* b\n\n");
    }
}

mod tables {
    use super::*;

    #[test]
    fn test_header_and_body() {
        assert_eq!(
            confluence("| a | b |\n|---|---|\n| 1 | 2 |\n| 3 | 4 |\n"),
            "||a||b\n|1|2\n|3|4\n\n"
        );
    }

    #[test]
    fn test_inline_markup_in_cells() {
        assert_eq!(
            confluence("| name |\n|---|\n| **bold** |\n"),
            "||name\n|*bold*\n\n"
        );
    }
}

mod code {
    use super::*;

    #[test]
    fn test_short_js_block() {
        assert_eq!(
            confluence("```js\nconsole.log(1)\n```\n"),
            "{code:language=javascript|theme=Confluence}\nconsole.log(1)\n{code}\n\n"
        );
    }

    #[test]
    fn test_long_shell_block_collapses() {
        let input = format!("```shell\n{}```\n", code_lines(25));
        let out = confluence(&input);
        assert!(out.starts_with("{code:language=bash|theme=Confluence|collapse=true}\necho 1\n"));
        assert!(out.ends_with("echo 25\n{code}\n\n"));
    }

    #[test]
    fn test_twenty_lines_do_not_collapse() {
        let input = format!("```\n{}```\n", code_lines(20));
        assert!(confluence(&input).starts_with("{code:language=none|theme=Confluence}\n"));
    }

    #[test]
    fn test_unknown_language() {
        assert!(confluence("```cobol\nDISPLAY 'HI'.\n```\n").starts_with("{code:language=none|"));
    }

    #[test]
    fn test_info_string_extra_words() {
        assert!(confluence("```Python title=x\npass\n```\n").starts_with("{code:language=python|"));
    }

    #[test]
    fn test_indented_block() {
        assert_eq!(
            confluence("    let x = 1;\n"),
            "{code:language=none|theme=Confluence}\nlet x = 1;\n{code}\n\n"
        );
    }

    #[test]
    fn test_linenumbers_option() {
        let options = ConfluenceOptions { linenumbers: true };
        let input = format!("```sql\n{}```\n", code_lines(21));
        let out = convert(&input, &options).unwrap().value;
        assert!(out.starts_with(
            "{code:language=sql|theme=Confluence|linenumbers=true|collapse=true}\n"
        ));
    }
}

#[test]
fn test_full_document() {
    let input = "\
# Release notes

Version **2.0** ships with [docs](http://docs).

## Changes

- faster
- smaller
  1. disk
  2. memory

| Area | Status |
|------|--------|
| api  | done   |

```bash
make install
```
";
    let expected = "\
h1. Release notes

Version *2.0* ships with [docs|http://docs].

h2. Changes

* faster
* smaller
*# disk
*# memory

||Area||Status
|api|done

{code:language=bash|theme=Confluence}
make install
{code}

";
    assert_eq!(confluence(input), expected);
}

#[test]
fn test_rendering_is_deterministic() {
    let input = "# T\n\n- a\n  - b\n\n```js\nx\n```\n\n| h |\n|---|\n| c |\n";
    assert_eq!(confluence(input), confluence(input));
}
