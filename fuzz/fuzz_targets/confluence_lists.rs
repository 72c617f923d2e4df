#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use wikiscribe::confluence::{ConfluenceRenderer, Renderer};

#[derive(Debug, Arbitrary)]
struct Input {
    body: String,
    ordered: bool,
}

fuzz_target!(|input: Input| {
    let out = ConfluenceRenderer::default().list(&input.body, input.ordered);
    let marker = if input.ordered { '#' } else { '*' };

    assert!(out.ends_with("\n\n"));
    for line in out.trim_end_matches('\n').split('\n').filter(|l| !l.is_empty()) {
        assert!(line.starts_with(marker), "unprefixed line {line:?}");
    }
});
