//! Inline bold-span detection inside paragraph text.

use regex::Regex;
use std::sync::LazyLock;

/// Two-character token delimiting an inline bold span on each side.
pub const BOLD_MARKER: &str = "**";

// Non-greedy pairing: the first closing marker ends the span.
static BOLD_SPAN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*(.*?)\*\*").expect("bold span pattern is valid"));

/// Where a bold span's content landed in marker-stripped text.
///
/// `start` and `end` are character offsets into the stripped string, so each
/// four-character marker removal compounds into the offsets of every later
/// span. (Computing against the original text is only self-consistent for a
/// single span per paragraph.)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoldSpan {
    pub start: usize,
    pub end: usize,
}

/// Strips `**` marker pairs from `text` and reports where their contents
/// landed in the stripped result.
///
/// Scanning is left-to-right and non-overlapping. Unpaired markers are left
/// untouched. An empty span (`****`) loses its markers but reports nothing;
/// a zero-width styling range would be degenerate.
pub fn strip_bold_markers(text: &str) -> (String, Vec<BoldSpan>) {
    let mut stripped = String::with_capacity(text.len());
    let mut spans = Vec::new();
    let mut chars = 0;
    let mut tail = 0;

    for caps in BOLD_SPAN.captures_iter(text) {
        let whole = caps.get(0).expect("match always has a whole capture");
        let inner = caps.get(1).expect("pattern has one capture group");

        let before = &text[tail..whole.start()];
        stripped.push_str(before);
        chars += before.chars().count();

        let start = chars;
        stripped.push_str(inner.as_str());
        chars += inner.as_str().chars().count();

        if chars > start {
            spans.push(BoldSpan { start, end: chars });
        }
        tail = whole.end();
    }

    stripped.push_str(&text[tail..]);
    (stripped, spans)
}
