//! Block extraction: Markdown source → ordered sequence of typed [`Block`]s.
//!
//! The extractor consumes the event stream of an external CommonMark parser
//! (`pulldown-cmark`); it never tokenizes Markdown itself. Constructs outside
//! the block vocabulary below are silently dropped, though content nested
//! inside them (e.g. a paragraph in a block quote) is still visited.

mod extract;

pub use extract::extract_blocks;

use serde::{Deserialize, Serialize};

/// One semantic unit of document content, in reading order.
///
/// Blocks are immutable once produced. The extractor emits every variant
/// except [`Block::BoldNote`], which callers construct directly when
/// appending a standalone emphasized note to a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    /// A heading with its nesting level (1..=6 expected; validated at
    /// compile time, not here).
    Heading { level: u8, text: String },
    /// A paragraph. `text` may still carry literal `**` bold markers;
    /// the compiler strips them and styles the delimited spans.
    Paragraph { text: String },
    /// An unordered list, flattened to the plain text of its top-level items.
    List { items: Vec<String> },
    /// A standalone note rendered bold in its entirety.
    BoldNote { text: String },
    /// A fenced or indented code block. `language` is the first token of the
    /// fence info string, or empty when absent.
    CodeBlock { code: String, language: String },
}
