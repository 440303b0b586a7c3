use pulldown_cmark::{CodeBlockKind, Event, Parser, Tag, TagEnd};

use super::Block;
use crate::compile::inline::BOLD_MARKER;

/// Converts Markdown source into the ordered [`Block`] sequence.
///
/// Pure transformation: no side effects, no failure modes. Unsupported
/// constructs (tables, images, ordered lists, ...) produce no block.
pub fn extract_blocks(source: &str) -> Vec<Block> {
    let mut events = Parser::new(source);
    let mut blocks = Vec::new();

    while let Some(event) = events.next() {
        match event {
            Event::Start(Tag::Heading { level, .. }) => {
                let text = plain_text_until(&mut events, TagEnd::Heading(level));
                blocks.push(Block::Heading {
                    level: level as u8,
                    text: text.trim().to_string(),
                });
            }
            Event::Start(Tag::Paragraph) => {
                blocks.push(Block::Paragraph {
                    text: paragraph_text(&mut events),
                });
            }
            Event::Start(Tag::List(None)) => {
                blocks.push(Block::List {
                    items: list_items(&mut events),
                });
            }
            // Ordered lists are outside the vocabulary; skip the whole subtree
            // so their paragraphs don't leak out as standalone blocks.
            Event::Start(Tag::List(Some(_))) => skip_list(&mut events),
            Event::Start(Tag::CodeBlock(kind)) => {
                let language = fence_language(&kind);
                let code = plain_text_until(&mut events, TagEnd::CodeBlock);
                blocks.push(Block::CodeBlock {
                    code: code.trim().to_string(),
                    language,
                });
            }
            _ => {}
        }
    }

    log::debug!("extracted {} block(s)", blocks.len());
    blocks
}

/// Concatenates the plain text of every event up to (and consuming) `until`.
///
/// Inline markup contributes its inner text only; line breaks normalize to a
/// single space.
fn plain_text_until<'a>(events: &mut impl Iterator<Item = Event<'a>>, until: TagEnd) -> String {
    let mut text = String::new();
    for event in events {
        match event {
            Event::End(end) if end == until => break,
            Event::Text(t) | Event::Code(t) => text.push_str(&t),
            Event::SoftBreak | Event::HardBreak => text.push(' '),
            _ => {}
        }
    }
    text
}

/// Collects a paragraph's text, re-emitting literal `**` markers around
/// strong spans so the compiler can detect and style them later. All other
/// inline constructs (emphasis, links, code spans) keep their plain text.
fn paragraph_text<'a>(events: &mut impl Iterator<Item = Event<'a>>) -> String {
    let mut text = String::new();
    for event in events {
        match event {
            Event::End(TagEnd::Paragraph) => break,
            Event::Start(Tag::Strong) | Event::End(TagEnd::Strong) => text.push_str(BOLD_MARKER),
            Event::Text(t) | Event::Code(t) => text.push_str(&t),
            Event::SoftBreak | Event::HardBreak => text.push(' '),
            _ => {}
        }
    }
    text.trim().to_string()
}

/// Collects the items of an unordered list, consuming through its end tag.
///
/// Nested lists are flattened: their text is appended to the enclosing
/// top-level item, space-joined. Nested structure is deliberately not
/// preserved.
fn list_items<'a>(events: &mut impl Iterator<Item = Event<'a>>) -> Vec<String> {
    let mut items = Vec::new();
    let mut item = String::new();
    let mut depth = 0usize;

    for event in events {
        match event {
            Event::Start(Tag::List(_)) => depth += 1,
            Event::End(TagEnd::List(_)) => {
                if depth == 0 {
                    break;
                }
                depth -= 1;
            }
            Event::Start(Tag::Item) if depth > 0 => {
                if !item.is_empty() && !item.ends_with(' ') {
                    item.push(' ');
                }
            }
            Event::End(TagEnd::Item) if depth == 0 => {
                items.push(item.trim().to_string());
                item.clear();
            }
            Event::Text(t) | Event::Code(t) => item.push_str(&t),
            Event::SoftBreak | Event::HardBreak => item.push(' '),
            _ => {}
        }
    }

    items
}

/// Consumes an entire (ignored) list subtree, matching nested start/end tags.
fn skip_list<'a>(events: &mut impl Iterator<Item = Event<'a>>) {
    let mut depth = 0usize;
    for event in events {
        match event {
            Event::Start(Tag::List(_)) => depth += 1,
            Event::End(TagEnd::List(_)) => {
                if depth == 0 {
                    break;
                }
                depth -= 1;
            }
            _ => {}
        }
    }
}

fn fence_language(kind: &CodeBlockKind<'_>) -> String {
    match kind {
        CodeBlockKind::Fenced(info) => info
            .split_whitespace()
            .next()
            .unwrap_or_default()
            .to_string(),
        CodeBlockKind::Indented => String::new(),
    }
}
