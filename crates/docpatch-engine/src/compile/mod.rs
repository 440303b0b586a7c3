//! Edit batch compilation: ordered [`Block`]s → ordered [`EditOp`]s.
//!
//! The compiler walks the block sequence once, threading a [`Cursor`]
//! forward by exactly the character length of every inserted string. Styling
//! operations are emitted immediately after the insertion they style and
//! never reference an offset beyond the cursor at time of emission.

pub mod inline;
pub mod ops;
pub mod wire;

use serde::Serialize;
use thiserror::Error;

use crate::blocks::Block;
use ops::{HeadingLevel, Range, TextStyle};

pub use ops::EditOp;

/// Paragraph break inserted before appending to a non-empty document.
pub const PARAGRAPH_SEPARATOR: &str = "\n\n";

/// Prefix rendered in front of every list item.
const BULLET_PREFIX: &str = "\u{2022} ";

/// The next valid insertion offset in the target document's character
/// stream.
///
/// Offsets count Unicode scalar values, matching the remote API's index
/// space, not bytes. A cursor only ever moves forward; it advances by the
/// character length of each inserted string, in emission order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Cursor(usize);

impl Cursor {
    /// The remote API's minimum addressable index.
    pub const DOCUMENT_START: Cursor = Cursor(1);

    pub fn at(offset: usize) -> Self {
        Self(offset)
    }

    pub fn offset(self) -> usize {
        self.0
    }

    #[must_use]
    pub fn advance(self, chars: usize) -> Self {
        Self(self.0 + chars)
    }
}

/// The complete ordered operation sequence of one compilation pass, plus the
/// final cursor (the insertion point for any later append).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EditBatch {
    pub ops: Vec<EditOp>,
    pub cursor: Cursor,
}

impl EditBatch {
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }
}

/// Compilation failures for one document's block sequence. No partial batch
/// is returned on error.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CompileError {
    /// A block carried data the compiler cannot express as edit operations.
    #[error("invalid block: {0}")]
    InvalidBlock(String),
}

/// Compiles a block sequence into an [`EditBatch`] starting at `start`.
///
/// When `target_non_empty` is set, a paragraph separator is inserted before
/// any block so the appended content doesn't run into existing text. An
/// empty block sequence compiles to an empty batch.
pub fn compile(
    blocks: &[Block],
    start: Cursor,
    target_non_empty: bool,
) -> Result<EditBatch, CompileError> {
    let mut batch = BatchBuilder::new(start);

    if target_non_empty && !blocks.is_empty() {
        batch.insert(PARAGRAPH_SEPARATOR);
    }

    for (i, block) in blocks.iter().enumerate() {
        let followed = i + 1 < blocks.len();
        match block {
            Block::Heading { level, text } => heading(&mut batch, *level, text, followed)?,
            Block::Paragraph { text } => paragraph(&mut batch, text),
            Block::List { items } => list(&mut batch, items),
            Block::BoldNote { text } => bold_note(&mut batch, text),
            Block::CodeBlock { code, language: _ } => code_block(&mut batch, code),
        }
    }

    let batch = batch.finish();
    log::debug!(
        "compiled {} block(s) into {} operation(s), cursor {} -> {}",
        blocks.len(),
        batch.ops.len(),
        start.offset(),
        batch.cursor.offset()
    );
    Ok(batch)
}

/// Accumulates operations while threading the cursor forward.
///
/// Follows the builder shape of the block parser: `new` / push / `finish`,
/// with all offset bookkeeping kept in one place.
struct BatchBuilder {
    ops: Vec<EditOp>,
    cursor: Cursor,
}

impl BatchBuilder {
    fn new(cursor: Cursor) -> Self {
        Self {
            ops: Vec::new(),
            cursor,
        }
    }

    /// Emits an insertion at the cursor and advances it, returning the
    /// absolute range the text now occupies.
    fn insert(&mut self, text: &str) -> Range {
        let start = self.cursor.offset();
        self.ops.push(EditOp::InsertText {
            index: start,
            text: text.to_string(),
        });
        self.cursor = self.cursor.advance(text.chars().count());
        Range::new(start, self.cursor.offset())
    }

    /// Emits a styling operation over already-inserted text.
    ///
    /// A range at or beyond the cursor would reference text this batch has
    /// not inserted yet; that is a compiler defect, not caller error.
    fn style(&mut self, op: EditOp) {
        if let Some(range) = op.style_range() {
            debug_assert!(!range.is_empty(), "degenerate style range {range:?}");
            debug_assert!(
                range.end <= self.cursor.offset(),
                "style range {range:?} beyond cursor {}",
                self.cursor.offset()
            );
        }
        self.ops.push(op);
    }

    fn finish(self) -> EditBatch {
        EditBatch {
            ops: self.ops,
            cursor: self.cursor,
        }
    }
}

fn heading(
    batch: &mut BatchBuilder,
    level: u8,
    text: &str,
    followed: bool,
) -> Result<(), CompileError> {
    let level = HeadingLevel::new(level).ok_or_else(|| {
        CompileError::InvalidBlock(format!("heading level {level} is outside 1..=6"))
    })?;

    let range = batch.insert(&format!("{text}\n"));
    batch.style(EditOp::SetParagraphStyle { range, level });

    // Spacer line between a heading and whatever follows it. Terminal
    // headings get none.
    if followed {
        batch.insert("\n");
    }
    Ok(())
}

fn paragraph(batch: &mut BatchBuilder, text: &str) {
    let (stripped, spans) = inline::strip_bold_markers(text);
    let range = batch.insert(&format!("{stripped}\n"));

    for span in spans {
        batch.style(EditOp::SetTextStyle {
            range: Range::new(range.start + span.start, range.start + span.end),
            style: TextStyle::BOLD,
        });
    }
}

fn list(batch: &mut BatchBuilder, items: &[String]) {
    for item in items {
        let range = batch.insert(&format!("{BULLET_PREFIX}{item}\n"));
        batch.style(EditOp::SetBullets { range });
    }
    // Trailing spacer, emitted even when the list has no items.
    batch.insert("\n");
}

fn bold_note(batch: &mut BatchBuilder, text: &str) {
    let range = batch.insert(&format!("\n{text}\n"));
    batch.style(EditOp::SetTextStyle {
        range,
        style: TextStyle::BOLD,
    });
}

fn code_block(batch: &mut BatchBuilder, code: &str) {
    let range = batch.insert(&format!("{}\n", code.trim()));
    batch.style(EditOp::SetTextStyle {
        range,
        style: TextStyle::CODE,
    });
}
