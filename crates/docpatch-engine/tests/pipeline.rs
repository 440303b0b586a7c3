//! End-to-end checks: Markdown source through extraction and compilation,
//! replayed against an in-memory character buffer that mimics the remote
//! document's index space (first addressable offset is 1).

use docpatch_engine::compile::wire::batch_update_requests;
use docpatch_engine::{Block, Cursor, EditBatch, EditOp, Range, compile, extract_blocks};
use pretty_assertions::assert_eq;

/// Replays a batch's insertions into a character buffer. Offset 1 maps to
/// the buffer's start, matching the remote API's indexing.
fn replay(doc: &mut Vec<char>, batch: &EditBatch) {
    for op in &batch.ops {
        if let EditOp::InsertText { index, text } = op {
            let at = index - 1;
            assert!(at <= doc.len(), "insertion at {index} beyond document end");
            doc.splice(at..at, text.chars());
        }
    }
}

fn slice(doc: &[char], range: Range) -> String {
    doc[range.start - 1..range.end - 1].iter().collect()
}

fn styled_ranges(batch: &EditBatch) -> Vec<Range> {
    batch.ops.iter().filter_map(EditOp::style_range).collect()
}

#[test]
fn summary_document_compiles_and_replays_consistently() {
    let md = "\
# AI Report

This is a summary of the latest **AI advancements** in brief.

- Improved language understanding
- Generative models
- Enterprise adoption

```python
print(\"hello\")
```";

    let blocks = extract_blocks(md);
    assert_eq!(blocks.len(), 4);

    let batch = compile(&blocks, Cursor::DOCUMENT_START, false).unwrap();

    let mut doc = Vec::new();
    replay(&mut doc, &batch);

    // Final cursor equals the document length after applying every insert.
    assert_eq!(doc.len() + 1, batch.cursor.offset());

    let text: String = doc.iter().collect();
    assert_eq!(
        text,
        "AI Report\n\
         \n\
         This is a summary of the latest AI advancements in brief.\n\
         \u{2022} Improved language understanding\n\
         \u{2022} Generative models\n\
         \u{2022} Enterprise adoption\n\
         \n\
         print(\"hello\")\n"
    );

    // Each styled range slices to the content it claims to style.
    let ranges = styled_ranges(&batch);
    assert_eq!(slice(&doc, ranges[0]), "AI Report\n"); // heading
    assert_eq!(slice(&doc, ranges[1]), "AI advancements"); // bold span
    assert_eq!(
        slice(&doc, ranges[2]),
        "\u{2022} Improved language understanding\n"
    );
    assert_eq!(slice(&doc, ranges[5]), "print(\"hello\")\n"); // code
}

#[test]
fn bold_ranges_bracket_stripped_text_not_original() {
    let blocks = extract_blocks("Both **first** and **second** matter.");
    let batch = compile(&blocks, Cursor::DOCUMENT_START, false).unwrap();

    let mut doc = Vec::new();
    replay(&mut doc, &batch);

    let ranges = styled_ranges(&batch);
    assert_eq!(slice(&doc, ranges[0]), "first");
    assert_eq!(slice(&doc, ranges[1]), "second");
}

#[test]
fn appending_a_second_batch_continues_from_the_returned_cursor() {
    let first = compile(
        &extract_blocks("# Day One\n\nNotes."),
        Cursor::DOCUMENT_START,
        false,
    )
    .unwrap();

    let mut appended = extract_blocks("## Day Two\n\nMore notes.");
    appended.push(Block::BoldNote {
        text: "Voice note attached.".to_string(),
    });
    let second = compile(&appended, first.cursor, true).unwrap();

    // Separator first, at exactly the previous batch's final cursor.
    assert_eq!(
        second.ops[0],
        EditOp::InsertText {
            index: first.cursor.offset(),
            text: "\n\n".to_string()
        }
    );

    let mut doc = Vec::new();
    replay(&mut doc, &first);
    replay(&mut doc, &second);
    assert_eq!(doc.len() + 1, second.cursor.offset());

    let text: String = doc.iter().collect();
    assert!(text.ends_with("\nVoice note attached.\n"));
}

#[test]
fn wire_requests_preserve_operation_order_and_count() {
    let batch = compile(
        &extract_blocks("# T\n\n- a\n- b"),
        Cursor::DOCUMENT_START,
        false,
    )
    .unwrap();

    let requests = batch_update_requests(&batch);
    assert_eq!(requests.len(), batch.ops.len());
    assert!(requests[0].get("insertText").is_some());
    assert!(requests[1].get("updateParagraphStyle").is_some());
}

#[test]
fn recompiling_identical_input_is_byte_identical() {
    let md = "# Same\n\nWith **bold** text.\n\n- x\n";
    let a = compile(&extract_blocks(md), Cursor::at(42), true).unwrap();
    let b = compile(&extract_blocks(md), Cursor::at(42), true).unwrap();

    assert_eq!(
        serde_json::to_string(&a).unwrap(),
        serde_json::to_string(&b).unwrap()
    );
}
