//! JSON request shapes for the remote batch-update API.
//!
//! Transport, authentication, chunking, and retry stay with the external
//! caller; this module only serializes an [`EditBatch`] into the request
//! objects the API expects, preserving operation order.

use serde_json::{Map, Value, json};

use super::EditBatch;
use super::ops::{EditOp, Range, TextStyle};

const BULLET_PRESET: &str = "BULLET_DISC_CIRCLE_SQUARE";
const MONOSPACE_FONT: &str = "Courier New";

/// Serializes every operation of `batch` into a remote API request object,
/// in application order.
pub fn batch_update_requests(batch: &EditBatch) -> Vec<Value> {
    batch.ops.iter().map(request_for).collect()
}

fn request_for(op: &EditOp) -> Value {
    match op {
        EditOp::InsertText { index, text } => json!({
            "insertText": {
                "location": { "index": index },
                "text": text,
            }
        }),
        EditOp::SetParagraphStyle { range, level } => json!({
            "updateParagraphStyle": {
                "range": range_json(*range),
                "paragraphStyle": {
                    "namedStyleType": format!("HEADING_{}", level.get()),
                },
                "fields": "namedStyleType",
            }
        }),
        EditOp::SetTextStyle { range, style } => {
            let (text_style, fields) = text_style_json(style);
            json!({
                "updateTextStyle": {
                    "range": range_json(*range),
                    "textStyle": text_style,
                    "fields": fields,
                }
            })
        }
        EditOp::SetBullets { range } => json!({
            "createParagraphBullets": {
                "range": range_json(*range),
                "bulletPreset": BULLET_PRESET,
            }
        }),
    }
}

fn range_json(range: Range) -> Value {
    json!({ "startIndex": range.start, "endIndex": range.end })
}

/// Builds the `textStyle` body plus the comma-joined `fields` mask naming
/// exactly the styles set.
fn text_style_json(style: &TextStyle) -> (Value, String) {
    let mut body = Map::new();
    let mut fields = Vec::new();

    if style.bold {
        body.insert("bold".to_string(), json!(true));
        fields.push("bold");
    }
    if style.monospace {
        body.insert(
            "weightedFontFamily".to_string(),
            json!({ "fontFamily": MONOSPACE_FONT }),
        );
        fields.push("weightedFontFamily");
    }
    if let Some(shade) = style.background {
        body.insert(
            "backgroundColor".to_string(),
            json!({
                "color": {
                    "rgbColor": {
                        "red": shade.red,
                        "green": shade.green,
                        "blue": shade.blue,
                    }
                }
            }),
        );
        fields.push("backgroundColor");
    }

    (Value::Object(body), fields.join(","))
}

/// Clamp used by the external "current document length" query: one before
/// the last end index, never below the API's minimum addressable offset 1.
/// Documents with no addressable content (`None`) yield 1.
pub fn safe_insertion_index(last_end_index: Option<usize>) -> usize {
    match last_end_index {
        Some(end) => end.saturating_sub(1).max(1),
        None => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compile::Cursor;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn batch_of(ops: Vec<EditOp>) -> EditBatch {
        let cursor = Cursor::at(100); // irrelevant to serialization
        EditBatch { ops, cursor }
    }

    #[test]
    fn insert_text_request_shape() {
        let batch = batch_of(vec![EditOp::InsertText {
            index: 1,
            text: "Title\n".to_string(),
        }]);

        assert_eq!(
            batch_update_requests(&batch),
            vec![json!({
                "insertText": {
                    "location": { "index": 1 },
                    "text": "Title\n",
                }
            })]
        );
    }

    #[test]
    fn paragraph_style_request_names_heading_style() {
        use crate::compile::ops::HeadingLevel;

        let batch = batch_of(vec![EditOp::SetParagraphStyle {
            range: Range::new(1, 7),
            level: HeadingLevel::new(2).unwrap(),
        }]);

        assert_eq!(
            batch_update_requests(&batch),
            vec![json!({
                "updateParagraphStyle": {
                    "range": { "startIndex": 1, "endIndex": 7 },
                    "paragraphStyle": { "namedStyleType": "HEADING_2" },
                    "fields": "namedStyleType",
                }
            })]
        );
    }

    #[test]
    fn bold_style_request_masks_only_bold() {
        let batch = batch_of(vec![EditOp::SetTextStyle {
            range: Range::new(3, 4),
            style: TextStyle::BOLD,
        }]);

        assert_eq!(
            batch_update_requests(&batch),
            vec![json!({
                "updateTextStyle": {
                    "range": { "startIndex": 3, "endIndex": 4 },
                    "textStyle": { "bold": true },
                    "fields": "bold",
                }
            })]
        );
    }

    #[test]
    fn code_style_request_carries_font_and_shade() {
        let batch = batch_of(vec![EditOp::SetTextStyle {
            range: Range::new(1, 12),
            style: TextStyle::CODE,
        }]);

        assert_eq!(
            batch_update_requests(&batch),
            vec![json!({
                "updateTextStyle": {
                    "range": { "startIndex": 1, "endIndex": 12 },
                    "textStyle": {
                        "weightedFontFamily": { "fontFamily": "Courier New" },
                        "backgroundColor": {
                            "color": {
                                "rgbColor": { "red": 0.95, "green": 0.95, "blue": 0.95 }
                            }
                        },
                    },
                    "fields": "weightedFontFamily,backgroundColor",
                }
            })]
        );
    }

    #[test]
    fn bullet_request_uses_disc_preset() {
        let batch = batch_of(vec![EditOp::SetBullets {
            range: Range::new(1, 5),
        }]);

        assert_eq!(
            batch_update_requests(&batch),
            vec![json!({
                "createParagraphBullets": {
                    "range": { "startIndex": 1, "endIndex": 5 },
                    "bulletPreset": "BULLET_DISC_CIRCLE_SQUARE",
                }
            })]
        );
    }

    #[rstest]
    #[case(None, 1)] // no addressable content
    #[case(Some(0), 1)]
    #[case(Some(1), 1)]
    #[case(Some(2), 1)]
    #[case(Some(120), 119)]
    fn safe_insertion_index_clamps(#[case] end: Option<usize>, #[case] expected: usize) {
        assert_eq!(safe_insertion_index(end), expected);
    }
}
