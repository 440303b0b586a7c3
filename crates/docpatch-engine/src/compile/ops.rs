use serde::Serialize;

/// Half-open `[start, end)` range of absolute document offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Range {
    pub start: usize,
    pub end: usize,
}

impl Range {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(self) -> bool {
        self.end <= self.start
    }
}

/// Named heading style level, validated to 1..=6.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct HeadingLevel(u8);

impl HeadingLevel {
    /// Returns `None` for levels outside the remote API's named styles.
    pub fn new(level: u8) -> Option<Self> {
        (1..=6).contains(&level).then_some(Self(level))
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

/// RGB color in the remote API's 0.0..=1.0 channel space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rgb {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
}

/// Light-gray shade behind code block text.
pub const CODE_BACKGROUND: Rgb = Rgb {
    red: 0.95,
    green: 0.95,
    blue: 0.95,
};

/// Character style payload of [`EditOp::SetTextStyle`].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct TextStyle {
    pub bold: bool,
    pub monospace: bool,
    pub background: Option<Rgb>,
}

impl TextStyle {
    /// Bold-only style for emphasized spans and standalone notes.
    pub const BOLD: TextStyle = TextStyle {
        bold: true,
        monospace: false,
        background: None,
    };

    /// Monospace-on-light-gray style for code blocks.
    pub const CODE: TextStyle = TextStyle {
        bold: false,
        monospace: true,
        background: Some(CODE_BACKGROUND),
    };
}

/// One atomic edit instruction addressed by absolute document offsets.
///
/// Styling operations always refer to text covered by a preceding
/// [`EditOp::InsertText`] in the same batch, with offsets valid for the
/// document state after that insertion is applied.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum EditOp {
    InsertText { index: usize, text: String },
    SetParagraphStyle { range: Range, level: HeadingLevel },
    SetTextStyle { range: Range, style: TextStyle },
    SetBullets { range: Range },
}

impl EditOp {
    /// The styled range, for operations that restyle already-inserted text.
    pub fn style_range(&self) -> Option<Range> {
        match self {
            EditOp::InsertText { .. } => None,
            EditOp::SetParagraphStyle { range, .. }
            | EditOp::SetTextStyle { range, .. }
            | EditOp::SetBullets { range } => Some(*range),
        }
    }
}
