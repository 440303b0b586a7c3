pub mod blocks;
pub mod compile;

// Re-export key types for easier usage
pub use blocks::{Block, extract_blocks};
pub use compile::{
    CompileError, Cursor, EditBatch, EditOp, compile,
    ops::{HeadingLevel, Range, Rgb, TextStyle},
};
