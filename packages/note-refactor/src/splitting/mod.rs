//! Document segmentation.
//!
//! Turns a document snapshot into the blocks that become new notes: the
//! selection, the remainder after the cursor, or one block per heading
//! section of a given level.

mod engine;
mod heading;

pub use engine::{
    note_remainder, remainder_block, selected_content, selection_block, split_by_heading,
};
pub use heading::{heading_level, heading_text, relevel};
