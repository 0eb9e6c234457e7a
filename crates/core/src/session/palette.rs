use crate::model::BlockKind;

/// Block kinds appended by continuations, cycled by current block count.
pub const PALETTE: [BlockKind; 3] = [
    BlockKind::Text,
    BlockKind::MultipleChoice,
    BlockKind::ImageWithText,
];

/// Kind of the block appended when the session holds `count` blocks.
#[must_use]
pub fn next_kind(count: usize) -> BlockKind {
    PALETTE[count % PALETTE.len()]
}
