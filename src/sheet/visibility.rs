//! Transparency checks and output numbering.

use image::RgbaImage;

use super::assemble::CharacterFrameSet;

/// Returns true if every alpha byte of an RGBA buffer is zero.
///
/// Colour bytes are never looked at.
pub fn is_fully_transparent(buffer: &[u8]) -> bool {
    buffer.chunks_exact(4).all(|px| px[3] == 0)
}

/// Something that can be dropped from the output for being invisible.
pub trait Visibility {
    fn is_fully_transparent(&self) -> bool;
}

impl Visibility for RgbaImage {
    fn is_fully_transparent(&self) -> bool {
        is_fully_transparent(self.as_raw())
    }
}

impl Visibility for CharacterFrameSet {
    /// A character is only invisible when all five frames are. Characters
    /// with some empty frames (e.g. no attack animation) are kept.
    fn is_fully_transparent(&self) -> bool {
        self.frames().all(|(_, frame)| frame.is_fully_transparent())
    }
}

/// How saved sprites are numbered once invisible ones are dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IndexPolicy {
    /// Saved files keep their grid position, leaving gaps.
    #[default]
    Sparse,
    /// Dropped sprites are subtracted so saved files are numbered without gaps.
    Compact,
}

impl IndexPolicy {
    pub fn from_subtract_alpha(subtract: bool) -> Self {
        if subtract {
            IndexPolicy::Compact
        } else {
            IndexPolicy::Sparse
        }
    }
}

/// Assigns output numbers to slots in order, counting dropped slots.
#[derive(Debug, Clone)]
pub struct SlotNumbering {
    policy: IndexPolicy,
    next_slot: usize,
    skipped: usize,
}

impl SlotNumbering {
    pub fn new(policy: IndexPolicy) -> Self {
        Self {
            policy,
            next_slot: 0,
            skipped: 0,
        }
    }

    /// Advance past the next slot. Returns its output number, or `None`
    /// when the slot is invisible and gets dropped.
    pub fn next(&mut self, invisible: bool) -> Option<usize> {
        let slot = self.next_slot;
        self.next_slot += 1;

        if invisible {
            self.skipped += 1;
            return None;
        }

        Some(match self.policy {
            IndexPolicy::Sparse => slot,
            IndexPolicy::Compact => slot - self.skipped,
        })
    }

    /// Number of dropped slots so far.
    pub fn skipped(&self) -> usize {
        self.skipped
    }
}
