//! Sheet classification.
//!
//! Decides which kind of sheet an image is from its dimensions, using the
//! file name only to tell ground sheets apart from object sheets.

use crate::config::GroundPattern;
use crate::error::{SplitError, Result};

use super::grid::GridSpec;
use super::SheetKind;

/// Column count shared by object and ground sheets.
pub const OBJECT_COLUMNS: u32 = 16;

/// Column count of character sheets.
pub const CHARACTER_COLUMNS: u32 = 7;

/// Resolves the [`SheetKind`] and [`GridSpec`] of decoded sheets.
#[derive(Debug, Clone, Default)]
pub struct SheetClassifier {
    ground: GroundPattern,
}

impl SheetClassifier {
    pub fn new(ground: GroundPattern) -> Self {
        Self { ground }
    }

    /// Classify a `width x height` sheet named `file_name`.
    ///
    /// 16-column geometry is tried first and the ground pattern is applied
    /// right there, before any fallback to the 7-column character layout.
    pub fn classify(&self, width: u32, height: u32, file_name: &str) -> Result<(SheetKind, GridSpec)> {
        if let Some(grid) = GridSpec::validate(width, height, OBJECT_COLUMNS) {
            let kind = if self.ground.is_match(file_name) {
                SheetKind::Ground
            } else {
                SheetKind::Object
            };
            return Ok((kind, grid));
        }

        if let Some(grid) = GridSpec::validate(width, height, CHARACTER_COLUMNS) {
            return Ok((SheetKind::Character, grid));
        }

        Err(SplitError::NotASheet { width, height })
    }
}
