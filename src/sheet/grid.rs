//! Grid geometry of a sprite sheet.

/// Smallest sprite edge a sheet may use.
pub const MIN_SPRITE_SIZE: u32 = 8;

/// Column layout and sprite size of a well-formed sheet.
///
/// Always satisfies `width == column_count * sprite_size`, with
/// `sprite_size` a power of two of at least [`MIN_SPRITE_SIZE`] and the
/// height an exact multiple of `sprite_size`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridSpec {
    pub column_count: u32,
    pub sprite_size: u32,
    pub row_count: u32,
}

impl GridSpec {
    /// Derive the grid of a `width x height` image with `column_count` columns.
    ///
    /// Returns `None` unless every division is exact. Nothing is ever rounded;
    /// sheets are always pixel-grid aligned.
    pub fn validate(width: u32, height: u32, column_count: u32) -> Option<Self> {
        if column_count == 0 || width % column_count != 0 {
            return None;
        }

        let sprite_size = width / column_count;
        if sprite_size < MIN_SPRITE_SIZE || !sprite_size.is_power_of_two() {
            return None;
        }

        if height == 0 || height % sprite_size != 0 {
            return None;
        }

        Some(Self {
            column_count,
            sprite_size,
            row_count: height / sprite_size,
        })
    }

    /// Pixel width of the whole sheet.
    pub fn sheet_width(&self) -> u32 {
        self.column_count * self.sprite_size
    }

    /// Pixel height of the whole sheet.
    pub fn sheet_height(&self) -> u32 {
        self.row_count * self.sprite_size
    }

    /// Bytes in one full pixel row of the sheet.
    pub fn row_stride(&self) -> usize {
        self.sheet_width() as usize * 4
    }

    /// Bytes in one sprite-wide row.
    pub fn sprite_row_bytes(&self) -> usize {
        self.sprite_size as usize * 4
    }

    /// Number of grid cells.
    pub fn cell_count(&self) -> usize {
        self.column_count as usize * self.row_count as usize
    }
}
