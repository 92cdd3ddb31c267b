//! Grid layout mapping.
//!
//! Turns a sheet's grid into a table of row references: `sprite_size`
//! consecutive entries describe one logical sprite, top row first. No pixel
//! data is copied here; the table borrows the decoded buffer it points into.

use std::ops::Range;

use super::grid::GridSpec;
use super::CharacterFrame;

/// One sprite row inside the decoded sheet buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowRef {
    /// Byte offset of the first pixel.
    pub offset: usize,
    /// Length of the row in bytes.
    pub len: usize,
}

impl RowRef {
    fn range(&self) -> Range<usize> {
        self.offset..self.offset + self.len
    }
}

/// Ordered row references for every logical sprite of one sheet.
#[derive(Debug, Clone)]
pub struct SpriteRowTable<'a> {
    pixels: &'a [u8],
    rows: Vec<RowRef>,
    sprite_size: usize,
}

impl<'a> SpriteRowTable<'a> {
    /// Number of logical sprites in the table.
    pub fn sprite_count(&self) -> usize {
        self.rows.len() / self.sprite_size
    }

    /// Row references of sprite `index`.
    pub fn row_refs(&self, index: usize) -> &[RowRef] {
        let start = index * self.sprite_size;
        &self.rows[start..start + self.sprite_size]
    }

    /// Pixel rows of sprite `index`, top to bottom.
    pub fn rows(&self, index: usize) -> impl Iterator<Item = &'a [u8]> + '_ {
        let pixels = self.pixels;
        self.row_refs(index).iter().map(move |row| &pixels[row.range()])
    }

    /// Byte width of the rows of sprite `index`.
    pub fn row_len(&self, index: usize) -> usize {
        self.row_refs(index).first().map_or(0, |row| row.len)
    }
}

/// Map an object (or ground) sheet: one logical sprite per grid cell,
/// numbered row-major.
///
/// `pixels` must be the RGBA buffer of a sheet matching `grid`.
pub fn map_object<'a>(pixels: &'a [u8], grid: &GridSpec) -> SpriteRowTable<'a> {
    let size = grid.sprite_size as usize;
    let columns = grid.column_count as usize;
    let stride = grid.row_stride();
    let row_bytes = grid.sprite_row_bytes();

    let mut rows = Vec::with_capacity(grid.cell_count() * size);
    for i in 0..grid.cell_count() {
        let origin = (i / columns) * size * stride + (i % columns) * row_bytes;
        for j in 0..size {
            rows.push(RowRef {
                offset: origin + j * stride,
                len: row_bytes,
            });
        }
    }

    SpriteRowTable {
        pixels,
        rows,
        sprite_size: size,
    }
}

/// Map a character sheet: five frames per grid row.
///
/// Column 3 is never referenced, and the second attack frame spans columns
/// 5 and 6 as a single double-width sprite.
pub fn map_character<'a>(pixels: &'a [u8], grid: &GridSpec) -> SpriteRowTable<'a> {
    let size = grid.sprite_size as usize;
    let stride = grid.row_stride();
    let row_bytes = grid.sprite_row_bytes();
    let frames = CharacterFrame::ALL.len();
    let count = grid.row_count as usize * frames;

    let mut rows = Vec::with_capacity(count * size);
    for i in 0..count {
        let frame = CharacterFrame::ALL[i % frames];
        let origin = (i / frames) * size * stride + frame.column() * row_bytes;
        let len = frame.width_in_cells() * row_bytes;
        for j in 0..size {
            rows.push(RowRef {
                offset: origin + j * stride,
                len,
            });
        }
    }

    SpriteRowTable {
        pixels,
        rows,
        sprite_size: size,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Sheet where every pixel stores its own coordinates as `[x, y, 0, 255]`.
    fn coordinate_sheet(width: u32, height: u32) -> Vec<u8> {
        let mut pixels = Vec::with_capacity((width * height * 4) as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.extend_from_slice(&[x as u8, y as u8, 0, 255]);
            }
        }
        pixels
    }

    #[test]
    fn test_map_object_counts() {
        let grid = GridSpec::validate(128, 24, 16).unwrap();
        let pixels = coordinate_sheet(128, 24);
        let table = map_object(&pixels, &grid);

        assert_eq!(table.sprite_count(), 48);
        assert_eq!(table.row_len(0), 32);
        assert_eq!(table.rows(47).count(), 8);
    }

    #[test]
    fn test_map_object_offsets() {
        let grid = GridSpec::validate(128, 16, 16).unwrap();
        let pixels = coordinate_sheet(128, 16);
        let table = map_object(&pixels, &grid);
        let stride = 128 * 4;

        // sprite 17 = second grid row, second column
        let refs = table.row_refs(17);
        assert_eq!(refs[0].offset, 8 * stride + 8 * 4);
        assert_eq!(refs[3].offset, 11 * stride + 8 * 4);
    }

    #[test]
    fn test_map_object_reproduces_source_pixels() {
        let grid = GridSpec::validate(128, 24, 16).unwrap();
        let pixels = coordinate_sheet(128, 24);
        let table = map_object(&pixels, &grid);
        let size = grid.sprite_size as usize;

        for i in 0..table.sprite_count() {
            let (col, row) = (i % 16, i / 16);
            for (j, line) in table.rows(i).enumerate() {
                for local_x in 0..size {
                    let px = &line[local_x * 4..local_x * 4 + 4];
                    assert_eq!(px[0] as usize, col * size + local_x);
                    assert_eq!(px[1] as usize, row * size + j);
                }
            }
        }
    }

    #[test]
    fn test_map_character_skips_column_three() {
        let grid = GridSpec::validate(56, 16, 7).unwrap();
        let pixels = coordinate_sheet(56, 16);
        let table = map_character(&pixels, &grid);

        assert_eq!(table.sprite_count(), 10);

        for i in 0..table.sprite_count() {
            for line in table.rows(i) {
                for px in line.chunks_exact(4) {
                    let column = px[0] / 8;
                    assert_ne!(column, 3, "sprite {i} reads from the empty column");
                }
            }
        }
    }

    #[test]
    fn test_map_character_frame_columns() {
        let grid = GridSpec::validate(56, 8, 7).unwrap();
        let pixels = coordinate_sheet(56, 8);
        let table = map_character(&pixels, &grid);

        let first_x: Vec<u8> = (0..5).map(|i| table.rows(i).next().unwrap()[0]).collect();
        assert_eq!(first_x, vec![0, 8, 16, 32, 40]);
    }

    #[test]
    fn test_map_character_attack_frame_is_double_width() {
        let grid = GridSpec::validate(112, 32, 7).unwrap();
        let pixels = coordinate_sheet(112, 32);
        let table = map_character(&pixels, &grid);

        assert_eq!(table.row_len(3), 16 * 4);
        assert_eq!(table.row_len(4), 32 * 4);
        assert_eq!(table.row_len(9), 32 * 4);

        // last frame of the second character row ends at the sheet edge
        let last = table.rows(9).last().unwrap();
        let end = &last[last.len() - 4..];
        assert_eq!(end[0], 111);
        assert_eq!(end[1], 31);
    }
}
