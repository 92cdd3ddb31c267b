//! Frame assembly.
//!
//! Copies the rows referenced by a [`SpriteRowTable`] into owned,
//! contiguous sprite images.

use image::RgbaImage;

use super::grid::GridSpec;
use super::layout::SpriteRowTable;
use super::CharacterFrame;

/// One output image.
pub type AssembledSprite = RgbaImage;

/// Pixels of the transparent border added around every ground tile.
pub const APRON: u32 = 1;

/// The five frames of one character row, kept together so visibility is
/// decided for the character as a whole.
#[derive(Debug, Clone)]
pub struct CharacterFrameSet {
    frames: [AssembledSprite; 5],
}

impl CharacterFrameSet {
    /// The frames in sheet order, paired with their names.
    pub fn frames(&self) -> impl Iterator<Item = (CharacterFrame, &AssembledSprite)> {
        CharacterFrame::ALL.into_iter().zip(self.frames.iter())
    }

    pub fn frame(&self, frame: CharacterFrame) -> &AssembledSprite {
        &self.frames[frame as usize]
    }

    pub fn into_frames(self) -> impl Iterator<Item = (CharacterFrame, AssembledSprite)> {
        CharacterFrame::ALL.into_iter().zip(self.frames)
    }
}

/// Copy sprite `index` of `table` into a new image with the given pixel
/// width, `sprite_size` rows tall.
fn copy_sprite(table: &SpriteRowTable<'_>, index: usize, width: u32, height: u32) -> AssembledSprite {
    let mut sprite = RgbaImage::new(width, height);
    let dst: &mut [u8] = &mut sprite;
    let row_len = width as usize * 4;

    for (line, src) in dst.chunks_exact_mut(row_len).zip(table.rows(index)) {
        line.copy_from_slice(src);
    }

    sprite
}

/// Square `sprite_size x sprite_size` sprites, one per table entry.
pub fn assemble_object(table: &SpriteRowTable<'_>, grid: &GridSpec) -> Vec<AssembledSprite> {
    let size = grid.sprite_size;
    (0..table.sprite_count())
        .map(|i| copy_sprite(table, i, size, size))
        .collect()
}

/// One frame set per character row. `table` must come from
/// [`map_character`](super::layout::map_character).
pub fn assemble_character(table: &SpriteRowTable<'_>, grid: &GridSpec) -> Vec<CharacterFrameSet> {
    let size = grid.sprite_size;
    let per_char = CharacterFrame::ALL.len();

    (0..table.sprite_count() / per_char)
        .map(|row| {
            let frames = CharacterFrame::ALL.map(|frame| {
                let width = size * frame.width_in_cells() as u32;
                copy_sprite(table, row * per_char + frame as usize, width, size)
            });
            CharacterFrameSet { frames }
        })
        .collect()
}

/// Ground tiles, each wrapped in a fully transparent one pixel apron.
///
/// The result is `(sprite_size + 2)` square: the top and bottom rows are
/// zero, and every interior row is the source row with one zero pixel on
/// either side.
pub fn assemble_ground(table: &SpriteRowTable<'_>, grid: &GridSpec) -> Vec<AssembledSprite> {
    let size = grid.sprite_size;
    let padded = size + 2 * APRON;
    let padded_row = padded as usize * 4;
    let inset = APRON as usize * 4;

    (0..table.sprite_count())
        .map(|i| {
            let mut tile = RgbaImage::new(padded, padded);
            let dst: &mut [u8] = &mut tile;
            let interior = dst
                .chunks_exact_mut(padded_row)
                .skip(APRON as usize)
                .take(size as usize);

            for (line, src) in interior.zip(table.rows(i)) {
                line[inset..inset + src.len()].copy_from_slice(src);
            }
            tile
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sheet::layout::{map_character, map_object};

    fn filled_sheet(width: u32, height: u32, f: impl Fn(u32, u32) -> [u8; 4]) -> RgbaImage {
        RgbaImage::from_fn(width, height, |x, y| image::Rgba(f(x, y)))
    }

    #[test]
    fn test_assemble_object_matches_sheet() {
        let sheet = filled_sheet(128, 16, |x, y| [x as u8, y as u8, 7, 255]);
        let grid = GridSpec::validate(128, 16, 16).unwrap();
        let table = map_object(sheet.as_raw(), &grid);
        let sprites = assemble_object(&table, &grid);

        assert_eq!(sprites.len(), 32);
        for (i, sprite) in sprites.iter().enumerate() {
            assert_eq!(sprite.dimensions(), (8, 8));
            let (ox, oy) = ((i as u32 % 16) * 8, (i as u32 / 16) * 8);
            for (x, y, px) in sprite.enumerate_pixels() {
                assert_eq!(px, sheet.get_pixel(ox + x, oy + y));
            }
        }
    }

    #[test]
    fn test_assemble_character_frame_sizes() {
        let sheet = filled_sheet(112, 32, |_, _| [1, 2, 3, 255]);
        let grid = GridSpec::validate(112, 32, 7).unwrap();
        let table = map_character(sheet.as_raw(), &grid);
        let chars = assemble_character(&table, &grid);

        assert_eq!(chars.len(), 2);
        let sizes: Vec<(u32, u32)> = chars[0].frames().map(|(_, f)| f.dimensions()).collect();
        assert_eq!(sizes, vec![(16, 16), (16, 16), (16, 16), (16, 16), (32, 16)]);
    }

    #[test]
    fn test_assemble_character_never_contains_column_three() {
        const SENTINEL: [u8; 4] = [255, 0, 255, 255];
        let sheet = filled_sheet(56, 8, |x, _| {
            if x / 8 == 3 {
                SENTINEL
            } else {
                [x as u8, 0, 0, 255]
            }
        });
        let grid = GridSpec::validate(56, 8, 7).unwrap();
        let table = map_character(sheet.as_raw(), &grid);
        let chars = assemble_character(&table, &grid);

        assert_eq!(chars.len(), 1);
        for (frame, sprite) in chars[0].frames() {
            assert!(
                sprite.pixels().all(|p| p.0 != SENTINEL),
                "{frame:?} contains the empty column"
            );
        }
    }

    #[test]
    fn test_assemble_character_attack_joins_two_columns() {
        let sheet = filled_sheet(56, 8, |x, _| [x as u8, 0, 0, 255]);
        let grid = GridSpec::validate(56, 8, 7).unwrap();
        let table = map_character(sheet.as_raw(), &grid);
        let chars = assemble_character(&table, &grid);

        let attack = chars[0].frame(CharacterFrame::Attack2);
        let xs: Vec<u8> = (0..16).map(|x| attack.get_pixel(x, 0)[0]).collect();
        assert_eq!(xs, (40..56).collect::<Vec<u8>>());
    }

    #[test]
    fn test_assemble_ground_apron() {
        let sheet = filled_sheet(128, 8, |x, y| [x as u8, y as u8, 9, 200]);
        let grid = GridSpec::validate(128, 8, 16).unwrap();
        let table = map_object(sheet.as_raw(), &grid);
        let tiles = assemble_ground(&table, &grid);

        assert_eq!(tiles.len(), 16);
        for (i, tile) in tiles.iter().enumerate() {
            assert_eq!(tile.dimensions(), (10, 10));
            for (x, y, px) in tile.enumerate_pixels() {
                let edge = x == 0 || y == 0 || x == 9 || y == 9;
                if edge {
                    assert_eq!(px[3], 0, "apron pixel ({x}, {y}) of tile {i}");
                } else {
                    let src = sheet.get_pixel(i as u32 * 8 + x - 1, y - 1);
                    assert_eq!(px, src);
                }
            }
        }
    }
}
