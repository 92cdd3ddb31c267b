//! Sprite sheet splitting.
//!
//! A decoded sheet goes through four pure steps:
//!
//! 1. [`classify`] picks the [`SheetKind`] and [`GridSpec`].
//! 2. [`layout`] maps the grid to a table of row references.
//! 3. [`assemble`] copies those rows into owned sprite images.
//! 4. [`visibility`] drops fully transparent sprites and numbers the rest.
//!
//! [`plan_sheet`] runs steps 2 to 4 and names every output file.

pub mod assemble;
pub mod classify;
pub mod grid;
pub mod layout;
pub mod naming;
pub mod visibility;

use std::fmt;

use image::RgbaImage;

pub use assemble::{AssembledSprite, CharacterFrameSet};
pub use classify::SheetClassifier;
pub use grid::GridSpec;
pub use layout::SpriteRowTable;
pub use naming::folder_name;
pub use visibility::{is_fully_transparent, IndexPolicy, SlotNumbering, Visibility};

/// The layout convention of a sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SheetKind {
    /// 16 columns of square sprites.
    Object,
    /// 7 columns holding five animation frames per character.
    Character,
    /// Object geometry, but every tile gets a transparent apron.
    Ground,
}

impl fmt::Display for SheetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SheetKind::Object => write!(f, "object"),
            SheetKind::Character => write!(f, "character"),
            SheetKind::Ground => write!(f, "ground"),
        }
    }
}

/// The frames of one character, in sheet order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharacterFrame {
    Idle = 0,
    Walk1 = 1,
    Walk2 = 2,
    Attack1 = 3,
    Attack2 = 4,
}

impl CharacterFrame {
    pub const ALL: [CharacterFrame; 5] = [
        CharacterFrame::Idle,
        CharacterFrame::Walk1,
        CharacterFrame::Walk2,
        CharacterFrame::Attack1,
        CharacterFrame::Attack2,
    ];

    /// Name used in output file names.
    pub fn label(&self) -> &'static str {
        match self {
            CharacterFrame::Idle => "Right_Walk_0",
            CharacterFrame::Walk1 => "Right_Walk_1",
            CharacterFrame::Walk2 => "Right_Walk_2",
            CharacterFrame::Attack1 => "Right_Attack_0",
            CharacterFrame::Attack2 => "Right_Attack_1",
        }
    }

    /// First sheet column of the frame. Column 3 is always empty.
    pub fn column(&self) -> usize {
        match self {
            CharacterFrame::Idle => 0,
            CharacterFrame::Walk1 => 1,
            CharacterFrame::Walk2 => 2,
            CharacterFrame::Attack1 => 4,
            CharacterFrame::Attack2 => 5,
        }
    }

    /// Number of grid cells the frame spans horizontally.
    pub fn width_in_cells(&self) -> usize {
        match self {
            CharacterFrame::Attack2 => 2,
            _ => 1,
        }
    }
}

/// One image to be written, with its file name inside the output folder.
#[derive(Debug, Clone)]
pub struct PlannedSprite {
    pub file_name: String,
    pub image: RgbaImage,
}

/// Everything a sheet splits into.
#[derive(Debug, Clone, Default)]
pub struct SheetPlan {
    pub sprites: Vec<PlannedSprite>,
    /// Dropped sprites, or dropped character rows for character sheets.
    pub skipped: usize,
}

/// Split a sheet's pixels into named output sprites.
///
/// `pixels` is the sheet's RGBA buffer, which must match `grid`.
pub fn plan_sheet(pixels: &[u8], kind: SheetKind, grid: &GridSpec, policy: IndexPolicy) -> SheetPlan {
    match kind {
        SheetKind::Object => {
            let table = layout::map_object(pixels, grid);
            plan_squares(assemble::assemble_object(&table, grid), policy)
        }
        SheetKind::Ground => {
            let table = layout::map_object(pixels, grid);
            plan_squares(assemble::assemble_ground(&table, grid), policy)
        }
        SheetKind::Character => {
            let table = layout::map_character(pixels, grid);
            plan_characters(assemble::assemble_character(&table, grid), policy)
        }
    }
}

fn plan_squares(sprites: Vec<AssembledSprite>, policy: IndexPolicy) -> SheetPlan {
    let mut numbering = SlotNumbering::new(policy);
    let sprites: Vec<PlannedSprite> = sprites
        .into_iter()
        .filter_map(|image| {
            let index = numbering.next(image.is_fully_transparent())?;
            Some(PlannedSprite {
                file_name: naming::sprite_file_name(index),
                image,
            })
        })
        .collect();

    SheetPlan {
        sprites,
        skipped: numbering.skipped(),
    }
}

fn plan_characters(characters: Vec<CharacterFrameSet>, policy: IndexPolicy) -> SheetPlan {
    let mut numbering = SlotNumbering::new(policy);
    let mut sprites = Vec::new();

    for character in characters {
        let Some(index) = numbering.next(character.is_fully_transparent()) else {
            continue;
        };
        sprites.extend(character.into_frames().map(|(frame, image)| PlannedSprite {
            file_name: naming::frame_file_name(index, frame),
            image,
        }));
    }

    SheetPlan {
        sprites,
        skipped: numbering.skipped(),
    }
}
