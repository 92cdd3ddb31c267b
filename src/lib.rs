//! sheetsplit - Split grid sprite sheets into individual sprites
//!
//! A library for classifying sprite sheets by their grid geometry and
//! writing every visible sprite, character frame or ground tile to its own
//! PNG file.

pub mod cli;
pub mod codec;
pub mod config;
pub mod discovery;
pub mod error;
pub mod output;
pub mod sheet;
pub mod split;

pub use codec::{write_sprite, CodecState, DecodedSheet};
pub use config::{GroundPattern, Job, JobEntry, JobFile, ResolvedJob};
pub use discovery::{collect_sheets, scan_directory};
pub use error::{Result, SplitError};
pub use output::Printer;
pub use sheet::{
    folder_name, plan_sheet, AssembledSprite, CharacterFrame, CharacterFrameSet, GridSpec,
    IndexPolicy, PlannedSprite, SheetClassifier, SheetKind, SheetPlan, SpriteRowTable,
};
pub use split::{SplitStats, Splitter};
