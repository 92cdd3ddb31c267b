//! Inspect command implementation.
//!
//! Classifies sheets and prints what a split would produce, one line per
//! sheet on stdout, without writing anything.

use std::fmt;
use std::path::{Path, PathBuf};

use clap::Args;

use crate::codec::DecodedSheet;
use crate::config::{GroundPattern, DEFAULT_GROUND_LITERAL};
use crate::discovery::collect_sheets;
use crate::error::Result;
use crate::output::{display_path, plural, Printer};
use crate::sheet::{folder_name, CharacterFrame, GridSpec, SheetClassifier, SheetKind};

/// Classify sprite sheets without writing anything
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Sheets or folders of sheets
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Also inspect sheets in sub-folders
    #[arg(long, short)]
    pub recursive: bool,

    /// Regex literal marking ground sheets by file name
    #[arg(long, default_value = DEFAULT_GROUND_LITERAL, value_name = "LITERAL")]
    pub ground_pattern: String,
}

/// What a split of one sheet would look like.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetSummary {
    pub path: PathBuf,
    pub kind: SheetKind,
    pub grid: GridSpec,
    pub folder: String,
}

impl SheetSummary {
    pub fn new(path: &Path, kind: SheetKind, grid: GridSpec) -> Self {
        Self {
            path: path.to_path_buf(),
            kind,
            grid,
            folder: folder_name(path, kind),
        }
    }

    /// Sprite slots on the sheet: grid cells, or characters for character sheets.
    pub fn slots(&self) -> usize {
        match self.kind {
            SheetKind::Object | SheetKind::Ground => self.grid.cell_count(),
            SheetKind::Character => self.grid.row_count as usize,
        }
    }

    fn slot_label(&self) -> String {
        match self.kind {
            SheetKind::Object => plural(self.slots(), "sprite", "sprites"),
            SheetKind::Ground => plural(self.slots(), "tile", "tiles"),
            SheetKind::Character => format!(
                "{} x {} frames",
                plural(self.slots(), "character", "characters"),
                CharacterFrame::ALL.len()
            ),
        }
    }
}

impl fmt::Display for SheetSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\t{}\t{}x{} @ {}px\t{}\t{}",
            display_path(&self.path),
            self.kind,
            self.grid.column_count,
            self.grid.row_count,
            self.grid.sprite_size,
            self.slot_label(),
            self.folder
        )
    }
}

/// Decode and classify one sheet.
pub fn summarize(path: &Path, classifier: &SheetClassifier) -> Result<SheetSummary> {
    let sheet = DecodedSheet::open(path)?;
    let (kind, grid) = classifier.classify(sheet.width(), sheet.height(), &sheet.file_name())?;
    Ok(SheetSummary::new(path, kind, grid))
}

pub fn run(args: InspectArgs, printer: &Printer) -> Result<()> {
    let classifier = SheetClassifier::new(GroundPattern::from_literal(&args.ground_pattern)?);

    let mut inspected = 0;
    let mut invalid = 0;

    for input in &args.files {
        for path in collect_sheets(input, args.recursive, usize::MAX)? {
            inspected += 1;
            match summarize(&path, &classifier) {
                Ok(summary) => println!("{}", summary),
                Err(e) => {
                    invalid += 1;
                    printer.error("Invalid", &format!("{}: {}", display_path(&path), e));
                }
            }
        }
    }

    printer.info(
        "Inspected",
        &format!("{} ({} invalid)", plural(inspected, "sheet", "sheets"), invalid),
    );

    Ok(())
}
