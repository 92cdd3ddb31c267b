//! Split job options and their resolution against the file system.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{SplitError, Result};
use crate::output::{display_path, Printer};
use crate::sheet::IndexPolicy;

use super::GroundPattern;

/// One unit of work as described by the user.
#[derive(Debug, Clone)]
pub struct Job {
    /// A `.png` sheet or a folder of sheets.
    pub input: PathBuf,
    /// Output root. Defaults to the input's folder.
    pub output: Option<PathBuf>,
    /// Maximum number of sheets to process from a folder.
    pub cap: Option<usize>,
    /// Also look for sheets in sub-folders.
    pub recursive: bool,
    /// Give every sheet its own, freshly cleaned, output folder.
    pub use_sub_folders: bool,
    /// Number saved sprites without gaps for dropped ones.
    pub subtract_alpha_from_index: bool,
    pub ground_pattern: GroundPattern,
}

impl Job {
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: None,
            cap: None,
            recursive: false,
            use_sub_folders: true,
            subtract_alpha_from_index: false,
            ground_pattern: GroundPattern::default(),
        }
    }

    /// Whether the input names a single sheet rather than a folder.
    pub fn is_png_input(&self) -> bool {
        super::is_png(&self.input)
    }

    /// Check the input, settle defaults and make sure the output root exists.
    pub fn resolve(self, printer: &Printer) -> Result<ResolvedJob> {
        if !self.input.exists() {
            return Err(SplitError::Io {
                path: self.input.clone(),
                message: format!("Input not found: {}", display_path(&self.input)),
            });
        }

        let single = self.is_png_input() && self.input.is_file();
        if !single && !self.input.is_dir() {
            return Err(SplitError::Config {
                message: format!("{} is not a .png file or folder", display_path(&self.input)),
                help: Some("Pass a sprite sheet or a folder containing sprite sheets".to_string()),
            });
        }

        let cap = if single {
            if matches!(self.cap, Some(n) if n != 1) {
                printer.warning(
                    "Warning",
                    "a cap only applies to folders and is ignored for a single sheet",
                );
            }
            1
        } else {
            self.cap.unwrap_or(usize::MAX)
        };

        for flag in self.ground_pattern.ignored_flags() {
            printer.warning(
                "Warning",
                &format!("'{}' is not a supported flag in {}", flag, self.ground_pattern),
            );
        }

        let output = match self.output {
            Some(output) => output,
            None => {
                let fallback = input_folder(&self.input, single);
                printer.warning(
                    "Warning",
                    &format!("no output directory given, using {}", display_path(&fallback)),
                );
                fallback
            }
        };

        if output.exists() && !output.is_dir() {
            return Err(SplitError::Config {
                message: format!("output {} is not a folder", display_path(&output)),
                help: None,
            });
        }
        fs::create_dir_all(&output).map_err(|e| SplitError::Io {
            path: output.clone(),
            message: format!("Failed to create output directory: {}", e),
        })?;

        Ok(ResolvedJob {
            input: self.input,
            output,
            cap,
            recursive: self.recursive,
            use_sub_folders: self.use_sub_folders,
            index_policy: IndexPolicy::from_subtract_alpha(self.subtract_alpha_from_index),
            ground_pattern: self.ground_pattern,
        })
    }
}

fn input_folder(input: &Path, single: bool) -> PathBuf {
    if !single {
        return input.to_path_buf();
    }
    match input.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// A job whose paths have been checked and whose defaults are settled.
#[derive(Debug, Clone)]
pub struct ResolvedJob {
    pub input: PathBuf,
    /// Existing output root.
    pub output: PathBuf,
    /// Sheets to process at most; 1 for single sheet input.
    pub cap: usize,
    pub recursive: bool,
    pub use_sub_folders: bool,
    pub index_policy: IndexPolicy,
    pub ground_pattern: GroundPattern,
}
