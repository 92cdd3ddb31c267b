//! Finding the sprite sheets a job works on.
//!
//! # Example
//!
//! ```ignore
//! use sheetsplit::discovery::collect_sheets;
//!
//! let sheets = collect_sheets("./sheets".as_ref(), true, 10)?;
//! println!("Found {} sheets", sheets.len());
//! ```

mod scanner;

use std::path::{Path, PathBuf};

use crate::config::is_png;
use crate::error::{SplitError, Result};

pub use scanner::scan_directory;

/// Collect at most `cap` sheets from `input`.
///
/// A `.png` file is returned as the only sheet; a folder is scanned.
pub fn collect_sheets(input: &Path, recursive: bool, cap: usize) -> Result<Vec<PathBuf>> {
    if input.is_file() {
        if !is_png(input) {
            return Err(SplitError::Io {
                path: input.to_path_buf(),
                message: "Not a .png file".to_string(),
            });
        }
        return Ok(vec![input.to_path_buf()]);
    }

    if !input.is_dir() {
        return Err(SplitError::Io {
            path: input.to_path_buf(),
            message: "Input not found".to_string(),
        });
    }

    let mut sheets = scan_directory(input, recursive);
    sheets.truncate(cap);
    Ok(sheets)
}
