//! Output folder preparation.
//!
//! In sub-folder mode every sheet owns its folder and wipes it before
//! writing. Two sheets of one job can still resolve to the same folder name,
//! so each folder is guarded by its own lock and cleaned under it.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use crate::error::{SplitError, Result};

/// Per-folder locks for one job.
#[derive(Debug, Default)]
pub struct FolderLocks {
    claimed: Mutex<HashMap<PathBuf, Arc<Mutex<()>>>>,
}

/// A claimed folder. Lock [`mutex`](Self::mutex) while cleaning and writing.
#[derive(Debug)]
pub struct FolderClaim {
    pub mutex: Arc<Mutex<()>>,
    /// Another sheet of the same job claimed this folder before.
    pub reused: bool,
}

impl FolderLocks {
    pub fn claim(&self, folder: &Path) -> FolderClaim {
        let mut claimed = self.claimed.lock().unwrap_or_else(PoisonError::into_inner);
        let reused = claimed.contains_key(folder);
        let mutex = Arc::clone(claimed.entry(folder.to_path_buf()).or_default());
        FolderClaim { mutex, reused }
    }
}

/// Make sure `folder` exists, removing any previous contents when `clean`.
pub fn prepare_folder(folder: &Path, clean: bool) -> Result<()> {
    if clean && folder.exists() {
        fs::remove_dir_all(folder).map_err(|e| SplitError::Io {
            path: folder.to_path_buf(),
            message: format!("Failed to clean output folder: {}", e),
        })?;
    }

    fs::create_dir_all(folder).map_err(|e| SplitError::Io {
        path: folder.to_path_buf(),
        message: format!("Failed to create output folder: {}", e),
    })
}
