//! File system scanner for discovering sprite sheets.

use std::cmp::Ordering;
use std::path::{Path, PathBuf};

use walkdir::{DirEntry, WalkDir};

use crate::config::is_png;

/// Scan a directory for `.png` sheets.
///
/// Without `recursive` only the directory itself is read. With it, the
/// sheets directly inside a folder always come before those in its
/// sub-folders. Entries are sorted by name so runs are repeatable.
pub fn scan_directory(root: &Path, recursive: bool) -> Vec<PathBuf> {
    if !root.is_dir() {
        return Vec::new();
    }

    let max_depth = if recursive { usize::MAX } else { 1 };

    WalkDir::new(root)
        .follow_links(true)
        .max_depth(max_depth)
        .sort_by(files_first)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file() && is_png(e.path()))
        .map(DirEntry::into_path)
        .collect()
}

fn files_first(a: &DirEntry, b: &DirEntry) -> Ordering {
    a.file_type()
        .is_dir()
        .cmp(&b.file_type().is_dir())
        .then_with(|| a.file_name().cmp(b.file_name()))
}
