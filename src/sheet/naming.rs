//! Output folder and file naming.
//!
//! Split sprites go into a folder named after their sheet. Nothing formally
//! defines that name, so it is the sheet name up to and including its
//! sprite size, e.g. `AbyssOfDemonsChars16x16.png` becomes
//! `AbyssOfDemonsChars16`. Keeping the size stops `...Chars8x8` and
//! `...Chars16x16` from landing in the same folder.

use std::path::Path;

use super::{CharacterFrame, SheetKind};

impl SheetKind {
    /// Substring that marks where the size token starts in sheet names.
    pub fn name_marker(&self) -> &'static str {
        match self {
            SheetKind::Object | SheetKind::Ground => "objects",
            SheetKind::Character => "chars",
        }
    }
}

/// Output folder name for a sheet.
///
/// Best effort: when no marker or size token is found the file stem is used,
/// so callers must expect generic or shared folder names.
pub fn folder_name(sheet_path: &Path, kind: SheetKind) -> String {
    let file_name = sheet_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    match size_token_end(&file_name, kind.name_marker()) {
        Some(end) => file_name[..end].to_string(),
        None => strip_png(&file_name).to_string(),
    }
}

/// Byte index of the `x` in the size token following `marker`.
///
/// A marker at the very start of the name does not count; old sheets named
/// like `chars16x16.png` would otherwise all share one folder.
fn size_token_end(file_name: &str, marker: &str) -> Option<usize> {
    let lower = file_name.to_ascii_lowercase();
    let start = match lower.find(marker)? {
        0 => return None,
        i => i + marker.len(),
    };

    let bytes = lower.as_bytes();
    (start + 1..bytes.len().saturating_sub(1)).find(|&i| {
        bytes[i] == b'x' && bytes[i - 1].is_ascii_digit() && bytes[i + 1].is_ascii_digit()
    })
}

fn strip_png(file_name: &str) -> &str {
    let len = file_name.len();
    if len >= 4 && file_name.is_char_boundary(len - 4) && file_name[len - 4..].eq_ignore_ascii_case(".png") {
        &file_name[..len - 4]
    } else {
        file_name
    }
}

/// File name of an object or ground sprite.
pub fn sprite_file_name(index: usize) -> String {
    format!("{}.png", index)
}

/// File name of one character frame.
pub fn frame_file_name(index: usize, frame: CharacterFrame) -> String {
    format!("{}_{}.png", index, frame.label())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(file: &str, kind: SheetKind) -> String {
        folder_name(Path::new(file), kind)
    }

    #[test]
    fn test_character_folder_keeps_size() {
        assert_eq!(name("AbyssOfDemonsChars16x16.png", SheetKind::Character), "AbyssOfDemonsChars16");
    }

    #[test]
    fn test_object_folder_keeps_size() {
        assert_eq!(name("lofiObjects8x8.png", SheetKind::Object), "lofiObjects8");
        assert_eq!(name("EnvironmentObjects16x16.png", SheetKind::Ground), "EnvironmentObjects16");
    }

    #[test]
    fn test_marker_is_case_insensitive() {
        assert_eq!(name("LOFICHARS8X8.PNG", SheetKind::Character), "LOFICHARS8");
    }

    #[test]
    fn test_no_marker_uses_stem() {
        assert_eq!(name("Unknown.png", SheetKind::Object), "Unknown");
        assert_eq!(name("Unknown.PNG", SheetKind::Character), "Unknown");
    }

    #[test]
    fn test_marker_for_other_kind_is_ignored() {
        assert_eq!(name("AbyssOfDemonsChars16x16.png", SheetKind::Object), "AbyssOfDemonsChars16x16");
    }

    #[test]
    fn test_marker_at_start_is_ignored() {
        assert_eq!(name("chars16x16.png", SheetKind::Character), "chars16x16");
        assert_eq!(name("objects8x8.png", SheetKind::Object), "objects8x8");
    }

    #[test]
    fn test_marker_without_size_uses_stem() {
        assert_eq!(name("petChars.png", SheetKind::Character), "petChars");
        assert_eq!(name("lofiObjectsBox.png", SheetKind::Object), "lofiObjectsBox");
    }

    #[test]
    fn test_directories_are_ignored() {
        let path = Path::new("sheets/objects/lofiChars8x8.png");
        assert_eq!(folder_name(path, SheetKind::Character), "lofiChars8");
    }

    #[test]
    fn test_file_names() {
        assert_eq!(sprite_file_name(12), "12.png");
        assert_eq!(frame_file_name(3, CharacterFrame::Idle), "3_Right_Walk_0.png");
        assert_eq!(frame_file_name(0, CharacterFrame::Attack2), "0_Right_Attack_1.png");
    }
}
