//! PNG decoding and encoding.
//!
//! Sheets are decoded to straight-alpha RGBA8. The encoder settings used for
//! a sheet's sprites travel with the sheet as a [`CodecState`], so every
//! sprite cut from one sheet is written the same way.

use std::borrow::Cow;
use std::fs;
use std::path::{Path, PathBuf};

use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::{ColorType, ExtendedColorType, ImageEncoder, RgbaImage};

use crate::error::{SplitError, Result};

/// Encoder settings carried from a decoded sheet to its sprites.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodecState {
    /// Colour type the sheet was stored with before conversion to RGBA8.
    pub source_color: ColorType,
    pub compression: CompressionType,
    pub filter: FilterType,
}

impl Default for CodecState {
    fn default() -> Self {
        Self {
            source_color: ColorType::Rgba8,
            compression: CompressionType::Default,
            filter: FilterType::Adaptive,
        }
    }
}

/// A sheet decoded into memory.
#[derive(Debug, Clone)]
pub struct DecodedSheet {
    pub path: PathBuf,
    pub image: RgbaImage,
    pub state: CodecState,
}

impl DecodedSheet {
    /// Decode the PNG at `path`.
    pub fn open(path: &Path) -> Result<Self> {
        let decoded = image::open(path).map_err(|e| SplitError::Decode {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let state = CodecState {
            source_color: decoded.color(),
            ..CodecState::default()
        };

        Ok(Self {
            path: path.to_path_buf(),
            image: decoded.into_rgba8(),
            state,
        })
    }

    /// Wrap pixels that are already in memory.
    pub fn from_image(path: impl Into<PathBuf>, image: RgbaImage) -> Self {
        Self {
            path: path.into(),
            image,
            state: CodecState::default(),
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Row-major RGBA bytes.
    pub fn pixels(&self) -> &[u8] {
        self.image.as_raw()
    }

    /// File name without directories, for classification and naming.
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// Encode `sprite` with the sheet's settings and write it to `path`.
///
/// The sprite is stored in the sheet's own colour type when that type holds
/// it without loss, and as RGBA8 otherwise. Encoding happens in memory and
/// the file is written next to `path` before being renamed into place, so a
/// failure never leaves a truncated PNG behind.
pub fn write_sprite(sprite: &RgbaImage, state: &CodecState, path: &Path) -> Result<()> {
    let (pixels, color) = narrow(sprite, state.source_color);

    let mut encoded = Vec::new();
    PngEncoder::new_with_quality(&mut encoded, state.compression, state.filter)
        .write_image(&pixels, sprite.width(), sprite.height(), color)
        .map_err(|e| SplitError::Encode {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    let staging = path.with_extension("png.part");
    fs::write(&staging, encoded).map_err(|e| SplitError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to write PNG: {}", e),
    })?;

    fs::rename(&staging, path).map_err(|e| {
        let _ = fs::remove_file(&staging);
        SplitError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to write PNG: {}", e),
        }
    })
}

/// Pixels of `sprite` in `source` colour type, if that loses nothing.
fn narrow(sprite: &RgbaImage, source: ColorType) -> (Cow<'_, [u8]>, ExtendedColorType) {
    let raw = sprite.as_raw();
    let opaque = sprite.pixels().all(|p| p[3] == u8::MAX);
    let grey = sprite.pixels().all(|p| p[0] == p[1] && p[1] == p[2]);

    match source {
        ColorType::L8 if opaque && grey => (
            raw.chunks_exact(4).map(|p| p[0]).collect(),
            ExtendedColorType::L8,
        ),
        ColorType::La8 if grey => (
            raw.chunks_exact(4).flat_map(|p| [p[0], p[3]]).collect(),
            ExtendedColorType::La8,
        ),
        ColorType::Rgb8 if opaque => (
            raw.chunks_exact(4).flat_map(|p| [p[0], p[1], p[2]]).collect(),
            ExtendedColorType::Rgb8,
        ),
        _ => (Cow::Borrowed(raw.as_slice()), ExtendedColorType::Rgba8),
    }
}
