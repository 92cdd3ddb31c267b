use miette::Diagnostic;
use thiserror::Error;

/// Main error type for sheetsplit operations
#[derive(Error, Diagnostic, Debug)]
pub enum SplitError {
    #[error("IO error with {path}: {message}")]
    #[diagnostic(code(sheetsplit::io))]
    Io {
        path: std::path::PathBuf,
        message: String,
    },

    #[error("Failed to decode {path}: {message}")]
    #[diagnostic(code(sheetsplit::decode), help("The file is most likely not a valid PNG"))]
    Decode {
        path: std::path::PathBuf,
        message: String,
    },

    #[error("An image of size {width}x{height} is not a valid sprite sheet")]
    #[diagnostic(
        code(sheetsplit::classify),
        help("Sheets must be 16 or 7 columns of square power-of-two sprites, at least 8px wide")
    )]
    NotASheet { width: u32, height: u32 },

    #[error("Failed to encode {path}: {message}")]
    #[diagnostic(code(sheetsplit::encode))]
    Encode {
        path: std::path::PathBuf,
        message: String,
    },

    #[error("Config error: {message}")]
    #[diagnostic(code(sheetsplit::config))]
    Config {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("'{literal}' is not a usable regex literal: {message}")]
    #[diagnostic(code(sheetsplit::pattern), help("Write patterns as /body/flags, e.g. /ground/i"))]
    Pattern { literal: String, message: String },
}

pub type Result<T> = std::result::Result<T, SplitError>;
