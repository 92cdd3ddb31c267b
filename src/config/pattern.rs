//! Ground sheet file name pattern.
//!
//! Patterns are written as regex literals, `/body/flags`, the same way they
//! appear in job files (`"groundFilePattern": "/ground/i"`).

use std::fmt;

use regex::{Regex, RegexBuilder};

use crate::error::{SplitError, Result};

/// Literal used when a job does not name a ground pattern.
pub const DEFAULT_GROUND_LITERAL: &str = "/ground/i";

/// Compiled ground pattern, remembering the literal it came from.
#[derive(Debug, Clone)]
pub struct GroundPattern {
    regex: Regex,
    literal: String,
    ignored_flags: Vec<char>,
}

impl GroundPattern {
    /// Parse a `/body/flags` literal. The only supported flag is `i`;
    /// other flags are recorded in [`ignored_flags`](Self::ignored_flags).
    pub fn from_literal(literal: &str) -> Result<Self> {
        let not_literal = || SplitError::Pattern {
            literal: literal.to_string(),
            message: "expected a /body/flags literal".to_string(),
        };

        let rest = literal.strip_prefix('/').ok_or_else(not_literal)?;
        let close = rest.rfind('/').ok_or_else(not_literal)?;
        let (body, flags) = (&rest[..close], &rest[close + 1..]);

        let mut builder = RegexBuilder::new(body);
        let mut ignored_flags = Vec::new();
        for flag in flags.chars() {
            match flag {
                'i' => {
                    builder.case_insensitive(true);
                }
                other => ignored_flags.push(other),
            }
        }

        let regex = builder.build().map_err(|e| SplitError::Pattern {
            literal: literal.to_string(),
            message: e.to_string(),
        })?;

        Ok(Self {
            regex,
            literal: literal.to_string(),
            ignored_flags,
        })
    }

    /// Whether the pattern occurs anywhere in `file_name`.
    pub fn is_match(&self, file_name: &str) -> bool {
        self.regex.is_match(file_name)
    }

    pub fn literal(&self) -> &str {
        &self.literal
    }

    /// Flags present in the literal that have no effect.
    pub fn ignored_flags(&self) -> &[char] {
        &self.ignored_flags
    }
}

impl Default for GroundPattern {
    fn default() -> Self {
        Self::from_literal(DEFAULT_GROUND_LITERAL).expect("default ground pattern is valid")
    }
}

impl fmt::Display for GroundPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.literal)
    }
}
