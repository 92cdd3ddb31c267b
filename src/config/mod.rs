//! Job configuration.
//!
//! Jobs come either from command line flags or from a job file; both end up
//! as a [`Job`], which is resolved against the file system before any sheet
//! is touched.

mod job;
mod jobfile;
mod pattern;

use std::path::Path;

pub use job::{Job, ResolvedJob};
pub use jobfile::{JobEntry, JobFile};
pub use pattern::{GroundPattern, DEFAULT_GROUND_LITERAL};

/// Whether a path has a `.png` extension, in any case.
pub fn is_png(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("png"))
}
