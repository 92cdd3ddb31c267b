//! Job files.
//!
//! A job file lists several split jobs at once:
//!
//! ```json
//! {
//!   "jobs": [
//!     { "in": "sheets/", "out": "split/", "recursive": true, "cap": 10 },
//!     { "in": "sheets/desertGround8x8.png", "out": "split/", "singleFolderOutput": true }
//!   ]
//! }
//! ```
//!
//! Files ending in `.yaml` or `.yml` are read as YAML with the same keys.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{SplitError, Result};

use super::{GroundPattern, Job, DEFAULT_GROUND_LITERAL};

/// Top level of a job file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobFile {
    pub jobs: Vec<JobEntry>,
}

/// One job as written in a job file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobEntry {
    #[serde(rename = "in")]
    pub input: PathBuf,

    #[serde(rename = "out")]
    pub output: PathBuf,

    /// Unlimited when absent.
    #[serde(default)]
    pub cap: Option<usize>,

    #[serde(default)]
    pub recursive: bool,

    /// Write every sheet's sprites straight into `out`.
    #[serde(default)]
    pub single_folder_output: bool,

    #[serde(default)]
    pub subtract_alpha_from_index: bool,

    #[serde(default = "default_ground_pattern")]
    pub ground_file_pattern: String,
}

fn default_ground_pattern() -> String {
    DEFAULT_GROUND_LITERAL.to_string()
}

impl JobFile {
    /// Load a job file, choosing the format from the extension.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| SplitError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read job file: {}", e),
        })?;

        let is_yaml = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("yaml") || e.eq_ignore_ascii_case("yml"));

        if is_yaml {
            Self::parse_yaml(&content)
        } else {
            Self::parse_json(&content)
        }
    }

    pub fn parse_json(content: &str) -> Result<Self> {
        serde_json::from_str(content).map_err(|e| SplitError::Config {
            message: format!("Invalid job file: {}", e),
            help: Some("A job file is an object with a \"jobs\" array".to_string()),
        })
    }

    pub fn parse_yaml(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).map_err(|e| SplitError::Config {
            message: format!("Invalid job file: {}", e),
            help: Some("A job file is a mapping with a `jobs` list".to_string()),
        })
    }

    /// Validate every entry and turn it into a [`Job`].
    pub fn into_jobs(self) -> Result<Vec<Job>> {
        self.jobs
            .into_iter()
            .enumerate()
            .map(|(i, entry)| entry.into_job(i))
            .collect()
    }
}

impl JobEntry {
    fn into_job(self, position: usize) -> Result<Job> {
        for (key, value) in [("in", &self.input), ("out", &self.output)] {
            if value.as_os_str().is_empty() {
                return Err(SplitError::Config {
                    message: format!("job {} has an empty \"{}\"", position + 1, key),
                    help: None,
                });
            }
        }

        Ok(Job {
            input: self.input,
            output: Some(self.output),
            cap: self.cap,
            recursive: self.recursive,
            use_sub_folders: !self.single_folder_output,
            subtract_alpha_from_index: self.subtract_alpha_from_index,
            ground_pattern: GroundPattern::from_literal(&self.ground_file_pattern)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_parse_minimal_job() {
        let file = JobFile::parse_json(r#"{ "jobs": [ { "in": "sheets", "out": "split" } ] }"#).unwrap();
        let jobs = file.into_jobs().unwrap();

        assert_eq!(jobs.len(), 1);
        let job = &jobs[0];
        assert_eq!(job.input, PathBuf::from("sheets"));
        assert_eq!(job.output, Some(PathBuf::from("split")));
        assert_eq!(job.cap, None);
        assert!(!job.recursive);
        assert!(job.use_sub_folders);
        assert!(!job.subtract_alpha_from_index);
        assert_eq!(job.ground_pattern.literal(), "/ground/i");
    }

    #[test]
    fn test_parse_full_job() {
        let json = r#"{
            "jobs": [{
                "in": "sheets/",
                "out": "split/",
                "cap": 3,
                "recursive": true,
                "singleFolderOutput": true,
                "subtractAlphaFromIndex": true,
                "groundFilePattern": "/^tiles/"
            }]
        }"#;
        let jobs = JobFile::parse_json(json).unwrap().into_jobs().unwrap();
        let job = &jobs[0];

        assert_eq!(job.cap, Some(3));
        assert!(job.recursive);
        assert!(!job.use_sub_folders);
        assert!(job.subtract_alpha_from_index);
        assert!(job.ground_pattern.is_match("tiles_cave.png"));
    }

    #[test]
    fn test_parse_yaml_job() {
        let yaml = r#"
jobs:
  - in: sheets
    out: split
    singleFolderOutput: true
"#;
        let jobs = JobFile::parse_yaml(yaml).unwrap().into_jobs().unwrap();
        assert!(!jobs[0].use_sub_folders);
    }

    #[test]
    fn test_missing_jobs_key() {
        assert!(matches!(JobFile::parse_json("{}"), Err(SplitError::Config { .. })));
    }

    #[test]
    fn test_missing_out() {
        assert!(JobFile::parse_json(r#"{ "jobs": [ { "in": "sheets" } ] }"#).is_err());
    }

    #[test]
    fn test_empty_in_is_rejected() {
        let file = JobFile::parse_json(r#"{ "jobs": [ { "in": "", "out": "split" } ] }"#).unwrap();
        assert!(matches!(file.into_jobs(), Err(SplitError::Config { .. })));
    }

    #[test]
    fn test_bad_pattern_is_rejected() {
        let file = JobFile::parse_json(
            r#"{ "jobs": [ { "in": "a", "out": "b", "groundFilePattern": "ground" } ] }"#,
        )
        .unwrap();
        assert!(matches!(file.into_jobs(), Err(SplitError::Pattern { .. })));
    }

    #[test]
    fn test_load_by_extension() {
        let dir = tempdir().unwrap();

        let json = dir.path().join("jobs.json");
        std::fs::write(&json, r#"{ "jobs": [ { "in": "a", "out": "b" } ] }"#).unwrap();
        assert_eq!(JobFile::load(&json).unwrap().jobs.len(), 1);

        let yaml = dir.path().join("jobs.yml");
        std::fs::write(&yaml, "jobs:\n  - in: a\n    out: b\n  - in: c\n    out: d\n").unwrap();
        assert_eq!(JobFile::load(&yaml).unwrap().jobs.len(), 2);
    }

    #[test]
    fn test_load_missing_file() {
        assert!(matches!(
            JobFile::load(Path::new("/nonexistent/jobs.json")),
            Err(SplitError::Io { .. })
        ));
    }
}
