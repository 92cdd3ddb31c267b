//! Split command implementation.
//!
//! Builds jobs from flags or a job file and runs them one after another.

use std::path::PathBuf;

use clap::Args;

use crate::config::{GroundPattern, Job, JobFile, DEFAULT_GROUND_LITERAL};
use crate::error::{SplitError, Result};
use crate::output::{plural, Printer};
use crate::split::{SplitStats, Splitter};

/// Split sprite sheets into one PNG per sprite
#[derive(Args, Debug)]
pub struct SplitArgs {
    /// A .png sheet, or a folder of sheets
    #[arg(required_unless_present = "config", conflicts_with = "config")]
    pub input: Option<PathBuf>,

    /// Output directory (default: the input's folder)
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Also split sheets in sub-folders
    #[arg(long, short)]
    pub recursive: bool,

    /// Stop after this many sheets of a folder
    #[arg(long = "keep-working", short = 'k', value_name = "CAP")]
    pub cap: Option<usize>,

    /// Write all sprites straight into the output directory
    #[arg(long)]
    pub single_folder: bool,

    /// Number saved sprites without gaps for skipped transparent ones
    #[arg(long)]
    pub subtract_alpha: bool,

    /// Regex literal marking ground sheets by file name
    #[arg(long, default_value = DEFAULT_GROUND_LITERAL, value_name = "LITERAL")]
    pub ground_pattern: String,

    /// Read jobs from a JSON or YAML job file
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,

    /// Worker threads (0 = one per core)
    #[arg(long, short = 'j', default_value = "0")]
    pub threads: usize,

    /// Show per-sheet classification details
    #[arg(long, short)]
    pub verbose: bool,
}

impl SplitArgs {
    fn jobs(&self) -> Result<Vec<Job>> {
        if let Some(config) = &self.config {
            return JobFile::load(config)?.into_jobs();
        }

        let input = self.input.clone().ok_or_else(|| SplitError::Config {
            message: "No input given".to_string(),
            help: Some("Pass a sheet or folder, or --config with a job file".to_string()),
        })?;

        Ok(vec![Job {
            input,
            output: self.output.clone(),
            cap: self.cap,
            recursive: self.recursive,
            use_sub_folders: !self.single_folder,
            subtract_alpha_from_index: self.subtract_alpha,
            ground_pattern: GroundPattern::from_literal(&self.ground_pattern)?,
        }])
    }
}

/// Run every job and return the combined stats.
///
/// With a single job, problems with its paths are returned as errors. In a
/// job file a broken job is reported and the remaining jobs still run.
pub fn run(args: SplitArgs) -> Result<SplitStats> {
    let printer = Printer::new().with_verbose(args.verbose);
    let jobs = args.jobs()?;
    let single = jobs.len() == 1;
    let splitter = Splitter::new(printer.clone()).with_threads(args.threads);

    let mut total = SplitStats::default();
    let mut broken = 0;

    for job in jobs {
        let outcome = job
            .resolve(&printer)
            .and_then(|resolved| splitter.run_job(&resolved));

        match outcome {
            Ok(stats) => total += stats,
            Err(e) if single => return Err(e),
            Err(e) => {
                printer.error("Failed", &e.to_string());
                broken += 1;
            }
        }
    }

    if broken > 0 {
        printer.warning("Incomplete", &format!("{} could not run", plural(broken, "job", "jobs")));
        total.load_errors += broken;
    }

    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::fs;
    use tempfile::tempdir;

    use crate::cli::{Cli, Commands};

    fn parse(argv: &[&str]) -> SplitArgs {
        match Cli::try_parse_from(argv).unwrap().command {
            Commands::Split(args) => args,
            other => panic!("expected split, got {other:?}"),
        }
    }

    #[test]
    fn test_flags_become_a_job() {
        let args = parse(&[
            "sheetsplit", "split", "sheets", "-o", "out", "-r", "-k", "4", "--single-folder",
            "--subtract-alpha", "--ground-pattern", "/floor/",
        ]);
        let jobs = args.jobs().unwrap();

        assert_eq!(jobs.len(), 1);
        let job = &jobs[0];
        assert_eq!(job.input, PathBuf::from("sheets"));
        assert_eq!(job.output, Some(PathBuf::from("out")));
        assert_eq!(job.cap, Some(4));
        assert!(job.recursive);
        assert!(!job.use_sub_folders);
        assert!(job.subtract_alpha_from_index);
        assert_eq!(job.ground_pattern.literal(), "/floor/");
    }

    #[test]
    fn test_input_or_config_required() {
        assert!(Cli::try_parse_from(["sheetsplit", "split"]).is_err());
        assert!(Cli::try_parse_from(["sheetsplit", "split", "a", "--config", "b.json"]).is_err());
    }

    #[test]
    fn test_bad_pattern_flag() {
        let args = parse(&["sheetsplit", "split", "sheets", "--ground-pattern", "ground"]);
        assert!(matches!(args.jobs(), Err(SplitError::Pattern { .. })));
    }

    #[test]
    fn test_single_job_errors_are_returned() {
        let args = parse(&["sheetsplit", "split", "/nonexistent/sheets"]);
        assert!(run(args).is_err());
    }

    #[test]
    fn test_broken_jobs_in_file_are_counted() {
        let dir = tempdir().unwrap();
        let config = dir.path().join("jobs.json");
        let out = dir.path().join("out");
        fs::write(
            &config,
            format!(
                r#"{{ "jobs": [
                    {{ "in": "/nonexistent/a", "out": "{out}" }},
                    {{ "in": "{input}", "out": "{out}" }}
                ] }}"#,
                out = out.display().to_string().replace('\\', "/"),
                input = dir.path().display().to_string().replace('\\', "/"),
            ),
        )
        .unwrap();

        let args = parse(&["sheetsplit", "split", "--config", config.to_str().unwrap()]);
        let stats = run(args).unwrap();

        assert_eq!(stats.load_errors, 1);
        assert_eq!(stats.success, 0);
    }
}
