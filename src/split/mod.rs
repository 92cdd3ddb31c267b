//! Running split jobs.
//!
//! Every sheet is one unit of work: decode, classify, plan, then write. The
//! sheets of a job are spread over a rayon pool and their [`SplitStats`] are
//! reduced into the job total. A failing sheet or sprite is counted and
//! logged; it never stops the rest of the job.

mod folders;
mod stats;

use std::path::{Path, PathBuf};
use std::sync::PoisonError;
use std::time::Instant;

use rayon::prelude::*;

use crate::codec::{self, DecodedSheet};
use crate::config::ResolvedJob;
use crate::discovery::collect_sheets;
use crate::error::Result;
use crate::output::{display_path, plural, Printer};
use crate::sheet::{self, SheetClassifier};

pub use folders::{prepare_folder, FolderClaim, FolderLocks};
pub use stats::SplitStats;

/// Splits sheets on a worker pool.
#[derive(Debug, Clone)]
pub struct Splitter {
    printer: Printer,
    threads: usize,
}

impl Splitter {
    pub fn new(printer: Printer) -> Self {
        Self { printer, threads: 0 }
    }

    /// Number of worker threads; 0 lets rayon decide.
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    /// Find the job's sheets and split them.
    pub fn run_job(&self, job: &ResolvedJob) -> Result<SplitStats> {
        let sheets = collect_sheets(&job.input, job.recursive, job.cap)?;
        self.printer.status(
            "Splitting",
            &format!(
                "{} from {} into {}",
                plural(sheets.len(), "sheet", "sheets"),
                display_path(&job.input),
                display_path(&job.output)
            ),
        );

        let started = Instant::now();
        let stats = self.process(&sheets, job);
        self.printer.success(
            "Finished",
            &format!("{} in {:.2}s", stats, started.elapsed().as_secs_f64()),
        );

        Ok(stats)
    }

    /// Split `sheets` in parallel and return the merged stats.
    pub fn process(&self, sheets: &[PathBuf], job: &ResolvedJob) -> SplitStats {
        let classifier = SheetClassifier::new(job.ground_pattern.clone());
        let folders = FolderLocks::default();

        let work = || {
            sheets
                .par_iter()
                .map(|path| self.split_sheet(path, job, &classifier, &folders))
                .reduce(SplitStats::default, SplitStats::merge)
        };

        match rayon::ThreadPoolBuilder::new().num_threads(self.threads).build() {
            Ok(pool) => pool.install(work),
            Err(e) => {
                self.printer.warning("Warning", &format!("using the global thread pool: {}", e));
                work()
            }
        }
    }

    fn split_sheet(
        &self,
        path: &Path,
        job: &ResolvedJob,
        classifier: &SheetClassifier,
        folders: &FolderLocks,
    ) -> SplitStats {
        let display = display_path(path);

        let sheet = match DecodedSheet::open(path) {
            Ok(sheet) => sheet,
            Err(e) => {
                self.printer.error("Failed", &e.to_string());
                return SplitStats::load_error();
            }
        };

        let (kind, grid) = match classifier.classify(sheet.width(), sheet.height(), &sheet.file_name()) {
            Ok(found) => found,
            Err(e) => {
                self.printer.error("Failed", &format!("{}: {}", display, e));
                return SplitStats::load_error();
            }
        };
        self.printer.verbose(
            "Classified",
            &format!(
                "{} as {} sheet ({}x{} of {}px)",
                display, kind, grid.column_count, grid.row_count, grid.sprite_size
            ),
        );

        let plan = sheet::plan_sheet(sheet.pixels(), kind, &grid, job.index_policy);
        if plan.skipped > 0 {
            self.printer.verbose(
                "Skipping",
                &format!("{} transparent in {}", plural(plan.skipped, "slot", "slots"), display),
            );
        }
        let mut stats = SplitStats {
            skipped: plan.skipped,
            ..SplitStats::default()
        };

        let folder = if job.use_sub_folders {
            job.output.join(sheet::folder_name(path, kind))
        } else {
            job.output.clone()
        };

        // Shared-folder mode never cleans, so only sub-folders need the lock.
        let claim = job.use_sub_folders.then(|| folders.claim(&folder));
        let _guard = claim.as_ref().map(|claim| {
            if claim.reused {
                self.printer.warning(
                    "Reusing",
                    &format!("{} replaces earlier output in {}", display, display_path(&folder)),
                );
            }
            claim.mutex.lock().unwrap_or_else(PoisonError::into_inner)
        });

        if let Err(e) = prepare_folder(&folder, job.use_sub_folders) {
            self.printer.error("Failed", &e.to_string());
            stats.save_errors += plan.sprites.len();
            return stats;
        }

        for sprite in &plan.sprites {
            let target = folder.join(&sprite.file_name);
            match codec::write_sprite(&sprite.image, &sheet.state, &target) {
                Ok(()) => stats.success += 1,
                Err(e) => {
                    self.printer.error("Failed", &e.to_string());
                    stats.save_errors += 1;
                }
            }
        }

        self.printer.status(
            "Split",
            &format!(
                "{} {} {} ({}, {} skipped)",
                display,
                self.printer.dim("->"),
                display_path(&folder),
                plural(stats.success, "sprite", "sprites"),
                stats.skipped
            ),
        );

        stats
    }
}
