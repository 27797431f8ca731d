//! Batch progress display for jobs running on the worker pool

use crate::dispatch::job::{JobId, JobKind};
use crate::io::configuration::PROGRESS_BAR_WIDTH;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::LazyLock;
use std::time::Duration;

static BATCH_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    let template =
        format!("[{{elapsed_precise}}] Jobs: [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{pos}}/{{len}} {{msg}}");
    ProgressStyle::default_bar()
        .template(&template)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Tracks completed jobs of a batch run
///
/// A hidden manager (quiet mode) still counts jobs so summaries stay correct.
pub struct ProgressManager {
    bar: ProgressBar,
    failed: usize,
}

impl ProgressManager {
    /// Progress display for `total` jobs
    pub fn new(total: usize) -> Self {
        let bar = ProgressBar::new(total as u64);
        bar.set_style(BATCH_STYLE.clone());
        Self { bar, failed: 0 }
    }

    /// Counter that draws nothing
    pub fn hidden(total: usize) -> Self {
        let bar = ProgressBar::hidden();
        bar.set_length(total as u64);
        Self { bar, failed: 0 }
    }

    /// Record a finished job
    pub fn complete_job(&mut self, id: JobId, kind: JobKind, elapsed: Duration, succeeded: bool) {
        if !succeeded {
            self.failed += 1;
        }
        let mark = if succeeded { "✓" } else { "✗" };
        self.bar
            .set_message(format!("{mark} {kind} {id} in {elapsed:.2?}"));
        self.bar.inc(1);
    }

    /// Jobs recorded so far
    pub fn completed(&self) -> u64 {
        self.bar.position()
    }

    /// Jobs recorded as failed
    pub const fn failed(&self) -> usize {
        self.failed
    }

    /// Close the display
    pub fn finish(&self) {
        if self.failed == 0 {
            self.bar.finish_with_message("all jobs finished");
        } else {
            self.bar
                .finish_with_message(format!("{} job(s) failed", self.failed));
        }
    }
}
