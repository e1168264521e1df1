use std::time::Duration;

use chrono::Local;
use indicatif::{ProgressBar, ProgressStyle};

/// Visual progress for a dump run.
///
/// Cheap to clone; the dispatcher updates the message while the collector
/// advances the bar.
#[derive(Clone)]
pub struct ProgressMonitor {
    overall: ProgressBar,
    enabled: bool,
}

impl ProgressMonitor {
    /// * `total_fetches` - tasks × formats
    /// * `enabled` - hidden bar when false
    pub fn new(total_fetches: usize, enabled: bool) -> Self {
        if !enabled {
            return Self {
                overall: ProgressBar::hidden(),
                enabled: false,
            };
        }

        let overall = ProgressBar::new(total_fetches as u64);
        let style = ProgressStyle::default_bar()
            .template(
                "[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} fetches ({percent}%) {msg}",
            )
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▓▒░  ");
        overall.set_style(style);
        overall.set_message("Starting...");

        Self {
            overall,
            enabled: true,
        }
    }

    /// Called after task `index` (1-based) of `total` was dispatched.
    pub fn dispatched(&self, index: usize, total: usize, time_between: Duration) {
        if !self.enabled {
            return;
        }
        self.overall
            .set_message(dispatch_message(index, total, time_between, Local::now()));
    }

    pub fn completed(&self) {
        if self.enabled {
            self.overall.inc(1);
        }
    }

    pub fn finish(&self, failed: usize) {
        if !self.enabled {
            return;
        }
        let msg = if failed == 0 {
            "✅ All fetches completed".to_string()
        } else {
            format!("❌ {failed} fetches failed")
        };
        self.overall.finish_with_message(msg);
    }
}

fn dispatch_message(
    index: usize,
    total: usize,
    time_between: Duration,
    now: chrono::DateTime<Local>,
) -> String {
    let remaining = total.saturating_sub(index) as u32;
    let eta = now
        + chrono::Duration::from_std(time_between * remaining)
            .unwrap_or_else(|_| chrono::Duration::zero());
    let percent = if total == 0 {
        100.0
    } else {
        100.0 * index as f64 / total as f64
    };
    format!(
        "{index}/{total} dispatched == {percent:.2}% >> last dispatch @{}",
        eta.format("%H:%M:%S")
    )
}
