//! Progress accounting for a tile run.
//!
//! The dispatcher records every completed tile here. A summary line is due every
//! `update_interval` completions and always on the final one, which keeps console
//! output proportional to the plan size rather than to wall-clock time.

use std::time::{Duration, Instant};

use super::config::DEFAULT_PROGRESS_INTERVAL;

/// Completion counters for a single run.
#[derive(Debug, Clone)]
pub struct ProgressState {
    /// Tiles with a recorded outcome.
    pub completed: u64,
    /// Tiles that ended successfully.
    pub succeeded: u64,
    /// Tiles that exhausted their attempts.
    pub failed: u64,
    /// Tiles planned for this run.
    pub total: u64,
    /// Completions between summaries.
    pub update_interval: u64,
    /// When the run started.
    pub start_time: Instant,
}

impl ProgressState {
    /// Create a tracker for `total` planned tiles with the default interval.
    pub fn new(total: u64) -> Self {
        Self::with_interval(total, DEFAULT_PROGRESS_INTERVAL)
    }

    /// Create a tracker emitting every `update_interval` completions (minimum 1).
    pub fn with_interval(total: u64, update_interval: u64) -> Self {
        Self {
            completed: 0,
            succeeded: 0,
            failed: 0,
            total,
            update_interval: update_interval.max(1),
            start_time: Instant::now(),
        }
    }

    /// Record one completed tile.
    pub fn record(&mut self, success: bool) {
        self.completed = self.completed.saturating_add(1);
        if success {
            self.succeeded += 1;
        } else {
            self.failed += 1;
        }
    }

    /// Whether the latest completion should produce a summary line.
    pub fn should_emit_update(&self) -> bool {
        self.completed > 0
            && (self.completed % self.update_interval == 0 || self.is_finished())
    }

    /// Whether every planned tile has an outcome.
    pub fn is_finished(&self) -> bool {
        self.completed >= self.total
    }

    /// Completion percentage (0-100). An empty plan is 100% complete.
    pub fn percentage(&self) -> f64 {
        if self.total == 0 {
            return 100.0;
        }
        self.completed as f64 / self.total as f64 * 100.0
    }

    /// Completions per second since the run started.
    pub fn rate(&self) -> f64 {
        let elapsed = self.start_time.elapsed().as_secs_f64();
        if elapsed > 0.0 {
            self.completed as f64 / elapsed
        } else {
            0.0
        }
    }

    /// Time since the run started.
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Human-readable progress string for logging.
    pub fn format_progress(&self) -> String {
        format!(
            "Progress: {}/{} ({:.1}%)",
            self.completed,
            self.total,
            self.percentage()
        )
    }
}

/// Format a duration as `42s`, `3m` or `1.5h`.
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    if secs < 60 {
        format!("{secs}s")
    } else if secs < 3600 {
        format!("{}m", secs / 60)
    } else {
        format!("{:.1}h", secs as f64 / 3600.0)
    }
}
