//! Terminal progress bar shared with the log output
//!
//! Log lines and the progress bar both go to stderr. Every log write goes through
//! [`SuspendingStderr`], which clears the bars, writes the line, and redraws them,
//! so warnings never land in the middle of a bar.

use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use once_cell::sync::Lazy;
use std::io::{self, Write};

/// Process-wide container for every progress bar drawn on stderr
pub static PROGRESS: Lazy<MultiProgress> = Lazy::new(MultiProgress::new);

/// Stderr writer that suspends the progress bars while a log line is written.
///
/// Pass it to `tracing_subscriber::fmt().with_writer(|| SuspendingStderr)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SuspendingStderr;

impl Write for SuspendingStderr {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        PROGRESS.suspend(|| io::stderr().write_all(buf))?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stderr().flush()
    }
}

/// Create a styled tile progress bar registered with [`PROGRESS`]
pub fn create_progress_bar(total: u64) -> ProgressBar {
    let pb = PROGRESS.add(ProgressBar::new(total));
    // Template is a literal; a parse failure would leave the default style
    if let Ok(style) = ProgressStyle::default_bar().template(
        "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}",
    ) {
        pb.set_style(style.progress_chars("#>-"));
    }
    pb.set_message("Downloading tiles");
    pb
}
