//! Command-line interface

pub mod download;
pub mod error;
pub mod progress;

pub use download::{Cli, OutputFormat};
pub use error::CliError;
pub use progress::SuspendingStderr;
