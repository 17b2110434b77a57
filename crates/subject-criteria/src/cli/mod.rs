//! CLI functionality for the subject-criteria tool
//!
//! This module contains all CLI-related functionality including:
//! - Criteria and configuration loading
//! - Subject verification and selection
//! - SQL compilation without a database
//! - Field catalog listing
//! - Output formatting

pub mod compile;
pub mod fields;
pub mod input;
pub mod output;
pub mod select;
pub mod verify;

use tracing_subscriber::EnvFilter;

/// Install the stderr log subscriber
///
/// `RUST_LOG` wins when set; otherwise `subject_criteria=info`, or `debug`
/// with `--verbose`.
pub fn init_tracing(verbose: bool) {
    let default = if verbose {
        "subject_criteria=debug"
    } else {
        "subject_criteria=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
