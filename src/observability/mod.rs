//! Structured logging through `tracing`.
//!
//! Every state transition is instrumented with `tracing` spans and events. This
//! module installs the subscriber that turns them into log lines.
//!
//! # Configuration
//!
//! Level is controlled via:
//! 1. `RUST_LOG` environment variable (highest priority)
//! 2. `trace_level` config option
//! 3. Default: `"info"`
//!
//! # Features
//!
//! - **Stderr by default**: stdout stays reserved for view model output
//! - **File output**: set `log_file` to write plain-text logs to disk
//! - **Automatic Rotation**: files rotate at 10MB with 3-backup retention
//!
//! # Modules
//!
//! - [`init`]: Subscriber setup
//! - [`file_writer`]: Rotating file writer with size-based rotation

mod file_writer;
mod init;

pub use file_writer::FileWriter;
pub use init::init_tracing;
