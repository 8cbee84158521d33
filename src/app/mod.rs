//! Application module
//!
//! Process-level concerns around a job run: logging setup, Ctrl+C handling
//! and turning fatal errors into exit codes.

pub mod config;
pub mod error_handling;
pub mod logging;
pub mod runtime;

pub use config::AppConfig;
pub use error_handling::{exit_code_for, handle_fatal_error};
pub use logging::init_logging;
pub use runtime::{initialize_app, run_job, run_until_interrupted};
