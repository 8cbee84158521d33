//! # wordcount-replace
//!
//! Counts the words of a text corpus after rewriting every line with one or
//! more replacement dictionaries, as a map/reduce job run on the local
//! machine.
//!
//! ## Usage
//!
//! ```bash
//! wordcount-replace [--replace <dictionary>]... <input> <output>
//! ```
//!
//! ## Modules
//!
//! - `dictionary` - Replacement rules, dictionary file parsing and the replacement table
//! - `pipeline` - The map function (substitute, tokenize, emit) and the summing reducer
//! - `engine` - Record sources, sinks, shuffle and the local job runner
//! - `config` - Job settings layered from defaults, TOML, environment and flags
//! - `error` - Error types with codes and process exit codes
//! - `app` - Logging, interrupt handling and fatal error reporting
//! - `cli` - Command line parsing
pub mod app;
pub mod cli;
pub mod config;
pub mod dictionary;
pub mod engine;
pub mod error;
pub mod pipeline;

pub use config::{JobConfig, JobSettings};
pub use dictionary::{ReplacementRule, ReplacementTable};
pub use engine::{count_lines, JobSummary, LocalJobRunner};
pub use error::{Result, WordCountError};
pub use pipeline::{aggregate, transform_and_emit, WordCount};
