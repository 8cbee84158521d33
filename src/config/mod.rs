//! Job configuration
//!
//! A [`JobConfig`] names the input, the output and the replacement
//! dictionaries of one run. [`JobSettings`] holds the tunables that can also
//! come from a TOML settings file or the environment; see [`SettingsLoader`].

use crate::error::{Result, WordCountError};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub mod loader;

pub use loader::{SettingsLoader, SettingsOverrides};

pub const DEFAULT_JOB_NAME: &str = "wordcountandreplace";
pub const DEFAULT_PROGRESS_INTERVAL: u64 = 100;

/// Engine tunables
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct JobSettings {
    pub job_name: String,
    /// Map workers allowed to run at the same time
    pub num_workers: usize,
    /// Number of reduce partitions, and of `part-*` output files
    pub num_reducers: usize,
    /// A worker reports progress every this many records
    pub progress_interval: u64,
    /// Cut input files into splits of at most this many lines
    pub lines_per_split: Option<usize>,
    /// Sum counts on the map side before the shuffle
    pub combine: bool,
}

impl Default for JobSettings {
    fn default() -> Self {
        Self {
            job_name: DEFAULT_JOB_NAME.to_string(),
            num_workers: std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1),
            num_reducers: 1,
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
            lines_per_split: None,
            combine: true,
        }
    }
}

impl JobSettings {
    pub fn validate(&self) -> Result<()> {
        if self.num_workers == 0 {
            return Err(WordCountError::validation("num_workers", "must be at least 1"));
        }
        if self.num_reducers == 0 {
            return Err(WordCountError::validation("num_reducers", "must be at least 1"));
        }
        if self.progress_interval == 0 {
            return Err(WordCountError::validation(
                "progress_interval",
                "must be at least 1",
            ));
        }
        if self.lines_per_split == Some(0) {
            return Err(WordCountError::validation(
                "lines_per_split",
                "must be at least 1",
            ));
        }
        Ok(())
    }
}

/// Everything one word count run needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobConfig {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    /// Dictionaries every worker loads, in override order
    pub replacement_files: Vec<PathBuf>,
    pub settings: JobSettings,
}

impl JobConfig {
    pub fn new(input_path: impl Into<PathBuf>, output_path: impl Into<PathBuf>) -> Self {
        Self {
            input_path: input_path.into(),
            output_path: output_path.into(),
            replacement_files: Vec::new(),
            settings: JobSettings::default(),
        }
    }

    pub fn with_replacement_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.replacement_files.push(path.into());
        self
    }

    pub fn with_settings(mut self, settings: JobSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Whether workers rewrite records before counting
    pub fn replaces_words(&self) -> bool {
        !self.replacement_files.is_empty()
    }

    pub fn validate(&self) -> Result<()> {
        if self.input_path.as_os_str().is_empty() {
            return Err(WordCountError::validation("input_path", "must not be empty"));
        }
        if self.output_path.as_os_str().is_empty() {
            return Err(WordCountError::validation("output_path", "must not be empty"));
        }
        if self.input_path == self.output_path {
            return Err(WordCountError::validation(
                "output_path",
                "must differ from the input path",
            ));
        }
        self.settings.validate()
    }
}

#[cfg(test)]
mod tests;
