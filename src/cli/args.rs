//! CLI argument structures

use crate::config::{JobConfig, SettingsLoader, SettingsOverrides};
use crate::error::Result;
use clap::Parser;
use std::ffi::OsString;
use std::path::PathBuf;

/// Count the words of a text corpus, rewriting it with replacement dictionaries first
#[derive(Parser, Debug, Clone)]
#[command(name = "wordcount-replace")]
#[command(about = "Count words after applying a replacement dictionary", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Enable verbose output (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Replacement dictionary with one `<source> <target>` rule per line (repeatable)
    #[arg(long = "replace", value_name = "DICTIONARY")]
    pub replace: Vec<PathBuf>,

    /// TOML file with job settings
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Map workers to run at the same time
    #[arg(short = 'j', long = "workers", value_name = "N")]
    pub workers: Option<usize>,

    /// Number of reducers (and output part files)
    #[arg(short = 'r', long = "reducers", value_name = "N")]
    pub reducers: Option<usize>,

    /// Report progress every N records per worker
    #[arg(long, value_name = "N")]
    pub progress_interval: Option<u64>,

    /// Split input files into chunks of at most N lines
    #[arg(long, value_name = "N")]
    pub lines_per_split: Option<usize>,

    /// Name reported in logs and in the job summary
    #[arg(long, value_name = "NAME")]
    pub job_name: Option<String>,

    /// Skip map-side combining
    #[arg(long)]
    pub no_combine: bool,

    /// Print the job summary as JSON on stdout
    #[arg(long)]
    pub json: bool,

    /// Input file or directory
    pub input: PathBuf,

    /// Output directory; must not exist
    pub output: PathBuf,
}

/// Rewrite the single-dash `-replace <path>` form to `--replace <path>`
///
/// Arguments after a bare `--` are left alone.
pub fn normalize_legacy_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut after_separator = false;
    args.into_iter()
        .map(Into::into)
        .map(|arg| {
            if after_separator {
                return arg;
            }
            match arg.to_str() {
                Some("--") => {
                    after_separator = true;
                    arg
                }
                Some("-replace") => OsString::from("--replace"),
                Some(value) if value.starts_with("-replace=") => {
                    OsString::from(format!("-{}", value))
                }
                _ => arg,
            }
        })
        .collect()
}

impl Cli {
    /// Settings given as flags
    pub fn overrides(&self) -> SettingsOverrides {
        SettingsOverrides {
            job_name: self.job_name.clone(),
            num_workers: self.workers,
            num_reducers: self.reducers,
            progress_interval: self.progress_interval,
            lines_per_split: self.lines_per_split,
            combine: self.no_combine.then_some(false),
        }
    }

    /// Build the job, layering the settings file, the environment and the flags
    pub fn into_job_config(self) -> Result<JobConfig> {
        self.into_job_config_with_env(|key| std::env::var(key).ok())
    }

    pub fn into_job_config_with_env<F>(self, lookup: F) -> Result<JobConfig>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut loader = SettingsLoader::new();
        if let Some(path) = &self.config {
            loader = loader.load_file(path)?;
        }
        let settings = loader
            .merge_env_from(lookup)?
            .apply_overrides(&self.overrides())
            .finish();

        let job = JobConfig {
            input_path: self.input,
            output_path: self.output,
            replacement_files: self.replace,
            settings,
        };
        job.validate()?;
        Ok(job)
    }
}
