use super::JobSettings;
use crate::error::{ErrorCode, ErrorExt, Result, WordCountError};
use std::fs;
use std::path::Path;
use std::str::FromStr;
use tracing::debug;

/// Values given on the command line; `None` keeps the lower layer's value
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsOverrides {
    pub job_name: Option<String>,
    pub num_workers: Option<usize>,
    pub num_reducers: Option<usize>,
    pub progress_interval: Option<u64>,
    pub lines_per_split: Option<usize>,
    pub combine: Option<bool>,
}

/// Builds [`JobSettings`] from defaults, a settings file, the environment and
/// command line overrides, in that order of increasing precedence
#[derive(Debug, Clone, Default)]
pub struct SettingsLoader {
    settings: JobSettings,
}

impl SettingsLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the current settings with the ones in a TOML file
    ///
    /// Keys missing from the file take their default value.
    pub fn load_file(mut self, path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(WordCountError::config_with_code(
                ErrorCode::CONFIG_NOT_FOUND,
                format!("settings file not found: {}", path.display()),
            ));
        }

        let content = fs::read_to_string(path).to_config_error(
            ErrorCode::CONFIG_GENERIC,
            format!("cannot read settings file {}", path.display()),
        )?;
        self.settings = toml::from_str(&content).to_config_error(
            ErrorCode::CONFIG_PARSE_ERROR,
            format!("cannot parse settings file {}", path.display()),
        )?;

        debug!("Loaded settings from {}", path.display());
        Ok(self)
    }

    /// Apply `WCR_*` variables from the process environment
    pub fn merge_env_vars(self) -> Result<Self> {
        self.merge_env_from(|key| std::env::var(key).ok())
    }

    /// Apply `WCR_*` variables looked up through `lookup`
    pub fn merge_env_from<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(workers) = parse_env(&lookup, "WCR_WORKERS")? {
            self.settings.num_workers = workers;
        }
        if let Some(reducers) = parse_env(&lookup, "WCR_REDUCERS")? {
            self.settings.num_reducers = reducers;
        }
        if let Some(interval) = parse_env(&lookup, "WCR_PROGRESS_INTERVAL")? {
            self.settings.progress_interval = interval;
        }
        if let Some(lines) = parse_env(&lookup, "WCR_LINES_PER_SPLIT")? {
            self.settings.lines_per_split = Some(lines);
        }
        if let Some(combine) = parse_env(&lookup, "WCR_COMBINE")? {
            self.settings.combine = combine;
        }
        if let Some(name) = lookup("WCR_JOB_NAME") {
            self.settings.job_name = name;
        }
        Ok(self)
    }

    pub fn apply_overrides(mut self, overrides: &SettingsOverrides) -> Self {
        if let Some(name) = &overrides.job_name {
            self.settings.job_name = name.clone();
        }
        if let Some(workers) = overrides.num_workers {
            self.settings.num_workers = workers;
        }
        if let Some(reducers) = overrides.num_reducers {
            self.settings.num_reducers = reducers;
        }
        if let Some(interval) = overrides.progress_interval {
            self.settings.progress_interval = interval;
        }
        if let Some(lines) = overrides.lines_per_split {
            self.settings.lines_per_split = Some(lines);
        }
        if let Some(combine) = overrides.combine {
            self.settings.combine = combine;
        }
        self
    }

    pub fn finish(self) -> JobSettings {
        self.settings
    }
}

fn parse_env<F, T>(lookup: &F, key: &str) -> Result<Option<T>>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) => raw.trim().parse().map(Some).map_err(|_| {
            WordCountError::config_with_code(
                ErrorCode::CONFIG_INVALID_ENV,
                format!("{} has an invalid value: {:?}", key, raw),
            )
        }),
    }
}
