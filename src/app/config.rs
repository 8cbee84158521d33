//! Application configuration
//!
//! Settings of the process itself, as opposed to the job it runs.

/// Application configuration structure
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    /// Verbosity level for logging
    pub verbose: u8,
    /// Print the job summary as JSON on stdout
    pub json_summary: bool,
}

impl AppConfig {
    pub fn new(verbose: u8) -> Self {
        Self {
            verbose,
            json_summary: false,
        }
    }

    pub fn with_json_summary(mut self, enabled: bool) -> Self {
        self.json_summary = enabled;
        self
    }

    /// Get the log level string based on verbosity
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_follows_verbosity() {
        assert_eq!(AppConfig::new(0).log_level(), "info");
        assert_eq!(AppConfig::new(1).log_level(), "debug");
        assert_eq!(AppConfig::new(2).log_level(), "trace");
        assert_eq!(AppConfig::new(7).log_level(), "trace");
    }

    #[test]
    fn test_json_summary_flag() {
        assert!(!AppConfig::default().json_summary);
        assert!(AppConfig::new(0).with_json_summary(true).json_summary);
    }
}
