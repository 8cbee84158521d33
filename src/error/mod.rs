use std::fmt::Display;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub mod codes;
pub mod helpers;

pub use codes::{describe_error_code, ErrorCode};
pub use helpers::ErrorExt;

/// Fatal errors raised by the dictionary loader, the engine and the job setup
///
/// Malformed dictionary lines are not represented here: they are reported as
/// [`crate::dictionary::ParseWarning`] and never abort a job.
#[derive(Error, Debug)]
pub enum WordCountError {
    #[error("[E{code:04}] Configuration error: {message}")]
    Config {
        code: u16,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("[E{code:04}] Dictionary error: {message}")]
    Dictionary {
        code: u16,
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("[E{code:04}] Input error: {message}")]
    Input {
        code: u16,
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("[E{code:04}] Output error: {message}")]
    Output {
        code: u16,
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("[E{code:04}] Execution error: {message}")]
    Execution {
        code: u16,
        message: String,
        worker_id: Option<usize>,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("[E{code:04}] Validation error: {message}")]
    Validation {
        code: u16,
        message: String,
        field: Option<String>,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl WordCountError {
    /// Create a configuration error with default code
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            code: ErrorCode::CONFIG_GENERIC,
            message: message.into(),
            source: None,
        }
    }

    /// Create a configuration error with specific code
    pub fn config_with_code(code: u16, message: impl Into<String>) -> Self {
        Self::Config {
            code,
            message: message.into(),
            source: None,
        }
    }

    /// Create a dictionary error for the given file
    pub fn dictionary(code: u16, message: impl Into<String>, path: impl AsRef<Path>) -> Self {
        Self::Dictionary {
            code,
            message: message.into(),
            path: Some(path.as_ref().to_path_buf()),
            source: None,
        }
    }

    /// Create an input error for the given path
    pub fn input(code: u16, message: impl Into<String>, path: impl AsRef<Path>) -> Self {
        Self::Input {
            code,
            message: message.into(),
            path: Some(path.as_ref().to_path_buf()),
            source: None,
        }
    }

    /// Create an output error for the given path
    pub fn output(code: u16, message: impl Into<String>, path: impl AsRef<Path>) -> Self {
        Self::Output {
            code,
            message: message.into(),
            path: Some(path.as_ref().to_path_buf()),
            source: None,
        }
    }

    /// Create an execution error with default code
    pub fn execution(message: impl Into<String>) -> Self {
        Self::Execution {
            code: ErrorCode::EXEC_GENERIC,
            message: message.into(),
            worker_id: None,
            source: None,
        }
    }

    /// Create an execution error with specific code and worker
    pub fn execution_with_code(
        code: u16,
        message: impl Into<String>,
        worker_id: Option<usize>,
    ) -> Self {
        Self::Execution {
            code,
            message: message.into(),
            worker_id,
            source: None,
        }
    }

    /// Create the error reported when the job is interrupted by a signal
    pub fn interrupted() -> Self {
        Self::execution_with_code(ErrorCode::EXEC_INTERRUPTED, "interrupted by signal", None)
    }

    /// Create a validation error with specific field
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            code: ErrorCode::VALIDATION_GENERIC,
            message: message.into(),
            field: Some(field.into()),
            source: None,
        }
    }

    /// Add a source error to this error
    pub fn with_source(
        mut self,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        match &mut self {
            Self::Config { source: src, .. }
            | Self::Dictionary { source: src, .. }
            | Self::Input { source: src, .. }
            | Self::Output { source: src, .. }
            | Self::Execution { source: src, .. }
            | Self::Validation { source: src, .. } => {
                *src = Some(source.into());
            }
        }
        self
    }

    /// Add context to the error message
    pub fn with_context(mut self, context: impl Display) -> Self {
        match &mut self {
            Self::Config { message, .. }
            | Self::Dictionary { message, .. }
            | Self::Input { message, .. }
            | Self::Output { message, .. }
            | Self::Execution { message, .. }
            | Self::Validation { message, .. } => {
                *message = format!("{}: {}", message, context);
            }
        }
        self
    }

    /// Get the process exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config { .. } => 2,
            Self::Dictionary { .. } => 3,
            Self::Input { .. } => 4,
            Self::Output { .. } => 5,
            Self::Execution { code, .. } if *code == ErrorCode::EXEC_INTERRUPTED => 130,
            Self::Execution { .. } => 6,
            Self::Validation { .. } => 7,
        }
    }

    /// Get the error code
    pub fn code(&self) -> u16 {
        match self {
            Self::Config { code, .. }
            | Self::Dictionary { code, .. }
            | Self::Input { code, .. }
            | Self::Output { code, .. }
            | Self::Execution { code, .. }
            | Self::Validation { code, .. } => *code,
        }
    }

    /// Path the error refers to, if any
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Dictionary { path, .. }
            | Self::Input { path, .. }
            | Self::Output { path, .. } => path.as_deref(),
            _ => None,
        }
    }

    /// Get a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            Self::Config { message, .. } => format!("Configuration problem: {}", message),
            Self::Dictionary { message, path, .. } => match path {
                Some(p) => format!("Replacement dictionary {}: {}", p.display(), message),
                None => format!("Replacement dictionary: {}", message),
            },
            Self::Input { message, path, .. } => match path {
                Some(p) => format!("Input {}: {}", p.display(), message),
                None => format!("Input error: {}", message),
            },
            Self::Output { message, path, .. } => match path {
                Some(p) => format!("Output {}: {}", p.display(), message),
                None => format!("Output error: {}", message),
            },
            Self::Execution {
                message, worker_id, ..
            } => match worker_id {
                Some(id) => format!("Worker {} failed: {}", id, message),
                None => format!("Job failed: {}", message),
            },
            Self::Validation { message, field, .. } => match field {
                Some(f) => format!("Invalid value for '{}': {}", f, message),
                None => format!("Validation error: {}", message),
            },
        }
    }

    /// Get a developer-friendly error message with full chain
    pub fn developer_message(&self) -> String {
        let mut msg = self.to_string();
        let mut source = std::error::Error::source(self);
        while let Some(cause) = source {
            msg.push_str(&format!("\n  caused by: {}", cause));
            source = std::error::Error::source(cause);
        }
        msg
    }
}

/// Type alias for Results using WordCountError
pub type Result<T> = std::result::Result<T, WordCountError>;
