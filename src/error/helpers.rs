use super::{ErrorCode, WordCountError};
use std::path::Path;

/// Extension trait for convenient error conversion
pub trait ErrorExt<T> {
    /// Convert to a configuration error
    fn to_config_error(self, code: u16, message: impl Into<String>) -> Result<T, WordCountError>;

    /// Convert to a dictionary read error for `path`
    fn to_dictionary_error(self, path: &Path) -> Result<T, WordCountError>;

    /// Convert to an input read error for `path`
    fn to_input_error(self, path: &Path) -> Result<T, WordCountError>;

    /// Convert to an output write error for `path`
    fn to_output_error(self, path: &Path) -> Result<T, WordCountError>;
}

impl<T, E> ErrorExt<T> for Result<T, E>
where
    E: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    fn to_config_error(self, code: u16, message: impl Into<String>) -> Result<T, WordCountError> {
        self.map_err(|e| WordCountError::config_with_code(code, message).with_source(e))
    }

    fn to_dictionary_error(self, path: &Path) -> Result<T, WordCountError> {
        self.map_err(|e| {
            WordCountError::dictionary(
                ErrorCode::DICTIONARY_READ_FAILED,
                "failed to read replacement file",
                path,
            )
            .with_source(e)
        })
    }

    fn to_input_error(self, path: &Path) -> Result<T, WordCountError> {
        self.map_err(|e| {
            WordCountError::input(ErrorCode::INPUT_READ_FAILED, "failed to read input", path)
                .with_source(e)
        })
    }

    fn to_output_error(self, path: &Path) -> Result<T, WordCountError> {
        self.map_err(|e| {
            WordCountError::output(ErrorCode::OUTPUT_WRITE_FAILED, "failed to write output", path)
                .with_source(e)
        })
    }
}
