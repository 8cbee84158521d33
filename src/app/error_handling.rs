//! Error handling utilities

use crate::error::WordCountError;
use tracing::error;

/// Exit code for an error that reached `main`
pub fn exit_code_for(error: &anyhow::Error) -> i32 {
    error
        .downcast_ref::<WordCountError>()
        .map(WordCountError::exit_code)
        .unwrap_or(1)
}

/// Handle fatal errors and exit with appropriate status code
///
/// - For `WordCountError`: shows the user message, and the full error chain
///   when `verbose >= 1`
/// - For other errors: shows the error and, in verbose mode, its causes
pub fn handle_fatal_error(error: anyhow::Error, verbose: u8) -> ! {
    if let Some(err) = error.downcast_ref::<WordCountError>() {
        error!(code = err.code(), path = ?err.path(), "Fatal error: {}", err);
        eprintln!("{}", err.user_message());
        if verbose >= 1 {
            eprintln!("\nContext Chain:\n{}", err.developer_message());
        }
    } else {
        error!("Fatal error: {}", error);
        eprintln!("Error: {error}");
        if verbose >= 1 {
            eprintln!("\nError chain:");
            for (i, cause) in error.chain().enumerate() {
                eprintln!("  {}: {}", i, cause);
            }
        }
    }

    std::process::exit(exit_code_for(&error))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn test_exit_code_for_word_count_error() {
        let err = anyhow::Error::new(WordCountError::output(
            ErrorCode::OUTPUT_ALREADY_EXISTS,
            "output directory already exists",
            "out",
        ));
        assert_eq!(exit_code_for(&err), 5);
        assert_eq!(exit_code_for(&anyhow::Error::new(WordCountError::interrupted())), 130);
    }

    #[test]
    fn test_exit_code_for_context_wrapped_error() {
        let err = anyhow::Error::new(WordCountError::config("bad")).context("while starting");
        assert_eq!(exit_code_for(&err), 2);
    }

    #[test]
    fn test_exit_code_for_other_error() {
        assert_eq!(exit_code_for(&anyhow::anyhow!("boom")), 1);
    }
}
