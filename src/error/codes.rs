/// Error code registry for wordcount-replace
///
/// Error codes are organized by category:
/// - 1000-1999: Configuration errors
/// - 2000-2999: Dictionary errors
/// - 3000-3999: Input errors
/// - 4000-4999: Output errors
/// - 5000-5999: Execution errors
/// - 7000-7999: Validation errors
pub struct ErrorCode;

impl ErrorCode {
    // Configuration errors (1000-1999)
    pub const CONFIG_GENERIC: u16 = 1000;
    pub const CONFIG_NOT_FOUND: u16 = 1001;
    pub const CONFIG_PARSE_ERROR: u16 = 1002;
    pub const CONFIG_INVALID_ENV: u16 = 1004;

    // Dictionary errors (2000-2999)
    pub const DICTIONARY_NOT_FOUND: u16 = 2001;
    pub const DICTIONARY_READ_FAILED: u16 = 2002;

    // Input errors (3000-3999)
    pub const INPUT_NOT_FOUND: u16 = 3001;
    pub const INPUT_READ_FAILED: u16 = 3002;

    // Output errors (4000-4999)
    pub const OUTPUT_GENERIC: u16 = 4000;
    pub const OUTPUT_ALREADY_EXISTS: u16 = 4001;
    pub const OUTPUT_WRITE_FAILED: u16 = 4002;

    // Execution errors (5000-5999)
    pub const EXEC_GENERIC: u16 = 5000;
    pub const EXEC_WORKER_PANICKED: u16 = 5001;
    pub const EXEC_WORKER_CANCELLED: u16 = 5002;
    pub const EXEC_INTERRUPTED: u16 = 5003;

    // Validation errors (7000-7999)
    pub const VALIDATION_GENERIC: u16 = 7000;
}

/// Get a human-readable description for an error code
pub fn describe_error_code(code: u16) -> &'static str {
    match code {
        ErrorCode::CONFIG_GENERIC => "General configuration error",
        ErrorCode::CONFIG_NOT_FOUND => "Settings file not found",
        ErrorCode::CONFIG_PARSE_ERROR => "Settings file could not be parsed",
        ErrorCode::CONFIG_INVALID_ENV => "Invalid environment override",

        ErrorCode::DICTIONARY_NOT_FOUND => "Replacement dictionary not found",
        ErrorCode::DICTIONARY_READ_FAILED => "Replacement dictionary could not be read",

        ErrorCode::INPUT_NOT_FOUND => "Input path not found",
        ErrorCode::INPUT_READ_FAILED => "Input could not be read",

        ErrorCode::OUTPUT_GENERIC => "General output error",
        ErrorCode::OUTPUT_ALREADY_EXISTS => "Output directory already exists",
        ErrorCode::OUTPUT_WRITE_FAILED => "Output could not be written",

        ErrorCode::EXEC_GENERIC => "General execution error",
        ErrorCode::EXEC_WORKER_PANICKED => "Worker panicked",
        ErrorCode::EXEC_WORKER_CANCELLED => "Worker was cancelled",
        ErrorCode::EXEC_INTERRUPTED => "Job interrupted",

        ErrorCode::VALIDATION_GENERIC => "General validation error",
        _ => "Unrecognized error code",
    }
}
