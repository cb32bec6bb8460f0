// Error types for libero

use snafu::Snafu;
use std::io;

#[derive(Debug, Snafu)]
pub enum LiberoError {
    // Session store errors
    #[snafu(display("No active training session"))]
    NoActiveSession,
    #[snafu(display("Training session not found: {id}"))]
    SessionNotFound { id: String },
    #[snafu(display("Action not found in the current session: {id}"))]
    ActionNotFound { id: String },

    // Import errors
    #[snafu(display("Invalid session JSON"))]
    InvalidSessionJson { source: serde_json::Error },

    // User input validation errors
    #[snafu(display("Invalid court zone {zone}, expected a value between 1 and 6"))]
    InvalidZone { zone: u8 },
    #[snafu(display("Invalid user input: {field} - {reason}"))]
    InvalidUserInput { field: String, reason: String },

    // Storage errors
    #[snafu(display("Could not find application data directory to store sessions"))]
    NoDataDir,
    #[snafu(display("Error reading or writing the session store"))]
    StorageIOError { source: io::Error },
    #[snafu(display("Error serializing the session store"))]
    StorageSerializeError { source: serde_json::Error },
    #[snafu(display("File operation failed: {operation} - {reason}"))]
    FileOperationError { operation: String, reason: String },

    // Config management errors
    #[snafu(display("Could not find application config directory"))]
    NoConfigDir,
    #[snafu(display("Error reading or writing config file"))]
    ConfigIOError { source: io::Error },
    #[snafu(display("Error serializing config file"))]
    ConfigSerializeError { source: serde_json::Error },
}

impl LiberoError {
    /// Whether the error only means "nothing to operate on", which the plain
    /// store methods swallow.
    pub fn is_missing_target(&self) -> bool {
        matches!(
            self,
            LiberoError::NoActiveSession
                | LiberoError::SessionNotFound { .. }
                | LiberoError::ActionNotFound { .. }
        )
    }
}
