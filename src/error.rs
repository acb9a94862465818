//! Error types for the drill.
//!
//! `InputError` values are recoverable: their `Display` text is the message
//! shown to the user before the same prompt is asked again.

use thiserror::Error;

/// A line of user input that could not be accepted at the current prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InputError {
    /// Menu selection outside 1-7.
    #[error("Please enter a number between 1 and 7.")]
    InvalidMenuChoice,

    /// An answer that is not a whole number.
    #[error("Please enter a whole number (or type 'q' to quit).")]
    InvalidNumericInput,

    /// A lower bound that is not a whole number.
    #[error("Please enter a whole number, or press Enter to accept the default.")]
    InvalidBound,

    /// A lower bound below zero.
    #[error("Please enter a non-negative integer.")]
    NegativeBound,
}

/// Raised when a question pool would contain two items with the same tag.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PoolError {
    #[error("duplicate question tag: {0}")]
    DuplicateTag(String),
}

/// Failures that end the program with a non-zero exit code.
#[derive(Debug, Error)]
pub enum AppError {
    /// The terminal front-end could not be set up.
    #[error("terminal error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Pool(#[from] PoolError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_error_messages_are_user_facing() {
        assert_eq!(
            InputError::InvalidMenuChoice.to_string(),
            "Please enter a number between 1 and 7."
        );
        assert_eq!(
            InputError::NegativeBound.to_string(),
            "Please enter a non-negative integer."
        );
        assert!(InputError::InvalidNumericInput.to_string().contains("'q'"));
    }

    #[test]
    fn test_pool_error_converts_into_app_error() {
        let err: AppError = PoolError::DuplicateTag("3^2".to_string()).into();
        assert_eq!(err.to_string(), "duplicate question tag: 3^2");
    }
}
