//! Error types for tone generation and WAV encoding.

use thiserror::Error;

/// Result type for tonewav operations.
pub type ToneResult<T> = Result<T, ToneError>;

/// Errors that can occur while synthesizing, encoding or writing a tone.
#[derive(Debug, Error)]
pub enum ToneError {
    /// A sample or container buffer could not be allocated.
    #[error("failed to allocate {bytes} bytes")]
    Allocation {
        /// Requested buffer size in bytes.
        bytes: usize,
    },

    /// I/O error from the storage sink, including short writes.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid generation or format parameter.
    #[error("invalid parameter '{name}': {message}")]
    InvalidParameter {
        /// Parameter name.
        name: String,
        /// Error message.
        message: String,
    },

    /// Header bytes that do not describe a canonical PCM container.
    #[error("malformed WAV header at offset {offset}: {message}")]
    MalformedHeader {
        /// Byte offset of the offending field.
        offset: usize,
        /// Error message.
        message: String,
    },
}

impl ToneError {
    /// Creates an invalid parameter error.
    pub fn invalid_param(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Creates a malformed header error.
    pub fn malformed(offset: usize, message: impl Into<String>) -> Self {
        Self::MalformedHeader {
            offset,
            message: message.into(),
        }
    }

    /// Stable error code for reporting.
    pub fn code(&self) -> &'static str {
        match self {
            ToneError::Allocation { .. } => "TONE_001",
            ToneError::Io(_) => "TONE_002",
            ToneError::InvalidParameter { .. } => "TONE_003",
            ToneError::MalformedHeader { .. } => "TONE_004",
        }
    }

    /// Error category for grouping related errors.
    pub fn category(&self) -> &'static str {
        "tonewav"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_param_helper() {
        let err = ToneError::invalid_param("frequency", "must be positive");
        assert!(err.to_string().contains("frequency"));
        assert!(err.to_string().contains("must be positive"));
        assert_eq!(err.code(), "TONE_003");
    }

    #[test]
    fn test_malformed_helper() {
        let err = ToneError::malformed(36, "expected 'data'");
        assert!(err.to_string().contains("offset 36"));
        assert_eq!(err.code(), "TONE_004");
        assert_eq!(err.category(), "tonewav");
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::WriteZero, "short write");
        let err: ToneError = io.into();
        assert!(matches!(err, ToneError::Io(_)));
        assert_eq!(err.code(), "TONE_002");
    }
}
