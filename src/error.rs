//! Error types for the sqz-unpack library

use std::io;
use thiserror::Error;

/// Main error type for unpacking operations
#[derive(Debug, Error)]
pub enum SqzError {
    /// IO error occurred while opening or reading the source
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// The stream ended before a required field could be read
    #[error("Truncated stream: {0}")]
    Truncated(String),

    /// An LZW codeword refers to a dictionary slot that cannot exist yet
    #[error("Malformed LZW dictionary reference: code {code:#X} with dictionary size {dict_size:#X}")]
    MalformedDictionaryReference { code: u16, dict_size: usize },

    /// A DIET back-reference points outside the bytes produced so far
    #[error("Malformed back-reference: offset {offset} at output position {position}")]
    MalformedBackReference { offset: i16, position: usize },

    /// The serialized Huffman tree references a node it does not contain
    #[error("Invalid Huffman tree: {0}")]
    InvalidHuffmanTree(String),

    /// Decoded length differs from the header (strict mode only)
    #[error("Payload size mismatch: header declares {expected} bytes, decoded {actual}")]
    PayloadSizeMismatch { expected: usize, actual: usize },

    /// A named resource does not exist in the data directory
    #[error("Resource not found: {0}")]
    ResourceNotFound(String),
}

/// Result type alias for unpacking operations
pub type Result<T> = std::result::Result<T, SqzError>;

impl SqzError {
    /// Map a failed read of `what` to [`SqzError::Truncated`] on end-of-stream,
    /// keeping every other I/O failure as [`SqzError::Io`].
    pub(crate) fn from_read(err: io::Error, what: &str) -> Self {
        if err.kind() == io::ErrorKind::UnexpectedEof {
            SqzError::Truncated(format!("unexpected end of stream while reading {what}"))
        } else {
            SqzError::Io(err)
        }
    }

    /// `true` when the source itself is missing (file absent).
    pub fn is_not_found(&self) -> bool {
        match self {
            SqzError::Io(e) => e.kind() == io::ErrorKind::NotFound,
            SqzError::ResourceNotFound(_) => true,
            _ => false,
        }
    }

    /// `true` when the source exists but its content violates the format.
    pub fn is_corrupt(&self) -> bool {
        matches!(
            self,
            SqzError::Truncated(_)
                | SqzError::MalformedDictionaryReference { .. }
                | SqzError::MalformedBackReference { .. }
                | SqzError::InvalidHuffmanTree(_)
                | SqzError::PayloadSizeMismatch { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SqzError::MalformedDictionaryReference {
            code: 0x104,
            dict_size: 0x102,
        };
        assert_eq!(
            err.to_string(),
            "Malformed LZW dictionary reference: code 0x104 with dictionary size 0x102"
        );
    }

    #[test]
    fn test_back_reference_error() {
        let err = SqzError::MalformedBackReference {
            offset: -12,
            position: 4,
        };
        assert!(err.to_string().contains("-12"));
        assert!(err.to_string().contains("position 4"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: SqzError = io_err.into();
        assert!(matches!(err, SqzError::Io(_)));
        assert!(err.is_not_found());
        assert!(!err.is_corrupt());
    }

    #[test]
    fn test_unexpected_eof_is_truncation() {
        let io_err = io::Error::new(io::ErrorKind::UnexpectedEof, "eof");
        let err = SqzError::from_read(io_err, "DIET header");
        assert!(matches!(err, SqzError::Truncated(ref msg) if msg.contains("DIET header")));
        assert!(err.is_corrupt());
    }
}
