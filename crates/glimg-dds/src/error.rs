//! Error types for DDS decoding.

use thiserror::Error;

/// Errors that can occur when decoding DDS files.
///
/// `Malformed` and `Unsupported` carry the origin of the data (a file path or
/// `<memory>`) so the message can be reported as-is.
#[derive(Debug, Error)]
pub enum Error {
    /// The data is not a well-formed DDS file.
    #[error("{origin}: {message}")]
    Malformed { origin: String, message: String },

    /// The data is a DDS file using features this decoder does not handle.
    #[error("{origin}: {message}")]
    Unsupported { origin: String, message: String },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The image assembler rejected the decoded images.
    #[error("image assembly failed: {0}")]
    Assembly(#[from] glimg_image::Error),
}

impl Error {
    pub(crate) fn malformed(origin: &str, message: impl Into<String>) -> Self {
        Self::Malformed {
            origin: origin.to_string(),
            message: message.into(),
        }
    }

    pub(crate) fn unsupported(origin: &str, message: impl Into<String>) -> Self {
        Self::Unsupported {
            origin: origin.to_string(),
            message: message.into(),
        }
    }
}

/// Result type for DDS operations.
pub type Result<T> = std::result::Result<T, Error>;
