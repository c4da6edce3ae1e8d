//! Error types for image assembly.

use thiserror::Error;

/// Errors raised while assembling an [`ImageSet`](crate::ImageSet).
#[derive(Debug, Error)]
pub enum Error {
    /// An image index lies outside the declared mip/array/face counts.
    #[error("image index out of range: mip {mip}, array {array}, face {face}")]
    IndexOutOfRange { mip: u32, array: u32, face: u32 },

    /// The same image slot was filled twice.
    #[error("image data already set: mip {mip}, array {array}, face {face}")]
    AlreadySet { mip: u32, array: u32, face: u32 },

    /// `finish` was called before every image slot was filled.
    #[error("{missing} image(s) were never set")]
    MissingImages { missing: usize },
}

/// Result type for image assembly.
pub type Result<T> = std::result::Result<T, Error>;
