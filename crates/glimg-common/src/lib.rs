//! Common utilities for glimg.
//!
//! This crate provides the low-level pieces shared by the container decoders:
//!
//! - [`BinaryReader`] - Bounds-checked binary reading from byte slices
//! - [`Error`] - Errors raised while reading past the end of a buffer or on
//!   mismatched magic bytes

mod error;
mod reader;

pub use error::{Error, Result};
pub use reader::BinaryReader;

/// Re-export zerocopy traits for convenience
pub use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};
