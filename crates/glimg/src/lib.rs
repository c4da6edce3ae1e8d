//! glimg - texture container loading library.
//!
//! This crate provides a unified interface to the glimg crates.
//!
//! # Crates
//!
//! - [`glimg_common`] - Common utilities (bounds-checked binary reading)
//! - [`glimg_image`] - Canonical image formats, dimensions and image sets
//! - [`glimg_dds`] - DDS texture container decoding
//!
//! # Example
//!
//! ```no_run
//! use glimg::prelude::*;
//!
//! let images = load_from_file("skybox.dds")?;
//! println!("{} with {} faces", images.format(), images.face_count());
//!
//! for image in images.iter() {
//!     println!("mip {} face {}: {} bytes", image.mip, image.face, image.data.len());
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

// Re-export all sub-crates
pub use glimg_common as common;
pub use glimg_dds as dds;
pub use glimg_image as image;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use glimg_common::BinaryReader;
    pub use glimg_dds::{is_dds, load_from_file, load_from_memory, DdsFile, DecodeOptions, PayloadCheck};
    pub use glimg_image::{Dimensions, Image, ImageAssembler, ImageCreator, ImageFormat, ImageSet};
}

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
