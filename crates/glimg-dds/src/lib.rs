//! Decoder for legacy DDS (DirectDraw Surface) texture containers.
//!
//! A DDS file is a 4-byte magic, a 124-byte header, an optional 20-byte DX10
//! extension header and the pixel data of every stored image, laid out as
//! array layers x cube faces x mip levels.
//!
//! Decoding happens in three steps:
//! - [`header`] - Read the fixed-layout headers
//! - [`format`] - Resolve the pixel format, inferring it from bit masks and
//!   FourCCs for files without an extension header
//! - [`layout`] - Compute the offset and size of every stored image
//!
//! # Example
//!
//! ```no_run
//! use glimg_dds::DdsFile;
//!
//! let data = std::fs::read("texture.dds")?;
//! let dds = DdsFile::parse(&data, "texture.dds")?;
//!
//! println!("{} {}x{}", dds.format(), dds.dimensions().width, dds.dimensions().height);
//! if let Some(image) = dds.image(0, 0, 0) {
//!     println!("mip 0: {} bytes", image.data.len());
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod error;
mod file;

pub mod format;
pub mod header;
pub mod layout;

pub use error::{Error, Result};
pub use file::{is_dds, load_from_file, load_from_memory, DdsFile, DecodeOptions, PayloadCheck, MEMORY_ORIGIN};
pub use format::{MatchRule, PixelPattern, TextureInfo, LEGACY_FORMATS};
pub use header::{DdsHeader, DdsHeaderDxt10, DdsPixelFormat, FourCC, ResourceDimension};
pub use layout::LayoutEntry;

/// DDS file magic bytes ("DDS ").
pub const DDS_MAGIC: &[u8; 4] = b"DDS ";
