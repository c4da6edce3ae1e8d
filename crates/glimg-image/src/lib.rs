//! Canonical image model for glimg.
//!
//! Container decoders describe their pixel data with the types in this crate
//! and hand each stored image to an [`ImageAssembler`]:
//!
//! - [`ImageFormat`] - Pixel data type, components, order and bit depth
//! - [`Dimensions`] - 1D/2D/3D extents and mip level math
//! - [`ImageCreator`] - Default assembler producing an owned [`ImageSet`]

mod creator;
mod dimensions;
mod error;
mod format;
mod image_set;

pub use creator::{ImageAssembler, ImageCreator};
pub use dimensions::Dimensions;
pub use error::{Error, Result};
pub use format::{Bitdepth, ComponentOrder, ImageFormat, PixelComponents, PixelDataType};
pub use image_set::{Image, ImageSet};
