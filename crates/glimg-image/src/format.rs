//! Canonical pixel format description.

use std::fmt;

/// How the values of each component are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PixelDataType {
    /// Unsigned integers normalized to [0, 1].
    NormUnsignedInteger,
    /// Signed integers normalized to [-1, 1].
    NormSignedInteger,
    /// BC1 (DXT1), 8-byte blocks.
    CompressedBc1,
    /// BC2 (DXT3), 16-byte blocks.
    CompressedBc2,
    /// BC3 (DXT5), 16-byte blocks.
    CompressedBc3,
    /// BC4 unsigned, 8-byte blocks.
    CompressedUnsignedBc4,
    /// BC4 signed, 8-byte blocks.
    CompressedSignedBc4,
    /// BC5 unsigned, 16-byte blocks.
    CompressedUnsignedBc5,
    /// BC5 signed, 16-byte blocks.
    CompressedSignedBc5,
    /// BC6H unsigned float, 16-byte blocks.
    CompressedUnsignedBc6h,
    /// BC6H signed float, 16-byte blocks.
    CompressedSignedBc6h,
    /// BC7, 16-byte blocks.
    CompressedBc7,
}

impl PixelDataType {
    /// Check if this is one of the block-compressed types.
    pub const fn is_compressed(self) -> bool {
        !matches!(self, Self::NormUnsignedInteger | Self::NormSignedInteger)
    }
}

/// Which color channels are stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PixelComponents {
    Red,
    Rg,
    Rgb,
    /// RGB with an unused fourth component.
    Rgbx,
    Rgba,
}

impl PixelComponents {
    /// Number of stored components, including padding.
    pub const fn count(self) -> usize {
        match self {
            Self::Red => 1,
            Self::Rg => 2,
            Self::Rgb => 3,
            Self::Rgbx | Self::Rgba => 4,
        }
    }
}

/// Order of the components in memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ComponentOrder {
    Rgba,
    Bgra,
    /// Opaque: the order is defined by the compression scheme.
    Compressed,
}

/// Bit layout of a single pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Bitdepth {
    Compressed,
    PerComp8,
    PerComp16,
    Packed16Bit565,
    Packed16Bit1555Rev,
    Packed16Bit4444Rev,
    Packed32Bit8888Rev,
}

/// A fully resolved pixel format.
///
/// The combination of fields determines the byte size of a pixel (or of a
/// 4x4 block for compressed formats).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ImageFormat {
    pub data_type: PixelDataType,
    pub components: PixelComponents,
    pub order: ComponentOrder,
    pub bitdepth: Bitdepth,
    /// Byte alignment of each row. Tightly packed rows use 1.
    pub line_alignment: u32,
}

impl ImageFormat {
    /// Create a new image format.
    pub const fn new(
        data_type: PixelDataType,
        components: PixelComponents,
        order: ComponentOrder,
        bitdepth: Bitdepth,
        line_alignment: u32,
    ) -> Self {
        Self {
            data_type,
            components,
            order,
            bitdepth,
            line_alignment,
        }
    }

    /// Shorthand for an unsigned normalized, tightly packed format.
    pub const fn unorm(components: PixelComponents, order: ComponentOrder, bitdepth: Bitdepth) -> Self {
        Self::new(PixelDataType::NormUnsignedInteger, components, order, bitdepth, 1)
    }

    /// Shorthand for a block-compressed format.
    pub const fn compressed(data_type: PixelDataType, components: PixelComponents) -> Self {
        Self::new(data_type, components, ComponentOrder::Compressed, Bitdepth::Compressed, 1)
    }

    /// Check if the pixel data is stored in compressed 4x4 blocks.
    pub const fn is_compressed(&self) -> bool {
        matches!(self.bitdepth, Bitdepth::Compressed)
    }

    /// Byte size of one 4x4 block, or `None` for uncompressed formats.
    pub const fn block_size(&self) -> Option<usize> {
        if !self.is_compressed() {
            return None;
        }
        // BC1 and BC4 use 8 bytes per block, others use 16
        match self.data_type {
            PixelDataType::CompressedBc1
            | PixelDataType::CompressedUnsignedBc4
            | PixelDataType::CompressedSignedBc4 => Some(8),
            _ => Some(16),
        }
    }

    /// Byte size of one pixel, or `None` for compressed formats.
    pub const fn bytes_per_pixel(&self) -> Option<usize> {
        match self.bitdepth {
            Bitdepth::Compressed => None,
            Bitdepth::PerComp8 => Some(self.components.count()),
            Bitdepth::PerComp16 => Some(self.components.count() * 2),
            Bitdepth::Packed16Bit565 | Bitdepth::Packed16Bit1555Rev | Bitdepth::Packed16Bit4444Rev => {
                Some(2)
            }
            Bitdepth::Packed32Bit8888Rev => Some(4),
        }
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:?} {:?} ({:?}, {:?})",
            self.data_type, self.components, self.order, self.bitdepth
        )
    }
}
