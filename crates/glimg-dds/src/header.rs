//! DDS header structures and the header reader.

use glimg_common::BinaryReader;
use zerocopy::byteorder::little_endian::U32;
use zerocopy::{FromBytes, Immutable, IntoBytes};

use crate::{Error, Result, DDS_MAGIC};

/// `DDSD_*` header flags: which header members contain valid data.
pub mod ddsd {
    pub const CAPS: u32 = 0x0000_0001;
    pub const HEIGHT: u32 = 0x0000_0002;
    pub const WIDTH: u32 = 0x0000_0004;
    pub const PITCH: u32 = 0x0000_0008;
    pub const PIXELFORMAT: u32 = 0x0000_1000;
    pub const MIPMAPCOUNT: u32 = 0x0002_0000;
    pub const LINEARSIZE: u32 = 0x0008_0000;
    pub const DEPTH: u32 = 0x0080_0000;
}

/// `DDPF_*` pixel format flags.
pub mod ddpf {
    pub const ALPHAPIXELS: u32 = 0x0000_0001;
    pub const ALPHA: u32 = 0x0000_0002;
    pub const FOURCC: u32 = 0x0000_0004;
    pub const RGB: u32 = 0x0000_0040;
    pub const YUV: u32 = 0x0000_0200;
    pub const LUMINANCE: u32 = 0x0002_0000;
}

/// `DDSCAPS2_*` secondary capability flags (cubemap and volume bits).
pub mod caps2 {
    pub const CUBEMAP: u32 = 0x0000_0200;
    pub const CUBEMAP_POSITIVEX: u32 = 0x0000_0400;
    pub const CUBEMAP_NEGATIVEX: u32 = 0x0000_0800;
    pub const CUBEMAP_POSITIVEY: u32 = 0x0000_1000;
    pub const CUBEMAP_NEGATIVEY: u32 = 0x0000_2000;
    pub const CUBEMAP_POSITIVEZ: u32 = 0x0000_4000;
    pub const CUBEMAP_NEGATIVEZ: u32 = 0x0000_8000;
    pub const VOLUME: u32 = 0x0020_0000;

    /// The six face bits.
    pub const CUBEMAP_FACES: u32 = CUBEMAP_POSITIVEX
        | CUBEMAP_NEGATIVEX
        | CUBEMAP_POSITIVEY
        | CUBEMAP_NEGATIVEY
        | CUBEMAP_POSITIVEZ
        | CUBEMAP_NEGATIVEZ;

    /// Every bit that marks a cubemap.
    pub const CUBEMAP_ALL: u32 = CUBEMAP | CUBEMAP_FACES;
}

/// DDS file header (the 124 bytes following the magic).
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable)]
#[repr(C)]
pub struct DdsHeader {
    /// Header size (should be 124).
    pub size: U32,
    /// Header flags, see [`ddsd`].
    pub flags: U32,
    /// Image height.
    pub height: U32,
    /// Image width.
    pub width: U32,
    /// Pitch or linear size.
    pub pitch_or_linear_size: U32,
    /// Depth (for volume textures).
    pub depth: U32,
    /// Number of mipmap levels.
    pub mipmap_count: U32,
    /// Reserved.
    pub reserved1: [U32; 11],
    /// Pixel format.
    pub pixel_format: DdsPixelFormat,
    /// Surface capabilities.
    pub caps: U32,
    /// Surface capabilities 2, see [`caps2`].
    pub caps2: U32,
    /// Surface capabilities 3.
    pub caps3: U32,
    /// Surface capabilities 4.
    pub caps4: U32,
    /// Reserved.
    pub reserved2: U32,
}

impl DdsHeader {
    /// Expected header size.
    pub const SIZE: usize = 124;

    /// Check if this is a DX10 extended header.
    pub fn is_dx10(&self) -> bool {
        self.pixel_format.four_cc == FourCC::DX10
    }

    /// Check if all bits of `flag` are set in the header flags.
    pub fn has_flag(&self, flag: u32) -> bool {
        self.flags.get() & flag == flag
    }
}

/// DDS pixel format.
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable)]
#[repr(C)]
pub struct DdsPixelFormat {
    /// Structure size (should be 32).
    pub size: U32,
    /// Pixel format flags, see [`ddpf`].
    pub flags: U32,
    /// Four-character code for compression.
    pub four_cc: FourCC,
    /// Number of bits per pixel (for uncompressed).
    pub rgb_bit_count: U32,
    /// Red bit mask.
    pub r_bit_mask: U32,
    /// Green bit mask.
    pub g_bit_mask: U32,
    /// Blue bit mask.
    pub b_bit_mask: U32,
    /// Alpha bit mask.
    pub a_bit_mask: U32,
}

/// Four-character code for compression type.
#[derive(Clone, Copy, PartialEq, Eq, Hash, FromBytes, IntoBytes, Immutable)]
#[repr(transparent)]
pub struct FourCC(pub [u8; 4]);

impl FourCC {
    /// DXT1 compression.
    pub const DXT1: Self = Self(*b"DXT1");
    /// DXT3 compression.
    pub const DXT3: Self = Self(*b"DXT3");
    /// DXT5 compression.
    pub const DXT5: Self = Self(*b"DXT5");
    /// DX10 extended header.
    pub const DX10: Self = Self(*b"DX10");

    /// The code as the little-endian integer stored on disk.
    pub const fn to_u32(self) -> u32 {
        u32::from_le_bytes(self.0)
    }
}

impl std::fmt::Debug for FourCC {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.0.iter().all(|b| b.is_ascii_graphic() || *b == b' ') {
            write!(f, "FourCC({:?})", String::from_utf8_lossy(&self.0))
        } else {
            write!(f, "FourCC({:#010x})", self.to_u32())
        }
    }
}

/// DX10 extended header.
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable)]
#[repr(C)]
pub struct DdsHeaderDxt10 {
    /// DXGI format.
    pub dxgi_format: U32,
    /// Resource dimension, see [`ResourceDimension`].
    pub resource_dimension: U32,
    /// Misc flags.
    pub misc_flag: U32,
    /// Array size.
    pub array_size: U32,
    /// Misc flags 2.
    pub misc_flags2: U32,
}

impl DdsHeaderDxt10 {
    /// Size of the extension header.
    pub const SIZE: usize = 20;

    /// `DDS_RESOURCE_MISC_TEXTURECUBE`.
    pub const MISC_TEXTURECUBE: u32 = 0x4;
}

/// Dimensionality of the stored resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ResourceDimension {
    Texture1D,
    Texture2D,
    Texture3D,
}

impl ResourceDimension {
    /// Decode the extension header's `resource_dimension` value.
    pub const fn from_raw(value: u32) -> Option<Self> {
        match value {
            2 => Some(Self::Texture1D),
            3 => Some(Self::Texture2D),
            4 => Some(Self::Texture3D),
            _ => None,
        }
    }

    /// Number of axes a resource of this dimension uses.
    pub const fn axes(self) -> u32 {
        match self {
            Self::Texture1D => 1,
            Self::Texture2D => 2,
            Self::Texture3D => 3,
        }
    }
}

/// Offset of the image payload: magic, primary header and, if present, the
/// extension header.
pub fn payload_offset(header: &DdsHeader) -> usize {
    let mut offset = DDS_MAGIC.len() + DdsHeader::SIZE;
    if header.is_dx10() {
        offset += DdsHeaderDxt10::SIZE;
    }
    offset
}

/// Read the primary header and, when its FourCC is `DX10`, the extension
/// header from the start of a DDS buffer.
///
/// The magic is always checked first so any buffer with the wrong leading
/// bytes is rejected as malformed regardless of its length.
pub fn read_headers(data: &[u8], origin: &str) -> Result<(DdsHeader, Option<DdsHeaderDxt10>)> {
    let mut reader = BinaryReader::new(data);

    reader
        .expect_magic(DDS_MAGIC)
        .map_err(|_| Error::malformed(origin, "The magic number is missing from the file."))?;

    if data.len() < DdsHeader::SIZE + DDS_MAGIC.len() {
        return Err(Error::malformed(
            origin,
            "The data is way too small to store actual information.",
        ));
    }

    let header: DdsHeader = reader
        .read_struct()
        .map_err(|e| Error::malformed(origin, e.to_string()))?;

    if header.size.get() as usize != DdsHeader::SIZE {
        tracing::warn!(origin, size = header.size.get(), "non-standard DDS header size");
    }

    let header_dxt10 = if header.is_dx10() {
        let header_dxt10: DdsHeaderDxt10 = reader.read_struct().map_err(|e| {
            Error::malformed(origin, format!("The DX10 extension header is truncated: {e}"))
        })?;
        Some(header_dxt10)
    } else {
        None
    };

    Ok((header, header_dxt10))
}
