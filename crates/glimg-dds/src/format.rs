//! Pixel format resolution.
//!
//! Legacy DDS files carry no format enumeration. The format is inferred from
//! the pixel format flags, bit masks and FourCC by scanning [`LEGACY_FORMATS`]
//! in order and taking the first rule that matches. Several rules overlap
//! (a 32-bit RGBA header also satisfies the RGBX rule), so the table order
//! decides the result.

use glimg_image::{Bitdepth, ComponentOrder, ImageFormat, PixelComponents, PixelDataType};

use crate::header::{caps2, ddpf, ddsd, DdsHeader, DdsHeaderDxt10, DdsPixelFormat, FourCC, ResourceDimension};
use crate::{Error, Result};

/// What a [`MatchRule`] compares against the header's pixel format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelPattern {
    /// The FourCC must be equal.
    FourCc(FourCC),
    /// The bit count must be equal and every bit of each rule mask must be
    /// present in the corresponding header mask.
    Masks {
        bit_count: u32,
        r: u32,
        g: u32,
        b: u32,
        a: u32,
    },
}

/// One entry of the legacy format table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchRule {
    /// At least one of these pixel format flags must be set.
    pub flags: u32,
    pub pattern: PixelPattern,
    pub format: ImageFormat,
}

impl MatchRule {
    /// A rule matching an exact FourCC.
    pub const fn four_cc(code: FourCC, format: ImageFormat) -> Self {
        Self {
            flags: ddpf::FOURCC,
            pattern: PixelPattern::FourCc(code),
            format,
        }
    }

    /// A rule matching a bit count and channel masks.
    pub const fn masks(flags: u32, bit_count: u32, rgba: [u32; 4], format: ImageFormat) -> Self {
        Self {
            flags,
            pattern: PixelPattern::Masks {
                bit_count,
                r: rgba[0],
                g: rgba[1],
                b: rgba[2],
                a: rgba[3],
            },
            format,
        }
    }

    /// Check if this rule accepts the given pixel format.
    pub fn matches(&self, pf: &DdsPixelFormat) -> bool {
        if pf.flags.get() & self.flags == 0 {
            return false;
        }

        match self.pattern {
            PixelPattern::FourCc(code) => pf.four_cc == code,
            PixelPattern::Masks { bit_count, r, g, b, a } => {
                let contains = |rule: u32, header: u32| rule & header == rule;
                pf.rgb_bit_count.get() == bit_count
                    && contains(r, pf.r_bit_mask.get())
                    && contains(g, pf.g_bit_mask.get())
                    && contains(b, pf.b_bit_mask.get())
                    && contains(a, pf.a_bit_mask.get())
            }
        }
    }
}

use Bitdepth::*;
use ComponentOrder::{Bgra, Rgba as OrderRgba};
use PixelComponents::{Red, Rg, Rgb, Rgba, Rgbx};

/// Legacy pixel formats, in match priority order. Do not reorder.
pub static LEGACY_FORMATS: [MatchRule; 17] = [
    MatchRule::masks(
        ddpf::RGB | ddpf::ALPHAPIXELS,
        32,
        [0xff, 0xff00, 0xff0000, 0xff000000],
        ImageFormat::unorm(Rgba, OrderRgba, PerComp8),
    ),
    MatchRule::masks(
        ddpf::RGB | ddpf::ALPHAPIXELS,
        32,
        [0xff0000, 0xff00, 0xff, 0xff000000],
        ImageFormat::unorm(Rgba, Bgra, Packed32Bit8888Rev),
    ),
    MatchRule::masks(
        ddpf::RGB,
        32,
        [0xff, 0xff00, 0xff0000, 0],
        ImageFormat::unorm(Rgbx, OrderRgba, PerComp8),
    ),
    MatchRule::masks(
        ddpf::RGB,
        24,
        [0xff, 0xff00, 0xff0000, 0],
        ImageFormat::unorm(Rgb, OrderRgba, PerComp8),
    ),
    MatchRule::masks(
        ddpf::RGB,
        24,
        [0xff0000, 0xff00, 0xff, 0],
        ImageFormat::unorm(Rgb, Bgra, PerComp8),
    ),
    MatchRule::masks(
        ddpf::RGB,
        16,
        [0xf800, 0x7e0, 0x1f, 0],
        ImageFormat::unorm(Rgb, OrderRgba, Packed16Bit565),
    ),
    MatchRule::masks(
        ddpf::RGB,
        16,
        [0x7c00, 0x3e0, 0x1f, 0x8000],
        ImageFormat::unorm(Rgba, Bgra, Packed16Bit1555Rev),
    ),
    MatchRule::masks(
        ddpf::RGB,
        16,
        [0xf00, 0xf0, 0xf, 0xf000],
        ImageFormat::unorm(Rgba, Bgra, Packed16Bit4444Rev),
    ),
    MatchRule::four_cc(
        FourCC::DXT1,
        ImageFormat::compressed(PixelDataType::CompressedBc1, Rgb),
    ),
    MatchRule::four_cc(
        FourCC::DXT3,
        ImageFormat::compressed(PixelDataType::CompressedBc2, Rgba),
    ),
    MatchRule::four_cc(
        FourCC::DXT5,
        ImageFormat::compressed(PixelDataType::CompressedBc3, Rgba),
    ),
    MatchRule::masks(
        ddpf::RGB,
        32,
        [0xffff, 0xffff0000, 0, 0],
        ImageFormat::unorm(Rg, OrderRgba, PerComp16),
    ),
    MatchRule::masks(
        ddpf::RGB,
        16,
        [0xffff, 0xffff0000, 0, 0],
        ImageFormat::unorm(Rg, OrderRgba, PerComp8),
    ),
    MatchRule::masks(
        ddpf::LUMINANCE,
        16,
        [0xffff, 0, 0, 0],
        ImageFormat::unorm(Red, OrderRgba, PerComp16),
    ),
    MatchRule::masks(
        ddpf::LUMINANCE,
        8,
        [0xff, 0, 0, 0],
        ImageFormat::unorm(Red, OrderRgba, PerComp8),
    ),
    MatchRule::masks(
        ddpf::LUMINANCE | ddpf::ALPHAPIXELS,
        16,
        [0xffff, 0, 0, 0xffff0000],
        ImageFormat::unorm(Rg, OrderRgba, PerComp16),
    ),
    MatchRule::masks(
        ddpf::LUMINANCE | ddpf::ALPHAPIXELS,
        8,
        [0xff, 0, 0, 0xff00],
        ImageFormat::unorm(Rg, OrderRgba, PerComp8),
    ),
];

/// Find the first rule in `rules` that matches the pixel format.
pub fn match_legacy_format(rules: &[MatchRule], pf: &DdsPixelFormat) -> Option<ImageFormat> {
    rules.iter().find(|rule| rule.matches(pf)).map(|rule| rule.format)
}

/// `DXGI_FORMAT_UNKNOWN`.
pub const DXGI_FORMAT_UNKNOWN: u32 = 0;

/// Map a DXGI format id from the extension header to an image format.
///
/// Only the formats that have a legacy equivalent or are block-compressed
/// are recognised; everything else returns `None`.
pub fn dxgi_format(id: u32) -> Option<ImageFormat> {
    use PixelDataType::*;

    let format = match id {
        // R8G8B8A8_UNORM, R8G8B8A8_UNORM_SRGB
        28 | 29 => ImageFormat::unorm(Rgba, OrderRgba, PerComp8),
        // R16G16_UNORM
        35 => ImageFormat::unorm(Rg, OrderRgba, PerComp16),
        // R8G8_UNORM
        49 => ImageFormat::unorm(Rg, OrderRgba, PerComp8),
        // R16_UNORM
        56 => ImageFormat::unorm(Red, OrderRgba, PerComp16),
        // R8_UNORM
        61 => ImageFormat::unorm(Red, OrderRgba, PerComp8),
        71 | 72 => ImageFormat::compressed(CompressedBc1, Rgb),
        74 | 75 => ImageFormat::compressed(CompressedBc2, Rgba),
        77 | 78 => ImageFormat::compressed(CompressedBc3, Rgba),
        80 => ImageFormat::compressed(CompressedUnsignedBc4, Red),
        81 => ImageFormat::compressed(CompressedSignedBc4, Red),
        83 => ImageFormat::compressed(CompressedUnsignedBc5, Rg),
        84 => ImageFormat::compressed(CompressedSignedBc5, Rg),
        // B5G6R5_UNORM
        85 => ImageFormat::unorm(Rgb, OrderRgba, Packed16Bit565),
        // B5G5R5A1_UNORM
        86 => ImageFormat::unorm(Rgba, Bgra, Packed16Bit1555Rev),
        // B8G8R8A8_UNORM, B8G8R8A8_UNORM_SRGB
        87 | 91 => ImageFormat::unorm(Rgba, Bgra, Packed32Bit8888Rev),
        // B8G8R8X8_UNORM, B8G8R8X8_UNORM_SRGB
        88 | 93 => ImageFormat::unorm(Rgbx, Bgra, PerComp8),
        95 => ImageFormat::compressed(CompressedUnsignedBc6h, Rgb),
        96 => ImageFormat::compressed(CompressedSignedBc6h, Rgb),
        98 | 99 => ImageFormat::compressed(CompressedBc7, Rgba),
        // B4G4R4A4_UNORM
        115 => ImageFormat::unorm(Rgba, Bgra, Packed16Bit4444Rev),
        _ => return None,
    };
    Some(format)
}

/// Texture classification taken from the extension header, or synthesised
/// from the primary header's capability bits when there is none.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TextureInfo {
    pub dimension: ResourceDimension,
    pub cubemap: bool,
    /// Declared array size. Synthesised headers use 0 (unknown).
    pub array_size: u32,
    /// DXGI format id, [`DXGI_FORMAT_UNKNOWN`] for synthesised headers.
    pub dxgi_format: u32,
    /// Whether a real extension header was present.
    pub extended: bool,
}

impl TextureInfo {
    /// Number of stored array layers.
    pub fn array_count(&self) -> u32 {
        self.array_size.max(1)
    }

    /// Number of stored faces per array layer.
    pub fn face_count(&self) -> u32 {
        if self.cubemap {
            6
        } else {
            1
        }
    }
}

/// Determine dimension, cubemap and array facts for a texture.
pub fn resolve_texture_info(
    header: &DdsHeader,
    header_dxt10: Option<&DdsHeaderDxt10>,
    origin: &str,
) -> Result<TextureInfo> {
    if let Some(dx10) = header_dxt10 {
        let raw = dx10.resource_dimension.get();
        let dimension = ResourceDimension::from_raw(raw).ok_or_else(|| {
            Error::unsupported(origin, format!("Resource dimension {raw} is not a 1D, 2D or 3D texture."))
        })?;

        return Ok(TextureInfo {
            dimension,
            cubemap: dx10.misc_flag.get() & DdsHeaderDxt10::MISC_TEXTURECUBE != 0,
            array_size: dx10.array_size.get(),
            dxgi_format: dx10.dxgi_format.get(),
            extended: true,
        });
    }

    let caps = header.caps2.get();

    let dimension = if caps & caps2::VOLUME != 0 && header.has_flag(ddsd::DEPTH) {
        ResourceDimension::Texture3D
    } else {
        ResourceDimension::Texture2D
    };

    let cubemap = if caps & caps2::CUBEMAP_ALL == 0 {
        false
    } else if caps & caps2::CUBEMAP_FACES != caps2::CUBEMAP_FACES {
        // All faces must be specified or none.
        return Err(Error::unsupported(origin, "All cubemap faces must be specified."));
    } else {
        true
    };

    Ok(TextureInfo {
        dimension,
        cubemap,
        array_size: 0,
        dxgi_format: DXGI_FORMAT_UNKNOWN,
        extended: false,
    })
}

/// Determine the canonical image format of a texture.
///
/// A recognised DXGI format from the extension header wins; otherwise the
/// legacy table is scanned.
pub fn resolve_format(header: &DdsHeader, info: &TextureInfo, origin: &str) -> Result<ImageFormat> {
    if info.extended {
        if let Some(format) = dxgi_format(info.dxgi_format) {
            return Ok(format);
        }
        tracing::debug!(
            origin,
            dxgi_format = info.dxgi_format,
            "unrecognised DXGI format, falling back to legacy inference"
        );
    }

    match_legacy_format(&LEGACY_FORMATS, &header.pixel_format)
        .ok_or_else(|| Error::unsupported(origin, "Could not use the DDS9's image format."))
}
