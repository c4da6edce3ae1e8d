//! Byte layout of the images stored in a DDS payload.
//!
//! Images are stored back to back in array, face, mip order. A single running
//! offset covers the whole payload; there is no realignment between faces or
//! array layers.

use glimg_image::{Dimensions, ImageFormat};

/// Location of one stored image in the source buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LayoutEntry {
    pub array: u32,
    pub face: u32,
    pub mip: u32,
    /// Absolute byte offset of the image.
    pub offset: usize,
    /// Byte length of the image.
    pub length: usize,
}

impl LayoutEntry {
    /// Offset one past the last byte of the image.
    pub fn end(&self) -> usize {
        self.offset + self.length
    }
}

/// Byte size of one row of pixels, or of one row of 4x4 blocks for
/// compressed formats.
pub fn line_size(format: &ImageFormat, width: u32) -> Option<usize> {
    let width = width as usize;
    match format.block_size() {
        Some(block_size) => width.div_ceil(4).checked_mul(block_size),
        None => width.checked_mul(format.bytes_per_pixel()?),
    }
}

/// Byte size of a single image at the given mip level.
///
/// Returns `None` if the size does not fit in `usize`.
pub fn mip_size(format: &ImageFormat, dimensions: &Dimensions, level: u32) -> Option<usize> {
    let mip = dimensions.mip_level(level);
    let line = line_size(format, mip.width)?;

    // Compressed rows and slices are counted in 4-texel blocks.
    let effective = |axis: u32| {
        if format.is_compressed() {
            (axis as usize).div_ceil(4)
        } else {
            axis as usize
        }
    };

    let height = if mip.num_dimensions > 1 {
        effective(mip.height)
    } else {
        1
    };
    let depth = if mip.num_dimensions > 2 {
        effective(mip.depth)
    } else {
        1
    };

    line.checked_mul(height)?.checked_mul(depth)
}

/// Compute the location of every stored image.
///
/// Entries are returned in storage order: array layer, then face, then mip
/// level, starting at `base_offset`. Returns `None` on arithmetic overflow.
pub fn compute_layout(
    format: &ImageFormat,
    dimensions: &Dimensions,
    mip_count: u32,
    array_count: u32,
    face_count: u32,
    base_offset: usize,
) -> Option<Vec<LayoutEntry>> {
    let total = (mip_count as usize)
        .checked_mul(array_count as usize)?
        .checked_mul(face_count as usize)?;

    // Sizes only depend on the mip level.
    let sizes = (0..mip_count)
        .map(|level| mip_size(format, dimensions, level))
        .collect::<Option<Vec<_>>>()?;

    let mut entries = Vec::with_capacity(total);
    let mut offset = base_offset;

    for array in 0..array_count {
        for face in 0..face_count {
            for (mip, &length) in (0u32..).zip(&sizes) {
                tracing::trace!(array, face, mip, offset, length, "image layout");
                entries.push(LayoutEntry {
                    array,
                    face,
                    mip,
                    offset,
                    length,
                });
                offset = offset.checked_add(length)?;
            }
        }
    }

    Some(entries)
}
