//! Addressable collections of images.

use crate::{Dimensions, ImageFormat};

/// One stored image: a single mip level of a single array layer and face.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Image<'a> {
    pub mip: u32,
    pub array: u32,
    pub face: u32,
    /// Extents of this mip level.
    pub dimensions: Dimensions,
    /// Raw pixel (or block) data.
    pub data: &'a [u8],
}

/// An owned set of images sharing a format and base dimensions.
///
/// Images are addressed by `(mip, array, face)`.
#[derive(Debug, Clone)]
pub struct ImageSet {
    pub(crate) format: ImageFormat,
    pub(crate) dimensions: Dimensions,
    pub(crate) mip_count: u32,
    pub(crate) array_count: u32,
    pub(crate) face_count: u32,
    pub(crate) images: Vec<Vec<u8>>,
}

impl ImageSet {
    /// Pixel format shared by every image.
    pub fn format(&self) -> ImageFormat {
        self.format
    }

    /// Dimensions of mip level 0.
    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    pub fn mip_count(&self) -> u32 {
        self.mip_count
    }

    pub fn array_count(&self) -> u32 {
        self.array_count
    }

    pub fn face_count(&self) -> u32 {
        self.face_count
    }

    /// Total number of stored images.
    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Get the image at the given mip level, array layer and face.
    pub fn image(&self, mip: u32, array: u32, face: u32) -> Option<Image<'_>> {
        let index = slot_index(mip, array, face, self.mip_count, self.array_count, self.face_count)?;
        Some(Image {
            mip,
            array,
            face,
            dimensions: self.dimensions.mip_level(mip),
            data: &self.images[index],
        })
    }

    /// Iterate over all images in mip, array, face order.
    pub fn iter(&self) -> impl Iterator<Item = Image<'_>> + '_ {
        (0..self.mip_count).flat_map(move |mip| {
            (0..self.array_count).flat_map(move |array| {
                (0..self.face_count).filter_map(move |face| self.image(mip, array, face))
            })
        })
    }
}

/// Flat storage index for an image, or `None` when out of range.
pub(crate) fn slot_index(
    mip: u32,
    array: u32,
    face: u32,
    mip_count: u32,
    array_count: u32,
    face_count: u32,
) -> Option<usize> {
    if mip >= mip_count || array >= array_count || face >= face_count {
        return None;
    }
    let (mip, array, face) = (mip as usize, array as usize, face as usize);
    Some((mip * array_count as usize + array) * face_count as usize + face)
}
