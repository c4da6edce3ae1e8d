//! Assembling decoded images into an [`ImageSet`].

use crate::image_set::slot_index;
use crate::{Dimensions, Error, ImageFormat, ImageSet, Result};

/// Receives the raw bytes of every stored image from a container decoder.
///
/// Decoders call [`set_image_data`](Self::set_image_data) once per image and
/// then [`finish`](Self::finish). What the assembler builds (an owned image
/// set, a GPU upload, ...) is up to the implementation.
pub trait ImageAssembler {
    type Output;

    /// Provide the data for one image.
    fn set_image_data(&mut self, data: &[u8], mip: u32, array: u32, face: u32) -> Result<()>;

    /// Consume the assembler once every image has been provided.
    fn finish(self) -> Result<Self::Output>
    where
        Self: Sized;
}

/// Default assembler that copies every image into an owned [`ImageSet`].
#[derive(Debug)]
pub struct ImageCreator {
    format: ImageFormat,
    dimensions: Dimensions,
    mip_count: u32,
    array_count: u32,
    face_count: u32,
    images: Vec<Option<Vec<u8>>>,
}

impl ImageCreator {
    /// Create a creator expecting `mip_count * array_count * face_count` images.
    pub fn new(
        format: ImageFormat,
        dimensions: Dimensions,
        mip_count: u32,
        array_count: u32,
        face_count: u32,
    ) -> Self {
        let total = mip_count as usize * array_count as usize * face_count as usize;
        Self {
            format,
            dimensions,
            mip_count,
            array_count,
            face_count,
            images: vec![None; total],
        }
    }
}

impl ImageAssembler for ImageCreator {
    type Output = ImageSet;

    fn set_image_data(&mut self, data: &[u8], mip: u32, array: u32, face: u32) -> Result<()> {
        let index = slot_index(mip, array, face, self.mip_count, self.array_count, self.face_count)
            .ok_or(Error::IndexOutOfRange { mip, array, face })?;

        let slot = &mut self.images[index];
        if slot.is_some() {
            return Err(Error::AlreadySet { mip, array, face });
        }
        *slot = Some(data.to_vec());
        Ok(())
    }

    fn finish(self) -> Result<ImageSet> {
        let missing = self.images.iter().filter(|image| image.is_none()).count();
        if missing > 0 {
            return Err(Error::MissingImages { missing });
        }

        tracing::debug!(
            images = self.images.len(),
            format = %self.format,
            "assembled image set"
        );

        Ok(ImageSet {
            format: self.format,
            dimensions: self.dimensions,
            mip_count: self.mip_count,
            array_count: self.array_count,
            face_count: self.face_count,
            images: self.images.into_iter().flatten().collect(),
        })
    }
}
