//! DDS file decoding.

use std::fs;
use std::path::Path;

use glimg_image::{Dimensions, Image, ImageAssembler, ImageCreator, ImageFormat, ImageSet};

use crate::format::{resolve_format, resolve_texture_info, TextureInfo};
use crate::header::{ddsd, payload_offset, read_headers, DdsHeader, DdsHeaderDxt10};
use crate::layout::{compute_layout, LayoutEntry};
use crate::{Error, Result, DDS_MAGIC};

/// Origin reported for data that did not come from a file.
pub const MEMORY_ORIGIN: &str = "<memory>";

/// How to treat a payload shorter than the computed layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PayloadCheck {
    /// Reject the file as malformed.
    #[default]
    Strict,
    /// Accept the file; images past the end of the data are reported as absent.
    Lenient,
}

/// Options controlling how a DDS file is decoded.
#[derive(Debug, Clone, Default)]
pub struct DecodeOptions {
    pub payload: PayloadCheck,
}

/// A parsed DDS file borrowing its source buffer.
///
/// Parsing validates the headers, resolves the pixel format and computes the
/// location of every stored image. Image data is never copied; use
/// [`image`](Self::image) to get a view into the source buffer or
/// [`assemble`](Self::assemble) to hand every image to an [`ImageAssembler`].
#[derive(Debug, Clone)]
pub struct DdsFile<'a> {
    data: &'a [u8],
    header: DdsHeader,
    header_dxt10: Option<DdsHeaderDxt10>,
    info: TextureInfo,
    format: ImageFormat,
    dimensions: Dimensions,
    mip_count: u32,
    layout: Vec<LayoutEntry>,
}

impl<'a> DdsFile<'a> {
    /// Parse a DDS file with the default (strict) options.
    ///
    /// `origin` identifies the data in error messages, usually a file path.
    pub fn parse(data: &'a [u8], origin: &str) -> Result<Self> {
        Self::parse_with_options(data, origin, &DecodeOptions::default())
    }

    /// Parse a DDS file.
    pub fn parse_with_options(data: &'a [u8], origin: &str, options: &DecodeOptions) -> Result<Self> {
        let (header, header_dxt10) = read_headers(data, origin)?;
        let info = resolve_texture_info(&header, header_dxt10.as_ref(), origin)?;
        let format = resolve_format(&header, &info, origin)?;
        let dimensions = dimensions(&header, &info, origin);

        let mip_count = if header.has_flag(ddsd::MIPMAPCOUNT) {
            let count = header.mipmap_count.get();
            if count == 0 {
                tracing::warn!(origin, "mipmap count flag set with a count of 0, using 1");
            }
            count.max(1)
        } else {
            1
        };

        tracing::debug!(
            origin,
            %format,
            ?dimensions,
            mip_count,
            array_count = info.array_count(),
            face_count = info.face_count(),
            extended = info.extended,
            "resolved DDS texture"
        );

        let base_offset = payload_offset(&header);
        let payload_len = data.len() - base_offset;

        // Every image occupies at least one byte.
        let image_count =
            u64::from(mip_count) * u64::from(info.array_count()) * u64::from(info.face_count());
        if image_count > payload_len as u64 {
            return Err(Error::malformed(
                origin,
                format!("The file declares {image_count} images but holds only {payload_len} bytes of image data."),
            ));
        }

        let layout = compute_layout(
            &format,
            &dimensions,
            mip_count,
            info.array_count(),
            info.face_count(),
            base_offset,
        )
        .ok_or_else(|| Error::malformed(origin, "The image sizes overflow the address space."))?;

        let required = layout.last().map_or(base_offset, LayoutEntry::end);
        if required > data.len() {
            match options.payload {
                PayloadCheck::Strict => {
                    return Err(Error::malformed(
                        origin,
                        format!(
                            "The image data is truncated: expected {} bytes, got {}.",
                            required,
                            data.len()
                        ),
                    ));
                }
                PayloadCheck::Lenient => {
                    tracing::warn!(origin, required, available = data.len(), "truncated DDS payload");
                }
            }
        }

        Ok(Self {
            data,
            header,
            header_dxt10,
            info,
            format,
            dimensions,
            mip_count,
            layout,
        })
    }

    /// The primary header.
    pub fn header(&self) -> &DdsHeader {
        &self.header
    }

    /// The DX10 extension header, if present.
    pub fn header_dxt10(&self) -> Option<&DdsHeaderDxt10> {
        self.header_dxt10.as_ref()
    }

    /// Dimension, cubemap and array classification.
    pub fn texture_info(&self) -> &TextureInfo {
        &self.info
    }

    /// The resolved pixel format.
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
        self.info.array_count()
    }

    pub fn face_count(&self) -> u32 {
        self.info.face_count()
    }

    /// Check if the texture is a cubemap.
    pub fn is_cubemap(&self) -> bool {
        self.info.cubemap
    }

    /// Offset of the first image in the source buffer.
    pub fn payload_offset(&self) -> usize {
        payload_offset(&self.header)
    }

    /// Location of every image, in storage order.
    pub fn layout(&self) -> &[LayoutEntry] {
        &self.layout
    }

    /// Get the image at the given mip level, array layer and face.
    ///
    /// Returns `None` if the index is out of range or, for leniently parsed
    /// files, if the image lies past the end of the data.
    pub fn image(&self, mip: u32, array: u32, face: u32) -> Option<Image<'a>> {
        if mip >= self.mip_count || array >= self.array_count() || face >= self.face_count() {
            return None;
        }
        let (mip, array, face) = (mip as usize, array as usize, face as usize);
        let index = (array * self.face_count() as usize + face) * self.mip_count as usize + mip;
        self.entry_image(self.layout.get(index)?)
    }

    /// Iterate over the available images in storage order.
    pub fn images(&self) -> impl Iterator<Item = Image<'a>> + '_ {
        self.layout.iter().filter_map(|entry| self.entry_image(entry))
    }

    /// Feed every available image to an assembler in storage order.
    pub fn assemble<A: ImageAssembler>(&self, mut assembler: A) -> Result<A::Output> {
        for image in self.images() {
            assembler.set_image_data(image.data, image.mip, image.array, image.face)?;
        }
        Ok(assembler.finish()?)
    }

    /// Copy every image into an owned [`ImageSet`].
    pub fn to_image_set(&self) -> Result<ImageSet> {
        self.assemble(ImageCreator::new(
            self.format,
            self.dimensions,
            self.mip_count,
            self.array_count(),
            self.face_count(),
        ))
    }

    fn entry_image(&self, entry: &LayoutEntry) -> Option<Image<'a>> {
        let data = self.data.get(entry.offset..entry.end())?;
        Some(Image {
            mip: entry.mip,
            array: entry.array,
            face: entry.face,
            dimensions: self.dimensions.mip_level(entry.mip),
            data,
        })
    }
}

/// Image extents declared by the header flags.
///
/// Height counts when `DDSD_HEIGHT` is set and depth when `DDSD_DEPTH` is set.
/// The extension header's resource dimension does not change the axis count.
fn dimensions(header: &DdsHeader, info: &TextureInfo, origin: &str) -> Dimensions {
    let mut dims = Dimensions::new_1d(header.width.get());

    if header.has_flag(ddsd::HEIGHT) {
        dims.num_dimensions = 2;
        dims.height = header.height.get();
    }

    if header.has_flag(ddsd::DEPTH) {
        dims.num_dimensions = 3;
        dims.depth = header.depth.get();
    }

    if info.extended && dims.num_dimensions != info.dimension.axes() {
        tracing::debug!(
            origin,
            flag_axes = dims.num_dimensions,
            resource_dimension = ?info.dimension,
            "header flags and extension header disagree on dimensionality"
        );
    }

    dims
}

/// Check if the data starts with the DDS magic.
pub fn is_dds(data: &[u8]) -> bool {
    data.starts_with(DDS_MAGIC)
}

/// Decode DDS data held in memory into an owned [`ImageSet`].
pub fn load_from_memory(data: &[u8]) -> Result<ImageSet> {
    DdsFile::parse(data, MEMORY_ORIGIN)?.to_image_set()
}

/// Read and decode a DDS file into an owned [`ImageSet`].
pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<ImageSet> {
    let path = path.as_ref();
    let data = fs::read(path)?;
    DdsFile::parse(&data, &path.display().to_string())?.to_image_set()
}
