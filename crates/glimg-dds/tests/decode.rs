//! End-to-end decoding of synthetic DDS files.

use std::io::Write;

use byteorder::{LittleEndian, WriteBytesExt};
use glimg_dds::header::{caps2, ddpf, ddsd};
use glimg_dds::{load_from_memory, DdsFile, DecodeOptions, Error, PayloadCheck, ResourceDimension};
use glimg_image::{
    Bitdepth, ComponentOrder, Dimensions, ImageAssembler, ImageFormat, PixelComponents, PixelDataType,
};

/// Builds DDS files field by field.
struct DdsBuilder {
    flags: u32,
    width: u32,
    height: u32,
    depth: u32,
    mipmap_count: u32,
    pf_flags: u32,
    four_cc: [u8; 4],
    bit_count: u32,
    masks: [u32; 4],
    caps2: u32,
    dx10: Option<[u32; 5]>,
}

impl DdsBuilder {
    fn new(width: u32, height: u32) -> Self {
        Self {
            flags: ddsd::CAPS | ddsd::WIDTH | ddsd::HEIGHT | ddsd::PIXELFORMAT,
            width,
            height,
            depth: 0,
            mipmap_count: 0,
            pf_flags: 0,
            four_cc: [0; 4],
            bit_count: 0,
            masks: [0; 4],
            caps2: 0,
            dx10: None,
        }
    }

    fn rgba8(mut self) -> Self {
        self.pf_flags = ddpf::RGB | ddpf::ALPHAPIXELS;
        self.bit_count = 32;
        self.masks = [0xff, 0xff00, 0xff0000, 0xff000000];
        self
    }

    fn four_cc(mut self, code: &[u8; 4]) -> Self {
        self.pf_flags = ddpf::FOURCC;
        self.four_cc = *code;
        self
    }

    fn mips(mut self, count: u32) -> Self {
        self.flags |= ddsd::MIPMAPCOUNT;
        self.mipmap_count = count;
        self
    }

    fn depth(mut self, depth: u32) -> Self {
        self.flags |= ddsd::DEPTH;
        self.depth = depth;
        self
    }

    fn caps2(mut self, caps: u32) -> Self {
        self.caps2 = caps;
        self
    }

    fn dx10(mut self, dxgi_format: u32, dimension: u32, misc_flag: u32, array_size: u32) -> Self {
        self.four_cc = *b"DX10";
        self.pf_flags = ddpf::FOURCC;
        self.dx10 = Some([dxgi_format, dimension, misc_flag, array_size, 0]);
        self
    }

    /// Header bytes followed by `payload_len` bytes where byte `i` is `i % 251`.
    fn build(&self, payload_len: usize) -> Vec<u8> {
        let mut out = Vec::new();
        out.write_all(b"DDS ").unwrap();

        let fields = [
            124,
            self.flags,
            self.height,
            self.width,
            0,
            self.depth,
            self.mipmap_count,
        ];
        for value in fields {
            out.write_u32::<LittleEndian>(value).unwrap();
        }
        for _ in 0..11 {
            out.write_u32::<LittleEndian>(0).unwrap();
        }

        out.write_u32::<LittleEndian>(32).unwrap();
        out.write_u32::<LittleEndian>(self.pf_flags).unwrap();
        out.write_all(&self.four_cc).unwrap();
        out.write_u32::<LittleEndian>(self.bit_count).unwrap();
        for mask in self.masks {
            out.write_u32::<LittleEndian>(mask).unwrap();
        }

        for value in [0x1000, self.caps2, 0, 0, 0] {
            out.write_u32::<LittleEndian>(value).unwrap();
        }
        assert_eq!(out.len(), 128);

        if let Some(dx10) = self.dx10 {
            for value in dx10 {
                out.write_u32::<LittleEndian>(value).unwrap();
            }
        }

        out.extend((0..payload_len).map(|i| (i % 251) as u8));
        out
    }
}

#[test]
fn test_rgba8_single_image() {
    let data = DdsBuilder::new(128, 128).rgba8().build(128 * 128 * 4);
    let dds = DdsFile::parse(&data, "rgba.dds").unwrap();

    assert_eq!(
        dds.format(),
        ImageFormat::unorm(PixelComponents::Rgba, ComponentOrder::Rgba, Bitdepth::PerComp8)
    );
    assert_eq!(dds.dimensions(), Dimensions::new_2d(128, 128));
    assert_eq!((dds.mip_count(), dds.array_count(), dds.face_count()), (1, 1, 1));

    let layout = dds.layout();
    assert_eq!(layout.len(), 1);
    assert_eq!(layout[0].offset, 124 + 4);
    assert_eq!(layout[0].length, 128 * 128 * 4);

    let image = dds.image(0, 0, 0).unwrap();
    assert_eq!(image.data, &data[128..]);
    assert!(dds.image(1, 0, 0).is_none());
}

#[test]
fn test_wrong_magic_is_malformed() {
    let mut data = DdsBuilder::new(4, 4).rgba8().build(64);
    data[0] = b'X';
    assert!(matches!(DdsFile::parse(&data, "bad.dds"), Err(Error::Malformed { .. })));

    // Wrong magic is reported before the length check.
    match DdsFile::parse(b"PNG", "short.dds") {
        Err(Error::Malformed { origin, message }) => {
            assert_eq!(origin, "short.dds");
            assert!(message.contains("magic"));
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn test_too_small_is_malformed() {
    let data = DdsBuilder::new(4, 4).rgba8().build(0);
    assert!(matches!(
        DdsFile::parse(&data[..100], "small.dds"),
        Err(Error::Malformed { .. })
    ));
}

#[test]
fn test_bc1_mip_chain() {
    // 256, 128, 64, 32, 16, 8, 4, 2, 1
    let sizes: Vec<usize> = [256usize, 128, 64, 32, 16, 8, 4, 2, 1]
        .iter()
        .map(|&w| w.div_ceil(4) * w.div_ceil(4) * 8)
        .collect();
    let total: usize = sizes.iter().sum();

    let data = DdsBuilder::new(256, 256).four_cc(b"DXT1").mips(9).build(total);
    let dds = DdsFile::parse(&data, "bc1.dds").unwrap();

    assert_eq!(dds.format().data_type, PixelDataType::CompressedBc1);
    assert_eq!(dds.mip_count(), 9);

    let mut offset = 128;
    for (entry, size) in dds.layout().iter().zip(&sizes) {
        assert_eq!(entry.offset, offset);
        assert_eq!(entry.length, *size);
        offset += size;
    }
    assert_eq!(offset, data.len());

    let smallest = dds.image(8, 0, 0).unwrap();
    assert_eq!(smallest.dimensions, Dimensions::new_2d(1, 1));
    assert_eq!(smallest.data.len(), 8);
}

#[test]
fn test_cubemap_layout() {
    // 8x8 DXT5, 2 mips: 4 blocks + 1 block per face.
    let per_face = (4 + 1) * 16;
    let data = DdsBuilder::new(8, 8)
        .four_cc(b"DXT5")
        .mips(2)
        .caps2(caps2::CUBEMAP_ALL)
        .build(per_face * 6);
    let dds = DdsFile::parse(&data, "cube.dds").unwrap();

    assert!(dds.is_cubemap());
    assert_eq!(dds.face_count(), 6);
    assert_eq!(dds.layout().len(), 12);

    let face3_mip1 = dds.image(1, 0, 3).unwrap();
    let expected = 128 + 3 * per_face + 4 * 16;
    assert_eq!(face3_mip1.data, &data[expected..expected + 16]);
}

#[test]
fn test_partial_cubemap_unsupported() {
    let data = DdsBuilder::new(4, 4)
        .rgba8()
        .caps2(caps2::CUBEMAP | caps2::CUBEMAP_POSITIVEX | caps2::CUBEMAP_NEGATIVEX)
        .build(64 * 6);
    assert!(matches!(
        DdsFile::parse(&data, "cube.dds"),
        Err(Error::Unsupported { .. })
    ));
}

#[test]
fn test_volume_texture() {
    // 4x4x4 RGBA8 with 3 mips: 256, 32, 4 pixels.
    let total = (64 + 8 + 1) * 4;
    let data = DdsBuilder::new(4, 4)
        .rgba8()
        .depth(4)
        .mips(3)
        .caps2(caps2::VOLUME)
        .build(total);
    let dds = DdsFile::parse(&data, "volume.dds").unwrap();

    assert_eq!(dds.texture_info().dimension, ResourceDimension::Texture3D);
    assert_eq!(dds.dimensions(), Dimensions::new_3d(4, 4, 4));
    let lengths: Vec<usize> = dds.layout().iter().map(|e| e.length).collect();
    assert_eq!(lengths, vec![256, 32, 4]);
}

#[test]
fn test_dx10_texture_array() {
    // BC1_UNORM, 2D, 3 layers of 8x8 (4 blocks each).
    let data = DdsBuilder::new(8, 8).dx10(71, 3, 0, 3).build(3 * 32);
    let dds = DdsFile::parse(&data, "array.dds").unwrap();

    assert!(dds.header_dxt10().is_some());
    assert_eq!(dds.payload_offset(), 148);
    assert_eq!(dds.array_count(), 3);
    assert_eq!(dds.format().data_type, PixelDataType::CompressedBc1);

    let offsets: Vec<usize> = dds.layout().iter().map(|e| e.offset).collect();
    assert_eq!(offsets, vec![148, 180, 212]);

    let layer2 = dds.image(0, 2, 0).unwrap();
    assert_eq!(layer2.array, 2);
    assert_eq!(layer2.data.len(), 32);
}

#[test]
fn test_dx10_cubemap_flag() {
    let data = DdsBuilder::new(4, 4)
        .dx10(28, 3, 0x4, 1)
        .build(6 * 64);
    let dds = DdsFile::parse(&data, "cube10.dds").unwrap();
    assert_eq!(dds.face_count(), 6);
    assert_eq!(dds.format().bytes_per_pixel(), Some(4));
}

#[test]
fn test_unknown_format_unsupported() {
    let mut builder = DdsBuilder::new(4, 4);
    builder.pf_flags = ddpf::YUV;
    builder.bit_count = 16;
    let data = builder.build(32);
    assert!(matches!(
        DdsFile::parse(&data, "yuv.dds"),
        Err(Error::Unsupported { .. })
    ));

    let data = DdsBuilder::new(4, 4).four_cc(b"ATI2").build(16);
    assert!(matches!(
        DdsFile::parse(&data, "ati2.dds"),
        Err(Error::Unsupported { .. })
    ));
}

#[test]
fn test_truncated_payload() {
    // Two mips of 4x4 RGBA8 need 64 + 16 bytes; provide 70.
    let data = DdsBuilder::new(4, 4).rgba8().mips(2).build(70);
    assert!(matches!(
        DdsFile::parse(&data, "trunc.dds"),
        Err(Error::Malformed { .. })
    ));

    let options = DecodeOptions {
        payload: PayloadCheck::Lenient,
    };
    let dds = DdsFile::parse_with_options(&data, "trunc.dds", &options).unwrap();
    assert!(dds.image(0, 0, 0).is_some());
    assert!(dds.image(1, 0, 0).is_none());
    assert_eq!(dds.images().count(), 1);
}

#[test]
fn test_absurd_image_count_is_malformed() {
    let data = DdsBuilder::new(4, 4).rgba8().mips(u32::MAX).build(64);
    assert!(matches!(
        DdsFile::parse(&data, "mips.dds"),
        Err(Error::Malformed { .. })
    ));
}

#[test]
fn test_zero_mip_count_defaults_to_one() {
    let data = DdsBuilder::new(4, 4).rgba8().mips(0).build(64);
    let dds = DdsFile::parse(&data, "zero.dds").unwrap();
    assert_eq!(dds.mip_count(), 1);
}

#[test]
fn test_load_from_memory() {
    let data = DdsBuilder::new(2, 2).rgba8().mips(2).build(16 + 4);
    let set = load_from_memory(&data).unwrap();

    assert_eq!(set.len(), 2);
    assert_eq!(set.mip_count(), 2);
    let mip1 = set.image(1, 0, 0).unwrap();
    assert_eq!(mip1.dimensions, Dimensions::new_2d(1, 1));
    assert_eq!(mip1.data, &data[144..148]);
}

/// Records the order in which images are delivered.
#[derive(Default)]
struct OrderRecorder {
    seen: Vec<(u32, u32, u32, usize)>,
}

impl ImageAssembler for OrderRecorder {
    type Output = Vec<(u32, u32, u32, usize)>;

    fn set_image_data(&mut self, data: &[u8], mip: u32, array: u32, face: u32) -> glimg_image::Result<()> {
        self.seen.push((array, face, mip, data.len()));
        Ok(())
    }

    fn finish(self) -> glimg_image::Result<Self::Output> {
        Ok(self.seen)
    }
}

#[test]
fn test_assembler_receives_storage_order() {
    let data = DdsBuilder::new(4, 4)
        .four_cc(b"DXT1")
        .mips(2)
        .caps2(caps2::CUBEMAP_ALL)
        .build(6 * 16);
    let dds = DdsFile::parse(&data, "cube.dds").unwrap();

    let seen = dds.assemble(OrderRecorder::default()).unwrap();
    assert_eq!(seen.len(), 12);
    assert_eq!(&seen[..3], &[(0, 0, 0, 8), (0, 0, 1, 8), (0, 1, 0, 8)]);
}
