//! Image extents.

/// Extents of an image with 1 to 3 active axes.
///
/// Axes beyond `num_dimensions` are not meaningful and are kept at 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Dimensions {
    pub num_dimensions: u32,
    pub width: u32,
    pub height: u32,
    pub depth: u32,
}

impl Dimensions {
    /// A 1D extent.
    pub const fn new_1d(width: u32) -> Self {
        Self {
            num_dimensions: 1,
            width,
            height: 0,
            depth: 0,
        }
    }

    /// A 2D extent.
    pub const fn new_2d(width: u32, height: u32) -> Self {
        Self {
            num_dimensions: 2,
            width,
            height,
            depth: 0,
        }
    }

    /// A 3D extent.
    pub const fn new_3d(width: u32, height: u32, depth: u32) -> Self {
        Self {
            num_dimensions: 3,
            width,
            height,
            depth,
        }
    }

    /// Extents of the given mip level.
    ///
    /// Each active axis is halved per level and never drops below 1.
    pub fn mip_level(&self, level: u32) -> Self {
        let shrink = |axis: u32| axis.checked_shr(level).unwrap_or(0).max(1);

        let mut mip = Self::new_1d(shrink(self.width));
        if self.num_dimensions > 1 {
            mip.num_dimensions = 2;
            mip.height = shrink(self.height);
        }
        if self.num_dimensions > 2 {
            mip.num_dimensions = 3;
            mip.depth = shrink(self.depth);
        }
        mip
    }

    /// Number of texels covered by the active axes.
    pub fn texel_count(&self) -> u64 {
        let mut count = u64::from(self.width);
        if self.num_dimensions > 1 {
            count *= u64::from(self.height);
        }
        if self.num_dimensions > 2 {
            count *= u64::from(self.depth);
        }
        count
    }
}
