//! Rectangular sampling regions.

use std::fmt;

use crate::error::{ResampleError, ResampleResult};

/// Rectangle `[offset_x, offset_x + width) × [offset_y, offset_y + height)`
/// in storage coordinates.
///
/// Sample coordinates are relative to the region origin; taps are moved into
/// storage space by adding the offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Region {
    offset_x: i32,
    offset_y: i32,
    width: i32,
    height: i32,
}

impl Region {
    /// Creates a region, rejecting non-positive extents and negative offsets.
    ///
    /// # Example
    ///
    /// ```rust
    /// use vfx_resample::Region;
    ///
    /// let r = Region::new(2, 1, 4, 3).unwrap();
    /// assert_eq!(r.right(), 6);
    /// assert!(Region::new(0, 0, 0, 3).is_err());
    /// ```
    pub fn new(offset_x: i32, offset_y: i32, width: i32, height: i32) -> ResampleResult<Self> {
        if width <= 0 || height <= 0 {
            return Err(ResampleError::InvalidRegion(format!(
                "extent must be positive, got {width}x{height}"
            )));
        }
        if offset_x < 0 || offset_y < 0 {
            return Err(ResampleError::InvalidRegion(format!(
                "offset must be non-negative, got ({offset_x}, {offset_y})"
            )));
        }
        if offset_x.checked_add(width).is_none() || offset_y.checked_add(height).is_none() {
            return Err(ResampleError::InvalidRegion("region end overflows i32".into()));
        }
        Ok(Self { offset_x, offset_y, width, height })
    }

    /// Region covering a whole `width × height` image.
    pub fn full(width: i32, height: i32) -> ResampleResult<Self> {
        Self::new(0, 0, width, height)
    }

    /// Left edge (inclusive).
    #[inline]
    pub fn offset_x(&self) -> i32 {
        self.offset_x
    }

    /// Top edge (inclusive).
    #[inline]
    pub fn offset_y(&self) -> i32 {
        self.offset_y
    }

    /// Horizontal extent.
    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Vertical extent.
    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Right edge (exclusive).
    #[inline]
    pub fn right(&self) -> i32 {
        self.offset_x + self.width
    }

    /// Bottom edge (exclusive).
    #[inline]
    pub fn bottom(&self) -> i32 {
        self.offset_y + self.height
    }

    /// Returns `true` if storage coordinate `(x, y)` is inside the region.
    #[inline]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.offset_x && x < self.right() && y >= self.offset_y && y < self.bottom()
    }

    /// Returns `true` if this region lies within `[0, width) × [0, height)`.
    pub fn fits_within(&self, width: i32, height: i32) -> bool {
        self.right() <= width && self.bottom() <= height
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}, {}x{})",
            self.offset_x, self.offset_y, self.width, self.height
        )
    }
}
