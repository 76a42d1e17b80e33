//! Reconstruction filters.
//!
//! Three separable filters turn a continuous coordinate into one sample:
//!
//! - [`Filter::Bilinear`] - 2×2 taps, triangle kernel
//! - [`Filter::Bicubic`] - 4×4 taps, Keys cubic convolution with `a = -0.5`
//! - [`Filter::Lanczos3`] - 6×6 taps, sinc windowed by sinc, radius 3
//!
//! # Coordinate convention
//!
//! Pixel `i` covers `[i, i + 1)` and has its centre at `i + 0.5`. A sample
//! coordinate is shifted by `-0.5`, split into `floor` and a fraction in
//! `[0, 1)`, then moved into storage space by the region offset. Sampling at
//! an exact pixel centre returns that pixel for bilinear and bicubic.
//!
//! Each axis gets `N` weights, one per tap; the weight of a tap is the kernel
//! evaluated at the distance between tap and sample position. Rows are
//! combined horizontally first, then the row sums vertically.
//!
//! # Example
//!
//! ```rust
//! use vfx_resample::filter::{bicubic_weights, keys_cubic, lanczos3};
//!
//! let w = bicubic_weights(0.3);
//! assert!((w.iter().sum::<f32>() - 1.0).abs() < 1e-5);
//! assert_eq!(keys_cubic(0.0), 1.0);
//! assert_eq!(lanczos3(3.0), 0.0);
//! ```

use std::f32::consts::PI;
use std::fmt;
use std::str::FromStr;

use crate::access::{Access, PixelSource, Tap};
use crate::border::{EdgeBorders, Resolved};
use crate::error::{ResampleError, ResampleResult};
use crate::pixel::{Accumulator, Sample};

/// Keys cubic convolution parameter.
pub const KEYS_A: f32 = -0.5;

/// Lanczos window radius.
pub const LANCZOS_RADIUS: f32 = 3.0;

/// Interpolation filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub enum Filter {
    /// 2×2 bilinear interpolation.
    #[default]
    Bilinear,
    /// 4×4 Keys bicubic interpolation.
    Bicubic,
    /// 6×6 Lanczos-3 interpolation.
    Lanczos3,
}

impl Filter {
    /// Every filter.
    pub const ALL: [Filter; 3] = [Filter::Bilinear, Filter::Bicubic, Filter::Lanczos3];

    /// Short name used in identifiers.
    pub fn name(&self) -> &'static str {
        match self {
            Filter::Bilinear => "linear",
            Filter::Bicubic => "cubic",
            Filter::Lanczos3 => "lanczos",
        }
    }

    /// Taps per axis.
    #[inline]
    pub fn taps(&self) -> usize {
        match self {
            Filter::Bilinear => 2,
            Filter::Bicubic => 4,
            Filter::Lanczos3 => 6,
        }
    }

    /// Kernel support radius.
    #[inline]
    pub fn support(&self) -> f32 {
        match self {
            Filter::Bilinear => 1.0,
            Filter::Bicubic => 2.0,
            Filter::Lanczos3 => LANCZOS_RADIUS,
        }
    }

    /// Offset of the first tap relative to `floor(coord - 0.5)`.
    #[inline]
    pub fn first_tap(&self) -> i32 {
        match self {
            Filter::Bilinear => 0,
            Filter::Bicubic => -1,
            Filter::Lanczos3 => -2,
        }
    }

    /// Evaluates the 1D kernel at distance `d`.
    #[inline]
    pub fn kernel(&self, d: f32) -> f32 {
        match self {
            Filter::Bilinear => triangle(d),
            Filter::Bicubic => keys_cubic(d),
            Filter::Lanczos3 => lanczos3(d),
        }
    }

    /// Per-tap weights for one axis at fractional offset `frac`.
    pub fn weights(&self, frac: f32) -> Vec<f32> {
        match self {
            Filter::Bilinear => bilinear_weights(frac).to_vec(),
            Filter::Bicubic => bicubic_weights(frac).to_vec(),
            Filter::Lanczos3 => lanczos3_weights(frac).to_vec(),
        }
    }

    /// Samples `access` at region-relative `(x, y)`.
    #[inline]
    pub fn sample<S: PixelSource>(
        &self,
        access: &Access<'_, S>,
        borders: &EdgeBorders,
        x: f32,
        y: f32,
    ) -> S::Pixel {
        let first = self.first_tap();
        match self {
            Filter::Bilinear => separable(access, borders, x, y, first, bilinear_weights),
            Filter::Bicubic => separable(access, borders, x, y, first, bicubic_weights),
            Filter::Lanczos3 => separable(access, borders, x, y, first, lanczos3_weights),
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Filter {
    type Err = ResampleError;

    fn from_str(s: &str) -> ResampleResult<Self> {
        match s {
            "linear" | "bilinear" => Ok(Filter::Bilinear),
            "cubic" | "bicubic" => Ok(Filter::Bicubic),
            "lanczos" | "lanczos3" => Ok(Filter::Lanczos3),
            _ => Err(ResampleError::parse(s, format!("unknown filter '{s}'"))),
        }
    }
}

/// Triangle (tent) kernel.
#[inline]
pub fn triangle(d: f32) -> f32 {
    let d = d.abs();
    if d < 1.0 { 1.0 - d } else { 0.0 }
}

/// Keys cubic convolution kernel with `a = -0.5`.
///
/// ```text
/// k(d) = (a+2)|d|³ - (a+3)|d|² + 1        |d| < 1
/// k(d) = a|d|³ - 5a|d|² + 8a|d| - 4a      1 ≤ |d| < 2
/// k(d) = 0                                 otherwise
/// ```
#[inline]
pub fn keys_cubic(d: f32) -> f32 {
    let a = KEYS_A;
    let d = d.abs();
    if d < 1.0 {
        (a + 2.0) * d * d * d - (a + 3.0) * d * d + 1.0
    } else if d < 2.0 {
        a * d * d * d - 5.0 * a * d * d + 8.0 * a * d - 4.0 * a
    } else {
        0.0
    }
}

/// Lanczos kernel with radius 3.
///
/// `L(0) = 1` and `L(d) = 0` for `|d| ≥ 3` hold exactly; the kernel is even.
#[inline]
pub fn lanczos3(d: f32) -> f32 {
    let a = LANCZOS_RADIUS;
    let d = d.abs();
    if d == 0.0 {
        1.0
    } else if d < a {
        a * (PI * d / a).sin() * (PI * d).sin() / (PI * PI * d * d)
    } else {
        0.0
    }
}

/// Bilinear weights for taps `base, base + 1`.
#[inline]
pub fn bilinear_weights(frac: f32) -> [f32; 2] {
    [1.0 - frac, frac]
}

/// Keys weights for taps `base - 1 ..= base + 2`.
#[inline]
pub fn bicubic_weights(frac: f32) -> [f32; 4] {
    std::array::from_fn(|j| keys_cubic(j as f32 - 1.0 - frac))
}

/// Lanczos-3 weights for taps `base - 2 ..= base + 3`.
#[inline]
pub fn lanczos3_weights(frac: f32) -> [f32; 6] {
    std::array::from_fn(|j| lanczos3(j as f32 - 2.0 - frac))
}

/// Splits a region-relative coordinate into tap base and fraction.
///
/// The float to int cast saturates, so far coordinates land on `i32::MIN`
/// or `i32::MAX` and stay outside the region.
#[inline]
fn split(coord: f32) -> (i32, f32) {
    let shifted = coord - 0.5;
    let base = shifted.floor();
    (base as i32, shifted - base)
}

/// N×N separable accumulation shared by all filters.
#[inline]
fn separable<S, const N: usize>(
    access: &Access<'_, S>,
    borders: &EdgeBorders,
    x: f32,
    y: f32,
    first: i32,
    weights: fn(f32) -> [f32; N],
) -> S::Pixel
where
    S: PixelSource,
{
    let region = access.region();
    let (bx, fx) = split(x);
    let (by, fy) = split(y);
    let wx = weights(fx);
    let wy = weights(fy);

    let x0 = bx.saturating_add(region.offset_x()).saturating_add(first);
    let y0 = by.saturating_add(region.offset_y()).saturating_add(first);

    let cols: [Resolved; N] = std::array::from_fn(|j| {
        borders.x.resolve(x0.saturating_add(j as i32), region.offset_x(), region.width())
    });

    let mut acc = <<S::Pixel as Sample>::Accum as Accumulator>::zero();
    for (i, &wy_i) in wy.iter().enumerate() {
        let y = y0.saturating_add(i as i32);
        let row = borders.y.resolve(y, region.offset_y(), region.height());
        let mut row_acc = <<S::Pixel as Sample>::Accum as Accumulator>::zero();
        for (&col, &wx_j) in cols.iter().zip(wx.iter()) {
            row_acc = row_acc.madd(access.tap(Tap::new(col, row)).widen(), wx_j);
        }
        acc = acc.madd(row_acc, wy_i);
    }
    S::Pixel::narrow(acc)
}
