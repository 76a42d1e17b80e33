//! Per-pixel launch over an output grid.
//!
//! [`render`] evaluates a bound variant once for every pixel of a
//! `width × height` target. A mapping function turns each output pixel into
//! the region-relative coordinate to sample, the same way a kernel launch
//! computes its `(x_mapped, y_mapped)` before calling into the sampler.
//!
//! When the `parallel` feature is enabled, rows are processed with rayon.
//!
//! # Example
//!
//! ```rust
//! use vfx_resample::{Access, BufferView, Region, VariantTable};
//! use vfx_resample::launch::rescale;
//!
//! let data: Vec<f32> = vec![0.5; 64];
//! let buf = BufferView::packed(&data, 8, 8).unwrap();
//! let access = Access::new(&buf, Region::full(8, 8).unwrap()).unwrap();
//!
//! let table = VariantTable::full();
//! let variant = table.lookup("interpolate_cubic_clamp_tblr_f32_buf").unwrap();
//! let half = rescale(&variant.bind(access).unwrap(), 4, 4);
//! assert_eq!(half.len(), 16);
//! ```

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::debug;

use crate::access::PixelSource;
use crate::pixel::{Accumulator, Sample};
use crate::variant::Bound;

/// Samples `bound` for every pixel of a `width × height` grid.
///
/// `map(x, y)` returns the region-relative coordinate for output pixel
/// `(x, y)`. Output is row-major.
#[cfg(feature = "parallel")]
pub fn render<S, F>(bound: &Bound<'_, '_, S>, width: usize, height: usize, map: F) -> Vec<S::Pixel>
where
    S: PixelSource,
    F: Fn(usize, usize) -> (f32, f32) + Sync,
{
    debug!(variant = %bound.variant().id(), width, height, "render (parallel)");
    let mut dst = blank::<S>(width * height);
    if dst.is_empty() {
        return dst;
    }

    dst.par_chunks_mut(width)
        .enumerate()
        .for_each(|(y, row)| render_row(bound, y, row, &map));

    dst
}

/// Samples `bound` for every pixel of a `width × height` grid.
///
/// `map(x, y)` returns the region-relative coordinate for output pixel
/// `(x, y)`. Output is row-major.
#[cfg(not(feature = "parallel"))]
pub fn render<S, F>(bound: &Bound<'_, '_, S>, width: usize, height: usize, map: F) -> Vec<S::Pixel>
where
    S: PixelSource,
    F: Fn(usize, usize) -> (f32, f32),
{
    render_serial(bound, width, height, map)
}

/// Single-threaded [`render`], available regardless of features.
pub fn render_serial<S, F>(
    bound: &Bound<'_, '_, S>,
    width: usize,
    height: usize,
    map: F,
) -> Vec<S::Pixel>
where
    S: PixelSource,
    F: Fn(usize, usize) -> (f32, f32),
{
    debug!(variant = %bound.variant().id(), width, height, "render");
    let mut dst = blank::<S>(width * height);
    if dst.is_empty() {
        return dst;
    }

    for (y, row) in dst.chunks_mut(width).enumerate() {
        render_row(bound, y, row, &map);
    }

    dst
}

/// Resamples the whole bound region to `width × height`.
///
/// Output pixel centres are mapped proportionally onto the region, so
/// `rescale(b, w, h)` on a `w × h` region is an identity for bilinear and
/// bicubic variants.
pub fn rescale<S: PixelSource>(
    bound: &Bound<'_, '_, S>,
    width: usize,
    height: usize,
) -> Vec<S::Pixel> {
    let region = bound.access().region();
    let map = scale_map(region.width(), region.height(), width, height);
    render(bound, width, height, map)
}

/// Maps output pixel centres of a `dst_w × dst_h` grid onto a
/// `src_w × src_h` region.
pub fn scale_map(
    src_w: i32,
    src_h: i32,
    dst_w: usize,
    dst_h: usize,
) -> impl Fn(usize, usize) -> (f32, f32) + Sync + Copy {
    let sx = src_w as f32 / dst_w.max(1) as f32;
    let sy = src_h as f32 / dst_h.max(1) as f32;
    move |x, y| ((x as f32 + 0.5) * sx, (y as f32 + 0.5) * sy)
}

#[inline]
fn render_row<S, F>(bound: &Bound<'_, '_, S>, y: usize, row: &mut [S::Pixel], map: &F)
where
    S: PixelSource,
    F: Fn(usize, usize) -> (f32, f32),
{
    for (x, out) in row.iter_mut().enumerate() {
        let (sx, sy) = map(x, y);
        *out = bound.sample(sx, sy);
    }
}

fn blank<S: PixelSource>(len: usize) -> Vec<S::Pixel> {
    vec![<S::Pixel as Sample>::narrow(Accumulator::zero()); len]
}
