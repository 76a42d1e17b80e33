//! Uniform pixel reads over buffer and texture storage.
//!
//! Filters never touch storage directly. They hand every resolved [`Tap`] to
//! an [`Access`], which either reads the pixel through its [`PixelSource`] or
//! substitutes the fallback value when a constant edge put the tap outside.
//!
//! Two storage backends are provided:
//!
//! - [`BufferView`] - linear memory, `data[x + y * stride]`
//! - [`TextureView`] - four-channel texels fetched by integer texel address
//!   with nearest filtering; one fixed [`Channel`] is returned
//!
//! For equal pixel data both backends return bit-identical samples.
//!
//! # Example
//!
//! ```rust
//! use vfx_resample::{Access, BufferView, Region};
//! use vfx_resample::border::Resolved;
//! use vfx_resample::access::Tap;
//!
//! let data: Vec<f32> = (0..16).map(|v| v as f32).collect();
//! let buf = BufferView::new(&data, 4, 4, 4).unwrap();
//! let access = Access::new(&buf, Region::full(4, 4).unwrap()).unwrap();
//!
//! assert_eq!(access.read(1, 2), 9.0);
//! let outside = Tap::new(Resolved::Outside, Resolved::Inside(0));
//! assert_eq!(access.read_or_fallback(outside, -1.0), -1.0);
//! ```

use std::fmt;
use std::str::FromStr;

use bytemuck::Pod;

use crate::border::Resolved;
use crate::error::{ResampleError, ResampleResult};
use crate::pixel::{Accumulator, Sample};
use crate::region::Region;

/// Physical storage kind behind an [`Access`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Backend {
    /// Stride-addressed linear buffer.
    Buffer,
    /// Texture with nearest texel fetch.
    Texture,
}

impl Backend {
    /// Both backends.
    pub const ALL: [Backend; 2] = [Backend::Buffer, Backend::Texture];

    /// Short name used in identifiers.
    pub fn name(&self) -> &'static str {
        match self {
            Backend::Buffer => "buf",
            Backend::Texture => "tex",
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Backend {
    type Err = ResampleError;

    fn from_str(s: &str) -> ResampleResult<Self> {
        match s {
            "buf" | "buffer" => Ok(Backend::Buffer),
            "tex" | "texture" => Ok(Backend::Texture),
            _ => Err(ResampleError::parse(s, format!("unknown backend '{s}'"))),
        }
    }
}

/// Read-only pixel storage addressed by in-bounds integer coordinates.
pub trait PixelSource: Sync {
    /// Element type stored per pixel.
    type Pixel: Sample;

    /// Backend tag of this storage.
    const BACKEND: Backend;

    /// Storage width in pixels.
    fn width(&self) -> i32;

    /// Storage height in pixels.
    fn height(&self) -> i32;

    /// Reads the pixel at `(x, y)`.
    ///
    /// Coordinates must lie within `[0, width) × [0, height)`. Debug builds
    /// assert this; slice indexing still bounds-checks in release.
    fn fetch(&self, x: i32, y: i32) -> Self::Pixel;
}

/// Linear buffer view with a row pitch.
#[derive(Debug, Clone, Copy)]
pub struct BufferView<'a, T> {
    data: &'a [T],
    width: i32,
    height: i32,
    stride: i32,
}

impl<'a, T: Sample> BufferView<'a, T> {
    /// Creates a view over `data` with `stride` elements between rows.
    pub fn new(data: &'a [T], width: i32, height: i32, stride: i32) -> ResampleResult<Self> {
        if width <= 0 || height <= 0 {
            return Err(ResampleError::InvalidRegion(format!(
                "buffer extent must be positive, got {width}x{height}"
            )));
        }
        if stride <= 0 || stride < width {
            return Err(ResampleError::InvalidStride { stride, width });
        }
        let needed = stride as usize * (height as usize - 1) + width as usize;
        if data.len() < needed {
            return Err(ResampleError::BufferTooSmall { needed, got: data.len() });
        }
        Ok(Self { data, width, height, stride })
    }

    /// Creates a tightly packed view (`stride == width`).
    pub fn packed(data: &'a [T], width: i32, height: i32) -> ResampleResult<Self> {
        Self::new(data, width, height, width)
    }

    /// Elements between the starts of consecutive rows.
    #[inline]
    pub fn stride(&self) -> i32 {
        self.stride
    }
}

impl<T: Sample> PixelSource for BufferView<'_, T> {
    type Pixel = T;
    const BACKEND: Backend = Backend::Buffer;

    #[inline]
    fn width(&self) -> i32 {
        self.width
    }

    #[inline]
    fn height(&self) -> i32 {
        self.height
    }

    #[inline]
    fn fetch(&self, x: i32, y: i32) -> T {
        debug_assert!(x >= 0 && x < self.width && y >= 0 && y < self.height);
        self.data[x as usize + y as usize * self.stride as usize]
    }
}

/// Texel channel returned by a [`TextureView`] fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Channel {
    /// First channel.
    #[default]
    X = 0,
    /// Second channel.
    Y = 1,
    /// Third channel.
    Z = 2,
    /// Fourth channel.
    W = 3,
}

/// Four-channel texture with nearest, unnormalized texel addressing.
#[derive(Debug, Clone, Copy)]
pub struct TextureView<'a, T> {
    texels: &'a [[T; 4]],
    width: i32,
    height: i32,
    channel: Channel,
}

impl<'a, T: Sample> TextureView<'a, T> {
    /// Creates a texture over row-major texels, returning [`Channel::X`].
    pub fn new(texels: &'a [[T; 4]], width: i32, height: i32) -> ResampleResult<Self> {
        if width <= 0 || height <= 0 {
            return Err(ResampleError::InvalidRegion(format!(
                "texture extent must be positive, got {width}x{height}"
            )));
        }
        let needed = width as usize * height as usize;
        if texels.len() < needed {
            return Err(ResampleError::BufferTooSmall { needed, got: texels.len() });
        }
        Ok(Self {
            texels,
            width,
            height,
            channel: Channel::X,
        })
    }

    /// Selects the channel every fetch returns.
    pub fn with_channel(mut self, channel: Channel) -> Self {
        self.channel = channel;
        self
    }

    /// Channel every fetch returns.
    pub fn channel(&self) -> Channel {
        self.channel
    }
}

impl<'a, T: Sample + Pod> TextureView<'a, T> {
    /// Creates a texture over interleaved RGBA-style data.
    ///
    /// `data.len()` must be a multiple of four.
    pub fn from_interleaved(data: &'a [T], width: i32, height: i32) -> ResampleResult<Self> {
        let texels: &[[T; 4]] = bytemuck::try_cast_slice(data).map_err(|_| {
            ResampleError::InvalidRegion(format!(
                "interleaved texture needs a multiple of 4 elements, got {}",
                data.len()
            ))
        })?;
        Self::new(texels, width, height)
    }
}

impl<T: Sample> PixelSource for TextureView<'_, T> {
    type Pixel = T;
    const BACKEND: Backend = Backend::Texture;

    #[inline]
    fn width(&self) -> i32 {
        self.width
    }

    #[inline]
    fn height(&self) -> i32 {
        self.height
    }

    #[inline]
    fn fetch(&self, x: i32, y: i32) -> T {
        debug_assert!(x >= 0 && x < self.width && y >= 0 && y < self.height);
        self.texels[x as usize + y as usize * self.width as usize][self.channel as usize]
    }
}

/// One filter tap after border resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tap {
    /// Resolved column.
    pub x: Resolved,
    /// Resolved row.
    pub y: Resolved,
}

impl Tap {
    /// Creates a tap from its resolved coordinates.
    #[inline]
    pub fn new(x: Resolved, y: Resolved) -> Self {
        Self { x, y }
    }

    /// Storage coordinates, or `None` if either axis is outside.
    #[inline]
    pub fn coords(&self) -> Option<(i32, i32)> {
        Some((self.x.index()?, self.y.index()?))
    }
}

/// A storage view restricted to a region, plus the optional fallback value.
pub struct Access<'a, S: PixelSource> {
    source: &'a S,
    region: Region,
    fallback: Option<S::Pixel>,
}

impl<'a, S: PixelSource> Access<'a, S> {
    /// Creates an access without a fallback value.
    ///
    /// Fails if `region` is not contained in the source.
    pub fn new(source: &'a S, region: Region) -> ResampleResult<Self> {
        if !region.fits_within(source.width(), source.height()) {
            return Err(ResampleError::InvalidRegion(format!(
                "region {region} exceeds source {}x{}",
                source.width(),
                source.height()
            )));
        }
        Ok(Self {
            source,
            region,
            fallback: None,
        })
    }

    /// Creates an access whose outside taps read as `fallback`.
    pub fn with_fallback(
        source: &'a S,
        region: Region,
        fallback: S::Pixel,
    ) -> ResampleResult<Self> {
        let mut access = Self::new(source, region)?;
        access.fallback = Some(fallback);
        Ok(access)
    }

    /// Region taps are resolved against.
    #[inline]
    pub fn region(&self) -> &Region {
        &self.region
    }

    /// Fallback value, if any.
    #[inline]
    pub fn fallback(&self) -> Option<S::Pixel> {
        self.fallback
    }

    /// Underlying storage.
    #[inline]
    pub fn source(&self) -> &'a S {
        self.source
    }

    /// Reads storage at resolved coordinates.
    #[inline]
    pub fn read(&self, x: i32, y: i32) -> S::Pixel {
        self.source.fetch(x, y)
    }

    /// Reads `tap`, returning `fallback` untouched if it lies outside.
    #[inline]
    pub fn read_or_fallback(&self, tap: Tap, fallback: S::Pixel) -> S::Pixel {
        match tap.coords() {
            Some((x, y)) => self.read(x, y),
            None => fallback,
        }
    }

    /// Reads `tap` using the stored fallback.
    ///
    /// Without a fallback an outside tap reads as zero. Variant binding
    /// never pairs such an access with a constant edge.
    #[inline]
    pub fn tap(&self, tap: Tap) -> S::Pixel {
        match self.fallback {
            Some(fallback) => self.read_or_fallback(tap, fallback),
            None => self.read_or_fallback(tap, S::Pixel::narrow(Accumulator::zero())),
        }
    }
}

impl<S: PixelSource> Clone for Access<'_, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S: PixelSource> Copy for Access<'_, S> {}

impl<S: PixelSource> fmt::Debug for Access<'_, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Access")
            .field("backend", &S::BACKEND)
            .field("region", &self.region)
            .field("fallback", &self.fallback)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec4;

    fn ramp(w: i32, h: i32) -> Vec<f32> {
        (0..w * h).map(|v| v as f32).collect()
    }

    #[test]
    fn test_buffer_respects_stride() {
        // 3x2 pixels padded to a pitch of 5
        let data = [0.0, 1.0, 2.0, -9.0, -9.0, 10.0, 11.0, 12.0];
        let buf = BufferView::new(&data[..], 3, 2, 5).unwrap();
        assert_eq!(buf.fetch(0, 1), 10.0);
        assert_eq!(buf.fetch(2, 1), 12.0);
    }

    #[test]
    fn test_buffer_validation() {
        let data = ramp(4, 4);
        assert!(matches!(
            BufferView::new(&data, 4, 4, 3),
            Err(ResampleError::InvalidStride { .. })
        ));
        assert!(matches!(
            BufferView::new(&data, 4, 5, 4),
            Err(ResampleError::BufferTooSmall { needed: 20, got: 16 })
        ));
        assert!(BufferView::new(&data, 0, 4, 4).is_err());
    }

    #[test]
    fn test_texture_selects_channel() {
        let texels = [[1.0f32, 2.0, 3.0, 4.0], [5.0, 6.0, 7.0, 8.0]];
        let tex = TextureView::new(&texels, 2, 1).unwrap();
        assert_eq!(tex.fetch(1, 0), 5.0);
        let tex = tex.with_channel(Channel::W);
        assert_eq!(tex.fetch(0, 0), 4.0);
    }

    #[test]
    fn test_texture_from_interleaved() {
        let data = [0.0f32, 0.5, 0.5, 1.0, 2.0, 0.5, 0.5, 1.0];
        let tex = TextureView::from_interleaved(&data, 2, 1).unwrap();
        assert_eq!(tex.fetch(1, 0), 2.0);
        assert!(TextureView::from_interleaved(&data[..7], 2, 1).is_err());
    }

    #[test]
    fn test_half_texture_from_interleaved() {
        use half::f16;
        let data: Vec<f16> = [0.25f32, 0.0, 0.0, 1.0, 1.5, 0.0, 0.0, 1.0, -2.0, 0.0, 0.0, 1.0]
            .into_iter()
            .map(f16::from_f32)
            .collect();
        let tex = TextureView::from_interleaved(&data, 3, 1).unwrap();
        assert_eq!(tex.fetch(1, 0), f16::from_f32(1.5));
        assert_eq!(tex.fetch(2, 0), f16::from_f32(-2.0));
        assert_eq!(tex.with_channel(Channel::W).fetch(0, 0), f16::ONE);
    }

    #[test]
    fn test_backends_agree() {
        let data = ramp(3, 3);
        let texels: Vec<[f32; 4]> = data.iter().map(|&v| [v, 0.0, 0.0, 1.0]).collect();
        let buf = BufferView::packed(&data, 3, 3).unwrap();
        let tex = TextureView::new(&texels, 3, 3).unwrap();
        for y in 0..3 {
            for x in 0..3 {
                assert_eq!(buf.fetch(x, y).to_bits(), tex.fetch(x, y).to_bits());
            }
        }
    }

    #[test]
    fn test_fallback_is_bit_identical() {
        let data = ramp(2, 2);
        let buf = BufferView::packed(&data, 2, 2).unwrap();
        let region = Region::full(2, 2).unwrap();
        let fallback = f32::from_bits(0x7fc0_1234); // NaN with payload
        let access = Access::with_fallback(&buf, region, fallback).unwrap();

        let out = Tap::new(Resolved::Inside(0), Resolved::Outside);
        assert_eq!(access.tap(out).to_bits(), fallback.to_bits());
        assert_eq!(access.read_or_fallback(out, -1.0), -1.0);

        let inside = Tap::new(Resolved::Inside(1), Resolved::Inside(1));
        assert_eq!(access.tap(inside), 3.0);
    }

    #[test]
    fn test_access_rejects_oversized_region() {
        let data = ramp(4, 4);
        let buf = BufferView::packed(&data, 4, 4).unwrap();
        let region = Region::new(2, 0, 3, 4).unwrap();
        assert!(Access::new(&buf, region).is_err());
    }

    #[test]
    fn test_vector_pixels() {
        let data = [Vec4::new(1.0, 2.0, 3.0, 4.0), Vec4::ONE];
        let buf = BufferView::packed(&data, 2, 1).unwrap();
        let access = Access::new(&buf, Region::full(2, 1).unwrap()).unwrap();
        assert_eq!(access.read(0, 0), Vec4::new(1.0, 2.0, 3.0, 4.0));
        let out = Tap::new(Resolved::Outside, Resolved::Inside(0));
        assert_eq!(access.tap(out), Vec4::ZERO);
    }
}
