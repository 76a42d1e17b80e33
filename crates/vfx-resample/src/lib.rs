//! # vfx-resample
//!
//! Sub-pixel image resampling with per-edge border handling.
//!
//! Given a continuous coordinate inside a rectangular region of a 2D image,
//! this crate computes an interpolated sample using one of three
//! reconstruction filters, while controlling what happens when filter taps
//! fall outside the region.
//!
//! # Modules
//!
//! - [`border`] - Per-edge index resolution (clamp, repeat, mirror, constant)
//! - [`access`] - Buffer and texture storage behind one read interface
//! - [`filter`] - Bilinear, bicubic and Lanczos-3 kernels
//! - [`variant`] - Named, validated sampling variants
//! - [`launch`] - Per-pixel evaluation over an output grid
//! - [`pixel`] - Element types (`f16`, `f32`, `f64`, `Vec2`..`Vec4`)
//! - [`region`] - Rectangular sampling bounds
//!
//! # Example
//!
//! ```rust
//! use vfx_resample::{Access, BufferView, Region, VariantTable};
//!
//! // 4x4 ramp 0..15
//! let data: Vec<f32> = (0..16).map(|v| v as f32).collect();
//! let buf = BufferView::new(&data, 4, 4, 4).unwrap();
//! let region = Region::full(4, 4).unwrap();
//!
//! let table = VariantTable::full();
//!
//! // Constant left edge: taps left of the region read the fallback
//! let variant = table.lookup("interpolate_linear_const_l_f32_buf").unwrap();
//! let sampler = variant.bind(Access::with_fallback(&buf, region, -1.0).unwrap()).unwrap();
//! assert_eq!(sampler.sample(-1.0, 0.5), -1.0);
//! ```
//!
//! # Composing edges directly
//!
//! Variants cover one policy on a set of edges. For other mixes build a
//! [`Resampler`] from [`EdgeBorders`]:
//!
//! ```rust
//! use vfx_resample::{Access, BufferView, Region, Resampler};
//! use vfx_resample::border::{BorderPolicy, EdgeBorders};
//! use vfx_resample::filter::Filter;
//!
//! let borders = EdgeBorders::none()
//!     .with_left(BorderPolicy::Repeat)
//!     .with_right(BorderPolicy::Repeat)
//!     .with_top(BorderPolicy::Clamp)
//!     .with_bottom(BorderPolicy::Mirror);
//! let resampler = Resampler::new(Filter::Lanczos3, borders);
//!
//! let data = vec![1.0f32; 16];
//! let buf = BufferView::packed(&data, 4, 4).unwrap();
//! let access = Access::new(&buf, Region::full(4, 4).unwrap()).unwrap();
//! let v = resampler.sample(&access, 0.1, 3.9);
//! assert!((v - 1.0).abs() < 0.02);
//! ```
//!
//! # Features
//!
//! - `parallel` (default) - multi-threaded [`launch::render`] via rayon

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
pub mod access;
pub mod border;
pub mod filter;
pub mod launch;
pub mod pixel;
pub mod region;
pub mod variant;

pub use access::{Access, Backend, BufferView, Channel, PixelSource, TextureView};
pub use border::{BorderPolicy, EdgeBorders};
pub use error::{ResampleError, ResampleResult};
pub use filter::Filter;
pub use pixel::{DataType, Sample};
pub use region::Region;
pub use variant::{Bound, Edges, Resampler, Variant, VariantId, VariantTable};
