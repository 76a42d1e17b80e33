//! Pixel element types the filters can accumulate.
//!
//! Filters work on any [`Sample`]: a scalar or small vector element that can
//! be widened into an [`Accumulator`], weighted, summed and narrowed back.
//! Channels of a vector element are weighted independently; there is no
//! cross-channel blending.
//!
//! | Element | Accumulator | [`DataType`] |
//! |---|---|---|
//! | `f16` | `f32` | `f16` |
//! | `f32` | `f32` | `f32` |
//! | `f64` | `f64` | `f64` |
//! | `Vec2` | `Vec2` | `vec2` |
//! | `Vec3` | `Vec3` | `vec3` |
//! | `Vec4` | `Vec4` | `vec4` |
//!
//! # Example
//!
//! ```rust
//! use vfx_resample::pixel::{Accumulator, Sample};
//!
//! let acc = <f32 as Accumulator>::zero()
//!     .madd(2.0f32.widen(), 0.25)
//!     .madd(4.0f32.widen(), 0.75);
//! assert_eq!(f32::narrow(acc), 3.5);
//! ```

use std::fmt;
use std::str::FromStr;

use glam::{Vec2, Vec3, Vec4};
use half::f16;

use crate::error::{ResampleError, ResampleResult};

/// Weighted running sum used while a filter combines its taps.
pub trait Accumulator: Copy + Send + Sync {
    /// Additive identity.
    fn zero() -> Self;

    /// Returns `self + value * weight`.
    fn madd(self, value: Self, weight: f32) -> Self;
}

impl Accumulator for f32 {
    #[inline]
    fn zero() -> Self {
        0.0
    }

    #[inline]
    fn madd(self, value: Self, weight: f32) -> Self {
        self + value * weight
    }
}

impl Accumulator for f64 {
    #[inline]
    fn zero() -> Self {
        0.0
    }

    #[inline]
    fn madd(self, value: Self, weight: f32) -> Self {
        self + value * weight as f64
    }
}

macro_rules! impl_vec_accumulator {
    ($($ty:ty),*) => {
        $(
            impl Accumulator for $ty {
                #[inline]
                fn zero() -> Self {
                    <$ty>::ZERO
                }

                #[inline]
                fn madd(self, value: Self, weight: f32) -> Self {
                    self + value * weight
                }
            }
        )*
    };
}

impl_vec_accumulator!(Vec2, Vec3, Vec4);

/// Element type tag, part of every variant identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DataType {
    /// Half-precision scalar.
    F16,
    /// Single-precision scalar.
    F32,
    /// Double-precision scalar.
    F64,
    /// Two-channel float vector.
    Vec2,
    /// Three-channel float vector.
    Vec3,
    /// Four-channel float vector.
    Vec4,
}

impl DataType {
    /// Every supported element type.
    pub const ALL: [DataType; 6] = [
        DataType::F16,
        DataType::F32,
        DataType::F64,
        DataType::Vec2,
        DataType::Vec3,
        DataType::Vec4,
    ];

    /// Short name used in identifiers.
    pub fn name(&self) -> &'static str {
        match self {
            DataType::F16 => "f16",
            DataType::F32 => "f32",
            DataType::F64 => "f64",
            DataType::Vec2 => "vec2",
            DataType::Vec3 => "vec3",
            DataType::Vec4 => "vec4",
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DataType {
    type Err = ResampleError;

    fn from_str(s: &str) -> ResampleResult<Self> {
        DataType::ALL
            .into_iter()
            .find(|t| t.name() == s)
            .ok_or_else(|| ResampleError::parse(s, format!("unknown data type '{s}'")))
    }
}

/// A pixel element a filter can interpolate.
pub trait Sample: Copy + PartialEq + fmt::Debug + Send + Sync + 'static {
    /// Precision the weighted sum is carried in.
    type Accum: Accumulator;

    /// Tag naming this type in variant identifiers.
    const DATA_TYPE: DataType;

    /// Converts into the accumulator type.
    fn widen(self) -> Self::Accum;

    /// Converts a finished sum back into the element type.
    fn narrow(acc: Self::Accum) -> Self;
}

impl Sample for f32 {
    type Accum = f32;
    const DATA_TYPE: DataType = DataType::F32;

    #[inline]
    fn widen(self) -> f32 {
        self
    }

    #[inline]
    fn narrow(acc: f32) -> Self {
        acc
    }
}

impl Sample for f64 {
    type Accum = f64;
    const DATA_TYPE: DataType = DataType::F64;

    #[inline]
    fn widen(self) -> f64 {
        self
    }

    #[inline]
    fn narrow(acc: f64) -> Self {
        acc
    }
}

impl Sample for f16 {
    type Accum = f32;
    const DATA_TYPE: DataType = DataType::F16;

    #[inline]
    fn widen(self) -> f32 {
        self.to_f32()
    }

    #[inline]
    fn narrow(acc: f32) -> Self {
        f16::from_f32(acc)
    }
}

macro_rules! impl_vec_sample {
    ($($ty:ty => $tag:expr),*) => {
        $(
            impl Sample for $ty {
                type Accum = $ty;
                const DATA_TYPE: DataType = $tag;

                #[inline]
                fn widen(self) -> $ty {
                    self
                }

                #[inline]
                fn narrow(acc: $ty) -> Self {
                    acc
                }
            }
        )*
    };
}

impl_vec_sample!(Vec2 => DataType::Vec2, Vec3 => DataType::Vec3, Vec4 => DataType::Vec4);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_type_names_parse_back() {
        for t in DataType::ALL {
            assert_eq!(t.name().parse::<DataType>().unwrap(), t);
        }
        assert!("float4".parse::<DataType>().is_err());
    }

    #[test]
    fn test_half_accumulates_in_f32() {
        let a = f16::from_f32(1.0).widen();
        let b = f16::from_f32(3.0).widen();
        let acc = f32::zero().madd(a, 0.5).madd(b, 0.5);
        assert_eq!(f16::narrow(acc), f16::from_f32(2.0));
    }

    #[test]
    fn test_vector_channels_are_independent() {
        let acc = Vec3::zero()
            .madd(Vec3::new(1.0, 0.0, 4.0), 0.5)
            .madd(Vec3::new(3.0, 2.0, 0.0), 0.5);
        assert_eq!(acc, Vec3::new(2.0, 1.0, 2.0));
    }

    #[test]
    fn test_f64_weight_widening() {
        let acc = f64::zero().madd(10.0, 0.25);
        assert_eq!(acc, 2.5);
    }
}
