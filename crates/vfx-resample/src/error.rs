//! Error types for resampler construction and binding.
//!
//! Sampling itself never fails. Everything that can go wrong is caught
//! earlier, when a region, a storage view or a variant binding is built.

use thiserror::Error;

use crate::pixel::DataType;
use crate::access::Backend;

/// Error type for resampler setup.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResampleError {
    /// Region has a non-positive extent or does not fit its source.
    #[error("invalid region: {0}")]
    InvalidRegion(String),

    /// Row stride is non-positive or smaller than the row width.
    #[error("stride {stride} is invalid for width {width}")]
    InvalidStride {
        /// Provided stride
        stride: i32,
        /// Row width
        width: i32,
    },

    /// Backing slice is too short for the declared layout.
    #[error("buffer too small: need {needed} elements, got {got}")]
    BufferTooSmall {
        /// Elements required by width/height/stride
        needed: usize,
        /// Elements actually provided
        got: usize,
    },

    /// Variant binds a constant edge but no fallback value was supplied.
    #[error("variant {0} has a constant edge and needs a fallback value")]
    FallbackRequired(String),

    /// A fallback value was supplied for a variant without constant edges.
    #[error("variant {0} takes no fallback value")]
    UnexpectedFallback(String),

    /// Access element type differs from the variant's element type.
    #[error("type mismatch: variant expects {expected}, access provides {got}")]
    TypeMismatch {
        /// Element type named by the variant
        expected: DataType,
        /// Element type of the access
        got: DataType,
    },

    /// Access storage backend differs from the variant's backend.
    #[error("backend mismatch: variant expects {expected}, access provides {got}")]
    BackendMismatch {
        /// Backend named by the variant
        expected: Backend,
        /// Backend of the access
        got: Backend,
    },

    /// No variant with this identifier was generated.
    #[error("unknown variant: {0}")]
    UnknownVariant(String),

    /// Identifier could not be parsed.
    #[error("cannot parse variant identifier '{name}': {reason}")]
    ParseVariant {
        /// Identifier text
        name: String,
        /// What was wrong with it
        reason: String,
    },
}

impl ResampleError {
    /// Creates a [`ResampleError::ParseVariant`] error.
    #[inline]
    pub fn parse(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ParseVariant {
            name: name.into(),
            reason: reason.into(),
        }
    }
}

/// Result type for resampler setup.
pub type ResampleResult<T> = Result<T, ResampleError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_carry_context() {
        let err = ResampleError::InvalidStride { stride: 2, width: 4 };
        let msg = err.to_string();
        assert!(msg.contains('2'));
        assert!(msg.contains('4'));

        let err = ResampleError::parse("interpolate_foo", "unknown filter 'foo'");
        assert!(err.to_string().contains("interpolate_foo"));
    }

    #[test]
    fn test_mismatch_names_both_sides() {
        let err = ResampleError::BackendMismatch {
            expected: Backend::Texture,
            got: Backend::Buffer,
        };
        let msg = err.to_string();
        assert!(msg.contains("tex"));
        assert!(msg.contains("buf"));
    }
}
