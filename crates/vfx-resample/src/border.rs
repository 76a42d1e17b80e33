//! Border handling for filter taps that fall outside a region.
//!
//! Each edge of a region carries its own [`BorderPolicy`]. A policy is a pair
//! of pure index maps: one for the lower bound of an axis (left/top) and one
//! for the upper bound (right/bottom). An axis applies its lower map first,
//! then its upper map.
//!
//! | Policy | Below `lower` | At or above `upper` |
//! |---|---|---|
//! | `None` | unchanged | unchanged |
//! | `Clamp` | `lower` | `upper - 1` |
//! | `Repeat` | `+ period` until in range | `- period` until in range |
//! | `Mirror` | `lower + (lower - idx - 1)`, folded | `upper - (idx + 1 - upper)`, folded |
//! | `Constant` | [`Resolved::Outside`] | [`Resolved::Outside`] |
//!
//! `None` trusts the caller to keep every tap inside the region. `Mirror`
//! folds with period `2 * extent`: a single reflection while the tap
//! overshoots by less than one extent, and a back-and-forth walk beyond
//! that, so a 1-pixel region still resolves every tap to its only pixel.
//! `Repeat` and `Mirror` need a positive period.
//!
//! # Example
//!
//! ```rust
//! use vfx_resample::border::{BorderPolicy, Resolved};
//!
//! assert_eq!(BorderPolicy::Clamp.resolve_lower(-3, 0, 4), Resolved::Inside(0));
//! assert_eq!(BorderPolicy::Mirror.resolve_upper(5, 4, 4), Resolved::Inside(2));
//! assert_eq!(BorderPolicy::Constant.resolve_lower(-1, 0, 4), Resolved::Outside);
//! ```

use std::fmt;
use std::str::FromStr;

use crate::error::{ResampleError, ResampleResult};

/// Outcome of resolving one tap index against one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resolved {
    /// Index to read from storage.
    Inside(i32),
    /// Tap lies beyond a constant edge; its value is the fallback.
    Outside,
}

impl Resolved {
    /// Returns the index, or `None` for an outside tap.
    #[inline]
    pub fn index(self) -> Option<i32> {
        match self {
            Resolved::Inside(i) => Some(i),
            Resolved::Outside => None,
        }
    }

    /// Returns `true` for [`Resolved::Outside`].
    #[inline]
    pub fn is_outside(self) -> bool {
        matches!(self, Resolved::Outside)
    }

    #[inline]
    fn and_then(self, f: impl FnOnce(i32) -> Resolved) -> Resolved {
        match self {
            Resolved::Inside(i) => f(i),
            Resolved::Outside => Resolved::Outside,
        }
    }
}

/// Border handling rule for one edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub enum BorderPolicy {
    /// No handling; taps are assumed to be in range.
    #[default]
    None,
    /// Replicate the edge pixel.
    Clamp,
    /// Wrap around with the axis period.
    Repeat,
    /// Reflect about the edge (the edge pixel is repeated).
    Mirror,
    /// Substitute a caller-supplied fallback value.
    Constant,
}

impl BorderPolicy {
    /// Every policy, `None` first.
    pub const ALL: [BorderPolicy; 5] = [
        BorderPolicy::None,
        BorderPolicy::Clamp,
        BorderPolicy::Repeat,
        BorderPolicy::Mirror,
        BorderPolicy::Constant,
    ];

    /// Policies that actually modify out-of-range taps.
    pub const HANDLING: [BorderPolicy; 4] = [
        BorderPolicy::Clamp,
        BorderPolicy::Repeat,
        BorderPolicy::Mirror,
        BorderPolicy::Constant,
    ];

    /// Short name used in identifiers.
    pub fn name(&self) -> &'static str {
        match self {
            BorderPolicy::None => "none",
            BorderPolicy::Clamp => "clamp",
            BorderPolicy::Repeat => "repeat",
            BorderPolicy::Mirror => "mirror",
            BorderPolicy::Constant => "const",
        }
    }

    /// Resolves `idx` against the lower bound of an axis.
    ///
    /// `period` is only consulted by [`BorderPolicy::Repeat`] and [`BorderPolicy::Mirror`].
    #[inline]
    pub fn resolve_lower(self, idx: i32, lower: i32, period: i32) -> Resolved {
        if idx >= lower {
            return Resolved::Inside(idx);
        }
        match self {
            BorderPolicy::None => Resolved::Inside(idx),
            BorderPolicy::Clamp => Resolved::Inside(lower),
            BorderPolicy::Repeat => {
                debug_assert!(period > 0, "repeat period must be positive");
                Resolved::Inside(lower + wrap(idx as i64 - lower as i64, period))
            }
            BorderPolicy::Mirror => {
                debug_assert!(period > 0, "mirror period must be positive");
                Resolved::Inside(lower + fold(idx as i64 - lower as i64, period))
            }
            BorderPolicy::Constant => Resolved::Outside,
        }
    }

    /// Resolves `idx` against the (exclusive) upper bound of an axis.
    ///
    /// `period` is only consulted by [`BorderPolicy::Repeat`] and [`BorderPolicy::Mirror`].
    #[inline]
    pub fn resolve_upper(self, idx: i32, upper: i32, period: i32) -> Resolved {
        if idx < upper {
            return Resolved::Inside(idx);
        }
        match self {
            BorderPolicy::None => Resolved::Inside(idx),
            BorderPolicy::Clamp => Resolved::Inside(upper - 1),
            BorderPolicy::Repeat => {
                debug_assert!(period > 0, "repeat period must be positive");
                Resolved::Inside(upper - 1 - wrap(upper as i64 - 1 - idx as i64, period))
            }
            BorderPolicy::Mirror => {
                debug_assert!(period > 0, "mirror period must be positive");
                Resolved::Inside(upper - 1 - fold(upper as i64 - 1 - idx as i64, period))
            }
            BorderPolicy::Constant => Resolved::Outside,
        }
    }
}

/// Offset into `[0, period)` congruent to `delta`.
#[inline]
fn wrap(delta: i64, period: i32) -> i32 {
    delta.rem_euclid(period.max(1) as i64) as i32
}

/// Offset into `[0, period)` reflecting back and forth every `period` steps.
#[inline]
fn fold(delta: i64, period: i32) -> i32 {
    let period = period.max(1) as i64;
    let m = delta.rem_euclid(2 * period);
    (if m >= period { 2 * period - 1 - m } else { m }) as i32
}

impl fmt::Display for BorderPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BorderPolicy {
    type Err = ResampleError;

    fn from_str(s: &str) -> ResampleResult<Self> {
        match s {
            "none" | "undefined" => Ok(BorderPolicy::None),
            "clamp" => Ok(BorderPolicy::Clamp),
            "repeat" => Ok(BorderPolicy::Repeat),
            "mirror" => Ok(BorderPolicy::Mirror),
            "const" | "constant" => Ok(BorderPolicy::Constant),
            _ => Err(ResampleError::parse(s, format!("unknown border policy '{s}'"))),
        }
    }
}

/// Lower and upper policy of one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct AxisBorder {
    /// Policy for the left (x) or top (y) edge.
    pub lower: BorderPolicy,
    /// Policy for the right (x) or bottom (y) edge.
    pub upper: BorderPolicy,
}

impl AxisBorder {
    /// Creates an axis border from its two edge policies.
    pub const fn new(lower: BorderPolicy, upper: BorderPolicy) -> Self {
        Self { lower, upper }
    }

    /// Resolves `idx` into `[start, start + extent)`.
    ///
    /// The extent doubles as the repeat and mirror period. It is the region
    /// extent rather than the storage row pitch, so padded rows
    /// (`stride > width`) never wrap onto pixels outside the region.
    #[inline]
    pub fn resolve(&self, idx: i32, start: i32, extent: i32) -> Resolved {
        self.lower
            .resolve_lower(idx, start, extent)
            .and_then(|i| self.upper.resolve_upper(i, start + extent, extent))
    }

    /// Returns `true` if either edge substitutes a fallback.
    pub fn is_constant(&self) -> bool {
        self.lower == BorderPolicy::Constant || self.upper == BorderPolicy::Constant
    }
}

/// Border policies of all four edges of a region.
///
/// Built once and never changed; the filters only read it.
///
/// # Example
///
/// ```rust
/// use vfx_resample::border::{BorderPolicy, EdgeBorders};
///
/// let borders = EdgeBorders::none()
///     .with_left(BorderPolicy::Clamp)
///     .with_top(BorderPolicy::Mirror);
/// assert_eq!(borders.x.lower, BorderPolicy::Clamp);
/// assert_eq!(borders.y.upper, BorderPolicy::None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct EdgeBorders {
    /// Left (`lower`) and right (`upper`) edges.
    pub x: AxisBorder,
    /// Top (`lower`) and bottom (`upper`) edges.
    pub y: AxisBorder,
}

impl EdgeBorders {
    /// No border handling on any edge.
    pub const fn none() -> Self {
        Self {
            x: AxisBorder::new(BorderPolicy::None, BorderPolicy::None),
            y: AxisBorder::new(BorderPolicy::None, BorderPolicy::None),
        }
    }

    /// The same policy on all four edges.
    pub const fn uniform(policy: BorderPolicy) -> Self {
        Self {
            x: AxisBorder::new(policy, policy),
            y: AxisBorder::new(policy, policy),
        }
    }

    /// Sets the left edge policy.
    pub const fn with_left(mut self, policy: BorderPolicy) -> Self {
        self.x.lower = policy;
        self
    }

    /// Sets the right edge policy.
    pub const fn with_right(mut self, policy: BorderPolicy) -> Self {
        self.x.upper = policy;
        self
    }

    /// Sets the top edge policy.
    pub const fn with_top(mut self, policy: BorderPolicy) -> Self {
        self.y.lower = policy;
        self
    }

    /// Sets the bottom edge policy.
    pub const fn with_bottom(mut self, policy: BorderPolicy) -> Self {
        self.y.upper = policy;
        self
    }

    /// Returns `true` if any edge substitutes a fallback.
    pub fn needs_fallback(&self) -> bool {
        self.x.is_constant() || self.y.is_constant()
    }
}
