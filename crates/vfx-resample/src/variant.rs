//! Named sampling variants.
//!
//! A variant fixes everything about a sampling call except the coordinate:
//! the [`Filter`], which edges get border handling ([`Edges`]), the
//! [`BorderPolicy`] applied to those edges, the element [`DataType`] and the
//! storage [`Backend`]. Variants carry a stable identifier so a code
//! generator can pick one by name:
//!
//! ```text
//! interpolate_<filter>[_<policy>_<edges>]_<dtype>_<backend>
//!
//! interpolate_linear_f32_buf            no border handling
//! interpolate_cubic_clamp_tl_f32_buf    clamp on top and left edges
//! interpolate_lanczos_const_tblr_f16_tex constant on all edges, fallback arg
//! ```
//!
//! Variants whose bound edges use [`BorderPolicy::Constant`] take a fallback
//! value; all others must not. [`Variant::bind`] checks this together with
//! the element type and backend, so the returned [`Bound`] sampler cannot
//! fail.
//!
//! [`VariantTable`] expands the closed combination matrix, instantiating only
//! the filters, policies, types and backends asked for.
//!
//! # Example
//!
//! ```rust
//! use vfx_resample::{Access, BufferView, Region, VariantTable};
//!
//! let table = VariantTable::full();
//! let variant = table.lookup("interpolate_linear_clamp_tblr_f32_buf").unwrap();
//!
//! let data: Vec<f32> = (0..16).map(|v| v as f32).collect();
//! let buf = BufferView::new(&data, 4, 4, 4).unwrap();
//! let access = Access::new(&buf, Region::full(4, 4).unwrap()).unwrap();
//! let sampler = variant.bind(access).unwrap();
//!
//! assert_eq!(sampler.sample(0.5, 0.5), 0.0);
//! assert_eq!(sampler.sample(-1.0, 0.5), 0.0);
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use tracing::{debug, trace};

use crate::access::{Access, Backend, PixelSource};
use crate::border::{BorderPolicy, EdgeBorders};
use crate::error::{ResampleError, ResampleResult};
use crate::filter::Filter;
use crate::pixel::{DataType, Sample};

/// Which edges of a region get border handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Edges {
    /// No edge; taps must stay inside the region.
    None,
    /// Left edge only.
    Left,
    /// Right edge only.
    Right,
    /// Top edge only.
    Top,
    /// Bottom edge only.
    Bottom,
    /// Top and left edges.
    TopLeft,
    /// Top and right edges.
    TopRight,
    /// Bottom and left edges.
    BottomLeft,
    /// Bottom and right edges.
    BottomRight,
    /// All four edges.
    All,
}

impl Edges {
    /// All ten combinations.
    pub const ALL: [Edges; 10] = [
        Edges::None,
        Edges::Left,
        Edges::Right,
        Edges::Top,
        Edges::Bottom,
        Edges::TopLeft,
        Edges::TopRight,
        Edges::BottomLeft,
        Edges::BottomRight,
        Edges::All,
    ];

    /// Combinations with at least one edge.
    pub const BOUND: [Edges; 9] = [
        Edges::Left,
        Edges::Right,
        Edges::Top,
        Edges::Bottom,
        Edges::TopLeft,
        Edges::TopRight,
        Edges::BottomLeft,
        Edges::BottomRight,
        Edges::All,
    ];

    /// Identifier suffix (empty for [`Edges::None`]).
    pub fn suffix(&self) -> &'static str {
        match self {
            Edges::None => "",
            Edges::Left => "l",
            Edges::Right => "r",
            Edges::Top => "t",
            Edges::Bottom => "b",
            Edges::TopLeft => "tl",
            Edges::TopRight => "tr",
            Edges::BottomLeft => "bl",
            Edges::BottomRight => "br",
            Edges::All => "tblr",
        }
    }

    /// Parses an identifier suffix.
    pub fn from_suffix(s: &str) -> Option<Self> {
        Edges::BOUND.into_iter().find(|e| e.suffix() == s)
    }

    /// Returns `true` if the left edge is included.
    pub fn left(&self) -> bool {
        matches!(self, Edges::Left | Edges::TopLeft | Edges::BottomLeft | Edges::All)
    }

    /// Returns `true` if the right edge is included.
    pub fn right(&self) -> bool {
        matches!(self, Edges::Right | Edges::TopRight | Edges::BottomRight | Edges::All)
    }

    /// Returns `true` if the top edge is included.
    pub fn top(&self) -> bool {
        matches!(self, Edges::Top | Edges::TopLeft | Edges::TopRight | Edges::All)
    }

    /// Returns `true` if the bottom edge is included.
    pub fn bottom(&self) -> bool {
        matches!(self, Edges::Bottom | Edges::BottomLeft | Edges::BottomRight | Edges::All)
    }
}

impl EdgeBorders {
    /// Binds `policy` to the named edges; the others get no handling.
    pub fn for_edges(edges: Edges, policy: BorderPolicy) -> Self {
        let pick = |on: bool| if on { policy } else { BorderPolicy::None };
        EdgeBorders::none()
            .with_left(pick(edges.left()))
            .with_right(pick(edges.right()))
            .with_top(pick(edges.top()))
            .with_bottom(pick(edges.bottom()))
    }
}

/// Stable identity of a generated variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VariantId {
    filter: Filter,
    policy: BorderPolicy,
    edges: Edges,
    dtype: DataType,
    backend: Backend,
}

impl VariantId {
    /// Creates an identifier.
    ///
    /// A `None` policy or an empty edge set both collapse to the unbordered
    /// variant, so each sampling behaviour has exactly one identifier.
    pub fn new(
        filter: Filter,
        policy: BorderPolicy,
        edges: Edges,
        dtype: DataType,
        backend: Backend,
    ) -> Self {
        let (policy, edges) = if policy == BorderPolicy::None || edges == Edges::None {
            (BorderPolicy::None, Edges::None)
        } else {
            (policy, edges)
        };
        Self { filter, policy, edges, dtype, backend }
    }

    /// Interpolation filter.
    pub fn filter(&self) -> Filter {
        self.filter
    }

    /// Policy of the bound edges.
    pub fn policy(&self) -> BorderPolicy {
        self.policy
    }

    /// Edges with border handling.
    pub fn edges(&self) -> Edges {
        self.edges
    }

    /// Element type.
    pub fn dtype(&self) -> DataType {
        self.dtype
    }

    /// Storage backend.
    pub fn backend(&self) -> Backend {
        self.backend
    }

    /// Returns `true` if the variant takes a fallback value.
    pub fn has_fallback(&self) -> bool {
        self.policy == BorderPolicy::Constant && self.edges != Edges::None
    }

    /// Per-edge policies this variant resolves taps with.
    pub fn borders(&self) -> EdgeBorders {
        EdgeBorders::for_edges(self.edges, self.policy)
    }
}

impl fmt::Display for VariantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "interpolate_{}", self.filter)?;
        if self.edges != Edges::None {
            write!(f, "_{}_{}", self.policy, self.edges.suffix())?;
        }
        write!(f, "_{}_{}", self.dtype, self.backend)
    }
}

impl FromStr for VariantId {
    type Err = ResampleError;

    fn from_str(s: &str) -> ResampleResult<Self> {
        let parts: Vec<&str> = s.split('_').collect();
        let (filter, bordered, dtype, backend) = match parts.as_slice() {
            ["interpolate", filter, dtype, backend] => (*filter, None, *dtype, *backend),
            ["interpolate", filter, policy, edges, dtype, backend] => {
                (*filter, Some((*policy, *edges)), *dtype, *backend)
            }
            _ => {
                return Err(ResampleError::parse(
                    s,
                    "expected interpolate_<filter>[_<policy>_<edges>]_<dtype>_<backend>",
                ));
            }
        };

        let wrap = |e: ResampleError| match e {
            ResampleError::ParseVariant { reason, .. } => ResampleError::parse(s, reason),
            other => other,
        };

        let filter: Filter = filter.parse().map_err(wrap)?;
        let dtype: DataType = dtype.parse().map_err(wrap)?;
        let backend: Backend = backend.parse().map_err(wrap)?;
        let (policy, edges) = match bordered {
            None => (BorderPolicy::None, Edges::None),
            Some((policy, edges)) => {
                let policy: BorderPolicy = policy.parse().map_err(wrap)?;
                if policy == BorderPolicy::None {
                    return Err(ResampleError::parse(s, "bordered variant needs a handling policy"));
                }
                let edges = Edges::from_suffix(edges).ok_or_else(|| {
                    ResampleError::parse(s, format!("unknown edge combination '{edges}'"))
                })?;
                (policy, edges)
            }
        };

        Ok(VariantId::new(filter, policy, edges, dtype, backend))
    }
}

/// A filter paired with per-edge border policies.
///
/// This is the type-agnostic sampling core behind every [`Variant`]. Use it
/// directly when edges need different policies.
///
/// # Example
///
/// ```rust
/// use vfx_resample::{Access, BufferView, Region, Resampler};
/// use vfx_resample::border::{BorderPolicy, EdgeBorders};
/// use vfx_resample::filter::Filter;
///
/// let borders = EdgeBorders::uniform(BorderPolicy::Clamp).with_top(BorderPolicy::Mirror);
/// let resampler = Resampler::new(Filter::Bicubic, borders);
///
/// let data = vec![2.0f32; 9];
/// let buf = BufferView::packed(&data, 3, 3).unwrap();
/// let access = Access::new(&buf, Region::full(3, 3).unwrap()).unwrap();
/// assert!((resampler.sample(&access, -0.3, 1.7) - 2.0).abs() < 1e-5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Resampler {
    filter: Filter,
    borders: EdgeBorders,
}

impl Resampler {
    /// Creates a resampler.
    pub fn new(filter: Filter, borders: EdgeBorders) -> Self {
        Self { filter, borders }
    }

    /// Interpolation filter.
    pub fn filter(&self) -> Filter {
        self.filter
    }

    /// Border policies.
    pub fn borders(&self) -> &EdgeBorders {
        &self.borders
    }

    /// Samples at region-relative `(x, y)`.
    ///
    /// Constant edges read the access fallback, or zero when it has none.
    #[inline]
    pub fn sample<S: PixelSource>(&self, access: &Access<'_, S>, x: f32, y: f32) -> S::Pixel {
        self.filter.sample(access, &self.borders, x, y)
    }
}

/// One concrete member of the variant matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Variant {
    id: VariantId,
    resampler: Resampler,
}

impl Variant {
    /// Instantiates the variant named by `id`.
    pub fn new(id: VariantId) -> Self {
        Self {
            id,
            resampler: Resampler::new(id.filter(), id.borders()),
        }
    }

    /// Identifier.
    pub fn id(&self) -> &VariantId {
        &self.id
    }

    /// Underlying filter and borders.
    pub fn resampler(&self) -> &Resampler {
        &self.resampler
    }

    /// Checks `access` against this variant and returns a ready sampler.
    ///
    /// Fails if the element type or backend differ from the identifier, or
    /// if the fallback is missing (constant edges) or superfluous (others).
    pub fn bind<'a, S: PixelSource>(
        &self,
        access: Access<'a, S>,
    ) -> ResampleResult<Bound<'_, 'a, S>> {
        let got = <S::Pixel as Sample>::DATA_TYPE;
        if got != self.id.dtype {
            return Err(ResampleError::TypeMismatch {
                expected: self.id.dtype,
                got,
            });
        }
        if S::BACKEND != self.id.backend {
            return Err(ResampleError::BackendMismatch {
                expected: self.id.backend,
                got: S::BACKEND,
            });
        }
        match (self.id.has_fallback(), access.fallback().is_some()) {
            (true, false) => return Err(ResampleError::FallbackRequired(self.id.to_string())),
            (false, true) => return Err(ResampleError::UnexpectedFallback(self.id.to_string())),
            _ => {}
        }
        trace!(variant = %self.id, region = %access.region(), "bound variant");
        Ok(Bound { variant: self, access })
    }
}

/// A variant bound to validated storage; sampling is infallible.
pub struct Bound<'v, 'a, S: PixelSource> {
    variant: &'v Variant,
    access: Access<'a, S>,
}

impl<'v, 'a, S: PixelSource> Bound<'v, 'a, S> {
    /// Variant being sampled.
    pub fn variant(&self) -> &'v Variant {
        self.variant
    }

    /// Storage access.
    pub fn access(&self) -> &Access<'a, S> {
        &self.access
    }

    /// Samples at region-relative `(x_mapped, y_mapped)`.
    #[inline]
    pub fn sample(&self, x_mapped: f32, y_mapped: f32) -> S::Pixel {
        self.variant.resampler.sample(&self.access, x_mapped, y_mapped)
    }
}

impl<S: PixelSource> Clone for Bound<'_, '_, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S: PixelSource> Copy for Bound<'_, '_, S> {}

impl<S: PixelSource> fmt::Debug for Bound<'_, '_, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bound")
            .field("variant", &self.variant.id.to_string())
            .field("access", &self.access)
            .finish()
    }
}

/// Generated set of variants, keyed by identifier.
#[derive(Debug, Clone, Default)]
pub struct VariantTable {
    variants: BTreeMap<VariantId, Variant>,
}

impl VariantTable {
    /// Expands the requested slice of the variant matrix.
    ///
    /// For every filter, element type and backend this adds the unbordered
    /// variant plus the nine bordered edge combinations of each handling
    /// policy. [`BorderPolicy::None`] in `policies` is ignored.
    pub fn generate(
        filters: &[Filter],
        policies: &[BorderPolicy],
        dtypes: &[DataType],
        backends: &[Backend],
    ) -> Self {
        let mut variants = BTreeMap::new();
        for &filter in filters {
            for &dtype in dtypes {
                for &backend in backends {
                    let plain =
                        VariantId::new(filter, BorderPolicy::None, Edges::None, dtype, backend);
                    variants.insert(plain, Variant::new(plain));

                    for &policy in policies.iter().filter(|p| **p != BorderPolicy::None) {
                        for edges in Edges::BOUND {
                            let id = VariantId::new(filter, policy, edges, dtype, backend);
                            variants.insert(id, Variant::new(id));
                        }
                    }
                }
            }
        }
        debug!(
            filters = filters.len(),
            policies = policies.len(),
            dtypes = dtypes.len(),
            backends = backends.len(),
            count = variants.len(),
            "generated variant table"
        );
        Self { variants }
    }

    /// The complete matrix: every filter, policy, element type and backend.
    pub fn full() -> Self {
        Self::generate(&Filter::ALL, &BorderPolicy::HANDLING, &DataType::ALL, &Backend::ALL)
    }

    /// Looks up a variant by identifier.
    pub fn get(&self, id: &VariantId) -> Option<&Variant> {
        self.variants.get(id)
    }

    /// Parses `name` and looks the variant up.
    pub fn lookup(&self, name: &str) -> ResampleResult<&Variant> {
        let id: VariantId = name.parse()?;
        self.get(&id)
            .ok_or_else(|| ResampleError::UnknownVariant(name.to_string()))
    }

    /// Iterates variants in identifier order.
    pub fn iter(&self) -> impl Iterator<Item = &Variant> {
        self.variants.values()
    }

    /// Number of variants.
    pub fn len(&self) -> usize {
        self.variants.len()
    }

    /// Returns `true` if no variant was generated.
    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }
}
