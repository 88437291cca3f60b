//! Per-axis optional bounds.
//!
//! A [`Region`] restricts where a particle distribution is injected.
//! Each endpoint of each axis is independently optional: a missing lower
//! endpoint with a concrete upper endpoint means "everything below this
//! threshold" on that axis.

use picdeck_core::{check_finite, Axis, ValidationError, Vec3};

/// Optional lower and upper endpoint on one axis.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AxisBound {
    /// Inclusive lower endpoint, or `None` for unbounded below.
    pub lower: Option<f64>,
    /// Exclusive upper endpoint, or `None` for unbounded above.
    pub upper: Option<f64>,
}

impl AxisBound {
    /// No restriction on this axis.
    pub const UNBOUNDED: AxisBound = AxisBound {
        lower: None,
        upper: None,
    };

    /// Only values at or above `lower`.
    pub fn above(lower: f64) -> Self {
        Self {
            lower: Some(lower),
            upper: None,
        }
    }

    /// Only values below `upper`.
    pub fn below(upper: f64) -> Self {
        Self {
            lower: None,
            upper: Some(upper),
        }
    }

    /// Values in `[lower, upper)`.
    pub fn between(lower: f64, upper: f64) -> Self {
        Self {
            lower: Some(lower),
            upper: Some(upper),
        }
    }

    /// Whether neither endpoint is set.
    pub fn is_unbounded(&self) -> bool {
        self.lower.is_none() && self.upper.is_none()
    }

    /// Whether `v` lies inside this bound.
    pub fn contains(&self, v: f64) -> bool {
        self.lower.is_none_or(|lo| v >= lo) && self.upper.is_none_or(|hi| v < hi)
    }

    fn validate(&self, axis: Axis) -> Result<(), ValidationError> {
        if let Some(lo) = self.lower {
            check_finite("region lower bound", lo)?;
        }
        if let Some(hi) = self.upper {
            check_finite("region upper bound", hi)?;
        }
        if let (Some(lower), Some(upper)) = (self.lower, self.upper) {
            if lower >= upper {
                return Err(ValidationError::InvertedRegion { axis, lower, upper });
            }
        }
        Ok(())
    }
}

/// Three [`AxisBound`]s, one per axis.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Region {
    axes: [AxisBound; 3],
}

impl Region {
    /// A region with no restriction on any axis.
    pub const UNBOUNDED: Region = Region {
        axes: [AxisBound::UNBOUNDED; 3],
    };

    /// Build a region from explicit per-axis bounds.
    ///
    /// Rejects non-finite endpoints and axes where both endpoints are set
    /// with `lower >= upper`.
    pub fn new(axes: [AxisBound; 3]) -> Result<Self, ValidationError> {
        for axis in Axis::ALL {
            axes[axis.index()].validate(axis)?;
        }
        Ok(Self { axes })
    }

    /// Build a region from separate lower and upper endpoint arrays.
    ///
    /// ```
    /// use picdeck_grid::Region;
    ///
    /// // x < 0, unbounded on y and z.
    /// let r = Region::from_endpoints([None; 3], [Some(0.0), None, None]).unwrap();
    /// assert!(r.contains([-1.0, 5.0, 5.0]));
    /// assert!(!r.contains([1.0, 0.0, 0.0]));
    /// ```
    pub fn from_endpoints(
        lower: [Option<f64>; 3],
        upper: [Option<f64>; 3],
    ) -> Result<Self, ValidationError> {
        let axes = [0, 1, 2].map(|i| AxisBound {
            lower: lower[i],
            upper: upper[i],
        });
        Self::new(axes)
    }

    /// Bound on a single axis.
    pub fn axis(&self, axis: Axis) -> &AxisBound {
        &self.axes[axis.index()]
    }

    /// All three bounds in axis order.
    pub fn axes(&self) -> &[AxisBound; 3] {
        &self.axes
    }

    /// Whether no axis carries any endpoint.
    pub fn is_unbounded(&self) -> bool {
        self.axes.iter().all(AxisBound::is_unbounded)
    }

    /// Whether `point` lies inside every axis bound.
    pub fn contains(&self, point: Vec3) -> bool {
        Axis::ALL
            .iter()
            .all(|a| self.axes[a.index()].contains(point[a.index()]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn half_open_bounds_are_valid() {
        let r = Region::new([
            AxisBound::above(0.0),
            AxisBound::below(1.0),
            AxisBound::UNBOUNDED,
        ])
        .unwrap();
        assert_eq!(r.axis(Axis::X).lower, Some(0.0));
        assert_eq!(r.axis(Axis::Y).upper, Some(1.0));
        assert!(r.axis(Axis::Z).is_unbounded());
        assert!(!r.is_unbounded());
    }

    #[test]
    fn inverted_region_rejected() {
        match Region::new([
            AxisBound::UNBOUNDED,
            AxisBound::between(2.0, 2.0),
            AxisBound::UNBOUNDED,
        ]) {
            Err(ValidationError::InvertedRegion { axis: Axis::Y, .. }) => {}
            other => panic!("expected InvertedRegion on y, got {other:?}"),
        }
    }

    #[test]
    fn non_finite_endpoint_rejected() {
        let bounds = [AxisBound::below(f64::NAN), AxisBound::UNBOUNDED, AxisBound::UNBOUNDED];
        assert!(matches!(
            Region::new(bounds),
            Err(ValidationError::NonFinite { .. })
        ));
    }

    #[test]
    fn contains_respects_each_side() {
        let b = AxisBound::between(-1.0, 1.0);
        assert!(b.contains(-1.0));
        assert!(b.contains(0.5));
        assert!(!b.contains(1.0));
        assert!(AxisBound::UNBOUNDED.contains(f64::MAX));
    }

    #[test]
    fn default_region_is_unbounded() {
        assert_eq!(Region::default(), Region::UNBOUNDED);
        assert!(Region::UNBOUNDED.contains([1e30, -1e30, 0.0]));
    }
}
