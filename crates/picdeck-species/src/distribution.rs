//! Initial phase-space distribution of a species.

use picdeck_core::{check_finite, check_finite3, Axis, ValidationError, Vec3};
use picdeck_grid::Region;

/// Uniform-density initial distribution.
///
/// Particles fill `region` (clipped to the grid by the engine) at a
/// constant `density`, all drifting at `directed_velocity`. An optional
/// `thermal_velocity` adds a Gaussian spread around the drift.
///
/// # Examples
///
/// ```
/// use picdeck_grid::Region;
/// use picdeck_species::Distribution;
///
/// let plasma = Distribution::new(1e25)
///     .unwrap()
///     .with_region(Region::from_endpoints([None; 3], [Some(0.0), None, None]).unwrap())
///     .with_directed_velocity([0.1, 0.0, 0.0])
///     .unwrap();
/// assert_eq!(plasma.density(), 1e25);
/// assert!(Distribution::new(-1.0).is_err());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Distribution {
    density: f64,
    region: Region,
    directed_velocity: Vec3,
    thermal_velocity: Option<Vec3>,
}

impl Distribution {
    /// A distribution of `density` particles per cubic metre, unbounded
    /// and at rest.
    pub fn new(density: f64) -> Result<Self, ValidationError> {
        let density = check_finite("density", density)?;
        if density < 0.0 {
            return Err(ValidationError::NegativeDensity { value: density });
        }
        Ok(Self {
            density,
            region: Region::UNBOUNDED,
            directed_velocity: [0.0; 3],
            thermal_velocity: None,
        })
    }

    /// Restrict injection to `region`. The region is validated on
    /// construction, so this cannot fail.
    pub fn with_region(mut self, region: Region) -> Self {
        self.region = region;
        self
    }

    /// Set the bulk drift velocity (m/s).
    pub fn with_directed_velocity(mut self, velocity: Vec3) -> Result<Self, ValidationError> {
        self.directed_velocity = check_finite3("directed_velocity", velocity)?;
        Ok(self)
    }

    /// Set the rms thermal spread (m/s) per axis. Each component must be
    /// non-negative.
    pub fn with_thermal_velocity(mut self, spread: Vec3) -> Result<Self, ValidationError> {
        check_finite3("thermal_velocity", spread)?;
        if let Some(axis) = Axis::ALL.into_iter().find(|a| spread[a.index()] < 0.0) {
            return Err(ValidationError::InvalidParameter {
                field: "thermal_velocity",
                reason: format!(
                    "spread on axis {axis} must be non-negative, got {}",
                    spread[axis.index()]
                ),
            });
        }
        self.thermal_velocity = Some(spread);
        Ok(self)
    }

    /// Number density (m^-3).
    pub fn density(&self) -> f64 {
        self.density
    }

    /// Injection region.
    pub fn region(&self) -> &Region {
        &self.region
    }

    /// Bulk drift velocity (m/s).
    pub fn directed_velocity(&self) -> Vec3 {
        self.directed_velocity
    }

    /// Thermal spread, if any.
    pub fn thermal_velocity(&self) -> Option<Vec3> {
        self.thermal_velocity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use picdeck_grid::AxisBound;
    use proptest::prelude::*;

    #[test]
    fn defaults_are_at_rest_and_unbounded() {
        let d = Distribution::new(0.0).unwrap();
        assert_eq!(d.density(), 0.0);
        assert_eq!(d.directed_velocity(), [0.0; 3]);
        assert_eq!(d.thermal_velocity(), None);
        assert!(d.region().is_unbounded());
    }

    #[test]
    fn negative_density_rejected() {
        match Distribution::new(-1e20) {
            Err(ValidationError::NegativeDensity { value }) => assert_eq!(value, -1e20),
            other => panic!("expected NegativeDensity, got {other:?}"),
        }
    }

    #[test]
    fn non_finite_velocity_rejected() {
        let d = Distribution::new(1.0).unwrap();
        assert!(d.with_directed_velocity([f64::NAN, 0.0, 0.0]).is_err());
    }

    #[test]
    fn lower_only_region_kept() {
        let region = Region::new([AxisBound::above(0.0), AxisBound::UNBOUNDED, AxisBound::UNBOUNDED])
            .unwrap();
        let d = Distribution::new(1e25).unwrap().with_region(region);
        assert_eq!(d.region().axis(Axis::X).lower, Some(0.0));
        assert_eq!(d.region().axis(Axis::X).upper, None);
    }

    #[test]
    fn negative_thermal_spread_rejected() {
        let d = Distribution::new(1.0).unwrap();
        assert!(d.clone().with_thermal_velocity([1e5, 1e5, 1e5]).is_ok());
        assert!(matches!(
            d.with_thermal_velocity([1e5, -1.0, 0.0]),
            Err(ValidationError::InvalidParameter {
                field: "thermal_velocity",
                ..
            })
        ));
    }

    proptest! {
        #[test]
        fn any_non_negative_density_accepted(density in 0.0f64..1.0e30) {
            prop_assert!(Distribution::new(density).is_ok());
        }
    }
}
