//! Laser antenna description.

use picdeck_core::{check_finite, check_finite3, validate_name, ValidationError, Vec3};

use crate::profile::LaserProfile;

/// Tolerance on `|cos|` between direction and polarization.
const ORTHOGONALITY_TOLERANCE: f64 = 1e-9;

/// Builder input for [`Laser::new`].
#[derive(Clone, Debug, PartialEq)]
pub struct LaserParams {
    /// Deck prefix for this laser.
    pub name: String,
    /// Pulse profile.
    pub profile: LaserProfile,
    /// Central wavelength (m).
    pub wavelength: f64,
    /// Peak electric field (V/m).
    pub e_max: f64,
    /// A point on the antenna plane.
    pub position: Vec3,
    /// Propagation direction (any non-zero length).
    pub direction: Vec3,
    /// Polarization direction; must be orthogonal to `direction`.
    pub polarization: Vec3,
}

/// A validated laser antenna.
#[derive(Clone, Debug, PartialEq)]
pub struct Laser {
    name: String,
    profile: LaserProfile,
    wavelength: f64,
    e_max: f64,
    position: Vec3,
    direction: Vec3,
    polarization: Vec3,
}

impl Laser {
    /// Validate `params` and build a laser.
    pub fn new(params: LaserParams) -> Result<Self, ValidationError> {
        validate_name(&params.name)?;
        if check_finite("wavelength", params.wavelength)? <= 0.0 {
            return Err(ValidationError::InvalidParameter {
                field: "wavelength",
                reason: format!("must be positive, got {}", params.wavelength),
            });
        }
        check_finite("e_max", params.e_max)?;
        check_finite3("position", params.position)?;
        let d_norm = norm(check_finite3("direction", params.direction)?);
        let p_norm = norm(check_finite3("polarization", params.polarization)?);
        if d_norm == 0.0 {
            return Err(ValidationError::InvalidParameter {
                field: "direction",
                reason: "must be non-zero".to_string(),
            });
        }
        if p_norm == 0.0 {
            return Err(ValidationError::InvalidParameter {
                field: "polarization",
                reason: "must be non-zero".to_string(),
            });
        }
        let cos = dot(params.direction, params.polarization) / (d_norm * p_norm);
        if cos.abs() > ORTHOGONALITY_TOLERANCE {
            return Err(ValidationError::InvalidParameter {
                field: "polarization",
                reason: format!("must be orthogonal to direction (cos = {cos})"),
            });
        }
        Ok(Self {
            name: params.name,
            profile: params.profile,
            wavelength: params.wavelength,
            e_max: params.e_max,
            position: params.position,
            direction: params.direction,
            polarization: params.polarization,
        })
    }

    /// Deck prefix.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Pulse profile.
    pub fn profile(&self) -> &LaserProfile {
        &self.profile
    }

    /// Central wavelength (m).
    pub fn wavelength(&self) -> f64 {
        self.wavelength
    }

    /// Peak field (V/m).
    pub fn e_max(&self) -> f64 {
        self.e_max
    }

    /// Antenna position.
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Propagation direction as given.
    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    /// Polarization direction as given.
    pub fn polarization(&self) -> Vec3 {
        self.polarization
    }

    /// Injected field at antenna-plane coordinates `(x, y)` and time `t`.
    pub fn amplitude(&self, x: f64, y: f64, t: f64) -> f64 {
        match &self.profile {
            LaserProfile::Harris(h) => h.amplitude(self.wavelength, self.e_max, x, y, t),
        }
    }
}

fn dot(a: Vec3, b: Vec3) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

fn norm(a: Vec3) -> f64 {
    dot(a, a).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::HarrisProfile;

    fn params() -> LaserParams {
        LaserParams {
            name: "antenna".to_string(),
            profile: LaserProfile::Harris(HarrisProfile::new(5e-6, 30e-15, 0.0).unwrap()),
            wavelength: 0.8e-6,
            e_max: 1e12,
            position: [0.0, 0.0, -10e-6],
            direction: [0.0, 0.0, 1.0],
            polarization: [1.0, 0.0, 0.0],
        }
    }

    #[test]
    fn valid_laser_builds() {
        let laser = Laser::new(params()).unwrap();
        assert_eq!(laser.name(), "antenna");
        assert_eq!(laser.profile().deck_name(), "Harris");
        assert_eq!(laser.amplitude(0.0, 0.0, 0.0), 0.0);
    }

    #[test]
    fn parallel_polarization_rejected() {
        let mut p = params();
        p.polarization = [0.0, 0.1, 2.0];
        assert!(matches!(
            Laser::new(p),
            Err(ValidationError::InvalidParameter {
                field: "polarization",
                ..
            })
        ));
    }

    #[test]
    fn zero_direction_rejected() {
        let mut p = params();
        p.direction = [0.0; 3];
        assert!(Laser::new(p).is_err());
    }

    #[test]
    fn non_positive_wavelength_rejected() {
        let mut p = params();
        p.wavelength = 0.0;
        assert!(Laser::new(p).is_err());
    }

    #[test]
    fn reserved_name_rejected() {
        let mut p = params();
        p.name = "lasers".to_string();
        assert!(matches!(
            Laser::new(p),
            Err(ValidationError::InvalidName { .. })
        ));
    }
}
