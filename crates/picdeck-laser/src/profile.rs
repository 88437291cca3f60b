//! Laser pulse profiles.

use std::f64::consts::PI;

use picdeck_core::constants::C;
use picdeck_core::{check_finite, ValidationError};

/// Temporal/transverse shape of a laser pulse.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LaserProfile {
    /// Harris temporal envelope with a Gaussian transverse envelope.
    Harris(HarrisProfile),
}

impl LaserProfile {
    /// Name the engine uses for this profile.
    pub fn deck_name(&self) -> &'static str {
        match self {
            Self::Harris(_) => "Harris",
        }
    }
}

/// Parameters of a Harris pulse.
///
/// The temporal envelope rises from 0 at `t = 0` to 1 at
/// `t = duration / 2` and returns to 0 at `t = duration`, after which the
/// antenna is silent. Transversally the pulse is Gaussian with `waist` at
/// focus, `focal_distance` away from the antenna plane.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HarrisProfile {
    waist: f64,
    duration: f64,
    focal_distance: f64,
}

impl HarrisProfile {
    /// Build a validated profile. `waist` and `duration` must be positive,
    /// `focal_distance` finite (negative focuses behind the antenna).
    pub fn new(waist: f64, duration: f64, focal_distance: f64) -> Result<Self, ValidationError> {
        for (field, value) in [("profile_waist", waist), ("profile_duration", duration)] {
            if check_finite(field, value)? <= 0.0 {
                return Err(ValidationError::InvalidParameter {
                    field,
                    reason: format!("must be positive, got {value}"),
                });
            }
        }
        check_finite("profile_focal_distance", focal_distance)?;
        Ok(Self {
            waist,
            duration,
            focal_distance,
        })
    }

    /// Beam waist at focus (m).
    pub fn waist(&self) -> f64 {
        self.waist
    }

    /// Total pulse duration (s).
    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Distance from the antenna to the focal plane (m).
    pub fn focal_distance(&self) -> f64 {
        self.focal_distance
    }

    /// Harris temporal envelope at time `t`.
    pub fn time_envelope(&self, t: f64) -> f64 {
        if t >= self.duration {
            return 0.0;
        }
        let arg = 2.0 * PI * t / self.duration;
        (10.0 - 15.0 * arg.cos() + 6.0 * (2.0 * arg).cos() - (3.0 * arg).cos()) / 32.0
    }

    /// Field amplitude at antenna-plane position `(x, y)` and time `t` for
    /// a pulse of `wavelength` and peak field `e_max`.
    pub fn amplitude(&self, wavelength: f64, e_max: f64, x: f64, y: f64, t: f64) -> f64 {
        let omega0 = 2.0 * PI * C / wavelength;
        let z_r = PI * self.waist * self.waist / wavelength;
        let f = self.focal_distance;
        let wz = self.waist * (1.0 + f * f / (z_r * z_r)).sqrt();
        let inv_wz_2 = 1.0 / (wz * wz);
        let inv_rz = if f == 0.0 { 0.0 } else { -f / (f * f + z_r * z_r) };

        let r2 = x * x + y * y;
        let space_envelope = (-r2 * inv_wz_2).exp();
        let arg_osc = omega0 * t - omega0 / C * r2 * inv_rz / 2.0;
        e_max * self.time_envelope(t) * space_envelope * arg_osc.cos()
    }
}
