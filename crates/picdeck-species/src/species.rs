//! Named particle species.

use picdeck_core::constants::EPSILON_0;
use picdeck_core::{validate_name, ValidationError};

use crate::distribution::Distribution;
use crate::particle::ParticleType;

/// A named population of one particle kind.
///
/// The name doubles as the species' key prefix in the input deck, so it
/// must be a plain identifier that does not collide with an engine prefix.
/// Uniqueness among the species of one simulation is checked on attach.
#[derive(Clone, Debug, PartialEq)]
pub struct Species {
    name: String,
    particle_type: ParticleType,
    distribution: Distribution,
}

impl Species {
    /// Build a species, taking ownership of its distribution.
    ///
    /// ```
    /// use picdeck_species::{Distribution, ParticleType, Species};
    ///
    /// let electrons = Species::new(
    ///     "electrons",
    ///     ParticleType::Electron,
    ///     Distribution::new(1e25).unwrap(),
    /// )
    /// .unwrap();
    /// assert_eq!(electrons.name(), "electrons");
    /// assert!(Species::new("algo", ParticleType::Proton, Distribution::new(1.0).unwrap()).is_err());
    /// ```
    pub fn new(
        name: impl Into<String>,
        particle_type: ParticleType,
        distribution: Distribution,
    ) -> Result<Self, ValidationError> {
        let name = name.into();
        validate_name(&name)?;
        Ok(Self {
            name,
            particle_type,
            distribution,
        })
    }

    /// Species name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Particle kind.
    pub fn particle_type(&self) -> ParticleType {
        self.particle_type
    }

    /// Initial distribution.
    pub fn distribution(&self) -> &Distribution {
        &self.distribution
    }

    /// Cold plasma frequency of this species (rad/s):
    /// `sqrt(n q^2 / (eps0 m))`.
    pub fn plasma_frequency(&self) -> f64 {
        let q = self.particle_type.charge();
        let m = self.particle_type.mass();
        (self.distribution.density() * q * q / (EPSILON_0 * m)).sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_name_rejected() {
        let d = Distribution::new(1.0).unwrap();
        assert!(matches!(
            Species::new("", ParticleType::Electron, d.clone()),
            Err(ValidationError::InvalidName { .. })
        ));
        assert!(matches!(
            Species::new("two words", ParticleType::Electron, d),
            Err(ValidationError::InvalidName { .. })
        ));
    }

    #[test]
    fn langmuir_plasma_frequency() {
        let s = Species::new(
            "electrons",
            ParticleType::Electron,
            Distribution::new(1e25).unwrap(),
        )
        .unwrap();
        // w_pe = 5.64e4 * sqrt(n[cm^-3]) rad/s, n = 1e19 cm^-3.
        let expected = 5.64e4 * 1e19f64.sqrt();
        let rel = (s.plasma_frequency() - expected).abs() / expected;
        assert!(rel < 1e-3, "w_pe = {}", s.plasma_frequency());
    }

    #[test]
    fn accessors() {
        let s = Species::new("p", ParticleType::Proton, Distribution::new(2.0).unwrap()).unwrap();
        assert_eq!(s.particle_type(), ParticleType::Proton);
        assert_eq!(s.distribution().density(), 2.0);
    }
}
