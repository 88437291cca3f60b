//! Particle kinds and their charge/mass.

use std::fmt;
use std::str::FromStr;

use picdeck_core::constants::{M_E, M_P, M_U, Q_E};
use picdeck_core::ValidationError;

/// The kind of particle a species is made of.
///
/// Named kinds map to symbolic constants in the deck (`-q_e`, `m_e`);
/// ions are written as numeric charge and mass.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ParticleType {
    /// Electron.
    Electron,
    /// Positron.
    Positron,
    /// Proton.
    Proton,
    /// An ion of a given charge state and mass number.
    ///
    /// Build with [`ParticleType::ion`] so the pair is validated.
    Ion {
        /// Net charge in units of the elementary charge.
        charge_state: i32,
        /// Nucleon count; the mass is approximated as `mass_number * m_u`.
        mass_number: u32,
    },
}

impl ParticleType {
    /// Build a validated ion.
    ///
    /// Rejects a zero mass number and charge states above the mass number
    /// (a nucleus cannot hold more protons than nucleons).
    pub fn ion(charge_state: i32, mass_number: u32) -> Result<Self, ValidationError> {
        if mass_number == 0 {
            return Err(ValidationError::InvalidParameter {
                field: "mass_number",
                reason: "must be at least 1".to_string(),
            });
        }
        if i64::from(charge_state) > i64::from(mass_number) {
            return Err(ValidationError::InvalidParameter {
                field: "charge_state",
                reason: format!(
                    "charge state {charge_state} exceeds mass number {mass_number}"
                ),
            });
        }
        Ok(Self::Ion {
            charge_state,
            mass_number,
        })
    }

    /// Charge in coulombs.
    pub fn charge(&self) -> f64 {
        match self {
            Self::Electron => -Q_E,
            Self::Positron | Self::Proton => Q_E,
            Self::Ion { charge_state, .. } => f64::from(*charge_state) * Q_E,
        }
    }

    /// Mass in kilograms.
    pub fn mass(&self) -> f64 {
        match self {
            Self::Electron | Self::Positron => M_E,
            Self::Proton => M_P,
            Self::Ion { mass_number, .. } => f64::from(*mass_number) * M_U,
        }
    }

    /// Engine constant expression for the charge, if one exists.
    pub fn charge_symbol(&self) -> Option<&'static str> {
        match self {
            Self::Electron => Some("-q_e"),
            Self::Positron | Self::Proton => Some("q_e"),
            Self::Ion { .. } => None,
        }
    }

    /// Engine constant name for the mass, if one exists.
    pub fn mass_symbol(&self) -> Option<&'static str> {
        match self {
            Self::Electron | Self::Positron => Some("m_e"),
            Self::Proton => Some("m_p"),
            Self::Ion { .. } => None,
        }
    }
}

impl fmt::Display for ParticleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Electron => f.write_str("electron"),
            Self::Positron => f.write_str("positron"),
            Self::Proton => f.write_str("proton"),
            Self::Ion {
                charge_state,
                mass_number,
            } => write!(f, "ion(charge_state={charge_state}, mass_number={mass_number})"),
        }
    }
}

impl FromStr for ParticleType {
    type Err = ValidationError;

    /// Parses the named kinds. Ions carry parameters and are built with
    /// [`ParticleType::ion`] instead.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "electron" => Ok(Self::Electron),
            "positron" => Ok(Self::Positron),
            "proton" => Ok(Self::Proton),
            other => Err(ValidationError::UnknownOption {
                kind: "particle_type",
                value: other.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_kinds_parse() {
        assert_eq!("electron".parse(), Ok(ParticleType::Electron));
        assert_eq!("positron".parse(), Ok(ParticleType::Positron));
        assert_eq!("proton".parse(), Ok(ParticleType::Proton));
    }

    #[test]
    fn unknown_kind_rejected() {
        match "muon".parse::<ParticleType>() {
            Err(ValidationError::UnknownOption {
                kind: "particle_type",
                value,
            }) => assert_eq!(value, "muon"),
            other => panic!("expected UnknownOption, got {other:?}"),
        }
    }

    #[test]
    fn electron_and_positron_mirror_charge() {
        let e = ParticleType::Electron;
        let p = ParticleType::Positron;
        assert_eq!(e.charge(), -p.charge());
        assert_eq!(e.mass(), p.mass());
        assert_eq!(e.charge_symbol(), Some("-q_e"));
    }

    #[test]
    fn ion_validation() {
        let carbon = ParticleType::ion(6, 12).unwrap();
        assert!((carbon.charge() - 6.0 * Q_E).abs() < 1e-30);
        assert!((carbon.mass() - 12.0 * M_U).abs() < 1e-40);
        assert_eq!(carbon.mass_symbol(), None);

        assert!(ParticleType::ion(1, 0).is_err());
        assert!(ParticleType::ion(3, 2).is_err());
        assert!(ParticleType::ion(-1, 1).is_ok());
    }
}
