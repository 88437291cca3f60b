//! Field boundary conditions for each side of a grid axis.

use std::fmt;
use std::str::FromStr;

use picdeck_core::ValidationError;

/// How the field solver treats one side of a grid axis.
///
/// # Examples
///
/// ```
/// use picdeck_grid::BoundaryCondition;
///
/// let bc: BoundaryCondition = "periodic".parse().unwrap();
/// assert!(bc.is_periodic());
/// assert_eq!(BoundaryCondition::Absorbing.deck_token(), "pml");
/// assert!("reflective".parse::<BoundaryCondition>().is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BoundaryCondition {
    /// Fields wrap to the opposite side. Must be set on both sides.
    Periodic,
    /// Outgoing waves are damped by a perfectly matched layer.
    Absorbing,
    /// Perfect electric conductor.
    Pec,
    /// Perfect magnetic conductor.
    Pmc,
}

impl BoundaryCondition {
    /// Whether this side wraps.
    pub fn is_periodic(self) -> bool {
        matches!(self, Self::Periodic)
    }

    /// Token the engine's deck parser expects for this condition.
    pub fn deck_token(self) -> &'static str {
        match self {
            Self::Periodic => "periodic",
            Self::Absorbing => "pml",
            Self::Pec => "pec",
            Self::Pmc => "pmc",
        }
    }
}

impl fmt::Display for BoundaryCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Periodic => "periodic",
            Self::Absorbing => "absorbing",
            Self::Pec => "pec",
            Self::Pmc => "pmc",
        };
        f.write_str(name)
    }
}

impl FromStr for BoundaryCondition {
    type Err = ValidationError;

    /// Accepts the descriptive names and the deck tokens (`pml` for
    /// absorbing). Anything else is rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "periodic" => Ok(Self::Periodic),
            "absorbing" | "pml" => Ok(Self::Absorbing),
            "pec" => Ok(Self::Pec),
            "pmc" => Ok(Self::Pmc),
            other => Err(ValidationError::UnknownOption {
                kind: "boundary condition",
                value: other.to_string(),
            }),
        }
    }
}
