//! Run control, validation, and the simulation error type.
//!
//! [`RunControl`] carries the scalar run settings. [`SimulationError`] is
//! what every [`Simulation`](crate::Simulation) operation and every
//! [`SimulationRun`](crate::SimulationRun) step reports.

use std::error::Error;
use std::fmt;

use picdeck_core::{EngineError, ValidationError};
use picdeck_deck::DeckError;

// ── RunControl ─────────────────────────────────────────────────────

/// Largest step count the deck's signed integer fields can hold.
pub const MAX_DECK_STEPS: u64 = i64::MAX as u64;

/// Step budget, diagnostic cadence, and engine verbosity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RunControl {
    /// Number of steps the run advances. Default: 0.
    pub max_steps: u64,
    /// A step whose index is a multiple of this is a diagnostic step.
    /// Default: 1. Minimum: 1.
    pub diagnostic_interval: u64,
    /// Engine log verbosity. Default: 0.
    pub verbosity: u32,
}

impl Default for RunControl {
    fn default() -> Self {
        Self {
            max_steps: 0,
            diagnostic_interval: 1,
            verbosity: 0,
        }
    }
}

impl RunControl {
    /// Validated run control.
    pub fn new(
        max_steps: u64,
        diagnostic_interval: u64,
        verbosity: u32,
    ) -> Result<Self, ValidationError> {
        let rc = Self {
            max_steps,
            diagnostic_interval,
            verbosity,
        };
        rc.validate()?;
        Ok(rc)
    }

    /// Check that `diagnostic_interval` is at least 1 and that both
    /// step counts fit the deck's signed integers.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.diagnostic_interval == 0 {
            return Err(ValidationError::InvalidParameter {
                field: "diagnostic_interval",
                reason: "must be at least 1".to_string(),
            });
        }
        for (field, value) in [
            ("max_steps", self.max_steps),
            ("diagnostic_interval", self.diagnostic_interval),
        ] {
            if value > MAX_DECK_STEPS {
                return Err(ValidationError::InvalidParameter {
                    field,
                    reason: format!("{value} exceeds {MAX_DECK_STEPS}"),
                });
            }
        }
        Ok(())
    }

    /// Whether `step` is a diagnostic step.
    pub fn is_diagnostic(&self, step: u64) -> bool {
        step % self.diagnostic_interval.max(1) == 0
    }
}

// ── SimulationError ────────────────────────────────────────────────

/// Errors from assembling, emitting, or running a simulation.
#[derive(Debug)]
pub enum SimulationError {
    /// A value failed validation.
    Validation(ValidationError),
    /// A species with this name is already attached.
    DuplicateSpeciesName {
        /// The repeated name.
        name: String,
    },
    /// A laser with this name, or a species sharing it, is already attached.
    DuplicateLaserName {
        /// The repeated name.
        name: String,
    },
    /// A dispatch was requested before the description was complete.
    IncompleteConfiguration {
        /// What is missing (`"solver"` or `"species"`).
        missing: &'static str,
    },
    /// The simulation is running; its structure is fixed.
    SimulationAlreadyRunning,
    /// The simulation was emitted; its structure is fixed.
    SimulationAlreadyFinalized,
    /// The engine or the artifact sink failed.
    Engine(EngineError),
    /// The deck could not be built or read.
    Deck(DeckError),
}

impl fmt::Display for SimulationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validation(e) => write!(f, "validation: {e}"),
            Self::DuplicateSpeciesName { name } => {
                write!(f, "species '{name}' is already attached")
            }
            Self::DuplicateLaserName { name } => {
                write!(f, "name '{name}' is already used by a species or laser")
            }
            Self::IncompleteConfiguration { missing } => {
                write!(f, "configuration incomplete: no {missing}")
            }
            Self::SimulationAlreadyRunning => write!(f, "simulation is already running"),
            Self::SimulationAlreadyFinalized => {
                write!(f, "simulation was already emitted as an input deck")
            }
            Self::Engine(e) => write!(f, "engine: {e}"),
            Self::Deck(e) => write!(f, "deck: {e}"),
        }
    }
}

impl Error for SimulationError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(e) => Some(e),
            Self::Engine(e) => Some(e),
            Self::Deck(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ValidationError> for SimulationError {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e)
    }
}

impl From<EngineError> for SimulationError {
    fn from(e: EngineError) -> Self {
        Self::Engine(e)
    }
}

impl From<DeckError> for SimulationError {
    fn from(e: DeckError) -> Self {
        Self::Deck(e)
    }
}
