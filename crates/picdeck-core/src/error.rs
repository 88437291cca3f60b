//! Error types shared across picdeck crates.
//!
//! [`ValidationError`] covers malformed single-entity fields and is raised
//! by constructors, before any artifact is written or engine resource is
//! allocated. [`EngineError`] wraps opaque failures reported by the
//! external engine or by the artifact sink.

use std::error::Error;
use std::fmt;

use crate::axis::Axis;
use crate::id::{GridInstanceId, StepIndex};

/// A field of a simulation entity failed validation.
#[derive(Clone, Debug, PartialEq)]
pub enum ValidationError {
    /// A grid axis has zero cells.
    NonPositiveCells {
        /// Offending axis.
        axis: Axis,
        /// The configured cell count.
        value: u32,
    },
    /// A domain lower bound is not strictly below its upper bound.
    InvertedBounds {
        /// Offending axis.
        axis: Axis,
        /// Configured lower bound.
        lower: f64,
        /// Configured upper bound.
        upper: f64,
    },
    /// A per-axis array does not have one entry per dimension.
    BoundaryCount {
        /// Which array (`"boundary_lo"` or `"boundary_hi"`).
        side: &'static str,
        /// Required length.
        expected: usize,
        /// Supplied length.
        got: usize,
    },
    /// One side of an axis is periodic and the other is not.
    PeriodicMismatch {
        /// Offending axis.
        axis: Axis,
    },
    /// A real-valued field is NaN or infinite.
    NonFinite {
        /// Name of the field.
        field: &'static str,
        /// The invalid value.
        value: f64,
    },
    /// A distribution density is negative.
    NegativeDensity {
        /// The invalid value.
        value: f64,
    },
    /// A region bound has both endpoints set and `lower >= upper`.
    InvertedRegion {
        /// Offending axis.
        axis: Axis,
        /// Configured lower endpoint.
        lower: f64,
        /// Configured upper endpoint.
        upper: f64,
    },
    /// A macroparticle count is below one.
    MacroparticlesBelowOne {
        /// Offending axis, or `None` for a per-cell total.
        axis: Option<Axis>,
        /// The configured count.
        value: u32,
    },
    /// The solver CFL factor is zero or negative.
    NonPositiveCfl {
        /// The invalid value.
        value: f64,
    },
    /// An option name or code is not in the recognized set.
    UnknownOption {
        /// Which option set was being parsed (e.g. `"particle_type"`).
        kind: &'static str,
        /// The unrecognized name or code.
        value: String,
    },
    /// A species or laser name cannot be used as a deck key prefix.
    InvalidName {
        /// The rejected name.
        name: String,
        /// Why it was rejected.
        reason: String,
    },
    /// A parameter is outside its allowed range.
    InvalidParameter {
        /// Name of the parameter.
        field: &'static str,
        /// Description of the constraint that failed.
        reason: String,
    },
    /// An entity refers to a different grid instance than the solver.
    GridMismatch {
        /// Name of the entity holding the foreign grid.
        owner: String,
        /// The solver's grid.
        expected: GridInstanceId,
        /// The grid the entity refers to.
        found: GridInstanceId,
    },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveCells { axis, value } => {
                write!(f, "cell count on axis {axis} must be positive, got {value}")
            }
            Self::InvertedBounds { axis, lower, upper } => write!(
                f,
                "lower bound {lower} must be below upper bound {upper} on axis {axis}"
            ),
            Self::BoundaryCount {
                side,
                expected,
                got,
            } => write!(f, "{side} needs {expected} entries, got {got}"),
            Self::PeriodicMismatch { axis } => write!(
                f,
                "axis {axis} is periodic on one side only; periodic boundaries must be paired"
            ),
            Self::NonFinite { field, value } => {
                write!(f, "{field} must be finite, got {value}")
            }
            Self::NegativeDensity { value } => {
                write!(f, "density must be non-negative, got {value}")
            }
            Self::InvertedRegion { axis, lower, upper } => write!(
                f,
                "region lower bound {lower} must be below upper bound {upper} on axis {axis}"
            ),
            Self::MacroparticlesBelowOne { axis, value } => match axis {
                Some(axis) => write!(
                    f,
                    "macroparticles per cell on axis {axis} must be at least 1, got {value}"
                ),
                None => write!(f, "macroparticles per cell must be at least 1, got {value}"),
            },
            Self::NonPositiveCfl { value } => write!(f, "cfl must be positive, got {value}"),
            Self::UnknownOption { kind, value } => write!(f, "unknown {kind} '{value}'"),
            Self::InvalidName { name, reason } => write!(f, "invalid name '{name}': {reason}"),
            Self::InvalidParameter { field, reason } => write!(f, "invalid {field}: {reason}"),
            Self::GridMismatch {
                owner,
                expected,
                found,
            } => write!(
                f,
                "'{owner}' refers to grid #{found}, but the solver uses grid #{expected}"
            ),
        }
    }
}

impl Error for ValidationError {}

/// A failure reported by the external engine or the artifact sink.
///
/// Engine errors are opaque to this layer: they are surfaced to the
/// caller unchanged and never retried.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EngineError {
    /// The engine rejected the initial configuration.
    InitializationFailed {
        /// Name of the engine.
        engine: String,
        /// Engine-provided description.
        reason: String,
    },
    /// The engine failed while advancing a step.
    StepFailed {
        /// Name of the engine.
        engine: String,
        /// The step that was being computed.
        step: StepIndex,
        /// Engine-provided description.
        reason: String,
    },
    /// Writing the emitted input deck failed.
    ArtifactWrite {
        /// Target path of the artifact.
        path: String,
        /// Underlying I/O description.
        reason: String,
    },
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InitializationFailed { engine, reason } => {
                write!(f, "engine '{engine}' failed to initialize: {reason}")
            }
            Self::StepFailed {
                engine,
                step,
                reason,
            } => write!(f, "engine '{engine}' failed at step {step}: {reason}"),
            Self::ArtifactWrite { path, reason } => {
                write!(f, "failed to write input deck '{path}': {reason}")
            }
        }
    }
}

impl Error for EngineError {}
