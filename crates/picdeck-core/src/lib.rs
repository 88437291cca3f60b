//! Core types and error taxonomy for picdeck.
//!
//! This is the leaf crate with zero internal dependencies. It defines the
//! vocabulary shared by every other picdeck crate: axis naming, grid
//! identity, physical constants, and the validation and engine error types.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod axis;
pub mod constants;
pub mod error;
pub mod id;
pub mod name;

pub use axis::{Axis, Vec3};
pub use error::{EngineError, ValidationError};
pub use id::{GridInstanceId, StepIndex};
pub use name::validate_name;

/// Reject a non-finite value for `field`.
///
/// Every float that ends up in an input deck passes through this check,
/// since the engine's parser has no spelling for NaN or infinity.
pub fn check_finite(field: &'static str, value: f64) -> Result<f64, ValidationError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ValidationError::NonFinite { field, value })
    }
}

/// Apply [`check_finite`] to each component of a 3-vector.
pub fn check_finite3(field: &'static str, value: Vec3) -> Result<Vec3, ValidationError> {
    for v in value {
        check_finite(field, v)?;
    }
    Ok(value)
}
