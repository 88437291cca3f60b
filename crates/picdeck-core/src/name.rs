//! Names of species and lasers.
//!
//! Species and laser names become key prefixes in the input deck
//! (`electrons.density = ...`), so they must be plain identifiers and must
//! not shadow a prefix the engine reserves for its own settings.

use crate::error::ValidationError;

/// Deck prefixes owned by the engine.
pub const RESERVED_PREFIXES: [&str; 9] = [
    "amr",
    "geometry",
    "boundary",
    "warpx",
    "algo",
    "particles",
    "lasers",
    "psatd",
    "max_step",
];

/// Check that `name` is usable as a deck key prefix.
///
/// Accepts `[A-Za-z][A-Za-z0-9_]*` excluding [`RESERVED_PREFIXES`].
pub fn validate_name(name: &str) -> Result<(), ValidationError> {
    let invalid = |reason: &str| ValidationError::InvalidName {
        name: name.to_string(),
        reason: reason.to_string(),
    };
    let mut chars = name.chars();
    match chars.next() {
        None => return Err(invalid("name is empty")),
        Some(c) if !c.is_ascii_alphabetic() => {
            return Err(invalid("must start with an ASCII letter"))
        }
        Some(_) => {}
    }
    if !chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(invalid("only ASCII letters, digits and '_' are allowed"));
    }
    if RESERVED_PREFIXES.contains(&name) {
        return Err(invalid("reserved by the engine"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifiers_accepted() {
        assert!(validate_name("electrons").is_ok());
        assert!(validate_name("ions_C6").is_ok());
    }

    #[test]
    fn malformed_names_rejected() {
        for bad in ["", "1e", "_x", "e.lec", "beam one"] {
            assert!(validate_name(bad).is_err(), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn reserved_prefix_rejected() {
        match validate_name("warpx") {
            Err(ValidationError::InvalidName { reason, .. }) => {
                assert!(reason.contains("reserved"));
            }
            other => panic!("expected InvalidName, got {other:?}"),
        }
    }
}
