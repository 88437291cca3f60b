//! Coordinate system of a grid.

use std::fmt;
use std::str::FromStr;

use picdeck_core::ValidationError;

/// Geometry the engine interprets the grid axes in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CoordSystem {
    /// `(x, y, z)`.
    #[default]
    Cartesian,
    /// `(r, theta, z)`. The first axis is the radius.
    Cylindrical,
}

impl CoordSystem {
    /// Integer code written to `geometry.coord_sys`.
    pub fn code(self) -> u8 {
        match self {
            Self::Cartesian => 0,
            Self::Cylindrical => 1,
        }
    }

    /// Inverse of [`code()`](Self::code).
    pub fn from_code(code: i64) -> Result<Self, ValidationError> {
        match code {
            0 => Ok(Self::Cartesian),
            1 => Ok(Self::Cylindrical),
            other => Err(ValidationError::UnknownOption {
                kind: "coordinate system code",
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for CoordSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cartesian => f.write_str("cartesian"),
            Self::Cylindrical => f.write_str("cylindrical"),
        }
    }
}

impl FromStr for CoordSystem {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cartesian" => Ok(Self::Cartesian),
            "cylindrical" => Ok(Self::Cylindrical),
            other => Err(ValidationError::UnknownOption {
                kind: "coordinate system",
                value: other.to_string(),
            }),
        }
    }
}
