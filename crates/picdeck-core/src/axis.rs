//! Cartesian axis naming and the [`Vec3`] alias.

use std::fmt;

/// A 3-component vector of reals, indexed by [`Axis::index`].
pub type Vec3 = [f64; 3];

/// One of the three spatial axes.
///
/// Decks and error messages name axes by their lowercase letter; code
/// indexes per-axis arrays with [`index()`](Axis::index).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Axis {
    /// First axis (radius for cylindrical grids).
    X,
    /// Second axis.
    Y,
    /// Third axis.
    Z,
}

impl Axis {
    /// All axes in index order.
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Array index of this axis.
    pub fn index(self) -> usize {
        match self {
            Self::X => 0,
            Self::Y => 1,
            Self::Z => 2,
        }
    }

    /// Axis for an array index, or `None` if `i >= 3`.
    pub fn from_index(i: usize) -> Option<Self> {
        Self::ALL.get(i).copied()
    }

    /// Lowercase letter used in deck keys (`x`, `y`, `z`).
    pub fn letter(self) -> &'static str {
        match self {
            Self::X => "x",
            Self::Y => "y",
            Self::Z => "z",
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.letter())
    }
}
