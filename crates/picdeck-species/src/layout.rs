//! Macroparticle layouts.

use std::sync::Arc;

use picdeck_core::{Axis, GridInstanceId, ValidationError};
use picdeck_grid::Grid;

/// How macroparticles are placed within each cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LayoutKind {
    /// A regular sub-lattice of `per_dim[i]` particles along each axis.
    Gridded {
        /// Macroparticles per cell along each axis.
        per_dim: [u32; 3],
    },
    /// `per_cell` particles at random positions inside each cell.
    PseudoRandom {
        /// Macroparticles per cell.
        per_cell: u32,
    },
}

/// Sampling of a species onto a grid.
///
/// Holds a shared, non-owning reference to the grid. When attached to a
/// simulation, the referenced grid must be the same instance as the
/// solver's grid.
#[derive(Clone, Debug)]
pub struct Layout {
    kind: LayoutKind,
    grid: Arc<Grid>,
}

impl Layout {
    /// A gridded layout with `per_dim` macroparticles along each axis.
    ///
    /// ```
    /// use std::sync::Arc;
    /// use picdeck_grid::{Grid, GridParams};
    /// use picdeck_species::Layout;
    ///
    /// let grid = Arc::new(Grid::new(GridParams::new([8; 3], [0.0; 3], [1.0; 3])).unwrap());
    /// let layout = Layout::gridded([2, 2, 2], Arc::clone(&grid)).unwrap();
    /// assert_eq!(layout.macroparticles_per_cell(), 8);
    /// assert!(Layout::gridded([2, 0, 2], grid).is_err());
    /// ```
    pub fn gridded(per_dim: [u32; 3], grid: Arc<Grid>) -> Result<Self, ValidationError> {
        for axis in Axis::ALL {
            let value = per_dim[axis.index()];
            if value < 1 {
                return Err(ValidationError::MacroparticlesBelowOne {
                    axis: Some(axis),
                    value,
                });
            }
        }
        Ok(Self {
            kind: LayoutKind::Gridded { per_dim },
            grid,
        })
    }

    /// A pseudo-random layout with `per_cell` macroparticles per cell.
    pub fn pseudo_random(per_cell: u32, grid: Arc<Grid>) -> Result<Self, ValidationError> {
        if per_cell < 1 {
            return Err(ValidationError::MacroparticlesBelowOne {
                axis: None,
                value: per_cell,
            });
        }
        Ok(Self {
            kind: LayoutKind::PseudoRandom { per_cell },
            grid,
        })
    }

    /// Placement scheme.
    pub fn kind(&self) -> LayoutKind {
        self.kind
    }

    /// The grid this layout samples onto.
    pub fn grid(&self) -> &Arc<Grid> {
        &self.grid
    }

    /// Identity of the referenced grid.
    pub fn grid_id(&self) -> GridInstanceId {
        self.grid.instance_id()
    }

    /// Per-axis counts for a gridded layout.
    pub fn per_dim(&self) -> Option<[u32; 3]> {
        match self.kind {
            LayoutKind::Gridded { per_dim } => Some(per_dim),
            LayoutKind::PseudoRandom { .. } => None,
        }
    }

    /// Total macroparticles placed in each cell.
    pub fn macroparticles_per_cell(&self) -> u64 {
        match self.kind {
            LayoutKind::Gridded { per_dim } => per_dim.iter().map(|&n| u64::from(n)).product(),
            LayoutKind::PseudoRandom { per_cell } => u64::from(per_cell),
        }
    }

    /// Upper bound on the macroparticle count if every cell is filled.
    pub fn max_macroparticles(&self) -> u64 {
        self.macroparticles_per_cell()
            .saturating_mul(self.grid.cell_count())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use picdeck_grid::GridParams;

    fn grid() -> Arc<Grid> {
        Arc::new(Grid::new(GridParams::new([4, 4, 4], [0.0; 3], [1.0; 3])).unwrap())
    }

    #[test]
    fn gridded_counts() {
        let layout = Layout::gridded([1, 2, 3], grid()).unwrap();
        assert_eq!(layout.per_dim(), Some([1, 2, 3]));
        assert_eq!(layout.macroparticles_per_cell(), 6);
        assert_eq!(layout.max_macroparticles(), 6 * 64);
    }

    #[test]
    fn zero_component_rejected() {
        match Layout::gridded([1, 1, 0], grid()) {
            Err(ValidationError::MacroparticlesBelowOne {
                axis: Some(Axis::Z),
                value: 0,
            }) => {}
            other => panic!("expected MacroparticlesBelowOne, got {other:?}"),
        }
    }

    #[test]
    fn pseudo_random_counts() {
        let layout = Layout::pseudo_random(5, grid()).unwrap();
        assert_eq!(layout.per_dim(), None);
        assert_eq!(layout.macroparticles_per_cell(), 5);
        assert!(Layout::pseudo_random(0, grid()).is_err());
    }

    #[test]
    fn grid_identity_follows_the_shared_instance() {
        let g = grid();
        let layout = Layout::gridded([1, 1, 1], Arc::clone(&g)).unwrap();
        assert_eq!(layout.grid_id(), g.instance_id());
        assert_ne!(layout.grid_id(), grid().instance_id());
    }
}
