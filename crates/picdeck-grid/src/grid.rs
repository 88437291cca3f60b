//! The simulation mesh.

use picdeck_core::{check_finite3, Axis, GridInstanceId, ValidationError, Vec3};

use crate::boundary::BoundaryCondition;
use crate::coord::CoordSystem;

/// Builder input for [`Grid::new`].
///
/// Boundary conditions are held in `Vec`s so that descriptions assembled
/// from external sources can be length-checked; anything other than one
/// entry per axis is rejected.
#[derive(Clone, Debug, PartialEq)]
pub struct GridParams {
    /// Number of cells along each axis. All must be positive.
    pub cells: [u32; 3],
    /// Lower corner of the domain.
    pub lower_bound: Vec3,
    /// Upper corner of the domain. Must exceed `lower_bound` on every axis.
    pub upper_bound: Vec3,
    /// Boundary condition on the lower side of each axis. Default: periodic.
    pub boundary_lo: Vec<BoundaryCondition>,
    /// Boundary condition on the upper side of each axis. Default: periodic.
    pub boundary_hi: Vec<BoundaryCondition>,
    /// Moving-window velocity (m/s). Default: zero (window disabled).
    pub moving_window_velocity: Vec3,
    /// Largest box the engine may tile the domain into. Default: 32.
    pub max_grid_size: u32,
    /// Maximum mesh-refinement level; 0 disables refinement. Default: 0.
    pub max_level: u32,
    /// Coordinate system. Default: cartesian.
    pub coord_system: CoordSystem,
}

impl GridParams {
    /// Parameters for a periodic cartesian box; everything else defaulted.
    pub fn new(cells: [u32; 3], lower_bound: Vec3, upper_bound: Vec3) -> Self {
        Self {
            cells,
            lower_bound,
            upper_bound,
            boundary_lo: vec![BoundaryCondition::Periodic; 3],
            boundary_hi: vec![BoundaryCondition::Periodic; 3],
            moving_window_velocity: [0.0; 3],
            max_grid_size: 32,
            max_level: 0,
            coord_system: CoordSystem::Cartesian,
        }
    }

    /// Replace both boundary arrays with `bc` on every side.
    pub fn with_boundaries(mut self, bc: BoundaryCondition) -> Self {
        self.boundary_lo = vec![bc; 3];
        self.boundary_hi = vec![bc; 3];
        self
    }
}

/// A validated 3D mesh description.
///
/// Immutable after construction. Every grid carries a
/// [`GridInstanceId`]; solvers and layouts share a grid by holding the
/// same instance (typically through an `Arc<Grid>`), and identity checks
/// compare instance IDs rather than parameters.
///
/// # Examples
///
/// ```
/// use picdeck_grid::{Grid, GridParams};
///
/// let grid = Grid::new(GridParams::new([64, 64, 64], [-20e-6; 3], [20e-6; 3])).unwrap();
/// assert_eq!(grid.cell_count(), 64 * 64 * 64);
/// assert!((grid.cell_size()[0] - 40e-6 / 64.0).abs() < 1e-18);
///
/// let flat = GridParams::new([0, 4, 4], [0.0; 3], [1.0; 3]);
/// assert!(Grid::new(flat).is_err());
/// ```
#[derive(Clone, Debug)]
pub struct Grid {
    cells: [u32; 3],
    lower_bound: Vec3,
    upper_bound: Vec3,
    boundary_lo: [BoundaryCondition; 3],
    boundary_hi: [BoundaryCondition; 3],
    moving_window_velocity: Vec3,
    max_grid_size: u32,
    max_level: u32,
    coord_system: CoordSystem,
    instance_id: GridInstanceId,
}

impl Grid {
    /// Validate `params` and build a grid.
    ///
    /// # Errors
    ///
    /// - [`NonPositiveCells`](ValidationError::NonPositiveCells) for a
    ///   zero cell count
    /// - [`NonFinite`](ValidationError::NonFinite) for NaN/infinite bounds
    ///   or window velocity
    /// - [`InvertedBounds`](ValidationError::InvertedBounds) when
    ///   `lower_bound[i] >= upper_bound[i]`
    /// - [`BoundaryCount`](ValidationError::BoundaryCount) when a boundary
    ///   array does not have exactly 3 entries
    /// - [`PeriodicMismatch`](ValidationError::PeriodicMismatch) when an
    ///   axis is periodic on one side only
    /// - [`InvalidParameter`](ValidationError::InvalidParameter) for a zero
    ///   `max_grid_size`, a window moving along more than one axis, or an
    ///   ill-formed cylindrical radial axis
    pub fn new(params: GridParams) -> Result<Self, ValidationError> {
        for axis in Axis::ALL {
            let value = params.cells[axis.index()];
            if value == 0 {
                return Err(ValidationError::NonPositiveCells { axis, value });
            }
        }

        check_finite3("lower_bound", params.lower_bound)?;
        check_finite3("upper_bound", params.upper_bound)?;
        for axis in Axis::ALL {
            let (lower, upper) = (
                params.lower_bound[axis.index()],
                params.upper_bound[axis.index()],
            );
            if lower >= upper {
                return Err(ValidationError::InvertedBounds { axis, lower, upper });
            }
        }

        let boundary_lo = boundary_array("boundary_lo", &params.boundary_lo)?;
        let boundary_hi = boundary_array("boundary_hi", &params.boundary_hi)?;
        for axis in Axis::ALL {
            let i = axis.index();
            if boundary_lo[i].is_periodic() != boundary_hi[i].is_periodic() {
                return Err(ValidationError::PeriodicMismatch { axis });
            }
        }

        check_finite3("moving_window_velocity", params.moving_window_velocity)?;
        let moving_axes = params
            .moving_window_velocity
            .iter()
            .filter(|v| **v != 0.0)
            .count();
        if moving_axes > 1 {
            return Err(ValidationError::InvalidParameter {
                field: "moving_window_velocity",
                reason: format!("window may move along one axis only, got {moving_axes}"),
            });
        }

        if params.max_grid_size == 0 {
            return Err(ValidationError::InvalidParameter {
                field: "max_grid_size",
                reason: "must be at least 1".to_string(),
            });
        }

        if params.coord_system == CoordSystem::Cylindrical {
            if params.lower_bound[0] < 0.0 {
                return Err(ValidationError::InvalidParameter {
                    field: "lower_bound",
                    reason: format!(
                        "cylindrical radius must start at or above 0, got {}",
                        params.lower_bound[0]
                    ),
                });
            }
            if boundary_lo[0].is_periodic() {
                return Err(ValidationError::InvalidParameter {
                    field: "boundary_lo",
                    reason: "cylindrical radial axis cannot be periodic".to_string(),
                });
            }
        }

        Ok(Self {
            cells: params.cells,
            lower_bound: params.lower_bound,
            upper_bound: params.upper_bound,
            boundary_lo,
            boundary_hi,
            moving_window_velocity: params.moving_window_velocity,
            max_grid_size: params.max_grid_size,
            max_level: params.max_level,
            coord_system: params.coord_system,
            instance_id: GridInstanceId::next(),
        })
    }

    /// Cells along each axis.
    pub fn cells(&self) -> [u32; 3] {
        self.cells
    }

    /// Total number of cells.
    pub fn cell_count(&self) -> u64 {
        self.cells.iter().map(|&n| u64::from(n)).product()
    }

    /// Lower corner of the domain.
    pub fn lower_bound(&self) -> Vec3 {
        self.lower_bound
    }

    /// Upper corner of the domain.
    pub fn upper_bound(&self) -> Vec3 {
        self.upper_bound
    }

    /// Cell edge length along each axis.
    pub fn cell_size(&self) -> Vec3 {
        [0, 1, 2].map(|i| (self.upper_bound[i] - self.lower_bound[i]) / f64::from(self.cells[i]))
    }

    /// Lower-side boundary conditions.
    pub fn boundary_lo(&self) -> [BoundaryCondition; 3] {
        self.boundary_lo
    }

    /// Upper-side boundary conditions.
    pub fn boundary_hi(&self) -> [BoundaryCondition; 3] {
        self.boundary_hi
    }

    /// Whether `axis` wraps.
    pub fn is_periodic(&self, axis: Axis) -> bool {
        self.boundary_lo[axis.index()].is_periodic()
    }

    /// Moving-window velocity (m/s).
    pub fn moving_window_velocity(&self) -> Vec3 {
        self.moving_window_velocity
    }

    /// The axis the window moves along and its speed, if the window moves.
    pub fn moving_window(&self) -> Option<(Axis, f64)> {
        Axis::ALL
            .into_iter()
            .map(|a| (a, self.moving_window_velocity[a.index()]))
            .find(|(_, v)| *v != 0.0)
    }

    /// Tiling hint for the engine.
    pub fn max_grid_size(&self) -> u32 {
        self.max_grid_size
    }

    /// Maximum mesh-refinement level.
    pub fn max_level(&self) -> u32 {
        self.max_level
    }

    /// Coordinate system.
    pub fn coord_system(&self) -> CoordSystem {
        self.coord_system
    }

    /// Unique identity of this grid.
    pub fn instance_id(&self) -> GridInstanceId {
        self.instance_id
    }

    /// Whether `point` lies inside the domain (lower inclusive, upper exclusive).
    pub fn contains(&self, point: Vec3) -> bool {
        (0..3).all(|i| point[i] >= self.lower_bound[i] && point[i] < self.upper_bound[i])
    }
}

fn boundary_array(
    side: &'static str,
    given: &[BoundaryCondition],
) -> Result<[BoundaryCondition; 3], ValidationError> {
    <[BoundaryCondition; 3]>::try_from(given).map_err(|_| ValidationError::BoundaryCount {
        side,
        expected: 3,
        got: given.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn langmuir_params() -> GridParams {
        GridParams::new([64, 64, 64], [-20e-6; 3], [20e-6; 3])
    }

    #[test]
    fn valid_grid_builds() {
        let grid = Grid::new(langmuir_params()).unwrap();
        assert_eq!(grid.cells(), [64, 64, 64]);
        assert_eq!(grid.max_grid_size(), 32);
        assert_eq!(grid.max_level(), 0);
        assert!(Axis::ALL.iter().all(|&a| grid.is_periodic(a)));
        assert_eq!(grid.moving_window(), None);
    }

    #[test]
    fn zero_cells_rejected() {
        let mut p = langmuir_params();
        p.cells[2] = 0;
        match Grid::new(p) {
            Err(ValidationError::NonPositiveCells { axis: Axis::Z, value: 0 }) => {}
            other => panic!("expected NonPositiveCells, got {other:?}"),
        }
    }

    #[test]
    fn equal_bounds_rejected() {
        let mut p = langmuir_params();
        p.upper_bound[1] = p.lower_bound[1];
        match Grid::new(p) {
            Err(ValidationError::InvertedBounds { axis: Axis::Y, .. }) => {}
            other => panic!("expected InvertedBounds, got {other:?}"),
        }
    }

    #[test]
    fn short_boundary_array_rejected() {
        let mut p = langmuir_params();
        p.boundary_hi.pop();
        match Grid::new(p) {
            Err(ValidationError::BoundaryCount {
                side: "boundary_hi",
                expected: 3,
                got: 2,
            }) => {}
            other => panic!("expected BoundaryCount, got {other:?}"),
        }
    }

    #[test]
    fn one_sided_periodic_rejected() {
        let mut p = langmuir_params();
        p.boundary_hi[0] = BoundaryCondition::Absorbing;
        match Grid::new(p) {
            Err(ValidationError::PeriodicMismatch { axis: Axis::X }) => {}
            other => panic!("expected PeriodicMismatch, got {other:?}"),
        }
    }

    #[test]
    fn mixed_non_periodic_sides_allowed() {
        let mut p = langmuir_params().with_boundaries(BoundaryCondition::Absorbing);
        p.boundary_lo[2] = BoundaryCondition::Pec;
        let grid = Grid::new(p).unwrap();
        assert_eq!(grid.boundary_lo()[2], BoundaryCondition::Pec);
        assert!(!grid.is_periodic(Axis::Z));
    }

    #[test]
    fn moving_window_single_axis() {
        let mut p = langmuir_params();
        p.moving_window_velocity = [0.0, 0.0, 2.9e8];
        let grid = Grid::new(p.clone()).unwrap();
        assert_eq!(grid.moving_window(), Some((Axis::Z, 2.9e8)));

        p.moving_window_velocity = [1.0, 0.0, 2.9e8];
        assert!(matches!(
            Grid::new(p),
            Err(ValidationError::InvalidParameter {
                field: "moving_window_velocity",
                ..
            })
        ));
    }

    #[test]
    fn zero_max_grid_size_rejected() {
        let mut p = langmuir_params();
        p.max_grid_size = 0;
        assert!(Grid::new(p).is_err());
    }

    #[test]
    fn cylindrical_radius_checks() {
        let mut p = GridParams::new([16, 1, 32], [0.0, 0.0, -1.0], [1.0, 1.0, 1.0])
            .with_boundaries(BoundaryCondition::Absorbing);
        p.coord_system = CoordSystem::Cylindrical;
        assert!(Grid::new(p.clone()).is_ok());

        p.lower_bound[0] = -0.5;
        assert!(Grid::new(p.clone()).is_err());

        p.lower_bound[0] = 0.0;
        p.boundary_lo[0] = BoundaryCondition::Periodic;
        p.boundary_hi[0] = BoundaryCondition::Periodic;
        assert!(Grid::new(p).is_err());
    }

    #[test]
    fn separate_constructions_have_distinct_identity() {
        let a = Grid::new(langmuir_params()).unwrap();
        let b = Grid::new(langmuir_params()).unwrap();
        assert_ne!(a.instance_id(), b.instance_id());
        assert_eq!(a.clone().instance_id(), a.instance_id());
    }

    #[test]
    fn contains_is_half_open() {
        let grid = Grid::new(GridParams::new([2, 2, 2], [0.0; 3], [1.0; 3])).unwrap();
        assert!(grid.contains([0.0, 0.5, 0.999]));
        assert!(!grid.contains([1.0, 0.5, 0.5]));
    }

    proptest! {
        #[test]
        fn inverted_bounds_always_rejected(
            axis in 0usize..3,
            lower in -1.0e3f64..1.0e3,
            gap in 0.0f64..1.0e3,
        ) {
            let mut p = GridParams::new([8, 8, 8], [-2.0e3; 3], [2.0e3; 3]);
            p.lower_bound[axis] = lower;
            p.upper_bound[axis] = lower - gap;
            let is_inverted = matches!(
                Grid::new(p),
                Err(ValidationError::InvertedBounds { .. })
            );
            prop_assert!(is_inverted);
        }

        #[test]
        fn cell_size_times_count_spans_domain(
            nx in 1u32..512,
            ny in 1u32..512,
            nz in 1u32..512,
            width in 1.0e-6f64..1.0,
        ) {
            let grid = Grid::new(GridParams::new([nx, ny, nz], [0.0; 3], [width; 3])).unwrap();
            let dx = grid.cell_size();
            for (i, n) in [nx, ny, nz].into_iter().enumerate() {
                prop_assert!((dx[i] * f64::from(n) - width).abs() <= width * 1e-12);
            }
        }
    }
}
