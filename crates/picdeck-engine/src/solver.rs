//! Field solver selection and time-step computation.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use picdeck_core::constants::C;
use picdeck_core::{check_finite, ValidationError};
use picdeck_grid::Grid;

/// Spectral order used when `psatd` is selected by name.
pub const DEFAULT_SPECTRAL_ORDER: u32 = 16;

/// Electromagnetic field-solve method.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EmMethod {
    /// Yee finite-difference time-domain scheme.
    Yee,
    /// Cole-Karkkainen-Cowan scheme.
    Ckc,
    /// Pseudo-spectral analytical time-domain solver.
    Psatd {
        /// Stencil order along x, y, z.
        spectral_order: [u32; 3],
    },
}

impl EmMethod {
    /// Value of `algo.maxwell_solver`.
    pub fn deck_token(self) -> &'static str {
        match self {
            Self::Yee => "yee",
            Self::Ckc => "ckc",
            Self::Psatd { .. } => "psatd",
        }
    }
}

/// Which equations the solver integrates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SolverKind {
    /// Full Maxwell solve.
    Electromagnetic(EmMethod),
    /// Poisson solve each step.
    Electrostatic,
}

impl Default for SolverKind {
    fn default() -> Self {
        Self::Electromagnetic(EmMethod::Yee)
    }
}

impl fmt::Display for SolverKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Electromagnetic(m) => f.write_str(m.deck_token()),
            Self::Electrostatic => f.write_str("electrostatic"),
        }
    }
}

impl FromStr for SolverKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "yee" | "electromagnetic" => Ok(Self::Electromagnetic(EmMethod::Yee)),
            "ckc" => Ok(Self::Electromagnetic(EmMethod::Ckc)),
            "psatd" => Ok(Self::Electromagnetic(EmMethod::Psatd {
                spectral_order: [DEFAULT_SPECTRAL_ORDER; 3],
            })),
            "electrostatic" => Ok(Self::Electrostatic),
            _ => Err(ValidationError::UnknownOption {
                kind: "solver",
                value: s.to_string(),
            }),
        }
    }
}

/// A field solver bound to a grid.
///
/// Holds a shared reference to the grid; two solvers built on clones of
/// the same `Arc` share grid identity.
#[derive(Clone, Debug)]
pub struct Solver {
    kind: SolverKind,
    grid: Arc<Grid>,
    cfl: f64,
}

impl Solver {
    /// Build a solver.
    ///
    /// # Errors
    ///
    /// - [`ValidationError::NonFinite`] / [`ValidationError::NonPositiveCfl`]
    ///   for a bad `cfl`.
    /// - [`ValidationError::InvalidParameter`] for PSATD on a grid with
    ///   mesh refinement, or a spectral order of zero.
    pub fn new(kind: SolverKind, grid: Arc<Grid>, cfl: f64) -> Result<Self, ValidationError> {
        if check_finite("cfl", cfl)? <= 0.0 {
            return Err(ValidationError::NonPositiveCfl { value: cfl });
        }
        if let SolverKind::Electromagnetic(EmMethod::Psatd { spectral_order }) = kind {
            if grid.max_level() != 0 {
                return Err(ValidationError::InvalidParameter {
                    field: "max_level",
                    reason: format!(
                        "psatd does not support mesh refinement, got max_level {}",
                        grid.max_level()
                    ),
                });
            }
            if spectral_order.contains(&0) {
                return Err(ValidationError::InvalidParameter {
                    field: "spectral_order",
                    reason: format!("orders must be at least 1, got {spectral_order:?}"),
                });
            }
        }
        if cfl > 1.0 && matches!(kind, SolverKind::Electromagnetic(EmMethod::Yee)) {
            log::warn!("cfl {cfl} exceeds the Yee stability limit of 1");
        }
        Ok(Self { kind, grid, cfl })
    }

    /// Electromagnetic Yee solver, the common case.
    pub fn electromagnetic(grid: Arc<Grid>, cfl: f64) -> Result<Self, ValidationError> {
        Self::new(SolverKind::Electromagnetic(EmMethod::Yee), grid, cfl)
    }

    /// Solver kind.
    pub fn kind(&self) -> SolverKind {
        self.kind
    }

    /// The grid this solver runs on.
    pub fn grid(&self) -> &Arc<Grid> {
        &self.grid
    }

    /// Courant factor.
    pub fn cfl(&self) -> f64 {
        self.cfl
    }

    /// Engine time step in seconds.
    ///
    /// Yee and electrostatic use the 3D Courant limit scaled by `cfl`;
    /// CKC and PSATD use `cfl * min(dx) / c`.
    pub fn time_step(&self) -> f64 {
        let dx = self.grid.cell_size();
        match self.kind {
            SolverKind::Electromagnetic(EmMethod::Yee) | SolverKind::Electrostatic => {
                yee_time_step(self.cfl, dx)
            }
            SolverKind::Electromagnetic(EmMethod::Ckc | EmMethod::Psatd { .. }) => {
                let min_dx = dx.into_iter().fold(f64::INFINITY, f64::min);
                self.cfl * min_dx / C
            }
        }
    }
}

/// `cfl / (c * sqrt(1/dx^2 + 1/dy^2 + 1/dz^2))`.
pub fn yee_time_step(cfl: f64, cell_size: [f64; 3]) -> f64 {
    let inv: f64 = cell_size.iter().map(|d| 1.0 / (d * d)).sum();
    cfl / (C * inv.sqrt())
}
