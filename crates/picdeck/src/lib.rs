//! picdeck: a declarative configuration layer for 3D electromagnetic
//! particle-in-cell simulations.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all picdeck sub-crates. Describe a run once (grid, solver, species,
//! layouts, lasers, run control) and either write it out as an input deck
//! for the compiled engine or drive an engine step by step.
//!
//! # Quick start
//!
//! ```rust
//! use std::sync::Arc;
//! use picdeck::prelude::*;
//!
//! let grid = Arc::new(
//!     Grid::new(GridParams::new([64, 64, 64], [-20e-6; 3], [20e-6; 3])).unwrap(),
//! );
//! let mut sim = Simulation::new();
//! sim.set_solver(Solver::electromagnetic(grid.clone(), 1.0).unwrap()).unwrap();
//! sim.set_run_control(RunControl::new(40, 1, 1).unwrap()).unwrap();
//!
//! let plasma = Distribution::new(1e25)
//!     .unwrap()
//!     .with_directed_velocity([0.1, 0.0, 0.0])
//!     .unwrap();
//! let electrons = Species::new("electrons", ParticleType::Electron, plasma).unwrap();
//! sim.attach_species(electrons, Layout::gridded([2, 2, 2], grid).unwrap()).unwrap();
//!
//! let deck = sim.to_deck().unwrap();
//! assert_eq!(deck.get("amr.n_cell").unwrap().to_string(), "64 64 64");
//!
//! let steps = sim.run(DryRunEngine::new()).unwrap().count();
//! assert_eq!(steps, 40);
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `picdeck-core` | Axes, constants, ids, name rules, error taxonomy |
//! | [`grid`] | `picdeck-grid` | Grid, boundary conditions, regions |
//! | [`species`] | `picdeck-species` | Particle types, distributions, species, layouts |
//! | [`laser`] | `picdeck-laser` | Laser antennas and the Harris profile |
//! | [`deck`] | `picdeck-deck` | Input-deck model, parser, atomic writer |
//! | [`engine`] | `picdeck-engine` | Solver, simulation, emit and run dispatch |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types, constants, and errors (`picdeck-core`).
///
/// Contains [`types::Axis`], [`types::GridInstanceId`], the physical
/// constants in [`types::constants`], and [`types::ValidationError`].
pub use picdeck_core as types;

/// Computational grid (`picdeck-grid`).
///
/// [`grid::Grid`] is built from [`grid::GridParams`]; species regions
/// use [`grid::Region`].
pub use picdeck_grid as grid;

/// Species, distributions, and layouts (`picdeck-species`).
pub use picdeck_species as species;

/// Laser antennas (`picdeck-laser`).
pub use picdeck_laser as laser;

/// Input decks (`picdeck-deck`).
///
/// Read decks back with [`deck::parse_deck`] or [`deck::read_deck`].
pub use picdeck_deck as deck;

/// Simulation assembly and dispatch (`picdeck-engine`).
///
/// [`engine::Simulation::emit`] for input-deck output,
/// [`engine::Simulation::run`] for step-driven execution.
pub use picdeck_engine as engine;

/// Common imports for typical picdeck usage.
///
/// ```rust
/// use picdeck::prelude::*;
/// ```
pub mod prelude {
    // Core
    pub use picdeck_core::{Axis, EngineError, StepIndex, ValidationError, Vec3};

    // Grid
    pub use picdeck_grid::{AxisBound, BoundaryCondition, CoordSystem, Grid, GridParams, Region};

    // Species
    pub use picdeck_species::{Distribution, Layout, LayoutKind, ParticleType, Species};

    // Laser
    pub use picdeck_laser::{HarrisProfile, Laser, LaserParams, LaserProfile};

    // Deck
    pub use picdeck_deck::{DeckError, InputDeck};

    // Engine
    pub use picdeck_engine::{
        Algorithms, DryRunEngine, EmMethod, EngineStep, PicEngine, RunControl, Simulation,
        SimulationError, SimulationRun, Solver, SolverKind, StepResult,
    };
}
