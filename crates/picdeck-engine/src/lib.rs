//! Simulation assembly and dispatch for picdeck.
//!
//! Binds grids, species, layouts, and lasers into a [`Simulation`] under a
//! [`Solver`], then dispatches it one of two ways: [`Simulation::emit`]
//! writes an input deck for the compiled engine, and [`Simulation::run`]
//! drives a [`PicEngine`] step by step through a [`SimulationRun`].

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod algo;
pub mod config;
pub mod dry_run;
mod emit;
pub mod engine;
pub mod metrics;
pub mod run;
pub mod simulation;
pub mod solver;

pub use algo::{Algorithms, ChargeDeposition, CurrentDeposition, FieldGathering, ParticlePusher};
pub use config::{RunControl, SimulationError, MAX_DECK_STEPS};
pub use dry_run::DryRunEngine;
pub use engine::{EngineStep, PicEngine};
pub use metrics::StepMetrics;
pub use run::{SimulationRun, StepResult};
pub use simulation::{Lifecycle, Simulation};
pub use solver::{EmMethod, Solver, SolverKind};
