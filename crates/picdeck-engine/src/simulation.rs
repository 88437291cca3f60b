//! The simulation aggregate and its two dispatch modes.
//!
//! A [`Simulation`] is assembled through `&mut self` mutators, then
//! dispatched exactly one way:
//!
//! - [`emit()`](Simulation::emit) renders the description to an input
//!   deck and writes it atomically. The structure is then frozen, but
//!   `emit` may be repeated and produces identical bytes.
//! - [`run()`](Simulation::run) initializes an engine with the same deck
//!   and returns a [`SimulationRun`] that steps it.
//!
//! Every mutator validates before touching state, so a failed call
//! leaves the simulation exactly as it was.

use std::path::Path;

use smallvec::SmallVec;

use picdeck_core::{EngineError, ValidationError};
use picdeck_deck::{deck_fingerprint, write_deck_file, InputDeck};
use picdeck_laser::Laser;
use picdeck_species::{Layout, Species};

use crate::algo::Algorithms;
use crate::config::{RunControl, SimulationError};
use crate::emit::DeckSource;
use crate::engine::PicEngine;
use crate::run::SimulationRun;
use crate::solver::Solver;

/// Where a simulation is in its lifecycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Lifecycle {
    /// Still accepting mutations.
    #[default]
    Assembling,
    /// Rendered to an input deck; structure frozen, re-emit allowed.
    Emitted,
    /// Handed to an engine; structure frozen.
    Running,
}

// Compile-time assertion: Simulation is Send.
const _: () = {
    #[allow(dead_code)]
    fn assert_send<T: Send>() {}
    #[allow(dead_code)]
    fn check() {
        assert_send::<Simulation>();
    }
};

/// Aggregate root of a simulation description.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use picdeck_engine::{Simulation, SimulationError, Solver};
/// use picdeck_grid::{Grid, GridParams};
/// use picdeck_species::{Distribution, Layout, ParticleType, Species};
///
/// let grid = Arc::new(Grid::new(GridParams::new([16; 3], [0.0; 3], [1e-5; 3])).unwrap());
/// let mut sim = Simulation::new();
/// sim.set_solver(Solver::electromagnetic(grid.clone(), 1.0).unwrap()).unwrap();
///
/// let dist = Distribution::new(1e24).unwrap();
/// let electrons = Species::new("electrons", ParticleType::Electron, dist).unwrap();
/// sim.attach_species(electrons.clone(), Layout::gridded([2, 2, 2], grid.clone()).unwrap())
///     .unwrap();
///
/// let again = sim.attach_species(electrons, Layout::gridded([1, 1, 1], grid).unwrap());
/// assert!(matches!(again, Err(SimulationError::DuplicateSpeciesName { .. })));
/// assert_eq!(sim.species().count(), 1);
/// ```
#[derive(Clone, Debug, Default)]
pub struct Simulation {
    solver: Option<Solver>,
    run_control: RunControl,
    algorithms: Algorithms,
    species_layouts: SmallVec<[(Species, Layout); 4]>,
    lasers: Vec<Laser>,
    lifecycle: Lifecycle,
}

impl Simulation {
    /// An empty simulation with default run control and algorithms.
    pub fn new() -> Self {
        Self::default()
    }

    fn ensure_assembling(&self) -> Result<(), SimulationError> {
        match self.lifecycle {
            Lifecycle::Assembling => Ok(()),
            Lifecycle::Emitted => Err(SimulationError::SimulationAlreadyFinalized),
            Lifecycle::Running => Err(SimulationError::SimulationAlreadyRunning),
        }
    }

    fn name_taken(&self, name: &str) -> Option<&'static str> {
        if self.species_layouts.iter().any(|(s, _)| s.name() == name) {
            Some("species")
        } else if self.lasers.iter().any(|l| l.name() == name) {
            Some("laser")
        } else {
            None
        }
    }

    // ── Mutators ────────────────────────────────────────────────

    /// Install or replace the field solver.
    ///
    /// Every attached layout must reference the new solver's grid, and
    /// every laser must sit inside it. On failure the previous solver is
    /// kept.
    pub fn set_solver(&mut self, solver: Solver) -> Result<(), SimulationError> {
        self.ensure_assembling()?;
        for (species, layout) in &self.species_layouts {
            check_same_grid(&solver, species.name(), layout)?;
        }
        for laser in &self.lasers {
            check_laser_inside(&solver, laser)?;
        }
        self.solver = Some(solver);
        Ok(())
    }

    /// Append a species with its layout.
    ///
    /// # Errors
    ///
    /// - [`SimulationError::DuplicateSpeciesName`] if a species or laser
    ///   already uses the name.
    /// - [`ValidationError::GridMismatch`] if a solver is installed and
    ///   `layout` references a different grid.
    pub fn attach_species(
        &mut self,
        species: Species,
        layout: Layout,
    ) -> Result<(), SimulationError> {
        self.ensure_assembling()?;
        if self.name_taken(species.name()).is_some() {
            return Err(SimulationError::DuplicateSpeciesName {
                name: species.name().to_string(),
            });
        }
        if let Some(solver) = &self.solver {
            check_same_grid(solver, species.name(), &layout)?;
        }
        log::debug!("attached species '{}'", species.name());
        self.species_layouts.push((species, layout));
        Ok(())
    }

    /// Detach a species by name, returning it with its layout.
    pub fn remove_species(
        &mut self,
        name: &str,
    ) -> Result<Option<(Species, Layout)>, SimulationError> {
        self.ensure_assembling()?;
        Ok(self
            .species_layouts
            .iter()
            .position(|(s, _)| s.name() == name)
            .map(|i| self.species_layouts.remove(i)))
    }

    /// Append a laser antenna.
    ///
    /// The name must not collide with any species or laser. If a solver
    /// is installed the antenna must lie inside its grid; otherwise the
    /// check runs when the solver is set.
    pub fn add_laser(&mut self, laser: Laser) -> Result<(), SimulationError> {
        self.ensure_assembling()?;
        if self.name_taken(laser.name()).is_some() {
            return Err(SimulationError::DuplicateLaserName {
                name: laser.name().to_string(),
            });
        }
        if let Some(solver) = &self.solver {
            check_laser_inside(solver, &laser)?;
        }
        self.lasers.push(laser);
        Ok(())
    }

    /// Replace the run control.
    pub fn set_run_control(&mut self, run_control: RunControl) -> Result<(), SimulationError> {
        self.ensure_assembling()?;
        run_control.validate()?;
        self.run_control = run_control;
        Ok(())
    }

    /// Replace the algorithm selectors.
    pub fn set_algorithms(&mut self, algorithms: Algorithms) -> Result<(), SimulationError> {
        self.ensure_assembling()?;
        self.algorithms = algorithms;
        Ok(())
    }

    // ── Accessors ───────────────────────────────────────────────

    /// The installed solver.
    pub fn solver(&self) -> Option<&Solver> {
        self.solver.as_ref()
    }

    /// Current run control.
    pub fn run_control(&self) -> &RunControl {
        &self.run_control
    }

    /// Current algorithm selectors.
    pub fn algorithms(&self) -> &Algorithms {
        &self.algorithms
    }

    /// Attached species and their layouts, in attachment order.
    pub fn species(&self) -> impl Iterator<Item = (&Species, &Layout)> {
        self.species_layouts.iter().map(|(s, l)| (s, l))
    }

    /// Laser antennas, in insertion order.
    pub fn lasers(&self) -> &[Laser] {
        &self.lasers
    }

    /// Lifecycle state.
    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    // ── Dispatch ────────────────────────────────────────────────

    /// Render the description without writing or freezing anything.
    ///
    /// # Errors
    ///
    /// [`SimulationError::IncompleteConfiguration`] without a solver or
    /// without at least one species.
    pub fn to_deck(&self) -> Result<InputDeck, SimulationError> {
        let solver = self
            .solver
            .as_ref()
            .ok_or(SimulationError::IncompleteConfiguration { missing: "solver" })?;
        if self.species_layouts.is_empty() {
            return Err(SimulationError::IncompleteConfiguration { missing: "species" });
        }
        let source = DeckSource {
            solver,
            algorithms: &self.algorithms,
            run_control: &self.run_control,
            species: &self.species_layouts,
            lasers: &self.lasers,
        };
        Ok(source.render()?)
    }

    /// Write the input deck to `target` and freeze the structure.
    ///
    /// Returns the deck text. The file appears atomically; on a write
    /// failure the simulation stays in its previous state. Repeated calls
    /// write identical bytes.
    ///
    /// # Errors
    ///
    /// - [`SimulationError::IncompleteConfiguration`] as for
    ///   [`to_deck`](Self::to_deck).
    /// - [`SimulationError::SimulationAlreadyFinalized`] after `run`.
    /// - [`SimulationError::Engine`] with [`EngineError::ArtifactWrite`]
    ///   if the file cannot be written.
    pub fn emit(&mut self, target: impl AsRef<Path>) -> Result<String, SimulationError> {
        if self.lifecycle == Lifecycle::Running {
            return Err(SimulationError::SimulationAlreadyFinalized);
        }
        let target = target.as_ref();
        let deck = self.to_deck()?;
        write_deck_file(target, &deck).map_err(|e| EngineError::ArtifactWrite {
            path: target.display().to_string(),
            reason: e.to_string(),
        })?;
        self.lifecycle = Lifecycle::Emitted;
        log::info!(
            "wrote input deck {} ({} keys, fingerprint {:016x})",
            target.display(),
            deck.len(),
            deck_fingerprint(&deck)
        );
        Ok(deck.to_string())
    }

    /// Initialize `engine` with the input deck and start a step-driven run.
    ///
    /// On an initialization failure the simulation stays assembling.
    ///
    /// # Errors
    ///
    /// - [`SimulationError::IncompleteConfiguration`] as for
    ///   [`to_deck`](Self::to_deck).
    /// - [`SimulationError::SimulationAlreadyRunning`] on a second call.
    /// - [`SimulationError::SimulationAlreadyFinalized`] after `emit`.
    /// - [`SimulationError::Engine`] if the engine rejects the deck.
    pub fn run<E: PicEngine>(&mut self, mut engine: E) -> Result<SimulationRun<E>, SimulationError> {
        self.ensure_assembling()?;
        let deck = self.to_deck()?;
        engine.initialize(&deck)?;
        self.lifecycle = Lifecycle::Running;
        let fingerprint = deck_fingerprint(&deck);
        log::info!(
            "engine '{}' initialized from deck {fingerprint:016x}; {} steps",
            engine.name(),
            self.run_control.max_steps
        );
        Ok(SimulationRun::new(engine, self.run_control, fingerprint))
    }
}

fn check_same_grid(solver: &Solver, owner: &str, layout: &Layout) -> Result<(), ValidationError> {
    let expected = solver.grid().instance_id();
    let found = layout.grid_id();
    if expected != found {
        return Err(ValidationError::GridMismatch {
            owner: owner.to_string(),
            expected,
            found,
        });
    }
    Ok(())
}

fn check_laser_inside(solver: &Solver, laser: &Laser) -> Result<(), ValidationError> {
    if !solver.grid().contains(laser.position()) {
        return Err(ValidationError::InvalidParameter {
            field: "position",
            reason: format!(
                "laser '{}' at {:?} lies outside the grid",
                laser.name(),
                laser.position()
            ),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use picdeck_grid::{Grid, GridParams};
    use picdeck_laser::{HarrisProfile, LaserParams, LaserProfile};
    use picdeck_species::{Distribution, ParticleType};

    use crate::dry_run::DryRunEngine;

    fn grid() -> Arc<Grid> {
        Arc::new(Grid::new(GridParams::new([8; 3], [0.0; 3], [1e-5; 3])).unwrap())
    }

    fn electrons(name: &str) -> Species {
        Species::new(name, ParticleType::Electron, Distribution::new(1e24).unwrap()).unwrap()
    }

    fn laser(name: &str, z: f64) -> Laser {
        Laser::new(LaserParams {
            name: name.to_string(),
            profile: LaserProfile::Harris(HarrisProfile::new(2e-6, 10e-15, 0.0).unwrap()),
            wavelength: 0.8e-6,
            e_max: 1e12,
            position: [5e-6, 5e-6, z],
            direction: [0.0, 0.0, 1.0],
            polarization: [0.0, 1.0, 0.0],
        })
        .unwrap()
    }

    fn ready(g: &Arc<Grid>) -> Simulation {
        let mut sim = Simulation::new();
        sim.set_solver(Solver::electromagnetic(g.clone(), 1.0).unwrap())
            .unwrap();
        sim.attach_species(electrons("e"), Layout::gridded([1, 1, 1], g.clone()).unwrap())
            .unwrap();
        sim
    }

    #[test]
    fn incomplete_without_solver_or_species() {
        let g = grid();
        let mut sim = Simulation::new();
        assert!(matches!(
            sim.to_deck(),
            Err(SimulationError::IncompleteConfiguration { missing: "solver" })
        ));
        sim.set_solver(Solver::electromagnetic(g, 1.0).unwrap()).unwrap();
        assert!(matches!(
            sim.run(DryRunEngine::new()),
            Err(SimulationError::IncompleteConfiguration { missing: "species" })
        ));
        assert_eq!(sim.lifecycle(), Lifecycle::Assembling);
    }

    #[test]
    fn foreign_grid_rejected_on_attach() {
        let g = grid();
        let other = grid();
        let mut sim = ready(&g);
        let err = sim
            .attach_species(electrons("p"), Layout::gridded([1, 1, 1], other).unwrap())
            .unwrap_err();
        assert!(matches!(
            err,
            SimulationError::Validation(ValidationError::GridMismatch { .. })
        ));
        assert_eq!(sim.species().count(), 1);
    }

    #[test]
    fn set_solver_is_atomic() {
        let g = grid();
        let mut sim = ready(&g);
        let first = sim.solver().unwrap().grid().instance_id();
        let foreign = Solver::electromagnetic(grid(), 0.5).unwrap();
        assert!(sim.set_solver(foreign).is_err());
        assert_eq!(sim.solver().unwrap().grid().instance_id(), first);
        assert_eq!(sim.solver().unwrap().cfl(), 1.0);
    }

    #[test]
    fn species_before_solver_checked_on_set_solver() {
        let g = grid();
        let mut sim = Simulation::new();
        sim.attach_species(electrons("e"), Layout::gridded([1, 1, 1], g.clone()).unwrap())
            .unwrap();
        assert!(sim
            .set_solver(Solver::electromagnetic(grid(), 1.0).unwrap())
            .is_err());
        assert!(sim.solver().is_none());
        sim.set_solver(Solver::electromagnetic(g, 1.0).unwrap()).unwrap();
    }

    #[test]
    fn names_unique_across_species_and_lasers() {
        let g = grid();
        let mut sim = ready(&g);
        assert!(matches!(
            sim.add_laser(laser("e", 1e-6)),
            Err(SimulationError::DuplicateLaserName { .. })
        ));
        sim.add_laser(laser("antenna", 1e-6)).unwrap();
        assert!(matches!(
            sim.attach_species(electrons("antenna"), Layout::gridded([1, 1, 1], g).unwrap()),
            Err(SimulationError::DuplicateSpeciesName { .. })
        ));
    }

    #[test]
    fn laser_outside_grid_rejected() {
        let g = grid();
        let mut sim = ready(&g);
        assert!(matches!(
            sim.add_laser(laser("antenna", 1.0)),
            Err(SimulationError::Validation(ValidationError::InvalidParameter {
                field: "position",
                ..
            }))
        ));
        assert!(sim.lasers().is_empty());
    }

    #[test]
    fn laser_inside_grid_accepted_after_solver() {
        let g = grid();
        let mut sim = ready(&g);
        sim.add_laser(laser("antenna", 2e-6)).unwrap();
        assert_eq!(sim.lasers().len(), 1);
        assert_eq!(sim.lasers()[0].name(), "antenna");
        let deck = sim.to_deck().unwrap();
        assert_eq!(deck.int("lasers.nlasers").unwrap(), 1);
    }

    #[test]
    fn remove_species() {
        let g = grid();
        let mut sim = ready(&g);
        assert!(sim.remove_species("nope").unwrap().is_none());
        let (s, _) = sim.remove_species("e").unwrap().unwrap();
        assert_eq!(s.name(), "e");
        assert_eq!(sim.species().count(), 0);
    }

    #[test]
    fn mutation_after_run_is_rejected() {
        let g = grid();
        let mut sim = ready(&g);
        let _run = sim.run(DryRunEngine::new()).unwrap();
        assert_eq!(sim.lifecycle(), Lifecycle::Running);
        assert!(matches!(
            sim.set_algorithms(Algorithms::default()),
            Err(SimulationError::SimulationAlreadyRunning)
        ));
        assert!(matches!(
            sim.run(DryRunEngine::new()),
            Err(SimulationError::SimulationAlreadyRunning)
        ));
        assert!(matches!(
            sim.emit(std::env::temp_dir().join("picdeck-never-written")),
            Err(SimulationError::SimulationAlreadyFinalized)
        ));
    }

    #[test]
    fn failed_initialization_keeps_assembling() {
        let g = grid();
        let mut sim = ready(&g);
        struct Refuses;
        impl PicEngine for Refuses {
            fn name(&self) -> &str {
                "refuses"
            }
            fn initialize(&mut self, _deck: &InputDeck) -> Result<(), EngineError> {
                Err(EngineError::InitializationFailed {
                    engine: "refuses".to_string(),
                    reason: "no".to_string(),
                })
            }
            fn step(&mut self) -> Result<crate::EngineStep, EngineError> {
                unreachable!()
            }
        }

        assert!(matches!(
            sim.run(Refuses),
            Err(SimulationError::Engine(EngineError::InitializationFailed { .. }))
        ));
        assert_eq!(sim.lifecycle(), Lifecycle::Assembling);
        assert!(sim.run(DryRunEngine::new()).is_ok());
    }

    #[test]
    fn invalid_run_control_rejected() {
        let mut sim = Simulation::new();
        let rc = RunControl {
            diagnostic_interval: 0,
            ..RunControl::default()
        };
        assert!(sim.set_run_control(rc).is_err());
        assert_eq!(sim.run_control().diagnostic_interval, 1);
    }
}
