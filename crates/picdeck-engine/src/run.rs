//! Step-driven execution.
//!
//! [`SimulationRun`] owns an initialized engine and advances it one step
//! per call to [`advance_one_step()`](SimulationRun::advance_one_step),
//! up to the run's step budget.
//!
//! # Ownership model
//!
//! `SimulationRun` is [`Send`] whenever its engine is. All methods take
//! `&mut self`; there is no background thread, no cancellation, and no
//! timeout. Each step blocks until the engine returns.
//!
//! # Failure
//!
//! An engine error is reported once and ends the run: later calls
//! return `Ok(None)` and the iterator yields nothing more. Steps are
//! never retried.
//!
//! # Finalization
//!
//! [`PicEngine::finalize`] is called exactly once per run: when the step
//! budget is reached, when the engine fails, or when the run is dropped
//! or consumed by [`into_engine()`](SimulationRun::into_engine) before
//! either of those.

use std::iter::FusedIterator;
use std::time::Instant;

use picdeck_core::StepIndex;

use crate::config::{RunControl, SimulationError};
use crate::engine::PicEngine;
use crate::metrics::StepMetrics;

// ── StepResult ──────────────────────────────────────────────────

/// Outcome of one successful step.
#[derive(Clone, Debug, PartialEq)]
pub struct StepResult {
    /// 1-based index of the completed step.
    pub step: StepIndex,
    /// Simulated time after the step, in seconds.
    pub time: f64,
    /// Whether this step falls on the diagnostic cadence.
    pub diagnostic: bool,
    /// Wall-clock timing for this step.
    pub metrics: StepMetrics,
}

// ── SimulationRun ───────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum RunState {
    Stepping,
    Completed,
    Failed,
}

/// A running simulation, created by [`Simulation::run`](crate::Simulation::run).
///
/// Also an [`Iterator`] over step results:
///
/// ```
/// # use std::sync::Arc;
/// # use picdeck_engine::{DryRunEngine, RunControl, Simulation, Solver};
/// # use picdeck_grid::{Grid, GridParams};
/// # use picdeck_species::{Distribution, Layout, ParticleType, Species};
/// # let grid = Arc::new(Grid::new(GridParams::new([8; 3], [0.0; 3], [1e-6; 3])).unwrap());
/// # let mut sim = Simulation::new();
/// # sim.set_solver(Solver::electromagnetic(grid.clone(), 1.0).unwrap()).unwrap();
/// # let e = Species::new("e", ParticleType::Electron, Distribution::new(1e24).unwrap()).unwrap();
/// # sim.attach_species(e, Layout::gridded([1, 1, 1], grid).unwrap()).unwrap();
/// sim.set_run_control(RunControl::new(5, 2, 0).unwrap()).unwrap();
/// let run = sim.run(DryRunEngine::new()).unwrap();
/// let diagnostics: Vec<u64> = run
///     .filter_map(Result::ok)
///     .filter(|r| r.diagnostic)
///     .map(|r| r.step.0)
///     .collect();
/// assert_eq!(diagnostics, [2, 4]);
/// ```
pub struct SimulationRun<E: PicEngine> {
    /// `Some` until `into_engine` takes it.
    engine: Option<E>,
    finalized: bool,
    run_control: RunControl,
    fingerprint: u64,
    steps: u64,
    time: f64,
    cumulative_engine_us: u64,
    state: RunState,
}

// Compile-time assertion: a run over a Send engine is Send.
const _: () = {
    #[allow(dead_code)]
    fn assert_send<T: Send>() {}
    #[allow(dead_code)]
    fn check() {
        assert_send::<SimulationRun<crate::DryRunEngine>>();
    }
};

impl<E: PicEngine> SimulationRun<E> {
    /// Wrap an engine that has already been initialized.
    pub(crate) fn new(engine: E, run_control: RunControl, fingerprint: u64) -> Self {
        let mut run = Self {
            engine: Some(engine),
            finalized: false,
            run_control,
            fingerprint,
            steps: 0,
            time: 0.0,
            cumulative_engine_us: 0,
            state: RunState::Stepping,
        };
        if run_control.max_steps == 0 {
            run.state = RunState::Completed;
            run.finalize_engine();
        }
        run
    }

    /// Finalize the engine unless that already happened.
    fn finalize_engine(&mut self) {
        if self.finalized {
            return;
        }
        self.finalized = true;
        if let Some(engine) = self.engine.as_mut() {
            engine.finalize();
        }
    }

    /// Advance the engine by one step.
    ///
    /// Returns `Ok(None)` once `max_steps` steps have completed or after
    /// an engine failure.
    ///
    /// # Errors
    ///
    /// [`SimulationError::Engine`] if the engine fails. The run ends.
    pub fn advance_one_step(&mut self) -> Result<Option<StepResult>, SimulationError> {
        if self.state != RunState::Stepping {
            return Ok(None);
        }
        let Some(engine) = self.engine.as_mut() else {
            return Ok(None);
        };

        let started = Instant::now();
        let outcome = engine.step();
        let engine_us = started.elapsed().as_micros() as u64;
        let engine_step = match outcome {
            Ok(s) => s,
            Err(e) => {
                log::warn!(
                    "engine '{}' failed after {} steps: {e}",
                    engine.name(),
                    self.steps
                );
                self.state = RunState::Failed;
                self.finalize_engine();
                return Err(SimulationError::Engine(e));
            }
        };

        self.steps += 1;
        self.time = engine_step.time;
        self.cumulative_engine_us += engine_us;
        let diagnostic = self.run_control.is_diagnostic(self.steps);

        if self.steps >= self.run_control.max_steps {
            self.state = RunState::Completed;
            self.finalize_engine();
            log::info!(
                "run of deck {:016x} completed: {} steps, t = {:e} s",
                self.fingerprint,
                self.steps,
                self.time
            );
        }

        Ok(Some(StepResult {
            step: StepIndex(self.steps),
            time: self.time,
            diagnostic,
            metrics: StepMetrics {
                total_us: started.elapsed().as_micros() as u64,
                engine_us,
                cumulative_engine_us: self.cumulative_engine_us,
            },
        }))
    }

    /// Steps completed so far.
    pub fn steps_completed(&self) -> u64 {
        self.steps
    }

    /// Simulated time after the last completed step.
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Whether the step budget has been reached.
    pub fn is_complete(&self) -> bool {
        self.state == RunState::Completed
    }

    /// Whether the engine has failed.
    pub fn is_failed(&self) -> bool {
        self.state == RunState::Failed
    }

    /// Run control the simulation was started with.
    pub fn run_control(&self) -> &RunControl {
        &self.run_control
    }

    /// FNV-1a fingerprint of the deck the engine was initialized with.
    pub fn deck_fingerprint(&self) -> u64 {
        self.fingerprint
    }

    /// Whether [`PicEngine::finalize`] has been called.
    pub fn is_finalized(&self) -> bool {
        self.finalized
    }

    /// The engine being driven.
    pub fn engine(&self) -> &E {
        self.engine
            .as_ref()
            .expect("engine is present until into_engine consumes the run")
    }

    /// Consume the run and return the engine.
    ///
    /// A run that is still stepping is finalized first.
    pub fn into_engine(mut self) -> E {
        self.finalize_engine();
        self.engine
            .take()
            .expect("engine is present until into_engine consumes the run")
    }
}

impl<E: PicEngine> Drop for SimulationRun<E> {
    fn drop(&mut self) {
        if !self.finalized && self.engine.is_some() {
            log::debug!("run dropped after {} steps; finalizing engine", self.steps);
            self.finalize_engine();
        }
    }
}

impl<E: PicEngine> Iterator for SimulationRun<E> {
    type Item = Result<StepResult, SimulationError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.advance_one_step().transpose()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.state {
            RunState::Stepping => {
                let left = usize::try_from(self.run_control.max_steps - self.steps).ok();
                (0, left)
            }
            _ => (0, Some(0)),
        }
    }
}

impl<E: PicEngine> FusedIterator for SimulationRun<E> {}

impl<E: PicEngine> std::fmt::Debug for SimulationRun<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimulationRun")
            .field("engine", &self.engine.as_ref().map(|e| e.name()))
            .field("steps", &self.steps)
            .field("max_steps", &self.run_control.max_steps)
            .field("time", &self.time)
            .field("state", &self.state)
            .finish()
    }
}
