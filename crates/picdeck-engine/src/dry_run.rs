//! An in-process engine that advances simulated time only.
//!
//! [`DryRunEngine`] reads the mesh and Courant factor back out of the
//! deck, derives the Yee time step, and reports `step * dt` on each call.
//! No fields or particles exist. It exercises the run-control wiring
//! without the compiled engine.

use picdeck_core::{EngineError, StepIndex};
use picdeck_deck::{DeckError, InputDeck};

use crate::engine::{EngineStep, PicEngine};
use crate::solver::yee_time_step;

const NAME: &str = "dry-run";

/// Reference engine for tests and wiring checks.
#[derive(Clone, Debug, Default)]
pub struct DryRunEngine {
    dt: Option<f64>,
    steps: u64,
}

impl DryRunEngine {
    /// A fresh, uninitialized engine.
    pub fn new() -> Self {
        Self::default()
    }

    /// Time step derived at initialization, if initialized.
    pub fn time_step(&self) -> Option<f64> {
        self.dt
    }

    /// Steps taken so far.
    pub fn steps_taken(&self) -> u64 {
        self.steps
    }
}

fn derive_time_step(deck: &InputDeck) -> Result<f64, DeckError> {
    let cfl = deck.real("warpx.cfl")?;
    let cells = deck.ints3("amr.n_cell")?;
    let lo = deck.reals3("geometry.prob_lo")?;
    let hi = deck.reals3("geometry.prob_hi")?;
    let mut dx = [0.0; 3];
    for i in 0..3 {
        if cells[i] <= 0 {
            return Err(DeckError::InvalidValue {
                key: "amr.n_cell".to_string(),
                expected: "positive cell counts",
                found: format!("{} {} {}", cells[0], cells[1], cells[2]),
            });
        }
        dx[i] = (hi[i] - lo[i]) / cells[i] as f64;
    }
    Ok(yee_time_step(cfl, dx))
}

impl PicEngine for DryRunEngine {
    fn name(&self) -> &str {
        NAME
    }

    fn initialize(&mut self, deck: &InputDeck) -> Result<(), EngineError> {
        let dt = derive_time_step(deck).map_err(|e| EngineError::InitializationFailed {
            engine: NAME.to_string(),
            reason: e.to_string(),
        })?;
        if !(dt.is_finite() && dt > 0.0) {
            return Err(EngineError::InitializationFailed {
                engine: NAME.to_string(),
                reason: format!("derived time step {dt} is not positive"),
            });
        }
        log::debug!("{NAME}: time step {dt:e} s");
        self.dt = Some(dt);
        self.steps = 0;
        Ok(())
    }

    fn step(&mut self) -> Result<EngineStep, EngineError> {
        let dt = self.dt.ok_or_else(|| EngineError::StepFailed {
            engine: NAME.to_string(),
            step: StepIndex(self.steps + 1),
            reason: "engine was not initialized".to_string(),
        })?;
        self.steps += 1;
        Ok(EngineStep {
            time: self.steps as f64 * dt,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use picdeck_core::constants::C;

    fn deck() -> InputDeck {
        let mut d = InputDeck::new();
        d.set("amr.n_cell", [10u32, 10, 10]).unwrap();
        d.set("geometry.prob_lo", [0.0, 0.0, 0.0]).unwrap();
        d.set("geometry.prob_hi", [1.0, 1.0, 1.0]).unwrap();
        d.set("warpx.cfl", 1.0).unwrap();
        d
    }

    #[test]
    fn time_advances_by_yee_step() {
        let mut e = DryRunEngine::new();
        e.initialize(&deck()).unwrap();
        let dt = 0.1 / (C * 3f64.sqrt());
        assert!((e.time_step().unwrap() - dt).abs() / dt < 1e-12);
        e.step().unwrap();
        let t2 = e.step().unwrap().time;
        assert!((t2 - 2.0 * dt).abs() / dt < 1e-12);
        assert_eq!(e.steps_taken(), 2);
    }

    #[test]
    fn missing_key_fails_initialization() {
        let mut d = InputDeck::new();
        d.set("warpx.cfl", 1.0).unwrap();
        match DryRunEngine::new().initialize(&d) {
            Err(EngineError::InitializationFailed { engine, reason }) => {
                assert_eq!(engine, "dry-run");
                assert!(reason.contains("amr.n_cell"), "{reason}");
            }
            other => panic!("expected InitializationFailed, got {other:?}"),
        }
    }

    #[test]
    fn step_before_initialize_fails() {
        let mut e = DryRunEngine::new();
        assert!(matches!(
            e.step(),
            Err(EngineError::StepFailed {
                step: StepIndex(1),
                ..
            })
        ));
    }
}
