//! Test utilities and mock engines for picdeck development.
//!
//! Provides mock implementations of [`PicEngine`] and, in [`fixtures`],
//! ready-made grids and simulations for the common test scenarios.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

pub use fixtures::{
    electron_plasma, langmuir_grid, langmuir_simulation, scratch_path, test_laser,
    FailingEngine,
};

use picdeck_core::EngineError;
use picdeck_deck::InputDeck;
use picdeck_engine::{EngineStep, PicEngine};

/// Mock engine that records every call it receives.
///
/// Advances time by a fixed `dt` per step. Inspect it after a run with
/// [`SimulationRun::engine`](picdeck_engine::SimulationRun::engine) or
/// [`SimulationRun::into_engine`](picdeck_engine::SimulationRun::into_engine).
#[derive(Clone, Debug)]
pub struct MockEngine {
    pub dt: f64,
    pub deck: Option<InputDeck>,
    pub initialize_calls: u32,
    pub step_calls: u64,
    pub finalize_calls: u32,
}

impl MockEngine {
    pub fn new(dt: f64) -> Self {
        Self {
            dt,
            deck: None,
            initialize_calls: 0,
            step_calls: 0,
            finalize_calls: 0,
        }
    }
}

impl Default for MockEngine {
    fn default() -> Self {
        Self::new(1e-15)
    }
}

impl PicEngine for MockEngine {
    fn name(&self) -> &str {
        "mock"
    }

    fn initialize(&mut self, deck: &InputDeck) -> Result<(), EngineError> {
        self.initialize_calls += 1;
        self.deck = Some(deck.clone());
        Ok(())
    }

    fn step(&mut self) -> Result<EngineStep, EngineError> {
        self.step_calls += 1;
        Ok(EngineStep {
            time: self.step_calls as f64 * self.dt,
        })
    }

    fn finalize(&mut self) {
        self.finalize_calls += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_engine_records_calls() {
        let mut e = MockEngine::new(2.0);
        e.initialize(&InputDeck::new()).unwrap();
        assert_eq!(e.step().unwrap().time, 2.0);
        assert_eq!(e.step().unwrap().time, 4.0);
        e.finalize();
        assert_eq!(e.initialize_calls, 1);
        assert_eq!(e.step_calls, 2);
        assert_eq!(e.finalize_calls, 1);
        assert!(e.deck.unwrap().is_empty());
    }
}
