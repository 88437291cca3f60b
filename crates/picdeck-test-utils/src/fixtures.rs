//! Scenario builders and a failing engine.
//!
//! - [`langmuir_grid`] / [`langmuir_simulation`]: the 64^3 periodic
//!   electron-plasma oscillation setup.
//! - [`FailingEngine`]: fails deterministically after N steps.

use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use picdeck_core::{EngineError, StepIndex};
use picdeck_deck::InputDeck;
use picdeck_engine::{
    Algorithms, CurrentDeposition, EngineStep, PicEngine, RunControl, Simulation, Solver,
};
use picdeck_grid::{Grid, GridParams, Region};
use picdeck_laser::{HarrisProfile, Laser, LaserParams, LaserProfile};
use picdeck_species::{Distribution, Layout, ParticleType, Species};

/// 64^3 cells over `[-20um, 20um]^3`, periodic everywhere.
pub fn langmuir_grid() -> Arc<Grid> {
    let params = GridParams::new([64, 64, 64], [-20e-6; 3], [20e-6; 3]);
    Arc::new(Grid::new(params).expect("langmuir grid is valid"))
}

/// Electrons at 1e25 m^-3 drifting at 0.1 m/s along x, confined to `region`.
pub fn electron_plasma(name: &str, region: Region) -> Species {
    let dist = Distribution::new(1e25)
        .expect("density is valid")
        .with_region(region)
        .with_directed_velocity([0.1, 0.0, 0.0])
        .expect("velocity is finite");
    Species::new(name, ParticleType::Electron, dist).expect("species name is valid")
}

/// The Langmuir-wave scenario on `grid`: Yee solver at cfl 1, 40 steps,
/// diagnostics every step, direct current deposition, and one electron
/// species occupying `x >= 0` with a 2x2x2 gridded layout.
pub fn langmuir_simulation(grid: &Arc<Grid>) -> Simulation {
    let mut sim = Simulation::new();
    sim.set_solver(Solver::electromagnetic(grid.clone(), 1.0).expect("cfl is valid"))
        .expect("empty simulation accepts a solver");
    sim.set_run_control(RunControl::new(40, 1, 1).expect("run control is valid"))
        .expect("assembling");
    sim.set_algorithms(Algorithms {
        current_deposition: CurrentDeposition::Direct,
        ..Algorithms::default()
    })
    .expect("assembling");
    let region = Region::from_endpoints([Some(0.0), None, None], [None; 3])
        .expect("region is valid");
    let layout = Layout::gridded([2, 2, 2], grid.clone()).expect("layout is valid");
    sim.attach_species(electron_plasma("electrons", region), layout)
        .expect("first species attaches");
    sim
}

/// A Harris-profile laser at `position`, propagating along +z.
pub fn test_laser(name: &str, position: [f64; 3]) -> Laser {
    Laser::new(LaserParams {
        name: name.to_string(),
        profile: LaserProfile::Harris(
            HarrisProfile::new(5e-6, 30e-15, 0.0).expect("profile is valid"),
        ),
        wavelength: 0.8e-6,
        e_max: 1e12,
        position,
        direction: [0.0, 0.0, 1.0],
        polarization: [1.0, 0.0, 0.0],
    })
    .expect("laser is valid")
}

/// A unique path under the system temp directory.
///
/// Nothing is created; the caller removes whatever it writes.
pub fn scratch_path(tag: &str) -> PathBuf {
    static COUNTER: AtomicU64 = AtomicU64::new(0);
    let n = COUNTER.fetch_add(1, Ordering::Relaxed);
    std::env::temp_dir().join(format!("picdeck-{tag}-{}-{n}", std::process::id()))
}

/// Succeeds `succeed_count` steps, then fails every step after.
///
/// With `fail_initialize` set, rejects the deck instead.
#[derive(Clone, Debug, Default)]
pub struct FailingEngine {
    pub succeed_count: u64,
    pub fail_initialize: bool,
    pub step_calls: u64,
}

impl FailingEngine {
    pub fn new(succeed_count: u64) -> Self {
        Self {
            succeed_count,
            ..Self::default()
        }
    }

    pub fn rejecting_deck() -> Self {
        Self {
            fail_initialize: true,
            ..Self::default()
        }
    }
}

impl PicEngine for FailingEngine {
    fn name(&self) -> &str {
        "failing"
    }

    fn initialize(&mut self, _deck: &InputDeck) -> Result<(), EngineError> {
        if self.fail_initialize {
            return Err(EngineError::InitializationFailed {
                engine: "failing".to_string(),
                reason: "deck rejected".to_string(),
            });
        }
        Ok(())
    }

    fn step(&mut self) -> Result<EngineStep, EngineError> {
        self.step_calls += 1;
        if self.step_calls > self.succeed_count {
            return Err(EngineError::StepFailed {
                engine: "failing".to_string(),
                step: StepIndex(self.step_calls),
                reason: format!("fails after {} steps", self.succeed_count),
            });
        }
        Ok(EngineStep {
            time: self.step_calls as f64,
        })
    }
}
