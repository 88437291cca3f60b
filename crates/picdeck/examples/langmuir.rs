//! Langmuir wave: a uniform electron plasma drifting through a periodic box.
//!
//! Demonstrates:
//!   1. Building a 64^3 periodic grid shared by the solver and the layout
//!   2. Describing an electron species confined to x >= 0
//!   3. Writing the input deck for the compiled engine
//!   4. Alternatively, stepping an engine in-process
//!
//! Run with:
//!   cargo run --example langmuir -- [output-path]

use std::error::Error;
use std::sync::Arc;

use picdeck::engine::CurrentDeposition;
use picdeck::prelude::*;

// ─── Grid parameters ────────────────────────────────────────────

const CELLS: [u32; 3] = [64, 64, 64];
const LOWER: Vec3 = [-20e-6, -20e-6, -20e-6];
const UPPER: Vec3 = [20e-6, 20e-6, 20e-6];

// ─── Plasma parameters ──────────────────────────────────────────

const DENSITY: f64 = 1e25;
const DRIFT: Vec3 = [0.1, 0.0, 0.0];

fn build() -> Result<Simulation, SimulationError> {
    let mut params = GridParams::new(CELLS, LOWER, UPPER);
    params.max_grid_size = 32;
    params.max_level = 0;
    let grid = Arc::new(Grid::new(params)?);

    let mut sim = Simulation::new();
    sim.set_solver(Solver::electromagnetic(grid.clone(), 1.0)?)?;
    sim.set_run_control(RunControl::new(40, 1, 1)?)?;
    sim.set_algorithms(Algorithms {
        current_deposition: CurrentDeposition::Direct,
        ..Algorithms::default()
    })?;

    let plasma = Distribution::new(DENSITY)?
        .with_region(Region::from_endpoints([Some(0.0), None, None], [None; 3])?)
        .with_directed_velocity(DRIFT)?;
    let electrons = Species::new("electrons", ParticleType::Electron, plasma)?;
    println!(
        "plasma frequency: {:.3e} rad/s",
        electrons.plasma_frequency()
    );
    sim.attach_species(electrons, Layout::gridded([2, 2, 2], grid)?)?;
    Ok(sim)
}

fn main() -> Result<(), Box<dyn Error>> {
    let target = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "inputs_from_picdeck".to_string());

    // Write the deck for the compiled engine.
    let mut sim = build()?;
    let text = sim.emit(&target)?;
    println!("wrote {target} ({} lines)", text.lines().count());

    // Or drive an engine from here. A fresh description is needed since
    // an emitted simulation is frozen.
    let mut sim = build()?;
    let dt = sim.solver().map(Solver::time_step).unwrap_or_default();
    println!("time step: {dt:.3e} s");
    for result in sim.run(DryRunEngine::new())? {
        let result = result?;
        if result.step.0 % 10 == 0 {
            println!("step {:>3}  t = {:.3e} s", result.step, result.time);
        }
    }
    Ok(())
}
