//! Benchmark profiles for the picdeck configuration layer.
//!
//! Provides pre-built [`Simulation`] profiles for benchmarking:
//!
//! - [`reference_profile`]: 64^3 periodic box, one electron species
//! - [`multi_species_profile`]: same box with `n` species, for deck-size scaling

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::sync::Arc;

use picdeck_engine::{RunControl, Simulation, Solver};
use picdeck_grid::{Grid, GridParams, Region};
use picdeck_species::{Distribution, Layout, ParticleType, Species};

/// The shared 64^3 grid over `[-20um, 20um]^3`.
pub fn reference_grid() -> Arc<Grid> {
    Arc::new(Grid::new(GridParams::new([64; 3], [-20e-6; 3], [20e-6; 3])).unwrap())
}

/// One drifting electron species, `max_steps` steps.
pub fn reference_profile(max_steps: u64) -> Simulation {
    multi_species_profile(1, max_steps)
}

/// `n` species alternating electrons and protons, each in its own x slab.
pub fn multi_species_profile(n: usize, max_steps: u64) -> Simulation {
    let grid = reference_grid();
    let mut sim = Simulation::new();
    sim.set_solver(Solver::electromagnetic(grid.clone(), 1.0).unwrap())
        .unwrap();
    sim.set_run_control(RunControl::new(max_steps, 10, 0).unwrap())
        .unwrap();

    let width = 40e-6 / n as f64;
    for i in 0..n {
        let lo = -20e-6 + i as f64 * width;
        let region =
            Region::from_endpoints([Some(lo), None, None], [Some(lo + width), None, None])
                .unwrap();
        let dist = Distribution::new(1e25)
            .unwrap()
            .with_region(region)
            .with_directed_velocity([0.1, 0.0, 0.0])
            .unwrap();
        let particle = if i % 2 == 0 {
            ParticleType::Electron
        } else {
            ParticleType::Proton
        };
        let species = Species::new(format!("s{i}"), particle, dist).unwrap();
        sim.attach_species(species, Layout::gridded([2, 2, 2], grid.clone()).unwrap())
            .unwrap();
    }
    sim
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profiles_render() {
        assert!(reference_profile(10).to_deck().is_ok());
        let deck = multi_species_profile(8, 10).to_deck().unwrap();
        assert_eq!(deck.int("particles.nspecies").unwrap(), 8);
    }
}
