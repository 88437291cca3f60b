//! Rendering a simulation description into an [`InputDeck`].
//!
//! Key order is fixed: mesh, solver, algorithms, run control, species in
//! attachment order, lasers in insertion order. Rendering is a pure
//! function of the description.

use picdeck_core::constants::C;
use picdeck_core::Axis;
use picdeck_deck::{DeckError, DeckValue, InputDeck};
use picdeck_grid::{AxisBound, Grid};
use picdeck_laser::{Laser, LaserProfile};
use picdeck_species::{Layout, LayoutKind, Species};

use crate::algo::Algorithms;
use crate::config::RunControl;
use crate::solver::{EmMethod, Solver, SolverKind};

/// Borrowed view of everything a deck is rendered from.
pub(crate) struct DeckSource<'a> {
    pub solver: &'a Solver,
    pub algorithms: &'a Algorithms,
    pub run_control: &'a RunControl,
    pub species: &'a [(Species, Layout)],
    pub lasers: &'a [Laser],
}

impl DeckSource<'_> {
    pub(crate) fn render(&self) -> Result<InputDeck, DeckError> {
        let mut deck = InputDeck::new();
        write_grid(&mut deck, self.solver.grid())?;
        write_solver(&mut deck, self.solver)?;
        write_algorithms(&mut deck, self.algorithms)?;
        write_run_control(&mut deck, self.run_control)?;

        deck.set("particles.nspecies", self.species.len() as i64)?;
        // An empty list has no spelling the engine parser accepts.
        if !self.species.is_empty() {
            let names: Vec<&str> = self.species.iter().map(|(s, _)| s.name()).collect();
            deck.set("particles.species_names", names)?;
        }
        for (species, layout) in self.species {
            write_species(&mut deck, species, layout)?;
        }

        if !self.lasers.is_empty() {
            deck.set("lasers.nlasers", self.lasers.len() as i64)?;
            let names: Vec<&str> = self.lasers.iter().map(Laser::name).collect();
            deck.set("lasers.names", names)?;
            for laser in self.lasers {
                write_laser(&mut deck, laser)?;
            }
        }
        Ok(deck)
    }
}

fn write_grid(deck: &mut InputDeck, grid: &Grid) -> Result<(), DeckError> {
    deck.set("amr.n_cell", grid.cells())?;
    deck.set("amr.max_grid_size", grid.max_grid_size())?;
    deck.set("amr.max_level", grid.max_level())?;
    deck.set("geometry.coord_sys", grid.coord_system().code())?;
    deck.set("geometry.is_periodic", Axis::ALL.map(|a| grid.is_periodic(a)))?;
    deck.set("geometry.prob_lo", grid.lower_bound())?;
    deck.set("geometry.prob_hi", grid.upper_bound())?;
    deck.set("boundary.field_lo", grid.boundary_lo().map(|b| b.deck_token()))?;
    deck.set("boundary.field_hi", grid.boundary_hi().map(|b| b.deck_token()))?;
    match grid.moving_window() {
        Some((axis, v)) => {
            deck.set("warpx.do_moving_window", true)?;
            deck.set("warpx.moving_window_dir", axis.letter())?;
            deck.set("warpx.moving_window_v", v / C)?;
        }
        None => deck.set("warpx.do_moving_window", false)?,
    }
    Ok(())
}

fn write_solver(deck: &mut InputDeck, solver: &Solver) -> Result<(), DeckError> {
    match solver.kind() {
        SolverKind::Electromagnetic(method) => {
            deck.set("algo.maxwell_solver", method.deck_token())?;
            if let EmMethod::Psatd { spectral_order } = method {
                deck.set("psatd.nox", spectral_order[0])?;
                deck.set("psatd.noy", spectral_order[1])?;
                deck.set("psatd.noz", spectral_order[2])?;
            }
        }
        SolverKind::Electrostatic => {
            deck.set("algo.maxwell_solver", "none")?;
            deck.set("warpx.do_electrostatic", 1i64)?;
        }
    }
    deck.set("warpx.cfl", solver.cfl())
}

fn write_algorithms(deck: &mut InputDeck, algo: &Algorithms) -> Result<(), DeckError> {
    deck.set("algo.current_deposition", algo.current_deposition.code())?;
    deck.set("algo.charge_deposition", algo.charge_deposition.code())?;
    deck.set("algo.field_gathering", algo.field_gathering.code())?;
    deck.set("algo.particle_pusher", algo.particle_pusher.code())
}

fn write_run_control(deck: &mut InputDeck, rc: &RunControl) -> Result<(), DeckError> {
    deck.set("max_step", deck_int("max_step", rc.max_steps)?)?;
    deck.set("amr.plot_int", deck_int("amr.plot_int", rc.diagnostic_interval)?)?;
    deck.set("warpx.verbose", rc.verbosity)
}

fn deck_int(key: &str, value: u64) -> Result<i64, DeckError> {
    i64::try_from(value).map_err(|_| DeckError::InvalidValue {
        key: key.to_string(),
        expected: "a signed 64-bit integer",
        found: value.to_string(),
    })
}

fn write_species(deck: &mut InputDeck, species: &Species, layout: &Layout) -> Result<(), DeckError> {
    let name = species.name();
    let key = |suffix: &str| format!("{name}.{suffix}");
    let pt = species.particle_type();

    let charge = match pt.charge_symbol() {
        Some(sym) => DeckValue::from(sym),
        None => DeckValue::from(pt.charge()),
    };
    deck.set(key("charge"), charge)?;
    let mass = match pt.mass_symbol() {
        Some(sym) => DeckValue::from(sym),
        None => DeckValue::from(pt.mass()),
    };
    deck.set(key("mass"), mass)?;

    match layout.kind() {
        LayoutKind::Gridded { per_dim } => {
            deck.set(key("injection_style"), "NUniformPerCell")?;
            deck.set(key("num_particles_per_cell_each_dim"), per_dim)?;
        }
        LayoutKind::PseudoRandom { per_cell } => {
            deck.set(key("injection_style"), "NRandomPerCell")?;
            deck.set(key("num_particles_per_cell"), per_cell)?;
        }
    }

    let dist = species.distribution();
    deck.set(key("profile"), "constant")?;
    deck.set(key("density"), dist.density())?;
    for axis in Axis::ALL {
        let AxisBound { lower, upper } = *dist.region().axis(axis);
        if let Some(v) = lower {
            deck.set(key(&format!("{}min", axis.letter())), v)?;
        }
        if let Some(v) = upper {
            deck.set(key(&format!("{}max", axis.letter())), v)?;
        }
    }

    let momentum = if dist.thermal_velocity().is_some() {
        "gaussian"
    } else {
        "constant"
    };
    deck.set(key("momentum_distribution_type"), momentum)?;
    deck.set(key("directed_velocity"), dist.directed_velocity())?;
    if let Some(spread) = dist.thermal_velocity() {
        deck.set(key("thermal_velocity"), spread)?;
    }
    Ok(())
}

fn write_laser(deck: &mut InputDeck, laser: &Laser) -> Result<(), DeckError> {
    let name = laser.name();
    let key = |suffix: &str| format!("{name}.{suffix}");
    deck.set(key("profile"), laser.profile().deck_name())?;
    deck.set(key("wavelength"), laser.wavelength())?;
    deck.set(key("e_max"), laser.e_max())?;
    deck.set(key("position"), laser.position())?;
    deck.set(key("direction"), laser.direction())?;
    deck.set(key("polarization"), laser.polarization())?;
    match laser.profile() {
        LaserProfile::Harris(h) => {
            deck.set(key("profile_waist"), h.waist())?;
            deck.set(key("profile_duration"), h.duration())?;
            deck.set(key("profile_focal_distance"), h.focal_distance())?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use picdeck_grid::{BoundaryCondition, GridParams, Region};
    use picdeck_laser::{HarrisProfile, LaserParams};
    use picdeck_species::{Distribution, ParticleType};

    fn grid() -> Arc<Grid> {
        let mut params = GridParams::new([8, 8, 16], [0.0; 3], [1e-5, 1e-5, 2e-5])
            .with_boundaries(BoundaryCondition::Absorbing);
        params.moving_window_velocity = [0.0, 0.0, C];
        Arc::new(Grid::new(params).unwrap())
    }

    #[test]
    fn oversized_step_count_is_not_wrapped() {
        let g = grid();
        let solver = Solver::electromagnetic(g, 0.5).unwrap();
        let run_control = RunControl {
            max_steps: u64::MAX,
            ..RunControl::default()
        };
        let err = DeckSource {
            solver: &solver,
            algorithms: &Algorithms::default(),
            run_control: &run_control,
            species: &[],
            lasers: &[],
        }
        .render()
        .unwrap_err();
        match err {
            DeckError::InvalidValue { key, found, .. } => {
                assert_eq!(key, "max_step");
                assert_eq!(found, u64::MAX.to_string());
            }
            other => panic!("expected InvalidValue, got {other:?}"),
        }
    }

    fn render(
        solver: &Solver,
        species: &[(Species, Layout)],
        lasers: &[Laser],
    ) -> InputDeck {
        DeckSource {
            solver,
            algorithms: &Algorithms::default(),
            run_control: &RunControl::default(),
            species,
            lasers,
        }
        .render()
        .unwrap()
    }

    fn word<'a>(deck: &'a InputDeck, key: &str) -> &'a str {
        deck.get(key).and_then(DeckValue::as_word).unwrap()
    }

    #[test]
    fn moving_window_in_units_of_c() {
        let g = grid();
        let deck = render(&Solver::electromagnetic(g, 0.9).unwrap(), &[], &[]);
        assert_eq!(deck.int("warpx.do_moving_window").unwrap(), 1);
        assert_eq!(word(&deck, "warpx.moving_window_dir"), "z");
        assert_eq!(deck.real("warpx.moving_window_v").unwrap(), 1.0);
        assert_eq!(
            deck.get("boundary.field_lo").unwrap().to_string(),
            "pml pml pml"
        );
        assert_eq!(deck.get("geometry.is_periodic").unwrap().to_string(), "0 0 0");
        assert_eq!(deck.int("particles.nspecies").unwrap(), 0);
        assert!(!deck.contains("lasers.nlasers"));
    }

    #[test]
    fn electrostatic_and_psatd_blocks() {
        let g = grid();
        let es = Solver::new(SolverKind::Electrostatic, g.clone(), 0.5).unwrap();
        let deck = render(&es, &[], &[]);
        assert_eq!(word(&deck, "algo.maxwell_solver"), "none");
        assert_eq!(deck.int("warpx.do_electrostatic").unwrap(), 1);

        let psatd = Solver::new(
            SolverKind::Electromagnetic(EmMethod::Psatd {
                spectral_order: [4, 8, 16],
            }),
            g,
            1.0,
        )
        .unwrap();
        let deck = render(&psatd, &[], &[]);
        assert_eq!(word(&deck, "algo.maxwell_solver"), "psatd");
        assert_eq!(deck.int("psatd.noy").unwrap(), 8);
        assert!(!deck.contains("warpx.do_electrostatic"));
    }

    #[test]
    fn ion_species_with_random_layout_and_thermal_spread() {
        let g = grid();
        let solver = Solver::electromagnetic(g.clone(), 1.0).unwrap();
        let dist = Distribution::new(1e24)
            .unwrap()
            .with_region(Region::from_endpoints([None, Some(2e-6), None], [None; 3]).unwrap())
            .with_thermal_velocity([1e5, 1e5, 1e5])
            .unwrap();
        let ions = Species::new("ions", ParticleType::ion(2, 4).unwrap(), dist).unwrap();
        let layout = Layout::pseudo_random(5, g).unwrap();
        let deck = render(&solver, &[(ions, layout)], &[]);

        assert!(deck.real("ions.charge").unwrap() > 0.0);
        assert!(deck.real("ions.mass").unwrap() > 0.0);
        assert_eq!(word(&deck, "ions.injection_style"), "NRandomPerCell");
        assert_eq!(deck.int("ions.num_particles_per_cell").unwrap(), 5);
        assert_eq!(deck.real("ions.ymin").unwrap(), 2e-6);
        assert!(!deck.contains("ions.xmin"));
        assert!(!deck.contains("ions.ymax"));
        assert_eq!(word(&deck, "ions.momentum_distribution_type"), "gaussian");
        assert_eq!(deck.reals3("ions.thermal_velocity").unwrap(), [1e5; 3]);
    }

    #[test]
    fn laser_block() {
        let g = grid();
        let solver = Solver::electromagnetic(g, 1.0).unwrap();
        let laser = Laser::new(LaserParams {
            name: "antenna".to_string(),
            profile: LaserProfile::Harris(HarrisProfile::new(5e-6, 30e-15, 1e-5).unwrap()),
            wavelength: 0.8e-6,
            e_max: 1e12,
            position: [5e-6, 5e-6, 1e-6],
            direction: [0.0, 0.0, 1.0],
            polarization: [1.0, 0.0, 0.0],
        })
        .unwrap();
        let deck = render(&solver, &[], &[laser]);
        assert_eq!(deck.int("lasers.nlasers").unwrap(), 1);
        assert_eq!(word(&deck, "antenna.profile"), "Harris");
        assert_eq!(deck.real("antenna.profile_duration").unwrap(), 30e-15);
        let keys: Vec<&str> = deck.with_prefix("antenna").map(|(k, _)| k).collect();
        assert_eq!(keys.len(), 9);
    }
}
