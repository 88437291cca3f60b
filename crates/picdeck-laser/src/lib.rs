//! Laser antennas for picdeck simulations.
//!
//! A [`Laser`] is an antenna plane that launches an electromagnetic pulse
//! into the domain. Its temporal and transverse shape is given by a
//! [`LaserProfile`]; the only profile currently described is the
//! [`HarrisProfile`], a compactly supported pulse that switches on and
//! off smoothly.
//!
//! [`Laser::amplitude`] evaluates the field the engine will inject, which
//! lets callers sanity-check a description before dispatching it.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod laser;
pub mod profile;

pub use laser::{Laser, LaserParams};
pub use profile::{HarrisProfile, LaserProfile};
