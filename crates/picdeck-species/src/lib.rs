//! Particle species for picdeck simulations.
//!
//! A [`Species`] binds a [`ParticleType`] (which fixes charge and mass) to
//! an owned [`Distribution`] describing its initial phase-space density.
//! A [`Layout`] says how the species is sampled onto a grid.
//!
//! Species are standalone values until attached to a simulation together
//! with their layout; name uniqueness is checked there, not here.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod distribution;
pub mod layout;
pub mod particle;
pub mod species;

pub use distribution::Distribution;
pub use layout::{Layout, LayoutKind};
pub use particle::ParticleType;
pub use species::Species;
