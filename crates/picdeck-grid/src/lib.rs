//! Mesh descriptions for picdeck simulations.
//!
//! This crate defines the [`Grid`], the spatial discretization every other
//! simulation entity is bound to, along with its per-axis option types.
//!
//! # Types
//!
//! - [`Grid`] / [`GridParams`]: cell counts, domain bounds, boundaries,
//!   moving window, refinement depth, coordinate system
//! - [`BoundaryCondition`]: field boundary per axis side
//! - [`CoordSystem`]: cartesian or cylindrical geometry
//! - [`AxisBound`] / [`Region`]: per-axis optional bounds used to clip
//!   particle injection

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod boundary;
pub mod coord;
pub mod grid;
pub mod region;

pub use boundary::BoundaryCondition;
pub use coord::CoordSystem;
pub use grid::{Grid, GridParams};
pub use region::{AxisBound, Region};
