//! Physical constants (SI, CODATA 2018).
//!
//! The values match the ones the engine's input parser binds to the
//! symbolic names `q_e`, `m_e`, `m_p` and `c`.

/// Speed of light in vacuum (m/s).
pub const C: f64 = 299_792_458.0;

/// Elementary charge (C).
pub const Q_E: f64 = 1.602_176_634e-19;

/// Electron mass (kg).
pub const M_E: f64 = 9.109_383_701_5e-31;

/// Proton mass (kg).
pub const M_P: f64 = 1.672_621_923_69e-27;

/// Unified atomic mass unit (kg).
pub const M_U: f64 = 1.660_539_066_60e-27;

/// Vacuum permittivity (F/m).
pub const EPSILON_0: f64 = 8.854_187_812_8e-12;
