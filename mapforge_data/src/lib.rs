//! Shared catalog data for mapforge content.
//!
//! Everything here is plain data: the numeric enumerations the engine expects in
//! trigger and script parameters, and the option block carried by every team.

pub mod defs;
pub mod team;

pub use defs::*;
pub use team::TeamOptions;
