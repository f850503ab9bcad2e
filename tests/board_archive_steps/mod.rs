//! Step definitions for board archive scenarios.

pub mod world;

mod given;
mod then;
mod when;
