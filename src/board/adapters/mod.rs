//! Adapter implementations of the board ports.

pub mod file;
pub mod memory;
pub mod remote;
