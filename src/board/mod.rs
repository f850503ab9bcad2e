//! Single-board Kanban state management.
//!
//! Keeps task records, column orderings and archived tasks consistent
//! across a whole-document store without transactions. The module follows
//! hexagonal architecture:
//!
//! - Domain types and pure algorithms in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Server and client orchestration in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
