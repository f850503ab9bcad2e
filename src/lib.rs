//! Single-board Kanban task tracker.
//!
//! The crate keeps task records, column orderings and archived tasks in
//! step across a CRUD API backed by flat JSON documents:
//!
//! - [`board`] holds the domain model, reconciliation and drag reordering,
//!   the store and remote ports with their adapters, and the server-side
//!   service and client-side session.
//! - [`http`] exposes the service as a JSON API.
//! - [`config`] and [`telemetry`] set up the server binary.

pub mod board;
pub mod config;
pub mod http;
pub mod telemetry;
