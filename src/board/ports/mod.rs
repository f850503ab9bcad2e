//! Port contracts for the board.
//!
//! Ports define infrastructure-agnostic interfaces: the server-side document
//! store and the client-side view of the server.

pub mod remote;
pub mod store;

pub use remote::{BoardRemote, BoardRemoteError, BoardRemoteResult};
pub use store::{BoardStore, BoardStoreError, BoardStoreResult, DocumentKind};
