//! Application services for the board.
//!
//! [`BoardService`] runs on the server against a store; [`BoardSession`]
//! runs on the client against a remote.

mod lifecycle;
mod session;

pub use lifecycle::{
    BoardService, BoardServiceError, BoardServiceResult, BulkUpdateRequest, BulkUpdateSummary,
};
pub use session::{BoardSession, SessionError, SessionResult};
