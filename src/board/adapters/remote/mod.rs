//! [`BoardRemote`] implementations.
//!
//! [`BoardRemote`]: crate::board::ports::BoardRemote

mod http;
mod local;

pub use http::HttpBoardRemote;
pub use local::ServiceRemote;
