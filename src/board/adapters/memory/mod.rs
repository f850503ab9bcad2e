//! In-memory adapters for the board.

mod store;

pub use store::InMemoryBoardStore;
