//! Flat-file adapters for the board.

mod store;

pub use store::{ARCHIVE_FILE, COLUMNS_FILE, JsonFileBoardStore, TASKS_FILE};
