//! Shared world state for board archive BDD scenarios.

use std::sync::Arc;

use kanban_sync::board::{
    adapters::memory::InMemoryBoardStore,
    domain::{OrderingPolicy, Task},
    services::{BoardService, BoardServiceError},
};
use mockable::DefaultClock;
use rstest::fixture;

/// Service type used by the BDD world.
pub type TestBoardService = BoardService<InMemoryBoardStore, DefaultClock>;

/// Scenario world for archive behaviour tests.
pub struct BoardArchiveWorld {
    pub store: Arc<InMemoryBoardStore>,
    pub service: TestBoardService,
    pub last_result: Option<Result<Task, BoardServiceError>>,
}

impl BoardArchiveWorld {
    /// Creates a world over a freshly seeded in-memory board.
    #[must_use]
    pub fn new() -> Self {
        let store = Arc::new(InMemoryBoardStore::new());
        let service = BoardService::new(
            Arc::clone(&store),
            Arc::new(DefaultClock),
            OrderingPolicy::Preserve,
        );

        Self {
            store,
            service,
            last_result: None,
        }
    }
}

impl Default for BoardArchiveWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> BoardArchiveWorld {
    BoardArchiveWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
