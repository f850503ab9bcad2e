//! [`BoardRemote`] speaking to the HTTP API.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde_json::Value;

use crate::board::{
    domain::{
        ArchiveMap, Board, BoardErrorKind, ColumnMap, Task, TaskId, validate_task,
        validate_task_map,
    },
    ports::{BoardRemote, BoardRemoteError, BoardRemoteResult},
};
use crate::http::ErrorBody;

/// HTTP client for a board server.
#[derive(Debug, Clone)]
pub struct HttpBoardRemote {
    client: Client,
    base_url: String,
}

impl HttpBoardRemote {
    /// Creates a client for the server at `base_url`, e.g.
    /// `http://127.0.0.1:5000`.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    /// Creates a client reusing an existing connection pool.
    #[must_use]
    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base = base_url.into();
        Self {
            client,
            base_url: base.trim_end_matches('/').to_owned(),
        }
    }

    /// Returns the server base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn task_url(&self, task_id: &TaskId, suffix: &str) -> String {
        self.url(&format!("/tasks/{task_id}{suffix}"))
    }

    async fn send(request: RequestBuilder) -> BoardRemoteResult<Value> {
        let response = request.send().await.map_err(BoardRemoteError::transport)?;
        let status = response.status();
        let body = response
            .json::<Value>()
            .await
            .map_err(|err| BoardRemoteError::Protocol(format!("{status}: {err}")))?;
        if status.is_success() {
            return Ok(body);
        }
        Err(rejection(status, body))
    }
}

fn rejection(status: StatusCode, body: Value) -> BoardRemoteError {
    let parsed = serde_json::from_value::<ErrorBody>(body).ok();
    let kind = parsed
        .as_ref()
        .and_then(|error| error.code)
        .unwrap_or(match status {
            StatusCode::BAD_REQUEST => BoardErrorKind::BadRequest,
            StatusCode::NOT_FOUND => BoardErrorKind::NotFound,
            _ => BoardErrorKind::Internal,
        });
    let message = parsed.map_or_else(|| status.to_string(), |error| error.message);
    BoardRemoteError::Rejected { kind, message }
}

fn field<'a>(body: &'a Value, name: &str) -> BoardRemoteResult<&'a Value> {
    body.get(name)
        .ok_or_else(|| BoardRemoteError::Protocol(format!("response has no '{name}' field")))
}

fn parse_tasks(document: &Value) -> BoardRemoteResult<ArchiveMap> {
    validate_task_map(document)
        .map(|validated| validated.tasks)
        .map_err(|err| BoardRemoteError::Protocol(err.to_string()))
}

fn parse_task(record: &Value) -> BoardRemoteResult<Task> {
    validate_task(record).map_err(|err| BoardRemoteError::Protocol(err.to_string()))
}

fn payload(task: &Task) -> BoardRemoteResult<Value> {
    serde_json::to_value(task).map_err(|err| BoardRemoteError::Protocol(err.to_string()))
}

#[async_trait]
impl BoardRemote for HttpBoardRemote {
    async fn fetch_board(&self) -> BoardRemoteResult<Board> {
        let body = Self::send(self.client.get(self.url("/tasks"))).await?;
        let tasks = parse_tasks(field(&body, "tasks")?)?;
        let columns = serde_json::from_value::<ColumnMap>(field(&body, "columns")?.clone())
            .map_err(|err| BoardRemoteError::Protocol(err.to_string()))?;
        Ok(Board::new(tasks, columns))
    }

    async fn fetch_archived(&self) -> BoardRemoteResult<ArchiveMap> {
        let body = Self::send(self.client.get(self.url("/archived-tasks"))).await?;
        parse_tasks(field(&body, "archivedTasks")?)
    }

    async fn push_board(&self, board: &Board) -> BoardRemoteResult<()> {
        Self::send(self.client.post(self.url("/update")).json(board)).await?;
        Ok(())
    }

    async fn create_task(&self, task: &Task) -> BoardRemoteResult<Task> {
        let body = Self::send(self.client.post(self.url("/tasks")).json(&payload(task)?)).await?;
        parse_task(&body)
    }

    async fn update_task(&self, task: &Task) -> BoardRemoteResult<Task> {
        let request = self.client.put(self.task_url(task.id(), "")).json(&payload(task)?);
        let body = Self::send(request).await?;
        parse_task(&body)
    }

    async fn archive_task(&self, task_id: &TaskId) -> BoardRemoteResult<Task> {
        let body = Self::send(self.client.post(self.task_url(task_id, "/archive"))).await?;
        parse_task(field(&body, "archivedTask")?)
    }

    async fn restore_task(&self, task_id: &TaskId) -> BoardRemoteResult<Task> {
        let body = Self::send(self.client.post(self.task_url(task_id, "/restore"))).await?;
        parse_task(field(&body, "restoredTask")?)
    }

    async fn delete_task(&self, task_id: &TaskId) -> BoardRemoteResult<()> {
        Self::send(self.client.delete(self.task_url(task_id, ""))).await?;
        Ok(())
    }
}
