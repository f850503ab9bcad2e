//! Board store backed by three pretty-printed JSON files.

use async_trait::async_trait;
use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use serde::Serialize;
use serde_json::Value;
use std::io;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::board::{
    domain::{
        ArchiveMap, ColumnMap, TaskMap, default_columns, validate_task_entry, validate_task_map,
    },
    ports::{BoardStore, BoardStoreError, BoardStoreResult, DocumentKind},
};

/// File holding the live task document.
pub const TASKS_FILE: &str = "tasks.json";
/// File holding the column document.
pub const COLUMNS_FILE: &str = "columns.json";
/// File holding the archived task document.
pub const ARCHIVE_FILE: &str = "archived_tasks.json";

const fn file_name(document: DocumentKind) -> &'static str {
    match document {
        DocumentKind::Tasks => TASKS_FILE,
        DocumentKind::Columns => COLUMNS_FILE,
        DocumentKind::Archive => ARCHIVE_FILE,
    }
}

/// JSON documents in a data directory.
///
/// Missing documents are seeded when the store is opened. Records that fail
/// the task schema are left out of loaded maps with a warning, but stay on
/// disk: saving a task document writes them back under their keys unless
/// the saved map replaces that key. Writes go to a sibling temporary file
/// that is then renamed over the document.
#[derive(Debug, Clone)]
pub struct JsonFileBoardStore {
    dir: Arc<Dir>,
    root: Utf8PathBuf,
}

impl JsonFileBoardStore {
    /// Opens `root`, creating it and seeding missing documents.
    ///
    /// # Errors
    ///
    /// Returns [`BoardStoreError`] when the directory cannot be created or
    /// opened, or a seed document cannot be written.
    pub fn open(root: impl AsRef<Utf8Path>) -> BoardStoreResult<Self> {
        let root_path = root.as_ref();
        Dir::create_ambient_dir_all(root_path, ambient_authority())
            .map_err(|err| BoardStoreError::Unavailable(format!("{root_path}: {err}")))?;
        let dir = Dir::open_ambient_dir(root_path, ambient_authority())
            .map_err(|err| BoardStoreError::Unavailable(format!("{root_path}: {err}")))?;

        let store = Self {
            dir: Arc::new(dir),
            root: root_path.to_owned(),
        };
        store.seed_missing()?;
        Ok(store)
    }

    /// Returns the data directory.
    #[must_use]
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    fn seed_missing(&self) -> BoardStoreResult<()> {
        for document in [DocumentKind::Tasks, DocumentKind::Columns, DocumentKind::Archive] {
            match self.dir.metadata(file_name(document)) {
                Ok(_) => {}
                Err(err) if err.kind() == io::ErrorKind::NotFound => {
                    write_document(&self.dir, document, &seed_document(document)?)?;
                    info!(root = %self.root, document = %document, "seeded board document");
                }
                Err(err) => return Err(BoardStoreError::read(document, err)),
            }
        }
        Ok(())
    }

    async fn load(&self, document: DocumentKind) -> BoardStoreResult<Value> {
        let dir = Arc::clone(&self.dir);
        run_blocking(document, move || read_document(&dir, document)).await
    }

    async fn save<T>(&self, document: DocumentKind, contents: &T) -> BoardStoreResult<()>
    where
        T: Serialize + Sync,
    {
        let value =
            serde_json::to_value(contents).map_err(|err| BoardStoreError::write(document, err))?;
        let dir = Arc::clone(&self.dir);
        run_blocking(document, move || write_document(&dir, document, &value)).await
    }

    async fn save_task_document(
        &self,
        document: DocumentKind,
        tasks: &TaskMap,
    ) -> BoardStoreResult<()> {
        let mut value =
            serde_json::to_value(tasks).map_err(|err| BoardStoreError::write(document, err))?;
        let dir = Arc::clone(&self.dir);
        run_blocking(document, move || {
            keep_unrecognised_records(&dir, document, &mut value)?;
            write_document(&dir, document, &value)
        })
        .await
    }

    async fn load_task_document(&self, document: DocumentKind) -> BoardStoreResult<TaskMap> {
        let raw = self.load(document).await?;
        let validated =
            validate_task_map(&raw).map_err(|err| BoardStoreError::malformed(document, err))?;
        if !validated.rejected.is_empty() {
            warn!(
                document = %document,
                rejected = ?validated.rejected,
                "hiding records failing the task schema"
            );
        }
        Ok(validated.tasks)
    }
}

fn seed_document(document: DocumentKind) -> BoardStoreResult<Value> {
    match document {
        DocumentKind::Tasks | DocumentKind::Archive => Ok(Value::Object(serde_json::Map::new())),
        DocumentKind::Columns => serde_json::to_value(default_columns())
            .map_err(|err| BoardStoreError::write(document, err)),
    }
}

/// Copies records from the document on disk that fail the task schema into
/// `value`, unless `value` already has their key.
fn keep_unrecognised_records(
    dir: &Dir,
    document: DocumentKind,
    value: &mut Value,
) -> BoardStoreResult<()> {
    let current = read_document(dir, document)?;
    let (Value::Object(records), Some(target)) = (current, value.as_object_mut()) else {
        return Ok(());
    };

    let mut kept = Vec::new();
    for (key, record) in records {
        if !target.contains_key(&key) && validate_task_entry(&key, &record).is_err() {
            kept.push(key.clone());
            target.insert(key, record);
        }
    }
    if !kept.is_empty() {
        debug!(document = %document, kept = ?kept, "kept records failing the task schema");
    }
    Ok(())
}

fn read_document(dir: &Dir, document: DocumentKind) -> BoardStoreResult<Value> {
    let contents = match dir.read_to_string(file_name(document)) {
        Ok(contents) => contents,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            debug!(document = %document, "document missing, using seed");
            return seed_document(document);
        }
        Err(err) => return Err(BoardStoreError::read(document, err)),
    };
    serde_json::from_str(&contents).map_err(|err| BoardStoreError::malformed(document, err))
}

fn write_document(dir: &Dir, document: DocumentKind, value: &Value) -> BoardStoreResult<()> {
    let target = file_name(document);
    let staging = format!("{target}.tmp");
    let mut contents =
        serde_json::to_string_pretty(value).map_err(|err| BoardStoreError::write(document, err))?;
    contents.push('\n');
    dir.write(&staging, contents)
        .map_err(|err| BoardStoreError::write(document, err))?;
    dir.rename(&staging, dir, target)
        .map_err(|err| BoardStoreError::write(document, err))
}

async fn run_blocking<F, T>(document: DocumentKind, f: F) -> BoardStoreResult<T>
where
    F: FnOnce() -> BoardStoreResult<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|err| BoardStoreError::read(document, io::Error::other(err.to_string())))?
}

#[async_trait]
impl BoardStore for JsonFileBoardStore {
    async fn load_tasks(&self) -> BoardStoreResult<TaskMap> {
        self.load_task_document(DocumentKind::Tasks).await
    }

    async fn save_tasks(&self, tasks: &TaskMap) -> BoardStoreResult<()> {
        self.save_task_document(DocumentKind::Tasks, tasks).await
    }

    async fn load_columns(&self) -> BoardStoreResult<ColumnMap> {
        let raw = self.load(DocumentKind::Columns).await?;
        serde_json::from_value(raw)
            .map_err(|err| BoardStoreError::malformed(DocumentKind::Columns, err))
    }

    async fn save_columns(&self, columns: &ColumnMap) -> BoardStoreResult<()> {
        self.save(DocumentKind::Columns, columns).await
    }

    async fn load_archive(&self) -> BoardStoreResult<ArchiveMap> {
        self.load_task_document(DocumentKind::Archive).await
    }

    async fn save_archive(&self, archive: &ArchiveMap) -> BoardStoreResult<()> {
        self.save_task_document(DocumentKind::Archive, archive).await
    }
}
