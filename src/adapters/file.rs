use crate::adapters::table::{Table, TableSnapshot};
use crate::domain::model::Entity;
use crate::domain::ports::RecordStore;
use crate::utils::error::{RecordError, Result};
use async_trait::async_trait;
use fd_lock::RwLock;
use std::fs::{File, OpenOptions};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

/// Durable store keeping one JSON document per table under `data_dir`.
///
/// Every operation takes an advisory lock on `{table}.json.lock` and works
/// on the document as it is on disk: reads share the lock, mutations hold
/// it exclusively across reload, change and rewrite. Any number of stores
/// and processes can point at the same directory without reusing ids or
/// dropping each other's writes. Rewrites go through a temp file and
/// rename, so the document is never seen half-written.
#[derive(Debug)]
pub struct JsonFileStore<E: Entity> {
    path: PathBuf,
    lock_path: PathBuf,
    _entity: PhantomData<fn() -> E>,
}

impl<E: Entity> JsonFileStore<E> {
    /// Opens `{data_dir}/{table}.json`, creating the directory if needed.
    /// A missing file is an empty table; a corrupt one fails here.
    pub async fn open(data_dir: impl AsRef<Path>) -> Result<Self> {
        let data_dir = data_dir.as_ref();
        tokio::fs::create_dir_all(data_dir)
            .await
            .map_err(|e| storage_io("create data dir", data_dir, e))?;

        let store = Self {
            path: data_dir.join(format!("{}.json", E::TABLE)),
            lock_path: data_dir.join(format!("{}.json.lock", E::TABLE)),
            _entity: PhantomData,
        };

        let count = store.read(|table| Ok(table.len())).await?;
        tracing::info!(
            "📂 Opened {} with {} record(s) at {}",
            E::TABLE,
            count,
            store.path.display()
        );

        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read<T, F>(&self, op: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&Table<E>) -> Result<T> + Send + 'static,
    {
        let path = self.path.clone();
        let lock_path = self.lock_path.clone();

        run_blocking(move || {
            let lock = open_lock(&lock_path)?;
            let _guard = lock.read().map_err(|e| storage_io("lock", &lock_path, e))?;
            op(&load::<E>(&path)?)
        })
        .await
    }

    /// Reloads, applies `op` and persists under the exclusive lock. Nothing
    /// is written when `op` fails.
    async fn mutate<T, F>(&self, op: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut Table<E>) -> Result<T> + Send + 'static,
    {
        let path = self.path.clone();
        let lock_path = self.lock_path.clone();

        run_blocking(move || {
            let mut lock = open_lock(&lock_path)?;
            let _guard = lock.write().map_err(|e| storage_io("lock", &lock_path, e))?;

            let mut table = load::<E>(&path)?;
            let out = op(&mut table)?;
            persist(&path, &table)?;
            Ok(out)
        })
        .await
    }
}

async fn run_blocking<T, F>(f: F) -> Result<T>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T> + Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| RecordError::storage(format!("store task failed: {}", e)))?
}

fn open_lock(lock_path: &Path) -> Result<RwLock<File>> {
    let file = OpenOptions::new()
        .read(true)
        .write(true)
        .create(true)
        .truncate(false)
        .open(lock_path)
        .map_err(|e| storage_io("open", lock_path, e))?;
    Ok(RwLock::new(file))
}

fn load<E: Entity>(path: &Path) -> Result<Table<E>> {
    match std::fs::read(path) {
        Ok(bytes) => {
            let snapshot: TableSnapshot<E> = serde_json::from_slice(&bytes).map_err(|e| {
                RecordError::storage(format!("corrupt table {}: {}", path.display(), e))
            })?;
            Table::restore(snapshot)
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Table::default()),
        Err(e) => Err(storage_io("read", path, e)),
    }
}

fn persist<E: Entity>(path: &Path, table: &Table<E>) -> Result<()> {
    let bytes = serde_json::to_vec_pretty(&table.snapshot())?;
    // 只有持有寫鎖的一方會寫入，固定的暫存檔名不會互相覆蓋
    let tmp = path.with_extension("json.tmp");

    std::fs::write(&tmp, &bytes).map_err(|e| storage_io("write", &tmp, e))?;
    std::fs::rename(&tmp, path).map_err(|e| storage_io("rename", path, e))?;

    tracing::debug!(table = E::TABLE, bytes = bytes.len(), "table persisted");
    Ok(())
}

fn storage_io(action: &str, path: &Path, e: std::io::Error) -> RecordError {
    RecordError::storage(format!("failed to {} {}: {}", action, path.display(), e))
}

#[async_trait]
impl<E: Entity> RecordStore<E> for JsonFileStore<E> {
    async fn insert(&self, draft: E::Draft) -> Result<E> {
        self.mutate(move |table| table.insert(draft)).await
    }

    async fn get(&self, id: E::Id) -> Result<E> {
        self.read(move |table| table.get(id)).await
    }

    async fn list(&self) -> Result<Vec<E>> {
        self.read(|table| Ok(table.list())).await
    }

    async fn update(&self, id: E::Id, draft: E::Draft) -> Result<E> {
        self.mutate(move |table| table.update(id, draft)).await
    }

    async fn delete(&self, id: E::Id) -> Result<()> {
        self.mutate(move |table| table.delete(id).map(|_| ())).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{ContactId, ContactRecord, NewContact};
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_corrupt_file_is_storage_error() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("rose_contact.json"), b"{ not json").unwrap();

        let err = JsonFileStore::<ContactRecord>::open(dir.path())
            .await
            .unwrap_err();
        assert_eq!(err.category(), crate::utils::error::ErrorCategory::Storage);
    }

    #[tokio::test]
    async fn test_failed_mutation_leaves_file_untouched() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::<ContactRecord>::open(dir.path()).await.unwrap();
        store
            .insert(NewContact::new("Ann", "ann@x.com", "Hi", "Hello"))
            .await
            .unwrap();
        let before = std::fs::read(store.path()).unwrap();

        let err = store.delete(ContactId(42)).await.unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(std::fs::read(store.path()).unwrap(), before);
    }

    #[tokio::test]
    async fn test_lock_file_sits_next_to_table() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::<ContactRecord>::open(dir.path()).await.unwrap();
        store
            .insert(NewContact::new("Ann", "ann@x.com", "Hi", "Hello"))
            .await
            .unwrap();

        assert!(dir.path().join("rose_contact.json.lock").exists());
        assert!(!dir.path().join("rose_contact.json.tmp").exists());
    }
}
