use crate::adapters::table::Table;
use crate::domain::model::Entity;
use crate::domain::ports::RecordStore;
use crate::utils::error::Result;
use async_trait::async_trait;
use tokio::sync::Mutex;

/// Process-local store. Ids and rows share one lock, so concurrent inserts
/// never collide.
#[derive(Debug)]
pub struct MemoryStore<E: Entity> {
    table: Mutex<Table<E>>,
}

impl<E: Entity> MemoryStore<E> {
    pub fn new() -> Self {
        Self {
            table: Mutex::new(Table::default()),
        }
    }
}

impl<E: Entity> Default for MemoryStore<E> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<E: Entity> RecordStore<E> for MemoryStore<E> {
    async fn insert(&self, draft: E::Draft) -> Result<E> {
        let mut table = self.table.lock().await;
        let record = table.insert(draft)?;
        tracing::debug!(entity = E::NAME, id = %record.id(), "inserted in memory");
        Ok(record)
    }

    async fn get(&self, id: E::Id) -> Result<E> {
        self.table.lock().await.get(id)
    }

    async fn list(&self) -> Result<Vec<E>> {
        Ok(self.table.lock().await.list())
    }

    async fn update(&self, id: E::Id, draft: E::Draft) -> Result<E> {
        self.table.lock().await.update(id, draft)
    }

    async fn delete(&self, id: E::Id) -> Result<()> {
        self.table.lock().await.delete(id).map(|_| ())
    }
}
