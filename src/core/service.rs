use crate::domain::model::{AppointmentRecord, ContactRecord, Entity};
use crate::domain::ports::RecordStore;
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use std::marker::PhantomData;

/// Validates drafts and hands them to an injected store.
///
/// Nothing reaches the store unless validation passes, so a rejected
/// submission never consumes an id.
pub struct RecordService<E: Entity, S: RecordStore<E>> {
    store: S,
    _entity: PhantomData<fn() -> E>,
}

pub type ContactService<S> = RecordService<ContactRecord, S>;
pub type AppointmentService<S> = RecordService<AppointmentRecord, S>;

impl<E, S> RecordService<E, S>
where
    E: Entity,
    E::Draft: Validate,
    S: RecordStore<E>,
{
    pub fn new(store: S) -> Self {
        Self {
            store,
            _entity: PhantomData,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub async fn create(&self, draft: E::Draft) -> Result<E> {
        if let Err(e) = draft.validate() {
            tracing::warn!("⚠️ Rejected new {}: {}", E::NAME, e);
            return Err(e);
        }

        let record = self.store.insert(draft).await?;
        tracing::info!("✅ Created {} {}", E::NAME, record.id());
        Ok(record)
    }

    pub async fn get(&self, id: E::Id) -> Result<E> {
        tracing::debug!("Reading {} {}", E::NAME, id);
        self.store.get(id).await
    }

    pub async fn list(&self) -> Result<Vec<E>> {
        let records = self.store.list().await?;
        tracing::debug!("Listed {} {} record(s)", records.len(), E::NAME);
        Ok(records)
    }

    pub async fn update(&self, id: E::Id, draft: E::Draft) -> Result<E> {
        if let Err(e) = draft.validate() {
            tracing::warn!("⚠️ Rejected update of {} {}: {}", E::NAME, id, e);
            return Err(e);
        }

        let record = self.store.update(id, draft).await?;
        tracing::info!("✏️ Updated {} {}", E::NAME, id);
        Ok(record)
    }

    pub async fn delete(&self, id: E::Id) -> Result<()> {
        self.store.delete(id).await?;
        tracing::info!("🗑️ Deleted {} {}", E::NAME, id);
        Ok(())
    }
}
