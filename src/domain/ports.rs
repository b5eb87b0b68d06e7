use crate::domain::model::Entity;
use crate::utils::error::Result;
use async_trait::async_trait;

/// Storage for one entity table. The store owns identifier allocation:
/// ids start at 1, grow monotonically and are never handed out twice,
/// even after a delete.
#[async_trait]
pub trait RecordStore<E: Entity>: Send + Sync {
    async fn insert(&self, draft: E::Draft) -> Result<E>;

    async fn get(&self, id: E::Id) -> Result<E>;

    /// All records in ascending id order.
    async fn list(&self) -> Result<Vec<E>>;

    async fn update(&self, id: E::Id, draft: E::Draft) -> Result<E>;

    async fn delete(&self, id: E::Id) -> Result<()>;
}

#[async_trait]
impl<E, S> RecordStore<E> for std::sync::Arc<S>
where
    E: Entity,
    S: RecordStore<E> + ?Sized,
{
    async fn insert(&self, draft: E::Draft) -> Result<E> {
        (**self).insert(draft).await
    }

    async fn get(&self, id: E::Id) -> Result<E> {
        (**self).get(id).await
    }

    async fn list(&self) -> Result<Vec<E>> {
        (**self).list().await
    }

    async fn update(&self, id: E::Id, draft: E::Draft) -> Result<E> {
        (**self).update(id, draft).await
    }

    async fn delete(&self, id: E::Id) -> Result<()> {
        (**self).delete(id).await
    }
}
