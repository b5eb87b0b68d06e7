use crate::domain::model::Entity;
use crate::utils::error::{RecordError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// In-memory rows of one entity plus its id counter.
#[derive(Debug, Clone)]
pub struct Table<E: Entity> {
    next_id: i64,
    rows: BTreeMap<E::Id, E>,
}

/// On-disk shape of a [`Table`].
#[derive(Debug, Serialize, Deserialize)]
#[serde(bound(serialize = "E: Serialize", deserialize = "E: Deserialize<'de>"))]
pub struct TableSnapshot<E> {
    pub next_id: i64,
    pub records: Vec<E>,
}

impl<E: Entity> Default for Table<E> {
    fn default() -> Self {
        Self {
            next_id: 1,
            rows: BTreeMap::new(),
        }
    }
}

impl<E: Entity> Table<E> {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn insert(&mut self, draft: E::Draft) -> Result<E> {
        let id = E::Id::from(self.next_id);
        self.next_id = self
            .next_id
            .checked_add(1)
            .ok_or_else(|| RecordError::storage(format!("{} id space exhausted", E::NAME)))?;

        let record = E::from_draft(id, draft);
        self.rows.insert(id, record.clone());
        Ok(record)
    }

    pub fn get(&self, id: E::Id) -> Result<E> {
        self.rows.get(&id).cloned().ok_or_else(|| not_found::<E>(id))
    }

    pub fn list(&self) -> Vec<E> {
        self.rows.values().cloned().collect()
    }

    pub fn update(&mut self, id: E::Id, draft: E::Draft) -> Result<E> {
        let slot = self.rows.get_mut(&id).ok_or_else(|| not_found::<E>(id))?;
        *slot = E::from_draft(id, draft);
        Ok(slot.clone())
    }

    pub fn delete(&mut self, id: E::Id) -> Result<E> {
        self.rows.remove(&id).ok_or_else(|| not_found::<E>(id))
    }

    pub fn snapshot(&self) -> TableSnapshot<E> {
        TableSnapshot {
            next_id: self.next_id,
            records: self.list(),
        }
    }

    /// Rebuilds a table, rejecting duplicate ids and a counter that would
    /// hand out an id already present.
    pub fn restore(snapshot: TableSnapshot<E>) -> Result<Self> {
        let mut rows = BTreeMap::new();
        let mut max_id = 0_i64;

        for record in snapshot.records {
            let id = record.id();
            max_id = max_id.max(id.into());
            if rows.insert(id, record).is_some() {
                return Err(RecordError::storage(format!(
                    "duplicate {} id {} in {}",
                    E::NAME,
                    id,
                    E::TABLE
                )));
            }
        }

        if snapshot.next_id <= max_id {
            return Err(RecordError::storage(format!(
                "{} next_id {} is not above highest stored id {}",
                E::TABLE,
                snapshot.next_id,
                max_id
            )));
        }

        Ok(Self {
            next_id: snapshot.next_id,
            rows,
        })
    }
}

fn not_found<E: Entity>(id: E::Id) -> RecordError {
    RecordError::NotFoundError {
        entity: E::NAME,
        id: id.into(),
    }
}
