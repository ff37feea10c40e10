//! In-memory entity store

use std::collections::BTreeMap;

use parking_lot::RwLock;
use tracing::warn;

use crate::domain::{EntityId, Identifiable, Store};

struct Inner<T> {
    entities: BTreeMap<EntityId, T>,
    /// `None` once `EntityId::MAX` has been handed out.
    next_id: Option<EntityId>,
}

/// Thread-safe in-memory [`Store`].
///
/// Identity assignment and the insert it produces happen under one write
/// lock, so concurrent `add`/`add_range` calls never share an identity and a
/// batch always receives a contiguous block. Reads share the lock only for
/// the duration of the copy.
///
/// Identities run from 1 to `EntityId::MAX`. Once they are used up the store
/// accepts nothing more: `add` returns the entity unstored with identity 0 and
/// `add_range` stores nothing and returns no identities.
pub struct InMemoryStore<T> {
    inner: RwLock<Inner<T>>,
}

impl<T> InMemoryStore<T> {
    pub fn new() -> Self {
        Self::starting_at(1)
    }

    fn starting_at(first_id: EntityId) -> Self {
        Self {
            inner: RwLock::new(Inner {
                entities: BTreeMap::new(),
                next_id: Some(first_id),
            }),
        }
    }

    /// Store whose next identity is `first_id`.
    #[cfg(test)]
    pub(crate) fn with_next_id(first_id: EntityId) -> Self {
        Self::starting_at(first_id)
    }
}

impl<T> Default for InMemoryStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Inner<T>
where
    T: Identifiable + Clone,
{
    fn remaining_ids(&self) -> usize {
        self.next_id
            .map_or(0, |next| (EntityId::MAX - next) as usize + 1)
    }

    /// Insert under the next identity, or hand the entity back if none is left.
    fn insert_next(&mut self, mut entity: T) -> Result<(T, EntityId), T> {
        let Some(id) = self.next_id else {
            return Err(entity);
        };
        self.next_id = id.checked_add(1);
        entity.set_id(id);
        self.entities.insert(id, entity.clone());
        Ok((entity, id))
    }
}

impl<T> Store<T> for InMemoryStore<T>
where
    T: Identifiable + Clone + Send + Sync,
{
    fn add(&self, entity: T) -> (T, EntityId) {
        match self.inner.write().insert_next(entity) {
            Ok(stored) => stored,
            Err(mut rejected) => {
                warn!("Identity space exhausted, entity not stored");
                rejected.set_id(0);
                (rejected, 0)
            }
        }
    }

    fn add_range(&self, entities: Vec<T>) -> Vec<EntityId> {
        let mut inner = self.inner.write();
        if entities.len() > inner.remaining_ids() {
            warn!(
                requested = entities.len(),
                remaining = inner.remaining_ids(),
                "Identity space too small for batch, nothing stored"
            );
            return Vec::new();
        }
        entities
            .into_iter()
            .filter_map(|entity| inner.insert_next(entity).ok())
            .map(|(_, id)| id)
            .collect()
    }

    fn get_all(&self) -> Vec<T> {
        self.inner.read().entities.values().cloned().collect()
    }

    fn get_by_id(&self, id: EntityId) -> Option<T> {
        self.inner.read().entities.get(&id).cloned()
    }

    fn update(&self, id: EntityId, mut entity: T) -> Option<T> {
        let mut inner = self.inner.write();
        let slot = inner.entities.get_mut(&id)?;
        entity.set_id(id);
        *slot = entity.clone();
        Some(entity)
    }

    fn delete(&self, id: EntityId) -> bool {
        self.inner.write().entities.remove(&id).is_some()
    }

    fn count(&self) -> usize {
        self.inner.read().entities.len()
    }
}
