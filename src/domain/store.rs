//! Storage contract for identity-keyed entities.

/// Store-assigned integer primary key. Valid identities are always positive.
pub type EntityId = i32;

/// Entity with an identity slot the store can read and assign.
pub trait Identifiable {
    fn id(&self) -> EntityId;
    fn set_id(&mut self, id: EntityId);

    /// Whether the entity has been given an identity by a store.
    fn has_identity(&self) -> bool {
        self.id() > 0
    }
}

/// Keyed collection acting as the system of record for `T`.
///
/// Identities are assigned by the store only; whatever `id` a caller puts on
/// an entity before `add` or `update` is overwritten. Misses are reported as
/// `None`/`false`, never as errors.
pub trait Store<T>: Send + Sync
where
    T: Identifiable + Clone + Send + Sync,
{
    /// Insert `entity` under the next unused identity.
    ///
    /// Returns identity 0 with the entity unstored once the identity space is
    /// used up.
    fn add(&self, entity: T) -> (T, EntityId);

    /// Insert every entity, assigning one contiguous block of identities.
    /// A batch that does not fit in the remaining identity space is not
    /// stored at all and yields no identities.
    fn add_range(&self, entities: Vec<T>) -> Vec<EntityId>;

    /// Point-in-time copy of all entities, ordered by identity.
    fn get_all(&self) -> Vec<T>;

    fn get_by_id(&self, id: EntityId) -> Option<T>;

    /// Replace the entity stored at `id`. The replacement keeps `id`.
    fn update(&self, id: EntityId, entity: T) -> Option<T>;

    /// Remove the entity at `id`. Its identity is never handed out again.
    fn delete(&self, id: EntityId) -> bool;

    fn count(&self) -> usize;
}
