//! Entity trait: things the widget tracks by identity rather than by value.

/// An entity is identified by a small `Copy` key.
///
/// Cart entries and lookups hold the key, never a clone of the entity.
pub trait Entity {
    type Id: Copy + Eq + core::hash::Hash + core::fmt::Debug;

    fn id(&self) -> Self::Id;
}
