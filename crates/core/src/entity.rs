//! Entity trait: identity that survives attribute changes.

/// Anything addressed by a stable identifier (principals, organizations).
pub trait Entity {
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    fn id(&self) -> &Self::Id;
}
