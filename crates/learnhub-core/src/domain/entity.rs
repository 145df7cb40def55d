//! Domain Layer - Core Entity Trait
//!
//! Anything kept in a collection store must expose a unique id.

/// Core trait for all stored entities
pub trait Entity: Clone {
    /// The type of the entity's unique identifier
    type Id: Clone + Eq + std::hash::Hash + std::fmt::Debug;

    /// Returns the entity's unique identifier
    fn id(&self) -> &Self::Id;
}
