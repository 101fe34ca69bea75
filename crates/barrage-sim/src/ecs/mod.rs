//! Entity/component store.
//!
//! Entities are generational handles; each component type lives in its own
//! pool of reusable slots, and every entity carries a bitmask of the
//! component types attached to it. Family queries match on that mask.

pub mod entity;
pub mod family;
pub mod pool;
pub mod world;

pub use entity::EntityAllocator;
pub use family::{Family, FamilyCursor};
pub use pool::{Pool, PoolStats, Poolable};
pub use world::{Component, World, WorldStats};
