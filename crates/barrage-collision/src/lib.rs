//! Collision geometry for BARRAGE.
//!
//! Broad phase (a per-tick quadtree over bounding boxes) and narrow phase
//! (separating-axis overlap with a minimum translation vector).
//! No ECS dependency; operates on plain boxes and vertex slices.

pub mod quadtree;
pub mod sat;

pub use quadtree::Quadtree;
pub use sat::{overlap, Mtv};
