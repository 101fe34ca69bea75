//! Component-set bitmasks and mutation-safe family iteration.

use std::ops::BitOr;

use barrage_core::types::EntityId;

use super::world::World;

/// Set of component types, one bit per type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Family(u32);

impl Family {
    pub const EMPTY: Family = Family(0);
    pub const TRANSFORM: Family = Family(1 << 0);
    pub const MOVEMENT: Family = Family(1 << 1);
    pub const COLLIDER: Family = Family(1 << 2);
    pub const HEALTH: Family = Family(1 << 3);
    pub const BULLET: Family = Family(1 << 4);
    pub const AI: Family = Family(1 << 5);
    pub const SPAWNER: Family = Family(1 << 6);
    pub const LIFETIME: Family = Family(1 << 7);
    pub const SPRITE: Family = Family(1 << 8);
    pub const PLAYER: Family = Family(1 << 9);
    pub const REWARD: Family = Family(1 << 10);
    pub const MARKER: Family = Family(1 << 11);

    /// Whether every type in `required` is in `self`.
    pub const fn contains(self, required: Family) -> bool {
        self.0 & required.0 == required.0
    }

    pub const fn with(self, other: Family) -> Family {
        Family(self.0 | other.0)
    }

    pub const fn without(self, other: Family) -> Family {
        Family(self.0 & !other.0)
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for Family {
    type Output = Family;

    fn bitor(self, rhs: Family) -> Family {
        self.with(rhs)
    }
}

/// Iterator over the entities matching a family when the query was made.
///
/// The cursor does not borrow the world between steps, so the loop body may
/// create and remove entities. Each step re-checks the candidate: entities
/// removed (or stripped of a required component) earlier in the pass are
/// skipped, and entities created during the pass are not visited.
///
/// ```ignore
/// let mut cursor = world.query(Family::TRANSFORM | Family::LIFETIME);
/// while let Some(id) = cursor.next(&world) {
///     world.remove_entity(id);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct FamilyCursor {
    family: Family,
    snapshot: Vec<EntityId>,
    next: usize,
}

impl FamilyCursor {
    pub(crate) fn new(family: Family, snapshot: Vec<EntityId>) -> Self {
        Self {
            family,
            snapshot,
            next: 0,
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self, world: &World) -> Option<EntityId> {
        while let Some(&id) = self.snapshot.get(self.next) {
            self.next += 1;
            if world.matches(id, self.family) {
                return Some(id);
            }
        }
        None
    }

    pub fn family(&self) -> Family {
        self.family
    }

    /// Entities matched when the query was made.
    pub fn len(&self) -> usize {
        self.snapshot.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshot.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn family_containment() {
        let mover = Family::TRANSFORM | Family::MOVEMENT;
        assert!(mover.contains(Family::TRANSFORM));
        assert!(mover.contains(mover));
        assert!(!Family::TRANSFORM.contains(mover));
        assert!(mover.contains(Family::EMPTY));
        assert_eq!(mover.without(Family::MOVEMENT), Family::TRANSFORM);
        assert!(Family::EMPTY.is_empty());
    }
}
