//! Per-component slot pools.
//!
//! A pool owns a dense `Vec` of component values and a free list of slot
//! indices. Releasing a slot resets the value in place and keeps it for the
//! next acquire, so steady-state ticks do not reallocate component buffers.

use barrage_core::components::*;

/// Component that can be returned to a pool.
pub trait Poolable: Default {
    /// Restore documented defaults. Implementations that own buffers clear
    /// them instead of dropping them.
    fn reset(&mut self) {
        *self = Self::default();
    }
}

impl Poolable for Transform {}
impl Poolable for Movement {}
impl Poolable for Health {}
impl Poolable for Bullet {}
impl Poolable for Spawner {}
impl Poolable for Lifetime {}
impl Poolable for Player {}
impl Poolable for Reward {}
impl Poolable for Marker {}

impl Poolable for Collider {
    fn reset(&mut self) {
        self.body.clear();
        self.solid = false;
        self.team = Default::default();
        self.handler = Default::default();
    }
}

impl Poolable for Sprite {
    fn reset(&mut self) {
        self.layers.clear();
        self.gui = false;
        self.hidden = false;
    }
}

impl Poolable for Ai {
    fn reset(&mut self) {
        self.queue.clear();
        self.state = Default::default();
        self.script_step = 0;
    }
}

/// Occupancy counters for one pool.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PoolStats {
    pub name: &'static str,
    pub live: usize,
    pub free: usize,
    /// Acquires served from the free list.
    pub recycled: u64,
}

/// Slot pool for one component type, indexed by entity index.
#[derive(Debug)]
pub struct Pool<T> {
    name: &'static str,
    values: Vec<T>,
    free: Vec<u32>,
    /// Entity index -> slot.
    slot_of: Vec<Option<u32>>,
    recycled: u64,
}

impl<T: Poolable> Pool<T> {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            values: Vec::new(),
            free: Vec::new(),
            slot_of: Vec::new(),
            recycled: 0,
        }
    }

    /// Slot for `entity`, acquiring a reset one if it has none.
    fn slot_for(&mut self, entity: u32) -> usize {
        let idx = entity as usize;
        if self.slot_of.len() <= idx {
            self.slot_of.resize(idx + 1, None);
        }
        if let Some(slot) = self.slot_of[idx] {
            return slot as usize;
        }
        let slot = match self.free.pop() {
            Some(slot) => {
                self.recycled += 1;
                slot
            }
            None => {
                self.values.push(T::default());
                (self.values.len() - 1) as u32
            }
        };
        self.slot_of[idx] = Some(slot);
        slot as usize
    }

    /// Store `value` for `entity`, replacing any existing value.
    pub fn insert(&mut self, entity: u32, value: T) {
        let slot = self.slot_for(entity);
        self.values[slot] = value;
    }

    /// Fill the entity's slot in place. A fresh or recycled slot starts
    /// reset, with whatever buffer capacity it had.
    pub fn insert_with(&mut self, entity: u32, init: impl FnOnce(&mut T)) {
        let slot = self.slot_for(entity);
        init(&mut self.values[slot]);
    }

    pub fn get(&self, entity: u32) -> Option<&T> {
        let slot = (*self.slot_of.get(entity as usize)?)?;
        self.values.get(slot as usize)
    }

    pub fn get_mut(&mut self, entity: u32) -> Option<&mut T> {
        let slot = (*self.slot_of.get(entity as usize)?)?;
        self.values.get_mut(slot as usize)
    }

    pub fn contains(&self, entity: u32) -> bool {
        matches!(self.slot_of.get(entity as usize), Some(Some(_)))
    }

    /// Reset the entity's value and return its slot to the free list.
    pub fn release(&mut self, entity: u32) -> bool {
        let Some(slot) = self.slot_of.get_mut(entity as usize).and_then(Option::take) else {
            return false;
        };
        self.values[slot as usize].reset();
        self.free.push(slot);
        true
    }

    pub fn stats(&self) -> PoolStats {
        PoolStats {
            name: self.name,
            live: self.values.len() - self.free.len(),
            free: self.free.len(),
            recycled: self.recycled,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use barrage_core::types::Vec2;

    #[test]
    fn release_resets_and_recycles() {
        let mut pool: Pool<Lifetime> = Pool::new("lifetime");
        pool.insert(3, Lifetime { timer: 2.0 });
        assert_eq!(pool.get(3).map(|l| l.timer), Some(2.0));

        assert!(pool.release(3));
        assert!(pool.get(3).is_none());
        assert!(!pool.release(3));

        pool.insert_with(9, |_| {});
        assert_eq!(pool.get(9), Some(&Lifetime::default()));
        let stats = pool.stats();
        assert_eq!(stats.live, 1);
        assert_eq!(stats.free, 0);
        assert_eq!(stats.recycled, 1);
    }

    #[test]
    fn collider_reset_keeps_vertex_capacity() {
        let mut pool: Pool<Collider> = Pool::new("collider");
        pool.insert_with(0, |c| {
            c.body.set_rectangle(8.0, 8.0);
            c.solid = true;
        });
        pool.release(0);

        pool.insert_with(1, |c| {
            assert!(c.body.local().is_empty());
            assert!(!c.solid);
        });
        assert_eq!(pool.stats().recycled, 1);
    }

    #[test]
    fn sprite_reset_clears_layers() {
        let mut sprite = Sprite {
            layers: vec![Default::default(); 3],
            gui: true,
            hidden: true,
        };
        sprite.reset();
        assert!(sprite.layers.is_empty());
        assert!(sprite.layers.capacity() >= 3);
        assert!(!sprite.gui && !sprite.hidden);
    }

    #[test]
    fn insert_overwrites_existing_slot() {
        let mut pool: Pool<Transform> = Pool::new("transform");
        pool.insert(0, Transform::centered(Vec2::ZERO, Vec2::ONE));
        pool.insert(0, Transform::centered(Vec2::splat(5.0), Vec2::ONE));
        assert_eq!(pool.stats().live, 1);
        assert_eq!(pool.get(0).map(|t| t.center()), Some(Vec2::splat(5.0)));
    }
}
