use barrage_core::types::EntityId;

/// Hands out entity handles, recycling indices with a bumped generation.
#[derive(Debug)]
pub struct EntityAllocator {
    generations: Vec<u32>,
    free_indices: Vec<u32>,
    next_index: u32,
}

impl EntityAllocator {
    pub fn new() -> Self {
        Self {
            generations: Vec::new(),
            free_indices: Vec::new(),
            next_index: 0,
        }
    }

    pub fn allocate(&mut self) -> EntityId {
        if let Some(index) = self.free_indices.pop() {
            let generation = self.generations[index as usize];
            EntityId::new(index, generation)
        } else {
            let index = self.next_index;
            self.next_index += 1;
            self.generations.push(0);
            EntityId::new(index, 0)
        }
    }

    /// Invalidate `id`. Stale or unknown handles are ignored.
    pub fn deallocate(&mut self, id: EntityId) -> bool {
        if self.is_alive(id) {
            self.generations[id.index as usize] = id.generation.wrapping_add(1);
            self.free_indices.push(id.index);
            true
        } else {
            false
        }
    }

    /// Whether `id` carries the current generation of its index. A freed
    /// index is only handed out again by `allocate`, so the world also
    /// tracks liveness per index.
    pub fn is_alive(&self, id: EntityId) -> bool {
        self.generations
            .get(id.index as usize)
            .is_some_and(|&g| g == id.generation)
    }

    /// Current generation for an index.
    pub fn generation_of(&self, index: u32) -> Option<u32> {
        self.generations.get(index as usize).copied()
    }

    /// Number of indices ever handed out.
    pub fn capacity(&self) -> usize {
        self.generations.len()
    }
}

impl Default for EntityAllocator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allocate_and_deallocate() {
        let mut alloc = EntityAllocator::new();
        let e0 = alloc.allocate();
        assert_eq!(e0.index, 0);
        assert_eq!(e0.generation, 0);
        assert!(alloc.is_alive(e0));

        assert!(alloc.deallocate(e0));
        assert!(!alloc.is_alive(e0));
        assert!(!alloc.deallocate(e0), "double free is ignored");

        let e0_reuse = alloc.allocate();
        assert_eq!(e0_reuse.index, 0);
        assert_eq!(e0_reuse.generation, 1);
        assert!(alloc.is_alive(e0_reuse));
        assert!(!alloc.is_alive(e0));
    }

    #[test]
    fn sequential_allocation() {
        let mut alloc = EntityAllocator::new();
        let e0 = alloc.allocate();
        let e1 = alloc.allocate();
        let e2 = alloc.allocate();
        assert_eq!(e0.index, 0);
        assert_eq!(e1.index, 1);
        assert_eq!(e2.index, 2);
        assert_eq!(alloc.capacity(), 3);
    }

    #[test]
    fn unknown_handle_is_not_alive() {
        let alloc = EntityAllocator::new();
        assert!(!alloc.is_alive(EntityId::new(7, 0)));
        assert_eq!(alloc.generation_of(7), None);
    }
}
