//! Region quadtree used as the collision broad phase.
//!
//! The tree is rebuilt every tick: `clear()`, then `insert()` every collider's
//! bounding box. An object descends into the one child quadrant that fully
//! contains its box; objects straddling a split line stay at the parent.
//! Retrieval returns a superset of the objects whose boxes overlap the query
//! box; the narrow phase rejects the false positives.

use barrage_core::types::Rect;

/// An object stored in the tree together with the box it was inserted with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Entry<T> {
    pub item: T,
    pub bounds: Rect,
}

#[derive(Debug)]
struct Node<T> {
    depth: u32,
    bounds: Rect,
    items: Vec<Entry<T>>,
    children: Option<Box<[Node<T>; 4]>>,
}

impl<T: Copy> Node<T> {
    fn new(bounds: Rect, depth: u32) -> Self {
        Self {
            depth,
            bounds,
            items: Vec::new(),
            children: None,
        }
    }

    fn clear(&mut self) {
        self.items.clear();
        self.children = None;
    }

    fn split(&mut self) {
        let depth = self.depth + 1;
        let quads = self.bounds.quadrants();
        self.children = Some(Box::new(quads.map(|bounds| Node::new(bounds, depth))));
    }

    fn insert(&mut self, entry: Entry<T>, max_depth: u32, capacity: usize) {
        let quads = self.bounds.quadrants();

        if let Some(children) = self.children.as_mut() {
            if let Some(i) = fitting_quadrant(&quads, &entry.bounds) {
                children[i].insert(entry, max_depth, capacity);
                return;
            }
        }

        self.items.push(entry);

        if self.items.len() > capacity && self.depth < max_depth {
            if self.children.is_none() {
                self.split();
            }
            let Some(children) = self.children.as_mut() else {
                return;
            };
            let mut i = 0;
            while i < self.items.len() {
                match fitting_quadrant(&quads, &self.items[i].bounds) {
                    Some(q) => {
                        let moved = self.items.remove(i);
                        children[q].insert(moved, max_depth, capacity);
                    }
                    None => i += 1,
                }
            }
        }
    }

    fn retrieve(&self, query: &Rect, out: &mut Vec<T>) {
        out.extend(self.items.iter().map(|e| e.item));

        let Some(children) = self.children.as_ref() else {
            return;
        };
        let quads = self.bounds.quadrants();
        match fitting_quadrant(&quads, query) {
            Some(i) => children[i].retrieve(query, out),
            None => {
                // Straddling query: every quadrant it touches may hold overlaps.
                for child in children.iter() {
                    if child.bounds.overlaps(query) {
                        child.retrieve(query, out);
                    }
                }
            }
        }
    }

    fn len(&self) -> usize {
        self.items.len()
            + self
                .children
                .as_ref()
                .map_or(0, |c| c.iter().map(Node::len).sum())
    }

    fn max_depth_reached(&self) -> u32 {
        self.children.as_ref().map_or(self.depth, |c| {
            c.iter().map(Node::max_depth_reached).max().unwrap_or(self.depth)
        })
    }

    fn node_count(&self) -> usize {
        1 + self
            .children
            .as_ref()
            .map_or(0, |c| c.iter().map(Node::node_count).sum())
    }
}

/// Index of the single quadrant that fully contains `rect`, if any.
/// Degenerate boxes fit nowhere and stay at the node.
fn fitting_quadrant(quads: &[Rect; 4], rect: &Rect) -> Option<usize> {
    quads.iter().position(|q| q.contains_rect(rect))
}

/// Broad-phase spatial index over axis-aligned boxes.
#[derive(Debug)]
pub struct Quadtree<T> {
    root: Node<T>,
    max_depth: u32,
    capacity: usize,
}

impl<T: Copy> Quadtree<T> {
    /// Empty tree over `bounds`. Nodes split once they hold more than
    /// `capacity` objects, down to `max_depth` (the root is depth 0).
    pub fn new(bounds: Rect, max_depth: u32, capacity: usize) -> Self {
        Self {
            root: Node::new(bounds, 0),
            max_depth,
            capacity,
        }
    }

    pub fn bounds(&self) -> Rect {
        self.root.bounds
    }

    /// Remove every object and drop all child nodes.
    pub fn clear(&mut self) {
        self.root.clear();
    }

    /// Insert `item` with its bounding box. Boxes outside the root bounds
    /// are kept at the root.
    pub fn insert(&mut self, item: T, bounds: Rect) {
        self.root
            .insert(Entry { item, bounds }, self.max_depth, self.capacity);
    }

    /// Append to `out` every object that may overlap `query`: the objects on
    /// the path from the root to the deepest node containing `query`, plus
    /// the subtrees of every quadrant a straddling query touches.
    pub fn retrieve(&self, query: &Rect, out: &mut Vec<T>) {
        self.root.retrieve(query, out);
    }

    /// Number of stored objects.
    pub fn len(&self) -> usize {
        self.root.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Depth of the deepest node currently allocated.
    pub fn depth(&self) -> u32 {
        self.root.max_depth_reached()
    }

    /// Number of allocated nodes, root included.
    pub fn node_count(&self) -> usize {
        self.root.node_count()
    }

    /// Objects stored directly at the root (straddlers and out-of-bounds boxes).
    pub fn root_items(&self) -> impl Iterator<Item = &Entry<T>> {
        self.root.items.iter()
    }
}
