//! Fundamental geometric and simulation types.

use serde::{Deserialize, Serialize};

pub use glam::Vec2;

/// Generational entity handle. The index is reused after removal; the
/// generation is bumped so stale handles never resolve to the new occupant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId {
    pub index: u32,
    pub generation: u32,
}

impl EntityId {
    pub fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "E{}g{}", self.index, self.generation)
    }
}

/// Simulation time tracking. The caller supplies `dt` each tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each simulated tick).
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

impl SimTime {
    /// Advance by one tick of `dt` seconds.
    pub fn advance(&mut self, dt: f32) {
        self.tick += 1;
        self.elapsed_secs += f64::from(dt);
    }
}

/// Axis-aligned rectangle, `min` inclusive to `max` inclusive.
/// Used for the playfield, quadtree nodes and collider bounding boxes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    /// Rectangle from its lower-left corner and size.
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            min: Vec2::new(x, y),
            max: Vec2::new(x + width, y + height),
        }
    }

    pub fn from_min_max(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Smallest rectangle enclosing every point. Empty input gives a NaN rect,
    /// which is degenerate and therefore never fits a quadrant.
    pub fn enclosing(points: &[Vec2]) -> Self {
        let Some(first) = points.first() else {
            return Self {
                min: Vec2::NAN,
                max: Vec2::NAN,
            };
        };
        let (min, max) = points
            .iter()
            .skip(1)
            .fold((*first, *first), |(lo, hi), p| (lo.min(*p), hi.max(*p)));
        Self { min, max }
    }

    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    /// Zero-area, inverted or non-finite rectangles are degenerate.
    pub fn is_degenerate(&self) -> bool {
        !(self.min.is_finite() && self.max.is_finite())
            || self.width() <= 0.0
            || self.height() <= 0.0
    }

    pub fn contains_point(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    /// True when `other` lies entirely inside `self`. Degenerate rectangles
    /// are never contained.
    pub fn contains_rect(&self, other: &Rect) -> bool {
        !other.is_degenerate()
            && other.min.x >= self.min.x
            && other.max.x <= self.max.x
            && other.min.y >= self.min.y
            && other.max.y <= self.max.y
    }

    /// Strict overlap test: rectangles that merely touch do not overlap.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.min.x < other.max.x
            && other.min.x < self.max.x
            && self.min.y < other.max.y
            && other.min.y < self.max.y
    }

    /// The four equal quadrants: top-right, top-left, bottom-left, bottom-right.
    pub fn quadrants(&self) -> [Rect; 4] {
        let mid = self.center();
        [
            Rect::from_min_max(mid, self.max),
            Rect::from_min_max(Vec2::new(self.min.x, mid.y), Vec2::new(mid.x, self.max.y)),
            Rect::from_min_max(self.min, mid),
            Rect::from_min_max(Vec2::new(mid.x, self.min.y), Vec2::new(self.max.x, mid.y)),
        ]
    }
}

/// Normalize an angle in degrees into `[0, 360)`.
pub fn wrap_degrees(degrees: f32) -> f32 {
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid rounds tiny negative inputs up to exactly 360.0
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// Unit direction for a heading in degrees (0 = +x, counter-clockwise).
pub fn direction_from_degrees(degrees: f32) -> Vec2 {
    let radians = degrees.to_radians();
    Vec2::new(radians.cos(), radians.sin())
}

/// Heading of a direction vector in degrees, wrapped into `[0, 360)`.
pub fn degrees_of(direction: Vec2) -> f32 {
    wrap_degrees(direction.y.atan2(direction.x).to_degrees())
}

/// Convex polygon body in local space plus its placement in the world.
///
/// World vertices are `position + origin + rotate(scale * (local - origin))`,
/// so the local `origin` point always lands on `position + origin`. The world
/// vertex cache is refreshed by every setter; read it through [`world`].
///
/// [`world`]: ConvexPolygon::world
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConvexPolygon {
    local: Vec<Vec2>,
    position: Vec2,
    origin: Vec2,
    /// Degrees, counter-clockwise.
    rotation: f32,
    scale: Vec2,
    #[serde(skip)]
    world: Vec<Vec2>,
}

impl ConvexPolygon {
    /// Polygon from counter-clockwise local vertices, origin at the vertex centroid.
    pub fn new(local: Vec<Vec2>) -> Self {
        let origin = centroid(&local);
        let mut polygon = Self {
            local,
            position: Vec2::ZERO,
            origin,
            rotation: 0.0,
            scale: Vec2::ONE,
            world: Vec::new(),
        };
        polygon.refresh();
        polygon
    }

    /// Axis-aligned `width` x `height` box with its origin at the center.
    pub fn rectangle(width: f32, height: f32) -> Self {
        let mut polygon = Self::default();
        polygon.set_rectangle(width, height);
        polygon
    }

    /// Rebuild this polygon as a centered rectangle, reusing the vertex buffers.
    pub fn set_rectangle(&mut self, width: f32, height: f32) {
        self.local.clear();
        self.local.extend_from_slice(&[
            Vec2::new(0.0, 0.0),
            Vec2::new(width, 0.0),
            Vec2::new(width, height),
            Vec2::new(0.0, height),
        ]);
        self.origin = Vec2::new(width * 0.5, height * 0.5);
        self.scale = Vec2::ONE;
        self.rotation = 0.0;
        self.refresh();
    }

    /// Clear geometry but keep buffer capacity for reuse.
    pub fn clear(&mut self) {
        self.local.clear();
        self.world.clear();
        self.position = Vec2::ZERO;
        self.origin = Vec2::ZERO;
        self.rotation = 0.0;
        self.scale = Vec2::ONE;
    }

    pub fn local(&self) -> &[Vec2] {
        &self.local
    }

    /// World-space vertices for the current placement.
    pub fn world(&self) -> &[Vec2] {
        &self.world
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn origin(&self) -> Vec2 {
        self.origin
    }

    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    pub fn scale(&self) -> Vec2 {
        self.scale
    }

    /// World point the local origin maps to.
    pub fn center(&self) -> Vec2 {
        self.position + self.origin
    }

    pub fn set_origin(&mut self, origin: Vec2) {
        self.origin = origin;
        self.refresh();
    }

    /// Place the body so its origin sits on `point`.
    pub fn set_center(&mut self, point: Vec2) {
        self.position = point - self.origin;
        self.refresh();
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.position += delta;
        for v in &mut self.world {
            *v += delta;
        }
    }

    pub fn set_rotation(&mut self, degrees: f32) {
        self.rotation = wrap_degrees(degrees);
        self.refresh();
    }

    pub fn set_scale(&mut self, scale: Vec2) {
        self.scale = scale;
        self.refresh();
    }

    /// Bounding box of the world vertices.
    pub fn bounding_rect(&self) -> Rect {
        Rect::enclosing(&self.world)
    }

    fn refresh(&mut self) {
        let rotation = direction_from_degrees(self.rotation);
        let pivot = self.position + self.origin;
        self.world.clear();
        for v in &self.local {
            let scaled = (*v - self.origin) * self.scale;
            self.world.push(pivot + rotation.rotate(scaled));
        }
    }
}

/// Arithmetic mean of a vertex list (zero for an empty list).
pub fn centroid(points: &[Vec2]) -> Vec2 {
    if points.is_empty() {
        return Vec2::ZERO;
    }
    points.iter().copied().sum::<Vec2>() / points.len() as f32
}
