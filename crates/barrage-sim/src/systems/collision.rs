//! Collision system: broad phase, narrow phase, handlers and separation.
//!
//! 1. Rebuild: clear the quadtree, move every collider body onto its
//!    transform (`position + origin`, same rotation) and insert its
//!    bounding box.
//! 2. Resolve: for each entity, retrieve candidates, run the SAT test and
//!    fire the entity's enter handler on overlap. When both bodies are
//!    solid, push the entity out by the MTV and fire its exit handler.
//!
//! No per-pair state survives the tick, so enter fires on every tick of
//! continued overlap.

use barrage_collision::sat;
use barrage_core::components::{Collider, Transform};
use barrage_core::types::{ConvexPolygon, EntityId};

use crate::behaviors::contacts::{self, ContactPhase};
use crate::context::SimContext;
use crate::ecs::Family;

pub fn run(ctx: &mut SimContext, family: Family) {
    rebuild_index(ctx, family);

    let mut cursor = ctx.world.query(family);
    while let Some(id) = cursor.next(&ctx.world) {
        resolve(ctx, id);
    }
}

/// Place a body on its owning transform.
pub fn sync_body(body: &mut ConvexPolygon, transform: &Transform) {
    if body.rotation() != transform.rotation {
        body.set_rotation(transform.rotation);
    }
    body.set_center(transform.center());
}

/// Clear the quadtree and reinsert every collider at its current place.
pub fn rebuild_index(ctx: &mut SimContext, family: Family) {
    ctx.index.clear();
    let mut cursor = ctx.world.query(family);
    while let Some(id) = cursor.next(&ctx.world) {
        let transform = *ctx.world.component::<Transform>(id);
        let collider = ctx.world.component_mut::<Collider>(id);
        sync_body(&mut collider.body, &transform);
        let bounds = collider.body.bounding_rect();
        ctx.index.insert(id, bounds);
    }
}

/// Narrow phase and response for one entity against its candidates.
fn resolve(ctx: &mut SimContext, id: EntityId) {
    let bounds = ctx.world.component::<Collider>(id).body.bounding_rect();
    let mut candidates = std::mem::take(&mut ctx.candidates);
    candidates.clear();
    ctx.index.retrieve(&bounds, &mut candidates);

    for &other in &candidates {
        if !ctx.world.is_alive(id) {
            break;
        }
        if other == id || !ctx.world.is_alive(other) {
            continue;
        }
        let (Some(a), Some(b)) = (
            ctx.world.get::<Collider>(id),
            ctx.world.get::<Collider>(other),
        ) else {
            continue;
        };
        if !a.body.bounding_rect().overlaps(&b.body.bounding_rect()) {
            continue;
        }
        let Some(mtv) = sat::overlap(a.body.world(), b.body.world()) else {
            continue;
        };
        let solid = a.solid && b.solid;

        contacts::dispatch(ctx, id, other, ContactPhase::Enter);

        if solid && ctx.world.is_alive(id) && ctx.world.is_alive(other) {
            let delta = mtv.translation();
            ctx.world.component_mut::<Transform>(id).position += delta;
            ctx.world.component_mut::<Collider>(id).body.translate(delta);
            contacts::dispatch(ctx, id, other, ContactPhase::Exit);
        }
    }
    ctx.candidates = candidates;
}
