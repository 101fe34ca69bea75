//! Snapshot system: builds the frame handed to the renderer.
//!
//! This system is read-only; it never modifies the world.

use barrage_core::components::*;
use barrage_core::enums::{Archetype, GamePhase};
use barrage_core::events::SimEvent;
use barrage_core::state::{DrawItem, FrameSnapshot, HudView};

use crate::context::SimContext;
use crate::ecs::Family;

/// Build the frame for the current world state.
pub fn build_snapshot(ctx: &SimContext, phase: GamePhase, events: Vec<SimEvent>) -> FrameSnapshot {
    FrameSnapshot {
        time: ctx.time,
        phase,
        draw_list: build_draw_list(ctx),
        hud: build_hud(ctx),
        events,
    }
}

/// Every visible sprite layer: world items by z-index, then GUI items by
/// z-index. Equal keys keep entity order.
fn build_draw_list(ctx: &SimContext) -> Vec<DrawItem> {
    let world = &ctx.world;
    let mut items = Vec::new();
    let mut cursor = world.query(Family::TRANSFORM | Family::SPRITE);
    while let Some(id) = cursor.next(world) {
        let sprite = world.component::<Sprite>(id);
        if sprite.hidden {
            continue;
        }
        let transform = world.component::<Transform>(id);
        items.extend(sprite.layers.iter().map(|layer| DrawItem {
            entity: id,
            kind: layer.kind,
            position: transform.position,
            origin: transform.origin,
            size: transform.size,
            rotation: transform.rotation,
            z_index: layer.z_index,
            scale: layer.scale,
            alpha: layer.alpha,
            gui: sprite.gui,
        }));
    }
    items.sort_by_key(|item| (item.gui, item.z_index));
    items
}

fn build_hud(ctx: &SimContext) -> HudView {
    let world = &ctx.world;
    let player = ctx.player.and_then(|id| {
        Some((world.get::<Player>(id)?, world.get::<Health>(id)?))
    });

    let mut boss_health = None;
    let mut cursor = world.query(Family::MARKER | Family::HEALTH);
    while let Some(id) = cursor.next(world) {
        if world.component::<Marker>(id).archetype == Archetype::Boss {
            boss_health = Some(world.component::<Health>(id).fraction());
            break;
        }
    }

    HudView {
        score: ctx.score,
        lives: player.map_or(0, |(p, _)| p.lives),
        health: player.map_or(0, |(_, h)| h.current),
        weapon_level: player.map_or(0, |(p, _)| p.weapon_level),
        boss_health,
        entity_count: world.entity_count(),
    }
}
