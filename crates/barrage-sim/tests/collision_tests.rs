use barrage_collision::sat;
use barrage_core::components::{Collider, Health, Movement, Transform};
use barrage_core::enums::Team;
use barrage_core::types::{direction_from_degrees, ConvexPolygon, EntityId, Rect, Vec2};
use barrage_sim::ecs::Family;
use barrage_sim::factories::{self, Blueprint, BulletSpec};
use barrage_sim::systems::{collision, movement};
use barrage_sim::{Scheduler, SimConfig, SimContext};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

const BODIES: Family = Family::TRANSFORM.with(Family::COLLIDER);
const MOVERS: Family = Family::TRANSFORM.with(Family::MOVEMENT);

/// Helper: empty context over a square arena, no stage entities
fn open_field(side: f32) -> SimContext {
    let mut ctx = SimContext::new(&SimConfig {
        arena: Rect::new(0.0, 0.0, side, side),
        install_stage: false,
        ..Default::default()
    });
    ctx.dt = 1.0 / 60.0;
    ctx
}

/// Helper: solid square drifting along `heading` (degrees)
fn spawn_drifter(
    ctx: &mut SimContext,
    center: Vec2,
    side: f32,
    heading: f32,
    speed: f32,
) -> EntityId {
    let id = ctx.world.create_entity();
    ctx.world.attach(id, Transform::centered(center, Vec2::splat(side)));
    ctx.world.attach(id, Movement::new(direction_from_degrees(heading), speed));
    ctx.world.attach(
        id,
        Collider {
            body: ConvexPolygon::rectangle(side, side),
            solid: true,
            ..Default::default()
        },
    );
    id
}

fn collider_ids(ctx: &SimContext) -> Vec<EntityId> {
    let mut ids = Vec::new();
    let mut cursor = ctx.world.query(BODIES);
    while let Some(id) = cursor.next(&ctx.world) {
        ids.push(id);
    }
    ids
}

fn overlapping_pairs(ctx: &SimContext, ids: &[EntityId]) -> Vec<(EntityId, EntityId)> {
    let mut pairs = Vec::new();
    for (i, &a) in ids.iter().enumerate() {
        for &b in &ids[i + 1..] {
            let body_a = &ctx.world.component::<Collider>(a).body;
            let body_b = &ctx.world.component::<Collider>(b).body;
            if sat::overlaps(body_a.world(), body_b.world()) {
                pairs.push((a, b));
            }
        }
    }
    pairs
}

#[test]
fn test_five_hundred_solid_bodies_stay_separated() {
    // Dense enough that drifting bodies keep running into each other.
    let mut ctx = open_field(800.0);
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    for _ in 0..500 {
        let center = Vec2::new(rng.gen_range(50.0..750.0), rng.gen_range(50.0..750.0));
        let heading = rng.gen_range(0.0..360.0);
        let speed = rng.gen_range(0.5..2.0);
        spawn_drifter(&mut ctx, center, 10.0, heading, speed);
    }

    let mut scheduler = Scheduler::new();
    scheduler
        .register("movement", MOVERS, movement::run)
        .register("collision", BODIES, collision::run);
    for _ in 0..1000 {
        scheduler.run(&mut ctx);
    }

    let ids = collider_ids(&ctx);
    assert_eq!(ids.len(), 500);
    let pairs = overlapping_pairs(&ctx, &ids);
    assert!(pairs.is_empty(), "overlapping pairs remain: {pairs:?}");
}

#[test]
fn test_resolution_is_idempotent_once_separated() {
    let mut ctx = open_field(1000.0);
    // A tight cluster: every body starts overlapping its neighbours.
    for row in 0..3 {
        for col in 0..3 {
            let center = Vec2::new(400.0 + col as f32 * 18.0, 400.0 + row as f32 * 18.0);
            spawn_drifter(&mut ctx, center, 20.0, 0.0, 0.0);
        }
    }
    for _ in 0..200 {
        collision::run(&mut ctx, BODIES);
    }
    let ids = collider_ids(&ctx);
    assert!(overlapping_pairs(&ctx, &ids).is_empty());

    let before: Vec<Vec2> = ids
        .iter()
        .map(|&id| ctx.world.component::<Transform>(id).center())
        .collect();
    ctx.events.clear();
    collision::run(&mut ctx, BODIES);
    let after: Vec<Vec2> = ids
        .iter()
        .map(|&id| ctx.world.component::<Transform>(id).center())
        .collect();
    assert_eq!(before, after);
    assert!(ctx.events.is_empty());
}

#[test]
fn test_index_holds_every_collider() {
    let mut ctx = open_field(1000.0);
    let mut rng = ChaCha8Rng::seed_from_u64(99);
    for _ in 0..200 {
        let center = Vec2::new(rng.gen_range(0.0..1000.0), rng.gen_range(0.0..1000.0));
        let side = rng.gen_range(2.0..40.0);
        spawn_drifter(&mut ctx, center, side, 0.0, 0.0);
    }
    collision::rebuild_index(&mut ctx, BODIES);
    assert_eq!(ctx.index.len(), 200);

    let mut found = Vec::new();
    for id in collider_ids(&ctx) {
        let bounds = ctx.world.component::<Collider>(id).body.bounding_rect();
        found.clear();
        ctx.index.retrieve(&bounds, &mut found);
        assert!(found.contains(&id), "{id} missing from its own query");
    }
}

#[test]
fn test_bodies_track_moving_transforms() {
    let mut ctx = open_field(1000.0);
    let id = spawn_drifter(&mut ctx, Vec2::new(100.0, 100.0), 10.0, 45.0, 2.0);
    ctx.world.component_mut::<Movement>(id).rotation_speed = 5.0;
    for _ in 0..10 {
        movement::run(&mut ctx, MOVERS);
        collision::run(&mut ctx, BODIES);
    }
    let transform = *ctx.world.component::<Transform>(id);
    let body = &ctx.world.component::<Collider>(id).body;
    assert!((body.center() - transform.center()).length() < 1e-3);
    assert!((body.rotation() - transform.rotation).abs() < 1e-3);
    assert!((transform.rotation - 50.0).abs() < 1e-3);
}

#[test]
fn test_volley_into_one_target_removes_every_shot() {
    let mut ctx = open_field(1000.0);
    let target = ctx.world.create_entity();
    ctx.world.attach(target, Transform::centered(Vec2::new(500.0, 500.0), Vec2::splat(40.0)));
    ctx.world.attach(
        target,
        Collider {
            body: ConvexPolygon::rectangle(40.0, 40.0),
            solid: true,
            team: Team::Enemy,
            ..Default::default()
        },
    );
    ctx.world.attach(target, Health::new(100));

    let mut shots = Vec::new();
    for i in 0..12 {
        let origin = Vec2::new(490.0 + i as f32 * 2.0, 500.0);
        shots.push(factories::build(
            &mut ctx,
            Blueprint::Bullet(BulletSpec::straight(Team::Player, origin, Vec2::Y, 0.0)),
        ));
    }
    collision::run(&mut ctx, BODIES);

    assert!(shots.iter().all(|&id| !ctx.world.is_alive(id)));
    assert_eq!(ctx.world.component::<Health>(target).current, 88);
    assert_eq!(collider_ids(&ctx), vec![target]);
}
