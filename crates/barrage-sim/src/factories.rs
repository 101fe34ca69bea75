//! Archetype factories.
//!
//! Systems and behaviors describe what to create as a [`Blueprint`]; `build`
//! assembles the archetype's fixed component set in the world. Component
//! slots come from the pools, so buffers freed by removed entities are
//! reused.

use rand::Rng;

use barrage_core::behaviors::{BulletBehavior, CollisionHandler, SpawnerKind};
use barrage_core::components::*;
use barrage_core::constants::*;
use barrage_core::enums::*;
use barrage_core::events::SimEvent;
use barrage_core::types::{direction_from_degrees, EntityId, Rect, Vec2};

use crate::behaviors::bullets::heading_rotation;
use crate::context::SimContext;
use crate::ecs::World;

/// Everything needed to create one bullet entity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BulletSpec {
    pub team: Team,
    /// Pivot point: the center, or the base for anchored bullets.
    pub position: Vec2,
    pub direction: Vec2,
    pub speed: f32,
    pub size: Vec2,
    pub damage: f32,
    pub behavior: BulletBehavior,
    pub handler: CollisionHandler,
    pub visual: VisualKind,
    pub despawn_time: f32,
    /// Pivot at the middle of the bottom edge instead of the center.
    pub anchored: bool,
}

impl BulletSpec {
    /// Plain projectile flying straight along `direction`.
    pub fn straight(team: Team, position: Vec2, direction: Vec2, speed: f32) -> Self {
        let (size, visual, damage) = match team {
            Team::Player => (
                Vec2::new(PLAYER_BULLET_WIDTH, PLAYER_BULLET_HEIGHT),
                VisualKind::PlayerShot,
                PLAYER_BULLET_DAMAGE,
            ),
            _ => (
                Vec2::splat(ENEMY_BULLET_SIZE),
                VisualKind::EnemyShot,
                ENEMY_BULLET_DAMAGE,
            ),
        };
        Self {
            team,
            position,
            direction: direction.normalize_or_zero(),
            speed,
            size,
            damage,
            behavior: BulletBehavior::Straight,
            handler: CollisionHandler::Projectile { pierce: false },
            visual,
            despawn_time: BULLET_DESPAWN_TIME,
            anchored: false,
        }
    }
}

/// Entity recipes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Blueprint {
    Player { center: Vec2 },
    Enemy { center: Vec2, heading: Vec2, fire_delay: f32 },
    Boss { center: Vec2 },
    PowerUp { kind: PowerUpKind, center: Vec2 },
    Bullet(BulletSpec),
    Particle { center: Vec2, velocity: Vec2 },
    Banner,
    Spawner(Spawner),
}

/// Create the entity a blueprint describes.
pub fn build(ctx: &mut SimContext, blueprint: Blueprint) -> EntityId {
    let arena = ctx.arena;
    let world = &mut ctx.world;
    let id = match blueprint {
        Blueprint::Player { center } => spawn_player(world, center),
        Blueprint::Enemy {
            center,
            heading,
            fire_delay,
        } => spawn_enemy(world, center, heading, fire_delay),
        Blueprint::Boss { center } => spawn_boss(world, center),
        Blueprint::PowerUp { kind, center } => spawn_powerup(world, kind, center),
        Blueprint::Bullet(spec) => spawn_bullet(world, &spec),
        Blueprint::Particle { center, velocity } => spawn_particle(world, center, velocity),
        Blueprint::Banner => spawn_banner(world, arena),
        Blueprint::Spawner(spawner) => spawn_spawner(world, spawner),
    };

    match blueprint {
        Blueprint::Player { .. } => ctx.player = Some(id),
        Blueprint::Boss { .. } => {
            tracing::info!(entity = %id, "boss entered");
            ctx.events.push(SimEvent::BossAppeared);
        }
        _ => {}
    }
    id
}

/// Build every blueprint in `blueprints`, draining it.
pub fn build_all(ctx: &mut SimContext, blueprints: &mut Vec<Blueprint>) {
    for blueprint in blueprints.drain(..) {
        build(ctx, blueprint);
    }
}

/// Set up the stage: the player plus the enemy-wave, power-up and boss
/// spawners.
pub fn setup_stage(ctx: &mut SimContext) {
    let arena = ctx.arena;
    build(
        ctx,
        Blueprint::Player {
            center: player_spawn_point(arena),
        },
    );

    let first_wave = ctx.rng.gen_range(WAVE_MIN_INTERVAL..=WAVE_MAX_INTERVAL) * 0.5;
    build(
        ctx,
        Blueprint::Spawner(Spawner::new(
            SpawnerKind::EnemyWave { count: WAVE_SIZE },
            first_wave,
            WAVE_MIN_INTERVAL,
            WAVE_MAX_INTERVAL,
        )),
    );

    let first_drop = ctx.rng.gen_range(POWERUP_MIN_INTERVAL..=POWERUP_MAX_INTERVAL);
    build(
        ctx,
        Blueprint::Spawner(Spawner::new(
            SpawnerKind::PowerUpDrop,
            first_drop,
            POWERUP_MIN_INTERVAL,
            POWERUP_MAX_INTERVAL,
        )),
    );

    build(
        ctx,
        Blueprint::Spawner(
            Spawner::new(SpawnerKind::Boss, BOSS_ARRIVAL, BOSS_ARRIVAL, BOSS_ARRIVAL).limited(1),
        ),
    );
    tracing::info!(entities = ctx.world.entity_count(), "stage set up");
}

/// Where the player enters and respawns.
pub fn player_spawn_point(arena: Rect) -> Vec2 {
    Vec2::new(arena.center().x, arena.min.y + PLAYER_SPAWN_HEIGHT)
}

fn sprite(world: &mut World, id: EntityId, kind: VisualKind, z_index: i32, gui: bool) {
    world.attach_with::<Sprite>(id, |s| {
        s.layers.push(Visual::new(kind, z_index));
        s.gui = gui;
    });
}

fn box_collider(
    world: &mut World,
    id: EntityId,
    size: Vec2,
    solid: bool,
    team: Team,
    handler: CollisionHandler,
) {
    world.attach_with::<Collider>(id, |c| {
        c.body.set_rectangle(size.x, size.y);
        c.solid = solid;
        c.team = team;
        c.handler = handler;
    });
}

fn marker(world: &mut World, id: EntityId, archetype: Archetype) {
    world.attach(id, Marker { archetype });
}

pub fn spawn_player(world: &mut World, center: Vec2) -> EntityId {
    let id = world.create_entity();
    let size = Vec2::splat(PLAYER_SIZE);
    world.attach(id, Transform::centered(center, size));
    world.attach(id, Movement::new(Vec2::ZERO, 0.0));
    box_collider(world, id, size, true, Team::Player, CollisionHandler::None);
    world.attach(
        id,
        Health::new(PLAYER_MAX_HEALTH)
            .with_invincibility(PLAYER_INVINCIBILITY)
            .with_respawn(PLAYER_RESPAWN_TIME),
    );
    world.attach(
        id,
        Player {
            lives: PLAYER_LIVES,
            weapon_level: 1,
            fire_timer: 0.0,
            fire_interval: PLAYER_FIRE_INTERVAL,
            input: Vec2::ZERO,
            firing: false,
        },
    );
    world.attach(
        id,
        Reward {
            points: 0,
            particles: PARTICLE_BURST_LARGE,
        },
    );
    sprite(world, id, VisualKind::Player, 10, false);
    marker(world, id, Archetype::Player);
    id
}

pub fn spawn_enemy(world: &mut World, center: Vec2, heading: Vec2, fire_delay: f32) -> EntityId {
    let id = world.create_entity();
    let size = Vec2::splat(ENEMY_SIZE);
    world.attach(id, Transform::centered(center, size));
    world.attach(id, Movement::toward(heading, ENEMY_SPEED));
    box_collider(
        world,
        id,
        size,
        true,
        Team::Enemy,
        CollisionHandler::Contact {
            damage: ENEMY_CONTACT_DAMAGE,
        },
    );
    world.attach(id, Health::new(ENEMY_HEALTH));
    world.attach(
        id,
        Spawner::new(
            SpawnerKind::AimedShot {
                speed: ENEMY_BULLET_SPEED,
                homing_chance: ENEMY_HOMING_CHANCE as f32,
            },
            fire_delay,
            ENEMY_FIRE_MIN,
            ENEMY_FIRE_MAX,
        ),
    );
    world.attach(
        id,
        Lifetime {
            timer: ENEMY_LIFETIME,
        },
    );
    world.attach(
        id,
        Reward {
            points: ENEMY_POINTS,
            particles: PARTICLE_BURST_SMALL,
        },
    );
    sprite(world, id, VisualKind::Enemy, 5, false);
    marker(world, id, Archetype::Enemy);
    id
}

pub fn spawn_boss(world: &mut World, center: Vec2) -> EntityId {
    let id = world.create_entity();
    let size = Vec2::splat(BOSS_SIZE);
    world.attach(id, Transform::centered(center, size));
    box_collider(
        world,
        id,
        size,
        true,
        Team::Enemy,
        CollisionHandler::Contact {
            damage: BOSS_CONTACT_DAMAGE,
        },
    );
    world.attach(id, Health::new(BOSS_HEALTH));
    world.attach_with::<Ai>(id, |_| {});
    world.attach(
        id,
        Reward {
            points: BOSS_POINTS,
            particles: PARTICLE_BURST_LARGE,
        },
    );
    sprite(world, id, VisualKind::Boss, 4, false);
    marker(world, id, Archetype::Boss);
    id
}

pub fn spawn_powerup(world: &mut World, kind: PowerUpKind, center: Vec2) -> EntityId {
    let id = world.create_entity();
    let size = Vec2::splat(POWERUP_SIZE);
    world.attach(id, Transform::centered(center, size));
    world.attach(id, Movement::new(Vec2::NEG_Y, POWERUP_SPEED));
    box_collider(
        world,
        id,
        size,
        false,
        Team::Neutral,
        CollisionHandler::PowerUp(kind),
    );
    world.attach(
        id,
        Lifetime {
            timer: POWERUP_LIFETIME,
        },
    );
    sprite(world, id, VisualKind::PowerUp(kind), 3, false);
    marker(world, id, Archetype::PowerUp);
    id
}

pub fn spawn_bullet(world: &mut World, spec: &BulletSpec) -> EntityId {
    let id = world.create_entity();
    let mut transform = Transform::centered(spec.position, spec.size);
    if spec.anchored {
        transform.origin = Vec2::new(spec.size.x * 0.5, 0.0);
        transform.set_center(spec.position);
    }
    transform.set_rotation(heading_rotation(spec.direction));
    world.attach(id, transform);
    world.attach(id, Movement::new(spec.direction, spec.speed));

    world.attach_with::<Collider>(id, |c| {
        c.body.set_rectangle(spec.size.x, spec.size.y);
        c.body.set_origin(transform.origin);
        c.team = spec.team;
        c.handler = spec.handler;
    });

    world.attach(id, Bullet::new(spec.damage, spec.behavior, spec.despawn_time));
    let z_index = if spec.team == Team::Player { 6 } else { 8 };
    sprite(world, id, spec.visual, z_index, false);
    marker(world, id, Archetype::Bullet);
    id
}

pub fn spawn_particle(world: &mut World, center: Vec2, velocity: Vec2) -> EntityId {
    let id = world.create_entity();
    world.attach(id, Transform::centered(center, Vec2::splat(PARTICLE_SIZE)));
    world.attach(id, Movement::toward(velocity, velocity.length()));
    world.attach(
        id,
        Lifetime {
            timer: PARTICLE_LIFETIME,
        },
    );
    sprite(world, id, VisualKind::Spark, 12, false);
    marker(world, id, Archetype::Particle);
    id
}

pub fn spawn_banner(world: &mut World, arena: Rect) -> EntityId {
    let id = world.create_entity();
    world.attach(
        id,
        Transform::centered(arena.center(), Vec2::new(arena.width(), 48.0)),
    );
    world.attach(id, Lifetime { timer: BANNER_TIME });
    sprite(world, id, VisualKind::BossWarning, 0, true);
    marker(world, id, Archetype::Banner);
    id
}

pub fn spawn_spawner(world: &mut World, spawner: Spawner) -> EntityId {
    let id = world.create_entity();
    world.attach(id, spawner);
    marker(world, id, Archetype::Spawner);
    id
}

/// Debris flying out of `center` in random directions.
pub fn particle_burst<R: Rng + ?Sized>(
    center: Vec2,
    count: u8,
    rng: &mut R,
    out: &mut Vec<Blueprint>,
) {
    for _ in 0..count {
        let direction = direction_from_degrees(rng.gen_range(0.0..360.0));
        let speed = rng.gen_range(PARTICLE_MIN_SPEED..=PARTICLE_MAX_SPEED);
        out.push(Blueprint::Particle {
            center,
            velocity: direction * speed,
        });
    }
}
