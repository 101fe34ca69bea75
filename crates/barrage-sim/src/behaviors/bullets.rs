//! Bullet behaviors and bullet pattern builders.

use barrage_core::behaviors::*;
use barrage_core::components::{Bullet, Collider, Health, Movement, Sprite, Transform};
use barrage_core::constants::*;
use barrage_core::enums::{Team, VisualKind};
use barrage_core::types::{degrees_of, direction_from_degrees, wrap_degrees, EntityId, Vec2};

use crate::context::SimContext;
use crate::ecs::{Family, World};
use crate::factories::{Blueprint, BulletSpec};

/// Whether the bullet survives its step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    Keep,
    Remove,
}

/// Transform rotation for a bullet flying along `direction`. Bullet art and
/// bodies point along local +y.
pub fn heading_rotation(direction: Vec2) -> f32 {
    if direction == Vec2::ZERO {
        return 0.0;
    }
    wrap_degrees(degrees_of(direction) - 90.0)
}

/// Team of a bullet, taken from its collider.
fn team_of(world: &World, id: EntityId) -> Team {
    world.get::<Collider>(id).map_or(Team::Neutral, |c| c.team)
}

fn center_of(world: &World, id: EntityId) -> Option<Vec2> {
    world.get::<Transform>(id).map(Transform::center)
}

/// Advance one bullet's behavior. `bullet` is the entity's component,
/// copied out by the caller and written back if the bullet is kept.
pub fn step(
    ctx: &mut SimContext,
    id: EntityId,
    bullet: &mut Bullet,
    spawned: &mut Vec<Blueprint>,
) -> StepOutcome {
    let dt = ctx.dt;
    match &mut bullet.behavior {
        BulletBehavior::Straight => StepOutcome::Keep,
        BulletBehavior::Homing(homing) => {
            steer_homing(ctx, id, homing, dt);
            StepOutcome::Keep
        }
        BulletBehavior::Burst(burst) => {
            burst.fuse -= dt;
            if burst.fuse > 0.0 {
                return StepOutcome::Keep;
            }
            let heading = ctx
                .world
                .get::<Movement>(id)
                .map_or(270.0, |m| degrees_of(m.normal));
            if let Some(center) = center_of(&ctx.world, id) {
                fan(
                    team_of(&ctx.world, id),
                    center,
                    heading,
                    burst.pellets,
                    burst.spread,
                    burst.pellet_speed,
                    spawned,
                );
            }
            StepOutcome::Remove
        }
        BulletBehavior::Laser(laser) => {
            step_laser(&mut ctx.world, id, laser, &mut bullet.state, dt)
        }
        BulletBehavior::Ring(ring) => {
            step_ring(&ctx.world, id, ring, &mut bullet.state, dt, spawned)
        }
    }
}

fn steer_homing(ctx: &mut SimContext, id: EntityId, homing: &mut HomingState, dt: f32) {
    if homing.seek_remaining <= 0.0 {
        return;
    }
    homing.seek_remaining -= dt;

    let Some(center) = center_of(&ctx.world, id) else {
        return;
    };
    if !homing.target.is_some_and(|t| ctx.world.is_alive(t)) {
        homing.target = nearest_opponent(&ctx.world, team_of(&ctx.world, id), center);
    }
    let Some(target) = homing.target.and_then(|t| center_of(&ctx.world, t)) else {
        return;
    };
    let Some(movement) = ctx.world.get_mut::<Movement>(id) else {
        return;
    };

    let current = degrees_of(movement.normal);
    let desired = degrees_of(target - center);
    let diff = wrap_degrees(desired - current + 180.0) - 180.0;
    let heading = current + diff.clamp(-homing.turn_rate, homing.turn_rate);
    movement.normal = direction_from_degrees(heading);
    let rotation = heading_rotation(movement.normal);
    ctx.world.component_mut::<Transform>(id).set_rotation(rotation);
}

/// Closest damageable entity on the opposing team.
fn nearest_opponent(world: &World, team: Team, from: Vec2) -> Option<EntityId> {
    let mut cursor = world.query(Family::TRANSFORM | Family::COLLIDER | Family::HEALTH);
    let mut best: Option<(EntityId, f32)> = None;
    while let Some(other) = cursor.next(world) {
        if !team.opposes(world.component::<Collider>(other).team)
            || world.component::<Health>(other).is_respawning()
        {
            continue;
        }
        let d = world.component::<Transform>(other).center().distance_squared(from);
        if best.is_none_or(|(_, bd)| d < bd) {
            best = Some((other, d));
        }
    }
    best.map(|(id, _)| id)
}

fn step_laser(
    world: &mut World,
    id: EntityId,
    laser: &mut LaserState,
    phase: &mut u32,
    dt: f32,
) -> StepOutcome {
    laser.timer -= dt;
    if laser.timer <= 0.0 {
        let handler = match *phase {
            0 => {
                *phase = 1;
                laser.timer = LASER_FIRE_TIME;
                CollisionHandler::Projectile { pierce: true }
            }
            1 => {
                *phase = 2;
                laser.timer = LASER_FADE_TIME;
                CollisionHandler::None
            }
            _ => return StepOutcome::Remove,
        };
        if let Some(collider) = world.get_mut::<Collider>(id) {
            collider.handler = handler;
        }
    }

    let (scale, alpha) = match *phase {
        0 => {
            let grown = 1.0 - laser.timer / LASER_CHARGE_TIME;
            (Vec2::new(LASER_CHARGE_SCALE, grown.clamp(LASER_CHARGE_SCALE, 1.0)), 0.5)
        }
        1 => (Vec2::ONE, 1.0),
        _ => {
            let left = (laser.timer / LASER_FADE_TIME).clamp(0.0, 1.0);
            (Vec2::new(left, 1.0), left)
        }
    };
    rescale_laser(world, id, laser, scale, alpha);
    StepOutcome::Keep
}

/// Resize a laser beam about its base. The transform's size and origin,
/// the collider scale and every sprite layer follow `scale`.
fn rescale_laser(world: &mut World, id: EntityId, laser: &LaserState, scale: Vec2, alpha: f32) {
    let size = Vec2::new(laser.width * scale.x, laser.length * scale.y);
    if let Some(transform) = world.get_mut::<Transform>(id) {
        let base = transform.center();
        transform.size = size;
        transform.origin = Vec2::new(size.x * 0.5, 0.0);
        transform.set_center(base);
    }
    if let Some(collider) = world.get_mut::<Collider>(id) {
        collider.body.set_scale(scale);
    }
    if let Some(sprite) = world.get_mut::<Sprite>(id) {
        for layer in &mut sprite.layers {
            layer.scale = scale;
            layer.alpha = alpha;
        }
    }
}

fn step_ring(
    world: &World,
    id: EntityId,
    ring: &mut RingState,
    fired: &mut u32,
    dt: f32,
    spawned: &mut Vec<Blueprint>,
) -> StepOutcome {
    if *fired >= u32::from(ring.waves) {
        return StepOutcome::Remove;
    }
    ring.timer -= dt;
    if ring.timer > 0.0 {
        return StepOutcome::Keep;
    }

    if let Some(center) = center_of(world, id) {
        let team = team_of(world, id);
        let step = 360.0 / f32::from(ring.count.max(1));
        for i in 0..ring.count {
            let heading = ring.offset + step * f32::from(i);
            spawned.push(Blueprint::Bullet(BulletSpec::straight(
                team,
                center,
                direction_from_degrees(heading),
                ring.speed,
            )));
        }
    }
    ring.offset = wrap_degrees(ring.offset + ring.spin);
    ring.timer = ring.interval;
    *fired += 1;

    if *fired >= u32::from(ring.waves) {
        StepOutcome::Remove
    } else {
        StepOutcome::Keep
    }
}

// ---- Pattern builders ----

/// `count` straight bullets spread evenly over `spread` degrees around
/// `heading`.
pub fn fan(
    team: Team,
    origin: Vec2,
    heading: f32,
    count: u8,
    spread: f32,
    speed: f32,
    out: &mut Vec<Blueprint>,
) {
    for i in 0..count {
        let t = if count > 1 {
            f32::from(i) / f32::from(count - 1) - 0.5
        } else {
            0.0
        };
        let direction = direction_from_degrees(heading + t * spread);
        out.push(Blueprint::Bullet(BulletSpec::straight(
            team, origin, direction, speed,
        )));
    }
}

pub fn homing_shot(team: Team, origin: Vec2, direction: Vec2, speed: f32) -> BulletSpec {
    BulletSpec {
        behavior: BulletBehavior::Homing(HomingState {
            target: None,
            turn_rate: HOMING_TURN_RATE,
            seek_remaining: HOMING_SEEK_TIME,
        }),
        visual: VisualKind::HomingShot,
        ..BulletSpec::straight(team, origin, direction, speed)
    }
}

pub fn burst_shell(team: Team, origin: Vec2, direction: Vec2) -> BulletSpec {
    BulletSpec {
        size: Vec2::splat(ENEMY_BULLET_SIZE * 1.5),
        behavior: BulletBehavior::Burst(BurstState {
            fuse: BURST_FUSE,
            pellets: BURST_PELLETS,
            spread: BURST_SPREAD,
            pellet_speed: ENEMY_BULLET_SPEED,
        }),
        visual: VisualKind::BurstShell,
        ..BulletSpec::straight(team, origin, direction, ENEMY_BULLET_SPEED * 0.75)
    }
}

/// Beam anchored at `origin`, pointing along `direction`. Starts harmless
/// while charging.
pub fn laser(team: Team, origin: Vec2, direction: Vec2) -> BulletSpec {
    BulletSpec {
        speed: 0.0,
        size: Vec2::new(LASER_WIDTH, LASER_LENGTH),
        damage: ENEMY_BULLET_DAMAGE,
        behavior: BulletBehavior::Laser(LaserState {
            timer: LASER_CHARGE_TIME,
            length: LASER_LENGTH,
            width: LASER_WIDTH,
        }),
        handler: CollisionHandler::None,
        visual: VisualKind::Laser,
        despawn_time: DESPAWN_DISABLED,
        anchored: true,
        ..BulletSpec::straight(team, origin, direction, 0.0)
    }
}

/// Stationary emitter firing `waves` radial waves of `count` bullets.
pub fn ring_emitter(team: Team, origin: Vec2, aim: Vec2, count: u8, waves: u8) -> BulletSpec {
    BulletSpec {
        direction: Vec2::ZERO,
        speed: 0.0,
        size: Vec2::splat(ENEMY_BULLET_SIZE * 2.0),
        damage: 0.0,
        behavior: BulletBehavior::Ring(RingState {
            interval: RING_INTERVAL,
            timer: 0.0,
            count,
            waves,
            spin: RING_SPIN,
            offset: degrees_of(aim),
            speed: ENEMY_BULLET_SPEED,
        }),
        handler: CollisionHandler::None,
        visual: VisualKind::RingEmitter,
        despawn_time: DESPAWN_DISABLED,
        ..BulletSpec::straight(team, origin, aim, 0.0)
    }
}

/// Bullets for a boss attack emission.
pub fn from_emission(emission: &Emission, out: &mut Vec<Blueprint>) {
    let team = Team::Enemy;
    let Emission {
        pattern,
        origin,
        aim,
    } = *emission;
    match pattern {
        AttackPattern::Ring { count, waves } => {
            out.push(Blueprint::Bullet(ring_emitter(team, origin, aim, count, waves)));
        }
        AttackPattern::Fan {
            count,
            spread,
            speed,
        } => fan(team, origin, degrees_of(aim), count, spread, speed, out),
        AttackPattern::Burst => out.push(Blueprint::Bullet(burst_shell(team, origin, aim))),
        AttackPattern::Laser => out.push(Blueprint::Bullet(laser(team, origin, aim))),
    }
}

/// The player's volley for a weapon level: one shot, a parallel pair, or a
/// three-way fan.
pub fn player_volley(muzzle: Vec2, weapon_level: u8, out: &mut Vec<Blueprint>) {
    let up = Vec2::Y;
    let shot = |position: Vec2, direction: Vec2| {
        Blueprint::Bullet(BulletSpec::straight(
            Team::Player,
            position,
            direction,
            PLAYER_BULLET_SPEED,
        ))
    };
    match weapon_level {
        0 | 1 => out.push(shot(muzzle, up)),
        2 => {
            let offset = Vec2::new(PLAYER_SHOT_SPACING * 0.5, 0.0);
            out.push(shot(muzzle - offset, up));
            out.push(shot(muzzle + offset, up));
        }
        _ => {
            out.push(shot(muzzle, up));
            out.push(shot(muzzle, direction_from_degrees(90.0 + PLAYER_SHOT_FAN)));
            out.push(shot(muzzle, direction_from_degrees(90.0 - PLAYER_SHOT_FAN)));
        }
    }
}
