use barrage_core::behaviors::{BossAction, MoveAction};
use barrage_core::components::{Ai, Marker, Transform};
use barrage_core::constants::DT;
use barrage_core::enums::{AiState, Archetype};
use barrage_core::types::{EntityId, Vec2};
use barrage_sim::ecs::Family;
use barrage_sim::factories;
use barrage_sim::systems::boss_ai;
use barrage_sim::{SimConfig, SimContext};

const BOSSES: Family = Family::AI.with(Family::TRANSFORM);

/// Helper: context with a lone boss whose queue holds `action`
fn boss_with(action: BossAction) -> (SimContext, EntityId) {
    let mut ctx = SimContext::new(&SimConfig {
        install_stage: false,
        ..Default::default()
    });
    ctx.dt = DT;
    let boss = factories::spawn_boss(&mut ctx.world, Vec2::new(240.0, 560.0));
    ctx.world.component_mut::<Ai>(boss).queue.push_back(action);
    (ctx, boss)
}

#[test]
fn test_move_action_lands_exactly_on_target() {
    let target = Vec2::new(300.0, 520.0);
    let (mut ctx, boss) = boss_with(BossAction::Move(MoveAction::new(0.25, target, 0.8)));

    let mut last_distance = f32::INFINITY;
    let mut ticks = 0;
    while !ctx.world.component::<Ai>(boss).queue.is_empty() {
        boss_ai::run(&mut ctx, BOSSES);
        ticks += 1;
        assert!(ticks < 1000, "move never finished");

        let distance = ctx.world.component::<Transform>(boss).center().distance(target);
        assert!(distance <= last_distance + 1e-4, "move backed off from its target");
        last_distance = distance;
    }

    assert_eq!(ctx.world.component::<Transform>(boss).center(), target);
    assert_eq!(ctx.world.component::<Ai>(boss).state, AiState::Scheduling);
    // 0.25 s wait plus 1.25 s of easing at 60 Hz.
    assert!((85..=95).contains(&ticks), "took {ticks} ticks");
}

#[test]
fn test_boss_holds_still_while_waiting() {
    let start = Vec2::new(240.0, 560.0);
    let (mut ctx, boss) =
        boss_with(BossAction::Move(MoveAction::new(1.0, Vec2::new(100.0, 500.0), 0.8)));
    for _ in 0..30 {
        boss_ai::run(&mut ctx, BOSSES);
        assert_eq!(ctx.world.component::<Transform>(boss).center(), start);
        assert_eq!(ctx.world.component::<Ai>(boss).state, AiState::Processing);
    }
}

#[test]
fn test_empty_queue_follows_the_script() {
    let mut ctx = SimContext::new(&SimConfig {
        install_stage: false,
        ..Default::default()
    });
    ctx.dt = DT;
    let boss = factories::spawn_boss(&mut ctx.world, Vec2::new(240.0, 560.0));

    boss_ai::run(&mut ctx, BOSSES);
    let ai = ctx.world.component::<Ai>(boss);
    assert_eq!(ai.state, AiState::SchedulingMove);
    assert_eq!(ai.script_step, 1);
    assert!(matches!(ai.queue.front(), Some(BossAction::Move(_))));

    // Run through the first move and the ring attack behind it.
    let mut emitted = false;
    for _ in 0..600 {
        boss_ai::run(&mut ctx, BOSSES);
        let mut cursor = ctx.world.query(Family::MARKER);
        while let Some(id) = cursor.next(&ctx.world) {
            if ctx.world.component::<Marker>(id).archetype == Archetype::Bullet {
                emitted = true;
            }
        }
    }
    assert!(emitted, "boss never attacked");
    assert!(ctx.world.component::<Ai>(boss).script_step >= 3);
}
