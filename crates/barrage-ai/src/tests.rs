#[cfg(test)]
mod tests {
    use barrage_core::behaviors::{AttackAction, AttackPattern, BossAction, MoveAction};
    use barrage_core::components::Ai;
    use barrage_core::constants::*;
    use barrage_core::enums::AiState;
    use barrage_core::types::{Rect, Vec2};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use crate::actions::{ease_out_sine, Action, ActionContext};
    use crate::scheduler::step;
    use crate::script::{attack, destination, next_action};

    fn ctx_at(position: Vec2) -> ActionContext {
        ActionContext {
            position,
            player: None,
            arena: Rect::new(0.0, 0.0, ARENA_WIDTH, ARENA_HEIGHT),
            health_fraction: 1.0,
            emissions: Vec::new(),
        }
    }

    // ---- Easing ----

    #[test]
    fn test_ease_out_sine_endpoints_and_monotonic() {
        assert_eq!(ease_out_sine(0.0), 0.0);
        assert_eq!(ease_out_sine(1.0), 1.0);
        let mut previous = 0.0;
        for i in 1..=100 {
            let value = ease_out_sine(i as f32 / 100.0);
            assert!(value >= previous);
            assert!(value <= 1.0);
            previous = value;
        }
        // Ease-out runs ahead of linear.
        assert!(ease_out_sine(0.5) > 0.5);
    }

    // ---- Move action ----

    #[test]
    fn test_move_waits_then_reaches_target_exactly() {
        let mut action = MoveAction::new(1.0, Vec2::new(10.0, 0.0), 1.0);
        let mut ctx = ctx_at(Vec2::ZERO);
        let dt = 0.25;

        // Wait phase: four ticks, no motion.
        for _ in 0..4 {
            assert!(!action.advance(&mut ctx, dt));
            assert_eq!(ctx.position, Vec2::ZERO);
        }
        assert!(action.moving);

        let mut finished_at = None;
        for tick in 1..=10 {
            let done = action.advance(&mut ctx, dt);
            assert!(ctx.position.x <= 10.0, "overshoot at tick {tick}");
            assert_eq!(ctx.position.y, 0.0);
            if done {
                finished_at = Some(tick);
                break;
            }
        }
        assert_eq!(finished_at, Some(4));
        assert_eq!(ctx.position, Vec2::new(10.0, 0.0));
        assert_eq!(action.progress, 1.0);
    }

    #[test]
    fn test_move_starts_from_position_at_activation() {
        let mut action = MoveAction::new(0.25, Vec2::new(0.0, 100.0), 2.0);
        let mut ctx = ctx_at(Vec2::ZERO);
        // Something else moves the boss during the wait.
        ctx.position = Vec2::new(50.0, 0.0);
        action.advance(&mut ctx, 0.25);
        assert_eq!(action.start, Vec2::new(50.0, 0.0));

        action.advance(&mut ctx, 0.25);
        let eased = ease_out_sine(0.5);
        let expected = Vec2::new(50.0, 0.0).lerp(Vec2::new(0.0, 100.0), eased);
        assert!((ctx.position - expected).length() < 1e-4);
    }

    // ---- Attack and idle ----

    #[test]
    fn test_attack_fires_first_volley_immediately() {
        let mut action = AttackAction::new(AttackPattern::Burst, 3, 0.5);
        let mut ctx = ctx_at(Vec2::new(100.0, 500.0));
        ctx.player = Some(Vec2::new(100.0, 100.0));

        assert!(!action.advance(&mut ctx, 0.25));
        assert_eq!(ctx.emissions.len(), 1);
        assert!((ctx.emissions[0].aim - Vec2::NEG_Y).length() < 1e-6);
        assert_eq!(ctx.emissions[0].origin, Vec2::new(100.0, 500.0));

        assert!(!action.advance(&mut ctx, 0.25));
        assert_eq!(ctx.emissions.len(), 1);
        assert!(!action.advance(&mut ctx, 0.25));
        assert_eq!(ctx.emissions.len(), 2);
        action.advance(&mut ctx, 0.25);
        assert!(action.advance(&mut ctx, 0.25));
        assert_eq!(ctx.emissions.len(), 3);
    }

    #[test]
    fn test_aim_defaults_down_without_player() {
        let ctx = ctx_at(Vec2::new(10.0, 10.0));
        assert_eq!(ctx.aim(), Vec2::NEG_Y);
        let mut on_top = ctx_at(Vec2::new(10.0, 10.0));
        on_top.player = Some(Vec2::new(10.0, 10.0));
        assert_eq!(on_top.aim(), Vec2::NEG_Y);
    }

    #[test]
    fn test_idle_counts_down() {
        let mut action = BossAction::Idle { remaining: 0.5 };
        let mut ctx = ctx_at(Vec2::ZERO);
        assert!(!action.advance(&mut ctx, 0.25));
        assert!(action.advance(&mut ctx, 0.25));
    }

    // ---- Scheduler ----

    #[test]
    fn test_scheduler_queue_lifecycle() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut ai = Ai::default();
        let mut ctx = ctx_at(Vec2::new(240.0, 560.0));

        // Empty queue: schedule a move, nothing advances.
        assert!(!step(&mut ai, &mut ctx, &mut rng, 0.25));
        assert_eq!(ai.state, AiState::SchedulingMove);
        assert_eq!(ai.queue.len(), 1);
        assert_eq!(ctx.position, Vec2::new(240.0, 560.0));

        // Wait phase is processing; once interpolation starts the state is Moving.
        let mut saw_moving = false;
        let mut finished = false;
        for _ in 0..200 {
            finished = step(&mut ai, &mut ctx, &mut rng, 0.25);
            if ai.state == AiState::Moving {
                saw_moving = true;
            }
            if finished {
                break;
            }
        }
        assert!(finished);
        assert!(saw_moving);
        assert!(ai.queue.is_empty());
        assert_eq!(ai.state, AiState::Scheduling);

        // Next is a single-volley ring attack, done on its first advance.
        step(&mut ai, &mut ctx, &mut rng, 0.25);
        assert_eq!(ai.state, AiState::Scheduling);
        assert!(matches!(ai.queue.front(), Some(BossAction::Attack(_))));
        assert!(step(&mut ai, &mut ctx, &mut rng, 0.25));
        assert_eq!(ctx.emissions.len(), 1);
        assert!(ai.queue.is_empty());

        // Then recovery.
        step(&mut ai, &mut ctx, &mut rng, 0.25);
        assert!(matches!(ai.queue.front(), Some(BossAction::Idle { .. })));
        step(&mut ai, &mut ctx, &mut rng, 0.25);
        assert_eq!(ai.state, AiState::Processing);
    }

    #[test]
    fn test_scheduler_runs_preloaded_queue_in_order() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let mut ai = Ai::default();
        ai.queue.push_back(BossAction::Idle { remaining: 0.25 });
        ai.queue.push_back(BossAction::Move(MoveAction::new(
            0.0,
            Vec2::new(5.0, 5.0),
            4.0,
        )));
        let mut ctx = ctx_at(Vec2::ZERO);

        assert!(step(&mut ai, &mut ctx, &mut rng, 0.25));
        assert!(matches!(ai.queue.front(), Some(BossAction::Move(_))));
        let mut ticks = 0;
        while !step(&mut ai, &mut ctx, &mut rng, 0.25) {
            ticks += 1;
            assert!(ticks < 10);
        }
        assert_eq!(ctx.position, Vec2::new(5.0, 5.0));
        assert_eq!(ai.script_step, 0, "script untouched while the queue had work");
    }

    // ---- Script ----

    #[test]
    fn test_script_cycles_move_attack_idle() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let ctx = ctx_at(Vec2::ZERO);
        for cycle in 0..4 {
            let base = cycle * 3;
            assert!(matches!(next_action(base, &ctx, &mut rng), BossAction::Move(_)));
            assert!(matches!(next_action(base + 1, &ctx, &mut rng), BossAction::Attack(_)));
            assert!(matches!(next_action(base + 2, &ctx, &mut rng), BossAction::Idle { .. }));
        }
    }

    #[test]
    fn test_script_enrage_escalates() {
        let calm = attack(0, false);
        let angry = attack(0, true);
        match (calm.pattern, angry.pattern) {
            (AttackPattern::Ring { count: a, .. }, AttackPattern::Ring { count: b, .. }) => {
                assert!(b > a)
            }
            other => panic!("expected rings, got {other:?}"),
        }

        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let mut ctx = ctx_at(Vec2::ZERO);
        ctx.health_fraction = 0.2;
        match next_action(0, &ctx, &mut rng) {
            BossAction::Move(m) => assert!(m.wait < BOSS_MOVE_WAIT),
            other => panic!("expected move, got {other:?}"),
        }
    }

    #[test]
    fn test_destinations_stay_in_upper_band() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let arena = Rect::new(0.0, 0.0, ARENA_WIDTH, ARENA_HEIGHT);
        for _ in 0..500 {
            let p = destination(arena, &mut rng);
            assert!(p.x >= BOSS_SIZE * 0.5 && p.x <= ARENA_WIDTH - BOSS_SIZE * 0.5);
            assert!(p.y >= ARENA_HEIGHT * BOSS_ZONE_FLOOR);
            assert!(p.y <= ARENA_HEIGHT - BOSS_SIZE * 0.5);
        }
    }
}
