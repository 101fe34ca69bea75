#[cfg(test)]
mod tests {
    use crate::behaviors::CollisionHandler;
    use crate::commands::PlayerCommand;
    use crate::components::{Bullet, Health, Transform};
    use crate::constants::*;
    use crate::enums::*;
    use crate::events::SimEvent;
    use crate::leaderboard::Leaderboard;
    use crate::state::FrameSnapshot;
    use crate::types::*;

    // ---- Geometry ----

    #[test]
    fn test_wrap_degrees_range() {
        assert_eq!(wrap_degrees(0.0), 0.0);
        assert_eq!(wrap_degrees(360.0), 0.0);
        assert_eq!(wrap_degrees(370.0), 10.0);
        assert_eq!(wrap_degrees(-90.0), 270.0);
        let tiny = wrap_degrees(-1e-9);
        assert!((0.0..360.0).contains(&tiny), "got {tiny}");
    }

    #[test]
    fn test_rect_containment_and_overlap() {
        let outer = Rect::new(0.0, 0.0, 100.0, 100.0);
        let inner = Rect::new(10.0, 10.0, 20.0, 20.0);
        let straddle = Rect::new(90.0, 90.0, 20.0, 20.0);
        assert!(outer.contains_rect(&inner));
        assert!(!outer.contains_rect(&straddle));
        assert!(outer.overlaps(&straddle));

        // Touching edges do not overlap.
        let neighbor = Rect::new(100.0, 0.0, 10.0, 10.0);
        assert!(!outer.overlaps(&neighbor));
    }

    #[test]
    fn test_degenerate_rect_never_contained() {
        let outer = Rect::new(0.0, 0.0, 100.0, 100.0);
        let point = Rect::from_min_max(Vec2::splat(5.0), Vec2::splat(5.0));
        let nan = Rect::enclosing(&[]);
        assert!(point.is_degenerate());
        assert!(nan.is_degenerate());
        assert!(!outer.contains_rect(&point));
        assert!(!outer.contains_rect(&nan));
    }

    #[test]
    fn test_quadrants_tile_parent() {
        let rect = Rect::new(0.0, 0.0, 64.0, 32.0);
        let quads = rect.quadrants();
        let area: f32 = quads.iter().map(|q| q.width() * q.height()).sum();
        assert_eq!(area, 64.0 * 32.0);
        for q in &quads {
            assert!(rect.contains_rect(q));
            assert_eq!(q.width(), 32.0);
            assert_eq!(q.height(), 16.0);
        }
    }

    #[test]
    fn test_polygon_rectangle_world_vertices() {
        let mut body = ConvexPolygon::rectangle(10.0, 4.0);
        body.set_center(Vec2::new(100.0, 50.0));
        let bounds = body.bounding_rect();
        assert_eq!(bounds.min, Vec2::new(95.0, 48.0));
        assert_eq!(bounds.max, Vec2::new(105.0, 52.0));
        assert_eq!(body.center(), Vec2::new(100.0, 50.0));
    }

    #[test]
    fn test_polygon_rotation_about_origin() {
        let mut body = ConvexPolygon::rectangle(10.0, 4.0);
        body.set_center(Vec2::ZERO);
        body.set_rotation(90.0);
        let bounds = body.bounding_rect();
        assert!((bounds.width() - 4.0).abs() < 1e-4);
        assert!((bounds.height() - 10.0).abs() < 1e-4);
        assert!(body.center().length() < 1e-6);
    }

    #[test]
    fn test_polygon_scale_and_translate() {
        let mut body = ConvexPolygon::rectangle(10.0, 10.0);
        body.set_center(Vec2::new(20.0, 20.0));
        body.set_scale(Vec2::new(2.0, 0.5));
        let bounds = body.bounding_rect();
        assert_eq!(bounds.width(), 20.0);
        assert_eq!(bounds.height(), 5.0);

        body.translate(Vec2::new(5.0, 0.0));
        assert_eq!(body.center(), Vec2::new(25.0, 20.0));
        assert_eq!(body.bounding_rect().min.x, bounds.min.x + 5.0);
    }

    #[test]
    fn test_heading_helpers() {
        let up = direction_from_degrees(90.0);
        assert!(up.x.abs() < 1e-6);
        assert!((up.y - 1.0).abs() < 1e-6);
        assert!((degrees_of(Vec2::new(0.0, -1.0)) - 270.0).abs() < 1e-4);
    }

    // ---- Components ----

    #[test]
    fn test_transform_centered() {
        let t = Transform::centered(Vec2::new(50.0, 50.0), Vec2::new(20.0, 10.0));
        assert_eq!(t.position, Vec2::new(40.0, 45.0));
        assert_eq!(t.center(), Vec2::new(50.0, 50.0));
    }

    #[test]
    fn test_health_invincibility_blocks_damage() {
        let mut health = Health::new(5).with_invincibility(1.0);
        assert!(health.apply_damage(2));
        assert_eq!(health.current, 3);
        assert!(health.is_invincible());
        assert!(!health.apply_damage(2), "second hit inside the window is ignored");
        assert_eq!(health.current, 3);
    }

    #[test]
    fn test_health_override_flag() {
        let mut health = Health::new(5);
        health.invincible = true;
        assert!(!health.apply_damage(1));
        assert_eq!(health.current, 5);
    }

    #[test]
    fn test_bullet_despawn_sentinel() {
        let bullet = Bullet::default();
        assert!(!bullet.despawns_off_screen());
        let bullet = Bullet::new(1.0, Default::default(), 2.0);
        assert!(bullet.despawns_off_screen());
        assert_eq!(bullet.despawn_timer, 2.0);
    }

    #[test]
    fn test_team_opposition() {
        assert!(Team::Player.opposes(Team::Enemy));
        assert!(Team::Enemy.opposes(Team::Player));
        assert!(!Team::Enemy.opposes(Team::Enemy));
        assert!(!Team::Neutral.opposes(Team::Player));
    }

    // ---- Serde ----

    #[test]
    fn test_command_serde_tagged() {
        let json = serde_json::to_string(&PlayerCommand::Steer { x: 1.0, y: 0.0 }).unwrap();
        assert!(json.contains("\"type\":\"Steer\""));
        let back: PlayerCommand = serde_json::from_str(&json).unwrap();
        assert_eq!(back, PlayerCommand::Steer { x: 1.0, y: 0.0 });
    }

    #[test]
    fn test_snapshot_serializes() {
        let mut snap = FrameSnapshot::default();
        snap.events.push(SimEvent::GameOver { score: 1200 });
        let json = serde_json::to_string(&snap).unwrap();
        let back: FrameSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, snap);
    }

    #[test]
    fn test_collision_handler_default_is_none() {
        assert_eq!(CollisionHandler::default(), CollisionHandler::None);
    }

    // ---- Leaderboard ----

    #[test]
    fn test_leaderboard_orders_and_truncates() {
        let mut board = Leaderboard::default();
        for i in 0..12u64 {
            board.submit(format!("p{i}"), i * 10);
        }
        assert_eq!(board.entries().len(), LEADERBOARD_CAPACITY);
        assert_eq!(board.entries()[0].score, 110);
        assert_eq!(board.entries()[9].score, 20);
        assert_eq!(board.submit("low", 5), None);
        assert_eq!(board.submit("top", 500), Some(0));
    }

    #[test]
    fn test_leaderboard_ties_keep_insertion_order() {
        let mut board = Leaderboard::default();
        board.submit("first", 100);
        board.submit("second", 100);
        let rank = board.submit("third", 100);
        assert_eq!(rank, Some(2));
        let names: Vec<&str> = board.entries().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_leaderboard_qualifies() {
        let mut board = Leaderboard::default();
        assert!(board.qualifies(0), "empty table takes any score");
        for i in 1..=LEADERBOARD_CAPACITY as u64 {
            board.submit(format!("p{i}"), i * 10);
        }
        assert!(!board.qualifies(10), "tying the lowest entry does not place");
        assert!(board.qualifies(11));
        assert_eq!(board.submit("tie", 10), None);
    }

    #[test]
    fn test_leaderboard_file_roundtrip() {
        let dir = std::env::temp_dir().join("barrage_test_leaderboard");
        let _ = std::fs::remove_dir_all(&dir);
        let path = dir.join("scores.json");

        let empty = Leaderboard::load(&path).unwrap();
        assert!(empty.entries().is_empty(), "missing file loads empty");

        let mut board = Leaderboard::default();
        board.submit("ace", 9000);
        board.submit("rookie", 150);
        board.save(&path).unwrap();

        let loaded = Leaderboard::load(&path).unwrap();
        assert_eq!(loaded, board);
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_leaderboard_malformed_file() {
        let dir = std::env::temp_dir().join("barrage_test_leaderboard_bad");
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("scores.json");
        std::fs::write(&path, "not json").unwrap();
        assert!(Leaderboard::load(&path).is_err());
        let _ = std::fs::remove_dir_all(&dir);
    }
}
