use space_garbage::entities::Point;
use space_garbage::obstacles::*;

fn make_registry() -> (ObstacleRegistry, ObstacleId) {
    let mut registry = ObstacleRegistry::new();
    let id = registry.add(Obstacle::new(5.0, 10, 3, 4));
    (registry, id)
}

// ── overlaps ──────────────────────────────────────────────────────────────────

#[test]
fn overlaps_is_inclusive_of_every_edge() {
    let (registry, _) = make_registry();
    // rows 5..=7, columns 10..=13
    for point in [
        Point::new(5, 10),
        Point::new(5, 13),
        Point::new(7, 10),
        Point::new(7, 13),
        Point::new(6, 11),
    ] {
        assert!(registry.overlaps(point), "{point:?} should overlap");
    }
}

#[test]
fn overlaps_excludes_points_just_outside() {
    let (registry, _) = make_registry();
    for point in [
        Point::new(4, 10),
        Point::new(8, 10),
        Point::new(5, 9),
        Point::new(5, 14),
        Point::new(8, 14),
    ] {
        assert!(!registry.overlaps(point), "{point:?} should not overlap");
    }
}

#[test]
fn fractional_rows_round_like_drawing() {
    let mut registry = ObstacleRegistry::new();
    registry.add(Obstacle::new(2.6, 0, 1, 1));
    assert!(registry.overlaps(Point::new(3, 0)));
    assert!(!registry.overlaps(Point::new(2, 0)));
}

#[test]
fn moving_an_obstacle_moves_its_footprint() {
    let (mut registry, id) = make_registry();
    if let Some(obstacle) = registry.get_mut(id) {
        obstacle.row = 12.0;
    }
    assert!(!registry.overlaps(Point::new(5, 10)));
    assert!(registry.overlaps(Point::new(12, 10)));
}

#[test]
fn empty_registry_overlaps_nothing() {
    let (mut registry, id) = make_registry();
    let other = registry.add(Obstacle::new(0.0, 0, 20, 40));
    registry.remove(id);
    registry.remove(other);

    assert!(registry.is_empty());
    for row in -2..25 {
        for column in -2..45 {
            assert!(!registry.overlaps(Point::new(row, column)));
        }
    }
}

#[test]
fn hits_any_collects_each_obstacle_once() {
    let mut registry = ObstacleRegistry::new();
    let a = registry.add(Obstacle::new(0.0, 0, 2, 2));
    let b = registry.add(Obstacle::new(5.0, 5, 1, 1));
    registry.add(Obstacle::new(9.0, 9, 1, 1));

    let points = [
        Point::new(0, 0),
        Point::new(1, 1),
        Point::new(5, 5),
        Point::new(7, 7),
    ];
    assert_eq!(registry.hits_any(&points), vec![a, b]);
    assert!(registry.hits_any(&[Point::new(3, 3)]).is_empty());
    assert!(registry.hits_any(&[]).is_empty());
}

// ── add / remove ──────────────────────────────────────────────────────────────

#[test]
fn remove_is_idempotent() {
    let (mut registry, id) = make_registry();
    assert!(registry.remove(id).is_some());
    assert!(registry.remove(id).is_none());
    assert!(!registry.contains(id));
    assert_eq!(registry.len(), 0);
}

#[test]
fn ids_are_unique() {
    let mut registry = ObstacleRegistry::new();
    let a = registry.add(Obstacle::new(0.0, 0, 1, 1));
    let b = registry.add(Obstacle::new(0.0, 0, 1, 1));
    assert_ne!(a, b);
    assert_eq!(registry.len(), 2);
}

#[test]
fn hits_lists_every_covering_obstacle() {
    let mut registry = ObstacleRegistry::new();
    let a = registry.add(Obstacle::new(0.0, 0, 5, 5));
    let b = registry.add(Obstacle::new(2.0, 2, 5, 5));
    registry.add(Obstacle::new(10.0, 10, 1, 1));

    assert_eq!(registry.hits(Point::new(3, 3)), vec![a, b]);
    assert_eq!(registry.hits(Point::new(0, 0)), vec![a]);
    assert!(registry.hits(Point::new(9, 9)).is_empty());
}

// ── Collision marks ───────────────────────────────────────────────────────────

#[test]
fn marks_are_consumed_by_take_mark() {
    let (mut registry, id) = make_registry();
    assert!(!registry.is_marked(id));

    registry.mark(id);
    registry.mark(id);
    assert!(registry.is_marked(id));
    assert_eq!(registry.mark_count(), 1);

    assert!(registry.take_mark(id));
    assert!(!registry.take_mark(id));
    assert!(registry.contains(id), "consuming a mark leaves the obstacle");
}

#[test]
fn removing_an_obstacle_drops_its_mark() {
    let (mut registry, id) = make_registry();
    registry.mark(id);
    registry.remove(id);
    assert!(!registry.is_marked(id));
    assert_eq!(registry.marked().count(), 0);
}
