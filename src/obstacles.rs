/// Obstacle registry and collision marks.
///
/// The active set holds the footprint of every live hazard. Collision marks
/// flag obstacles that a projectile or the rocket ran into; the behavior that
/// owns the obstacle consumes its mark on its next resume and then removes the
/// obstacle itself. Detectors only ever add marks.

use std::collections::{HashMap, HashSet};

use crate::entities::Point;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObstacleId(u64);

/// A hazard's rectangular footprint. `row` is fractional for falling objects
/// and rounds to a screen row the same way drawing does.
#[derive(Clone, Debug, PartialEq)]
pub struct Obstacle {
    pub row: f64,
    pub column: i32,
    pub height: i32,
    pub width: i32,
}

impl Obstacle {
    pub fn new(row: f64, column: i32, height: i32, width: i32) -> Self {
        Obstacle {
            row,
            column,
            height,
            width,
        }
    }

    pub fn top(&self) -> i32 {
        self.row.round() as i32
    }

    /// Closed-rectangle containment.
    pub fn contains(&self, point: Point) -> bool {
        let top = self.top();
        top <= point.row
            && point.row <= top + self.height - 1
            && self.column <= point.column
            && point.column <= self.column + self.width - 1
    }
}

#[derive(Debug, Default)]
pub struct ObstacleRegistry {
    next_id: u64,
    active: HashMap<ObstacleId, Obstacle>,
    marks: HashSet<ObstacleId>,
}

impl ObstacleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, obstacle: Obstacle) -> ObstacleId {
        let id = ObstacleId(self.next_id);
        self.next_id += 1;
        self.active.insert(id, obstacle);
        id
    }

    /// Removing an absent obstacle is a no-op. Any pending mark goes with it.
    pub fn remove(&mut self, id: ObstacleId) -> Option<Obstacle> {
        self.marks.remove(&id);
        self.active.remove(&id)
    }

    pub fn get(&self, id: ObstacleId) -> Option<&Obstacle> {
        self.active.get(&id)
    }

    pub fn get_mut(&mut self, id: ObstacleId) -> Option<&mut Obstacle> {
        self.active.get_mut(&id)
    }

    pub fn contains(&self, id: ObstacleId) -> bool {
        self.active.contains_key(&id)
    }

    pub fn overlaps(&self, point: Point) -> bool {
        self.active.values().any(|o| o.contains(point))
    }

    /// Every active obstacle covering `point`, in id order.
    pub fn hits(&self, point: Point) -> Vec<ObstacleId> {
        let mut ids: Vec<ObstacleId> = self
            .active
            .iter()
            .filter(|(_, o)| o.contains(point))
            .map(|(&id, _)| id)
            .collect();
        ids.sort();
        ids
    }

    /// Every active obstacle covering at least one of `points`, in id order.
    /// The registry is scanned once however many points are given.
    pub fn hits_any(&self, points: &[Point]) -> Vec<ObstacleId> {
        let mut ids: Vec<ObstacleId> = self
            .active
            .iter()
            .filter(|(_, o)| points.iter().any(|&p| o.contains(p)))
            .map(|(&id, _)| id)
            .collect();
        ids.sort();
        ids
    }

    pub fn iter(&self) -> impl Iterator<Item = (ObstacleId, &Obstacle)> {
        self.active.iter().map(|(&id, o)| (id, o))
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    // ── Collision marks ───────────────────────────────────────────────────────

    pub fn mark(&mut self, id: ObstacleId) {
        self.marks.insert(id);
    }

    pub fn is_marked(&self, id: ObstacleId) -> bool {
        self.marks.contains(&id)
    }

    /// Consume the mark on `id`, returning whether there was one.
    pub fn take_mark(&mut self, id: ObstacleId) -> bool {
        self.marks.remove(&id)
    }

    pub fn marked(&self) -> impl Iterator<Item = ObstacleId> + '_ {
        self.marks.iter().copied()
    }

    pub fn mark_count(&self) -> usize {
        self.marks.len()
    }
}
