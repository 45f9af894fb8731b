use serde::{Deserialize, Serialize};

use crate::geometry::Point2;

/// Card long axis sits perpendicular to the drag direction.
const CARD_AXIS_OFFSET_DEG: f32 = 90.0;

/// One visually distinct card of a laid-out pile.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PileSlot {
    pub position: Point2,
    pub rotation_deg: f32,
}

/// Collapses a raw drag trail into rotated card slots.
///
/// Runs of points closer than `min_distance` to the run's first point share one
/// slot anchored at that first point. Each slot faces the next distinct point;
/// a slot with no distinct successor keeps the previous slot's rotation (0 for
/// the first slot).
pub fn cluster_pile(points: &[Point2], min_distance: f32) -> Vec<PileSlot> {
    let min_distance_sq = min_distance * min_distance;
    let mut slots = Vec::new();
    let mut last_rotation = 0.0;
    let mut i = 0;
    while i < points.len() {
        let anchor = points[i];
        let mut j = i + 1;
        while j < points.len() && anchor.distance_sq(points[j]) < min_distance_sq {
            j += 1;
        }
        let rotation_deg = match points.get(j) {
            Some(next) => anchor.direction_deg(*next) + CARD_AXIS_OFFSET_DEG,
            None => last_rotation,
        };
        last_rotation = rotation_deg;
        slots.push(PileSlot {
            position: anchor,
            rotation_deg,
        });
        i = j;
    }
    slots
}
