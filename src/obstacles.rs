/*
 * Obstacles Module
 *
 * The obstacle service is the only spatial query the steering rules need:
 * register static axis-aligned boxes and report where a ray segment first
 * touches them. `ObstacleService` is the seam a real physics engine would
 * plug into; `BoxObstacles` is the in-memory implementation used by the
 * simulation.
 */

use glam::Vec3;
use serde::{Deserialize, Serialize};
use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// Stable handle to a registered obstacle.
    pub struct ObstacleId;
}

/// One ray/obstacle intersection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RaycastHit {
    pub world_point: Vec3,
    /// Position of the hit along the segment, `0.0` at the origin and `1.0` at the end.
    pub fraction: f32,
    pub obstacle: ObstacleId,
}

/// Spatial service answering ray queries against static obstacles.
///
/// `raycast` reports hits nearest first. The callback's return value becomes
/// the new maximum fraction: `0.0` stops after the current hit, `1.0` keeps
/// going, a negative value ignores the hit and keeps the current limit.
pub trait ObstacleService {
    fn register_box(&mut self, center: Vec3, half_extents: Vec3) -> ObstacleId;
    fn remove(&mut self, id: ObstacleId) -> bool;
    fn raycast(&self, origin: Vec3, end: Vec3, on_hit: &mut dyn FnMut(RaycastHit) -> f32);
    fn clear(&mut self);
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Axis-aligned box given by its center and half extents.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoxObstacle {
    pub center: Vec3,
    pub half_extents: Vec3,
}

impl BoxObstacle {
    pub fn new(center: Vec3, half_extents: Vec3) -> Self {
        Self {
            center,
            half_extents: half_extents.abs(),
        }
    }

    pub fn min(&self) -> Vec3 {
        self.center - self.half_extents
    }

    pub fn max(&self) -> Vec3 {
        self.center + self.half_extents
    }

    pub fn contains(&self, point: Vec3) -> bool {
        point.cmpge(self.min()).all() && point.cmple(self.max()).all()
    }

    /// Slab test of the segment `origin..origin + delta`. Returns the entry
    /// fraction in `[0, 1]`, or `0.0` when the segment starts inside.
    pub fn segment_fraction(&self, origin: Vec3, delta: Vec3) -> Option<f32> {
        let min = self.min();
        let max = self.max();
        let mut t_enter = 0.0_f32;
        let mut t_exit = 1.0_f32;

        for axis in 0..3 {
            let o = origin[axis];
            let d = delta[axis];

            // Parallel to this slab: either always inside it or never
            if d.abs() <= f32::EPSILON {
                if o < min[axis] || o > max[axis] {
                    return None;
                }
                continue;
            }

            let inv = 1.0 / d;
            let mut t0 = (min[axis] - o) * inv;
            let mut t1 = (max[axis] - o) * inv;
            if t0 > t1 {
                std::mem::swap(&mut t0, &mut t1);
            }

            t_enter = t_enter.max(t0);
            t_exit = t_exit.min(t1);
            if t_enter > t_exit {
                return None;
            }
        }

        Some(t_enter)
    }
}

/// In-memory obstacle store with stable handles.
#[derive(Debug, Default, Clone)]
pub struct BoxObstacles {
    boxes: SlotMap<ObstacleId, BoxObstacle>,
}

impl BoxObstacles {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: ObstacleId) -> Option<&BoxObstacle> {
        self.boxes.get(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (ObstacleId, &BoxObstacle)> {
        self.boxes.iter()
    }

    // Nearest hit strictly after `previous` in (fraction, id) order
    fn next_hit(&self, origin: Vec3, delta: Vec3, previous: Option<(f32, ObstacleId)>) -> Option<(f32, ObstacleId)> {
        self.boxes
            .iter()
            .filter_map(|(id, obstacle)| obstacle.segment_fraction(origin, delta).map(|fraction| (fraction, id)))
            .filter(|&(fraction, id)| match previous {
                None => true,
                Some((last, last_id)) => fraction > last || (fraction == last && id > last_id),
            })
            .min_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)))
    }
}

impl ObstacleService for BoxObstacles {
    fn register_box(&mut self, center: Vec3, half_extents: Vec3) -> ObstacleId {
        self.boxes.insert(BoxObstacle::new(center, half_extents))
    }

    fn remove(&mut self, id: ObstacleId) -> bool {
        self.boxes.remove(id).is_some()
    }

    // Walks the hits nearest first without buffering them; a callback that
    // stops at the first hit costs a single scan.
    fn raycast(&self, origin: Vec3, end: Vec3, on_hit: &mut dyn FnMut(RaycastHit) -> f32) {
        let delta = end - origin;
        let mut max_fraction = 1.0_f32;
        let mut previous = None;

        while let Some((fraction, id)) = self.next_hit(origin, delta, previous) {
            if fraction > max_fraction {
                break;
            }
            previous = Some((fraction, id));

            let reported = on_hit(RaycastHit {
                world_point: origin + delta * fraction,
                fraction,
                obstacle: id,
            });
            if reported < 0.0 {
                continue;
            }
            if reported == 0.0 {
                break;
            }
            max_fraction = reported;
        }
    }

    fn clear(&mut self) {
        self.boxes.clear();
    }

    fn len(&self) -> usize {
        self.boxes.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect_hits(obstacles: &BoxObstacles, origin: Vec3, end: Vec3, stop: f32) -> Vec<RaycastHit> {
        let mut hits = Vec::new();
        obstacles.raycast(origin, end, &mut |hit| {
            hits.push(hit);
            stop
        });
        hits
    }

    #[test]
    fn ray_hits_near_face() {
        let mut obstacles = BoxObstacles::new();
        let id = obstacles.register_box(Vec3::new(5.0, 0.0, 0.0), Vec3::splat(1.0));

        let hits = collect_hits(&obstacles, Vec3::ZERO, Vec3::new(10.0, 0.0, 0.0), 1.0);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].obstacle, id);
        assert!((hits[0].world_point - Vec3::new(4.0, 0.0, 0.0)).length() < 1e-5);
        assert!((hits[0].fraction - 0.4).abs() < 1e-6);
    }

    #[test]
    fn ray_misses_when_too_short_or_offset() {
        let mut obstacles = BoxObstacles::new();
        obstacles.register_box(Vec3::new(5.0, 0.0, 0.0), Vec3::splat(1.0));

        assert!(collect_hits(&obstacles, Vec3::ZERO, Vec3::new(3.0, 0.0, 0.0), 1.0).is_empty());
        assert!(collect_hits(&obstacles, Vec3::new(0.0, 3.0, 0.0), Vec3::new(10.0, 3.0, 0.0), 1.0).is_empty());
    }

    #[test]
    fn returning_zero_reports_only_nearest() {
        let mut obstacles = BoxObstacles::new();
        obstacles.register_box(Vec3::new(8.0, 0.0, 0.0), Vec3::splat(1.0));
        let near = obstacles.register_box(Vec3::new(3.0, 0.0, 0.0), Vec3::splat(1.0));

        let all = collect_hits(&obstacles, Vec3::ZERO, Vec3::new(10.0, 0.0, 0.0), 1.0);
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].obstacle, near);

        let nearest = collect_hits(&obstacles, Vec3::ZERO, Vec3::new(10.0, 0.0, 0.0), 0.0);
        assert_eq!(nearest.len(), 1);
        assert_eq!(nearest[0].obstacle, near);
    }

    #[test]
    fn hits_arrive_nearest_first_and_respect_new_limit() {
        let mut obstacles = BoxObstacles::new();
        let far = obstacles.register_box(Vec3::new(8.0, 0.0, 0.0), Vec3::splat(0.5));
        let near = obstacles.register_box(Vec3::new(2.0, 0.0, 0.0), Vec3::splat(0.5));
        let middle = obstacles.register_box(Vec3::new(5.0, 0.0, 0.0), Vec3::splat(0.5));
        let end = Vec3::new(10.0, 0.0, 0.0);

        let order: Vec<ObstacleId> = collect_hits(&obstacles, Vec3::ZERO, end, 1.0)
            .iter()
            .map(|hit| hit.obstacle)
            .collect();
        assert_eq!(order, vec![near, middle, far]);

        // negative skips a hit, a fraction below the next hit ends the walk
        let mut seen = Vec::new();
        obstacles.raycast(Vec3::ZERO, end, &mut |hit| {
            seen.push(hit.obstacle);
            if hit.obstacle == near {
                -1.0
            } else {
                hit.fraction
            }
        });
        assert_eq!(seen, vec![near, middle]);
    }

    #[test]
    fn ray_starting_inside_hits_at_origin() {
        let mut obstacles = BoxObstacles::new();
        obstacles.register_box(Vec3::ZERO, Vec3::splat(2.0));

        let hits = collect_hits(&obstacles, Vec3::ZERO, Vec3::X, 0.0);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].fraction, 0.0);
        assert_eq!(hits[0].world_point, Vec3::ZERO);
    }

    #[test]
    fn remove_and_clear() {
        let mut obstacles = BoxObstacles::new();
        let a = obstacles.register_box(Vec3::ZERO, Vec3::ONE);
        obstacles.register_box(Vec3::X * 4.0, Vec3::ONE);
        assert_eq!(obstacles.len(), 2);

        assert!(obstacles.remove(a));
        assert!(!obstacles.remove(a));
        assert_eq!(obstacles.len(), 1);

        obstacles.clear();
        assert!(obstacles.is_empty());
        obstacles.clear();
        assert!(obstacles.is_empty());
    }

    #[test]
    fn negative_extents_are_normalized() {
        let b = BoxObstacle::new(Vec3::ZERO, Vec3::new(-1.0, 2.0, -3.0));
        assert_eq!(b.half_extents, Vec3::new(1.0, 2.0, 3.0));
        assert!(b.contains(Vec3::new(0.5, -1.5, 2.5)));
    }
}
