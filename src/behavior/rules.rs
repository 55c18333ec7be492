/*
 * Steering Rules
 *
 * The classic flocking rules shared by every role:
 * 1. Alignment: steer towards the average heading of neighbours
 * 2. Cohesion: steer towards the average position of neighbours
 * 3. Separation: steer away from neighbours that are too close
 * 4. Avoidance: steer away from the world walls and obstacles ahead
 *
 * Every rule returns a unit vector or exactly zero.
 */

use glam::Vec3;

use super::Role;
use crate::boid::Boid;
use crate::config::Bounds;
use crate::math::{angle_between_degrees, unit_or_zero};
use crate::obstacles::ObstacleService;
use crate::params::BehaviorParams;

/// Keep the entries of `neighbours` whose boid currently plays `role`.
pub fn filter_role(boids: &[Boid], neighbours: &[usize], role: Role, out: &mut Vec<usize>) {
    out.clear();
    out.extend(neighbours.iter().copied().filter(|&i| boids[i].role() == role));
}

impl BehaviorParams {
    /// Collect into `out` every boid within view distance and inside the view
    /// cone around the velocity of `boids[index]`. Never includes `index`.
    pub fn neighbours_into(&self, index: usize, boids: &[Boid], out: &mut Vec<usize>) {
        out.clear();
        let boid = &boids[index];
        let range_sq = self.view_distance * self.view_distance;

        for (i, other) in boids.iter().enumerate() {
            if i == index {
                continue;
            }

            let offset = other.position - boid.position;
            if offset.length_squared() <= range_sq
                && angle_between_degrees(boid.velocity, offset) <= self.view_angle
            {
                out.push(i);
            }
        }
    }

    pub fn alignment(&self, boids: &[Boid], neighbours: &[usize]) -> Vec3 {
        let heading: Vec3 = neighbours.iter().map(|&i| boids[i].velocity).sum();
        unit_or_zero(heading)
    }

    pub fn cohesion(&self, boid: &Boid, boids: &[Boid], neighbours: &[usize]) -> Vec3 {
        if neighbours.is_empty() {
            return Vec3::ZERO;
        }

        let sum: Vec3 = neighbours.iter().map(|&i| boids[i].position).sum();
        let center = sum / neighbours.len() as f32;
        unit_or_zero(center - boid.position)
    }

    pub fn separation(&self, boid: &Boid, boids: &[Boid], neighbours: &[usize]) -> Vec3 {
        let min_dist = self.min_boid_distance + boid.radius;
        let min_dist_sq = min_dist * min_dist;

        let mut shift = Vec3::ZERO;
        for &i in neighbours {
            let away = boid.position - boids[i].position;
            if away.length_squared() < min_dist_sq {
                shift += unit_or_zero(away);
            }
        }

        unit_or_zero(shift)
    }

    /// Push back from any world face closer than `obstacle_avoidance_dist`
    /// and dodge whatever obstacle lies just ahead.
    pub fn avoidance(&self, boid: &Boid, bounds: &Bounds, obstacles: &dyn ObstacleService) -> Vec3 {
        let mut shift = Vec3::ZERO;

        if bounds.near_min(boid.position, self.obstacle_avoidance_dist) {
            shift += bounds.max - boid.position;
        }
        if bounds.near_max(boid.position, self.obstacle_avoidance_dist) {
            shift += bounds.min - boid.position;
        }

        shift += self.unobstructed_direction(boid, obstacles);

        unit_or_zero(shift)
    }

    /// Cast a short ray along the heading; steer past the nearest hit with a
    /// fixed sideways dodge.
    pub fn unobstructed_direction(&self, boid: &Boid, obstacles: &dyn ObstacleService) -> Vec3 {
        let heading = unit_or_zero(boid.velocity);
        let end = boid.position + heading * (self.obstacle_avoidance_dist + boid.radius);
        let dodge = heading.cross(Vec3::NEG_Y) * self.obstacle_dodge_strength;

        let mut best = Vec3::ZERO;
        obstacles.raycast(boid.position, end, &mut |hit| {
            best += (hit.world_point + dodge) - boid.position;
            0.0
        });

        unit_or_zero(best)
    }
}
