use crate::boid::Boid;
use crate::math::{clamp_length, unit_or_zero};
use crate::params::BehaviorParams;

use super::StepContext;

/// Plain flocking: every neighbour counts the same regardless of role.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FlockingBehavior {
    pub params: BehaviorParams,
}

impl FlockingBehavior {
    pub fn new(params: BehaviorParams) -> Self {
        Self { params }
    }

    pub fn perform(&mut self, ctx: &mut StepContext<'_>, index: usize, boids: &mut [Boid]) {
        let p = &self.params;
        let neighbours = &mut ctx.scratch.neighbours;
        p.neighbours_into(index, boids, neighbours);

        let boid = &boids[index];
        let alignment = p.alignment(boids, neighbours) * p.alignment_weight;
        let cohesion = p.cohesion(boid, boids, neighbours) * p.cohesion_weight;
        let separation = p.separation(boid, boids, neighbours) * p.separation_weight;
        let avoidance = p.avoidance(boid, ctx.bounds, ctx.obstacles) * p.avoidance_weight;

        let acceleration = alignment + cohesion + separation + avoidance;
        integrate(p, ctx.dt, &mut boids[index], acceleration);
    }
}

/// Unit-step velocity change, speed clamp, then move.
pub(super) fn integrate(params: &BehaviorParams, dt: f32, boid: &mut Boid, acceleration: glam::Vec3) {
    boid.velocity += unit_or_zero(acceleration);
    boid.velocity = clamp_length(boid.velocity, params.max_speed);
    boid.position += boid.velocity * dt;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::behavior::{update_boid, Behavior, NeighbourScratch};
    use crate::config::Bounds;
    use crate::obstacles::BoxObstacles;
    use crate::params::{PreyParams, MAX_SPEED};
    use glam::Vec3;

    #[test]
    fn lone_boid_keeps_heading_and_moves() {
        let bounds = Bounds::default();
        let obstacles = BoxObstacles::new();
        let prey_params = PreyParams::default();
        let mut scratch = NeighbourScratch::default();
        let mut ctx = StepContext {
            dt: 0.5,
            bounds: &bounds,
            obstacles: &obstacles,
            prey_params: &prey_params,
            scratch: &mut scratch,
        };

        let start = bounds.center();
        let mut boids = vec![Boid::new(start, Vec3::X * 2.0, Behavior::default())];
        update_boid(&mut ctx, 0, &mut boids);

        assert_eq!(boids[0].velocity, Vec3::X * 2.0);
        assert_eq!(boids[0].position, start + Vec3::X);
    }

    #[test]
    fn integrate_clamps_speed() {
        let params = BehaviorParams::default();
        let mut boid = Boid::new(Vec3::ZERO, Vec3::X * MAX_SPEED, Behavior::default());
        integrate(&params, 1.0, &mut boid, Vec3::X * 10.0);
        assert!((boid.velocity.length() - MAX_SPEED).abs() < 1e-5);
        assert_eq!(boid.position, boid.velocity);
    }
}
