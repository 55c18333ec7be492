use glam::Vec3;

use crate::boid::Boid;
use crate::math::unit_or_zero;
use crate::params::PreyParams;

use super::flocking::integrate;
use super::{filter_role, Role, StepContext};

/// Flocks with other prey, keeps its distance from everyone, and runs from
/// every hunter it can see.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PreyBehavior {
    pub params: PreyParams,
}

impl PreyBehavior {
    pub fn new(params: PreyParams) -> Self {
        Self { params }
    }

    pub fn perform(&mut self, ctx: &mut StepContext<'_>, index: usize, boids: &mut [Boid]) {
        let p = &self.params.base;
        let scratch = &mut *ctx.scratch;
        p.neighbours_into(index, boids, &mut scratch.neighbours);
        filter_role(boids, &scratch.neighbours, Role::Prey, &mut scratch.friends);
        filter_role(boids, &scratch.neighbours, Role::Hunter, &mut scratch.others);

        let boid = &boids[index];
        let alignment = p.alignment(boids, &scratch.friends) * p.alignment_weight;
        let cohesion = p.cohesion(boid, boids, &scratch.friends) * p.cohesion_weight;
        let separation = p.separation(boid, boids, &scratch.neighbours) * p.separation_weight;
        let avoidance = p.avoidance(boid, ctx.bounds, ctx.obstacles) * p.avoidance_weight;
        let escape = self.escape(boid, boids, &scratch.others) * self.params.escape_weight;

        let acceleration = alignment + cohesion + separation + avoidance + escape;
        integrate(p, ctx.dt, &mut boids[index], acceleration);
    }

    /// Direction straight away from the combined positions of `threats`.
    pub fn escape(&self, boid: &Boid, boids: &[Boid], threats: &[usize]) -> Vec3 {
        let away: Vec3 = threats
            .iter()
            .map(|&i| boid.position - boids[i].position)
            .sum();
        unit_or_zero(away)
    }
}
