/*
 * Hunter Behavior
 *
 * Hunters chase the nearest visible prey, burn energy to sprint, eat prey
 * they touch and grow with every meal. After a meal the steering is damped
 * for a while (the dominance window). Once a hunter has eaten its fill it
 * turns into prey for good.
 */

use glam::Vec3;
use tracing::trace;

use crate::boid::Boid;
use crate::math::{distance_squared, unit_or_zero};
use crate::params::HunterParams;

use super::{filter_role, Behavior, PreyBehavior, Role, StepContext};

// Scales the dominance timer into a steering damping divisor
const DOMINANCE_DAMPING: f32 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HunterBehavior {
    pub params: HunterParams,

    pub speed: f32,
    pub energy: f32,
    pub time_dominating: f32,
    pub targets_eaten: u32,
}

impl Default for HunterBehavior {
    fn default() -> Self {
        Self::new(HunterParams::default())
    }
}

impl HunterBehavior {
    pub fn new(params: HunterParams) -> Self {
        Self {
            params,
            speed: params.speed,
            energy: params.energy,
            time_dominating: params.time_dominating,
            targets_eaten: 0,
        }
    }

    /// Returns the replacement behavior when this hunter converts to prey.
    pub fn perform(&mut self, ctx: &mut StepContext<'_>, index: usize, boids: &mut [Boid]) -> Option<Behavior> {
        let p = self.params.base;
        let scratch = &mut *ctx.scratch;
        p.neighbours_into(index, boids, &mut scratch.neighbours);
        filter_role(boids, &scratch.neighbours, Role::Hunter, &mut scratch.friends);
        filter_role(boids, &scratch.neighbours, Role::Prey, &mut scratch.others);
        let targets = &scratch.others;

        let boid = &boids[index];
        let separation = p.separation(boid, boids, &scratch.friends) * p.separation_weight;
        let hunting = self.hunting(boid, boids, targets) * self.params.hunting_weight;
        let avoidance = p.avoidance(boid, ctx.bounds, ctx.obstacles) * p.avoidance_weight;
        let steering = hunting + separation + avoidance;

        let boid = &mut boids[index];
        self.apply_energy(ctx.dt, boid, steering);
        boid.position += boid.velocity * ctx.dt;

        if let Some(target) = self.try_eat(&boids[index], boids, targets) {
            boids[target].kill();
            self.targets_eaten += 1;
            self.energy += self.params.eat_energy;
            self.time_dominating = self.params.time_dominating;
            boids[index].radius *= self.params.growth_per_meal;
            trace!(hunter = index, prey = target, eaten = self.targets_eaten, "prey eaten");
        }

        self.try_convert(ctx, index)
    }

    /// Spend energy on speed while it lasts, then settle the velocity to
    /// exactly `speed` along the damped steering direction.
    pub fn apply_energy(&mut self, dt: f32, boid: &mut Boid, mut steering: Vec3) {
        let max_speed = self.params.base.max_speed;

        if self.energy > 0.0 {
            let burst = self.params.acceleration * dt;
            self.energy = (self.energy - burst).max(0.0);
            self.speed = clamp_speed(self.speed + burst, self.params.accelerated_max_speed);
            steering = unit_or_zero(steering) * (1.0 + burst);
        } else {
            self.speed = clamp_speed(self.speed, max_speed);
        }

        boid.velocity += steering / (self.time_dominating * DOMINANCE_DAMPING + 1.0);
        boid.velocity = unit_or_zero(boid.velocity) * self.speed;

        self.time_dominating = (self.time_dominating - dt).max(0.0);
    }

    /// Heading towards the nearest target, leaning into its direction of travel.
    pub fn hunting(&self, boid: &Boid, boids: &[Boid], targets: &[usize]) -> Vec3 {
        let mut best: Option<(usize, f32)> = None;
        for &i in targets {
            let dist_sq = distance_squared(boid.position, boids[i].position);
            if best.map_or(true, |(_, best_sq)| dist_sq < best_sq) {
                best = Some((i, dist_sq));
            }
        }

        let Some((target, _)) = best else {
            return Vec3::ZERO;
        };

        let prey = &boids[target];
        let pursuit = unit_or_zero(prey.position - boid.position)
            + unit_or_zero(prey.velocity) * self.params.prey_velocity_weight;
        unit_or_zero(pursuit)
    }

    /// First live target inside the eat envelope. The squared distance is
    /// compared against `radius + eat_distance` directly.
    pub fn try_eat(&self, boid: &Boid, boids: &[Boid], targets: &[usize]) -> Option<usize> {
        let reach = boid.radius + self.params.eat_distance;
        targets
            .iter()
            .copied()
            .find(|&i| boids[i].is_alive() && distance_squared(boid.position, boids[i].position) <= reach)
    }

    pub fn is_sated(&self) -> bool {
        self.targets_eaten >= self.params.max_targets_eaten
    }

    fn try_convert(&self, ctx: &StepContext<'_>, index: usize) -> Option<Behavior> {
        if !self.is_sated() {
            return None;
        }

        trace!(boid = index, eaten = self.targets_eaten, "hunter converted to prey");
        Some(Behavior::Prey(PreyBehavior::new(*ctx.prey_params)))
    }
}

// Speed never drops below 1 and never exceeds `max`
fn clamp_speed(speed: f32, max: f32) -> f32 {
    speed.min(max).max(1.0)
}
