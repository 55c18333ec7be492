/*
 * Boid Module
 *
 * This module defines the Boid struct: the mutable per-agent state the
 * simulation advances every tick. Each boid owns exactly one behavior,
 * which decides how it steers and which role it plays in the flock.
 */

use glam::Vec3;

use crate::behavior::{Behavior, Role};

pub const DEFAULT_RADIUS: f32 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    Alive,
    Dead,
}

#[derive(Debug, Clone)]
pub struct Boid {
    pub position: Vec3,
    pub velocity: Vec3,
    pub radius: f32,
    pub status: Status,
    pub(crate) behavior: Behavior,
}

impl Boid {
    pub fn new(position: Vec3, velocity: Vec3, behavior: Behavior) -> Self {
        Self {
            position,
            velocity,
            radius: DEFAULT_RADIUS,
            status: Status::Alive,
            behavior,
        }
    }

    pub fn role(&self) -> Role {
        self.behavior.role()
    }

    pub fn behavior(&self) -> &Behavior {
        &self.behavior
    }

    pub fn behavior_mut(&mut self) -> &mut Behavior {
        &mut self.behavior
    }

    /// Swap in a new behavior, dropping the old one.
    pub fn set_behavior(&mut self, behavior: Behavior) {
        self.behavior = behavior;
    }

    pub fn is_alive(&self) -> bool {
        self.status == Status::Alive
    }

    pub fn kill(&mut self) {
        self.status = Status::Dead;
    }
}

// Two boids are equal when their physical state matches; the behavior is not compared
impl PartialEq for Boid {
    fn eq(&self, other: &Self) -> bool {
        self.position == other.position
            && self.velocity == other.velocity
            && self.radius == other.radius
            && self.status == other.status
    }
}
