/*
 * Behavior Module
 *
 * Steering strategies attached to boids. A behavior is a closed set of
 * variants (plain flocking, prey, hunter); role filtering is a tag
 * comparison and role conversion is a plain value replacement.
 *
 * Each tick a boid's behavior is moved out of the boid, performed against
 * the live population slice, and the returned behavior (itself, or its
 * replacement) is moved back in.
 */

mod flocking;
mod hunter;
mod prey;
mod rules;

pub use flocking::FlockingBehavior;
pub use hunter::HunterBehavior;
pub use prey::PreyBehavior;
pub use rules::filter_role;

use serde::{Deserialize, Serialize};

use crate::boid::Boid;
use crate::config::{Bounds, SimulationConfig};
use crate::obstacles::ObstacleService;
use crate::params::{BehaviorParams, PreyParams};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Neutral flocker, neither hunts nor flees.
    Flocker,
    Prey,
    Hunter,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Flocker, Role::Prey, Role::Hunter];
}

/// Reusable index buffers for neighbour queries, owned by whoever drives the ticks.
#[derive(Debug, Default)]
pub struct NeighbourScratch {
    pub(crate) neighbours: Vec<usize>,
    pub(crate) friends: Vec<usize>,
    pub(crate) others: Vec<usize>,
}

/// Everything a behavior may read besides the population itself.
pub struct StepContext<'a> {
    pub dt: f32,
    pub bounds: &'a Bounds,
    pub obstacles: &'a dyn ObstacleService,
    /// Parameters for the prey a converted hunter turns into.
    pub prey_params: &'a PreyParams,
    pub scratch: &'a mut NeighbourScratch,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Behavior {
    Flocking(FlockingBehavior),
    Prey(PreyBehavior),
    Hunter(HunterBehavior),
}

impl Default for Behavior {
    fn default() -> Self {
        Behavior::Flocking(FlockingBehavior::default())
    }
}

impl Behavior {
    /// Fresh behavior for `role` using the parameter block from `config`.
    pub fn for_role(role: Role, config: &SimulationConfig) -> Self {
        match role {
            Role::Flocker => Behavior::Flocking(FlockingBehavior::new(config.flocking)),
            Role::Prey => Behavior::Prey(PreyBehavior::new(config.prey)),
            Role::Hunter => Behavior::Hunter(HunterBehavior::new(config.hunter)),
        }
    }

    pub fn role(&self) -> Role {
        match self {
            Behavior::Flocking(_) => Role::Flocker,
            Behavior::Prey(_) => Role::Prey,
            Behavior::Hunter(_) => Role::Hunter,
        }
    }

    pub fn params(&self) -> &BehaviorParams {
        match self {
            Behavior::Flocking(b) => &b.params,
            Behavior::Prey(b) => &b.params.base,
            Behavior::Hunter(b) => &b.params.base,
        }
    }

    pub fn params_mut(&mut self) -> &mut BehaviorParams {
        match self {
            Behavior::Flocking(b) => &mut b.params,
            Behavior::Prey(b) => &mut b.params.base,
            Behavior::Hunter(b) => &mut b.params.base,
        }
    }

    pub fn as_prey(&self) -> Option<&PreyBehavior> {
        match self {
            Behavior::Prey(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_prey_mut(&mut self) -> Option<&mut PreyBehavior> {
        match self {
            Behavior::Prey(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_hunter(&self) -> Option<&HunterBehavior> {
        match self {
            Behavior::Hunter(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_hunter_mut(&mut self) -> Option<&mut HunterBehavior> {
        match self {
            Behavior::Hunter(b) => Some(b),
            _ => None,
        }
    }

    /// Indices of the boids visible from `boids[index]`.
    pub fn neighbours(&self, index: usize, boids: &[Boid]) -> Vec<usize> {
        let mut out = Vec::new();
        self.params().neighbours_into(index, boids, &mut out);
        out
    }

    /// Advance `boids[index]` by one step and return the behavior it should
    /// carry afterwards. `self` must already be detached from the boid.
    pub fn perform(mut self, ctx: &mut StepContext<'_>, index: usize, boids: &mut [Boid]) -> Behavior {
        let replacement = match &mut self {
            Behavior::Flocking(b) => {
                b.perform(ctx, index, boids);
                None
            }
            Behavior::Prey(b) => {
                b.perform(ctx, index, boids);
                None
            }
            Behavior::Hunter(b) => b.perform(ctx, index, boids),
        };

        replacement.unwrap_or(self)
    }
}

/// Run the behavior of `boids[index]` against the whole slice, applying any
/// role conversion it requests. Dead boids are left untouched.
pub fn update_boid(ctx: &mut StepContext<'_>, index: usize, boids: &mut [Boid]) {
    if !boids[index].is_alive() {
        return;
    }

    let behavior = std::mem::take(&mut boids[index].behavior);
    let next = behavior.perform(ctx, index, boids);
    boids[index].behavior = next;
}
