/*
 * Flocking Simulation - Module Definitions
 *
 * Headless core of a 3D flocking simulation with prey, hunters and box
 * obstacles. Presentation layers read boid state through `Simulation` and
 * forward spawn and obstacle commands into it.
 */

// Re-export key components for easier access
pub use behavior::{Behavior, HunterBehavior, PreyBehavior, FlockingBehavior, Role};
pub use boid::{Boid, Status};
pub use config::{Bounds, SimulationConfig};
pub use debug::{RoleCounts, TickStats};
pub use error::SimulationError;
pub use obstacles::{BoxObstacles, ObstacleId, ObstacleService, RaycastHit};
pub use params::{BehaviorParams, HunterParams, PreyParams};
pub use simulation::Simulation;

// Define modules
pub mod behavior;
pub mod boid;
pub mod config;
pub mod debug;
pub mod error;
pub mod math;
pub mod obstacles;
pub mod params;
pub mod simulation;

pub use glam::Vec3;
