/*
 * Simulation Module
 *
 * Owns the boid population, the obstacles and the world bounds, and
 * advances everything one tick at a time.
 *
 * A tick has two phases:
 * 1. Update every live boid in index order. Each boid sees the population
 *    as it is at that moment, so boids earlier in the order have already
 *    moved (and may have eaten) by the time later ones look around.
 * 2. Compact: swap dead boids to the tail and drop them. Order is not
 *    preserved.
 */

use std::time::Instant;

use glam::Vec3;
use rand::{rngs::SmallRng, SeedableRng};
use tracing::{debug, info};

use crate::behavior::{update_boid, Behavior, NeighbourScratch, Role, StepContext};
use crate::boid::{Boid, Status};
use crate::config::{Bounds, SimulationConfig};
use crate::debug::{RoleCounts, TickStats};
use crate::error::Result;
use crate::math::{random_point_in, random_range, random_vector, unit_or_zero};
use crate::obstacles::{BoxObstacles, ObstacleId, ObstacleService};

pub struct Simulation<O: ObstacleService = BoxObstacles> {
    boids: Vec<Boid>,
    obstacles: O,
    config: SimulationConfig,
    rng: SmallRng,
    scratch: NeighbourScratch,
    tick: u64,
    last_stats: TickStats,
}

impl Simulation<BoxObstacles> {
    pub fn new(config: SimulationConfig) -> Result<Self> {
        Self::with_obstacles(config, BoxObstacles::new())
    }
}

impl<O: ObstacleService> Simulation<O> {
    /// Build a simulation that queries `obstacles` for ray hits.
    pub fn with_obstacles(config: SimulationConfig, obstacles: O) -> Result<Self> {
        config.validate()?;

        let rng = match config.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };

        Ok(Self {
            boids: Vec::new(),
            obstacles,
            config,
            rng,
            scratch: NeighbourScratch::default(),
            tick: 0,
            last_stats: TickStats::default(),
        })
    }

    pub fn initialize(&mut self) {
        info!(
            min = ?self.config.bounds.min,
            max = ?self.config.bounds.max,
            seed = ?self.config.seed,
            "flocking simulation initialized"
        );
    }

    /// Advance every live boid by `dt` seconds, then drop the dead.
    pub fn update(&mut self, dt: f32) -> TickStats {
        let started = Instant::now();
        let mut conversions = 0;

        let mut ctx = StepContext {
            dt,
            bounds: &self.config.bounds,
            obstacles: &self.obstacles,
            prey_params: &self.config.prey,
            scratch: &mut self.scratch,
        };

        for index in 0..self.boids.len() {
            // Eaten earlier in this same pass
            if self.boids[index].status == Status::Dead {
                continue;
            }

            let was_hunter = self.boids[index].role() == Role::Hunter;
            update_boid(&mut ctx, index, &mut self.boids);
            if was_hunter && self.boids[index].role() != Role::Hunter {
                conversions += 1;
            }
        }

        let removed = self.compact_dead();
        self.tick += 1;

        let stats = TickStats {
            tick: self.tick,
            population: self.role_counts(),
            removed,
            conversions,
            elapsed: started.elapsed(),
        };
        debug!(
            tick = stats.tick,
            flockers = stats.population.flockers,
            prey = stats.population.prey,
            hunters = stats.population.hunters,
            removed,
            conversions,
            "tick complete"
        );

        self.last_stats = stats;
        stats
    }

    pub fn shutdown(&mut self) {
        self.clear_all();
        info!(ticks = self.tick, "flocking simulation shut down");
    }

    /// Remove every boid and obstacle. Safe to call repeatedly.
    pub fn clear_all(&mut self) {
        let boids = self.boids.len();
        let obstacles = self.obstacles.len();
        self.obstacles.clear();
        self.boids.clear();
        info!(boids, obstacles, "simulation cleared");
    }

    /// Spawn `count` boids of `role` at random positions inside the bounds.
    pub fn spawn_population(&mut self, role: Role, count: usize) {
        self.boids.reserve(count);
        for _ in 0..count {
            let boid = self.create_boid(role);
            self.boids.push(boid);
        }
        debug!(?role, count, total = self.boids.len(), "spawned population");
    }

    /// Spawn a single boid with an explicit position and velocity.
    pub fn spawn_one(&mut self, role: Role, position: Vec3, velocity: Vec3) -> &Boid {
        let mut boid = self.create_boid(role);
        boid.position = position;
        boid.velocity = velocity;

        self.boids.push(boid);
        &self.boids[self.boids.len() - 1]
    }

    /// New boid with a random position inside the bounds, a random heading
    /// and a random speed from the configured spawn range.
    pub fn create_boid(&mut self, role: Role) -> Boid {
        let bounds = self.config.bounds;
        let position = random_point_in(&mut self.rng, bounds.min, bounds.max);
        let speed = random_range(
            &mut self.rng,
            self.config.spawn_speed_min,
            self.config.spawn_speed_max,
        );
        let velocity = unit_or_zero(random_vector(&mut self.rng)) * speed;

        Boid::new(position, velocity, Behavior::for_role(role, &self.config))
    }

    /// Register a static box. `extents` are half extents from the center.
    pub fn add_obstacle(&mut self, center: Vec3, extents: Vec3) -> ObstacleId {
        let id = self.obstacles.register_box(center, extents);
        debug!(?center, ?extents, "obstacle added");
        id
    }

    pub fn remove_obstacle(&mut self, id: ObstacleId) -> bool {
        self.obstacles.remove(id)
    }

    pub fn position_of(&self, index: usize) -> Option<Vec3> {
        self.boids.get(index).map(|boid| boid.position)
    }

    pub fn boids(&self) -> &[Boid] {
        &self.boids
    }

    /// Mutable access for tuning individual boids between ticks.
    pub fn boid_mut(&mut self, index: usize) -> Option<&mut Boid> {
        self.boids.get_mut(index)
    }

    pub fn obstacles(&self) -> &O {
        &self.obstacles
    }

    pub fn bounds(&self) -> &Bounds {
        &self.config.bounds
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn role_counts(&self) -> RoleCounts {
        self.boids.iter().map(Boid::role).collect()
    }

    pub fn last_stats(&self) -> &TickStats {
        &self.last_stats
    }

    pub fn ticks(&self) -> u64 {
        self.tick
    }

    pub fn len(&self) -> usize {
        self.boids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boids.is_empty()
    }

    // Swap each dead boid with the last slot not yet known to be dead, then cut the dead tail
    fn compact_dead(&mut self) -> usize {
        let len = self.boids.len();
        let mut removed = 0;

        for index in (0..len).rev() {
            if self.boids[index].status == Status::Dead {
                self.boids.swap(index, len - 1 - removed);
                removed += 1;
            }
        }

        self.boids.truncate(len - removed);
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded() -> Simulation {
        Simulation::new(SimulationConfig::default().with_seed(3)).expect("default config is valid")
    }

    #[test]
    fn compaction_removes_only_dead() {
        let mut sim = seeded();
        for i in 0..6 {
            sim.spawn_one(Role::Flocker, Vec3::new(i as f32, 10.0, 0.0), Vec3::X);
        }
        for index in [0, 2, 5] {
            sim.boid_mut(index).expect("boid exists").kill();
        }

        assert_eq!(sim.compact_dead(), 3);
        assert_eq!(sim.len(), 3);
        assert!(sim.boids().iter().all(Boid::is_alive));

        let mut xs: Vec<f32> = sim.boids().iter().map(|b| b.position.x).collect();
        xs.sort_by(f32::total_cmp);
        assert_eq!(xs, vec![1.0, 3.0, 4.0]);
    }

    #[test]
    fn compaction_of_all_dead_empties() {
        let mut sim = seeded();
        sim.spawn_population(Role::Prey, 4);
        for index in 0..4 {
            sim.boid_mut(index).expect("boid exists").kill();
        }
        assert_eq!(sim.compact_dead(), 4);
        assert!(sim.is_empty());
    }

    #[test]
    fn spawned_boids_start_inside_bounds() {
        let mut sim = seeded();
        sim.spawn_population(Role::Flocker, 50);
        let bounds = *sim.bounds();
        for boid in sim.boids() {
            assert!(bounds.contains(boid.position));
            let speed = boid.velocity.length();
            assert!((1.0 - 1e-4..=10.0 + 1e-4).contains(&speed), "speed {speed}");
        }
    }

    #[test]
    fn same_seed_same_population() {
        let mut a = seeded();
        let mut b = seeded();
        a.spawn_population(Role::Prey, 10);
        b.spawn_population(Role::Prey, 10);
        assert_eq!(a.boids(), b.boids());
    }

    #[test]
    fn position_of_out_of_range_is_none() {
        let mut sim = seeded();
        sim.spawn_one(Role::Prey, Vec3::ONE, Vec3::X);
        assert_eq!(sim.position_of(0), Some(Vec3::ONE));
        assert_eq!(sim.position_of(1), None);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = SimulationConfig {
            bounds: Bounds::new(Vec3::ONE, Vec3::ZERO),
            ..SimulationConfig::default()
        };
        assert!(Simulation::new(config).is_err());
    }

    #[test]
    fn obstacles_are_cleared_with_population() {
        let mut sim = seeded();
        let id = sim.add_obstacle(Vec3::new(0.0, 5.0, 0.0), Vec3::ONE);
        sim.add_obstacle(Vec3::new(5.0, 5.0, 0.0), Vec3::ONE);
        assert!(sim.remove_obstacle(id));
        assert_eq!(sim.obstacles().len(), 1);

        sim.spawn_population(Role::Prey, 5);
        sim.clear_all();
        assert!(sim.is_empty());
        assert!(sim.obstacles().is_empty());
    }
}
