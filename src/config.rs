/*
 * Configuration Module
 *
 * World bounds, spawn settings and per-role parameter blocks for a
 * simulation. Loadable from JSON; any missing field takes its default.
 */

use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SimulationError};
use crate::params::{BehaviorParams, HunterParams, PreyParams};

/// Axis-aligned world box the boids steer to stay inside.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: Vec3,
    pub max: Vec3,
}

impl Default for Bounds {
    fn default() -> Self {
        Self {
            min: Vec3::new(-20.0, 0.0, -20.0),
            max: Vec3::new(20.0, 20.0, 20.0),
        }
    }
}

impl Bounds {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) / 2.0
    }

    pub fn contains(&self, point: Vec3) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }

    /// True if any coordinate is closer than `margin` to the minimum corner.
    pub fn near_min(&self, point: Vec3, margin: f32) -> bool {
        (point - self.min).cmplt(Vec3::splat(margin)).any()
    }

    /// True if any coordinate is closer than `margin` to the maximum corner.
    pub fn near_max(&self, point: Vec3, margin: f32) -> bool {
        (self.max - point).cmplt(Vec3::splat(margin)).any()
    }

    fn validate(&self) -> Result<()> {
        if !self.min.is_finite() || !self.max.is_finite() || !self.min.cmplt(self.max).all() {
            return Err(SimulationError::InvalidBounds {
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub bounds: Bounds,
    /// Seed for spawn randomness; `None` draws one from the OS.
    pub seed: Option<u64>,
    pub spawn_speed_min: f32,
    pub spawn_speed_max: f32,
    pub flocking: BehaviorParams,
    pub prey: PreyParams,
    pub hunter: HunterParams,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            bounds: Bounds::default(),
            seed: None,
            spawn_speed_min: 1.0,
            spawn_speed_max: 10.0,
            flocking: BehaviorParams::default(),
            prey: PreyParams::default(),
            hunter: HunterParams::default(),
        }
    }
}

impl SimulationConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Checks world bounds and the spawn speed range. Steering parameters
    /// are left to the caller.
    pub fn validate(&self) -> Result<()> {
        self.bounds.validate()?;

        let (min, max) = (self.spawn_speed_min, self.spawn_speed_max);
        if !min.is_finite() || !max.is_finite() || min < 0.0 || min > max {
            return Err(SimulationError::InvalidSpawnSpeed { min, max });
        }
        Ok(())
    }
}
