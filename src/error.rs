/*
 * Error Module
 *
 * Errors only arise while building a simulation or loading its config.
 * The per-tick path never fails: degenerate geometry contributes no steering.
 */

use glam::Vec3;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimulationError {
    /// World bounds must span a non-empty box on every axis.
    #[error("invalid world bounds: min {min} must be below max {max} on every axis")]
    InvalidBounds { min: Vec3, max: Vec3 },
    /// Spawn speed range must be finite, non-negative and ordered.
    #[error("invalid spawn speed range {min}..{max}")]
    InvalidSpawnSpeed { min: f32, max: f32 },
    #[error("failed to parse simulation config: {0}")]
    Config(#[from] serde_json::Error),
    #[error("failed to read simulation config: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SimulationError>;
