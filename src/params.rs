/*
 * Parameters Module
 *
 * Tunable steering parameters for each role. Every behavior instance carries
 * its own copy, so tuning one agent never affects another. All blocks are
 * serde-friendly and fall back to the role's defaults for missing fields.
 */

use serde::{Deserialize, Deserializer, Serialize};

pub const VIEW_DISTANCE: f32 = 2.5;
pub const VIEW_ANGLE: f32 = 100.0;
pub const MAX_SPEED: f32 = 5.0;
pub const MIN_BOID_DISTANCE: f32 = 0.5;
pub const OBSTACLE_AVOIDANCE_DIST: f32 = 1.5;
pub const OBSTACLE_DODGE_STRENGTH: f32 = 3.0;

pub const ALIGNMENT_WEIGHT: f32 = 0.3;
pub const COHESION_WEIGHT: f32 = 0.02;
pub const SEPARATION_WEIGHT: f32 = 0.05;
pub const AVOIDANCE_WEIGHT: f32 = 0.3;

pub const ESCAPE_WEIGHT: f32 = ALIGNMENT_WEIGHT / 2.0;

pub const HUNTING_WEIGHT: f32 = 0.3;
pub const PREY_VELOCITY_WEIGHT: f32 = 0.4;
pub const EAT_DISTANCE: f32 = -0.2;
pub const ACCELERATED_MAX_SPEED: f32 = 15.0;
pub const HUNTER_MAX_SPEED: f32 = ACCELERATED_MAX_SPEED / 2.0;
pub const HUNTER_SPEED: f32 = 10.0;
pub const HUNTER_ACCELERATION: f32 = 1.0;
pub const HUNTER_ENERGY: f32 = 10.0;
pub const EAT_ENERGY: f32 = 10.0;
pub const TIME_DOMINATING: f32 = 3.0;
pub const MAX_TARGETS_EATEN: u32 = 3;
pub const GROWTH_PER_MEAL: f32 = 1.1;

// Shared perception and steering parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BehaviorParams {
    pub view_distance: f32,
    /// Half-angle of the view cone in degrees.
    pub view_angle: f32,
    pub max_speed: f32,
    pub min_boid_distance: f32,
    pub obstacle_avoidance_dist: f32,
    pub obstacle_dodge_strength: f32,

    pub alignment_weight: f32,
    pub cohesion_weight: f32,
    pub separation_weight: f32,
    pub avoidance_weight: f32,
}

impl Default for BehaviorParams {
    fn default() -> Self {
        Self {
            view_distance: VIEW_DISTANCE,
            view_angle: VIEW_ANGLE,
            max_speed: MAX_SPEED,
            min_boid_distance: MIN_BOID_DISTANCE,
            obstacle_avoidance_dist: OBSTACLE_AVOIDANCE_DIST,
            obstacle_dodge_strength: OBSTACLE_DODGE_STRENGTH,
            alignment_weight: ALIGNMENT_WEIGHT,
            cohesion_weight: COHESION_WEIGHT,
            separation_weight: SEPARATION_WEIGHT,
            avoidance_weight: AVOIDANCE_WEIGHT,
        }
    }
}

impl BehaviorParams {
    // Ranges for UI sliders in a presentation layer
    pub fn view_distance_range() -> std::ops::RangeInclusive<f32> {
        0.1..=20.0
    }

    pub fn view_angle_range() -> std::ops::RangeInclusive<f32> {
        0.0..=180.0
    }

    pub fn max_speed_range() -> std::ops::RangeInclusive<f32> {
        1.0..=50.0
    }

    pub fn weight_range() -> std::ops::RangeInclusive<f32> {
        0.0..=3.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreyParams {
    pub base: BehaviorParams,
    pub escape_weight: f32,
}

impl Default for PreyParams {
    fn default() -> Self {
        Self {
            base: BehaviorParams::default(),
            escape_weight: ESCAPE_WEIGHT,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HunterParams {
    /// Fields missing from a JSON `base` block keep the hunter defaults.
    #[serde(deserialize_with = "hunter_base_overlay")]
    pub base: BehaviorParams,
    pub accelerated_max_speed: f32,
    pub hunting_weight: f32,
    pub prey_velocity_weight: f32,
    /// Added to the hunter's radius to form the eat envelope. Negative narrows it.
    pub eat_distance: f32,
    /// Starting cruise speed.
    pub speed: f32,
    /// Energy burned and speed gained per second while energy lasts.
    pub acceleration: f32,
    /// Starting energy.
    pub energy: f32,
    pub eat_energy: f32,
    /// Length of the damped-steering window that follows a meal.
    pub time_dominating: f32,
    pub max_targets_eaten: u32,
    pub growth_per_meal: f32,
}

impl Default for HunterParams {
    fn default() -> Self {
        Self {
            base: hunter_base(),
            accelerated_max_speed: ACCELERATED_MAX_SPEED,
            hunting_weight: HUNTING_WEIGHT,
            prey_velocity_weight: PREY_VELOCITY_WEIGHT,
            eat_distance: EAT_DISTANCE,
            speed: HUNTER_SPEED,
            acceleration: HUNTER_ACCELERATION,
            energy: HUNTER_ENERGY,
            eat_energy: EAT_ENERGY,
            time_dominating: TIME_DOMINATING,
            max_targets_eaten: MAX_TARGETS_EATEN,
            growth_per_meal: GROWTH_PER_MEAL,
        }
    }
}

impl HunterParams {
    pub fn max_targets_eaten_range() -> std::ops::RangeInclusive<u32> {
        1..=20
    }
}

fn hunter_base() -> BehaviorParams {
    BehaviorParams {
        max_speed: HUNTER_MAX_SPEED,
        ..BehaviorParams::default()
    }
}

// Partial `base` block; every field left out falls back to the given defaults
#[derive(Default, Deserialize)]
#[serde(default)]
struct BaseOverlay {
    view_distance: Option<f32>,
    view_angle: Option<f32>,
    max_speed: Option<f32>,
    min_boid_distance: Option<f32>,
    obstacle_avoidance_dist: Option<f32>,
    obstacle_dodge_strength: Option<f32>,
    alignment_weight: Option<f32>,
    cohesion_weight: Option<f32>,
    separation_weight: Option<f32>,
    avoidance_weight: Option<f32>,
}

impl BaseOverlay {
    fn apply(self, base: BehaviorParams) -> BehaviorParams {
        BehaviorParams {
            view_distance: self.view_distance.unwrap_or(base.view_distance),
            view_angle: self.view_angle.unwrap_or(base.view_angle),
            max_speed: self.max_speed.unwrap_or(base.max_speed),
            min_boid_distance: self.min_boid_distance.unwrap_or(base.min_boid_distance),
            obstacle_avoidance_dist: self.obstacle_avoidance_dist.unwrap_or(base.obstacle_avoidance_dist),
            obstacle_dodge_strength: self.obstacle_dodge_strength.unwrap_or(base.obstacle_dodge_strength),
            alignment_weight: self.alignment_weight.unwrap_or(base.alignment_weight),
            cohesion_weight: self.cohesion_weight.unwrap_or(base.cohesion_weight),
            separation_weight: self.separation_weight.unwrap_or(base.separation_weight),
            avoidance_weight: self.avoidance_weight.unwrap_or(base.avoidance_weight),
        }
    }
}

fn hunter_base_overlay<'de, D>(deserializer: D) -> Result<BehaviorParams, D::Error>
where
    D: Deserializer<'de>,
{
    BaseOverlay::deserialize(deserializer).map(|overlay| overlay.apply(hunter_base()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hunter_defaults_differ_from_flocker() {
        let hunter = HunterParams::default();
        assert_eq!(hunter.base.max_speed, 7.5);
        assert_eq!(hunter.base.view_distance, VIEW_DISTANCE);
        assert!(hunter.eat_distance < 0.0);
    }

    #[test]
    fn prey_escape_is_half_alignment() {
        let prey = PreyParams::default();
        assert_eq!(prey.escape_weight * 2.0, prey.base.alignment_weight);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let prey: PreyParams = serde_json::from_str(r#"{ "base": { "view_angle": 45.0 }, "escape_weight": 1.0 }"#)
            .expect("valid prey params");
        assert_eq!(prey.base.view_angle, 45.0);
        assert_eq!(prey.base.max_speed, MAX_SPEED);
        assert_eq!(prey.escape_weight, 1.0);
    }

    #[test]
    fn hunter_json_without_base_keeps_hunter_speed() {
        let hunter: HunterParams = serde_json::from_str(r#"{ "eat_distance": 0.1 }"#)
            .expect("valid hunter params");
        assert_eq!(hunter.base.max_speed, HUNTER_MAX_SPEED);
        assert_eq!(hunter.eat_distance, 0.1);
    }

    #[test]
    fn partial_hunter_base_keeps_hunter_speed() {
        let hunter: HunterParams = serde_json::from_str(r#"{ "base": { "view_angle": 45.0 } }"#)
            .expect("valid hunter params");
        assert_eq!(hunter.base.view_angle, 45.0);
        assert_eq!(hunter.base.max_speed, HUNTER_MAX_SPEED);
        assert_eq!(hunter.base.view_distance, VIEW_DISTANCE);

        let hunter: HunterParams = serde_json::from_str(r#"{ "base": { "max_speed": 9.0 } }"#)
            .expect("valid hunter params");
        assert_eq!(hunter.base.max_speed, 9.0);
    }

    #[test]
    fn hunter_params_survive_json_round_trip() {
        let hunter = HunterParams::default();
        let json = serde_json::to_string(&hunter).expect("serializable");
        let back: HunterParams = serde_json::from_str(&json).expect("valid hunter params");
        assert_eq!(back, hunter);
    }
}
