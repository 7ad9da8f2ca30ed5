use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Configuration for the kinematic integration of plane outputs.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Fixed simulation step [s]
    pub timestep: f64,
    /// Velocity handed to the integrator is clamped to this magnitude [m/s]
    pub max_velocity: f64,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            timestep: 1.0 / 120.0, // 120 Hz
            max_velocity: 200.0,   // m/s
        }
    }
}

impl PhysicsConfig {
    pub fn with_timestep(timestep: f64) -> Self {
        Self {
            timestep,
            ..Default::default()
        }
    }
}
