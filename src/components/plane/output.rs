use bevy::prelude::*;
use nalgebra::{UnitQuaternion, Vector3};
use serde::{Deserialize, Serialize};

use crate::components::plane::FailureKind;

/// Camera targets for the chase camera collaborator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CameraOutput {
    pub fov: f64,
    pub look_yaw: f64,
    pub look_pitch: f64,
    pub free_look: bool,
}

/// Fire and reload intent forwarded to the weapon collaborator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeaponIntent {
    pub fire: bool,
    pub reload: bool,
}

/// Authority currently available on each control direction, all in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AuthorityReport {
    pub pitch_up: f64,
    pub pitch_down: f64,
    pub roll: f64,
    pub yaw: f64,
    /// Pitch-up authority scaled by how much the throttle can still climb.
    pub climb: f64,
}

impl Default for AuthorityReport {
    fn default() -> Self {
        Self {
            pitch_up: 1.0,
            pitch_down: 1.0,
            roll: 1.0,
            yaw: 1.0,
            climb: 1.0,
        }
    }
}

/// Display-only flight data for the HUD.
#[derive(Component, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Telemetry {
    pub speed: f64,
    pub target_speed: f64,
    pub pitch_angle: f64,
    pub altitude: f64,
    pub health: f64,
    pub max_health: f64,
    pub destroyed: bool,
    pub failure: FailureKind,
    pub warning_level: f64,
    pub control_reduction: f64,
    pub authority: AuthorityReport,
    /// Pitch response the pilot currently feels, relative to full stick.
    pub pitch_sensitivity: f64,
}

impl Default for Telemetry {
    fn default() -> Self {
        Self {
            speed: 0.0,
            target_speed: 0.0,
            pitch_angle: 0.0,
            altitude: 0.0,
            health: 0.0,
            max_health: 0.0,
            destroyed: false,
            failure: FailureKind::Normal,
            warning_level: 0.0,
            control_reduction: 1.0,
            authority: AuthorityReport::default(),
            pitch_sensitivity: 1.0,
        }
    }
}

/// Everything the flight model hands to its collaborators after a tick.
#[derive(Component, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlightOutput {
    /// World-space velocity for the physics collaborator [m/s]
    pub velocity: Vector3<f64>,
    /// New attitude (body to world)
    pub attitude: UnitQuaternion<f64>,
    /// Body-frame rotation applied this tick
    pub attitude_delta: UnitQuaternion<f64>,
    pub camera: CameraOutput,
    pub weapons: WeaponIntent,
    pub telemetry: Telemetry,
}

impl Default for FlightOutput {
    fn default() -> Self {
        Self {
            velocity: Vector3::zeros(),
            attitude: UnitQuaternion::identity(),
            attitude_delta: UnitQuaternion::identity(),
            camera: CameraOutput::default(),
            weapons: WeaponIntent::default(),
            telemetry: Telemetry::default(),
        }
    }
}
