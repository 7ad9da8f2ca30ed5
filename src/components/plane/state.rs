use nalgebra::{UnitQuaternion, Vector3};
use serde::{Deserialize, Serialize};

use crate::components::plane::{ControlReduction, FailureState};
use crate::utils::SmoothDamp;

/// Pitch, roll and yaw values for one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ShapedInput {
    pub pitch: f64,
    pub roll: f64,
    pub yaw: f64,
}

impl ShapedInput {
    pub fn new(pitch: f64, roll: f64, yaw: f64) -> Self {
        Self { pitch, roll, yaw }
    }

    pub fn zero() -> Self {
        Self::default()
    }
}

/// Smoothed inputs plus the auxiliary velocities the smoother carries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SmoothedInput {
    pub value: ShapedInput,
    #[serde(skip)]
    pub pitch: SmoothDamp,
    #[serde(skip)]
    pub roll: SmoothDamp,
    #[serde(skip)]
    pub yaw: SmoothDamp,
}

impl SmoothedInput {
    /// Drops the smoothed value and the carried velocities.
    pub fn reset(&mut self) {
        self.value = ShapedInput::zero();
        self.pitch.reset();
        self.roll.reset();
        self.yaw.reset();
    }
}

/// Chase camera state advanced by the flight model.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CameraState {
    pub fov: f64,
    pub look_yaw: f64,
    pub look_pitch: f64,
    pub free_look: bool,
    /// Offsets captured when free-look was released.
    pub reset_from: (f64, f64),
    /// Time since free-look was released; `None` when no reset is running.
    pub reset_elapsed: Option<f64>,
}

/// Mutable flight state of a single plane.
///
/// Owned exclusively by one `FlightModel`; nothing else mutates it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlightState {
    /// Attitude quaternion (rotation from body to world frame)
    pub attitude: UnitQuaternion<f64>,
    /// Position in world space, NED [m]
    pub position: Vector3<f64>,
    /// Altitude above the origin [m]
    pub altitude: f64,
    /// Pitch angle, positive nose up [deg]
    pub pitch_angle: f64,
    pub current_speed: f64,
    pub target_speed: f64,
    /// Body rates [deg/s]: x roll, y pitch, z yaw
    pub angular_velocity: Vector3<f64>,
    pub input: SmoothedInput,
    pub health: f64,
    pub failure: FailureState,
    pub control_reduction: ControlReduction,
    /// Time the stall-prone condition has persisted [s]
    pub adverse_timer: f64,
    pub warning_level: f64,
    pub camera: CameraState,
}

impl FlightState {
    pub fn new(speed: f64, health: f64, fov: f64) -> Self {
        Self {
            attitude: UnitQuaternion::identity(),
            position: Vector3::zeros(),
            altitude: 0.0,
            pitch_angle: 0.0,
            current_speed: speed,
            target_speed: speed,
            angular_velocity: Vector3::zeros(),
            input: SmoothedInput::default(),
            health,
            failure: FailureState::Normal,
            control_reduction: ControlReduction::default(),
            adverse_timer: 0.0,
            warning_level: 0.0,
            camera: CameraState {
                fov,
                ..Default::default()
            },
        }
    }

    /// Forward unit vector in world space.
    pub fn forward(&self) -> Vector3<f64> {
        self.attitude * Vector3::x()
    }

    pub fn is_destroyed(&self) -> bool {
        self.health <= 0.0
    }
}
