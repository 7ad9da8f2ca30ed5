use serde::{Deserialize, Serialize};

/// Airspeed targets and how the attitude of the plane trades against them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeedConfig {
    /// Cruise airspeed with no throttle applied (m/s).
    pub air_normal_speed: f64,
    /// Airspeed at full throttle (m/s).
    pub air_boost_speed: f64,
    /// Exponential approach rate when speeding up (1/s).
    pub acceleration_rate: f64,
    /// Exponential approach rate when slowing down (1/s).
    pub deceleration_rate: f64,
    /// Fraction of cruise speed reached at full reverse throttle.
    pub reverse_speed_fraction: f64,
    /// Universal speed correction proportional to the sine of the pitch angle.
    pub pitch_speed_influence: f64,
    /// Speed bonus when diving (nose down).
    pub dive_speed_boost: f64,
    /// Speed penalty when climbing (nose up).
    pub climb_speed_penalty: f64,
    /// Normalised climb steepness above which speed bleeds away rapidly.
    pub extreme_climb_threshold: f64,
}

impl Default for SpeedConfig {
    fn default() -> Self {
        Self {
            air_normal_speed: 30.0,
            air_boost_speed: 80.0,
            acceleration_rate: 1.0,
            deceleration_rate: 0.5,
            reverse_speed_fraction: 0.5,
            pitch_speed_influence: 0.3,
            dive_speed_boost: 0.4,
            climb_speed_penalty: 0.5,
            extreme_climb_threshold: 0.7,
        }
    }
}

/// Per-axis rotation rates and inertia.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RotationConfig {
    pub pitch_speed: f64,
    pub roll_speed: f64,
    pub yaw_speed: f64,
    /// Per-tick decay of pitch and yaw rate with no input.
    pub rotational_damping: f64,
    /// Per-tick decay of roll rate with no input.
    pub roll_damping: f64,
    /// Rate at which angular velocity chases its target under input (1/s).
    pub response_rate: f64,
    pub input_deadzone: f64,
}

impl Default for RotationConfig {
    fn default() -> Self {
        Self {
            pitch_speed: 2.0,
            roll_speed: 2.0,
            yaw_speed: 1.0,
            rotational_damping: 0.97,
            roll_damping: 0.98,
            response_rate: 5.0,
            input_deadzone: 0.01,
        }
    }
}

/// Pilot input response curves and smoothing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    pub mouse_sensitivity: f64,
    pub invert_pitch_axis: bool,
    pub invert_roll_axis: bool,
    pub pitch_sensitivity_multiplier: f64,
    pub roll_sensitivity_multiplier: f64,
    pub use_exponential_pitch_response: bool,
    pub exponential_pitch_factor: f64,
    pub use_progressive_roll_response: bool,
    pub progressive_roll_threshold: f64,
    pub progressive_roll_multiplier: f64,
    /// Smoothing time for pitch and roll (seconds).
    pub input_smooth_time: f64,
    /// Smoothing time for the discrete yaw keys (seconds).
    pub keyboard_smooth_time: f64,
    /// Raw axis deltas are clamped to this magnitude before shaping.
    pub max_axis_delta: f64,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            mouse_sensitivity: 2.0,
            invert_pitch_axis: false,
            invert_roll_axis: false,
            pitch_sensitivity_multiplier: 1.0,
            roll_sensitivity_multiplier: 1.0,
            use_exponential_pitch_response: false,
            exponential_pitch_factor: 1.5,
            use_progressive_roll_response: false,
            progressive_roll_threshold: 0.3,
            progressive_roll_multiplier: 1.5,
            input_smooth_time: 0.1,
            keyboard_smooth_time: 0.15,
            max_axis_delta: 10.0,
        }
    }
}

/// Gravity as felt by the arcade model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsTuning {
    pub gravitational_force: f64,
    /// Scales the per-tick gravity sag added to the emitted velocity.
    pub gravity_velocity_scale: f64,
}

impl Default for PhysicsTuning {
    fn default() -> Self {
        Self {
            gravitational_force: 9.8,
            gravity_velocity_scale: 5.0,
        }
    }
}
