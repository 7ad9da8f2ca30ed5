use serde::{Deserialize, Serialize};

/// Service ceiling behaviour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AltitudeConfig {
    /// Service ceiling (m).
    pub max_altitude: f64,
    /// Altitude where pitch-up authority starts fading (m).
    pub warning_threshold: f64,
    /// Lowest pitch-up authority left at the ceiling.
    pub authority_floor: f64,
    /// Fraction of `max_altitude` where the speed penalty begins.
    pub speed_penalty_start: f64,
    /// Speed multiplier reached at the ceiling.
    pub speed_penalty_floor: f64,
    /// Pitch the plane is forced to during a forced descent (degrees).
    pub forced_descent_pitch: f64,
    pub forced_descent_duration: f64,
    /// Proportional gain driving pitch towards `forced_descent_pitch` (1/s).
    pub forced_descent_gain: f64,
    pub forced_descent_control_factor: f64,
}

impl Default for AltitudeConfig {
    fn default() -> Self {
        Self {
            max_altitude: 1000.0,
            warning_threshold: 800.0,
            authority_floor: 0.1,
            speed_penalty_start: 0.7,
            speed_penalty_floor: 0.4,
            forced_descent_pitch: -30.0,
            forced_descent_duration: 3.0,
            forced_descent_gain: 2.0,
            forced_descent_control_factor: 0.2,
        }
    }
}

/// Stall and freefall thresholds, penalties and recovery.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StallConfig {
    /// Nose-up pitch beyond which a slow plane is in danger (degrees).
    pub pitch_threshold: f64,
    /// Fraction of cruise speed below which a steep climb stalls.
    pub speed_fraction: f64,
    /// How long the adverse condition must persist before stalling (s).
    pub trigger_time: f64,
    pub warning_level_threshold: f64,
    /// Distance below the ceiling where the altitude warning starts (m).
    pub altitude_warning_buffer: f64,
    /// Target speed multiplier while stalling.
    pub speed_penalty: f64,
    /// Control reduction factor on stall entry.
    pub control_factor: f64,
    /// Nose-down pitch required to recover (degrees).
    pub recovery_pitch: f64,
    pub recovery_speed_fraction: f64,
    /// Time the recovery condition must hold (s).
    pub recovery_time: f64,
    /// Control authority ramp after leaving a failure (s).
    pub recovery_duration: f64,
    /// Magnitude of the randomised rate impulse on entry (deg/s).
    pub entry_impulse: f64,
    pub nose_drop_rate: f64,
    pub wobble_rate: f64,
    pub freefall_speed_fraction: f64,
    pub freefall_min_time: f64,
    pub freefall_nose_drop_rate: f64,
    pub gravity_multiplier: f64,
    /// Time over which velocity blends towards a ballistic fall (s).
    pub blend_time: f64,
    /// Fraction of forward velocity kept when fully blended.
    pub residual_lift: f64,
}

impl Default for StallConfig {
    fn default() -> Self {
        Self {
            pitch_threshold: 45.0,
            speed_fraction: 0.8,
            trigger_time: 1.5,
            warning_level_threshold: 0.3,
            altitude_warning_buffer: 100.0,
            speed_penalty: 0.7,
            control_factor: 0.1,
            recovery_pitch: 10.0,
            recovery_speed_fraction: 0.9,
            recovery_time: 2.0,
            recovery_duration: 1.5,
            entry_impulse: 90.0,
            nose_drop_rate: 25.0,
            wobble_rate: 20.0,
            freefall_speed_fraction: 0.25,
            freefall_min_time: 1.0,
            freefall_nose_drop_rate: 45.0,
            gravity_multiplier: 2.0,
            blend_time: 1.0,
            residual_lift: 0.3,
        }
    }
}

/// Tuning for the strict loop-prevention policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoopPreventionConfig {
    /// Sliding window over which pitch change is accumulated (s).
    pub window: f64,
    /// Accumulated pitch change that starts reducing authority (degrees).
    pub angle_threshold: f64,
    /// Maximum fraction of authority removed.
    pub strength: f64,
    /// Nose-down pitch beyond which pull-up is boosted (degrees).
    pub recovery_angle: f64,
    pub recovery_boost: f64,
}

impl Default for LoopPreventionConfig {
    fn default() -> Self {
        Self {
            window: 0.5,
            angle_threshold: 45.0,
            strength: 0.8,
            recovery_angle: 70.0,
            recovery_boost: 1.5,
        }
    }
}

/// What happens when the plane reaches `max_altitude`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CeilingResponse {
    /// No ceiling: altitude neither attenuates controls nor triggers failures.
    Disabled,
    /// The plane stalls at the ceiling.
    #[default]
    Stall,
    /// The nose is forced down for a fixed time.
    ForcedDescent,
}

/// Independently toggleable flight-model policies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureFlags {
    pub stall_model: bool,
    pub ceiling: CeilingResponse,
    pub loop_prevention: bool,
}

impl Default for FeatureFlags {
    fn default() -> Self {
        Self {
            stall_model: true,
            ceiling: CeilingResponse::Stall,
            loop_prevention: false,
        }
    }
}

impl FeatureFlags {
    pub fn ceiling_enabled(&self) -> bool {
        self.ceiling != CeilingResponse::Disabled
    }
}
