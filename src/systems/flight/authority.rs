use crate::components::plane::{AuthorityReport, FlightConfig, FlightState, ShapedInput};
use crate::systems::flight::loop_prevention::{LoopPrevention, PitchDirection};
use crate::utils::{clamp01, lerp};

/// Low airspeed never removes more than this much authority.
pub const MIN_SPEED_AUTHORITY: f64 = 0.2;

/// Multiplicative factors that scale shaped input before it reaches the
/// attitude integrator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlAuthority {
    /// Airspeed factor, within [0.2, 1]
    pub speed: f64,
    /// Pitch-up attenuation near the ceiling, within [floor, 1]
    pub altitude: f64,
    /// Failure-state reduction, within [0, 1]
    pub failure: f64,
    pub loop_up: f64,
    pub loop_down: f64,
    /// Pull-up multiplier in steep dives, >= 1
    pub recovery_boost: f64,
    /// How much the throttle can still climb, within [0, 1]
    pub throttle_effectiveness: f64,
}

impl Default for ControlAuthority {
    fn default() -> Self {
        Self {
            speed: 1.0,
            altitude: 1.0,
            failure: 1.0,
            loop_up: 1.0,
            loop_down: 1.0,
            recovery_boost: 1.0,
            throttle_effectiveness: 1.0,
        }
    }
}

impl ControlAuthority {
    pub fn pitch_up(&self) -> f64 {
        clamp01(self.speed * self.altitude * self.failure * self.loop_up)
    }

    pub fn pitch_down(&self) -> f64 {
        clamp01(self.speed * self.failure * self.loop_down)
    }

    pub fn roll(&self) -> f64 {
        clamp01(self.speed * self.failure)
    }

    pub fn yaw(&self) -> f64 {
        clamp01(self.speed * self.failure)
    }

    /// Pitch-up authority that actually turns into altitude.
    pub fn climb(&self) -> f64 {
        clamp01(self.pitch_up() * self.throttle_effectiveness)
    }

    pub fn report(&self) -> AuthorityReport {
        AuthorityReport {
            pitch_up: self.pitch_up(),
            pitch_down: self.pitch_down(),
            roll: self.roll(),
            yaw: self.yaw(),
            climb: self.climb(),
        }
    }
}

/// `clamp01(speed / air_normal_speed)`, floored at [`MIN_SPEED_AUTHORITY`].
pub fn speed_factor(speed: f64, cfg: &FlightConfig) -> f64 {
    clamp01(speed / cfg.speed.air_normal_speed).max(MIN_SPEED_AUTHORITY)
}

/// 0 below the warning threshold, 1 at the service ceiling.
pub fn altitude_factor(altitude: f64, cfg: &FlightConfig) -> f64 {
    if !cfg.features.ceiling_enabled() {
        return 0.0;
    }
    let band = cfg.altitude.max_altitude - cfg.altitude.warning_threshold;
    clamp01((altitude - cfg.altitude.warning_threshold) / band)
}

/// Computes the authority available this tick.
pub fn compute(
    state: &FlightState,
    cfg: &FlightConfig,
    loop_policy: &dyn LoopPrevention,
) -> ControlAuthority {
    let af = altitude_factor(state.altitude, cfg);

    ControlAuthority {
        speed: speed_factor(state.current_speed, cfg),
        altitude: lerp(1.0, cfg.altitude.authority_floor, af * af),
        failure: state.control_reduction.factor(),
        loop_up: loop_policy.pitch_authority(PitchDirection::Up),
        loop_down: loop_policy.pitch_authority(PitchDirection::Down),
        recovery_boost: loop_policy
            .recovery_boost(state.pitch_angle)
            .min(cfg.loop_prevention.recovery_boost.max(1.0)),
        throttle_effectiveness: clamp01(1.0 - af),
    }
}

/// Scales shaped input by the authority in the direction it is pushing.
pub fn modulate(shaped: ShapedInput, authority: &ControlAuthority) -> ShapedInput {
    let pitch = if shaped.pitch >= 0.0 {
        shaped.pitch * authority.pitch_up() * authority.recovery_boost
    } else {
        shaped.pitch * authority.pitch_down()
    };

    ShapedInput {
        pitch,
        roll: shaped.roll * authority.roll(),
        yaw: shaped.yaw * authority.yaw(),
    }
}

/// The pitch response the pilot feels relative to full stick, for the HUD.
pub fn effective_pitch_sensitivity(authority: &ControlAuthority, cfg: &FlightConfig) -> f64 {
    cfg.input.pitch_sensitivity_multiplier * authority.pitch_up() * authority.recovery_boost
}
