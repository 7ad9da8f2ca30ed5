use crate::components::plane::{FailureState, FlightConfig, FlightState};
use crate::utils::{clamp01, deg_to_rad, exp_blend, lerp};

/// Target airspeed implied by throttle, attitude, altitude and failure state.
pub fn target_speed(
    throttle: f64,
    throttle_effectiveness: f64,
    pitch_angle: f64,
    altitude: f64,
    failure: &FailureState,
    cfg: &FlightConfig,
) -> f64 {
    let speed = &cfg.speed;
    let normal = speed.air_normal_speed;

    let mut target = if throttle >= 0.0 {
        lerp(normal, speed.air_boost_speed, throttle * throttle_effectiveness)
    } else {
        lerp(normal, normal * speed.reverse_speed_fraction, -throttle)
    };

    let pitch_influence = deg_to_rad(pitch_angle).sin();
    if pitch_influence < 0.0 {
        target *= 1.0 + pitch_influence.abs() * speed.dive_speed_boost;
    } else {
        target *= 1.0 - pitch_influence * speed.climb_speed_penalty;
    }
    target += target * -pitch_influence * speed.pitch_speed_influence;

    let steepness = pitch_angle.max(0.0) / 90.0;
    let threshold = speed.extreme_climb_threshold;
    if steepness > threshold && threshold < 1.0 {
        let t = clamp01((steepness - threshold) / (1.0 - threshold));
        target *= 1.0 - t * t;
    }

    if cfg.features.ceiling_enabled() {
        let max_altitude = cfg.altitude.max_altitude;
        let start = cfg.altitude.speed_penalty_start * max_altitude;
        if altitude > start {
            let t = clamp01((altitude - start) / (max_altitude - start));
            target *= lerp(1.0, cfg.altitude.speed_penalty_floor, t * t);
        }
    }

    if matches!(failure, FailureState::Stalling { .. }) {
        target *= cfg.stall.speed_penalty;
    }

    target.max(0.0)
}

/// Moves `current_speed` towards the target with asymmetric exponential
/// approach rates.
pub fn approach(current: f64, target: f64, cfg: &FlightConfig, dt: f64) -> f64 {
    let rate = if target > current {
        cfg.speed.acceleration_rate
    } else {
        cfg.speed.deceleration_rate
    };
    current + (target - current) * exp_blend(rate, dt)
}

/// Updates target and current speed for one tick.
pub fn update(
    state: &mut FlightState,
    throttle: f64,
    throttle_effectiveness: f64,
    cfg: &FlightConfig,
    dt: f64,
) {
    state.target_speed = target_speed(
        throttle,
        throttle_effectiveness,
        state.pitch_angle,
        state.altitude,
        &state.failure,
        cfg,
    );
    state.current_speed = approach(state.current_speed, state.target_speed, cfg, dt);
}
