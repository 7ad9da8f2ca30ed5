use bevy::log::{debug, info};
use nalgebra::Vector3;
use rand::Rng;

use crate::components::plane::{CeilingResponse, FailureState, FlightConfig, FlightState};
use crate::utils::clamp01;

/// Wobble frequency during a stall (rad/s).
const WOBBLE_FREQUENCY: f64 = 6.0;

/// Gravity multiplier while the nose is forced down.
pub const FORCED_DESCENT_GRAVITY: f64 = 1.5;

/// Stall warning level in [0, 1].
///
/// The larger of a nose-up-and-slow term and a nearing-the-ceiling term.
pub fn warning_level(pitch_angle: f64, speed: f64, altitude: f64, cfg: &FlightConfig) -> f64 {
    let stall = &cfg.stall;
    let normal = cfg.speed.air_normal_speed;

    let pitch_term = clamp01(pitch_angle / stall.pitch_threshold);
    let slow_band = normal * (1.0 - stall.speed_fraction);
    let speed_term = if slow_band > 0.0 {
        clamp01((normal - speed) / slow_band)
    } else if speed < normal {
        1.0
    } else {
        0.0
    };

    let altitude_term = if cfg.features.ceiling_enabled() && stall.altitude_warning_buffer > 0.0 {
        let start = cfg.altitude.max_altitude - stall.altitude_warning_buffer;
        clamp01((altitude - start) / stall.altitude_warning_buffer)
    } else {
        0.0
    };

    (pitch_term * speed_term).max(altitude_term)
}

/// Nose-up at low airspeed: the condition that stalls the plane if held.
pub fn is_adverse(pitch_angle: f64, speed: f64, cfg: &FlightConfig) -> bool {
    pitch_angle > cfg.stall.pitch_threshold
        && speed < cfg.stall.speed_fraction * cfg.speed.air_normal_speed
}

/// Starts a repair if requested and the airframe is damaged.
///
/// Returns true when a repair is running after the call.
pub fn request_repair(state: &mut FlightState, requested: bool, cfg: &FlightConfig) -> bool {
    if matches!(state.failure, FailureState::Repairing { .. }) {
        return true;
    }
    if !requested || state.health >= cfg.health.max_health {
        return false;
    }
    transition(state, FailureState::Repairing { timer: 0.0 });
    state.adverse_timer = 0.0;
    true
}

/// Advances a running repair. Returns true while flight stays suspended.
pub fn advance_repair(state: &mut FlightState, cfg: &FlightConfig, dt: f64) -> bool {
    let FailureState::Repairing { timer } = state.failure else {
        return false;
    };
    let timer = timer + dt;
    if timer < cfg.health.repair_time {
        state.failure = FailureState::Repairing { timer };
        return true;
    }

    state.health = (state.health + cfg.health.repair_amount).min(cfg.health.max_health);
    state.control_reduction.restore();
    transition(state, FailureState::Normal);
    info!("Repair complete, health {:.0}", state.health);
    false
}

/// Runs one tick of the failure state machine.
///
/// Returns extra body rates (deg/s, x roll, y pitch, z yaw) the attitude
/// integrator applies on top of the pilot's rates.
pub fn step<R: Rng + ?Sized>(
    state: &mut FlightState,
    cfg: &FlightConfig,
    rng: &mut R,
    dt: f64,
) -> Vector3<f64> {
    let stall = &cfg.stall;
    let normal = cfg.speed.air_normal_speed;

    state.warning_level = warning_level(
        state.pitch_angle,
        state.current_speed,
        state.altitude,
        cfg,
    );
    if cfg.features.stall_model
        && state.failure.accepts_new_failure()
        && is_adverse(state.pitch_angle, state.current_speed, cfg)
    {
        state.adverse_timer += dt;
    } else {
        state.adverse_timer = 0.0;
    }

    let mut extra = Vector3::zeros();

    match state.failure {
        FailureState::Stalling {
            timer,
            recovery_progress,
        } => {
            let timer = timer + dt;
            let recovering = state.pitch_angle < -stall.recovery_pitch
                && state.current_speed > stall.recovery_speed_fraction * normal;
            let recovery_progress = if recovering {
                recovery_progress + dt
            } else {
                (recovery_progress - 0.5 * dt).max(0.0)
            };

            extra = Vector3::new(
                (timer * WOBBLE_FREQUENCY).sin() * stall.wobble_rate,
                -stall.nose_drop_rate,
                (timer * WOBBLE_FREQUENCY * 0.5).cos() * stall.wobble_rate * 0.5,
            );
            debug!(
                "Stalling: timer {:.2}s, recovery {:.2}s",
                timer, recovery_progress
            );

            if recovery_progress >= stall.recovery_time {
                begin_recovery(state);
            } else {
                state.failure = FailureState::Stalling {
                    timer,
                    recovery_progress,
                };
            }
            return extra;
        }
        FailureState::Freefalling { timer } => {
            let timer = timer + dt;
            extra.y = -stall.freefall_nose_drop_rate;
            if timer >= stall.freefall_min_time
                && state.current_speed > stall.recovery_speed_fraction * normal
            {
                begin_recovery(state);
            } else {
                state.failure = FailureState::Freefalling { timer };
            }
            return extra;
        }
        FailureState::ForcedDescent { progress } => {
            let altitude = &cfg.altitude;
            extra.y = (altitude.forced_descent_pitch - state.pitch_angle)
                * altitude.forced_descent_gain;

            let progress = if altitude.forced_descent_duration > 0.0 {
                progress + dt / altitude.forced_descent_duration
            } else {
                1.0
            };
            if progress >= 1.0 {
                begin_recovery(state);
            } else {
                state.failure = FailureState::ForcedDescent { progress };
            }
            return extra;
        }
        FailureState::Recovering { elapsed } => {
            let elapsed = elapsed + dt;
            state
                .control_reduction
                .ramp(elapsed, stall.recovery_duration);
            if elapsed >= stall.recovery_duration {
                state.control_reduction.restore();
                transition(state, FailureState::Normal);
            } else {
                state.failure = FailureState::Recovering { elapsed };
            }
        }
        FailureState::Repairing { .. } => return extra,
        FailureState::Normal | FailureState::StallWarning { .. } => {}
    }

    if state.failure.accepts_new_failure() {
        extra = check_new_failures(state, cfg, rng);
    }
    extra
}

fn check_new_failures<R: Rng + ?Sized>(
    state: &mut FlightState,
    cfg: &FlightConfig,
    rng: &mut R,
) -> Vector3<f64> {
    let stall = &cfg.stall;
    let stall_model = cfg.features.stall_model;

    if state.altitude >= cfg.altitude.max_altitude {
        match cfg.features.ceiling {
            CeilingResponse::Stall if stall_model => return enter_stall(state, cfg, rng),
            CeilingResponse::Stall | CeilingResponse::ForcedDescent => {
                enter_forced_descent(state, cfg);
                return Vector3::zeros();
            }
            CeilingResponse::Disabled => {}
        }
    }

    if !stall_model {
        if matches!(state.failure, FailureState::StallWarning { .. }) {
            transition(state, FailureState::Normal);
        }
        return Vector3::zeros();
    }

    if state.current_speed < stall.freefall_speed_fraction * cfg.speed.air_normal_speed {
        state.control_reduction.suppress(stall.control_factor);
        state.adverse_timer = 0.0;
        transition(state, FailureState::Freefalling { timer: 0.0 });
        return Vector3::new(0.0, -stall.freefall_nose_drop_rate, 0.0);
    }

    if state.adverse_timer >= stall.trigger_time {
        return enter_stall(state, cfg, rng);
    }

    match state.failure {
        FailureState::Recovering { .. } => {}
        _ if state.warning_level > stall.warning_level_threshold => {
            let entering = !matches!(state.failure, FailureState::StallWarning { .. });
            state.failure = FailureState::StallWarning {
                level: state.warning_level,
            };
            if entering {
                info!("Stall warning, level {:.2}", state.warning_level);
            }
        }
        FailureState::StallWarning { .. } => transition(state, FailureState::Normal),
        _ => {}
    }
    Vector3::zeros()
}

fn enter_stall<R: Rng + ?Sized>(
    state: &mut FlightState,
    cfg: &FlightConfig,
    rng: &mut R,
) -> Vector3<f64> {
    let stall = &cfg.stall;

    // Disorientation kick on the rates themselves, so it decays naturally
    state.angular_velocity.x += rng.gen_range(-1.0..=1.0) * stall.entry_impulse;
    state.angular_velocity.z += rng.gen_range(-1.0..=1.0) * stall.entry_impulse;
    state.angular_velocity.y -= stall.nose_drop_rate;

    state.control_reduction.suppress(stall.control_factor);
    state.adverse_timer = 0.0;
    transition(
        state,
        FailureState::Stalling {
            timer: 0.0,
            recovery_progress: 0.0,
        },
    );
    Vector3::new(0.0, -stall.nose_drop_rate, 0.0)
}

fn enter_forced_descent(state: &mut FlightState, cfg: &FlightConfig) {
    state
        .control_reduction
        .suppress(cfg.altitude.forced_descent_control_factor);
    state.adverse_timer = 0.0;
    transition(state, FailureState::ForcedDescent { progress: 0.0 });
}

fn begin_recovery(state: &mut FlightState) {
    state.control_reduction.begin_recovery();
    transition(state, FailureState::Recovering { elapsed: 0.0 });
}

fn transition(state: &mut FlightState, next: FailureState) {
    let from = state.failure.kind();
    let to = next.kind();
    state.failure = next;
    if from != to {
        info!(
            "Flight state {:?} -> {:?} (speed {:.1} m/s, pitch {:.1} deg, altitude {:.0} m)",
            from, to, state.current_speed, state.pitch_angle, state.altitude
        );
    }
}
