use nalgebra::Vector3;

use crate::components::plane::{FailureState, FlightConfig, FlightState};
use crate::systems::flight::failure::FORCED_DESCENT_GRAVITY;
use crate::utils::clamp01;

/// World-space velocity handed to the physics collaborator.
///
/// Forward airspeed plus a per-tick gravity sag. While stalling or in
/// freefall the airspeed part is blended towards a ballistic fall.
pub fn emit(state: &FlightState, cfg: &FlightConfig, dt: f64) -> Vector3<f64> {
    let down = Vector3::z();
    let g = cfg.physics.gravitational_force;

    let mut velocity = state.forward() * state.current_speed;

    if let Some(timer) = state.failure.fall_timer() {
        let blend = if cfg.stall.blend_time > 0.0 {
            clamp01(timer / cfg.stall.blend_time)
        } else {
            1.0
        };
        let falling = velocity * cfg.stall.residual_lift + down * g * timer;
        velocity = velocity.lerp(&falling, blend);
    }

    let sag = g * dt * cfg.physics.gravity_velocity_scale * gravity_multiplier(&state.failure, cfg);
    velocity + down * sag
}

pub fn gravity_multiplier(failure: &FailureState, cfg: &FlightConfig) -> f64 {
    match failure {
        FailureState::Stalling { .. } | FailureState::Freefalling { .. } => {
            cfg.stall.gravity_multiplier
        }
        FailureState::ForcedDescent { .. } => FORCED_DESCENT_GRAVITY,
        _ => 1.0,
    }
}

/// Velocity while flight is suspended for repairs: straight along the nose.
pub fn frozen(state: &FlightState) -> Vector3<f64> {
    state.forward() * state.current_speed
}
