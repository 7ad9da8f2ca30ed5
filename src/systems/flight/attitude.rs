use nalgebra::{UnitQuaternion, Vector3};

use crate::components::plane::{FlightState, RotationConfig, ShapedInput};
use crate::utils::{deg_to_rad, exp_blend};

/// Converts configured axis speeds into degrees per second at full input.
pub const RATE_SCALE: f64 = 100.0;

/// Advances the body rates from modulated input and rotates the attitude.
///
/// `extra_rate` carries failure-state rotation (nose drop, wobble) in deg/s,
/// laid out like `angular_velocity`: x roll, y pitch, z yaw. It is applied on
/// top of the integrated rates without feeding back into them.
///
/// Returns the body-frame rotation applied this tick.
pub fn integrate(
    state: &mut FlightState,
    input: ShapedInput,
    extra_rate: Vector3<f64>,
    cfg: &RotationConfig,
    dt: f64,
) -> UnitQuaternion<f64> {
    let blend = exp_blend(cfg.response_rate, dt);
    let omega = &mut state.angular_velocity;

    omega.y = advance_axis(
        omega.y,
        input.pitch,
        cfg.pitch_speed,
        cfg.rotational_damping,
        cfg.input_deadzone,
        blend,
    );
    omega.z = advance_axis(
        omega.z,
        input.yaw,
        cfg.yaw_speed,
        cfg.rotational_damping,
        cfg.input_deadzone,
        blend,
    );
    omega.x = advance_axis(
        omega.x,
        input.roll,
        cfg.roll_speed,
        cfg.roll_damping,
        cfg.input_deadzone,
        blend,
    );

    let delta = body_rotation(*omega + extra_rate, dt);
    state.attitude =
        UnitQuaternion::from_quaternion((state.attitude * delta).into_inner().normalize());
    delta
}

fn advance_axis(
    omega: f64,
    input: f64,
    axis_speed: f64,
    damping: f64,
    deadzone: f64,
    blend: f64,
) -> f64 {
    if input.abs() > deadzone {
        let target = input * axis_speed * RATE_SCALE;
        omega + (target - omega) * blend
    } else {
        omega * damping
    }
}

/// Intrinsic rotation for body rates held over `dt`, composed pitch, then
/// yaw, then roll.
pub fn body_rotation(rate: Vector3<f64>, dt: f64) -> UnitQuaternion<f64> {
    let pitch = UnitQuaternion::from_axis_angle(&Vector3::y_axis(), deg_to_rad(rate.y * dt));
    let yaw = UnitQuaternion::from_axis_angle(&Vector3::z_axis(), deg_to_rad(rate.z * dt));
    let roll = UnitQuaternion::from_axis_angle(&Vector3::x_axis(), deg_to_rad(rate.x * dt));
    pitch * yaw * roll
}
