use crate::components::plane::{ControlInput, FlightConfig, InputConfig, ShapedInput, SmoothedInput};

/// Maps raw pilot input onto shaped pitch, roll and yaw targets.
///
/// The result is a target only; [`smooth`] turns it into what the plane
/// actually sees this tick.
pub fn shape(raw: &ControlInput, cfg: &FlightConfig) -> ShapedInput {
    let input = &cfg.input;

    let pitch_sign = if input.invert_pitch_axis { -1.0 } else { 1.0 };
    let roll_sign = if input.invert_roll_axis { -1.0 } else { 1.0 };

    ShapedInput {
        pitch: shape_pitch(raw.pitch * pitch_sign * input.mouse_sensitivity, input),
        roll: shape_roll(raw.roll * roll_sign * input.mouse_sensitivity, input),
        yaw: raw.yaw.axis(),
    }
}

/// Sensitivity, optional exponential curve, then a hard clamp to [-1, 1].
pub fn shape_pitch(value: f64, input: &InputConfig) -> f64 {
    let mut pitch = value * input.pitch_sensitivity_multiplier;
    if input.use_exponential_pitch_response {
        pitch = pitch.signum() * pitch.abs().powf(input.exponential_pitch_factor);
    }
    pitch.clamp(-1.0, 1.0)
}

/// Sensitivity, then optional progressive amplification of the part of the
/// deflection beyond the threshold.
pub fn shape_roll(value: f64, input: &InputConfig) -> f64 {
    let roll = value * input.roll_sensitivity_multiplier;
    let threshold = input.progressive_roll_threshold;

    if input.use_progressive_roll_response && roll.abs() > threshold {
        let excess = roll.abs() - threshold;
        roll.signum() * (threshold + excess * input.progressive_roll_multiplier)
    } else {
        roll
    }
}

/// Critically damped smoothing of the shaped targets.
///
/// Pitch and roll use `input_smooth_time`, the discrete yaw keys use
/// `keyboard_smooth_time`.
pub fn smooth(
    smoothed: &mut SmoothedInput,
    target: ShapedInput,
    cfg: &FlightConfig,
    dt: f64,
) -> ShapedInput {
    let input = &cfg.input;
    let current = smoothed.value;

    smoothed.value = ShapedInput {
        pitch: smoothed
            .pitch
            .update(current.pitch, target.pitch, input.input_smooth_time, dt),
        roll: smoothed
            .roll
            .update(current.roll, target.roll, input.input_smooth_time, dt),
        yaw: smoothed
            .yaw
            .update(current.yaw, target.yaw, input.keyboard_smooth_time, dt),
    };

    smoothed.value
}
