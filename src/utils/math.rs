use nalgebra::{UnitQuaternion, Vector3};
use std::f64::consts::PI;

/// Convert degrees to radians
#[inline]
pub fn deg_to_rad(deg: f64) -> f64 {
    deg * PI / 180.0
}

/// Convert radians to degrees
#[inline]
pub fn rad_to_deg(rad: f64) -> f64 {
    rad * 180.0 / PI
}

/// Linear interpolation between two values
#[inline]
pub fn lerp(start: f64, end: f64, factor: f64) -> f64 {
    start + (end - start) * factor.clamp(0.0, 1.0)
}

/// Clamp a value to the unit interval
#[inline]
pub fn clamp01(value: f64) -> f64 {
    value.clamp(0.0, 1.0)
}

/// Blend fraction for a first-order exponential approach at `rate` per second.
///
/// Unlike `rate * dt` this never exceeds one, so large timesteps cannot
/// overshoot the target.
#[inline]
pub fn exp_blend(rate: f64, dt: f64) -> f64 {
    1.0 - (-rate * dt).exp()
}

/// Replace NaN and infinities with a fallback value.
#[inline]
pub fn finite_or(value: f64, fallback: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        fallback
    }
}

/// Pitch angle of a body attitude in degrees, positive nose up (NED frame).
pub fn pitch_angle_deg(attitude: &UnitQuaternion<f64>) -> f64 {
    let forward = attitude * Vector3::x();
    rad_to_deg((-forward.z).clamp(-1.0, 1.0).asin())
}

/// True when every component of the quaternion is finite.
pub fn quaternion_is_finite(quat: &UnitQuaternion<f64>) -> bool {
    quat.quaternion().coords.iter().all(|c| c.is_finite())
}

/// True when every component of the vector is finite.
pub fn vector_is_finite(vec: &Vector3<f64>) -> bool {
    vec.iter().all(|c| c.is_finite())
}

/// Critically damped spring smoother.
///
/// Carries its own velocity between calls so consecutive updates converge
/// exponentially on a moving target without overshooting it.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SmoothDamp {
    pub velocity: f64,
}

impl SmoothDamp {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance `current` towards `target` over `dt` seconds.
    ///
    /// # Arguments
    /// * `current` - The value being smoothed.
    /// * `target` - The value to converge on.
    /// * `smooth_time` - Approximate time to reach the target (seconds).
    /// * `dt` - Timestep (seconds).
    pub fn update(&mut self, current: f64, target: f64, smooth_time: f64, dt: f64) -> f64 {
        if dt <= 0.0 {
            return current;
        }

        let smooth_time = smooth_time.max(1e-4);
        let omega = 2.0 / smooth_time;
        let x = omega * dt;
        let decay = 1.0 / (1.0 + x + 0.48 * x * x + 0.235 * x * x * x);

        let change = current - target;
        let temp = (self.velocity + omega * change) * dt;
        self.velocity = (self.velocity - omega * temp) * decay;
        let mut output = target + (change + temp) * decay;

        // Never pass the target
        if (target - current > 0.0) == (output > target) {
            output = target;
            self.velocity = 0.0;
        }

        output
    }

    pub fn reset(&mut self) {
        self.velocity = 0.0;
    }
}
