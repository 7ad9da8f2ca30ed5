use bevy::prelude::*;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// Aim point projected ahead of a plane, with drift that grows as accuracy
/// drops.
#[derive(Component, Debug, Clone, Serialize, Deserialize)]
pub struct Crosshair {
    /// Distance ahead of the nose the aim point sits at [m]
    pub distance: f64,
    /// Drop of the aim point below the flight line [m]
    pub vertical_offset: f64,
    /// Largest drift at zero accuracy [m]
    pub max_drift: f64,
    /// Frequency at which the noise field is sampled
    pub drift_speed: f64,
    /// Rate at which the drift eases towards its noise target (1/s)
    pub return_speed: f64,
    pub noise_seed: u32,
    accuracy: f64,
    elapsed: f64,
    drift: Vector3<f64>,
    aim_point: Vector3<f64>,
}

impl Default for Crosshair {
    fn default() -> Self {
        Self {
            distance: 500.0,
            vertical_offset: 50.0,
            max_drift: 40.0,
            drift_speed: 8.0,
            return_speed: 5.0,
            noise_seed: 0,
            accuracy: 1.0,
            elapsed: 0.0,
            drift: Vector3::zeros(),
            aim_point: Vector3::zeros(),
        }
    }
}

impl Crosshair {
    pub fn accuracy(&self) -> f64 {
        self.accuracy
    }

    pub fn set_accuracy(&mut self, accuracy: f64) {
        self.accuracy = if accuracy.is_finite() {
            accuracy.clamp(0.0, 1.0)
        } else {
            self.accuracy
        };
    }

    pub fn drift(&self) -> Vector3<f64> {
        self.drift
    }

    /// World-space point weapons should converge on.
    pub fn aim_point(&self) -> Vector3<f64> {
        self.aim_point
    }

    pub(crate) fn advance(&mut self, dt: f64) -> f64 {
        self.elapsed += dt;
        self.elapsed
    }

    pub(crate) fn set_drift(&mut self, drift: Vector3<f64>) {
        self.drift = drift;
    }

    pub(crate) fn set_aim_point(&mut self, aim_point: Vector3<f64>) {
        self.aim_point = aim_point;
    }
}
