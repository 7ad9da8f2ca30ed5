use bevy::prelude::*;
use nalgebra::{UnitQuaternion, Vector3};
use serde::{Deserialize, Serialize};

/// Component for storing the spatial state owned by the physics collaborator.
///
/// The flight model reads position and attitude back from here each tick and
/// never writes it directly.
#[derive(Component, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpatialComponent {
    /// Position in world space, NED [m]
    pub position: Vector3<f64>,

    /// Linear velocity in world space [m/s]
    pub velocity: Vector3<f64>,

    /// Attitude quaternion (rotation from body to world frame)
    pub attitude: UnitQuaternion<f64>,
}

impl Default for SpatialComponent {
    fn default() -> Self {
        Self {
            position: Vector3::zeros(),
            velocity: Vector3::zeros(),
            attitude: UnitQuaternion::identity(),
        }
    }
}

impl SpatialComponent {
    /// Create a new spatial component with initial values
    pub fn new(
        position: Vector3<f64>,
        velocity: Vector3<f64>,
        attitude: UnitQuaternion<f64>,
    ) -> Self {
        Self {
            position,
            velocity,
            attitude,
        }
    }

    /// Create a new spatial component at a given altitude with the nose along +x
    pub fn at_altitude(altitude: f64) -> Self {
        Self {
            position: Vector3::new(0.0, 0.0, -altitude),
            ..Default::default()
        }
    }

    /// Altitude above the origin [m]
    pub fn altitude(&self) -> f64 {
        -self.position.z
    }

    /// Forward unit vector in world space
    pub fn forward(&self) -> Vector3<f64> {
        self.attitude * Vector3::x()
    }

    /// Up unit vector in world space
    pub fn up(&self) -> Vector3<f64> {
        self.attitude * -Vector3::z()
    }
}
