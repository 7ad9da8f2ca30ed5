use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HealthConfig {
    pub max_health: f64,
    pub repair_amount: f64,
    /// Seconds the plane is grounded for while repairing.
    pub repair_time: f64,
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self {
            max_health: 200.0,
            repair_amount: 50.0,
            repair_time: 10.0,
        }
    }
}

/// Chase camera response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub default_fov: f64,
    pub max_fov: f64,
    /// Extra FOV added at the service ceiling.
    pub altitude_fov_bonus: f64,
    pub fov_smooth_speed: f64,
    /// Time for the free-look offset to return to centre (s).
    pub camera_blend_time: f64,
    pub look_limit_yaw: f64,
    pub look_limit_pitch: f64,
    /// Degrees of look offset per unit of raw axis delta.
    pub look_sensitivity: f64,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            default_fov: 50.0,
            max_fov: 60.0,
            altitude_fov_bonus: 5.0,
            fov_smooth_speed: 2.0,
            camera_blend_time: 1.2,
            look_limit_yaw: 120.0,
            look_limit_pitch: 60.0,
            look_sensitivity: 30.0,
        }
    }
}
