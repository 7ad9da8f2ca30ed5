pub mod config;
pub mod controls;
pub mod failure;
pub mod output;
pub mod state;

pub use config::{
    AltitudeConfig, CameraConfig, CeilingResponse, ConfigError, ConfigSource, FeatureFlags,
    FlightConfig, HealthConfig, InputConfig, LoopPreventionConfig, PhysicsTuning, PlaneConfig,
    PlaneType, RotationConfig, SpeedConfig, StallConfig,
};
pub use controls::{ControlInput, YawIntent};
pub use failure::{ControlReduction, FailureKind, FailureState};
pub use output::{AuthorityReport, CameraOutput, FlightOutput, Telemetry, WeaponIntent};
pub use state::{CameraState, FlightState, ShapedInput, SmoothedInput};

use bevy::prelude::*;

/// Marker for entities flown by a flight model.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Plane;

/// Attached to a plane that could not be initialised; it is never simulated.
#[derive(Component, Debug, Clone)]
pub struct FlightFault {
    pub reason: String,
}
