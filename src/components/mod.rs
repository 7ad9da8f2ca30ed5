pub mod controller;
pub mod crosshair;
pub mod plane;
pub mod spatial;

pub use controller::{KeyBindings, PlayerController};
pub use crosshair::Crosshair;
pub use plane::{
    AuthorityReport, CameraOutput, CeilingResponse, ConfigError, ConfigSource, ControlInput,
    FailureKind, FailureState, FeatureFlags, FlightConfig, FlightFault, FlightOutput, FlightState,
    Plane, PlaneConfig, PlaneType, ShapedInput, Telemetry, WeaponIntent, YawIntent,
};
pub use spatial::SpatialComponent;
