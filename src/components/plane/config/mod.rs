mod cockpit;
mod handling;
mod limits;
mod loader;

pub use cockpit::{CameraConfig, HealthConfig};
pub use handling::{InputConfig, PhysicsTuning, RotationConfig, SpeedConfig};
pub use limits::{
    AltitudeConfig, CeilingResponse, FeatureFlags, LoopPreventionConfig, StallConfig,
};
pub use loader::ConfigError;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::ops::Deref;
use std::path::PathBuf;
use std::sync::Arc;

/// Per-plane tuning data.
///
/// Loaded once when a plane is spawned and never mutated by the flight model;
/// share it between systems through an `Arc`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlightConfig {
    pub name: String,
    pub description: String,
    pub health: HealthConfig,
    pub speed: SpeedConfig,
    pub rotation: RotationConfig,
    pub input: InputConfig,
    pub altitude: AltitudeConfig,
    pub stall: StallConfig,
    pub physics: PhysicsTuning,
    pub camera: CameraConfig,
    pub loop_prevention: LoopPreventionConfig,
    pub features: FeatureFlags,
    /// Seed for the stall disorientation impulse.
    pub seed: u64,
}

impl Default for FlightConfig {
    fn default() -> Self {
        Self {
            name: "Stock".to_string(),
            description: String::new(),
            health: HealthConfig::default(),
            speed: SpeedConfig::default(),
            rotation: RotationConfig::default(),
            input: InputConfig::default(),
            altitude: AltitudeConfig::default(),
            stall: StallConfig::default(),
            physics: PhysicsTuning::default(),
            camera: CameraConfig::default(),
            loop_prevention: LoopPreventionConfig::default(),
            features: FeatureFlags::default(),
            seed: 0,
        }
    }
}

impl FlightConfig {
    /// Creates a new plane configuration from a given source.
    ///
    /// # Arguments
    /// * `source` - Either a programmed preset or a YAML file on disk.
    pub fn new(source: ConfigSource) -> Result<Self, ConfigError> {
        match source {
            ConfigSource::Programmed(plane_type) => Ok(Self::from_programmed(plane_type)),
            ConfigSource::File(path) => Self::from_file(path),
        }
    }

    fn from_programmed(plane_type: PlaneType) -> Self {
        match plane_type {
            PlaneType::FokkerDr1 => Self::fokker_dr1(),
            PlaneType::SopwithCamel => Self::sopwith_camel(),
            PlaneType::Custom(name) => Self {
                name,
                ..Default::default()
            },
        }
    }

    /// Slow, light triplane that climbs well and turns tightly.
    pub fn fokker_dr1() -> Self {
        Self {
            name: "Fokker Dr.I".to_string(),
            description: "Triplane, superb climb and turn, low top speed".to_string(),
            speed: SpeedConfig {
                air_normal_speed: 28.0,
                air_boost_speed: 70.0,
                climb_speed_penalty: 0.4,
                ..Default::default()
            },
            rotation: RotationConfig {
                pitch_speed: 2.2,
                roll_speed: 2.4,
                ..Default::default()
            },
            altitude: AltitudeConfig {
                max_altitude: 1200.0,
                warning_threshold: 950.0,
                ..Default::default()
            },
            seed: 1917,
            ..Default::default()
        }
    }

    /// Fast biplane with a vicious roll and a tendency to stall.
    pub fn sopwith_camel() -> Self {
        Self {
            name: "Sopwith Camel".to_string(),
            description: "Biplane, fast roll, unforgiving at low speed".to_string(),
            speed: SpeedConfig {
                air_normal_speed: 32.0,
                air_boost_speed: 85.0,
                ..Default::default()
            },
            rotation: RotationConfig {
                roll_speed: 3.0,
                yaw_speed: 1.2,
                roll_damping: 0.985,
                ..Default::default()
            },
            input: InputConfig {
                use_progressive_roll_response: true,
                ..Default::default()
            },
            stall: StallConfig {
                pitch_threshold: 40.0,
                ..Default::default()
            },
            seed: 1916,
            ..Default::default()
        }
    }
}

/// Source for plane configuration.
/// Can either be a hardcoded preset (`Programmed`) or loaded from a file.
#[derive(Debug, Clone)]
pub enum ConfigSource {
    Programmed(PlaneType),
    File(PathBuf),
}

/// Enumeration of built-in plane presets.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlaneType {
    FokkerDr1,
    SopwithCamel,
    Custom(String),
}

/// Component binding a plane entity to its shared tuning data.
#[derive(Component, Debug, Clone)]
pub struct PlaneConfig(pub Arc<FlightConfig>);

impl PlaneConfig {
    pub fn new(config: FlightConfig) -> Self {
        Self(Arc::new(config))
    }
}

impl Deref for PlaneConfig {
    type Target = FlightConfig;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
