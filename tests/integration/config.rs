use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use baron::components::{CeilingResponse, ConfigError, ConfigSource, FlightConfig, PlaneType};
use baron::systems::FlightModel;
use baron::utils::FlightError;
use pretty_assertions::assert_eq;
use tempfile::NamedTempFile;

fn plane_asset(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("assets")
        .join("planes")
        .join(name)
}

#[test]
fn test_fokker_asset_matches_preset() {
    let loaded = FlightConfig::new(ConfigSource::File(plane_asset("fokker_dr1.yaml"))).unwrap();
    let preset = FlightConfig::new(ConfigSource::Programmed(PlaneType::FokkerDr1)).unwrap();
    assert_eq!(loaded, preset);
}

#[test]
fn test_camel_asset_enables_forced_descent() {
    let loaded = FlightConfig::from_file(plane_asset("sopwith_camel.yaml")).unwrap();
    let preset = FlightConfig::sopwith_camel();

    assert_eq!(loaded.speed, preset.speed);
    assert_eq!(loaded.rotation, preset.rotation);
    assert_eq!(loaded.features.ceiling, CeilingResponse::ForcedDescent);
    assert!(loaded.features.loop_prevention);
    assert!(FlightModel::initialize(Some(Arc::new(loaded))).is_ok());
}

#[test]
fn test_partial_yaml_falls_back_to_defaults() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(
        file,
        "name: Test Plane\nspeed:\n  air_boost_speed: 90.0\nfeatures:\n  stall_model: false"
    )
    .unwrap();

    let config = FlightConfig::from_file(file.path()).unwrap();
    let stock = FlightConfig::default();
    assert_eq!(config.name, "Test Plane");
    assert_eq!(config.speed.air_boost_speed, 90.0);
    assert_eq!(config.speed.air_normal_speed, stock.speed.air_normal_speed);
    assert_eq!(config.stall, stock.stall);
    assert!(!config.features.stall_model);
    assert_eq!(config.features.ceiling, CeilingResponse::Stall);
}

#[test]
fn test_invalid_yaml_is_rejected() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "speed:\n  air_normal_speed: 50.0\n  air_boost_speed: 20.0").unwrap();
    assert!(matches!(
        FlightConfig::from_file(file.path()),
        Err(ConfigError::ValidationError(_))
    ));

    let mut garbage = NamedTempFile::new().unwrap();
    writeln!(garbage, "speed: [not, a, map").unwrap();
    assert!(matches!(
        FlightConfig::from_file(garbage.path()),
        Err(ConfigError::YamlError(_))
    ));

    assert!(matches!(
        FlightConfig::from_file(plane_asset("missing.yaml")),
        Err(ConfigError::FileError(_))
    ));
}

#[test]
fn test_model_requires_a_configuration() {
    assert!(matches!(
        FlightModel::initialize(None),
        Err(FlightError::ConfigurationMissing(_))
    ));
}

#[test]
fn test_non_finite_tuning_is_rejected() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "rotation:\n  pitch_speed: .nan").unwrap();
    match FlightConfig::from_file(file.path()) {
        Err(ConfigError::ValidationError(reason)) => {
            assert!(reason.contains("rotation.pitch_speed"), "{}", reason)
        }
        other => panic!("expected a validation error, got {:?}", other),
    }

    let mut config = FlightConfig::default();
    config.camera.look_sensitivity = f64::INFINITY;
    assert!(matches!(
        FlightModel::initialize(Some(Arc::new(config))),
        Err(FlightError::InvalidConfig(_))
    ));
}
