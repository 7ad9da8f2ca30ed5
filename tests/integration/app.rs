use approx::assert_relative_eq;
use baron::components::{
    ControlInput, Crosshair, FailureKind, FlightConfig, FlightFault, FlightOutput,
    SpatialComponent, Telemetry,
};
use baron::systems::FlightModel;

use crate::common::{
    assert_output_valid, assert_spatial_valid, level_spatial, TestAppBuilder, SPAWN_ALTITUDE,
};

#[test]
fn test_plane_flies_level_in_app() {
    let mut app = TestAppBuilder::new()
        .with_player_plane(FlightConfig::default(), level_spatial(SPAWN_ALTITUDE))
        .build();

    app.run_seconds(1.0);

    let spatial = *app.query_single::<SpatialComponent>().unwrap();
    assert_spatial_valid(&spatial);
    assert!(spatial.position.x > 25.0, "plane barely moved: {:?}", spatial.position);
    assert_relative_eq!(spatial.altitude(), SPAWN_ALTITUDE, epsilon = 1.0);

    let output = *app.query_single::<FlightOutput>().unwrap();
    assert_output_valid(&output);
    assert_relative_eq!(spatial.velocity, output.velocity);
}

#[test]
fn test_throttle_input_reaches_the_model() {
    let mut app = TestAppBuilder::new()
        .with_player_plane(FlightConfig::default(), level_spatial(SPAWN_ALTITUDE))
        .build();
    // Controls are attached on the first tick
    app.run_ticks(1);

    app.set_controls(ControlInput::throttle(1.0));
    app.run_seconds(2.0);

    let telemetry = app.query_single::<Telemetry>().unwrap();
    assert!(telemetry.speed > 60.0, "speed {}", telemetry.speed);
}

#[test]
fn test_spawn_velocity_sets_initial_speed() {
    let mut spatial = level_spatial(SPAWN_ALTITUDE);
    spatial.velocity.x = 50.0;
    let mut app = TestAppBuilder::new()
        .with_plane(FlightConfig::default(), spatial)
        .build();

    app.run_ticks(1);
    let telemetry = app.query_single::<Telemetry>().unwrap();
    assert!(telemetry.speed > 49.0);
}

#[test]
fn test_plane_without_config_is_faulted() {
    let mut app = TestAppBuilder::new()
        .with_plane(FlightConfig::default(), level_spatial(SPAWN_ALTITUDE))
        .with_unconfigured_plane(level_spatial(SPAWN_ALTITUDE))
        .build();

    app.run_ticks(10);

    let entities = app.plane_entities();
    assert_eq!(entities.len(), 2);

    let faulted: Vec<_> = entities
        .iter()
        .filter(|entity| app.get::<FlightFault>(**entity).is_some())
        .copied()
        .collect();
    assert_eq!(faulted.len(), 1);

    let faulted = faulted[0];
    assert!(app.get::<FlightModel>(faulted).is_none());
    assert!(app.get::<FlightOutput>(faulted).is_none());
    let spatial = app.get::<SpatialComponent>(faulted).unwrap();
    assert_eq!(spatial.position, level_spatial(SPAWN_ALTITUDE).position);

    // The configured plane keeps flying
    assert_eq!(app.query_all::<FlightModel>().len(), 1);
}

#[test]
fn test_invalid_config_is_faulted() {
    let mut bad = FlightConfig::default();
    bad.rotation.rotational_damping = 1.5;
    let mut app = TestAppBuilder::new()
        .with_plane(bad, level_spatial(SPAWN_ALTITUDE))
        .build();

    app.run_ticks(1);

    let fault = app.query_single::<FlightFault>().unwrap();
    assert!(fault.reason.contains("rotation.rotational_damping"));
    assert!(app.query_single::<FlightModel>().is_none());
}

#[test]
fn test_damage_events_reach_telemetry() {
    let mut app = TestAppBuilder::new()
        .with_player_plane(FlightConfig::default(), level_spatial(SPAWN_ALTITUDE))
        .build();
    app.run_ticks(1);
    let plane = app.plane_entities()[0];

    app.send_damage(plane, 50.0);
    app.run_ticks(1);
    let telemetry = *app.query_single::<Telemetry>().unwrap();
    assert_relative_eq!(telemetry.health, 150.0);
    assert!(!telemetry.destroyed);

    app.send_damage(plane, 500.0);
    app.run_ticks(1);
    let telemetry = *app.query_single::<Telemetry>().unwrap();
    assert_relative_eq!(telemetry.health, 0.0);
    assert!(telemetry.destroyed);
}

#[test]
fn test_repair_grounds_plane_then_restores_health() {
    let mut app = TestAppBuilder::new()
        .with_player_plane(FlightConfig::default(), level_spatial(SPAWN_ALTITUDE))
        .build();
    app.run_ticks(1);
    let plane = app.plane_entities()[0];
    app.send_damage(plane, 100.0);

    app.set_controls(ControlInput {
        repair: true,
        fire: true,
        ..Default::default()
    });
    app.run_ticks(1);
    app.set_controls(ControlInput::default());

    let output = *app.query_single::<FlightOutput>().unwrap();
    assert_eq!(output.telemetry.failure, FailureKind::Repairing);
    assert!(!output.weapons.fire);

    app.run_seconds(5.0);
    assert_eq!(
        app.query_single::<Telemetry>().unwrap().failure,
        FailureKind::Repairing
    );

    app.run_seconds(5.5);
    let telemetry = app.query_single::<Telemetry>().unwrap();
    assert_eq!(telemetry.failure, FailureKind::Normal);
    assert_relative_eq!(telemetry.health, 150.0);
}

#[test]
fn test_crosshair_sits_ahead_of_the_player() {
    let mut app = TestAppBuilder::new()
        .with_player_plane(FlightConfig::default(), level_spatial(SPAWN_ALTITUDE))
        .build();

    app.run_seconds(0.5);

    let spatial = *app.query_single::<SpatialComponent>().unwrap();
    let crosshair = app.query_single::<Crosshair>().unwrap();
    let ahead = (crosshair.aim_point() - spatial.position).dot(&spatial.forward());
    assert!(
        (crosshair.distance - crosshair.max_drift..=crosshair.distance + crosshair.max_drift)
            .contains(&ahead),
        "aim point {} m ahead",
        ahead
    );
}
