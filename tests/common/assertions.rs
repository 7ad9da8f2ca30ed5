use baron::components::{FlightOutput, SpatialComponent, Telemetry};

/// Assert that every number a flight model emitted is finite
#[track_caller]
pub fn assert_output_valid(output: &FlightOutput) {
    assert!(
        output.velocity.iter().all(|v| v.is_finite()),
        "Velocity is not finite: {:?}",
        output.velocity
    );
    assert!(
        output.attitude.coords.iter().all(|q| q.is_finite()),
        "Attitude is not finite: {:?}",
        output.attitude
    );
    assert!(output.camera.fov.is_finite(), "FOV is not finite");
    assert_telemetry_valid(&output.telemetry);
}

/// Assert telemetry is finite and every authority lies in [0, 1]
#[track_caller]
pub fn assert_telemetry_valid(telemetry: &Telemetry) {
    assert!(telemetry.speed.is_finite(), "Speed is not finite");
    assert!(telemetry.speed >= 0.0, "Speed is negative: {}", telemetry.speed);
    assert!(telemetry.target_speed >= 0.0, "Target speed is negative");
    assert!(telemetry.pitch_angle.is_finite(), "Pitch angle is not finite");

    let authority = &telemetry.authority;
    for (axis, value) in [
        ("pitch_up", authority.pitch_up),
        ("pitch_down", authority.pitch_down),
        ("roll", authority.roll),
        ("yaw", authority.yaw),
        ("climb", authority.climb),
        ("control_reduction", telemetry.control_reduction),
    ] {
        assert!(
            (0.0..=1.0).contains(&value),
            "{} authority out of range: {}",
            axis,
            value
        );
    }
}

/// Assert that a spatial component's state is valid
#[track_caller]
pub fn assert_spatial_valid(spatial: &SpatialComponent) {
    assert!(
        spatial.position.iter().all(|p| p.is_finite()),
        "Position is not finite"
    );
    assert!(
        spatial.velocity.iter().all(|v| v.is_finite()),
        "Velocity is not finite"
    );
    assert!(
        spatial.attitude.coords.iter().all(|q| q.is_finite()),
        "Attitude is not finite"
    );
}
