use approx::assert_relative_eq;
use baron::components::{CeilingResponse, ControlInput, FailureKind, FailureState, FlightConfig};
use baron::systems::flight::speed;
use baron::systems::ExternalState;
use nalgebra::UnitQuaternion;

use crate::common::{
    assert_output_valid, fly, full_pitch_up, hold, model_with, pitched, position_at,
    stock_model, SPAWN_ALTITUDE,
};

#[test]
fn test_slow_steep_climb_stalls_after_trigger_time() {
    let config = FlightConfig::default();
    let mut model = stock_model(SPAWN_ALTITUDE, 60.0).with_initial_speed(20.0);
    let external = ExternalState::new(position_at(SPAWN_ALTITUDE), pitched(60.0));
    let dt = 1.0 / 60.0;

    let mut previous = *model.last_output();
    let mut stalled_at = None;
    for tick in 1..=200 {
        let output = model.step(dt, &full_pitch_up(), &external);
        assert_output_valid(&output);

        if output.telemetry.failure == FailureKind::Stalling {
            stalled_at = Some(tick);
            let telemetry = output.telemetry;

            // Penalty applies on the very tick the stall begins
            let unpenalised = speed::target_speed(
                0.0,
                1.0,
                telemetry.pitch_angle,
                telemetry.altitude,
                &FailureState::Normal,
                &config,
            );
            assert_relative_eq!(
                telemetry.target_speed,
                unpenalised * config.stall.speed_penalty,
                epsilon = 1e-9
            );
            assert_relative_eq!(telemetry.control_reduction, config.stall.control_factor);
            assert_eq!(previous.telemetry.failure, FailureKind::StallWarning);
            break;
        }
        previous = output;
    }

    let tick = stalled_at.expect("plane never stalled");
    let elapsed = tick as f64 * dt;
    assert!(
        (1.45..=1.55).contains(&elapsed),
        "stalled after {:.3}s",
        elapsed
    );
}

#[test]
fn test_stall_recovers_in_a_dive() {
    let mut model = stock_model(SPAWN_ALTITUDE, 60.0).with_initial_speed(20.0);
    let climbing = ExternalState::new(position_at(SPAWN_ALTITUDE), pitched(60.0));
    hold(&mut model, &full_pitch_up(), &climbing, 1.0 / 60.0, 100);
    assert_eq!(model.telemetry().failure, FailureKind::Stalling);

    // Nose held well down and throttle open: recovery progress accumulates
    let diving = ExternalState::new(position_at(SPAWN_ALTITUDE), pitched(-45.0));
    let outputs = hold(&mut model, &ControlInput::throttle(1.0), &diving, 1.0 / 60.0, 600);

    let kinds: Vec<FailureKind> = outputs.iter().map(|o| o.telemetry.failure).collect();
    let recovering = kinds
        .iter()
        .position(|kind| *kind == FailureKind::Recovering)
        .expect("stall never recovered");
    assert!(kinds[..recovering]
        .iter()
        .all(|kind| *kind == FailureKind::Stalling));

    let last = outputs[outputs.len() - 1].telemetry;
    assert_eq!(last.failure, FailureKind::Normal);
    assert_relative_eq!(last.control_reduction, 1.0);
}

#[test]
fn test_repair_takes_over_from_a_stall() {
    let config = FlightConfig::default();
    let mut model = stock_model(SPAWN_ALTITUDE, 60.0).with_initial_speed(20.0);
    let climbing = ExternalState::new(position_at(SPAWN_ALTITUDE), pitched(60.0));
    hold(&mut model, &full_pitch_up(), &climbing, 1.0 / 60.0, 100);
    assert_eq!(model.telemetry().failure, FailureKind::Stalling);
    assert!(model.telemetry().control_reduction < 1.0);

    model.apply_damage(50.0);
    let level = ExternalState::new(position_at(SPAWN_ALTITUDE), pitched(0.0));
    let repair = ControlInput {
        repair: true,
        ..Default::default()
    };
    let output = model.step(0.1, &repair, &level);
    assert_eq!(output.telemetry.failure, FailureKind::Repairing);
    assert_eq!(output.attitude_delta, UnitQuaternion::identity());

    let outputs = hold(&mut model, &ControlInput::default(), &level, 0.1, 100);
    for output in &outputs[..98] {
        assert_eq!(output.telemetry.failure, FailureKind::Repairing);
        assert_eq!(output.attitude_delta, UnitQuaternion::identity());
    }

    let last = outputs[outputs.len() - 1].telemetry;
    assert_eq!(last.failure, FailureKind::Normal);
    assert_relative_eq!(last.control_reduction, 1.0);
    assert_relative_eq!(last.health, config.health.max_health);
}

#[test]
fn test_no_climb_authority_at_the_ceiling() {
    let config = FlightConfig::default();
    let ceiling = config.altitude.max_altitude;
    let mut model = model_with(config, ceiling, 0.0);
    let external = model.external_state();

    let output = model.step(1.0 / 60.0, &ControlInput::throttle(1.0), &external);
    assert_relative_eq!(output.telemetry.authority.climb, 0.0);
    // Throttle has no effect left, so the target is the idle target
    assert!(output.telemetry.target_speed <= 30.0);
}

#[test]
fn test_ceiling_forces_descent_then_recovers() {
    let mut config = FlightConfig::default();
    config.features.ceiling = CeilingResponse::ForcedDescent;
    let ceiling = config.altitude.max_altitude;
    let descent_pitch = config.altitude.forced_descent_pitch;
    let mut model = model_with(config, ceiling, 0.0);
    let dt = 1.0 / 60.0;

    let external = model.external_state();
    let first = model.step(dt, &ControlInput::throttle(0.5), &external);
    assert_eq!(first.telemetry.failure, FailureKind::ForcedDescent);
    assert_relative_eq!(first.telemetry.control_reduction, 0.2);

    // Pilot tries to climb; the nose still goes down
    let outputs = fly(&mut model, &full_pitch_up(), dt, 240);
    let during: Vec<_> = outputs
        .iter()
        .take_while(|o| o.telemetry.failure == FailureKind::ForcedDescent)
        .collect();
    assert!(during.len() > 150, "descent ended after {} ticks", during.len());
    assert!(during[during.len() - 1].telemetry.pitch_angle < descent_pitch / 3.0);

    let last = outputs[outputs.len() - 1].telemetry;
    assert!(matches!(
        last.failure,
        FailureKind::Recovering | FailureKind::Normal
    ));
    assert!(last.altitude < ceiling);
}

#[test]
fn test_stall_model_can_be_disabled() {
    let mut config = FlightConfig::default();
    config.features.stall_model = false;
    let mut model = model_with(config, SPAWN_ALTITUDE, 60.0).with_initial_speed(10.0);
    let external = model.external_state();

    let outputs = hold(&mut model, &full_pitch_up(), &external, 1.0 / 60.0, 300);
    for output in outputs {
        assert_eq!(output.telemetry.failure, FailureKind::Normal);
        assert!(output.telemetry.warning_level > 0.0);
    }
}

#[test]
fn test_losing_airspeed_enters_freefall() {
    let mut model = stock_model(SPAWN_ALTITUDE, 0.0).with_initial_speed(5.0);
    let external = model.external_state();

    let output = model.step(1.0 / 60.0, &ControlInput::default(), &external);
    assert_eq!(output.telemetry.failure, FailureKind::Freefalling);
    assert!(output.velocity.z > 0.0, "freefall should head down");
}
