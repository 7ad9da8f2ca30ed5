use approx::assert_relative_eq;
use baron::components::{ControlInput, FlightConfig, YawIntent};
use baron::systems::ExternalState;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::common::{
    assert_output_valid, assert_telemetry_valid, full_pitch_up, hold, model_with, pitched,
    position_at, stock_model, fly, SPAWN_ALTITUDE,
};

#[test]
fn test_full_throttle_converges_on_boost_speed() {
    let mut model = stock_model(SPAWN_ALTITUDE, 0.0).with_initial_speed(30.0);
    let external = model.external_state();
    let dt = 0.016;

    let outputs = hold(&mut model, &ControlInput::throttle(1.0), &external, dt, 313);

    let mut previous = 30.0;
    for output in &outputs {
        let speed = output.telemetry.speed;
        assert!(speed >= previous, "speed dropped from {} to {}", previous, speed);
        assert!(speed <= 80.0, "speed overshot: {}", speed);
        previous = speed;
    }
    assert_relative_eq!(previous, 80.0, max_relative = 0.01);
}

#[test]
fn test_rates_decay_without_input() {
    let mut model = stock_model(SPAWN_ALTITUDE, 0.0);
    let external = model.external_state();
    let dt = 1.0 / 60.0;

    let stick = ControlInput {
        pitch: 0.5,
        roll: 0.5,
        yaw: YawIntent::Right,
        ..Default::default()
    };
    hold(&mut model, &stick, &external, dt, 60);
    // Let the smoothed input settle inside the deadzone
    hold(&mut model, &ControlInput::default(), &external, dt, 120);

    let start = model.state().angular_velocity;
    assert!(start.iter().all(|rate| rate.abs() > 0.0));

    let mut previous = start;
    for _ in 0..100 {
        model.step(dt, &ControlInput::default(), &external);
        let rates = model.state().angular_velocity;
        for axis in 0..3 {
            assert!(
                rates[axis].abs() < previous[axis].abs(),
                "axis {} did not decay: {} -> {}",
                axis,
                previous[axis],
                rates[axis]
            );
            assert_eq!(rates[axis].signum(), start[axis].signum());
        }
        previous = rates;
    }
}

#[test]
fn test_constant_inputs_reach_a_fixed_point() {
    let mut model = stock_model(SPAWN_ALTITUDE, 0.0);
    let external = model.external_state();
    let input = ControlInput::throttle(0.5);

    let outputs = hold(&mut model, &input, &external, 1.0 / 60.0, 3600);
    let last = outputs[outputs.len() - 1];
    let before = outputs[outputs.len() - 2];

    assert_relative_eq!(last.velocity, before.velocity, epsilon = 1e-9);
    assert_relative_eq!(last.telemetry.speed, 55.0, epsilon = 1e-6);
    assert_relative_eq!(last.camera.fov, before.camera.fov, epsilon = 1e-9);
    assert_eq!(last.attitude_delta, before.attitude_delta);
}

#[test]
fn test_random_flying_stays_finite_and_bounded() {
    let mut model = stock_model(SPAWN_ALTITUDE, 0.0);
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let dt = 1.0 / 60.0;

    for tick in 0..3000 {
        let mut input = ControlInput {
            throttle: rng.gen_range(-1.0..=1.0),
            pitch: rng.gen_range(-1.0..=1.0),
            roll: rng.gen_range(-1.0..=1.0),
            yaw: match rng.gen_range(0..3) {
                0 => YawIntent::Left,
                1 => YawIntent::None,
                _ => YawIntent::Right,
            },
            ..Default::default()
        };
        if tick % 97 == 0 {
            input.pitch = f64::NAN;
            input.throttle = f64::INFINITY;
        }

        for output in fly(&mut model, &input, dt, 1) {
            assert_output_valid(&output);
        }
    }
}

#[test]
fn test_non_finite_external_state_is_survived() {
    let mut model = stock_model(SPAWN_ALTITUDE, 10.0);
    let broken = ExternalState::new(
        position_at(f64::NAN),
        pitched(f64::INFINITY),
    );

    for _ in 0..50 {
        let output = model.step(1.0 / 60.0, &ControlInput::throttle(1.0), &broken);
        assert_output_valid(&output);
    }
    assert_relative_eq!(model.telemetry().altitude, SPAWN_ALTITUDE);
}

#[test]
fn test_loop_prevention_reduces_pull_up_authority() {
    let mut config = FlightConfig::sopwith_camel();
    config.features.loop_prevention = true;
    config.loop_prevention.angle_threshold = 20.0;

    let mut guarded = model_with(config.clone(), SPAWN_ALTITUDE, 0.0).with_initial_speed(60.0);
    config.features.loop_prevention = false;
    let mut free = model_with(config, SPAWN_ALTITUDE, 0.0).with_initial_speed(60.0);

    let dt = 1.0 / 60.0;
    let guarded_outputs = fly(&mut guarded, &full_pitch_up(), dt, 50);
    let free_outputs = fly(&mut free, &full_pitch_up(), dt, 50);

    let lowest = guarded_outputs
        .iter()
        .map(|output| output.telemetry.authority.pitch_up)
        .fold(f64::INFINITY, f64::min);
    assert!(lowest < 0.95, "loop prevention never engaged: {}", lowest);

    for output in guarded_outputs.iter().chain(free_outputs.iter()) {
        assert_telemetry_valid(&output.telemetry);
    }
    for output in &free_outputs {
        assert_relative_eq!(output.telemetry.authority.pitch_up, 1.0);
    }
}
