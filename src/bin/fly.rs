use bevy::ecs::system::RunSystemOnce;
use bevy::log::LogPlugin;
use bevy::prelude::*;
use std::env;

use baron::{
    components::{ControlInput, FlightConfig, SpatialComponent, Telemetry},
    plugins::{PlanePlugin, PlaneSpawn},
    resources::PhysicsConfig,
    systems::apply_control_input,
};

const SPAWN_ALTITUDE: f64 = 300.0;
/// Telemetry lines printed per simulated second
const REPORT_RATE: f64 = 4.0;

/// Flies a single plane through a scripted sortie and prints its telemetry
/// as JSON lines.
///
/// Usage: `baron_fly [config.yaml] [seconds]`
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let config = match args.get(1) {
        Some(path) => FlightConfig::from_file(path)?,
        None => FlightConfig::fokker_dr1(),
    };
    let seconds: f64 = match args.get(2) {
        Some(value) => value.parse()?,
        None => 30.0,
    };

    let mut app = App::new();
    app.add_plugins((MinimalPlugins, LogPlugin::default()))
        .add_plugins(PlanePlugin::default().with_plane(
            PlaneSpawn::new(config, SpatialComponent::at_altitude(SPAWN_ALTITUDE)).player(),
        ));

    // Runs startup and spawns the plane
    app.update();

    let dt = app.world().resource::<PhysicsConfig>().timestep;
    let ticks = (seconds / dt).ceil() as usize;
    let report_every = ((1.0 / REPORT_RATE) / dt).round().max(1.0) as usize;
    info!("Flying {} ticks of {:.4} s", ticks, dt);

    let mut telemetry_query = app.world_mut().query::<(&Name, &Telemetry)>();

    for tick in 0..ticks {
        let time = tick as f64 * dt;
        app.world_mut()
            .run_system_once_with(sortie(time), apply_control_input)
            .map_err(|err| format!("failed to apply controls: {:?}", err))?;
        app.world_mut().run_schedule(FixedUpdate);

        if tick % report_every == 0 {
            for (name, telemetry) in telemetry_query.iter(app.world()) {
                let line = serde_json::json!({
                    "time": time,
                    "plane": name.as_str(),
                    "telemetry": telemetry,
                });
                println!("{}", line);
            }
        }
    }

    Ok(())
}

/// Full throttle, a steep pull-up into a stall, a dive to recover, then a
/// gentle roll.
fn sortie(time: f64) -> ControlInput {
    let mut input = ControlInput::throttle(1.0);
    match time {
        t if t < 5.0 => {}
        t if t < 9.0 => {
            input.throttle = 0.0;
            input.pitch = 0.5;
        }
        t if t < 14.0 => {
            input.throttle = 0.5;
            input.pitch = -0.3;
        }
        t if t < 18.0 => input.roll = 0.2,
        _ => input.throttle = 0.5,
    }
    input
}
