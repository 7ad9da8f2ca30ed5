use bevy::prelude::*;

use crate::components::{FlightFault, FlightOutput, SpatialComponent};
use crate::resources::PhysicsConfig;

/// Moves every plane along the velocity its flight model emitted and adopts
/// the new attitude.
pub fn kinematic_integrator_system(
    mut query: Query<(&FlightOutput, &mut SpatialComponent), Without<FlightFault>>,
    config: Res<PhysicsConfig>,
) {
    let dt = config.timestep;
    let max_velocity = config.max_velocity;

    query.par_iter_mut().for_each(|(output, mut spatial)| {
        integrate(output, &mut spatial, dt, max_velocity);
    });
}

/// Explicit Euler step of position; the attitude is taken as is.
fn integrate(output: &FlightOutput, spatial: &mut SpatialComponent, dt: f64, max_velocity: f64) {
    spatial.velocity = output.velocity;
    apply_velocity_limit(spatial, max_velocity);

    spatial.position += spatial.velocity * dt;
    spatial.attitude = output.attitude;
}

fn apply_velocity_limit(spatial: &mut SpatialComponent, max_velocity: f64) {
    let speed = spatial.velocity.norm();
    if speed > max_velocity {
        spatial.velocity *= max_velocity / speed;
    }
}
