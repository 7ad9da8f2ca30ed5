use bevy::prelude::*;
use nalgebra::Vector3;
use noise::{NoiseFn, Perlin};

use crate::components::{Crosshair, SpatialComponent};
use crate::resources::PhysicsConfig;
use crate::utils::clamp01;

// Separate rows of the noise field for the two drift axes
const NOISE_ROW_RIGHT: f64 = 17.3;
const NOISE_ROW_UP: f64 = 41.9;

/// Projects each plane's aim point ahead of its nose and lets it wander as
/// accuracy drops.
pub fn crosshair_system(
    mut query: Query<(&mut Crosshair, &SpatialComponent)>,
    config: Res<PhysicsConfig>,
) {
    let dt = config.timestep;
    for (mut crosshair, spatial) in query.iter_mut() {
        update_crosshair(&mut crosshair, spatial, dt);
    }
}

pub fn update_crosshair(crosshair: &mut Crosshair, spatial: &SpatialComponent, dt: f64) {
    let elapsed = crosshair.advance(dt);
    let perlin = Perlin::new(crosshair.noise_seed);
    let sample = elapsed * crosshair.drift_speed;

    let right = spatial.attitude * Vector3::y();
    let up = spatial.up();

    let spread = (1.0 - crosshair.accuracy()) * crosshair.max_drift;
    let target = right * perlin.get([sample, NOISE_ROW_RIGHT]) * spread
        + up * perlin.get([NOISE_ROW_UP, sample]) * spread;

    let drift = crosshair.drift();
    let drift = drift + (target - drift) * clamp01(dt * crosshair.return_speed);
    crosshair.set_drift(drift);

    let base = spatial.position
        + spatial.forward() * crosshair.distance
        + up * -crosshair.vertical_offset;
    crosshair.set_aim_point(base + drift);
}
