use std::sync::Arc;

use bevy::prelude::*;

use crate::components::{
    ControlInput, FlightFault, FlightOutput, Plane, PlaneConfig, SpatialComponent, Telemetry,
};
use crate::resources::PhysicsConfig;
use crate::systems::flight::model::{ExternalState, FlightModel};
use crate::utils::FlightError;

/// Builds a [`FlightModel`] for every plane that does not have one yet.
///
/// Planes without a usable configuration get a [`FlightFault`] instead and
/// are never simulated.
pub fn initialize_planes_system(
    mut commands: Commands,
    query: Query<
        (Entity, Option<&PlaneConfig>, Option<&SpatialComponent>),
        (With<Plane>, Without<FlightModel>, Without<FlightFault>),
    >,
) {
    for (entity, config, spatial) in query.iter() {
        let model = match config {
            Some(config) => FlightModel::initialize(Some(Arc::clone(&config.0))),
            None => Err(FlightError::ConfigurationMissing(format!(
                "plane {:?} has no PlaneConfig",
                entity
            ))),
        };

        match model {
            Ok(model) => {
                let spatial = spatial.copied().unwrap_or_default();
                let mut model = model.with_spawn(spatial.position, spatial.attitude);
                let speed = spatial.velocity.norm();
                if speed > 0.0 {
                    model = model.with_initial_speed(speed);
                }
                info!(
                    "Initialised {} at altitude {:.0} m",
                    model.config().name,
                    model.state().altitude
                );

                let output = *model.last_output();
                commands
                    .entity(entity)
                    .insert((output, output.telemetry, model))
                    .insert_if_new((ControlInput::default(), spatial));
            }
            Err(err) => {
                error!("{}", err);
                commands.entity(entity).insert(FlightFault {
                    reason: err.to_string(),
                });
            }
        }
    }
}

/// Steps every flight model by the fixed physics timestep.
pub fn flight_model_system(
    mut query: Query<
        (
            &mut FlightModel,
            &ControlInput,
            &SpatialComponent,
            &mut FlightOutput,
            &mut Telemetry,
        ),
        Without<FlightFault>,
    >,
    config: Res<PhysicsConfig>,
) {
    let dt = config.timestep;

    query
        .par_iter_mut()
        .for_each(|(mut model, input, spatial, mut output, mut telemetry)| {
            *output = model.step(dt, input, &ExternalState::from(spatial));
            *telemetry = output.telemetry;
        });
}
