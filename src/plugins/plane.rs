use bevy::prelude::*;

use crate::components::{
    Crosshair, FlightConfig, Plane, PlaneConfig, PlayerController, SpatialComponent,
};
use crate::resources::PhysicsConfig;
use crate::systems::{
    apply_damage_system, crosshair_system, flight_model_system, initialize_planes_system,
    keyboard_mouse_system, kinematic_integrator_system, DamageEvent,
};

/// Flight simulation stages, run in this order every fixed tick.
#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub enum FlightSet {
    Initialize,
    Input,
    Simulate,
    Integrate,
    Effects,
}

/// A plane the plugin spawns at startup.
#[derive(Debug, Clone)]
pub struct PlaneSpawn {
    pub config: FlightConfig,
    pub spatial: SpatialComponent,
    /// Driven by the local keyboard and mouse
    pub player: bool,
    pub crosshair: bool,
}

impl PlaneSpawn {
    pub fn new(config: FlightConfig, spatial: SpatialComponent) -> Self {
        Self {
            config,
            spatial,
            player: false,
            crosshair: false,
        }
    }

    pub fn player(mut self) -> Self {
        self.player = true;
        self.crosshair = true;
        self
    }
}

pub struct PlanePlugin {
    pub timestep: f64,
    pub planes: Vec<PlaneSpawn>,
}

impl Default for PlanePlugin {
    fn default() -> Self {
        Self {
            timestep: PhysicsConfig::default().timestep,
            planes: Vec::new(),
        }
    }
}

impl PlanePlugin {
    pub fn new(timestep: f64) -> Self {
        Self {
            timestep,
            planes: Vec::new(),
        }
    }

    pub fn with_plane(mut self, plane: PlaneSpawn) -> Self {
        self.planes.push(plane);
        self
    }

    fn spawn_planes(mut commands: Commands, planes: Vec<PlaneSpawn>) {
        for spawn in planes {
            info!("Spawning {}", spawn.config.name);
            let name = Name::new(spawn.config.name.clone());
            let mut entity = commands.spawn((
                Plane,
                PlaneConfig::new(spawn.config),
                spawn.spatial,
                name,
            ));
            if spawn.player {
                entity.insert(PlayerController::new());
            }
            if spawn.crosshair {
                entity.insert(Crosshair::default());
            }
        }
    }
}

impl Plugin for PlanePlugin {
    fn build(&self, app: &mut App) {
        let physics = PhysicsConfig::with_timestep(self.timestep);

        app.insert_resource(physics)
            .insert_resource(Time::<Fixed>::from_seconds(self.timestep))
            .add_event::<DamageEvent>();

        let planes = self.planes.clone();
        app.add_systems(Startup, move |commands: Commands| {
            Self::spawn_planes(commands, planes.clone())
        });

        app.configure_sets(
            FixedUpdate,
            (
                FlightSet::Initialize,
                FlightSet::Input,
                FlightSet::Simulate,
                FlightSet::Integrate,
                FlightSet::Effects,
            )
                .chain(),
        )
        .add_systems(
            FixedUpdate,
            (
                initialize_planes_system.in_set(FlightSet::Initialize),
                keyboard_mouse_system.in_set(FlightSet::Input),
                (apply_damage_system, flight_model_system)
                    .chain()
                    .in_set(FlightSet::Simulate),
                kinematic_integrator_system.in_set(FlightSet::Integrate),
                crosshair_system.in_set(FlightSet::Effects),
            ),
        );
    }
}
