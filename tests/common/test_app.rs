use bevy::ecs::system::RunSystemOnce;
use bevy::prelude::*;
use baron::{
    components::{ControlInput, FlightConfig, Plane, SpatialComponent},
    plugins::{PlanePlugin, PlaneSpawn},
    resources::PhysicsConfig,
    systems::{apply_control_input, DamageEvent},
};

/// Builder for creating a test application with customizable configuration
pub struct TestAppBuilder {
    planes: Vec<PlaneSpawn>,
    unconfigured_planes: Vec<SpatialComponent>,
    time_step: f64,
}

impl Default for TestAppBuilder {
    fn default() -> Self {
        Self {
            planes: Vec::new(),
            unconfigured_planes: Vec::new(),
            time_step: PhysicsConfig::default().timestep,
        }
    }
}

impl TestAppBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_plane(mut self, config: FlightConfig, spatial: SpatialComponent) -> Self {
        self.planes.push(PlaneSpawn::new(config, spatial));
        self
    }

    pub fn with_player_plane(mut self, config: FlightConfig, spatial: SpatialComponent) -> Self {
        self.planes.push(PlaneSpawn::new(config, spatial).player());
        self
    }

    /// A plane entity with no `PlaneConfig` attached.
    pub fn with_unconfigured_plane(mut self, spatial: SpatialComponent) -> Self {
        self.unconfigured_planes.push(spatial);
        self
    }

    pub fn with_time_step(mut self, time_step: f64) -> Self {
        self.time_step = time_step;
        self
    }

    pub fn build(self) -> TestApp {
        let mut plugin = PlanePlugin::new(self.time_step);
        for plane in self.planes {
            plugin = plugin.with_plane(plane);
        }

        let mut app = App::new();
        app.add_plugins(MinimalPlugins).add_plugins(plugin);

        for spatial in self.unconfigured_planes {
            app.world_mut().spawn((Plane, spatial));
        }

        // Run startup so the configured planes are spawned
        app.update();

        TestApp {
            app,
            time_step: self.time_step,
        }
    }
}

/// Main test application wrapper
///
/// Ticks `FixedUpdate` directly so results do not depend on wall-clock time.
pub struct TestApp {
    pub app: App,
    pub time_step: f64,
}

impl TestApp {
    pub fn run_ticks(&mut self, ticks: usize) {
        for _ in 0..ticks {
            self.app.world_mut().run_schedule(FixedUpdate);
        }
    }

    pub fn run_seconds(&mut self, seconds: f64) {
        let ticks = (seconds / self.time_step).round() as usize;
        self.run_ticks(ticks);
    }

    /// Replaces the controls of the player's plane.
    pub fn set_controls(&mut self, input: ControlInput) {
        self.app
            .world_mut()
            .run_system_once_with(input, apply_control_input)
            .expect("apply_control_input failed");
    }

    pub fn send_damage(&mut self, target: Entity, amount: f64) {
        self.app
            .world_mut()
            .send_event(DamageEvent::new(target, amount));
    }

    pub fn plane_entities(&mut self) -> Vec<Entity> {
        let world = self.app.world_mut();
        let mut query = world.query_filtered::<Entity, With<Plane>>();
        query.iter(world).collect()
    }

    pub fn query_single<T: Component>(&mut self) -> Option<&T> {
        let world = self.app.world_mut();
        let mut query = world.query::<&T>();
        query.get_single(world).ok()
    }

    pub fn query_single_mut<T: Component>(&mut self) -> Option<Mut<T>> {
        let world = self.app.world_mut();
        let mut query = world.query::<&mut T>();
        query.get_single_mut(world).ok()
    }

    pub fn query_all<T: Component>(&mut self) -> Vec<&T> {
        let world = self.app.world_mut();
        let mut query = world.query::<&T>();
        query.iter(world).collect()
    }

    pub fn get<T: Component>(&self, entity: Entity) -> Option<&T> {
        self.app.world().get::<T>(entity)
    }
}
