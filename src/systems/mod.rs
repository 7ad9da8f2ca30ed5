mod controller;
mod crosshair;
pub mod flight;
mod health;
mod physics;

pub use controller::{apply_control_input, keyboard_mouse_system};
pub use crosshair::{crosshair_system, update_crosshair};
pub use flight::{flight_model_system, initialize_planes_system, ExternalState, FlightModel};
pub use health::{apply_damage_system, DamageEvent};
pub use physics::kinematic_integrator_system;
