pub mod plane;

pub use plane::{FlightSet, PlanePlugin, PlaneSpawn};
