#![allow(dead_code)]

mod assertions;
mod test_app;

// Re-export
pub use assertions::{assert_output_valid, assert_spatial_valid, assert_telemetry_valid};
pub use fixtures::*;
pub use test_app::{TestApp, TestAppBuilder};
