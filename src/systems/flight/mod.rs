pub mod attitude;
pub mod authority;
pub mod camera;
pub mod failure;
pub mod loop_prevention;
pub mod model;
pub mod shaper;
pub mod speed;
mod system;
pub mod velocity;

pub use authority::ControlAuthority;
pub use loop_prevention::{LoopPrevention, NoLoopPrevention, PitchDirection, StrictLoopPrevention};
pub use model::{ExternalState, FlightModel, MAX_STEP};
pub use system::{flight_model_system, initialize_planes_system};
