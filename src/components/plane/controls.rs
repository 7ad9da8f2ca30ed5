use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::utils::finite_or;

/// Discrete rudder intent from the yaw keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum YawIntent {
    Left,
    Right,
    #[default]
    None,
}

impl YawIntent {
    pub fn axis(&self) -> f64 {
        match self {
            YawIntent::Left => -1.0,
            YawIntent::Right => 1.0,
            YawIntent::None => 0.0,
        }
    }
}

/// One tick of pilot input, produced by an input collaborator and consumed
/// by the flight model.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ControlInput {
    /// Throttle in [-1, 1]; negative values brake.
    pub throttle: f64,
    /// Raw pitch axis delta, positive pulls the nose up.
    pub pitch: f64,
    /// Raw roll axis delta, positive rolls right.
    pub roll: f64,
    pub yaw: YawIntent,
    pub free_look: bool,
    pub fire: bool,
    pub reload: bool,
    pub repair: bool,
}

impl ControlInput {
    /// Input with only the throttle set.
    pub fn throttle(throttle: f64) -> Self {
        Self {
            throttle,
            ..Default::default()
        }
    }

    /// Returns a copy safe to feed into the flight model.
    ///
    /// Non-finite values become zero, throttle is clamped to [-1, 1] and axis
    /// deltas to `±max_axis_delta`.
    pub fn sanitized(&self, max_axis_delta: f64) -> Self {
        Self {
            throttle: finite_or(self.throttle, 0.0).clamp(-1.0, 1.0),
            pitch: finite_or(self.pitch, 0.0).clamp(-max_axis_delta, max_axis_delta),
            roll: finite_or(self.roll, 0.0).clamp(-max_axis_delta, max_axis_delta),
            ..*self
        }
    }

    /// True when any numeric field is NaN or infinite.
    pub fn has_non_finite(&self) -> bool {
        !(self.throttle.is_finite() && self.pitch.is_finite() && self.roll.is_finite())
    }
}
