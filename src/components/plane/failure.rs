use serde::{Deserialize, Serialize};

use crate::utils::{clamp01, lerp};

/// The single active failure state of a plane.
///
/// Timed sequences keep their own elapsed-time counters, advanced once per
/// tick by the failure state machine.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum FailureState {
    #[default]
    Normal,
    /// Cosmetic warning only, controls are unaffected.
    StallWarning { level: f64 },
    Stalling { timer: f64, recovery_progress: f64 },
    Freefalling { timer: f64 },
    /// Normalised progress of the forced nose-down sequence, 0 to 1.
    ForcedDescent { progress: f64 },
    /// Control authority ramping back after a failure.
    Recovering { elapsed: f64 },
    /// Flight processing suspended while the airframe is patched up.
    Repairing { timer: f64 },
}

/// Payload-free tag of a [`FailureState`], for telemetry and logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FailureKind {
    Normal,
    StallWarning,
    Stalling,
    Freefalling,
    ForcedDescent,
    Recovering,
    Repairing,
}

impl FailureState {
    pub fn kind(&self) -> FailureKind {
        match self {
            FailureState::Normal => FailureKind::Normal,
            FailureState::StallWarning { .. } => FailureKind::StallWarning,
            FailureState::Stalling { .. } => FailureKind::Stalling,
            FailureState::Freefalling { .. } => FailureKind::Freefalling,
            FailureState::ForcedDescent { .. } => FailureKind::ForcedDescent,
            FailureState::Recovering { .. } => FailureKind::Recovering,
            FailureState::Repairing { .. } => FailureKind::Repairing,
        }
    }

    /// States in which the plane has lost aerodynamic control.
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            FailureState::Stalling { .. }
                | FailureState::Freefalling { .. }
                | FailureState::ForcedDescent { .. }
        )
    }

    /// Time spent falling, for states where gravity takes over.
    pub fn fall_timer(&self) -> Option<f64> {
        match self {
            FailureState::Stalling { timer, .. } | FailureState::Freefalling { timer } => {
                Some(*timer)
            }
            _ => None,
        }
    }

    /// States from which the failure checks may start a new failure.
    pub fn accepts_new_failure(&self) -> bool {
        matches!(
            self,
            FailureState::Normal
                | FailureState::StallWarning { .. }
                | FailureState::Recovering { .. }
        )
    }
}

/// Authority multiplier imposed by failure states, always within [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ControlReduction {
    factor: f64,
    ramp_from: f64,
}

impl Default for ControlReduction {
    fn default() -> Self {
        Self {
            factor: 1.0,
            ramp_from: 1.0,
        }
    }
}

impl ControlReduction {
    pub fn factor(&self) -> f64 {
        self.factor
    }

    /// Drops authority to `factor` on entering a failure.
    pub fn suppress(&mut self, factor: f64) {
        self.factor = clamp01(factor);
        self.ramp_from = self.factor;
    }

    /// Marks the current factor as the start of a recovery ramp.
    pub fn begin_recovery(&mut self) {
        self.ramp_from = self.factor;
    }

    /// Linear ramp from the recovery start value to full authority.
    pub fn ramp(&mut self, elapsed: f64, duration: f64) {
        let t = if duration > 0.0 {
            clamp01(elapsed / duration)
        } else {
            1.0
        };
        self.factor = lerp(self.ramp_from, 1.0, t).max(self.factor);
    }

    pub fn restore(&mut self) {
        *self = Self::default();
    }
}
