use std::collections::VecDeque;

use crate::components::plane::LoopPreventionConfig;
use crate::utils::clamp01;

/// Direction of a pitch command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PitchDirection {
    Up,
    Down,
}

impl PitchDirection {
    pub fn of(input: f64, deadzone: f64) -> Option<Self> {
        if input > deadzone {
            Some(PitchDirection::Up)
        } else if input < -deadzone {
            Some(PitchDirection::Down)
        } else {
            None
        }
    }

    fn sign(&self) -> f64 {
        match self {
            PitchDirection::Up => 1.0,
            PitchDirection::Down => -1.0,
        }
    }
}

/// Policy limiting how quickly a pilot can hold the nose through a loop.
pub trait LoopPrevention: Send + Sync {
    /// Feed the commanded pitch and the observed pitch angle for this tick.
    fn observe(&mut self, pitch_input: f64, pitch_angle: f64, dt: f64);

    /// Authority left in the given pitch direction, within [0, 1].
    fn pitch_authority(&self, direction: PitchDirection) -> f64;

    /// Multiplier (>= 1) for pull-up authority in a steep dive.
    fn recovery_boost(&self, pitch_angle: f64) -> f64;

    fn reset(&mut self);
}

/// Lets the pilot loop freely.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLoopPrevention;

impl LoopPrevention for NoLoopPrevention {
    fn observe(&mut self, _pitch_input: f64, _pitch_angle: f64, _dt: f64) {}

    fn pitch_authority(&self, _direction: PitchDirection) -> f64 {
        1.0
    }

    fn recovery_boost(&self, _pitch_angle: f64) -> f64 {
        1.0
    }

    fn reset(&mut self) {}
}

/// Scales back sustained same-direction pitch once the nose has swept more
/// than `angle_threshold` degrees within `window` seconds, and helps the pilot
/// pull out of near-vertical dives.
#[derive(Debug, Clone)]
pub struct StrictLoopPrevention {
    config: LoopPreventionConfig,
    deadzone: f64,
    direction: Option<PitchDirection>,
    /// (age, degrees swept in the commanded direction)
    samples: VecDeque<(f64, f64)>,
    previous_angle: Option<f64>,
}

impl StrictLoopPrevention {
    pub fn new(config: LoopPreventionConfig, deadzone: f64) -> Self {
        Self {
            config,
            deadzone,
            direction: None,
            samples: VecDeque::new(),
            previous_angle: None,
        }
    }

    /// Pitch change in the commanded direction within the window [deg].
    pub fn accumulated(&self) -> f64 {
        self.samples.iter().map(|(_, delta)| delta).sum::<f64>().max(0.0)
    }

    fn reduction(&self) -> f64 {
        let threshold = self.config.angle_threshold;
        let accumulated = self.accumulated();
        if accumulated <= threshold {
            return 0.0;
        }
        let excess = accumulated / threshold - 1.0;
        self.config.strength * clamp01(excess * excess)
    }
}

impl LoopPrevention for StrictLoopPrevention {
    fn observe(&mut self, pitch_input: f64, pitch_angle: f64, dt: f64) {
        let direction = PitchDirection::of(pitch_input, self.deadzone);
        if direction != self.direction {
            self.samples.clear();
            self.direction = direction;
        }

        let previous = self.previous_angle.replace(pitch_angle);
        let Some(direction) = direction else {
            return;
        };

        for sample in self.samples.iter_mut() {
            sample.0 += dt;
        }
        while self
            .samples
            .front()
            .is_some_and(|(age, _)| *age > self.config.window)
        {
            self.samples.pop_front();
        }

        if let Some(previous) = previous {
            let swept = (pitch_angle - previous) * direction.sign();
            self.samples.push_back((0.0, swept));
        }
    }

    fn pitch_authority(&self, direction: PitchDirection) -> f64 {
        if Some(direction) == self.direction {
            clamp01(1.0 - self.reduction())
        } else {
            1.0
        }
    }

    fn recovery_boost(&self, pitch_angle: f64) -> f64 {
        let dive = -pitch_angle;
        if dive <= self.config.recovery_angle {
            return 1.0;
        }
        let t = clamp01((dive - self.config.recovery_angle) / 20.0);
        1.0 + (self.config.recovery_boost - 1.0) * t
    }

    fn reset(&mut self) {
        self.samples.clear();
        self.direction = None;
        self.previous_angle = None;
    }
}
