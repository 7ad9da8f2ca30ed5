use std::sync::Arc;

use bevy::prelude::*;
use nalgebra::{UnitQuaternion, Vector3};
use rand_chacha::ChaCha8Rng;

use crate::components::plane::{
    ControlInput, FailureState, FlightConfig, FlightOutput, FlightState, Telemetry, WeaponIntent,
};
use crate::components::SpatialComponent;
use crate::systems::flight::authority::{self, ControlAuthority};
use crate::systems::flight::loop_prevention::{
    LoopPrevention, NoLoopPrevention, StrictLoopPrevention,
};
use crate::systems::flight::{attitude, camera, failure, shaper, speed, velocity};
use crate::utils::{
    pitch_angle_deg, quaternion_is_finite, vector_is_finite, FlightError, RngManager,
};

/// Longest tick the model will integrate in one step [s].
pub const MAX_STEP: f64 = 0.25;

/// What the physics collaborator observed since the last tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExternalState {
    /// Position in world space, NED [m]
    pub position: Vector3<f64>,
    pub attitude: UnitQuaternion<f64>,
}

impl ExternalState {
    pub fn new(position: Vector3<f64>, attitude: UnitQuaternion<f64>) -> Self {
        Self { position, attitude }
    }
}

impl From<&SpatialComponent> for ExternalState {
    fn from(spatial: &SpatialComponent) -> Self {
        Self {
            position: spatial.position,
            attitude: spatial.attitude,
        }
    }
}

/// The arcade flight model of a single plane.
///
/// Owns its [`FlightState`] exclusively. Each call to [`FlightModel::step`]
/// turns one tick of pilot input and the observed position and attitude into
/// a velocity, an attitude and display data for the collaborators.
#[derive(Component)]
pub struct FlightModel {
    config: Arc<FlightConfig>,
    state: FlightState,
    loop_policy: Box<dyn LoopPrevention>,
    rng: ChaCha8Rng,
    last_output: FlightOutput,
}

impl FlightModel {
    /// Builds a model from an optional configuration, validating it first.
    pub fn initialize(config: Option<Arc<FlightConfig>>) -> Result<Self, FlightError> {
        let config = config.ok_or_else(|| {
            FlightError::ConfigurationMissing("initialize called without a configuration".into())
        })?;
        config.validate()?;
        Ok(Self::new(config))
    }

    /// Builds a model flying level at cruise speed from the origin.
    ///
    /// The configuration is trusted; use [`FlightModel::initialize`] for
    /// untrusted input.
    pub fn new(config: Arc<FlightConfig>) -> Self {
        let state = FlightState::new(
            config.speed.air_normal_speed,
            config.health.max_health,
            config.camera.default_fov,
        );

        let loop_policy: Box<dyn LoopPrevention> = if config.features.loop_prevention {
            Box::new(StrictLoopPrevention::new(
                config.loop_prevention.clone(),
                config.rotation.input_deadzone,
            ))
        } else {
            Box::new(NoLoopPrevention)
        };

        let rng = RngManager::new(config.seed).plane_rng(&config.name);

        let mut model = Self {
            config,
            state,
            loop_policy,
            rng,
            last_output: FlightOutput::default(),
        };
        model.last_output = model.build_output(
            velocity::frozen(&model.state),
            UnitQuaternion::identity(),
            &ControlAuthority::default(),
            &ControlInput::default(),
        );
        model
    }

    pub fn with_initial_speed(mut self, speed: f64) -> Self {
        if speed.is_finite() {
            let speed = speed.max(0.0);
            self.state.current_speed = speed;
            self.state.target_speed = speed;
            self.last_output.velocity = velocity::frozen(&self.state);
            self.last_output.telemetry.speed = speed;
            self.last_output.telemetry.target_speed = speed;
        }
        self
    }

    pub fn with_spawn(mut self, position: Vector3<f64>, attitude: UnitQuaternion<f64>) -> Self {
        self.read_back(&ExternalState::new(position, attitude));
        self.last_output.attitude = self.state.attitude;
        self.last_output.velocity = velocity::frozen(&self.state);
        self.last_output.telemetry.altitude = self.state.altitude;
        self.last_output.telemetry.pitch_angle = self.state.pitch_angle;
        self
    }

    pub fn with_loop_prevention(mut self, policy: Box<dyn LoopPrevention>) -> Self {
        self.loop_policy = policy;
        self
    }

    pub fn config(&self) -> &FlightConfig {
        &self.config
    }

    pub fn state(&self) -> &FlightState {
        &self.state
    }

    pub fn telemetry(&self) -> &Telemetry {
        &self.last_output.telemetry
    }

    pub fn last_output(&self) -> &FlightOutput {
        &self.last_output
    }

    /// Position and attitude as the model last saw them, for callers
    /// without a physics collaborator of their own.
    pub fn external_state(&self) -> ExternalState {
        ExternalState::new(self.state.position, self.state.attitude)
    }

    /// Removes health; non-finite or negative amounts are ignored.
    ///
    /// Returns the remaining health.
    pub fn apply_damage(&mut self, amount: f64) -> f64 {
        if !amount.is_finite() || amount <= 0.0 {
            warn!("Ignoring damage amount {}", amount);
            return self.state.health;
        }
        let was_destroyed = self.state.is_destroyed();
        self.state.health = (self.state.health - amount).max(0.0);
        if self.state.is_destroyed() && !was_destroyed {
            info!("{} destroyed", self.config.name);
        }
        self.last_output.telemetry.health = self.state.health;
        self.last_output.telemetry.destroyed = self.state.is_destroyed();
        self.state.health
    }

    /// Advances the model by one tick.
    ///
    /// A non-finite or non-positive `dt` leaves the model untouched and
    /// returns the previous output. Longer ticks are clamped to [`MAX_STEP`].
    pub fn step(
        &mut self,
        dt: f64,
        input: &ControlInput,
        external: &ExternalState,
    ) -> FlightOutput {
        if !dt.is_finite() || dt <= 0.0 {
            warn!("Skipping flight step with dt {}", dt);
            return self.last_output;
        }
        let dt = dt.min(MAX_STEP);
        let cfg = Arc::clone(&self.config);

        if input.has_non_finite() {
            warn!("Non-finite control input replaced with neutral values");
        }
        let input = input.sanitized(cfg.input.max_axis_delta);

        self.read_back(external);

        let was_repairing = matches!(self.state.failure, FailureState::Repairing { .. });
        if failure::request_repair(&mut self.state, input.repair, &cfg) {
            if !was_repairing {
                self.reset_control_history();
            }
            if failure::advance_repair(&mut self.state, &cfg, dt) {
                let suspended = ControlAuthority {
                    failure: 0.0,
                    ..Default::default()
                };
                self.last_output = self.build_output(
                    velocity::frozen(&self.state),
                    UnitQuaternion::identity(),
                    &suspended,
                    &input,
                );
                return self.last_output;
            }
        }

        let free_look = camera::update(
            &mut self.state.camera,
            &input,
            self.state.current_speed,
            self.state.altitude,
            &cfg,
            dt,
        );
        let flight_input = if free_look {
            ControlInput {
                pitch: 0.0,
                roll: 0.0,
                ..input
            }
        } else {
            input
        };

        let target = shaper::shape(&flight_input, &cfg);
        let smoothed = shaper::smooth(&mut self.state.input, target, &cfg, dt);

        let was_failing = self.state.failure.is_failure();
        let extra_rate = failure::step(&mut self.state, &cfg, &mut self.rng, dt);
        if !was_failing && self.state.failure.is_failure() {
            self.reset_control_history();
        }

        self.loop_policy
            .observe(smoothed.pitch, self.state.pitch_angle, dt);
        let authority = authority::compute(&self.state, &cfg, self.loop_policy.as_ref());
        let modulated = authority::modulate(smoothed, &authority);

        let delta = attitude::integrate(
            &mut self.state,
            modulated,
            extra_rate,
            &cfg.rotation,
            dt,
        );
        self.state.pitch_angle = pitch_angle_deg(&self.state.attitude);

        speed::update(
            &mut self.state,
            input.throttle,
            authority.throttle_effectiveness,
            &cfg,
            dt,
        );

        let velocity = velocity::emit(&self.state, &cfg, dt);
        debug!(
            "{}: speed {:.1}/{:.1} m/s, pitch {:.1} deg, state {:?}",
            cfg.name,
            self.state.current_speed,
            self.state.target_speed,
            self.state.pitch_angle,
            self.state.failure.kind()
        );

        self.last_output = self.build_output(velocity, delta, &authority, &input);
        self.last_output
    }

    /// Takes position and attitude from the physics collaborator, keeping the
    /// previous values for anything non-finite.
    fn read_back(&mut self, external: &ExternalState) {
        if vector_is_finite(&external.position) {
            self.state.position = external.position;
            self.state.altitude = -external.position.z;
        } else {
            warn!("Non-finite position from physics ignored");
        }

        if quaternion_is_finite(&external.attitude) {
            self.state.attitude =
                UnitQuaternion::from_quaternion(external.attitude.into_inner().normalize());
        } else {
            warn!("Non-finite attitude from physics ignored");
        }
        self.state.pitch_angle = pitch_angle_deg(&self.state.attitude);
    }

    /// Forgets the pitch sweep window and the input smoothing so a repair or
    /// a fresh failure starts from neutral.
    fn reset_control_history(&mut self) {
        self.loop_policy.reset();
        self.state.input.reset();
    }

    fn build_output(
        &self,
        velocity: Vector3<f64>,
        attitude_delta: UnitQuaternion<f64>,
        authority: &ControlAuthority,
        input: &ControlInput,
    ) -> FlightOutput {
        let state = &self.state;
        let cfg = &self.config;
        let armed = !state.is_destroyed()
            && !matches!(state.failure, FailureState::Repairing { .. });

        FlightOutput {
            velocity,
            attitude: state.attitude,
            attitude_delta,
            camera: camera::output(&state.camera),
            weapons: WeaponIntent {
                fire: armed && input.fire,
                reload: armed && input.reload,
            },
            telemetry: Telemetry {
                speed: state.current_speed,
                target_speed: state.target_speed,
                pitch_angle: state.pitch_angle,
                altitude: state.altitude,
                health: state.health,
                max_health: cfg.health.max_health,
                destroyed: state.is_destroyed(),
                failure: state.failure.kind(),
                warning_level: state.warning_level,
                control_reduction: state.control_reduction.factor(),
                authority: authority.report(),
                pitch_sensitivity: authority::effective_pitch_sensitivity(authority, cfg),
            },
        }
    }
}
