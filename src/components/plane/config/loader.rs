use std::path::Path;
use thiserror::Error;

use crate::components::plane::config::FlightConfig;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    FileError(#[from] std::io::Error),
    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),
    #[error("Invalid plane configuration: {0}")]
    ValidationError(String),
}

impl FlightConfig {
    /// Reads and validates a plane configuration from a YAML file.
    ///
    /// Missing fields fall back to the defaults of their group, so a file
    /// only needs to list what differs from a stock plane.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let file_contents = std::fs::read_to_string(path)?;
        Self::from_yaml(&file_contents)
    }

    /// Parses and validates a plane configuration from a YAML string.
    pub fn from_yaml(contents: &str) -> Result<Self, ConfigError> {
        let config: FlightConfig = serde_yaml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the bounds the flight model relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let speed = &self.speed;
        positive("speed.air_normal_speed", speed.air_normal_speed)?;
        positive("speed.acceleration_rate", speed.acceleration_rate)?;
        positive("speed.deceleration_rate", speed.deceleration_rate)?;
        if !speed.air_boost_speed.is_finite() || speed.air_boost_speed < speed.air_normal_speed {
            return Err(invalid(format!(
                "speed.air_boost_speed ({}) must not be below speed.air_normal_speed ({})",
                speed.air_boost_speed, speed.air_normal_speed
            )));
        }
        unit_interval("speed.reverse_speed_fraction", speed.reverse_speed_fraction)?;
        unit_interval("speed.extreme_climb_threshold", speed.extreme_climb_threshold)?;
        if speed.extreme_climb_threshold >= 1.0 {
            return Err(invalid(
                "speed.extreme_climb_threshold must be below 1".to_string(),
            ));
        }
        non_negative("speed.pitch_speed_influence", speed.pitch_speed_influence)?;
        non_negative("speed.dive_speed_boost", speed.dive_speed_boost)?;
        non_negative("speed.climb_speed_penalty", speed.climb_speed_penalty)?;

        let rotation = &self.rotation;
        damping("rotation.rotational_damping", rotation.rotational_damping)?;
        damping("rotation.roll_damping", rotation.roll_damping)?;
        positive("rotation.response_rate", rotation.response_rate)?;
        non_negative("rotation.input_deadzone", rotation.input_deadzone)?;
        non_negative("rotation.pitch_speed", rotation.pitch_speed)?;
        non_negative("rotation.roll_speed", rotation.roll_speed)?;
        non_negative("rotation.yaw_speed", rotation.yaw_speed)?;

        let input = &self.input;
        positive("input.input_smooth_time", input.input_smooth_time)?;
        positive("input.keyboard_smooth_time", input.keyboard_smooth_time)?;
        positive("input.max_axis_delta", input.max_axis_delta)?;
        positive("input.exponential_pitch_factor", input.exponential_pitch_factor)?;
        non_negative("input.progressive_roll_threshold", input.progressive_roll_threshold)?;
        non_negative("input.mouse_sensitivity", input.mouse_sensitivity)?;
        non_negative(
            "input.pitch_sensitivity_multiplier",
            input.pitch_sensitivity_multiplier,
        )?;
        non_negative(
            "input.roll_sensitivity_multiplier",
            input.roll_sensitivity_multiplier,
        )?;
        non_negative(
            "input.progressive_roll_multiplier",
            input.progressive_roll_multiplier,
        )?;

        let altitude = &self.altitude;
        positive("altitude.max_altitude", altitude.max_altitude)?;
        finite("altitude.warning_threshold", altitude.warning_threshold)?;
        if altitude.warning_threshold >= altitude.max_altitude {
            return Err(invalid(format!(
                "altitude.warning_threshold ({}) must be below altitude.max_altitude ({})",
                altitude.warning_threshold, altitude.max_altitude
            )));
        }
        unit_interval("altitude.authority_floor", altitude.authority_floor)?;
        unit_interval("altitude.speed_penalty_start", altitude.speed_penalty_start)?;
        if altitude.speed_penalty_start >= 1.0 {
            return Err(invalid(
                "altitude.speed_penalty_start must be below 1".to_string(),
            ));
        }
        unit_interval("altitude.speed_penalty_floor", altitude.speed_penalty_floor)?;
        positive(
            "altitude.forced_descent_duration",
            altitude.forced_descent_duration,
        )?;
        unit_interval(
            "altitude.forced_descent_control_factor",
            altitude.forced_descent_control_factor,
        )?;
        finite("altitude.forced_descent_pitch", altitude.forced_descent_pitch)?;
        non_negative("altitude.forced_descent_gain", altitude.forced_descent_gain)?;

        let stall = &self.stall;
        unit_interval("stall.speed_fraction", stall.speed_fraction)?;
        unit_interval("stall.speed_penalty", stall.speed_penalty)?;
        unit_interval("stall.control_factor", stall.control_factor)?;
        unit_interval("stall.freefall_speed_fraction", stall.freefall_speed_fraction)?;
        unit_interval("stall.residual_lift", stall.residual_lift)?;
        unit_interval("stall.warning_level_threshold", stall.warning_level_threshold)?;
        positive("stall.pitch_threshold", stall.pitch_threshold)?;
        positive("stall.recovery_duration", stall.recovery_duration)?;
        positive("stall.blend_time", stall.blend_time)?;
        positive("stall.altitude_warning_buffer", stall.altitude_warning_buffer)?;
        non_negative("stall.recovery_time", stall.recovery_time)?;
        non_negative("stall.trigger_time", stall.trigger_time)?;
        finite("stall.recovery_pitch", stall.recovery_pitch)?;
        non_negative("stall.recovery_speed_fraction", stall.recovery_speed_fraction)?;
        non_negative("stall.entry_impulse", stall.entry_impulse)?;
        non_negative("stall.nose_drop_rate", stall.nose_drop_rate)?;
        non_negative("stall.wobble_rate", stall.wobble_rate)?;
        non_negative("stall.freefall_min_time", stall.freefall_min_time)?;
        non_negative("stall.freefall_nose_drop_rate", stall.freefall_nose_drop_rate)?;
        if !(1.0..=2.0).contains(&stall.gravity_multiplier) {
            return Err(invalid(format!(
                "stall.gravity_multiplier must be within [1, 2], got {}",
                stall.gravity_multiplier
            )));
        }

        let loop_prevention = &self.loop_prevention;
        positive("loop_prevention.window", loop_prevention.window)?;
        positive(
            "loop_prevention.angle_threshold",
            loop_prevention.angle_threshold,
        )?;
        unit_interval("loop_prevention.strength", loop_prevention.strength)?;
        finite("loop_prevention.recovery_angle", loop_prevention.recovery_angle)?;
        if !loop_prevention.recovery_boost.is_finite() || loop_prevention.recovery_boost < 1.0 {
            return Err(invalid(format!(
                "loop_prevention.recovery_boost must be at least 1, got {}",
                loop_prevention.recovery_boost
            )));
        }

        positive("health.max_health", self.health.max_health)?;
        non_negative("health.repair_time", self.health.repair_time)?;
        non_negative("health.repair_amount", self.health.repair_amount)?;

        let physics = &self.physics;
        non_negative("physics.gravitational_force", physics.gravitational_force)?;
        non_negative("physics.gravity_velocity_scale", physics.gravity_velocity_scale)?;

        let camera = &self.camera;
        positive("camera.default_fov", camera.default_fov)?;
        positive("camera.max_fov", camera.max_fov)?;
        non_negative("camera.altitude_fov_bonus", camera.altitude_fov_bonus)?;
        positive("camera.fov_smooth_speed", camera.fov_smooth_speed)?;
        positive("camera.camera_blend_time", camera.camera_blend_time)?;
        non_negative("camera.look_limit_yaw", camera.look_limit_yaw)?;
        non_negative("camera.look_limit_pitch", camera.look_limit_pitch)?;
        non_negative("camera.look_sensitivity", camera.look_sensitivity)?;

        Ok(())
    }
}

fn invalid(message: String) -> ConfigError {
    ConfigError::ValidationError(message)
}

fn finite(field: &str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(invalid(format!("{} must be finite, got {}", field, value)))
    }
}

fn positive(field: &str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(invalid(format!("{} must be positive, got {}", field, value)))
    }
}

fn non_negative(field: &str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(invalid(format!("{} must not be negative, got {}", field, value)))
    }
}

fn unit_interval(field: &str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(invalid(format!("{} must be within [0, 1], got {}", field, value)))
    }
}

fn damping(field: &str, value: f64) -> Result<(), ConfigError> {
    if value > 0.0 && value < 1.0 {
        Ok(())
    } else {
        Err(invalid(format!("{} must be within (0, 1), got {}", field, value)))
    }
}
