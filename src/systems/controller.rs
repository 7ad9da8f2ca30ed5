use bevy::input::mouse::AccumulatedMouseMotion;
use bevy::prelude::*;

use crate::components::{ControlInput, PlayerController, YawIntent};

/// Polls keyboard and mouse into the [`ControlInput`] of the player's plane.
///
/// Mouse motion drives pitch and roll, the keys drive throttle and the
/// discrete yaw intent. Does nothing when the input resources are missing,
/// as in headless runs.
pub fn keyboard_mouse_system(
    mut query: Query<(&PlayerController, &mut ControlInput)>,
    keyboard: Option<Res<ButtonInput<KeyCode>>>,
    mouse_buttons: Option<Res<ButtonInput<MouseButton>>>,
    mouse_motion: Option<Res<AccumulatedMouseMotion>>,
) {
    let Some(keyboard) = keyboard else {
        return;
    };

    for (controller, mut input) in query.iter_mut() {
        if !controller.active {
            continue;
        }
        let keys = &controller.bindings;

        input.throttle = match (
            keyboard.pressed(keys.throttle_up),
            keyboard.pressed(keys.throttle_down),
        ) {
            (true, false) => 1.0,
            (false, true) => -1.0,
            _ => 0.0,
        };

        input.yaw = match (
            keyboard.pressed(keys.yaw_left),
            keyboard.pressed(keys.yaw_right),
        ) {
            (true, false) => YawIntent::Left,
            (false, true) => YawIntent::Right,
            _ => YawIntent::None,
        };

        // Screen y grows downwards; pushing the mouse away pulls the nose up
        let delta = mouse_motion
            .as_ref()
            .map(|motion| motion.delta)
            .unwrap_or(Vec2::ZERO);
        input.pitch = -delta.y as f64 * controller.mouse_scale;
        input.roll = delta.x as f64 * controller.mouse_scale;

        input.free_look = keyboard.pressed(keys.free_look);
        input.reload = keyboard.just_pressed(keys.reload);
        input.repair = keyboard.just_pressed(keys.repair);
        input.fire = mouse_buttons
            .as_ref()
            .is_some_and(|buttons| buttons.pressed(keys.fire));
    }
}

/// Replaces the controls of the controlled plane with an external action,
/// e.g. from a script or a learning agent.
///
/// Run it with `World::run_system_once_with`.
pub fn apply_control_input(
    In(action): In<ControlInput>,
    mut query: Query<&mut ControlInput, With<PlayerController>>,
) {
    if let Ok(mut input) = query.get_single_mut() {
        *input = action;
    }
}
