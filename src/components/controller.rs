use bevy::prelude::*;

/// Keyboard and mouse layout for the local pilot.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    pub throttle_up: KeyCode,
    pub throttle_down: KeyCode,
    pub yaw_left: KeyCode,
    pub yaw_right: KeyCode,
    pub free_look: KeyCode,
    pub reload: KeyCode,
    pub repair: KeyCode,
    pub fire: MouseButton,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            throttle_up: KeyCode::KeyW,
            throttle_down: KeyCode::KeyS,
            yaw_left: KeyCode::KeyA,
            yaw_right: KeyCode::KeyD,
            free_look: KeyCode::AltLeft,
            reload: KeyCode::KeyF,
            repair: KeyCode::KeyR,
            fire: MouseButton::Left,
        }
    }
}

/// Marks the plane driven by the local keyboard and mouse.
#[derive(Component, Debug)]
pub struct PlayerController {
    pub active: bool,
    pub bindings: KeyBindings,
    /// Converts mouse motion in pixels into raw axis deltas.
    pub mouse_scale: f64,
}

impl Default for PlayerController {
    fn default() -> Self {
        Self::new()
    }
}

impl PlayerController {
    pub fn new() -> Self {
        Self {
            active: true,
            bindings: KeyBindings::default(),
            mouse_scale: 0.05,
        }
    }

    pub fn disabled() -> Self {
        Self {
            active: false,
            ..Self::new()
        }
    }

    pub fn enable(&mut self) {
        self.active = true;
    }

    pub fn disable(&mut self) {
        self.active = false;
    }
}
