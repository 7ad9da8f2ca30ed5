use crate::components::plane::{CameraConfig, CameraOutput, CameraState, ControlInput, FlightConfig};
use crate::systems::flight::authority::altitude_factor;
use crate::utils::{clamp01, exp_blend, lerp};

/// Field of view the camera eases towards: wider with boost and near the
/// ceiling.
pub fn target_fov(speed: f64, altitude: f64, cfg: &FlightConfig) -> f64 {
    let camera = &cfg.camera;
    let boost_band = cfg.speed.air_boost_speed - cfg.speed.air_normal_speed;
    let speed_t = if boost_band > 0.0 {
        clamp01((speed - cfg.speed.air_normal_speed) / boost_band)
    } else {
        0.0
    };
    lerp(camera.default_fov, camera.max_fov, speed_t)
        + camera.altitude_fov_bonus * altitude_factor(altitude, cfg)
}

/// Advances the chase camera.
///
/// Returns true while free-look holds the pointer, in which case the raw
/// axis deltas moved the camera and must not reach the flight controls.
pub fn update(
    camera: &mut CameraState,
    raw: &ControlInput,
    speed: f64,
    altitude: f64,
    cfg: &FlightConfig,
    dt: f64,
) -> bool {
    let target = target_fov(speed, altitude, cfg);
    camera.fov += (target - camera.fov) * exp_blend(cfg.camera.fov_smooth_speed, dt);

    if raw.free_look {
        look_around(camera, raw, &cfg.camera);
    } else if camera.free_look {
        camera.free_look = false;
        camera.reset_from = (camera.look_yaw, camera.look_pitch);
        camera.reset_elapsed = Some(0.0);
        advance_reset(camera, &cfg.camera, dt);
    } else {
        advance_reset(camera, &cfg.camera, dt);
    }

    camera.free_look
}

fn look_around(camera: &mut CameraState, raw: &ControlInput, cfg: &CameraConfig) {
    camera.free_look = true;
    camera.reset_elapsed = None;
    camera.look_yaw = (camera.look_yaw + raw.roll * cfg.look_sensitivity)
        .clamp(-cfg.look_limit_yaw, cfg.look_limit_yaw);
    camera.look_pitch = (camera.look_pitch + raw.pitch * cfg.look_sensitivity)
        .clamp(-cfg.look_limit_pitch, cfg.look_limit_pitch);
}

/// Linear return of the look offsets to centre after free-look ends.
fn advance_reset(camera: &mut CameraState, cfg: &CameraConfig, dt: f64) {
    let Some(elapsed) = camera.reset_elapsed else {
        return;
    };
    let elapsed = elapsed + dt;
    let t = if cfg.camera_blend_time > 0.0 {
        clamp01(elapsed / cfg.camera_blend_time)
    } else {
        1.0
    };

    let (yaw, pitch) = camera.reset_from;
    camera.look_yaw = lerp(yaw, 0.0, t);
    camera.look_pitch = lerp(pitch, 0.0, t);
    camera.reset_elapsed = if t < 1.0 { Some(elapsed) } else { None };
}

pub fn output(camera: &CameraState) -> CameraOutput {
    CameraOutput {
        fov: camera.fov,
        look_yaw: camera.look_yaw,
        look_pitch: camera.look_pitch,
        free_look: camera.free_look,
    }
}
