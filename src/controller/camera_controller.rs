use crate::model::Camera;

/// Session state outside the camera itself.
pub struct GameState {
    /// Set once the player has entered the gallery for the first time;
    /// switches the menu between "enter" and "resume" wording.
    pub started: bool,
}

impl GameState {
    pub fn new() -> Self {
        Self { started: false }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies mouse-look deltas to the camera.
pub struct CameraController {
    pub mouse_sensitivity: f32,
}

impl CameraController {
    pub fn new() -> Self {
        Self {
            mouse_sensitivity: 0.002,
        }
    }

    /// Apply mouse look delta to camera
    pub fn apply_look(&self, camera: &mut Camera, dx: f32, dy: f32) {
        camera.yaw += dx * self.mouse_sensitivity;
        let pi_half = std::f32::consts::PI / 2.0;
        camera.pitch = (camera.pitch - dy * self.mouse_sensitivity).clamp(-pi_half, pi_half);
    }
}

impl Default for CameraController {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pitch_is_clamped() {
        let controller = CameraController::new();
        let mut cam = Camera::new(800, 600);
        controller.apply_look(&mut cam, 0.0, -100_000.0);
        assert!(cam.pitch <= std::f32::consts::PI / 2.0);
        controller.apply_look(&mut cam, 0.0, 100_000.0);
        assert!(cam.pitch >= -std::f32::consts::PI / 2.0);
    }

    #[test]
    fn test_yaw_accumulates() {
        let controller = CameraController::new();
        let mut cam = Camera::new(800, 600);
        controller.apply_look(&mut cam, 10.0, 0.0);
        controller.apply_look(&mut cam, 10.0, 0.0);
        assert!((cam.yaw - 20.0 * controller.mouse_sensitivity).abs() < 1e-6);
    }
}
