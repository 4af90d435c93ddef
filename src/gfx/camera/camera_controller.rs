use winit::{event::ElementState, keyboard::KeyCode};

use super::fly_camera::{CameraDirection, FlyCamera};

/// Keyboard fly controls: WASD moves in the view plane, Space and E rise and sink.
#[derive(Debug, Clone, Default)]
pub struct CameraController {
    held: Vec<KeyCode>,
}

impl CameraController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Camera direction a key moves in, shared with keyboard nudges.
    pub fn direction_for(key: KeyCode) -> Option<CameraDirection> {
        match key {
            KeyCode::KeyW => Some(CameraDirection::Forward),
            KeyCode::KeyS => Some(CameraDirection::Backward),
            KeyCode::KeyA => Some(CameraDirection::Left),
            KeyCode::KeyD => Some(CameraDirection::Right),
            KeyCode::Space => Some(CameraDirection::Up),
            KeyCode::KeyE => Some(CameraDirection::Down),
            _ => None,
        }
    }

    /// Start or stop flying. Returns false for keys that are not fly keys.
    pub fn process_key(&mut self, key: KeyCode, state: ElementState, camera: &mut FlyCamera) -> bool {
        let Some(direction) = Self::direction_for(key) else {
            return false;
        };

        match state {
            ElementState::Pressed => {
                if !self.held.contains(&key) {
                    self.held.push(key);
                }
                camera.start_fly(direction);
            }
            ElementState::Released => {
                self.held.retain(|held| *held != key);
                camera.stop_fly(direction);
            }
        }
        true
    }

    pub fn is_flying(&self) -> bool {
        !self.held.is_empty()
    }

    /// Stop every direction, e.g. when the window loses focus.
    pub fn release_all(&mut self, camera: &mut FlyCamera) {
        for key in self.held.drain(..) {
            if let Some(direction) = Self::direction_for(key) {
                camera.stop_fly(direction);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fly_keys_drive_camera() {
        let mut controller = CameraController::new();
        let mut camera = FlyCamera::default();

        assert!(controller.process_key(KeyCode::KeyW, ElementState::Pressed, &mut camera));
        assert!(camera.is_flying());
        assert!(controller.is_flying());

        assert!(!controller.process_key(KeyCode::KeyQ, ElementState::Pressed, &mut camera));

        controller.process_key(KeyCode::KeyW, ElementState::Released, &mut camera);
        assert!(!camera.is_flying());
    }

    #[test]
    fn test_release_all() {
        let mut controller = CameraController::new();
        let mut camera = FlyCamera::default();
        controller.process_key(KeyCode::KeyA, ElementState::Pressed, &mut camera);
        controller.process_key(KeyCode::Space, ElementState::Pressed, &mut camera);

        controller.release_all(&mut camera);
        assert!(!camera.is_flying());
        assert!(!controller.is_flying());
    }
}
