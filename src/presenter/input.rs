//! Pointer and keyboard mapping.

use log::debug;
use winit::event::{ElementState, MouseButton};
use winit::keyboard::{KeyCode, ModifiersState};

use super::Presenter;
use crate::gfx::camera::{CameraController, CameraDirection};
use crate::gfx::picking::PickOutcome;
use crate::manipulation::Command;

/// A pointer button press at a viewport position (pixels).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerInput {
    pub position: (f32, f32),
    pub button: MouseButton,
    /// 2 for a double click.
    pub click_count: u32,
    pub modifiers: ModifiersState,
}

impl PointerInput {
    pub fn new(position: (f32, f32), button: MouseButton) -> Self {
        Self {
            position,
            button,
            click_count: 1,
            modifiers: ModifiersState::empty(),
        }
    }

    pub fn double_click(mut self) -> Self {
        self.click_count = 2;
        self
    }

    pub fn with_modifiers(mut self, modifiers: ModifiersState) -> Self {
        self.modifiers = modifiers;
        self
    }

    fn is_double_click(&self) -> bool {
        self.click_count > 1
    }
}

/// A key press or release.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeyInput {
    pub key: KeyCode,
    pub state: ElementState,
    pub repeat: bool,
    pub modifiers: ModifiersState,
    /// Caps Lock switches WASD from flying to nudging the selection.
    pub caps_lock: bool,
}

impl KeyInput {
    pub fn pressed(key: KeyCode) -> Self {
        Self {
            key,
            state: ElementState::Pressed,
            repeat: false,
            modifiers: ModifiersState::empty(),
            caps_lock: false,
        }
    }

    pub fn released(key: KeyCode) -> Self {
        Self {
            state: ElementState::Released,
            ..Self::pressed(key)
        }
    }

    pub fn with_modifiers(mut self, modifiers: ModifiersState) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn with_caps_lock(mut self) -> Self {
        self.caps_lock = true;
        self
    }
}

/// Camera-relative nudge direction for a key while Caps Lock is on.
fn offset_direction(key: KeyCode) -> Option<CameraDirection> {
    match key {
        KeyCode::KeyW => Some(CameraDirection::Up),
        KeyCode::KeyA => Some(CameraDirection::Left),
        KeyCode::KeyS => Some(CameraDirection::Down),
        KeyCode::KeyD => Some(CameraDirection::Right),
        _ => None,
    }
}

impl Presenter {
    pub fn pointer_down(&mut self, input: &PointerInput) {
        let shift = input.modifiers.shift_key();
        let ctrl = input.modifiers.control_key();
        let alt = input.modifiers.alt_key();

        if input.is_double_click()
            && (input.button == MouseButton::Middle || (input.button == MouseButton::Right && shift))
        {
            self.reset_camera();
            return;
        }

        let is_select = input.button == MouseButton::Left && !alt;
        let is_look_at = input.button == MouseButton::Right && input.is_double_click();
        if !is_select && !is_look_at {
            return;
        }

        match self.hit_test(input.position, shift, !is_look_at) {
            PickOutcome::Content { node, point } => {
                if is_look_at {
                    self.camera.look_at(point);
                } else if let Err(err) = self.select(node, ctrl) {
                    debug!("Selection failed: {}", err);
                }
            }
            PickOutcome::Handle(_) | PickOutcome::Nothing => {}
        }
    }

    pub fn pointer_move(&mut self, position: (f32, f32)) {
        if !self.manipulator.is_manipulating() {
            return;
        }
        let cursor = self.unproject_at_selection(position);
        self.run_command(Command::Drag { cursor });
    }

    pub fn pointer_up(&mut self) {
        if self.manipulator.is_manipulating() {
            self.run_command(Command::Commit);
        }
    }

    pub fn key_input(&mut self, input: &KeyInput) {
        let shift = input.modifiers.shift_key();

        match input.state {
            ElementState::Pressed => {
                if input.caps_lock {
                    if let Some(direction) = offset_direction(input.key) {
                        self.offset_manipulation(direction, shift);
                        return;
                    }
                }

                if input.repeat {
                    return;
                }

                match input.key {
                    KeyCode::KeyF if shift => self.look_at_selected(),
                    KeyCode::KeyF => self.focus_selected(),
                    KeyCode::KeyT => self.track_selected(),
                    key => {
                        if !input.modifiers.control_key() && !input.modifiers.alt_key() {
                            self.controller.process_key(key, ElementState::Pressed, &mut self.camera);
                        }
                    }
                }
            }
            ElementState::Released => {
                if input.caps_lock && offset_direction(input.key).is_some() {
                    self.run_command(Command::Commit);
                    return;
                }
                if CameraController::direction_for(input.key).is_some() {
                    self.controller.process_key(input.key, ElementState::Released, &mut self.camera);
                }
            }
        }
    }

    /// Nudge the selection along a camera direction by one step.
    pub fn offset_manipulation(&mut self, direction: CameraDirection, small: bool) {
        let Some(step) = self.settings.offset_step(self.viewer_type, small) else {
            return;
        };
        let offset = self.camera.direction(direction) * step;
        self.run_command(Command::Offset(offset));
    }
}
