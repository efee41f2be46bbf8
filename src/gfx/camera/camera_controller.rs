// src/gfx/camera/camera_controller.rs
use winit::{
    dpi::PhysicalPosition,
    event::{DeviceEvent, ElementState, KeyEvent, MouseScrollDelta},
    keyboard::{KeyCode, PhysicalKey},
    window::Window,
};

use super::orbit_camera::OrbitCamera;

/// Translates raw input into orbit camera motion.
///
/// Mouse drag orbits, shift-drag pans, wheel zooms, and WASD walks the focus
/// point across the floor.
pub struct CameraController {
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub pan_speed: f32,
    pub walk_speed: f32,
    is_shift_held: bool,
    is_mouse_pressed: bool,
    forward_held: bool,
    back_held: bool,
    left_held: bool,
    right_held: bool,
}

impl CameraController {
    pub fn new(rotate_speed: f32, zoom_speed: f32) -> Self {
        Self {
            rotate_speed,
            zoom_speed,
            pan_speed: 0.01,
            walk_speed: 3.5,
            is_shift_held: false,
            is_mouse_pressed: false,
            forward_held: false,
            back_held: false,
            left_held: false,
            right_held: false,
        }
    }

    pub fn process_events(
        &mut self,
        event: &DeviceEvent,
        window: &Window,
        camera: &mut OrbitCamera,
    ) {
        match event {
            DeviceEvent::Button {
                button: 0, // Left mouse button
                state,
            } => {
                self.is_mouse_pressed = *state == ElementState::Pressed;
            }
            DeviceEvent::MouseWheel { delta, .. } => {
                let scroll_amount = -match delta {
                    MouseScrollDelta::LineDelta(_, scroll) => *scroll,
                    MouseScrollDelta::PixelDelta(PhysicalPosition { y: scroll, .. }) => {
                        *scroll as f32
                    }
                };
                camera.add_distance(scroll_amount * self.zoom_speed);
                window.request_redraw();
            }
            DeviceEvent::MouseMotion { delta } => {
                if self.is_mouse_pressed {
                    if self.is_shift_held {
                        camera.pan((
                            -delta.0 as f32 * self.pan_speed,
                            delta.1 as f32 * self.pan_speed,
                        ));
                    } else {
                        camera.add_yaw(-delta.0 as f32 * self.rotate_speed);
                        camera.add_pitch(delta.1 as f32 * self.rotate_speed);
                    }
                    window.request_redraw();
                }
            }
            _ => (),
        }
    }

    pub fn process_keyed_events(&mut self, event: &KeyEvent, camera: &mut OrbitCamera) {
        let PhysicalKey::Code(code) = event.physical_key else {
            return;
        };
        let pressed = event.state == ElementState::Pressed;

        match code {
            KeyCode::ShiftLeft | KeyCode::ShiftRight => self.is_shift_held = pressed,
            KeyCode::KeyW | KeyCode::ArrowUp => self.forward_held = pressed,
            KeyCode::KeyS | KeyCode::ArrowDown => self.back_held = pressed,
            KeyCode::KeyA | KeyCode::ArrowLeft => self.left_held = pressed,
            KeyCode::KeyD | KeyCode::ArrowRight => self.right_held = pressed,
            KeyCode::KeyC if pressed && self.is_shift_held => {
                camera.reset_to_default();
            }
            _ => (),
        }
    }

    /// Applies held walk keys; called once per frame with the frame delta.
    pub fn update_walk(&mut self, dt: f32, camera: &mut OrbitCamera) -> bool {
        let mut forward = 0.0;
        let mut strafe = 0.0;
        if self.forward_held {
            forward += 1.0;
        }
        if self.back_held {
            forward -= 1.0;
        }
        if self.right_held {
            strafe += 1.0;
        }
        if self.left_held {
            strafe -= 1.0;
        }

        if forward == 0.0 && strafe == 0.0 {
            return false;
        }

        let step = self.walk_speed * dt;
        camera.walk(forward * step, strafe * step);
        true
    }
}
