// src/gfx/camera/mod.rs
//! Orbit camera with mouse and keyboard controls.

pub mod camera_controller;
pub mod camera_utils;
pub mod orbit_camera;

pub use camera_controller::CameraController;
pub use camera_utils::CameraManager;
pub use orbit_camera::OrbitCamera;
