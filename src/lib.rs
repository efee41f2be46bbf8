// src/lib.rs
//! Showroom
//!
//! A 3D furniture viewer built on wgpu and winit: models load asynchronously
//! into a room, walking up to a piece highlights it and shows its
//! description, and a backend service can generate new pieces from a text
//! prompt. The companion garden viewer scatters embedding-projected text
//! chunks as spheres with the same proximity tooltips.

pub mod app;
pub mod backend;
pub mod garden;
pub mod gfx;
pub mod interaction;
pub mod loader;
pub mod prelude;
pub mod ui;
pub mod wgpu_utils;

pub use app::ShowroomApp;

/// Creates a viewer without a backend (local browsing only)
pub fn default() -> ShowroomApp {
    pollster::block_on(ShowroomApp::new(None))
}
