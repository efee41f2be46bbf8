// src/ui/mod.rs
//! # User Interface Module
//!
//! ImGui-based overlay UI: the manager that ties ImGui to wgpu/winit, and
//! the panels drawn on top of the 3D scene.

pub mod manager;
pub mod panels;

pub use manager::UiManager;
pub use panels::{
    chat_panel, description_overlay, generate_panel, ChatLine, ChatState, GenerateAction,
    GenerateState, OverlayState, MISSING_DESCRIPTION,
};
