// src/gfx/rendering/mod.rs
//! Forward rendering pipeline built on wgpu.

pub mod pipeline_manager;
pub mod render_engine;

pub use pipeline_manager::{PipelineConfig, PipelineManager};
pub use render_engine::RenderEngine;
