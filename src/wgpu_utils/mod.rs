// src/wgpu_utils/mod.rs
//! WGPU utility functions and helpers
//!
//! Small builders for bind group layouts and a typed uniform buffer wrapper.

pub mod binding_builder;
pub mod uniform_buffer;

pub use binding_builder::{
    uniform, BindGroupBuilder, BindGroupLayoutBuilder, BindGroupLayoutWithDesc,
};
pub use uniform_buffer::UniformBuffer;
