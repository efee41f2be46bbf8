// src/gfx/rendering/pipeline_manager.rs
//! Render pipeline management
//!
//! Registers pipeline configurations up front and creates the actual wgpu
//! pipelines lazily, so layouts can be assembled before the first frame.

use std::{collections::HashMap, sync::Arc};
use wgpu::*;

use crate::gfx::scene::vertex::Vertex3D;

/// Configuration for creating a render pipeline.
#[derive(Clone)]
pub struct PipelineConfig {
    pub label: String,
    pub shader: String,
    pub bind_group_layouts: Vec<BindGroupLayout>,
    pub primitive_topology: PrimitiveTopology,
    pub cull_mode: Option<Face>,
    pub depth_format: Option<TextureFormat>,
    pub color_targets: Vec<Option<ColorTargetState>>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            label: "Default Pipeline".to_string(),
            shader: "forward".to_string(),
            bind_group_layouts: Vec::new(),
            primitive_topology: PrimitiveTopology::TriangleList,
            cull_mode: Some(Face::Back),
            depth_format: None,
            color_targets: vec![Some(ColorTargetState {
                format: TextureFormat::Bgra8Unorm,
                blend: Some(BlendState::REPLACE),
                write_mask: ColorWrites::ALL,
            })],
        }
    }
}

impl PipelineConfig {
    pub fn with_label(mut self, label: &str) -> Self {
        self.label = label.to_owned();
        self
    }

    pub fn with_shader(mut self, shader: &str) -> Self {
        self.shader = shader.to_string();
        self
    }

    pub fn with_bind_group_layouts(mut self, layouts: Vec<BindGroupLayout>) -> Self {
        self.bind_group_layouts = layouts;
        self
    }

    pub fn with_depth_format(mut self, format: TextureFormat) -> Self {
        self.depth_format = Some(format);
        self
    }

    pub fn with_color_targets(mut self, targets: Vec<Option<ColorTargetState>>) -> Self {
        self.color_targets = targets;
        self
    }

    pub fn with_cull_mode(mut self, face: Option<Face>) -> Self {
        self.cull_mode = face;
        self
    }
}

/// Manages render pipelines with lazy creation.
pub struct PipelineManager {
    device: Arc<Device>,
    pipelines: HashMap<String, RenderPipeline>,
    pipeline_configs: HashMap<String, PipelineConfig>,
    shader_modules: HashMap<String, ShaderModule>,
    pending_pipelines: Vec<String>,
}

impl PipelineManager {
    pub fn new(device: Arc<Device>) -> Self {
        Self {
            device,
            pipelines: HashMap::new(),
            pipeline_configs: HashMap::new(),
            shader_modules: HashMap::new(),
            pending_pipelines: Vec::new(),
        }
    }

    /// Compiles and stores a shader module under a name.
    pub fn load_shader(&mut self, name: &str, source: &str) {
        let module = self.device.create_shader_module(ShaderModuleDescriptor {
            label: Some(name),
            source: ShaderSource::Wgsl(source.into()),
        });
        self.shader_modules.insert(name.to_string(), module);
    }

    /// Registers a pipeline configuration; created on `create_all_pipelines`.
    pub fn register_pipeline(&mut self, name: &str, config: PipelineConfig) {
        self.pipeline_configs.insert(name.to_string(), config);
        self.pending_pipelines.push(name.to_string());
    }

    /// Creates every registered pipeline that does not exist yet.
    pub fn create_all_pipelines(&mut self) {
        let pending: Vec<String> = self.pending_pipelines.drain(..).collect();
        for name in pending {
            if self.pipelines.contains_key(&name) {
                continue;
            }
            match self.build_pipeline(&name) {
                Some(pipeline) => {
                    self.pipelines.insert(name, pipeline);
                }
                None => {
                    log::error!("failed to create pipeline '{}'", name);
                }
            }
        }
    }

    pub fn get_pipeline(&self, name: &str) -> Option<&RenderPipeline> {
        self.pipelines.get(name)
    }

    fn build_pipeline(&self, name: &str) -> Option<RenderPipeline> {
        let config = self.pipeline_configs.get(name)?;
        let shader = match self.shader_modules.get(&config.shader) {
            Some(module) => module,
            None => {
                log::error!(
                    "pipeline '{}' references unknown shader '{}'",
                    name,
                    config.shader
                );
                return None;
            }
        };

        let layout_refs: Vec<&BindGroupLayout> = config.bind_group_layouts.iter().collect();
        let pipeline_layout = self
            .device
            .create_pipeline_layout(&PipelineLayoutDescriptor {
                label: Some(&format!("{} Layout", config.label)),
                bind_group_layouts: &layout_refs,
                push_constant_ranges: &[],
            });

        let depth_stencil = config.depth_format.map(|format| DepthStencilState {
            format,
            depth_write_enabled: true,
            depth_compare: CompareFunction::Less,
            stencil: StencilState::default(),
            bias: DepthBiasState::default(),
        });

        let vertex_buffers = [Vertex3D::desc()];

        Some(
            self.device
                .create_render_pipeline(&RenderPipelineDescriptor {
                    label: Some(&config.label),
                    layout: Some(&pipeline_layout),
                    vertex: VertexState {
                        module: shader,
                        entry_point: Some("vs_main"),
                        buffers: &vertex_buffers,
                        compilation_options: PipelineCompilationOptions::default(),
                    },
                    primitive: PrimitiveState {
                        topology: config.primitive_topology,
                        cull_mode: config.cull_mode,
                        ..PrimitiveState::default()
                    },
                    depth_stencil,
                    multisample: MultisampleState::default(),
                    fragment: Some(FragmentState {
                        module: shader,
                        entry_point: Some("fs_main"),
                        targets: &config.color_targets,
                        compilation_options: PipelineCompilationOptions::default(),
                    }),
                    multiview: None,
                    cache: None,
                }),
        )
    }
}
