// src/loader/mod.rs
//! # Asynchronous Model Loading
//!
//! OBJ models are parsed on worker threads and handed back to the frame loop
//! over a channel, so loads never stall rendering and arrival order does not
//! matter. A failed load is logged and simply never produces a model; the
//! scene registry is untouched.
//!
//! Every request records the interaction-engine epoch at the time it was
//! issued. The application drops completions whose epoch is stale (a scene
//! clear happened while the load was in flight).

use std::io::BufReader;
use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver, Sender};

use cgmath::{Deg, Vector3};
use thiserror::Error;

use crate::interaction::SizeClass;

/// Where a model comes from: a local file or a backend-served URL.
#[derive(Debug, Clone)]
pub enum AssetSource {
    Path(PathBuf),
    Url(String),
}

impl std::fmt::Display for AssetSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AssetSource::Path(path) => write!(f, "{}", path.display()),
            AssetSource::Url(url) => write!(f, "{}", url),
        }
    }
}

/// A placement-aware load request.
#[derive(Debug, Clone)]
pub struct LoadRequest {
    pub source: AssetSource,
    pub tag: String,
    pub position: Vector3<f32>,
    pub rotation_y: Deg<f32>,
    pub size_class: SizeClass,
    /// Interaction-engine epoch when the request was issued.
    pub epoch: u64,
}

/// CPU-side mesh arrays in tobj's flat layout.
#[derive(Debug, Clone)]
pub struct MeshData {
    pub positions: Vec<f32>,
    pub normals: Vec<f32>,
    pub indices: Vec<u32>,
}

/// Material extracted from the model's MTL, if any.
#[derive(Debug, Clone)]
pub struct LoadedMaterial {
    pub name: String,
    pub base_color: [f32; 4],
    pub roughness: f32,
}

/// A completed load, ready to become a scene object.
#[derive(Debug, Clone)]
pub struct LoadedModel {
    pub tag: String,
    pub meshes: Vec<MeshData>,
    pub material: Option<LoadedMaterial>,
    pub position: Vector3<f32>,
    pub rotation_y: Deg<f32>,
    /// Uniform scale normalizing the mesh to its size class.
    pub scale: f32,
    /// Upward offset (post-scale) that grounds the mesh on the floor.
    pub lift: f32,
    pub epoch: u64,
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to fetch {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: Box<ureq::Error>,
    },
    #[error("failed to parse OBJ data: {0}")]
    Parse(#[from] tobj::LoadError),
    #[error("model contains no geometry")]
    EmptyModel,
}

fn load_options() -> tobj::LoadOptions {
    tobj::LoadOptions {
        single_index: true,
        triangulate: true,
        ..Default::default()
    }
}

/// Spawns load threads and collects their results.
pub struct ModelLoader {
    sender: Sender<LoadedModel>,
    receiver: Receiver<LoadedModel>,
}

impl ModelLoader {
    pub fn new() -> Self {
        let (sender, receiver) = channel();
        Self { sender, receiver }
    }

    /// Starts a load on a worker thread.
    ///
    /// Errors are logged on the worker; the request then yields nothing.
    pub fn spawn(&self, request: LoadRequest) {
        let sender = self.sender.clone();
        std::thread::spawn(move || match load_model(&request) {
            Ok(model) => {
                let _ = sender.send(model);
            }
            Err(err) => {
                log::warn!("model load failed for {}: {}", request.source, err);
            }
        });
    }

    /// Drains completed loads; called once per frame between ticks.
    pub fn poll(&self) -> Vec<LoadedModel> {
        self.receiver.try_iter().collect()
    }
}

impl Default for ModelLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Loads and normalizes a model synchronously.
///
/// Separated from the threading so it can be exercised directly in tests.
pub fn load_model(request: &LoadRequest) -> Result<LoadedModel, LoadError> {
    let (models, materials) = match &request.source {
        AssetSource::Path(path) => {
            let (models, materials) = tobj::load_obj(path, &load_options())?;
            (models, materials.unwrap_or_default())
        }
        AssetSource::Url(url) => {
            let response = ureq::get(url).call().map_err(|e| LoadError::Fetch {
                url: url.clone(),
                source: Box::new(e),
            })?;
            let mut reader = BufReader::new(response.into_reader());
            // MTL files referenced by remote models are not fetched; the
            // object falls back to its tag material.
            let (models, _materials) =
                tobj::load_obj_buf(&mut reader, &load_options(), |_| {
                    Ok((Vec::new(), Default::default()))
                })?;
            (models, Vec::new())
        }
    };

    let mut meshes = Vec::with_capacity(models.len());
    for model in &models {
        let mesh = &model.mesh;
        if mesh.positions.is_empty() || mesh.indices.is_empty() {
            continue;
        }
        meshes.push(MeshData {
            positions: mesh.positions.clone(),
            normals: mesh.normals.clone(),
            indices: mesh.indices.clone(),
        });
    }
    if meshes.is_empty() {
        return Err(LoadError::EmptyModel);
    }

    let material = models
        .first()
        .and_then(|model| model.mesh.material_id)
        .and_then(|id| materials.get(id))
        .map(|mtl| {
            let diffuse = mtl.diffuse.unwrap_or([0.8, 0.8, 0.8]);
            LoadedMaterial {
                name: if mtl.name.is_empty() {
                    format!("{}_material", request.tag)
                } else {
                    mtl.name.clone()
                },
                base_color: [
                    diffuse[0],
                    diffuse[1],
                    diffuse[2],
                    mtl.dissolve.unwrap_or(1.0),
                ],
                roughness: 1.0 - (mtl.shininess.unwrap_or(32.0) / 128.0).clamp(0.0, 1.0),
            }
        });

    let (scale, lift) = fit_to_size_class(&meshes, request.size_class);

    Ok(LoadedModel {
        tag: request.tag.clone(),
        meshes,
        material,
        position: request.position,
        rotation_y: request.rotation_y,
        scale,
        lift,
        epoch: request.epoch,
    })
}

/// Computes the uniform scale and ground lift for a set of meshes.
///
/// The scale maps the largest bounding-box extent onto the size class target;
/// the lift raises the scaled mesh so its lowest point sits at y = 0.
pub fn fit_to_size_class(meshes: &[MeshData], size_class: SizeClass) -> (f32, f32) {
    let mut min = [f32::INFINITY; 3];
    let mut max = [f32::NEG_INFINITY; 3];

    for mesh in meshes {
        for vertex in mesh.positions.chunks_exact(3) {
            for axis in 0..3 {
                min[axis] = min[axis].min(vertex[axis]);
                max[axis] = max[axis].max(vertex[axis]);
            }
        }
    }

    let extents = [max[0] - min[0], max[1] - min[1], max[2] - min[2]];
    let largest = extents[0].max(extents[1]).max(extents[2]);
    if !largest.is_finite() || largest <= 0.0 {
        return (1.0, 0.0);
    }

    let scale = size_class.target_extent() / largest;
    let lift = -min[1] * scale;
    (scale, lift)
}
