// src/garden/mod.rs
//! # Garden Module
//!
//! The garden scatters text chunks in 3D: every point in the dataset carries
//! its content, a timeline category, tactic flags, and a 2D coordinate from a
//! dimensionality-reduction projection. Points become colored spheres laid
//! out on the XZ plane; walking or zooming close to one (or clicking it)
//! shows its content as a tooltip.

pub mod viewer;

pub use viewer::GardenApp;

use std::path::Path;

use cgmath::{Deg, Vector3};
use serde::Deserialize;
use thiserror::Error;

use crate::gfx::geometry::generate_sphere;
use crate::gfx::scene::{Object, Scene};
use crate::interaction::{InteractionEngine, PlacedObject, TargetId};

/// Timeline categories used by the source data.
pub const TIMING_CATEGORIES: [&str; 4] = ["beginning", "middle", "leaving", "after"];

/// Category used for points without a recognized timing.
pub const OTHER_CATEGORY: &str = "other";

/// Visual radius of a garden sphere in world units.
pub const SPHERE_RADIUS: f32 = 0.35;

/// One projected text chunk.
#[derive(Debug, Clone, Deserialize)]
pub struct GardenPoint {
    pub content: String,
    #[serde(default)]
    pub timing: String,
    #[serde(default)]
    pub tactics: Vec<String>,
    /// 2D coordinates from the projection (PCA or t-SNE).
    pub projection: [f32; 2],
}

impl GardenPoint {
    /// Timeline category, normalized to a known value.
    pub fn category(&self) -> &str {
        if TIMING_CATEGORIES.contains(&self.timing.as_str()) {
            &self.timing
        } else {
            OTHER_CATEGORY
        }
    }
}

/// The full dataset backing a garden scene.
#[derive(Debug, Clone, Deserialize)]
pub struct GardenDataset {
    pub points: Vec<GardenPoint>,
}

#[derive(Debug, Error)]
pub enum GardenError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse garden dataset: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("garden dataset contains no points")]
    Empty,
}

/// Loads a dataset from a JSON file.
pub fn load_dataset(path: &Path) -> Result<GardenDataset, GardenError> {
    let text = std::fs::read_to_string(path).map_err(|source| GardenError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let dataset: GardenDataset = serde_json::from_str(&text)?;
    if dataset.points.is_empty() {
        return Err(GardenError::Empty);
    }
    Ok(dataset)
}

/// Display color for a timeline category (RGBA).
///
/// Unknown categories fall back to gray so stray data is visible but muted.
pub fn category_color(category: &str) -> [f32; 4] {
    match category {
        "beginning" => [1.0, 0.498, 0.055, 1.0],
        "middle" => [0.173, 0.627, 0.173, 1.0],
        "leaving" => [0.839, 0.153, 0.157, 1.0],
        "after" => [0.580, 0.404, 0.741, 1.0],
        _ => [0.7, 0.7, 0.7, 1.0],
    }
}

/// Maps projection coordinates onto world positions.
///
/// Coordinates are normalized so the widest projection axis spans
/// `[-spread, spread]` on the XZ plane (projection scales are arbitrary and
/// differ between PCA and t-SNE runs). Height is derived from the tactic
/// count so heavily flagged chunks sit a little taller.
pub fn layout_positions(dataset: &GardenDataset, spread: f32) -> Vec<Vector3<f32>> {
    let mut min = [f32::INFINITY; 2];
    let mut max = [f32::NEG_INFINITY; 2];
    for point in &dataset.points {
        for axis in 0..2 {
            min[axis] = min[axis].min(point.projection[axis]);
            max[axis] = max[axis].max(point.projection[axis]);
        }
    }

    let extent = (max[0] - min[0]).max(max[1] - min[1]);
    let scale = if extent > 0.0 { 2.0 * spread / extent } else { 0.0 };

    dataset
        .points
        .iter()
        .map(|point| {
            let x = (point.projection[0] - (min[0] + max[0]) * 0.5) * scale;
            let z = (point.projection[1] - (min[1] + max[1]) * 0.5) * scale;
            let y = SPHERE_RADIUS + 0.5 + 0.15 * point.tactics.len().min(4) as f32;
            Vector3::new(x, y, z)
        })
        .collect()
}

/// Builds the engine allow-list for a dataset: every category present.
pub fn interactive_categories(dataset: &GardenDataset) -> Vec<String> {
    let mut categories: Vec<String> = Vec::new();
    for point in &dataset.points {
        let category = point.category();
        if !categories.iter().any(|c| c == category) {
            categories.push(category.to_string());
        }
    }
    categories
}

/// Fills a scene with one sphere per point and registers each with the
/// engine. Returns `(target, scene index)` pairs for focus application and
/// click picking.
pub fn populate(
    scene: &mut Scene,
    engine: &mut InteractionEngine,
    dataset: &GardenDataset,
    spread: f32,
) -> Vec<(TargetId, usize)> {
    let positions = layout_positions(dataset, spread);
    let mut bindings = Vec::with_capacity(dataset.points.len());

    for (i, (point, position)) in dataset.points.iter().zip(positions).enumerate() {
        let category = point.category().to_string();

        let material_id = format!("garden_{}", category);
        if !scene.material_manager.contains(&material_id) {
            let color = category_color(&category);
            scene.add_material(&material_id, color, 0.0, 0.55);
        }

        let mesh = generate_sphere(24, 16).into_mesh();
        let mut object = Object::new(format!("chunk_{}", i), category.clone(), vec![mesh]);
        object.set_material(&material_id);
        object.set_transform_trs(position, Deg(0.0), SPHERE_RADIUS);

        let object_index = scene.add_object(object);
        let target = engine.register(PlacedObject {
            tag: category,
            position,
            description: Some(point.content.clone()),
        });
        bindings.push((target, object_index));
    }

    bindings
}
