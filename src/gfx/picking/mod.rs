// src/gfx/picking/mod.rs
//! Cursor picking via ray casting.
//!
//! Used by the garden viewer to pin a tooltip when a sphere is clicked:
//! the cursor position is unprojected into a world-space ray and tested
//! against each sphere.

use cgmath::{InnerSpace, Matrix4, SquareMatrix, Vector3, Vector4};

use crate::gfx::camera::orbit_camera::OrbitCamera;
use crate::gfx::camera::camera_utils::Camera;

/// A world-space ray for intersection testing.
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    pub origin: Vector3<f32>,
    pub direction: Vector3<f32>,
}

impl Ray {
    pub fn new(origin: Vector3<f32>, direction: Vector3<f32>) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
        }
    }

    /// Ray through a cursor position, in world space.
    ///
    /// `cursor` is in physical pixels; `width`/`height` the surface size.
    /// Returns `None` when the view-projection matrix is singular.
    pub fn from_cursor(
        cursor: (f32, f32),
        width: u32,
        height: u32,
        camera: &OrbitCamera,
    ) -> Option<Self> {
        let ndc_x = (2.0 * cursor.0 / width.max(1) as f32) - 1.0;
        let ndc_y = 1.0 - (2.0 * cursor.1 / height.max(1) as f32);

        let view_proj: Matrix4<f32> = camera.build_view_projection_matrix();
        let inverse = view_proj.invert()?;

        let near = inverse * Vector4::new(ndc_x, ndc_y, 0.0, 1.0);
        let far = inverse * Vector4::new(ndc_x, ndc_y, 1.0, 1.0);
        if near.w.abs() < 1e-8 || far.w.abs() < 1e-8 {
            return None;
        }

        let p0 = near.truncate() / near.w;
        let p1 = far.truncate() / far.w;
        Some(Self::new(p0, p1 - p0))
    }

    /// Distance along the ray to the nearest intersection with a sphere,
    /// or `None` when the ray misses.
    pub fn intersect_sphere(&self, center: Vector3<f32>, radius: f32) -> Option<f32> {
        let oc = self.origin - center;
        let b = oc.dot(self.direction);
        let c = oc.dot(oc) - radius * radius;
        let disc = b * b - c;
        if disc < 0.0 {
            return None;
        }
        let t = -b - disc.sqrt();
        if t >= 0.0 {
            Some(t)
        } else {
            None
        }
    }
}

/// Index of the closest sphere hit by the ray, if any.
pub fn pick_sphere(ray: &Ray, centers: &[Vector3<f32>], radius: f32) -> Option<usize> {
    let mut best: Option<(usize, f32)> = None;
    for (i, center) in centers.iter().enumerate() {
        if let Some(t) = ray.intersect_sphere(*center, radius) {
            match best {
                Some((_, bt)) if t >= bt => {}
                _ => best = Some((i, t)),
            }
        }
    }
    best.map(|(i, _)| i)
}
