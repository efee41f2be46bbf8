// src/gfx/geometry/primitives.rs
//! Primitive shape generation with proper normals.

use std::f32::consts::PI;

use super::GeometryData;

/// Generate a UV sphere of radius 1.0 centered at the origin.
///
/// # Arguments
/// * `longitude_segments` - Number of vertical segments (min 3)
/// * `latitude_segments` - Number of horizontal segments (min 2)
pub fn generate_sphere(longitude_segments: u32, latitude_segments: u32) -> GeometryData {
    let mut data = GeometryData::new();

    let long_segs = longitude_segments.max(3);
    let lat_segs = latitude_segments.max(2);

    for lat in 0..=lat_segs {
        let theta = lat as f32 * PI / lat_segs as f32;
        let sin_theta = theta.sin();
        let cos_theta = theta.cos();

        for long in 0..=long_segs {
            let phi = long as f32 * 2.0 * PI / long_segs as f32;

            let x = sin_theta * phi.cos();
            let y = cos_theta;
            let z = sin_theta * phi.sin();

            data.vertices.push([x, y, z]);
            // Unit sphere: normal equals position
            data.normals.push([x, y, z]);
        }
    }

    for lat in 0..lat_segs {
        for long in 0..long_segs {
            let first = lat * (long_segs + 1) + long;
            let second = first + long_segs + 1;

            data.indices.push(first);
            data.indices.push(second);
            data.indices.push(first + 1);

            data.indices.push(second);
            data.indices.push(second + 1);
            data.indices.push(first + 1);
        }
    }

    data
}

/// Generate a flat XZ plane centered at the origin, normal up.
///
/// # Arguments
/// * `width` - Extent along X
/// * `depth` - Extent along Z
pub fn generate_plane(width: f32, depth: f32) -> GeometryData {
    let mut data = GeometryData::new();

    let hw = width * 0.5;
    let hd = depth * 0.5;

    data.vertices = vec![[-hw, 0.0, -hd], [hw, 0.0, -hd], [hw, 0.0, hd], [-hw, 0.0, hd]];
    data.normals = vec![[0.0, 1.0, 0.0]; 4];
    data.indices = vec![0, 2, 1, 0, 3, 2];

    data
}
