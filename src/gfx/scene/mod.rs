// src/gfx/scene/mod.rs
//! Scene management: the object registry the renderer draws from.
//!
//! A [`Scene`] owns the camera, the placed [`Object`]s in insertion order,
//! and the material library. Objects arrive either from procedural geometry
//! (floor, garden spheres) or from the async model loader.

pub mod object;
pub mod scene;
pub mod vertex;

pub use object::{DrawObject, Mesh, Object};
pub use scene::{Scene, HIGHLIGHT_MATERIAL};
pub use vertex::Vertex3D;
