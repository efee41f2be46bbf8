// src/prelude.rs
//! Convenience re-exports for typical showroom applications.
//!
//! ```no_run
//! use showroom::prelude::*;
//!
//! fn main() {
//!     let app = showroom::default();
//!     app.run();
//! }
//! ```

pub use crate::app::ShowroomApp;
pub use crate::backend::BackendClient;
pub use crate::default;
pub use crate::gfx::camera::CameraManager;
pub use crate::gfx::scene::{Object, Scene};
pub use crate::interaction::{
    Catalog, InteractionEngine, PlacedObject, SizeClass, INTERACTION_DISTANCE,
};
pub use crate::loader::{AssetSource, LoadRequest, ModelLoader};
