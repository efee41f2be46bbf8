// src/gfx/scene/scene.rs
use wgpu::Device;

use crate::gfx::{
    camera::camera_utils::CameraManager,
    resources::material::{Material, MaterialManager},
};

use super::object::Object;

/// Material id used for the focused-object appearance.
pub const HIGHLIGHT_MATERIAL: &str = "highlight";

/// Main scene containing objects, materials, and camera.
pub struct Scene {
    pub camera_manager: CameraManager,
    pub objects: Vec<Object>,
    pub material_manager: MaterialManager,
}

impl Scene {
    /// Creates a new scene with the given camera manager.
    ///
    /// The material library starts with the default material and the shared
    /// highlight material used for focused objects.
    pub fn new(camera_manager: CameraManager) -> Self {
        let mut material_manager = MaterialManager::new();
        material_manager.add_material(
            Material::new(HIGHLIGHT_MATERIAL, [1.0, 0.85, 0.3, 1.0], 0.0, 0.6)
                .with_emission(0.6, 0.45, 0.1),
        );

        Self {
            camera_manager,
            objects: Vec::new(),
            material_manager,
        }
    }

    /// Updates per-frame scene state (camera matrices).
    pub fn update(&mut self) {
        self.camera_manager.camera.update_view_proj();
    }

    /// Adds an object and returns its index in the scene.
    pub fn add_object(&mut self, object: Object) -> usize {
        self.objects.push(object);
        self.objects.len() - 1
    }

    /// Removes every object whose tag is not in `keep`.
    ///
    /// Used for the scene-clear action, which tears down placed models while
    /// leaving fixtures (the floor) alone.
    pub fn retain_tags(&mut self, keep: &[&str]) {
        self.objects.retain(|object| keep.contains(&object.tag.as_str()));
    }

    /// Creates a new material and adds it to the material manager.
    pub fn add_material(
        &mut self,
        name: &str,
        base_color: [f32; 4],
        metallic: f32,
        roughness: f32,
    ) -> &mut Material {
        let material = Material::new(name, base_color, metallic, roughness);
        self.material_manager.add_material(material);
        self.material_manager.get_material_mut(name).unwrap()
    }

    /// Convenience method for creating opaque materials from RGB.
    pub fn add_material_rgb(
        &mut self,
        name: &str,
        r: f32,
        g: f32,
        b: f32,
        metallic: f32,
        roughness: f32,
    ) -> &mut Material {
        self.add_material(name, [r, g, b, 1.0], metallic, roughness)
    }

    /// Initializes GPU resources for all objects and materials.
    ///
    /// Safe to call repeatedly; objects that already have GPU resources are
    /// skipped, so this doubles as the upload step for objects registered
    /// after startup by the async loader.
    pub fn init_gpu_resources(&mut self, device: &Device, queue: &wgpu::Queue) {
        for object in self.objects.iter_mut() {
            if object.gpu_resources.is_none() {
                object.init_gpu_resources(device);
            }
        }
        self.material_manager.update_all_gpu_resources(device, queue);
    }

    /// Syncs object transforms to the GPU.
    pub fn update_all_transforms(&mut self, queue: &wgpu::Queue) {
        for object in &mut self.objects {
            if object.gpu_resources.is_some() {
                object.update_transform(queue);
            }
        }
    }

    /// Material used to draw an object this frame.
    ///
    /// Focused objects get the shared highlight material; otherwise the
    /// object's assigned material with fallback to the default.
    pub fn get_material_for_object(&self, object: &Object) -> &Material {
        if object.highlighted {
            if let Some(material) = self.material_manager.get_material(HIGHLIGHT_MATERIAL) {
                return material;
            }
        }
        self.material_manager
            .get_material_for_object(object.material_id.as_ref())
    }

    pub fn get_object(&self, index: usize) -> Option<&Object> {
        self.objects.get(index)
    }

    pub fn get_object_mut(&mut self, index: usize) -> Option<&mut Object> {
        self.objects.get_mut(index)
    }

    pub fn get_object_count(&self) -> usize {
        self.objects.len()
    }

    pub fn get_object_names(&self) -> Vec<String> {
        self.objects.iter().map(|obj| obj.name.clone()).collect()
    }

    /// Derives a scene-unique name from the desired one.
    pub fn ensure_unique_name(&self, desired_name: &str) -> String {
        let mut counter = 0;
        let mut test_name = desired_name.to_string();

        while self.objects.iter().any(|obj| obj.name == test_name) {
            counter += 1;
            test_name = format!("{} ({})", desired_name, counter);
        }

        test_name
    }
}
