// src/garden/viewer.rs
//! Windowed viewer for the garden scene.
//!
//! Smaller sibling of the showroom app: no loader and no backend, just the
//! populated sphere field, proximity tooltips, and click-to-pin. Clicking a
//! sphere pins its tooltip; clicking empty space unpins it and proximity
//! takes over again.

use std::sync::Arc;
use std::time::Instant;

use cgmath::Vector3;
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::{ElementState, MouseButton, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowAttributes},
};

use crate::gfx::{
    camera::{
        camera_controller::CameraController, camera_utils::CameraManager,
        orbit_camera::OrbitCamera,
    },
    picking::{pick_sphere, Ray},
    rendering::render_engine::RenderEngine,
    scene::Scene,
};
use crate::interaction::{FocusChange, InteractionEngine, TargetId};
use crate::ui::{description_overlay, OverlayState, UiManager};

use super::{
    category_color, interactive_categories, populate, GardenDataset, SPHERE_RADIUS,
};

/// Garden tooltips trigger from a little farther out than furniture; the
/// spheres are small and the camera tends to stay high.
const GARDEN_INTERACTION_DISTANCE: f32 = 2.5;

/// World half-extent of the scattered projection.
const GARDEN_SPREAD: f32 = 9.0;

pub struct GardenApp {
    event_loop: Option<EventLoop<()>>,
    state: GardenState,
}

struct GardenState {
    window: Option<Arc<Window>>,
    render_engine: Option<RenderEngine>,
    ui_manager: Option<UiManager>,
    scene: Scene,
    engine: InteractionEngine,
    bindings: Vec<(TargetId, usize)>,
    category_counts: Vec<(String, usize)>,
    overlay: OverlayState,
    pinned: Option<TargetId>,
    cursor: (f32, f32),
    last_frame: Instant,
}

impl GardenApp {
    pub async fn new(dataset: GardenDataset) -> Self {
        let event_loop = EventLoop::new().expect("Failed to create event loop");

        let mut camera = OrbitCamera::new(14.0, 0.6, 0.3, Vector3::new(0.0, 1.0, 0.0), 1.0);
        camera.bounds.min_distance = Some(0.8);
        let controller = CameraController::new(0.005, 0.4);
        let camera_manager = CameraManager::new(camera, controller);

        let mut engine = InteractionEngine::new(
            GARDEN_INTERACTION_DISTANCE,
            interactive_categories(&dataset),
        );
        let mut scene = Scene::new(camera_manager);
        let bindings = populate(&mut scene, &mut engine, &dataset, GARDEN_SPREAD);

        let mut category_counts: Vec<(String, usize)> = Vec::new();
        for point in &dataset.points {
            let category = point.category();
            match category_counts.iter_mut().find(|(name, _)| name == category) {
                Some((_, count)) => *count += 1,
                None => category_counts.push((category.to_string(), 1)),
            }
        }

        Self {
            event_loop: Some(event_loop),
            state: GardenState {
                window: None,
                render_engine: None,
                ui_manager: None,
                scene,
                engine,
                bindings,
                category_counts,
                overlay: OverlayState::default(),
                pinned: None,
                cursor: (0.0, 0.0),
                last_frame: Instant::now(),
            },
        }
    }

    pub fn run(mut self) {
        let event_loop = self.event_loop.take().expect("Event loop already consumed");
        event_loop.set_control_flow(ControlFlow::Poll);

        event_loop
            .run_app(&mut self.state)
            .expect("Failed to run event loop");
    }
}

impl GardenState {
    fn show_target(&mut self, target: TargetId) {
        if let Some(placed) = self.engine.get(target) {
            let body = placed.description.clone().unwrap_or_default();
            self.overlay.show(placed.tag.clone(), body);
        }
    }

    fn apply_focus_change(&mut self, change: FocusChange) {
        if let Some(left) = change.left {
            if let Some(&(_, index)) = self.bindings.iter().find(|(t, _)| *t == left) {
                if let Some(object) = self.scene.get_object_mut(index) {
                    object.highlighted = false;
                }
            }
        }
        if let Some(entered) = change.entered {
            if let Some(&(_, index)) = self.bindings.iter().find(|(t, _)| *t == entered) {
                if let Some(object) = self.scene.get_object_mut(index) {
                    object.highlighted = true;
                }
            }
        }

        // The pinned tooltip wins over proximity
        if self.pinned.is_none() {
            if change.entered.is_none() {
                self.overlay.hide();
            } else if let Some(entered) = change.entered {
                self.show_target(entered);
            }
        }
    }

    /// Click handling: pin the sphere under the cursor, or unpin.
    fn handle_click(&mut self) {
        let Some(render_engine) = &self.render_engine else {
            return;
        };
        let (width, height) = render_engine.get_surface_size();
        let Some(ray) = Ray::from_cursor(
            self.cursor,
            width,
            height,
            &self.scene.camera_manager.camera,
        ) else {
            return;
        };

        let centers: Vec<Vector3<f32>> = self
            .bindings
            .iter()
            .filter_map(|(target, _)| self.engine.get(*target).map(|p| p.position))
            .collect();

        match pick_sphere(&ray, &centers, SPHERE_RADIUS) {
            Some(hit) => {
                let (target, _) = self.bindings[hit];
                self.pinned = Some(target);
                self.show_target(target);
            }
            None => {
                self.pinned = None;
                match self.engine.focused() {
                    Some(focused) => self.show_target(focused),
                    None => self.overlay.hide(),
                }
            }
        }
    }

    fn frame(&mut self) {
        let now = Instant::now();
        let dt = (now - self.last_frame).as_secs_f32().min(0.1);
        self.last_frame = now;

        self.scene.camera_manager.update_walk(dt);
        self.scene.update();

        let viewpoint = self.scene.camera_manager.eye_position();
        if let Some(change) = self.engine.tick(viewpoint) {
            self.apply_focus_change(change);
        }

        let (Some(render_engine), Some(ui_manager), Some(window)) = (
            self.render_engine.as_mut(),
            self.ui_manager.as_mut(),
            self.window.as_ref(),
        ) else {
            return;
        };

        render_engine.update(self.scene.camera_manager.camera.uniform);

        let scene = &self.scene;
        let overlay = &self.overlay;
        let category_counts = &self.category_counts;
        let window = window.clone();

        render_engine.render_frame(
            scene,
            Some(
                |device: &wgpu::Device,
                 queue: &wgpu::Queue,
                 encoder: &mut wgpu::CommandEncoder,
                 view: &wgpu::TextureView| {
                    ui_manager.update_logic(&window, |ui| {
                        description_overlay(ui, overlay);
                        legend_panel(ui, category_counts);
                    });
                    ui_manager.render_display_only(device, queue, encoder, view);
                },
            ),
        );
    }
}

/// Category legend with per-category point counts.
fn legend_panel(ui: &imgui::Ui, category_counts: &[(String, usize)]) {
    ui.window("Garden")
        .size([220.0, 0.0], imgui::Condition::FirstUseEver)
        .position([20.0, 20.0], imgui::Condition::FirstUseEver)
        .build(|| {
            for (category, count) in category_counts {
                let color = category_color(category);
                ui.text_colored(color, format!("* {} ({})", category, count));
            }
            ui.separator();
            ui.text_disabled("click a sphere to pin its text");
        });
}

impl ApplicationHandler for GardenState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let Ok(window) = event_loop.create_window(
            WindowAttributes::default()
                .with_title("Garden")
                .with_inner_size(winit::dpi::LogicalSize::new(1280, 800)),
        ) else {
            log::error!("failed to create window");
            event_loop.exit();
            return;
        };

        let window_handle = Arc::new(window);
        self.window = Some(window_handle.clone());

        let (width, height) = window_handle.inner_size().into();
        let window_clone = window_handle.clone();
        let renderer =
            pollster::block_on(async move { RenderEngine::new(window_clone, width, height).await });

        self.scene
            .camera_manager
            .camera
            .resize_projection(width, height);
        self.scene
            .init_gpu_resources(renderer.device(), renderer.queue());

        let ui_manager = UiManager::new(
            renderer.device(),
            renderer.queue(),
            renderer.surface_format(),
            &window_handle,
        );

        self.ui_manager = Some(ui_manager);
        self.render_engine = Some(renderer);
        self.last_frame = Instant::now();
    }

    fn window_event(
        &mut self,
        event_loop: &winit::event_loop::ActiveEventLoop,
        window_id: winit::window::WindowId,
        event: winit::event::WindowEvent,
    ) {
        let Some(window) = self.window.as_ref().cloned() else {
            return;
        };

        if let Some(ui_manager) = self.ui_manager.as_mut() {
            let ui_event: winit::event::Event<()> = winit::event::Event::WindowEvent {
                window_id,
                event: event.clone(),
            };
            if ui_manager.handle_input(&window, &ui_event) {
                window.request_redraw();
                return;
            }
        }

        match event {
            WindowEvent::KeyboardInput {
                event: key_event, ..
            } => {
                if matches!(
                    key_event.physical_key,
                    winit::keyboard::PhysicalKey::Code(winit::keyboard::KeyCode::Escape)
                ) {
                    event_loop.exit();
                    return;
                }
                self.scene.camera_manager.process_keyboard_event(&key_event);
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor = (position.x as f32, position.y as f32);
            }
            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                button: MouseButton::Left,
                ..
            } => {
                self.handle_click();
            }
            WindowEvent::Resized(PhysicalSize { width, height }) => {
                self.scene
                    .camera_manager
                    .camera
                    .resize_projection(width, height);
                if let Some(render_engine) = self.render_engine.as_mut() {
                    render_engine.resize(width, height);
                }
            }
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::RedrawRequested => {
                self.frame();
            }
            _ => (),
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: winit::event::DeviceId,
        event: winit::event::DeviceEvent,
    ) {
        let Some(window) = self.window.as_ref() else {
            return;
        };

        if let Some(ui_manager) = self.ui_manager.as_ref() {
            if ui_manager.wants_mouse() || ui_manager.wants_keyboard() {
                return;
            }
        }

        self.scene.camera_manager.process_event(&event, window);
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(ref window) = self.window {
            window.request_redraw();
        }
    }
}
