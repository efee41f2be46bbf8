// src/app.rs
//! Application glue for the showroom viewer.
//!
//! Owns the winit event loop and wires the renderer, interaction engine,
//! async model loader, backend service, and UI panels together. All worker
//! results (loads, backend calls) are drained here between frames, so scene
//! and registry mutation only ever happens on the event-loop thread.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use cgmath::{Deg, Rad, Vector3};
use rand::Rng;
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowAttributes},
};

use crate::backend::{BackendClient, BackendEvent, BackendService, GeneratedAsset};
use crate::gfx::{
    camera::{
        camera_controller::CameraController, camera_utils::CameraManager,
        orbit_camera::OrbitCamera,
    },
    geometry::generate_plane,
    rendering::render_engine::RenderEngine,
    scene::{Mesh, Object, Scene},
};
use crate::interaction::{
    Catalog, FocusChange, InteractionEngine, PlacedObject, TargetId, INTERACTION_DISTANCE,
};
use crate::loader::{AssetSource, LoadRequest, LoadedModel, ModelLoader};
use crate::ui::{
    chat_panel, description_overlay, generate_panel, ChatState, GenerateAction, GenerateState,
    OverlayState, UiManager, MISSING_DESCRIPTION,
};

/// Tag of the permanent floor fixture; survives scene clears.
const FLOOR_TAG: &str = "floor";

pub struct ShowroomApp {
    event_loop: Option<EventLoop<()>>,
    app_state: AppState,
}

struct AppState {
    window: Option<Arc<Window>>,
    render_engine: Option<RenderEngine>,
    ui_manager: Option<UiManager>,
    scene: Scene,
    engine: InteractionEngine,
    catalog: Catalog,
    loader: ModelLoader,
    backend: Option<BackendService>,
    overlay: OverlayState,
    chat: ChatState,
    generate: GenerateState,
    /// Interaction target -> scene object index, for focus side effects.
    focus_bindings: HashMap<TargetId, usize>,
    last_frame: Instant,
}

impl ShowroomApp {
    /// Creates the viewer; `backend` is optional so the viewer still runs
    /// as a plain model browser when no service is configured.
    pub async fn new(backend: Option<BackendClient>) -> Self {
        let event_loop = EventLoop::new().expect("Failed to create event loop");

        let mut camera = OrbitCamera::new(8.0, 0.35, 0.4, Vector3::new(0.0, 0.8, 0.0), 1.0);
        camera.bounds.min_distance = Some(1.1);
        let controller = CameraController::new(0.005, 0.4);
        let camera_manager = CameraManager::new(camera, controller);

        let catalog = Catalog::showroom();
        let engine = InteractionEngine::new(INTERACTION_DISTANCE, catalog.interactive_tags());

        let mut scene = Scene::new(camera_manager);
        scene.add_material_rgb("floor_material", 0.45, 0.45, 0.48, 0.0, 0.9);
        let mut floor = Object::new(
            FLOOR_TAG,
            FLOOR_TAG,
            vec![generate_plane(24.0, 24.0).into_mesh()],
        );
        floor.set_material("floor_material");
        scene.add_object(floor);

        Self {
            event_loop: Some(event_loop),
            app_state: AppState {
                window: None,
                render_engine: None,
                ui_manager: None,
                scene,
                engine,
                catalog,
                loader: ModelLoader::new(),
                backend: backend.map(BackendService::new),
                overlay: OverlayState::default(),
                chat: ChatState::default(),
                generate: GenerateState::default(),
                focus_bindings: HashMap::new(),
                last_frame: Instant::now(),
            },
        }
    }

    /// Runs the application (consumes self and starts the event loop).
    pub fn run(mut self) {
        let event_loop = self.event_loop.take().expect("Event loop already consumed");
        event_loop.set_control_flow(ControlFlow::Poll);

        event_loop
            .run_app(&mut self.app_state)
            .expect("Failed to run event loop");
    }
}

impl AppState {
    /// Installs a completed load as a scene object and registers it for
    /// proximity focus. Stale completions (scene cleared since the request)
    /// are dropped whole.
    fn install_model(&mut self, model: LoadedModel) {
        if model.epoch != self.engine.epoch() {
            log::debug!("dropping stale load for '{}'", model.tag);
            return;
        }

        let name = self.scene.ensure_unique_name(&model.tag);
        let material_id = model.material.as_ref().map(|loaded| {
            let id = format!("{}.{}", name, loaded.name);
            self.scene
                .add_material(&id, loaded.base_color, 0.0, loaded.roughness);
            id
        });

        let meshes: Vec<Mesh> = model
            .meshes
            .into_iter()
            .map(|data| Mesh::new(data.positions, data.normals, data.indices))
            .collect();

        let anchor = model.position + Vector3::unit_y() * model.lift;
        let mut object = Object::new(name, model.tag.clone(), meshes);
        object.set_transform_trs(anchor, model.rotation_y, model.scale);
        if let Some(id) = &material_id {
            object.set_material(id);
        }

        let index = self.scene.add_object(object);
        if let Some(render_engine) = &self.render_engine {
            self.scene
                .init_gpu_resources(render_engine.device(), render_engine.queue());
        }

        let description = self
            .catalog
            .description(&model.tag)
            .map(|text| text.to_string());
        if let Some(target) = self.engine.register_at(
            model.epoch,
            PlacedObject {
                tag: model.tag.clone(),
                position: anchor,
                description,
            },
        ) {
            self.focus_bindings.insert(target, index);
        }
        log::info!("placed '{}' in the room", model.tag);
    }

    /// Applies an edge-triggered focus change: appearance swap and overlay.
    fn apply_focus_change(&mut self, change: FocusChange) {
        if let Some(left) = change.left {
            if let Some(&index) = self.focus_bindings.get(&left) {
                if let Some(object) = self.scene.get_object_mut(index) {
                    object.highlighted = false;
                }
            }
            self.overlay.hide();
        }

        if let Some(entered) = change.entered {
            if let Some(&index) = self.focus_bindings.get(&entered) {
                if let Some(object) = self.scene.get_object_mut(index) {
                    object.highlighted = true;
                }
            }
            if let Some(placed) = self.engine.get(entered) {
                let body = placed
                    .description
                    .clone()
                    .unwrap_or_else(|| MISSING_DESCRIPTION.to_string());
                self.overlay.show(placed.tag.clone(), body);
            }
        }
    }

    /// Tears down all placed models, keeping the floor.
    fn clear_room(&mut self) {
        self.engine.clear();
        self.focus_bindings.clear();
        self.overlay.hide();
        self.scene.retain_tags(&[FLOOR_TAG]);
        self.generate.status = "Room cleared.".to_string();
        log::info!("room cleared");
    }

    /// Picks a catalog-known tag for a generated asset, falling back to its
    /// name and then a generic tag.
    fn infer_tag(&self, asset: &GeneratedAsset) -> String {
        for candidate in asset.categories.iter().chain(asset.tags.iter()) {
            let candidate = candidate.to_lowercase();
            if self.catalog.description(&candidate).is_some() {
                return candidate;
            }
        }
        if let Some(word) = asset.name.split_whitespace().next() {
            return word.to_lowercase();
        }
        "object".to_string()
    }

    fn handle_backend_event(&mut self, event: BackendEvent) {
        match event {
            BackendEvent::LayoutReady(layout) => {
                let Some(backend) = &self.backend else {
                    return;
                };
                self.generate.status = format!("Loading {} objects...", layout.objects.len());
                for placement in layout.objects {
                    let url = backend.client().resolve_url(&placement.file_url);
                    let tag = placement.kind.to_lowercase();
                    self.loader.spawn(LoadRequest {
                        source: AssetSource::Url(url),
                        size_class: self.catalog.size_class(&tag),
                        tag,
                        position: Vector3::new(
                            placement.position[0],
                            0.0,
                            placement.position[2],
                        ),
                        rotation_y: Deg::from(Rad(placement.rotation[1])),
                        epoch: self.engine.epoch(),
                    });
                }
            }
            BackendEvent::LayoutFailed(error) => {
                self.generate.status = format!("Could not load the room layout: {}", error);
            }
            BackendEvent::GenerateReady { asset, .. } => {
                self.generate.busy = false;
                let Some(backend) = &self.backend else {
                    return;
                };
                let tag = self.infer_tag(&asset);
                let label = if asset.name.is_empty() {
                    tag.clone()
                } else {
                    asset.name.clone()
                };
                self.generate.status = format!("Placing '{}'...", label);

                // Scatter new arrivals on a ring so they don't stack
                let mut rng = rand::rng();
                let angle = rng.random_range(0.0..std::f32::consts::TAU);
                let radius = rng.random_range(2.5..4.5);
                let position = Vector3::new(angle.cos() * radius, 0.0, angle.sin() * radius);

                self.loader.spawn(LoadRequest {
                    source: AssetSource::Url(backend.client().resolve_url(&asset.file_url)),
                    size_class: self.catalog.size_class(&tag),
                    tag,
                    position,
                    rotation_y: Deg(rng.random_range(0.0..360.0)),
                    epoch: self.engine.epoch(),
                });
            }
            BackendEvent::GenerateFailed { error, .. } => {
                self.generate.busy = false;
                self.generate.status = format!("Generation failed: {}", error);
            }
            BackendEvent::ChatReady(reply) => {
                self.chat.waiting = false;
                self.chat.push_reply(reply);
            }
            BackendEvent::ChatFailed(error) => {
                self.chat.waiting = false;
                self.chat.push_reply(format!("[error] {}", error));
            }
        }
    }

    /// One frame: drain workers, advance camera and focus, render.
    fn frame(&mut self) {
        let now = Instant::now();
        let dt = (now - self.last_frame).as_secs_f32().min(0.1);
        self.last_frame = now;

        for model in self.loader.poll() {
            self.install_model(model);
        }
        let events: Vec<BackendEvent> = match &self.backend {
            Some(backend) => backend.poll(),
            None => Vec::new(),
        };
        for event in events {
            self.handle_backend_event(event);
        }

        let ui_wants_keyboard = self
            .ui_manager
            .as_ref()
            .map(|ui| ui.wants_keyboard())
            .unwrap_or(false);
        if !ui_wants_keyboard {
            self.scene.camera_manager.update_walk(dt);
        }

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

        let mut chat_message = None;
        let mut generate_action = None;
        {
            let scene = &self.scene;
            let overlay = &self.overlay;
            let chat = &mut self.chat;
            let generate = &mut self.generate;
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
                            chat_message = chat_panel(ui, chat);
                            generate_action = generate_panel(ui, generate);
                        });
                        ui_manager.render_display_only(device, queue, encoder, view);
                    },
                ),
            );
        }

        if let Some(message) = chat_message {
            self.chat.push_user(message.clone());
            match &self.backend {
                Some(backend) => {
                    self.chat.waiting = true;
                    backend.request_chat(message);
                }
                None => self
                    .chat
                    .push_reply("No backend configured; set SHOWROOM_BACKEND."),
            }
        }

        match generate_action {
            Some(GenerateAction::Generate(prompt)) => match &mut self.backend {
                Some(backend) => {
                    self.generate.busy = true;
                    self.generate.status.clear();
                    backend.request_generate(prompt);
                }
                None => {
                    self.generate.status =
                        "No backend configured; set SHOWROOM_BACKEND.".to_string();
                }
            },
            Some(GenerateAction::ClearScene) => self.clear_room(),
            None => {}
        }
    }
}

impl ApplicationHandler for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let Ok(window) = event_loop.create_window(
            WindowAttributes::default()
                .with_title("Showroom")
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

        if let Some(backend) = &self.backend {
            self.generate.status = "Loading room layout...".to_string();
            backend.request_layout();
        } else {
            log::info!("no backend configured; starting with an empty room");
        }
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
