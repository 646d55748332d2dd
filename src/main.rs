//! Riemann - Riemann sphere function viewer
//!
//! Plots expressions on the plane and draws the projection of every sample
//! onto the Riemann sphere.

use std::time::{Duration, Instant};
use winit::{
    application::ApplicationHandler,
    event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{ModifiersState, PhysicalKey},
    window::WindowId,
};

use riemann::config::AppConfig;
use riemann::input::{ClickTracker, FunctionSlots, InputAction, InputMapper};
use riemann::systems::{PlottingSystem, RenderError, RenderSystem, WindowSystem};
use riemann_input::OrbitController;
use riemann_render::orbit_camera::OrbitCamera;

/// Longest frame step fed to the controller
const MAX_FRAME_DT: f32 = 1.0 / 30.0;

/// Main application state
struct App {
    /// Application configuration
    config: AppConfig,
    window: Option<WindowSystem>,
    render: Option<RenderSystem>,
    plotting: PlottingSystem,
    slots: FunctionSlots,
    camera: OrbitCamera,
    controller: OrbitController,
    clicks: ClickTracker,
    modifiers: ModifiersState,
    last_frame: Instant,
}

impl App {
    fn new(config: AppConfig) -> Result<Self, Box<dyn std::error::Error>> {
        let plotting = PlottingSystem::new(config.scene_settings(), config.scene.layers())?;
        let slots = FunctionSlots::from_config(&config.functions);

        let camera = OrbitCamera::new(config.camera.eye(), config.camera.target())
            .with_projection(config.camera.fov, config.camera.near, config.camera.far)
            .with_distance_limits(config.camera.min_distance, config.camera.max_distance);

        // Configure controller from config
        let controller = OrbitController::new()
            .with_rotate_speed(config.input.rotate_speed)
            .with_pan_speed(config.input.pan_speed)
            .with_zoom_speed(config.input.zoom_speed)
            .with_key_rotate_speed(config.input.key_rotate_speed)
            .with_damping_half_life(config.input.damping_half_life)
            .with_damping(config.input.damping_enabled);

        let clicks = ClickTracker::new(Duration::from_millis(config.input.double_click_ms));

        Ok(Self {
            config,
            window: None,
            render: None,
            plotting,
            slots,
            camera,
            controller,
            clicks,
            modifiers: ModifiersState::empty(),
            last_frame: Instant::now(),
        })
    }

    /// Plot slot `index`
    fn activate_slot(&mut self, index: usize) {
        let Some(activation) = self.slots.activation(index) else {
            log::debug!("No slot {}", index + 1);
            return;
        };
        self.slots.select(index);
        // Failures are logged by the plotting system and shown in the title
        if self.plotting.activate(&activation).is_ok() {
            log::debug!("Plotted slot {}", index + 1);
        }
    }

    /// Empty every slot and the scene
    fn clear_all(&mut self) {
        self.slots.clear_all();
        self.plotting.clear();
        log::info!("Cleared all functions");
    }

    fn handle_action(&mut self, action: InputAction, event_loop: &ActiveEventLoop) {
        match action {
            InputAction::Exit => event_loop.exit(),
            InputAction::ResetCamera => {
                self.camera.reset();
                log::info!("Camera reset to starting position");
            }
            InputAction::ToggleFullscreen => {
                if let Some(window) = &self.window {
                    window.toggle_fullscreen();
                }
            }
            InputAction::ToggleDamping => {
                let enabled = self.controller.toggle_damping();
                log::info!("Orbit damping: {}", if enabled { "ON" } else { "OFF" });
            }
            InputAction::NextSlot => self.slots.select_next(),
            InputAction::PrevSlot => self.slots.select_prev(),
            InputAction::ActivateSelected => self.activate_slot(self.slots.selected()),
            InputAction::ActivateSlot(index) => self.activate_slot(index),
            InputAction::DeleteChar => {
                self.slots.backspace();
            }
            InputAction::ClearAll => self.clear_all(),
            InputAction::ToggleLayer(layer) => {
                self.plotting.toggle_layer(layer);
            }
        }
    }

    fn update_title(&mut self) {
        let stats = self
            .config
            .debug
            .show_stats
            .then(|| self.plotting.scene().segment_count());
        let status = self.slots.status();
        if let Some(window) = &mut self.window {
            window.update_title(&status, self.plotting.last_error(), stats);
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window = match WindowSystem::create(event_loop, &self.config.window) {
            Ok(window) => window,
            Err(e) => {
                log::error!("{}", e);
                event_loop.exit();
                return;
            }
        };

        let render = match RenderSystem::new(
            window.window().clone(),
            &self.config.rendering,
            self.config.window.vsync,
        ) {
            Ok(render) => render,
            Err(e) => {
                log::error!("Failed to initialise GPU: {}", e);
                event_loop.exit();
                return;
            }
        };

        self.window = Some(window);
        self.render = Some(render);

        // Draw the first slot at startup
        self.activate_slot(0);
        self.update_title();
        self.last_frame = Instant::now();
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }

            WindowEvent::Resized(physical_size) => {
                if let Some(render) = &mut self.render {
                    render.resize(physical_size.width, physical_size.height);
                }
            }

            WindowEvent::ModifiersChanged(modifiers) => {
                self.modifiers = modifiers.state();
            }

            WindowEvent::KeyboardInput { event, .. } => {
                let PhysicalKey::Code(key) = event.physical_key else {
                    return;
                };

                // Orbit keys first (arrows, PageUp/PageDown); they track releases too
                if self.controller.process_keyboard(key, event.state) {
                    return;
                }

                if let Some(action) = InputMapper::map_keyboard(key, event.state, self.modifiers) {
                    self.handle_action(action, event_loop);
                } else if event.state == ElementState::Pressed
                    && !self.modifiers.control_key()
                    && !self.modifiers.alt_key()
                {
                    if let Some(text) = &event.text {
                        self.slots.insert_str(text);
                    }
                }
                self.update_title();
            }

            WindowEvent::MouseInput { state, button, .. } => {
                if button == MouseButton::Left
                    && state == ElementState::Pressed
                    && self.clicks.register(Instant::now())
                {
                    self.clear_all();
                    self.update_title();
                }
                self.controller.process_mouse_button(button, state);
            }

            WindowEvent::CursorMoved { position, .. } => {
                self.controller.process_cursor_moved(position.x, position.y);
            }

            WindowEvent::CursorLeft { .. } => {
                self.controller.process_cursor_left();
            }

            WindowEvent::MouseWheel { delta, .. } => {
                let lines = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / 100.0,
                };
                self.controller.process_scroll(lines);
            }

            WindowEvent::RedrawRequested => {
                let now = Instant::now();
                let dt = (now - self.last_frame).as_secs_f32().min(MAX_FRAME_DT);
                self.last_frame = now;

                let height = self.render.as_ref().map(|r| r.size().1).unwrap_or(1);
                self.controller.update(&mut self.camera, dt, height as f32);

                if let Some(render) = &mut self.render {
                    if let Some(lines) = self.plotting.take_lines() {
                        render.upload_lines(&lines);
                    }

                    match render.render_frame(&self.camera) {
                        Ok(()) => {}
                        Err(RenderError::SurfaceLost) => log::debug!("Surface lost, reconfigured"),
                        Err(RenderError::OutOfMemory) => {
                            log::error!("GPU out of memory");
                            event_loop.exit();
                            return;
                        }
                        Err(e) => log::warn!("{}", e),
                    }
                }

                // Request next frame
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }

            _ => {}
        }
    }
}

fn main() {
    let config = AppConfig::load();

    // RUST_LOG wins over the configured level
    let log_level = config
        .as_ref()
        .map(|c| c.debug.log_level.clone())
        .unwrap_or_else(|_| "info".to_string());
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config = config.unwrap_or_else(|e| {
        log::warn!("Failed to load config: {}. Using defaults.", e);
        AppConfig::default()
    });
    log::info!("Starting Riemann ({} slots)", config.functions.slot_count());

    let mut app = match App::new(config) {
        Ok(app) => app,
        Err(e) => {
            log::error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    let event_loop = match EventLoop::new() {
        Ok(event_loop) => event_loop,
        Err(e) => {
            log::error!("Failed to create event loop: {}", e);
            std::process::exit(1);
        }
    };
    event_loop.set_control_flow(ControlFlow::Poll);

    if let Err(e) = event_loop.run_app(&mut app) {
        log::error!("Event loop error: {}", e);
        std::process::exit(1);
    }
}
