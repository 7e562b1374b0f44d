use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use winit::{
    event::*,
    event_loop::EventLoop,
    keyboard::{KeyCode, PhysicalKey},
    window::Window,
};

use glam::Vec3;

// Import from the library crate
use galleria::{logging, ui};

use galleria::controller::{
    CameraController, FrameLoopContext, GameState, InputEvent, InputState, LightingUniform,
    MovementSystem,
};
use galleria::model::{gallery, Camera, Gallery};
use galleria::view::{render, texture, DrawItem, GpuContext, RenderState};

struct App {
    gpu: GpuContext,
    window: Arc<Window>,

    depth_view: wgpu::TextureView,
    camera_bind_group: wgpu::BindGroup,
    draw_items: Vec<DrawItem>,
    render_state: RenderState,

    // egui
    egui_state: egui_winit::State,

    // Game state and per-frame update
    frame_ctx: FrameLoopContext,
    start_time: std::time::Instant,
}

impl App {
    async fn new(window: Arc<Window>) -> Self {
        let size = window.inner_size();
        let width = size.width.max(1);
        let height = size.height.max(1);

        let gpu = GpuContext::new_native(window.clone(), width, height).await;

        // Camera starts a few steps into the room, facing the front wall
        let cam = Rc::new(RefCell::new(Camera::new(width, height)));
        {
            let mut cam_mut = cam.borrow_mut();
            cam_mut.eye = gallery::SPAWN_POSITION;
            cam_mut.set_look_at(Vec3::new(0.0, 0.0, 0.0));
        }

        let camera_resources = render::create_camera_resources(gpu.device.as_ref());
        gpu.queue.as_ref().write_buffer(
            &camera_resources.lighting_buffer,
            0,
            bytemuck::bytes_of(&LightingUniform::gallery_default()),
        );

        let depth_format = wgpu::TextureFormat::Depth32Float;
        let (_depth_tex, depth_view) =
            render::create_depth_texture(gpu.device.as_ref(), width, height);

        let material_layout = texture::material_bind_group_layout(gpu.device.as_ref());
        let pipeline = render::create_gallery_pipeline(
            gpu.device.as_ref(),
            gpu.format,
            &camera_resources.bind_group_layout,
            &material_layout,
            depth_format,
        );

        let Gallery {
            surfaces,
            obstacles,
        } = Gallery::build();
        let mut draw_items = Vec::new();
        for surface in &surfaces {
            let img = texture::resolve_image(surface.finish);
            let material = texture::create_material(
                gpu.device.as_ref(),
                gpu.queue.as_ref(),
                &material_layout,
                &img,
                surface.name,
            );
            draw_items.push(DrawItem {
                mesh: surface.mesh.upload(gpu.device.as_ref()),
                material,
            });
        }
        tracing::info!(
            "galleria ready: {} surfaces, {} obstacle volumes",
            draw_items.len(),
            obstacles.len()
        );

        // Initialize egui
        let egui_ctx = egui::Context::default();
        let egui_state = egui_winit::State::new(
            egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            None,
            None,
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(
            gpu.device.as_ref(),
            gpu.format,
            egui_wgpu::RendererOptions::default(),
        );

        let render_state = RenderState {
            format: gpu.format,
            alpha_mode: gpu.config.alpha_mode,
            width,
            height,
            pipeline,
            egui_renderer,
            egui_primitives: None,
            egui_full_output: None,
            egui_dpr: 1.0,
        };

        let frame_ctx = FrameLoopContext {
            camera: cam,
            camera_buffer: camera_resources.camera_buffer,
            input_state: Rc::new(RefCell::new(InputState::new())),
            game_state: Rc::new(RefCell::new(GameState::new())),
            camera_controller: CameraController::new(),
            movement: MovementSystem::new(),
            obstacles,
            egui_ctx,
            egui_events: Rc::new(RefCell::new(Vec::new())),
            last_time: Rc::new(RefCell::new(0.0)),
        };

        Self {
            gpu,
            window,
            depth_view,
            camera_bind_group: camera_resources.camera_bind_group,
            draw_items,
            render_state,
            egui_state,
            frame_ctx,
            start_time: std::time::Instant::now(),
        }
    }

    fn pointer_locked(&self) -> bool {
        self.frame_ctx.input_state.borrow().pointer_locked
    }

    fn grab_cursor(&mut self) {
        let _ = self
            .window
            .set_cursor_grab(winit::window::CursorGrabMode::Locked)
            .or_else(|_| {
                self.window
                    .set_cursor_grab(winit::window::CursorGrabMode::Confined)
            });
        self.window.set_cursor_visible(false);
        self.frame_ctx
            .input_state
            .borrow_mut()
            .process_event(&InputEvent::PointerLockChanged { locked: true });
    }

    fn release_cursor(&mut self) {
        let _ = self
            .window
            .set_cursor_grab(winit::window::CursorGrabMode::None);
        self.window.set_cursor_visible(true);
        self.frame_ctx
            .input_state
            .borrow_mut()
            .process_event(&InputEvent::PointerLockChanged { locked: false });
    }

    fn input(&mut self, event: &WindowEvent) -> bool {
        let locked = self.pointer_locked();

        // The menu covers the screen while the cursor is free, so entering
        // the gallery must win over egui's pointer capture.
        if let WindowEvent::MouseInput {
            state: ElementState::Pressed,
            button: MouseButton::Left,
            ..
        } = event
        {
            if !locked {
                self.grab_cursor();
                return true;
            }
        }

        let egui_captured = self
            .egui_state
            .on_window_event(self.window.as_ref(), event)
            .consumed;
        if egui_captured && !locked {
            return true;
        }

        match event {
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state,
                        physical_key,
                        ..
                    },
                ..
            } => {
                if let PhysicalKey::Code(code) = physical_key {
                    if *code == KeyCode::Escape && *state == ElementState::Pressed {
                        self.release_cursor();
                    }
                    if let Some(key) = key_name(*code) {
                        let event = match state {
                            ElementState::Pressed => InputEvent::KeyDown(key.to_string()),
                            ElementState::Released => InputEvent::KeyUp(key.to_string()),
                        };
                        self.frame_ctx
                            .input_state
                            .borrow_mut()
                            .process_event(&event);
                    }
                }
                true
            }
            WindowEvent::Focused(false) => {
                self.frame_ctx
                    .input_state
                    .borrow_mut()
                    .process_event(&InputEvent::FocusLost);
                true
            }
            _ => false,
        }
    }

    fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.gpu.config.width = new_size.width;
            self.gpu.config.height = new_size.height;
            self.gpu
                .surface
                .configure(self.gpu.device.as_ref(), &self.gpu.config);

            let (_tex, view) = render::create_depth_texture(
                self.gpu.device.as_ref(),
                new_size.width,
                new_size.height,
            );
            self.depth_view = view;

            self.frame_ctx
                .camera
                .borrow_mut()
                .set_aspect(new_size.width, new_size.height);
            self.render_state.width = new_size.width;
            self.render_state.height = new_size.height;
        }
    }

    fn redraw(&mut self) {
        let now_ms = self.start_time.elapsed().as_secs_f64() * 1000.0;
        let dt = self.frame_ctx.update_sim(now_ms);
        self.frame_ctx.write_camera_uniform(self.gpu.queue.as_ref());

        // Build the overlay through egui-winit's input plumbing
        let dpr = self.window.scale_factor() as f32;
        let raw_input = self.egui_state.take_egui_input(self.window.as_ref());
        let egui_ctx = self.frame_ctx.egui_ctx.clone();
        egui_ctx.set_pixels_per_point(dpr);

        let locked = self.pointer_locked();
        let mut full_output = egui_ctx.run(raw_input, |ctx| {
            ui::draw_ui(
                ctx,
                &self.frame_ctx.camera.borrow(),
                &self.frame_ctx.game_state.borrow(),
                locked,
                dt,
            );
        });

        let platform_output = std::mem::take(&mut full_output.platform_output);
        self.egui_state
            .handle_platform_output(self.window.as_ref(), platform_output);

        let primitives = egui_ctx.tessellate(std::mem::take(&mut full_output.shapes), dpr);
        self.render_state.egui_primitives = Some(primitives);
        self.render_state.egui_full_output = Some(full_output);
        self.render_state.egui_dpr = dpr;

        self.render_state.draw_frame(
            self.gpu.device.as_ref(),
            self.gpu.queue.as_ref(),
            &self.gpu.surface,
            &self.draw_items,
            &self.depth_view,
            &self.camera_bind_group,
        );
    }
}

fn key_name(code: KeyCode) -> Option<&'static str> {
    match code {
        KeyCode::KeyW => Some("w"),
        KeyCode::KeyA => Some("a"),
        KeyCode::KeyS => Some("s"),
        KeyCode::KeyD => Some("d"),
        KeyCode::ArrowUp => Some("ArrowUp"),
        KeyCode::ArrowDown => Some("ArrowDown"),
        KeyCode::ArrowLeft => Some("ArrowLeft"),
        KeyCode::ArrowRight => Some("ArrowRight"),
        _ => None,
    }
}

fn main() {
    logging::init();

    let event_loop = EventLoop::new().unwrap();
    let window_attributes = Window::default_attributes()
        .with_title("Galleria")
        .with_inner_size(winit::dpi::LogicalSize::new(1280, 720));
    let window = event_loop.create_window(window_attributes).unwrap();
    let window = Arc::new(window);

    let mut app = pollster::block_on(App::new(window.clone()));

    event_loop
        .run(move |event, elwt| match event {
            Event::WindowEvent {
                ref event,
                window_id,
            } if window_id == app.window.id() => {
                if !app.input(event) {
                    match event {
                        WindowEvent::CloseRequested => elwt.exit(),
                        WindowEvent::Resized(physical_size) => {
                            app.resize(*physical_size);
                        }
                        WindowEvent::RedrawRequested => {
                            app.redraw();
                        }
                        _ => {}
                    }
                }
            }
            Event::DeviceEvent {
                event: winit::event::DeviceEvent::MouseMotion { delta },
                ..
            } => {
                app.frame_ctx
                    .input_state
                    .borrow_mut()
                    .process_event(&InputEvent::MouseMove {
                        dx: delta.0 as f32,
                        dy: delta.1 as f32,
                    });
            }
            Event::AboutToWait => {
                app.window.request_redraw();
            }
            _ => {}
        })
        .unwrap();
}
