// Re-export all public modules so they can be used from main.rs
pub mod logging;
pub mod ui;
pub mod utils;

// MVC Architecture
pub mod controller;
pub mod model;
pub mod view;

#[cfg(target_arch = "wasm32")]
use std::cell::RefCell;
#[cfg(target_arch = "wasm32")]
use std::rc::Rc;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::closure::Closure;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::{prelude::wasm_bindgen, JsCast, JsValue};
#[cfg(target_arch = "wasm32")]
use web_sys::{Document, Event, HtmlCanvasElement, HtmlElement, KeyboardEvent, MouseEvent, Window};

#[cfg(target_arch = "wasm32")]
use glam::Vec3;

#[cfg(target_arch = "wasm32")]
use controller::{
    CameraController, FrameLoopContext, GameState, InputState, LightingUniform, MovementSystem,
};
#[cfg(target_arch = "wasm32")]
use model::{Camera, Gallery};
#[cfg(target_arch = "wasm32")]
use view::{render, texture, DrawItem, GpuContext, RenderState};

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn start() -> Result<(), JsValue> {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    logging::init();
    let (window, document, canvas) = init_canvas()?;
    setup_app(&window, &document, &canvas).await
}

/// Main application setup for WASM
#[cfg(target_arch = "wasm32")]
async fn setup_app(
    window: &Window,
    document: &Document,
    canvas: &HtmlCanvasElement,
) -> Result<(), JsValue> {
    let width = canvas.width();
    let height = canvas.height();

    // Initialize GPU
    let gpu = GpuContext::new(canvas, width, height)
        .await
        .map_err(|e| js_error(format!("GPU init failed: {e:?}")))?;

    // Camera starts a few steps into the room, facing the front wall
    let cam = Rc::new(RefCell::new(Camera::new(width, height)));
    {
        let mut cam_mut = cam.borrow_mut();
        cam_mut.eye = model::gallery::SPAWN_POSITION;
        cam_mut.set_look_at(Vec3::new(0.0, 0.0, 0.0));
    }

    // Camera + lighting buffers & bind group
    let camera_resources = render::create_camera_resources(gpu.device.as_ref());
    gpu.queue.as_ref().write_buffer(
        &camera_resources.lighting_buffer,
        0,
        bytemuck::bytes_of(&LightingUniform::gallery_default()),
    );

    // Depth texture
    let depth_format = wgpu::TextureFormat::Depth32Float;
    let (_depth_tex, depth_view) = render::create_depth_texture(gpu.device.as_ref(), width, height);
    let depth_view_cell: Rc<RefCell<wgpu::TextureView>> = Rc::new(RefCell::new(depth_view));

    // Gallery pipeline
    let material_layout = texture::material_bind_group_layout(gpu.device.as_ref());
    let pipeline = render::create_gallery_pipeline(
        gpu.device.as_ref(),
        gpu.format,
        &camera_resources.bind_group_layout,
        &material_layout,
        depth_format,
    );

    // Build the room and upload each surface with its material
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

    // Shared state
    let input_state = Rc::new(RefCell::new(InputState::new()));
    let game_state = Rc::new(RefCell::new(GameState::new()));
    let egui_events: Rc<RefCell<Vec<egui::Event>>> = Rc::new(RefCell::new(Vec::new()));

    // egui setup
    let egui_ctx = egui::Context::default();
    let egui_renderer = egui_wgpu::Renderer::new(
        gpu.device.as_ref(),
        gpu.format,
        egui_wgpu::RendererOptions::default(),
    );

    setup_input_listeners(document, window, canvas, input_state.clone(), egui_events.clone())?;

    let mut render_state = RenderState {
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

    let mut frame_ctx = FrameLoopContext {
        camera: cam.clone(),
        camera_buffer: camera_resources.camera_buffer,
        input_state,
        game_state,
        camera_controller: CameraController::new(),
        movement: MovementSystem::new(),
        obstacles,
        egui_ctx,
        egui_events,
        last_time: Rc::new(RefCell::new(
            window.performance().map(|p| p.now()).unwrap_or(0.0),
        )),
    };

    let camera_bind_group = camera_resources.camera_bind_group;

    // Continuous redraw using requestAnimationFrame
    let raf = RafLoop::new(window.clone(), {
        let window_for_loop = window.clone();
        let canvas_for_loop = canvas.clone();
        let depth_view_cell = depth_view_cell.clone();

        move || {
            // Track the browser window size
            handle_resize(
                &window_for_loop,
                &canvas_for_loop,
                &gpu,
                &depth_view_cell,
                &mut render_state,
                &frame_ctx,
            );

            let now = window_for_loop
                .performance()
                .map(|p| p.now())
                .unwrap_or(0.0);
            let dpr = window_for_loop.device_pixel_ratio() as f32;
            frame_ctx.update(now, dpr, gpu.queue.as_ref(), &mut render_state);

            let dv = depth_view_cell.borrow();
            render_state.draw_frame(
                gpu.device.as_ref(),
                gpu.queue.as_ref(),
                &gpu.surface,
                &draw_items,
                &dv,
                &camera_bind_group,
            );
        }
    });
    raf.start();

    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn handle_resize(
    window: &Window,
    canvas: &HtmlCanvasElement,
    gpu: &GpuContext,
    depth_view_cell: &Rc<RefCell<wgpu::TextureView>>,
    render_state: &mut RenderState,
    frame_ctx: &FrameLoopContext,
) {
    if let (Ok(w), Ok(h)) = (window.inner_width(), window.inner_height()) {
        let nw = w.as_f64().unwrap_or(800.0) as u32;
        let nh = h.as_f64().unwrap_or(600.0) as u32;
        if nw > 0 && nh > 0 && (nw != render_state.width || nh != render_state.height) {
            canvas.set_width(nw);
            canvas.set_height(nh);
            frame_ctx.camera.borrow_mut().set_aspect(nw, nh);
            render_state.width = nw;
            render_state.height = nh;

            let config = wgpu::SurfaceConfiguration {
                usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
                format: render_state.format,
                width: nw,
                height: nh,
                present_mode: wgpu::PresentMode::Fifo,
                alpha_mode: render_state.alpha_mode,
                view_formats: vec![],
                desired_maximum_frame_latency: 2,
            };
            gpu.surface.configure(gpu.device.as_ref(), &config);

            let (_tex, view) = render::create_depth_texture(gpu.device.as_ref(), nw, nh);
            *depth_view_cell.borrow_mut() = view;
        }
    }
}

/// Wire the DOM listeners that mutate the input state between frames.
#[cfg(target_arch = "wasm32")]
fn setup_input_listeners(
    document: &Document,
    window: &Window,
    canvas: &HtmlCanvasElement,
    input_state: Rc<RefCell<InputState>>,
    egui_events: Rc<RefCell<Vec<egui::Event>>>,
) -> Result<(), JsValue> {
    use controller::input::wasm as input_wasm;
    use controller::InputEvent;

    // Keyboard down
    {
        let input_state = input_state.clone();
        let document_for_exit = document.clone();
        let keydown = Closure::wrap(Box::new(move |e: KeyboardEvent| {
            let key = e.key();

            if key == "Escape" {
                document_for_exit.exit_pointer_lock();
            }

            // Prevent default for navigation keys
            if matches!(
                key.as_str(),
                "ArrowUp" | "ArrowDown" | "ArrowLeft" | "ArrowRight" | "w" | "a" | "s" | "d"
                    | "W" | "A" | "S" | "D" | " "
            ) {
                e.prevent_default();
            }

            input_state
                .borrow_mut()
                .process_event(&input_wasm::keyboard_event_to_input(&e, true));
        }) as Box<dyn FnMut(KeyboardEvent)>);
        document.add_event_listener_with_callback("keydown", keydown.as_ref().unchecked_ref())?;
        keydown.forget();
    }

    // Keyboard up
    {
        let input_state = input_state.clone();
        let keyup = Closure::wrap(Box::new(move |e: KeyboardEvent| {
            input_state
                .borrow_mut()
                .process_event(&input_wasm::keyboard_event_to_input(&e, false));
        }) as Box<dyn FnMut(KeyboardEvent)>);
        document.add_event_listener_with_callback("keyup", keyup.as_ref().unchecked_ref())?;
        keyup.forget();
    }

    // Focus loss - clear all keys
    {
        let input_state = input_state.clone();
        let blur = Closure::wrap(Box::new(move |_e: Event| {
            input_state.borrow_mut().process_event(&InputEvent::FocusLost);
        }) as Box<dyn FnMut(Event)>);
        window.add_event_listener_with_callback("blur", blur.as_ref().unchecked_ref())?;
        blur.forget();
    }

    // Visibility change - clear all keys
    {
        let input_state = input_state.clone();
        let visibility = Closure::wrap(Box::new(move |_e: Event| {
            input_state
                .borrow_mut()
                .process_event(&InputEvent::VisibilityChanged { visible: false });
        }) as Box<dyn FnMut(Event)>);
        document
            .add_event_listener_with_callback("visibilitychange", visibility.as_ref().unchecked_ref())?;
        visibility.forget();
    }

    // Pointer lock change
    {
        let input_state = input_state.clone();
        let doc_pl = document.clone();
        let plc = Closure::wrap(Box::new(move |_e: Event| {
            let locked = doc_pl.pointer_lock_element().is_some();
            input_state
                .borrow_mut()
                .process_event(&InputEvent::PointerLockChanged { locked });
        }) as Box<dyn FnMut(Event)>);
        document
            .add_event_listener_with_callback("pointerlockchange", plc.as_ref().unchecked_ref())?;
        plc.forget();
    }

    // Canvas click to enter pointer lock (the menu's "click to enter")
    {
        let canvas_click = canvas.clone();
        let click = Closure::wrap(Box::new(move |_e: MouseEvent| {
            if let Ok(html_el) = canvas_click.clone().dyn_into::<HtmlElement>() {
                html_el.request_pointer_lock();
            }
        }) as Box<dyn FnMut(MouseEvent)>);
        canvas.add_event_listener_with_callback("click", click.as_ref().unchecked_ref())?;
        click.forget();
    }

    // Mouse move: look while locked, egui hover otherwise
    {
        let input_state = input_state.clone();
        let egui_events_q = egui_events.clone();
        let mm = Closure::wrap(Box::new(move |e: MouseEvent| {
            let locked = input_state.borrow().pointer_locked;
            if locked {
                input_state
                    .borrow_mut()
                    .process_event(&input_wasm::mouse_move_to_input(&e));
            } else {
                let px = e.client_x() as f32;
                let py = e.client_y() as f32;
                egui_events_q
                    .borrow_mut()
                    .push(egui::Event::PointerMoved(egui::pos2(px, py)));
            }
        }) as Box<dyn FnMut(MouseEvent)>);
        document.add_event_listener_with_callback("mousemove", mm.as_ref().unchecked_ref())?;
        mm.forget();
    }

    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn init_canvas() -> Result<(Window, Document, HtmlCanvasElement), JsValue> {
    let window = web_sys::window().ok_or(js_error("no global `window`"))?;
    let document = window.document().ok_or(js_error("no document on window"))?;
    let body = document.body().ok_or(js_error("no body on document"))?;
    let canvas_el = document
        .create_element("canvas")?
        .dyn_into::<HtmlCanvasElement>()
        .map_err(|_| js_error("failed to create canvas"))?;

    let width = window
        .inner_width()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(800.0) as u32;
    let height = window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(600.0) as u32;
    canvas_el.set_width(width.max(1));
    canvas_el.set_height(height.max(1));
    body.append_child(&canvas_el)?;
    Ok((window, document, canvas_el))
}

#[cfg(target_arch = "wasm32")]
fn js_error<E: Into<String>>(msg: E) -> JsValue {
    JsValue::from_str(&msg.into())
}

#[cfg(target_arch = "wasm32")]
struct RafLoop {
    inner: Rc<RefCell<Box<dyn FnMut()>>>,
    window: Window,
}

#[cfg(target_arch = "wasm32")]
impl RafLoop {
    fn new(window: Window, f: impl FnMut() + 'static) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Box::new(f))),
            window,
        }
    }

    fn start(self) {
        let inner = self.inner.clone();
        let window = self.window.clone();

        let callback = Rc::new(RefCell::new(None::<Closure<dyn FnMut()>>));
        let callback_clone = callback.clone();

        *callback.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            inner.borrow_mut().as_mut()();

            // Recursively schedule next frame
            let cb_ref = callback_clone.borrow();
            window
                .request_animation_frame(cb_ref.as_ref().unwrap().as_ref().unchecked_ref())
                .expect("RAF failed");
        }) as Box<dyn FnMut()>));

        self.window
            .request_animation_frame(callback.borrow().as_ref().unwrap().as_ref().unchecked_ref())
            .expect("RAF start failed");

        // Leak the closure to keep it alive
        std::mem::forget(callback);
    }
}
