use std::cell::RefCell;
use std::rc::Rc;

use crate::controller::camera_controller::{CameraController, GameState};
use crate::controller::input::{InputState, MoveIntent};
use crate::controller::movement::MovementSystem;
use crate::model::gallery::ObstacleSet;
use crate::model::Camera;
use crate::ui;
use crate::view::render::RenderState;

#[repr(C)]
#[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
}

#[repr(C)]
#[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LightingUniform {
    pub sun_dir: [f32; 3],
    pub sun_intensity: f32,
    pub ambient: f32,
    pub _pad1: f32,
    pub _pad2: f32,
    pub _pad3: f32,
}

impl LightingUniform {
    /// Overhead sun with a slight tilt so the walls pick up some shading,
    /// plus a strong ambient term, close to the original room's lighting.
    pub fn gallery_default() -> Self {
        Self {
            sun_dir: [0.25, -1.0, 0.2],
            sun_intensity: 0.55,
            ambient: 0.5,
            _pad1: 0.0,
            _pad2: 0.0,
            _pad3: 0.0,
        }
    }
}

/// Main game loop state and update logic, shared by the native and wasm
/// entry points. One call to [`FrameLoopContext::update`] is one frame:
/// sample the input snapshot, resolve movement, refresh uniforms, build UI.
pub struct FrameLoopContext {
    pub camera: Rc<RefCell<Camera>>,
    pub camera_buffer: wgpu::Buffer,
    pub input_state: Rc<RefCell<InputState>>,
    pub game_state: Rc<RefCell<GameState>>,
    pub camera_controller: CameraController,
    pub movement: MovementSystem,
    pub obstacles: ObstacleSet,
    pub egui_ctx: egui::Context,
    pub egui_events: Rc<RefCell<Vec<egui::Event>>>,
    pub last_time: Rc<RefCell<f64>>,
}

impl FrameLoopContext {
    /// Advance the simulation one frame. Returns the clamped time step.
    pub fn update_sim(&mut self, now_ms: f64) -> f32 {
        // Time step, clamped so a stalled tab cannot teleport the player
        let mut last = self.last_time.borrow_mut();
        let dt = ((now_ms - *last) / 1000.0).clamp(0.0, 0.1) as f32;
        *last = now_ms;
        drop(last);

        let (dx, dy) = self.input_state.borrow_mut().consume_look();
        let locked = self.input_state.borrow().pointer_locked;
        if locked {
            self.game_state.borrow_mut().started = true;
        }

        let mut cam = self.camera.borrow_mut();
        if locked {
            self.camera_controller.apply_look(&mut cam, dx, dy);
        }

        // Key state is read exactly once per frame; events that arrive while
        // the frame is in flight are seen by the next one.
        let intent = MoveIntent::capture(&self.input_state.borrow());
        let committed = self.movement.advance(&cam, &intent, dt, &self.obstacles);
        cam.eye = committed;

        dt
    }

    pub fn write_camera_uniform(&self, queue: &wgpu::Queue) {
        let uniform = CameraUniform {
            view_proj: self.camera.borrow().view_proj().to_cols_array_2d(),
        };
        queue.write_buffer(&self.camera_buffer, 0, bytemuck::bytes_of(&uniform));
    }

    /// Full frame update for the wasm path: simulation, camera uniform, and
    /// the egui overlay built from the queued DOM-derived events.
    pub fn update(
        &mut self,
        now_ms: f64,
        dpr: f32,
        queue: &wgpu::Queue,
        render_state: &mut RenderState,
    ) {
        let dt = self.update_sim(now_ms);
        self.write_camera_uniform(queue);

        let mut raw_input = egui::RawInput::default();
        raw_input.time = Some(now_ms / 1000.0);
        raw_input.screen_rect = Some(egui::Rect::from_min_size(
            egui::Pos2::new(0.0, 0.0),
            egui::vec2(
                render_state.width as f32 / dpr,
                render_state.height as f32 / dpr,
            ),
        ));
        raw_input.events.extend(self.egui_events.borrow_mut().drain(..));

        self.egui_ctx.set_pixels_per_point(dpr);

        let locked = self.input_state.borrow().pointer_locked;
        let mut full_output = self.egui_ctx.run(raw_input, |ctx| {
            ui::draw_ui(
                ctx,
                &self.camera.borrow(),
                &self.game_state.borrow(),
                locked,
                dt,
            );
        });

        let primitives = self
            .egui_ctx
            .tessellate(std::mem::take(&mut full_output.shapes), dpr);
        render_state.egui_primitives = Some(primitives);
        render_state.egui_full_output = Some(full_output);
        render_state.egui_dpr = dpr;
    }
}
