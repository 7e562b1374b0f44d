// CONTROLLER: Input, movement, and update loop
pub mod camera_controller;
pub mod frame_loop;
pub mod input;
pub mod movement;

pub use camera_controller::{CameraController, GameState};
pub use frame_loop::{CameraUniform, FrameLoopContext, LightingUniform};
pub use input::{InputEvent, InputState, MoveIntent};
pub use movement::{MovementConfig, MovementSystem};
