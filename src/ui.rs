use egui::Context;

use crate::controller::GameState;
use crate::model::Camera;

/// Build the overlay for one frame: the menu while the pointer is free,
/// crosshair and debug info while walking.
pub fn draw_ui(ctx: &Context, camera: &Camera, game_state: &GameState, pointer_locked: bool, dt: f32) {
    if pointer_locked {
        draw_crosshair(ctx);
        draw_debug_window(ctx, camera, dt);
    } else {
        draw_menu(ctx, game_state);
    }
}

fn draw_menu(ctx: &Context, game_state: &GameState) {
    egui::CentralPanel::default()
        .frame(egui::Frame::NONE.fill(egui::Color32::from_black_alpha(170)))
        .show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                let height = ui.available_height();
                ui.add_space(height * 0.3);
                ui.label(
                    egui::RichText::new("Galleria")
                        .size(42.0)
                        .color(egui::Color32::WHITE),
                );
                ui.label(
                    egui::RichText::new("a small gallery to walk through")
                        .size(16.0)
                        .color(egui::Color32::LIGHT_GRAY),
                );
                ui.add_space(24.0);
                let prompt = if game_state.started {
                    "Click to resume"
                } else {
                    "Click to enter"
                };
                ui.label(
                    egui::RichText::new(prompt)
                        .size(22.0)
                        .color(egui::Color32::WHITE),
                );
                ui.add_space(16.0);
                ui.label(
                    egui::RichText::new("WASD / arrow keys - walk    mouse - look    Esc - menu")
                        .size(14.0)
                        .color(egui::Color32::GRAY),
                );
            });
        });
}

fn draw_crosshair(ctx: &Context) {
    let painter = ctx.layer_painter(egui::LayerId::new(
        egui::Order::TOP,
        egui::Id::new("crosshair"),
    ));
    let screen_size = ctx.available_rect();
    let center = screen_size.center();
    let size = 8.0;
    painter.line_segment(
        [
            egui::Pos2::new(center.x - size, center.y),
            egui::Pos2::new(center.x + size, center.y),
        ],
        egui::Stroke::new(1.0, egui::Color32::WHITE),
    );
    painter.line_segment(
        [
            egui::Pos2::new(center.x, center.y - size),
            egui::Pos2::new(center.x, center.y + size),
        ],
        egui::Stroke::new(1.0, egui::Color32::WHITE),
    );
}

fn draw_debug_window(ctx: &Context, camera: &Camera, dt: f32) {
    egui::Window::new("Debug")
        .default_pos([8.0, 8.0])
        .show(ctx, |ui| {
            ui.label(
                egui::RichText::new(format!("FPS: {:.0}", if dt > 0.0 { 1.0 / dt } else { 0.0 }))
                    .small(),
            );
            ui.label(
                egui::RichText::new(format!(
                    "Pos: x: {:.1} y: {:.1} z: {:.1}",
                    camera.eye.x, camera.eye.y, camera.eye.z
                ))
                .small(),
            );
            ui.label(
                egui::RichText::new(format!(
                    "Yaw: {:.1} Pitch: {:.1}",
                    camera.yaw.to_degrees(),
                    camera.pitch.to_degrees()
                ))
                .small(),
            );
            ui.separator();
            ui.label(egui::RichText::new("Controls:").small());
            ui.label(egui::RichText::new("WASD / arrows - Move").small());
            ui.label(egui::RichText::new("Mouse - Look").small());
            ui.label(egui::RichText::new("Esc - Back to menu").small());
        });
}
