/*
 * UI Module
 *
 * This module builds the egui control panel for tuning the tank while it
 * runs, plus an optional text overlay with frame and boost readouts.
 * Parameter changes are detected by comparing against a snapshot taken
 * before the panel is drawn.
 */

use nannou::prelude::*;
use nannou_egui::{egui, Egui};

use crate::debug::DebugInfo;
use crate::params::SimulationParams;

#[derive(Debug, Default, Clone, Copy)]
pub struct UiResponse {
    pub params_changed: bool,
    pub boost_requested: bool,
}

// Draw the control panel and report what the user asked for
pub fn update_ui(
    egui: &mut Egui,
    params: &mut SimulationParams,
    paused: &mut bool,
    show_debug: &mut bool,
    debug_info: &DebugInfo,
) -> UiResponse {
    let snapshot = params.clone();
    let mut boost_requested = false;

    let ctx = egui.begin_frame();

    egui::Window::new("Tank Controls")
        .default_pos([10.0, 10.0])
        .show(&ctx, |ui| {
            ui.collapsing("School", |ui| {
                ui.add(egui::Slider::new(&mut params.fish_count, SimulationParams::get_fish_count_range()).text("Fish (never shrinks)"));
                ui.add(egui::Slider::new(&mut params.max_speed, SimulationParams::get_speed_range()).text("Max Speed"));
                ui.add(egui::Slider::new(&mut params.min_speed, SimulationParams::get_speed_range()).text("Min Speed"));
                ui.add(egui::Slider::new(&mut params.max_force, SimulationParams::get_force_range()).text("Max Force"));
                ui.add(egui::Slider::new(&mut params.wander_force, SimulationParams::get_force_range()).text("Wander Force"));
            });

            ui.collapsing("Flocking Behavior", |ui| {
                ui.add(egui::Slider::new(&mut params.alignment_weight, SimulationParams::get_weight_range()).text("Alignment Weight"));
                ui.add(egui::Slider::new(&mut params.cohesion_weight, SimulationParams::get_weight_range()).text("Cohesion Weight"));
                ui.add(egui::Slider::new(&mut params.separation_force_scale, SimulationParams::get_weight_range()).text("Separation Scale"));
                ui.add(egui::Slider::new(&mut params.neighbor_radius, SimulationParams::get_radius_range()).text("Neighbor Radius"));
                ui.add(egui::Slider::new(&mut params.separation_radius, SimulationParams::get_radius_range()).text("Separation Radius"));
            });

            ui.collapsing("Tank", |ui| {
                ui.add(egui::Slider::new(&mut params.edge_padding, SimulationParams::get_radius_range()).text("Edge Padding"));
                ui.add(egui::Slider::new(&mut params.cursor_repulse_radius, SimulationParams::get_radius_range()).text("Cursor Radius"));
                ui.add(egui::Slider::new(&mut params.speed_boost, SimulationParams::get_speed_range()).text("Speed Boost"));
                if ui.button("Boost Now").clicked() {
                    boost_requested = true;
                }
            });

            ui.separator();
            ui.label(format!("FPS: {:.1}", debug_info.fps));
            ui.label(format!("Fish: {}", debug_info.fish_count));
            ui.label(format!("Boost: {:.2} (next in {} ticks)", debug_info.boost, debug_info.boost_countdown));

            ui.checkbox(show_debug, "Show Debug Overlay");
            ui.checkbox(paused, "Pause Simulation");
        });

    UiResponse {
        params_changed: *params != snapshot,
        boost_requested,
    }
}

// Draw debug information on the screen
pub fn draw_debug_info(draw: &Draw, debug_info: &DebugInfo, window_rect: Rect) {
    let margin = 20.0;
    let line_height = 20.0;

    let lines = [
        format!("FPS: {:.1}", debug_info.fps),
        format!("Frame time: {:.2} ms", debug_info.frame_time.as_secs_f64() * 1000.0),
        format!("Fish: {}", debug_info.fish_count),
        format!("Boost: {:.2}", debug_info.boost),
        format!("Next boost: {} ticks", debug_info.boost_countdown),
    ];

    // Bottom-left corner, out of the panel's way
    let text_x = window_rect.left() + margin + 70.0;
    let base_y = window_rect.bottom() + margin + line_height * (lines.len() as f32 - 1.0);

    for (i, text) in lines.iter().enumerate() {
        draw.text(text)
            .x_y(text_x, base_y - i as f32 * line_height)
            .color(WHITE)
            .font_size(14);
    }
}
