/*
 * Renderer Module
 *
 * This module draws the tank. Each fish faces along its velocity and gets
 * shorter while it accelerates hard, a quick squash-and-stretch that reads
 * as a tail flick.
 */

use nannou::prelude::*;
use tracing::warn;

use crate::app::Model;
use crate::boid::BoidState;
use crate::ui;

const FISH_LENGTH: f32 = 20.0;
const FISH_HEIGHT: f32 = 6.0;
// Acceleration that counts as one unit of squash
const ACCELERATION_SCALE: f32 = 0.05;

pub fn world_to_screen(x: f64, y: f64, window_rect: Rect) -> Point2 {
    pt2(window_rect.left() + x as f32, window_rect.top() - y as f32)
}

// Length of the sprite for a given acceleration
pub fn fish_length(acceleration: f64) -> f32 {
    let acc = acceleration as f32 / ACCELERATION_SCALE;
    if acc > 1.0 {
        FISH_LENGTH / 2.0 + FISH_LENGTH / 2.0 / acc
    } else {
        FISH_LENGTH
    }
}

// Render the model
pub fn view(app: &App, model: &Model, frame: Frame) {
    let draw = app.draw();
    draw.background().color(rgb(4u8, 18, 32));

    let window_rect = app.window_rect();
    for state in model.simulation.states() {
        draw_fish(&draw, state, window_rect);
    }

    if model.show_debug {
        ui::draw_debug_info(&draw, &model.debug_info, window_rect);
    }

    if let Err(err) = draw.to_frame(app, &frame) {
        warn!(?err, "failed to draw the tank");
    }
    if let Err(err) = model.egui.draw_to_frame(&frame) {
        warn!(?err, "failed to draw the control panel");
    }
}

fn draw_fish(draw: &Draw, state: &BoidState, window_rect: Rect) {
    let screen_pos = world_to_screen(state.position.x, state.position.y, window_rect);
    // Flip the angle because screen y points up
    let angle = -state.heading as f32;

    let half = fish_length(state.acceleration) / 2.0;
    let body = [
        pt2(half, 0.0),
        pt2(0.0, FISH_HEIGHT / 2.0),
        pt2(-half * 0.5, 0.0),
        pt2(0.0, -FISH_HEIGHT / 2.0),
    ];
    let tail = [
        pt2(-half * 0.4, 0.0),
        pt2(-half, FISH_HEIGHT / 2.0),
        pt2(-half, -FISH_HEIGHT / 2.0),
    ];

    let color = rgb(0x00u8, 0xe4, 0x68);
    draw.polygon()
        .color(color)
        .points(body)
        .xy(screen_pos)
        .rotate(angle);
    draw.polygon()
        .color(color)
        .points(tail)
        .xy(screen_pos)
        .rotate(angle);
}
