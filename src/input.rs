/*
 * Input Module
 *
 * This module turns window events into simulation inputs:
 * - pointer movement sets the repulsion point
 * - the pointer leaving the window clears it
 * - any click triggers a speed boost
 * - resizing the window resizes the tank
 *
 * Events that land on the egui panel are left to the panel.
 */

use nannou::prelude::*;
use nannou::winit::event::MouseButton;
use tracing::warn;

use crate::app::Model;

// nannou puts the origin in the window center with y up; the tank's origin
// is the top-left corner with y down
pub fn screen_to_world(pos: Point2, window_rect: Rect) -> (f64, f64) {
    ((pos.x - window_rect.left()) as f64, (window_rect.top() - pos.y) as f64)
}

// Mouse moved event handler
pub fn mouse_moved(app: &App, model: &mut Model, pos: Point2) {
    if model.egui.ctx().is_pointer_over_area() {
        model.simulation.set_repulsion_point(None);
        return;
    }

    let point = screen_to_world(pos, app.window_rect());
    model.simulation.set_repulsion_point(Some(point));
}

// Mouse pressed event handler
pub fn mouse_pressed(_app: &App, model: &mut Model, _button: MouseButton) {
    if !model.egui.ctx().is_pointer_over_area() {
        model.simulation.trigger_boost();
    }
}

pub fn mouse_exited(_app: &App, model: &mut Model) {
    model.simulation.set_repulsion_point(None);
}

// A minimized window reports a zero size; keep the old tank in that case
pub fn resized(_app: &App, model: &mut Model, size: Vec2) {
    if let Err(err) = model.simulation.resize(size.x as f64, size.y as f64) {
        warn!(%err, "ignoring resize");
    }
}
