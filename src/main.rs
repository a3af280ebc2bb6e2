/*
 * Fish Tank Viewer
 *
 * Opens a window with the flocking tank. Move the pointer through the
 * school to scatter it, click to trigger a speed surge, and use the panel to
 * retune the simulation live.
 *
 *   fishtank [--fish-count N] [--seed SEED] [--config params.toml]
 */

use fishtank::app::{model, update};

fn main() {
    tracing_subscriber::fmt::init();
    nannou::app(model).update(update).run();
}
