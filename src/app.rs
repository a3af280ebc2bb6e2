/*
 * Application Module
 *
 * This module defines the viewer's model and its per-frame update. The
 * viewer is an external driver of the simulation: it owns a Simulation,
 * forwards pointer and resize events into it, ticks it once per frame and
 * draws the returned fish.
 */

use std::path::PathBuf;

use clap::Parser;
use nannou::prelude::*;
use nannou_egui::Egui;
use tracing::{error, info, warn};

use crate::debug::DebugInfo;
use crate::error::ConfigError;
use crate::input;
use crate::params::SimulationParams;
use crate::renderer;
use crate::simulation::Simulation;
use crate::ui;

#[derive(Parser, Debug)]
#[command(name = "fishtank")]
#[command(about = "Interactive fish tank flocking simulation", long_about = None)]
pub struct Args {
    /// Target number of fish (overrides the parameter file)
    #[arg(short = 'n', long)]
    pub fish_count: Option<usize>,

    /// Seed for a reproducible tank
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// TOML file with simulation parameters
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

// Main model for the application
pub struct Model {
    pub simulation: Simulation,
    // Copy edited by the UI, pushed into the simulation when it changes
    pub params: SimulationParams,
    pub egui: Egui,
    pub debug_info: DebugInfo,
    pub paused: bool,
    pub show_debug: bool,
}

fn load_params(args: &Args) -> Result<SimulationParams, ConfigError> {
    let mut params = match &args.config {
        Some(path) => SimulationParams::load(path)?,
        None => SimulationParams::default(),
    };
    if let Some(fish_count) = args.fish_count {
        params.fish_count = fish_count;
    }
    params.validate()?;
    Ok(params)
}

// Initialize the model
pub fn model(app: &App) -> Model {
    let args = Args::parse();
    let params = match load_params(&args) {
        Ok(params) => params,
        Err(err) => {
            error!(%err, "invalid configuration");
            std::process::exit(2);
        }
    };

    let window_id = app
        .new_window()
        .title("Fish Tank")
        .size(960, 540)
        .view(renderer::view)
        .mouse_moved(input::mouse_moved)
        .mouse_pressed(input::mouse_pressed)
        .mouse_exited(input::mouse_exited)
        .resized(input::resized)
        .raw_event(raw_window_event)
        .build()
        .expect("failed to build the tank window");

    let window = app.window(window_id).expect("tank window disappeared");
    let egui = Egui::from_window(&window);
    let rect = window.rect();
    let (width, height) = (rect.w() as f64, rect.h() as f64);

    let simulation = match args.seed {
        Some(seed) => Simulation::with_seed(width, height, params.clone(), seed),
        None => Simulation::configure(width, height, params.clone()),
    };
    let simulation = match simulation {
        Ok(simulation) => simulation,
        Err(err) => {
            error!(%err, "could not configure the simulation");
            std::process::exit(2);
        }
    };

    info!(width, height, fish_count = params.fish_count, seed = ?args.seed, "fish tank ready");

    Model {
        simulation,
        params,
        egui,
        debug_info: DebugInfo::default(),
        paused: false,
        show_debug: false,
    }
}

// Let egui see every window event so the panel stays interactive
fn raw_window_event(_app: &App, model: &mut Model, event: &nannou::winit::event::WindowEvent) {
    model.egui.handle_raw_event(event);
}

// Update the model
pub fn update(app: &App, model: &mut Model, update: Update) {
    model.debug_info.fps = app.fps();
    model.debug_info.frame_time = update.since_last;
    model.egui.set_elapsed_time(update.since_start);

    let response = ui::update_ui(
        &mut model.egui,
        &mut model.params,
        &mut model.paused,
        &mut model.show_debug,
        &model.debug_info,
    );

    if response.params_changed {
        if let Err(err) = model.simulation.set_params(model.params.clone()) {
            warn!(%err, "rejected parameter change");
            model.params = model.simulation.params().clone();
        }
    }
    if response.boost_requested {
        model.simulation.trigger_boost();
    }

    if !model.paused {
        model.simulation.tick();
    }

    let environment = model.simulation.environment();
    model.debug_info.fish_count = model.simulation.boids().len();
    model.debug_info.boost = environment.boost_magnitude();
    model.debug_info.boost_countdown = environment.boost_countdown();
}
