/*
 * Simulation Module
 *
 * The owned simulation context and the whole surface an outside driver
 * needs: configure once, feed in pointer input and resizes, call tick once
 * per frame and draw whatever it returns. Each Simulation owns its own
 * flock, environment and random source, so independent tanks never share
 * state and a seeded tank replays exactly.
 */

use glam::DVec2;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::boid::{Boid, BoidState};
use crate::bounds::WorldBounds;
use crate::environment::EnvironmentSignal;
use crate::error::ConfigError;
use crate::flock::Flock;
use crate::neighbors::NeighborSearch;
use crate::params::SimulationParams;

pub struct Simulation<R: Rng = SmallRng> {
    params: SimulationParams,
    bounds: WorldBounds,
    flock: Flock,
    environment: EnvironmentSignal,
    rng: R,
    // Renderable state handed out by tick
    states: Vec<BoidState>,
}

impl Simulation<SmallRng> {
    // Entropy-seeded tank
    pub fn configure(
        world_width: f64,
        world_height: f64,
        params: SimulationParams,
    ) -> Result<Self, ConfigError> {
        Self::with_rng(world_width, world_height, params, SmallRng::from_entropy())
    }

    // Reproducible tank: same seed and same inputs give the same fish
    pub fn with_seed(
        world_width: f64,
        world_height: f64,
        params: SimulationParams,
        seed: u64,
    ) -> Result<Self, ConfigError> {
        Self::with_rng(world_width, world_height, params, SmallRng::seed_from_u64(seed))
    }
}

impl<R: Rng> Simulation<R> {
    pub fn with_rng(
        world_width: f64,
        world_height: f64,
        params: SimulationParams,
        rng: R,
    ) -> Result<Self, ConfigError> {
        let bounds = WorldBounds::new(world_width, world_height)?;
        params.validate()?;

        debug!(
            width = world_width,
            height = world_height,
            fish_count = params.fish_count,
            "simulation configured"
        );

        Ok(Self {
            environment: EnvironmentSignal::new(&params),
            flock: Flock::new(),
            states: Vec::with_capacity(params.fish_count),
            params,
            bounds,
            rng,
        })
    }

    pub fn params(&self) -> &SimulationParams {
        &self.params
    }

    pub fn bounds(&self) -> WorldBounds {
        self.bounds
    }

    pub fn environment(&self) -> &EnvironmentSignal {
        &self.environment
    }

    pub fn boids(&self) -> &[Boid] {
        self.flock.boids()
    }

    pub fn set_neighbor_search(&mut self, search: Box<dyn NeighborSearch>) {
        self.flock.set_search(search);
    }

    // Place a fish by hand, bypassing the random spawn
    pub fn add_boid(&mut self, boid: Boid) {
        self.flock.push(boid);
    }

    // Retune a running tank; the flock grows toward a larger target but never shrinks
    pub fn set_params(&mut self, params: SimulationParams) -> Result<(), ConfigError> {
        params.validate()?;
        debug!(fish_count = params.fish_count, "simulation parameters updated");
        self.params = params;
        Ok(())
    }

    /// Change the tank size, scaling fish positions by the per-axis ratio so
    /// the school keeps its layout. Velocities are left alone. The drawn
    /// states follow immediately, so a paused tank redraws at the new scale.
    pub fn resize(&mut self, new_width: f64, new_height: f64) -> Result<(), ConfigError> {
        let bounds = WorldBounds::new(new_width, new_height)?;
        let ratio_x = bounds.width / self.bounds.width;
        let ratio_y = bounds.height / self.bounds.height;
        self.flock.rescale(ratio_x, ratio_y);
        self.bounds = bounds;
        self.refresh_states();

        debug!(width = new_width, height = new_height, "tank resized");
        Ok(())
    }

    pub fn set_repulsion_point(&mut self, point: Option<(f64, f64)>) {
        self.environment
            .set_repulsion(point.map(|(x, y)| DVec2::new(x, y)));
    }

    pub fn trigger_boost(&mut self) {
        self.environment.trigger_boost(&self.params, &mut self.rng);
    }

    // Advance one frame and return what the renderer should draw
    pub fn tick(&mut self) -> &[BoidState] {
        self.environment.tick(&self.params, &mut self.rng);
        self.flock
            .tick(&self.environment, self.bounds, &self.params, &mut self.rng);
        self.refresh_states();
        &self.states
    }

    // Last state handed out by tick, rescaled by any resize since
    pub fn states(&self) -> &[BoidState] {
        &self.states
    }

    fn refresh_states(&mut self) {
        self.states.clear();
        self.states
            .extend(self.flock.boids().iter().map(Boid::state));
    }
}
