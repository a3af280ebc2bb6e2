/*
 * Flock Module
 *
 * The school of fish and its per-tick orchestration:
 * - grow by at most one fish per tick until the target population is met
 * - rebuild the neighbor search strategy
 * - update every fish in order, in place
 *
 * Updates are sequential and read live state: fish later in the list see
 * the already-moved positions and velocities of fish earlier in the list.
 * The flock never shrinks.
 */

use rand::Rng;
use tracing::trace;

use crate::boid::{Boid, StepContext};
use crate::bounds::WorldBounds;
use crate::environment::EnvironmentSignal;
use crate::neighbors::{BruteForce, NeighborSearch};
use crate::params::SimulationParams;

pub struct Flock {
    boids: Vec<Boid>,
    search: Box<dyn NeighborSearch>,
    // Reused between fish to avoid reallocating every update
    candidates: Vec<usize>,
}

impl Default for Flock {
    fn default() -> Self {
        Self::new()
    }
}

impl Flock {
    pub fn new() -> Self {
        Self::with_search(Box::new(BruteForce))
    }

    pub fn with_search(search: Box<dyn NeighborSearch>) -> Self {
        Self {
            boids: Vec::new(),
            search,
            candidates: Vec::new(),
        }
    }

    // Start from a hand-placed school, in the given order
    pub fn from_boids(boids: Vec<Boid>) -> Self {
        let mut flock = Self::new();
        flock.boids = boids;
        flock
    }

    pub fn set_search(&mut self, search: Box<dyn NeighborSearch>) {
        self.search = search;
    }

    pub fn boids(&self) -> &[Boid] {
        &self.boids
    }

    pub fn len(&self) -> usize {
        self.boids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boids.is_empty()
    }

    pub fn push(&mut self, boid: Boid) {
        self.boids.push(boid);
    }

    // Add a single fish if we are still short of the target
    pub fn grow_to<R: Rng>(
        &mut self,
        target_population: usize,
        bounds: WorldBounds,
        params: &SimulationParams,
        rng: &mut R,
    ) {
        if self.boids.len() < target_population {
            self.boids.push(Boid::spawn(bounds, params, rng));
        }
    }

    pub fn tick<R: Rng>(
        &mut self,
        environment: &EnvironmentSignal,
        bounds: WorldBounds,
        params: &SimulationParams,
        rng: &mut R,
    ) {
        self.grow_to(params.fish_count, bounds, params, rng);
        self.search.rebuild(&self.boids, bounds, params);

        let ctx = StepContext {
            params,
            environment,
            bounds,
        };

        for i in 0..self.boids.len() {
            // Work on a copy so the rest of the school stays readable; the
            // fish's own stale slot is skipped by index during the scan
            let mut boid = self.boids[i];
            self.search
                .candidates(boid.position, self.boids.len(), &mut self.candidates);
            boid.update(i, &self.boids, &self.candidates, &ctx, rng);
            self.boids[i] = boid;
        }

        trace!(population = self.boids.len(), "flock advanced");
    }

    // Scale every position, keeping the school's layout relative to the tank
    pub fn rescale(&mut self, ratio_x: f64, ratio_y: f64) {
        for boid in &mut self.boids {
            boid.position.x *= ratio_x;
            boid.position.y *= ratio_y;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::neighbors::SpatialGrid;
    use glam::DVec2;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn bounds() -> WorldBounds {
        WorldBounds::new(800.0, 600.0).unwrap()
    }

    #[test]
    fn grows_one_fish_per_tick_up_to_target() {
        let params = SimulationParams {
            fish_count: 5,
            ..SimulationParams::default()
        };
        let env = EnvironmentSignal::new(&params);
        let mut rng = SmallRng::seed_from_u64(1);
        let mut flock = Flock::new();

        for expected in 1..=5 {
            flock.tick(&env, bounds(), &params, &mut rng);
            assert_eq!(flock.len(), expected);
        }
        for _ in 0..10 {
            flock.tick(&env, bounds(), &params, &mut rng);
            assert_eq!(flock.len(), 5);
        }
    }

    #[test]
    fn lowering_target_never_shrinks() {
        let mut params = SimulationParams {
            fish_count: 4,
            ..SimulationParams::default()
        };
        let env = EnvironmentSignal::new(&params);
        let mut rng = SmallRng::seed_from_u64(2);
        let mut flock = Flock::new();
        for _ in 0..4 {
            flock.tick(&env, bounds(), &params, &mut rng);
        }

        params.fish_count = 1;
        flock.tick(&env, bounds(), &params, &mut rng);
        assert_eq!(flock.len(), 4);
    }

    #[test]
    fn later_fish_see_updated_state() {
        let params = SimulationParams {
            fish_count: 0,
            wander_force: 0.0,
            ..SimulationParams::default()
        };
        let env = EnvironmentSignal::new(&params);

        // Fish 1 sits exactly on the neighbor radius of fish 0's *new* position
        let boids = vec![
            Boid::new(DVec2::new(300.0, 300.0), DVec2::new(1.0, 0.0), 0.0),
            Boid::new(DVec2::new(401.0, 300.0), DVec2::new(0.0, 1.0), 0.0),
        ];

        let mut live = Flock::from_boids(boids.clone());
        let mut rng = SmallRng::seed_from_u64(3);
        live.tick(&env, bounds(), &params, &mut rng);

        // Fish 1 was out of range of fish 0's old position, so it only
        // reacts because it sees fish 0 after fish 0 has moved
        assert_eq!(live.boids()[0].position, DVec2::new(301.0, 300.0));
        assert!(live.boids()[1].velocity.x > 0.0);
        assert!(live.boids()[1].velocity.y < 1.0);
    }

    #[test]
    fn rescale_multiplies_positions_only() {
        let boids = vec![Boid::new(DVec2::new(10.0, 20.0), DVec2::new(0.5, -0.5), 0.0)];
        let mut flock = Flock::from_boids(boids);
        flock.rescale(2.0, 0.5);
        assert_eq!(flock.boids()[0].position, DVec2::new(20.0, 10.0));
        assert_eq!(flock.boids()[0].velocity, DVec2::new(0.5, -0.5));
    }

    #[test]
    fn grid_matches_brute_force_bit_for_bit() {
        let params = SimulationParams {
            fish_count: 150,
            ..SimulationParams::default()
        };
        let mut env = EnvironmentSignal::new(&params);
        env.set_repulsion(Some(DVec2::new(400.0, 300.0)));

        let mut brute = Flock::new();
        let mut grid = Flock::with_search(Box::new(SpatialGrid::new()));
        let mut rng_a = SmallRng::seed_from_u64(99);
        let mut rng_b = SmallRng::seed_from_u64(99);

        for _ in 0..300 {
            brute.tick(&env, bounds(), &params, &mut rng_a);
            grid.tick(&env, bounds(), &params, &mut rng_b);
        }

        assert_eq!(brute.boids(), grid.boids());
    }
}
