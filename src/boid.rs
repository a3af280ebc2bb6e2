/*
 * Boid Module
 *
 * This module defines the Boid struct (one fish) and its update rule.
 * Each tick a fish blends:
 * 1. Alignment: steer towards the average heading of neighbors
 * 2. Cohesion: steer towards the average position of neighbors
 * 3. Separation: push away from neighbors that are too close
 * 4. Soft walls, the repulsion point and a weak wander term
 *
 * then clamps its speed between the minimum and the (possibly boosted)
 * ceiling and moves by one velocity step.
 */

use std::f64::consts::TAU;

use glam::DVec2;
use rand::Rng;

use crate::bounds::WorldBounds;
use crate::environment::EnvironmentSignal;
use crate::params::SimulationParams;
use crate::vector::{limit, magnitude, steer_toward};

// Everything a fish reads from the outside world during one update
pub struct StepContext<'a> {
    pub params: &'a SimulationParams,
    pub environment: &'a EnvironmentSignal,
    pub bounds: WorldBounds,
}

/// Renderable snapshot of a fish after a tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoidState {
    pub position: DVec2,
    pub velocity: DVec2,
    /// Facing angle, `atan2(vy, vx)`, in world coordinates (y down).
    pub heading: f64,
    /// Length of the velocity change during the last tick.
    pub acceleration: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Boid {
    pub position: DVec2,
    pub velocity: DVec2,
    pub previous_velocity: DVec2,
    pub wander_phase: f64,
    pub heading: f64,
}

impl Boid {
    pub fn new(position: DVec2, velocity: DVec2, wander_phase: f64) -> Self {
        Self {
            position,
            velocity,
            previous_velocity: velocity,
            wander_phase,
            heading: velocity.y.atan2(velocity.x),
        }
    }

    // Spawn somewhere inside the tank with a small random drift
    pub fn spawn<R: Rng>(bounds: WorldBounds, params: &SimulationParams, rng: &mut R) -> Self {
        let spread = params.spawn_velocity_spread;
        let velocity = DVec2::new(
            (rng.gen::<f64>() - 0.5) * spread,
            (rng.gen::<f64>() - 0.5) * spread,
        );
        let position = DVec2::new(bounds.width * rng.gen::<f64>(), bounds.height * rng.gen::<f64>());
        let wander_phase = rng.gen::<f64>() * TAU;

        Self::new(position, velocity, wander_phase)
    }

    pub fn state(&self) -> BoidState {
        BoidState {
            position: self.position,
            velocity: self.velocity,
            heading: self.heading,
            acceleration: magnitude(self.velocity - self.previous_velocity),
        }
    }

    /// Advance this fish by one tick.
    ///
    /// `index` is this fish's slot in `boids` and is skipped during the
    /// neighbor scan. `candidates` lists the slots worth checking, in
    /// ascending order; the neighbor radius is still tested here, so a
    /// superset of the real neighbors is fine.
    pub fn update<R: Rng>(
        &mut self,
        index: usize,
        boids: &[Boid],
        candidates: &[usize],
        ctx: &StepContext<'_>,
        rng: &mut R,
    ) {
        let params = ctx.params;
        self.previous_velocity = self.velocity;

        let mut steering = self.flocking_force(index, boids, candidates, params);
        steering += self.wall_force(ctx.bounds, params);

        let (repulsion, flee_boost) = self.repulsion_force(ctx.environment.repulsion_point(), params);
        steering += repulsion;

        // Bounded random walk, never reset
        self.wander_phase += (rng.gen::<f64>() - 0.5) * params.wander_jitter;
        steering += DVec2::new(self.wander_phase.cos(), self.wander_phase.sin()) * params.wander_force;

        self.velocity += steering;

        let max_speed = params.max_speed + ctx.environment.boost_magnitude() + flee_boost;
        self.velocity = govern_speed(self.velocity, params.min_speed, max_speed);

        self.position += self.velocity;
        self.heading = self.velocity.y.atan2(self.velocity.x);
    }

    // Alignment, cohesion and separation from a single pass over the candidates
    fn flocking_force(
        &self,
        index: usize,
        boids: &[Boid],
        candidates: &[usize],
        params: &SimulationParams,
    ) -> DVec2 {
        let mut alignment = DVec2::ZERO;
        let mut cohesion = DVec2::ZERO;
        let mut separation = DVec2::ZERO;
        let mut neighbor_count = 0usize;

        for &other_index in candidates {
            if other_index == index {
                continue;
            }
            let other = &boids[other_index];
            let offset = self.position - other.position;
            let distance = magnitude(offset);
            if distance == 0.0 || distance > params.neighbor_radius {
                continue;
            }

            alignment += other.velocity;
            cohesion += other.position;
            neighbor_count += 1;

            // Unit vector only, closer neighbors do not push harder
            if distance < params.separation_radius {
                separation += offset / distance;
            }
        }

        if neighbor_count == 0 {
            return DVec2::ZERO;
        }

        let n = neighbor_count as f64;
        let mut force = steer_toward(
            alignment / n,
            self.velocity,
            params.max_speed,
            params.max_force,
            params.alignment_weight,
        );
        force += steer_toward(
            cohesion / n - self.position,
            self.velocity,
            params.max_speed,
            params.max_force,
            params.cohesion_weight,
        );
        // Applied directly so crowding reacts immediately
        force += limit(separation, params.max_force * params.separation_force_scale);
        force
    }

    // Spring-like push proportional to how far inside the padding we are
    fn wall_force(&self, bounds: WorldBounds, params: &SimulationParams) -> DVec2 {
        let mut force = DVec2::ZERO;

        let padding = params.edge_padding;
        if self.position.x < padding {
            force.x += (padding - self.position.x) * params.edge_force;
        } else if self.position.x > bounds.width - padding {
            force.x -= (self.position.x - (bounds.width - padding)) * params.edge_force;
        }

        let vertical_padding = padding * params.vertical_padding_scale;
        if self.position.y < vertical_padding {
            force.y += (vertical_padding - self.position.y) * params.edge_force;
        } else if self.position.y > bounds.height - vertical_padding {
            force.y -= (self.position.y - (bounds.height - vertical_padding)) * params.edge_force;
        }

        force
    }

    // Returns the push away from the point and the extra speed allowed this tick
    fn repulsion_force(&self, point: Option<DVec2>, params: &SimulationParams) -> (DVec2, f64) {
        let Some(point) = point else {
            return (DVec2::ZERO, 0.0);
        };

        let offset = self.position - point;
        let distance = magnitude(offset);
        let radius = params.cursor_repulse_radius;
        if distance <= 0.0 || distance >= radius {
            return (DVec2::ZERO, 0.0);
        }

        let strength = (radius - distance) / radius;
        let push = offset / distance * strength * params.repulse_strength;
        (push, strength * params.flee_boost_scale)
    }
}

// Two-sided clamp: never faster than the ceiling, never stalled below the floor.
// A zero velocity has no direction to rescale and stays zero.
fn govern_speed(velocity: DVec2, min_speed: f64, max_speed: f64) -> DVec2 {
    let speed = magnitude(velocity);
    if speed > max_speed {
        velocity * (max_speed / speed)
    } else if speed < min_speed {
        let divisor = if speed == 0.0 { 1.0 } else { speed };
        velocity * (min_speed / divisor)
    } else {
        velocity
    }
}
