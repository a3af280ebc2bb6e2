/*
 * Fish Tank Flocking Simulation - Module Definitions
 *
 * The simulation core (boids, flock, environment signal, neighbor search)
 * is always built. The interactive nannou viewer lives behind the `viewer`
 * feature and only talks to the core through `Simulation`.
 */

// Re-export key components for easier access
pub use boid::{Boid, BoidState};
pub use bounds::WorldBounds;
pub use environment::EnvironmentSignal;
pub use error::ConfigError;
pub use flock::Flock;
pub use neighbors::{BruteForce, NeighborSearch, SpatialGrid};
pub use params::SimulationParams;
pub use simulation::Simulation;

// Define modules
pub mod boid;
pub mod bounds;
pub mod environment;
pub mod error;
pub mod flock;
pub mod neighbors;
pub mod params;
pub mod simulation;
pub mod vector;

#[cfg(feature = "viewer")]
pub mod app;
#[cfg(feature = "viewer")]
pub mod debug;
#[cfg(feature = "viewer")]
pub mod input;
#[cfg(feature = "viewer")]
pub mod renderer;
#[cfg(feature = "viewer")]
pub mod ui;
