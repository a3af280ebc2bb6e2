/*
 * Neighbor Search Module
 *
 * Strategies that decide which fish are worth checking during a fish's
 * neighbor scan. The scan itself still tests the real distance, so a strategy
 * only has to return a superset of the true neighbors, in ascending index
 * order (that keeps the floating point summation order, and therefore the
 * simulation output, identical across strategies).
 *
 * - BruteForce: every fish, the reference O(n^2) behavior
 * - SpatialGrid: uniform grid rebuilt once per tick, for large flocks
 */

use glam::DVec2;

use crate::boid::Boid;
use crate::bounds::WorldBounds;
use crate::params::SimulationParams;

// Smallest cell the grid will lay out, whatever the perception radius
const MIN_CELL_SIZE: f64 = 1.0;

pub trait NeighborSearch {
    // Called once per tick, after growth and before any fish moves. Params are
    // passed every time because they can be retuned between ticks.
    fn rebuild(&mut self, boids: &[Boid], bounds: WorldBounds, params: &SimulationParams);

    // Replace `out` with the candidate indices for a fish at `position`
    fn candidates(&self, position: DVec2, boid_count: usize, out: &mut Vec<usize>);
}

#[derive(Debug, Default, Clone, Copy)]
pub struct BruteForce;

impl NeighborSearch for BruteForce {
    fn rebuild(&mut self, _boids: &[Boid], _bounds: WorldBounds, _params: &SimulationParams) {}

    fn candidates(&self, _position: DVec2, boid_count: usize, out: &mut Vec<usize>) {
        out.clear();
        out.extend(0..boid_count);
    }
}

/// Uniform grid over the tank.
///
/// Fish are bucketed by their position at the start of the tick, but the
/// flock updates in place, so by the time a fish is scanned its neighbors
/// may have moved. Cells are therefore `neighbor_radius` plus the fastest
/// possible per-tick displacement wide, so the 3x3 block around a fish still
/// contains every neighbor within the radius. The width is recomputed from
/// the current params on every rebuild.
#[derive(Debug, Clone, Default)]
pub struct SpatialGrid {
    cell_size: f64,
    cols: usize,
    rows: usize,
    grid: Vec<Vec<usize>>,
}

impl SpatialGrid {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    // NaN falls through `max` to the floor as well
    fn cell_size_for(params: &SimulationParams) -> f64 {
        (params.neighbor_radius + params.max_displacement_per_tick()).max(MIN_CELL_SIZE)
    }

    // Convert a world coordinate to a column/row, clamping fish that overshoot the walls
    #[inline]
    fn cell_coords(&self, position: DVec2) -> (usize, usize) {
        let col = (position.x / self.cell_size).floor().clamp(0.0, (self.cols - 1) as f64) as usize;
        let row = (position.y / self.cell_size).floor().clamp(0.0, (self.rows - 1) as f64) as usize;
        (col, row)
    }

    fn ensure_layout(&mut self, bounds: WorldBounds, cell_size: f64) {
        self.cell_size = cell_size;
        let cols = ((bounds.width / self.cell_size).ceil() as usize).max(1);
        let rows = ((bounds.height / self.cell_size).ceil() as usize).max(1);

        if cols != self.cols || rows != self.rows {
            self.cols = cols;
            self.rows = rows;
            self.grid.resize_with(cols * rows, Vec::new);
        }
        for cell in &mut self.grid {
            cell.clear();
        }
    }
}

impl NeighborSearch for SpatialGrid {
    fn rebuild(&mut self, boids: &[Boid], bounds: WorldBounds, params: &SimulationParams) {
        self.ensure_layout(bounds, Self::cell_size_for(params));
        for (i, boid) in boids.iter().enumerate() {
            let (col, row) = self.cell_coords(boid.position);
            self.grid[row * self.cols + col].push(i);
        }
    }

    fn candidates(&self, position: DVec2, boid_count: usize, out: &mut Vec<usize>) {
        out.clear();
        if self.grid.is_empty() {
            return;
        }

        let (col, row) = self.cell_coords(position);
        let col_range = col.saturating_sub(1)..=(col + 1).min(self.cols - 1);
        let row_range = row.saturating_sub(1)..=(row + 1).min(self.rows - 1);

        for r in row_range {
            let row_start = r * self.cols;
            for c in col_range.clone() {
                out.extend(
                    self.grid[row_start + c]
                        .iter()
                        .copied()
                        .filter(|&i| i < boid_count),
                );
            }
        }

        out.sort_unstable();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn boid_at(x: f64, y: f64) -> Boid {
        Boid::new(DVec2::new(x, y), DVec2::ZERO, 0.0)
    }

    fn bounds() -> WorldBounds {
        WorldBounds::new(1000.0, 1000.0).unwrap()
    }

    // Params whose grid cells come out exactly `cell` wide
    fn params_for_cell(cell: f64) -> SimulationParams {
        let params = SimulationParams::default();
        SimulationParams {
            neighbor_radius: cell - params.max_displacement_per_tick(),
            ..params
        }
    }

    #[test]
    fn brute_force_lists_everyone_in_order() {
        let mut out = vec![42];
        BruteForce.candidates(DVec2::ZERO, 4, &mut out);
        assert_eq!(out, vec![0, 1, 2, 3]);
    }

    #[test]
    fn grid_finds_neighbors_across_cell_boundaries() {
        let boids = vec![
            boid_at(99.0, 99.0),
            boid_at(101.0, 101.0),
            boid_at(900.0, 900.0),
            boid_at(150.0, 40.0),
        ];
        let mut grid = SpatialGrid::new();
        grid.rebuild(&boids, bounds(), &params_for_cell(100.0));
        assert!((grid.cell_size() - 100.0).abs() < 1e-9);

        let mut out = Vec::new();
        grid.candidates(boids[0].position, boids.len(), &mut out);
        assert_eq!(out, vec![0, 1, 3]);

        grid.candidates(boids[2].position, boids.len(), &mut out);
        assert_eq!(out, vec![2]);
    }

    #[test]
    fn grid_clamps_positions_outside_the_tank() {
        let boids = vec![boid_at(-30.0, -5.0), boid_at(10.0, 10.0), boid_at(1020.0, 500.0)];
        let mut grid = SpatialGrid::new();
        grid.rebuild(&boids, bounds(), &params_for_cell(100.0));

        let mut out = Vec::new();
        grid.candidates(DVec2::new(-60.0, 0.0), boids.len(), &mut out);
        assert_eq!(out, vec![0, 1]);

        grid.candidates(DVec2::new(990.0, 520.0), boids.len(), &mut out);
        assert_eq!(out, vec![2]);
    }

    #[test]
    fn grid_candidates_cover_every_true_neighbor() {
        let boids: Vec<Boid> = (0..400)
            .map(|i| {
                let t = i as f64;
                boid_at((t * 37.0) % 1000.0, (t * 91.0) % 1000.0)
            })
            .collect();
        let mut grid = SpatialGrid::new();
        grid.rebuild(&boids, bounds(), &params_for_cell(105.0));

        let mut out = Vec::new();
        for (i, boid) in boids.iter().enumerate() {
            grid.candidates(boid.position, boids.len(), &mut out);
            for (j, other) in boids.iter().enumerate() {
                if boid.position.distance(other.position) <= 100.0 {
                    assert!(out.binary_search(&j).is_ok(), "{j} missing from candidates of {i}");
                }
            }
        }
    }

    #[test]
    fn grid_relayouts_after_resize() {
        let boids = vec![boid_at(1500.0, 1500.0), boid_at(1450.0, 1480.0)];
        let params = params_for_cell(100.0);
        let mut grid = SpatialGrid::new();
        grid.rebuild(&boids, bounds(), &params);
        grid.rebuild(&boids, WorldBounds::new(2000.0, 2000.0).unwrap(), &params);

        let mut out = Vec::new();
        grid.candidates(boids[0].position, boids.len(), &mut out);
        assert_eq!(out, vec![0, 1]);
    }

    #[test]
    fn grid_widens_cells_when_radius_is_retuned() {
        let boids = vec![boid_at(50.0, 50.0), boid_at(450.0, 50.0)];
        let mut grid = SpatialGrid::new();
        let mut out = Vec::new();

        grid.rebuild(&boids, bounds(), &params_for_cell(100.0));
        grid.candidates(boids[0].position, boids.len(), &mut out);
        assert_eq!(out, vec![0]);

        let wide = SimulationParams {
            neighbor_radius: 400.0,
            ..SimulationParams::default()
        };
        grid.rebuild(&boids, bounds(), &wide);
        assert_eq!(grid.cell_size(), 400.0 + wide.max_displacement_per_tick());
        grid.candidates(boids[0].position, boids.len(), &mut out);
        assert_eq!(out, vec![0, 1]);
    }

    #[test]
    fn degenerate_cell_size_falls_back_to_floor() {
        let boids = vec![boid_at(10.0, 10.0)];
        let mut grid = SpatialGrid::new();
        grid.rebuild(&boids, bounds(), &params_for_cell(0.0));
        assert_eq!(grid.cell_size(), MIN_CELL_SIZE);

        let nan = SimulationParams {
            neighbor_radius: f64::NAN,
            ..SimulationParams::default()
        };
        grid.rebuild(&boids, bounds(), &nan);
        assert_eq!(grid.cell_size(), MIN_CELL_SIZE);

        let mut out = Vec::new();
        grid.candidates(boids[0].position, boids.len(), &mut out);
        assert_eq!(out, vec![0]);
    }
}
