//! The world generator: owns the tile grid and the random source while passes run.
//!
//! Passes are methods on [`WorldGenerator`] spread over the `terrain`,
//! `desert` and `material` modules. The generator never sequences them itself;
//! the documented order is:
//!
//! 1. [`generate_height`](WorldGenerator::generate_height) and
//!    [`generate_terrain`](WorldGenerator::generate_terrain) to derive boundary arrays,
//! 2. [`generate_layers`](WorldGenerator::generate_layers),
//! 3. [`generate_deserts`](WorldGenerator::generate_deserts),
//!    [`generate_sand_piles`](WorldGenerator::generate_sand_piles),
//! 4. [`generate_surface`](WorldGenerator::generate_surface),
//!    [`generate_underground`](WorldGenerator::generate_underground),
//!    [`generate_cavern`](WorldGenerator::generate_cavern),
//!    [`generate_clay`](WorldGenerator::generate_clay),
//! 5. [`finish`](WorldGenerator::finish).
//!
//! Later passes overwrite earlier ones.
//!
//! Order-dependent calls (they consume stateful draws): `generate_height`,
//! `generate_terrain` (three draws per column), `generate_deserts` and the
//! single pass-level draw of `generate_cavern`. Every other pass reads only the
//! stateless noise field and may run its rows in parallel.

use crate::grid::{TileGrid, WorldSize};
use crate::random::NoiseRandom;
use crate::world::World;

/// Deterministic 2D world generator.
pub struct WorldGenerator {
    pub(crate) grid: TileGrid,
    pub(crate) random: NoiseRandom,
    pub(crate) parallel: bool,
}

impl WorldGenerator {
    /// Create a generator for `size`, seeded with `seed`. The grid starts as all Air.
    pub fn new(size: WorldSize, seed: u64) -> Self {
        let (width, height) = size.dimensions();
        tracing::info!(%size, width, height, seed, "Allocating world grid");
        Self::from_grid(TileGrid::from_size(size), seed)
    }

    /// Create a generator with explicit dimensions instead of a size class.
    pub fn with_dimensions(width: usize, height: usize, seed: u64) -> Self {
        Self::from_grid(TileGrid::new(width, height), seed)
    }

    fn from_grid(grid: TileGrid, seed: u64) -> Self {
        Self {
            grid,
            random: NoiseRandom::new(seed),
            parallel: false,
        }
    }

    /// Evaluate stateless passes across rows on the rayon pool.
    ///
    /// Output is identical with or without parallelism.
    pub fn set_parallel(&mut self, parallel: bool) {
        self.parallel = parallel;
    }

    pub fn is_parallel(&self) -> bool {
        self.parallel
    }

    pub fn width(&self) -> usize {
        self.grid.width()
    }

    pub fn height(&self) -> usize {
        self.grid.height()
    }

    /// Read-only view of the grid as it stands between passes.
    pub fn grid(&self) -> &TileGrid {
        &self.grid
    }

    /// Baseline height: `height * U[min, max)`, truncated toward zero.
    pub fn generate_height(&mut self, min: f64, max: f64) -> i32 {
        (self.grid.height() as f64 * self.random.double(min, max)) as i32
    }

    /// Consume the generator and hand its tiles to an immutable [`World`].
    pub fn finish(self) -> World {
        let (tiles, width, height) = self.grid.into_parts();
        tracing::info!(width, height, "World generation finished");
        World::new(tiles, width, height)
    }

    /// Warn once per pass when a boundary array does not cover every column.
    ///
    /// Missing columns are skipped by the pass.
    pub(crate) fn check_columns(&self, pass: &str, arrays: &[&[i32]]) {
        let width = self.grid.width();
        if let Some(short) = arrays.iter().map(|a| a.len()).filter(|&n| n < width).min() {
            tracing::warn!(pass, columns = short, width, "Boundary array shorter than grid width");
        }
    }
}

/// Row range covering `[start[x] + lo, end[x] + hi)` for every column in `0..width`.
pub(crate) fn band_rows(
    grid: &TileGrid,
    start: &[i32],
    end: &[i32],
    lo: i64,
    hi: i64,
) -> std::ops::Range<usize> {
    let columns = start.len().min(end.len()).min(grid.width());
    let top = start[..columns].iter().map(|&s| s as i64 + lo).min();
    let bottom = end[..columns].iter().map(|&e| e as i64 + hi).max();
    match (top, bottom) {
        (Some(top), Some(bottom)) => grid.row_span(top, bottom),
        _ => 0..0,
    }
}

/// Returns `true` if row `y` lies in `[start + lo, end + hi)` for column `x`.
///
/// Columns beyond either array are never inside.
#[inline]
pub(crate) fn in_band(start: &[i32], end: &[i32], x: usize, y: usize, lo: i64, hi: i64) -> bool {
    match (start.get(x), end.get(x)) {
        (Some(&s), Some(&e)) => {
            let y = y as i64;
            y >= s as i64 + lo && y < e as i64 + hi
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tile::Tile;

    #[test]
    fn test_finish_dimensions_for_every_size() {
        for size in WorldSize::ALL {
            let (width, height) = size.dimensions();
            let world = WorldGenerator::new(size, 1).finish();
            assert_eq!(world.width(), width);
            assert_eq!(world.height(), height);
            assert_eq!(world.tiles().len(), width * height);
        }
    }

    #[test]
    fn test_tiny_world_tile_count() {
        let world = WorldGenerator::new(WorldSize::Tiny, 0).finish();
        assert_eq!(world.tiles().len(), 921_600);
        assert!(world.tiles().iter().all(|&t| t == Tile::Air));
    }

    #[test]
    fn test_generate_height_scales_with_grid() {
        let mut generator = WorldGenerator::with_dimensions(100, 1000, 42);
        for _ in 0..100 {
            let h = generator.generate_height(0.25, 0.5);
            assert!((250..500).contains(&h), "height {h} outside [250, 500)");
        }
        assert_eq!(generator.generate_height(0.3, 0.3), 300);
    }

    #[test]
    fn test_generate_height_tolerates_non_finite_fractions() {
        let mut generator = WorldGenerator::with_dimensions(100, 1000, 42);
        assert_eq!(generator.generate_height(f64::NAN, 0.5), 0);
        assert_eq!(generator.generate_height(0.25, f64::INFINITY), 250);
        assert_eq!(generator.generate_height(0.25, f64::NAN), 250);
    }

    #[test]
    fn test_generate_height_deterministic() {
        let mut a = WorldGenerator::with_dimensions(10, 720, 5);
        let mut b = WorldGenerator::with_dimensions(10, 720, 5);
        for _ in 0..10 {
            assert_eq!(a.generate_height(0.1, 0.9), b.generate_height(0.1, 0.9));
        }
    }

    #[test]
    fn test_band_rows_and_in_band() {
        let grid = TileGrid::new(3, 100);
        let start = [10, 20, 5];
        let end = [30, 25, 40];
        assert_eq!(band_rows(&grid, &start, &end, 0, 0), 5..40);
        assert_eq!(band_rows(&grid, &start, &end, 5, 30), 10..70);
        assert_eq!(band_rows(&grid, &start, &end, -20, 200), 0..100);
        assert_eq!(band_rows(&grid, &[], &end, 0, 0), 0..0);

        assert!(in_band(&start, &end, 0, 10, 0, 0));
        assert!(!in_band(&start, &end, 0, 30, 0, 0));
        assert!(!in_band(&start, &end, 3, 10, 0, 0));
        assert!(!in_band(&[50], &[10], 0, 20, 0, 0), "Inverted band holds no rows");
    }
}
