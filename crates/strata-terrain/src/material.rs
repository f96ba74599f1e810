//! Material passes that texture the layered substrate with stone, dirt and clay.
//!
//! All four passes are stateless per cell (the cavern pass consumes one draw
//! up front) and run through [`TileGrid::rewrite_rows`](crate::TileGrid::rewrite_rows).

use crate::generator::{WorldGenerator, band_rows, in_band};
use crate::tile::Tile;

const SURFACE_STONE_SCALE: f64 = 10.0;
const SURFACE_STONE_CUTOFF: f64 = 0.75;

const UNDERGROUND_STONE_SCALE: f64 = 22.0;
const UNDERGROUND_STONE_CUTOFF: f64 = 0.4;

const CAVERN_DIRT_SCALE: f64 = 16.0;
const CAVERN_DIRT_CUTOFF: f64 = 0.6;
/// Scale of the low-frequency field that perturbs the cavern cutoff.
const CAVERN_CUTOFF_SCALE: f64 = 2.0;

const CLAY_SCALE: f64 = 7.0;
const CLAY_UPPER_CUTOFF: f64 = 0.8;
const CLAY_LOWER_CUTOFF: f64 = 0.9;

/// Materials the surface stone pass may convert.
pub const SURFACE_STONE_HOSTS: &[Tile] = &[Tile::Dirt];
/// Materials the upper clay band may convert.
pub const CLAY_HOSTS: &[Tile] = &[Tile::Dirt, Tile::Stone];

impl WorldGenerator {
    /// Turn Dirt into Stone where the field at `(x * 10, y * 10)` exceeds 0.75,
    /// for rows `[start[x], end[x])` of each column. Other materials are kept.
    pub fn generate_surface(&mut self, start: &[i32], end: &[i32]) {
        self.check_columns("surface", &[start, end]);
        let rows = band_rows(&self.grid, start, end, 0, 0);
        let field = self.random.field();

        let written = self.grid.rewrite_rows(rows, self.parallel, |x, y, current| {
            if !in_band(start, end, x, y, 0, 0) || !current.is_any(SURFACE_STONE_HOSTS) {
                return None;
            }
            let noise = field.sample(x as f64 * SURFACE_STONE_SCALE, y as f64 * SURFACE_STONE_SCALE);
            (noise > SURFACE_STONE_CUTOFF).then_some(Tile::Stone)
        });
        tracing::debug!(written, "Surface stone generated");
    }

    /// Set Stone wherever the three-octave sum at scale 22 exceeds 0.4, for rows
    /// `[start[x], end[x])`, whatever was there before.
    pub fn generate_underground(&mut self, start: &[i32], end: &[i32]) {
        self.check_columns("underground", &[start, end]);
        let rows = band_rows(&self.grid, start, end, 0, 0);
        let field = self.random.field();

        let written = self.grid.rewrite_rows(rows, self.parallel, |x, y, _| {
            if !in_band(start, end, x, y, 0, 0) {
                return None;
            }
            let noise = field.octave_sum(x as f64, y as f64, UNDERGROUND_STONE_SCALE);
            (noise > UNDERGROUND_STONE_CUTOFF).then_some(Tile::Stone)
        });
        tracing::debug!(written, "Underground stone generated");
    }

    /// Fill Dirt pockets in rows `[start[x], end[x])`.
    ///
    /// A cell becomes Dirt when the three-octave sum at scale 16 exceeds
    /// `0.6 + field(x * 2, y * 2) / 4`, regardless of its current material.
    /// This adds material rather than carving empty space. One stateful draw is
    /// consumed before any cell is visited.
    pub fn generate_cavern(&mut self, start: &[i32], end: &[i32]) {
        self.check_columns("cavern", &[start, end]);
        // Keeps the draw stream aligned for passes that follow.
        let _ = self.random.next_u32();
        let rows = band_rows(&self.grid, start, end, 0, 0);
        let field = self.random.field();

        let written = self.grid.rewrite_rows(rows, self.parallel, |x, y, _| {
            if !in_band(start, end, x, y, 0, 0) {
                return None;
            }
            let (fx, fy) = (x as f64, y as f64);
            let noise = field.octave_sum(fx, fy, CAVERN_DIRT_SCALE);
            let cutoff_noise =
                field.sample(fx * CAVERN_CUTOFF_SCALE, fy * CAVERN_CUTOFF_SCALE) / 4.0;
            (noise > CAVERN_DIRT_CUTOFF + cutoff_noise).then_some(Tile::Dirt)
        });
        tracing::debug!(written, "Cavern dirt generated");
    }

    /// Place Clay in two bands per column, both sampling the field at scale 7.
    ///
    /// - Upper band `[start[x] + 5, mid[x] + 10)`: Dirt or Stone becomes Clay
    ///   where the sample is at least 0.8.
    /// - Lower band `[mid[x] + 10, end[x] + 30)`: any tile becomes Clay where
    ///   the sample is at least 0.9.
    pub fn generate_clay(&mut self, start: &[i32], mid: &[i32], end: &[i32]) {
        self.check_columns("clay", &[start, mid, end]);
        let upper = band_rows(&self.grid, start, mid, 5, 10);
        let lower = band_rows(&self.grid, mid, end, 10, 30);
        let rows = match (upper.is_empty(), lower.is_empty()) {
            (true, _) => lower,
            (_, true) => upper,
            _ => upper.start.min(lower.start)..upper.end.max(lower.end),
        };
        let field = self.random.field();

        let written = self.grid.rewrite_rows(rows, self.parallel, |x, y, current| {
            let cutoff = if in_band(start, mid, x, y, 5, 10) {
                if !current.is_any(CLAY_HOSTS) {
                    return None;
                }
                CLAY_UPPER_CUTOFF
            } else if in_band(mid, end, x, y, 10, 30) {
                CLAY_LOWER_CUTOFF
            } else {
                return None;
            };
            let noise = field.sample(x as f64 * CLAY_SCALE, y as f64 * CLAY_SCALE);
            (noise >= cutoff).then_some(Tile::Clay)
        });
        tracing::debug!(written, "Clay generated");
    }
}
