//! Near-surface sand features: deserts dug into the surface and scattered sand piles.

use crate::generator::WorldGenerator;
use crate::tile::Tile;

/// Columns closer than this to the left edge never start a desert.
const DESERT_LEFT_MARGIN: i32 = 100;
/// Columns closer than this to the right edge never start a desert.
const DESERT_RIGHT_MARGIN: i32 = 130;
/// Minimum distance between `start + 30` and the center column.
const DESERT_SPAWN_CLEARANCE: i32 = 60;
/// Upper bound on location draws per pass before remaining deserts are dropped.
pub const MAX_DESERT_ATTEMPTS: u32 = 10_000;

const SAND_PILE_SCALE: f64 = 1.6;
const SAND_PILE_CUTOFF: f64 = 0.85;
/// Extra rows appended below the requested sand pile band.
const SAND_PILE_EXTENSION: i32 = 40;
/// Rows at each edge of the sand pile band that fade out.
const SAND_PILE_FADE_ROWS: i64 = 5;

/// A placed desert: `size` columns starting at `start`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Desert {
    pub start: i32,
    pub size: i32,
}

impl Desert {
    /// Sand depth for column `x`: a triangle peaking at the desert center.
    pub fn depth_at(&self, x: i32) -> i32 {
        let half = self.size / 2;
        (half - (x - self.start - half).abs()) / 2
    }
}

/// Returns `true` if a desert may start at column `start` on a grid `width` wide.
pub fn desert_start_allowed(start: i32, width: i32) -> bool {
    let spawn_distance = (start + 30 - width / 2).abs();
    start >= DESERT_LEFT_MARGIN
        && start <= width - DESERT_RIGHT_MARGIN
        && spawn_distance >= DESERT_SPAWN_CLEARANCE
}

impl WorldGenerator {
    /// Dig three to six deserts into the surface.
    ///
    /// Start columns are redrawn until they clear the edge margins and the
    /// spawn area. After [`MAX_DESERT_ATTEMPTS`] draws the remaining deserts
    /// are skipped. Each accepted desert is 40 to 139 columns wide, and every
    /// column gets [`Desert::depth_at`] rows of Sand starting at its surface
    /// level. Returns the deserts that were placed.
    pub fn generate_deserts(&mut self, surface_level: &[i32]) -> Vec<Desert> {
        self.check_columns("deserts", &[surface_level]);
        let width = i32::try_from(self.grid.width()).unwrap_or(i32::MAX);
        let wanted = self.random.int(3..=6) as usize;
        let mut deserts = Vec::with_capacity(wanted);
        let mut attempts = 0;

        while deserts.len() < wanted {
            if attempts == MAX_DESERT_ATTEMPTS {
                tracing::warn!(
                    placed = deserts.len(),
                    wanted,
                    width,
                    "Desert placement gave up; no room outside margins and spawn area"
                );
                break;
            }
            attempts += 1;

            let start = self.random.int(0..width);
            if !desert_start_allowed(start, width) {
                continue;
            }
            let desert = Desert {
                start,
                size: self.random.int(40..140),
            };

            let mut written = 0;
            for x in desert.start..(desert.start + desert.size).min(width) {
                let Some(&surface) = surface_level.get(x as usize) else {
                    continue;
                };
                let surface = i64::from(surface);
                let depth = i64::from(desert.depth_at(x));
                written += self
                    .grid
                    .fill_column(x as usize, surface, surface + depth, Tile::Sand);
            }
            tracing::debug!(start = desert.start, size = desert.size, written, "Desert placed");
            deserts.push(desert);
        }
        deserts
    }

    /// Scatter sand pockets across every column in rows `[start, end + 40)`.
    ///
    /// A cell turns to Sand when the field at `(x * 1.6, y * 1.6)` exceeds 0.85.
    /// Within five rows of either band edge the sample is reduced by up to 1/6
    /// so pockets thin out instead of ending in a straight line.
    pub fn generate_sand_piles(&mut self, start: i32, end: i32) {
        let top = i64::from(start);
        let bottom = i64::from(end) + i64::from(SAND_PILE_EXTENSION);
        let rows = self.grid.row_span(top, bottom);
        let field = self.random.field();

        let written = self.grid.rewrite_rows(rows, self.parallel, |x, y, _| {
            let mut noise = field.sample(x as f64 * SAND_PILE_SCALE, y as f64 * SAND_PILE_SCALE);
            let y = y as i64;
            if y - top <= SAND_PILE_FADE_ROWS {
                noise -= (SAND_PILE_FADE_ROWS - (y - top)) as f64 / 30.0;
            } else if bottom - y <= SAND_PILE_FADE_ROWS {
                noise -= (SAND_PILE_FADE_ROWS + 1 - (bottom - y)) as f64 / 30.0;
            }
            (noise > SAND_PILE_CUTOFF).then_some(Tile::Sand)
        });
        tracing::debug!(start, end = bottom, written, "Sand piles generated");
    }
}
