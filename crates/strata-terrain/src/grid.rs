//! Flat row-major tile storage and the world size table.
//!
//! Tiles live in one `Vec` indexed by `x + width * y`, with `y` increasing
//! downward. All writes go through bounds-checked accessors or whole-row
//! slices, so externally supplied coordinates can never index outside the grid.

use std::fmt;
use std::ops::Range;
use std::str::FromStr;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::tile::Tile;

/// World size class.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorldSize {
    #[default]
    Tiny,
    Small,
    Medium,
    Large,
}

impl WorldSize {
    /// Every size class, smallest first.
    pub const ALL: [WorldSize; 4] = [
        WorldSize::Tiny,
        WorldSize::Small,
        WorldSize::Medium,
        WorldSize::Large,
    ];

    /// `(width, height)` in tiles.
    pub const fn dimensions(self) -> (usize, usize) {
        match self {
            WorldSize::Tiny => (1280, 720),
            WorldSize::Small => (8400, 2400),
            WorldSize::Medium => (12800, 3600),
            WorldSize::Large => (16800, 4800),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            WorldSize::Tiny => "tiny",
            WorldSize::Small => "small",
            WorldSize::Medium => "medium",
            WorldSize::Large => "large",
        }
    }
}

impl fmt::Display for WorldSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unknown size name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown world size '{0}' (expected tiny, small, medium or large)")]
pub struct ParseWorldSizeError(pub String);

impl FromStr for WorldSize {
    type Err = ParseWorldSizeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        WorldSize::ALL
            .into_iter()
            .find(|size| size.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseWorldSizeError(s.to_string()))
    }
}

/// Dense `width * height` tile store.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TileGrid {
    width: usize,
    height: usize,
    tiles: Vec<Tile>,
}

impl TileGrid {
    /// Allocate an all-Air grid. Zero dimensions are raised to 1.
    pub fn new(width: usize, height: usize) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        Self {
            width,
            height,
            tiles: vec![Tile::Air; width * height],
        }
    }

    /// Allocate an all-Air grid sized from the size table.
    pub fn from_size(size: WorldSize) -> Self {
        let (width, height) = size.dimensions();
        Self::new(width, height)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Linear index of `(x, y)`, or `None` if out of bounds.
    #[inline]
    pub fn index(&self, x: usize, y: usize) -> Option<usize> {
        (x < self.width && y < self.height).then(|| x + self.width * y)
    }

    /// Returns the tile at `(x, y)`, or `None` if out of bounds.
    pub fn get(&self, x: usize, y: usize) -> Option<Tile> {
        self.index(x, y).map(|i| self.tiles[i])
    }

    /// Writes `tile` at `(x, y)`. Out-of-bounds writes are ignored and return `false`.
    pub fn set(&mut self, x: usize, y: usize, tile: Tile) -> bool {
        match self.index(x, y) {
            Some(i) => {
                self.tiles[i] = tile;
                true
            }
            None => false,
        }
    }

    /// Clamp the signed row range `[lo, hi)` to `[0, height)`.
    ///
    /// Inverted or fully out-of-range input yields an empty range.
    pub fn row_span(&self, lo: i64, hi: i64) -> Range<usize> {
        let height = self.height as i64;
        let lo = lo.clamp(0, height);
        let hi = hi.clamp(0, height);
        if hi <= lo {
            return 0..0;
        }
        lo as usize..hi as usize
    }

    /// Fill the clamped rows `[lo, hi)` of column `x` with `tile`.
    ///
    /// Returns the number of tiles written.
    pub fn fill_column(&mut self, x: usize, lo: i64, hi: i64, tile: Tile) -> usize {
        if x >= self.width {
            return 0;
        }
        let rows = self.row_span(lo, hi);
        let written = rows.len();
        for y in rows {
            self.tiles[x + self.width * y] = tile;
        }
        written
    }

    /// Apply `rule` to every cell of `rows`, writing whatever it returns.
    ///
    /// `rule(x, y, current)` must depend only on its arguments, so rows can be
    /// visited in any order. With `parallel` set the rows are split across the
    /// rayon pool; the result is identical either way. Returns the number of
    /// tiles written.
    pub fn rewrite_rows<F>(&mut self, rows: Range<usize>, parallel: bool, rule: F) -> usize
    where
        F: Fn(usize, usize, Tile) -> Option<Tile> + Sync,
    {
        let rows = rows.start.min(self.height)..rows.end.min(self.height);
        if rows.is_empty() {
            return 0;
        }
        let width = self.width;
        let first = rows.start;
        let band = &mut self.tiles[first * width..rows.end * width];

        let apply = |(offset, row): (usize, &mut [Tile])| -> usize {
            let y = first + offset;
            let mut written = 0;
            for (x, tile) in row.iter_mut().enumerate() {
                if let Some(next) = rule(x, y, *tile) {
                    *tile = next;
                    written += 1;
                }
            }
            written
        };

        if parallel {
            band.par_chunks_mut(width).enumerate().map(apply).sum()
        } else {
            band.chunks_mut(width).enumerate().map(apply).sum()
        }
    }

    /// Consume the grid, returning `(tiles, width, height)`.
    pub fn into_parts(self) -> (Vec<Tile>, usize, usize) {
        (self.tiles, self.width, self.height)
    }
}
