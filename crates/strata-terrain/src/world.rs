//! The finished, immutable world produced by [`WorldGenerator::finish`].
//!
//! [`WorldGenerator::finish`]: crate::WorldGenerator::finish

use thiserror::Error;

use crate::tile::Tile;

/// Errors raised when reassembling a world from raw parts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorldError {
    /// The tile count does not equal `width * height`.
    #[error("tile count {actual} does not match {width}x{height} world")]
    DimensionMismatch {
        width: usize,
        height: usize,
        actual: usize,
    },
}

/// Immutable row-major tile snapshot plus its dimensions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct World {
    tiles: Vec<Tile>,
    width: usize,
    height: usize,
}

impl World {
    pub(crate) fn new(tiles: Vec<Tile>, width: usize, height: usize) -> Self {
        debug_assert_eq!(tiles.len(), width * height);
        Self {
            tiles,
            width,
            height,
        }
    }

    /// Rebuild a world from parts previously taken with [`World::into_tiles`].
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::DimensionMismatch`] if `tiles.len() != width * height`.
    pub fn from_parts(tiles: Vec<Tile>, width: usize, height: usize) -> Result<Self, WorldError> {
        if width.checked_mul(height) != Some(tiles.len()) {
            return Err(WorldError::DimensionMismatch {
                width,
                height,
                actual: tiles.len(),
            });
        }
        Ok(Self::new(tiles, width, height))
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

    /// Returns the tile at `(x, y)`, or `None` if out of bounds.
    pub fn get(&self, x: usize, y: usize) -> Option<Tile> {
        if x < self.width && y < self.height {
            Some(self.tiles[x + self.width * y])
        } else {
            None
        }
    }

    /// Consume the world, handing the tile store to the caller.
    pub fn into_tiles(self) -> Vec<Tile> {
        self.tiles
    }

    /// Number of tiles of each material, in [`Tile::ALL`] order.
    pub fn histogram(&self) -> [(Tile, usize); 7] {
        let mut counts = [0usize; 7];
        for &tile in &self.tiles {
            counts[tile as usize] += 1;
        }
        Tile::ALL.map(|tile| (tile, counts[tile as usize]))
    }

    /// Platform-independent FNV-1a digest of the dimensions and every tile.
    ///
    /// Two runs with the same seed and pass sequence produce the same digest.
    pub fn digest(&self) -> u64 {
        const OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
        const PRIME: u64 = 0x0000_0100_0000_01b3;

        let mut hash = OFFSET_BASIS;
        let mut feed = |byte: u8| {
            hash ^= u64::from(byte);
            hash = hash.wrapping_mul(PRIME);
        };
        for byte in (self.width as u64)
            .to_le_bytes()
            .into_iter()
            .chain((self.height as u64).to_le_bytes())
        {
            feed(byte);
        }
        for &tile in &self.tiles {
            feed(tile as u8);
        }
        hash
    }
}
