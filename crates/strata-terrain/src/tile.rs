//! Tile materials stored in every grid cell.

use serde::{Deserialize, Serialize};

/// Material occupying a single grid cell.
///
/// Air is the default so a freshly allocated grid is empty space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Tile {
    #[default]
    Air = 0,
    Grass = 1,
    Dirt = 2,
    Stone = 3,
    Ash = 4,
    Sand = 5,
    Clay = 6,
}

impl Tile {
    /// Every tile variant in discriminant order.
    pub const ALL: [Tile; 7] = [
        Tile::Air,
        Tile::Grass,
        Tile::Dirt,
        Tile::Stone,
        Tile::Ash,
        Tile::Sand,
        Tile::Clay,
    ];

    /// Lowercase display name.
    pub fn name(self) -> &'static str {
        match self {
            Tile::Air => "air",
            Tile::Grass => "grass",
            Tile::Dirt => "dirt",
            Tile::Stone => "stone",
            Tile::Ash => "ash",
            Tile::Sand => "sand",
            Tile::Clay => "clay",
        }
    }

    /// Returns `true` if `self` is one of `set`.
    ///
    /// Guarded passes convert a tile only when its current material is in an
    /// explicit set.
    #[inline]
    pub fn is_any(self, set: &[Tile]) -> bool {
        set.contains(&self)
    }
}
