//! Terrain shape passes: the per-column height profile and base material layers.

use crate::generator::WorldGenerator;
use crate::tile::Tile;

/// Half-width of the flat band around the center column.
const SPAWN_FLAT_RADIUS: f64 = 30.0;
/// Distance from the center at which terrain reaches full amplitude.
const SPAWN_RAMP_END: f64 = 60.0;

/// Amplitude multiplier for a column `distance` tiles from the center:
/// 0 inside the flat band, a linear ramp to 1, then 1.
pub fn spawn_ramp(distance: f64) -> f64 {
    if distance <= SPAWN_FLAT_RADIUS {
        0.0
    } else if distance <= SPAWN_RAMP_END {
        (distance - SPAWN_FLAT_RADIUS) / (SPAWN_RAMP_END - SPAWN_FLAT_RADIUS)
    } else {
        1.0
    }
}

impl WorldGenerator {
    /// Per-column heights around `base_height`.
    ///
    /// Each column sums three octaves at horizontal coordinates `x * scale`,
    /// `x * scale / 2` and `x * scale / 4`, weighted 1, 1/2 and 1/4. The vertical
    /// coordinate of every octave is `scale * draw` with a fresh stateful draw,
    /// so the result depends on how many draws preceded this call. The sum is
    /// scaled by `amplitude` and by [`spawn_ramp`] of the distance from the
    /// center column. Does not touch the grid.
    pub fn generate_terrain(&mut self, base_height: i32, scale: f64, amplitude: f64) -> Vec<i32> {
        let width = self.grid.width();
        let center = (width / 2) as i64;
        let mut heights = Vec::with_capacity(width);

        for x in 0..width {
            let fx = x as f64;
            let mut noise = 0.0;
            let mut divisor = 1.0;
            for _ in 0..3 {
                let offset = scale * f64::from(self.random.next_u32());
                noise += self.random.noise(fx * scale / divisor, offset) / divisor;
                divisor *= 2.0;
            }

            let distance = (x as i64 - center).abs() as f64;
            let offset = noise * spawn_ramp(distance) * amplitude;
            heights.push((f64::from(base_height) + offset) as i32);
        }

        tracing::debug!(base_height, scale, amplitude, "Terrain profile generated");
        heights
    }

    /// Lay down the base material bands for every column.
    ///
    /// Top to bottom: Air in `[0, dirt)`, Grass at `dirt`, Dirt in
    /// `(dirt, stone)`, Stone in `[stone, ash)`, Ash in `[ash, height)`. Bands
    /// are applied in that order, so a later band wins where malformed levels
    /// make them overlap. Columns missing from any array are left untouched.
    pub fn generate_layers(&mut self, dirt_level: &[i32], stone_level: &[i32], ash_level: &[i32]) {
        self.check_columns("layers", &[dirt_level, stone_level, ash_level]);
        let rows = 0..self.grid.height();

        let written = self.grid.rewrite_rows(rows, self.parallel, |x, y, _| {
            let dirt = i64::from(*dirt_level.get(x)?);
            let stone = i64::from(*stone_level.get(x)?);
            let ash = i64::from(*ash_level.get(x)?);
            let y = y as i64;

            if y >= ash {
                Some(Tile::Ash)
            } else if y >= stone {
                Some(Tile::Stone)
            } else if y > dirt && y < stone {
                Some(Tile::Dirt)
            } else if y == dirt {
                Some(Tile::Grass)
            } else if y < dirt {
                Some(Tile::Air)
            } else {
                None
            }
        });
        tracing::debug!(written, "Layers generated");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::WorldSize;
    use crate::random::MAX_OCTAVE_SUM;

    #[test]
    fn test_spawn_ramp() {
        assert_eq!(spawn_ramp(0.0), 0.0);
        assert_eq!(spawn_ramp(30.0), 0.0);
        assert_eq!(spawn_ramp(45.0), 0.5);
        assert_eq!(spawn_ramp(60.0), 1.0);
        assert_eq!(spawn_ramp(600.0), 1.0);
    }

    #[test]
    fn test_terrain_flat_band_is_exact() {
        let mut generator = WorldGenerator::new(WorldSize::Tiny, 42);
        let heights = generator.generate_terrain(100, 0.05, 10.0);
        assert_eq!(heights.len(), 1280);

        let center = 1280 / 2;
        for x in (center - 30)..=(center + 30) {
            assert_eq!(heights[x], 100, "Column {x} inside the spawn band must be flat");
        }
    }

    #[test]
    fn test_terrain_bounded_outside_band() {
        let amplitude = 10.0;
        let mut generator = WorldGenerator::new(WorldSize::Tiny, 7);
        let heights = generator.generate_terrain(100, 0.05, amplitude);

        let limit = (amplitude * MAX_OCTAVE_SUM) as i32 + 1;
        for (x, &h) in heights.iter().enumerate() {
            assert!(
                (h - 100).abs() <= limit,
                "Column {x} height {h} strays more than {limit} from base"
            );
        }
    }

    #[test]
    fn test_terrain_depends_on_draw_order() {
        let mut a = WorldGenerator::with_dimensions(400, 300, 3);
        let mut b = WorldGenerator::with_dimensions(400, 300, 3);
        b.random.next_u32();

        let ha = a.generate_terrain(100, 5.0, 40.0);
        let hb = b.generate_terrain(100, 5.0, 40.0);
        assert_ne!(ha, hb, "An extra draw beforehand should shift the profile");

        let mut c = WorldGenerator::with_dimensions(400, 300, 3);
        assert_eq!(ha, c.generate_terrain(100, 5.0, 40.0));
    }

    #[test]
    fn test_layers_structure() {
        let (width, height) = (64, 128);
        let mut generator = WorldGenerator::with_dimensions(width, height, 1);
        generator.generate_layers(&vec![5; width], &vec![50; width], &vec![100; width]);

        let grid = generator.grid();
        for x in 0..width {
            for y in 0..height {
                let expected = match y {
                    0..=4 => Tile::Air,
                    5 => Tile::Grass,
                    6..=49 => Tile::Dirt,
                    50..=99 => Tile::Stone,
                    _ => Tile::Ash,
                };
                assert_eq!(grid.get(x, y), Some(expected), "Wrong tile at ({x}, {y})");
            }
        }
    }

    #[test]
    fn test_layers_clamp_out_of_range_levels() {
        let (width, height) = (4, 20);
        let mut generator = WorldGenerator::with_dimensions(width, height, 1);
        generator.generate_layers(&[-3, 25, 5, 5], &[10, 30, 15, 2], &[15, 40, 500, 8]);

        let grid = generator.grid();
        assert_eq!(grid.get(0, 0), Some(Tile::Dirt), "Negative dirt level leaves no Air or Grass");
        assert_eq!(grid.get(0, 19), Some(Tile::Ash));
        assert!((0..height).all(|y| grid.get(1, y) == Some(Tile::Air)));
        assert_eq!(grid.get(2, 19), Some(Tile::Stone));

        // stone above dirt: no Dirt band, Stone overwrites from row 2.
        assert_eq!(grid.get(3, 1), Some(Tile::Air));
        assert_eq!(grid.get(3, 5), Some(Tile::Stone));
        assert!((0..height).all(|y| grid.get(3, y) != Some(Tile::Dirt)));
        assert_eq!(grid.get(3, 8), Some(Tile::Ash));
    }

    #[test]
    fn test_layers_skip_missing_columns() {
        let mut generator = WorldGenerator::with_dimensions(8, 16, 1);
        generator.generate_layers(&[2, 2], &[4, 4], &[8, 8]);
        let grid = generator.grid();
        assert_eq!(grid.get(1, 2), Some(Tile::Grass));
        assert!((0..16).all(|y| grid.get(5, y) == Some(Tile::Air)));
    }
}
