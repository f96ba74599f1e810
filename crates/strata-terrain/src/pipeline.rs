//! Reference driver: runs every pass in the documented order with tunable parameters.

use serde::{Deserialize, Serialize};

use crate::desert::Desert;
use crate::generator::WorldGenerator;
use crate::grid::WorldSize;
use crate::world::World;

/// Parameters for one terrain boundary (surface, stone or ash level).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BoundaryParams {
    /// Lower bound of the baseline as a fraction of world height.
    pub min_fraction: f64,
    /// Upper bound of the baseline as a fraction of world height.
    pub max_fraction: f64,
    /// Horizontal noise scale passed to the terrain profile.
    pub scale: f64,
    /// Maximum deviation from the baseline, in rows.
    pub amplitude: f64,
}

impl Default for BoundaryParams {
    fn default() -> Self {
        Self {
            min_fraction: 0.22,
            max_fraction: 0.26,
            scale: 3.0,
            amplitude: 25.0,
        }
    }
}

/// Every driver-chosen parameter for a full generation run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PipelineParams {
    /// Grass line; top of the dirt layer.
    pub surface: BoundaryParams,
    /// Top of the stone layer.
    pub stone: BoundaryParams,
    /// Top of the ash layer.
    pub ash: BoundaryParams,
    /// Sand pile band start, as a fraction of world height.
    pub sand_pile_start: f64,
    /// Sand pile band end, as a fraction of world height (the pass adds 40 rows).
    pub sand_pile_end: f64,
    /// Rows between the stone line and the end of the clay lower band.
    pub clay_depth: i32,
}

impl Default for PipelineParams {
    fn default() -> Self {
        Self {
            surface: BoundaryParams::default(),
            stone: BoundaryParams {
                min_fraction: 0.4,
                max_fraction: 0.44,
                scale: 4.0,
                amplitude: 20.0,
            },
            ash: BoundaryParams {
                min_fraction: 0.85,
                max_fraction: 0.88,
                scale: 4.0,
                amplitude: 10.0,
            },
            sand_pile_start: 0.33,
            sand_pile_end: 0.38,
            clay_depth: 60,
        }
    }
}

/// Boundary arrays and placements produced while running the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineReport {
    pub surface_level: Vec<i32>,
    pub stone_level: Vec<i32>,
    pub ash_level: Vec<i32>,
    pub deserts: Vec<Desert>,
}

impl WorldGenerator {
    fn boundary(&mut self, params: &BoundaryParams) -> Vec<i32> {
        let base = self.generate_height(params.min_fraction, params.max_fraction);
        self.generate_terrain(base, params.scale, params.amplitude)
    }
}

/// Run every pass on `generator` in the documented order.
pub fn run_pipeline(generator: &mut WorldGenerator, params: &PipelineParams) -> PipelineReport {
    let height = generator.height() as f64;

    let surface_level = generator.boundary(&params.surface);
    let stone_level = generator.boundary(&params.stone);
    let ash_level = generator.boundary(&params.ash);

    generator.generate_layers(&surface_level, &stone_level, &ash_level);

    let deserts = generator.generate_deserts(&surface_level);
    generator.generate_sand_piles(
        (height * params.sand_pile_start) as i32,
        (height * params.sand_pile_end) as i32,
    );

    generator.generate_surface(&surface_level, &stone_level);
    generator.generate_underground(&stone_level, &ash_level);
    generator.generate_cavern(&stone_level, &ash_level);

    let clay_end: Vec<i32> = stone_level.iter().map(|s| s + params.clay_depth).collect();
    generator.generate_clay(&surface_level, &stone_level, &clay_end);

    tracing::info!(deserts = deserts.len(), "Generation pipeline complete");
    PipelineReport {
        surface_level,
        stone_level,
        ash_level,
        deserts,
    }
}

/// Build a world of `size` from `seed` with the reference pipeline.
pub fn generate_world(
    size: WorldSize,
    seed: u64,
    params: &PipelineParams,
    parallel: bool,
) -> World {
    let mut generator = WorldGenerator::new(size, seed);
    generator.set_parallel(parallel);
    run_pipeline(&mut generator, params);
    generator.finish()
}
