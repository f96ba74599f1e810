//! Deterministic 2D tile world generation: seeded noise, a flat tile grid, and
//! an ordered set of terrain, layering, and material passes.

mod desert;
mod generator;
mod grid;
mod material;
mod pipeline;
mod random;
mod terrain;
mod tile;
mod world;

pub use desert::{Desert, MAX_DESERT_ATTEMPTS, desert_start_allowed};
pub use generator::WorldGenerator;
pub use grid::{ParseWorldSizeError, TileGrid, WorldSize};
pub use material::{CLAY_HOSTS, SURFACE_STONE_HOSTS};
pub use pipeline::{BoundaryParams, PipelineParams, PipelineReport, generate_world, run_pipeline};
pub use random::{MAX_OCTAVE_SUM, NOISE_FREQUENCY, NoiseField, NoiseRandom};
pub use terrain::spawn_ramp;
pub use tile::Tile;
pub use world::{World, WorldError};
