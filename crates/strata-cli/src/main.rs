//! Generates a world with the reference pipeline and prints a summary.
//!
//! Configuration is loaded from `config.ron` and can be overridden via CLI flags.
//! Run with `cargo run -p strata-cli -- --size small --seed 42`.

use std::time::Instant;

use clap::Parser;
use strata_config::{CliArgs, Config, default_config_dir};
use strata_terrain::{World, WorldGenerator, run_pipeline};
use tracing::info;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();

    let config_dir = match args.config.clone() {
        Some(dir) => dir,
        None => default_config_dir()?,
    };

    let mut config = Config::load_or_create(&config_dir).unwrap_or_else(|e| {
        eprintln!("Failed to load config: {e}, using defaults");
        Config::default()
    });
    config.apply_cli_overrides(&args);

    let log_dir = config_dir.join("logs");
    strata_log::init_logging(Some(&log_dir), cfg!(debug_assertions), Some(&config));

    let world = generate(&config);
    print_summary(&world);
    Ok(())
}

fn generate(config: &Config) -> World {
    let started = Instant::now();
    let mut generator = WorldGenerator::new(config.world.size, config.world.seed);
    generator.set_parallel(config.world.parallel);

    let report = run_pipeline(&mut generator, &config.pipeline);
    for desert in &report.deserts {
        info!(start = desert.start, size = desert.size, "Desert");
    }

    let world = generator.finish();
    info!(
        size = %config.world.size,
        seed = config.world.seed,
        parallel = config.world.parallel,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "World generated"
    );
    world
}

fn print_summary(world: &World) {
    let total = world.tiles().len() as f64;
    println!("world {}x{}", world.width(), world.height());
    for (tile, count) in world.histogram() {
        println!(
            "  {:<6} {:>10} ({:5.2}%)",
            tile.name(),
            count,
            count as f64 * 100.0 / total
        );
    }
    println!("digest {:016x}", world.digest());
}
