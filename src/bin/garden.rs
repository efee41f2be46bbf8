// src/bin/garden.rs
//! Garden viewer entry point.
//!
//! Usage: `garden [dataset.json]` — defaults to `garden.json` in the
//! working directory.

use std::path::PathBuf;

use anyhow::Context;
use showroom::garden::{load_dataset, GardenApp};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("garden.json"));

    let dataset = load_dataset(&path)
        .with_context(|| format!("could not load garden dataset from {}", path.display()))?;
    log::info!(
        "loaded {} points from {}",
        dataset.points.len(),
        path.display()
    );

    let app = pollster::block_on(GardenApp::new(dataset));
    app.run();
    Ok(())
}
