//! Image-source room acoustics simulator.
//!
//! Loads JSON room descriptions, simulates every (source, receiver) pair,
//! prints the per-band reverberation tables, and writes plot-ready results
//! JSON next to them.

mod config;
mod report;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use room_core::frequency_response::magnitude_spectrum;
use room_core::room::AbsorptionConvention;
use room_core::simulate;

use config::RoomSpec;
use report::{print_pair_table, write_results_json, PairResult};

/// FFT size for the exported magnitude spectra.
const SPECTRUM_FFT_SIZE: usize = 4096;

#[derive(Parser, Debug)]
#[command(
    name = "room-cli",
    about = "Simulate room impulse responses and reverberation metrics from JSON room descriptions"
)]
struct Args {
    /// Room description files (JSON).
    #[arg(required = true)]
    rooms: Vec<PathBuf>,

    /// Directory for the results JSON files.
    #[arg(short, long, default_value = "results")]
    out_dir: PathBuf,

    /// Override the maximum reflection order from the description files.
    #[arg(long)]
    max_order: Option<u32>,

    /// Treat absorption coefficients as amplitude reflection losses
    /// instead of energy absorption.
    #[arg(long)]
    amplitude_convention: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("failed to create {}", args.out_dir.display()))?;

    let convention = if args.amplitude_convention {
        AbsorptionConvention::Amplitude
    } else {
        AbsorptionConvention::Energy
    };

    for path in &args.rooms {
        run_room(path, &args, convention)?;
    }
    Ok(())
}

fn run_room(path: &Path, args: &Args, convention: AbsorptionConvention) -> Result<()> {
    let spec = RoomSpec::load(path)?;
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "room".to_string());
    let name = spec.name.clone().unwrap_or_else(|| stem.clone());

    let room = spec.to_room()?;
    let mut sim_config = spec.sim_config(convention);
    if let Some(order) = args.max_order {
        sim_config.max_order = order;
    }

    println!("=== {name} ===");
    info!(
        "room {:?} m, max order {}, {} Hz, {} samples",
        room.dimensions(),
        sim_config.max_order,
        sim_config.sample_rate,
        sim_config.window_samples
    );

    let mut pairs = Vec::new();
    for (source, receiver) in spec.pairs() {
        let result = simulate(&room, source, receiver, &sim_config).with_context(|| {
            format!("simulation failed for source {source}, receiver {receiver}")
        })?;
        let spectrum = magnitude_spectrum(&result.impulse_response, SPECTRUM_FFT_SIZE);
        let pair = PairResult {
            source,
            receiver,
            result,
            spectrum,
        };
        print_pair_table(&room, &pair);
        pairs.push(pair);
    }

    let out_path = args.out_dir.join(format!("{stem}_results.json"));
    write_results_json(&out_path, &name, &room, &pairs)?;
    info!("results written to {}", out_path.display());
    Ok(())
}
