//! Console report and plot-ready JSON export.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde_json::json;

use room_core::frequency_response::FrequencyResponse;
use room_core::room::{Point3D, RoomModel};
use room_core::SimResult;

/// One simulated (source, receiver) pair with its results.
pub struct PairResult {
    pub source: Point3D,
    pub receiver: Point3D,
    pub result: SimResult,
    pub spectrum: FrequencyResponse,
}

/// Prints the per-band reverberation table for one pair.
pub fn print_pair_table(room: &RoomModel, pair: &PairResult) {
    println!(
        "  source {} -> receiver {}  ({} image sources)",
        pair.source, pair.receiver, pair.result.num_image_sources
    );
    println!("  {:>8} {:>12} {:>12}", "Band", "RT60 (s)", "Sabine (s)");
    println!("  {:-<34}", "");
    for (band, label) in room.bands().labels().enumerate() {
        let measured = format_seconds(pair.result.decay[band].rt60);
        let predicted = format_seconds(pair.result.sabine_rt60[band]);
        println!("  {label:>8} {measured:>12} {predicted:>12}");
    }
    println!();
}

fn format_seconds(value: Option<f64>) -> String {
    value
        .map(|v| format!("{v:.3}"))
        .unwrap_or_else(|| "---".to_string())
}

/// Writes every pair's results as pretty JSON for external plotting.
pub fn write_results_json(
    path: &Path,
    name: &str,
    room: &RoomModel,
    pairs: &[PairResult],
) -> Result<()> {
    let bands: Vec<&str> = room.bands().labels().collect();

    let pair_entries: Vec<_> = pairs
        .iter()
        .map(|pair| {
            let ir = &pair.result.impulse_response;
            json!({
                "source": [pair.source.x, pair.source.y, pair.source.z],
                "receiver": [pair.receiver.x, pair.receiver.y, pair.receiver.z],
                "num_image_sources": pair.result.num_image_sources,
                "impulse_response": (0..ir.num_bands())
                    .map(|band| ir.band(band).to_vec())
                    .collect::<Vec<_>>(),
                "energy_decay_db": pair.result.decay.iter()
                    .map(|analysis| finite_or_null(analysis.edc.values_db()))
                    .collect::<Vec<_>>(),
                "rt60": pair.result.decay.iter()
                    .map(|analysis| analysis.rt60)
                    .collect::<Vec<_>>(),
                "spectrum": {
                    "frequencies": pair.spectrum.frequencies,
                    "magnitude_db": pair.spectrum.magnitude_db.iter()
                        .map(|band| finite_or_null(band))
                        .collect::<Vec<_>>(),
                },
            })
        })
        .collect();

    let output = json!({
        "name": name,
        "room": {
            "dimensions": room.dimensions(),
            "volume": room.volume(),
            "bands": bands,
        },
        "sabine_rt60": pairs.first().map(|p| p.result.sabine_rt60.clone()),
        "sample_rate": pairs.first().map(|p| p.result.impulse_response.sample_rate()),
        "pairs": pair_entries,
    });

    fs::write(path, serde_json::to_string_pretty(&output)?)
        .with_context(|| format!("failed to write results to {}", path.display()))?;
    Ok(())
}

/// JSON has no −∞; sentinel values become null.
fn finite_or_null(values: &[f64]) -> Vec<Option<f64>> {
    values
        .iter()
        .map(|&v| if v.is_finite() { Some(v) } else { None })
        .collect()
}
