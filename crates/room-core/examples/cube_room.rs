//! Walkthrough of the full simulation pipeline on a single room.
//!
//! Builds a 6×6×3 m room with uniform absorption, synthesizes the impulse
//! response between one source/receiver pair, and prints the per-band
//! reverberation metrics.
//!
//! Run with:
//!   cargo run -p room-core --example cube_room

use room_core::bands::BandSet;
use room_core::room::{Point3D, RoomModel};
use room_core::{simulate, SimConfig};

fn main() {
    println!("=== Cube Room Walkthrough ===");

    // 1. Describe the room: geometry plus per-axis, per-band absorption.
    let room = RoomModel::uniform([6.0, 6.0, 3.0], BandSet::low_mid_high(), 0.3)
        .expect("room description is valid");
    println!(
        "Room: {:.1} x {:.1} x {:.1} m, volume {:.1} m3",
        room.dimensions()[0],
        room.dimensions()[1],
        room.dimensions()[2],
        room.volume()
    );

    // 2. Pick the source/receiver pair and the simulation parameters.
    let source = Point3D::new(3.0, 3.0, 1.5);
    let receiver = Point3D::new(4.0, 4.0, 1.5);
    let config = SimConfig::default();
    println!("Source: {source}, receiver: {receiver}");
    println!(
        "Max order {}, {} Hz, {:.2} s window",
        config.max_order,
        config.sample_rate,
        config.window_samples as f64 / config.sample_rate
    );

    // 3. Run the pipeline.
    println!("Simulating...");
    let result = simulate(&room, source, receiver, &config).expect("simulation succeeds");
    println!(
        "{} image sources, {} samples per band",
        result.num_image_sources,
        result.impulse_response.len()
    );
    println!();

    // 4. Print the per-band metrics.
    println!("{:>8} {:>12} {:>12}", "Band", "RT60 (s)", "Sabine (s)");
    println!("{:-<34}", "");
    for (band, label) in room.bands().labels().enumerate() {
        let measured = result.decay[band]
            .rt60
            .map(|v| format!("{v:.3}"))
            .unwrap_or_else(|| "---".to_string());
        let predicted = result.sabine_rt60[band]
            .map(|v| format!("{v:.3}"))
            .unwrap_or_else(|| "---".to_string());
        println!("{label:>8} {measured:>12} {predicted:>12}");
    }
    println!("Done.");
}
