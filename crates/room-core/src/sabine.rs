//! Statistical reverberation-time predictions from room geometry alone.
//!
//! These formulas predict RT60 without synthesizing an impulse response;
//! they serve as a cross-check on the Schroeder/T20 estimate.

use crate::constants::SABINE_COEFFICIENT;
use crate::room::{Axis, RoomModel};

/// Sabine RT60 prediction per band: `0.161 · V / A`, where `A` sums
/// `area × α` over all six walls. Bands with zero total absorption never
/// decay and report `None`.
pub fn sabine_rt60(room: &RoomModel) -> Vec<Option<f64>> {
    let volume = room.volume();
    (0..room.bands().len())
        .map(|band| {
            let total_absorption: f64 = Axis::ALL
                .iter()
                .map(|&axis| 2.0 * room.wall_area(axis) * room.absorption(axis, band))
                .sum();
            if total_absorption > 0.0 {
                Some(SABINE_COEFFICIENT * volume / total_absorption)
            } else {
                None
            }
        })
        .collect()
}

/// Eyring RT60 prediction per band: `0.161 · V / (−S · ln(1 − ᾱ))` with
/// `ᾱ` the area-weighted mean absorption. More accurate than Sabine for
/// strongly absorptive rooms.
pub fn eyring_rt60(room: &RoomModel) -> Vec<Option<f64>> {
    let volume = room.volume();
    let surface = room.surface_area();
    (0..room.bands().len())
        .map(|band| {
            let mean_absorption: f64 = Axis::ALL
                .iter()
                .map(|&axis| 2.0 * room.wall_area(axis) * room.absorption(axis, band))
                .sum::<f64>()
                / surface;
            if mean_absorption > 0.0 {
                Some(SABINE_COEFFICIENT * volume / (-surface * (1.0 - mean_absorption).ln()))
            } else {
                None
            }
        })
        .collect()
}
