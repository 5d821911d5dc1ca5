//! Room-description files.
//!
//! A room description is a JSON document carrying the room geometry, the
//! absorption table, the source and receiver positions, and the reflection
//! order, e.g.:
//!
//! ```json
//! {
//!   "name": "Empty room",
//!   "room_dims": [5.0, 4.0, 2.5],
//!   "source_positions": [[2.5, 1.0, 1.2]],
//!   "receiver_positions": [[2.5, 3.0, 1.2]],
//!   "abs_coeff": {
//!     "low": [0.05, 0.05, 0.03],
//!     "mid": [0.04, 0.04, 0.03],
//!     "high": [0.03, 0.03, 0.02]
//!   },
//!   "max_order": 8
//! }
//! ```
//!
//! Each `abs_coeff` row holds either 3 coefficients (one per axis: x walls,
//! y walls, floor/ceiling) or 6 in the legacy per-wall order (floor,
//! ceiling, front, back, left, right), in which case wall pairs are
//! averaged down to the per-axis form.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use room_core::bands::BandSet;
use room_core::room::{AbsorptionConvention, Point3D, RoomModel};
use room_core::SimConfig;

/// Per-band absorption rows as stored in the description file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AbsorptionSpec {
    pub low: Vec<f64>,
    pub mid: Vec<f64>,
    pub high: Vec<f64>,
}

/// One room-description file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomSpec {
    /// Display name; falls back to the file stem.
    #[serde(default)]
    pub name: Option<String>,
    /// Room dimensions (Lx, Ly, Lz) in metres.
    pub room_dims: [f64; 3],
    /// Source positions to simulate.
    pub source_positions: Vec<[f64; 3]>,
    /// Receiver positions to simulate.
    pub receiver_positions: Vec<[f64; 3]>,
    /// Absorption coefficients per band.
    pub abs_coeff: AbsorptionSpec,
    /// Maximum reflection order.
    pub max_order: u32,
    /// Output sample rate in Hz.
    #[serde(default = "default_sample_rate")]
    pub sample_rate: f64,
    /// Impulse-response window length in seconds.
    #[serde(default = "default_duration")]
    pub duration: f64,
    /// Ambient temperature in °C; sets the speed of sound when present.
    #[serde(default)]
    pub temperature: Option<f64>,
}

fn default_sample_rate() -> f64 {
    44100.0
}

fn default_duration() -> f64 {
    1.0
}

impl RoomSpec {
    /// Loads a room description from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read room description {}", path.display()))?;
        let spec: RoomSpec = serde_json::from_str(&text)
            .with_context(|| format!("failed to parse room description {}", path.display()))?;
        Ok(spec)
    }

    /// Converts the description into a validated core room model.
    pub fn to_room(&self) -> Result<RoomModel> {
        let bands = BandSet::low_mid_high();
        let rows = [
            per_axis_row("low", &self.abs_coeff.low)?,
            per_axis_row("mid", &self.abs_coeff.mid)?,
            per_axis_row("high", &self.abs_coeff.high)?,
        ];

        // The core table is indexed [axis][band]; the file is [band][axis].
        let absorption =
            [0usize, 1, 2].map(|axis| rows.iter().map(|row| row[axis]).collect::<Vec<f64>>());

        RoomModel::new(self.room_dims, bands, absorption)
            .context("invalid room description")
    }

    /// Simulation parameters for this room.
    pub fn sim_config(&self, convention: AbsorptionConvention) -> SimConfig {
        let speed_of_sound = self
            .temperature
            .map(room_core::constants::speed_of_sound)
            .unwrap_or(room_core::constants::DEFAULT_SPEED_OF_SOUND);
        SimConfig {
            max_order: self.max_order,
            sample_rate: self.sample_rate,
            window_samples: (self.duration * self.sample_rate).round() as usize,
            speed_of_sound,
            convention,
        }
    }

    /// All (source, receiver) pairs to simulate.
    pub fn pairs(&self) -> impl Iterator<Item = (Point3D, Point3D)> + '_ {
        self.source_positions.iter().flat_map(move |&s| {
            self.receiver_positions
                .iter()
                .map(move |&r| (point(s), point(r)))
        })
    }
}

fn point(p: [f64; 3]) -> Point3D {
    Point3D::new(p[0], p[1], p[2])
}

/// Collapses a file row to the per-axis triple (x walls, y walls, z walls).
fn per_axis_row(band: &str, row: &[f64]) -> Result<[f64; 3]> {
    match row.len() {
        3 => Ok([row[0], row[1], row[2]]),
        6 => {
            // Legacy per-wall order: floor, ceiling, front, back, left, right.
            log::warn!(
                "band '{band}': 6 per-wall coefficients supplied; averaging wall pairs to per-axis values"
            );
            Ok([
                (row[4] + row[5]) / 2.0,
                (row[2] + row[3]) / 2.0,
                (row[0] + row[1]) / 2.0,
            ])
        }
        n => bail!("band '{band}': expected 3 or 6 absorption coefficients, got {n}"),
    }
}
