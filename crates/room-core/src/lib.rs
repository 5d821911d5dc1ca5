//! Image-source room acoustics engine.
//!
//! Models a rectangular room with rigid walls, mirrors the sound source
//! across the boundaries into a lattice of virtual image sources, and
//! superposes their arrivals into a per-frequency-band impulse response.
//! From that response it derives the Schroeder energy decay curve and an
//! RT60 reverberation-time estimate per band.

pub mod bands;
pub mod constants;
pub mod decay;
pub mod error;
pub mod frequency_response;
pub mod image_sources;
pub mod impulse_response;
pub mod room;
pub mod sabine;

use crate::decay::{analyze_all, DecayAnalysis};
use crate::error::{SimError, ValidationError};
use crate::image_sources::generate_image_sources;
use crate::impulse_response::{build_impulse_response, ImpulseResponse};
use crate::room::{AbsorptionConvention, Point3D, RoomModel};

// ---------------------------------------------------------------------------
// Shared interface types
// ---------------------------------------------------------------------------

/// Parameters controlling one source-to-receiver simulation run.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Maximum combined reflection order for image-source generation.
    pub max_order: u32,
    /// Output sample rate in Hz.
    pub sample_rate: f64,
    /// Impulse-response window length in samples.
    pub window_samples: usize,
    /// Speed of sound in m/s.
    pub speed_of_sound: f64,
    /// How absorption coefficients convert to reflection coefficients.
    pub convention: AbsorptionConvention,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            max_order: 8,
            sample_rate: 44100.0,
            window_samples: 44100, // 1 s
            speed_of_sound: constants::DEFAULT_SPEED_OF_SOUND,
            convention: AbsorptionConvention::Energy,
        }
    }
}

/// Results of a simulation run, consumed for reporting and plotting.
#[derive(Debug, Clone)]
pub struct SimResult {
    /// Per-band time-domain impulse response h(t).
    pub impulse_response: ImpulseResponse,
    /// Energy decay curve and RT60 estimate per band, in band order.
    pub decay: Vec<DecayAnalysis>,
    /// Sabine prediction per band, for cross-checking the measured value.
    pub sabine_rt60: Vec<Option<f64>>,
    /// Number of image sources that contributed to the response.
    pub num_image_sources: usize,
}

/// Runs the full pipeline for one (source, receiver) pair: validate the
/// endpoints, enumerate image sources, build the impulse response, analyze
/// every band's decay.
///
/// Every stage is a pure function of its inputs, so identical inputs give
/// bit-identical results.
pub fn simulate(
    room: &RoomModel,
    source: Point3D,
    receiver: Point3D,
    config: &SimConfig,
) -> Result<SimResult, SimError> {
    if !room.contains(receiver) {
        return Err(ValidationError::PositionOutsideRoom {
            role: "receiver",
            position: receiver,
        }
        .into());
    }

    let images = generate_image_sources(room, source, config.max_order, config.convention)?;
    let impulse_response = build_impulse_response(
        &images,
        receiver,
        config.sample_rate,
        config.window_samples,
        config.speed_of_sound,
    )?;
    let decay = analyze_all(&impulse_response);

    Ok(SimResult {
        impulse_response,
        decay,
        sabine_rt60: sabine::sabine_rt60(room),
        num_image_sources: images.len(),
    })
}
