use num_complex::Complex64;
use realfft::RealFftPlanner;

use crate::impulse_response::ImpulseResponse;

/// Magnitude spectra of a multi-band impulse response.
#[derive(Debug, Clone, PartialEq)]
pub struct FrequencyResponse {
    /// Frequency bins in Hz (length `fft_size/2 + 1`).
    pub frequencies: Vec<f64>,
    /// Magnitude in dB per band at each frequency bin. Zero-magnitude bins
    /// hold `f64::NEG_INFINITY`.
    pub magnitude_db: Vec<Vec<f64>>,
}

/// Computes the magnitude spectrum of every band of an impulse response
/// over `fft_size/2 + 1` bins from 0 Hz to Nyquist.
///
/// The impulse response is truncated or zero-padded to `fft_size` before
/// the forward real FFT.
pub fn magnitude_spectrum(ir: &ImpulseResponse, fft_size: usize) -> FrequencyResponse {
    assert!(fft_size >= 2, "fft_size must be at least 2");

    let mut planner = RealFftPlanner::<f64>::new();
    let fft = planner.plan_fft_forward(fft_size);

    let num_bins = fft_size / 2 + 1;
    let bin_width = ir.sample_rate() / fft_size as f64;
    let frequencies: Vec<f64> = (0..num_bins).map(|i| i as f64 * bin_width).collect();

    let mut magnitude_db = Vec::with_capacity(ir.num_bands());
    for band in 0..ir.num_bands() {
        let samples = ir.band(band);

        let mut input = fft.make_input_vec();
        let copy_len = samples.len().min(fft_size);
        input[..copy_len].copy_from_slice(&samples[..copy_len]);

        let mut output = fft.make_output_vec();
        fft.process(&mut input, &mut output).expect("FFT failed");

        let spectrum: Vec<Complex64> = output
            .iter()
            .map(|&c| Complex64::new(c.re, c.im))
            .collect();
        magnitude_db.push(
            spectrum
                .iter()
                .map(|c| {
                    let magnitude = c.norm();
                    if magnitude > 0.0 {
                        20.0 * magnitude.log10()
                    } else {
                        f64::NEG_INFINITY
                    }
                })
                .collect(),
        );
    }

    FrequencyResponse {
        frequencies,
        magnitude_db,
    }
}
