//! Schroeder decay analysis: energy decay curve and RT60 estimation.

use crate::impulse_response::ImpulseResponse;

/// Energy decay curve in dB, normalized to 0 dB at sample 0.
///
/// Computed by Schroeder backward integration, so it is monotonically
/// non-increasing by construction. Once the remaining energy reaches
/// exactly zero the curve holds `f64::NEG_INFINITY` for the rest of the
/// tail; a fully silent response is all-sentinel.
#[derive(Debug, Clone, PartialEq)]
pub struct EnergyDecayCurve {
    sample_rate: f64,
    values_db: Vec<f64>,
}

impl EnergyDecayCurve {
    /// Sample rate of the underlying impulse response in Hz.
    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    /// Decay values in dB, one per impulse-response sample.
    pub fn values_db(&self) -> &[f64] {
        &self.values_db
    }

    pub fn len(&self) -> usize {
        self.values_db.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values_db.is_empty()
    }
}

/// Result of decay analysis for one band.
#[derive(Debug, Clone, PartialEq)]
pub struct DecayAnalysis {
    /// Schroeder energy decay curve.
    pub edc: EnergyDecayCurve,
    /// T20-extrapolated reverberation time in seconds. `None` when the
    /// decay never spans the −5 dB to −25 dB window ("RT60 unavailable").
    pub rt60: Option<f64>,
}

/// Analyzes one band's impulse response.
///
/// The EDC is `10·log10(E[k] / E[0])` with `E[k] = Σ_{j≥k} h[j]²`. The RT60
/// estimate fits an ordinary-least-squares line to the EDC between its first
/// crossings of −5 dB and −25 dB and extrapolates the slope to a 60 dB drop
/// (the standard T20 estimate, since full 60 dB decays rarely fit a
/// practical window).
pub fn analyze_decay(samples: &[f64], sample_rate: f64) -> DecayAnalysis {
    let edc = energy_decay_curve(samples, sample_rate);
    let rt60 = rt60_from_edc(&edc);
    DecayAnalysis { edc, rt60 }
}

/// Analyzes every band of an impulse response.
pub fn analyze_all(ir: &ImpulseResponse) -> Vec<DecayAnalysis> {
    ir.bands()
        .map(|band| analyze_decay(band, ir.sample_rate()))
        .collect()
}

/// Schroeder backward integration of squared samples, in dB re the total
/// energy.
pub fn energy_decay_curve(samples: &[f64], sample_rate: f64) -> EnergyDecayCurve {
    let mut energy: Vec<f64> = samples.iter().map(|&h| h * h).collect();
    let mut cumulative = 0.0;
    for e in energy.iter_mut().rev() {
        cumulative += *e;
        *e = cumulative;
    }

    let total = energy.first().copied().unwrap_or(0.0);
    let values_db = if total <= 0.0 {
        vec![f64::NEG_INFINITY; energy.len()]
    } else {
        energy
            .iter()
            .map(|&e| {
                if e <= 0.0 {
                    f64::NEG_INFINITY
                } else {
                    10.0 * (e / total).log10()
                }
            })
            .collect()
    };

    EnergyDecayCurve {
        sample_rate,
        values_db,
    }
}

/// T20 reverberation time from an energy decay curve.
///
/// Finds the first sample at or below −5 dB, then scans forward for the
/// first at or below −25 dB, fits a line against time over that span, and
/// extrapolates to −60 dB. A crossing must be attained by a finite value:
/// the −∞ sentinel tail marks the absence of measurable energy, not a
/// measured 25 dB decay, so a curve that jumps from above −25 dB straight
/// to silence reports `None`. A missing crossing or a non-negative slope
/// also yields `None`.
pub fn rt60_from_edc(edc: &EnergyDecayCurve) -> Option<f64> {
    let values = edc.values_db();
    let k5 = values.iter().position(|&v| v.is_finite() && v <= -5.0)?;
    let k25 = values
        .iter()
        .skip(k5)
        .position(|&v| v.is_finite() && v <= -25.0)
        .map(|offset| k5 + offset)?;
    if k25 <= k5 {
        return None;
    }

    // Monotonicity bounds every value in [k5, k25] between two finite
    // samples, so the regression never sees the sentinel.
    let dt = 1.0 / edc.sample_rate();
    let n = (k25 - k5 + 1) as f64;
    let mut sum_x = 0.0;
    let mut sum_y = 0.0;
    let mut sum_xy = 0.0;
    let mut sum_xx = 0.0;
    for (i, &y) in values.iter().enumerate().take(k25 + 1).skip(k5) {
        let x = i as f64 * dt;
        sum_x += x;
        sum_y += y;
        sum_xy += x * y;
        sum_xx += x * x;
    }

    let denominator = n * sum_xx - sum_x * sum_x;
    if denominator == 0.0 {
        return None;
    }
    let slope = (n * sum_xy - sum_x * sum_y) / denominator;
    if slope >= 0.0 || !slope.is_finite() {
        return None;
    }

    Some(-60.0 / slope)
}
