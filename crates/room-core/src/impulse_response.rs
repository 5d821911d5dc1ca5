use crate::error::{DegenerateGeometryError, SimError, ValidationError};
use crate::image_sources::ImageSource;
use crate::room::Point3D;

/// Multi-band room impulse response sampled at a fixed rate.
///
/// Every band holds the same caller-fixed number of samples.
#[derive(Debug, Clone, PartialEq)]
pub struct ImpulseResponse {
    sample_rate: f64,
    bands: Vec<Vec<f64>>,
}

impl ImpulseResponse {
    /// Creates an impulse response from raw per-band sample vectors.
    pub fn new(sample_rate: f64, bands: Vec<Vec<f64>>) -> Self {
        Self { sample_rate, bands }
    }

    /// Sample rate in Hz.
    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    /// Number of frequency bands.
    pub fn num_bands(&self) -> usize {
        self.bands.len()
    }

    /// Window length in samples.
    pub fn len(&self) -> usize {
        self.bands.first().map_or(0, Vec::len)
    }

    /// Whether the window holds no samples.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Samples of one band.
    pub fn band(&self, band: usize) -> &[f64] {
        &self.bands[band]
    }

    /// Iterator over the band sample slices in band order.
    pub fn bands(&self) -> impl Iterator<Item = &[f64]> {
        self.bands.iter().map(Vec::as_slice)
    }

    /// Returns the time axis in seconds.
    pub fn time_axis(&self) -> Vec<f64> {
        (0..self.len()).map(|i| i as f64 / self.sample_rate).collect()
    }

    /// Total energy (sum of squared samples) in one band.
    pub fn band_energy(&self, band: usize) -> f64 {
        self.bands[band].iter().map(|&h| h * h).sum()
    }
}

/// Superposes an image-source set into one discrete-time impulse response
/// per band, observed at `receiver`.
///
/// Per image: distance `d` to the receiver, arrival delay `d / c`, arrival
/// amplitude `attenuation / d` (spherical spreading), accumulated at the
/// nearest sample index. Arrivals past the window are dropped silently.
/// A receiver exactly on an image position is a degenerate input and is
/// rejected, not divided through.
pub fn build_impulse_response(
    image_sources: &[ImageSource],
    receiver: Point3D,
    sample_rate: f64,
    window_samples: usize,
    speed_of_sound: f64,
) -> Result<ImpulseResponse, SimError> {
    if !(sample_rate > 0.0 && sample_rate.is_finite()) {
        return Err(ValidationError::InvalidSampleRate(sample_rate).into());
    }
    if !(speed_of_sound > 0.0 && speed_of_sound.is_finite()) {
        return Err(ValidationError::InvalidSpeedOfSound(speed_of_sound).into());
    }
    let num_bands = image_sources
        .first()
        .ok_or(ValidationError::EmptyImageSet)?
        .attenuation
        .len();

    let mut bands = vec![vec![0.0f64; window_samples]; num_bands];
    let mut dropped = 0usize;

    for image in image_sources {
        debug_assert_eq!(image.attenuation.len(), num_bands);

        let distance = image.position.distance_to(receiver);
        if distance == 0.0 {
            return Err(DegenerateGeometryError {
                position: image.position,
            }
            .into());
        }

        let delay = distance / speed_of_sound;
        let index = (delay * sample_rate).round() as usize;
        if index >= window_samples {
            dropped += 1;
            continue;
        }

        for (band, samples) in bands.iter_mut().enumerate() {
            samples[index] += image.attenuation[band] / distance;
        }
    }

    if dropped > 0 {
        log::debug!("{dropped} arrivals fell past the {window_samples}-sample window");
    }

    Ok(ImpulseResponse::new(sample_rate, bands))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bands::BandSet;
    use crate::image_sources::generate_image_sources;
    use crate::room::{AbsorptionConvention, RoomModel};

    fn cube(absorption: f64) -> RoomModel {
        RoomModel::uniform([6.0, 6.0, 3.0], BandSet::low_mid_high(), absorption).unwrap()
    }

    #[test]
    fn test_direct_path_lands_at_rounded_sample_index() {
        let room = cube(0.3);
        let source = Point3D::new(3.0, 3.0, 1.5);
        let receiver = Point3D::new(4.0, 4.0, 1.5);
        let images =
            generate_image_sources(&room, source, 0, AbsorptionConvention::Energy).unwrap();

        let ir = build_impulse_response(&images, receiver, 44100.0, 44100, 343.0).unwrap();

        let distance = source.distance_to(receiver);
        let expected_index = (distance / 343.0 * 44100.0).round() as usize;
        for band in 0..ir.num_bands() {
            let samples = ir.band(band);
            assert!((samples[expected_index] - 1.0 / distance).abs() < 1e-12);
            let nonzero = samples.iter().filter(|&&s| s != 0.0).count();
            assert_eq!(nonzero, 1, "direct path only");
        }
    }

    #[test]
    fn test_output_is_fresh_and_window_sized() {
        let room = cube(0.3);
        let images = generate_image_sources(
            &room,
            Point3D::new(3.0, 3.0, 1.5),
            2,
            AbsorptionConvention::Energy,
        )
        .unwrap();

        let ir = build_impulse_response(&images, Point3D::new(4.0, 4.0, 1.5), 8000.0, 512, 343.0)
            .unwrap();
        assert_eq!(ir.num_bands(), 3);
        assert_eq!(ir.len(), 512);
        assert!((ir.sample_rate() - 8000.0).abs() < 1e-12);
    }

    #[test]
    fn test_late_arrivals_are_dropped() {
        let room = cube(0.3);
        let images = generate_image_sources(
            &room,
            Point3D::new(3.0, 3.0, 1.5),
            2,
            AbsorptionConvention::Energy,
        )
        .unwrap();

        // A 10-sample window at 44.1 kHz covers under 8 cm of travel, so
        // every arrival (direct included) falls outside it.
        let ir = build_impulse_response(&images, Point3D::new(4.0, 4.0, 1.5), 44100.0, 10, 343.0)
            .unwrap();
        for band in 0..ir.num_bands() {
            assert!(ir.band(band).iter().all(|&s| s == 0.0));
        }
    }

    #[test]
    fn test_colliding_arrivals_sum() {
        // Two images symmetric about the receiver arrive in the same sample.
        let image = |x: f64| ImageSource {
            index: [0, 0, 0],
            parity: [0, 0, 0],
            position: Point3D::new(x, 0.0, 0.0),
            order: 0,
            attenuation: vec![1.0],
        };
        let images = vec![image(-2.0), image(2.0)];
        let ir =
            build_impulse_response(&images, Point3D::new(0.0, 0.0, 0.0), 1000.0, 100, 343.0)
                .unwrap();

        let index = (2.0 / 343.0 * 1000.0_f64).round() as usize;
        assert!((ir.band(0)[index] - 2.0 * (1.0 / 2.0)).abs() < 1e-12);
    }

    #[test]
    fn test_receiver_on_image_position_rejected() {
        let room = cube(0.3);
        let source = Point3D::new(3.0, 3.0, 1.5);
        let images =
            generate_image_sources(&room, source, 0, AbsorptionConvention::Energy).unwrap();

        let result = build_impulse_response(&images, source, 44100.0, 44100, 343.0);
        assert!(matches!(result, Err(SimError::DegenerateGeometry(_))));
    }

    #[test]
    fn test_invalid_rate_and_speed_rejected() {
        let images = vec![ImageSource {
            index: [0, 0, 0],
            parity: [0, 0, 0],
            position: Point3D::new(1.0, 0.0, 0.0),
            order: 0,
            attenuation: vec![1.0],
        }];
        let receiver = Point3D::new(0.0, 0.0, 0.0);

        assert!(matches!(
            build_impulse_response(&images, receiver, 0.0, 100, 343.0),
            Err(SimError::Validation(ValidationError::InvalidSampleRate(_)))
        ));
        assert!(matches!(
            build_impulse_response(&images, receiver, 44100.0, 100, -1.0),
            Err(SimError::Validation(ValidationError::InvalidSpeedOfSound(_)))
        ));
        assert!(matches!(
            build_impulse_response(&[], receiver, 44100.0, 100, 343.0),
            Err(SimError::Validation(ValidationError::EmptyImageSet))
        ));
    }

    #[test]
    fn test_band_energy_and_time_axis() {
        let ir = ImpulseResponse::new(1000.0, vec![vec![0.0, 3.0, 4.0]]);
        assert!((ir.band_energy(0) - 25.0).abs() < 1e-12);
        let t = ir.time_axis();
        assert_eq!(t.len(), 3);
        assert!((t[2] - 0.002).abs() < 1e-12);
    }
}
