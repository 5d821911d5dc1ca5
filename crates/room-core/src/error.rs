//! Error types for the room acoustics engine.
//!
//! Validation errors are raised at the boundary of the stage that detects
//! them; numeric edge cases inside the decay analysis (silent response,
//! flat tail) are expected outcomes and surface as `None`/sentinel values
//! instead.

use thiserror::Error;

use crate::room::{Axis, Point3D};

/// Malformed room description or out-of-volume positions, detected at
/// construction or stage entry.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// A room dimension is zero, negative, or non-finite.
    #[error("room dimension along {axis} must be positive and finite, got {value}")]
    NonPositiveDimension {
        /// Axis whose length is invalid.
        axis: Axis,
        /// The offending length in metres.
        value: f64,
    },

    /// An absorption coefficient lies outside [0, 1).
    #[error("absorption coefficient for axis {axis}, band '{band}' must be in [0, 1), got {value}")]
    AbsorptionOutOfRange {
        /// Axis of the wall pair.
        axis: Axis,
        /// Label of the frequency band.
        band: String,
        /// The offending coefficient.
        value: f64,
    },

    /// An absorption row does not cover every band in the band set.
    #[error("absorption row for axis {axis} has {got} entries, band set has {expected}")]
    BandCountMismatch {
        /// Axis whose row is malformed.
        axis: Axis,
        /// Number of bands in the band set.
        expected: usize,
        /// Number of entries supplied.
        got: usize,
    },

    /// A band set was constructed with no bands.
    #[error("band set must contain at least one band")]
    EmptyBandSet,

    /// A source or receiver position lies on or outside the room boundary.
    #[error("{role} position {position} must lie strictly inside the room volume")]
    PositionOutsideRoom {
        /// Which endpoint was rejected ("source" or "receiver").
        role: &'static str,
        /// The offending position.
        position: Point3D,
    },

    /// Sample rate is zero, negative, or non-finite.
    #[error("sample rate must be positive and finite, got {0}")]
    InvalidSampleRate(f64),

    /// Speed of sound is zero, negative, or non-finite.
    #[error("speed of sound must be positive and finite, got {0}")]
    InvalidSpeedOfSound(f64),

    /// The impulse-response builder received no image sources.
    #[error("image source set is empty")]
    EmptyImageSet,
}

/// The receiver coincides exactly with an image-source position, so the
/// inverse-distance amplitude is undefined.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("receiver coincides with an image source at {position} (zero propagation distance)")]
pub struct DegenerateGeometryError {
    /// Position of the coinciding image source.
    pub position: Point3D,
}

/// Top-level error type returned by the simulation pipeline.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    DegenerateGeometry(#[from] DegenerateGeometryError),
}

/// Result type alias for engine operations.
pub type Result<T> = std::result::Result<T, SimError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_names_the_axis() {
        let err = ValidationError::NonPositiveDimension {
            axis: Axis::Y,
            value: -2.0,
        };
        let msg = err.to_string();
        assert!(msg.contains('y'), "message should name the axis: {msg}");
        assert!(msg.contains("-2"), "message should carry the value: {msg}");
    }

    #[test]
    fn test_sim_error_from_validation() {
        let err: SimError = ValidationError::EmptyImageSet.into();
        assert!(matches!(err, SimError::Validation(_)));
    }

    #[test]
    fn test_degenerate_geometry_reports_position() {
        let err = DegenerateGeometryError {
            position: Point3D::new(1.0, 2.0, 3.0),
        };
        assert!(err.to_string().contains("(1, 2, 3)"));
    }
}
