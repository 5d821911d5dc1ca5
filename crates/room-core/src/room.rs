use std::fmt;
use std::hash::{Hash, Hasher};

use crate::bands::BandSet;
use crate::error::ValidationError;

/// A position in room coordinates (metres).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point3D {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3D {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Euclidean distance to another point.
    pub fn distance_to(&self, other: Point3D) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }

    /// Coordinate along the given axis.
    pub fn coordinate(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }

    /// Bit patterns of the coordinates, used as a hashable cache key.
    pub(crate) fn bits(&self) -> [u64; 3] {
        [self.x.to_bits(), self.y.to_bits(), self.z.to_bits()]
    }
}

impl fmt::Display for Point3D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// Room axes. Each axis carries one pair of parallel walls which share a
/// single absorption coefficient per band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Index of the axis in dimension/absorption arrays.
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Axis::X => "x",
            Axis::Y => "y",
            Axis::Z => "z",
        };
        f.write_str(label)
    }
}

/// How wall absorption coefficients convert to amplitude reflection
/// coefficients.
///
/// Room-description data is ambiguous on whether coefficients encode energy
/// absorption or amplitude reflection loss, so the convention is an explicit
/// parameter instead of a silent guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AbsorptionConvention {
    /// Coefficients are energy absorption: β = sqrt(1 − α).
    #[default]
    Energy,
    /// Coefficients are amplitude reflection losses applied directly:
    /// β = 1 − α.
    Amplitude,
}

impl AbsorptionConvention {
    /// Amplitude reflection coefficient for one wall crossing.
    pub fn reflection_coefficient(self, absorption: f64) -> f64 {
        match self {
            AbsorptionConvention::Energy => (1.0 - absorption).sqrt(),
            AbsorptionConvention::Amplitude => 1.0 - absorption,
        }
    }
}

/// Immutable description of a rectangular room: dimensions plus one
/// absorption coefficient per axis per frequency band.
///
/// Both walls perpendicular to an axis share that axis's coefficient, so the
/// six faces collapse to three rows. Validation rejects non-positive or
/// non-finite dimensions and coefficients outside [0, 1); a constructed
/// model therefore never holds NaN, which makes the bit-pattern `Eq`/`Hash`
/// below sound.
#[derive(Debug, Clone, PartialEq)]
pub struct RoomModel {
    dimensions: [f64; 3],
    bands: BandSet,
    absorption: [Vec<f64>; 3],
}

impl RoomModel {
    /// Validates and constructs a room model.
    ///
    /// `absorption[axis][band]` is the absorption coefficient of the wall
    /// pair perpendicular to `axis` in the given band.
    pub fn new(
        dimensions: [f64; 3],
        bands: BandSet,
        absorption: [Vec<f64>; 3],
    ) -> Result<Self, ValidationError> {
        for axis in Axis::ALL {
            let value = dimensions[axis.index()];
            if !(value > 0.0 && value.is_finite()) {
                return Err(ValidationError::NonPositiveDimension { axis, value });
            }

            let row = &absorption[axis.index()];
            if row.len() != bands.len() {
                return Err(ValidationError::BandCountMismatch {
                    axis,
                    expected: bands.len(),
                    got: row.len(),
                });
            }
            for (band, &value) in row.iter().enumerate() {
                if !(value >= 0.0 && value < 1.0) {
                    return Err(ValidationError::AbsorptionOutOfRange {
                        axis,
                        band: bands.label(band).to_string(),
                        value,
                    });
                }
            }
        }

        Ok(Self {
            dimensions,
            bands,
            absorption,
        })
    }

    /// Convenience constructor: the same coefficient on every axis and band.
    pub fn uniform(
        dimensions: [f64; 3],
        bands: BandSet,
        coefficient: f64,
    ) -> Result<Self, ValidationError> {
        let row = vec![coefficient; bands.len()];
        Self::new(dimensions, bands, [row.clone(), row.clone(), row])
    }

    /// Room dimensions (Lx, Ly, Lz) in metres.
    pub fn dimensions(&self) -> [f64; 3] {
        self.dimensions
    }

    /// Length along one axis.
    pub fn dimension(&self, axis: Axis) -> f64 {
        self.dimensions[axis.index()]
    }

    /// The band set this room's absorption table is defined over.
    pub fn bands(&self) -> &BandSet {
        &self.bands
    }

    /// Absorption coefficient of the wall pair perpendicular to `axis`.
    pub fn absorption(&self, axis: Axis, band: usize) -> f64 {
        self.absorption[axis.index()][band]
    }

    /// Amplitude reflection coefficient for one crossing of a wall
    /// perpendicular to `axis`, under the given convention.
    pub fn reflection_coefficient(
        &self,
        axis: Axis,
        band: usize,
        convention: AbsorptionConvention,
    ) -> f64 {
        convention.reflection_coefficient(self.absorption(axis, band))
    }

    /// Whether a point lies strictly inside the room volume.
    pub fn contains(&self, point: Point3D) -> bool {
        Axis::ALL.iter().all(|&axis| {
            let p = point.coordinate(axis);
            p > 0.0 && p < self.dimension(axis)
        })
    }

    /// Room volume in m³.
    pub fn volume(&self) -> f64 {
        self.dimensions[0] * self.dimensions[1] * self.dimensions[2]
    }

    /// Area of one wall perpendicular to `axis`, in m².
    pub fn wall_area(&self, axis: Axis) -> f64 {
        self.volume() / self.dimension(axis)
    }

    /// Total interior surface area in m².
    pub fn surface_area(&self) -> f64 {
        Axis::ALL.iter().map(|&axis| 2.0 * self.wall_area(axis)).sum()
    }
}

// Validation guarantees no NaN, so bitwise equality is total and the
// bit-pattern hash agrees with PartialEq.
impl Eq for RoomModel {}

impl Hash for RoomModel {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for &d in &self.dimensions {
            d.to_bits().hash(state);
        }
        self.bands.hash(state);
        for row in &self.absorption {
            for &a in row {
                a.to_bits().hash(state);
            }
        }
    }
}
