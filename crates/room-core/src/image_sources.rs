//! Image-source enumeration for a rectangular room.
//!
//! Mirroring the source across the walls yields a lattice of virtual
//! sources; each one stands in for a specular reflection path. Per axis,
//! the mirrored coordinates have the closed form `2nL ± s`, so the full
//! set is the Cartesian combination of three independent axis expansions,
//! pruned by the combined reflection order.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use crate::error::ValidationError;
use crate::room::{AbsorptionConvention, Axis, Point3D, RoomModel};

/// A virtual source obtained by mirror-reflecting the real source across
/// room boundaries.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageSource {
    /// Lattice index (nx, ny, nz) of the mirror cell.
    pub index: [i32; 3],
    /// Parity per axis: 0 keeps the source coordinate, 1 mirrors it.
    pub parity: [u8; 3],
    /// Mirrored position. Lies outside the physical room for any order > 0;
    /// that is expected.
    pub position: Point3D,
    /// Total number of wall reflections this image represents.
    pub order: u32,
    /// Amplitude attenuation per band: the product of wall reflection
    /// coefficients picked up along the path.
    pub attenuation: Vec<f64>,
}

/// One axis's contribution to an image source.
struct AxisImage {
    n: i32,
    parity: u8,
    coordinate: f64,
    order: u32,
}

/// Enumerates every image source with combined reflection order ≤ `max_order`
/// for one source position inside `room`.
///
/// Per axis with room length `L` and source coordinate `s`, lattice index
/// `n` and parity `p` give coordinate `2nL + s` (p = 0, axis order `2|n|`)
/// or `2nL − s` (p = 1, axis order `2|n| + 1`). The combined order is the
/// sum over axes; combinations above `max_order` are pruned. `max_order = 0`
/// yields exactly the direct path with unit attenuation in every band.
pub fn generate_image_sources(
    room: &RoomModel,
    source: Point3D,
    max_order: u32,
    convention: AbsorptionConvention,
) -> Result<Vec<ImageSource>, ValidationError> {
    if !room.contains(source) {
        return Err(ValidationError::PositionOutsideRoom {
            role: "source",
            position: source,
        });
    }

    let num_bands = room.bands().len();

    // Reflection coefficient per axis per band.
    let mut beta = [Vec::new(), Vec::new(), Vec::new()];
    for axis in Axis::ALL {
        beta[axis.index()] = (0..num_bands)
            .map(|band| room.reflection_coefficient(axis, band, convention))
            .collect();
    }

    // Independent expansion per axis, capped at the combined-order bound.
    let mut per_axis: [Vec<AxisImage>; 3] = [Vec::new(), Vec::new(), Vec::new()];
    for axis in Axis::ALL {
        let length = room.dimension(axis);
        let s = source.coordinate(axis);
        let cap = max_order as i32;
        for n in -cap..=cap {
            for parity in 0..=1u8 {
                let order = 2 * n.unsigned_abs() + parity as u32;
                if order > max_order {
                    continue;
                }
                let coordinate = if parity == 0 {
                    2.0 * n as f64 * length + s
                } else {
                    2.0 * n as f64 * length - s
                };
                per_axis[axis.index()].push(AxisImage {
                    n,
                    parity,
                    coordinate,
                    order,
                });
            }
        }
    }

    let mut images = Vec::new();
    for ix in &per_axis[0] {
        for iy in &per_axis[1] {
            for iz in &per_axis[2] {
                let order = ix.order + iy.order + iz.order;
                if order > max_order {
                    continue;
                }
                let attenuation = (0..num_bands)
                    .map(|band| {
                        beta[0][band].powi(ix.order as i32)
                            * beta[1][band].powi(iy.order as i32)
                            * beta[2][band].powi(iz.order as i32)
                    })
                    .collect();
                images.push(ImageSource {
                    index: [ix.n, iy.n, iz.n],
                    parity: [ix.parity, iy.parity, iz.parity],
                    position: Point3D::new(ix.coordinate, iy.coordinate, iz.coordinate),
                    order,
                    attenuation,
                });
            }
        }
    }

    log::debug!(
        "generated {} image sources up to order {max_order}",
        images.len()
    );
    Ok(images)
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    room: RoomModel,
    source: [u64; 3],
    max_order: u32,
    convention: AbsorptionConvention,
}

/// Explicit memoization table for repeated image-source generation.
///
/// The generator itself is a pure function with no hidden state; callers
/// that sweep receivers over a fixed (room, source, order) triple own one
/// of these instead.
#[derive(Debug, Default)]
pub struct ImageSourceCache {
    entries: HashMap<CacheKey, Vec<ImageSource>>,
}

impl ImageSourceCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of cached (room, source, order, convention) combinations.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the cached image-source set for the key, generating it on
    /// first use.
    pub fn get_or_generate(
        &mut self,
        room: &RoomModel,
        source: Point3D,
        max_order: u32,
        convention: AbsorptionConvention,
    ) -> Result<&[ImageSource], ValidationError> {
        let key = CacheKey {
            room: room.clone(),
            source: source.bits(),
            max_order,
            convention,
        };
        match self.entries.entry(key) {
            Entry::Occupied(entry) => Ok(entry.into_mut().as_slice()),
            Entry::Vacant(entry) => {
                let images = generate_image_sources(room, source, max_order, convention)?;
                Ok(entry.insert(images).as_slice())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bands::BandSet;

    fn cube(absorption: f64) -> RoomModel {
        RoomModel::uniform([6.0, 6.0, 3.0], BandSet::low_mid_high(), absorption).unwrap()
    }

    #[test]
    fn test_order_zero_is_direct_path_only() {
        let room = cube(0.3);
        let source = Point3D::new(3.0, 3.0, 1.5);
        let images =
            generate_image_sources(&room, source, 0, AbsorptionConvention::Energy).unwrap();

        assert_eq!(images.len(), 1);
        let direct = &images[0];
        assert_eq!(direct.order, 0);
        assert_eq!(direct.index, [0, 0, 0]);
        assert_eq!(direct.parity, [0, 0, 0]);
        assert_eq!(direct.position, source);
        assert!(direct.attenuation.iter().all(|&a| a == 1.0));
    }

    #[test]
    fn test_source_outside_room_rejected() {
        let room = cube(0.3);
        let result = generate_image_sources(
            &room,
            Point3D::new(7.0, 3.0, 1.5),
            2,
            AbsorptionConvention::Energy,
        );
        assert!(matches!(
            result,
            Err(ValidationError::PositionOutsideRoom { role: "source", .. })
        ));
    }

    #[test]
    fn test_combined_order_is_capped() {
        let room = cube(0.3);
        let images = generate_image_sources(
            &room,
            Point3D::new(3.0, 3.0, 1.5),
            2,
            AbsorptionConvention::Energy,
        )
        .unwrap();

        assert!(images.iter().all(|i| i.order <= 2));
        assert!(images.iter().any(|i| i.order == 0));
        assert!(images.iter().any(|i| i.order == 1));
        assert!(images.iter().any(|i| i.order == 2));

        // Per axis: order 0 (n=0,p=0), order 1 (n=0,p=1), order 2 (n=±1,p=0).
        // Combinations with a combined order ≤ 2: 1 direct + 3 single
        // reflections + 3 double reflections across two axes + 6 double
        // reflections on one axis.
        assert_eq!(images.len(), 13);
    }

    #[test]
    fn test_image_positions_are_distinct() {
        let room = cube(0.3);
        let images = generate_image_sources(
            &room,
            Point3D::new(2.0, 1.0, 1.0),
            3,
            AbsorptionConvention::Energy,
        )
        .unwrap();

        for (i, a) in images.iter().enumerate() {
            for b in images.iter().skip(i + 1) {
                assert!(
                    a.position.distance_to(b.position) > 1e-9,
                    "duplicate image position {} for indices {:?}/{:?} and {:?}/{:?}",
                    a.position,
                    a.index,
                    a.parity,
                    b.index,
                    b.parity
                );
            }
        }
    }

    #[test]
    fn test_single_reflection_coordinates() {
        let room = cube(0.3);
        let source = Point3D::new(2.0, 1.0, 1.0);
        let images =
            generate_image_sources(&room, source, 1, AbsorptionConvention::Energy).unwrap();

        // Order 1 on the x axis mirrors the x coordinate across the near wall.
        let x_mirror = images
            .iter()
            .find(|i| i.parity == [1, 0, 0])
            .expect("x mirror image missing");
        assert_eq!(x_mirror.order, 1);
        assert!((x_mirror.position.x - (-2.0)).abs() < 1e-12);
        assert!((x_mirror.position.y - 1.0).abs() < 1e-12);
        assert!((x_mirror.position.z - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_attenuation_is_beta_to_the_order_for_uniform_rooms() {
        let absorption = 0.3;
        let room = cube(absorption);
        let beta = (1.0f64 - absorption).sqrt();
        let images = generate_image_sources(
            &room,
            Point3D::new(3.0, 3.0, 1.5),
            3,
            AbsorptionConvention::Energy,
        )
        .unwrap();

        for image in &images {
            let expected = beta.powi(image.order as i32);
            for &a in &image.attenuation {
                assert!(
                    (a - expected).abs() < 1e-12,
                    "order {} attenuation {a}, expected {expected}",
                    image.order
                );
            }
        }
    }

    #[test]
    fn test_zero_absorption_never_attenuates() {
        let room = cube(0.0);
        let images = generate_image_sources(
            &room,
            Point3D::new(3.0, 3.0, 1.5),
            4,
            AbsorptionConvention::Energy,
        )
        .unwrap();

        for image in &images {
            assert!(image.attenuation.iter().all(|&a| a == 1.0));
        }
    }

    #[test]
    fn test_amplitude_convention_attenuates_more() {
        let room = cube(0.3);
        let source = Point3D::new(3.0, 3.0, 1.5);
        let energy =
            generate_image_sources(&room, source, 2, AbsorptionConvention::Energy).unwrap();
        let amplitude =
            generate_image_sources(&room, source, 2, AbsorptionConvention::Amplitude).unwrap();

        for (e, a) in energy.iter().zip(&amplitude) {
            assert_eq!(e.position, a.position);
            if e.order > 0 {
                assert!(a.attenuation[0] < e.attenuation[0]);
            }
        }
    }

    #[test]
    fn test_cache_reuses_and_distinguishes_keys() {
        let room = cube(0.3);
        let source = Point3D::new(3.0, 3.0, 1.5);
        let mut cache = ImageSourceCache::new();

        let first = cache
            .get_or_generate(&room, source, 2, AbsorptionConvention::Energy)
            .unwrap()
            .to_vec();
        assert_eq!(cache.len(), 1);

        // Same key: no new entry, identical value.
        let again = cache
            .get_or_generate(&room, source, 2, AbsorptionConvention::Energy)
            .unwrap()
            .to_vec();
        assert_eq!(cache.len(), 1);
        assert_eq!(first, again);

        // Any component change is a new key.
        cache
            .get_or_generate(&room, source, 3, AbsorptionConvention::Energy)
            .unwrap();
        assert_eq!(cache.len(), 2);
        cache
            .get_or_generate(&room, source, 2, AbsorptionConvention::Amplitude)
            .unwrap();
        assert_eq!(cache.len(), 3);
        let other_room = cube(0.4);
        cache
            .get_or_generate(&other_room, source, 2, AbsorptionConvention::Energy)
            .unwrap();
        assert_eq!(cache.len(), 4);
    }
}
