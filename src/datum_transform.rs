//!
//! Datum shift
//!
//! Three regimes, selected in this order: identical datums (identity),
//! grid shift (either side carries nadgrids), Helmert geocentric
//! transform through WGS84 as hub.
//!
use crate::datum_params::DatumParams;
use crate::ellps::Ellipsoid;
use crate::errors::Result;
use crate::geocent::{geocentric_to_geodetic, geodetic_to_geocentric};
use crate::transform::Direction;

use DatumParams::*;

const SRS_WGS84_SEMIMAJOR: f64 = 6378137.0;
const SRS_WGS84_SEMIMINOR: f64 = 6356752.314;
const SRS_WGS84_ES: f64 = 0.0066943799901413165;

/// Hold datum informations
#[derive(Debug, Clone, PartialEq)]
pub struct Datum {
    params: DatumParams,
    a: f64,
    b: f64,
    es: f64,
}

impl Datum {
    pub fn new(ellps: &Ellipsoid, params: DatumParams) -> Self {
        // Grid shifted coordinates are WGS84 based
        if matches!(params, NadGrids(_)) {
            Self {
                params,
                a: SRS_WGS84_SEMIMAJOR,
                b: SRS_WGS84_SEMIMINOR,
                es: SRS_WGS84_ES,
            }
        } else {
            Self {
                params,
                a: ellps.a,
                b: ellps.b,
                es: ellps.es,
            }
        }
    }

    /// Convert from geodetic coordinates to wgs84 geocentric
    pub fn towgs84(&self, x: f64, y: f64, z: f64) -> Result<(f64, f64, f64)> {
        match &self.params {
            ToWGS84_0 => geodetic_to_geocentric(x, y, z, self.a, self.es),
            ToWGS84_3(dx, dy, dz) => geodetic_to_geocentric(x, y, z, self.a, self.es)
                .map(|(x, y, z)| (x + dx, y + dy, z + dz)),
            ToWGS84_7(dx, dy, dz, rx, ry, rz, s) => {
                geodetic_to_geocentric(x, y, z, self.a, self.es).map(|(x, y, z)| {
                    (
                        dx + s * (x - rz * y + ry * z),
                        dy + s * (rz * x + y - rx * z),
                        dz + s * (-ry * x + rx * y + z),
                    )
                })
            }
            NadGrids(grids) => grids
                .apply_shift(Direction::Forward, x, y, z)
                .and_then(|(x, y, z)| geodetic_to_geocentric(x, y, z, self.a, self.es)),
            NoDatum => Ok((x, y, z)),
        }
    }

    /// Convert from wgs84 geocentric to geodetic coordinates
    pub fn fromwgs84(&self, x: f64, y: f64, z: f64) -> Result<(f64, f64, f64)> {
        match &self.params {
            ToWGS84_0 => geocentric_to_geodetic(x, y, z, self.a, self.es, self.b),
            ToWGS84_3(dx, dy, dz) => {
                geocentric_to_geodetic(x - dx, y - dy, z - dz, self.a, self.es, self.b)
            }
            ToWGS84_7(dx, dy, dz, rx, ry, rz, s) => {
                let (x, y, z) = ((x - dx) / s, (y - dy) / s, (z - dz) / s);
                geocentric_to_geodetic(
                    x + rz * y - ry * z,
                    -rz * x + y + rx * z,
                    ry * x - rx * y + z,
                    self.a,
                    self.es,
                    self.b,
                )
            }
            NadGrids(grids) => geocentric_to_geodetic(x, y, z, self.a, self.es, self.b)
                .and_then(|(x, y, z)| grids.apply_shift(Direction::Inverse, x, y, z)),
            NoDatum => Ok((x, y, z)),
        }
    }

    pub fn use_nadgrids(&self) -> bool {
        matches!(self.params, NadGrids(_))
    }

    pub fn no_datum(&self) -> bool {
        matches!(self.params, NoDatum)
    }

    /// Return true if the datums are identical in respect
    /// to datum transformation.
    pub fn is_identical_to(&self, other: &Self) -> bool {
        // the tolerance for es is to ensure that GRS80 and WGS84
        // are considered identical
        (self.use_nadgrids() && other.use_nadgrids() || self.params == other.params)
            && self.a == other.a
            && (self.es - other.es).abs() < 0.000000000050
    }

    /// Shift geodetic coordinates from `src` to `dst`
    /// through wgs84 geocentric space.
    pub fn transform(src: &Self, dst: &Self, x: f64, y: f64, z: f64) -> Result<(f64, f64, f64)> {
        #[cfg(test)]
        testing::SHIFT_COUNT.fetch_add(1, std::sync::atomic::Ordering::Relaxed);

        src.towgs84(x, y, z)
            .and_then(|(x, y, z)| dst.fromwgs84(x, y, z))
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! Shift counter observable from unit tests
    use std::sync::atomic::{AtomicUsize, Ordering};

    pub(crate) static SHIFT_COUNT: AtomicUsize = AtomicUsize::new(0);

    pub(crate) fn reset_shift_count() {
        SHIFT_COUNT.store(0, Ordering::Relaxed);
    }

    pub(crate) fn shift_count() -> usize {
        SHIFT_COUNT.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::proj::Proj;
    use approx::assert_abs_diff_eq;

    #[test]
    fn datum_wgs84_grs80_identical() {
        let p1 = Proj::from_proj_string("+proj=latlong +datum=WGS84").unwrap();
        let p2 = Proj::from_proj_string("+proj=latlong +ellps=GRS80 +towgs84=0,0,0").unwrap();

        assert!(p1.datum().is_identical_to(p2.datum()));
    }

    #[test]
    fn datum_helmert_roundtrip() {
        let osgb36 = Proj::from_proj_string("+proj=latlong +datum=OSGB36").unwrap();

        let (lam, phi) = (-2.0f64.to_radians(), 52.0f64.to_radians());
        let (x, y, z) = osgb36.datum().towgs84(lam, phi, 0.).unwrap();
        let (lam2, phi2, h) = osgb36.datum().fromwgs84(x, y, z).unwrap();

        // The linearized Bursa-Wolf rotations are not exactly
        // self-inverse, round trip error is O(r^2)
        assert_abs_diff_eq!(lam, lam2, epsilon = 1e-9);
        assert_abs_diff_eq!(phi, phi2, epsilon = 1e-9);
        assert_abs_diff_eq!(h, 0., epsilon = 1e-2);
    }
}
