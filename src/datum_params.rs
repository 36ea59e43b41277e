//!
//! Handle datum parameters
//!
use crate::datums::DatumParamDefn;
use crate::errors::{Error, Result};
use crate::math::consts::SEC_TO_RAD;
use crate::nadgrids::NadGrids;

/// Datum parameters
///
/// Rotation terms of the 7 parameters variant are stored in radians,
/// the scale as the multiplier `1 + s_ppm * 1e-6`.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum DatumParams {
    ToWGS84_0,
    ToWGS84_3(f64, f64, f64),
    ToWGS84_7(f64, f64, f64, f64, f64, f64, f64),
    NadGrids(NadGrids),
    #[default]
    NoDatum,
}

impl DatumParams {
    /// Create parameters from a 'towgs84' like string.
    ///
    /// Rotations are expected in seconds of arc, the scale
    /// in parts per million.
    pub fn from_towgs84_str(towgs84: &str) -> Result<Self> {
        #[inline]
        fn parse(v: Option<&str>) -> Result<f64> {
            v.ok_or(Error::InvalidToWGS84String)?
                .trim()
                .parse::<f64>()
                .map_err(|_| Error::InvalidToWGS84String)
        }

        let mut i = towgs84.split(',');
        match towgs84.split(',').count() {
            3 => Ok(DatumParams::ToWGS84_3(
                parse(i.next())?,
                parse(i.next())?,
                parse(i.next())?,
            )
            .normalized()),
            7 => Ok(DatumParams::ToWGS84_7(
                parse(i.next())?,
                parse(i.next())?,
                parse(i.next())?,
                parse(i.next())? * SEC_TO_RAD,
                parse(i.next())? * SEC_TO_RAD,
                parse(i.next())? * SEC_TO_RAD,
                parse(i.next())? / 1_000_000.0 + 1.,
            )
            .normalized()),
            _ => Err(Error::InvalidToWGS84String),
        }
    }

    /// All-zero Helmert parameters collapse to the "no shift
    /// required" form so that WGS84 equivalent datums short-circuit
    /// the geocentric path.
    fn normalized(self) -> Self {
        match self {
            Self::ToWGS84_3(dx, dy, dz) if (dx, dy, dz) == (0., 0., 0.) => Self::ToWGS84_0,
            Self::ToWGS84_7(dx, dy, dz, rx, ry, rz, s)
                if (dx, dy, dz, rx, ry, rz) == (0., 0., 0., 0., 0., 0.) && s == 1. =>
            {
                Self::ToWGS84_0
            }
            other => other,
        }
    }

    /// Create parameters from a 'nadgrids' grid list.
    ///
    /// The `@null` grid means "no datum shift required" and maps
    /// to [`DatumParams::NoDatum`].
    pub fn from_nadgrid_str(nadgrids: &str) -> Result<Self> {
        match nadgrids.trim() {
            "@null" | "null" => Ok(Self::NoDatum),
            names => NadGrids::new_grid_transform(names).map(Self::NadGrids),
        }
    }
}

// Convert from datum parameters definition
impl TryFrom<&DatumParamDefn> for DatumParams {
    type Error = Error;

    fn try_from(defn: &DatumParamDefn) -> Result<Self> {
        match defn {
            DatumParamDefn::ToWGS84_0 => Ok(Self::ToWGS84_0),
            DatumParamDefn::ToWGS84_3(dx, dy, dz) => Ok(Self::ToWGS84_3(*dx, *dy, *dz)),
            DatumParamDefn::ToWGS84_7(dx, dy, dz, rx, ry, rz, s) => Ok(Self::ToWGS84_7(
                *dx,
                *dy,
                *dz,
                *rx * SEC_TO_RAD,
                *ry * SEC_TO_RAD,
                *rz * SEC_TO_RAD,
                *s / 1_000_000.0 + 1.,
            )),
            DatumParamDefn::NadGrids(s) => Self::from_nadgrid_str(s),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn datum_params_towgs84_3() {
        let p = DatumParams::from_towgs84_str("-168,-60,320").unwrap();
        assert_eq!(p, DatumParams::ToWGS84_3(-168., -60., 320.));
    }

    #[test]
    fn datum_params_towgs84_7() {
        let p = DatumParams::from_towgs84_str("598.1,73.7,418.2,0.202,0.045,-2.455,6.7").unwrap();
        match p {
            DatumParams::ToWGS84_7(dx, dy, dz, _, _, _, s) => {
                assert_eq!((dx, dy, dz), (598.1, 73.7, 418.2));
                assert_eq!(s, 6.7 / 1_000_000.0 + 1.);
            }
            _ => panic!("expected 7 parameters"),
        }
    }

    #[test]
    fn datum_params_all_zero_collapses() {
        assert_eq!(
            DatumParams::from_towgs84_str("0,0,0").unwrap(),
            DatumParams::ToWGS84_0
        );
        assert_eq!(
            DatumParams::from_towgs84_str("0,0,0,0,0,0,0").unwrap(),
            DatumParams::ToWGS84_0
        );
    }

    #[test]
    fn datum_params_invalid() {
        assert!(DatumParams::from_towgs84_str("1,2").is_err());
        assert!(DatumParams::from_towgs84_str("1,2,x").is_err());
    }

    #[test]
    fn datum_params_null_grid() {
        assert_eq!(
            DatumParams::from_nadgrid_str("@null").unwrap(),
            DatumParams::NoDatum
        );
    }
}
