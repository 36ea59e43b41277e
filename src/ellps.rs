//!
//! Derived values for ellipsoids
//!
//! A complete ellipsoid definition comprises a size (primary) and a shape
//! (secondary) parameter.
//!
//! Size parameters supported are:
//!     R, defining the radius of a spherical planet
//!     a, defining the semimajor axis of an ellipsoidal planet
//!
//! Shape parameters supported are:
//!     rf, the reverse flattening of the ellipsoid
//!     f,  the flattening of the ellipsoid
//!     es, the eccentricity squared
//!     e,  the eccentricity
//!     b,  the semiminor axis
//!
//! The ellps=xxx parameter provides both size and shape for a number of
//! built in ellipsoid definitions.
//!
//! The ellipsoid definition may be augmented with a spherification flag,
//! turning the ellipsoid into a sphere with features defined by the
//! ellipsoid:
//!
//!     R_A, a sphere with the same surface area as the ellipsoid
//!     R_V, a sphere with the same volume as the ellipsoid
//!     R_a, a sphere with R = (a + b)/2   (arithmetic mean)
//!     R_g, a sphere with R = sqrt(a*b)   (geometric mean)
//!     R_h, a sphere with R = 2*a*b/(a+b) (harmonic mean)
//!
use crate::ellipsoids::{EllipsoidDefn, FlatteningParam};
use crate::errors::{Error, Result};
use crate::math::consts::EPS_12;
use crate::parameters::ParamList;

// series coefficients for calculating ellipsoid-equivalent spheres
const SIXTH: f64 = 1. / 6.;
const RA4: f64 = 17. / 360.;
const RA6: f64 = 67. / 3024.;
const RV4: f64 = 5. / 72.;
const RV6: f64 = 55. / 1296.;

#[derive(Debug, Clone, PartialEq)]
pub struct Ellipsoid {
    /// Semi major axis
    pub a: f64,
    /// Semi minor axis
    pub b: f64,
    /// 1./a
    pub ra: f64,
    /// First eccentricity
    pub e: f64,
    /// First eccentricity squared
    pub es: f64,
    /// 1. - es
    pub one_es: f64,
    /// 1./one_es
    pub rone_es: f64,
    /// Flattening
    pub f: f64,
    /// Inverse flattening
    pub rf: f64,
}

/// A shape parameter, by order of precedence
#[allow(non_camel_case_types)]
enum ShapeParameter {
    SP_rf(f64),
    SP_f(f64),
    SP_es(f64),
    SP_e(f64),
    SP_b(f64),
}

use ShapeParameter::*;

impl Ellipsoid {
    /// Create sphere parameters
    pub fn sphere(radius: f64) -> Result<Self> {
        if !(radius.is_normal() && radius > 0.) {
            return Err(Error::InvalidParameterValue("Invalid radius"));
        }
        Ok(Self {
            a: radius,
            b: radius,
            ra: 1. / radius,
            e: 0.,
            es: 0.,
            one_es: 1.,
            rone_es: 1.,
            f: 0.,
            rf: f64::INFINITY,
        })
    }

    pub fn is_ellipsoid(&self) -> bool {
        self.es != 0.
    }

    pub fn is_sphere(&self) -> bool {
        self.es == 0.
    }

    fn calc_ellipsoid_params(a: f64, sp: ShapeParameter) -> Result<Self> {
        if a <= 0. {
            return Err(Error::InvalidParameterValue("Invalid major axis"));
        }

        let (mut b, mut es, mut e, mut f, mut rf);

        match sp {
            SP_rf(rfv) => {
                if rfv <= 1. {
                    return Err(Error::InvalidParameterValue("Invalid inverse flattening"));
                }
                rf = rfv;
                f = 1. / rf;
                es = 2. * f - f * f;
                e = es.sqrt();
                b = (1.0 - f) * a;
            }
            SP_f(fv) => {
                if !(0. ..1.).contains(&fv) {
                    return Err(Error::InvalidParameterValue("Invalid flattening"));
                }
                f = fv;
                es = 2. * f - f * f;
                e = es.sqrt();
                b = (1.0 - f) * a;
                rf = if f > 0. { 1. / f } else { f64::INFINITY };
            }
            SP_es(esv) => {
                if !(0. ..1.).contains(&esv) {
                    return Err(Error::InvalidParameterValue("Invalid eccentricity"));
                }
                es = esv;
                e = es.sqrt();
                f = 1. - (1. - es).sqrt();
                b = (1.0 - f) * a;
                rf = if f > 0. { 1. / f } else { f64::INFINITY };
            }
            SP_e(ev) => {
                if !(0. ..1.).contains(&ev) {
                    return Err(Error::InvalidParameterValue("Invalid eccentricity"));
                }
                e = ev;
                es = e * e;
                f = 1. - (1. - es).sqrt();
                b = (1.0 - f) * a;
                rf = if f > 0. { 1. / f } else { f64::INFINITY };
            }
            SP_b(bv) => {
                if !(bv > 0. && bv <= a) {
                    return Err(Error::InvalidParameterValue("Invalid minor axis"));
                }
                let a2 = a * a;
                let b2 = bv * bv;
                b = bv;
                es = (a2 - b2) / a2;
                e = es.sqrt();
                f = (a - b) / a;
                rf = if f > 0. { 1. / f } else { f64::INFINITY };
            }
        }

        // Degenerate flattening collapses to a sphere
        if (a - b).abs() < EPS_12 * a {
            b = a;
            es = 0.;
            e = 0.;
            f = 0.;
            rf = f64::INFINITY;
        }

        Ok(Self {
            a,
            b,
            ra: 1. / a,
            e,
            es,
            one_es: 1. - es,
            rone_es: 1. / (1. - es),
            f,
            rf,
        })
    }

    /// Spherification: replace the ellipsoid by an equivalent sphere
    /// according to the `R_A`, `R_V`, `R_a`, `R_g` or `R_h` flag.
    fn spherification(self, params: &ParamList) -> Result<Self> {
        let radius = if params.check_option("R_A")? {
            let es = self.es;
            self.a * (1. - es * (SIXTH + es * (RA4 + es * RA6)))
        } else if params.check_option("R_V")? {
            let es = self.es;
            self.a * (1. - es * (SIXTH + es * (RV4 + es * RV6)))
        } else if params.check_option("R_a")? {
            0.5 * (self.a + self.b)
        } else if params.check_option("R_g")? {
            (self.a * self.b).sqrt()
        } else if params.check_option("R_h")? {
            2. * self.a * self.b / (self.a + self.b)
        } else {
            return Ok(self);
        };
        Self::sphere(radius)
    }

    /// Build the ellipsoid from a definition, overridden by
    /// explicit shape/size parameters.
    pub fn try_from_ellipsoid_with_params(
        defn: &EllipsoidDefn,
        params: &ParamList,
    ) -> Result<Self> {
        let a = params.try_value::<f64>("a")?.unwrap_or(defn.a);

        let sp = Self::shape_parameter(params)?.unwrap_or(match defn.rf_or_b {
            FlatteningParam::InvFlat(rf) => SP_rf(rf),
            FlatteningParam::MinorAxis(b) => SP_b(b),
        });

        Self::calc_ellipsoid_params(a, sp)?.spherification(params)
    }

    /// Build the ellipsoid from raw parameters only.
    /// `a` is mandatory here; a missing shape parameter gives a sphere.
    pub fn try_from_params(params: &ParamList) -> Result<Self> {
        let a = params
            .try_value::<f64>("a")?
            .ok_or(Error::InvalidEllipsoid)?;

        match Self::shape_parameter(params)? {
            Some(sp) => Self::calc_ellipsoid_params(a, sp)?.spherification(params),
            None => Self::sphere(a),
        }
    }

    /// Shape parameters by order of precedence: "rf", "f", "es", "e", "b"
    fn shape_parameter(params: &ParamList) -> Result<Option<ShapeParameter>> {
        Ok(if let Some(rf) = params.try_value::<f64>("rf")? {
            Some(SP_rf(rf))
        } else if let Some(f) = params.try_value::<f64>("f")? {
            Some(SP_f(f))
        } else if let Some(es) = params.try_value::<f64>("es")? {
            Some(SP_es(es))
        } else if let Some(e) = params.try_value::<f64>("e")? {
            Some(SP_e(e))
        } else {
            params.try_value::<f64>("b")?.map(SP_b)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ellipsoids::find_ellipsoid;
    use crate::projstring;
    use approx::assert_abs_diff_eq;

    #[test]
    fn ellps_derived_wgs84() {
        let params = projstring::parse("+ellps=WGS84").unwrap();
        let defn = find_ellipsoid("WGS84").unwrap();
        let el = Ellipsoid::try_from_ellipsoid_with_params(defn, &params).unwrap();

        assert_eq!(el.a, 6_378_137.);
        assert_abs_diff_eq!(el.b, 6_356_752.3142, epsilon = 1e-4);
        assert_abs_diff_eq!(el.es, 0.0066943799901413165, epsilon = 1e-15);
        assert_abs_diff_eq!(el.e, el.es.sqrt(), epsilon = 1e-15);
    }

    #[test]
    fn ellps_minor_axis_override() {
        // a == b collapses to a sphere
        let params = projstring::parse("+a=6378137 +b=6378137").unwrap();
        let el = Ellipsoid::try_from_params(&params).unwrap();
        assert!(el.is_sphere());
        assert_eq!(el.a, el.b);
    }

    #[test]
    fn ellps_invalid_rf() {
        let params = projstring::parse("+a=6378137 +rf=0.5").unwrap();
        assert!(Ellipsoid::try_from_params(&params).is_err());
    }
}
