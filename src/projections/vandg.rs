//!
//! Van der Grinten (I)
//!
//! ref: <https://proj.org/operations/projections/vandg.html>
//!
//! vandg: "van der Grinten (I)" "\n\tMisc Sph";
//!
use crate::ellps::Ellipsoid;
use crate::errors::{Error, Result};
use crate::math::{
    asqrt,
    consts::{FRAC_PI_2, PI},
};
use crate::parameters::ParamList;
use crate::proj::ProjData;

super::projection! { vandg }

const TOL: f64 = 1.0e-10;
const THIRD: f64 = 1. / 3.;
const C2_27: f64 = 2. / 27.;
const PI4_3: f64 = 4. * PI / 3.;
const PISQ: f64 = PI * PI;
const TPISQ: f64 = 2. * PISQ;
const HPISQ: f64 = 0.5 * PISQ;

#[derive(Debug, Clone)]
pub(crate) struct Projection {}

impl Projection {
    pub fn vandg(p: &mut ProjData, _: &ParamList) -> Result<Self> {
        // Map from sphere
        p.ellps = Ellipsoid::sphere(p.ellps.a)?;
        Ok(Self {})
    }

    pub fn forward(&self, lam: f64, phi: f64, z: f64) -> Result<(f64, f64, f64)> {
        let mut p2 = (phi / FRAC_PI_2).abs();
        if (p2 - TOL) > 1. {
            return Err(Error::ToleranceConditionError);
        }
        if p2 > 1. {
            p2 = 1.;
        }

        let (x, y);
        if phi.abs() <= TOL {
            x = lam;
            y = 0.;
        } else if lam.abs() <= TOL || (p2 - 1.).abs() < TOL {
            x = 0.;
            let yy = PI * (0.5 * p2.asin()).tan();
            y = if phi < 0. { -yy } else { yy };
        } else {
            let al = 0.5 * (PI / lam - lam / PI).abs();
            let al2 = al * al;
            let mut g = asqrt(1. - p2 * p2);
            g /= p2 + g - 1.;
            let g2 = g * g;
            let mut pp = g * (2. / p2 - 1.);
            pp *= pp;
            let xt = g - pp;
            let gg = pp + al2;
            let mut xx = PI * (al * xt + asqrt(al2 * xt * xt - gg * (g2 - pp))) / gg;
            if lam < 0. {
                xx = -xx;
            }
            let mut yy = (xx / PI).abs();
            yy = 1. - yy * (yy + 2. * al);
            if yy < -TOL {
                return Err(Error::ToleranceConditionError);
            }
            y = if yy < 0. {
                0.
            } else {
                asqrt(yy) * if phi < 0. { -PI } else { PI }
            };
            x = xx;
        }
        Ok((x, y, z))
    }

    pub fn inverse(&self, x: f64, y: f64, z: f64) -> Result<(f64, f64, f64)> {
        let x2 = x * x;
        let ay = y.abs();

        if ay < TOL {
            let t = x2 * x2 + TPISQ * (x2 + HPISQ);
            let lam = if x.abs() <= TOL {
                0.
            } else {
                0.5 * (x2 - PISQ + t.sqrt()) / x
            };
            return Ok((lam, 0., z));
        }

        let y2 = y * y;
        let r = x2 + y2;
        let r2 = r * r;
        let c1 = -PI * ay * (r + PISQ);
        let c3 = r2 + (2. * PI) * (ay * r + PI * (y2 + PI * (ay + FRAC_PI_2)));
        let c2 = c1 + PISQ * (r - 3. * y2);
        let c0 = PI * ay;
        let c2 = c2 / c3;
        let al = c1 / c3 - THIRD * c2 * c2;
        let m = 2. * (-THIRD * al).sqrt();
        let mut d = C2_27 * c2 * c2 * c2 + (c0 * c0 - THIRD * c2 * c1) / c3;

        d = 3. * d / (al * m);
        let t = d.abs();
        if (t - TOL) <= 1. {
            d = if t > 1. {
                if d > 0. {
                    0.
                } else {
                    PI
                }
            } else {
                d.acos()
            };
            let mut phi = PI * (m * (d * THIRD + PI4_3).cos() - THIRD * c2);
            if y < 0. {
                phi = -phi;
            }
            let t = r + PISQ * (x2 - y2 + HPISQ);
            let lam = if x.abs() <= TOL {
                0.
            } else {
                0.5 * (r - PISQ + if t <= 0. { 0. } else { t.sqrt() }) / x
            };
            Ok((lam, phi, z))
        } else {
            Err(Error::InverseProjectionFailure)
        }
    }

    pub const fn has_inverse() -> bool {
        true
    }

    pub const fn has_forward() -> bool {
        true
    }
}
