//!
//! Equal Earth
//!
//! ref: <https://proj.org/operations/projections/eqearth.html>
//!
//! eqearth: "Equal Earth" "\n\tPCyl., Sph&Ell";
//!
//! Polynomial pseudocylindrical projection (Savric, Patterson & Jenny
//! 2018). The ellipsoidal case goes through the authalic latitude, the
//! inverse uses a bounded Newton iteration on the parametric latitude.
//!
use crate::errors::{Error, Result};
use crate::math::{authlat, authset, consts::EPS_10, qsfn, Apa};
use crate::parameters::ParamList;
use crate::proj::ProjData;

super::projection! { eqearth }

const A1: f64 = 1.340264;
const A2: f64 = -0.081106;
const A3: f64 = 0.000893;
const A4: f64 = 0.003796;
const M: f64 = 0.8660254037844386; // sqrt(3)/2

const MAX_ITER: usize = 12;
const EPS: f64 = 1e-12;

#[inline]
fn poly_y(t: f64) -> f64 {
    let t2 = t * t;
    let t6 = t2 * t2 * t2;
    t * (A1 + A2 * t2 + t6 * (A3 + A4 * t2))
}

#[inline]
fn poly_dy(t: f64) -> f64 {
    let t2 = t * t;
    let t6 = t2 * t2 * t2;
    A1 + 3. * A2 * t2 + t6 * (7. * A3 + 9. * A4 * t2)
}

#[derive(Debug, Clone)]
pub(crate) enum Projection {
    Sph,
    Ell { e: f64, one_es: f64, qp: f64, rqda: f64, apa: Apa },
}

use Projection::*;

impl Projection {
    pub fn eqearth(p: &mut ProjData, _: &ParamList) -> Result<Self> {
        Ok(if p.ellps.is_ellipsoid() {
            let qp = qsfn(1., p.ellps.e, p.ellps.one_es);
            Ell {
                e: p.ellps.e,
                one_es: p.ellps.one_es,
                qp,
                // Radius of the authalic sphere relative to a
                rqda: (0.5 * qp).sqrt(),
                apa: authset(p.ellps.es),
            }
        } else {
            Sph
        })
    }

    // Latitude on the authalic sphere
    #[inline]
    fn beta(&self, phi: f64) -> f64 {
        match self {
            Sph => phi,
            Ell { e, one_es, qp, .. } => {
                let q = qsfn(phi.sin(), *e, *one_es);
                (q / qp).clamp(-1., 1.).asin()
            }
        }
    }

    #[inline]
    fn scale(&self) -> f64 {
        match self {
            Sph => 1.,
            Ell { rqda, .. } => *rqda,
        }
    }

    pub fn forward(&self, lam: f64, phi: f64, z: f64) -> Result<(f64, f64, f64)> {
        let beta = self.beta(phi);
        // parametric latitude
        let t = (M * beta.sin()).asin();
        let s = self.scale();
        Ok((s * lam * t.cos() / (M * poly_dy(t)), s * poly_y(t), z))
    }

    pub fn inverse(&self, x: f64, y: f64, z: f64) -> Result<(f64, f64, f64)> {
        let s = self.scale();
        let (x, y) = (x / s, y / s);

        // Newton on the parametric latitude
        let mut t = y;
        let mut i = MAX_ITER;
        loop {
            let dy = poly_dy(t);
            let dt = (poly_y(t) - y) / dy;
            t -= dt;
            if dt.abs() < EPS {
                break;
            }
            i -= 1;
            if i == 0 {
                return Err(Error::InverseProjectionFailure);
            }
        }

        let sinbeta = (t.sin() / M).clamp(-1., 1.);
        let beta = sinbeta.asin();

        let cost = t.cos();
        if cost.abs() < EPS_10 {
            return Err(Error::InverseProjectionFailure);
        }

        let lam = M * x * poly_dy(t) / cost;
        let phi = match self {
            Sph => beta,
            Ell { apa, .. } => authlat(beta, *apa),
        };
        Ok((lam, phi, z))
    }

    pub const fn has_inverse() -> bool {
        true
    }

    pub const fn has_forward() -> bool {
        true
    }
}
