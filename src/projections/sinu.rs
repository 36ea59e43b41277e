//!
//! Sinusoidal (Sanson-Flamsteed)
//!
//! ref: <https://proj.org/operations/projections/sinu.html>
//!
//! sinu: "Sinusoidal (Sanson-Flamsteed)" "\n\tPCyl, Sph&Ell";
//!
use crate::errors::{Error, Result};
use crate::math::{
    aasin,
    consts::{EPS_10, FRAC_PI_2},
    enfn, inv_mlfn, mlfn, Enfn,
};
use crate::parameters::ParamList;
use crate::proj::ProjData;

super::projection! { sinu }

#[derive(Debug, Clone)]
pub(crate) enum Projection {
    Ell { es: f64, en: Enfn },
    Sph,
}

use Projection::*;

impl Projection {
    pub fn sinu(p: &mut ProjData, _: &ParamList) -> Result<Self> {
        Ok(if p.ellps.is_ellipsoid() {
            Ell {
                es: p.ellps.es,
                en: enfn(p.ellps.es),
            }
        } else {
            Sph
        })
    }

    pub fn forward(&self, lam: f64, phi: f64, z: f64) -> Result<(f64, f64, f64)> {
        match self {
            Ell { es, en } => {
                let (sinphi, cosphi) = phi.sin_cos();
                Ok((
                    lam * cosphi / (1. - es * sinphi * sinphi).sqrt(),
                    mlfn(phi, sinphi, cosphi, *en),
                    z,
                ))
            }
            Sph => Ok((lam * phi.cos(), phi, z)),
        }
    }

    pub fn inverse(&self, x: f64, y: f64, z: f64) -> Result<(f64, f64, f64)> {
        match self {
            Ell { es, en } => {
                let phi = inv_mlfn(y, *es, *en)?;
                let s = phi.abs();
                if s < FRAC_PI_2 {
                    let sinphi = phi.sin();
                    Ok((
                        x * (1. - es * sinphi * sinphi).sqrt() / phi.cos(),
                        phi,
                        z,
                    ))
                } else if (s - EPS_10) < FRAC_PI_2 {
                    Ok((0., phi, z))
                } else {
                    Err(Error::ToleranceConditionError)
                }
            }
            Sph => {
                let phi = aasin(y)?;
                let cosphi = phi.cos();
                if cosphi.abs() < EPS_10 {
                    Ok((0., phi, z))
                } else {
                    Ok((x / cosphi, phi, z))
                }
            }
        }
    }

    pub const fn has_inverse() -> bool {
        true
    }

    pub const fn has_forward() -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use crate::math::consts::EPS_10;
    use crate::proj::Proj;

    #[test]
    fn proj_sinu_ell_roundtrip() {
        let p = Proj::from_proj_string("+proj=sinu +ellps=GRS80").unwrap();

        for (lon, lat) in [(2., 1.), (-2., -1.), (10., 45.), (-70., 30.)] {
            let (lam, phi) = (f64::to_radians(lon), f64::to_radians(lat));
            let (x, y, _) = p.projection().forward(lam, phi, 0.).unwrap();
            let (lam2, phi2, _) = p.projection().inverse(x, y, 0.).unwrap();
            assert!((lam - lam2).abs() < EPS_10);
            assert!((phi - phi2).abs() < EPS_10);
        }
    }

    #[test]
    fn proj_sinu_sph_roundtrip() {
        let p = Proj::from_proj_string("+proj=sinu +R=6400000").unwrap();

        let (lam, phi) = ((-15f64).to_radians(), 42f64.to_radians());
        let (x, y, _) = p.projection().forward(lam, phi, 0.).unwrap();
        let (lam2, phi2, _) = p.projection().inverse(x, y, 0.).unwrap();
        assert!((lam - lam2).abs() < EPS_10);
        assert!((phi - phi2).abs() < EPS_10);
    }
}
