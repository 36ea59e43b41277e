//!
//! Equidistant Conic
//!
//! ref: <https://proj.org/operations/projections/eqdc.html>
//!
//! eqdc: "Equidistant Conic" "\n\tConic, Sph&Ell\n\tlat_1= lat_2=";
//!
use crate::errors::{Error, Result};
use crate::math::{
    consts::{EPS_10, FRAC_PI_2},
    enfn, inv_mlfn, mlfn, msfn, Enfn,
};
use crate::parameters::ParamList;
use crate::proj::ProjData;

super::projection! { eqdc }

#[derive(Debug, Clone)]
pub(crate) struct Projection {
    n: f64,
    rho0: f64,
    c: f64,
    en: Enfn,
    ellips: bool,
    es: f64,
}

impl Projection {
    pub fn eqdc(p: &mut ProjData, params: &ParamList) -> Result<Self> {
        let phi1 = params.try_angular_value("lat_1")?.unwrap_or(0.);
        let phi2 = params.try_angular_value("lat_2")?.unwrap_or(phi1);

        if phi1.abs() > FRAC_PI_2 || phi2.abs() > FRAC_PI_2 {
            return Err(Error::LatitudeOutOfRange);
        }
        if (phi1 + phi2).abs() < EPS_10 {
            return Err(Error::ProjErrConicLatEqual);
        }

        let el = &p.ellps;
        let ellips = el.is_ellipsoid();
        let en = enfn(el.es);

        let (sinphi, cosphi) = phi1.sin_cos();
        let mut n = sinphi;
        let secant = (phi1 - phi2).abs() >= EPS_10;

        let (c, rho0);
        if ellips {
            let m1 = msfn(sinphi, cosphi, el.es);
            let ml1 = mlfn(phi1, sinphi, cosphi, en);
            if secant {
                let (sinphi2, cosphi2) = phi2.sin_cos();
                n = (m1 - msfn(sinphi2, cosphi2, el.es))
                    / (mlfn(phi2, sinphi2, cosphi2, en) - ml1);
                if n == 0. {
                    return Err(Error::ToleranceConditionError);
                }
            }
            c = ml1 + m1 / n;
            rho0 = c - mlfn(p.phi0, p.phi0.sin(), p.phi0.cos(), en);
        } else {
            if secant {
                n = (cosphi - phi2.cos()) / (phi2 - phi1);
            }
            c = phi1 + cosphi / n;
            rho0 = c - p.phi0;
        }

        Ok(Self {
            n,
            rho0,
            c,
            en,
            ellips,
            es: el.es,
        })
    }

    pub fn forward(&self, lam: f64, phi: f64, z: f64) -> Result<(f64, f64, f64)> {
        let rho = self.c
            - if self.ellips {
                mlfn(phi, phi.sin(), phi.cos(), self.en)
            } else {
                phi
            };

        let lam = lam * self.n;

        Ok((rho * lam.sin(), self.rho0 - rho * lam.cos(), z))
    }

    pub fn inverse(&self, x: f64, y: f64, z: f64) -> Result<(f64, f64, f64)> {
        let (mut xx, mut yy) = (x, self.rho0 - y);
        let mut rho = xx.hypot(yy);
        if rho != 0.0 {
            if self.n < 0. {
                rho = -rho;
                xx = -xx;
                yy = -yy;
            }
            let mut phi = self.c - rho;
            if self.ellips {
                phi = inv_mlfn(phi, self.es, self.en)?;
            }
            Ok((xx.atan2(yy) / self.n, phi, z))
        } else {
            Ok((0., if self.n > 0. { FRAC_PI_2 } else { -FRAC_PI_2 }, z))
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
    use crate::proj::Proj;

    #[test]
    fn proj_eqdc_ell_roundtrip() {
        let p = Proj::from_proj_string("+proj=eqdc +ellps=GRS80 +lat_1=0.5 +lat_2=2").unwrap();

        for (lon, lat) in [(2., 1.), (-2., -1.), (10., 45.), (-70., 30.)] {
            let (lam, phi) = (f64::to_radians(lon), f64::to_radians(lat));
            let (x, y, _) = p.projection().forward(lam, phi, 0.).unwrap();
            let (lam2, phi2, _) = p.projection().inverse(x, y, 0.).unwrap();
            assert!((lam - lam2).abs() < 1e-10);
            assert!((phi - phi2).abs() < 1e-10);
        }
    }

    #[test]
    fn proj_eqdc_sph_roundtrip() {
        let p = Proj::from_proj_string("+proj=eqdc +R=6400000 +lat_1=30 +lat_2=60").unwrap();

        for (lon, lat) in [(2., 47.), (-120., 10.)] {
            let (lam, phi) = (f64::to_radians(lon), f64::to_radians(lat));
            let (x, y, _) = p.projection().forward(lam, phi, 0.).unwrap();
            let (lam2, phi2, _) = p.projection().inverse(x, y, 0.).unwrap();
            assert!((lam - lam2).abs() < 1e-10);
            assert!((phi - phi2).abs() < 1e-10);
        }
    }

    #[test]
    fn proj_eqdc_opposite_parallels() {
        assert!(Proj::from_proj_string("+proj=eqdc +ellps=GRS80 +lat_1=10 +lat_2=-10").is_err());
    }
}
