//!
//! Lambert Conformal Conic
//!
//! Parameters:
//!
//! proj: lcc
//!
//! lat_0: the reference latitude
//! lon_0: the reference longitude
//! lat_1: first standard parallel
//! lat_2: second standard parallel
//! x_0: x offset in meters
//! y_0: y offset in meters
//!
use crate::errors::{Error, Result};
use crate::math::{
    consts::{EPS_10, FRAC_PI_2, FRAC_PI_4},
    msfn, phi2, tsfn,
};
use crate::parameters::ParamList;
use crate::proj::ProjData;

// Projection stub
super::projection! { lcc }

#[derive(Debug, Clone)]
pub(crate) struct Projection {
    n: f64,
    rho0: f64,
    c: f64,
    ellips: bool,
    e: f64,
    k0: f64,
}

impl Projection {
    pub fn lcc(p: &mut ProjData, params: &ParamList) -> Result<Self> {
        let phi1 = params.try_angular_value("lat_1")?.unwrap_or(0.);
        let phi2_ = match params.try_angular_value("lat_2")? {
            Some(phi2_) => phi2_,
            None => {
                // Single parallel degenerate case: the reference
                // latitude defaults to the first parallel
                if params.try_angular_value("lat_0")?.is_none() {
                    p.phi0 = phi1;
                }
                phi1
            }
        };

        // Standard parallels cannot be equal and on opposite sides
        // of the equator
        if (phi1 + phi2_).abs() < EPS_10 {
            return Err(Error::ProjErrConicLatEqual);
        }

        let phi0 = p.phi0;

        let sinphi = phi1.sin();
        let cosphi = phi1.cos();
        let secant = (phi1 - phi2_).abs() >= EPS_10;

        let el = &p.ellps;
        let ellips = el.is_ellipsoid();

        let (n, c, rho0);

        if ellips {
            let m1 = msfn(sinphi, cosphi, el.es);
            let ml1 = tsfn(phi1, sinphi, el.e);
            n = if secant {
                let sinphi2 = phi2_.sin();
                (m1 / msfn(sinphi2, phi2_.cos(), el.es)).ln()
                    / (ml1 / tsfn(phi2_, sinphi2, el.e)).ln()
            } else {
                sinphi
            };
            c = m1 * ml1.powf(-n) / n;
            rho0 = if (phi0.abs() - FRAC_PI_2).abs() < EPS_10 {
                0.
            } else {
                c * tsfn(phi0, phi0.sin(), el.e).powf(n)
            }
        } else {
            n = if secant {
                (cosphi / phi2_.cos()).ln()
                    / ((FRAC_PI_4 + 0.5 * phi2_).tan() / (FRAC_PI_4 + 0.5 * phi1).tan()).ln()
            } else {
                sinphi
            };
            c = cosphi * (FRAC_PI_4 + 0.5 * phi1).tan().powf(n) / n;
            rho0 = if (phi0.abs() - FRAC_PI_2).abs() < EPS_10 {
                0.
            } else {
                c * (FRAC_PI_4 + 0.5 * phi0).tan().powf(-n)
            }
        }

        Ok(Self {
            n,
            rho0,
            c,
            ellips,
            e: el.e,
            k0: p.k0,
        })
    }

    pub fn forward(&self, lam: f64, phi: f64, z: f64) -> Result<(f64, f64, f64)> {
        let rho = if (phi.abs() - FRAC_PI_2).abs() < EPS_10 {
            if (phi * self.n) <= 0. {
                return Err(Error::ToleranceConditionError);
            } else {
                0.
            }
        } else {
            self.c
                * if self.ellips {
                    tsfn(phi, phi.sin(), self.e).powf(self.n)
                } else {
                    (FRAC_PI_4 + 0.5 * phi).tan().powf(-self.n)
                }
        };

        let lam = lam * self.n;

        Ok((
            self.k0 * (rho * lam.sin()),
            self.k0 * (self.rho0 - rho * lam.cos()),
            z,
        ))
    }

    pub fn inverse(&self, x: f64, y: f64, z: f64) -> Result<(f64, f64, f64)> {
        let mut x = x / self.k0;
        let mut y = self.rho0 - y / self.k0;

        let mut rho = x.hypot(y);
        let (lam, phi);
        if rho != 0. {
            if self.n < 0. {
                rho = -rho;
                x = -x;
                y = -y;
            }
            phi = if self.ellips {
                phi2((rho / self.c).powf(1. / self.n), self.e)?
            } else {
                2. * (self.c / rho).powf(1. / self.n).atan() - FRAC_PI_2
            };
            lam = x.atan2(y) / self.n;
        } else {
            lam = 0.;
            phi = if self.n > 0. { FRAC_PI_2 } else { -FRAC_PI_2 };
        }
        Ok((lam, phi, z))
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
    use crate::tests::utils::{test_proj_forward, test_proj_inverse};

    #[test]
    fn proj_lcc_ellps() {
        let p = Proj::from_proj_string("+proj=lcc +ellps=GRS80 +lat_1=0.5 +lat_2=2").unwrap();

        let inputs = [(
            (2., 1., 0.),
            (222588.439735968423, 110660.533870799671, 0.),
        )];

        test_proj_forward(&p, &inputs, EPS_10);
        test_proj_inverse(&p, &inputs, EPS_10);
    }

    #[test]
    fn proj_lcc_single_parallel() {
        // lat_2 omitted: single parallel form, lat_0 defaults to lat_1
        let p = Proj::from_proj_string("+proj=lcc +ellps=GRS80 +lat_1=45").unwrap();

        let (lam, phi) = (2f64.to_radians(), 46f64.to_radians());
        let (x, y, _) = p.projection().forward(lam, phi, 0.).unwrap();
        let (lam2, phi2, _) = p.projection().inverse(x, y, 0.).unwrap();
        assert!((lam - lam2).abs() < EPS_10);
        assert!((phi - phi2).abs() < EPS_10);
    }

    #[test]
    fn proj_lcc_opposite_parallels() {
        assert!(Proj::from_proj_string("+proj=lcc +ellps=GRS80 +lat_1=10 +lat_2=-10").is_err());
    }
}
