//!
//! Orthographic (Spherical)
//!
//! ref: <https://proj.org/operations/projections/ortho.html>
//!
//! ortho: "Orthographic" "\n\tAzi, Sph.";
//!
//! Points on the far hemisphere are rejected.
//!
use crate::ellps::Ellipsoid;
use crate::errors::{Error, Result};
use crate::math::consts::{EPS_10, FRAC_PI_2};
use crate::parameters::ParamList;
use crate::proj::ProjData;

super::projection! { ortho }

#[allow(non_camel_case_types)]
#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Clone, PartialEq)]
enum Mode {
    N_POLE,
    S_POLE,
    EQUIT,
    OBLIQ,
}

use Mode::*;

#[derive(Debug, Clone)]
pub(crate) struct Projection {
    mode: Mode,
    phi0: f64,
    sinph0: f64,
    cosph0: f64,
}

impl Projection {
    pub fn ortho(p: &mut ProjData, _: &ParamList) -> Result<Self> {
        // Map from sphere
        p.ellps = Ellipsoid::sphere(p.ellps.a)?;

        let phi0 = p.phi0;
        let t = phi0.abs();
        let mode = if (t - FRAC_PI_2).abs() <= EPS_10 {
            if phi0 < 0. {
                S_POLE
            } else {
                N_POLE
            }
        } else if t > EPS_10 {
            OBLIQ
        } else {
            EQUIT
        };
        let (sinph0, cosph0) = phi0.sin_cos();

        Ok(Self {
            mode,
            phi0,
            sinph0,
            cosph0,
        })
    }

    pub fn forward(&self, lam: f64, phi: f64, z: f64) -> Result<(f64, f64, f64)> {
        let (sinphi, cosphi) = phi.sin_cos();
        let mut coslam = lam.cos();

        let y = match self.mode {
            EQUIT => {
                if cosphi * coslam < -EPS_10 {
                    return Err(Error::CoordTransOutsideProjectionDomain);
                }
                sinphi
            }
            OBLIQ => {
                if self.sinph0 * sinphi + self.cosph0 * cosphi * coslam < -EPS_10 {
                    return Err(Error::CoordTransOutsideProjectionDomain);
                }
                self.cosph0 * sinphi - self.sinph0 * cosphi * coslam
            }
            N_POLE | S_POLE => {
                if self.mode == N_POLE {
                    coslam = -coslam;
                }
                if (phi - self.phi0).abs() - EPS_10 > FRAC_PI_2 {
                    return Err(Error::CoordTransOutsideProjectionDomain);
                }
                cosphi * coslam
            }
        };
        Ok((cosphi * lam.sin(), y, z))
    }

    pub fn inverse(&self, x: f64, y: f64, z: f64) -> Result<(f64, f64, f64)> {
        let rh = x.hypot(y);
        let mut sinc = rh;
        if sinc > 1. {
            if (sinc - 1.) > EPS_10 {
                return Err(Error::CoordTransOutsideProjectionDomain);
            }
            sinc = 1.;
        }
        let cosc = (1. - sinc * sinc).sqrt();

        if rh <= EPS_10 {
            return Ok((0., self.phi0, z));
        }

        let (mut xx, mut yy) = (x, y);
        let phi = match self.mode {
            N_POLE => {
                yy = -yy;
                cosc.acos()
            }
            S_POLE => -(cosc.acos()),
            EQUIT => {
                let phi = y * sinc / rh;
                xx *= sinc;
                yy = cosc * rh;
                if phi.abs() >= 1. {
                    if phi < 0. {
                        -FRAC_PI_2
                    } else {
                        FRAC_PI_2
                    }
                } else {
                    phi.asin()
                }
            }
            OBLIQ => {
                let phi = cosc * self.sinph0 + y * sinc * self.cosph0 / rh;
                yy = (cosc - self.sinph0 * phi) * rh;
                xx *= sinc * self.cosph0;
                if phi.abs() >= 1. {
                    if phi < 0. {
                        -FRAC_PI_2
                    } else {
                        FRAC_PI_2
                    }
                } else {
                    phi.asin()
                }
            }
        };

        let lam = if yy == 0. && matches!(self.mode, OBLIQ | EQUIT) {
            if xx == 0. {
                0.
            } else if xx < 0. {
                -FRAC_PI_2
            } else {
                FRAC_PI_2
            }
        } else {
            xx.atan2(yy)
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

#[cfg(test)]
mod tests {
    use crate::math::consts::EPS_10;
    use crate::proj::Proj;

    #[test]
    fn proj_ortho_roundtrip() {
        for projstr in [
            "+proj=ortho +R=6400000",
            "+proj=ortho +lat_0=40 +R=6400000",
            "+proj=ortho +lat_0=90 +R=6400000",
        ] {
            let p = Proj::from_proj_string(projstr).unwrap();
            for (lon, lat) in [(2., 1.), (-2., -1.), (10., 52.), (-15., 35.)] {
                let (lam, phi) = (f64::to_radians(lon), f64::to_radians(lat));
                let (x, y, _) = p.projection().forward(lam, phi, 0.).unwrap();
                let (lam2, phi2, _) = p.projection().inverse(x, y, 0.).unwrap();
                assert!((lam - lam2).abs() < EPS_10, "{projstr} lam");
                assert!((phi - phi2).abs() < 1e-9, "{projstr} phi");
            }
        }
    }

    #[test]
    fn proj_ortho_far_hemisphere() {
        let p = Proj::from_proj_string("+proj=ortho +R=6400000").unwrap();
        assert!(p
            .projection()
            .forward(170f64.to_radians(), 0., 0.)
            .is_err());
    }
}
