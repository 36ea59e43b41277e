//!
//! Gnomonic (Spherical)
//!
//! ref: <https://proj.org/operations/projections/gnom.html>
//!
//! gnom: "Gnomonic" "\n\tAzi, Sph.";
//!
//! Singular for points at a great-circle distance of a quarter turn or
//! more from the projection centre.
//!
use crate::ellps::Ellipsoid;
use crate::errors::{Error, Result};
use crate::math::consts::{EPS_10, FRAC_PI_2};
use crate::parameters::ParamList;
use crate::proj::ProjData;

super::projection! { gnom }

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
    pub fn gnom(p: &mut ProjData, _: &ParamList) -> Result<Self> {
        // Map from sphere
        p.ellps = Ellipsoid::sphere(p.ellps.a)?;

        let phi0 = p.phi0;
        let t = phi0.abs();
        let mode = if (t - FRAC_PI_2).abs() < EPS_10 {
            if phi0 < 0. {
                S_POLE
            } else {
                N_POLE
            }
        } else if t < EPS_10 {
            EQUIT
        } else {
            OBLIQ
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
        let coslam = lam.cos();

        let (x, y) = match self.mode {
            EQUIT | OBLIQ => {
                let mut g = if self.mode == EQUIT {
                    cosphi * coslam
                } else {
                    self.sinph0 * sinphi + self.cosph0 * cosphi * coslam
                };
                if g <= EPS_10 {
                    return Err(Error::CoordTransOutsideProjectionDomain);
                }
                g = 1. / g;
                (
                    g * cosphi * lam.sin(),
                    g * if self.mode == EQUIT {
                        sinphi
                    } else {
                        self.cosph0 * sinphi - self.sinph0 * cosphi * coslam
                    },
                )
            }
            N_POLE => {
                // visible hemisphere requires phi > 0
                if sinphi <= EPS_10 {
                    return Err(Error::CoordTransOutsideProjectionDomain);
                }
                let rho = cosphi / sinphi;
                (rho * lam.sin(), -rho * coslam)
            }
            S_POLE => {
                if sinphi >= -EPS_10 {
                    return Err(Error::CoordTransOutsideProjectionDomain);
                }
                let rho = -cosphi / sinphi;
                (rho * lam.sin(), rho * coslam)
            }
        };
        Ok((x, y, z))
    }

    pub fn inverse(&self, x: f64, y: f64, z: f64) -> Result<(f64, f64, f64)> {
        let rh = x.hypot(y);
        let mut phi = rh.atan();
        let (sinz, cosz) = phi.sin_cos();

        if rh <= EPS_10 {
            return Ok((0., self.phi0, z));
        }

        let (mut xx, mut yy) = (x, y);
        match self.mode {
            OBLIQ => {
                phi = cosz * self.sinph0 + y * sinz * self.cosph0 / rh;
                phi = if phi.abs() >= 1. {
                    if phi > 0. {
                        FRAC_PI_2
                    } else {
                        -FRAC_PI_2
                    }
                } else {
                    phi.asin()
                };
                yy = (cosz - self.sinph0 * phi.sin()) * rh;
                xx *= sinz * self.cosph0;
            }
            EQUIT => {
                phi = y * sinz / rh;
                phi = if phi.abs() >= 1. {
                    if phi > 0. {
                        FRAC_PI_2
                    } else {
                        -FRAC_PI_2
                    }
                } else {
                    phi.asin()
                };
                yy = cosz * rh;
                xx *= sinz;
            }
            S_POLE => {
                phi -= FRAC_PI_2;
            }
            N_POLE => {
                phi = FRAC_PI_2 - phi;
                yy = -yy;
            }
        }
        Ok((xx.atan2(yy), phi, z))
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
    fn proj_gnom_roundtrip() {
        for projstr in [
            "+proj=gnom +R=6400000",
            "+proj=gnom +lat_0=40 +R=6400000",
            "+proj=gnom +lat_0=90 +R=6400000",
            "+proj=gnom +lat_0=-90 +R=6400000",
        ] {
            let p = Proj::from_proj_string(projstr).unwrap();
            for (lon, lat) in [(2., 31.), (-2., 29.), (10., 52.), (-15., 35.)] {
                let (lam, phi) = (f64::to_radians(lon), f64::to_radians(lat));
                let fwd = p.projection().forward(lam, phi, 0.);
                let Ok((x, y, _)) = fwd else {
                    // southern polar aspect cannot see northern points
                    continue;
                };
                let (lam2, phi2, _) = p.projection().inverse(x, y, 0.).unwrap();
                assert!((lam - lam2).abs() < EPS_10, "{projstr} lam");
                assert!((phi - phi2).abs() < 1e-9, "{projstr} phi");
            }
        }
    }

    #[test]
    fn proj_gnom_quarter_turn_rejected() {
        let p = Proj::from_proj_string("+proj=gnom +R=6400000").unwrap();
        // 100 degrees away from the center
        assert!(p
            .projection()
            .forward(100f64.to_radians(), 0., 0.)
            .is_err());
    }
}
