//!
//! Azimuthal Equidistant
//!
//! ref: <https://proj.org/operations/projections/aeqd.html>
//!
//! aeqd: "Azimuthal Equidistant" "\n\tAzi, Sph&Ell\n\tlat_0 guam";
//!
//! The polar ellipsoidal aspects use the meridional distance, the
//! oblique and equatorial aspects the EPSG series expansion of the
//! geodesic; the spherical branch is closed form.
//!
use crate::errors::{Error, Result};
use crate::math::{
    consts::{EPS_10, FRAC_PI_2, PI},
    enfn, inv_mlfn, mlfn, Enfn,
};
use crate::parameters::ParamList;
use crate::proj::ProjData;

super::projection! { aeqd }

const TOL: f64 = 1.0e-14;

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
    e: f64,
    es: f64,
    one_es: f64,
    en: Enfn,
    // meridional distance to the pole
    mp: f64,
    is_ellps: bool,
}

impl Projection {
    pub fn aeqd(p: &mut ProjData, _: &ParamList) -> Result<Self> {
        let phi0 = p.phi0;
        if phi0.abs() > FRAC_PI_2 + EPS_10 {
            return Err(Error::LatitudeOutOfRange);
        }

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
        let en = enfn(p.ellps.es);
        let mp = match mode {
            N_POLE => mlfn(FRAC_PI_2, 1., 0., en),
            S_POLE => mlfn(-FRAC_PI_2, -1., 0., en),
            _ => 0.,
        };

        Ok(Self {
            mode,
            phi0,
            sinph0,
            cosph0,
            e: p.ellps.e,
            es: p.ellps.es,
            one_es: p.ellps.one_es,
            en,
            mp,
            is_ellps: p.ellps.is_ellipsoid(),
        })
    }

    // Normalized prime vertical radius
    #[inline]
    fn gn(&self, sinphi: f64) -> f64 {
        1. / (1. - self.es * sinphi * sinphi).sqrt()
    }

    pub fn forward(&self, lam: f64, phi: f64, z: f64) -> Result<(f64, f64, f64)> {
        if self.is_ellps {
            self.e_forward(lam, phi, z)
        } else {
            self.s_forward(lam, phi, z)
        }
    }

    pub fn inverse(&self, x: f64, y: f64, z: f64) -> Result<(f64, f64, f64)> {
        if self.is_ellps {
            self.e_inverse(x, y, z)
        } else {
            self.s_inverse(x, y, z)
        }
    }

    //------------------
    // Ellipsoidal
    //------------------

    fn e_forward(&self, lam: f64, phi: f64, z: f64) -> Result<(f64, f64, f64)> {
        let coslam = lam.cos();
        let (sinphi, cosphi) = phi.sin_cos();

        match self.mode {
            N_POLE | S_POLE => {
                let coslam = if self.mode == N_POLE { -coslam } else { coslam };
                let rho = (self.mp - mlfn(phi, sinphi, cosphi, self.en)).abs();
                Ok((rho * lam.sin(), rho * coslam, z))
            }
            _ => {
                if lam.abs() < EPS_10 && (phi - self.phi0).abs() < EPS_10 {
                    return Ok((0., 0., z));
                }

                // EPSG guidance note 7-2 series for the geodesic
                let n1 = self.gn(self.sinph0);
                let psi = (self.one_es * phi.tan()
                    + self.es * n1 * self.sinph0 / (self.gn(sinphi) * cosphi))
                    .atan();
                let (sinpsi, cospsi) = psi.sin_cos();
                let az = lam.sin().atan2(self.cosph0 * psi.tan() - self.sinph0 * coslam);
                let (sinaz, cosaz) = az.sin_cos();
                let s = if sinaz.abs() < EPS_10 {
                    let s = (self.cosph0 * sinpsi - self.sinph0 * cospsi).asin();
                    if cosaz < 0. {
                        -s
                    } else {
                        s
                    }
                } else {
                    (lam.sin() * cospsi / sinaz).asin()
                };
                let g = self.e * self.sinph0 / self.one_es.sqrt();
                let h = self.e * self.cosph0 * cosaz / self.one_es.sqrt();
                let gh = g * h;
                let hs = h * h;
                let s2 = s * s;
                let s3 = s2 * s;
                let s4 = s3 * s;
                let s5 = s4 * s;
                let c = n1
                    * s
                    * (1. - s2 * hs * (1. - hs) / 6.
                        + s3 / 8. * gh * (1. - 2. * hs)
                        + s4 / 120. * (hs * (4. - 7. * hs) - 3. * g * g * (1. - 7. * hs))
                        - s5 / 48. * gh);
                Ok((c * sinaz, c * cosaz, z))
            }
        }
    }

    fn e_inverse(&self, x: f64, y: f64, z: f64) -> Result<(f64, f64, f64)> {
        let c = x.hypot(y);
        if c < EPS_10 {
            return Ok((0., self.phi0, z));
        }

        match self.mode {
            N_POLE | S_POLE => {
                let ml = if self.mode == N_POLE {
                    self.mp - c
                } else {
                    self.mp + c
                };
                let phi = inv_mlfn(ml, self.es, self.en)?;
                let lam = if self.mode == N_POLE {
                    x.atan2(-y)
                } else {
                    x.atan2(y)
                };
                Ok((lam, phi, z))
            }
            _ => {
                // EPSG inverse series
                let az = x.atan2(y);
                let (sinaz, cosaz) = az.sin_cos();
                let n1 = self.gn(self.sinph0);
                let a = -self.es * self.cosph0 * self.cosph0 * cosaz * cosaz / self.one_es;
                let b = 3. * self.es * (1. - a) * self.sinph0 * self.cosph0 * cosaz / self.one_es;
                let d = c / n1;
                let e = d * (1. - d * d * (a * (1. + a) / 6. + b * (1. + 3. * a) * d / 24.));
                let f = 1. - e * e * (a / 2. + b * e / 6.);
                let psi = (self.sinph0 * e.cos() + self.cosph0 * e.sin() * cosaz).asin();
                let lam = (sinaz * e.sin() / psi.cos()).asin();
                let phi = ((1. - self.es * f * self.sinph0 / psi.sin()) * psi.tan()
                    / self.one_es)
                    .atan();
                Ok((lam, phi, z))
            }
        }
    }

    //------------------
    // Spherical
    //------------------

    fn s_forward(&self, lam: f64, phi: f64, z: f64) -> Result<(f64, f64, f64)> {
        let (sinphi, cosphi) = phi.sin_cos();
        let coslam = lam.cos();

        match self.mode {
            EQUIT | OBLIQ => {
                let cosc = if self.mode == EQUIT {
                    cosphi * coslam
                } else {
                    self.sinph0 * sinphi + self.cosph0 * cosphi * coslam
                };
                if (cosc.abs() - 1.).abs() < TOL {
                    if cosc >= 0. {
                        // projection center
                        return Ok((0., 0., z));
                    }
                    // antipodal point
                    return Err(Error::ToleranceConditionError);
                }
                let c = cosc.acos();
                let kp = c / c.sin();
                Ok((
                    kp * cosphi * lam.sin(),
                    kp * if self.mode == EQUIT {
                        sinphi
                    } else {
                        self.cosph0 * sinphi - self.sinph0 * cosphi * coslam
                    },
                    z,
                ))
            }
            N_POLE | S_POLE => {
                let (phi, coslam) = if self.mode == N_POLE {
                    (-phi, -coslam)
                } else {
                    (phi, coslam)
                };
                if (phi - FRAC_PI_2).abs() < EPS_10 {
                    return Err(Error::ToleranceConditionError);
                }
                let rho = FRAC_PI_2 + phi;
                Ok((rho * lam.sin(), rho * coslam, z))
            }
        }
    }

    fn s_inverse(&self, x: f64, y: f64, z: f64) -> Result<(f64, f64, f64)> {
        let c_rh = x.hypot(y);
        if c_rh > PI {
            if c_rh - EPS_10 > PI {
                return Err(Error::ToleranceConditionError);
            }
            return Ok((0., if self.mode == S_POLE { -FRAC_PI_2 } else { FRAC_PI_2 }, z));
        }
        if c_rh < EPS_10 {
            return Ok((0., self.phi0, z));
        }

        match self.mode {
            OBLIQ | EQUIT => {
                let (sinc, cosc) = c_rh.sin_cos();
                let phi = if self.mode == EQUIT {
                    (y * sinc / c_rh).asin()
                } else {
                    (cosc * self.sinph0 + y * sinc * self.cosph0 / c_rh).asin()
                };
                let (xx, yy) = if self.mode == EQUIT {
                    (x * sinc, cosc * c_rh)
                } else {
                    (
                        x * sinc * self.cosph0,
                        (cosc - self.sinph0 * phi.sin()) * c_rh,
                    )
                };
                let lam = if yy == 0. { 0. } else { xx.atan2(yy) };
                Ok((lam, phi, z))
            }
            N_POLE => Ok((x.atan2(-y), FRAC_PI_2 - c_rh, z)),
            S_POLE => Ok((x.atan2(y), c_rh - FRAC_PI_2, z)),
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
    fn proj_aeqd_sph_roundtrip() {
        for projstr in [
            "+proj=aeqd +R=6400000",
            "+proj=aeqd +lat_0=40 +R=6400000",
            "+proj=aeqd +lat_0=90 +R=6400000",
        ] {
            let p = Proj::from_proj_string(projstr).unwrap();
            for (lon, lat) in [(2., 1.), (-2., -1.), (10., 52.), (-140., -60.)] {
                let (lam, phi) = (f64::to_radians(lon), f64::to_radians(lat));
                let (x, y, _) = p.projection().forward(lam, phi, 0.).unwrap();
                let (lam2, phi2, _) = p.projection().inverse(x, y, 0.).unwrap();
                assert!((lam - lam2).abs() < EPS_10, "{projstr} lam");
                assert!((phi - phi2).abs() < 1e-9, "{projstr} phi");
            }
        }
    }

    #[test]
    fn proj_aeqd_polar_ell_roundtrip() {
        let p = Proj::from_proj_string("+proj=aeqd +lat_0=90 +ellps=GRS80").unwrap();
        for (lon, lat) in [(2., 80.), (-130., 45.)] {
            let (lam, phi) = (f64::to_radians(lon), f64::to_radians(lat));
            let (x, y, _) = p.projection().forward(lam, phi, 0.).unwrap();
            let (lam2, phi2, _) = p.projection().inverse(x, y, 0.).unwrap();
            assert!((lam - lam2).abs() < EPS_10);
            assert!((phi - phi2).abs() < 1e-9);
        }
    }

    #[test]
    fn proj_aeqd_obliq_ell_roundtrip() {
        let p = Proj::from_proj_string("+proj=aeqd +lat_0=40 +ellps=GRS80").unwrap();
        for (lon, lat) in [(2., 41.), (-3., 38.5), (5., 45.)] {
            let (lam, phi) = (f64::to_radians(lon), f64::to_radians(lat));
            let (x, y, _) = p.projection().forward(lam, phi, 0.).unwrap();
            let (lam2, phi2, _) = p.projection().inverse(x, y, 0.).unwrap();
            // the EPSG series is accurate to the mm over a few degrees
            assert!((lam - lam2).abs() < 1e-8);
            assert!((phi - phi2).abs() < 1e-8);
        }
    }

    #[test]
    fn proj_aeqd_antipode_rejected() {
        let p = Proj::from_proj_string("+proj=aeqd +R=6400000").unwrap();
        assert!(p.projection().forward(std::f64::consts::PI, 0., 0.).is_err());
    }
}
