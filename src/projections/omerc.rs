//!
//! Hotine Oblique Mercator
//!
//! ref: <https://proj.org/operations/projections/omerc.html>
//!
//! omerc: "Oblique Mercator" "\n\tCyl, Sph&Ell no_rot\n\t
//!     alpha= [gamma=] [no_off] lonc= or lon_1= lat_1= lon_2= lat_2=";
//!
//! Two ways to define the initial line: an azimuth (`alpha`, optionally
//! with a rectified grid angle `gamma`) through the centre
//! (`lonc`/`lat_0`), or two points on the line. The `no_uoff`/`no_off`
//! flag selects the natural-origin variant, `no_rot` skips the
//! rectification rotation.
//!
#![allow(non_snake_case)]

use crate::errors::{Error, Result};
use crate::math::{
    adjlon,
    consts::{EPS_10, FRAC_PI_2, FRAC_PI_4, PI, TAU},
    phi2, tsfn,
};
use crate::parameters::ParamList;
use crate::proj::ProjData;

super::projection! { omerc }

const TOL: f64 = 1.0e-7;
const EPS: f64 = 1.0e-10;

#[derive(Debug, Clone)]
pub(crate) struct Projection {
    A: f64,
    B: f64,
    E: f64,
    e: f64,
    ArB: f64,
    BrA: f64,
    singam: f64,
    cosgam: f64,
    sinrot: f64,
    cosrot: f64,
    u_0: f64,
    v_pole_n: f64,
    v_pole_s: f64,
    no_rot: bool,
}

impl Projection {
    pub fn omerc(p: &mut ProjData, params: &ParamList) -> Result<Self> {
        let no_off = params.check_option("no_uoff")? || params.check_option("no_off")?;
        let no_rot = params.check_option("no_rot")?;

        let alpha_c = params.try_angular_value("alpha")?;
        let gamma_c = params.try_angular_value("gamma")?;
        let lamc = params.try_angular_value("lonc")?.unwrap_or(0.);

        let lam1 = params.try_angular_value("lon_1")?;
        let phi1 = params.try_angular_value("lat_1")?;
        let lam2 = params.try_angular_value("lon_2")?;
        let phi2_ = params.try_angular_value("lat_2")?;

        let twopoint = !(alpha_c.is_some() || gamma_c.is_some());

        let el = &p.ellps;
        let e = el.e;
        let phi0 = p.phi0;
        let com = el.one_es.sqrt();

        let (A, B, D);
        let e_coef;
        let mut f_coef;
        if phi0.abs() > EPS_10 {
            let (sinph0, cosph0) = phi0.sin_cos();
            let con = 1. - el.es * sinph0 * sinph0;
            let c2 = cosph0 * cosph0;
            B = (1. + el.es * c2 * c2 / el.one_es).sqrt();
            A = B * p.k0 * com / con;
            D = B * com / (cosph0 * con.sqrt());
            f_coef = D * D - 1.;
            if f_coef <= 0. {
                f_coef = 0.;
            } else {
                f_coef = f_coef.sqrt();
                if phi0 < 0. {
                    f_coef = -f_coef;
                }
            }
            f_coef += D;
            e_coef = f_coef * tsfn(phi0, sinph0, e).powf(B);
        } else {
            B = 1. / com;
            A = p.k0;
            D = 1.;
            f_coef = 1.;
            e_coef = 1.;
        }

        let (gamma0, azimuth, rot, lam0);
        if twopoint {
            let (lam1, phi1, mut lam2, phi2_) = match (lam1, phi1, lam2, phi2_) {
                (Some(a), Some(b), Some(c), Some(d)) => (a, b, c, d),
                _ => {
                    return Err(Error::InvalidParameterValue(
                        "Oblique Mercator requires alpha or two points",
                    ))
                }
            };

            if (phi1 - phi2_).abs() <= TOL
                || phi1.abs() <= TOL
                || (phi1.abs() - FRAC_PI_2).abs() <= TOL
                || (phi2_.abs() - FRAC_PI_2).abs() <= TOL
            {
                return Err(Error::InvalidParameterValue(
                    "Invalid points for the initial line",
                ));
            }

            let h = tsfn(phi1, phi1.sin(), e).powf(B);
            let l = tsfn(phi2_, phi2_.sin(), e).powf(B);
            f_coef = e_coef / h;
            let pf = (l - h) / (l + h);
            let mut j = e_coef * e_coef;
            j = (j - l * h) / (j + l * h);

            let con = lam1 - lam2;
            if con < -PI {
                lam2 -= TAU;
            } else if con > PI {
                lam2 += TAU;
            }
            lam0 = adjlon(
                0.5 * (lam1 + lam2) - (j * (0.5 * B * (lam1 - lam2)).tan() / pf).atan() / B,
            );
            gamma0 = (2. * (B * adjlon(lam1 - lam0)).sin() / (f_coef - 1. / f_coef)).atan();
            azimuth = (D * gamma0.sin()).asin();
            rot = azimuth;
        } else if let Some(alpha) = alpha_c {
            if (alpha.abs() - FRAC_PI_2).abs() <= TOL {
                return Err(Error::InvalidParameterValue(
                    "Azimuth of the initial line cannot be 90 degrees",
                ));
            }
            gamma0 = (alpha.sin() / D).asin();
            azimuth = alpha;
            rot = gamma_c.unwrap_or(alpha);
            lam0 = lamc - (0.5 * (f_coef - 1. / f_coef) * gamma0.tan()).asin() / B;
        } else {
            gamma0 = gamma_c.unwrap_or(0.);
            azimuth = (D * gamma0.sin()).asin();
            rot = gamma0;
            lam0 = lamc - (0.5 * (f_coef - 1. / f_coef) * gamma0.tan()).asin() / B;
        }

        p.lam0 = lam0;

        let (singam, cosgam) = gamma0.sin_cos();
        let (sinrot, cosrot) = rot.sin_cos();

        let ArB = A / B;
        let u_0 = if no_off {
            0.
        } else {
            let u = (ArB * ((D * D - 1.).max(0.).sqrt() / azimuth.cos()).atan()).abs();
            if phi0 < 0. {
                -u
            } else {
                u
            }
        };
        Ok(Self {
            A,
            B,
            E: e_coef,
            e,
            ArB,
            BrA: B / A,
            singam,
            cosgam,
            sinrot,
            cosrot,
            u_0,
            v_pole_n: ArB * (FRAC_PI_4 - 0.5 * gamma0).tan().ln(),
            v_pole_s: ArB * (FRAC_PI_4 + 0.5 * gamma0).tan().ln(),
            no_rot,
        })
    }

    pub fn forward(&self, lam: f64, phi: f64, z: f64) -> Result<(f64, f64, f64)> {
        let (mut u, v);
        if (phi.abs() - FRAC_PI_2).abs() > EPS {
            let Q = self.E / tsfn(phi, phi.sin(), self.e).powf(self.B);
            let temp = 1. / Q;
            let S = 0.5 * (Q - temp);
            let T = 0.5 * (Q + temp);
            let V = (self.B * lam).sin();
            let U = (S * self.singam - V * self.cosgam) / T;
            if (U.abs() - 1.).abs() < EPS {
                return Err(Error::ToleranceConditionError);
            }
            v = 0.5 * self.ArB * ((1. - U) / (1. + U)).ln();
            let temp = (self.B * lam).cos();
            if temp.abs() < TOL {
                u = self.A * lam;
            } else {
                u = self.ArB * (S * self.cosgam + V * self.singam).atan2(temp);
            }
        } else {
            v = if phi > 0. {
                self.v_pole_n
            } else {
                self.v_pole_s
            };
            u = self.ArB * phi;
        }

        if self.no_rot {
            Ok((u, v, z))
        } else {
            u -= self.u_0;
            Ok((
                v * self.cosrot + u * self.sinrot,
                u * self.cosrot - v * self.sinrot,
                z,
            ))
        }
    }

    pub fn inverse(&self, x: f64, y: f64, z: f64) -> Result<(f64, f64, f64)> {
        let (u, v) = if self.no_rot {
            (x, y)
        } else {
            (
                y * self.cosrot + x * self.sinrot + self.u_0,
                x * self.cosrot - y * self.sinrot,
            )
        };
        let Qp = (-self.BrA * v).exp();
        let Sp = 0.5 * (Qp - 1. / Qp);
        let Tp = 0.5 * (Qp + 1. / Qp);
        let Vp = (self.BrA * u).sin();
        let Up = (Vp * self.cosgam + Sp * self.singam) / Tp;
        if (Up.abs() - 1.).abs() < EPS {
            Ok((0., if Up < 0. { -FRAC_PI_2 } else { FRAC_PI_2 }, z))
        } else {
            let mut phi = self.E / ((1. + Up) / (1. - Up)).sqrt();
            phi = phi2(phi.powf(1. / self.B), self.e)?;
            let lam = -(Sp * self.cosgam - Vp * self.singam).atan2((self.BrA * u).cos()) / self.B;
            Ok((lam, phi, z))
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
    fn proj_omerc_alpha_roundtrip() {
        // Alaska zone 1 style definition
        let p = Proj::from_proj_string(concat!(
            "+proj=omerc +lat_0=57 +lonc=-133.6666666666667 ",
            "+alpha=-36.86989764583333 +k=0.9999 +ellps=GRS80"
        ))
        .unwrap();

        let d = p.data();
        for (lon, lat) in [(-133., 56.), (-134.5, 57.8), (-131., 55.)] {
            let (lam, phi) = (f64::to_radians(lon) - d.lam0, f64::to_radians(lat));
            let (x, y, _) = p.projection().forward(lam, phi, 0.).unwrap();
            let (lam2, phi2, _) = p.projection().inverse(x, y, 0.).unwrap();
            assert!((lam - lam2).abs() < 1e-9, "lon {lon}");
            assert!((phi - phi2).abs() < 1e-9, "lat {lat}");
        }
    }

    #[test]
    fn proj_omerc_no_uoff_roundtrip() {
        let p = Proj::from_proj_string(concat!(
            "+proj=omerc +lat_0=4 +lonc=102.25 +alpha=323.0257964666666 ",
            "+k=0.99984 +no_uoff +gamma=323.1301023611111 +ellps=GRS80"
        ))
        .unwrap();

        let d = p.data();
        for (lon, lat) in [(102., 4.), (104., 2.5)] {
            let (lam, phi) = (f64::to_radians(lon) - d.lam0, f64::to_radians(lat));
            let (x, y, _) = p.projection().forward(lam, phi, 0.).unwrap();
            let (lam2, phi2, _) = p.projection().inverse(x, y, 0.).unwrap();
            assert!((lam - lam2).abs() < 1e-9);
            assert!((phi - phi2).abs() < 1e-9);
        }
    }

    #[test]
    fn proj_omerc_twopoint_roundtrip() {
        let p = Proj::from_proj_string(concat!(
            "+proj=omerc +lat_0=40 +lon_1=-80 +lat_1=35 +lon_2=-70 +lat_2=45 ",
            "+ellps=GRS80"
        ))
        .unwrap();

        let d = p.data();
        for (lon, lat) in [(-75., 40.), (-78., 37.)] {
            let (lam, phi) = (f64::to_radians(lon) - d.lam0, f64::to_radians(lat));
            let (x, y, _) = p.projection().forward(lam, phi, 0.).unwrap();
            let (lam2, phi2, _) = p.projection().inverse(x, y, 0.).unwrap();
            assert!((lam - lam2).abs() < 1e-9);
            assert!((phi - phi2).abs() < 1e-9);
        }
    }
}
