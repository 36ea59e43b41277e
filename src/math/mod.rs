//!
//! Shared ellipsoidal and series helpers
//!
//! These are the conventional proj auxiliary functions reused across
//! conformal, equal-area and conic projections.
//!

pub(crate) mod consts {
    //!
    //! Define constants
    //!

    // Note that TAU is 2*PI
    // see https://doc.rust-lang.org/std/f64/consts/constant.TAU.html
    pub(crate) use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI, TAU};

    // Was defined in proj4js for preventing divergence
    // of the Mollweide algorithm
    pub(crate) const EPS_10: f64 = 1.0e-10;

    // Other value of epsilon used
    pub(crate) const EPS_12: f64 = 1.0e-12;

    // Other value of epsilon used
    pub(crate) const EPS_7: f64 = 1.0e-7;

    // XXX float has excessive precision
    //pub const SEC_TO_RAD: f64 = 4.84813681109535993589914102357e-6;
    pub(crate) const SEC_TO_RAD: f64 = 4.848_136_811_095_36e-6;
}

// Rust define asinh as
//
// ```rust
// pub fn asinh(self) -> f64 {
//     (self.abs() + ((self * self) + 1.0).sqrt()).ln().copysign(self)
// }
// ```
//
// which use a naive hypot and may overflow for large inputs.
// We use our own implementation with [`f64::hypot`]: this gives accurate
// results for 0.89e308f64 while `f64::asinh` returns `f64::INFINITY`.
#[inline]
pub(crate) fn asinh(x: f64) -> f64 {
    (x.abs() + 1.0f64.hypot(x)).ln().copysign(x)
}

mod aasincos;
mod adjlon;
mod auth;
mod gauss;
mod mlfn;
mod msfn;
mod phi2;
mod qsfn;
mod tsfn;

pub(crate) use aasincos::{aasin, aatan2, asqrt};
pub(crate) use adjlon::adjlon;
pub(crate) use auth::{authlat, authset, Apa};
pub(crate) use gauss::{gauss, gauss_ini, inv_gauss, Gauss};
pub(crate) use mlfn::{enfn, inv_mlfn, mlfn, Enfn};
pub(crate) use msfn::msfn;
pub(crate) use phi2::phi2;
pub(crate) use qsfn::qsfn;
pub(crate) use tsfn::tsfn;
