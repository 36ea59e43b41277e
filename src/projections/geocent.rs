//
// Geocentric pseudo projection: the actual conversion to cartesian
// coordinates is handled by the transform pipeline, forward and
// inverse are structural passes.
//
use crate::errors::Result;
use crate::parameters::ParamList;
use crate::proj::ProjData;

// Projection stub
super::projection! { geocent, cart }

#[derive(Debug, Clone)]
pub(crate) struct Projection {}

impl Projection {
    fn new(p: &mut ProjData, _params: &ParamList) -> Result<Self> {
        p.x0 = 0.;
        p.y0 = 0.;
        Ok(Self {})
    }

    pub fn geocent(p: &mut ProjData, params: &ParamList) -> Result<Self> {
        Self::new(p, params)
    }

    pub fn cart(p: &mut ProjData, params: &ParamList) -> Result<Self> {
        Self::new(p, params)
    }

    #[inline(always)]
    pub fn forward(&self, lam: f64, phi: f64, z: f64) -> Result<(f64, f64, f64)> {
        Ok((lam, phi, z))
    }

    #[inline(always)]
    pub fn inverse(&self, x: f64, y: f64, z: f64) -> Result<(f64, f64, f64)> {
        Ok((x, y, z))
    }

    pub const fn has_inverse() -> bool {
        true
    }

    pub const fn has_forward() -> bool {
        true
    }
}
