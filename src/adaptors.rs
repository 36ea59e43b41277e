//!
//! Implementations for some useful adaptors
//!
use crate::errors::Result;
use crate::proj::Proj;
use crate::transform::{transform, Transform};

/// A 4d point
///
/// `x`/`y` carry either geographic radians or projected units depending
/// on the CRS, `z` goes through the vertical scaling only and `m` is a
/// user measure passed through unchanged.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub m: f64,
}

impl Point {
    pub fn new(x: f64, y: f64, z: f64, m: f64) -> Self {
        Self { x, y, z, m }
    }

    pub fn xy(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            z: 0.,
            m: 0.,
        }
    }
}

impl Transform for Point {
    fn transform_coordinates<F>(&mut self, mut f: F) -> Result<()>
    where
        F: FnMut(f64, f64, f64) -> Result<(f64, f64, f64)>,
    {
        f(self.x, self.y, self.z).map(|(x, y, z)| {
            self.x = x;
            self.y = y;
            self.z = z;
        })
    }
}

//
// Transform a 3-tuple
//
impl Transform for (f64, f64, f64) {
    fn transform_coordinates<F>(&mut self, mut f: F) -> Result<()>
    where
        F: FnMut(f64, f64, f64) -> Result<(f64, f64, f64)>,
    {
        (self.0, self.1, self.2) = f(self.0, self.1, self.2)?;
        Ok(())
    }
}

//
// Transform a 2-tuple, z is set to 0
//
impl Transform for (f64, f64) {
    fn transform_coordinates<F>(&mut self, mut f: F) -> Result<()>
    where
        F: FnMut(f64, f64, f64) -> Result<(f64, f64, f64)>,
    {
        (self.0, self.1) = f(self.0, self.1, 0.).map(|(x, y, _)| (x, y))?;
        Ok(())
    }
}

/// Transform a 3-tuple
pub fn transform_point_3d(src: &Proj, dst: &Proj, pt: (f64, f64, f64)) -> Result<(f64, f64, f64)> {
    let mut pt_out = pt;
    transform(src, dst, &mut pt_out)?;
    Ok(pt_out)
}

/// Transform a 2-tuple
#[inline(always)]
pub fn transform_point_2d(src: &Proj, dst: &Proj, pt: (f64, f64)) -> Result<(f64, f64)> {
    transform_point_3d(src, dst, (pt.0, pt.1, 0.)).map(|(x, y, _)| (x, y))
}

/// Transform x, y and z value
#[inline(always)]
pub fn transform_xyz(src: &Proj, dst: &Proj, x: f64, y: f64, z: f64) -> Result<(f64, f64, f64)> {
    transform_point_3d(src, dst, (x, y, z))
}

/// Transform x, y value (z is set to 0)
#[inline(always)]
pub fn transform_xy(src: &Proj, dst: &Proj, x: f64, y: f64) -> Result<(f64, f64)> {
    transform_xyz(src, dst, x, y, 0.).map(|(x, y, _)| (x, y))
}

//
// Transform an array of 3-tuple:
//
impl Transform for [(f64, f64, f64)] {
    fn transform_coordinates<F>(&mut self, mut f: F) -> Result<()>
    where
        F: FnMut(f64, f64, f64) -> Result<(f64, f64, f64)>,
    {
        self.iter_mut().try_for_each(|(x, y, z)| {
            (*x, *y, *z) = f(*x, *y, *z)?;
            Ok(())
        })
    }
}

//
// Transform an array of 2-tuple:
//
impl Transform for [(f64, f64)] {
    fn transform_coordinates<F>(&mut self, mut f: F) -> Result<()>
    where
        F: FnMut(f64, f64, f64) -> Result<(f64, f64, f64)>,
    {
        self.iter_mut().try_for_each(|(x, y)| {
            (*x, *y) = f(*x, *y, 0.).map(|(x, y, _)| (x, y))?;
            Ok(())
        })
    }
}

//
// Transform an array of Points
//
impl Transform for [Point] {
    fn transform_coordinates<F>(&mut self, mut f: F) -> Result<()>
    where
        F: FnMut(f64, f64, f64) -> Result<(f64, f64, f64)>,
    {
        self.iter_mut().try_for_each(|p| {
            (p.x, p.y, p.z) = f(p.x, p.y, p.z)?;
            Ok(())
        })
    }
}

/// Adaptor for a flat interleaved coordinate array `[x, y, x, y, ...]`
pub struct FlatCoordsXY<'a>(pub &'a mut [f64]);

impl Transform for FlatCoordsXY<'_> {
    fn transform_coordinates<F>(&mut self, mut f: F) -> Result<()>
    where
        F: FnMut(f64, f64, f64) -> Result<(f64, f64, f64)>,
    {
        self.0.chunks_exact_mut(2).try_for_each(|c| {
            let (x, y, _) = f(c[0], c[1], 0.)?;
            c[0] = x;
            c[1] = y;
            Ok(())
        })
    }
}

/// Adaptor for a flat interleaved coordinate array `[x, y, z, x, y, z, ...]`
pub struct FlatCoordsXYZ<'a>(pub &'a mut [f64]);

impl Transform for FlatCoordsXYZ<'_> {
    fn transform_coordinates<F>(&mut self, mut f: F) -> Result<()>
    where
        F: FnMut(f64, f64, f64) -> Result<(f64, f64, f64)>,
    {
        self.0.chunks_exact_mut(3).try_for_each(|c| {
            (c[0], c[1], c[2]) = f(c[0], c[1], c[2])?;
            Ok(())
        })
    }
}

/// Transform a flat array of interleaved x, y pairs
pub fn transform_flat_xy(src: &Proj, dst: &Proj, coords: &mut [f64]) -> Result<()> {
    transform(src, dst, &mut FlatCoordsXY(coords))
}

/// Transform a flat array of interleaved x, y, z triplets
pub fn transform_flat_xyz(src: &Proj, dst: &Proj, coords: &mut [f64]) -> Result<()> {
    transform(src, dst, &mut FlatCoordsXYZ(coords))
}

/// Transform an array of 3-tuples
#[inline(always)]
pub fn transform_point_array(src: &Proj, dst: &Proj, pts: &mut [(f64, f64, f64)]) -> Result<()> {
    transform(src, dst, pts)
}
