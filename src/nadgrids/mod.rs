//!
//! Handle Nadgrids
//!
//! A named grid is a list of regular latitude/longitude sub-grids.
//! Lookup picks the first root grid containing the query point, then
//! descends into its sub-grids.
//!
use crate::errors::{Error, Result};
use crate::transform::Direction;

mod catalog;
mod grid;
mod header;
mod ntv2;

#[cfg(feature = "geotiff")]
mod gtiff;

#[cfg(not(target_arch = "wasm32"))]
pub mod files;

pub use catalog::{catalog::add_grid, catalog::set_builder, Catalog, GridBuilder, GridRef};
pub use grid::Grid;
pub(crate) use grid::{GridId, Lp};

use catalog::catalog::find_grids;
use std::ops::ControlFlow;

/// NadGrids
///
/// Built from the comma separated grid sequence of a
/// definition. A leading `@` marks an optional grid.
#[derive(Debug)]
pub struct NadGrids(Vec<GridRef>);

impl Clone for NadGrids {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl PartialEq for NadGrids {
    fn eq(&self, other: &Self) -> bool {
        // Don't bother to compare all names
        self.0.is_empty() && other.0.is_empty()
    }
}

impl NadGrids {
    pub fn apply_shift(
        &self,
        dir: Direction,
        lam: f64,
        phi: f64,
        z: f64,
    ) -> Result<(f64, f64, f64)> {
        // Find the root grid containing the input
        let mut grid = self
            .0
            .iter()
            .find(|g| g.is_root() && g.matches(lam, phi))
            .ok_or(Error::PointOutsideNadShiftArea)?;

        // Descend into matching subgrids
        loop {
            match self
                .0
                .iter()
                .find(|g| !g.is_root() && g.lineage == grid.id && g.matches(lam, phi))
            {
                Some(child) => grid = child,
                None => break,
            }
        }

        grid.nad_cvt(dir, lam, phi, z)
    }

    /// Return a list of grids from the catalog
    ///
    /// Optional grids (leading '@') that cannot be loaded are skipped,
    /// a missing mandatory grid is an error. A `@null` entry terminates
    /// the list and allows it to be empty.
    pub fn new_grid_transform(names: &str) -> Result<Self> {
        let mut v: Vec<GridRef> = vec![];

        match names.split(',').try_for_each(|s| {
            let s = s.trim();
            if s == "@null" || s == "null" {
                // Allow empty list
                // Mark also the end of parsing
                ControlFlow::Break(true)
            } else if let Some(s) = s.strip_prefix('@') {
                // Optional grid
                find_grids(s, &mut v);
                ControlFlow::Continue(())
            } else {
                // Mandatory grid
                if find_grids(s, &mut v) {
                    ControlFlow::Continue(())
                } else {
                    ControlFlow::Break(false)
                }
            }
        }) {
            ControlFlow::Break(true) => Ok(Self(v)),
            ControlFlow::Break(false) => Err(Error::NadGridNotAvailable),
            _ => {
                if v.is_empty() {
                    Err(Error::NadGridNotAvailable)
                } else {
                    Ok(Self(v))
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::consts::SEC_TO_RAD;

    fn install_test_grid() {
        use std::io::Cursor;
        use std::sync::Once;
        static INIT: Once = Once::new();
        INIT.call_once(|| {
            crate::tests::setup();
            let data = ntv2::tests::sample_ntv2();
            let catalog = Catalog::default();
            ntv2::read_ntv2(&catalog, "testshift.gsb", &mut Cursor::new(&data)).unwrap();
            // move into the global catalog
            for g in catalog.find("testshift.gsb").unwrap() {
                // grids are static, re-register by value copy
                add_grid(
                    "testshift.gsb".into(),
                    Grid {
                        id: g.id,
                        lineage: g.lineage,
                        ll: g.ll,
                        ur: g.ur,
                        del: g.del,
                        lim: g.lim,
                        epsilon: g.epsilon,
                        cvs: g.cvs.clone(),
                    },
                )
                .unwrap();
            }
        });
    }

    #[test]
    fn nadgrids_shift_roundtrip() {
        install_test_grid();

        let grids = NadGrids::new_grid_transform("testshift.gsb").unwrap();

        // Sample point inside the grid: 1.5W, 50.5N
        let (lam, phi) = ((-1.5f64).to_radians(), 50.5f64.to_radians());
        let (lam2, phi2, _) = grids.apply_shift(Direction::Forward, lam, phi, 0.).unwrap();

        // Constant shift 1.0" west-positive on longitude, 0.5" on latitude
        assert!((lam2 - (lam - 1.0 * SEC_TO_RAD)).abs() < 1e-12);
        assert!((phi2 - (phi + 0.5 * SEC_TO_RAD)).abs() < 1e-12);

        let (lam3, phi3, _) = grids
            .apply_shift(Direction::Inverse, lam2, phi2, 0.)
            .unwrap();
        assert!((lam3 - lam).abs() < 1e-12);
        assert!((phi3 - phi).abs() < 1e-12);
    }

    #[test]
    fn nadgrids_missing_mandatory() {
        assert!(NadGrids::new_grid_transform("no_such_grid.gsb").is_err());
    }

    #[test]
    fn nadgrids_missing_optional() {
        install_test_grid();
        let grids = NadGrids::new_grid_transform("@no_such_grid.gsb,testshift.gsb").unwrap();
        assert!(grids
            .apply_shift(
                Direction::Forward,
                (-1.5f64).to_radians(),
                50.5f64.to_radians(),
                0.
            )
            .is_ok());
    }

    #[test]
    fn nadgrids_point_outside() {
        install_test_grid();
        let grids = NadGrids::new_grid_transform("testshift.gsb").unwrap();
        assert!(grids
            .apply_shift(Direction::Forward, 0.5, 0.5, 0.)
            .is_err());
    }
}
