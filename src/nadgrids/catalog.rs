//!
//! Grid catalog
//!
//! Maintains the process-wide list of loaded grids. Loaded grids are
//! leaked to static lifetime: they live for the process lifetime and are
//! shared freely between compiled [`crate::proj::Proj`] instances.
//!
use super::grid::Grid;
use crate::errors::{Error, Result};
use std::sync::Mutex;

/// Nadgrid builder: called on catalog misses to load and register the
/// named grid. Returns an error if no grid can be found or if loading
/// fails.
pub type GridBuilder = fn(&Catalog, &str) -> Result<()>;

/// Static reference to a loaded grid
///
/// Grids have a static lifetime on the heap,
/// they are never deallocated.
pub type GridRef = &'static Grid;

struct Node {
    name: String,
    grid: GridRef,
}

/// Catalog of loaded grids
///
/// A single named grid file may contribute several entries: the root
/// grids and their subgrids, in file order.
pub struct Catalog {
    nodes: Mutex<Vec<Node>>,
    builder: Mutex<Option<GridBuilder>>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self {
            nodes: Mutex::new(vec![]),
            builder: Mutex::new(None),
        }
    }
}

impl Catalog {
    /// Set a builder callback, return the previous builder if any
    pub fn set_builder(&self, builder: GridBuilder) -> Option<GridBuilder> {
        self.builder.lock().unwrap().replace(builder)
    }

    /// Find grids from the name of their containing file
    ///
    /// Returns all the grids contributed by the file, roots first
    /// in file order.
    pub(crate) fn find(&self, name: &str) -> Option<std::vec::IntoIter<GridRef>> {
        let nodes = self.nodes.lock().unwrap();
        let found: Vec<GridRef> = nodes
            .iter()
            .filter(|n| n.name == name)
            .map(|n| n.grid)
            .collect();
        if found.is_empty() {
            None
        } else {
            Some(found.into_iter())
        }
    }

    /// Add a grid to the catalog
    ///
    /// A non-root grid requires its parent to be already registered.
    pub(crate) fn add_grid(&self, name: String, grid: Grid) -> Result<()> {
        let mut nodes = self.nodes.lock().unwrap();
        if !grid.is_root()
            && !nodes
                .iter()
                .any(|n| n.name == name && n.grid.id == grid.lineage)
        {
            return Err(Error::NadGridParentNotFound);
        }
        let grid: GridRef = Box::leak(Box::new(grid));
        nodes.push(Node { name, grid });
        Ok(())
    }

    fn resolve(&self, name: &str, grids: &mut Vec<GridRef>) -> bool {
        match self.find(name) {
            Some(iter) => {
                grids.extend(iter);
                true
            }
            None => {
                let builder = *self.builder.lock().unwrap();
                builder
                    .and_then(|b| {
                        if let Err(_err) = b(self, name) {
                            crate::log::error!("Failed to load grid {}: {:?}", name, _err);
                        }
                        self.find(name).map(|iter| grids.extend(iter))
                    })
                    .is_some()
            }
        }
    }
}

pub(crate) mod catalog {
    //! The process-wide catalog instance
    use super::*;
    use lazy_static::lazy_static;

    lazy_static! {
        static ref CATALOG: Catalog = Catalog::default();
    }

    /// Collect grids for `name`, loading them through the
    /// installed builder on a catalog miss.
    pub(crate) fn find_grids(name: &str, grids: &mut Vec<GridRef>) -> bool {
        CATALOG.resolve(name, grids)
    }

    pub fn add_grid(name: String, grid: Grid) -> Result<()> {
        CATALOG.add_grid(name, grid)
    }

    pub fn set_builder(builder: GridBuilder) -> Option<GridBuilder> {
        CATALOG.set_builder(builder)
    }
}
