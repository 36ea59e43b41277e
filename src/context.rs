//!
//! Definition cache and high level entry points
//!
//! A [`Context`] owns the cache that maps definition text to compiled
//! [`Proj`] instances. Compiled definitions are immutable and shared;
//! the cache is populated lazily and cleared only on explicit request.
//!
//! A process-wide default context backs the free functions
//! [`parse`], [`transform`] and [`Converter::new`].
//!
use crate::errors::Result;
use crate::proj::Proj;
use crate::transform::{self, Transform};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Owns the definition cache
#[derive(Default)]
pub struct Context {
    defns: Mutex<HashMap<String, Arc<Proj>>>,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the compiled definition, compiling and caching
    /// it on the first use.
    pub fn parse(&self, defn: &str) -> Result<Arc<Proj>> {
        let mut defns = self.defns.lock().unwrap();
        if let Some(p) = defns.get(defn) {
            return Ok(p.clone());
        }
        let p = Arc::new(Proj::from_user_string(defn)?);
        defns.insert(defn.into(), p.clone());
        Ok(p)
    }

    /// Drop all cached definitions
    pub fn clear(&self) {
        self.defns.lock().unwrap().clear();
    }

    /// Transform points between two definitions
    pub fn transform<P>(&self, from: &str, to: &str, points: &mut P) -> Result<()>
    where
        P: Transform + ?Sized,
    {
        let src = self.parse(from)?;
        let dst = self.parse(to)?;
        transform::transform(&src, &dst, points)
    }
}

mod default_ctx {
    use super::*;
    use lazy_static::lazy_static;

    lazy_static! {
        pub(super) static ref DEFAULT_CONTEXT: Context = Context::new();
    }
}

/// The process-wide default context
pub fn default_context() -> &'static Context {
    &default_ctx::DEFAULT_CONTEXT
}

/// Parse a definition through the default context
pub fn parse(defn: &str) -> Result<Arc<Proj>> {
    default_context().parse(defn)
}

/// Transform points between two definitions through the
/// default context
pub fn transform<P>(from: &str, to: &str, points: &mut P) -> Result<()>
where
    P: Transform + ?Sized,
{
    default_context().transform(from, to, points)
}

/// A reusable transformation between two definitions
///
/// `forward` maps from the source to the destination CRS,
/// `inverse` goes the other way.
pub struct Converter {
    src: Arc<Proj>,
    dst: Arc<Proj>,
}

impl Converter {
    /// Build a converter from the default context
    pub fn new(from: &str, to: &str) -> Result<Self> {
        Self::with_context(default_context(), from, to)
    }

    /// Build a converter from an explicit context
    pub fn with_context(ctx: &Context, from: &str, to: &str) -> Result<Self> {
        Ok(Self {
            src: ctx.parse(from)?,
            dst: ctx.parse(to)?,
        })
    }

    pub fn source(&self) -> &Proj {
        &self.src
    }

    pub fn destination(&self) -> &Proj {
        &self.dst
    }

    pub fn forward<P>(&self, points: &mut P) -> Result<()>
    where
        P: Transform + ?Sized,
    {
        transform::transform(&self.src, &self.dst, points)
    }

    pub fn inverse<P>(&self, points: &mut P) -> Result<()>
    where
        P: Transform + ?Sized,
    {
        transform::transform(&self.dst, &self.src, points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn context_cache_shares_definitions() {
        let ctx = Context::new();
        let p1 = ctx.parse("+proj=merc +ellps=GRS80").unwrap();
        let p2 = ctx.parse("+proj=merc +ellps=GRS80").unwrap();
        assert!(Arc::ptr_eq(&p1, &p2));

        ctx.clear();
        let p3 = ctx.parse("+proj=merc +ellps=GRS80").unwrap();
        assert!(!Arc::ptr_eq(&p1, &p3));
    }

    #[test]
    fn context_converter_roundtrip() {
        let conv = Converter::new("EPSG:4326", "EPSG:3857").unwrap();

        let mut pt = (10.0f64.to_radians(), 0.0);
        conv.forward(&mut pt).unwrap();
        assert_abs_diff_eq!(pt.0, 1113194.9079327357, epsilon = 1.0);
        assert_abs_diff_eq!(pt.1, 0.0, epsilon = 1.0e-2);

        conv.inverse(&mut pt).unwrap();
        assert_abs_diff_eq!(pt.0, 10.0f64.to_radians(), epsilon = 1.0e-9);
        assert_abs_diff_eq!(pt.1, 0.0, epsilon = 1.0e-9);
    }
}
