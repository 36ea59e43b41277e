//!
//! # WKT CRS parser
//!
//! Convert OGC WKT CRS definitions to proj strings.
//!
//! Supports both WKT1 and WKT2 formats; both are folded through the
//! same neutral CRS description and converge on the same projstring
//! emitter as the PROJJSON transformer.
//!
mod builder;
mod methods;
mod model;
mod params;
mod parser;
mod projstr;

use crate::errors::Result;

pub(crate) use builder::{is_wkt, normalize};
pub(crate) use methods::find_method_mapping;
pub(crate) use model::{
    Crs, DatumRef, EllipsoidRef, GeogCrs, MethodRef, ParameterRef, ProjCrs, Unit, UnitType,
};
pub(crate) use projstr::Formatter;

/// Convert a WKT string to a projstring
pub fn to_projstring(i: &str) -> Result<String> {
    builder::build(i).and_then(|crs| Formatter::new().format(&crs))
}
