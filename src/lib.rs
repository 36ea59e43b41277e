//!
//! Coordinate transformation library
//!
//! Transforms geographic coordinates between arbitrary geodetic
//! coordinate reference systems, compatible with the proj4 / proj4js
//! semantics and numeric results.
//!
//! References:
//! * <http://docs.opengeospatial.org/as/18-005r5/18-005r5.html>
//! * <https://proj.org/development/reference/cpp/cpp_general.html>
//!
//! CRS definitions are accepted as proj strings, OGC WKT1 / WKT2, raw
//! PROJJSON objects and `EPSG:<code>` shortcuts; all of them fold into
//! the same compiled [`Proj`] record. Angular coordinates are expressed
//! in radians, projected coordinates in the units of their CRS.
//!

mod datum_params;
mod datum_transform;
mod datums;
mod ellipsoids;
mod ellps;
mod epsg;
mod geocent;
mod math;
mod parameters;
mod prime_meridians;
mod projstring;
mod units;

pub mod adaptors;
pub mod context;
pub mod errors;
pub mod nadgrids;
pub mod proj;
pub mod projections;
pub mod projjson;
pub mod transform;
pub mod wkt;

#[cfg(feature = "network")]
pub mod network;

// Reexport
pub use adaptors::Point;
pub use context::{parse, transform as transform_defs, Context, Converter};
pub use proj::Proj;

#[cfg(test)]
mod tests;

// log for logging (optional).
#[cfg(feature = "logging")]
use log;

#[cfg(not(feature = "logging"))]
mod log {
    // Use __XXX__ to prevent 'ambiguous name' error
    // when exporting
    macro_rules! __trace__    ( ($($tt:tt)*) => {{}} );
    macro_rules! __debug__    ( ($($tt:tt)*) => {{}} );
    macro_rules! __error__    ( ($($tt:tt)*) => {{}} );
    macro_rules! __info__     ( ($($tt:tt)*) => {{}} );
    macro_rules! __warn__     ( ($($tt:tt)*) => {{}} );

    #[allow(unused_imports)]
    pub(crate) use {
        __debug__ as debug, __error__ as error, __info__ as info, __trace__ as trace,
        __warn__ as warn,
    };
}
