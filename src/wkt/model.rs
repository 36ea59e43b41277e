//!
//! Neutral CRS description produced by the WKT builder and the PROJJSON
//! transformer, consumed by the projstring formatter.
//!
#![allow(clippy::upper_case_acronyms)]

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum UnitType {
    Linear,
    Angular,
    Scale,
    Unknown,
}

#[derive(Debug, Clone)]
pub(crate) struct Unit {
    pub name: String,
    /// Conversion factor to meters (linear) or radians (angular)
    pub factor: f64,
    pub unit_type: UnitType,
}

#[derive(Debug, Clone)]
pub(crate) struct MethodRef {
    pub name: String,
    /// EPSG method code when carried by an AUTHORITY/ID node
    pub code: Option<String>,
}

#[derive(Debug, Clone)]
pub(crate) struct ParameterRef {
    pub name: String,
    pub code: Option<String>,
    pub value: f64,
    pub unit: Option<Unit>,
}

#[derive(Debug, Clone)]
pub(crate) struct EllipsoidRef {
    /// Semi major axis, in the ellipsoid unit
    pub a: f64,
    /// Inverse flattening, 0 for a sphere
    pub rf: f64,
    pub unit: Option<Unit>,
}

#[derive(Debug, Clone)]
pub(crate) struct DatumRef {
    pub name: String,
    pub ellipsoid: EllipsoidRef,
    /// 0, 3 or 7 Helmert terms
    pub to_wgs84: Vec<f64>,
}

#[derive(Debug, Clone)]
pub(crate) struct GeogCrs {
    pub name: String,
    pub datum: DatumRef,
    /// Degrees east of Greenwich
    pub prime_meridian: f64,
}

#[derive(Debug, Clone)]
pub(crate) struct ProjCrs {
    pub name: String,
    pub geogcs: GeogCrs,
    pub method: MethodRef,
    pub parameters: Vec<ParameterRef>,
    /// The map unit
    pub unit: Option<Unit>,
    /// Axis directions collated by order, e.g. "enu"
    pub axis: Option<String>,
}

#[derive(Debug, Clone)]
pub(crate) enum Crs {
    Geographic(GeogCrs),
    Projected(ProjCrs),
}
