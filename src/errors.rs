//!
//! Crate errors
//!

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("{0}")]
    InputStringError(&'static str),
    #[error("Missing value for parameter {0}")]
    NoValueParameter(String),
    #[error("Cannot retrieve value for parameter {0}")]
    ParameterValueError(String),
    #[error("Missing projection name")]
    MissingProjectionError,
    #[error("Unrecognized datum")]
    InvalidDatum,
    #[error("Unrecognized ellipsoid")]
    InvalidEllipsoid,
    #[error("Unrecognized unit")]
    InvalidUnit,
    #[error("{0}")]
    InvalidParameterValue(&'static str),
    #[error("Latitude out of range")]
    LatitudeOutOfRange,
    #[error("NAD grid not available")]
    NadGridNotAvailable,
    #[error("Parent grid not found")]
    NadGridParentNotFound,
    #[error("Inverse grid shift failed to converge")]
    InverseGridShiftConvError,
    #[error("Point outside of NAD shift area")]
    PointOutsideNadShiftArea,
    #[error("Invalid 'towgs84' string")]
    InvalidToWGS84String,
    #[error("Invalid axis")]
    InvalidAxis,
    #[error("Unrecognized format")]
    UnrecognizedFormat,
    #[error("Latitude or longitude over range")]
    LatOrLongExceedLimit,
    #[error("Coordinate out of range")]
    CoordinateOutOfRange,
    #[error("Projection not found")]
    ProjectionNotFound,
    #[error("No forward projection defined for dest projection")]
    NoForwardProjectionDefined,
    #[error("No inverse projection defined for src projection")]
    NoInverseProjectionDefined,
    #[error("Standard parallels are equal and opposite")]
    ProjErrConicLatEqual,
    #[error("Tolerance condition not satisfied")]
    ToleranceConditionError,
    #[error("Non convergence of phi2 calculation")]
    NonInvPhi2Convergence,
    #[error("Failed to compute inverse projection")]
    InverseProjectionFailure,
    #[error("Invalid UTM zone")]
    InvalidUtmZone,
    #[error("An ellipsoid is required")]
    EllipsoidRequired,
    #[error("Coordinate transform outside projection domain")]
    CoordTransOutsideProjectionDomain,
    #[error("No convergence for inv. meridian distance")]
    InvMeridDistConvError,
    #[error("Numerical argument too large")]
    ArgumentTooLarge,
    #[error("WKT error: {0}")]
    WktError(String),
    #[error("Invalid PROJJSON: {0}")]
    ProjJsonError(String),
    #[error("JSON error")]
    JsonError(#[from] serde_json::Error),
    #[error("Unknown EPSG code {0}")]
    UnknownEpsgCode(u32),
    #[error("Invalid Ntv2 grid format: {0}")]
    InvalidNtv2GridFormat(&'static str),
    #[error("Invalid GeoTIFF grid format: {0}")]
    InvalidGtiffGridFormat(&'static str),
    #[error("Unknown grid format")]
    UnknownGridFormat,
    #[error("Grid file not found {0}")]
    GridFileNotFound(String),
    #[error("IO error")]
    IoError(#[from] std::io::Error),
    #[error("UTF8 error")]
    Utf8Error(#[from] std::str::Utf8Error),
    #[cfg(feature = "network")]
    #[error("Remote request failed: {0}")]
    NetworkError(String),
    #[cfg(feature = "network")]
    #[error("Remote definition not found for {0}")]
    RemoteDefinitionNotFound(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
