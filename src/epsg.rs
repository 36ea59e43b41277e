//!
//! EPSG short-code resolution
//!
//! A handful of codes are resolved offline: the geographic and Web
//! Mercator staples and the WGS84 UTM ranges. Everything else goes
//! through the `crs-definitions` tables when the `epsg-defs` feature is
//! enabled, then to the remote definition fetcher when the `network`
//! feature is enabled.
//!
use crate::errors::{Error, Result};

pub(crate) const WGS84_LONGLAT: &str = "+proj=longlat +datum=WGS84 +no_defs";
const NAD83_LONGLAT: &str = "+proj=longlat +datum=NAD83 +no_defs";
const WEB_MERCATOR: &str = "+proj=webmerc +datum=WGS84 +units=m +no_defs";

/// Resolve an `EPSG:<code>` shortcut into a proj string
pub fn lookup(code: u32) -> Result<String> {
    match code {
        4326 => Ok(WGS84_LONGLAT.into()),
        4269 => Ok(NAD83_LONGLAT.into()),
        3857 | 3785 | 900913 | 102113 => Ok(WEB_MERCATOR.into()),
        // WGS84 UTM zones north
        32601..=32660 => Ok(format!(
            "+proj=utm +zone={} +datum=WGS84 +units=m +no_defs",
            code - 32600
        )),
        // WGS84 UTM zones south
        32701..=32760 => Ok(format!(
            "+proj=utm +zone={} +south +datum=WGS84 +units=m +no_defs",
            code - 32700
        )),
        _ => extended_lookup(code),
    }
}

#[cfg(feature = "epsg-defs")]
fn extended_lookup(code: u32) -> Result<String> {
    crs_definitions::from_code(code as u16)
        .map(|def| def.proj4.to_string())
        .ok_or(Error::UnknownEpsgCode(code))
}

#[cfg(all(not(feature = "epsg-defs"), feature = "network"))]
fn extended_lookup(code: u32) -> Result<String> {
    crate::network::fetch_epsg_projjson("EPSG", code)
        .and_then(|json| crate::projjson::to_projstring(&json))
}

#[cfg(all(not(feature = "epsg-defs"), not(feature = "network")))]
fn extended_lookup(code: u32) -> Result<String> {
    Err(Error::UnknownEpsgCode(code))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn epsg_shortcuts() {
        assert_eq!(lookup(4326).unwrap(), WGS84_LONGLAT);
        assert_eq!(
            lookup(32619).unwrap(),
            "+proj=utm +zone=19 +datum=WGS84 +units=m +no_defs"
        );
        assert_eq!(
            lookup(32733).unwrap(),
            "+proj=utm +zone=33 +south +datum=WGS84 +units=m +no_defs"
        );
        assert!(lookup(3857).unwrap().contains("webmerc"));
    }

    #[cfg(not(any(feature = "epsg-defs", feature = "network")))]
    #[test]
    fn epsg_unknown_code() {
        assert!(matches!(
            lookup(26986).unwrap_err(),
            crate::errors::Error::UnknownEpsgCode(26986)
        ));
    }
}
