//!
//! Projection parameter mapping
//!
//! Maps WKT2 / WKT1 / PROJJSON parameter names and EPSG codes to proj
//! parameter names. Matching is case-insensitive and ignores the
//! space/underscore distinction, which also covers the snake_case
//! PROJJSON spellings.
//!
use crate::wkt::model::UnitType;

pub(crate) struct ParamMapping {
    pub wkt2_name: &'static str,
    pub epsg_code: &'static str,
    pub wkt1_name: &'static str,
    pub proj_name: &'static str,
    pub unit_type: UnitType,
}

macro_rules! param {
    ($name:ident, $wkt2:expr, $code:expr, $wkt1:expr, $proj:expr, $unit:ident) => {
        pub(crate) const $name: ParamMapping = ParamMapping {
            wkt2_name: $wkt2,
            epsg_code: $code,
            wkt1_name: $wkt1,
            proj_name: $proj,
            unit_type: UnitType::$unit,
        };
    };
}

#[rustfmt::skip]
mod defs {
    use super::*;

    param!(LATITUDE_NAT_ORIGIN,   "Latitude of natural origin",         "8801", "latitude_of_origin",   "lat_0",  Angular);
    param!(LONGITUDE_NAT_ORIGIN,  "Longitude of natural origin",        "8802", "central_meridian",     "lon_0",  Angular);
    param!(SCALE_FACTOR,          "Scale factor at natural origin",     "8805", "scale_factor",         "k_0",    Scale);
    param!(FALSE_EASTING,         "False easting",                      "8806", "false_easting",        "x_0",    Linear);
    param!(FALSE_NORTHING,        "False northing",                     "8807", "false_northing",       "y_0",    Linear);
    param!(LAT_PROJ_CENTRE,       "Latitude of projection centre",      "8811", "latitude_of_center",   "lat_0",  Angular);
    param!(LONG_PROJ_CENTRE,      "Longitude of projection centre",     "8812", "longitude_of_center",  "lonc",   Angular);
    param!(AZIMUTH,               "Azimuth at projection centre",       "8813", "azimuth",              "alpha",  Angular);
    param!(AZIMUTH_INITIAL_LINE,  "Azimuth of initial line",            "8813", "azimuth",              "alpha",  Angular);
    param!(RECTIFIED_GRID_ANGLE,  "Angle from Rectified to Skew Grid",  "8814", "rectified_grid_angle", "gamma",  Angular);
    param!(SCALE_INITIAL_LINE,    "Scale factor on initial line",       "8815", "scale_factor",         "k_0",    Scale);
    param!(EASTING_PROJ_CENTRE,   "Easting at projection centre",       "8816", "false_easting",        "x_0",    Linear);
    param!(NORTHING_PROJ_CENTRE,  "Northing at projection centre",      "8817", "false_northing",       "y_0",    Linear);
    param!(LATITUDE_FALSE_ORIGIN, "Latitude of false origin",           "8821", "latitude_of_origin",   "lat_0",  Angular);
    param!(LONGITUDE_FALSE_ORIGIN,"Longitude of false origin",          "8822", "central_meridian",     "lon_0",  Angular);
    param!(LATITUDE_1ST_PARALLEL, "Latitude of 1st standard parallel",  "8823", "standard_parallel_1",  "lat_1",  Angular);
    param!(LATITUDE_2ND_PARALLEL, "Latitude of 2nd standard parallel",  "8824", "standard_parallel_2",  "lat_2",  Angular);
    param!(EASTING_FALSE_ORIGIN,  "Easting at false origin",            "8826", "false_easting",        "x_0",    Linear);
    param!(NORTHING_FALSE_ORIGIN, "Northing at false origin",           "8827", "false_northing",       "y_0",    Linear);
    param!(LAT_STD_PARALLEL,      "Latitude of standard parallel",      "8832", "standard_parallel_1",  "lat_ts", Angular);
    param!(LONGITUDE_OF_ORIGIN,   "Longitude of origin",                "8833", "central_meridian",     "lon_0",  Angular);
    param!(LAT_1ST_PARALLEL_TS,   "Latitude of 1st standard parallel",  "8823", "standard_parallel_1",  "lat_ts", Angular);
    param!(LAT_LCC_1SP,           "Latitude of natural origin",         "8801", "latitude_of_origin",   "lat_1",  Angular);
    param!(LAT_NAT_OR_CENTER,     "Latitude of natural origin",         "8801", "latitude_of_center",   "lat_0",  Angular);
    param!(LONG_NAT_OR_CENTER,    "Longitude of natural origin",        "8802", "longitude_of_center",  "lon_0",  Angular);
    param!(LAT_FALSE_OR_CENTER,   "Latitude of false origin",           "8821", "latitude_of_center",   "lat_0",  Angular);
    param!(LONG_FALSE_OR_CENTER,  "Longitude of false origin",          "8822", "longitude_of_center",  "lon_0",  Angular);
}

pub(crate) use defs::*;

fn name_eq(a: &str, b: &str) -> bool {
    let mut ai = a.chars().map(|c| match c {
        ' ' => '_',
        c => c.to_ascii_lowercase(),
    });
    let mut bi = b.chars().map(|c| match c {
        ' ' => '_',
        c => c.to_ascii_lowercase(),
    });
    loop {
        match (ai.next(), bi.next()) {
            (None, None) => return true,
            (Some(x), Some(y)) if x == y => continue,
            _ => return false,
        }
    }
}

impl ParamMapping {
    /// Match against a parameter name or EPSG code
    pub(crate) fn matches(&self, name: &str, code: Option<&str>) -> bool {
        if let Some(code) = code {
            if !self.epsg_code.is_empty() && self.epsg_code == code {
                return true;
            }
        }
        name_eq(self.wkt2_name, name) || name_eq(self.wkt1_name, name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn param_name_matching() {
        assert!(LATITUDE_NAT_ORIGIN.matches("latitude_of_natural_origin", None));
        assert!(LATITUDE_NAT_ORIGIN.matches("Latitude of natural origin", None));
        assert!(LATITUDE_NAT_ORIGIN.matches("latitude_of_origin", None));
        assert!(LATITUDE_NAT_ORIGIN.matches("anything", Some("8801")));
        assert!(!LATITUDE_NAT_ORIGIN.matches("standard_parallel_1", None));
    }
}
