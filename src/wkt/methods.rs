//!
//! Projection method mapping
//!
//! Maps WKT2 method names (shared with PROJJSON), EPSG method codes and
//! WKT1 projection names to proj projection names, together with the
//! parameter mappings relevant for the method.
//!
use crate::wkt::model::MethodRef;
use crate::wkt::params::{self, ParamMapping};

pub(crate) struct MethodMapping {
    pub wkt2_name: &'static str,
    pub epsg_code: &'static str,
    pub wkt1_name: &'static str,
    pub proj_name: &'static str,
    pub proj_aux: &'static str,
    pub param_mapping: &'static [&'static ParamMapping],
}

impl MethodMapping {
    pub fn proj_name(&self) -> &'static str {
        self.proj_name
    }

    pub fn proj_aux(&self) -> &'static str {
        self.proj_aux
    }

    /// Look up the mapped proj parameter
    pub fn find_proj_param(&self, name: &str, code: Option<&str>) -> Option<&'static ParamMapping> {
        self.param_mapping
            .iter()
            .find(|pp| pp.matches(name, code))
            .copied()
    }
}

macro_rules! method {
    {$wkt2:expr, $code:expr, $wkt1:expr, $proj:expr, $aux:expr, $mapping:expr} => {
        MethodMapping {
            wkt2_name: $wkt2,
            epsg_code: $code,
            wkt1_name: $wkt1,
            proj_name: $proj,
            proj_aux: $aux,
            param_mapping: $mapping,
        }
    };
}

mod parameters {
    use super::params::{self, ParamMapping};

    pub const NAT_ORIGIN: [&ParamMapping; 4] = [
        &params::LATITUDE_NAT_ORIGIN,
        &params::LONGITUDE_NAT_ORIGIN,
        &params::FALSE_EASTING,
        &params::FALSE_NORTHING,
    ];

    pub const LONG_NAT_ORIGIN: [&ParamMapping; 3] = [
        &params::LONGITUDE_NAT_ORIGIN,
        &params::FALSE_EASTING,
        &params::FALSE_NORTHING,
    ];

    pub const NAT_ORIGIN_SCALE_K: [&ParamMapping; 5] = [
        &params::LATITUDE_NAT_ORIGIN,
        &params::LONGITUDE_NAT_ORIGIN,
        &params::SCALE_FACTOR,
        &params::FALSE_EASTING,
        &params::FALSE_NORTHING,
    ];

    pub const LCC_1SP: [&ParamMapping; 5] = [
        &params::LAT_LCC_1SP,
        &params::LONGITUDE_NAT_ORIGIN,
        &params::SCALE_FACTOR,
        &params::FALSE_EASTING,
        &params::FALSE_NORTHING,
    ];

    pub const LCC_2SP: [&ParamMapping; 6] = [
        &params::LATITUDE_FALSE_ORIGIN,
        &params::LONGITUDE_FALSE_ORIGIN,
        &params::LATITUDE_1ST_PARALLEL,
        &params::LATITUDE_2ND_PARALLEL,
        &params::EASTING_FALSE_ORIGIN,
        &params::NORTHING_FALSE_ORIGIN,
    ];

    pub const AEA: [&ParamMapping; 6] = [
        &params::LAT_FALSE_OR_CENTER,
        &params::LONG_FALSE_OR_CENTER,
        &params::LATITUDE_1ST_PARALLEL,
        &params::LATITUDE_2ND_PARALLEL,
        &params::EASTING_FALSE_ORIGIN,
        &params::NORTHING_FALSE_ORIGIN,
    ];

    pub const EQDC: [&ParamMapping; 6] = [
        &params::LAT_NAT_OR_CENTER,
        &params::LONG_NAT_OR_CENTER,
        &params::LATITUDE_1ST_PARALLEL,
        &params::LATITUDE_2ND_PARALLEL,
        &params::FALSE_EASTING,
        &params::FALSE_NORTHING,
    ];

    pub const LAEA: [&ParamMapping; 4] = [
        &params::LAT_NAT_OR_CENTER,
        &params::LONG_NAT_OR_CENTER,
        &params::FALSE_EASTING,
        &params::FALSE_NORTHING,
    ];

    pub const MERC_1SP: [&ParamMapping; 5] = [
        &params::LATITUDE_NAT_ORIGIN,
        &params::LONGITUDE_NAT_ORIGIN,
        &params::SCALE_FACTOR,
        &params::FALSE_EASTING,
        &params::FALSE_NORTHING,
    ];

    pub const MERC_2SP: [&ParamMapping; 4] = [
        &params::LAT_1ST_PARALLEL_TS,
        &params::LONGITUDE_NAT_ORIGIN,
        &params::FALSE_EASTING,
        &params::FALSE_NORTHING,
    ];

    pub const POLAR_STEREO_B: [&ParamMapping; 4] = [
        &params::LAT_STD_PARALLEL,
        &params::LONGITUDE_OF_ORIGIN,
        &params::FALSE_EASTING,
        &params::FALSE_NORTHING,
    ];

    pub const OBLIQUE_STEREO: [&ParamMapping; 5] = [
        &params::LATITUDE_NAT_ORIGIN,
        &params::LONGITUDE_NAT_ORIGIN,
        &params::SCALE_FACTOR,
        &params::FALSE_EASTING,
        &params::FALSE_NORTHING,
    ];

    pub const OMERC: [&ParamMapping; 7] = [
        &params::LAT_PROJ_CENTRE,
        &params::LONG_PROJ_CENTRE,
        &params::AZIMUTH_INITIAL_LINE,
        &params::RECTIFIED_GRID_ANGLE,
        &params::SCALE_INITIAL_LINE,
        &params::FALSE_EASTING,
        &params::FALSE_NORTHING,
    ];

    pub const OMERC_CENTER: [&ParamMapping; 7] = [
        &params::LAT_PROJ_CENTRE,
        &params::LONG_PROJ_CENTRE,
        &params::AZIMUTH,
        &params::RECTIFIED_GRID_ANGLE,
        &params::SCALE_INITIAL_LINE,
        &params::EASTING_PROJ_CENTRE,
        &params::NORTHING_PROJ_CENTRE,
    ];

    pub const CEA: [&ParamMapping; 4] = [
        &params::LAT_1ST_PARALLEL_TS,
        &params::LONGITUDE_NAT_ORIGIN,
        &params::FALSE_EASTING,
        &params::FALSE_NORTHING,
    ];

    pub const EQC: [&ParamMapping; 5] = [
        &params::LAT_1ST_PARALLEL_TS,
        &params::LONGITUDE_NAT_ORIGIN,
        &params::LATITUDE_NAT_ORIGIN,
        &params::FALSE_EASTING,
        &params::FALSE_NORTHING,
    ];
}

#[rustfmt::skip]
pub(crate) const METHOD_MAPPINGS: [MethodMapping; 31] = [
    method! {"Gnomonic", "", "Gnomonic", "gnom", "", &parameters::NAT_ORIGIN},
    method! {"Lambert Cylindrical Equal Area", "9835", "Cylindrical_Equal_Area", "cea", "", &parameters::CEA},
    method! {"Transverse Mercator", "9807", "Transverse_Mercator", "tmerc", "", &parameters::NAT_ORIGIN_SCALE_K},
    method! {"Transverse Mercator (South Orientated)", "9808", "Transverse_Mercator_South_Orientated", "tmerc", "+axis=wsu",
    &parameters::NAT_ORIGIN_SCALE_K},
    method! {"Albers Equal Area", "9822", "Albers_Conic_Equal_Area", "aea", "", &parameters::AEA},
    method! {"Lambert Conic Conformal (1SP)", "9801", "Lambert_Conformal_Conic_1SP", "lcc", "", &parameters::LCC_1SP},
    method! {"Lambert Conic Conformal (2SP)", "9802", "Lambert_Conformal_Conic_2SP", "lcc", "", &parameters::LCC_2SP},
    method! {"Lambert Conic Conformal (2SP Belgium)", "9803", "Lambert_Conformal_Conic_2SP_Belgium", "lcc", "",
    &parameters::LCC_2SP},
    method! {"Lambert Azimuthal Equal Area", "9820", "Lambert_Azimuthal_Equal_Area", "laea", "", &parameters::LAEA},
    method! {"Lambert Azimuthal Equal Area (Spherical)", "1027", "Lambert_Azimuthal_Equal_Area", "laea", "+R_A",
    &parameters::LAEA},
    method! {"Mercator (variant A)", "9804", "Mercator_1SP", "merc", "", &parameters::MERC_1SP},
    method! {"Mercator (variant B)", "9805", "Mercator_2SP", "merc", "", &parameters::MERC_2SP},
    method! {"Popular Visualisation Pseudo Mercator", "1024", "Popular_Visualisation_Pseudo_Mercator", "webmerc", "",
    &parameters::NAT_ORIGIN},
    method! {"Mollweide", "", "Mollweide", "moll", "", &parameters::LONG_NAT_ORIGIN},
    method! {"Wagner IV", "", "Wagner_IV", "wag4", "", &parameters::LONG_NAT_ORIGIN},
    method! {"Wagner V", "", "Wagner_V", "wag5", "", &parameters::LONG_NAT_ORIGIN},
    method! {"Oblique Stereographic", "9809", "Oblique_Stereographic", "sterea", "", &parameters::OBLIQUE_STEREO},
    method! {"Polar Stereographic (variant A)", "9810", "Polar_Stereographic", "stere", "", &parameters::OBLIQUE_STEREO},
    method! {"Polar Stereographic (variant B)", "9829", "Polar_Stereographic_variant_B", "stere", "",
    &parameters::POLAR_STEREO_B},
    method! {"Stereographic", "", "Stereographic", "stere", "", &parameters::OBLIQUE_STEREO},
    method! {"Hotine Oblique Mercator (variant A)", "9812", "Hotine_Oblique_Mercator", "omerc", "+no_uoff",
    &parameters::OMERC},
    method! {"Hotine Oblique Mercator (variant B)", "9815", "Hotine_Oblique_Mercator_Azimuth_Center", "omerc", "",
    &parameters::OMERC_CENTER},
    method! {"Equidistant Conic", "1119", "Equidistant_Conic", "eqdc", "", &parameters::EQDC},
    method! {"Sinusoidal", "", "Sinusoidal", "sinu", "", &parameters::LONG_NAT_ORIGIN},
    method! {"Robinson", "", "Robinson", "robin", "", &parameters::LONG_NAT_ORIGIN},
    method! {"Van Der Grinten", "", "VanDerGrinten", "vandg", "", &parameters::LONG_NAT_ORIGIN},
    method! {"Equal Earth", "1078", "Equal_Earth", "eqearth", "", &parameters::LONG_NAT_ORIGIN},
    method! {"Miller Cylindrical", "", "Miller_Cylindrical", "mill", "", &parameters::LONG_NAT_ORIGIN},
    method! {"Orthographic", "9840", "Orthographic", "ortho", "", &parameters::NAT_ORIGIN},
    method! {"Azimuthal Equidistant", "1125", "Azimuthal_Equidistant", "aeqd", "", &parameters::NAT_ORIGIN},
    method! {"Equidistant Cylindrical", "1028", "Equirectangular", "eqc", "", &parameters::EQC},
];

// Extra WKT1 aliases that do not fit the method table shape
const WKT1_ALIASES: [(&str, &str); 2] = [("Plate_Carree", "eqc"), ("Gauss_Kruger", "tmerc")];

fn name_eq(a: &str, b: &str) -> bool {
    a.len() == b.len()
        && a.chars().zip(b.chars()).all(|(x, y)| {
            let x = if x == ' ' { '_' } else { x.to_ascii_lowercase() };
            let y = if y == ' ' { '_' } else { y.to_ascii_lowercase() };
            x == y
        })
}

/// Retrieve the method mapping from a method reference
///
/// Trust the EPSG code first if available, otherwise check names.
pub(crate) fn find_method_mapping(me: &MethodRef) -> Option<&'static MethodMapping> {
    if let Some(code) = &me.code {
        if let Some(m) = METHOD_MAPPINGS
            .iter()
            .find(|m| !m.epsg_code.is_empty() && m.epsg_code == code.as_str())
        {
            return Some(m);
        }
    }
    if me.name.is_empty() {
        return None;
    }
    METHOD_MAPPINGS
        .iter()
        .find(|m| name_eq(m.wkt2_name, &me.name) || name_eq(m.wkt1_name, &me.name))
        .or_else(|| {
            WKT1_ALIASES
                .iter()
                .find(|(wkt1, _)| name_eq(wkt1, &me.name))
                .and_then(|(_, proj)| METHOD_MAPPINGS.iter().find(|m| m.proj_name == *proj))
        })
}
