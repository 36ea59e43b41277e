//!
//! PROJJSON transformer
//!
//! Folds a PROJJSON object onto the same neutral CRS description as the
//! WKT builder, converging on the same projstring emitter.
//!
//! Reference: <https://proj.org/specifications/projjson.html>
//!
use crate::errors::{Error, Result};
use crate::wkt::{
    Crs, DatumRef, EllipsoidRef, Formatter, GeogCrs, MethodRef, ParameterRef, ProjCrs, Unit,
    UnitType,
};
use serde_json::Value;

/// Convert a PROJJSON text to a projstring
pub fn to_projstring(s: &str) -> Result<String> {
    let v: Value = serde_json::from_str(s)?;
    build_crs(&v).and_then(|crs| Formatter::new().format(&crs))
}

fn bad(msg: &str) -> Error {
    Error::ProjJsonError(msg.into())
}

fn build_crs(v: &Value) -> Result<Crs> {
    match v["type"].as_str() {
        Some("ProjectedCRS") => build_projected(v).map(Crs::Projected),
        Some("GeographicCRS") | Some("GeodeticCRS") => build_geographic(v).map(Crs::Geographic),
        Some("BoundCRS") => build_bound(v),
        Some("CompoundCRS") => v["components"]
            .as_array()
            .and_then(|components| components.iter().find_map(|c| build_crs(c).ok()))
            .ok_or_else(|| bad("No horizontal CRS in compound CRS")),
        _ => Err(bad("Unsupported or missing CRS type")),
    }
}

// --------------------
// BoundCRS
// --------------------
fn build_bound(v: &Value) -> Result<Crs> {
    let mut crs = build_crs(&v["source_crs"])?;

    if let Some(params) = v["transformation"]["parameters"].as_array() {
        let mut towgs84 = [0f64; 7];
        for p in params {
            let name = p["name"].as_str().unwrap_or("");
            let idx = match normalize(name).as_str() {
                "x_axis_translation" => 0,
                "y_axis_translation" => 1,
                "z_axis_translation" => 2,
                "x_axis_rotation" => 3,
                "y_axis_rotation" => 4,
                "z_axis_rotation" => 5,
                "scale_difference" => 6,
                _ => continue,
            };
            let value = number_of(&p["value"])?;
            towgs84[idx] = if idx == 6 {
                match unit_of(&p["unit"])? {
                    // Abridged form stores 1 + s*ppm
                    None => (value - 1.) * 1e6,
                    Some(u) if u.name == "unity" => (value - 1.) * 1e6,
                    _ => value,
                }
            } else {
                value
            };
        }
        let datum = match &mut crs {
            Crs::Geographic(g) => &mut g.datum,
            Crs::Projected(p) => &mut p.geogcs.datum,
        };
        datum.to_wgs84 = towgs84.to_vec();
    }

    Ok(crs)
}

// --------------------
// Geographic CRS
// --------------------
fn build_geographic(v: &Value) -> Result<GeogCrs> {
    let datum_v = if v["datum"].is_object() {
        &v["datum"]
    } else if v["datum_ensemble"].is_object() {
        &v["datum_ensemble"]
    } else {
        return Err(bad("Missing datum for geographic CRS"));
    };

    let ellps = &datum_v["ellipsoid"];
    if !ellps.is_object() {
        return Err(bad("Missing ellipsoid"));
    }

    let a = number_of(&ellps["semi_major_axis"])?;
    let rf = if ellps["inverse_flattening"].is_null() {
        match number_of(&ellps["semi_minor_axis"]) {
            // Derive the inverse flattening from the minor axis
            Ok(b) if b != a => a / (a - b),
            _ => 0.,
        }
    } else {
        number_of(&ellps["inverse_flattening"])?
    };

    let prime_meridian = match v["prime_meridian"].as_object() {
        Some(pm) => number_of(&pm["longitude"])?,
        None => 0.,
    };

    Ok(GeogCrs {
        name: v["name"].as_str().unwrap_or("").to_string(),
        datum: DatumRef {
            name: datum_v["name"].as_str().unwrap_or("Unknown").to_string(),
            ellipsoid: EllipsoidRef { a, rf, unit: None },
            to_wgs84: vec![],
        },
        prime_meridian,
    })
}

// --------------------
// Projected CRS
// --------------------
fn build_projected(v: &Value) -> Result<ProjCrs> {
    let geogcs = build_geographic(&v["base_crs"])?;

    let conversion = &v["conversion"];
    let method_v = &conversion["method"];
    if !method_v.is_object() {
        return Err(bad("Missing conversion method"));
    }

    let method = MethodRef {
        name: method_v["name"].as_str().unwrap_or("").to_string(),
        code: epsg_code(method_v),
    };

    let parameters = conversion["parameters"]
        .as_array()
        .map(|params| {
            params
                .iter()
                .map(|p| {
                    Ok(ParameterRef {
                        name: p["name"].as_str().unwrap_or("").to_string(),
                        code: epsg_code(p),
                        value: number_of(&p["value"])?,
                        unit: unit_of(&p["unit"])?,
                    })
                })
                .collect::<Result<Vec<_>>>()
        })
        .transpose()?
        .unwrap_or_default();

    // Axis collation: the axis list is ordered
    let (axis, unit) = match v["coordinate_system"]["axis"].as_array() {
        Some(axes) => {
            let mut letters: Vec<u8> = vec![];
            let mut unit = None;
            for ax in axes {
                let letter = match ax["direction"].as_str().unwrap_or("") {
                    "east" => b'e',
                    "west" => b'w',
                    "north" => b'n',
                    "south" => b's',
                    "up" => b'u',
                    "down" => b'd',
                    _ => continue,
                };
                letters.push(letter);
                if unit.is_none() {
                    unit = unit_of(&ax["unit"])?;
                }
            }
            if letters.len() == 2 {
                letters.push(b'u');
            }
            let axis = if letters.len() == 3 {
                Some(String::from_utf8(letters).unwrap())
            } else {
                None
            };
            (axis, unit)
        }
        None => (None, None),
    };

    Ok(ProjCrs {
        name: v["name"].as_str().unwrap_or("Unknown").to_string(),
        geogcs,
        method,
        parameters,
        unit,
        axis,
    })
}

// --------------------
// Value helpers
// --------------------

// A measure is either a bare number or a { value, unit } object
fn number_of(v: &Value) -> Result<f64> {
    if let Some(n) = v.as_f64() {
        Ok(n)
    } else if let Some(n) = v["value"].as_f64() {
        Ok(n)
    } else {
        Err(bad("Expected a numeric value"))
    }
}

// A unit is either a well known name or a
// { type, name, conversion_factor } object
fn unit_of(v: &Value) -> Result<Option<Unit>> {
    match v {
        Value::Null => Ok(None),
        Value::String(name) => Ok(Some(match name.as_str() {
            "degree" => Unit {
                name: "degree".into(),
                factor: 0.017453292519943295,
                unit_type: UnitType::Angular,
            },
            "metre" => Unit {
                name: "meter".into(),
                factor: 1.,
                unit_type: UnitType::Linear,
            },
            "unity" => Unit {
                name: "unity".into(),
                factor: 1.,
                unit_type: UnitType::Scale,
            },
            _ => return Err(bad("Unknown unit name")),
        })),
        Value::Object(_) => {
            let factor = v["conversion_factor"]
                .as_f64()
                .ok_or_else(|| bad("Missing unit conversion factor"))?;
            let unit_type = match v["type"].as_str().unwrap_or("") {
                "AngularUnit" => UnitType::Angular,
                "LinearUnit" => UnitType::Linear,
                "ScaleUnit" => UnitType::Scale,
                _ => UnitType::Unknown,
            };
            Ok(Some(Unit {
                name: v["name"].as_str().unwrap_or("").to_string(),
                factor,
                unit_type,
            }))
        }
        _ => Err(bad("Invalid unit")),
    }
}

fn epsg_code(v: &Value) -> Option<String> {
    let id = &v["id"];
    if id["authority"].as_str()? != "EPSG" {
        return None;
    }
    let code = &id["code"];
    if let Some(n) = code.as_i64() {
        Some(n.to_string())
    } else {
        code.as_str().map(|s| s.to_string())
    }
}

fn normalize(name: &str) -> String {
    crate::wkt::normalize(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn projjson_geographic() {
        let json = r#"{
            "type": "GeographicCRS",
            "name": "WGS 84",
            "datum": {
                "type": "GeodeticReferenceFrame",
                "name": "World Geodetic System 1984",
                "ellipsoid": {
                    "name": "WGS 84",
                    "semi_major_axis": 6378137,
                    "inverse_flattening": 298.257223563
                }
            },
            "coordinate_system": {
                "subtype": "ellipsoidal",
                "axis": [
                    {"name": "Geodetic latitude", "abbreviation": "Lat", "direction": "north", "unit": "degree"},
                    {"name": "Geodetic longitude", "abbreviation": "Lon", "direction": "east", "unit": "degree"}
                ]
            }
        }"#;
        let projstr = to_projstring(json).unwrap();
        assert_eq!(
            projstr,
            "+proj=longlat +a=6378137 +rf=298.257223563 +towgs84=0,0,0,0,0,0,0"
        );
    }

    #[test]
    fn projjson_projected_utm() {
        let json = r#"{
            "type": "ProjectedCRS",
            "name": "WGS 84 / UTM zone 19N",
            "base_crs": {
                "type": "GeographicCRS",
                "name": "WGS 84",
                "datum": {
                    "type": "GeodeticReferenceFrame",
                    "name": "World Geodetic System 1984",
                    "ellipsoid": {
                        "name": "WGS 84",
                        "semi_major_axis": 6378137,
                        "inverse_flattening": 298.257223563
                    }
                }
            },
            "conversion": {
                "name": "UTM zone 19N",
                "method": {
                    "name": "Transverse Mercator",
                    "id": {"authority": "EPSG", "code": 9807}
                },
                "parameters": [
                    {"name": "Latitude of natural origin", "value": 0, "unit": "degree"},
                    {"name": "Longitude of natural origin", "value": -69, "unit": "degree"},
                    {"name": "Scale factor at natural origin", "value": 0.9996, "unit": "unity"},
                    {"name": "False easting", "value": 500000, "unit": "metre"},
                    {"name": "False northing", "value": 0, "unit": "metre"}
                ]
            },
            "coordinate_system": {
                "subtype": "Cartesian",
                "axis": [
                    {"name": "Easting", "abbreviation": "E", "direction": "east", "unit": "metre"},
                    {"name": "Northing", "abbreviation": "N", "direction": "north", "unit": "metre"}
                ]
            }
        }"#;
        let projstr = to_projstring(json).unwrap();
        assert_eq!(
            projstr,
            concat!(
                "+proj=tmerc +lat_0=0 +lon_0=-69 +k_0=0.9996 +x_0=500000 +y_0=0",
                " +units=m +a=6378137 +rf=298.257223563 +towgs84=0,0,0,0,0,0,0",
            )
        );
    }

    #[test]
    fn projjson_bound_crs() {
        let json = r#"{
            "type": "BoundCRS",
            "source_crs": {
                "type": "GeographicCRS",
                "name": "foo",
                "datum": {
                    "name": "bar",
                    "ellipsoid": {
                        "semi_major_axis": 6377397.155,
                        "inverse_flattening": 299.1528128
                    }
                }
            },
            "target_crs": {"type": "GeographicCRS", "name": "WGS 84"},
            "transformation": {
                "name": "Transformation from foo to WGS84",
                "method": {"name": "Position Vector transformation (geog2D domain)"},
                "parameters": [
                    {"name": "X-axis translation", "value": 674.374, "unit": "metre"},
                    {"name": "Y-axis translation", "value": 15.056, "unit": "metre"},
                    {"name": "Z-axis translation", "value": 405.346, "unit": "metre"}
                ]
            }
        }"#;
        let projstr = to_projstring(json).unwrap();
        assert!(
            projstr.contains("+towgs84=674.374,15.056,405.346,0,0,0,0"),
            "{projstr}"
        );
    }
}
