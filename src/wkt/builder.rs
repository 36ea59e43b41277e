//!
//! Fold the WKT syntactic tree into the neutral CRS description
//!
//! ## Specifications
//!
//! * WKT CRS standards: <https://www.ogc.org/standard/wkt-crs/>
//! * WKT2015 specs: <https://docs.ogc.org/is/12-063r5/12-063r5.html>
//! * WKT2019 specs: <https://docs.ogc.org/is/18-010r7/18-010r7.html>
//!
use crate::errors::{Error, Result};
use crate::wkt::model::*;
use crate::wkt::parser::{parse_number, Attr, Node};

const DEG_FACTOR: f64 = 0.017453292519943295;

// Keyword aliases, see https://docs.ogc.org/is/18-010r7/18-010r7.html
const GEOGCS_KEYS: [&str; 5] = ["GEOGCS", "GEOGCRS", "GEOGRAPHICCRS", "BASEGEODCRS", "BASEGEOGCRS"];
const GEOCCS_KEYS: [&str; 3] = ["GEOCCS", "GEODCRS", "GEODETICCRS"];
const PROJCS_KEYS: [&str; 3] = ["PROJCS", "PROJCRS", "PROJECTEDCRS"];
const DATUM_KEYS: [&str; 4] = ["DATUM", "GEODETICDATUM", "TRF", "ENSEMBLE"];
const ELLPS_KEYS: [&str; 2] = ["ELLIPSOID", "SPHEROID"];
const METHOD_KEYS: [&str; 2] = ["PROJECTION", "METHOD"];
const UNIT_KEYS: [&str; 4] = ["UNIT", "LENGTHUNIT", "ANGLEUNIT", "SCALEUNIT"];
const AUTHORITY_KEYS: [&str; 2] = ["AUTHORITY", "ID"];

/// WKT version probe on the leading keyword
pub(crate) fn is_wkt(s: &str) -> bool {
    let key_end = s
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .unwrap_or(s.len());
    let key = &s[..key_end];
    [
        // WKT1
        "PROJCS", "GEOGCS", "GEOCCS", "VERT_CS", "COMPD_CS", "LOCAL_CS", "FITTED_CS",
        // WKT2
        "PROJCRS", "PROJECTEDCRS", "GEOGCRS", "GEOGRAPHICCRS", "GEODCRS", "GEODETICCRS",
        "BOUNDCRS", "VERTCRS", "VERTICALCRS", "COMPOUNDCRS", "ENGCRS", "ENGINEERINGCRS",
    ]
    .iter()
    .any(|k| key.eq_ignore_ascii_case(k))
}

/// Build the neutral description from a WKT string
pub(crate) fn build(s: &str) -> Result<Crs> {
    let root = crate::wkt::parser::parse(s)?;
    build_crs(&root)
}

fn build_crs(node: &Node) -> Result<Crs> {
    let key = node.key;
    if PROJCS_KEYS.iter().any(|k| key.eq_ignore_ascii_case(k)) {
        build_projcs(node).map(Crs::Projected)
    } else if GEOGCS_KEYS
        .iter()
        .chain(GEOCCS_KEYS.iter())
        .any(|k| key.eq_ignore_ascii_case(k))
    {
        build_geogcs(node).map(Crs::Geographic)
    } else if key.eq_ignore_ascii_case("BOUNDCRS") {
        build_boundcrs(node)
    } else if key.eq_ignore_ascii_case("COMPD_CS") || key.eq_ignore_ascii_case("COMPOUNDCRS") {
        // Use the horizontal member
        node.nodes()
            .find_map(|n| build_crs(n).ok())
            .ok_or_else(|| Error::WktError("No horizontal CRS in compound CRS".into()))
    } else {
        Err(Error::WktError(format!("Unsupported WKT object {key}")))
    }
}

// --------------------
// BoundCRS
// --------------------
//
// Recurse into the source CRS and graft the 7 Helmert terms of the
// abridged transformation. The scale difference is stored as
// `1 + s*ppm`: subtract one and scale to ppm.
fn build_boundcrs(node: &Node) -> Result<Crs> {
    let source = node
        .find(&["SOURCECRS"])
        .and_then(|n| n.nodes().next())
        .ok_or_else(|| Error::WktError("Missing SOURCECRS in BOUNDCRS".into()))?;

    let mut crs = build_crs(source)?;

    if let Some(tf) = node.find(&["ABRIDGEDTRANSFORMATION"]) {
        let mut towgs84 = [0f64; 7];
        for p in tf.nodes().filter(|n| n.key.eq_ignore_ascii_case("PARAMETER")) {
            let name = p.name().unwrap_or("");
            let value = p.number(1)?;
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
            towgs84[idx] = if idx == 6 { (value - 1.) * 1e6 } else { value };
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
// Projected CRS
// --------------------
fn build_projcs(node: &Node) -> Result<ProjCrs> {
    let name = node.name().unwrap_or("Unknown").to_string();

    let geogcs = node
        .find(&GEOGCS_KEYS)
        .ok_or_else(|| Error::WktError("Missing geographic CRS in PROJCS".into()))
        .and_then(build_geogcs)?;

    // WKT2 wraps method and parameters in a CONVERSION node,
    // WKT1 has them at the PROJCS level
    let conversion = node.find(&["CONVERSION"]).unwrap_or(node);

    let method = conversion
        .find(&METHOD_KEYS)
        .ok_or_else(|| Error::WktError("No projection method defined".into()))
        .map(|n| MethodRef {
            name: n.name().unwrap_or("").to_string(),
            code: authority_code(n),
        })?;

    let parameters = conversion
        .nodes()
        .filter(|n| n.key.eq_ignore_ascii_case("PARAMETER"))
        .map(|n| {
            Ok(ParameterRef {
                name: n.name().unwrap_or("").to_string(),
                code: authority_code(n),
                value: n.number(1)?,
                unit: n.find(&UNIT_KEYS).map(build_unit).transpose()?,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    // The map unit: prefer an explicit LENGTHUNIT/UNIT at the PROJCS
    // level, else look into the coordinate system node
    let unit = match node.find(&["UNIT", "LENGTHUNIT"]) {
        Some(n) => Some(build_unit(n)?),
        None => node
            .find(&["CS"])
            .and_then(|_| axis_unit(node))
            .transpose()?,
    };

    Ok(ProjCrs {
        name,
        geogcs,
        method,
        parameters,
        unit,
        axis: build_axis(node)?,
    })
}

// First unit carried by an AXIS node (WKT2 style)
fn axis_unit(node: &Node) -> Option<Result<Unit>> {
    axis_nodes(node)
        .find_map(|n| n.find(&["LENGTHUNIT", "UNIT"]))
        .map(build_unit)
}

fn axis_nodes<'n, 'a>(node: &'n Node<'a>) -> impl Iterator<Item = &'n Node<'a>> {
    // Axis nodes live either at the CRS level (WKT1) or under
    // the CS node (WKT2)
    let cs = node.find(&["CS"]);
    node.nodes()
        .filter(|n| n.key.eq_ignore_ascii_case("AXIS"))
        .chain(
            cs.into_iter()
                .flat_map(|cs| cs.nodes().filter(|n| n.key.eq_ignore_ascii_case("AXIS"))),
        )
}

// --------------------
// Axis collation
// --------------------
//
// Collect AXIS direction keywords, ordered by their ORDER node when
// present, and map them onto the axis letters.
fn build_axis(node: &Node) -> Result<Option<String>> {
    let mut axes: Vec<(usize, u8)> = vec![];

    for (i, n) in axis_nodes(node).enumerate() {
        // Direction is the first bare word attribute
        let dir = n
            .attrs
            .iter()
            .find_map(|a| match a {
                Attr::Word(w) => Some(*w),
                _ => None,
            })
            .unwrap_or("");
        let letter = match dir.to_ascii_lowercase().as_str() {
            "east" => b'e',
            "west" => b'w',
            "north" => b'n',
            "south" => b's',
            "up" => b'u',
            "down" => b'd',
            _ => continue,
        };
        let order = n
            .find(&["ORDER"])
            .and_then(|o| o.number(0).ok())
            .map(|v| v as usize)
            .unwrap_or(i + 1);
        axes.push((order, letter));
    }

    if axes.is_empty() {
        return Ok(None);
    }

    axes.sort_by_key(|(order, _)| *order);
    let mut out: Vec<u8> = axes.into_iter().map(|(_, l)| l).collect();
    if out.len() == 2 {
        out.push(b'u');
    }
    if out.len() != 3 {
        return Err(Error::InvalidAxis);
    }
    Ok(Some(String::from_utf8(out).unwrap()))
}

// --------------------
// Geographic CRS
// --------------------
fn build_geogcs(node: &Node) -> Result<GeogCrs> {
    let name = node.name().unwrap_or("").to_string();

    let datum = node
        .find(&DATUM_KEYS)
        .ok_or_else(|| Error::WktError("Missing DATUM for Geodetic CRS".into()))
        .and_then(build_datum)?;

    // Prime meridian, converted to degrees
    let prime_meridian = match node.find(&["PRIMEM", "PRIMEMERIDIAN"]) {
        Some(n) => {
            let v = n.number(1)?;
            match n.find(&UNIT_KEYS).map(build_unit).transpose()? {
                Some(u) if u.unit_type == UnitType::Angular => (v * u.factor).to_degrees(),
                _ => v,
            }
        }
        None => 0.,
    };

    Ok(GeogCrs {
        name,
        datum,
        prime_meridian,
    })
}

fn build_datum(node: &Node) -> Result<DatumRef> {
    let name = node.name().unwrap_or("Unknown").to_string();

    let ellipsoid = node
        .find(&ELLPS_KEYS)
        .ok_or_else(|| Error::WktError("Missing ellipsoid for DATUM".into()))
        .and_then(build_ellipsoid)?;

    let to_wgs84 = match node.find(&["TOWGS84"]) {
        Some(n) => {
            let values = n
                .attrs
                .iter()
                .filter_map(|a| match a {
                    Attr::Word(w) => Some(parse_number(w)),
                    _ => None,
                })
                .collect::<Result<Vec<_>>>()?;
            if !matches!(values.len(), 0 | 3 | 7) {
                return Err(Error::WktError(
                    "Wrong number of parameters for TOWGS84".into(),
                ));
            }
            values
        }
        None => vec![],
    };

    Ok(DatumRef {
        name,
        ellipsoid,
        to_wgs84,
    })
}

fn build_ellipsoid(node: &Node) -> Result<EllipsoidRef> {
    Ok(EllipsoidRef {
        a: node.number(1)?,
        rf: node.number(2)?,
        unit: node.find(&UNIT_KEYS).map(build_unit).transpose()?,
    })
}

fn build_unit(node: &Node) -> Result<Unit> {
    Ok(Unit {
        name: node.name().unwrap_or("").to_lowercase().replace("metre", "meter"),
        factor: node.number(1)?,
        unit_type: match node.key.to_ascii_uppercase().as_str() {
            "ANGLEUNIT" => UnitType::Angular,
            "LENGTHUNIT" => UnitType::Linear,
            "SCALEUNIT" => UnitType::Scale,
            _ => unit_type_from_factor(node),
        },
    })
}

// WKT1 UNIT does not carry its kind: guess it from the
// conversion factor
fn unit_type_from_factor(node: &Node) -> UnitType {
    match node.number(1) {
        Ok(f) if (f - DEG_FACTOR).abs() < 1e-8 => UnitType::Angular,
        Ok(_) => UnitType::Linear,
        Err(_) => UnitType::Unknown,
    }
}

fn authority_code(node: &Node) -> Option<String> {
    node.find(&AUTHORITY_KEYS).and_then(|n| {
        let name = n.name()?;
        if !name.eq_ignore_ascii_case("EPSG") {
            return None;
        }
        n.arg(1).map(|code| code.to_string())
    })
}

pub(crate) fn normalize(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            ' ' => '_',
            c => c.to_ascii_lowercase(),
        })
        .collect()
}
