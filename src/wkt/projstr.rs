//!
//! Format the neutral CRS description to a projstring
//!
//! Since we do not use a database, ellipsoid parameters are output
//! directly and ellipsoid names and authorities are dropped.
//!
use crate::errors::{Error, Result};
use crate::wkt::methods::find_method_mapping;
use crate::wkt::model::*;
use std::fmt::Write;

const DEG_FACTOR: f64 = 0.017453292519943295;

/// Formatter that outputs a proj4 string from the neutral
/// CRS description
pub(crate) struct Formatter {
    buf: String,
}

impl Formatter {
    pub fn new() -> Self {
        Self { buf: String::new() }
    }

    pub fn format(mut self, crs: &Crs) -> Result<String> {
        match crs {
            Crs::Geographic(cs) => self.add_geogcs(cs)?,
            Crs::Projected(cs) => self.add_projcs(cs)?,
        }
        Ok(self.buf)
    }

    fn write(&mut self, s: &str) {
        self.buf.push_str(s);
    }

    fn add_geogcs(&mut self, geogcs: &GeogCrs) -> Result<()> {
        self.write("+proj=longlat");
        self.add_datum(&geogcs.datum)?;
        self.add_prime_meridian(geogcs)
    }

    fn add_prime_meridian(&mut self, geogcs: &GeogCrs) -> Result<()> {
        if geogcs.prime_meridian != 0. {
            write!(self.buf, " +pm={}", geogcs.prime_meridian).map_err(fmt_err)?;
        }
        Ok(())
    }

    fn add_datum(&mut self, datum: &DatumRef) -> Result<()> {
        self.add_ellipsoid(&datum.ellipsoid)?;
        match datum.to_wgs84.len() {
            0 => {
                // Assume WGS84 or GRS80 compatible
                self.write(" +towgs84=0,0,0,0,0,0,0");
            }
            _ => {
                self.write(" +towgs84=");
                let mut sep = "";
                for v in &datum.to_wgs84 {
                    write!(self.buf, "{sep}{v}").map_err(fmt_err)?;
                    sep = ",";
                }
            }
        }
        Ok(())
    }

    fn add_ellipsoid(&mut self, ellps: &EllipsoidRef) -> Result<()> {
        let mut a = ellps.a;
        // Convert to meters
        if let Some(unit) = &ellps.unit {
            match unit.unit_type {
                UnitType::Linear => a *= unit.factor,
                _ => {
                    return Err(Error::WktError(format!(
                        "Unexpected {:?} unit for ellipsoid",
                        unit.unit_type
                    )));
                }
            }
        }
        if ellps.rf == 0. {
            // A sphere
            write!(self.buf, " +R={a}").map_err(fmt_err)?;
        } else {
            write!(self.buf, " +a={a} +rf={}", ellps.rf).map_err(fmt_err)?;
        }
        Ok(())
    }

    fn add_projcs(&mut self, projcs: &ProjCrs) -> Result<()> {
        // Web Mercator definitions are recognized from their title as
        // well, whatever the declared method says
        let title = &projcs.name;
        let is_webmerc = title.contains("3857")
            || title.contains("Pseudo_Mercator")
            || title.contains("Pseudo-Mercator");

        let mapping = find_method_mapping(&projcs.method);

        let proj_name = if is_webmerc {
            "webmerc"
        } else {
            mapping
                .ok_or_else(|| {
                    Error::WktError(format!(
                        "No projection mapping found for {}",
                        projcs.method.name
                    ))
                })?
                .proj_name()
        };
        write!(self.buf, "+proj={proj_name}").map_err(fmt_err)?;

        if let Some(mapping) = mapping {
            let mut lat_ts = None;
            for p in &projcs.parameters {
                if let Some(pp) = mapping.find_proj_param(&p.name, p.code.as_deref()) {
                    let value = match pp.unit_type {
                        UnitType::Angular => angular_degrees(p),
                        UnitType::Linear => linear_meters(p, projcs.unit.as_ref()),
                        _ => scale_value(p),
                    };
                    if pp.proj_name == "lat_ts" {
                        lat_ts = Some(value);
                    }
                    write!(self.buf, " +{}={}", pp.proj_name, value).map_err(fmt_err)?;
                }
            }

            // Polar Stereographic variant B puts the pole on the side
            // of the standard parallel
            if mapping.epsg_code == "9829" {
                let lat_0 = if lat_ts.unwrap_or(90.) < 0. { -90 } else { 90 };
                write!(self.buf, " +lat_0={lat_0}").map_err(fmt_err)?;
            }

            let aux = mapping.proj_aux();
            if !aux.is_empty() {
                self.write(" ");
                self.write(aux);
            }
        }

        // Units
        match &projcs.unit {
            Some(unit) if unit.factor != 1.0 => {
                write!(self.buf, " +to_meter={}", unit.factor).map_err(fmt_err)?;
            }
            _ => self.write(" +units=m"),
        }

        self.add_datum(&projcs.geogcs.datum)?;
        self.add_prime_meridian(&projcs.geogcs)?;

        // Axis order
        if let Some(axis) = &projcs.axis {
            if axis != "enu" {
                write!(self.buf, " +axis={axis}").map_err(fmt_err)?;
            }
        }

        Ok(())
    }
}

fn fmt_err(_: std::fmt::Error) -> Error {
    Error::WktError("Formatting error".into())
}

// Angular parameter values are expressed in degrees on the
// proj string
fn angular_degrees(p: &ParameterRef) -> f64 {
    match &p.unit {
        Some(u) if u.unit_type == UnitType::Angular && (u.factor - DEG_FACTOR).abs() > 1e-12 => {
            (p.value * u.factor).to_degrees()
        }
        _ => p.value,
    }
}

// Linear parameter values are expressed in meters, converting
// with the parameter unit or the map unit
fn linear_meters(p: &ParameterRef, crs_unit: Option<&Unit>) -> f64 {
    match &p.unit {
        Some(u) if u.unit_type == UnitType::Linear => p.value * u.factor,
        _ => match crs_unit {
            Some(u) if u.unit_type == UnitType::Linear => p.value * u.factor,
            _ => p.value,
        },
    }
}

fn scale_value(p: &ParameterRef) -> f64 {
    match &p.unit {
        Some(u) if u.unit_type == UnitType::Scale => p.value * u.factor,
        _ => p.value,
    }
}
