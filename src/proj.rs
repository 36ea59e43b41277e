//!
//! Coordinate reference system definition and installation
//!
//! A [`Proj`] is built in two phases: the parsers produce a flat
//! assignment set ([`ParamList`]), then [`Proj::init`] resolves the
//! ellipsoid, datum, prime meridian, axis and units, binds the projection
//! method by name and runs the method init. Derived fields are computed
//! once; the resulting value is immutable and safely shareable.
//!
use crate::datum_params::DatumParams;
use crate::datum_transform::Datum;
use crate::datums::{self, DatumDefn};
use crate::ellps::Ellipsoid;
use crate::errors::{Error, Result};
use crate::parameters::ParamList;
use crate::projections::{self, ProjDelegate};
use crate::{ellipsoids, epsg, prime_meridians, projjson, projstring, units, wkt};

pub type Axis = [u8; 3];

const NORMALIZED_AXIS: Axis = [b'e', b'n', b'u'];

/// Data used by projection methods and by the transform pipeline
#[derive(Debug, Clone)]
pub struct ProjData {
    pub(crate) ellps: Ellipsoid,
    pub(crate) lam0: f64,
    pub(crate) phi0: f64,
    pub(crate) x0: f64,
    pub(crate) y0: f64,
    pub(crate) k0: f64,
    pub(crate) to_meter: f64,
    pub(crate) vto_meter: f64,
    pub(crate) from_greenwich: f64,
    pub(crate) axis: Axis,
    pub(crate) over: bool,
    pub(crate) geoc: bool,
}

/// A compiled coordinate reference system
#[derive(Debug, Clone)]
pub struct Proj {
    projname: String,
    data: ProjData,
    datum: Datum,
    projection: ProjDelegate,
    is_latlong: bool,
    is_geocent: bool,
}

impl Proj {
    // ----------------
    // Datum definition
    // ----------------
    fn datum_defn<'a>(params: &'a ParamList) -> Result<Option<&'a DatumDefn>> {
        // Do we have a "datum" parameter ?
        params
            .get("datum")
            .map(|p| match datums::find_datum(p.try_into()?) {
                Some(v) => Ok(Some(v)),
                None => Err(Error::InvalidDatum),
            })
            .unwrap_or(Ok(None))
    }

    // --------------
    // Prime meridian
    // --------------
    fn prime_meridian(params: &ParamList) -> Result<f64> {
        params
            .get("pm")
            .or_else(|| params.get("from_greenwich"))
            .map(
                |p| match prime_meridians::find_prime_meridian(p.try_into()?) {
                    Some(v) => Ok(v.to_radians()),
                    None => p.try_angular_value(),
                },
            )
            .unwrap_or(Ok(0.))
    }

    // -----------------
    // Datum parameters
    // ----------------
    fn datum_params(params: &ParamList, defn: Option<&DatumDefn>) -> Result<DatumParams> {
        // Precedence order is 'nadgrids', 'towgs84', 'datum'
        if let Some(p) = params.get("nadgrids") {
            // Nadgrids
            DatumParams::from_nadgrid_str(p.try_into()?)
        } else if let Some(p) = params.get("towgs84") {
            // ToWGS84
            DatumParams::from_towgs84_str(p.try_into()?)
        } else if let Some(p) = defn {
            DatumParams::try_from(&p.params)
        } else {
            Ok(DatumParams::default())
        }
    }

    // -----------------
    // Ellipsoid
    // ----------------
    fn ellipsoid(params: &ParamList, datum_def: Option<&DatumDefn>) -> Result<Ellipsoid> {
        if let Some(radius) = params.get("R") {
            // Sphere override everything
            Ellipsoid::sphere(radius.try_into()?)
        } else if let Some(p) = params.get("ellps") {
            // Return from ellipse definition
            match ellipsoids::find_ellipsoid(p.try_into()?) {
                Some(defn) => Ellipsoid::try_from_ellipsoid_with_params(defn, params),
                None => Err(Error::InvalidEllipsoid),
            }
        } else if params.get("a").is_some() {
            // Raw ellipsoid parameters
            Ellipsoid::try_from_params(params)
        } else if let Some(defn) = datum_def {
            // Retrieve from datum definition + parameters
            Ellipsoid::try_from_ellipsoid_with_params(defn.ellps, params)
        } else {
            // Get a free WGS84
            Ellipsoid::try_from_ellipsoid_with_params(&ellipsoids::constants::WGS84, params)
        }
    }

    // -----------------
    // Axis
    // ----------------
    fn parse_axis(params: &ParamList) -> Result<Axis> {
        if let Some(p) = params.get("axis") {
            let axis_arg: &str = p.try_into()?;
            if axis_arg.len() != 3 {
                Err(Error::InvalidAxis)
            } else {
                let mut axis = [0u8, 0u8, 0u8];
                // Find Easting/Westing, Northing/Southing and Up/Down.
                // This ensure that no token is repeated, otherwise
                // one of the `find` will fail.
                let ew = axis_arg.find(['e', 'w']).ok_or(Error::InvalidAxis)?;
                let ns = axis_arg.find(['n', 's']).ok_or(Error::InvalidAxis)?;
                let ud = axis_arg.find(['u', 'd']).ok_or(Error::InvalidAxis)?;
                axis[ew] = axis_arg.as_bytes()[ew];
                axis[ns] = axis_arg.as_bytes()[ns];
                axis[ud] = axis_arg.as_bytes()[ud];
                Ok(axis)
            }
        } else {
            Ok(NORMALIZED_AXIS)
        }
    }

    // -----------------
    // Units
    // ----------------
    fn units(params: &ParamList) -> Result<f64> {
        if let Some(p) = params.get("to_meter") {
            f64::try_from(p)
        } else if let Some(p) = params.get("units") {
            let name: &str = p.try_into()?;
            if units::is_angular_unit(name) {
                // Angular factor applies to I/O only, never to
                // metric scaling
                Ok(1.)
            } else {
                units::find_units(name)
                    .map(|u| u.to_meter)
                    .ok_or(Error::InvalidUnit)
            }
        } else {
            Ok(1.)
        }
    }

    fn vunits(params: &ParamList, to_meter: f64) -> Result<f64> {
        if let Some(p) = params.get("vto_meter") {
            f64::try_from(p)
        } else if let Some(p) = params.get("vunits") {
            let name: &str = p.try_into()?;
            units::find_units(name)
                .map(|u| u.to_meter)
                .ok_or(Error::InvalidUnit)
        } else {
            Ok(to_meter)
        }
    }

    /// Consume a ParamList and create a Proj object
    pub fn init(params: ParamList) -> Result<Self> {
        // Projection name
        let projname: &str = params
            .get("proj")
            .ok_or(Error::MissingProjectionError)?
            .try_into()?;

        // Get datum definition (if any)
        let datum_defn = Self::datum_defn(&params)?;

        // Get datum parameters
        let datum_params = Self::datum_params(&params, datum_defn)?;

        // Do we have an ellipse ?
        let ellps = Self::ellipsoid(&params, datum_defn)?;

        // Get prime meridian
        let from_greenwich = Self::prime_meridian(&params)?;

        // Axis
        let axis = Self::parse_axis(&params)?;

        // Units
        let to_meter = Self::units(&params)?;
        if to_meter <= 0. {
            return Err(Error::InvalidParameterValue("Invalid units factor"));
        }
        let vto_meter = Self::vunits(&params, to_meter)?;

        let k0 = params
            .try_value::<f64>("k_0")?
            .or(params.try_value::<f64>("k")?)
            .unwrap_or(1.);
        if k0 <= 0. {
            return Err(Error::InvalidParameterValue("Invalid scale factor"));
        }

        let mut data = ProjData {
            ellps,
            lam0: params.try_angular_value("lon_0")?.unwrap_or(0.),
            phi0: params.try_angular_value("lat_0")?.unwrap_or(0.),
            x0: params.try_value::<f64>("x_0")?.unwrap_or(0.),
            y0: params.try_value::<f64>("y_0")?.unwrap_or(0.),
            k0,
            to_meter,
            vto_meter,
            from_greenwich,
            axis,
            over: params.check_option("over")?,
            geoc: params.check_option("geoc")?,
        };

        // The method init may spherify the projection ellipsoid;
        // datum operations keep using the original one
        let datum = Datum::new(&data.ellps, datum_params);

        // Bind the projection method and initialize
        // the method specific parameters
        let projection = projections::find_projection(projname)
            .ok_or(Error::ProjectionNotFound)?
            .init(&mut data, &params)?;

        let projname = projname.to_lowercase();
        let is_latlong = matches!(projname.as_str(), "latlong" | "longlat" | "latlon" | "lonlat");
        let is_geocent = matches!(projname.as_str(), "geocent" | "cart");

        Ok(Self {
            projname,
            is_latlong,
            is_geocent,
            data,
            datum,
            projection,
        })
    }

    /// Create a Proj from a proj string definition
    pub fn from_proj_string(s: &str) -> Result<Self> {
        Self::init(projstring::parse(s)?)
    }

    /// Create a Proj from a user definition
    ///
    /// The definition format is auto-detected from its leading
    /// characters: proj string (`+...`), PROJJSON object (`{...}`),
    /// OGC WKT (version probe on the leading keyword), `EPSG:<code>`
    /// shortcut or the `WGS84` literal.
    pub fn from_user_string(s: &str) -> Result<Self> {
        let defn = s.trim();
        if defn.starts_with('+') {
            Self::from_proj_string(defn)
        } else if defn.starts_with('{') {
            Self::from_proj_string(&projjson::to_projstring(defn)?)
        } else if defn.eq_ignore_ascii_case("WGS84") {
            Self::from_proj_string(epsg::WGS84_LONGLAT)
        } else if let Some(code) = defn
            .get(..5)
            .filter(|p| p.eq_ignore_ascii_case("EPSG:"))
            .map(|_| &defn[5..])
        {
            let code = code
                .parse::<u32>()
                .map_err(|_| Error::InputStringError("Invalid EPSG code"))?;
            Self::from_proj_string(&epsg::lookup(code)?)
        } else if wkt::is_wkt(defn) {
            Self::from_proj_string(&wkt::to_projstring(defn)?)
        } else {
            Err(Error::UnrecognizedFormat)
        }
    }

    // Accessors

    #[inline]
    pub fn projname(&self) -> &str {
        &self.projname
    }

    #[inline]
    pub(crate) fn data(&self) -> &ProjData {
        &self.data
    }

    #[inline]
    pub(crate) fn projection(&self) -> &ProjDelegate {
        &self.projection
    }

    #[inline]
    pub(crate) fn datum(&self) -> &Datum {
        &self.datum
    }

    #[inline]
    pub fn is_latlong(&self) -> bool {
        self.is_latlong
    }

    #[inline]
    pub fn is_geocent(&self) -> bool {
        self.is_geocent
    }

    #[inline]
    pub fn to_meter(&self) -> f64 {
        self.data.to_meter
    }

    #[inline]
    pub fn axis(&self) -> &Axis {
        &self.data.axis
    }

    /// Return true if the axis are normalized (east, north, up)
    #[inline]
    pub fn normalized_axis(&self) -> bool {
        self.data.axis == NORMALIZED_AXIS
    }

    #[inline]
    pub fn has_inverse(&self) -> bool {
        self.projection.has_inverse()
    }

    #[inline]
    pub fn has_forward(&self) -> bool {
        self.projection.has_forward()
    }
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;

    const EPSG_102018: &str = concat!(
        "+proj=gnom +lat_0=90 +lon_0=0 +x_0=6300000 +y_0=6300000 ",
        "+ellps=WGS84 +datum=WGS84 +units=m +no_defs"
    );

    const TESTMERC: &str = "+proj=merc +lon_0=5.937 +lat_ts=45.027 +ellps=sphere";
    const TESTMERC2: &str = concat!(
        "+proj=merc +a=6378137 +b=6378137 +lat_ts=0.0 +lon_0=0.0 +x_0=0.0 +y_0=0 ",
        "+units=m +k=1.0 +nadgrids=@null +no_defs"
    );
    const INVALID_ELLPS: &str = "+proj=merc +lon_0=5.937 +lat_ts=45.027 +ellps=foo";

    #[test]
    fn proj_test_EPSG_102018() {
        let p = Proj::from_proj_string(EPSG_102018).unwrap();
        assert_eq!(p.projname(), "gnom");
        assert_eq!(p.data().x0, 6_300_000.);
        assert_eq!(p.data().y0, 6_300_000.);
    }

    #[test]
    fn proj_test_merc() {
        let p = Proj::from_proj_string(TESTMERC).unwrap();
        assert_eq!(p.projname(), "merc");
        assert!(p.data().ellps.is_sphere());
    }

    #[test]
    fn proj_test_merc2() {
        let p = Proj::from_proj_string(TESTMERC2).unwrap();
        assert!(p.data().ellps.is_sphere());
        assert!(p.datum().no_datum());
    }

    #[test]
    fn proj_invalid_ellps_param() {
        let p = Proj::from_proj_string(INVALID_ELLPS);

        assert!(p.is_err());
        assert!(matches!(p.unwrap_err(), Error::InvalidEllipsoid));
    }

    #[test]
    fn proj_unknown_unit() {
        let p = Proj::from_proj_string("+proj=merc +units=smoot");
        assert!(matches!(p.unwrap_err(), Error::InvalidUnit));
    }

    #[test]
    fn proj_invalid_axis() {
        for s in [
            "+proj=latlong +axis=nn",
            "+proj=latlong +axis=nnu",
            "+proj=latlong +axis=xyz",
        ] {
            assert!(matches!(
                Proj::from_proj_string(s).unwrap_err(),
                Error::InvalidAxis
            ));
        }
        let p = Proj::from_proj_string("+proj=latlong +axis=neu").unwrap();
        assert_eq!(p.axis(), &[b'n', b'e', b'u']);
    }

    #[test]
    fn proj_user_string_epsg() {
        let p = Proj::from_user_string("EPSG:4326").unwrap();
        assert!(p.is_latlong());

        let p = Proj::from_user_string("EPSG:32619").unwrap();
        assert_eq!(p.projname(), "utm");

        let p = Proj::from_user_string("WGS84").unwrap();
        assert!(p.is_latlong());
    }
}
