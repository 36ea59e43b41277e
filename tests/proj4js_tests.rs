//!
//! End to end scenarios with reference outputs from proj4js
//!
use approx::assert_abs_diff_eq;
use reproj::adaptors::{transform_xy, transform_xyz};
use reproj::{Converter, Proj};

const EPSG_26986_PROJ: &str = concat!(
    "+proj=lcc +lat_1=42.68333333333333 +lat_2=41.71666666666667 +lat_0=41 ",
    "+lon_0=-71.5 +x_0=200000 +y_0=750000 +ellps=GRS80 +towgs84=0,0,0,0,0,0,0 ",
    "+units=m +no_defs"
);

const EPSG_26986_WKT1: &str = concat!(
    r#"PROJCS["NAD83 / Massachusetts Mainland",GEOGCS["NAD83","#,
    r#"DATUM["North_American_Datum_1983",SPHEROID["GRS 1980",6378137,298.257222101,"#,
    r#"AUTHORITY["EPSG","7019"]],AUTHORITY["EPSG","6269"]],PRIMEM["Greenwich",0,"#,
    r#"AUTHORITY["EPSG","8901"]],UNIT["degree",0.01745329251994328,"#,
    r#"AUTHORITY["EPSG","9122"]],AUTHORITY["EPSG","4269"]],UNIT["metre",1,"#,
    r#"AUTHORITY["EPSG","9001"]],PROJECTION["Lambert_Conformal_Conic_2SP"],"#,
    r#"PARAMETER["standard_parallel_1",42.68333333333333],"#,
    r#"PARAMETER["standard_parallel_2",41.71666666666667],"#,
    r#"PARAMETER["latitude_of_origin",41],PARAMETER["central_meridian",-71.5],"#,
    r#"PARAMETER["false_easting",200000],PARAMETER["false_northing",750000],"#,
    r#"AUTHORITY["EPSG","26986"],AXIS["X",EAST],AXIS["Y",NORTH]]"#,
);

const EPSG_26986_WKT2: &str = concat!(
    r#"PROJCRS["NAD83 / Massachusetts Mainland","#,
    r#"BASEGEOGCRS["NAD83","#,
    r#"DATUM["North American Datum 1983","#,
    r#"ELLIPSOID["GRS 1980",6378137,298.257222101,LENGTHUNIT["metre",1]]],"#,
    r#"PRIMEM["Greenwich",0,ANGLEUNIT["degree",0.0174532925199433]]],"#,
    r#"CONVERSION["SPCS83 Massachusetts Mainland zone (meter)","#,
    r#"METHOD["Lambert Conic Conformal (2SP)",ID["EPSG",9802]],"#,
    r#"PARAMETER["Latitude of false origin",41,ANGLEUNIT["degree",0.0174532925199433]],"#,
    r#"PARAMETER["Longitude of false origin",-71.5,ANGLEUNIT["degree",0.0174532925199433]],"#,
    r#"PARAMETER["Latitude of 1st standard parallel",42.68333333333333,"#,
    r#"ANGLEUNIT["degree",0.0174532925199433]],"#,
    r#"PARAMETER["Latitude of 2nd standard parallel",41.71666666666667,"#,
    r#"ANGLEUNIT["degree",0.0174532925199433]],"#,
    r#"PARAMETER["Easting at false origin",200000,LENGTHUNIT["metre",1]],"#,
    r#"PARAMETER["Northing at false origin",750000,LENGTHUNIT["metre",1]]],"#,
    r#"CS[Cartesian,2],"#,
    r#"AXIS["easting (X)",east,ORDER[1],LENGTHUNIT["metre",1]],"#,
    r#"AXIS["northing (Y)",north,ORDER[2],LENGTHUNIT["metre",1]],"#,
    r#"ID["EPSG",26986]]"#,
);

#[test]
fn webmerc_equator() {
    let from = Proj::from_user_string("EPSG:4326").unwrap();
    let to = Proj::from_user_string("EPSG:3857").unwrap();

    let (x, y) = transform_xy(&from, &to, 0., 0.).unwrap();
    assert_abs_diff_eq!(x, 0., epsilon = 1e-2);
    assert_abs_diff_eq!(y, 0., epsilon = 1e-2);
}

#[test]
fn webmerc_10_east() {
    let from = Proj::from_user_string("EPSG:4326").unwrap();
    let to = Proj::from_user_string("EPSG:3857").unwrap();

    let (x, y) = transform_xy(&from, &to, 10f64.to_radians(), 0.).unwrap();
    assert_abs_diff_eq!(x, 1113194.9, epsilon = 1.);
    assert_abs_diff_eq!(y, 0., epsilon = 1e-2);
}

#[test]
fn nad83_massachusetts_lcc() {
    let from = Proj::from_user_string("EPSG:4326").unwrap();
    let to = Proj::from_user_string(EPSG_26986_PROJ).unwrap();

    let (x, y) = transform_xy(
        &from,
        &to,
        (-71.11881762742996f64).to_radians(),
        42.37346263960867f64.to_radians(),
    )
    .unwrap();
    assert_abs_diff_eq!(x, 231394.84, epsilon = 1e-2);
    assert_abs_diff_eq!(y, 902621.11, epsilon = 1e-2);
}

#[test]
fn utm_19n_boston() {
    let from = Proj::from_user_string("EPSG:4326").unwrap();
    let to = Proj::from_user_string("EPSG:32619").unwrap();

    let (x, y) = transform_xy(
        &from,
        &to,
        (-71f64).to_radians(),
        41f64.to_radians(),
    )
    .unwrap();
    assert_abs_diff_eq!(x, 331792.1148, epsilon = 1.);
    assert_abs_diff_eq!(y, 4540683.53, epsilon = 1.);
}

#[test]
fn robinson_sample() {
    let from = Proj::from_user_string("EPSG:4326").unwrap();
    let to = Proj::from_user_string("+proj=robin +lon_0=0 +datum=WGS84").unwrap();

    let (x, y) = transform_xy(
        &from,
        &to,
        (-15f64).to_radians(),
        (-35f64).to_radians(),
    )
    .unwrap();
    assert_abs_diff_eq!(x, -1335949.91, epsilon = 1.);
    assert_abs_diff_eq!(y, -3743319.07, epsilon = 1.);
}

#[test]
fn parameter_parsing_equivalence() {
    // The proj string, WKT1 and WKT2 forms of EPSG:26986 must project
    // identically over a grid of test points
    let from = Proj::from_user_string("EPSG:4326").unwrap();
    let p_proj = Proj::from_user_string(EPSG_26986_PROJ).unwrap();
    let p_wkt1 = Proj::from_user_string(EPSG_26986_WKT1).unwrap();
    let p_wkt2 = Proj::from_user_string(EPSG_26986_WKT2).unwrap();

    for lon in [-73., -72., -71., -70.] {
        for lat in [41., 42., 43.] {
            let pt = (f64::to_radians(lon), f64::to_radians(lat));
            let (x0, y0) = transform_xy(&from, &p_proj, pt.0, pt.1).unwrap();
            let (x1, y1) = transform_xy(&from, &p_wkt1, pt.0, pt.1).unwrap();
            let (x2, y2) = transform_xy(&from, &p_wkt2, pt.0, pt.1).unwrap();

            assert_abs_diff_eq!(x0, x1, epsilon = 1e-9);
            assert_abs_diff_eq!(y0, y1, epsilon = 1e-9);
            assert_abs_diff_eq!(x0, x2, epsilon = 1e-9);
            assert_abs_diff_eq!(y0, y2, epsilon = 1e-9);
        }
    }
}

#[test]
fn idempotent_passthrough() {
    for defn in [
        EPSG_26986_PROJ,
        "EPSG:3857",
        "+proj=moll +ellps=WGS84",
        "+proj=aeqd +lat_0=40 +ellps=GRS80",
    ] {
        let c = Proj::from_user_string(defn).unwrap();
        let (x0, y0, z0) = (10_000., 20_000., 5.);
        let (x, y, z) = transform_xyz(&c, &c, x0, y0, z0).unwrap();
        assert!((x - x0).abs() < 1e-6, "{defn}");
        assert!((y - y0).abs() < 1e-6, "{defn}");
        assert_abs_diff_eq!(z, z0, epsilon = 1e-12);
    }
}

#[test]
fn converter_roundtrip_boston() {
    let conv = Converter::new("EPSG:4326", EPSG_26986_PROJ).unwrap();

    let mut pt = (
        (-71.11881762742996f64).to_radians(),
        42.37346263960867f64.to_radians(),
    );
    conv.forward(&mut pt).unwrap();
    assert_abs_diff_eq!(pt.0, 231394.84, epsilon = 1e-2);
    assert_abs_diff_eq!(pt.1, 902621.11, epsilon = 1e-2);

    conv.inverse(&mut pt).unwrap();
    assert_abs_diff_eq!(pt.0, (-71.11881762742996f64).to_radians(), epsilon = 1e-9);
    assert_abs_diff_eq!(pt.1, 42.37346263960867f64.to_radians(), epsilon = 1e-9);
}

#[test]
fn roundtrip_identity_over_valid_domain() {
    // inverse(forward(lam, phi)) over the valid domain, 1e-8 radians
    // for closed form methods, 1e-6 for the iterative ones
    let from = Proj::from_user_string("EPSG:4326").unwrap();

    let closed_form = [
        "+proj=merc +ellps=WGS84",
        "+proj=tmerc +ellps=GRS80",
        "+proj=lcc +lat_1=33 +lat_2=45 +ellps=GRS80",
        "+proj=aea +lat_1=29.5 +lat_2=45.5 +ellps=GRS80",
        "+proj=stere +lat_0=90 +lat_ts=70 +ellps=GRS80",
        "+proj=laea +lat_0=45 +ellps=GRS80",
        "+proj=cea +ellps=GRS80",
        "+proj=eqc +ellps=WGS84",
        "+proj=mill +ellps=WGS84",
        "+proj=sinu +ellps=GRS80",
        "+proj=eqdc +lat_1=30 +lat_2=60 +ellps=GRS80",
        "+proj=gnom +lat_0=45 +R=6370997",
        "+proj=ortho +lat_0=45 +R=6370997",
        "+proj=aeqd +lat_0=40 +R=6370997",
    ];
    let iterative = [
        "+proj=moll +ellps=WGS84",
        "+proj=robin +ellps=WGS84",
        "+proj=eqearth +ellps=GRS80",
        "+proj=vandg +R=6370997",
    ];

    let points = [(2., 1.), (-12., 37.), (25., 52.), (-60., 40.)];

    for (defs, tol) in [(&closed_form[..], 1e-8), (&iterative[..], 1e-6)] {
        for defn in defs {
            let p = Proj::from_user_string(defn).unwrap();
            for (lon, lat) in points {
                let (lam, phi) = (f64::to_radians(lon), f64::to_radians(lat));
                let (px, py) = transform_xy(&from, &p, lam, phi).unwrap();
                let (lam2, phi2) = transform_xy(&p, &from, px, py).unwrap();
                assert!((lam - lam2).abs() < tol, "{defn} lon {lon}");
                assert!((phi - phi2).abs() < tol, "{defn} lat {lat}");
            }
        }
    }
}

#[cfg(all(feature = "local_tests", feature = "geotiff"))]
#[test]
fn ostn15_grid_shift() {
    // ETRS89 through the OSTN15 GeoTIFF grid to OSGB36: the shift is
    // between 0 and 0.01 degrees on both coordinates and the reverse
    // direction returns within 1e-6 degrees
    reproj::nadgrids::set_builder(reproj::nadgrids::files::read_from_file);

    let from = Proj::from_user_string("EPSG:4326").unwrap();
    let to = Proj::from_user_string(concat!(
        "+proj=longlat +ellps=airy ",
        "+nadgrids=uk_os_OSTN15_NTv2_OSGBtoETRS.tif +no_defs"
    ))
    .unwrap();

    let (lon, lat) = ((-0.1276f64).to_radians(), 51.5074f64.to_radians());
    let (lon2, lat2) = transform_xy(&from, &to, lon, lat).unwrap();

    let dlon = (lon2 - lon).to_degrees().abs();
    let dlat = (lat2 - lat).to_degrees().abs();
    assert!(dlon > 0. && dlon < 0.01, "{dlon}");
    assert!(dlat > 0. && dlat < 0.01, "{dlat}");

    let (lon3, lat3) = transform_xy(&to, &from, lon2, lat2).unwrap();
    assert!((lon3 - lon).to_degrees().abs() < 1e-6);
    assert!((lat3 - lat).to_degrees().abs() < 1e-6);
}
