//!
//! Unit tests
//!
use std::sync::Once;

static INIT: Once = Once::new();

pub fn setup() {
    // Init setup
    INIT.call_once(|| {
        let _ = env_logger::try_init();
    });
}

pub(crate) mod utils {
    use crate::math::adjlon;
    use crate::proj::{Proj, ProjData};
    use approx::assert_abs_diff_eq;

    pub(crate) fn scale(d: &ProjData, xyz: (f64, f64, f64)) -> (f64, f64, f64) {
        (xyz.0 * d.ellps.a + d.x0, xyz.1 * d.ellps.a + d.y0, xyz.2)
    }

    pub(crate) fn descale(d: &ProjData, xyz: (f64, f64, f64)) -> (f64, f64, f64) {
        (
            (xyz.0 - d.x0) * d.ellps.ra,
            (xyz.1 - d.y0) * d.ellps.ra,
            xyz.2,
        )
    }

    pub(crate) fn to_deg(lam: f64, phi: f64, z: f64) -> (f64, f64, f64) {
        (lam.to_degrees(), phi.to_degrees(), z)
    }

    pub(crate) fn to_rad(lpz: (f64, f64, f64)) -> (f64, f64, f64) {
        (lpz.0.to_radians(), lpz.1.to_radians(), lpz.2)
    }

    pub(crate) fn test_proj_forward(
        p: &Proj,
        inputs: &[((f64, f64, f64), (f64, f64, f64))],
        prec: f64,
    ) {
        let d = p.data();
        inputs.iter().for_each(|(input, expect)| {
            let (lam, phi, z) = to_rad(*input);
            let out = scale(
                d,
                p.projection()
                    .forward(adjlon(lam - d.lam0), phi, z)
                    .unwrap(),
            );
            assert_abs_diff_eq!(out.0, expect.0, epsilon = prec);
            assert_abs_diff_eq!(out.1, expect.1, epsilon = prec);
            assert_abs_diff_eq!(out.2, expect.2, epsilon = prec);
        })
    }

    pub(crate) fn test_proj_inverse(
        p: &Proj,
        inputs: &[((f64, f64, f64), (f64, f64, f64))],
        prec: f64,
    ) {
        let d = p.data();
        inputs.iter().for_each(|(expect, input)| {
            let (x, y, z) = descale(d, *input);
            let (lam, phi, z) = p.projection().inverse(x, y, z).unwrap();
            let out = to_deg(adjlon(lam + d.lam0), phi, z);
            assert_abs_diff_eq!(out.0, expect.0, epsilon = prec);
            assert_abs_diff_eq!(out.1, expect.1, epsilon = prec);
            assert_abs_diff_eq!(out.2, expect.2, epsilon = prec);
        })
    }
}

use crate::adaptors::{transform_point_array, transform_xy};
use crate::datum_transform::testing::{reset_shift_count, shift_count};
use crate::proj::Proj;
use crate::transform::transform;
use approx::assert_abs_diff_eq;

#[test]
fn test_transform_array() {
    let mut data: Vec<(f64, f64, f64)> = (1..=1_000)
        .map(|_| (2.0f64.to_radians(), 1.0f64.to_radians(), 0.0f64))
        .collect();

    let from = Proj::from_proj_string("+proj=latlong +ellps=GRS80").unwrap();
    let to = Proj::from_proj_string("+proj=etmerc +ellps=GRS80").unwrap();

    transform_point_array(&from, &to, data.as_mut_slice()).unwrap();

    // Check values
    data.iter().for_each(|(x, y, _)| {
        assert_abs_diff_eq!(*x, 222650.79679758527, epsilon = 1.0e-10);
        assert_abs_diff_eq!(*y, 110642.22941193319, epsilon = 1.0e-10);
    });
}

#[test]
fn test_utm33_grs80() {
    let from = Proj::from_proj_string("+proj=latlong +ellps=GRS80").unwrap();
    let to = Proj::from_proj_string("+proj=utm +ellps=GRS80 +zone=33").unwrap();

    let mut v1 = vec![(
        13.393921852111816_f64.to_radians(),
        52.5200080871582_f64.to_radians(),
        0.0,
    )];

    transform(&from, &to, v1.as_mut_slice()).unwrap();

    assert_abs_diff_eq!(v1[0].0, 391027.67777461524, epsilon = 1.0e-10);
    assert_abs_diff_eq!(v1[0].1, 5820089.724404063, epsilon = 1.0e-10);
}

#[test]
fn test_wgs84_bng_conversion() {
    let from = Proj::from_proj_string("+proj=latlong +datum=WGS84").unwrap();
    let to = Proj::from_proj_string(concat!(
        "+proj=tmerc +lat_0=49 +lon_0=-2 +k=0.9996012717 +x_0=400000 +y_0=-100000 ",
        "+ellps=airy",
    ))
    .unwrap();

    let mut v1 = vec![(-4.89328_f64.to_radians(), 51.66311_f64.to_radians(), 0.0)];

    transform(&from, &to, v1.as_mut_slice()).unwrap();

    assert_abs_diff_eq!(v1[0].0, 199925.978901151626, epsilon = 1.0e-8);
    assert_abs_diff_eq!(v1[0].1, 200052.051949012151, epsilon = 1.0e-8);
}

#[test]
fn test_wgs84_shortcircuit() {
    // With both sides WGS84-identical no datum shift may run
    let from = Proj::from_proj_string("+proj=latlong +datum=WGS84").unwrap();
    let to = Proj::from_proj_string("+proj=merc +ellps=GRS80 +towgs84=0,0,0").unwrap();

    reset_shift_count();
    let _ = transform_xy(&from, &to, 2.0f64.to_radians(), 1.0f64.to_radians()).unwrap();
    assert_eq!(shift_count(), 0);

    // A real shift does run the geocentric path
    let osgb = Proj::from_proj_string("+proj=latlong +datum=OSGB36").unwrap();
    let _ = transform_xy(&from, &osgb, 2.0f64.to_radians(), 51.0f64.to_radians()).unwrap();
    assert_eq!(shift_count(), 1);
}

#[test]
fn test_transform_nan_passthrough() {
    let from = Proj::from_proj_string("+proj=latlong +datum=WGS84").unwrap();
    let to = Proj::from_proj_string("+proj=merc +datum=WGS84").unwrap();

    let (x, y) = transform_xy(&from, &to, f64::NAN, 1.0).unwrap();
    assert!(x.is_nan());
    assert!(y.is_nan());
}

#[test]
fn test_transform_failure_leaves_input_unchanged() {
    let from = Proj::from_proj_string("+proj=latlong +datum=WGS84").unwrap();
    let to = Proj::from_proj_string("+proj=merc +datum=WGS84").unwrap();

    // North pole is singular in Mercator
    let mut pt = (0.0, 90.0f64.to_radians(), 0.0);
    assert!(transform(&from, &to, &mut pt).is_err());
    assert_eq!(pt, (0.0, 90.0f64.to_radians(), 0.0));
}

#[test]
fn test_transform_idempotent_passthrough() {
    let c = Proj::from_proj_string("+proj=merc +ellps=GRS80").unwrap();

    let (x0, y0) = (222638.98158654713, 110579.96521825077);
    let (x, y) = transform_xy(&c, &c, x0, y0).unwrap();
    assert_abs_diff_eq!(x, x0, epsilon = 1.0e-8);
    assert_abs_diff_eq!(y, y0, epsilon = 1.0e-8);
}

#[test]
fn test_axis_order_neu() {
    // axis=neu: input coordinates are given as (lat, lon)
    let from = Proj::from_proj_string("+proj=latlong +ellps=GRS80 +axis=neu").unwrap();
    let to = Proj::from_proj_string("+proj=latlong +ellps=GRS80").unwrap();

    let (x, y) = transform_xy(
        &from,
        &to,
        1.0f64.to_radians(), // latitude first
        2.0f64.to_radians(),
    )
    .unwrap();
    assert_abs_diff_eq!(x, 2.0f64.to_radians(), epsilon = 1.0e-14);
    assert_abs_diff_eq!(y, 1.0f64.to_radians(), epsilon = 1.0e-14);

    // and on output
    let (x, y) = transform_xy(&to, &from, 2.0f64.to_radians(), 1.0f64.to_radians()).unwrap();
    assert_abs_diff_eq!(x, 1.0f64.to_radians(), epsilon = 1.0e-14);
    assert_abs_diff_eq!(y, 2.0f64.to_radians(), epsilon = 1.0e-14);
}

#[test]
fn test_prime_meridian() {
    let from = Proj::from_proj_string("+proj=latlong +ellps=GRS80 +pm=paris").unwrap();
    let to = Proj::from_proj_string("+proj=latlong +ellps=GRS80").unwrap();

    let (x, _) = transform_xy(&from, &to, 0., 48.0f64.to_radians()).unwrap();
    assert_abs_diff_eq!(
        x,
        2.337229166667f64.to_radians(),
        epsilon = 1.0e-12
    );
}

#[test]
fn test_units_factor() {
    // Same CRS expressed in km: coordinates scale accordingly
    let m = Proj::from_proj_string("+proj=merc +ellps=GRS80").unwrap();
    let km = Proj::from_proj_string("+proj=merc +ellps=GRS80 +units=km").unwrap();

    let from = Proj::from_proj_string("+proj=latlong +ellps=GRS80").unwrap();
    let (lam, phi) = (2.0f64.to_radians(), 1.0f64.to_radians());

    let (x_m, y_m) = transform_xy(&from, &m, lam, phi).unwrap();
    let (x_km, y_km) = transform_xy(&from, &km, lam, phi).unwrap();

    assert_abs_diff_eq!(x_m / 1000., x_km, epsilon = 1.0e-8);
    assert_abs_diff_eq!(y_m / 1000., y_km, epsilon = 1.0e-8);
}
