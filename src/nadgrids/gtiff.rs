//!
//! GeoTIFF packed grid parser
//!
//! PROJ distributes horizontal shift grids as cloud optimized GeoTIFF:
//! georeferencing comes from the tie-point and pixel-scale tags, samples
//! are two (or more) bands of arc-second shifts, latitude offset first
//! then longitude offset, east-positive.
//!
use crate::errors::{Error, Result};
use crate::log::trace;
use crate::math::consts::SEC_TO_RAD;
use crate::nadgrids::{Catalog, Grid, GridId, Lp};
use std::io::{Read, Seek};

use tiff::decoder::{Decoder, DecodingResult};
use tiff::tags::Tag;

pub(crate) fn read_gtiff<R: Read + Seek>(catalog: &Catalog, key: &str, read: &mut R) -> Result<()> {
    trace!("Reading geotiff grid {}", key);

    let mut decoder =
        Decoder::new(read).map_err(|_| Error::InvalidGtiffGridFormat("Not a TIFF file"))?;

    let (width, height) = decoder
        .dimensions()
        .map_err(|_| Error::InvalidGtiffGridFormat("Missing image dimensions"))?;
    let (width, height) = (width as usize, height as usize);
    if width < 2 || height < 2 {
        return Err(Error::InvalidGtiffGridFormat("Degenerate grid size"));
    }

    // Georeferencing: tie point maps raster (0,0) to the north-west
    // node, pixel scale gives the node spacing in degrees
    let tie = decoder
        .get_tag_f64_vec(Tag::ModelTiepointTag)
        .map_err(|_| Error::InvalidGtiffGridFormat("Missing model tie point"))?;
    let scale = decoder
        .get_tag_f64_vec(Tag::ModelPixelScaleTag)
        .map_err(|_| Error::InvalidGtiffGridFormat("Missing pixel scale"))?;
    if tie.len() < 6 || scale.len() < 2 || scale[0] <= 0. || scale[1] <= 0. {
        return Err(Error::InvalidGtiffGridFormat("Invalid georeferencing"));
    }

    let (lon0, lat_top) = (tie[3], tie[4]);
    let (dlam, dphi) = (scale[0], scale[1]);

    let spp = decoder
        .get_tag_u32(Tag::SamplesPerPixel)
        .map(|v| v as usize)
        .unwrap_or(1);
    if spp < 2 {
        return Err(Error::InvalidGtiffGridFormat("Expected two shift bands"));
    }

    // Interleaved samples, f32 or f64 per band
    let samples: Vec<f64> = match decoder
        .read_image()
        .map_err(|_| Error::InvalidGtiffGridFormat("Unreadable image data"))?
    {
        DecodingResult::F32(v) => v.iter().map(|v| *v as f64).collect(),
        DecodingResult::F64(v) => v,
        _ => return Err(Error::InvalidGtiffGridFormat("Unsupported sample format")),
    };

    if samples.len() < width * height * spp {
        return Err(Error::InvalidGtiffGridFormat("Truncated image data"));
    }

    // Collate to south-origin rows, converting the east-positive
    // arc-second shifts to the west-positive radian convention
    // used by the shift kernel
    let mut cvs: Vec<Lp> = Vec::with_capacity(width * height);
    for row in 0..height {
        let src_row = height - 1 - row;
        for col in 0..width {
            let offset = (src_row * width + col) * spp;
            cvs.push(Lp {
                phi: samples[offset] * SEC_TO_RAD,
                lam: -(samples[offset + 1] * SEC_TO_RAD),
            });
        }
    }

    let ll = Lp {
        lam: lon0.to_radians(),
        phi: (lat_top - (height as f64 - 1.) * dphi).to_radians(),
    };
    let ur = Lp {
        lam: (lon0 + (width as f64 - 1.) * dlam).to_radians(),
        phi: lat_top.to_radians(),
    };
    let del = Lp {
        lam: dlam.to_radians(),
        phi: dphi.to_radians(),
    };
    let lim = Lp {
        lam: width as f64,
        phi: height as f64,
    };

    let epsilon = (del.lam.abs() + del.phi.abs()) / 10_000.;

    catalog.add_grid(
        key.into(),
        Grid {
            id: GridId::root(),
            lineage: GridId::root(),
            ll,
            ur,
            del,
            lim,
            epsilon,
            cvs: cvs.into_boxed_slice(),
        },
    )
}
