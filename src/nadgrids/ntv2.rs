//!
//! NTv2 grid parser
//!
//! An NTv2 file carries one overview header followed by one header and a
//! dense shift matrix per subgrid. Headers are 11 records of 16 bytes.
//! Endianness is detected by checking both interpretations of the
//! `NUM_OREC == 11` field.
//!
use crate::errors::{Error, Result};
use crate::log::trace;
use crate::math::consts::SEC_TO_RAD;
use crate::nadgrids::catalog::Catalog;
use crate::nadgrids::header::error_str::*;
use crate::nadgrids::header::{Endianness, Header};
use crate::nadgrids::{Grid, GridId, Lp};
use std::io::Read;

const NTV2_HEADER_SIZE: usize = 11 * 16;

/// Ntv2 reader
pub(crate) fn read_ntv2<R: Read>(catalog: &Catalog, key: &str, read: &mut R) -> Result<()> {
    let mut head = Header::<NTV2_HEADER_SIZE>::new();

    trace!("Reading ntv2 {}", key);

    // Read overview header
    head.read(read)?;
    // Check endianness
    head.endian = if head.get_u8(8) == 11 {
        Endianness::native()
    } else {
        Endianness::other()
    };

    let nsubgrids = head.get_u32(40) as usize;

    trace!("Reading ntv2 {} subgrids {}", key, nsubgrids);

    // Read subsequent grids
    (0..nsubgrids).try_for_each(|_| read_ntv2_grid(catalog, key, head.read(read)?, read))
}

/// Read ntv2 grid data
fn read_ntv2_grid<R: Read>(
    catalog: &Catalog,
    key: &str,
    head: &Header<NTV2_HEADER_SIZE>,
    read: &mut R,
) -> Result<()> {
    match head.get_str(0, 8) {
        Ok("SUB_NAME") => Ok(()),
        _ => Err(Error::InvalidNtv2GridFormat(ERR_INVALID_HEADER)),
    }?;

    let id = head.get_id(8);
    let mut lineage = head.get_id(24);
    if lineage.as_str().trim() == "NONE" {
        lineage = GridId::root();
    }

    // NTv2 longitudes are positive west: negating the bounds
    // yields east-positive values
    let mut ll = Lp {
        lam: -head.get_f64(120), // W_LONG
        phi: head.get_f64(72),   // S_LAT
    };

    let mut ur = Lp {
        lam: -head.get_f64(104), // E_LONG
        phi: head.get_f64(88),   // N_LAT
    };

    let mut del = Lp {
        lam: head.get_f64(152), // longitude interval
        phi: head.get_f64(136), // latitude interval
    };

    let lim = Lp {
        lam: (((ur.lam - ll.lam).abs() / del.lam + 0.5) + 1.).floor(),
        phi: (((ur.phi - ll.phi).abs() / del.phi + 0.5) + 1.).floor(),
    };

    // units are in seconds of degree
    ll.lam *= SEC_TO_RAD;
    ll.phi *= SEC_TO_RAD;
    ur.lam *= SEC_TO_RAD;
    ur.phi *= SEC_TO_RAD;
    del.lam *= SEC_TO_RAD;
    del.phi *= SEC_TO_RAD;

    // Read matrix data
    let nrows = lim.phi as usize;
    let rowsize = lim.lam as usize;

    let gs_count = head.get_u32(168) as usize;
    if gs_count != nrows * rowsize {
        return Err(Error::InvalidNtv2GridFormat(ERR_GSCOUNT_NOT_MATCHING));
    }

    trace!(
        "Reading data for grid {}:{}:{}",
        key,
        id.as_str(),
        lineage.as_str()
    );

    // Each node record holds (lat shift, lon shift, lat acc, lon acc)
    // as f32 arc-seconds, latitude shift first
    let mut buf = head.rebind::<16>();
    let mut cvs: Vec<Lp> = (0..gs_count)
        .map(|_| {
            buf.read(read)?;
            Ok(Lp {
                phi: SEC_TO_RAD * (buf.get_f32(0) as f64),
                lam: SEC_TO_RAD * (buf.get_f32(4) as f64),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    // Nodes are stored east to west within a row: reverse each row so
    // that the fastest index increases with east-positive longitude
    for i in 0..nrows {
        let offs = i * rowsize;
        cvs[offs..(offs + rowsize)].reverse();
    }

    let epsilon = (del.lam.abs() + del.phi.abs()) / 10_000.;

    catalog.add_grid(
        key.into(),
        Grid {
            id,
            lineage,
            ll,
            ur,
            del,
            lim,
            epsilon,
            cvs: cvs.into_boxed_slice(),
        },
    )
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::nadgrids::catalog::Catalog;
    use std::io::Cursor;

    /// Build a minimal single-subgrid NTv2 file in memory:
    /// 2x2 nodes, 1 degree spacing, constant shift of
    /// (1.0, 0.5) arc-seconds.
    pub(crate) fn sample_ntv2() -> Vec<u8> {
        fn record(name: &[u8; 8], value: &[u8]) -> Vec<u8> {
            let mut rec = Vec::with_capacity(16);
            rec.extend_from_slice(name);
            rec.extend_from_slice(value);
            rec.resize(16, 0);
            rec
        }
        fn frecord(name: &[u8; 8], value: f64) -> Vec<u8> {
            record(name, &value.to_le_bytes())
        }
        fn irecord(name: &[u8; 8], value: u32) -> Vec<u8> {
            record(name, &value.to_le_bytes())
        }

        let mut buf: Vec<u8> = vec![];
        // Overview header (11 records)
        buf.extend(irecord(b"NUM_OREC", 11));
        buf.extend(irecord(b"NUM_SREC", 11));
        buf.extend(irecord(b"NUM_FILE", 1));
        buf.extend(record(b"GS_TYPE ", b"SECONDS "));
        buf.extend(record(b"VERSION ", b"NTv2.0  "));
        buf.extend(record(b"SYSTEM_F", b"TEST    "));
        buf.extend(record(b"SYSTEM_T", b"TEST    "));
        buf.extend(frecord(b"MAJOR_F ", 6378137.));
        buf.extend(frecord(b"MINOR_F ", 6356752.));
        buf.extend(frecord(b"MAJOR_T ", 6378137.));
        buf.extend(frecord(b"MINOR_T ", 6356752.));
        // Subgrid header (11 records). Bounds in arc-seconds,
        // positive west: from 2W to 1W, 50N to 51N.
        buf.extend(record(b"SUB_NAME", b"TESTGRID"));
        buf.extend(record(b"PARENT  ", b"NONE    "));
        buf.extend(record(b"CREATED ", b"        "));
        buf.extend(record(b"UPDATED ", b"        "));
        buf.extend(frecord(b"S_LAT   ", 50. * 3600.));
        buf.extend(frecord(b"N_LAT   ", 51. * 3600.));
        buf.extend(frecord(b"E_LONG  ", 1. * 3600.));
        buf.extend(frecord(b"W_LONG  ", 2. * 3600.));
        buf.extend(frecord(b"LAT_INC ", 3600.));
        buf.extend(frecord(b"LONG_INC", 3600.));
        buf.extend(irecord(b"GS_COUNT", 4));
        // 4 nodes, each (lat shift, lon shift, lat acc, lon acc) f32
        for _ in 0..4 {
            buf.extend(0.5f32.to_le_bytes()); // latitude shift
            buf.extend(1.0f32.to_le_bytes()); // longitude shift
            buf.extend(0.0f32.to_le_bytes());
            buf.extend(0.0f32.to_le_bytes());
        }
        buf
    }

    #[test]
    fn ntv2_parse_sample() {
        let catalog = Catalog::default();
        let data = sample_ntv2();
        read_ntv2(&catalog, "sample.gsb", &mut Cursor::new(data)).unwrap();

        let grids: Vec<_> = catalog.find("sample.gsb").unwrap().collect();
        assert_eq!(grids.len(), 1);

        let grid = grids[0];
        assert!(grid.is_root());
        assert_eq!(grid.id.as_str(), "TESTGRID");
        assert_eq!(grid.cvs.len(), 4);
        assert_eq!(grid.lim.lam, 2.);
        assert_eq!(grid.lim.phi, 2.);
        // Bounds east-positive: -2deg .. -1deg
        assert!((grid.ll.lam - (-2f64).to_radians()).abs() < 1e-9);
        assert!((grid.ll.phi - 50f64.to_radians()).abs() < 1e-9);
    }
}
