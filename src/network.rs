//!
//! Remote collaborators
//!
//! Network access is confined to this module: definitions missing from
//! the local registries may be fetched from spatialreference.org, grid
//! files may be downloaded from the proj CDN into an on-disk cache.
//!
//! Nothing here is ever invoked from a transform: misses surface at
//! parse time only.
//!
use crate::errors::{Error, Result};
use crate::log::{debug, error};
use crate::nadgrids::{files, Catalog};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;

const EPSG_URL: &str = "https://spatialreference.org/ref";
const CDN_URL: &str = "https://cdn.proj.org";

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const READ_TIMEOUT: Duration = Duration::from_secs(30);

const MAX_RETRIES: u32 = 3;
const BACKOFF_START_MS: u64 = 500;
const BACKOFF_MAX_MS: u64 = 5_000;
// Applied as +/- 25% jitter
const BACKOFF_JITTER: f64 = 0.25;

// Codes worth retrying: transient server conditions
const RETRY_CODES: [u16; 3] = [429, 408, 500];

/// On-disk cache directory for downloaded grids
static CACHE_DIR: Mutex<Option<PathBuf>> = Mutex::new(None);

/// Set the grid download cache directory.
///
/// The layout is a single flat directory of files named exactly
/// as the grids.
pub fn set_cache_dir<P: Into<PathBuf>>(path: P) {
    CACHE_DIR.lock().unwrap().replace(path.into());
}

fn client() -> Result<reqwest::blocking::Client> {
    reqwest::blocking::Client::builder()
        .connect_timeout(CONNECT_TIMEOUT)
        .timeout(READ_TIMEOUT)
        .user_agent(concat!("reproj/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|err| Error::NetworkError(err.to_string()))
}

// Deterministic jitter derived from the attempt; avoids pulling
// a rng dependency for a +/- 25% spread
fn backoff_delay(attempt: u32) -> Duration {
    let base = (BACKOFF_START_MS << attempt).min(BACKOFF_MAX_MS) as f64;
    let jitter = 1. + BACKOFF_JITTER * f64::sin(attempt as f64 * 12.9898);
    Duration::from_millis((base * jitter) as u64)
}

fn get_with_retry(url: &str) -> Result<reqwest::blocking::Response> {
    let client = client()?;
    let mut attempt = 0;
    loop {
        match client.get(url).send() {
            Ok(resp) => {
                let status = resp.status().as_u16();
                if resp.status().is_success() {
                    return Ok(resp);
                }
                if status == 404 {
                    return Err(Error::RemoteDefinitionNotFound(url.into()));
                }
                if !(RETRY_CODES.contains(&status) || (500..600).contains(&status))
                    || attempt >= MAX_RETRIES
                {
                    return Err(Error::NetworkError(format!("{url}: HTTP {status}")));
                }
            }
            Err(err) => {
                if attempt >= MAX_RETRIES {
                    return Err(Error::NetworkError(err.to_string()));
                }
            }
        }
        std::thread::sleep(backoff_delay(attempt));
        attempt += 1;
    }
}

/// Fetch a PROJJSON definition for an authority code
pub fn fetch_epsg_projjson(auth: &str, code: u32) -> Result<String> {
    let url = format!("{EPSG_URL}/{auth}/{code}/projjson.json");
    debug!("Fetching definition from {}", url);
    get_with_retry(&url)?
        .text()
        .map_err(|err| Error::NetworkError(err.to_string()))
}

/// Download a grid from the CDN into the cache directory and
/// return its local path
pub fn download_grid(name: &str) -> Result<PathBuf> {
    let dir = CACHE_DIR
        .lock()
        .unwrap()
        .clone()
        .unwrap_or_else(std::env::temp_dir);
    std::fs::create_dir_all(&dir)?;

    let path = dir.join(name);
    if path.exists() {
        return Ok(path);
    }

    let url = format!("{CDN_URL}/{name}");
    debug!("Downloading grid from {}", url);
    let bytes = get_with_retry(&url)?
        .bytes()
        .map_err(|err| Error::NetworkError(err.to_string()))?;

    // Write the raw bytes then promote, so that a failed download
    // never shadows the grid
    let tmp = dir.join(format!("{name}.part"));
    let mut out = std::fs::File::create(&tmp)?;
    out.write_all(&bytes)?;
    drop(out);
    std::fs::rename(&tmp, &path)?;

    Ok(path)
}

/// Grid builder resolving grids from the local paths first, then
/// from the CDN.
///
/// Install it with
/// `nadgrids::set_builder(network::download_from_cdn)`.
pub fn download_from_cdn(catalog: &Catalog, key: &str) -> Result<()> {
    match files::read_from_file(catalog, key) {
        Err(Error::GridFileNotFound(_)) => {}
        done => return done,
    }

    let path = download_grid(key)?;
    files::read_from_file_path(catalog, key, &path).map_err(|err| {
        error!("Failed to read downloaded grid {}: {:?}", key, err);
        err
    })
}
