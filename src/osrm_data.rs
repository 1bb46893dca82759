//! OSRM dataset preparation for integration tests (download + preprocess).
//!
//! Downloads a Geofabrik extract and runs the OSRM preprocessing pipeline
//! through the `osrm/osrm-backend` Docker image, so a test can mount the
//! resulting dataset into an `osrm-routed` container.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum OsrmDataError {
    #[error("dataset I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error("extract download failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("preprocessing step failed: {0}")]
    Process(String),
}

#[derive(Debug, Clone)]
pub struct GeofabrikRegion {
    /// Geofabrik region path, e.g. "north-america/us/nevada".
    pub path: String,
}

impl GeofabrikRegion {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    /// Last path segment, used to name the local files.
    pub fn name(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or("region")
    }

    pub fn url(&self) -> String {
        format!("https://download.geofabrik.de/{}-latest.osm.pbf", self.path)
    }
}

/// A prepared dataset: the extract plus the MLD-preprocessed OSRM files.
#[derive(Debug, Clone)]
pub struct OsrmDataset {
    pub data_dir: PathBuf,
    pub osrm_base: PathBuf,
    pub pbf_path: PathBuf,
}

impl OsrmDataset {
    /// Downloads and preprocesses the region under `data_root`, skipping
    /// any step whose outputs already exist.
    pub fn ensure(region: &GeofabrikRegion, data_root: impl AsRef<Path>) -> Result<Self, OsrmDataError> {
        let data_root = if data_root.as_ref().is_absolute() {
            data_root.as_ref().to_path_buf()
        } else {
            std::env::current_dir()?.join(data_root.as_ref())
        };
        let data_dir = data_root.join(region.name());
        fs::create_dir_all(&data_dir)?;

        let pbf_path = data_dir.join(format!("{}-latest.osm.pbf", region.name()));
        if !pbf_path.exists() {
            tracing::info!("downloading {} to {}", region.url(), pbf_path.display());
            download(&region.url(), &pbf_path)?;
        }

        let osrm_base = data_dir.join(format!("{}-latest.osrm", region.name()));
        if !osrm_base.exists() {
            run_backend_step(
                &data_dir,
                &["osrm-extract", "-p", "/opt/car.lua", &in_container(&pbf_path)],
            )?;
        }

        if !mld_ready(&osrm_base) {
            run_backend_step(&data_dir, &["osrm-partition", &in_container(&osrm_base)])?;
            run_backend_step(&data_dir, &["osrm-customize", &in_container(&osrm_base)])?;
        }

        Ok(Self {
            data_dir,
            osrm_base,
            pbf_path,
        })
    }
}

fn download(url: &str, dest: &Path) -> Result<(), OsrmDataError> {
    let bytes = reqwest::blocking::get(url)?.error_for_status()?.bytes()?;
    let tmp_path = dest.with_extension("tmp");
    fs::write(&tmp_path, &bytes)?;
    fs::rename(tmp_path, dest)?;
    Ok(())
}

fn mld_ready(osrm_base: &Path) -> bool {
    ["osrm.partition", "osrm.mldgr", "osrm.cells"]
        .iter()
        .all(|ext| osrm_base.with_extension(ext).exists())
        && osrm_base.exists()
}

/// Path of a dataset file as seen inside the backend container.
fn in_container(path: &Path) -> String {
    let name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or_default();
    format!("/data/{name}")
}

fn run_backend_step(data_dir: &Path, args: &[&str]) -> Result<(), OsrmDataError> {
    tracing::info!("running {:?} in osrm/osrm-backend", args);
    let status = Command::new("docker")
        .args(["run", "--rm", "-t", "-v"])
        .arg(format!("{}:/data", data_dir.display()))
        .arg("osrm/osrm-backend")
        .args(args)
        .status()?;

    if status.success() {
        Ok(())
    } else {
        Err(OsrmDataError::Process(format!(
            "{:?} exited with status {}",
            args, status
        )))
    }
}
