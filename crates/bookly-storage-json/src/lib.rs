//! bookly-storage-json
//!
//! File-backed snapshot source: one pretty-printed JSON document per vendor
//! snapshot, plus a TTL cache that can wrap any [`SnapshotSource`].

use std::{
    fs::{self, File},
    io::{ErrorKind, Write},
    path::{Path, PathBuf},
};

use bookly_core::{storage::SnapshotSource, CoreError};
use bookly_domain::VendorSnapshot;
use tracing::{debug, info};

pub mod cache;

pub use cache::CachedSnapshotSource;

const SNAPSHOT_EXTENSION: &str = "json";
const TMP_SUFFIX: &str = "tmp";

/// Stores snapshots as `<root>/<slug>.json`.
#[derive(Debug, Clone)]
pub struct JsonSnapshotStore {
    root: PathBuf,
}

impl JsonSnapshotStore {
    pub fn new(root: PathBuf) -> Result<Self, CoreError> {
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn snapshot_path(&self, name: &str) -> PathBuf {
        self.root
            .join(format!("{}.{}", canonical_name(name), SNAPSHOT_EXTENSION))
    }

    pub fn save_snapshot(&self, name: &str, snapshot: &VendorSnapshot) -> Result<PathBuf, CoreError> {
        let path = self.snapshot_path(name);
        save_snapshot_to_path(snapshot, &path)?;
        info!(path = %path.display(), "saved snapshot");
        Ok(path)
    }

    pub fn delete_snapshot(&self, name: &str) -> Result<(), CoreError> {
        let path = self.snapshot_path(name);
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }
}

impl SnapshotSource for JsonSnapshotStore {
    fn load_snapshot(&self, name: &str) -> Result<VendorSnapshot, CoreError> {
        let path = self.snapshot_path(name);
        if !path.exists() {
            return Err(CoreError::SnapshotNotFound(name.to_string()));
        }
        load_snapshot_from_path(&path)
    }

    fn list_snapshots(&self) -> Result<Vec<String>, CoreError> {
        if !self.root.exists() {
            return Ok(Vec::new());
        }
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let entry = entry?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            if path.extension().and_then(|ext| ext.to_str()) != Some(SNAPSHOT_EXTENSION) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) {
                names.push(stem.to_string());
            }
        }
        names.sort();
        Ok(names)
    }
}

/// Saves a snapshot to an arbitrary path, writing a sibling temp file first.
pub fn save_snapshot_to_path(snapshot: &VendorSnapshot, path: &Path) -> Result<(), CoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(snapshot).map_err(|err| CoreError::Serde(err.to_string()))?;
    let tmp = tmp_path(path);
    write_file(&tmp, &json)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

/// Loads a snapshot from the provided filesystem path.
pub fn load_snapshot_from_path(path: &Path) -> Result<VendorSnapshot, CoreError> {
    let data = fs::read_to_string(path).map_err(|err| match err.kind() {
        ErrorKind::NotFound => CoreError::SnapshotNotFound(path.display().to_string()),
        _ => CoreError::Io(err),
    })?;
    let snapshot: VendorSnapshot =
        serde_json::from_str(&data).map_err(|err| CoreError::Serde(err.to_string()))?;
    debug!(
        path = %path.display(),
        bookings = snapshot.bookings.len(),
        payments = snapshot.payments.len(),
        expenses = snapshot.expenses.len(),
        "loaded snapshot"
    );
    Ok(snapshot)
}

/// Lowercases `name` and replaces anything outside `[a-z0-9]` with `_`.
pub fn canonical_name(name: &str) -> String {
    let sanitized: String = name
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| match c {
            'a'..='z' | '0'..='9' => c,
            _ => '_',
        })
        .collect();
    if sanitized.trim_matches('_').is_empty() {
        "snapshot".into()
    } else {
        sanitized
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_file(path: &Path, data: &str) -> Result<(), CoreError> {
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}
