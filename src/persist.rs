//! Disk I/O helpers: tolerant snapshot load and atomic write.
//!
//! The rename-over approach is close to atomic on most platforms. On NTFS
//! (Windows) it's reliable; on FAT32 or network shares there are no hard
//! guarantees.

use crate::error::{Error, Result};
use crate::record::{Catalog, MediaRecord};
use crate::serializer::Serializer;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, warn};

/// Reads the snapshot at `path`.
///
/// - Missing file: an empty snapshot is written there and an empty catalog
///   returned.
/// - Empty, unparseable, or non-object content: empty catalog, logged, not an
///   error.
/// - Entries that are not well-formed records, or whose key differs from the
///   record name, are skipped.
///
/// Only I/O errors other than "not found" are returned.
pub fn load<S>(path: &Path, serializer: &S) -> Result<Catalog>
where
    S: Serializer,
{
    let bytes = match std::fs::read(path) {
        Ok(b) => b,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "snapshot missing, creating empty one");
            save(path, &Catalog::new(), serializer)?;
            return Ok(Catalog::new());
        }
        Err(e) => return Err(Error::Io(e.to_string())),
    };
    if bytes.iter().all(u8::is_ascii_whitespace) {
        warn!(path = %path.display(), "snapshot is empty, starting with no records");
        return Ok(Catalog::new());
    }

    let raw: BTreeMap<String, serde_json::Value> = match serializer.deserialize(&bytes) {
        Ok(raw) => raw,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "snapshot unreadable, starting with no records");
            return Ok(Catalog::new());
        }
    };

    let mut catalog = Catalog::new();
    for (key, value) in raw {
        match serde_json::from_value::<MediaRecord>(value) {
            Ok(record) if record.name == key && record.is_well_formed() => {
                catalog.insert(key, record);
            }
            Ok(_) => warn!(%key, "skipping snapshot entry that breaks record rules"),
            Err(e) => warn!(%key, error = %e, "skipping malformed snapshot entry"),
        }
    }
    debug!(path = %path.display(), records = catalog.len(), "snapshot loaded");
    Ok(catalog)
}

/// Encode the full catalog and write it over `path`.
pub fn save<S>(path: &Path, catalog: &Catalog, serializer: &S) -> Result<()>
where
    S: Serializer,
{
    let bytes = serializer.serialize(catalog)?;
    atomic_write(path, &bytes)?;
    debug!(path = %path.display(), records = catalog.len(), "snapshot written");
    Ok(())
}

/// Write `bytes` to `<path>.tmp` and then rename over `path`. This avoids
/// leaving a half-written file if the process crashes mid-write.
pub fn atomic_write(path: &Path, bytes: &[u8]) -> Result<()> {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("json");
    let tmp = path.with_extension(format!("{ext}.tmp"));
    std::fs::write(&tmp, bytes).map_err(|e| Error::Io(e.to_string()))?;
    std::fs::rename(&tmp, path).map_err(|e| Error::Io(e.to_string()))?;
    Ok(())
}
