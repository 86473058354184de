//! Core store type and builder.

use crate::error::{Error, Result};
use crate::persist::{load, save};
use crate::record::{Catalog, MediaDraft, MediaRecord};
use crate::serializer::JsonSerializer;
use parking_lot::RwLock;
use std::path::{Path, PathBuf};
use tracing::{error, info};

/// The media catalog: name-keyed records mirrored to a JSON snapshot.
///
/// Every read takes a shared lock, every mutation the exclusive one, so two
/// creates of the same name can't both win and a delete never sees half a
/// create. Mutations are write-ahead: the new snapshot is on disk before the
/// in-memory catalog changes, and a failed write leaves both untouched.
///
/// Share it between request handlers with an `Arc`.
pub struct MediaStore {
    catalog: RwLock<Catalog>,
    path: PathBuf,
    serializer: JsonSerializer,
}

impl MediaStore {
    /// Open (or create) a catalog at `path` with indented snapshots.
    pub fn open(path: impl AsRef<Path>) -> Result<MediaStore> {
        Self::builder(path).open()
    }

    /// Start configuring a new store. Call [`.open()`](MediaStoreBuilder::open)
    /// when ready.
    pub fn builder(path: impl AsRef<Path>) -> MediaStoreBuilder {
        MediaStoreBuilder::new(path)
    }

    // ---- reads ----

    /// Every record, ordered by name.
    #[must_use]
    pub fn list_all(&self) -> Vec<MediaRecord> {
        self.catalog.read().values().cloned().collect()
    }

    /// Records whose category spelling equals `category` exactly. Anything
    /// that isn't a known category simply matches nothing.
    #[must_use]
    pub fn list_by_category(&self, category: &str) -> Vec<MediaRecord> {
        self.catalog
            .read()
            .values()
            .filter(|r| r.category.as_str() == category)
            .cloned()
            .collect()
    }

    /// Case-sensitive exact lookup. `None` is a normal outcome.
    #[must_use]
    pub fn find_by_exact_name(&self, name: &str) -> Option<MediaRecord> {
        self.catalog.read().get(name).cloned()
    }

    /// Like [`find_by_exact_name`](Self::find_by_exact_name) but a miss is an
    /// [`Error::NotFound`].
    pub fn get(&self, name: &str) -> Result<MediaRecord> {
        self.find_by_exact_name(name)
            .ok_or_else(|| Error::NotFound(format!("no media named {name:?}")))
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.catalog.read().len()
    }

    /// `true` when the catalog has no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Path to the snapshot file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    // ---- writes ----

    /// Validate `draft` and insert it if the name is free.
    ///
    /// Field errors are reported before a duplicate name is even looked at.
    pub fn create(&self, draft: MediaDraft) -> Result<MediaRecord> {
        let record = draft.validate()?;

        let mut catalog = self.catalog.write();
        if catalog.contains_key(&record.name) {
            return Err(Error::Conflict(format!(
                "media with name {:?} already exists",
                record.name
            )));
        }

        let mut next = catalog.clone();
        next.insert(record.name.clone(), record.clone());
        self.persist(&next)?;
        *catalog = next;

        info!(name = %record.name, category = %record.category, "media created");
        Ok(record)
    }

    /// Remove the record called `name` and return it.
    pub fn delete(&self, name: &str) -> Result<MediaRecord> {
        let mut catalog = self.catalog.write();
        let Some(removed) = catalog.get(name).cloned() else {
            return Err(Error::NotFound(format!("no media named {name:?}")));
        };

        let mut next = catalog.clone();
        next.remove(name);
        self.persist(&next)?;
        *catalog = next;

        info!(name = %removed.name, "media deleted");
        Ok(removed)
    }

    // ---- persistence ----

    /// Rewrite the snapshot from the current catalog.
    ///
    /// Takes the exclusive lock: snapshot writes share one temp file and
    /// must never overlap.
    pub fn flush(&self) -> Result<()> {
        let catalog = self.catalog.write();
        self.persist(&catalog)
    }

    fn persist(&self, catalog: &Catalog) -> Result<()> {
        save(&self.path, catalog, &self.serializer).inspect_err(|e| {
            error!(path = %self.path.display(), error = %e, "snapshot write failed");
        })
    }
}

impl std::fmt::Debug for MediaStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MediaStore")
            .field("path", &self.path)
            .field("records", &self.len())
            .finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

/// Configures and opens a [`MediaStore`].
///
/// ```rust,no_run
/// use media_catalog::MediaStore;
///
/// let store = MediaStore::builder("media.json")
///     .pretty(false)
///     .open()
///     .unwrap();
/// ```
pub struct MediaStoreBuilder {
    path: PathBuf,
    pretty: bool,
}

impl MediaStoreBuilder {
    fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            pretty: true,
        }
    }

    /// Write indented JSON (default: `true`).
    pub fn pretty(mut self, yes: bool) -> Self {
        self.pretty = yes;
        self
    }

    /// Load (or create) the snapshot and return the store.
    pub fn open(self) -> Result<MediaStore> {
        if self.path.as_os_str().is_empty() {
            return Err(Error::Config("snapshot path is empty".into()));
        }
        let serializer = if self.pretty {
            JsonSerializer::pretty()
        } else {
            JsonSerializer::compact()
        };

        let catalog = load(&self.path, &serializer)?;
        info!(path = %self.path.display(), records = catalog.len(), "catalog opened");

        Ok(MediaStore {
            catalog: RwLock::new(catalog),
            path: self.path,
            serializer,
        })
    }
}

impl std::fmt::Debug for MediaStoreBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MediaStoreBuilder")
            .field("path", &self.path)
            .field("pretty", &self.pretty)
            .finish()
    }
}
