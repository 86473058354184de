//! Media metadata catalog backed by a JSON snapshot file.
//!
//! Records (books, films, magazines) are keyed by unique name, validated on
//! creation, and the whole catalog is rewritten to disk on every create or
//! delete before the change becomes visible.
//!
//! ```rust,no_run
//! use media_catalog::{MediaDraft, MediaStore};
//!
//! let store = MediaStore::open("media.json").unwrap();
//! store
//!     .create(MediaDraft {
//!         name: Some("Dune".into()),
//!         publication_date: Some("1965-08-01".into()),
//!         author: Some("Frank Herbert".into()),
//!         category: Some("Book".into()),
//!     })
//!     .unwrap();
//! assert!(store.find_by_exact_name("Dune").is_some());
//! ```
//!
//! **Single-process only.** If multiple processes open the same file they will
//! clobber each other.

#![deny(missing_docs)]
#![warn(clippy::all)]

pub mod api;
pub mod config;
pub mod error;
pub mod persist;
pub mod record;
pub mod serializer;
pub mod store;

pub use config::Config;
pub use error::{Error, Result};
pub use record::{Catalog, Category, MediaDraft, MediaRecord};
pub use store::{MediaStore, MediaStoreBuilder};
