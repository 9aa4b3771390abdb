//! # Cheat Sheet Document Store
//!
//! File-backed persistence: one YAML file per cheat sheet in a single
//! directory. The directory is the only copy of state.

pub mod backend;
pub mod document;
pub mod errors;
pub mod local;
pub mod name;
pub mod store;

pub use backend::StorageBackend;
pub use document::{Content, Document};
pub use errors::{StoreError, StoreResult};
pub use local::LocalBackend;
pub use name::validate_name;
pub use store::DocumentStore;

/// Store over the local filesystem, as used by the server
pub type CheatSheetStore = DocumentStore<LocalBackend>;

impl CheatSheetStore {
    /// Open a store rooted at `dir`, creating the directory if absent
    pub fn open(dir: impl Into<std::path::PathBuf>) -> StoreResult<Self> {
        let backend = LocalBackend::new(dir.into());
        backend.ensure_root()?;
        Ok(DocumentStore::new(backend))
    }
}
