//! # Document Store
//!
//! Maps a cheat sheet name to `{root}/{name}.yaml` and performs CRUD against
//! that file. There is no cache: every call goes to the backend.

use tracing::{debug, info};

use super::backend::StorageBackend;
use super::document::{Content, Document};
use super::errors::{StoreError, StoreResult};
use super::name::validate_name;

/// File extension of stored documents
pub const EXTENSION: &str = ".yaml";

/// Document store over a storage backend
#[derive(Debug)]
pub struct DocumentStore<B: StorageBackend> {
    backend: B,
}

impl<B: StorageBackend> DocumentStore<B> {
    /// Create a new document store
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Get the underlying backend
    pub fn backend(&self) -> &B {
        &self.backend
    }

    fn file_name(name: &str) -> StoreResult<String> {
        validate_name(name)?;
        Ok(format!("{}{}", name, EXTENSION))
    }

    /// Backend errors name the file; callers expect the document name
    fn rename_not_found(name: &str, err: StoreError) -> StoreError {
        match err {
            StoreError::NotFound(_) => StoreError::NotFound(name.to_string()),
            other => other,
        }
    }

    /// Load a document
    pub fn load(&self, name: &str) -> StoreResult<Document> {
        let file_name = Self::file_name(name)?;
        let bytes = self
            .backend
            .read(&file_name)
            .map_err(|e| Self::rename_not_found(name, e))?;

        debug!(cheatsheet = name, bytes = bytes.len(), "loaded cheat sheet");
        Document::from_yaml(name, &bytes)
    }

    /// Save a document, creating or fully replacing it
    pub fn save(&self, name: &str, content: Content) -> StoreResult<Document> {
        let file_name = Self::file_name(name)?;
        let document = Document::new(name, content);
        let yaml = document.to_yaml()?;

        self.backend.write(&file_name, yaml.as_bytes())?;

        info!(cheatsheet = name, keys = document.content.len(), "saved cheat sheet");
        Ok(document)
    }

    /// Delete a document
    pub fn delete(&self, name: &str) -> StoreResult<()> {
        let file_name = Self::file_name(name)?;
        self.backend
            .delete(&file_name)
            .map_err(|e| Self::rename_not_found(name, e))?;

        info!(cheatsheet = name, "deleted cheat sheet");
        Ok(())
    }

    /// Names of all stored documents, sorted.
    ///
    /// Files whose stem is not a valid name are skipped, so every listed
    /// name can be loaded and deleted.
    pub fn list_all(&self) -> StoreResult<Vec<String>> {
        let mut names: Vec<String> = self
            .backend
            .list(EXTENSION)?
            .into_iter()
            .filter_map(|file_name| {
                let stem = file_name.strip_suffix(EXTENSION)?;
                match validate_name(stem) {
                    Ok(()) => Some(stem.to_string()),
                    Err(_) => {
                        debug!(file = %file_name, "skipping file with unusable name");
                        None
                    }
                }
            })
            .collect();

        names.sort();
        debug!(count = names.len(), "listed cheat sheets");
        Ok(names)
    }
}
