//! # Storage Backend Trait

use super::errors::StoreResult;

/// Raw byte storage keyed by file name, relative to the backend root
pub trait StorageBackend: Send + Sync + std::fmt::Debug {
    /// Write data to file, replacing any previous content
    fn write(&self, file_name: &str, data: &[u8]) -> StoreResult<()>;

    /// Read data from file
    fn read(&self, file_name: &str) -> StoreResult<Vec<u8>>;

    /// Delete file
    fn delete(&self, file_name: &str) -> StoreResult<()>;

    /// List regular files whose name ends with `suffix`
    fn list(&self, suffix: &str) -> StoreResult<Vec<String>>;
}
