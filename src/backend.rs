//! Backend trait
//!
//! The physical storage seam. Callers read, write, delete and enumerate
//! entries without knowing which medium holds them.

use crate::entry::Entry;
use crate::error::Result;

/// A key-value storage medium with `/`-separated hierarchical keys
///
/// All methods take `&self`; implementations do their own locking and are
/// safe to share across threads.
pub trait Backend: Send + Sync {
    /// Fetch an entry. A missing key is `Ok(None)`, not an error.
    fn get(&self, key: &str) -> Result<Option<Entry>>;

    /// Insert or replace an entry
    fn put(&self, entry: &Entry) -> Result<()>;

    /// Remove an entry. Removing a missing key succeeds.
    fn delete(&self, key: &str) -> Result<()>;

    /// Direct children of `prefix`. Containers carry a trailing `/`.
    fn list(&self, prefix: &str) -> Result<Vec<String>>;
}
