//! In-memory backend
//!
//! BTreeMap-based store behind a RwLock. Shares key normalisation and
//! listing rules with the file backend so the two are interchangeable.

use std::collections::{BTreeMap, BTreeSet};

use parking_lot::RwLock;

use crate::backend::Backend;
use crate::entry::Entry;
use crate::error::{FileKvError, Result};

use super::layout::{self, SEPARATOR};

/// Volatile key-value store
///
/// Keys are stored in normalised form, so `a//b` and `a/b` address the same
/// entry just as they do on disk.
#[derive(Default)]
pub struct InmemBackend {
    data: RwLock<BTreeMap<String, Entry>>,
}

impl InmemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries
    pub fn len(&self) -> usize {
        self.data.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.read().is_empty()
    }

    fn normalise(key: &str) -> Option<String> {
        let segments = layout::segments(key);
        if segments.is_empty() {
            return None;
        }
        Some(segments.join("/"))
    }
}

impl Backend for InmemBackend {
    fn get(&self, key: &str) -> Result<Option<Entry>> {
        let Some(key) = Self::normalise(key) else {
            return Ok(None);
        };
        Ok(self.data.read().get(&key).cloned())
    }

    fn put(&self, entry: &Entry) -> Result<()> {
        let key = Self::normalise(&entry.key).ok_or_else(|| {
            FileKvError::InvalidEntry(format!("key {:?} has no leaf segment", entry.key))
        })?;
        self.data.write().insert(key, entry.clone());
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<()> {
        if let Some(key) = Self::normalise(key) {
            self.data.write().remove(&key);
        }
        Ok(())
    }

    fn list(&self, prefix: &str) -> Result<Vec<String>> {
        let prefix = layout::segments(prefix);
        let data = self.data.read();

        let mut names = BTreeSet::new();
        for key in data.keys() {
            let segments = layout::segments(key);
            if segments.len() <= prefix.len() || segments[..prefix.len()] != prefix[..] {
                continue;
            }

            let child = segments[prefix.len()];
            if segments.len() == prefix.len() + 1 {
                names.insert(child.to_string());
            } else {
                names.insert(format!("{}{}", child, SEPARATOR));
            }
        }

        Ok(names.into_iter().collect())
    }
}
