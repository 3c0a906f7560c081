//! File Backend
//!
//! Stores every entry as its own file beneath a root directory.
//!
//! ## Responsibilities
//! - Map keys onto the directory tree (see `layout`)
//! - Read, write and delete entry records
//! - Migrate records still stored under a legacy leaf encoding
//! - Reclaim directories left empty by deletes
//!
//! Suitable for single-server setups and local development. It is neither
//! fast nor built for heavy concurrency.

use std::collections::HashMap;
use std::fs::{self, DirBuilder, File, OpenOptions};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use parking_lot::Mutex;

use crate::backend::Backend;
use crate::config::Config;
use crate::entry::Entry;
use crate::error::{ErrorList, FileKvError, Result};

use super::layout::{self, EntryPaths};
use super::reclaim::reclaim_empty_dirs;

/// Mode for directories created by Put
#[cfg(unix)]
const DIR_MODE: u32 = 0o755;

/// Mode for entry files created by Put
#[cfg(unix)]
const FILE_MODE: u32 = 0o600;

/// Filesystem-backed key-value store
///
/// ## Concurrency:
/// - `lock`: held for the whole of every operation, including directory
///   reclamation and legacy cleanup
/// - Each instance has its own lock; instances on different roots never
///   contend
/// - Other processes touching the same tree are not coordinated with
pub struct FileBackend {
    /// Root directory; mirrors the key hierarchy
    root: PathBuf,

    /// Serializes all operations on this instance
    lock: Mutex<()>,
}

impl FileBackend {
    /// Create a backend rooted at `config.path`
    ///
    /// No I/O happens here; the root is created by the first Put.
    pub fn new(config: Config) -> Self {
        Self {
            root: config.path,
            lock: Mutex::new(()),
        }
    }

    /// Create a backend from a generic option map (`path` is required)
    pub fn from_map(conf: &HashMap<String, String>) -> Result<Self> {
        Ok(Self::new(Config::from_map(conf)?))
    }

    /// Get the root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Get an entry by key
    ///
    /// Returns:
    /// - `Ok(Some(entry))` — a record was found under any known encoding
    /// - `Ok(None)` — no record for this key
    pub fn get(&self, key: &str) -> Result<Option<Entry>> {
        let Some(paths) = layout::entry_paths(&self.root, key) else {
            return Ok(None);
        };

        let _guard = self.lock.lock();

        // Canonical first; a stale legacy copy is ignored until the next Put
        for (codec, path) in &paths.candidates {
            let file = match File::open(path) {
                Ok(file) => file,
                Err(e) if e.kind() == io::ErrorKind::NotFound => continue,
                Err(e) => return Err(e.into()),
            };

            tracing::trace!("Reading {:?} from {} ({:?})", key, path.display(), codec);
            let entry = Entry::decode_from(BufReader::new(file))?;
            return Ok(Some(entry));
        }

        Ok(None)
    }

    /// Store an entry, replacing any previous record for its key
    ///
    /// Steps:
    /// 1. Note any record still stored under a legacy encoding
    /// 2. Create the parent directories
    /// 3. Write the record under the canonical encoding
    /// 4. Remove the legacy record and reclaim directories (even if 2-3 failed)
    ///
    /// Failures from the write and from the cleanup are all returned together.
    pub fn put(&self, entry: &Entry) -> Result<()> {
        let paths = layout::entry_paths(&self.root, &entry.key).ok_or_else(|| {
            FileKvError::InvalidEntry(format!("key {:?} has no leaf segment", entry.key))
        })?;

        let _guard = self.lock.lock();

        let superseded: Vec<&Path> = paths
            .legacy()
            .filter(|path| fs::metadata(path).is_ok())
            .collect();

        let mut errors = ErrorList::new();

        if let Err(e) = self.write_record(&paths, entry) {
            errors.push(e);
        }

        if !superseded.is_empty() {
            if let Err(e) = self.remove_superseded(&superseded, &entry.key) {
                errors.push(e);
            }
        }

        errors.into_result()
    }

    /// Delete an entry
    ///
    /// Deleting a missing key succeeds. Empty ancestor directories are
    /// removed afterwards; a failure there does not undo the delete.
    pub fn delete(&self, key: &str) -> Result<()> {
        if key.is_empty() {
            return Ok(());
        }
        let Some(paths) = layout::entry_paths(&self.root, key) else {
            return Ok(());
        };

        let _guard = self.lock.lock();

        for (codec, path) in &paths.candidates {
            match fs::remove_file(path) {
                Ok(()) => {
                    tracing::debug!("Deleted {:?} at {} ({:?})", key, path.display(), codec);
                    break;
                }
                Err(e) if e.kind() == io::ErrorKind::NotFound => continue,
                Err(e) => {
                    return Err(FileKvError::Remove {
                        key: key.to_string(),
                        source: e,
                    })
                }
            }
        }

        reclaim_empty_dirs(&self.root, key).map_err(FileKvError::Reclaim)
    }

    /// List the direct children of `prefix`
    ///
    /// Leaves are reported by their decoded name, subdirectories with a
    /// trailing `/`. Order follows the filesystem and is not sorted.
    pub fn list(&self, prefix: &str) -> Result<Vec<String>> {
        let dir = layout::dir_path(&self.root, prefix);

        let _guard = self.lock.lock();

        let children = match fs::read_dir(&dir) {
            Ok(children) => children,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut names = Vec::new();
        for child in children {
            let child = child?;
            let name = child.file_name();
            names.push(layout::decode_listing_name(&name.to_string_lossy()));
        }

        tracing::trace!("Listed {} children under {:?}", names.len(), prefix);
        Ok(names)
    }

    // =========================================================================
    // Private Helpers
    // =========================================================================

    /// Create the parent tree and write the canonical record
    fn write_record(&self, paths: &EntryPaths, entry: &Entry) -> Result<()> {
        create_dirs(&paths.parent)?;

        let file = open_for_write(paths.canonical())?;
        let mut writer = BufWriter::new(file);
        entry.encode_to(&mut writer)?;
        writer.flush()?;

        tracing::debug!("Wrote {:?} to {}", entry.key, paths.canonical().display());
        Ok(())
    }

    /// Remove records superseded by a canonical write, then reclaim
    fn remove_superseded(&self, superseded: &[&Path], key: &str) -> Result<()> {
        for path in superseded {
            match fs::remove_file(path) {
                Ok(()) => {
                    tracing::debug!("Migrated {:?}, removed legacy record {}", key, path.display());
                }
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(e) => return Err(FileKvError::LegacyCleanup(e)),
            }
        }

        reclaim_empty_dirs(&self.root, key).map_err(FileKvError::Reclaim)
    }
}

impl Backend for FileBackend {
    fn get(&self, key: &str) -> Result<Option<Entry>> {
        FileBackend::get(self, key)
    }

    fn put(&self, entry: &Entry) -> Result<()> {
        FileBackend::put(self, entry)
    }

    fn delete(&self, key: &str) -> Result<()> {
        FileBackend::delete(self, key)
    }

    fn list(&self, prefix: &str) -> Result<Vec<String>> {
        FileBackend::list(self, prefix)
    }
}

#[cfg(unix)]
fn create_dirs(path: &Path) -> io::Result<()> {
    use std::os::unix::fs::DirBuilderExt;

    DirBuilder::new().recursive(true).mode(DIR_MODE).create(path)
}

#[cfg(not(unix))]
fn create_dirs(path: &Path) -> io::Result<()> {
    DirBuilder::new().recursive(true).create(path)
}

#[cfg(unix)]
fn open_for_write(path: &Path) -> io::Result<File> {
    use std::os::unix::fs::OpenOptionsExt;

    OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(FILE_MODE)
        .open(path)
}

#[cfg(not(unix))]
fn open_for_write(path: &Path) -> io::Result<File> {
    OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
}
