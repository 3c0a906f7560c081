//! Directory reclamation
//!
//! After an entry file disappears, its ancestors may be left empty. Walk from
//! the deepest ancestor toward the root, removing each empty directory, and
//! stop at the first one that still has children. The root itself is never
//! touched.

use std::fs;
use std::io;
use std::path::Path;

use super::layout;

/// Remove now-empty ancestor directories of `key` beneath `root`
pub(crate) fn reclaim_empty_dirs(root: &Path, key: &str) -> io::Result<()> {
    let segments = layout::segments(key);

    // depth 0 would be the root itself
    for depth in (1..segments.len()).rev() {
        let mut dir = root.to_path_buf();
        dir.extend(&segments[..depth]);

        let mut children = match fs::read_dir(&dir) {
            Ok(children) => children,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(()),
            Err(e) => return Err(e),
        };

        if children.next().transpose()?.is_some() {
            // Ancestors of a non-empty directory are non-empty too
            return Ok(());
        }
        drop(children);

        tracing::debug!("Removing empty directory {}", dir.display());
        match fs::remove_dir(&dir) {
            Ok(()) => {}
            // Raced with another remover; already gone is fine
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(e),
        }
    }

    Ok(())
}
