//! # filekv
//!
//! A durable key-value storage backend that keeps each entry in its own file:
//! - Hierarchical `/`-separated keys mirrored as a directory tree
//! - Filesystem-safe, base64url-encoded leaf file names
//! - Transparent reads and migration of records in the legacy name format
//! - Prefix listing of direct children
//! - Empty directory reclamation after deletes
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                 Backend (get/put/delete/list)                │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │  instance lock held for the whole call
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                       FileBackend                            │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┼─────────────────────┐
//!          │            │                     │
//!          ▼            ▼                     ▼
//!   ┌────────────┐ ┌──────────────┐ ┌──────────────────┐
//!   │   layout   │ │ entry record │ │     reclaim      │
//!   │ (key→path) │ │    (JSON)    │ │ (empty dir walk) │
//!   └────────────┘ └──────────────┘ └──────────────────┘
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use filekv::{Backend, Config, Entry, FileBackend};
//!
//! let config = Config::builder().path("/tmp/filekv").build()?;
//! let backend = FileBackend::new(config);
//!
//! backend.put(&Entry::new("sys/token", "secret"))?;
//! assert_eq!(backend.list("sys")?, vec!["token".to_string()]);
//! # Ok::<(), filekv::FileKvError>(())
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod entry;
pub mod backend;
pub mod storage;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{ErrorList, FileKvError, Result};
pub use config::Config;
pub use entry::Entry;
pub use backend::Backend;
pub use storage::{FileBackend, InmemBackend};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of filekv
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
