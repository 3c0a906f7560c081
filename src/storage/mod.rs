//! Storage Module
//!
//! Backend implementations.
//!
//! ## On-disk Layout (file backend)
//! ```text
//! {root}/
//! ├── _eA==                 key "x"             (leaf, base64url name)
//! ├── _legacy               key "legacy"        (leaf, pre-encoding name)
//! └── a/                    container for "a/..."
//!     └── b/
//!         └── _Yw==         key "a/b/c"
//! ```
//!
//! - Directory segments are stored verbatim
//! - Leaf files are `_` + URL-safe base64 of the last segment
//! - Each leaf file holds one JSON record (see `Entry`)

mod file;
mod inmem;
mod reclaim;

pub mod layout;

pub use file::FileBackend;
pub use inmem::InmemBackend;
pub use layout::LeafCodec;
