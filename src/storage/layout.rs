//! Key → filesystem layout
//!
//! Maps a logical key onto the parent directory and the candidate leaf files
//! that may hold its record. Only the leaf segment is encoded; directory
//! segments are kept verbatim so the tree on disk mirrors the key hierarchy.

use std::path::{Path, PathBuf};

use base64::alphabet;
use base64::engine::general_purpose::{self, URL_SAFE};
use base64::engine::GeneralPurpose;
use base64::Engine as _;

/// Hierarchy separator inside logical keys
pub const SEPARATOR: char = '/';

/// Prefix that marks a leaf file (as opposed to a subdirectory)
pub const LEAF_MARKER: char = '_';

/// Decoder for listed names; tolerates non-zero trailing bits so names that
/// older stores accepted as encoded still list in decoded form
const LISTING_DECODER: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    general_purpose::PAD.with_decode_allow_trailing_bits(true),
);

/// Known encodings of a leaf file name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeafCodec {
    /// `_` + URL-safe base64 of the segment. Used for every write.
    Base64Url,

    /// `_` + raw segment. Read and removed, never written.
    Raw,
}

impl LeafCodec {
    /// Codecs in lookup order, canonical first
    pub const PRIORITY: [LeafCodec; 2] = [LeafCodec::Base64Url, LeafCodec::Raw];

    /// The codec new records are written with
    pub const CANONICAL: LeafCodec = LeafCodec::PRIORITY[0];

    /// File name for `segment` under this codec
    pub fn file_name(self, segment: &str) -> String {
        match self {
            LeafCodec::Base64Url => format!("{}{}", LEAF_MARKER, URL_SAFE.encode(segment)),
            LeafCodec::Raw => format!("{}{}", LEAF_MARKER, segment),
        }
    }
}

/// Filesystem candidates for one key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryPaths {
    /// Directory holding the leaf file; created on write
    pub parent: PathBuf,

    /// Leaf file per codec, in `LeafCodec::PRIORITY` order
    pub candidates: Vec<(LeafCodec, PathBuf)>,
}

impl EntryPaths {
    /// Path written by Put
    pub fn canonical(&self) -> &Path {
        &self.candidates[0].1
    }

    /// Every non-canonical candidate, oldest format last
    pub fn legacy(&self) -> impl Iterator<Item = &Path> {
        self.candidates[1..].iter().map(|(_, path)| path.as_path())
    }
}

/// Split a key into clean hierarchy segments
///
/// Empty and `.` segments are dropped, `..` removes the previous segment and
/// never climbs above the root.
pub fn segments(key: &str) -> Vec<&str> {
    let mut out: Vec<&str> = Vec::new();
    for segment in key.split(SEPARATOR) {
        match segment {
            "" | "." => {}
            ".." => {
                out.pop();
            }
            s => out.push(s),
        }
    }
    out
}

/// Directory for a (possibly empty) key prefix
pub fn dir_path(root: &Path, prefix: &str) -> PathBuf {
    let mut path = root.to_path_buf();
    path.extend(segments(prefix));
    path
}

/// Compute the parent directory and leaf candidates of `key`
///
/// Returns `None` for a key with no leaf segment (e.g. `""` or `"/"`).
pub fn entry_paths(root: &Path, key: &str) -> Option<EntryPaths> {
    let segments = segments(key);
    let (leaf, dirs) = segments.split_last()?;

    let mut parent = root.to_path_buf();
    parent.extend(dirs);

    let candidates = LeafCodec::PRIORITY
        .iter()
        .map(|codec| (*codec, parent.join(codec.file_name(leaf))))
        .collect();

    Some(EntryPaths { parent, candidates })
}

/// Translate one directory child name into its listing form
///
/// - `_<base64>` → decoded leaf
/// - `_<raw>` that does not decode → raw leaf
/// - anything else is a subdirectory, reported with a trailing `/`
pub fn decode_listing_name(name: &str) -> String {
    match name.strip_prefix(LEAF_MARKER) {
        Some(stripped) => match LISTING_DECODER.decode(stripped) {
            Ok(decoded) => String::from_utf8_lossy(&decoded).into_owned(),
            Err(_) => stripped.to_string(),
        },
        None => format!("{}{}", name, SEPARATOR),
    }
}
