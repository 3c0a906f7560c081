//! Entry definitions
//!
//! An [`Entry`] is the unit of storage: a hierarchical key and an opaque
//! value. On disk each entry is one JSON record followed by a newline:
//!
//! ```text
//! {"Key":"sys/policy/default","Value":"aGVsbG8="}
//! ```
//!
//! `Value` is standard (padded) base64 so records written by earlier
//! versions of the backend stay readable.

use std::io::{Read, Write};

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// A single stored key/value pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Full logical key, `/`-separated
    #[serde(rename = "Key")]
    pub key: String,

    /// Opaque value bytes
    #[serde(rename = "Value", with = "base64_value", default)]
    pub value: Bytes,
}

impl Entry {
    pub fn new(key: impl Into<String>, value: impl Into<Bytes>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Write this entry as one persisted record
    pub fn encode_to<W: Write>(&self, mut writer: W) -> Result<()> {
        serde_json::to_writer(&mut writer, self)?;
        writer.write_all(b"\n")?;
        Ok(())
    }

    /// Read one persisted record
    pub fn decode_from<R: Read>(reader: R) -> Result<Self> {
        Ok(serde_json::from_reader(reader)?)
    }
}

mod base64_value {
    use base64::{engine::general_purpose::STANDARD, Engine as _};
    use bytes::Bytes;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(bytes: &Bytes, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&STANDARD.encode(bytes))
    }

    /// `null` decodes as an empty value
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Bytes, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<String>::deserialize(deserializer)? {
            Some(s) => STANDARD
                .decode(s)
                .map(Bytes::from)
                .map_err(serde::de::Error::custom),
            None => Ok(Bytes::new()),
        }
    }
}
