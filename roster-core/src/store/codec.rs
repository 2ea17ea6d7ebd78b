//! Wire formats for the durable record file

use crate::error::{Error, Result};
use crate::record::StudentRecord;

/// Converts a whole record collection to bytes and back
pub trait RecordCodec: Send + Sync {
    /// Short name used in logs and errors
    fn name(&self) -> &'static str;

    /// Encode the full collection
    fn encode(&self, records: &[StudentRecord]) -> Result<Vec<u8>>;

    /// Decode a full collection
    fn decode(&self, bytes: &[u8]) -> Result<Vec<StudentRecord>>;
}

/// UTF-8 JSON array of `{id, name, age, course}` objects
#[derive(Debug, Clone, Copy)]
pub struct JsonCodec {
    pretty: bool,
}

impl JsonCodec {
    /// Four-space indented output
    pub fn pretty() -> Self {
        Self { pretty: true }
    }

    /// Single-line output
    pub fn compact() -> Self {
        Self { pretty: false }
    }
}

impl Default for JsonCodec {
    fn default() -> Self {
        Self::pretty()
    }
}

impl RecordCodec for JsonCodec {
    fn name(&self) -> &'static str {
        "json"
    }

    fn encode(&self, records: &[StudentRecord]) -> Result<Vec<u8>> {
        if !self.pretty {
            return serde_json::to_vec(records).map_err(|e| Error::serialization(self.name(), e));
        }

        let mut out = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut out, formatter);
        serde::Serialize::serialize(records, &mut ser)
            .map_err(|e| Error::serialization(self.name(), e))?;
        Ok(out)
    }

    fn decode(&self, bytes: &[u8]) -> Result<Vec<StudentRecord>> {
        serde_json::from_slice(bytes).map_err(|e| Error::deserialization(self.name(), e))
    }
}

/// Opaque binary blob of the same logical shape
#[derive(Debug, Clone, Copy, Default)]
pub struct BincodeCodec;

impl RecordCodec for BincodeCodec {
    fn name(&self) -> &'static str {
        "bincode"
    }

    fn encode(&self, records: &[StudentRecord]) -> Result<Vec<u8>> {
        bincode::serialize(records).map_err(|e| Error::serialization(self.name(), e))
    }

    fn decode(&self, bytes: &[u8]) -> Result<Vec<StudentRecord>> {
        bincode::deserialize(bytes).map_err(|e| Error::deserialization(self.name(), e))
    }
}
