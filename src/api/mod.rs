pub mod ionos;

use std::fmt;

use serde_derive::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum ApiError {
    #[error("DNS API returned HTTP {0}: {1}")]
    Status(u16, Box<str>),

    #[error("HTTP transport error: {0}")]
    Transport(Box<str>),

    // used when the request succeeded but the returned JSON is nonsense
    #[error("received erroneous JSON: {0}")]
    Json(Box<str>),
}

/// The two record kinds this updater manages. Everything else in a zone is
/// left untouched.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum RecordKind {
    A,
    Aaaa,
}

impl RecordKind {
    pub fn as_str(self) -> &'static str {
        match self {
            RecordKind::A => "A",
            RecordKind::Aaaa => "AAAA",
        }
    }

    /// The address family a record of this kind holds, for log messages.
    pub fn family(self) -> &'static str {
        match self {
            RecordKind::A => "IPv4",
            RecordKind::Aaaa => "IPv6",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A zone as listed by the provider. The API returns more fields (zone type
/// among them), but only the id and the name matter here.
#[derive(Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Zone {
    pub id: Box<str>,
    pub name: Box<str>,
}

/// An existing record inside a zone. `kind` is kept as the raw type string
/// because zones contain records of kinds this updater never touches (MX,
/// TXT, NS, ...) and those must survive deserialization.
#[derive(Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Record {
    #[serde(default)]
    pub id: Box<str>,
    pub name: Box<str>,
    #[serde(rename = "type")]
    pub kind: Box<str>,
    pub content: Box<str>,
    #[serde(default)]
    pub ttl: u32,
}

/// A record the reconciler wants to exist. Creates and updates share this
/// shape; the provider matches updates by name and type, so no id is carried.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct DesiredRecord {
    pub name: Box<str>,
    #[serde(rename = "type")]
    pub kind: RecordKind,
    pub content: Box<str>,
    pub ttl: u32,
}

impl DesiredRecord {
    pub fn new(name: &str, kind: RecordKind, content: &str, ttl: u32) -> Self {
        Self {
            name: name.into(),
            kind,
            content: content.into(),
            ttl,
        }
    }
}

pub trait DnsProvider {
    /// Fetch all zones visible to the credential.
    fn list_zones(&self) -> Result<Vec<Zone>, ApiError>;

    /// Fetch all records of the zone whose `name` equals `host`, any kind.
    fn list_records(&self, zone_id: &str, host: &str) -> Result<Vec<Record>, ApiError>;

    /// Create the given records in one batched call.
    fn create_records(&self, zone_id: &str, records: &[DesiredRecord]) -> Result<(), ApiError>;

    /// Patch the given records onto the zone in one batched call.
    fn patch_records(&self, zone_id: &str, records: &[DesiredRecord]) -> Result<(), ApiError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn desired_record_wire_shape() {
        let record = DesiredRecord::new("vps.example.com", RecordKind::Aaaa, "2001:db8::1", 60);
        let json = serde_json::to_value(&record).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "name": "vps.example.com",
                "type": "AAAA",
                "content": "2001:db8::1",
                "ttl": 60,
            })
        );
    }

    #[test]
    fn record_deserializes_with_extra_fields() {
        let json = r#"{
            "id": "22af3414-abbe-9e11-5df5-66fbe8e334b4",
            "name": "vps.example.com",
            "rootName": "example.com",
            "type": "A",
            "content": "198.51.100.7",
            "changeDate": "2023-07-09T18:04:01.000Z",
            "ttl": 3600,
            "disabled": false
        }"#;

        let record = serde_json::from_str::<Record>(json).unwrap();
        assert_eq!(record.name.as_ref(), "vps.example.com");
        assert_eq!(record.kind.as_ref(), "A");
        assert_eq!(record.content.as_ref(), "198.51.100.7");
        assert_eq!(record.ttl, 3600);
    }

    #[test]
    fn record_kind_round_trip() {
        assert_eq!(RecordKind::A.as_str(), "A");
        assert_eq!(RecordKind::Aaaa.as_str(), "AAAA");
        assert_eq!(
            serde_json::from_str::<RecordKind>("\"AAAA\"").unwrap(),
            RecordKind::Aaaa
        );
    }
}
