//! Public data types shared by the client and its callers.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============ Credentials ============

/// Email + global API key pair sent with every request.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    #[serde(rename = "apiKey")]
    pub api_key: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            api_key: api_key.into(),
        }
    }

    /// Both fields are filled in.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.email.trim().is_empty() && !self.api_key.trim().is_empty()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

// ============ Zones ============

/// A Cloudflare zone (managed domain).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Domain {
    pub id: String,
    pub name: String,
    pub status: String,
    #[serde(default)]
    pub paused: bool,
    #[serde(rename = "type", default)]
    pub zone_type: String,
}

impl Domain {
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status == "active" && !self.paused
    }
}

// ============ DNS Records ============

/// DNS record type.
///
/// Types outside the known set are kept verbatim in [`DnsRecordType::Other`]
/// so records the dashboard cannot edit still decode and round-trip.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DnsRecordType {
    A,
    Aaaa,
    Cname,
    Mx,
    Txt,
    Ns,
    Srv,
    Caa,
    Other(String),
}

impl DnsRecordType {
    /// Types offered by the record edit form.
    pub const EDITABLE: [Self; 5] = [Self::A, Self::Aaaa, Self::Cname, Self::Mx, Self::Txt];

    pub fn as_str(&self) -> &str {
        match self {
            Self::A => "A",
            Self::Aaaa => "AAAA",
            Self::Cname => "CNAME",
            Self::Mx => "MX",
            Self::Txt => "TXT",
            Self::Ns => "NS",
            Self::Srv => "SRV",
            Self::Caa => "CAA",
            Self::Other(s) => s,
        }
    }
}

impl From<String> for DnsRecordType {
    fn from(value: String) -> Self {
        match value.to_uppercase().as_str() {
            "A" => Self::A,
            "AAAA" => Self::Aaaa,
            "CNAME" => Self::Cname,
            "MX" => Self::Mx,
            "TXT" => Self::Txt,
            "NS" => Self::Ns,
            "SRV" => Self::Srv,
            "CAA" => Self::Caa,
            _ => Self::Other(value),
        }
    }
}

impl From<&str> for DnsRecordType {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

impl From<DnsRecordType> for String {
    fn from(value: DnsRecordType) -> Self {
        match value {
            DnsRecordType::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for DnsRecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A DNS record as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DnsRecord {
    pub id: String,
    #[serde(rename = "type")]
    pub record_type: DnsRecordType,
    pub name: String,
    pub content: String,
    #[serde(default)]
    pub proxiable: bool,
    #[serde(default)]
    pub proxied: bool,
    pub ttl: u32,
    #[serde(default)]
    pub zone_id: String,
    #[serde(default)]
    pub zone_name: String,
    pub created_on: DateTime<Utc>,
    pub modified_on: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locked: Option<bool>,
}

// ============ Record form ============

/// Default TTL offered by the edit form.
pub const DEFAULT_TTL: u32 = 3600;
/// Cloudflare's "automatic" TTL value.
pub const AUTO_TTL: u32 = 1;
/// TTL range accepted by the edit form.
pub const TTL_RANGE: std::ops::RangeInclusive<u32> = 60..=86400;

/// The four editable fields of a record, as submitted by the edit form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordForm {
    pub name: String,
    #[serde(rename = "type")]
    pub record_type: DnsRecordType,
    pub content: String,
    pub ttl: u32,
}

impl Default for RecordForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            record_type: DnsRecordType::A,
            content: String::new(),
            ttl: DEFAULT_TTL,
        }
    }
}

impl RecordForm {
    pub fn new(
        name: impl Into<String>,
        record_type: impl Into<DnsRecordType>,
        content: impl Into<String>,
        ttl: u32,
    ) -> Self {
        Self {
            name: name.into(),
            record_type: record_type.into(),
            content: content.into(),
            ttl,
        }
    }

    /// Pre-fill the form from an existing record (edit screen).
    pub fn from_record(record: &DnsRecord) -> Self {
        Self {
            name: record.name.clone(),
            record_type: record.record_type.clone(),
            content: record.content.clone(),
            ttl: record.ttl,
        }
    }

    /// Check the fields before an edit is sent.
    ///
    /// Any positive TTL passes: records already on the server may carry
    /// values the form would not offer (Enterprise zones allow 30).
    /// Returns the name of the offending field and a description.
    pub fn validate(&self) -> std::result::Result<(), (&'static str, String)> {
        if self.name.trim().is_empty() {
            return Err(("name", "must not be empty".to_string()));
        }
        if self.content.trim().is_empty() {
            return Err(("content", "must not be empty".to_string()));
        }
        if self.ttl == 0 {
            return Err(("ttl", "must be positive".to_string()));
        }
        Ok(())
    }

    /// [`validate`](Self::validate), plus the TTL range of a new record.
    pub fn validate_new(&self) -> std::result::Result<(), (&'static str, String)> {
        self.validate()?;
        check_ttl(self.ttl).map_err(|reason| ("ttl", reason))
    }
}

/// TTL chosen by the user: `1` (auto) or within [`TTL_RANGE`].
pub fn check_ttl(ttl: u32) -> std::result::Result<(), String> {
    if ttl == AUTO_TTL || TTL_RANGE.contains(&ttl) {
        Ok(())
    } else {
        Err(format!(
            "must be {AUTO_TTL} (auto) or between {} and {}, got {ttl}",
            TTL_RANGE.start(),
            TTL_RANGE.end()
        ))
    }
}
