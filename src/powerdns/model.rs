//! Domain structs handed to and returned from [`PowerDnsApi`](super::PowerDnsApi)
//! calls, and their mapping onto the wire format.
//!
//! The mapping is purely structural: order of record sets and of records
//! inside a set is preserved, nothing is deduplicated or normalised.
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::types::{ChangeType, PdnsRecord, PdnsRrset, PdnsZone};
use crate::validation::ValidationError;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Zone {
    /// Opaque, server-assigned. Empty until the zone exists.
    pub id: String,
    pub name: String,
    pub kind: String,
    pub dnssec: bool,
    pub serial: u32,
    pub masters: Vec<String>,
    pub record_sets: Vec<RecordSet>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordSet {
    pub name: String,
    #[serde(rename = "type")]
    pub rrtype: String,
    pub ttl: u32,
    pub records: Vec<String>,
}

/// Replication role of a zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ZoneKind {
    Native,
    Master,
    Slave,
}

impl ZoneKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ZoneKind::Native => "Native",
            ZoneKind::Master => "Master",
            ZoneKind::Slave => "Slave",
        }
    }
}

impl fmt::Display for ZoneKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ZoneKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "native" => Ok(ZoneKind::Native),
            "master" => Ok(ZoneKind::Master),
            "slave" => Ok(ZoneKind::Slave),
            "" => Err(ValidationError::EmptyZoneKind),
            _ => Err(ValidationError::UnknownZoneKind(s.to_string())),
        }
    }
}

impl Zone {
    pub fn new(name: impl Into<String>, kind: ZoneKind) -> Self {
        Self {
            name: name.into(),
            kind: kind.to_string(),
            ..Default::default()
        }
    }

    pub fn to_wire(&self) -> PdnsZone {
        PdnsZone {
            name: self.name.clone(),
            kind: self.kind.clone(),
            dnssec: self.dnssec,
            serial: (self.serial != 0).then_some(self.serial),
            masters: (!self.masters.is_empty()).then(|| self.masters.clone()),
            rrsets: (!self.record_sets.is_empty())
                .then(|| self.record_sets.iter().map(|rs| rs.to_wire(None)).collect()),
            ..Default::default()
        }
    }

    pub fn from_wire(zone: PdnsZone) -> Self {
        Self {
            id: zone.id.unwrap_or_default(),
            name: zone.name,
            kind: zone.kind,
            dnssec: zone.dnssec,
            serial: zone.serial.unwrap_or_default(),
            masters: zone.masters.unwrap_or_default(),
            record_sets: zone
                .rrsets
                .unwrap_or_default()
                .into_iter()
                .map(RecordSet::from_wire)
                .collect(),
        }
    }
}

impl RecordSet {
    pub fn new(
        name: impl Into<String>,
        rrtype: impl Into<String>,
        ttl: u32,
        records: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            name: name.into(),
            rrtype: rrtype.into(),
            ttl,
            records: records.into_iter().map(Into::into).collect(),
        }
    }

    /// Same name and type, compared the way DNS compares them.
    pub fn matches(&self, name: &str, rrtype: &str) -> bool {
        self.name.eq_ignore_ascii_case(name) && self.rrtype.eq_ignore_ascii_case(rrtype)
    }

    pub fn to_wire(&self, changetype: Option<ChangeType>) -> PdnsRrset {
        PdnsRrset {
            name: self.name.clone(),
            rrtype: self.rrtype.clone(),
            ttl: self.ttl,
            changetype,
            records: self
                .records
                .iter()
                .map(|content| PdnsRecord {
                    content: content.clone(),
                    disabled: false,
                })
                .collect(),
            comments: Vec::new(),
        }
    }

    /// Wire form for a `DELETE` patch: name and type identify the set, the
    /// records are irrelevant.
    pub fn to_wire_delete(&self) -> PdnsRrset {
        PdnsRrset {
            records: Vec::new(),
            ..self.to_wire(Some(ChangeType::Delete))
        }
    }

    pub fn from_wire(rrset: PdnsRrset) -> Self {
        Self {
            name: rrset.name,
            rrtype: rrset.rrtype,
            ttl: rrset.ttl,
            records: rrset.records.into_iter().map(|r| r.content).collect(),
        }
    }
}
