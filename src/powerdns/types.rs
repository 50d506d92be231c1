//! Wire-format structures of the PowerDNS Authoritative HTTP API (v1).
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PdnsZone {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>, // "example.com.", assigned by the server
    pub name: String, // "example.com."
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub zone_type: Option<String>, // "Zone"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>, // "/api/v1/servers/localhost/zones/example.com."
    pub kind: String, // "Native", "Master", "Slave"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rrsets: Option<Vec<PdnsRrset>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub serial: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notified_serial: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edited_serial: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub masters: Option<Vec<String>>, // IPs of primaries, Slave zones only
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub dnssec: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nsec3param: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nsec3narrow: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub presigned: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub soa_edit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub soa_edit_api: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_rectify: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub nameservers: Vec<String>, // only honoured on create
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ChangeType {
    Replace,
    Delete,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PdnsRrset {
    pub name: String, // "www.example.com."
    #[serde(rename = "type")]
    pub rrtype: String, // "A", "NS", ...
    #[serde(default)]
    pub ttl: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub changetype: Option<ChangeType>, // only when patching
    #[serde(default)]
    pub records: Vec<PdnsRecord>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub comments: Vec<PdnsComment>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PdnsRecord {
    pub content: String, // "192.0.2.1" or "ns1.example.net."
    #[serde(default)]
    pub disabled: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PdnsComment {
    pub content: String,
    #[serde(default)]
    pub account: String,
    #[serde(default)]
    pub modified_at: u64, // unix timestamp
}

/// Body of a `PATCH /servers/{server_id}/zones/{zone_id}` request.
#[derive(Debug, Serialize)]
pub struct PdnsRrsetPatch<'a> {
    pub rrsets: &'a [PdnsRrset],
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PdnsMetadata {
    pub kind: String, // "ALLOW-AXFR-FROM", "SOA-EDIT", ...
    #[serde(default)]
    pub metadata: Vec<String>,
}

/// A TSIG key that can be used to authenticate NOTIFY, AXFR and DNSUPDATE
/// queries. `key` is empty when listing keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PdnsTsigKey {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub algorithm: String, // "hmac-sha256"
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub key: String, // base64
    #[serde(rename = "type", default)]
    pub key_type: String, // "TSIGKey"
}

/// One hit of `GET /servers/{server_id}/search-data`, tagged by `object_type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "object_type", rename_all = "lowercase")]
pub enum PdnsSearchResult {
    Zone {
        name: String,
        zone_id: String,
    },
    Record {
        name: String,
        #[serde(rename = "type")]
        rrtype: String,
        content: String,
        #[serde(default)]
        ttl: u32,
        #[serde(default)]
        disabled: bool,
        zone: String,
        zone_id: String,
    },
    Comment {
        name: String,
        content: String,
        zone: String,
        zone_id: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchObjectType {
    All,
    Zone,
    Record,
    Comment,
}

impl SearchObjectType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchObjectType::All => "all",
            SearchObjectType::Zone => "zone",
            SearchObjectType::Record => "record",
            SearchObjectType::Comment => "comment",
        }
    }
}

/// Error body returned with 4xx/5xx responses.
#[derive(Debug, Deserialize)]
pub struct PdnsError {
    pub error: String,
    #[serde(default)]
    pub errors: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn zone_response_without_optional_fields() {
        let zone: PdnsZone = serde_json::from_value(json!({
            "id": "example.com.",
            "name": "example.com.",
            "kind": "Native",
            "serial": 0,
            "rrsets": []
        }))
        .unwrap();

        assert_eq!(zone.id.as_deref(), Some("example.com."));
        assert_eq!(zone.serial, Some(0));
        assert!(!zone.dnssec);
        assert_eq!(zone.masters, None);
        assert_eq!(zone.rrsets, Some(vec![]));
    }

    #[test]
    fn patch_body_carries_changetype() {
        let rrsets = [PdnsRrset {
            name: "www.example.com.".into(),
            rrtype: "A".into(),
            ttl: 300,
            changetype: Some(ChangeType::Replace),
            records: vec![PdnsRecord {
                content: "192.0.2.1".into(),
                disabled: false,
            }],
            comments: Vec::new(),
        }];

        let body = serde_json::to_value(PdnsRrsetPatch { rrsets: &rrsets }).unwrap();
        assert_eq!(
            body,
            json!({
                "rrsets": [{
                    "name": "www.example.com.",
                    "type": "A",
                    "ttl": 300,
                    "changetype": "REPLACE",
                    "records": [{"content": "192.0.2.1", "disabled": false}]
                }]
            })
        );
    }

    #[test]
    fn search_results_dispatch_on_object_type() {
        let results: Vec<PdnsSearchResult> = serde_json::from_value(json!([
            {"object_type": "zone", "name": "example.com.", "zone_id": "example.com."},
            {
                "object_type": "record",
                "name": "www.example.com.",
                "type": "A",
                "content": "192.0.2.1",
                "ttl": 60,
                "disabled": false,
                "zone": "example.com.",
                "zone_id": "example.com."
            },
            {
                "object_type": "comment",
                "name": "www.example.com.",
                "content": "web frontend",
                "zone": "example.com.",
                "zone_id": "example.com."
            }
        ]))
        .unwrap();

        assert!(matches!(&results[0], PdnsSearchResult::Zone { name, .. } if name == "example.com."));
        assert!(matches!(&results[1], PdnsSearchResult::Record { rrtype, ttl: 60, .. } if rrtype == "A"));
        assert!(matches!(&results[2], PdnsSearchResult::Comment { content, .. } if content == "web frontend"));
    }

    #[test]
    fn error_body() {
        let err: PdnsError =
            serde_json::from_str(r#"{"error": "Could not find domain 'nope.'"}"#).unwrap();
        assert_eq!(err.error, "Could not find domain 'nope.'");
        assert!(err.errors.is_empty());
    }
}
