use regex::Regex;

use crate::powerdns::model::{RecordSet, Zone};

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    #[error("zone name is required")]
    EmptyZoneName,
    #[error("zone kind is required")]
    EmptyZoneKind,
    #[error("unknown zone kind '{0}' (expected one of Native, Master, Slave)")]
    UnknownZoneKind(String),
    #[error("record set name is required")]
    EmptyRecordSetName,
    #[error("record set type is required")]
    EmptyRecordSetType,
    #[error("record set type '{0}' is not a valid RR type mnemonic")]
    InvalidRecordSetType(String),
}

lazy_static::lazy_static! {
    /// RR type mnemonics: "A", "AAAA", "NSEC3PARAM", "TYPE65534", ...
    static ref RRTYPE_RE: Regex = Regex::new(r"^[A-Za-z][A-Za-z0-9]*$").unwrap();
}

/// Checks performed before a zone is sent to the server for creation.
pub fn validate_new_zone(zone: &Zone) -> Result<(), ValidationError> {
    if zone.name.is_empty() {
        return Err(ValidationError::EmptyZoneName);
    }
    if zone.kind.is_empty() {
        return Err(ValidationError::EmptyZoneKind);
    }
    Ok(())
}

pub fn validate_record_set_key(name: &str, rrtype: &str) -> Result<(), ValidationError> {
    if name.is_empty() {
        return Err(ValidationError::EmptyRecordSetName);
    }
    if rrtype.is_empty() {
        return Err(ValidationError::EmptyRecordSetType);
    }
    if !RRTYPE_RE.is_match(rrtype) {
        return Err(ValidationError::InvalidRecordSetType(rrtype.to_string()));
    }
    Ok(())
}

pub fn validate_record_set(record_set: &RecordSet) -> Result<(), ValidationError> {
    validate_record_set_key(&record_set.name, &record_set.rrtype)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_zone_requires_name_then_kind() {
        let mut zone = Zone::default();
        assert_eq!(validate_new_zone(&zone), Err(ValidationError::EmptyZoneName));

        zone.name = "example.com.".into();
        assert_eq!(validate_new_zone(&zone), Err(ValidationError::EmptyZoneKind));

        zone.kind = "Native".into();
        assert_eq!(validate_new_zone(&zone), Ok(()));
    }

    #[test]
    fn record_set_types() {
        for ok in ["A", "AAAA", "mx", "NSEC3PARAM", "TYPE65534"] {
            assert_eq!(validate_record_set_key("www.example.com.", ok), Ok(()), "{ok}");
        }
        assert_eq!(
            validate_record_set_key("www.example.com.", ""),
            Err(ValidationError::EmptyRecordSetType)
        );
        assert_eq!(
            validate_record_set_key("", "A"),
            Err(ValidationError::EmptyRecordSetName)
        );
        assert_eq!(
            validate_record_set_key("www.example.com.", "A RECORD"),
            Err(ValidationError::InvalidRecordSetType("A RECORD".into()))
        );
        assert_eq!(
            validate_record_set_key("www.example.com.", "1A"),
            Err(ValidationError::InvalidRecordSetType("1A".into()))
        );
    }
}
