//! Parsing of the IDs given to `terraform import`.
use crate::error::{ProviderError, Result};

pub const ZONE_IMPORT_FORMAT: &str = "server_id/zone_id";
pub const RECORDSET_IMPORT_FORMAT: &str = "server_id/zone_id/recordset_name/recordset_type";

/// Split `id` on '/' into exactly `N` parts.
pub fn split_import_id<'a, const N: usize>(id: &'a str, expected: &'static str) -> Result<[&'a str; N]> {
    let parts: Vec<&str> = id.split('/').collect();
    <[&str; N]>::try_from(parts).map_err(|_| ProviderError::InvalidImportId {
        id: id.to_string(),
        expected,
    })
}
