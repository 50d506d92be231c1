//! PowerDNS Authoritative HTTP API: wire types, domain model, and client.

pub mod client;
pub mod model;
pub mod types;

use async_trait::async_trait;

use crate::error::Result;
use model::{RecordSet, Zone};

pub use client::PowerDnsClient;

/// The zone and record-set operations the provider resources are built on.
///
/// Every call is independent: implementations keep no state between calls,
/// so one instance can be shared by concurrent callers.
#[async_trait]
pub trait PowerDnsApi: Send + Sync {
    /// Create `zone` and return it as the server stored it, including the
    /// assigned ID. Fails before any request if name or kind is empty.
    async fn create_zone(&self, server_id: &str, zone: &Zone) -> Result<Zone>;

    async fn get_zone(&self, server_id: &str, zone_id: &str) -> Result<Zone>;

    /// Replace the zone's basic data. The server's reply carries nothing
    /// worth returning.
    async fn update_zone(&self, server_id: &str, zone_id: &str, zone: &Zone) -> Result<()>;

    async fn delete_zone(&self, server_id: &str, zone_id: &str) -> Result<()>;

    /// Look up one record set by name and type. A zone without such a set
    /// yields [`ProviderError::RecordSetNotFound`](crate::error::ProviderError::RecordSetNotFound).
    async fn get_record_set(
        &self,
        server_id: &str,
        zone_id: &str,
        name: &str,
        rrtype: &str,
    ) -> Result<RecordSet>;

    async fn create_record_set(
        &self,
        server_id: &str,
        zone_id: &str,
        record_set: &RecordSet,
    ) -> Result<RecordSet>;

    async fn update_record_set(
        &self,
        server_id: &str,
        zone_id: &str,
        record_set: &RecordSet,
    ) -> Result<()>;

    async fn delete_record_set(
        &self,
        server_id: &str,
        zone_id: &str,
        record_set: &RecordSet,
    ) -> Result<()>;
}
