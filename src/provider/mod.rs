//! Resource and data-source handlers of the `powerdns` provider.
//!
//! Each handler maps one lifecycle step of the plugin host (create, read,
//! update, delete, import) onto [`PowerDnsApi`] calls and returns the state
//! the host should persist. The host owns that state; nothing is kept here.

pub mod import;
pub mod recordset_data_source;
pub mod recordset_resource;
pub mod zone_data_source;
pub mod zone_resource;

#[cfg(test)]
pub(crate) mod fake;

use std::sync::Arc;

use tracing::debug;

use crate::config::ProviderConfig;
use crate::error::Result;
use crate::powerdns::{PowerDnsApi, PowerDnsClient};

pub use recordset_data_source::{RecordsetDataSource, RecordsetDataSourceModel};
pub use recordset_resource::{RecordsetResource, RecordsetResourceModel};
pub use zone_data_source::{ZoneDataSource, ZoneDataSourceModel};
pub use zone_resource::{ZoneResource, ZoneResourceModel};

pub const PROVIDER_TYPE_NAME: &str = "powerdns";

pub struct PowerDnsProvider {
    /// "dev" for local builds, "test" under acceptance tests, the release
    /// version otherwise.
    version: String,
}

impl PowerDnsProvider {
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
        }
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn resource_type_names(&self) -> [String; 2] {
        [
            ZoneResource::<PowerDnsClient>::type_name(PROVIDER_TYPE_NAME),
            RecordsetResource::<PowerDnsClient>::type_name(PROVIDER_TYPE_NAME),
        ]
    }

    pub fn data_source_type_names(&self) -> [String; 2] {
        [
            ZoneDataSource::<PowerDnsClient>::type_name(PROVIDER_TYPE_NAME),
            RecordsetDataSource::<PowerDnsClient>::type_name(PROVIDER_TYPE_NAME),
        ]
    }

    /// Resolve the provider block and build the shared API client.
    pub fn configure(&self, config: &ProviderConfig) -> Result<ConfiguredProvider<PowerDnsClient>> {
        let resolved = config.resolve()?;
        let client = resolved.build_client()?;
        debug!(
            version = %self.version,
            server_url = %resolved.server_url,
            "configured PowerDNS provider"
        );
        Ok(ConfiguredProvider::new(Arc::new(client)))
    }
}

/// Handlers sharing one API client.
pub struct ConfiguredProvider<A: ?Sized> {
    client: Arc<A>,
}

impl<A: PowerDnsApi + ?Sized> ConfiguredProvider<A> {
    pub fn new(client: Arc<A>) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &Arc<A> {
        &self.client
    }

    pub fn zone_resource(&self) -> ZoneResource<A> {
        ZoneResource::new(self.client.clone())
    }

    pub fn recordset_resource(&self) -> RecordsetResource<A> {
        RecordsetResource::new(self.client.clone())
    }

    pub fn zone_data_source(&self) -> ZoneDataSource<A> {
        ZoneDataSource::new(self.client.clone())
    }

    pub fn recordset_data_source(&self) -> RecordsetDataSource<A> {
        RecordsetDataSource::new(self.client.clone())
    }
}
