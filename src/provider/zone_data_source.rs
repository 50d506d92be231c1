use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;
use crate::powerdns::PowerDnsApi;

/// `powerdns_zone` data source: looks a zone up by id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneDataSourceModel {
    pub id: String,
    pub server_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub kind: String,
}

pub struct ZoneDataSource<A: ?Sized> {
    client: Arc<A>,
}

impl<A: PowerDnsApi + ?Sized> ZoneDataSource<A> {
    pub fn new(client: Arc<A>) -> Self {
        Self { client }
    }

    pub fn type_name(provider_type_name: &str) -> String {
        format!("{provider_type_name}_zone")
    }

    pub async fn read(&self, config: ZoneDataSourceModel) -> Result<ZoneDataSourceModel> {
        debug!(id = %config.id, server_id = %config.server_id, "Reading zone");
        let zone = self.client.get_zone(&config.server_id, &config.id).await?;

        debug!(
            id = %zone.id,
            server_id = %config.server_id,
            name = %zone.name,
            kind = %zone.kind,
            "Read zone"
        );
        Ok(ZoneDataSourceModel {
            id: zone.id,
            server_id: config.server_id,
            name: zone.name,
            kind: zone.kind,
        })
    }
}
