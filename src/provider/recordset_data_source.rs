use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::recordset_resource::recordset_state_id;
use crate::error::Result;
use crate::powerdns::PowerDnsApi;

/// `powerdns_recordset` data source. `ttl` and `records` are computed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordsetDataSourceModel {
    #[serde(default)]
    pub id: Option<String>,
    pub zone_id: String,
    pub server_id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub rrtype: String,
    #[serde(default)]
    pub ttl: u32,
    #[serde(default)]
    pub records: Vec<String>,
}

pub struct RecordsetDataSource<A: ?Sized> {
    client: Arc<A>,
}

impl<A: PowerDnsApi + ?Sized> RecordsetDataSource<A> {
    pub fn new(client: Arc<A>) -> Self {
        Self { client }
    }

    pub fn type_name(provider_type_name: &str) -> String {
        format!("{provider_type_name}_recordset")
    }

    pub async fn read(&self, config: RecordsetDataSourceModel) -> Result<RecordsetDataSourceModel> {
        let mut data = config;

        debug!(
            zone_id = %data.zone_id,
            server_id = %data.server_id,
            name = %data.name,
            rrtype = %data.rrtype,
            "Reading record set"
        );
        let record_set = self
            .client
            .get_record_set(&data.server_id, &data.zone_id, &data.name, &data.rrtype)
            .await?;

        data.id = Some(recordset_state_id(&data.zone_id, &data.name, &data.rrtype));
        data.name = record_set.name;
        data.rrtype = record_set.rrtype;
        data.ttl = record_set.ttl;
        data.records = record_set.records;

        debug!(
            zone_id = %data.zone_id,
            server_id = %data.server_id,
            name = %data.name,
            rrtype = %data.rrtype,
            ttl = data.ttl,
            records = ?data.records,
            "Read record set"
        );
        Ok(data)
    }
}
