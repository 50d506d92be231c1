use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::import::{RECORDSET_IMPORT_FORMAT, split_import_id};
use crate::error::Result;
use crate::powerdns::PowerDnsApi;
use crate::powerdns::model::RecordSet;

/// Persisted state of a `powerdns_recordset` resource.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordsetResourceModel {
    /// State ID for the record set, "{zone_id}/{name}/{type}".
    #[serde(default)]
    pub id: Option<String>,
    pub zone_id: String,
    pub server_id: String,
    /// Name for record set (e.g. "www.powerdns.com.")
    pub name: String,
    /// Type of this record (e.g. "A", "PTR", "MX").
    #[serde(rename = "type")]
    pub rrtype: String,
    /// DNS TTL of the records, in seconds.
    #[serde(default)]
    pub ttl: u32,
    #[serde(default)]
    pub records: Vec<String>,
}

impl RecordsetResourceModel {
    pub(crate) fn to_record_set(&self) -> RecordSet {
        RecordSet {
            name: self.name.clone(),
            rrtype: self.rrtype.clone(),
            ttl: self.ttl,
            records: self.records.clone(),
        }
    }

    pub(crate) fn apply(&mut self, record_set: RecordSet) {
        self.id = Some(recordset_state_id(&self.zone_id, &self.name, &self.rrtype));
        self.name = record_set.name;
        self.rrtype = record_set.rrtype;
        self.ttl = record_set.ttl;
        self.records = record_set.records;
    }
}

pub(crate) fn recordset_state_id(zone_id: &str, name: &str, rrtype: &str) -> String {
    format!("{zone_id}/{name}/{rrtype}")
}

pub struct RecordsetResource<A: ?Sized> {
    client: Arc<A>,
}

impl<A: PowerDnsApi + ?Sized> RecordsetResource<A> {
    pub fn new(client: Arc<A>) -> Self {
        Self { client }
    }

    pub fn type_name(provider_type_name: &str) -> String {
        format!("{provider_type_name}_recordset")
    }

    pub async fn create(&self, plan: RecordsetResourceModel) -> Result<RecordsetResourceModel> {
        let mut data = plan;
        let record_set = data.to_record_set();

        debug!(
            zone_id = %data.zone_id,
            server_id = %data.server_id,
            name = %data.name,
            rrtype = %data.rrtype,
            ttl = data.ttl,
            records = ?data.records,
            "Creating record set"
        );
        let record_set = self
            .client
            .create_record_set(&data.server_id, &data.zone_id, &record_set)
            .await?;

        data.apply(record_set);
        debug!(
            id = data.id.as_deref(),
            zone_id = %data.zone_id,
            server_id = %data.server_id,
            name = %data.name,
            rrtype = %data.rrtype,
            ttl = data.ttl,
            records = ?data.records,
            "Created record set"
        );
        Ok(data)
    }

    pub async fn read(&self, state: RecordsetResourceModel) -> Result<RecordsetResourceModel> {
        let mut data = state;

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

        data.apply(record_set);
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

    pub async fn update(&self, plan: RecordsetResourceModel) -> Result<RecordsetResourceModel> {
        let record_set = plan.to_record_set();

        debug!(
            zone_id = %plan.zone_id,
            server_id = %plan.server_id,
            name = %plan.name,
            rrtype = %plan.rrtype,
            ttl = plan.ttl,
            records = ?plan.records,
            "Updating record set"
        );
        self.client
            .update_record_set(&plan.server_id, &plan.zone_id, &record_set)
            .await?;
        debug!(
            zone_id = %plan.zone_id,
            server_id = %plan.server_id,
            name = %plan.name,
            rrtype = %plan.rrtype,
            "Updated record set"
        );

        self.read(plan).await
    }

    pub async fn delete(&self, state: &RecordsetResourceModel) -> Result<()> {
        let record_set = state.to_record_set();

        debug!(
            zone_id = %state.zone_id,
            server_id = %state.server_id,
            name = %record_set.name,
            rrtype = %record_set.rrtype,
            "Deleting record set"
        );
        self.client
            .delete_record_set(&state.server_id, &state.zone_id, &record_set)
            .await?;
        debug!(
            zone_id = %state.zone_id,
            server_id = %state.server_id,
            name = %record_set.name,
            rrtype = %record_set.rrtype,
            "Deleted record set"
        );
        Ok(())
    }

    /// Seed state from a `server_id/zone_id/recordset_name/recordset_type`
    /// import ID.
    pub fn import_state(id: &str) -> Result<RecordsetResourceModel> {
        let [server_id, zone_id, name, rrtype] = split_import_id::<4>(id, RECORDSET_IMPORT_FORMAT)?;
        Ok(RecordsetResourceModel {
            id: None,
            zone_id: zone_id.to_string(),
            server_id: server_id.to_string(),
            name: name.to_string(),
            rrtype: rrtype.to_string(),
            ..Default::default()
        })
    }
}
