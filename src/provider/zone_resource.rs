use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::import::{ZONE_IMPORT_FORMAT, split_import_id};
use crate::error::Result;
use crate::powerdns::PowerDnsApi;
use crate::powerdns::model::Zone;

/// Persisted state of a `powerdns_zone` resource.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneResourceModel {
    /// Opaque zone id, assigned by the server.
    #[serde(default)]
    pub id: Option<String>,
    pub server_id: String,
    /// Name of the zone (e.g. "example.com.") MUST have a trailing dot.
    #[serde(default)]
    pub name: String,
    /// Zone kind, one of "Native", "Master", "Slave".
    #[serde(default)]
    pub kind: String,
}

impl ZoneResourceModel {
    /// The id to address the zone by. Before the server assigned one the
    /// zone name is tried, which is what PowerDNS uses for most zones.
    pub fn zone_id(&self) -> &str {
        match self.id.as_deref() {
            Some(id) if !id.is_empty() => id,
            _ => &self.name,
        }
    }

    fn to_zone(&self) -> Zone {
        Zone {
            id: self.id.clone().unwrap_or_default(),
            name: self.name.clone(),
            kind: self.kind.clone(),
            ..Default::default()
        }
    }

    fn apply(&mut self, zone: Zone) {
        self.id = Some(zone.id);
        self.name = zone.name;
        self.kind = zone.kind;
    }
}

pub struct ZoneResource<A: ?Sized> {
    client: Arc<A>,
}

impl<A: PowerDnsApi + ?Sized> ZoneResource<A> {
    pub fn new(client: Arc<A>) -> Self {
        Self { client }
    }

    pub fn type_name(provider_type_name: &str) -> String {
        format!("{provider_type_name}_zone")
    }

    pub async fn create(&self, plan: ZoneResourceModel) -> Result<ZoneResourceModel> {
        let mut data = plan;
        let zone = data.to_zone();

        debug!(server_id = %data.server_id, name = %zone.name, kind = %zone.kind, "Creating zone");
        let zone = self.client.create_zone(&data.server_id, &zone).await?;

        data.apply(zone);
        debug!(
            id = data.zone_id(),
            server_id = %data.server_id,
            name = %data.name,
            kind = %data.kind,
            "Created zone"
        );
        Ok(data)
    }

    pub async fn read(&self, state: ZoneResourceModel) -> Result<ZoneResourceModel> {
        let mut data = state;
        let id = data.zone_id().to_string();

        debug!(id = %id, server_id = %data.server_id, "Reading zone");
        let zone = self.client.get_zone(&data.server_id, &id).await?;

        data.apply(zone);
        debug!(
            id = data.zone_id(),
            server_id = %data.server_id,
            name = %data.name,
            kind = %data.kind,
            "Read zone"
        );
        Ok(data)
    }

    /// Push the planned basic data, then read the zone back so the state
    /// reflects what the server kept.
    pub async fn update(&self, plan: ZoneResourceModel) -> Result<ZoneResourceModel> {
        let zone = plan.to_zone();
        let id = plan.zone_id().to_string();

        debug!(
            id = %id,
            server_id = %plan.server_id,
            name = %zone.name,
            kind = %zone.kind,
            dnssec = zone.dnssec,
            masters = ?zone.masters,
            "Updating zone"
        );
        self.client.update_zone(&plan.server_id, &id, &zone).await?;
        debug!(id = %id, server_id = %plan.server_id, "Updated zone");

        self.read(plan).await
    }

    pub async fn delete(&self, state: &ZoneResourceModel) -> Result<()> {
        let id = state.zone_id();

        debug!(id, server_id = %state.server_id, "Deleting zone");
        self.client.delete_zone(&state.server_id, id).await?;
        debug!(id, server_id = %state.server_id, "Deleted zone");
        Ok(())
    }

    /// Seed state from a `server_id/zone_id` import ID; the next read fills
    /// in the rest.
    pub fn import_state(id: &str) -> Result<ZoneResourceModel> {
        let [server_id, zone_id] = split_import_id::<2>(id, ZONE_IMPORT_FORMAT)?;
        Ok(ZoneResourceModel {
            id: Some(zone_id.to_string()),
            server_id: server_id.to_string(),
            ..Default::default()
        })
    }
}
