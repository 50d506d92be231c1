//! In-memory [`PowerDnsApi`] that behaves like a PowerDNS server closely
//! enough for the resource handlers, and records every call it receives.
use std::collections::BTreeMap;
use std::sync::Mutex;

use async_trait::async_trait;
use reqwest::StatusCode;

use crate::error::{ProviderError, Result};
use crate::powerdns::PowerDnsApi;
use crate::powerdns::model::{RecordSet, Zone};
use crate::validation::{validate_new_zone, validate_record_set};

#[derive(Default)]
pub struct FakePowerDns {
    zones: Mutex<BTreeMap<(String, String), Zone>>,
    calls: Mutex<Vec<String>>,
}

fn not_found() -> ProviderError {
    ProviderError::Api {
        status: StatusCode::NOT_FOUND,
        message: "Not Found".into(),
    }
}

impl FakePowerDns {
    pub fn insert_zone(&self, server_id: &str, mut zone: Zone) {
        zone.id = zone.name.clone();
        self.zones
            .lock()
            .unwrap()
            .insert((server_id.to_string(), zone.id.clone()), zone);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    fn with_zone<T>(&self, server_id: &str, zone_id: &str, f: impl FnOnce(&mut Zone) -> T) -> Result<T> {
        let mut zones = self.zones.lock().unwrap();
        let zone = zones
            .get_mut(&(server_id.to_string(), zone_id.to_string()))
            .ok_or_else(not_found)?;
        Ok(f(zone))
    }
}

#[async_trait]
impl PowerDnsApi for FakePowerDns {
    async fn create_zone(&self, server_id: &str, zone: &Zone) -> Result<Zone> {
        validate_new_zone(zone)?;
        self.record(format!("create_zone {server_id} {}", zone.name));

        let mut stored = zone.clone();
        stored.id = zone.name.clone();
        let mut zones = self.zones.lock().unwrap();
        let key = (server_id.to_string(), stored.id.clone());
        if zones.contains_key(&key) {
            return Err(ProviderError::Api {
                status: StatusCode::CONFLICT,
                message: "Conflict".into(),
            });
        }
        zones.insert(key, stored.clone());
        Ok(stored)
    }

    async fn get_zone(&self, server_id: &str, zone_id: &str) -> Result<Zone> {
        self.record(format!("get_zone {server_id} {zone_id}"));
        self.with_zone(server_id, zone_id, |zone| zone.clone())
    }

    async fn update_zone(&self, server_id: &str, zone_id: &str, zone: &Zone) -> Result<()> {
        self.record(format!("update_zone {server_id} {zone_id}"));
        self.with_zone(server_id, zone_id, |stored| {
            stored.kind = zone.kind.clone();
            stored.dnssec = zone.dnssec;
            stored.masters = zone.masters.clone();
        })
    }

    async fn delete_zone(&self, server_id: &str, zone_id: &str) -> Result<()> {
        self.record(format!("delete_zone {server_id} {zone_id}"));
        self.zones
            .lock()
            .unwrap()
            .remove(&(server_id.to_string(), zone_id.to_string()))
            .map(|_| ())
            .ok_or_else(not_found)
    }

    async fn get_record_set(
        &self,
        server_id: &str,
        zone_id: &str,
        name: &str,
        rrtype: &str,
    ) -> Result<RecordSet> {
        self.record(format!("get_record_set {server_id} {zone_id} {name} {rrtype}"));
        self.with_zone(server_id, zone_id, |zone| {
            zone.record_sets.iter().find(|rs| rs.matches(name, rrtype)).cloned()
        })?
        .ok_or_else(|| ProviderError::RecordSetNotFound {
            zone_id: zone_id.to_string(),
            name: name.to_string(),
            rrtype: rrtype.to_string(),
        })
    }

    async fn create_record_set(
        &self,
        server_id: &str,
        zone_id: &str,
        record_set: &RecordSet,
    ) -> Result<RecordSet> {
        self.update_record_set(server_id, zone_id, record_set).await?;
        self.get_record_set(server_id, zone_id, &record_set.name, &record_set.rrtype)
            .await
    }

    async fn update_record_set(
        &self,
        server_id: &str,
        zone_id: &str,
        record_set: &RecordSet,
    ) -> Result<()> {
        validate_record_set(record_set)?;
        self.record(format!(
            "replace_record_set {server_id} {zone_id} {} {}",
            record_set.name, record_set.rrtype
        ));
        self.with_zone(server_id, zone_id, |zone| {
            match zone
                .record_sets
                .iter_mut()
                .find(|rs| rs.matches(&record_set.name, &record_set.rrtype))
            {
                Some(existing) => *existing = record_set.clone(),
                None => zone.record_sets.push(record_set.clone()),
            }
        })
    }

    async fn delete_record_set(
        &self,
        server_id: &str,
        zone_id: &str,
        record_set: &RecordSet,
    ) -> Result<()> {
        validate_record_set(record_set)?;
        self.record(format!(
            "delete_record_set {server_id} {zone_id} {} {}",
            record_set.name, record_set.rrtype
        ));
        self.with_zone(server_id, zone_id, |zone| {
            zone.record_sets
                .retain(|rs| !rs.matches(&record_set.name, &record_set.rrtype));
        })
    }
}
