use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use tracing::{debug, warn};
use url::Url;

use super::PowerDnsApi;
use super::model::{RecordSet, Zone};
use super::types::*;
use crate::error::{ProviderError, Result};
use crate::validation::{validate_new_zone, validate_record_set, validate_record_set_key};

/// Path prefix of the v1 API when the configured URL carries none.
pub const DEFAULT_BASE_PATH: &str = "/api/v1";

const API_KEY_HEADER: &str = "X-API-Key";

#[derive(Clone)]
pub struct PowerDnsClient {
    http: Client,
    base_url: Url, // e.g. "http://127.0.0.1:8081/api/v1"
    api_key: String,
}

impl std::fmt::Debug for PowerDnsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PowerDnsClient")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl PowerDnsClient {
    /// Build a client for `scheme://server_host/base_path`. An empty
    /// `base_path` means [`DEFAULT_BASE_PATH`].
    pub fn new(
        api_key: impl Into<String>,
        server_host: &str,
        base_path: &str,
        scheme: &str,
    ) -> Result<Self> {
        if server_host.trim().is_empty() {
            return Err(ProviderError::config("server host is empty"));
        }
        let base_path = match base_path.trim_matches('/') {
            "" => DEFAULT_BASE_PATH.trim_start_matches('/'),
            path => path,
        };
        let base_url = Url::parse(&format!("{scheme}://{server_host}/{base_path}"))?;
        if base_url.cannot_be_a_base() {
            return Err(ProviderError::config(format!(
                "server URL '{base_url}' cannot be used as an API base"
            )));
        }

        Ok(Self {
            http: Client::new(),
            base_url,
            api_key: api_key.into(),
        })
    }

    /// Split a full server URL ("https://dns.example.net:8081/api/v1") into
    /// its scheme, host and path and build a client from them.
    pub fn from_url(server_url: &str, api_key: impl Into<String>) -> Result<Self> {
        let url = Url::parse(server_url)?;
        let host = url.host_str().ok_or_else(|| {
            ProviderError::config(format!("server URL '{server_url}' has no host"))
        })?;
        let host = match url.port() {
            Some(port) => format!("{host}:{port}"),
            None => host.to_string(),
        };
        Self::new(api_key, &host, url.path(), url.scheme())
    }

    /// Apply a request timeout to every call. Without it reqwest's default
    /// (no timeout) applies.
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self> {
        self.http = Client::builder().timeout(timeout).build()?;
        Ok(self)
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn auth_header(&self, req: RequestBuilder) -> RequestBuilder {
        req.header(API_KEY_HEADER, &self.api_key)
    }

    /// Base URL extended with the given path segments, each percent-encoded.
    fn url(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                ProviderError::config(format!("server URL '{}' cannot carry a path", self.base_url))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn zone_url(&self, server_id: &str, zone_id: &str) -> Result<Url> {
        self.url(&["servers", server_id, "zones", zone_id])
    }

    /// Send with credentials; turn any non-2xx reply into [`ProviderError::Api`].
    async fn send(&self, req: RequestBuilder) -> Result<Response> {
        let res = self.auth_header(req).send().await?;
        let status = res.status();
        if status.is_success() {
            return Ok(res);
        }

        let message = match res.text().await {
            Ok(body) => match serde_json::from_str::<PdnsError>(&body) {
                Ok(err) if err.errors.is_empty() => err.error,
                Ok(err) => format!("{} ({})", err.error, err.errors.join("; ")),
                Err(_) if body.trim().is_empty() => {
                    status.canonical_reason().unwrap_or("no response body").to_string()
                }
                Err(_) => {
                    warn!(%status, "PowerDNS error body is not JSON");
                    body
                }
            },
            Err(err) => {
                warn!(%status, error = %err, "failed to read PowerDNS error body");
                status.canonical_reason().unwrap_or("unreadable response body").to_string()
            }
        };

        Err(ProviderError::Api { status, message })
    }

    async fn patch_rrsets(&self, server_id: &str, zone_id: &str, rrsets: &[PdnsRrset]) -> Result<()> {
        let url = self.zone_url(server_id, zone_id)?;
        let body = PdnsRrsetPatch { rrsets };
        self.send(self.http.patch(url).json(&body)).await?;
        Ok(())
    }

    /// All zones of a server, optionally narrowed to one zone name. Record
    /// sets are not included in listings.
    pub async fn list_zones(
        &self,
        server_id: &str,
        zone: Option<&str>,
        dnssec: Option<bool>,
    ) -> Result<Vec<Zone>> {
        let mut url = self.url(&["servers", server_id, "zones"])?;
        {
            let mut query = url.query_pairs_mut();
            if let Some(zone) = zone {
                query.append_pair("zone", zone);
            }
            if let Some(dnssec) = dnssec {
                query.append_pair("dnssec", if dnssec { "true" } else { "false" });
            }
        }
        let res = self.send(self.http.get(url)).await?;
        let zones = res.json::<Vec<PdnsZone>>().await?;
        Ok(zones.into_iter().map(Zone::from_wire).collect())
    }

    /// Zone contents in AXFR presentation format.
    pub async fn export_zone(&self, server_id: &str, zone_id: &str) -> Result<String> {
        let url = self.url(&["servers", server_id, "zones", zone_id, "export"])?;
        let res = self.send(self.http.get(url)).await?;
        Ok(res.text().await?)
    }

    pub async fn search_data(
        &self,
        server_id: &str,
        q: &str,
        max: u32,
        object_type: Option<SearchObjectType>,
    ) -> Result<Vec<PdnsSearchResult>> {
        let mut url = self.url(&["servers", server_id, "search-data"])?;
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("q", q).append_pair("max", &max.to_string());
            if let Some(object_type) = object_type {
                query.append_pair("object_type", object_type.as_str());
            }
        }
        let res = self.send(self.http.get(url)).await?;
        Ok(res.json().await?)
    }

    pub async fn list_metadata(&self, server_id: &str, zone_id: &str) -> Result<Vec<PdnsMetadata>> {
        let url = self.url(&["servers", server_id, "zones", zone_id, "metadata"])?;
        let res = self.send(self.http.get(url)).await?;
        Ok(res.json().await?)
    }

    pub async fn get_metadata(&self, server_id: &str, zone_id: &str, kind: &str) -> Result<PdnsMetadata> {
        let url = self.url(&["servers", server_id, "zones", zone_id, "metadata", kind])?;
        let res = self.send(self.http.get(url)).await?;
        Ok(res.json().await?)
    }

    pub async fn delete_metadata(&self, server_id: &str, zone_id: &str, kind: &str) -> Result<()> {
        let url = self.url(&["servers", server_id, "zones", zone_id, "metadata", kind])?;
        self.send(self.http.delete(url)).await?;
        Ok(())
    }

    pub async fn list_tsig_keys(&self, server_id: &str) -> Result<Vec<PdnsTsigKey>> {
        let url = self.url(&["servers", server_id, "tsigkeys"])?;
        let res = self.send(self.http.get(url)).await?;
        Ok(res.json().await?)
    }

    pub async fn get_tsig_key(&self, server_id: &str, key_id: &str) -> Result<PdnsTsigKey> {
        let url = self.url(&["servers", server_id, "tsigkeys", key_id])?;
        let res = self.send(self.http.get(url)).await?;
        Ok(res.json().await?)
    }

    pub async fn delete_autoprimary(&self, server_id: &str, ip: &str, nameserver: &str) -> Result<()> {
        let url = self.url(&["servers", server_id, "autoprimaries", ip, nameserver])?;
        self.send(self.http.delete(url)).await?;
        Ok(())
    }
}

#[async_trait]
impl PowerDnsApi for PowerDnsClient {
    async fn create_zone(&self, server_id: &str, zone: &Zone) -> Result<Zone> {
        validate_new_zone(zone)?;

        let mut url = self.url(&["servers", server_id, "zones"])?;
        url.query_pairs_mut().append_pair("rrsets", "true");
        debug!(server_id, name = %zone.name, kind = %zone.kind, "POST zone");
        let res = self.send(self.http.post(url).json(&zone.to_wire())).await?;
        Ok(Zone::from_wire(res.json::<PdnsZone>().await?))
    }

    async fn get_zone(&self, server_id: &str, zone_id: &str) -> Result<Zone> {
        let url = self.zone_url(server_id, zone_id)?;
        let res = self.send(self.http.get(url)).await?;
        Ok(Zone::from_wire(res.json::<PdnsZone>().await?))
    }

    async fn update_zone(&self, server_id: &str, zone_id: &str, zone: &Zone) -> Result<()> {
        let url = self.zone_url(server_id, zone_id)?;
        self.send(self.http.put(url).json(&zone.to_wire())).await?;
        Ok(())
    }

    async fn delete_zone(&self, server_id: &str, zone_id: &str) -> Result<()> {
        let url = self.zone_url(server_id, zone_id)?;
        self.send(self.http.delete(url)).await?;
        Ok(())
    }

    async fn get_record_set(
        &self,
        server_id: &str,
        zone_id: &str,
        name: &str,
        rrtype: &str,
    ) -> Result<RecordSet> {
        validate_record_set_key(name, rrtype)?;

        // Servers older than 4.8 ignore the filter and send every rrset.
        let mut url = self.zone_url(server_id, zone_id)?;
        url.query_pairs_mut()
            .append_pair("rrset_name", name)
            .append_pair("rrset_type", rrtype);
        let res = self.send(self.http.get(url)).await?;
        let zone = Zone::from_wire(res.json::<PdnsZone>().await?);

        zone.record_sets
            .into_iter()
            .find(|rs| rs.matches(name, rrtype))
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
        validate_record_set(record_set)?;

        let rrset = record_set.to_wire(Some(ChangeType::Replace));
        self.patch_rrsets(server_id, zone_id, &[rrset]).await?;
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

        let rrset = record_set.to_wire(Some(ChangeType::Replace));
        self.patch_rrsets(server_id, zone_id, &[rrset]).await
    }

    async fn delete_record_set(
        &self,
        server_id: &str,
        zone_id: &str,
        record_set: &RecordSet,
    ) -> Result<()> {
        validate_record_set(record_set)?;

        self.patch_rrsets(server_id, zone_id, &[record_set.to_wire_delete()])
            .await
    }
}
