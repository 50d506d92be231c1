//! Crate entrypoint: PowerDNS API client plus the provider resources built on it.

pub mod config;
pub mod error;
pub mod powerdns;
pub mod provider;
pub mod validation;

pub use config::ProviderConfig;
pub use error::{ProviderError, Result};
pub use powerdns::model::{RecordSet, Zone, ZoneKind};
pub use powerdns::{PowerDnsApi, PowerDnsClient};
pub use provider::{ConfiguredProvider, PowerDnsProvider};
