use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use pdns_provider::{
    ConfiguredProvider, PowerDnsApi, PowerDnsClient, PowerDnsProvider, ProviderConfig, ZoneKind,
    config::{API_KEY_ENV, SERVER_URL_ENV},
    powerdns::types::SearchObjectType,
    provider::{
        RecordsetDataSourceModel, RecordsetResource, RecordsetResourceModel, ZoneResource,
        ZoneResourceModel,
    },
};
use serde::Serialize;
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about, rename_all = "kebab-case")]
struct Cli {
    /// PowerDNS API key
    #[arg(long, value_name = "KEY", env = API_KEY_ENV, hide_env_values = true)]
    api_key: Option<String>,
    /// PowerDNS server URL (e.g. http://127.0.0.1:8081/api/v1)
    #[arg(long, value_name = "URL", env = SERVER_URL_ENV)]
    server_url: Option<String>,
    /// PowerDNS server ID
    #[arg(long, value_name = "ID", default_value = "localhost")]
    server_id: String,
    /// Request timeout in seconds
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Manage zones
    #[command(subcommand)]
    Zone(ZoneCommand),
    /// Manage record sets
    #[command(subcommand)]
    Recordset(RecordsetCommand),
    /// Search zones, records and comments
    Search {
        /// Search term; '*' and '?' are wildcards
        query: String,
        /// Maximum number of results
        #[arg(long, default_value_t = 100)]
        max: u32,
        #[arg(long, value_enum)]
        object_type: Option<ObjectTypeArg>,
    },
}

#[derive(Subcommand, Debug)]
enum ZoneCommand {
    /// Show one zone
    Get { zone_id: String },
    /// List zones of the server
    List {
        /// Only the zone with this name
        #[arg(long)]
        zone: Option<String>,
        /// Include DNSSEC state (slower on large servers)
        #[arg(long)]
        dnssec: Option<bool>,
    },
    /// Create a zone
    Create(ZoneArgs),
    /// Change the kind of an existing zone
    Update {
        zone_id: String,
        #[command(flatten)]
        zone: ZoneArgs,
    },
    /// Delete a zone
    Delete { zone_id: String },
    /// Print the zone in AXFR format
    Export { zone_id: String },
    /// Read a zone into resource state from a 'server_id/zone_id' import ID
    Import { id: String },
}

#[derive(Args, Debug)]
struct ZoneArgs {
    /// Zone name, with trailing dot (e.g. example.com.)
    name: String,
    /// Native, Master or Slave
    #[arg(long, default_value = "Native")]
    kind: ZoneKind,
}

#[derive(Subcommand, Debug)]
enum RecordsetCommand {
    /// Show one record set
    Get(RecordsetKey),
    /// Create the record set, or replace it when it differs
    Apply {
        #[command(flatten)]
        key: RecordsetKey,
        /// TTL in seconds
        #[arg(long, default_value_t = 3600)]
        ttl: u32,
        /// Record content (repeat for multiple records)
        #[arg(long = "record", value_name = "CONTENT", required = true)]
        records: Vec<String>,
    },
    /// Delete a record set
    Delete(RecordsetKey),
    /// Read a record set from a 'server_id/zone_id/name/type' import ID
    Import { id: String },
}

#[derive(Args, Debug)]
struct RecordsetKey {
    zone_id: String,
    name: String,
    #[arg(value_name = "TYPE")]
    rrtype: String,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum ObjectTypeArg {
    All,
    Zone,
    Record,
    Comment,
}

impl From<ObjectTypeArg> for SearchObjectType {
    fn from(arg: ObjectTypeArg) -> Self {
        match arg {
            ObjectTypeArg::All => SearchObjectType::All,
            ObjectTypeArg::Zone => SearchObjectType::Zone,
            ObjectTypeArg::Record => SearchObjectType::Record,
            ObjectTypeArg::Comment => SearchObjectType::Comment,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let provider = PowerDnsProvider::new(env!("CARGO_PKG_VERSION"));
    let configured = provider
        .configure(&ProviderConfig {
            api_key: cli.api_key.clone(),
            server_url: cli.server_url.clone(),
            timeout_seconds: cli.timeout,
        })
        .context("failed to configure PowerDNS provider")?;

    match cli.command {
        Command::Zone(cmd) => run_zone(&configured, &cli.server_id, cmd).await,
        Command::Recordset(cmd) => run_recordset(&configured, &cli.server_id, cmd).await,
        Command::Search {
            query,
            max,
            object_type,
        } => {
            let hits = configured
                .client()
                .search_data(&cli.server_id, &query, max, object_type.map(Into::into))
                .await
                .with_context(|| format!("search for '{query}' failed"))?;
            print_json(&hits)
        }
    }
}

async fn run_zone(
    configured: &ConfiguredProvider<PowerDnsClient>,
    server_id: &str,
    cmd: ZoneCommand,
) -> Result<()> {
    let resource = configured.zone_resource();

    match cmd {
        ZoneCommand::Get { zone_id } => {
            let zone = configured
                .client()
                .get_zone(server_id, &zone_id)
                .await
                .with_context(|| format!("unable to get zone '{zone_id}'"))?;
            print_json(&zone)
        }
        ZoneCommand::List { zone, dnssec } => {
            let zones = configured
                .client()
                .list_zones(server_id, zone.as_deref(), dnssec)
                .await
                .context("unable to list zones")?;
            print_json(&zones)
        }
        ZoneCommand::Create(args) => {
            let state = resource
                .create(ZoneResourceModel {
                    id: None,
                    server_id: server_id.to_string(),
                    name: args.name.clone(),
                    kind: args.kind.to_string(),
                })
                .await
                .with_context(|| format!("unable to create zone '{}'", args.name))?;
            info!(id = state.zone_id(), "zone created");
            print_json(&state)
        }
        ZoneCommand::Update { zone_id, zone } => {
            let state = resource
                .update(ZoneResourceModel {
                    id: Some(zone_id.clone()),
                    server_id: server_id.to_string(),
                    name: zone.name,
                    kind: zone.kind.to_string(),
                })
                .await
                .with_context(|| format!("unable to update zone '{zone_id}'"))?;
            print_json(&state)
        }
        ZoneCommand::Delete { zone_id } => {
            resource
                .delete(&ZoneResourceModel {
                    id: Some(zone_id.clone()),
                    server_id: server_id.to_string(),
                    ..Default::default()
                })
                .await
                .with_context(|| format!("unable to delete zone '{zone_id}'"))?;
            info!(id = %zone_id, "zone deleted");
            Ok(())
        }
        ZoneCommand::Export { zone_id } => {
            let text = configured
                .client()
                .export_zone(server_id, &zone_id)
                .await
                .with_context(|| format!("unable to export zone '{zone_id}'"))?;
            print!("{text}");
            Ok(())
        }
        ZoneCommand::Import { id } => {
            let seeded = ZoneResource::<PowerDnsClient>::import_state(&id)?;
            let state = resource
                .read(seeded)
                .await
                .with_context(|| format!("unable to import zone '{id}'"))?;
            print_json(&state)
        }
    }
}

async fn run_recordset(
    configured: &ConfiguredProvider<PowerDnsClient>,
    server_id: &str,
    cmd: RecordsetCommand,
) -> Result<()> {
    let resource = configured.recordset_resource();

    match cmd {
        RecordsetCommand::Get(key) => {
            let data = configured
                .recordset_data_source()
                .read(RecordsetDataSourceModel {
                    zone_id: key.zone_id,
                    server_id: server_id.to_string(),
                    name: key.name,
                    rrtype: key.rrtype,
                    ..Default::default()
                })
                .await
                .context("unable to get record set")?;
            print_json(&data)
        }
        RecordsetCommand::Apply { key, ttl, records } => {
            let plan = RecordsetResourceModel {
                id: None,
                zone_id: key.zone_id,
                server_id: server_id.to_string(),
                name: key.name,
                rrtype: key.rrtype,
                ttl,
                records,
            };
            let state = apply_recordset(&resource, plan).await?;
            print_json(&state)
        }
        RecordsetCommand::Delete(key) => {
            resource
                .delete(&RecordsetResourceModel {
                    id: None,
                    zone_id: key.zone_id,
                    server_id: server_id.to_string(),
                    name: key.name.clone(),
                    rrtype: key.rrtype.clone(),
                    ..Default::default()
                })
                .await
                .with_context(|| {
                    format!("unable to delete record set '{}' (type '{}')", key.name, key.rrtype)
                })?;
            info!(name = %key.name, rrtype = %key.rrtype, "record set deleted");
            Ok(())
        }
        RecordsetCommand::Import { id } => {
            let seeded = RecordsetResource::<PowerDnsClient>::import_state(&id)?;
            let state = resource
                .read(seeded)
                .await
                .with_context(|| format!("unable to import record set '{id}'"))?;
            print_json(&state)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RecordsetAction {
    Create,
    Replace,
    Keep,
}

/// Decide what `recordset apply` does given the server's current copy.
fn recordset_action(
    current: Option<&RecordsetResourceModel>,
    plan: &RecordsetResourceModel,
) -> RecordsetAction {
    match current {
        None => RecordsetAction::Create,
        Some(current) if current.ttl == plan.ttl && current.records == plan.records => {
            RecordsetAction::Keep
        }
        Some(_) => RecordsetAction::Replace,
    }
}

/// Reconcile one record set: create it when absent, replace it when the
/// server's copy differs from the plan, leave it alone otherwise.
async fn apply_recordset(
    resource: &RecordsetResource<PowerDnsClient>,
    plan: RecordsetResourceModel,
) -> Result<RecordsetResourceModel> {
    let current = match resource.read(plan.clone()).await {
        Ok(current) => Some(current),
        Err(err) if err.is_not_found() => None,
        Err(err) => return Err(err).context("unable to read record set"),
    };

    match recordset_action(current.as_ref(), &plan) {
        RecordsetAction::Create => {
            info!(name = %plan.name, rrtype = %plan.rrtype, "creating record set");
            Ok(resource.create(plan).await.context("unable to create record set")?)
        }
        RecordsetAction::Keep => {
            info!(name = %plan.name, rrtype = %plan.rrtype, "record set up to date");
            Ok(current.unwrap_or(plan))
        }
        RecordsetAction::Replace => {
            info!(name = %plan.name, rrtype = %plan.rrtype, "replacing record set");
            Ok(resource.update(plan).await.context("unable to update record set")?)
        }
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let out = serde_json::to_string_pretty(value).context("failed to encode output")?;
    println!("{out}");
    Ok(())
}

fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info".into());
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}
