use std::fs::File;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use serde_json::json;
use storefront_core::services::TracingRecorder;
use storefront_core::session::{AssemblerSession, CheckoutTaxStep};
use storefront_core::tax::vat_vendor_info;
use storefront_core::StyleOverrides;
use storefront_data::{AppConfig, JsonOutbox, PatternCatalogLoader, logging, parse_script, replay};
use tracing::{debug, info};

/// Pattern assembler and checkout tax tooling.
///
/// Every command prints the requests it would send as JSON on stdout;
/// logs go to stderr.
#[derive(Parser, Debug)]
#[command(name = "storefront")]
#[command(version, about, long_about = None)]
struct Cli {
    /// TOML config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log level or EnvFilter directive (overrides the config file)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Replay an assembler script against a pattern catalog
    Assemble {
        /// CSV with id,name,category columns
        #[arg(long)]
        catalog: PathBuf,

        /// Script of assembler actions, one per line
        #[arg(long)]
        script: PathBuf,

        /// Site to apply the composition to (overrides the config file)
        #[arg(long)]
        site: Option<String>,

        /// Site the pattern library is served from (overrides the config file)
        #[arg(long)]
        source_site_id: Option<u64>,
    },

    /// Resolve the tax blocks for a checkout contact step
    Vat {
        /// ISO-3166 alpha-2 country code
        #[arg(long)]
        country: String,

        #[arg(long)]
        postal_code: Option<String>,

        /// Business tax ID as typed by the user; enables the opt-in
        #[arg(long)]
        vat_id: Option<String>,

        #[arg(long)]
        organization: Option<String>,

        #[arg(long)]
        address: Option<String>,

        /// The tax ID is for Northern Ireland (GB only)
        #[arg(long, default_value_t = false)]
        northern_ireland: bool,
    },

    /// Print the vendor tax block for a receipt
    Vendor {
        #[arg(long)]
        country: String,

        /// Transaction date, YYYY-MM-DD
        #[arg(long)]
        date: NaiveDate,
    },
}

fn load_config(path: Option<&PathBuf>) -> Result<AppConfig> {
    match path {
        Some(path) => AppConfig::load(path)
            .with_context(|| format!("Failed to load config: {}", path.display())),
        None => Ok(AppConfig::default()),
    }
}

async fn assemble(
    config: &AppConfig,
    catalog_path: PathBuf,
    script_path: PathBuf,
    site: Option<String>,
    source_site_id: Option<u64>,
) -> Result<()> {
    let file = File::open(&catalog_path)
        .with_context(|| format!("Failed to open: {}", catalog_path.display()))?;
    let catalog = PatternCatalogLoader::parse(file)
        .with_context(|| format!("Failed to parse catalog: {}", catalog_path.display()))?;
    debug!(patterns = catalog.len(), "catalog loaded");

    let text = std::fs::read_to_string(&script_path)
        .with_context(|| format!("Failed to read: {}", script_path.display()))?;
    let script = parse_script(&text)
        .with_context(|| format!("Failed to parse script: {}", script_path.display()))?;

    let source_site_id = source_site_id.unwrap_or(config.pattern_source_site_id);
    let mut session = AssemblerSession::new(Arc::new(TracingRecorder), source_site_id);
    replay(&mut session, &catalog, &script).context("Failed to replay script")?;

    let design = session.on_continue();
    let outbox = JsonOutbox::new();
    let site = site.or_else(|| config.site.clone()).unwrap_or_default();
    let applied = session
        .submit(&site, &outbox, &StyleOverrides::default())
        .await
        .context("Failed to apply composition")?;
    info!(applied, "assembler finished");

    let output = json!({
        "design": design,
        "summary": session.composition().summary(),
        "active_position": session.composition().active_position(),
        "requests": outbox.entries(),
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

async fn vat(
    country: String,
    postal_code: Option<String>,
    vat_id: Option<String>,
    organization: Option<String>,
    address: Option<String>,
    northern_ireland: bool,
) -> Result<()> {
    let mut step = CheckoutTaxStep::default();
    let form = step.form_mut();
    form.set_country(&country);
    form.set_postal_code(postal_code.as_deref().unwrap_or_default());
    if let Some(vat_id) = &vat_id {
        form.set_vat_enabled(true);
        form.set_vat_id(vat_id);
        form.set_organization(organization.as_deref().unwrap_or_default());
        form.set_address(address.as_deref().unwrap_or_default());
        form.set_northern_ireland(northern_ireland);
    }

    let outbox = JsonOutbox::new();
    step.complete(&outbox, &outbox)
        .await
        .context("Failed to complete the tax step")?;

    let output = json!({
        "vat_supported": step.form().shows_vat_opt_in(),
        "requests": outbox.entries(),
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_ref())?;
    logging::init_logging(cli.log_level.as_deref().unwrap_or(&config.log_level));

    match cli.command {
        Command::Assemble {
            catalog,
            script,
            site,
            source_site_id,
        } => assemble(&config, catalog, script, site, source_site_id).await,
        Command::Vat {
            country,
            postal_code,
            vat_id,
            organization,
            address,
            northern_ireland,
        } => vat(country, postal_code, vat_id, organization, address, northern_ireland).await,
        Command::Vendor { country, date } => {
            let output = json!({ "vendor": vat_vendor_info(&country, date) });
            println!("{}", serde_json::to_string_pretty(&output)?);
            Ok(())
        }
    }
}
