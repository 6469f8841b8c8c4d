use anyhow::Context;

use crate::cli::Cli;
use pwn_hunter::output::{format_details, format_json, format_list_report, format_single_report};
use pwn_hunter::progress::{BarProgress, NoProgress, Progress};
use pwn_hunter::{BatchController, BatchReport, Checker, Config, HibpClient};

fn init_logging(cli: &Cli) {
    // Keep reqwest/hyper at INFO so --debug only floods with our own events.
    use tracing_subscriber::EnvFilter;
    let crate_level = if cli.debug { "debug" } else if cli.verbose { "info" } else { "warn" };
    let filter_str = format!(
        "pwn_hunter={crate},reqwest=info,hyper=info,h2=info",
        crate = crate_level
    );
    let env_filter = EnvFilter::try_new(&filter_str).unwrap_or_else(|_| EnvFilter::new(crate_level));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_ansi(true)
        .with_target(false)
        .init();
}

/// Defaults, then the config file, then the environment, then flags.
fn build_config(cli: &Cli) -> anyhow::Result<Config> {
    let base = match &cli.config {
        Some(path) => Config::load(path).context("loading configuration")?,
        None => Config::default(),
    };
    let mut config = base.apply_env();

    if let Some(key) = &cli.api_key {
        config.api_key = Some(key.clone());
    }
    if let Some(api_base) = &cli.api_base {
        config.api_base = api_base.clone();
    }
    if let Some(ms) = cli.spacing_ms {
        config.spacing_ms = ms;
    }
    if let Some(n) = cli.max_retries {
        config.max_retries = Some(n);
    }
    if let Some(secs) = cli.timeout {
        config.timeout_secs = secs;
    }
    if cli.no_pastes {
        config.include_pastes = false;
    }
    Ok(config)
}

fn build_controller(config: &Config, progress: Box<dyn Progress>) -> anyhow::Result<BatchController<HibpClient>> {
    let client = HibpClient::new(config).context("building HTTP client")?;
    let checker = Checker::new(client)
        .with_retry_margin(config.retry_margin())
        .with_max_retries(config.max_retries);
    Ok(BatchController::new(checker)
        .with_spacing(config.spacing())
        .with_pastes(config.include_pastes)
        .with_progress(progress))
}

pub async fn run_from_cli(cli: Cli) -> anyhow::Result<()> {
    init_logging(&cli);
    let config = build_config(&cli)?;
    tracing::info!(api_base = %config.api_base, spacing_ms = config.spacing_ms, max_retries = ?config.max_retries, pastes = config.include_pastes, "configuration");

    if let Some(path) = &cli.list {
        // Read the list before touching the network so a bad path fails fast.
        let addresses = pwn_hunter::utils::load_addresses(path)?;
        return run_list(&cli, &config, &addresses).await;
    }
    if let Some(address) = &cli.single {
        return run_single(&cli, &config, address).await;
    }
    Ok(())
}

async fn run_list(cli: &Cli, config: &Config, addresses: &[String]) -> anyhow::Result<()> {
    if addresses.is_empty() {
        tracing::info!("address list is empty, nothing to check");
        return print_report(cli, &BatchReport::default(), None);
    }

    let progress: Box<dyn Progress> = if cli.json { Box::new(NoProgress) } else { Box::new(BarProgress::new()) };
    let mut controller = build_controller(config, progress)?;
    let report = controller.run_batch(addresses, false).await?;

    let details = if cli.details && !report.breached.is_empty() {
        Some(controller.enrich(&report).await?)
    } else {
        None
    };
    print_report(cli, &report, details.as_deref())
}

async fn run_single(cli: &Cli, config: &Config, address: &str) -> anyhow::Result<()> {
    let mut controller = build_controller(config, Box::new(NoProgress))?;
    let result = controller
        .checker()
        .check_address(address, false, config.include_pastes)
        .await?;

    let mut report = BatchReport::default();
    report.record(&result);
    let details = if cli.details && !report.breached.is_empty() {
        Some(controller.enrich(&report).await?)
    } else {
        None
    };

    if cli.json {
        println!("{}", format_json(&report, details.as_deref())?);
        return Ok(());
    }
    print!("{}", format_single_report(&result));
    if let Some(details) = &details {
        println!("{}", format_details(details)?);
    }
    Ok(())
}

fn print_report(cli: &Cli, report: &BatchReport, details: Option<&[pwn_hunter::AddressDetail]>) -> anyhow::Result<()> {
    if cli.json {
        println!("{}", format_json(report, details)?);
        return Ok(());
    }
    print!("{}", format_list_report(report));
    if let Some(details) = details {
        println!("\n{}", format_details(details)?);
    }
    Ok(())
}
