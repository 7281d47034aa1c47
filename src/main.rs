// src/main.rs
use clap::Parser;
use hive_profit_switcher::*;
use tokio::runtime::Runtime;

/// Main entry point
///
/// # Flow
/// 1. Parses command line arguments
/// 2. Delegates to appropriate subcommand handler
/// 3. Propagates any errors upward
fn main() -> Result<(), SwitcherError> {
    let cli = cli::Commands::parse();

    match cli.action {
        cli::Action::Run(opts) => run_pass(opts),
        cli::Action::Config(opts) => generate_config(opts),
        cli::Action::CheckUpdate(opts) => check_update(opts),
    }
}

/// Runs one evaluation pass over all farm workers
///
/// # Operations
/// 1. Initializes logging
/// 2. Loads and validates configuration
/// 3. Builds the API clients
/// 4. Evaluates every worker, reporting each outcome
/// 5. Optionally checks for a newer release
fn run_pass(opts: cli::RunOptions) -> Result<(), SwitcherError> {
    utils::init_logging(opts.verbose);

    let config = config::load(config::resolve_path(&opts.config))?;
    let mut options = PassOptions::from_config(&config);
    // Apply CLI overrides
    if let Some(policy) = opts.policy {
        options.policy = policy;
    }
    options.dry_run = opts.dry_run;
    options.concurrency = opts.concurrency.max(1);

    let rt = Runtime::new()?;
    rt.block_on(async {
        let http = network::http_client(&config.endpoints)?;
        let farm = HiveClient::new(http.clone(), &config);
        let market = MarketClient::new(http.clone(), &config.endpoints);

        let switcher = Switcher::new(&config, farm, market, options);
        let report = switcher.run_pass().await?;
        report.log_summary();

        if opts.json {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }

        if !opts.no_update_check {
            let releases = ReleaseClient::new(http, config.endpoints.release_feed.clone());
            notify_update(&releases).await;
        }

        Ok::<(), SwitcherError>(())
    })
}

/// Generates configuration template file
fn generate_config(opts: cli::ConfigOptions) -> Result<(), SwitcherError> {
    let template = config::generate_template();
    std::fs::write(opts.output, template)?;
    Ok(())
}

/// Reports whether the release feed has a newer version
fn check_update(opts: cli::CheckUpdateOptions) -> Result<(), SwitcherError> {
    utils::init_logging(false);

    let endpoints = config::ApiEndpoints::default();
    let feed = opts.feed.unwrap_or(endpoints.release_feed.clone());

    let rt = Runtime::new()?;
    rt.block_on(async {
        let http = network::http_client(&endpoints)?;
        let releases = ReleaseClient::new(http, feed);
        match releases.latest_tag().await? {
            Some(tag) if network::release::is_newer(&tag, env!("CARGO_PKG_VERSION")) => {
                log::info!(
                    "Version {} is available (running {})",
                    tag,
                    env!("CARGO_PKG_VERSION")
                );
            }
            Some(_) => log::info!("Already on the latest version {}", env!("CARGO_PKG_VERSION")),
            None => log::info!("Release feed lists no versions"),
        }
        Ok::<(), SwitcherError>(())
    })
}

/// Best-effort release check after a pass; failures are only logged
async fn notify_update(releases: &ReleaseClient) {
    match releases.latest_tag().await {
        Ok(Some(tag)) if network::release::is_newer(&tag, env!("CARGO_PKG_VERSION")) => {
            log::info!(
                "A newer version ({}) is available, running {}",
                tag,
                env!("CARGO_PKG_VERSION")
            );
        }
        Ok(_) => {}
        Err(e) => log::debug!("Update check failed: {}", e),
    }
}
