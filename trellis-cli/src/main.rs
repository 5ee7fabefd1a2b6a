//! Trellis CLI

use anyhow::Result;
use bytes::Bytes;
use clap::{Parser, Subcommand, ValueEnum};
use http::Request;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use trellis_metrics::{Stopwatch, TrackingDispatcher};
use trellis_plugin_api::prelude::*;
use trellis_plugin_runtime::{InterceptorRegistry, RegistryConfig, SkippedInterceptor};

#[derive(Parser)]
#[command(name = "trellis")]
#[command(about = "Inspect the Trellis interceptor registry", long_about = None)]
#[command(version)]
struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, global = true, default_value = "warn")]
    log_level: String,

    /// Log output format
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// List registered interceptors by category
    List {
        /// Registry configuration file (yaml, toml or json)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Print the listing as JSON
        #[arg(long)]
        json: bool,
    },

    /// Drive one simulated page load through every interceptor
    Probe {
        /// Page URL reported to interceptors
        #[arg(short, long, default_value = "app://probe")]
        page: String,

        /// Registry configuration file (yaml, toml or json)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Show version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::List { config, json } => {
            init_tracing(&cli.log_level, cli.log_format)?;

            let registry = build_registry(config)?;
            registry.load_all();

            let listing = Listing::from_registry(&registry);
            if json {
                println!("{}", serde_json::to_string_pretty(&listing)?);
            } else {
                print!("{}", listing.render());
            }
            Ok(())
        }

        Commands::Probe { page, config } => {
            init_tracing(&cli.log_level, cli.log_format)?;
            probe(&page, config).await
        }

        Commands::Version => {
            println!("Trellis");
            println!("Version: {}", env!("CARGO_PKG_VERSION"));
            println!("Rust version: {}", env!("CARGO_PKG_RUST_VERSION"));
            Ok(())
        }
    }
}

fn init_tracing(level: &str, format: LogFormat) -> Result<()> {
    let filter = match level.to_lowercase().as_str() {
        "trace" => tracing::Level::TRACE,
        "debug" => tracing::Level::DEBUG,
        "info" => tracing::Level::INFO,
        "warn" => tracing::Level::WARN,
        "error" => tracing::Level::ERROR,
        _ => tracing::Level::WARN,
    };

    let env_filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(filter.into());

    // Logs go to stderr so listings on stdout stay machine readable
    match format {
        LogFormat::Text => tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(false)
                    .with_level(true),
            )
            .with(env_filter)
            .try_init()?,
        LogFormat::Json => tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .with(env_filter)
            .try_init()?,
    }

    Ok(())
}

fn build_registry(config: Option<PathBuf>) -> Result<InterceptorRegistry> {
    tracing::debug!(
        bundled = ?trace_interceptors::exported_names(),
        "Bundled interceptors linked"
    );

    let config = match config {
        Some(path) => {
            tracing::info!("Registry config: {}", path.display());
            let mut config = RegistryConfig::load(&path)?;
            config.apply_overrides(|key| std::env::var(key).ok());
            config
        }
        None => RegistryConfig::from_env()?,
    };

    Ok(InterceptorRegistry::with_config(config))
}

#[derive(Debug, Serialize)]
struct ListedInterceptor {
    name: &'static str,
    description: String,
}

#[derive(Debug, Default, Serialize)]
struct Listing {
    loaded: BTreeMap<InterceptorCategory, Vec<ListedInterceptor>>,
    skipped: Vec<SkippedInterceptor>,
}

impl Listing {
    fn from_registry(registry: &InterceptorRegistry) -> Self {
        let mut listing = Listing::default();

        for category in InterceptorCategory::ALL {
            let entries: Vec<ListedInterceptor> = registry
                .interceptors_of(category)
                .iter()
                .map(|entry| ListedInterceptor {
                    name: entry.name(),
                    description: entry.instance().description().to_string(),
                })
                .collect();
            if !entries.is_empty() {
                listing.loaded.insert(category, entries);
            }
        }

        if let Some(report) = registry.report() {
            listing.skipped = report.skipped.clone();
        }

        listing
    }

    fn render(&self) -> String {
        let mut out = String::new();

        if self.loaded.is_empty() {
            out.push_str("No interceptors registered\n");
        }
        for (category, entries) in &self.loaded {
            out.push_str(&format!("{category}\n"));
            for entry in entries {
                if entry.description.is_empty() {
                    out.push_str(&format!("  {}\n", entry.name));
                } else {
                    out.push_str(&format!("  {:<24} {}\n", entry.name, entry.description));
                }
            }
        }

        if !self.skipped.is_empty() {
            out.push_str("skipped\n");
            for skipped in &self.skipped {
                out.push_str(&format!(
                    "  {} ({}): {}\n",
                    skipped.name, skipped.category, skipped.reason
                ));
            }
        }

        out
    }
}

async fn probe(page: &str, config: Option<PathBuf>) -> Result<()> {
    let mut watch = Stopwatch::start();

    let registry = build_registry(config)?;
    registry.load_all();
    let dispatcher = TrackingDispatcher::from_registry(&registry);
    dispatcher.engine_initialized(watch.restart());
    dispatcher.page_view(page);

    let mut consumed_by = None;
    registry.enumerate_interceptor(InterceptorCategory::Log, |entry, _, stop| {
        if let Some(logger) = entry.instance().as_log() {
            if logger.handle_js_log(LogLevel::Info, "probe page loaded", page) {
                consumed_by = Some(entry.name());
                *stop = true;
            }
        }
    });

    let ctx = NetworkContext::new(page);
    let mut req = Request::builder()
        .uri("https://localhost/probe")
        .body(Body::new(Bytes::new()))?;

    let mut outcome = String::from("sent");
    for entry in registry.interceptors_of(InterceptorCategory::Network) {
        let interceptor = entry.instance().expect_network()?;
        match interceptor.intercept_request(&mut req, &ctx).await? {
            InterceptorAction::Continue => {}
            InterceptorAction::Return(res) => {
                outcome = format!("answered by {} ({})", entry.name(), res.status());
                break;
            }
            InterceptorAction::Abort(err) => {
                outcome = format!("aborted by {}: {err}", entry.name());
                break;
            }
        }
    }
    dispatcher.performance_timing("network_interception", watch.restart(), page);

    dispatcher.page_rendered(watch.elapsed(), page);
    dispatcher.page_success(page);

    println!("Page: {page}");
    println!("Interceptors loaded: {}", registry.interceptors().len());
    println!("Event trackers notified: {}", dispatcher.len());
    println!("Log line consumed by: {}", consumed_by.unwrap_or("<runtime>"));
    println!("Request: {outcome}");
    for (name, value) in req.headers() {
        println!("  {}: {}", name, value.to_str().unwrap_or("<binary>"));
    }

    Ok(())
}
