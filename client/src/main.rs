//! HealthStride CLI
//!
//! Terminal front end for the HealthStride fitness dashboard.
//!
//! ## Architecture
//!
//! - Gateway: the only component doing HTTP, returns typed errors
//! - API groups: users, metrics, activities, dashboard; raise notifications
//! - Session: remembers the selected profile between runs
//! - Views: concurrent loaders behind each screen

mod cli;

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use healthstride_client::{config::ClientConfig, Gateway, HealthApi, Session};
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::{Cli, ConsoleNotifier, Context};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    init_tracing(cli.verbose);

    // Load configuration, then let flags override it
    let mut config = ClientConfig::load()?;
    cli.apply_overrides(&mut config);

    info!(
        version = env!("CARGO_PKG_VERSION"),
        env = if ClientConfig::is_production() { "production" } else { "development" },
        base_url = %config.api.base_url,
        "Starting HealthStride client"
    );

    let gateway = Gateway::from_config(&config.api)?;
    let api = HealthApi::new(gateway, Arc::new(ConsoleNotifier));
    let session = Session::load(&config.session.state_file)?;
    debug!(user_id = ?session.current_user_id(), "Session ready");

    let mut ctx = Context {
        api,
        session,
        units: config.display.units,
    };
    cli::run(cli.command, &mut ctx).await
}

/// Initialize tracing/logging on stderr
fn init_tracing(verbose: bool) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            "healthstride_client=debug,healthstride=debug".into()
        } else if ClientConfig::is_production() {
            "healthstride_client=info,healthstride=info".into()
        } else {
            "healthstride_client=info,healthstride=info,reqwest=warn".into()
        }
    });

    let subscriber = tracing_subscriber::registry().with(env_filter);

    if ClientConfig::is_production() {
        // JSON logging for production (better for log aggregation)
        subscriber
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        // Pretty logging for development
        subscriber
            .with(tracing_subscriber::fmt::layer().pretty().with_writer(std::io::stderr))
            .init();
    }
}
