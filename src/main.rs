//! airboard - airodump-ng dump server
//!
//! Re-parses an airodump-ng CSV dump on an interval and serves the latest
//! access points and clients over HTTP.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use airboard::config::{AppState, Config};
use airboard::{routes, DumpParser, DumpZone, OrganizationRegistry, RefreshScheduler, SnapshotStore};
use anyhow::{Context, Result};
use clap::Parser;
use tokio::net::TcpListener;
use tokio::signal::unix::{signal, SignalKind};
use tokio::sync::watch;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "airboard")]
#[command(about = "Serve access points and clients from an airodump-ng dump")]
struct Args {
    /// airodump-ng CSV file to parse
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Port the server listens on
    #[arg(short, long)]
    port: Option<u16>,

    /// Address the server binds to
    #[arg(long)]
    bind: Option<String>,

    /// Directory where the public directory is in
    #[arg(short, long)]
    dir: Option<PathBuf>,

    /// IEEE OUI registry file
    #[arg(long)]
    oui: Option<PathBuf>,

    /// IEEE CID registry file
    #[arg(long)]
    cid: Option<PathBuf>,

    /// Seconds between dump refreshes
    #[arg(long)]
    interval: Option<u64>,

    /// Dump timestamps were written in UTC rather than local time
    #[arg(long)]
    utc: bool,

    /// Config file (key = value)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl Args {
    fn apply(self, config: &mut Config) {
        if let Some(file) = self.file {
            config.dump_file = file;
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(bind) = self.bind {
            config.bind_address = bind;
        }
        if let Some(dir) = self.dir {
            config.base_dir = dir;
        }
        if let Some(oui) = self.oui {
            config.oui_file = oui;
        }
        if let Some(cid) = self.cid {
            config.cid_file = cid;
        }
        if let Some(secs) = self.interval {
            config.refresh_interval = Duration::from_secs(secs);
        }
        if self.utc {
            config.dump_zone = DumpZone::Utc;
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = Config::load(args.config.as_deref()).context("Failed to load configuration")?;
    args.apply(&mut config);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.tracing_filter()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("Starting airboard");
    tracing::info!("Dump file: {:?}", config.dump_file);
    tracing::info!("Public dir: {:?}", config.public_dir());

    let registry = Arc::new(OrganizationRegistry::load(&config.oui_file, &config.cid_file));
    tracing::info!(
        "Loaded {} OUI and {} CID prefixes",
        registry.oui().len(),
        registry.cid().len()
    );
    let parser = DumpParser::new(registry).with_zone(config.dump_zone);
    let store = Arc::new(SnapshotStore::new());

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let scheduler = RefreshScheduler::new(&config.dump_file, parser, store.clone())
        .with_interval(config.refresh_interval);
    let refresh_task = tokio::spawn(scheduler.run(shutdown_rx));

    let state = AppState::new(store, config.public_dir());
    let app = routes::create_router(state);

    let addr = config.socket_addr()?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!("HTTP server listening on IP {} port {}", addr.ip(), addr.port());

    axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    let _ = shutdown_tx.send(true);
    if let Err(e) = refresh_task.await {
        tracing::error!("Refresh task failed: {}", e);
    }

    tracing::info!("Server stopped");
    Ok(())
}

/// Resolve on SIGTERM or SIGINT.
async fn shutdown_signal() {
    let mut sigterm = signal(SignalKind::terminate()).expect("Failed to install SIGTERM handler");
    let mut sigint = signal(SignalKind::interrupt()).expect("Failed to install SIGINT handler");

    tokio::select! {
        _ = sigterm.recv() => {
            tracing::info!("Received SIGTERM, shutting down");
        }
        _ = sigint.recv() => {
            tracing::info!("Received SIGINT, shutting down");
        }
    }
}
