// src/bin/artifactory-download.rs

//! CI step entry point: reads `PLUGIN_*` inputs, runs the download and exits
//! with its status.

use anyhow::{Context, Result};
use artifactory_download::{
    CancellationToken,
    cli::{PluginArgs, parse_log_level},
    constants::EXIT_CODE_CANCELLED,
    core::download::{self, DownloadError},
    system::platform::PlatformProfile,
};
use clap::Parser;
use colored::*;
use log::LevelFilter;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Entry point of the plugin.
/// It sets up logging and the signal listener, runs the download on a blocking
/// thread and turns its outcome into the process exit code.
#[tokio::main]
async fn main() {
    let args = PluginArgs::parse();
    init_logging(args.log_level.as_deref());

    let cancellation_token: CancellationToken = Arc::new(AtomicBool::new(false));
    tokio::spawn(listen_for_cancellation(cancellation_token.clone()));

    if let Err(e) = run(args, cancellation_token).await {
        // --- Centralized Error Handling ---
        if let Some(download_err) = e.downcast_ref::<DownloadError>() {
            if download_err.is_cancelled() {
                // Cancelled steps are not tool failures; leave quietly.
                log::debug!("Download cancelled.");
                std::process::exit(EXIT_CODE_CANCELLED);
            }
            eprintln!("{}: {}", "Error".red().bold(), download_err);
            std::process::exit(download_err.exit_code());
        }

        eprintln!("{}: {:#}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

async fn run(args: PluginArgs, cancellation_token: CancellationToken) -> Result<()> {
    let config = args.into_configuration();
    log::debug!("Configuration: {:?}", config);

    let profile = PlatformProfile::host();
    log::debug!("Platform profile: {:?}", profile);

    tokio::task::spawn_blocking(move || {
        download::execute(&config, profile, &cancellation_token)
    })
    .await
    .context("Download task terminated unexpectedly")??;

    Ok(())
}

/// `PLUGIN_LOG_LEVEL` sets the base level; `RUST_LOG` still wins when present.
fn init_logging(raw_level: Option<&str>) {
    let (level, unrecognised) = match raw_level.map(str::trim).filter(|s| !s.is_empty()) {
        None => (LevelFilter::Info, None),
        Some(raw) => match parse_log_level(raw) {
            Some(level) => (level, None),
            None => (LevelFilter::Info, Some(raw)),
        },
    };

    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    if let Some(raw) = unrecognised {
        log::warn!("Unknown log level '{}', using 'info'.", raw);
    }
}

async fn listen_for_cancellation(cancellation_token: CancellationToken) {
    match wait_for_termination().await {
        Ok(()) => {
            log::debug!("Termination signal received, cancelling the download.");
            cancellation_token.store(true, Ordering::SeqCst);
        }
        Err(e) => log::warn!("Could not listen for termination signals: {}", e),
    }
}

#[cfg(unix)]
async fn wait_for_termination() -> std::io::Result<()> {
    use tokio::signal::unix::{SignalKind, signal};

    // CI runners stop a step with SIGTERM; a local run gets Ctrl+C.
    let mut terminate = signal(SignalKind::terminate())?;
    tokio::select! {
        result = tokio::signal::ctrl_c() => result,
        _ = terminate.recv() => Ok(()),
    }
}

#[cfg(not(unix))]
async fn wait_for_termination() -> std::io::Result<()> {
    tokio::signal::ctrl_c().await
}
