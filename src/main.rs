use std::sync::Arc;
use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use modelboard::config::Settings;
use modelboard::console;
use modelboard::dataset::{DataSource, Dataset};
use modelboard::server::ApiServer;

mod cli;
mod commands;
use cli::{Cli, Commands};

/// Main entry point for Modelboard
///
/// Loads settings and the dataset once, then either serves the API,
/// serves it with an interactive browser on top, or renders one view
/// straight to the terminal.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load settings first
    let mut settings = match &cli.config_dir {
        Some(dir) => Settings::from_dir(dir),
        None => Settings::new(),
    }
    .context("Failed to load settings")?;

    // Log to a daily file so terminal output stays clean for tables
    std::fs::create_dir_all(&settings.logging.directory).with_context(|| {
        format!("Failed to create log directory {}", settings.logging.directory.display())
    })?;
    let file_appender = tracing_appender::rolling::RollingFileAppender::new(
        tracing_appender::rolling::Rotation::DAILY,
        &settings.logging.directory,
        "modelboard",
    );
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        // Disable ANSI colors for cleaner log files
        .with_ansi(false)
        .with_line_number(true)
        .with_file(true)
        .with_thread_ids(true)
        .with_target(false)
        .with_env_filter(EnvFilter::new(&settings.logging.level))
        .init();

    info!("Modelboard starting up...");
    info!("Log directory: {}", settings.logging.directory.display());

    let models_source = cli.models_file.as_deref().map_or_else(|| settings.models_source(), |path| DataSource::from_path(Some(path)));
    let providers_source = cli.providers_file.as_deref().map_or_else(|| settings.providers_source(), |path| DataSource::from_path(Some(path)));
    let dataset = Arc::new(
        Dataset::load(&models_source, &providers_source).context("Failed to load the model dataset")?,
    );
    let defaults = settings.view_defaults()?;
    info!("Settings loaded");

    match cli.command.unwrap_or(Commands::Table { table: cli::TableArgs::default() }) {
        Commands::Serve { port } => {
            if let Some(port) = port {
                settings.server.port = port;
            }
            let server = ApiServer::new(dataset, defaults, settings.server.host.clone(), settings.server.port);
            println!("Serving on {}", settings.server_url());
            server.start().await.map_err(|e| anyhow::anyhow!(e))?;
        }
        Commands::Run { port } => {
            if let Some(port) = port {
                settings.server.port = port;
            }
            let server = ApiServer::new(dataset, defaults, settings.server.host.clone(), settings.server.port);

            // Start server in a separate task
            tokio::spawn(async move {
                if let Err(e) = server.start().await {
                    error!("Server error: {}", e);
                    eprintln!("Server error: {}", e);
                }
            });

            // Give the server a moment to start
            tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;

            console::browse_loop(&settings).await.map_err(|e| anyhow::anyhow!(e))?;
        }
        Commands::Table { table } => commands::table(&dataset, &defaults, &table)?,
        Commands::Show { id } => commands::show(&dataset, &id)?,
        Commands::Compare { ids } => commands::compare(&dataset, &defaults, &ids)?,
        Commands::Redteam { table } => commands::red_teaming(&dataset, &table)?,
        Commands::Chart { metric, top, table } => commands::chart(&dataset, &defaults, &metric, top, &table)?,
        Commands::Providers { model, sort, direction } => {
            commands::providers(&dataset, model.as_deref(), sort.as_deref(), direction.as_deref())?
        }
        Commands::Developers { name } => commands::developers(&dataset, &defaults, name.as_deref())?,
        Commands::Metrics => commands::metrics(),
        Commands::Ids => commands::ids(&dataset),
    }

    Ok(())
}
