//! Pomodoro Player - a terminal Pomodoro timer that drives your music
//!
//! This is the main entry point for the pomodoro-player application.

use std::{fs::File, sync::{Arc, Mutex}};

use anyhow::Context;
use crossterm::event::EventStream;
use tracing::{error, info};

use pomodoro_player::{
    config::Config,
    services::{
        create_controller, preflight::validate_dependencies, CommandRunner, Platform,
        PreflightError, SystemRunner,
    },
    state::AppState,
    tasks::{self, TickScheduler},
    ui::TerminalRenderer,
    utils::shutdown_signal,
    NotificationAsset,
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // The terminal belongs to the UI, so logs go to a file
    let log_path = config.log_path();
    let log_file = File::create(&log_path)
        .with_context(|| format!("Failed to create log file {}", log_path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(format!("pomodoro_player={}", config.log_level()))
        .with_writer(Mutex::new(log_file))
        .with_ansi(false)
        .init();

    info!("Starting pomodoro-player v{}", env!("CARGO_PKG_VERSION"));

    let platform = Platform::detect();
    let runner: Arc<dyn CommandRunner> = Arc::new(SystemRunner::new());

    let preflight = if config.skip_checks {
        None
    } else {
        println!("Checking dependencies...");
        match validate_dependencies(platform, runner.as_ref()).await {
            Ok(report) => {
                for name in &report.missing_optional {
                    println!("Optional dependency not found: {} (music control disabled)", name);
                }
                Some(report)
            }
            Err(err) => {
                error!("{}", err);
                let PreflightError::MissingRequired { hint, .. } = &err;
                eprintln!("Dependency check failed: {}\n\n{}", err, hint);
                std::process::exit(1);
            }
        }
    };

    let asset = match &config.beep {
        Some(path) => NotificationAsset::external(path.clone()),
        None => NotificationAsset::materialize(&std::env::temp_dir()),
    }
    .context("Failed to prepare the notification sound")?;

    let controller = create_controller(platform, runner, preflight.as_ref()).await;
    let (scheduler, mut ticks) = TickScheduler::new();

    let renderer = match TerminalRenderer::init() {
        Ok(renderer) => renderer,
        Err(e) => {
            asset.remove();
            return Err(e).context("Failed to initialize the terminal");
        }
    };

    let mut app = AppState::new(controller, renderer, asset, scheduler);
    let mut events = EventStream::new();

    info!("Timer ready");

    let exit = tasks::run(&mut app, &mut ticks, &mut events, shutdown_signal()).await;
    info!("Event loop finished: {:?}", exit);

    app.shutdown().await;
    // Dropping the renderer restores the terminal
    drop(app);

    info!("Pomodoro timer stopped");
    Ok(())
}
