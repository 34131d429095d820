/*
[INPUT]:  CLI arguments, YAML configuration file, BATTERYABN_* environment, OS shutdown signals
[OUTPUT]: Headless command output or the interactive dashboard, with graceful shutdown
[POS]:    Binary entry point
[UPDATE]: When changing CLI flags, startup flow, or shutdown handling
[UPDATE]: 2026-10-09 Headless subcommands share the screen state machines with the TUI
*/

mod tui;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{anyhow, Context, Result};
use batteryabn_client::{BatteryClient, ClearScope, TaskKind};
use batteryabn_dashboard::views::{
    CellSearchView, TaskStatusView, TaskTriggerView, TestRecordSearchView,
};
use batteryabn_dashboard::{
    drive, BlobStore, ConfigOverrides, DashboardConfig, Executor, Request, Route, Screen, View,
};
use clap::{Parser, Subcommand};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use tui::{LogBuffer, LogBufferHandle, LogWriterFactory, LOG_BUFFER_CAPACITY};

#[derive(Parser, Debug)]
#[command(name = "batteryabn-dashboard", version, about = "Battery lab dashboard and task console")]
struct Cli {
    #[arg(long = "config", value_name = "PATH", global = true)]
    config_path: Option<PathBuf>,
    #[arg(long = "log-level", value_name = "LEVEL", default_value = "info", global = true)]
    log_level: String,
    /// Backend base URL including the /api prefix
    #[arg(long = "api-url", value_name = "URL", global = true)]
    api_url: Option<String>,
    /// Validate configuration, print it, and exit
    #[arg(long = "dry-run")]
    dry_run: bool,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone)]
enum Command {
    /// Show queued, started, finished and failed tasks
    Status,
    /// Clear task history, then show the refreshed status
    Clear {
        #[arg(value_name = "all|finished|failed")]
        scope: ClearScope,
    },
    /// Enqueue a cell task
    Enqueue {
        #[arg(value_name = "update|reset|create|process")]
        kind: TaskKind,
        name: String,
    },
    /// Enqueue a project update task
    EnqueueProject { name: String },
    /// List projects
    Projects {
        /// Projects found on disk but not yet imported
        #[arg(long)]
        unlisted: bool,
    },
    /// Show one project
    Project { name: String },
    /// List the cells of a project, or search cells by keyword
    Cells {
        #[arg(long, conflicts_with = "search", required_unless_present = "search")]
        project: Option<String>,
        #[arg(long)]
        search: Option<String>,
    },
    /// Show one cell with its latest info and plots
    Cell { name: String },
    /// List the test records of a cell, or search test records by keyword
    Trs {
        #[arg(long, conflicts_with = "search", required_unless_present = "search")]
        cell: Option<String>,
        #[arg(long)]
        search: Option<String>,
    },
    /// Show one test record
    Tr {
        name: String,
        #[arg(long = "type", value_name = "TEST_TYPE")]
        test_type: Option<String>,
    },
    /// Interactive dashboard (default)
    Tui,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let args = Cli::parse();
    let command = args.command.clone().unwrap_or(Command::Tui);
    let interactive = matches!(command, Command::Tui) && !args.dry_run;

    let config_path = args.config_path.clone().or_else(default_config_path);
    let overrides = ConfigOverrides {
        api_base_url: args.api_url.clone(),
    };
    let config = DashboardConfig::load(config_path.as_deref(), &overrides)
        .context("load config")?;

    if args.dry_run {
        init_tracing(&args.log_level, None, None)?;
        info!(
            config_path = ?config_path.as_ref().map(|path| path.display().to_string()),
            "dry-run requested; configuration validated"
        );
        let rendered = serde_yaml::to_string(&config).context("render config")?;
        print!("{rendered}");
        return Ok(ExitCode::SUCCESS);
    }

    let log_buffer = interactive.then(|| LogBuffer::handle(LOG_BUFFER_CAPACITY));
    let (file, _log_guard) = file_writer(&config)?.unzip();
    init_tracing(&args.log_level, log_buffer.clone(), file)?;

    info!(
        api_base_url = %config.api_base_url,
        command = ?command,
        "starting batteryabn-dashboard"
    );

    let executor = build_executor(&config)?;

    match (command, log_buffer) {
        (Command::Tui, Some(log_buffer)) => {
            let shutdown = CancellationToken::new();
            setup_signal_handlers(shutdown.clone());
            tui::run_tui_with_log(config, executor, log_buffer, shutdown)
                .await
                .context("run dashboard")?;
            Ok(ExitCode::SUCCESS)
        }
        (command, _) => run_headless(command, &config, &executor).await,
    }
}

fn default_config_path() -> Option<PathBuf> {
    let path = dirs::config_dir()?.join("batteryabn").join("dashboard.yaml");
    path.exists().then_some(path)
}

fn build_executor(config: &DashboardConfig) -> Result<Executor> {
    let client = BatteryClient::with_config(config.client_config()).context("build client")?;
    let blobs = match &config.blob_dir {
        Some(dir) => BlobStore::new(dir),
        None => BlobStore::in_temp_dir(),
    }
    .context("prepare blob directory")?;
    debug!(blob_dir = %blobs.dir().display(), "blob store ready");
    Ok(Executor::new(client, blobs))
}

/// Build the screen for a headless command together with the requests that start it
fn headless_screen(command: Command, config: &DashboardConfig) -> (View, Vec<Request>) {
    let routed = |route: Route| {
        let mut view = View::for_route(&route, config.image_count);
        let requests = view.on_mount();
        (view, requests)
    };

    match command {
        Command::Status | Command::Tui => routed(Route::TaskStatus),
        Command::Clear { scope } => {
            let mut view = TaskStatusView::new();
            let requests = view.clear(scope);
            (View::TaskStatus(view), requests)
        }
        Command::Enqueue { kind, name } => {
            let mut view = TaskTriggerView::with_target(name);
            let requests = view.submit(kind);
            (View::TaskTrigger(view), requests)
        }
        Command::EnqueueProject { name } => {
            let mut view = TaskTriggerView::with_target(name);
            let requests = view.submit_project_update();
            (View::TaskTrigger(view), requests)
        }
        Command::Projects { unlisted: false } => routed(Route::Projects),
        Command::Projects { unlisted: true } => routed(Route::UnlistedProjects),
        Command::Project { name } => routed(Route::Project(name)),
        Command::Cells { search: Some(keyword), .. } => {
            let mut view = CellSearchView::with_keyword(keyword);
            let requests = view.on_mount();
            (View::CellSearch(view), requests)
        }
        Command::Cells { project, .. } => routed(Route::Cells(project.unwrap_or_default())),
        Command::Cell { name } => routed(Route::Cell(name)),
        Command::Trs { search: Some(keyword), .. } => {
            let mut view = TestRecordSearchView::with_keyword(keyword);
            let requests = view.on_mount();
            (View::TestRecordSearch(view), requests)
        }
        Command::Trs { cell, .. } => routed(Route::TestRecords(cell.unwrap_or_default())),
        Command::Tr { name, test_type } => routed(Route::TestRecord { name, test_type }),
    }
}

async fn run_headless(
    command: Command,
    config: &DashboardConfig,
    executor: &Executor,
) -> Result<ExitCode> {
    let (mut view, requests) = headless_screen(command, config);
    drive(&mut view, executor, requests).await;

    let mut lines = view.render_lines();
    if lines.iter().all(|line| line.is_empty()) {
        lines = vec!["No results".to_string()];
    }
    for line in lines {
        println!("{line}");
    }

    if view.is_failed() {
        warn!(route = %view.route(), "command finished with an error");
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

/// Console logs go to stderr, or into the log panel while the dashboard owns the
/// terminal; `file` adds a plain-text copy
fn init_tracing(
    log_level: &str,
    log_buffer: Option<LogBufferHandle>,
    file: Option<NonBlocking>,
) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .context("invalid log level")?;

    let console = log_buffer
        .is_none()
        .then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr));
    let panel = log_buffer.map(|buffer| {
        tracing_subscriber::fmt::layer()
            .with_ansi(false)
            .with_target(false)
            .with_writer(LogWriterFactory::new(buffer))
    });
    let file = file.map(|writer| {
        tracing_subscriber::fmt::layer()
            .with_ansi(false)
            .with_writer(writer)
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(console)
        .with(panel)
        .with(file)
        .try_init()
        .map_err(|err| anyhow!(err))
        .context("initialize tracing subscriber")
}

/// Daily rolling file under `log_dir`; the guard flushes it on drop
fn file_writer(config: &DashboardConfig) -> Result<Option<(NonBlocking, WorkerGuard)>> {
    let Some(dir) = config.log_dir.as_deref() else {
        return Ok(None);
    };
    std::fs::create_dir_all(dir)
        .with_context(|| format!("create log directory {}", dir.display()))?;
    let appender = tracing_appender::rolling::daily(dir, "batteryabn-dashboard.log");
    Ok(Some(tracing_appender::non_blocking(appender)))
}

fn setup_signal_handlers(shutdown: CancellationToken) {
    let shutdown_clone = shutdown.clone();
    tokio::spawn(async move {
        if let Err(err) = tokio::signal::ctrl_c().await {
            warn!(error = %err, "failed to install SIGINT handler");
            return;
        }
        info!("received SIGINT");
        shutdown_clone.cancel();
    });

    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        let shutdown_clone = shutdown.clone();
        tokio::spawn(async move {
            match signal(SignalKind::terminate()) {
                Ok(mut stream) => {
                    stream.recv().await;
                    info!("received SIGTERM");
                    shutdown_clone.cancel();
                }
                Err(err) => {
                    warn!(error = %err, "failed to install SIGTERM handler");
                }
            }
        });
    }
}
