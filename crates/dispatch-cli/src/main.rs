//! `dispatchd` – robot dispatch service.
//!
//! 1. Initialises logging (and OTLP export when configured).
//! 2. Loads `~/.dispatch/config.toml` plus `DISPATCH_*` overrides.
//! 3. Builds the robot source (remote listing or built-in fixture).
//! 4. Serves `POST /v1/move` until Ctrl-C.

mod config;

use std::process::ExitCode;
use std::sync::Arc;

use colored::Colorize;
use tracing::{error, info};

use dispatch_runtime::{Dispatcher, init_tracing};
use dispatch_server::{DispatchServer, MOVE_PATH, MoveHandler};
use dispatch_source::{HttpRobotSource, RobotSource, StaticRobotSource};

use config::{Config, SourceKind};

fn main() -> ExitCode {
    // Tracing must be up before the runtime exists; see telemetry::build_provider.
    let _guard = init_tracing("dispatchd");

    print_banner();

    let cfg = match config::load() {
        Ok(cfg) => cfg,
        Err(e) => {
            println!("{}: {}", "Config error".red(), e);
            error!(error = %e, path = %config::config_path().display(), "invalid configuration");
            return ExitCode::FAILURE;
        }
    };
    print_config(&cfg);

    let source = match build_source(&cfg) {
        Ok(source) => source,
        Err(e) => {
            error!(error = %e, source = %cfg.source, "failed to build robot source");
            return ExitCode::FAILURE;
        }
    };

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            error!(error = %e, "failed to start Tokio runtime");
            return ExitCode::FAILURE;
        }
    };

    runtime.block_on(serve(cfg, source))
}

async fn serve(cfg: Config, source: Arc<dyn RobotSource>) -> ExitCode {
    let handler = MoveHandler::new(Dispatcher::new(source))
        .with_default_within_distance(cfg.within_distance);
    let server = DispatchServer::new(handler).with_port(cfg.port);

    let listener = match server.bind().await {
        Ok(l) => l,
        Err(e) => {
            error!(error = %e, "cannot start dispatch server");
            return ExitCode::FAILURE;
        }
    };
    println!(
        "  Listening on {}\n",
        format!("http://localhost:{}{}", cfg.port, MOVE_PATH).bold()
    );

    match server.serve_with_shutdown(listener, shutdown_signal()).await {
        Ok(()) => {
            info!("dispatch server stopped");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "dispatch server failed");
            ExitCode::FAILURE
        }
    }
}

/// Resolves on Ctrl-C.  If the handler cannot be installed the server keeps
/// running and must be stopped externally.
async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => {
            println!();
            println!("{}", "  Ctrl-C received – shutting down.".yellow().bold());
            info!("shutdown requested");
        }
        Err(e) => {
            error!(error = %e, "failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    }
}

fn build_source(cfg: &Config) -> Result<Arc<dyn RobotSource>, String> {
    match cfg.source {
        SourceKind::Http => HttpRobotSource::new(cfg.robots_url.clone(), cfg.fetch_timeout())
            .map(|s| Arc::new(s) as Arc<dyn RobotSource>)
            .map_err(|e| e.to_string()),
        SourceKind::Fixture => StaticRobotSource::builtin()
            .map(|s| Arc::new(s) as Arc<dyn RobotSource>)
            .map_err(|e| e.to_string()),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Console output
// ─────────────────────────────────────────────────────────────────────────────

fn print_banner() {
    println!();
    println!(
        "  {} {}",
        "dispatchd".bold().cyan(),
        format!("v{}", env!("CARGO_PKG_VERSION")).dimmed()
    );
    println!("  Robot dispatch service");
    println!();
}

fn print_config(cfg: &Config) {
    let source = match cfg.source {
        SourceKind::Http => cfg.robots_url.clone(),
        SourceKind::Fixture => "built-in fixture (100 robots)".to_string(),
    };
    println!("  Robot source:    {}", source.dimmed());
    println!("  Default range:   {}", cfg.within_distance.to_string().bold());
    println!("  Fetch timeout:   {}s", cfg.fetch_timeout_secs);
}
