use anyhow::Context;
use chrono::Utc;
use clap::Parser;
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use payment_distribution::modules::payments::use_cases::sweep_overdue::command::SweepOverdue;
use payment_distribution::shell::config::{Cli, Command, load_users};
use payment_distribution::shell::http::router;
use payment_distribution::shell::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    match dotenvy::dotenv() {
        Err(err) if !err.not_found() => eprintln!("ignoring unreadable .env file: {err}"),
        _ => {}
    }
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("payment_distribution=info,tower_http=info")),
        )
        .init();

    let cli = Cli::parse();
    let config = cli.config;
    let ports = config.build_ports().await.context("failed to set up storage")?;

    if let Some(path) = &config.users_file {
        let users = load_users(path)?;
        let count = users.len();
        for user in users {
            ports.users.upsert(user).await.context("failed to seed users")?;
        }
        info!(count, path = %path.display(), "users seeded");
    }

    let state = AppState::new(ports, config.settings());

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => {
            let app = router(state, config.max_upload_bytes);
            let listener = tokio::net::TcpListener::bind(config.bind_addr)
                .await
                .with_context(|| format!("failed to bind {}", config.bind_addr))?;
            info!("REST API on http://{}", config.bind_addr);
            info!("GraphQL endpoint: http://{}/gql", config.bind_addr);
            axum::serve(listener, app)
                .with_graceful_shutdown(shutdown_signal())
                .await
                .context("server error")?;
            info!("server shut down");
        }
        Command::SweepOverdue { today } => {
            let command = SweepOverdue {
                today: today.unwrap_or_else(|| Utc::now().date_naive()),
            };
            let report = state.sweep_handler.handle(command).await?;
            if report.is_empty() {
                info!(payment_date = %report.payment_date, "no incomplete tasks found");
            } else {
                info!(
                    payment_date = %report.payment_date,
                    incomplete = report.total_incomplete_records,
                    notified = report.distributors_notified,
                    "reminders sent"
                );
            }
        }
    }
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            error!(error = %err, "cannot listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                warn!(error = %err, "cannot listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("shutdown signal received");
}
