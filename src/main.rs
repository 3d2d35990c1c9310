use axum::Server;
use clap::{Parser, Subcommand};
use std::net::SocketAddr;
use std::process::ExitCode;
use std::sync::Arc;
use taskforge::{
    AppState, build_app, build_store, config::Config, db::run_blocking, error::AppResult,
    init_tracing, seed::seed_store,
};

#[derive(Parser)]
#[command(name = "taskforge", version, about = "TaskForge project and task API")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP server (default)
    Serve {
        /// Load the sample dataset before serving if the store is empty
        #[arg(long)]
        seed: bool,
    },
    /// Load the sample dataset and exit
    Seed,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };
    init_tracing(&config);

    let result = match cli.command.unwrap_or(Command::Serve { seed: false }) {
        Command::Serve { seed } => serve(config, seed).await,
        Command::Seed => seed_only(config).await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Fatal error");
            ExitCode::FAILURE
        }
    }
}

async fn seed_only(config: Config) -> AppResult<()> {
    let cost = config.bcrypt_cost;
    let store = run_blocking(move || build_store(&config)).await?;
    run_blocking(move || seed_store(store.as_ref(), cost)).await?;
    Ok(())
}

async fn serve(config: Config, seed: bool) -> AppResult<()> {
    let addr: SocketAddr = config.server_address().parse().map_err(|e| {
        taskforge::error::AppError::Config(format!("Invalid server address: {}", e))
    })?;

    let store = {
        let config = config.clone();
        run_blocking(move || build_store(&config)).await?
    };

    if seed {
        let store = store.clone();
        let cost = config.bcrypt_cost;
        run_blocking(move || seed_store(store.as_ref(), cost)).await?;
    }

    let state = Arc::new(AppState::new(store, config));
    let app = build_app(state);

    tracing::info!(address = %addr, "Server running");
    Server::bind(&addr)
        .serve(app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| taskforge::error::AppError::internal(format!("Server error: {}", e)))?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
}
