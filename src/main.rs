use std::process::ExitCode;

use ext_sorter::cli::{exit_code, parse_args_from, run};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Load environment
    dotenvy::dotenv().ok();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
    tracing::info!("CLI application startup: tracing initialised, environment loaded");

    let cli = match parse_args_from(std::env::args_os()) {
        Ok(cli) => cli,
        Err(code) => return code,
    };
    tracing::info!("CLI arguments parsed, invoking run");
    let result = run(cli).await;
    match &result {
        Ok(report) if report.is_complete() => tracing::info!("CLI completed successfully"),
        Ok(report) => tracing::warn!(failed = report.failed.len(), "CLI completed with failed files"),
        Err(e) => tracing::error!(error = %e, "CLI exited with error"),
    }
    exit_code(&result)
}
