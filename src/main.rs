use anyhow::Result;
use clap::Parser;
use savekeep::cli::Cli;

fn main() -> Result<()> {
    // Set up logging directory
    let log_dir = savekeep::utils::get_log_dir();
    std::fs::create_dir_all(&log_dir)?;

    // Initialize tracing with file logging
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    // Write to file
    let file_appender = tracing_appender::rolling::never(&log_dir, "savekeep.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(non_blocking)
        .with_ansi(false) // Disable ANSI colors in file
        .init();

    let result = Cli::parse().execute();

    // Flush buffered log lines before exit
    drop(guard);

    result
}
