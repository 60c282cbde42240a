mod client;
mod engine;
mod io;
mod models;
mod report;

use std::io::{stderr, stdin, stdout, Write};
use std::path::Path;
use std::process::exit;
use std::time::Instant;

use anyhow::{anyhow, Result};
use tracing::info;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, Layer};

use crate::client::{Credentials, EnhanceClient};
use crate::engine::EnhancePipeline;

#[tokio::main]
async fn main() -> Result<()> {
    //NOTE: Two optional positional arguments do not justify pulling in the clap crate
    let args: Vec<String> = std::env::args().collect();

    if args.len() > 3 {
        eprintln!("Usage: transaction-enhancer [input].csv [log_level:optional]");
        eprintln!("Available log levels: error, warn, info, debug, trace (default: info)");
        exit(1);
    }

    let log_level = args.get(2)
        .map(|level| parse_log_level(level))
        .unwrap_or(LevelFilter::INFO);

    setup_logging(log_level);

    //NOTE: The credential is checked before anything touches the filesystem or the network
    let credentials = match Credentials::from_env() {
        Ok(credentials) => credentials,
        Err(error) => {
            eprintln!("{error}");
            exit(1);
        }
    };

    let input = match args.get(1) {
        Some(path) => path.clone(),
        None => prompt_for_input_path()?
    };

    let client = EnhanceClient::new(credentials)?;
    let pipeline = EnhancePipeline::new(client);

    let timer = Instant::now();
    let outcome = pipeline.run(Path::new(&input)).await?;
    let duration = timer.elapsed();

    info!("Completed enhancement run in: {duration:?}");

    println!("{}", outcome.summary);
    println!("Enhanced transactions written to {}", outcome.enhanced_path.display());
    println!("Unprocessed transactions written to {}", outcome.unprocessed_path.display());

    Ok(())
}

fn prompt_for_input_path() -> Result<String> {
    print!("Enter the path to the CSV file: ");
    stdout().flush()?;

    let mut line = String::new();
    stdin().read_line(&mut line)?;

    let path = line.trim();

    if path.is_empty() {
        return Err(anyhow!("No input file was provided"));
    }

    Ok(path.to_string())
}

fn parse_log_level(level: &str) -> LevelFilter {
    match level.to_lowercase().as_str() {
        "trace" => LevelFilter::TRACE,
        "debug" => LevelFilter::DEBUG,
        "info" => LevelFilter::INFO,
        "warn" => LevelFilter::WARN,
        "error" => LevelFilter::ERROR,
        _ => {
            eprintln!("Invalid log level '{}', defaulting to 'info'", level);
            LevelFilter::INFO
        }
    }
}

fn setup_logging(level: LevelFilter) {
    //NOTE: The summary block owns stdout, so logging rides on stderr to keep the two streams separable
    let terminal_log = fmt::layer()
        .with_target(false)
        .with_writer(stderr)
        .with_filter(level);

    tracing_subscriber::registry()
        .with(terminal_log)
        .init();
}
