use charity_scan::report::render;
use charity_scan::{ScanConfig, Scanner};
use clap::Parser;
use std::process::ExitCode;

mod args;
use args::{Args, OutputFormat};

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging
    env_logger::init();

    // Parse command-line arguments
    let args = Args::parse();

    let config = match load_config(&args) {
        Ok(config) => config,
        Err(e) => {
            ::log::error!("Failed to load configuration: {}", e);
            eprintln!("Failed to load configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let mut scanner = match Scanner::new(&config) {
        Ok(scanner) => scanner,
        Err(e) => {
            eprintln!("Failed to start scanner: {}", e);
            return ExitCode::FAILURE;
        }
    };
    if args.no_enhance {
        scanner = scanner.without_enhancer();
    }

    let start_time = std::time::Instant::now();
    let report = match scanner.scan(&args.url).await {
        Ok(report) => report,
        Err(e) => {
            eprintln!("Failed to scan website {}: {}", args.url, e);
            return ExitCode::FAILURE;
        }
    };
    ::log::info!(
        "Scan complete in {:.2} seconds",
        start_time.elapsed().as_secs_f64()
    );

    let output = match args.format {
        OutputFormat::Text => Ok(render::to_text(&report)),
        OutputFormat::Json if args.pretty => serde_json::to_string_pretty(&report),
        OutputFormat::Json => serde_json::to_string(&report),
    };

    match output {
        Ok(output) => {
            println!("{}", output.trim_end());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Failed to serialize report: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// File configuration, then environment, then command-line flags
fn load_config(args: &Args) -> Result<ScanConfig, Box<dyn std::error::Error>> {
    let mut config = match &args.config {
        Some(path) => ScanConfig::from_file(path)?,
        None => ScanConfig::default(),
    }
    .with_env_overrides();

    if let Some(timeout) = args.timeout {
        config.request_timeout_secs = timeout;
    }
    if let Some(scan_timeout) = args.scan_timeout {
        config.scan_timeout_secs = Some(scan_timeout);
    }

    Ok(config)
}
