use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "charity-scan")]
#[command(about = "Scan a charity website and produce a compliance report")]
#[command(version)]
pub struct Args {
    /// Website to scan (scheme optional, https:// is assumed)
    pub url: String,

    /// JSON configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Per-request timeout in seconds
    #[arg(short, long)]
    pub timeout: Option<u64>,

    /// Total timeout for the scan in seconds
    #[arg(long)]
    pub scan_timeout: Option<u64>,

    /// Skip AI enhancement even when an API key is configured
    #[arg(long)]
    pub no_enhance: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Text,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["charity-scan", "example.org"]);
        assert_eq!(args.url, "example.org");
        assert_eq!(args.format, OutputFormat::Json);
        assert!(!args.no_enhance);
        assert!(!args.pretty);
        assert!(args.config.is_none());
    }

    #[test]
    fn test_all_flags() {
        let args = Args::parse_from([
            "charity-scan",
            "--config",
            "scan.json",
            "--timeout",
            "5",
            "--scan-timeout",
            "60",
            "--no-enhance",
            "--format",
            "text",
            "https://x.org",
        ]);
        assert_eq!(args.config, Some(PathBuf::from("scan.json")));
        assert_eq!(args.timeout, Some(5));
        assert_eq!(args.scan_timeout, Some(60));
        assert!(args.no_enhance);
        assert_eq!(args.format, OutputFormat::Text);
    }

    #[test]
    fn test_url_is_required() {
        assert!(Args::try_parse_from(["charity-scan"]).is_err());
    }
}
