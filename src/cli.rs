use clap::{ArgGroup, Parser};
use std::path::PathBuf;

#[derive(clap::Parser, Debug)]
#[command(author, version, about = "Check email addresses against known breaches and pastes", long_about = None)]
#[command(group(ArgGroup::new("target").required(true).args(["single", "list"])))]
pub struct Cli {
    /// Check a single email address
    #[arg(short = 's', long, value_name = "EMAIL")]
    pub single: Option<String>,

    /// Check every address in a newline-delimited file
    #[arg(short = 'l', long, value_name = "FILE")]
    pub list: Option<PathBuf>,

    /// Re-query affected addresses for full breach details and print them as JSON
    #[arg(short = 'd', long, default_value_t = false)]
    pub details: bool,

    /// Print the final report as JSON
    #[arg(long, default_value_t = false)]
    pub json: bool,

    /// Skip paste lookups
    #[arg(long, default_value_t = false)]
    pub no_pastes: bool,

    /// API key sent with every request (also read from HIBP_API_KEY)
    #[arg(long)]
    pub api_key: Option<String>,

    /// Base URL of the breach service
    #[arg(long, value_name = "URL")]
    pub api_base: Option<String>,

    /// Pause between addresses in milliseconds (default: 1500)
    #[arg(long, value_name = "MS")]
    pub spacing_ms: Option<u64>,

    /// Give up after this many throttled retries of one lookup (default: never)
    #[arg(long, value_name = "N")]
    pub max_retries: Option<u32>,

    /// Request timeout in seconds (default: 10)
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// JSON configuration file
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable detailed debug logging
    #[arg(long, default_value_t = false)]
    pub debug: bool,

    /// Enable verbose logging
    #[arg(long, default_value_t = false)]
    pub verbose: bool,
}

pub fn parse_cli() -> Cli {
    Cli::parse()
}
