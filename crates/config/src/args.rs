use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to .env file (e.g., .env.testnet)
    #[arg(short, long, default_value = ".env")]
    pub env_file: String,

    /// Path to the trace JSON file produced by the sandbox
    #[arg(short, long)]
    pub trace: PathBuf,

    /// Path to the contract registry JSON file (ABI types and error codes)
    #[arg(short, long)]
    pub registry: Option<PathBuf>,

    /// Path to the address -> friendly name JSON file
    #[arg(short, long)]
    pub names: Option<PathBuf>,

    /// Write the diagram to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Render full addresses instead of abbreviated ones
    #[arg(long)]
    pub full_addresses: bool,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
