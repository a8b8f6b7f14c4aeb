use clap::Parser;
use std::path::{Path, PathBuf};

/// Trait for reading configuration parameters
pub trait Config {
    fn input_path(&self) -> &Path;
    fn output_dir(&self) -> &Path;
    fn dashboard_path(&self) -> &Path;
}

/// CLI configuration
#[derive(Parser, Debug)]
#[command(
    name = "market-report",
    about = "Generates a Counter-Strike 2 trading report from a Steam market history CSV export",
    version
)]
pub struct CliConfig {
    /// Path to the market history CSV export
    #[arg(long, value_name = "FILE", default_value = "input/market_history.csv")]
    input: PathBuf,

    /// Directory the JSON artifacts are written to
    #[arg(long, value_name = "DIR", default_value = "output")]
    output_dir: PathBuf,

    /// Where the dashboard page is written
    #[arg(long, value_name = "FILE", default_value = "index.html")]
    dashboard: PathBuf,
}

impl Config for CliConfig {
    fn input_path(&self) -> &Path {
        &self.input
    }

    fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    fn dashboard_path(&self) -> &Path {
        &self.dashboard
    }
}
