use std::path::PathBuf;

use clap::Parser;

use super::logging::LogDestination;

/// Fetch the country list and print it.
#[derive(Debug, Parser)]
#[command(name = "countries", version)]
pub struct Args {
    /// RON config file; missing fields keep their defaults.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override the countries document URL.
    #[arg(long)]
    pub url: Option<String>,

    /// Rows per page; 0 prints every row.
    #[arg(long)]
    pub page_size: Option<usize>,

    /// Index of the first row to show once the list arrives.
    #[arg(long, default_value_t = 0)]
    pub scroll: usize,

    /// Where log output goes.
    #[arg(long, value_enum, default_value_t = LogDestination::File)]
    pub log: LogDestination,

    /// Keep running and read commands from stdin (n, p, g <row>, r, q).
    #[arg(short, long)]
    pub interactive: bool,
}
