pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::domain::model::SubscriptionPlan;
#[cfg(feature = "cli")]
use clap::{Parser, Subcommand, ValueEnum};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "card-insight")]
#[command(about = "Card science readings derived from a birth date")]
pub struct CliConfig {
    /// Path to TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Birth date of the reader (YYYY-MM-DD)
    #[arg(long, global = true)]
    pub birth_date: Option<String>,

    #[arg(long, global = true, default_value = "free")]
    pub plan: SubscriptionPlan,

    #[arg(long, global = true, default_value = "reader@localhost")]
    pub email: String,

    #[arg(long, global = true)]
    pub name: Option<String>,

    /// Reader's UTC offset for digests (UTC, +08:00, ...)
    #[arg(long, global = true)]
    pub timezone: Option<String>,

    /// Pretend today is this date (YYYY-MM-DD)
    #[arg(long, global = true)]
    pub on: Option<String>,

    /// Override forecast.cycle_count from config
    #[arg(long, global = true)]
    pub cycles: Option<usize>,

    /// Override output.path from config
    #[arg(long, global = true)]
    pub output_path: Option<String>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Life, ruling and soul cards
    Blueprint,
    /// Yearly 52-day cycles
    Cycles {
        #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
    },
    /// Card of the day
    Today,
    /// Compatibility with a partner
    Compatibility {
        /// Partner birth date (YYYY-MM-DD)
        #[arg(long)]
        partner: String,
    },
    /// Blueprint, cycles and today's card together
    Forecast,
    /// Compose the digests due today
    Digest {
        /// Print the digests without queuing them
        #[arg(long)]
        dry_run: bool,

        /// Turn the daily digest on or off for this address
        #[arg(long)]
        daily_enabled: Option<bool>,

        /// Turn the cycle digest on or off for this address
        #[arg(long)]
        cycle_enabled: Option<bool>,
    },
    /// Write forecast.json and cycles.csv to the output path
    Export,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Csv,
}
