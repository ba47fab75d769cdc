use crate::utils::constants::DEFAULT_OUTPUT_FILE;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "refuge-fetch")]
#[command(about = "Download and clean Refuge Restrooms location data")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Log file path")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Download every restroom page and save the table
    Fetch {
        #[arg(short, long, help = "Settings file (TOML, JSON or YAML)")]
        config: Option<PathBuf>,

        #[arg(long, help = "Listing endpoint [default: Refuge Restrooms API]")]
        base_url: Option<String>,

        #[arg(short, long, help = "Output CSV path [default: refuge_data.csv]")]
        output_file: Option<PathBuf>,

        #[arg(long, help = "Records per page [default: 100]")]
        per_page: Option<u32>,

        #[arg(long, default_value = "false", help = "Clean the table after saving")]
        clean: bool,
    },

    /// Drop rows without usable coordinates, rewriting the table in place
    Clean {
        #[arg(short, long, default_value = DEFAULT_OUTPUT_FILE)]
        file: PathBuf,
    },

    /// Display statistics about a saved table
    Info {
        #[arg(short, long, default_value = DEFAULT_OUTPUT_FILE)]
        file: PathBuf,

        #[arg(short, long, default_value = "5")]
        sample: usize,
    },
}
