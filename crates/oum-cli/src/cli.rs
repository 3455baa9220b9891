use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "oum",
    about = "OpenUrbanMap: road lines and traffic lights, exported as KMZ or GeoJSON",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Feature store file (defaults to $OUM_DATA_PATH, then data/store.json)
    #[arg(long, global = true)]
    pub data: Option<PathBuf>,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Show the stored document
    Get,
    /// Replace the stored document with a JSON file
    Put(PutArgs),
    /// Export the stored document
    Export(ExportArgs),
    /// Start the HTTP server
    Serve(ServeArgs),
}

#[derive(Args)]
pub struct PutArgs {
    /// JSON file to store, or `-` for standard input
    pub input: String,
}

#[derive(Args)]
pub struct ExportArgs {
    #[command(subcommand)]
    pub kind: ExportKind,
}

#[derive(Subcommand)]
pub enum ExportKind {
    /// KMZ archive; written to a timestamped file unless `-o` is given
    Kmz {
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// GeoJSON FeatureCollection; printed unless `-o` is given
    Geojson {
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Args)]
pub struct ServeArgs {
    /// TOML config file
    #[arg(long, default_value = "oum.toml")]
    pub config: PathBuf,
    /// Override the bind address
    #[arg(long)]
    pub bind: Option<String>,
}
