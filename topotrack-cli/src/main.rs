use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;
mod gpx_file;

/// GPS track analysis and SRTM elevation CLI tool
#[derive(Parser)]
#[command(name = "topotrack")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory containing .hgt / .hgt.zip elevation tiles
    #[arg(short, long, env = "TOPOTRACK_DATA_DIR", global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Query elevation for a single coordinate
    Query {
        /// Latitude in decimal degrees
        #[arg(long)]
        lat: f64,

        /// Longitude in decimal degrees
        #[arg(long)]
        lon: f64,

        /// Output result as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Summarize a track file: points, distance, ascent
    Track {
        /// Input GPX file
        input: PathBuf,

        /// Output result as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Write a per-point elevation profile (CSV) for a track file
    Profile {
        /// Input GPX file
        input: PathBuf,

        /// Output CSV file (defaults to <input>_profile.csv)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Write a downsampled copy of a track file
    Thin {
        /// Input GPX file
        input: PathBuf,

        /// Output GPX file (defaults to <input>_thin.gpx)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Keep at most roughly this many points
        #[arg(long, default_value = "2000")]
        max_points: usize,
    },

    /// List available elevation tiles
    List,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Query { lat, lon, json } => commands::query::run(cli.data_dir, lat, lon, json),
        Commands::Track { input, json } => commands::track::run(input, json),
        Commands::Profile { input, output } => commands::profile::run(cli.data_dir, input, output),
        Commands::Thin {
            input,
            output,
            max_points,
        } => commands::thin::run(input, output, max_points),
        Commands::List => commands::list::run(cli.data_dir),
    }
}
