//! Command-line interface.

use clap::{Parser, Subcommand};

/// Sketcharr - sketch-show archive scraper
/// Builds a relational dataset of episodes, performers and sketches
#[derive(Parser)]
#[command(name = "sketcharr")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create default config file
    Init,

    /// Crawl the archive into the database
    Crawl {
        /// Restrict the crawl to specific title ids (repeatable)
        #[arg(long = "target", value_name = "TID")]
        targets: Vec<String>,

        /// Also collect per-episode ratings from the ratings site
        #[arg(long)]
        ratings: bool,
    },

    /// Crawl cast-member pages into season-membership records
    Cast,

    /// Compute derived columns and rebuild the tenure table
    Enrich {
        /// Also compute per-segment airtime shares
        #[arg(long)]
        airtime: bool,
    },

    /// Export every table as JSON lines
    Export {
        /// Output directory
        #[arg(long, default_value = "output")]
        dir: String,
    },

    /// Show row counts per table
    Status,
}
