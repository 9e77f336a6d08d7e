//! Command-line interface definition for Namunamu
//!
//! This module defines the CLI structure using clap's derive API,
//! providing the serve command and global configuration flags.

use clap::{Parser, Subcommand};

/// Namunamu - meal-planning and nutrition web service
///
/// Serves the generation, analysis, and email endpoints backed by a
/// streaming text-generation upstream.
#[derive(Parser, Debug, Clone)]
#[command(name = "namunamu")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/config.yaml")]
    pub config: String,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands for Namunamu
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Start the HTTP server
    Serve {
        /// Override the bind address from config
        #[arg(long)]
        host: Option<String>,

        /// Override the bind port from config
        #[arg(short, long)]
        port: Option<u16>,
    },
}

impl Cli {
    /// Parse command line arguments
    ///
    /// # Returns
    ///
    /// Returns the parsed CLI structure
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
