use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Trackgate — proxy gateway for the Delivery Tracker parcel API
#[derive(Parser)]
#[command(name = "trackgate", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the gateway server
    Serve {
        /// Port to bind (overrides TRACKGATE_PORT)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Run tracking lookups for a CSV file and print the settled results
    Batch {
        /// CSV file: a header line, then `carrierNameOrId,trackingNumber` rows
        file: PathBuf,
    },
}
