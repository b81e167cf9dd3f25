use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "donaform",
    about = "Donaform: validate, edit and submit donation forms",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a blank form (the initial values) to a JSON file
    Init {
        /// Destination path for the values file
        path: String,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Validate a form values file and report errors per field path
    Validate {
        /// Path to form values JSON
        values: String,

        /// Optional TOML file overriding rule limits
        #[arg(long)]
        config: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Submit a form values file through the logging submitter
    Submit {
        /// Path to form values JSON
        values: String,

        /// Optional TOML file overriding rule limits and submit delay
        #[arg(long)]
        config: Option<String>,

        /// Override the simulated submit delay in milliseconds
        #[arg(long)]
        delay_ms: Option<u64>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Replay a JSONL stream of form events and print the final form view
    Replay {
        /// Path to events JSONL (one event object per line)
        events: String,

        /// Starting values (defaults to the blank form)
        #[arg(long)]
        values: Option<String>,

        /// Optional TOML file overriding rule limits and submit delay
        #[arg(long)]
        config: Option<String>,

        /// Override the simulated submit delay in milliseconds
        #[arg(long)]
        delay_ms: Option<u64>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}
