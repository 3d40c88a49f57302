use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "hw-collect")]
#[command(about = "Collect homework submissions and report who is missing", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Copy every submission into one folder and write the report (default)
    Collect(CollectArgs),
    /// Load the roster and list the expected folder names
    CheckRoster(RosterArgs),
    /// Print configuration values
    PrintConfig,
}

#[derive(Debug, Default, Args)]
pub struct CollectArgs {
    /// Destination folder name; prompted for when omitted
    #[arg(short, long)]
    pub dest: Option<String>,

    /// Submission folder; auto-detected in the current directory when omitted
    #[arg(short, long)]
    pub source: Option<PathBuf>,

    #[command(flatten)]
    pub roster: RosterArgs,

    /// Do not ask before writing into an existing destination
    #[arg(short, long)]
    pub yes: bool,
}

#[derive(Debug, Default, Args)]
pub struct RosterArgs {
    /// Roster CSV file; overrides the configured `roster_path`
    #[arg(short, long)]
    pub roster: Option<PathBuf>,
}
