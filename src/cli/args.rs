use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "meetnote")]
#[command(about = "Record meetings, transcribe them, and summarize", long_about = None)]
pub struct Cli {
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<CliCommand>,
}

#[derive(Subcommand, Debug)]
pub enum CliCommand {
    /// Record a meeting interactively, then transcribe and summarize it
    Record(RecordCliArgs),
    /// Show the config file path and effective configuration
    Config,
    /// Print version information
    Version,
}

#[derive(ClapArgs, Debug)]
pub struct RecordCliArgs {
    /// Directory to write the recording, transcript, and summary to
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,
}
