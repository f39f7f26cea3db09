use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use threadline::cli::{self, RunOptions};
use threadline::config::ThreadlineConfig;
use threadline::telemetry;

#[derive(Parser)]
#[command(author, version, about = "Shape saved feed and thread responses into renderable pages")]
struct Args {
    /// Pretty-print the output JSON
    #[arg(long, global = true)]
    pretty: bool,
    /// Hide slices involving this author DID (repeatable)
    #[arg(long = "mute-author", global = true)]
    mute_authors: Vec<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Group a timeline response into reply-chain slices
    Timeline {
        /// Response JSON file, or `-` for stdin
        input: PathBuf,
    },
    /// Flatten a thread response into ancestors and reply slices
    Thread {
        /// Response JSON file, or `-` for stdin
        input: PathBuf,
        /// Print the flat descendant list instead of slices
        #[arg(long)]
        flat: bool,
    },
}

fn main() -> Result<()> {
    telemetry::init_tracing();
    let args = Args::parse();

    let mut config = ThreadlineConfig::from_env();
    config.output.pretty |= args.pretty;
    config.moderation.muted_authors.extend(args.mute_authors);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match args.command {
        Command::Timeline { input } => cli::run_timeline(&config, &input, &mut out),
        Command::Thread { input, flat } => {
            cli::run_thread(&config, &input, RunOptions { flat }, &mut out)
        }
    }
}
