use clap::{Parser, Subcommand};
use corkhouse_core::Contributor;

mod commands;
mod logging;

#[derive(Parser)]
#[command(name = "corkhouse", version, about = "Corkhouse CLI")]
struct Cli {
    /// Who is collecting (Markus or Diana)
    #[arg(long = "as", global = true, env = "CORKHOUSE_USER")]
    contributor: Option<Contributor>,

    /// Verbose logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add collected corks for the active contributor
    Add {
        /// Number of corks
        #[arg(allow_negative_numbers = true)]
        count: i64,
    },
    /// Progress, scores and the completion estimate
    Status {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Every recorded cork in order
    Log {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Draw the birdhouse
    House,
    /// Wipe all progress (admin only)
    Reset {
        /// Confirm the reset
        #[arg(long)]
        yes: bool,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn main() {
    let cli = Cli::parse();
    logging::init_cli_logger(cli.verbose);

    let who = cli.contributor;
    let result = match cli.command {
        Commands::Add { count } => commands::add::run(who, count),
        Commands::Status { json } => commands::status::run(who, json),
        Commands::Log { json } => commands::log::run(json),
        Commands::House => commands::house::run(),
        Commands::Reset { yes } => commands::reset::run(who, yes),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
