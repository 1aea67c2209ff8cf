//! permis CLI: practise the oral questions of the French driving test.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};

mod commands;
mod feedback;

#[derive(Parser)]
#[command(
    name = "permis",
    version,
    about = "Score free-text answers to driving-test questions"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Score one answer
    Score {
        /// Question ID
        #[arg(long)]
        id: String,

        /// The answer to score
        #[arg(long)]
        answer: String,

        /// Question bank JSON file
        #[arg(long)]
        questions: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,

        /// Score locally without consulting the oracle
        #[arg(long)]
        offline: bool,

        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Interactive quiz on stdin
    Quiz {
        /// Question bank JSON file
        #[arg(long)]
        questions: Option<PathBuf>,

        /// Start with this category ("all" for every question)
        #[arg(long)]
        category: Option<String>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,

        /// Score locally without consulting the oracle
        #[arg(long)]
        offline: bool,
    },

    /// List questions in the bank
    List {
        /// Question bank JSON file
        #[arg(long)]
        questions: Option<PathBuf>,

        /// Only show this category
        #[arg(long)]
        category: Option<String>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Check a question bank for common mistakes
    Validate {
        /// Question bank JSON file
        #[arg(long)]
        questions: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Create a starter config and question bank
    Init,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("permis=info".parse().expect("static directive")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Score {
            id,
            answer,
            questions,
            config,
            offline,
            format,
        } => commands::score::execute(id, answer, questions, config, offline, format).await,
        Commands::Quiz {
            questions,
            category,
            config,
            offline,
        } => commands::quiz::execute(questions, category, config, offline).await,
        Commands::List {
            questions,
            category,
            config,
        } => commands::list::execute(questions, category, config),
        Commands::Validate { questions, config } => commands::validate::execute(questions, config),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
