//! quizforge CLI — the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(
    name = "quizforge",
    version,
    about = "Question authoring and gradebook toolkit"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check question bank files for incomplete or duplicate questions
    Validate {
        /// Path to a bank .toml file or a directory of them
        #[arg(long)]
        bank: PathBuf,
    },

    /// Count bank questions by difficulty and type
    Stats {
        /// Path to a bank .toml file or a directory of them
        #[arg(long)]
        bank: PathBuf,

        /// Output format: table, json
        #[arg(long, default_value = "table")]
        format: String,
    },

    /// Decode an equation string into its structured form
    Decode {
        /// Question type (e.g. math_equation, fill_in_blank)
        #[arg(long = "type")]
        kind: String,

        /// The encoded equation string
        #[arg(long)]
        equation: String,
    },

    /// Encode a structured form (JSON) into its equation string
    Encode {
        /// Question type (e.g. select_choice, word_problems)
        #[arg(long = "type")]
        kind: String,

        /// The form as JSON
        #[arg(long)]
        json: String,
    },

    /// Compute totals and letter grades for a performance sheet
    Grade {
        /// JSON array of performance rows
        #[arg(long)]
        input: PathBuf,

        /// Write the performance CSV into the configured output_dir
        #[arg(long)]
        export: bool,

        /// Write the performance CSV into this directory (implies --export)
        #[arg(long)]
        export_dir: Option<PathBuf>,

        /// Course title used in file names and the HTML title
        #[arg(long, default_value = "course")]
        course_title: String,

        /// Term, e.g. "Term 1"
        #[arg(long, default_value = "term")]
        term: String,

        /// Academic year, e.g. "2024/2025"
        #[arg(long, default_value = "year")]
        year: String,

        /// Write an HTML gradebook to this file
        #[arg(long)]
        html: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Export a roster (JSON) as a student CSV
    Students {
        /// JSON array of students
        #[arg(long)]
        input: PathBuf,

        /// Directory to write the CSV into [default: output_dir from config]
        #[arg(long)]
        output: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Fetch a course's performance sheet from the course API
    Performance {
        /// Course id
        #[arg(long)]
        course: String,

        /// Term, e.g. "Term 1"
        #[arg(long)]
        term: String,

        /// Academic year, e.g. "2024/2025"
        #[arg(long)]
        year: String,

        /// Also write the performance CSV into the configured output_dir
        #[arg(long)]
        export: bool,

        /// Also write the performance CSV into this directory (implies --export)
        #[arg(long)]
        export_dir: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Send one message to the chat assistant
    Chat {
        /// The message to send
        #[arg(long)]
        message: String,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Create starter config and example question bank
    Init,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("quizforge=info")),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Validate { bank } => commands::validate::execute(bank),
        Commands::Stats { bank, format } => commands::stats::execute(bank, format),
        Commands::Decode { kind, equation } => commands::codec::decode(kind, equation),
        Commands::Encode { kind, json } => commands::codec::encode(kind, json),
        Commands::Grade {
            input,
            export,
            export_dir,
            course_title,
            term,
            year,
            html,
            config,
        } => commands::grade::execute(
            input,
            commands::ExportTarget::new(export, export_dir),
            quizforge_report::CourseTerm::new(course_title, term, year),
            html,
            config,
        ),
        Commands::Students {
            input,
            output,
            config,
        } => commands::students::execute(input, output, config),
        Commands::Performance {
            course,
            term,
            year,
            export,
            export_dir,
            config,
        } => {
            commands::performance::execute(
                course,
                term,
                year,
                commands::ExportTarget::new(export, export_dir),
                config,
            )
            .await
        }
        Commands::Chat { message, config } => commands::chat::execute(message, config).await,
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
