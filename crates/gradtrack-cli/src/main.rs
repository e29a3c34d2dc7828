//! gradtrack CLI — the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "gradtrack", version, about = "Degree and major progress audit")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate a planned-course list against a major and degree
    Evaluate {
        /// Path to a JSON file of planned courses
        #[arg(long)]
        courses: PathBuf,

        /// Major key to evaluate (e.g. "CS_LS")
        #[arg(long)]
        major: String,

        /// College key; defaults to the college declared by the major
        #[arg(long)]
        college: Option<String>,

        /// Catalog TOML file; defaults to the builtin catalog
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Output format: table, text, markdown, json
        #[arg(long, default_value = "table")]
        format: String,

        /// Also write the JSON report to this path
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Validate a requirement catalog
    Validate {
        /// Catalog TOML file; defaults to the builtin catalog
        #[arg(long)]
        catalog: Option<PathBuf>,
    },

    /// List the majors and degrees a catalog defines
    List {
        /// Catalog TOML file; defaults to the builtin catalog
        #[arg(long)]
        catalog: Option<PathBuf>,
    },

    /// Create a starter planned-courses file
    Init {
        /// Directory to write courses.json into
        #[arg(long, default_value = ".")]
        dir: PathBuf,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("gradtrack=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Evaluate {
            courses,
            major,
            college,
            catalog,
            format,
            output,
        } => commands::evaluate::execute(courses, major, college, catalog, format, output),
        Commands::Validate { catalog } => commands::validate::execute(catalog),
        Commands::List { catalog } => commands::list::execute(catalog),
        Commands::Init { dir } => commands::init::execute(dir),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
