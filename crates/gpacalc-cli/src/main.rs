//! gpacalc CLI - the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "gpacalc", version, about = "Semester GPA and CGPA calculator")]
struct Cli {
    /// Config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Record file (overrides config and GPACALC_DATA_FILE)
    #[arg(long, global = true)]
    data_file: Option<PathBuf>,

    /// Output format: text, json, markdown
    #[arg(long, global = true, default_value = "text")]
    format: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show all semesters, courses, GPA and CGPA
    Show,

    /// Show the grading scale
    Scale,

    /// Add an empty semester
    AddSemester,

    /// Add a course to a semester
    AddCourse {
        /// Semester id or 1-based position
        #[arg(long)]
        semester: String,

        /// Course name
        #[arg(long, allow_hyphen_values = true)]
        name: Option<String>,

        /// Credit weight (negative or non-numeric values count as 0)
        #[arg(long, allow_hyphen_values = true)]
        credit: Option<String>,

        /// Letter grade (e.g. "A-")
        #[arg(long, allow_hyphen_values = true)]
        grade: Option<String>,
    },

    /// Change one field of a course
    UpdateCourse {
        /// Semester id or 1-based position
        #[arg(long)]
        semester: String,

        /// Course id or 1-based position within the semester
        #[arg(long)]
        course: String,

        /// Field to change: name, credit, grade
        #[arg(long)]
        field: String,

        /// New value (an empty grade clears it)
        #[arg(long, allow_hyphen_values = true)]
        value: String,
    },

    /// Remove a course
    DeleteCourse {
        /// Semester id or 1-based position
        #[arg(long)]
        semester: String,

        /// Course id or 1-based position within the semester
        #[arg(long)]
        course: String,
    },

    /// Remove a semester (the last one is always kept)
    DeleteSemester {
        /// Semester id or 1-based position
        #[arg(long)]
        semester: String,
    },

    /// Erase every semester and start over
    Clear {
        /// Confirm erasing all data
        #[arg(long)]
        yes: bool,
    },

    /// Write a transcript (markdown, or json with --format json)
    Export {
        /// Output file (default: ./transcript-<timestamp>.<ext>)
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Create a starter config file
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let ctx = commands::Context {
        config_path: cli.config,
        data_file: cli.data_file,
        format: cli.format,
    };

    let result = match cli.command {
        Commands::Show => commands::show::execute(&ctx),
        Commands::Scale => commands::show::scale(&ctx),
        Commands::AddSemester => commands::edit::add_semester(&ctx),
        Commands::AddCourse {
            semester,
            name,
            credit,
            grade,
        } => commands::edit::add_course(&ctx, &semester, name, credit, grade),
        Commands::UpdateCourse {
            semester,
            course,
            field,
            value,
        } => commands::edit::update_course(&ctx, &semester, &course, &field, &value),
        Commands::DeleteCourse { semester, course } => {
            commands::edit::delete_course(&ctx, &semester, &course)
        }
        Commands::DeleteSemester { semester } => commands::edit::delete_semester(&ctx, &semester),
        Commands::Clear { yes } => commands::edit::clear(&ctx, yes),
        Commands::Export { output } => commands::export::execute(&ctx, output),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
