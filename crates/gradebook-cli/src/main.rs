//! gradebook CLI — the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "gradebook", version, about = "Academic records manager")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Register a new student
    AddStudent {
        /// Student identifier (e.g. "S001")
        #[arg(long)]
        id: String,

        /// Full name
        #[arg(long)]
        name: String,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Register a new course
    AddCourse {
        /// Course code (e.g. "CS101")
        #[arg(long)]
        code: String,

        /// Course name
        #[arg(long)]
        name: String,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Enroll a student in a course
    Enroll {
        /// Student identifier
        #[arg(long)]
        student: String,

        /// Course code
        #[arg(long)]
        course: String,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Assign a grade to an enrolled student
    Assign {
        /// Student identifier
        #[arg(long)]
        student: String,

        /// Course code
        #[arg(long)]
        course: String,

        /// Numeric grade in [0, 100]
        #[arg(long)]
        grade: f64,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// List students or courses
    List {
        /// What to list: students, courses
        target: String,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Print or save a student transcript
    Transcript {
        /// Student identifier
        #[arg(long)]
        student: String,

        /// Output format: text, html, json
        #[arg(long, default_value = "text")]
        format: String,

        /// Output directory (defaults to the configured output_dir)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Print or save a course summary
    Summary {
        /// Course code
        #[arg(long)]
        course: String,

        /// Output format: text, html, json
        #[arg(long, default_value = "text")]
        format: String,

        /// Output directory (defaults to the configured output_dir)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Export the current records as a JSON snapshot
    Export {
        /// Snapshot file to write
        #[arg(long)]
        output: PathBuf,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Validate and summarize a JSON snapshot
    Import {
        /// Snapshot file to read
        #[arg(long)]
        input: PathBuf,
    },

    /// Create a starter config file
    Init,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("gradebook=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::AddStudent { id, name, config } => {
            commands::add::add_student(id, name, config).await
        }
        Commands::AddCourse { code, name, config } => {
            commands::add::add_course(code, name, config).await
        }
        Commands::Enroll {
            student,
            course,
            config,
        } => commands::add::enroll(student, course, config).await,
        Commands::Assign {
            student,
            course,
            grade,
            config,
        } => commands::add::assign(student, course, grade, config).await,
        Commands::List { target, config } => commands::list::execute(target, config).await,
        Commands::Transcript {
            student,
            format,
            output,
            config,
        } => commands::report::transcript(student, format, output, config).await,
        Commands::Summary {
            course,
            format,
            output,
            config,
        } => commands::report::summary(course, format, output, config).await,
        Commands::Export { output, config } => commands::snapshot::export(output, config).await,
        Commands::Import { input } => commands::snapshot::import(input),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
