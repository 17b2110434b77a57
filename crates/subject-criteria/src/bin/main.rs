//! subject-criteria command-line interface

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use subject_criteria::Dialect;
use subject_criteria::cli::input::{self, CriteriaInput};
use subject_criteria::cli::output::{self, ColorMode, OutputFormat};
use subject_criteria::cli::{compile, fields, init_tracing, select, verify};

/// Screening subject criteria tool
#[derive(Parser)]
#[command(name = "subject-criteria")]
#[command(author, version, about = "Verify screening subjects against human-readable criteria", long_about = None)]
struct Cli {
    /// Engine configuration file (TOML)
    #[arg(long, global = true, env = "SUBJECT_CRITERIA_CONFIG")]
    config: Option<PathBuf>,

    /// SQL dialect (sqlite, oracle)
    #[arg(long, global = true, env = "SUBJECT_CRITERIA_DIALECT")]
    dialect: Option<Dialect>,

    /// Pin the calendar date used for Today and ages (YYYY-MM-DD)
    #[arg(long, global = true)]
    today: Option<NaiveDate>,

    /// Verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Pretty, global = true)]
    format: OutputFormat,

    /// Color output
    #[arg(long, value_enum, default_value_t = ColorMode::Auto, global = true)]
    color: ColorMode,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct CriteriaArgs {
    /// JSON file with a field -> expected object
    #[arg(short = 'c', long = "criteria", value_name = "FILE")]
    file: Option<PathBuf>,

    /// A single criterion, applied after the file
    #[arg(short, long = "set", value_name = "FIELD=VALUE")]
    set: Vec<String>,
}

impl From<CriteriaArgs> for CriteriaInput {
    fn from(args: CriteriaArgs) -> Self {
        Self {
            file: args.file,
            assignments: args.set,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Verify a subject against criteria; exits 1 when it does not match
    Verify {
        /// SQLite database file
        #[arg(short, long, env = "SUBJECT_CRITERIA_DATABASE")]
        database: PathBuf,

        /// NHS number of the subject
        #[arg(short, long = "nhs")]
        nhs_number: String,

        #[command(flatten)]
        criteria: CriteriaArgs,
    },

    /// Print the SQL and binds for criteria without running them
    Compile {
        /// NHS number to anchor on; selection SQL when omitted
        #[arg(short, long = "nhs")]
        nhs_number: Option<String>,

        /// Compile only this field's predicate
        #[arg(short, long)]
        isolate: Option<String>,

        /// Row limit for selection SQL
        #[arg(short, long, default_value_t = 1)]
        limit: u32,

        #[command(flatten)]
        criteria: CriteriaArgs,
    },

    /// Find subjects matching criteria
    Select {
        /// SQLite database file
        #[arg(short, long, env = "SUBJECT_CRITERIA_DATABASE")]
        database: PathBuf,

        /// Maximum number of subjects
        #[arg(short, long, default_value_t = 10)]
        limit: u32,

        #[command(flatten)]
        criteria: CriteriaArgs,
    },

    /// List catalog fields, their aliases and accepted expressions
    Fields {
        /// Only fields whose name or alias contains this text
        filter: Option<String>,
    },
}

fn run(cli: Cli) -> Result<bool> {
    let format = cli.format;
    let engine = || input::engine_config(cli.config.as_deref(), cli.dialect, cli.today);

    match cli.command {
        Commands::Verify {
            database,
            nhs_number,
            criteria,
        } => verify::verify(verify::VerifyConfig {
            database,
            nhs_number,
            criteria: criteria.into(),
            engine: engine()?,
            format,
        }),

        Commands::Compile {
            nhs_number,
            isolate,
            limit,
            criteria,
        } => {
            compile::compile(compile::CompileConfig {
                nhs_number,
                criteria: criteria.into(),
                isolate,
                limit,
                engine: engine()?,
                format,
            })?;
            Ok(true)
        }

        Commands::Select {
            database,
            limit,
            criteria,
        } => {
            select::select(select::SelectConfig {
                database,
                criteria: criteria.into(),
                limit,
                engine: engine()?,
                format,
            })?;
            Ok(true)
        }

        Commands::Fields { filter } => {
            fields::fields(filter.as_deref(), format)?;
            Ok(true)
        }
    }
}

fn main() -> ExitCode {
    human_panic::setup_panic!();

    let cli = Cli::parse();
    output::setup_colors(cli.color);
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            eprintln!("{}", output::format_error(&e));
            ExitCode::from(2)
        }
    }
}
