mod commands;

use crate::commands::{compare, info, run};
use clap::{Parser, Subcommand};
use colored::Colorize;
use seat_apportion::AdjustmentMethod;
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
struct Opts {
    /// Log every pipeline stage.
    #[clap(long, short, global = true)]
    verbose: bool,
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Validate and describe a rules file.
    Info {
        /// Rules file (JSON)
        rules: PathBuf,
    },
    /// Run an election and print the seat allocation.
    Run {
        /// Rules file (JSON)
        rules: PathBuf,
        /// Votes file (JSON, xlsx, xls or ods)
        votes: PathBuf,
        /// Override the adjustment method from the rules
        #[clap(long)]
        method: Option<AdjustmentMethod>,
        /// Write results to this file: a workbook for .xlsx, JSON otherwise
        #[clap(long, short)]
        output: Option<PathBuf>,
        /// Print results as JSON instead of a table
        #[clap(long)]
        json: bool,
    },
    /// Run every adjustment method and compare how close each gets.
    Compare {
        /// Rules file (JSON)
        rules: PathBuf,
        /// Votes file (JSON, xlsx, xls or ods)
        votes: PathBuf,
        /// Write the comparison as JSON to this file
        #[clap(long, short)]
        output: Option<PathBuf>,
    },
}

fn main() {
    let opts = Opts::parse();

    let default_level = if opts.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env().add_directive(default_level.into()))
        .init();

    let result = match opts.command {
        Command::Info { rules } => info(&rules),
        Command::Run {
            rules,
            votes,
            method,
            output,
            json,
        } => run(&rules, &votes, method, output.as_deref(), json),
        Command::Compare {
            rules,
            votes,
            output,
        } => compare(&rules, &votes, output.as_deref()),
    };

    if let Err(e) = result {
        eprintln!("{} {}", "❌".red(), e.to_string().red());
        std::process::exit(1);
    }
}
