mod commands;
mod logging;
mod progress;
mod prompt;

use std::env;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use colored::*;
use commands::{Cli, CollectArgs, Commands, RosterArgs};
use dotenv::dotenv;
use hw_collect_core::layout::detect_source_folder;
use hw_collect_core::roster::load_roster;
use hw_collect_core::{report, AppConfig, Consolidator, Error, LocalFs, RosterEntry};
use progress::CliReporter;
use tracing::{error, info, warn};

fn main() -> ExitCode {
    dotenv().ok();

    let _guard = logging::init_logger();

    let config = match hw_collect_core::config::load_configuration() {
        Ok(config) => config,
        Err(err) => {
            error!("Error loading configuration: {}", err);
            return ExitCode::FAILURE;
        }
    };

    let args = Cli::parse();

    let result = match args.command {
        Some(Commands::Collect(collect_args)) => run_collect(&config, collect_args),
        Some(Commands::CheckRoster(roster_args)) => run_check_roster(&config, &roster_args),
        Some(Commands::PrintConfig) => {
            println!("Configuration: {:?}", config);
            Ok(())
        }
        None => run_collect(&config, CollectArgs::default()),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{:#}", err);
            ExitCode::FAILURE
        }
    }
}

fn run_collect(config: &AppConfig, args: CollectArgs) -> Result<()> {
    let working_dir = env::current_dir().context("Cannot read the current directory")?;
    let roster = read_roster(config, &args.roster)?;

    let dest_name = match args.dest {
        Some(dest) => dest,
        None => prompt::prompt_line("Destination folder name")
            .context("Cannot read the destination folder name")?,
    };
    let destination = working_dir.join(&dest_name);

    let source = match args.source {
        Some(source) => source,
        None => detect_source_folder(&LocalFs, &working_dir, &dest_name).context(
            "Put the submission folder next to this program or pass --source",
        )?,
    };
    info!("Submission folder: {}", source.display());

    if destination.exists() && !args.yes {
        warn!("Destination {} already exists", destination.display());
        let proceed = prompt::prompt_confirm(
            "PDF files with the same name will be overwritten. Continue?",
            Some(true),
        )?;
        if !proceed {
            info!("Nothing copied.");
            return Ok(());
        }
    }

    let reporter = CliReporter::new();
    let result = Consolidator::local().run(&source, &destination, &roster, &reporter)?;

    let report_path = report::write_report(&destination, &config.report_file_name, &result)
        .with_context(|| format!("Failed to write report into {}", destination.display()))?;

    println!();
    println!(
        "Report {} written to {}",
        config.report_file_name.cyan(),
        dest_name.cyan()
    );
    println!(
        "{} files collected for {} students",
        format!("{}", result.copied_files).green(),
        result.total_students()
    );
    if result.all_submitted() {
        println!("{}", "Every student submitted a PDF.".green());
    } else {
        println!(
            "{} missing, {} wrong format (see {})",
            format!("{}", result.missing.len()).red(),
            format!("{}", result.wrong_format.len()).yellow(),
            report_path.display()
        );
    }

    Ok(())
}

fn run_check_roster(config: &AppConfig, args: &RosterArgs) -> Result<()> {
    let roster = read_roster(config, args)?;

    let mut malformed = 0;
    for (i, entry) in roster.iter().enumerate() {
        match entry.folder_name() {
            Some(name) => println!("{:>4}. {}", i + 1, name),
            None => {
                malformed += 1;
                println!("{:>4}. {}", i + 1, describe_malformed(entry).red());
            }
        }
    }

    println!();
    println!(
        "{} students, {} malformed",
        format!("{}", roster.len()).green(),
        format!("{}", malformed).red()
    );
    Ok(())
}

fn describe_malformed(entry: &RosterEntry) -> String {
    match (&entry.student_id, &entry.student_name) {
        (Some(id), None) => format!("{} (name missing)", id),
        (None, Some(name)) => format!("(id missing) {}", name),
        _ => "(id and name missing)".to_string(),
    }
}

fn read_roster(config: &AppConfig, args: &RosterArgs) -> Result<Vec<RosterEntry>> {
    let path = args
        .roster
        .clone()
        .unwrap_or_else(|| PathBuf::from(&config.roster_path));

    load_roster(&path, &config.id_column, &config.name_column)
        .map_err(|err| roster_hint(err, &path, config))
}

fn roster_hint(err: Error, path: &Path, config: &AppConfig) -> anyhow::Error {
    let hint = match &err {
        Error::RosterNotFound(_) => format!(
            "Keep {} in the same directory as the submission folder, or pass --roster",
            path.display()
        ),
        Error::MissingColumn { .. } => format!(
            "The roster needs both '{}' and '{}' column headers \
             (set HW_COLLECT_ID_COLUMN / HW_COLLECT_NAME_COLUMN to change them)",
            config.id_column, config.name_column
        ),
        _ => format!("Cannot read roster {}", path.display()),
    };
    anyhow::Error::new(err).context(hint)
}
