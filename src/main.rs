mod config;
mod db;
mod errors;
mod models;
mod operations;

use config::Config;
use db::connection::CsvStore;
use errors::Error;
use operations::add::add_transaction_to_store;
use operations::chart::render_chart;
use operations::input::Prompter;
use operations::report::run_report;
use std::io::{self, BufRead, Write};
use tracing_subscriber::EnvFilter;

pub enum UserCommands {
    Add,
    Report,
    Exit,
    Invalid,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let config = Config::default();
    tracing::debug!(?config, "starting");

    let stdin = io::stdin();
    let mut prompter = Prompter::new(stdin.lock(), io::stdout(), config.date_format);
    run(&config, &mut prompter)
}

fn run<R: BufRead, W: Write>(config: &Config, prompter: &mut Prompter<R, W>) -> anyhow::Result<()> {
    loop {
        let out = prompter.output();
        writeln!(out, "\n1. Add a new transaction")?;
        writeln!(out, "2. View transactions and summary within a date range")?;
        writeln!(out, "3. Exit")?;

        let choice = match prompter.line("Enter your choice (1-3): ") {
            Ok(choice) => choice,
            Err(Error::InputClosed) => break,
            Err(e) => return Err(e.into()),
        };

        let outcome = match check_for_command(choice.trim()) {
            UserCommands::Add => add(config, prompter),
            UserCommands::Report => view_report(config, prompter),
            UserCommands::Exit => break,
            UserCommands::Invalid => {
                writeln!(prompter.output(), "Invalid choice. Please enter 1, 2, or 3.")?;
                Ok(())
            }
        };

        match outcome {
            Ok(()) => {}
            Err(Error::InputClosed) => break,
            Err(e) => {
                tracing::error!(error = %e, "menu action failed");
                writeln!(prompter.output(), "Error: {}", e)?;
            }
        }
    }

    writeln!(prompter.output(), "Exiting...")?;
    Ok(())
}

fn check_for_command(input: &str) -> UserCommands {
    match input {
        "1" => UserCommands::Add,
        "2" => UserCommands::Report,
        "3" => UserCommands::Exit,
        _ => UserCommands::Invalid,
    }
}

fn add<R: BufRead, W: Write>(config: &Config, prompter: &mut Prompter<R, W>) -> Result<(), Error> {
    let store = CsvStore::open(&config.store_path)?;
    add_transaction_to_store(&store, prompter)?;
    Ok(())
}

fn view_report<R: BufRead, W: Write>(
    config: &Config,
    prompter: &mut Prompter<R, W>,
) -> Result<(), Error> {
    let start = prompter.date("Enter the start date (dd-mm-yyyy): ", false)?;
    let end = prompter.date("Enter the end date (dd-mm-yyyy): ", false)?;

    let store = CsvStore::open(&config.store_path)?;
    let Some(report) = run_report(&store, &start, &end, config.date_format, prompter.output())? else {
        return Ok(());
    };

    if prompter.confirm("Do you want to see a plot? (y/n): ")? {
        render_chart(
            &report.transactions,
            &config.chart_path,
            config.date_format,
            prompter.output(),
        )?;
    }
    Ok(())
}
