use crate::db::{connection::CsvStore, repository};
use crate::errors::Error;
use crate::models::transaction::Transaction;
use crate::operations::input::Prompter;
use std::io::{BufRead, Write};

/// Runs the date, amount, category, description sequence. Each field is
/// retried on its own, so an accepted field is never asked for again.
pub fn read_transaction<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
) -> Result<Transaction, Error> {
    let date = prompter.naive_date(
        "Enter the date of the transaction (dd-mm-yyyy) or press Enter for today's date: ",
        true,
    )?;
    let amount = prompter.amount()?;
    let category = prompter.category()?;
    let description = prompter.description()?;

    Ok(Transaction::new(date, amount, category, description))
}

pub fn add_transaction_to_store<R: BufRead, W: Write>(
    store: &CsvStore,
    prompter: &mut Prompter<R, W>,
) -> Result<Transaction, Error> {
    let transaction = read_transaction(prompter)?;
    repository::add_transaction(store, &transaction)?;
    writeln!(prompter.output(), "Entry added successfully")?;
    Ok(transaction)
}
