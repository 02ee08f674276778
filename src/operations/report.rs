use crate::db::{connection::CsvStore, repository};
use crate::errors::Error;
use crate::models::transaction::{Category, Transaction, format_date, parse_date};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Summary {
    pub total_income: Decimal,
    pub total_expense: Decimal,
}

impl Summary {
    pub fn net(&self) -> Decimal {
        self.total_income - self.total_expense
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Matching rows in store order.
    pub transactions: Vec<Transaction>,
    pub summary: Summary,
}

impl Report {
    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }
}

/// Keeps rows dated within `[start_date, end_date]` and totals them per category.
/// A reversed range simply matches nothing. Fails only when a total does not
/// fit in a `Decimal`.
pub fn build_report(
    transactions: impl IntoIterator<Item = Transaction>,
    start_date: NaiveDate,
    end_date: NaiveDate,
) -> Result<Report, Error> {
    let transactions: Vec<Transaction> = transactions
        .into_iter()
        .filter(|t| t.date >= start_date && t.date <= end_date)
        .collect();

    let mut summary = Summary::default();
    for transaction in &transactions {
        let total = match transaction.category {
            Category::Income => &mut summary.total_income,
            Category::Expense => &mut summary.total_expense,
        };
        accumulate(total, transaction)?;
    }

    Ok(Report {
        start_date,
        end_date,
        transactions,
        summary,
    })
}

/// Adds the transaction's amount to `total`, refusing to overflow.
pub(crate) fn accumulate(total: &mut Decimal, transaction: &Transaction) -> Result<(), Error> {
    *total = total
        .checked_add(transaction.amount)
        .ok_or(Error::TotalOverflow(transaction.category))?;
    Ok(())
}

/// Loads the store, prints the rows between `start` and `end` with a summary
/// block, and returns the report. Returns `Ok(None)` after printing a notice
/// when nothing matches.
pub fn run_report<W: Write>(
    store: &CsvStore,
    start: &str,
    end: &str,
    date_format: &str,
    out: &mut W,
) -> Result<Option<Report>, Error> {
    let start_date = parse_bound(start, date_format)?;
    let end_date = parse_bound(end, date_format)?;

    let transactions = repository::get_transactions_in_range(store, start_date, end_date)?;
    let report = build_report(transactions, start_date, end_date)?;
    tracing::info!(
        start = %start_date,
        end = %end_date,
        matched = report.transactions.len(),
        "ran report"
    );

    if report.is_empty() {
        writeln!(out, "No transactions found in the given date range")?;
        return Ok(None);
    }

    print_report(&report, date_format, out)?;
    Ok(Some(report))
}

fn parse_bound(input: &str, date_format: &str) -> Result<NaiveDate, Error> {
    parse_date(input, date_format).map_err(|source| Error::InvalidDate {
        input: input.to_string(),
        source,
    })
}

fn print_report<W: Write>(report: &Report, date_format: &str, out: &mut W) -> Result<(), Error> {
    writeln!(
        out,
        "Transactions from {} to {}",
        format_date(report.start_date, date_format),
        format_date(report.end_date, date_format)
    )?;

    let rows: Vec<[String; 4]> = report
        .transactions
        .iter()
        .map(|t| {
            [
                format_date(t.date, date_format),
                t.amount.to_string(),
                t.category.to_string(),
                t.description.clone(),
            ]
        })
        .collect();

    let header = ["Date", "Amount", "Category", "Description"];
    let mut widths = header.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    writeln!(
        out,
        "{:<w0$}  {:>w1$}  {:<w2$}  {}",
        header[0],
        header[1],
        header[2],
        header[3],
        w0 = widths[0],
        w1 = widths[1],
        w2 = widths[2]
    )?;
    for row in &rows {
        writeln!(
            out,
            "{:<w0$}  {:>w1$}  {:<w2$}  {}",
            row[0],
            row[1],
            row[2],
            row[3],
            w0 = widths[0],
            w1 = widths[1],
            w2 = widths[2]
        )?;
    }

    let summary = &report.summary;
    writeln!(out, "\nSummary:")?;
    writeln!(out, "Total Income: ${:.2}", summary.total_income)?;
    writeln!(out, "Total Expense: ${:.2}", summary.total_expense)?;
    writeln!(out, "Net Savings: ${:.2}", summary.net())?;
    Ok(())
}
