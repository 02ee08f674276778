use crate::errors::Error;
use crate::models::transaction::{Category, format_date, parse_date};
use chrono::{Local, NaiveDate};
use rust_decimal::Decimal;
use std::io::{BufRead, Write};
use std::str::FromStr;

/// Interactive field acquisition. Every `acquire` keeps asking until the
/// input satisfies its constraint; only a closed input stream ends the loop early.
pub struct Prompter<R, W> {
    reader: R,
    writer: W,
    date_format: &'static str,
    today: fn() -> NaiveDate,
}

fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(reader: R, writer: W, date_format: &'static str) -> Self {
        Self {
            reader,
            writer,
            date_format,
            today: local_today,
        }
    }

    /// Replaces the clock used for the "press Enter for today" default.
    pub fn with_today(mut self, today: fn() -> NaiveDate) -> Self {
        self.today = today;
        self
    }

    pub fn output(&mut self) -> &mut W {
        &mut self.writer
    }

    /// Prints `prompt` and returns the next line without its line terminator.
    pub fn line(&mut self, prompt: &str) -> Result<String, Error> {
        write!(self.writer, "{}", prompt)?;
        self.writer.flush()?;

        let mut input = String::new();
        if self.reader.read_line(&mut input)? == 0 {
            return Err(Error::InputClosed);
        }
        Ok(input.trim_end_matches(['\r', '\n']).to_string())
    }

    fn say(&mut self, message: &str) -> Result<(), Error> {
        writeln!(self.writer, "{}", message)?;
        Ok(())
    }

    /// Keeps asking until the input parses under the configured layout. With
    /// `allow_default`, an empty line yields today's date.
    pub fn naive_date(&mut self, prompt: &str, allow_default: bool) -> Result<NaiveDate, Error> {
        loop {
            let input = self.line(prompt)?;
            if allow_default && input.trim().is_empty() {
                return Ok((self.today)());
            }
            match parse_date(&input, self.date_format) {
                Ok(date) => return Ok(date),
                Err(_) => {
                    tracing::debug!(input = %input, "rejected date");
                    self.say("Invalid date format. Please enter the date in dd-mm-yyyy format.")?;
                }
            }
        }
    }

    /// Same as [`Prompter::naive_date`], re-formatted in the store layout.
    pub fn date(&mut self, prompt: &str, allow_default: bool) -> Result<String, Error> {
        let date = self.naive_date(prompt, allow_default)?;
        Ok(format_date(date, self.date_format))
    }

    pub fn amount(&mut self) -> Result<Decimal, Error> {
        loop {
            let input = self.line("Enter the amount: ")?;
            match parse_amount(&input) {
                AmountInput::Value(amount) if amount > Decimal::ZERO => return Ok(amount),
                AmountInput::Value(_) | AmountInput::NonPositive => {
                    self.say("Amount must be a positive, non-zero value.")?
                }
                AmountInput::OutOfRange => self.say(&format!(
                    "Amount '{}' is too large. Please enter a value no greater than {}.",
                    input.trim(),
                    MAX_AMOUNT
                ))?,
                AmountInput::NotANumber => self.say(&format!(
                    "Invalid amount '{}'. Please enter a number.",
                    input.trim()
                ))?,
            }
        }
    }

    pub fn category(&mut self) -> Result<Category, Error> {
        loop {
            let input = self.line("Enter the category ('I' for Income or 'E' for Expense): ")?;
            match Category::from_code(&input) {
                Some(category) => return Ok(category),
                None => self.say("Invalid category. Please enter 'I' for Income or 'E' for Expense.")?,
            }
        }
    }

    pub fn description(&mut self) -> Result<String, Error> {
        loop {
            let input = self.line("Enter a description for the transaction: ")?;
            let description = input.trim();
            if !description.is_empty() {
                return Ok(description.to_string());
            }
            self.say("Description cannot be empty. Please enter a valid description.")?;
        }
    }

    /// Yes/no question; only `y` (any case) counts as yes.
    pub fn confirm(&mut self, prompt: &str) -> Result<bool, Error> {
        let input = self.line(prompt)?;
        Ok(input.trim().eq_ignore_ascii_case("y"))
    }
}

/// Largest amount the decimal type can hold. Report totals are checked
/// separately since several such amounts can still overflow a sum.
pub const MAX_AMOUNT: Decimal = Decimal::MAX;

enum AmountInput {
    Value(Decimal),
    NonPositive,
    OutOfRange,
    NotANumber,
}

fn parse_amount(input: &str) -> AmountInput {
    let input = input.trim();
    if let Ok(amount) = Decimal::from_str(input).or_else(|_| Decimal::from_scientific(input)) {
        return AmountInput::Value(amount);
    }
    // A number the decimal type cannot hold still deserves a range message.
    match input.parse::<f64>() {
        Ok(value) if value.is_nan() => AmountInput::NotANumber,
        Ok(value) if value <= 0.0 => AmountInput::NonPositive,
        Ok(_) => AmountInput::OutOfRange,
        Err(_) => AmountInput::NotANumber,
    }
}
