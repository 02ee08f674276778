use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Textual `day-month-year` layout used for every stored and entered date.
pub const DATE_FORMAT: &str = "%d-%m-%Y";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    Income,
    Expense,
}

impl Category {
    /// Maps a single-letter entry code (`I` or `E`, any case) to its category.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_uppercase().as_str() {
            "I" => Some(Category::Income),
            "E" => Some(Category::Expense),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Category::Income => "Income",
            Category::Expense => "Expense",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

/// One row of the store. Column names match the CSV header.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    #[serde(rename = "Date", with = "stored_date")]
    pub date: NaiveDate,
    #[serde(rename = "Amount")]
    pub amount: Decimal,
    #[serde(rename = "Category")]
    pub category: Category,
    #[serde(rename = "Description")]
    pub description: String,
}

impl Transaction {
    pub fn new(date: NaiveDate, amount: Decimal, category: Category, description: String) -> Self {
        Self {
            date,
            amount,
            category,
            description,
        }
    }
}

pub fn parse_date(input: &str, date_format: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(input.trim(), date_format)
}

pub fn format_date(date: NaiveDate, date_format: &str) -> String {
    date.format(date_format).to_string()
}

/// Serde adapter keeping the `Date` column in [`DATE_FORMAT`].
mod stored_date {
    use super::{DATE_FORMAT, format_date, parse_date};
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format_date(*date, DATE_FORMAT))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse_date(&raw, DATE_FORMAT).map_err(serde::de::Error::custom)
    }
}
