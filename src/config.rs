use crate::models::transaction::DATE_FORMAT;
use std::path::PathBuf;

pub const STORE_FILE: &str = "finance_data.csv";
pub const CHART_FILE: &str = "transaction_plot.svg";

/// Settings handed to every component explicitly.
#[derive(Debug, Clone)]
pub struct Config {
    pub store_path: PathBuf,
    pub chart_path: PathBuf,
    pub date_format: &'static str,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_path: PathBuf::from(STORE_FILE),
            chart_path: PathBuf::from(CHART_FILE),
            date_format: DATE_FORMAT,
        }
    }
}
