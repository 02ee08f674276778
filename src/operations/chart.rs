use crate::errors::Error;
use crate::models::transaction::{Category, Transaction, format_date};
use crate::operations::report::accumulate;
use chrono::{Duration, NaiveDate};
use plotters::prelude::*;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use std::io::Write;
use std::path::Path;

/// Per-category amounts resampled to one point per calendar day.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyTotals {
    pub start: NaiveDate,
    pub income: Vec<Decimal>,
    pub expense: Vec<Decimal>,
}

impl DailyTotals {
    pub fn days(&self) -> usize {
        self.income.len()
    }

    pub fn date_at(&self, offset: usize) -> NaiveDate {
        self.start + Duration::days(offset as i64)
    }

    fn series(&self, category: Category) -> &[Decimal] {
        match category {
            Category::Income => &self.income,
            Category::Expense => &self.expense,
        }
    }
}

/// Sums amounts per day from the earliest to the latest transaction date.
/// Days without entries stay at zero. `None` when there is nothing to plot.
pub fn daily_totals(transactions: &[Transaction]) -> Result<Option<DailyTotals>, Error> {
    let (Some(start), Some(end)) = (
        transactions.iter().map(|t| t.date).min(),
        transactions.iter().map(|t| t.date).max(),
    ) else {
        return Ok(None);
    };
    let days = (end - start).num_days() as usize + 1;

    let mut totals = DailyTotals {
        start,
        income: vec![Decimal::ZERO; days],
        expense: vec![Decimal::ZERO; days],
    };
    for transaction in transactions {
        let idx = (transaction.date - start).num_days() as usize;
        let day = match transaction.category {
            Category::Income => &mut totals.income[idx],
            Category::Expense => &mut totals.expense[idx],
        };
        accumulate(day, transaction)?;
    }
    Ok(Some(totals))
}

/// Draws income and expense lines over a shared date axis and writes the
/// image to `path`, replacing any previous render.
pub fn render_chart<W: Write>(
    transactions: &[Transaction],
    path: &Path,
    date_format: &str,
    out: &mut W,
) -> Result<(), Error> {
    let Some(totals) = daily_totals(transactions)? else {
        return Ok(());
    };

    draw(&totals, path, date_format).map_err(|e| Error::Chart(e.to_string()))?;

    tracing::info!(path = %path.display(), days = totals.days(), "rendered chart");
    writeln!(out, "Plot saved as '{}'.", path.display())?;
    Ok(())
}

fn draw(
    totals: &DailyTotals,
    path: &Path,
    date_format: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let root = SVGBackend::new(path, (1000, 500)).into_drawing_area();
    root.fill(&WHITE)?;

    let last = (totals.days() as i32 - 1).max(1);
    let y_max = totals
        .income
        .iter()
        .chain(&totals.expense)
        .map(|v| v.to_f64().unwrap_or(0.0))
        .fold(0.0_f64, f64::max)
        .max(1.0)
        * 1.1;

    let mut chart = ChartBuilder::on(&root)
        .caption("Income and Expenses Over Time", ("sans-serif", 24).into_font())
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(70)
        .build_cartesian_2d(0..last, 0.0..y_max)?;

    let label_date = |offset: &i32| format_date(totals.date_at((*offset).max(0) as usize), date_format);
    chart
        .configure_mesh()
        .x_desc("Date")
        .y_desc("Amount")
        .x_label_formatter(&label_date)
        .x_labels(totals.days().clamp(2, 10))
        .draw()?;

    for (category, color) in [(Category::Income, GREEN), (Category::Expense, RED)] {
        let points = totals
            .series(category)
            .iter()
            .enumerate()
            .map(|(idx, v)| (idx as i32, v.to_f64().unwrap_or(0.0)));
        chart
            .draw_series(LineSeries::new(points, color.stroke_width(2)))?
            .label(category.name())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2)));
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::transaction::{DATE_FORMAT, parse_date};
    use rust_decimal_macros::dec;

    fn tx(date: &str, amount: Decimal, category: Category) -> Transaction {
        Transaction::new(
            parse_date(date, DATE_FORMAT).unwrap(),
            amount,
            category,
            "entry".to_string(),
        )
    }

    #[test]
    fn test_daily_totals_fill_missing_days_with_zero() {
        let totals = daily_totals(&[
            tx("03-01-2024", dec!(100), Category::Income),
            tx("01-01-2024", dec!(40), Category::Expense),
        ])
        .unwrap()
        .unwrap();

        assert_eq!(totals.start, parse_date("01-01-2024", DATE_FORMAT).unwrap());
        assert_eq!(totals.days(), 3);
        assert_eq!(totals.income, vec![dec!(0), dec!(0), dec!(100)]);
        assert_eq!(totals.expense, vec![dec!(40), dec!(0), dec!(0)]);
    }

    #[test]
    fn test_daily_totals_sum_same_day() {
        let totals = daily_totals(&[
            tx("05-02-2024", dec!(10), Category::Expense),
            tx("05-02-2024", dec!(2.5), Category::Expense),
            tx("05-02-2024", dec!(7), Category::Income),
        ])
        .unwrap()
        .unwrap();

        assert_eq!(totals.days(), 1);
        assert_eq!(totals.expense, vec![dec!(12.5)]);
        assert_eq!(totals.income, vec![dec!(7)]);
    }

    #[test]
    fn test_daily_totals_empty() {
        assert!(daily_totals(&[]).unwrap().is_none());
    }

    #[test]
    fn test_daily_totals_overflow_is_an_error() {
        let result = daily_totals(&[
            tx("05-02-2024", Decimal::MAX, Category::Income),
            tx("05-02-2024", Decimal::MAX, Category::Income),
        ]);
        assert!(matches!(result, Err(Error::TotalOverflow(Category::Income))));
    }

    #[test]
    fn test_render_chart_writes_image() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("transaction_plot.svg");
        let transactions = [
            tx("01-01-2024", dec!(100), Category::Income),
            tx("15-01-2024", dec!(40), Category::Expense),
        ];

        let mut out = Vec::new();
        render_chart(&transactions, &path, DATE_FORMAT, &mut out).unwrap();

        let svg = std::fs::read_to_string(&path).unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains("Income and Expenses Over Time"));
        let printed = String::from_utf8(out).unwrap();
        assert!(printed.contains("Plot saved as"));
    }

    #[test]
    fn test_render_chart_overwrites_previous_image() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("transaction_plot.svg");
        std::fs::write(&path, "stale").unwrap();

        let mut out = Vec::new();
        render_chart(&[tx("01-01-2024", dec!(1), Category::Income)], &path, DATE_FORMAT, &mut out).unwrap();

        let svg = std::fs::read_to_string(&path).unwrap();
        assert!(!svg.starts_with("stale"));
    }
}
