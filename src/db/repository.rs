use crate::db::connection::CsvStore;
use crate::errors::Error;
use crate::models::transaction::Transaction;
use chrono::NaiveDate;
use std::fs::OpenOptions;

/// Appends one row to the end of the store. The header is never rewritten.
pub fn add_transaction(store: &CsvStore, transaction: &Transaction) -> Result<(), Error> {
    let file = OpenOptions::new().append(true).open(store.path())?;
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(file);
    writer.serialize(transaction)?;
    writer.flush()?;
    tracing::debug!(date = %transaction.date, amount = %transaction.amount, "appended transaction");
    Ok(())
}

/// Reads every stored row in append order.
pub fn get_all_transactions(store: &CsvStore) -> Result<Vec<Transaction>, Error> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(store.path())?;

    let mut transactions = Vec::new();
    for record in reader.deserialize() {
        transactions.push(record?);
    }
    Ok(transactions)
}

/// Rows dated within `[start_date, end_date]`, both bounds inclusive, in append order.
pub fn get_transactions_in_range(
    store: &CsvStore,
    start_date: NaiveDate,
    end_date: NaiveDate,
) -> Result<Vec<Transaction>, Error> {
    let transactions = get_all_transactions(store)?;
    Ok(transactions
        .into_iter()
        .filter(|transaction| transaction.date >= start_date && transaction.date <= end_date)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::connection::open_test_store;
    use crate::models::transaction::Category;
    use rust_decimal_macros::dec;
    use std::fs;

    fn create_test_transaction(day: u32, category: Category, description: &str) -> Transaction {
        Transaction::new(
            NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            dec!(12.50),
            category,
            description.to_string(),
        )
    }

    #[test]
    fn test_get_all_transactions_empty() {
        let (_dir, store) = open_test_store();
        let result = get_all_transactions(&store);
        assert!(result.is_ok());
        assert_eq!(result.unwrap().len(), 0);
    }

    #[test]
    fn test_add_transaction_appends_row() {
        let (_dir, store) = open_test_store();
        add_transaction(&store, &create_test_transaction(3, Category::Expense, "Coffee")).unwrap();

        let contents = fs::read_to_string(store.path()).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines, vec!["Date,Amount,Category,Description", "03-01-2024,12.50,Expense,Coffee"]);
    }

    #[test]
    fn test_add_transaction_preserves_order_and_duplicates() {
        let (_dir, store) = open_test_store();
        let later = create_test_transaction(20, Category::Income, "Refund");
        let earlier = create_test_transaction(2, Category::Expense, "Rent");
        add_transaction(&store, &later).unwrap();
        add_transaction(&store, &earlier).unwrap();
        add_transaction(&store, &earlier).unwrap();

        let all = get_all_transactions(&store).unwrap();
        assert_eq!(all, vec![later, earlier.clone(), earlier]);
    }

    #[test]
    fn test_description_with_separator_round_trips() {
        let (_dir, store) = open_test_store();
        let transaction = create_test_transaction(5, Category::Expense, "Milk, eggs, bread");
        add_transaction(&store, &transaction).unwrap();

        let all = get_all_transactions(&store).unwrap();
        assert_eq!(all[0].description, "Milk, eggs, bread");
    }

    #[test]
    fn test_reads_float_amounts_written_by_other_tools() {
        let (_dir, store) = open_test_store();
        let mut contents = fs::read_to_string(store.path()).unwrap();
        contents.push_str("01-01-2024,100.0,Income,Salary\n");
        fs::write(store.path(), contents).unwrap();

        let all = get_all_transactions(&store).unwrap();
        assert_eq!(all[0].amount, dec!(100));
        assert_eq!(all[0].category, Category::Income);
    }

    #[test]
    fn test_get_transactions_in_range_inclusive_bounds() {
        let (_dir, store) = open_test_store();
        for day in [1, 9, 10, 15, 20, 21] {
            add_transaction(&store, &create_test_transaction(day, Category::Expense, "Item")).unwrap();
        }

        let start = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 1, 20).unwrap();
        let result = get_transactions_in_range(&store, start, end).unwrap();
        let days: Vec<u32> = result.iter().map(|t| chrono::Datelike::day(&t.date)).collect();
        assert_eq!(days, vec![10, 15, 20]);
    }

    #[test]
    fn test_get_transactions_in_range_reversed_bounds_is_empty() {
        let (_dir, store) = open_test_store();
        add_transaction(&store, &create_test_transaction(15, Category::Income, "Salary")).unwrap();

        let start = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert!(get_transactions_in_range(&store, start, end).unwrap().is_empty());
    }
}
