//! Category distribution for the sales in a month.

use std::collections::HashMap;

use rusqlite::Connection;
use serde::Serialize;
use time::Month;

use crate::{
    Error,
    transaction::{Transaction, TransactionFilter, get_filtered_transactions},
};

/// The number of transactions in a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    /// The category name.
    pub category: String,
    /// The number of transactions in the category.
    pub count: u64,
}

/// Count the `transactions` in each category.
///
/// There is one entry for each category that appears in `transactions`, in
/// the order the categories first appear.
pub fn count_categories(transactions: &[Transaction]) -> Vec<CategoryCount> {
    let mut positions: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<CategoryCount> = Vec::new();

    for transaction in transactions {
        let category = transaction.category.as_str();

        match positions.get(category) {
            Some(&position) => counts[position].count += 1,
            None => {
                positions.insert(category, counts.len());
                counts.push(CategoryCount {
                    category: category.to_owned(),
                    count: 1,
                });
            }
        }
    }

    counts
}

/// Get the category distribution for the transactions sold in `month` of any year.
///
/// # Errors
/// Returns [Error::SqlError] if the transactions could not be read.
pub fn get_pie_chart(month: Month, connection: &Connection) -> Result<Vec<CategoryCount>, Error> {
    let filter = TransactionFilter::all().with_month(Some(month));
    let transactions = get_filtered_transactions(&filter, connection)?;

    Ok(count_categories(&transactions))
}

#[cfg(test)]
mod tests {
    use rusqlite::Connection;
    use time::{Month, macros::datetime};

    use crate::{
        db::initialize,
        transaction::{Transaction, UNCATEGORIZED, create_transaction},
    };

    use super::{CategoryCount, get_pie_chart};

    fn get_test_connection() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();
        conn
    }

    fn create_sale(conn: &Connection, id: i64, category: Option<&str>, month: u8) {
        let date = datetime!(2021-01-15 00:00 UTC)
            .replace_month(Month::try_from(month).unwrap())
            .unwrap();

        create_transaction(Transaction::build(id, "", 1.0, date).category(category), conn)
            .unwrap();
    }

    #[test]
    fn counts_each_category() {
        let conn = get_test_connection();
        create_sale(&conn, 1, Some("electronics"), 9);
        create_sale(&conn, 2, Some("jewelery"), 9);
        create_sale(&conn, 3, Some("electronics"), 9);
        create_sale(&conn, 4, Some("jewelery"), 10);

        let got = get_pie_chart(Month::September, &conn).unwrap();

        assert_eq!(
            got,
            vec![
                CategoryCount {
                    category: "electronics".to_owned(),
                    count: 2
                },
                CategoryCount {
                    category: "jewelery".to_owned(),
                    count: 1
                },
            ]
        );
    }

    #[test]
    fn missing_and_empty_categories_are_grouped_as_uncategorized() {
        let conn = get_test_connection();
        create_sale(&conn, 1, None, 2);
        create_sale(&conn, 2, Some(""), 2);
        create_sale(&conn, 3, Some("books"), 2);

        let got = get_pie_chart(Month::February, &conn).unwrap();

        let uncategorized = got
            .iter()
            .find(|entry| entry.category == UNCATEGORIZED)
            .expect("Could not find uncategorized entry");
        assert_eq!(uncategorized.count, 2);
        assert_eq!(got.len(), 2);
    }

    #[test]
    fn counts_add_up_to_transactions_in_month() {
        let conn = get_test_connection();
        let categories = [Some("a"), Some("b"), None, Some("a"), Some("c"), Some("b")];
        for (id, category) in categories.into_iter().enumerate() {
            create_sale(&conn, id as i64, category, 11);
        }
        create_sale(&conn, 99, Some("a"), 12);

        let got = get_pie_chart(Month::November, &conn).unwrap();

        let total: u64 = got.iter().map(|entry| entry.count).sum();
        assert_eq!(total, categories.len() as u64);
    }

    #[test]
    fn repeated_calls_give_the_same_chart() {
        let conn = get_test_connection();
        create_sale(&conn, 1, Some("electronics"), 3);
        create_sale(&conn, 2, None, 3);
        create_sale(&conn, 3, Some("electronics"), 3);

        let first = get_pie_chart(Month::March, &conn).unwrap();
        let second = get_pie_chart(Month::March, &conn).unwrap();

        assert_eq!(first, second);
        assert_eq!(first[0].count, 2);
    }

    #[test]
    fn empty_month_has_no_categories() {
        let conn = get_test_connection();

        let got = get_pie_chart(Month::April, &conn).unwrap();

        assert!(got.is_empty());
    }
}
