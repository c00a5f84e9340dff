//! Defines the core data model and database functions for sale transactions.

use rusqlite::{Connection, Row};
use serde::{Deserialize, Serialize};
use time::{Month, OffsetDateTime, UtcOffset};

use crate::Error;

/// The category given to transactions without a category.
pub const UNCATEGORIZED: &str = "Uncategorized";

// ============================================================================
// MODELS
// ============================================================================

/// A product sale event.
///
/// Transactions are read-only once stored. The whole set is replaced at once
/// by [replace_all_transactions](crate::replace_all_transactions).
///
/// To create a new `Transaction`, use [Transaction::build].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// The ID of the product sale from the source data.
    ///
    /// This is only used for display and is not guaranteed to be unique.
    pub id: i64,
    /// The name of the product.
    pub title: String,
    /// A text description of the product.
    pub description: String,
    /// How much the product sold for, never negative.
    pub price: f64,
    /// The product category, [UNCATEGORIZED] if the source data had none.
    pub category: String,
    /// A URI for an image of the product.
    pub image: String,
    /// Whether the product was sold.
    pub sold: bool,
    /// When the sale happened.
    #[serde(with = "time::serde::rfc3339")]
    pub date_of_sale: OffsetDateTime,
}

impl Transaction {
    /// Create a new transaction.
    ///
    /// Shortcut for [TransactionBuilder] for discoverability.
    pub fn build(id: i64, title: &str, price: f64, date_of_sale: OffsetDateTime) -> TransactionBuilder {
        TransactionBuilder {
            id,
            title: title.to_owned(),
            price,
            description: String::new(),
            category: None,
            image: String::new(),
            sold: false,
            date_of_sale,
        }
    }

    /// The calendar month the sale happened in.
    pub fn sale_month(&self) -> Month {
        month_of(self.date_of_sale)
    }
}

/// A builder for creating [Transaction] instances.
///
/// This is also the shape of a record in the seed data, so a list of builders
/// can be deserialized straight from the seed JSON.
///
/// # Examples
///
/// ```ignore
/// use time::macros::datetime;
///
/// use crate::transaction::Transaction;
///
/// let builder = Transaction::build(1, "T Shirt", 19.99, datetime!(2021-09-27 20:29:54 +05:30))
///     .description("a fine shirt")
///     .category(Some("men's clothing"))
///     .sold(true);
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionBuilder {
    /// The ID of the product sale from the source data.
    pub id: i64,

    /// The name of the product.
    pub title: String,

    /// How much the product sold for.
    ///
    /// Must not be negative, storing a builder with a negative price fails with
    /// [Error::NegativePrice].
    pub price: f64,

    /// A text description of the product.
    #[serde(default)]
    pub description: String,

    /// The product category.
    ///
    /// Missing and empty categories are both read back as [UNCATEGORIZED].
    #[serde(default)]
    pub category: Option<String>,

    /// A URI for an image of the product.
    #[serde(default)]
    pub image: String,

    /// Whether the product was sold.
    #[serde(default)]
    pub sold: bool,

    /// When the sale happened, as an RFC 3339 timestamp in the seed data.
    #[serde(with = "time::serde::rfc3339")]
    pub date_of_sale: OffsetDateTime,
}

impl TransactionBuilder {
    /// Set the description for the transaction.
    pub fn description(mut self, description: &str) -> Self {
        self.description = description.to_owned();
        self
    }

    /// Set the category for the transaction.
    pub fn category(mut self, category: Option<&str>) -> Self {
        self.category = category.map(str::to_owned);
        self
    }

    /// Set the image URI for the transaction.
    pub fn image(mut self, image: &str) -> Self {
        self.image = image.to_owned();
        self
    }

    /// Set whether the product was sold.
    pub fn sold(mut self, sold: bool) -> Self {
        self.sold = sold;
        self
    }
}

/// The calendar month of `date_time` in UTC. The year is ignored.
pub(crate) fn month_of(date_time: OffsetDateTime) -> Month {
    date_time.to_offset(UtcOffset::UTC).month()
}

/// Replace a missing or empty category with [UNCATEGORIZED].
pub(crate) fn normalize_category(category: Option<String>) -> String {
    match category {
        Some(category) if !category.is_empty() => category,
        _ => UNCATEGORIZED.to_owned(),
    }
}

// ============================================================================
// DATABASE FUNCTIONS
// ============================================================================

/// The columns selected by queries that return whole transactions, in the
/// order expected by [map_transaction_row].
pub(crate) const TRANSACTION_COLUMNS: &str =
    "id, title, description, price, category, image, sold, date_of_sale";

/// Create a new transaction in the database from a builder.
///
/// # Errors
/// This function will return a:
/// - [Error::NegativePrice] if the price is negative or not a number,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn create_transaction(
    builder: TransactionBuilder,
    connection: &Connection,
) -> Result<Transaction, Error> {
    if !(builder.price >= 0.0) {
        return Err(Error::NegativePrice(builder.price));
    }

    let sale_month = month_of(builder.date_of_sale) as u8;

    let transaction = connection
        .prepare(&format!(
            "INSERT INTO sale_transaction \
             (id, title, description, price, category, image, sold, date_of_sale, sale_month) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9) \
             RETURNING {TRANSACTION_COLUMNS}"
        ))?
        .query_row(
            (
                builder.id,
                builder.title,
                builder.description,
                builder.price,
                builder.category,
                builder.image,
                builder.sold,
                builder.date_of_sale,
                sale_month,
            ),
            map_transaction_row,
        )?;

    Ok(transaction)
}

/// Get the total number of transactions in the database.
///
/// # Errors
/// This function will return a [Error::SqlError] there is some SQL error.
pub fn count_transactions(connection: &Connection) -> Result<u64, Error> {
    connection
        .query_row("SELECT COUNT(*) FROM sale_transaction;", [], |row| row.get(0))
        .map_err(|error| error.into())
}

/// Create the transaction table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS sale_transaction (
                id INTEGER NOT NULL,
                title TEXT NOT NULL,
                description TEXT NOT NULL,
                price REAL NOT NULL CHECK (price >= 0),
                category TEXT,
                image TEXT NOT NULL,
                sold INTEGER NOT NULL,
                date_of_sale TEXT NOT NULL,
                sale_month INTEGER NOT NULL CHECK (sale_month BETWEEN 1 AND 12)
                )",
        (),
    )?;

    // Every month scoped query filters on the sale month.
    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_sale_transaction_month ON sale_transaction(sale_month);",
        (),
    )?;

    Ok(())
}

/// Map a database row to a Transaction.
pub(crate) fn map_transaction_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    let id = row.get(0)?;
    let title = row.get(1)?;
    let description = row.get(2)?;
    let price = row.get(3)?;
    let category = normalize_category(row.get(4)?);
    let image = row.get(5)?;
    let sold = row.get(6)?;
    let date_of_sale = row.get(7)?;

    Ok(Transaction {
        id,
        title,
        description,
        price,
        category,
        image,
        sold,
        date_of_sale,
    })
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod database_tests {
    use rusqlite::Connection;
    use time::{Month, macros::datetime};

    use crate::{
        Error,
        db::initialize,
        transaction::{
            Transaction,
            core::{UNCATEGORIZED, count_transactions, create_transaction},
        },
    };

    fn get_test_connection() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();
        conn
    }

    #[test]
    fn create_succeeds() {
        let conn = get_test_connection();
        let builder = Transaction::build(60, "T Shirt", 412.99, datetime!(2021-09-27 20:29:54 +05:30))
            .description("a fine shirt")
            .category(Some("women's clothing"))
            .image("https://example.com/shirt.jpg")
            .sold(true);

        let transaction = create_transaction(builder, &conn).expect("Could not create transaction");

        assert_eq!(
            transaction,
            Transaction {
                id: 60,
                title: "T Shirt".to_owned(),
                description: "a fine shirt".to_owned(),
                price: 412.99,
                category: "women's clothing".to_owned(),
                image: "https://example.com/shirt.jpg".to_owned(),
                sold: true,
                date_of_sale: datetime!(2021-09-27 20:29:54 +05:30),
            }
        );
    }

    #[test]
    fn create_fails_on_negative_price() {
        let conn = get_test_connection();

        let result = create_transaction(
            Transaction::build(1, "", -1.0, datetime!(2021-03-15 00:00 UTC)),
            &conn,
        );

        assert_eq!(result, Err(Error::NegativePrice(-1.0)));
        assert_eq!(count_transactions(&conn), Ok(0));
    }

    #[test]
    fn missing_category_is_uncategorized() {
        let conn = get_test_connection();

        let missing = create_transaction(
            Transaction::build(1, "", 1.0, datetime!(2021-03-15 00:00 UTC)),
            &conn,
        )
        .unwrap();
        let empty = create_transaction(
            Transaction::build(2, "", 1.0, datetime!(2021-03-15 00:00 UTC)).category(Some("")),
            &conn,
        )
        .unwrap();

        assert_eq!(missing.category, UNCATEGORIZED);
        assert_eq!(empty.category, UNCATEGORIZED);
    }

    #[test]
    fn sale_month_ignores_year() {
        let old = Transaction::build(1, "", 1.0, datetime!(1999-06-01 12:00 UTC));
        let new = Transaction::build(1, "", 1.0, datetime!(2024-06-30 12:00 UTC));
        let conn = get_test_connection();

        let old = create_transaction(old, &conn).unwrap();
        let new = create_transaction(new, &conn).unwrap();

        assert_eq!(old.sale_month(), Month::June);
        assert_eq!(new.sale_month(), Month::June);
    }

    #[test]
    fn sale_month_is_taken_in_utc() {
        let transaction = Transaction {
            id: 1,
            title: String::new(),
            description: String::new(),
            price: 1.0,
            category: UNCATEGORIZED.to_owned(),
            image: String::new(),
            sold: false,
            // 2021-08-31 20:00 UTC
            date_of_sale: datetime!(2021-09-01 01:30 +05:30),
        };

        assert_eq!(transaction.sale_month(), Month::August);
    }

    #[test]
    fn get_count() {
        let conn = get_test_connection();
        let want_count = 20;
        for i in 1..=want_count {
            create_transaction(
                Transaction::build(i, "", i as f64, datetime!(2021-03-15 00:00 UTC)),
                &conn,
            )
            .expect("Could not create transaction");
        }

        let got_count = count_transactions(&conn).expect("Could not get count");

        assert_eq!(want_count as u64, got_count);
    }
}
