//! # SQL Record Store
//!
//! Relational backend: one table per record kind, every row tagged with its
//! owner.
//!
//! ## Table Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  sales                     udhars                  expenses             │
//! │  ───────────────────       ──────────────────      ──────────────────   │
//! │  seq (autoincrement)       seq                     seq                  │
//! │  id        ┐ UNIQUE        id        ┐ UNIQUE      id        ┐ UNIQUE   │
//! │  owner_id  ┘               owner_id  ┘             owner_id  ┘          │
//! │  name                      person                  name                 │
//! │  quantity                  item                    amount               │
//! │  buy_rate, sell_rate       amount                  date                 │
//! │  total_investment                                                       │
//! │  total_sell, profit                                                     │
//! │  created_at                created_at              created_at           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Queries are built at runtime from [`SqlRow::COLUMNS`] with `?`
//! placeholders, so one generic implementation serves every kind. Every
//! statement carries `owner_id = ?`.

use async_trait::async_trait;
use chrono::{NaiveDate, SecondsFormat, Utc};
use sqlx::query::Query;
use sqlx::sqlite::{Sqlite, SqliteArguments, SqliteRow};
use sqlx::{Row, SqlitePool};
use tracing::debug;

use hisab_core::{
    new_record_id, Amount, CreditRecord, ExpenseRecord, LedgerRecord, SaleRecord, TenantId,
};

use super::RecordStore;
use crate::error::{DbError, DbResult};

type SqliteQuery<'q> = Query<'q, Sqlite, SqliteArguments<'q>>;

// =============================================================================
// Row Mapping
// =============================================================================

/// Maps a record to and from its table's data columns.
///
/// `id`, `owner_id`, `seq` and `created_at` are handled by [`SqlStore`].
pub trait SqlRow: Sized {
    /// Data columns, in bind order.
    const COLUMNS: &'static [&'static str];

    /// Binds the data columns in the order of [`Self::COLUMNS`].
    fn bind_columns<'q>(&'q self, query: SqliteQuery<'q>) -> SqliteQuery<'q>;

    /// Builds a record from a row selected as `id, <COLUMNS>`.
    fn from_row(row: &SqliteRow) -> DbResult<Self>;
}

fn amount(row: &SqliteRow, column: &str) -> DbResult<Amount> {
    let value: f64 = row.try_get(column)?;
    Amount::new(value)
        .ok_or_else(|| DbError::Serialization(format!("{column} holds a non-finite value")))
}

impl SqlRow for SaleRecord {
    const COLUMNS: &'static [&'static str] = &[
        "name",
        "quantity",
        "buy_rate",
        "sell_rate",
        "total_investment",
        "total_sell",
        "profit",
    ];

    fn bind_columns<'q>(&'q self, query: SqliteQuery<'q>) -> SqliteQuery<'q> {
        query
            .bind(self.name.as_str())
            .bind(self.quantity)
            .bind(self.buy_rate.value())
            .bind(self.sell_rate.value())
            .bind(self.total_investment.value())
            .bind(self.total_sell.value())
            .bind(self.profit.value())
    }

    fn from_row(row: &SqliteRow) -> DbResult<Self> {
        Ok(SaleRecord {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            quantity: row.try_get("quantity")?,
            buy_rate: amount(row, "buy_rate")?,
            sell_rate: amount(row, "sell_rate")?,
            total_investment: amount(row, "total_investment")?,
            total_sell: amount(row, "total_sell")?,
            profit: amount(row, "profit")?,
        })
    }
}

impl SqlRow for CreditRecord {
    const COLUMNS: &'static [&'static str] = &["person", "item", "amount"];

    fn bind_columns<'q>(&'q self, query: SqliteQuery<'q>) -> SqliteQuery<'q> {
        query
            .bind(self.person.as_str())
            .bind(self.item.as_str())
            .bind(self.amount.value())
    }

    fn from_row(row: &SqliteRow) -> DbResult<Self> {
        Ok(CreditRecord {
            id: row.try_get("id")?,
            person: row.try_get("person")?,
            item: row.try_get("item")?,
            amount: amount(row, "amount")?,
        })
    }
}

impl SqlRow for ExpenseRecord {
    const COLUMNS: &'static [&'static str] = &["name", "amount", "date"];

    fn bind_columns<'q>(&'q self, query: SqliteQuery<'q>) -> SqliteQuery<'q> {
        query
            .bind(self.name.as_str())
            .bind(self.amount.value())
            .bind(self.date)
    }

    fn from_row(row: &SqliteRow) -> DbResult<Self> {
        let date: NaiveDate = row.try_get("date")?;
        Ok(ExpenseRecord {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            amount: amount(row, "amount")?,
            date,
        })
    }
}

// =============================================================================
// SQL Store
// =============================================================================

/// SQLite-backed record store. Obtain via `Database::store()`.
#[derive(Debug, Clone)]
pub struct SqlStore {
    pool: SqlitePool,
}

impl SqlStore {
    /// Creates a new SqlStore.
    pub fn new(pool: SqlitePool) -> Self {
        SqlStore { pool }
    }
}

fn select_sql<R: LedgerRecord + SqlRow>() -> String {
    format!(
        "SELECT id, {} FROM {} WHERE owner_id = ? ORDER BY created_at DESC, seq DESC",
        R::COLUMNS.join(", "),
        R::KIND.table()
    )
}

fn insert_sql<R: LedgerRecord + SqlRow>() -> String {
    let placeholders = vec!["?"; R::COLUMNS.len()].join(", ");
    format!(
        "INSERT INTO {} (id, owner_id, {}, created_at) VALUES (?, ?, {}, ?)",
        R::KIND.table(),
        R::COLUMNS.join(", "),
        placeholders
    )
}

fn update_sql<R: LedgerRecord + SqlRow>() -> String {
    let assignments: Vec<String> = R::COLUMNS.iter().map(|c| format!("{c} = ?")).collect();
    format!(
        "UPDATE {} SET {} WHERE owner_id = ? AND id = ?",
        R::KIND.table(),
        assignments.join(", ")
    )
}

fn delete_sql<R: LedgerRecord>() -> String {
    format!(
        "DELETE FROM {} WHERE owner_id = ? AND id = ?",
        R::KIND.table()
    )
}

#[async_trait]
impl<R> RecordStore<R> for SqlStore
where
    R: LedgerRecord + SqlRow,
{
    async fn list(&self, tenant: &TenantId) -> DbResult<Vec<R>> {
        let sql = select_sql::<R>();
        let rows = sqlx::query(&sql)
            .bind(tenant.as_str())
            .fetch_all(&self.pool)
            .await?;

        let records = rows.iter().map(R::from_row).collect::<DbResult<Vec<R>>>()?;

        debug!(tenant = %tenant, kind = %R::KIND, count = records.len(), "Listed records");
        Ok(records)
    }

    async fn insert(&self, tenant: &TenantId, record: R) -> DbResult<R> {
        let record = if record.id().is_empty() {
            record.with_id(new_record_id())
        } else {
            record
        };

        let sql = insert_sql::<R>();
        let created_at = Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true);

        let query = sqlx::query(&sql)
            .bind(record.id())
            .bind(tenant.as_str());
        record
            .bind_columns(query)
            .bind(created_at)
            .execute(&self.pool)
            .await
            .map_err(|e| match DbError::from(e) {
                DbError::UniqueViolation { .. } => DbError::duplicate("id", record.id()),
                other => other,
            })?;

        debug!(tenant = %tenant, kind = %R::KIND, id = %record.id(), "Inserted record");
        Ok(record)
    }

    async fn update(&self, tenant: &TenantId, id: &str, record: R) -> DbResult<()> {
        let sql = update_sql::<R>();

        let result = record
            .bind_columns(sqlx::query(&sql))
            .bind(tenant.as_str())
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found(R::KIND.to_string(), id));
        }

        debug!(tenant = %tenant, kind = %R::KIND, id = %id, "Updated record");
        Ok(())
    }

    async fn delete(&self, tenant: &TenantId, id: &str) -> DbResult<()> {
        let sql = delete_sql::<R>();

        let result = sqlx::query(&sql)
            .bind(tenant.as_str())
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found(R::KIND.to_string(), id));
        }

        debug!(tenant = %tenant, kind = %R::KIND, id = %id, "Deleted record");
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
