//! PostgreSQL implementation of the order ledger.
//!
//! The pool connects lazily: an unreachable database surfaces as a
//! `LedgerError` on the first checkout rather than at construction, and
//! the cart keeps its items so the user can retry once the ledger is back.

use botique_core::checkout::ledger::OrderLedger;
use botique_types::cart::{LineItem, UserId};
use botique_types::error::LedgerError;
use botique_types::order::{OrderId, OrderLine, OrderRecord, UserProfile};
use chrono::{DateTime, Utc};
use sqlx::Row;
use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing::info;

/// Maximum pooled connections to the ledger database.
const MAX_CONNECTIONS: u32 = 5;

/// PostgreSQL [`OrderLedger`].
pub struct PgOrderLedger {
    pool: PgPool,
}

impl PgOrderLedger {
    /// Create a ledger over a lazily-connected pool.
    ///
    /// Fails only on a malformed DSN; no connection is attempted here.
    pub fn connect(database_url: &str) -> Result<Self, LedgerError> {
        let pool = PgPoolOptions::new()
            .max_connections(MAX_CONNECTIONS)
            .connect_lazy(database_url)
            .map_err(|err| LedgerError::Connection(err.to_string()))?;
        Ok(Self { pool })
    }

    /// Apply the ledger schema migrations.
    pub async fn run_migrations(&self) -> Result<(), LedgerError> {
        sqlx::migrate!("../../migrations")
            .run(&self.pool)
            .await
            .map_err(|err| LedgerError::Query(err.to_string()))?;
        info!("Ledger migrations applied");
        Ok(())
    }
}

/// Classify a driver error into the ledger error taxonomy.
fn classify(err: sqlx::Error) -> LedgerError {
    match &err {
        sqlx::Error::Database(db)
            if db.is_unique_violation()
                || db.is_foreign_key_violation()
                || db.is_check_violation() =>
        {
            LedgerError::Constraint(db.to_string())
        }
        sqlx::Error::Io(_)
        | sqlx::Error::Tls(_)
        | sqlx::Error::PoolTimedOut
        | sqlx::Error::PoolClosed => LedgerError::Connection(err.to_string()),
        _ => LedgerError::Query(err.to_string()),
    }
}

impl OrderLedger for PgOrderLedger {
    async fn upsert_user(&self, user: UserId, profile: &UserProfile) -> Result<(), LedgerError> {
        sqlx::query(
            r#"
            INSERT INTO users (user_id, username, first_name, last_name)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (user_id) DO NOTHING
            "#,
        )
        .bind(user.0)
        .bind(profile.username.as_deref())
        .bind(&profile.first_name)
        .bind(profile.last_name.as_deref())
        .execute(&self.pool)
        .await
        .map_err(classify)?;

        Ok(())
    }

    async fn create_order(&self, user: UserId, total: i64) -> Result<OrderId, LedgerError> {
        let row = sqlx::query(
            "INSERT INTO orders (user_id, total_price) VALUES ($1, $2) RETURNING order_id",
        )
        .bind(user.0)
        .bind(total)
        .fetch_one(&self.pool)
        .await
        .map_err(classify)?;

        let order_id: i64 = row.try_get("order_id").map_err(classify)?;
        Ok(OrderId(order_id))
    }

    async fn add_order_line(&self, order: OrderId, line: &LineItem) -> Result<(), LedgerError> {
        sqlx::query(
            r#"
            INSERT INTO order_items (order_id, product_code, quantity, price_per_unit)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(order.0)
        .bind(&line.code)
        .bind(line.quantity as i32)
        .bind(line.unit_price)
        .execute(&self.pool)
        .await
        .map_err(classify)?;

        Ok(())
    }

    async fn list_orders(&self, user: UserId) -> Result<Vec<OrderRecord>, LedgerError> {
        // Inner join on purpose: a header that never got its lines (failed
        // checkout) stays out of the user's history.
        let rows = sqlx::query(
            r#"
            SELECT o.order_id, o.total_price, o.created_at,
                   i.product_code, i.quantity, i.price_per_unit
            FROM orders o
            JOIN order_items i ON i.order_id = o.order_id
            WHERE o.user_id = $1
            ORDER BY o.created_at DESC, o.order_id DESC
            "#,
        )
        .bind(user.0)
        .fetch_all(&self.pool)
        .await
        .map_err(classify)?;

        // Rows arrive grouped by order; start a new record whenever the
        // order id changes.
        let mut records: Vec<OrderRecord> = Vec::new();
        for row in rows {
            let order_id: i64 = row.try_get("order_id").map_err(classify)?;
            let line = OrderLine {
                code: row.try_get("product_code").map_err(classify)?,
                quantity: row.try_get::<i32, _>("quantity").map_err(classify)? as u32,
                unit_price: row.try_get("price_per_unit").map_err(classify)?,
            };

            let same_order = records
                .last()
                .is_some_and(|record| record.order_id.0 == order_id);
            if !same_order {
                let created_at: DateTime<Utc> = row.try_get("created_at").map_err(classify)?;
                records.push(OrderRecord {
                    order_id: OrderId(order_id),
                    total: row.try_get("total_price").map_err(classify)?,
                    created_at,
                    lines: Vec::new(),
                });
            }
            if let Some(record) = records.last_mut() {
                record.lines.push(line);
            }
        }

        Ok(records)
    }
}
