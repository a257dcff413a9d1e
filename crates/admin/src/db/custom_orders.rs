//! Custom-order request queries.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use tudobacana_core::{CustomOrder, CustomOrderId};

use super::RepositoryError;

#[derive(Debug, sqlx::FromRow)]
struct CustomOrderRow {
    id: Uuid,
    name: String,
    email: String,
    whatsapp: Option<String>,
    description: String,
    status: String,
    created_at: DateTime<Utc>,
}

// Emails are shown as stored. The table has no CHECK on them and one
// loose address must not hide the rest of the list.
impl From<CustomOrderRow> for CustomOrder {
    fn from(row: CustomOrderRow) -> Self {
        Self {
            id: CustomOrderId::new(row.id),
            name: row.name,
            email: row.email,
            whatsapp: row.whatsapp.filter(|phone| !phone.trim().is_empty()),
            description: row.description,
            status: row.status,
            created_at: row.created_at,
        }
    }
}

/// Repository for custom-order requests.
pub struct CustomOrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CustomOrderRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// All requests, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_all(&self) -> Result<Vec<CustomOrder>, RepositoryError> {
        let rows = sqlx::query_as::<_, CustomOrderRow>(
            r"
            SELECT id, name, email, whatsapp, description, status, created_at
            FROM custom_orders
            ORDER BY created_at DESC
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(CustomOrder::from).collect())
    }
}
