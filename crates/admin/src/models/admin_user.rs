//! Admin user domain type.

use chrono::{DateTime, Utc};

use tudobacana_core::{AdminUserId, Email};

/// An admin account allowed into the panel.
#[derive(Debug, Clone)]
pub struct AdminUser {
    pub id: AdminUserId,
    pub email: Email,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
