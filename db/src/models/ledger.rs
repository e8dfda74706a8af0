use chrono::{DateTime, Utc};
use common::misc::PaymentStatus;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// One purchase attempt. Rows are never deleted; after insert only
/// `status`, `admin_note` and `updated_at` may change.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PaymentRequest {
    pub id: Uuid,
    pub user_id: String,
    /// Catalog key; tier and billing duration come from the catalog entry,
    /// never from parsing this string.
    pub plan_id: String,
    pub tier: String,
    pub amount_cents: i64,
    pub status: String,
    pub admin_note: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PaymentRequest {
    pub fn payment_status(&self) -> Result<PaymentStatus, String> {
        self.status.parse()
    }
}
