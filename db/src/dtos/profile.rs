use chrono::{DateTime, Utc};
use common::misc::{ProfileStatus, Tier};

/// Session-bootstrap upsert input. New identities start at tier free.
#[derive(Debug, Clone)]
pub struct UpsertProfile {
    pub user_id: String,
    pub email: String,
    pub display_name: String,
}

/// Subscription mutation applied by the verification workflow or a manual
/// administrative override.
#[derive(Debug, Clone)]
pub struct SubscriptionUpdate {
    pub user_id: String,
    pub tier: Tier,
    pub status: ProfileStatus,
    pub expires_at: Option<DateTime<Utc>>,
}
