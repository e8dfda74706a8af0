use chrono::{DateTime, Utc};
use common::misc::{ProfileStatus, Tier};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Per-identity subscription record. `user_id` is the opaque key issued by
/// the identity provider; this subsystem never interprets it.
///
/// `tier` and `status` are stored as text; parsing failures fall back to the
/// most restrictive reading (free / pending) rather than erroring a request.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Profile {
    pub user_id: String,
    pub email: String,
    pub display_name: String,
    pub tier: String,
    pub status: String,
    /// None means no expiration is tracked (free or lifetime grants).
    pub expires_at: Option<DateTime<Utc>>,
    /// Premium reads consumed in the current quota window.
    pub premium_read_count: i32,
    /// Start of the next quota window. A lapsed value is reset lazily, on
    /// the next consumption, never by a background job.
    pub premium_read_reset_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Profile {
    pub fn stored_tier(&self) -> Tier {
        self.tier.parse().unwrap_or(Tier::Free)
    }

    pub fn profile_status(&self) -> ProfileStatus {
        self.status.parse().unwrap_or(ProfileStatus::Pending)
    }
}
