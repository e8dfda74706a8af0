use chrono::{DateTime, Utc};
use common::error::{AppError, Res};
use db::models::profile::Profile;
use sqlx::PgPool;

/// Free premium reads per quota window.
pub const READ_ALLOWANCE: i32 = 3;
/// Rolling window length. The boundary is the stored
/// `premium_read_reset_at`, not a calendar month.
pub const WINDOW_DAYS: i32 = 30;

/// Reads remaining in the current window, never negative.
///
/// A lapsed window reports the full allowance without persisting anything;
/// the stored counter is reset lazily by the next [`consume_read`].
pub fn remaining_reads(profile: &Profile, now: DateTime<Utc>) -> i32 {
    if now >= profile.premium_read_reset_at {
        READ_ALLOWANCE
    } else {
        (READ_ALLOWANCE - profile.premium_read_count).max(0)
    }
}

/// Consumes one free premium read and returns the remaining allowance.
///
/// The decrement-or-reset happens in a single atomic UPDATE on the store
/// (see `db::profile::consume_read`); callers must not pre-compute the new
/// count. The access layer guards that this fires at most once per
/// (user, content) view session.
pub async fn consume_read(pool: &PgPool, user_id: &str) -> Res<i32> {
    db::profile::consume_read(pool, user_id, READ_ALLOWANCE, WINDOW_DAYS)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("no profile for user '{}'", user_id)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn profile(count: i32, reset_at: DateTime<Utc>) -> Profile {
        let now = Utc::now();
        Profile {
            user_id: "user-1".into(),
            email: "reader@example.com".into(),
            display_name: "Reader".into(),
            tier: "free".into(),
            status: "active".into(),
            expires_at: None,
            premium_read_count: count,
            premium_read_reset_at: reset_at,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn fresh_window_reports_full_allowance() {
        let now = Utc::now();
        let p = profile(0, now + Duration::days(30));
        assert_eq!(remaining_reads(&p, now), READ_ALLOWANCE);
    }

    #[test]
    fn consumed_reads_reduce_the_remainder() {
        let now = Utc::now();
        let p = profile(2, now + Duration::days(12));
        assert_eq!(remaining_reads(&p, now), 1);
    }

    #[test]
    fn remainder_never_goes_negative() {
        let now = Utc::now();
        let p = profile(READ_ALLOWANCE + 5, now + Duration::days(1));
        assert_eq!(remaining_reads(&p, now), 0);
    }

    #[test]
    fn lapsed_window_reports_full_allowance_without_mutation() {
        let now = Utc::now();
        let p = profile(READ_ALLOWANCE, now - Duration::seconds(1));
        assert_eq!(remaining_reads(&p, now), READ_ALLOWANCE);
        // the profile itself is untouched; reset happens on next consume
        assert_eq!(p.premium_read_count, READ_ALLOWANCE);
    }

    #[test]
    fn reset_boundary_is_the_stored_timestamp() {
        let boundary = Utc::now();
        let p = profile(READ_ALLOWANCE, boundary);
        assert_eq!(remaining_reads(&p, boundary - Duration::seconds(1)), 0);
        assert_eq!(remaining_reads(&p, boundary), READ_ALLOWANCE);
    }
}
