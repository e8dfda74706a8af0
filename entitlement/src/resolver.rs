use chrono::{DateTime, Utc};
use common::misc::Tier;
use db::models::profile::Profile;

/// Resolves the tier a profile is actually entitled to at `now`.
///
/// Expiration is a derived fact: a stored standard/premium tier whose
/// `expires_at` has passed resolves to free without the row ever being
/// rewritten. A missing profile resolves to free.
pub fn effective_tier(profile: Option<&Profile>, now: DateTime<Utc>) -> Tier {
    let Some(profile) = profile else {
        return Tier::Free;
    };

    let stored = profile.stored_tier();
    if stored == Tier::Free {
        return Tier::Free;
    }

    match profile.expires_at {
        None => stored,
        Some(expires_at) if expires_at > now => stored,
        Some(_) => Tier::Free,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn profile(tier: &str, expires_at: Option<DateTime<Utc>>) -> Profile {
        let now = Utc::now();
        Profile {
            user_id: "user-1".into(),
            email: "reader@example.com".into(),
            display_name: "Reader".into(),
            tier: tier.into(),
            status: "active".into(),
            expires_at,
            premium_read_count: 0,
            premium_read_reset_at: now + Duration::days(30),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn missing_profile_resolves_to_free() {
        assert_eq!(effective_tier(None, Utc::now()), Tier::Free);
    }

    #[test]
    fn unexpired_paid_tier_holds() {
        let now = Utc::now();
        let p = profile("premium", Some(now + Duration::days(10)));
        assert_eq!(effective_tier(Some(&p), now), Tier::Premium);
    }

    #[test]
    fn null_expiration_means_lifetime() {
        let p = profile("standard", None);
        assert_eq!(effective_tier(Some(&p), Utc::now()), Tier::Standard);
    }

    #[test]
    fn expiration_is_monotonic_in_time() {
        let now = Utc::now();
        let p = profile("premium", Some(now + Duration::hours(1)));

        assert_eq!(effective_tier(Some(&p), now), Tier::Premium);
        // once past expiry, free at every later instant
        for days in [0, 1, 30, 365] {
            let later = now + Duration::hours(1) + Duration::days(days);
            assert_eq!(effective_tier(Some(&p), later), Tier::Free);
        }
    }

    #[test]
    fn expiry_boundary_is_exclusive() {
        let now = Utc::now();
        let p = profile("standard", Some(now));
        assert_eq!(effective_tier(Some(&p), now), Tier::Free);
    }

    #[test]
    fn garbage_stored_tier_fails_closed() {
        let p = profile("platinum", None);
        assert_eq!(effective_tier(Some(&p), Utc::now()), Tier::Free);
    }
}
