use serde::Serialize;

use crate::misc::Tier;

/// A purchasable plan. The catalog is the single source of truth for what a
/// plan id means; tier and billing duration are never parsed out of the id
/// string anywhere else.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Plan {
    pub id: &'static str,
    pub name: &'static str,
    pub tier: Tier,
    /// Billing period length in months; a verified purchase extends the
    /// subscription by this much.
    pub months: u32,
    pub amount_cents: i64,
}

pub const CATALOG: &[Plan] = &[
    Plan {
        id: "standard-monthly",
        name: "Standard (monthly)",
        tier: Tier::Standard,
        months: 1,
        amount_cents: 500,
    },
    Plan {
        id: "standard-yearly",
        name: "Standard (annual)",
        tier: Tier::Standard,
        months: 12,
        amount_cents: 5000,
    },
    Plan {
        id: "premium-monthly",
        name: "Premium (monthly)",
        tier: Tier::Premium,
        months: 1,
        amount_cents: 1000,
    },
    Plan {
        id: "premium-yearly",
        name: "Premium (annual)",
        tier: Tier::Premium,
        months: 12,
        amount_cents: 10000,
    },
];

pub fn find(plan_id: &str) -> Option<&'static Plan> {
    CATALOG.iter().find(|p| p.id == plan_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn annual_premium_plan_maps_to_twelve_months() {
        let plan = find("premium-yearly").unwrap();
        assert_eq!(plan.tier, Tier::Premium);
        assert_eq!(plan.months, 12);
    }

    #[test]
    fn unknown_plan_id_is_absent() {
        assert!(find("premium-weekly").is_none());
        assert!(find("").is_none());
    }

    #[test]
    fn no_plan_sells_the_free_tier() {
        assert!(CATALOG.iter().all(|p| p.tier != Tier::Free));
    }
}
