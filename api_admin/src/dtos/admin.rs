use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct PaymentRequestFilter {
    /// Optional status word (pending, verified, rejected, refunded).
    pub status: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ProfileSearch {
    pub email: String,
}

#[derive(Debug, Deserialize)]
pub struct SubscriptionOverride {
    pub user_id: String,
    /// Tier word (free, standard, premium).
    pub tier: String,
    pub months: u32,
}

#[derive(Debug, Deserialize)]
pub struct PaymentDecision {
    /// Target status word (verified, rejected, refunded).
    pub status: String,
    pub admin_note: Option<String>,
}
