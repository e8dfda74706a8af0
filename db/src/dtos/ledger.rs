use common::misc::Tier;

#[derive(Debug, Clone)]
pub struct NewPaymentRequest {
    pub user_id: String,
    pub plan_id: String,
    pub tier: Tier,
    pub amount_cents: i64,
}
