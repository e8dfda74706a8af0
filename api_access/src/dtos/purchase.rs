use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct PurchaseRequest {
    pub plan_id: String,
}
