use common::{
    error::{AppError, Res},
    plans,
};
use db::{dtos::ledger::NewPaymentRequest, models::ledger::PaymentRequest};
use sqlx::PgPool;

use crate::{dtos::purchase::PurchaseRequest, identity::Identity};

/// Opens a pending ledger entry for a purchase attempt. Tier and amount are
/// taken from the catalog, never from the client.
pub async fn create_purchase(
    pool: &PgPool,
    identity: Identity,
    req: PurchaseRequest,
) -> Res<PaymentRequest> {
    let plan = plans::find(&req.plan_id)
        .ok_or_else(|| AppError::BadRequest(format!("unknown plan '{}'", req.plan_id)))?;

    let request = db::ledger::insert_request(
        pool,
        NewPaymentRequest {
            user_id: identity.user_id,
            plan_id: plan.id.to_string(),
            tier: plan.tier,
            amount_cents: plan.amount_cents,
        },
    )
    .await?;

    log::info!(
        "payment request {} opened by user {} for plan {}",
        request.id,
        request.user_id,
        request.plan_id
    );
    Ok(request)
}

pub async fn list_purchases(pool: &PgPool, identity: &Identity) -> Res<Vec<PaymentRequest>> {
    db::ledger::list_by_user(pool, &identity.user_id).await
}
