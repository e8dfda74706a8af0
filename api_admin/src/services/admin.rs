use common::{
    error::{AppError, Res},
    misc::{PaymentStatus, Tier},
};
use db::models::{ledger::PaymentRequest, profile::Profile};
use entitlement::workflow;
use sqlx::PgPool;
use uuid::Uuid;

use crate::dtos::admin::{PaymentDecision, PaymentRequestFilter, SubscriptionOverride};

pub async fn list_payment_requests(
    pool: &PgPool,
    filter: PaymentRequestFilter,
) -> Res<Vec<PaymentRequest>> {
    match filter.status {
        None => db::ledger::list_all(pool).await,
        Some(word) => {
            let status: PaymentStatus = word.parse().map_err(AppError::BadRequest)?;
            db::ledger::list_by_status(pool, status).await
        }
    }
}

pub async fn search_profiles(pool: &PgPool, email_fragment: &str) -> Res<Vec<Profile>> {
    if email_fragment.trim().is_empty() {
        return Err(AppError::BadRequest(
            "email search fragment must not be empty".to_string(),
        ));
    }
    db::profile::search_by_email(pool, email_fragment.trim()).await
}

pub async fn override_subscription(
    pool: &PgPool,
    admin_id: &str,
    req: SubscriptionOverride,
) -> Res<Profile> {
    let tier: Tier = req.tier.parse().map_err(AppError::BadRequest)?;
    log::info!(
        "admin {} overriding subscription of user {}",
        admin_id,
        req.user_id
    );
    workflow::override_subscription(pool, &req.user_id, tier, req.months).await
}

pub async fn decide_payment_request(
    pool: &PgPool,
    admin_id: &str,
    request_id: Uuid,
    decision: PaymentDecision,
) -> Res<PaymentRequest> {
    let status: PaymentStatus = decision.status.parse().map_err(AppError::BadRequest)?;
    log::info!(
        "admin {} deciding payment request {}: {}",
        admin_id,
        request_id,
        status
    );
    workflow::apply_decision(pool, request_id, status, decision.admin_note).await
}
