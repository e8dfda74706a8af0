use chrono::{Months, Utc};
use common::{
    error::{AppError, Res},
    misc::{PaymentStatus, ProfileStatus, Tier},
    plans,
};
use db::{
    dtos::profile::SubscriptionUpdate,
    models::{ledger::PaymentRequest, profile::Profile},
};
use sqlx::PgPool;
use uuid::Uuid;

use crate::quota::WINDOW_DAYS;

/// Drives one ledger entry through the verification state machine.
///
/// Verify and reject require the entry to still be pending; the ledger
/// UPDATE itself re-checks that, so two administrators racing on the same
/// entry cannot both win. A verify writes the ledger first and the profile
/// second; if the profile write fails the error is surfaced and the fix is
/// the manual override path, since re-invoking the decision will (correctly)
/// report the entry as already decided.
pub async fn apply_decision(
    pool: &PgPool,
    request_id: Uuid,
    new_status: PaymentStatus,
    admin_note: Option<String>,
) -> Res<PaymentRequest> {
    let current = db::ledger::get_request(pool, request_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("payment request {}", request_id)))?;
    let current_status = current
        .payment_status()
        .map_err(AppError::Internal)?;

    match new_status {
        PaymentStatus::Pending => Err(AppError::BadRequest(
            "a payment request cannot be moved back to pending".to_string(),
        )),
        _ if !current_status.can_transition_to(new_status) => Err(AppError::Conflict(format!(
            "payment request {} is {}, cannot become {}",
            request_id, current_status, new_status
        ))),
        PaymentStatus::Verified => {
            let plan = plans::find(&current.plan_id).ok_or_else(|| {
                AppError::BadRequest(format!("unknown plan '{}'", current.plan_id))
            })?;

            let updated = db::ledger::decide_if_pending(pool, request_id, new_status, admin_note)
                .await?
                .ok_or_else(|| concurrent_decision(request_id))?;

            // a mid-term renewal extends the remaining paid time rather
            // than restarting the clock at the verification instant
            let now = Utc::now();
            let base = db::profile::get_profile(pool, &updated.user_id)
                .await?
                .and_then(|p| p.expires_at)
                .filter(|t| *t > now)
                .unwrap_or(now);
            let expires_at = base
                .checked_add_months(Months::new(plan.months))
                .ok_or_else(|| AppError::Internal("expiration date overflow".to_string()))?;

            db::profile::set_subscription(
                pool,
                SubscriptionUpdate {
                    user_id: updated.user_id.clone(),
                    tier: plan.tier,
                    status: ProfileStatus::Active,
                    expires_at: Some(expires_at),
                },
                WINDOW_DAYS,
            )
            .await?;

            log::info!(
                "verified payment request {} for user {}: {} until {}",
                updated.id,
                updated.user_id,
                plan.tier,
                expires_at
            );
            Ok(updated)
        }
        PaymentStatus::Rejected => {
            let updated = db::ledger::decide_if_pending(pool, request_id, new_status, admin_note)
                .await?
                .ok_or_else(|| concurrent_decision(request_id))?;
            log::info!(
                "rejected payment request {} for user {}",
                updated.id,
                updated.user_id
            );
            Ok(updated)
        }
        PaymentStatus::Refunded => db::ledger::mark_refunded(pool, request_id, admin_note)
            .await?
            .ok_or_else(|| concurrent_decision(request_id)),
    }
}

fn concurrent_decision(request_id: Uuid) -> AppError {
    AppError::Conflict(format!(
        "payment request {} was decided by another administrator",
        request_id
    ))
}

/// Support path: set a user's subscription directly, bypassing the ledger.
/// `months = 0` (or tier free) clears the expiration instead of computing
/// one in the past.
pub async fn override_subscription(
    pool: &PgPool,
    user_id: &str,
    tier: Tier,
    months: u32,
) -> Res<Profile> {
    let expires_at = if tier == Tier::Free || months == 0 {
        None
    } else {
        Some(
            Utc::now()
                .checked_add_months(Months::new(months))
                .ok_or_else(|| AppError::Internal("expiration date overflow".to_string()))?,
        )
    };

    let profile = db::profile::set_subscription(
        pool,
        SubscriptionUpdate {
            user_id: user_id.to_string(),
            tier,
            status: ProfileStatus::Active,
            expires_at,
        },
        WINDOW_DAYS,
    )
    .await?;

    log::info!(
        "manual subscription override for user {}: tier {} for {} months",
        user_id,
        tier,
        months
    );
    Ok(profile)
}
