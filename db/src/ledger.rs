use common::{
    error::{AppError, Res},
    misc::PaymentStatus,
};
use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::{dtos::ledger::NewPaymentRequest, models::ledger::PaymentRequest};

pub async fn insert_request<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    data: NewPaymentRequest,
) -> Res<PaymentRequest> {
    sqlx::query_as::<_, PaymentRequest>(
        r#"
        INSERT INTO payment_requests (id, user_id, plan_id, tier, amount_cents)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(data.user_id)
    .bind(data.plan_id)
    .bind(data.tier.to_string())
    .bind(data.amount_cents)
    .fetch_one(executor)
    .await
    .map_err(AppError::from)
}

pub async fn get_request<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    id: Uuid,
) -> Res<Option<PaymentRequest>> {
    sqlx::query_as::<_, PaymentRequest>("SELECT * FROM payment_requests WHERE id = $1")
        .bind(id)
        .fetch_optional(executor)
        .await
        .map_err(AppError::from)
}

pub async fn list_all<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
) -> Res<Vec<PaymentRequest>> {
    sqlx::query_as::<_, PaymentRequest>(
        "SELECT * FROM payment_requests ORDER BY created_at DESC",
    )
    .fetch_all(executor)
    .await
    .map_err(AppError::from)
}

pub async fn list_by_status<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    status: PaymentStatus,
) -> Res<Vec<PaymentRequest>> {
    sqlx::query_as::<_, PaymentRequest>(
        "SELECT * FROM payment_requests WHERE status = $1 ORDER BY created_at DESC",
    )
    .bind(status.to_string())
    .fetch_all(executor)
    .await
    .map_err(AppError::from)
}

pub async fn list_by_user<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    user_id: &str,
) -> Res<Vec<PaymentRequest>> {
    sqlx::query_as::<_, PaymentRequest>(
        "SELECT * FROM payment_requests WHERE user_id = $1 ORDER BY created_at DESC",
    )
    .bind(user_id)
    .fetch_all(executor)
    .await
    .map_err(AppError::from)
}

/// Applies a pending -> verified|rejected transition. The WHERE clause is
/// the optimistic guard: if another administrator already decided this
/// entry, zero rows match and None comes back, leaving their decision
/// intact.
pub async fn decide_if_pending<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    id: Uuid,
    new_status: PaymentStatus,
    admin_note: Option<String>,
) -> Res<Option<PaymentRequest>> {
    sqlx::query_as::<_, PaymentRequest>(
        r#"
        UPDATE payment_requests
        SET status = $2,
            admin_note = COALESCE($3, admin_note),
            updated_at = now()
        WHERE id = $1 AND status = 'pending'
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(new_status.to_string())
    .bind(admin_note)
    .fetch_optional(executor)
    .await
    .map_err(AppError::from)
}

/// Marks a decided entry refunded. Same optimistic shape as
/// [`decide_if_pending`]: only verified or rejected entries match.
pub async fn mark_refunded<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    id: Uuid,
    admin_note: Option<String>,
) -> Res<Option<PaymentRequest>> {
    sqlx::query_as::<_, PaymentRequest>(
        r#"
        UPDATE payment_requests
        SET status = 'refunded',
            admin_note = COALESCE($2, admin_note),
            updated_at = now()
        WHERE id = $1 AND status IN ('verified', 'rejected')
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(admin_note)
    .fetch_optional(executor)
    .await
    .map_err(AppError::from)
}
