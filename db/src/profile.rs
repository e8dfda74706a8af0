use common::error::{AppError, Res};
use sqlx::{Executor, Postgres};

use crate::{
    dtos::profile::{SubscriptionUpdate, UpsertProfile},
    models::profile::Profile,
};

pub async fn get_profile<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    user_id: &str,
) -> Res<Option<Profile>> {
    sqlx::query_as::<_, Profile>("SELECT * FROM profiles WHERE user_id = $1")
        .bind(user_id)
        .fetch_optional(executor)
        .await
        .map_err(AppError::from)
}

/// Creates the profile on first sight of an identity, or refreshes the
/// identity-provider fields on subsequent sessions. Subscription fields are
/// untouched on conflict.
pub async fn upsert_profile<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    data: UpsertProfile,
    window_days: i32,
) -> Res<Profile> {
    sqlx::query_as::<_, Profile>(
        r#"
        INSERT INTO profiles (user_id, email, display_name, premium_read_reset_at)
        VALUES ($1, $2, $3, now() + make_interval(days => $4))
        ON CONFLICT (user_id) DO UPDATE
        SET email = EXCLUDED.email,
            display_name = EXCLUDED.display_name,
            updated_at = now()
        RETURNING *
        "#,
    )
    .bind(data.user_id)
    .bind(data.email)
    .bind(data.display_name)
    .bind(window_days)
    .fetch_one(executor)
    .await
    .map_err(AppError::from)
}

/// Writes the subscription fields, creating the profile if the identity has
/// never opened a session (support may verify a payment before first login).
pub async fn set_subscription<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    data: SubscriptionUpdate,
    window_days: i32,
) -> Res<Profile> {
    sqlx::query_as::<_, Profile>(
        r#"
        INSERT INTO profiles (user_id, tier, status, expires_at, premium_read_reset_at)
        VALUES ($1, $2, $3, $4, now() + make_interval(days => $5))
        ON CONFLICT (user_id) DO UPDATE
        SET tier = EXCLUDED.tier,
            status = EXCLUDED.status,
            expires_at = EXCLUDED.expires_at,
            updated_at = now()
        RETURNING *
        "#,
    )
    .bind(data.user_id)
    .bind(data.tier.to_string())
    .bind(data.status.to_string())
    .bind(data.expires_at)
    .bind(window_days)
    .fetch_one(executor)
    .await
    .map_err(AppError::from)
}

/// Consumes one free premium read. The whole read-or-reset decision runs
/// server-side in a single UPDATE so that two racing calls can never
/// double-count; a client read-modify-write is not an option here.
///
/// Returns the remaining allowance after consumption, or None when no
/// profile exists for `user_id`.
pub async fn consume_read<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    user_id: &str,
    allowance: i32,
    window_days: i32,
) -> Res<Option<i32>> {
    sqlx::query_scalar::<_, i32>(
        r#"
        UPDATE profiles
        SET premium_read_count = CASE
                WHEN premium_read_reset_at <= now() THEN 1
                ELSE LEAST(premium_read_count + 1, $2)
            END,
            premium_read_reset_at = CASE
                WHEN premium_read_reset_at <= now() THEN now() + make_interval(days => $3)
                ELSE premium_read_reset_at
            END,
            updated_at = now()
        WHERE user_id = $1
        RETURNING GREATEST($2 - premium_read_count, 0)
        "#,
    )
    .bind(user_id)
    .bind(allowance)
    .bind(window_days)
    .fetch_optional(executor)
    .await
    .map_err(AppError::from)
}

pub async fn search_by_email<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    email_fragment: &str,
) -> Res<Vec<Profile>> {
    let pattern = format!("%{}%", email_fragment);
    sqlx::query_as::<_, Profile>(
        "SELECT * FROM profiles WHERE email ILIKE $1 ORDER BY updated_at DESC LIMIT 50",
    )
    .bind(pattern)
    .fetch_all(executor)
    .await
    .map_err(AppError::from)
}
