//! Database-backed engine tests.
//!
//! These need a live Postgres. Run them explicitly:
//!
//! ```bash
//! DATABASE_URL=postgresql://localhost/pressgate_test \
//!     cargo test -p entitlement -- --ignored
//! ```

use chrono::{Duration, Utc};
use common::misc::{PaymentStatus, Tier};
use db::dtos::{ledger::NewPaymentRequest, profile::UpsertProfile};
use entitlement::{quota, workflow};
use sqlx::PgPool;
use uuid::Uuid;

async fn test_pool() -> PgPool {
    let database_url =
        std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for db-backed tests");
    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await
        .expect("failed to connect to test database");
    sqlx::migrate!("../db/migrations")
        .run(&pool)
        .await
        .expect("failed to run migrations");
    pool
}

async fn bootstrap_user(pool: &PgPool) -> String {
    let user_id = format!("test-user-{}", Uuid::new_v4());
    db::profile::upsert_profile(
        pool,
        UpsertProfile {
            user_id: user_id.clone(),
            email: format!("{}@example.com", user_id),
            display_name: "Test Reader".to_string(),
        },
        quota::WINDOW_DAYS,
    )
    .await
    .expect("failed to bootstrap profile");
    user_id
}

async fn set_read_count(pool: &PgPool, user_id: &str, count: i32) {
    sqlx::query("UPDATE profiles SET premium_read_count = $2 WHERE user_id = $1")
        .bind(user_id)
        .bind(count)
        .execute(pool)
        .await
        .expect("failed to seed read count");
}

#[tokio::test]
#[ignore]
async fn concurrent_consume_cannot_overdraw() {
    let pool = test_pool().await;
    let user_id = bootstrap_user(&pool).await;
    set_read_count(&pool, &user_id, quota::READ_ALLOWANCE - 1).await;

    // two tabs racing on the last read
    let (a, b) = tokio::join!(
        quota::consume_read(&pool, &user_id),
        quota::consume_read(&pool, &user_id),
    );
    let (a, b) = (a.expect("first consume failed"), b.expect("second consume failed"));

    assert!(a >= 0 && b >= 0, "remaining must never be negative");
    assert_eq!(a.min(b), 0);

    let profile = db::profile::get_profile(&pool, &user_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(profile.premium_read_count, quota::READ_ALLOWANCE);
}

#[tokio::test]
#[ignore]
async fn lapsed_window_resets_on_consume() {
    let pool = test_pool().await;
    let user_id = bootstrap_user(&pool).await;
    set_read_count(&pool, &user_id, quota::READ_ALLOWANCE).await;
    sqlx::query("UPDATE profiles SET premium_read_reset_at = $2 WHERE user_id = $1")
        .bind(&user_id)
        .bind(Utc::now() - Duration::hours(1))
        .execute(&pool)
        .await
        .unwrap();

    let remaining = quota::consume_read(&pool, &user_id).await.unwrap();
    assert_eq!(remaining, quota::READ_ALLOWANCE - 1);

    let profile = db::profile::get_profile(&pool, &user_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(profile.premium_read_count, 1);
    assert!(profile.premium_read_reset_at > Utc::now());
}

#[tokio::test]
#[ignore]
async fn verifying_an_annual_premium_purchase_upgrades_the_profile() {
    let pool = test_pool().await;
    let user_id = bootstrap_user(&pool).await;
    let plan = common::plans::find("premium-yearly").unwrap();

    let request = db::ledger::insert_request(
        &pool,
        NewPaymentRequest {
            user_id: user_id.clone(),
            plan_id: plan.id.to_string(),
            tier: plan.tier,
            amount_cents: plan.amount_cents,
        },
    )
    .await
    .unwrap();

    let decided = workflow::apply_decision(&pool, request.id, PaymentStatus::Verified, None)
        .await
        .unwrap();
    assert_eq!(decided.status, "verified");

    let profile = db::profile::get_profile(&pool, &user_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(profile.stored_tier(), Tier::Premium);
    assert_eq!(profile.status, "active");

    let expires_at = profile.expires_at.expect("expiration must be set");
    let days = (expires_at - Utc::now()).num_days();
    assert!((360..=370).contains(&days), "expected ~1 year, got {} days", days);
}

#[tokio::test]
#[ignore]
async fn verifying_a_renewal_extends_the_current_expiry() {
    let pool = test_pool().await;
    let user_id = bootstrap_user(&pool).await;
    let plan = common::plans::find("premium-monthly").unwrap();

    // mid-term subscriber with paid time left
    workflow::override_subscription(&pool, &user_id, Tier::Premium, 1)
        .await
        .unwrap();
    let before = db::profile::get_profile(&pool, &user_id)
        .await
        .unwrap()
        .unwrap()
        .expires_at
        .expect("override must set an expiration");

    let request = db::ledger::insert_request(
        &pool,
        NewPaymentRequest {
            user_id: user_id.clone(),
            plan_id: plan.id.to_string(),
            tier: plan.tier,
            amount_cents: plan.amount_cents,
        },
    )
    .await
    .unwrap();
    workflow::apply_decision(&pool, request.id, PaymentStatus::Verified, None)
        .await
        .unwrap();

    let after = db::profile::get_profile(&pool, &user_id)
        .await
        .unwrap()
        .unwrap()
        .expires_at
        .expect("verification must keep an expiration");

    // the remaining month is preserved, not restarted
    let gained = (after - before).num_days();
    assert!(
        (27..=32).contains(&gained),
        "expected ~1 extra month on top of the old expiry, got {} days",
        gained
    );
}

#[tokio::test]
#[ignore]
async fn moving_a_request_back_to_pending_is_refused() {
    let pool = test_pool().await;
    let user_id = bootstrap_user(&pool).await;
    let plan = common::plans::find("standard-yearly").unwrap();

    let request = db::ledger::insert_request(
        &pool,
        NewPaymentRequest {
            user_id: user_id.clone(),
            plan_id: plan.id.to_string(),
            tier: plan.tier,
            amount_cents: plan.amount_cents,
        },
    )
    .await
    .unwrap();

    let result = workflow::apply_decision(&pool, request.id, PaymentStatus::Pending, None).await;
    assert!(result.is_err(), "pending is not a valid decision target");

    let stored = db::ledger::get_request(&pool, request.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.status, "pending", "the entry must be untouched");
}

#[tokio::test]
#[ignore]
async fn rejecting_a_purchase_leaves_the_profile_alone() {
    let pool = test_pool().await;
    let user_id = bootstrap_user(&pool).await;
    let plan = common::plans::find("standard-monthly").unwrap();

    let request = db::ledger::insert_request(
        &pool,
        NewPaymentRequest {
            user_id: user_id.clone(),
            plan_id: plan.id.to_string(),
            tier: plan.tier,
            amount_cents: plan.amount_cents,
        },
    )
    .await
    .unwrap();

    let decided = workflow::apply_decision(
        &pool,
        request.id,
        PaymentStatus::Rejected,
        Some("card declined".to_string()),
    )
    .await
    .unwrap();
    assert_eq!(decided.status, "rejected");
    assert_eq!(decided.admin_note.as_deref(), Some("card declined"));

    let profile = db::profile::get_profile(&pool, &user_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(profile.stored_tier(), Tier::Free);
    assert!(profile.expires_at.is_none());
}

#[tokio::test]
#[ignore]
async fn re_deciding_a_decided_request_is_refused() {
    let pool = test_pool().await;
    let user_id = bootstrap_user(&pool).await;
    let plan = common::plans::find("premium-monthly").unwrap();

    let request = db::ledger::insert_request(
        &pool,
        NewPaymentRequest {
            user_id: user_id.clone(),
            plan_id: plan.id.to_string(),
            tier: plan.tier,
            amount_cents: plan.amount_cents,
        },
    )
    .await
    .unwrap();

    workflow::apply_decision(&pool, request.id, PaymentStatus::Verified, None)
        .await
        .unwrap();

    let second = workflow::apply_decision(&pool, request.id, PaymentStatus::Rejected, None).await;
    assert!(second.is_err(), "second decision must be refused");

    // the original decision is untouched
    let stored = db::ledger::get_request(&pool, request.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.status, "verified");
}
