use std::sync::Arc;

use actix_web::{Responder, get, post, web};
use common::{error::Res, http::Success};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    dtos::admin::{PaymentDecision, PaymentRequestFilter, ProfileSearch, SubscriptionOverride},
    middleware::admin::AdminId,
    services,
};

/// All ledger entries, newest first, optionally filtered by status.
#[get("/payment-requests")]
pub async fn get_payment_requests(
    pool: web::Data<Arc<PgPool>>,
    query: web::Query<PaymentRequestFilter>,
) -> Res<impl Responder> {
    let requests = services::admin::list_payment_requests(&pool, query.into_inner()).await?;
    Success::ok(requests)
}

/// Drives the verification workflow for one ledger entry.
#[post("/payment-requests/{id}")]
pub async fn post_payment_request(
    admin: web::ReqData<AdminId>,
    pool: web::Data<Arc<PgPool>>,
    path: web::Path<Uuid>,
    req: web::Json<PaymentDecision>,
) -> Res<impl Responder> {
    let request = services::admin::decide_payment_request(
        &pool,
        &admin.0,
        path.into_inner(),
        req.into_inner(),
    )
    .await?;
    Success::ok(request)
}

/// Fuzzy profile search on email, for support lookups.
#[get("/profiles")]
pub async fn get_profiles(
    pool: web::Data<Arc<PgPool>>,
    query: web::Query<ProfileSearch>,
) -> Res<impl Responder> {
    let profiles = services::admin::search_profiles(&pool, &query.email).await?;
    Success::ok(profiles)
}

/// Manual subscription override, bypassing the ledger.
#[post("/subscription")]
pub async fn post_subscription(
    admin: web::ReqData<AdminId>,
    pool: web::Data<Arc<PgPool>>,
    req: web::Json<SubscriptionOverride>,
) -> Res<impl Responder> {
    let profile =
        services::admin::override_subscription(&pool, &admin.0, req.into_inner()).await?;
    Success::ok(profile)
}
