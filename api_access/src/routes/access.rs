use std::sync::Arc;

use actix_web::{Responder, get, post, web};
use common::{error::Res, http::Success};
use sqlx::PgPool;

use crate::{dtos::access::ContentQuery, identity::Viewer, services};

/// Profile bootstrap on session establishment. First sight of an identity
/// creates a free-tier profile; later sessions refresh email/display name.
#[post("/session")]
pub async fn post_session(viewer: Viewer, pool: web::Data<Arc<PgPool>>) -> Res<impl Responder> {
    let identity = viewer.require()?;
    let profile = services::access::bootstrap_session(&pool, identity).await?;
    Success::ok(profile)
}

/// Access decision for one content item. Anonymous callers are allowed;
/// they get the preview with the create-account prompt on premium content.
#[get("/content/{content_id}")]
pub async fn get_content(
    viewer: Viewer,
    pool: web::Data<Arc<PgPool>>,
    path: web::Path<String>,
    query: web::Query<ContentQuery>,
) -> impl Responder {
    let content_id = path.into_inner();
    let response =
        services::access::check_access(&pool, viewer.0.as_ref(), &content_id, &query).await;
    Success::ok(response)
}

/// Subscription state for the calling user: profile, effective tier and
/// remaining free reads, with an `is_stale` flag when the store was
/// unreachable.
#[get("/subscription")]
pub async fn get_subscription(viewer: Viewer, pool: web::Data<Arc<PgPool>>) -> Res<impl Responder> {
    let identity = viewer.require()?;
    let response = services::access::subscription_status(&pool, &identity).await;
    Success::ok(response)
}
