use std::sync::Arc;

use actix_web::{Responder, get, post, web};
use common::{error::Res, http::Success};
use sqlx::PgPool;

use crate::{dtos::purchase::PurchaseRequest, identity::Viewer, services};

/// Opens a purchase attempt for the calling user. The request lands in the
/// ledger as pending and stays there until an administrator decides it.
#[post("/purchase")]
pub async fn post_purchase(
    viewer: Viewer,
    pool: web::Data<Arc<PgPool>>,
    req: web::Json<PurchaseRequest>,
) -> Res<impl Responder> {
    let identity = viewer.require()?;
    let request = services::purchase::create_purchase(&pool, identity, req.into_inner()).await?;
    Success::created(request)
}

/// The calling user's purchase attempts, newest first.
#[get("/purchases")]
pub async fn get_purchases(viewer: Viewer, pool: web::Data<Arc<PgPool>>) -> Res<impl Responder> {
    let identity = viewer.require()?;
    let requests = services::purchase::list_purchases(&pool, &identity).await?;
    Success::ok(requests)
}
