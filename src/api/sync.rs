use actix_web::{web, HttpResponse};

use crate::{
    database::DocumentStore,
    models::{ChangeSet, PullQuery, PushSummary},
    services::sync_service,
    utils::AppError,
};

/// POST /api/sync/changes - Upserts a client batch (collection -> id -> fields)
#[utoipa::path(
    post,
    path = "/api/sync/changes",
    tag = "Sync",
    request_body = Object,
    responses(
        (status = 200, description = "Batch written", body = PushSummary),
        (status = 400, description = "Malformed batch or invalid collection/document name")
    )
)]
pub async fn push_changes(
    store: web::Data<dyn DocumentStore>,
    body: web::Json<ChangeSet>,
) -> Result<HttpResponse, AppError> {
    let changes = body.into_inner();
    log::info!(
        "📥 POST /api/sync/changes - {} collections, {} documents",
        changes.len(),
        changes.values().map(|docs| docs.len()).sum::<usize>()
    );

    let summary = sync_service::push_changes(store.get_ref(), changes).await?;
    Ok(HttpResponse::Ok().json(summary))
}

/// GET /api/sync/changes?lastSyncTimestamp=<epoch-ms>
#[utoipa::path(
    get,
    path = "/api/sync/changes",
    tag = "Sync",
    params(("lastSyncTimestamp" = i64, Query, description = "Client watermark in epoch milliseconds")),
    responses(
        (status = 200, description = "Documents changed after the watermark, keyed by collection then id"),
        (status = 400, description = "Missing or non-numeric watermark")
    )
)]
pub async fn pull_changes(
    store: web::Data<dyn DocumentStore>,
    query: web::Query<PullQuery>,
) -> Result<HttpResponse, AppError> {
    log::info!("📤 GET /api/sync/changes - since {}", query.last_sync_timestamp);

    let changes = sync_service::pull_changes(store.get_ref(), query.last_sync_timestamp).await?;
    Ok(HttpResponse::Ok().json(changes))
}

/// GET /api/sync/users/{userId} - User, their events and transactions in one response
#[utoipa::path(
    get,
    path = "/api/sync/users/{userId}",
    tag = "Sync",
    params(("userId" = String, Path, description = "User id")),
    responses(
        (status = 200, description = "Bundle keyed by collection then id"),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_user_bundle(
    store: web::Data<dyn DocumentStore>,
    user_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    log::info!("📦 GET /api/sync/users/{}", user_id);

    let bundle = sync_service::get_user_bundle(store.get_ref(), &user_id).await?;
    Ok(HttpResponse::Ok().json(bundle))
}
