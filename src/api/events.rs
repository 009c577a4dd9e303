use actix_web::{web, HttpResponse};

use crate::{
    database::DocumentStore,
    models::Event,
    services::event_service,
    utils::AppError,
};

/// POST /events
#[utoipa::path(
    post,
    path = "/events",
    tag = "Events",
    request_body = Event,
    responses((status = 200, description = "Created event", body = Event))
)]
pub async fn create_event(
    store: web::Data<dyn DocumentStore>,
    body: web::Json<Event>,
) -> Result<HttpResponse, AppError> {
    log::info!("📝 POST /events");

    let created = event_service::create_event(store.get_ref(), body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(created))
}

/// GET /events/{id}
#[utoipa::path(
    get,
    path = "/events/{id}",
    tag = "Events",
    params(("id" = String, Path, description = "Event id")),
    responses(
        (status = 200, description = "Event", body = Event),
        (status = 404, description = "Event not found")
    )
)]
pub async fn get_event(
    store: web::Data<dyn DocumentStore>,
    event_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    log::info!("🔎 GET /events/{}", event_id);

    let event = event_service::get_event(store.get_ref(), &event_id).await?;
    Ok(HttpResponse::Ok().json(event))
}

/// GET /events/member/{userId} - Events the user is a member of
#[utoipa::path(
    get,
    path = "/events/member/{userId}",
    tag = "Events",
    params(("userId" = String, Path, description = "Member user id")),
    responses((status = 200, description = "Events", body = [Event]))
)]
pub async fn get_member_events(
    store: web::Data<dyn DocumentStore>,
    user_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    log::info!("📋 GET /events/member/{}", user_id);

    let events = event_service::get_member_events(store.get_ref(), &user_id).await?;
    Ok(HttpResponse::Ok().json(events))
}

/// GET /events/creator/{userId} - Events created by the user
#[utoipa::path(
    get,
    path = "/events/creator/{userId}",
    tag = "Events",
    params(("userId" = String, Path, description = "Creator user id")),
    responses((status = 200, description = "Events", body = [Event]))
)]
pub async fn get_created_events(
    store: web::Data<dyn DocumentStore>,
    user_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    log::info!("📋 GET /events/creator/{}", user_id);

    let events = event_service::get_created_events(store.get_ref(), &user_id).await?;
    Ok(HttpResponse::Ok().json(events))
}

/// PUT /events/{id} - Full overwrite
#[utoipa::path(
    put,
    path = "/events/{id}",
    tag = "Events",
    params(("id" = String, Path, description = "Event id")),
    request_body = Event,
    responses(
        (status = 200, description = "Updated event", body = Event),
        (status = 404, description = "Event not found")
    )
)]
pub async fn update_event(
    store: web::Data<dyn DocumentStore>,
    event_id: web::Path<String>,
    body: web::Json<Event>,
) -> Result<HttpResponse, AppError> {
    log::info!("🔧 PUT /events/{}", event_id);

    let updated = event_service::update_event(store.get_ref(), &event_id, body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(updated))
}

/// DELETE /events/{id}
#[utoipa::path(
    delete,
    path = "/events/{id}",
    tag = "Events",
    params(("id" = String, Path, description = "Event id")),
    responses(
        (status = 200, description = "Event deleted"),
        (status = 404, description = "Event not found")
    )
)]
pub async fn delete_event(
    store: web::Data<dyn DocumentStore>,
    event_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    log::info!("🗑️  DELETE /events/{}", event_id);

    event_service::delete_event(store.get_ref(), &event_id).await?;
    Ok(HttpResponse::Ok().finish())
}
