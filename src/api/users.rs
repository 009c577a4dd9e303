use actix_web::{web, HttpResponse};

use crate::{
    database::DocumentStore,
    models::{User, UserProfileUpdate},
    services::user_service,
    utils::AppError,
};

/// POST /users
#[utoipa::path(
    post,
    path = "/users",
    tag = "Users",
    request_body = User,
    responses((status = 200, description = "Created user", body = User))
)]
pub async fn create_user(
    store: web::Data<dyn DocumentStore>,
    body: web::Json<User>,
) -> Result<HttpResponse, AppError> {
    log::info!("📝 POST /users");

    let created = user_service::create_user(store.get_ref(), body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(created))
}

/// GET /users/{id}
#[utoipa::path(
    get,
    path = "/users/{id}",
    tag = "Users",
    params(("id" = String, Path, description = "User id")),
    responses(
        (status = 200, description = "User", body = User),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_user(
    store: web::Data<dyn DocumentStore>,
    user_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    log::info!("🔎 GET /users/{}", user_id);

    let user = user_service::get_user(store.get_ref(), &user_id).await?;
    Ok(HttpResponse::Ok().json(user))
}

/// PUT /users/{id} - Full overwrite
#[utoipa::path(
    put,
    path = "/users/{id}",
    tag = "Users",
    params(("id" = String, Path, description = "User id")),
    request_body = User,
    responses(
        (status = 200, description = "Updated user", body = User),
        (status = 404, description = "User not found")
    )
)]
pub async fn update_user(
    store: web::Data<dyn DocumentStore>,
    user_id: web::Path<String>,
    body: web::Json<User>,
) -> Result<HttpResponse, AppError> {
    log::info!("🔧 PUT /users/{}", user_id);

    let updated = user_service::update_user(store.get_ref(), &user_id, body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(updated))
}

/// PATCH /users/{id} - Merges profile fields
#[utoipa::path(
    patch,
    path = "/users/{id}",
    tag = "Users",
    params(("id" = String, Path, description = "User id")),
    request_body = UserProfileUpdate,
    responses(
        (status = 200, description = "User after the merge", body = User),
        (status = 400, description = "No fields to update"),
        (status = 404, description = "User not found")
    )
)]
pub async fn update_user_profile(
    store: web::Data<dyn DocumentStore>,
    user_id: web::Path<String>,
    body: web::Json<UserProfileUpdate>,
) -> Result<HttpResponse, AppError> {
    log::info!("✏️  PATCH /users/{}", user_id);

    let updated = user_service::update_user_profile(store.get_ref(), &user_id, body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(updated))
}

/// DELETE /users/{id}
#[utoipa::path(
    delete,
    path = "/users/{id}",
    tag = "Users",
    params(("id" = String, Path, description = "User id")),
    responses(
        (status = 200, description = "User deleted"),
        (status = 404, description = "User not found")
    )
)]
pub async fn delete_user(
    store: web::Data<dyn DocumentStore>,
    user_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    log::info!("🗑️  DELETE /users/{}", user_id);

    user_service::delete_user(store.get_ref(), &user_id).await?;
    Ok(HttpResponse::Ok().finish())
}
