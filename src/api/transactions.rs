use actix_web::{web, HttpResponse};

use crate::{
    database::DocumentStore,
    models::Transaction,
    services::transaction_service,
    utils::AppError,
};

/// POST /transactions - Creates a transaction with a store-generated id
#[utoipa::path(
    post,
    path = "/transactions",
    tag = "Transactions",
    request_body = Transaction,
    responses(
        (status = 200, description = "Created transaction", body = Transaction),
        (status = 400, description = "Malformed transaction")
    )
)]
pub async fn create_transaction(
    store: web::Data<dyn DocumentStore>,
    body: web::Json<Transaction>,
) -> Result<HttpResponse, AppError> {
    log::info!(
        "📝 POST /transactions - user {}",
        body.user_id.as_deref().unwrap_or_default()
    );

    let created = transaction_service::create_transaction(store.get_ref(), body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(created))
}

/// GET /transactions/{id}
#[utoipa::path(
    get,
    path = "/transactions/{id}",
    tag = "Transactions",
    params(("id" = String, Path, description = "Transaction id")),
    responses(
        (status = 200, description = "Transaction", body = Transaction),
        (status = 404, description = "Transaction not found")
    )
)]
pub async fn get_transaction(
    store: web::Data<dyn DocumentStore>,
    transaction_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    log::info!("🔎 GET /transactions/{}", transaction_id);

    let transaction = transaction_service::get_transaction(store.get_ref(), &transaction_id).await?;
    Ok(HttpResponse::Ok().json(transaction))
}

/// GET /transactions/user/{userId}
#[utoipa::path(
    get,
    path = "/transactions/user/{userId}",
    tag = "Transactions",
    params(("userId" = String, Path, description = "Owning user id")),
    responses((status = 200, description = "Transactions of the user", body = [Transaction]))
)]
pub async fn get_user_transactions(
    store: web::Data<dyn DocumentStore>,
    user_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    log::info!("📋 GET /transactions/user/{}", user_id);

    let transactions = transaction_service::get_user_transactions(store.get_ref(), &user_id).await?;
    log::info!("✅ Listed {} transactions", transactions.len());
    Ok(HttpResponse::Ok().json(transactions))
}

/// GET /transactions/event/{eventId}
#[utoipa::path(
    get,
    path = "/transactions/event/{eventId}",
    tag = "Transactions",
    params(("eventId" = String, Path, description = "Event id")),
    responses((status = 200, description = "Transactions booked on the event", body = [Transaction]))
)]
pub async fn get_event_transactions(
    store: web::Data<dyn DocumentStore>,
    event_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    log::info!("📋 GET /transactions/event/{}", event_id);

    let transactions = transaction_service::get_event_transactions(store.get_ref(), &event_id).await?;
    log::info!("✅ Listed {} transactions", transactions.len());
    Ok(HttpResponse::Ok().json(transactions))
}

/// PUT /transactions/{id} - Full overwrite
#[utoipa::path(
    put,
    path = "/transactions/{id}",
    tag = "Transactions",
    params(("id" = String, Path, description = "Transaction id")),
    request_body = Transaction,
    responses(
        (status = 200, description = "Updated transaction", body = Transaction),
        (status = 404, description = "Transaction not found")
    )
)]
pub async fn update_transaction(
    store: web::Data<dyn DocumentStore>,
    transaction_id: web::Path<String>,
    body: web::Json<Transaction>,
) -> Result<HttpResponse, AppError> {
    log::info!("🔧 PUT /transactions/{}", transaction_id);

    let updated =
        transaction_service::update_transaction(store.get_ref(), &transaction_id, body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(updated))
}

/// DELETE /transactions/{id}
#[utoipa::path(
    delete,
    path = "/transactions/{id}",
    tag = "Transactions",
    params(("id" = String, Path, description = "Transaction id")),
    responses(
        (status = 200, description = "Transaction deleted"),
        (status = 404, description = "Transaction not found")
    )
)]
pub async fn delete_transaction(
    store: web::Data<dyn DocumentStore>,
    transaction_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    log::info!("🗑️  DELETE /transactions/{}", transaction_id);

    transaction_service::delete_transaction(store.get_ref(), &transaction_id).await?;
    Ok(HttpResponse::Ok().finish())
}
