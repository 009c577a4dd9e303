pub mod events;
pub mod health;
pub mod metrics;
pub mod swagger;
pub mod sync;
pub mod transactions;
pub mod users;

use actix_web::{error, web};

use crate::utils::AppError;

/// Route table shared by the server and the HTTP tests.
pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg
        // Malformed bodies, query strings and paths answer with the same JSON error shape
        .app_data(web::JsonConfig::default().error_handler(|err, _req| {
            error::Error::from(AppError::InvalidRequest(err.to_string()))
        }))
        .app_data(web::QueryConfig::default().error_handler(|err, _req| {
            error::Error::from(AppError::InvalidRequest(err.to_string()))
        }))
        .app_data(web::PathConfig::default().error_handler(|err, _req| {
            error::Error::from(AppError::InvalidRequest(err.to_string()))
        }))
        // Health check
        .route("/health", web::get().to(health::health_check))
        // Metrics
        .route("/metrics", web::get().to(metrics::get_metrics))
        // ==================== SYNC ====================
        .service(
            web::scope("/api/sync")
                .route("/changes", web::post().to(sync::push_changes))
                .route("/changes", web::get().to(sync::pull_changes))
                .route("/users/{userId}", web::get().to(sync::get_user_bundle)),
        )
        // ==================== ENTITIES ====================
        .service(
            web::scope("/transactions")
                .route("", web::post().to(transactions::create_transaction))
                .route("/user/{userId}", web::get().to(transactions::get_user_transactions))
                .route("/event/{eventId}", web::get().to(transactions::get_event_transactions))
                .route("/{id}", web::get().to(transactions::get_transaction))
                .route("/{id}", web::put().to(transactions::update_transaction))
                .route("/{id}", web::delete().to(transactions::delete_transaction)),
        )
        .service(
            web::scope("/users")
                .route("", web::post().to(users::create_user))
                .route("/{id}", web::get().to(users::get_user))
                .route("/{id}", web::put().to(users::update_user))
                .route("/{id}", web::patch().to(users::update_user_profile))
                .route("/{id}", web::delete().to(users::delete_user)),
        )
        .service(
            web::scope("/events")
                .route("", web::post().to(events::create_event))
                .route("/member/{userId}", web::get().to(events::get_member_events))
                .route("/creator/{userId}", web::get().to(events::get_created_events))
                .route("/{id}", web::get().to(events::get_event))
                .route("/{id}", web::put().to(events::update_event))
                .route("/{id}", web::delete().to(events::delete_event)),
        );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::{DocumentStore, MemoryStore};
    use actix_web::{http::StatusCode, test, App};
    use serde_json::{json, Value};
    use std::sync::Arc;

    fn store_data() -> web::Data<dyn DocumentStore> {
        let store: Arc<dyn DocumentStore> = Arc::new(MemoryStore::new());
        web::Data::from(store)
    }

    #[actix_web::test]
    async fn test_transaction_crud_over_http() {
        let app = test::init_service(App::new().app_data(store_data()).configure(routes)).await;

        let req = test::TestRequest::post()
            .uri("/transactions")
            .set_json(json!({ "userId": "u1", "eventId": "e1", "amount": 12.5, "note": "coffee" }))
            .to_request();
        let created: Value = test::call_and_read_body_json(&app, req).await;
        let id = created["transactionId"].as_str().unwrap().to_string();
        assert!(!id.is_empty());
        assert_eq!(created["note"], "coffee");

        let req = test::TestRequest::get().uri(&format!("/transactions/{}", id)).to_request();
        let fetched: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(fetched["amount"], 12.5);
        assert!(fetched.get("lastSynced").is_none());

        let req = test::TestRequest::get().uri("/transactions/user/u1").to_request();
        let listed: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(listed.as_array().unwrap().len(), 1);

        let req = test::TestRequest::delete().uri(&format!("/transactions/{}", id)).to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

        let req = test::TestRequest::get().uri(&format!("/transactions/{}", id)).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["success"], false);
    }

    #[actix_web::test]
    async fn test_malformed_body_is_bad_request() {
        let app = test::init_service(App::new().app_data(store_data()).configure(routes)).await;

        let req = test::TestRequest::post()
            .uri("/transactions")
            .set_json(json!({ "amount": "lots" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_sync_push_pull_and_bundle() {
        let app = test::init_service(App::new().app_data(store_data()).configure(routes)).await;

        let req = test::TestRequest::post()
            .uri("/api/sync/changes")
            .set_json(json!({
                "users": { "u1": { "username": "ana", "events": "e1" } },
                "events": { "e1": { "nameOfEvent": "Trip", "members": ["u1"] } },
                "transactions": { "t1": { "userId": "u1", "eventId": "e1", "amount": 9.0 } }
            }))
            .to_request();
        let summary: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(summary["documentsWritten"], 3);
        let pushed_at = summary["lastSynced"].as_i64().unwrap();

        let req = test::TestRequest::get()
            .uri(&format!("/api/sync/changes?lastSyncTimestamp={}", pushed_at - 1))
            .to_request();
        let pulled: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(pulled["users"]["u1"]["events"], json!(["e1"]));
        assert!(pulled["transactions"]["t1"].get("lastSynced").is_none());

        let req = test::TestRequest::get()
            .uri(&format!("/api/sync/changes?lastSyncTimestamp={}", pushed_at + 1))
            .to_request();
        let pulled: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(pulled, json!({}));

        let req = test::TestRequest::get().uri("/api/sync/users/u1").to_request();
        let bundle: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(bundle["events"]["e1"]["nameOfEvent"], "Trip");
        assert_eq!(bundle["transactions"]["t1"]["amount"], 9.0);
        assert!(bundle["users"]["u1"].get("lastSynced").is_none());

        let req = test::TestRequest::get().uri("/api/sync/users/nobody").to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_pull_requires_numeric_watermark() {
        let app = test::init_service(App::new().app_data(store_data()).configure(routes)).await;

        for uri in ["/api/sync/changes", "/api/sync/changes?lastSyncTimestamp=yesterday"] {
            let req = test::TestRequest::get().uri(uri).to_request();
            assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);
        }
    }

    #[actix_web::test]
    async fn test_synced_transactions_readable_through_rest() {
        let app = test::init_service(App::new().app_data(store_data()).configure(routes)).await;

        let req = test::TestRequest::post()
            .uri("/api/sync/changes")
            .set_json(json!({
                "transactions": {
                    "t1": { "userId": "u1", "amount": 5 },
                    "t2": { "userId": "u1", "note": "amount still unknown" },
                    "t3": { "userId": "u1", "amount": 2, "dateTime": 1_700_000_000_000i64 }
                }
            }))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

        let req = test::TestRequest::get().uri("/transactions/user/u1").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let listed: Value = test::read_body_json(resp).await;
        assert_eq!(listed.as_array().unwrap().len(), 3);
        assert_eq!(listed[1]["amount"], Value::Null);

        let req = test::TestRequest::get().uri("/transactions/t3").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let fetched: Value = test::read_body_json(resp).await;
        assert_eq!(fetched["dateTime"], "2023-11-14T22:13:20Z");
    }

    #[actix_web::test]
    async fn test_push_rejects_malformed_user_events() {
        let app = test::init_service(App::new().app_data(store_data()).configure(routes)).await;

        let req = test::TestRequest::post()
            .uri("/api/sync/changes")
            .set_json(json!({ "users": { "u1": { "events": { "e1": true } } } }))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);

        let req = test::TestRequest::get().uri("/api/sync/users/u1").to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_user_and_event_routes() {
        let app = test::init_service(App::new().app_data(store_data()).configure(routes)).await;

        let req = test::TestRequest::post()
            .uri("/users")
            .set_json(json!({ "username": "ana", "events": "e9" }))
            .to_request();
        let user: Value = test::call_and_read_body_json(&app, req).await;
        let user_id = user["userId"].as_str().unwrap().to_string();
        assert_eq!(user["defaultCurrency"], "USD");
        assert_eq!(user["events"], json!(["e9"]));

        let req = test::TestRequest::patch()
            .uri(&format!("/users/{}", user_id))
            .set_json(json!({ "phoneNumber": "123" }))
            .to_request();
        let patched: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(patched["phoneNumber"], "123");
        assert_eq!(patched["username"], "ana");

        let req = test::TestRequest::post()
            .uri("/events")
            .set_json(json!({ "nameOfEvent": "Flat", "createdBy": user_id, "members": [user_id] }))
            .to_request();
        let event: Value = test::call_and_read_body_json(&app, req).await;
        assert!(event["eventId"].is_string());

        let req = test::TestRequest::get()
            .uri(&format!("/events/member/{}", user_id))
            .to_request();
        let events: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(events.as_array().unwrap().len(), 1);

        let req = test::TestRequest::get().uri("/health").to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
    }
}
