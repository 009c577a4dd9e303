use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "PaySync Server API",
        version = "1.0.0",
        description = "Mirrors the PaySync mobile client's users, events and transactions into the document store.\n\n**Features:**\n- CRUD for users, events and transactions\n- Incremental sync driven by the `lastSynced` watermark\n- Per-user bundle for first-time device setup\n- Health monitoring and metrics"
    ),
    paths(
        // Health & Metrics
        crate::api::health::health_check,
        crate::api::metrics::get_metrics,

        // Sync
        crate::api::sync::push_changes,
        crate::api::sync::pull_changes,
        crate::api::sync::get_user_bundle,

        // Transactions
        crate::api::transactions::create_transaction,
        crate::api::transactions::get_transaction,
        crate::api::transactions::get_user_transactions,
        crate::api::transactions::get_event_transactions,
        crate::api::transactions::update_transaction,
        crate::api::transactions::delete_transaction,

        // Users
        crate::api::users::create_user,
        crate::api::users::get_user,
        crate::api::users::update_user,
        crate::api::users::update_user_profile,
        crate::api::users::delete_user,

        // Events
        crate::api::events::create_event,
        crate::api::events::get_event,
        crate::api::events::get_member_events,
        crate::api::events::get_created_events,
        crate::api::events::update_event,
        crate::api::events::delete_event,
    ),
    components(
        schemas(
            crate::api::health::HealthResponse,
            crate::models::User,
            crate::models::UserProfileUpdate,
            crate::models::Event,
            crate::models::Transaction,
            crate::models::PushSummary,
        )
    ),
    tags(
        (name = "Health", description = "Health check and metrics endpoints for monitoring service status."),
        (name = "Sync", description = "Batch push and watermark-based pull of client changes."),
        (name = "Transactions", description = "Transaction CRUD and per-user / per-event listings."),
        (name = "Users", description = "User CRUD and profile updates."),
        (name = "Events", description = "Event CRUD and membership listings."),
    )
)]
pub struct ApiDoc;
