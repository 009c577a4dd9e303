use crate::{
    database::{DocumentStore, Filter},
    models::Event,
    services::records,
    utils::AppResult,
};

pub async fn create_event(store: &dyn DocumentStore, event: Event) -> AppResult<Event> {
    let created = records::insert(store, event).await?;

    log::info!(
        "✅ Event {} created with {} members",
        created.event_id.as_deref().unwrap_or_default(),
        created.members.len()
    );
    Ok(created)
}

pub async fn get_event(store: &dyn DocumentStore, event_id: &str) -> AppResult<Event> {
    records::fetch(store, event_id).await
}

/// Events listing `user_id` among their members
pub async fn get_member_events(store: &dyn DocumentStore, user_id: &str) -> AppResult<Vec<Event>> {
    records::find(store, Filter::array_contains("members", user_id)).await
}

pub async fn get_created_events(store: &dyn DocumentStore, user_id: &str) -> AppResult<Vec<Event>> {
    records::find(store, Filter::equals("createdBy", user_id)).await
}

pub async fn update_event(store: &dyn DocumentStore, event_id: &str, event: Event) -> AppResult<Event> {
    let updated = records::replace(store, event_id, event).await?;

    log::info!("✅ Event {} updated", event_id);
    Ok(updated)
}

pub async fn delete_event(store: &dyn DocumentStore, event_id: &str) -> AppResult<()> {
    records::remove::<Event>(store, event_id).await?;

    log::info!("🗑️  Event {} deleted", event_id);
    Ok(())
}
