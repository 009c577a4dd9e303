use chrono::{SecondsFormat, Utc};

use crate::{
    database::DocumentStore,
    models::{
        sync::{stamp_synced, USERS},
        to_document, User, UserProfileUpdate,
    },
    services::records,
    utils::{now_millis, AppError, AppResult},
};

pub async fn create_user(store: &dyn DocumentStore, user: User) -> AppResult<User> {
    let created = records::insert(store, user).await?;

    log::info!("✅ User {} created", created.user_id.as_deref().unwrap_or_default());
    Ok(created)
}

pub async fn get_user(store: &dyn DocumentStore, user_id: &str) -> AppResult<User> {
    records::fetch(store, user_id).await
}

pub async fn update_user(store: &dyn DocumentStore, user_id: &str, user: User) -> AppResult<User> {
    let updated = records::replace(store, user_id, user).await?;

    log::info!("✅ User {} updated", user_id);
    Ok(updated)
}

/// Merges the supplied profile fields into the stored user, leaving the rest untouched.
pub async fn update_user_profile(
    store: &dyn DocumentStore,
    user_id: &str,
    patch: UserProfileUpdate,
) -> AppResult<User> {
    let mut fields = to_document(&patch)?;
    if fields.is_empty() {
        return Err(AppError::InvalidRequest("No profile fields to update".to_string()));
    }

    fields.insert(
        "updatedAt".to_string(),
        Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true).into(),
    );
    stamp_synced(&mut fields, now_millis());

    if !store.update(USERS, user_id, fields).await? {
        return Err(AppError::NotFound(format!("User {} not found", user_id)));
    }

    log::info!("✏️  User {} profile updated", user_id);
    get_user(store, user_id).await
}

pub async fn delete_user(store: &dyn DocumentStore, user_id: &str) -> AppResult<()> {
    records::remove::<User>(store, user_id).await?;

    log::info!("🗑️  User {} deleted", user_id);
    Ok(())
}
