use crate::{
    database::{DocumentStore, Filter},
    models::Transaction,
    services::records,
    utils::{AppError, AppResult},
};

/// REST writes must name the owner and carry an amount. Documents pushed
/// through sync may omit both, so reads never apply these checks.
fn validate(transaction: &Transaction) -> AppResult<()> {
    if transaction.user_id.as_deref().map_or(true, |id| id.trim().is_empty()) {
        return Err(AppError::InvalidRequest("userId must not be empty".to_string()));
    }
    if !transaction.amount.is_some_and(f64::is_finite) {
        return Err(AppError::InvalidRequest("amount must be a finite number".to_string()));
    }
    Ok(())
}

pub async fn create_transaction(
    store: &dyn DocumentStore,
    transaction: Transaction,
) -> AppResult<Transaction> {
    validate(&transaction)?;
    let created = records::insert(store, transaction).await?;

    log::info!(
        "✅ Transaction {} created for user {}",
        created.transaction_id.as_deref().unwrap_or_default(),
        created.user_id.as_deref().unwrap_or_default()
    );
    Ok(created)
}

pub async fn get_transaction(store: &dyn DocumentStore, transaction_id: &str) -> AppResult<Transaction> {
    records::fetch(store, transaction_id).await
}

pub async fn get_user_transactions(store: &dyn DocumentStore, user_id: &str) -> AppResult<Vec<Transaction>> {
    records::find(store, Filter::equals("userId", user_id)).await
}

pub async fn get_event_transactions(store: &dyn DocumentStore, event_id: &str) -> AppResult<Vec<Transaction>> {
    records::find(store, Filter::equals("eventId", event_id)).await
}

pub async fn update_transaction(
    store: &dyn DocumentStore,
    transaction_id: &str,
    transaction: Transaction,
) -> AppResult<Transaction> {
    validate(&transaction)?;
    let updated = records::replace(store, transaction_id, transaction).await?;

    log::info!("✅ Transaction {} updated", transaction_id);
    Ok(updated)
}

pub async fn delete_transaction(store: &dyn DocumentStore, transaction_id: &str) -> AppResult<()> {
    records::remove::<Transaction>(store, transaction_id).await?;

    log::info!("🗑️  Transaction {} deleted", transaction_id);
    Ok(())
}
