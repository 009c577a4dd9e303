mod records;

pub mod event_service;
pub mod sync_service;
pub mod transaction_service;
pub mod user_service;
