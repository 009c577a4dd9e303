/// Current wall-clock time in epoch milliseconds, the unit of the `lastSynced` watermark.
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
