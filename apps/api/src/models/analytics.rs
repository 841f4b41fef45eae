use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Usage event handed to the analytics worker.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnalyticsEvent {
    pub event_type: String,
    pub event_data: Value,
    pub user_id: Option<Uuid>,
    pub timestamp: DateTime<Utc>,
}

impl AnalyticsEvent {
    pub fn new(event_type: &str, event_data: Value, user_id: Option<Uuid>) -> Self {
        Self {
            event_type: event_type.to_string(),
            event_data,
            user_id,
            timestamp: Utc::now(),
        }
    }
}
