use chrono::{DateTime, Utc};

/// Body posted to webhook subscribers for every order lifecycle event.
#[derive(Debug, serde::Serialize, serde::Deserialize, Clone)]
pub struct WebhookPayload {
    pub order_id: i64,
    pub customer_email: String,
    pub event_type: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub priority: String,
    pub total_weight: i64,
}

impl WebhookPayload {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_field_names() {
        let payload = WebhookPayload {
            order_id: 7,
            customer_email: "a@b.com".to_string(),
            event_type: "CREATED".to_string(),
            message: "hello".to_string(),
            timestamp: Utc::now(),
            priority: "express".to_string(),
            total_weight: 850,
        };

        let value: serde_json::Value = serde_json::from_str(&payload.to_json().unwrap()).unwrap();
        assert_eq!(value["order_id"], 7);
        assert_eq!(value["event_type"], "CREATED");
        assert_eq!(value["total_weight"], 850);
        assert!(value["timestamp"].is_string());
    }
}
