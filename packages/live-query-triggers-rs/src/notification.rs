use serde::{Deserialize, Deserializer, Serialize};

use crate::CodegenResult;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum ChangeEvent {
    Insert,
    Update,
    Delete,
    Truncate,
}

/// Payload published on a registration's channel after a write affected it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Notification {
    /// Table the write happened on.
    pub table: String,
    /// Id of the written row; absent for truncate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// Registration id.
    pub query: i64,
    /// Ids of the fetch query's rows after the write, in fetch order.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub fetched: Vec<i64>,
    pub event: ChangeEvent,
}

impl Notification {
    pub fn from_payload(payload: &str) -> CodegenResult<Self> {
        Ok(serde_json::from_str(payload)?)
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<i64>>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_event_payload() {
        let notification = Notification::from_payload(
            r#"{"table" : "test", "id" : 9, "query" : 1, "fetched" : [3,9], "event" : "INSERT"}"#,
        )
        .unwrap();

        assert_eq!(
            notification,
            Notification {
                table: "test".to_string(),
                id: Some(9),
                query: 1,
                fetched: vec![3, 9],
                event: ChangeEvent::Insert,
            }
        );
    }

    #[test]
    fn truncate_payload_has_no_id() {
        let notification = Notification::from_payload(
            r#"{"table" : "test", "query" : 1, "fetched" : [], "event" : "TRUNCATE"}"#,
        )
        .unwrap();
        assert_eq!(notification.id, None);
        assert_eq!(notification.event, ChangeEvent::Truncate);
        assert!(notification.fetched.is_empty());

        let json = serde_json::to_value(&notification).unwrap();
        assert!(json.get("id").is_none());
        assert_eq!(json["event"], "TRUNCATE");
    }

    #[test]
    fn null_fetched_is_empty() {
        let notification = Notification::from_payload(
            r#"{"table": "t", "id": 1, "query": 2, "fetched": null, "event": "DELETE"}"#,
        )
        .unwrap();
        assert!(notification.fetched.is_empty());

        let notification =
            Notification::from_payload(r#"{"table": "t", "query": 2, "event": "UPDATE"}"#).unwrap();
        assert!(notification.fetched.is_empty());
    }

    #[test]
    fn unknown_event_is_rejected() {
        assert!(Notification::from_payload(
            r#"{"table": "t", "query": 2, "fetched": [], "event": "MERGE"}"#
        )
        .is_err());
    }
}
