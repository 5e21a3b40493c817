use serde::Serialize;

/// Trait for getting the chat event type name
pub trait EventType {
    fn event_type(&self) -> &'static str;
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", content = "data")]
pub enum ChatEvent {
    /// A client said something; fanned out to everyone.
    #[serde(rename = "message")]
    Message { client_id: String, body: String },

    /// Echoed back to the sender only.
    #[serde(rename = "message_ack")]
    MessageAck { body: String },

    /// A client disconnected; fanned out to the remaining connections.
    #[serde(rename = "client_departed")]
    ClientDeparted { client_id: String },
}

impl EventType for ChatEvent {
    fn event_type(&self) -> &'static str {
        match self {
            ChatEvent::Message { .. } => "message",
            ChatEvent::MessageAck { .. } => "message_ack",
            ChatEvent::ClientDeparted { .. } => "client_departed",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_serialize_with_type_tag_and_data_payload() {
        let event = ChatEvent::Message {
            client_id: "42".to_string(),
            body: "hello".to_string(),
        };

        let value: serde_json::Value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["type"], "message");
        assert_eq!(value["data"]["client_id"], "42");
        assert_eq!(value["data"]["body"], "hello");
    }

    #[test]
    fn event_type_matches_serialized_tag() {
        let event = ChatEvent::ClientDeparted {
            client_id: "42".to_string(),
        };
        let value: serde_json::Value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["type"], event.event_type());
    }
}
