use crate::connection::{ClientId, ConnectionId, ConnectionRegistry};
use crate::error::DeliveryError;
use crate::message::{ChatEvent, EventType};
use axum::extract::ws::Message;
use log::*;
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedSender;

/// High-level event routing over the [`ConnectionRegistry`]. This is the only
/// surface the web layer talks to.
pub struct Manager {
    registry: Arc<ConnectionRegistry>,
}

impl Manager {
    pub fn new() -> Self {
        Self {
            registry: Arc::new(ConnectionRegistry::new()),
        }
    }

    /// Register a new connection and return its unique ID
    pub fn register_connection(
        &self,
        client_id: ClientId,
        sender: UnboundedSender<Message>,
    ) -> ConnectionId {
        let connection_id = self.registry.register(client_id, sender);
        info!("Registered new chat connection");
        connection_id
    }

    /// Deregister a connection by ID. Safe to call more than once.
    pub fn deregister_connection(&self, connection_id: &ConnectionId) {
        if self.registry.deregister(connection_id) {
            info!("Deregistered chat connection");
        }
    }

    /// Deliver an event to exactly one connection. On failure the connection
    /// stays registered; the caller decides whether to deregister it.
    pub fn send_to(
        &self,
        connection_id: &ConnectionId,
        event: &ChatEvent,
    ) -> Result<(), DeliveryError> {
        let message = match encode(event) {
            Some(message) => message,
            None => return Ok(()),
        };
        self.registry.send_to(connection_id, message)
    }

    /// Fan an event out to every registered connection. Connections whose
    /// peer is gone are pruned so later broadcasts skip them.
    pub fn broadcast(&self, event: &ChatEvent) {
        debug!(
            "Broadcasting {} event to {} connections",
            event.event_type(),
            self.registry.len()
        );

        let message = match encode(event) {
            Some(message) => message,
            None => return,
        };

        for connection_id in self.registry.broadcast(message) {
            self.registry.deregister(&connection_id);
            warn!(
                "Pruned dead chat connection {} during broadcast",
                connection_id.as_str()
            );
        }
    }

    pub fn connection_count(&self) -> usize {
        self.registry.len()
    }
}

impl Default for Manager {
    fn default() -> Self {
        Self::new()
    }
}

fn encode(event: &ChatEvent) -> Option<Message> {
    match serde_json::to_string(event) {
        Ok(json) => Some(Message::Text(json.into())),
        Err(e) => {
            error!("Failed to serialize chat event: {e}");
            None
        }
    }
}
