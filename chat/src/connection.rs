use crate::error::DeliveryError;
use axum::extract::ws::Message;
use dashmap::DashMap;
use log::*;
use tokio::sync::mpsc::UnboundedSender;

// Type alias for client-facing ids (the web layer decides their shape)
pub type ClientId = String;

/// Unique identifier for a connection (server-generated)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConnectionId(String);

impl ConnectionId {
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ConnectionId {
    fn default() -> Self {
        Self::new()
    }
}

/// Outbound half of one registered connection
#[derive(Debug, Clone)]
pub struct ConnectionInfo {
    pub client_id: ClientId,
    pub sender: UnboundedSender<Message>,
}

/// Registry of live WebSocket connections keyed by `ConnectionId`.
/// Backed by a `DashMap` so register/deregister stay O(1) and safe to run
/// concurrently with a broadcast's iteration.
pub struct ConnectionRegistry {
    connections: DashMap<ConnectionId, ConnectionInfo>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self {
            connections: DashMap::new(),
        }
    }

    /// Register a connection that has completed its transport handshake - O(1)
    pub fn register(&self, client_id: ClientId, sender: UnboundedSender<Message>) -> ConnectionId {
        let connection_id = ConnectionId::new();

        self.connections.insert(
            connection_id.clone(),
            ConnectionInfo { client_id, sender },
        );

        connection_id
    }

    /// Remove a connection - O(1). Removing an absent connection is a no-op;
    /// returns whether anything was actually removed.
    pub fn deregister(&self, connection_id: &ConnectionId) -> bool {
        self.connections.remove(connection_id).is_some()
    }

    /// Deliver a message to exactly one connection.
    pub fn send_to(
        &self,
        connection_id: &ConnectionId,
        message: Message,
    ) -> Result<(), DeliveryError> {
        let info = self
            .connections
            .get(connection_id)
            .ok_or_else(|| DeliveryError::UnknownConnection(connection_id.clone()))?;

        info.sender
            .send(message)
            .map_err(|_| DeliveryError::ConnectionClosed(connection_id.clone()))
    }

    /// Deliver a message to every registered connection - O(n). Each delivery
    /// attempt is independent: a closed peer never aborts the remaining
    /// sends. Returns the ids whose delivery failed so the caller can prune
    /// them.
    pub fn broadcast(&self, message: Message) -> Vec<ConnectionId> {
        let mut failed = Vec::new();

        for entry in self.connections.iter() {
            if entry.value().sender.send(message.clone()).is_err() {
                warn!(
                    "Failed to send broadcast to connection {}",
                    entry.key().as_str()
                );
                failed.push(entry.key().clone());
            }
        }

        failed
    }

    pub fn client_id_of(&self, connection_id: &ConnectionId) -> Option<ClientId> {
        self.connections
            .get(connection_id)
            .map(|info| info.client_id.clone())
    }

    pub fn len(&self) -> usize {
        self.connections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.connections.is_empty()
    }
}

impl Default for ConnectionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc::{self, UnboundedReceiver};

    fn text(s: &str) -> Message {
        Message::Text(s.to_string().into())
    }

    fn register_client(
        registry: &ConnectionRegistry,
        client_id: &str,
    ) -> (ConnectionId, UnboundedReceiver<Message>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let connection_id = registry.register(client_id.to_string(), tx);
        (connection_id, rx)
    }

    #[tokio::test]
    async fn broadcast_reaches_every_registered_connection_exactly_once() {
        let registry = ConnectionRegistry::new();
        let (_a, mut rx_a) = register_client(&registry, "1");
        let (_b, mut rx_b) = register_client(&registry, "2");
        let (_c, mut rx_c) = register_client(&registry, "3");

        let failed = registry.broadcast(text("x"));

        assert!(failed.is_empty());
        for rx in [&mut rx_a, &mut rx_b, &mut rx_c] {
            assert_eq!(rx.try_recv().unwrap(), text("x"));
            assert!(rx.try_recv().is_err());
        }
    }

    #[tokio::test]
    async fn deregistered_connection_no_longer_receives_broadcasts() {
        let registry = ConnectionRegistry::new();
        let (conn_a, mut rx_a) = register_client(&registry, "1");
        let (_b, mut rx_b) = register_client(&registry, "2");

        assert!(registry.deregister(&conn_a));
        registry.broadcast(text("x"));

        assert!(rx_a.try_recv().is_err());
        assert_eq!(rx_b.try_recv().unwrap(), text("x"));
    }

    #[tokio::test]
    async fn deregister_is_idempotent() {
        let registry = ConnectionRegistry::new();
        let (conn_a, _rx_a) = register_client(&registry, "1");

        assert!(registry.deregister(&conn_a));
        // Second removal of the same connection is a no-op, not an error
        assert!(!registry.deregister(&conn_a));
        assert!(registry.is_empty());
    }

    #[tokio::test]
    async fn broadcast_survives_a_closed_connection() {
        let registry = ConnectionRegistry::new();
        let (conn_a, rx_a) = register_client(&registry, "1");
        let (_b, mut rx_b) = register_client(&registry, "2");

        // Close A's transport underneath the registry
        drop(rx_a);

        let failed = registry.broadcast(text("x"));

        assert_eq!(failed, vec![conn_a]);
        assert_eq!(rx_b.try_recv().unwrap(), text("x"));
    }

    #[tokio::test]
    async fn send_to_delivers_to_exactly_one_connection() {
        let registry = ConnectionRegistry::new();
        let (conn_a, mut rx_a) = register_client(&registry, "1");
        let (_b, mut rx_b) = register_client(&registry, "2");

        registry.send_to(&conn_a, text("just you")).unwrap();

        assert_eq!(rx_a.try_recv().unwrap(), text("just you"));
        assert!(rx_b.try_recv().is_err());
    }

    #[tokio::test]
    async fn send_to_unknown_connection_fails() {
        let registry = ConnectionRegistry::new();
        let ghost = ConnectionId::new();

        let error = registry.send_to(&ghost, text("x")).unwrap_err();
        assert_eq!(error, DeliveryError::UnknownConnection(ghost));
    }

    #[tokio::test]
    async fn send_to_closed_connection_fails_and_leaves_removal_to_the_caller() {
        let registry = ConnectionRegistry::new();
        let (conn_a, rx_a) = register_client(&registry, "1");
        drop(rx_a);

        let error = registry.send_to(&conn_a, text("x")).unwrap_err();

        assert_eq!(error, DeliveryError::ConnectionClosed(conn_a));
        // Still registered: the caller decides whether to deregister
        assert_eq!(registry.len(), 1);
    }
}
