//! WebSocket broadcast infrastructure for the chat channel.
//!
//! This crate tracks every open WebSocket connection and delivers messages
//! to one or all of them.
//!
//! # Architecture
//!
//! - **Identity by handle**: every accepted connection receives a
//!   server-generated `ConnectionId`; the client-facing `client_id` is chosen
//!   by the caller and only travels inside event payloads.
//! - **Concurrent registry**: connections live in a `DashMap`, so
//!   registration and removal stay safe while a broadcast is iterating.
//! - **Best-effort fan-out**: a connection that fails mid-broadcast never
//!   aborts delivery to the remaining connections; dead connections are
//!   pruned and the remainder still receive the event.
//! - **Idempotent removal**: deregistering an already-absent connection is a
//!   no-op, so disconnect paths and defensive cleanup can both run it.
//! - **Typed events**: everything on the wire is a serialized `ChatEvent`.
//!
//! # Message flow
//!
//! 1. A client connects to the WebSocket endpoint and the transport handshake
//!    completes (axum upgrade).
//! 2. The handler registers the connection's outbound channel with the
//!    [`Manager`] and receives a `ConnectionId`.
//! 3. Each inbound text message yields an ack to the sender ([`Manager::send_to`])
//!    and a fan-out to everyone ([`Manager::broadcast`]).
//! 4. On disconnect the handler deregisters the connection exactly once and
//!    broadcasts a departure event to the remaining connections.
//!
//! # Modules
//!
//! - `connection`: `ConnectionRegistry` and `ConnectionId`
//! - `manager`: high-level event routing (delegates to `ConnectionRegistry`)
//! - `message`: typed chat events
//! - `error`: delivery failures

pub mod connection;
pub mod error;
pub mod manager;
pub mod message;

pub use manager::Manager;
