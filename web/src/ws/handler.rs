use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use chat::message::ChatEvent;
use futures::{SinkExt, StreamExt};
use log::*;
use service::AppState;
use tokio::sync::mpsc;

/// GET /api/v1/ws/{client_id}
///
/// Upgrades the request to a WebSocket and joins the client to the chat
/// broadcast channel for the lifetime of the socket.
pub async fn chat_handler(
    ws: WebSocketUpgrade,
    Path(client_id): Path<String>,
    State(app_state): State<AppState>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, client_id, app_state))
}

async fn handle_socket(socket: WebSocket, client_id: String, app_state: AppState) {
    let (mut ws_sender, mut ws_receiver) = socket.split();
    let (tx, mut rx) = mpsc::unbounded_channel::<Message>();

    let manager = app_state.chat_manager.clone();
    let connection_id = manager.register_connection(client_id.clone(), tx);
    debug!(
        "Client {client_id} joined chat ({} active connections)",
        manager.connection_count()
    );

    // Forward everything the registry hands us out onto the socket. The task
    // ends when the channel closes (deregistration drops the sender) or the
    // peer goes away.
    let mut outbound_task = tokio::spawn(async move {
        while let Some(message) = rx.recv().await {
            if ws_sender.send(message).await.is_err() {
                break;
            }
        }
    });

    loop {
        tokio::select! {
            incoming = ws_receiver.next() => {
                match incoming {
                    Some(Ok(Message::Text(text))) => {
                        let body = text.to_string();

                        if let Err(e) = manager.send_to(
                            &connection_id,
                            &ChatEvent::MessageAck {
                                body: format!("You wrote: {body}"),
                            },
                        ) {
                            warn!("Failed to ack message from client {client_id}: {e}");
                            break;
                        }

                        manager.broadcast(&ChatEvent::Message {
                            client_id: client_id.clone(),
                            body,
                        });
                    }
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Ok(_)) => {} // ignore binary/ping/pong frames
                    Some(Err(e)) => {
                        debug!("WebSocket error for client {client_id}: {e}");
                        break;
                    }
                }
            }
            _ = &mut outbound_task => break,
        }
    }

    manager.deregister_connection(&connection_id);
    outbound_task.abort();

    manager.broadcast(&ChatEvent::ClientDeparted {
        client_id: client_id.clone(),
    });
    debug!(
        "Client {client_id} left chat ({} active connections)",
        manager.connection_count()
    );
}
