//! WebSocket HTTP surface for the web layer.
//!
//! This module contains only the Axum upgrade handler and the demo chat
//! page. The core broadcast infrastructure (Manager, ConnectionRegistry,
//! ChatEvent types) lives in the `chat` crate to avoid circular dependencies.

pub mod handler;

use axum::response::Html;

const CHAT_PAGE: &str = r##"<!DOCTYPE html>
<html>
    <head>
        <title>Chat</title>
    </head>
    <body>
        <h1>WebSocket Chat</h1>
        <h2>Your ID: <span id="ws-id"></span></h2>
        <form action="" onsubmit="sendMessage(event)">
            <input type="text" id="messageText" autocomplete="off"/>
            <button>Send</button>
        </form>
        <ul id='messages'>
        </ul>
        <script>
            var clientId = Date.now();
            document.querySelector("#ws-id").textContent = clientId;
            var apiKey = new URLSearchParams(window.location.search).get("api_key") || "";
            var scheme = window.location.protocol === "https:" ? "wss" : "ws";
            var ws = new WebSocket(
                `${scheme}://${window.location.host}/api/v1/ws/${clientId}?api_key=${apiKey}`);
            ws.onmessage = function(event) {
                var messages = document.getElementById('messages');
                var message = document.createElement('li');
                var payload = JSON.parse(event.data);
                var body = payload.type === "client_departed"
                    ? `Client #${payload.data.client_id} left the chat`
                    : payload.type === "message"
                        ? `Client #${payload.data.client_id} says: ${payload.data.body}`
                        : payload.data.body;
                message.appendChild(document.createTextNode(body));
                messages.appendChild(message);
            };
            function sendMessage(event) {
                var input = document.getElementById("messageText");
                ws.send(input.value);
                input.value = '';
                event.preventDefault();
            }
        </script>
    </body>
</html>
"##;

/// Serves the demo chat page for manual testing of the broadcast channel.
pub(crate) async fn chat_page() -> Html<&'static str> {
    Html(CHAT_PAGE)
}
