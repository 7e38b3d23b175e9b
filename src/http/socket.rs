use super::connection::Connection;
use super::state::AppState;
use axum::extract::ws::{Message as WsMessage, WebSocket};
use tracing::{debug, info, warn};

/// Serve one tutoring connection until either side closes it.
///
/// Frames are read and handled strictly in sequence on this task, so a
/// connection's turns are recorded in arrival order and a slow completion
/// only stalls its own connection.
pub async fn serve_connection(mut socket: WebSocket, state: AppState) {
    let mut connection = Connection::new(&state);
    info!("Connection {} opened", connection.id());

    while let Some(incoming) = socket.recv().await {
        let raw = match incoming {
            Ok(WsMessage::Text(text)) => text.into_bytes(),
            Ok(WsMessage::Binary(bytes)) => bytes,
            Ok(WsMessage::Close(_)) => break,
            // Ping/pong are answered by axum
            Ok(_) => continue,
            Err(e) => {
                warn!("Connection {}: receive failed: {}", connection.id(), e);
                break;
            }
        };

        let Some(reply) = connection.handle_frame(&raw).await else {
            continue;
        };

        if let Err(e) = socket.send(WsMessage::Text(reply.to_json())).await {
            // Client went away while we were working; drop the reply
            debug!(
                "Connection {}: discarding reply, send failed: {}",
                connection.id(),
                e
            );
            break;
        }
    }

    info!(
        "Connection {} closed after {} turns",
        connection.id(),
        connection.session().len()
    );
}
