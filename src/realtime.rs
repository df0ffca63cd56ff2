//! Real-time channel: WebSocket connections on the HTTP port with connect/disconnect bookkeeping.
//!
//! No application events are defined yet. Text frames are logged and dropped.

use crate::state::AppState;
use axum::{
    extract::{
        ws::{Message, WebSocket},
        State, WebSocketUpgrade,
    },
    response::Response,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConnectionState {
    Connected,
    Disconnected,
}

#[derive(Debug)]
pub struct Connection {
    pub id: Uuid,
    state: ConnectionState,
}

impl Connection {
    pub fn state(&self) -> ConnectionState {
        self.state
    }
}

/// Tracks live socket connections.
#[derive(Clone, Default)]
pub struct RealtimeHub {
    active: Arc<AtomicUsize>,
}

impl RealtimeHub {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn connect(&self) -> Connection {
        let active = self.active.fetch_add(1, Ordering::SeqCst) + 1;
        let conn = Connection {
            id: Uuid::new_v4(),
            state: ConnectionState::Connected,
        };
        info!(connection_id = %conn.id, active, "socket connected");
        conn
    }

    /// Idempotent: a connection is only counted down once.
    pub fn disconnect(&self, conn: &mut Connection) {
        if conn.state == ConnectionState::Disconnected {
            return;
        }
        conn.state = ConnectionState::Disconnected;
        let active = self.active.fetch_sub(1, Ordering::SeqCst) - 1;
        info!(connection_id = %conn.id, active, "socket disconnected");
    }

    pub fn active_connections(&self) -> usize {
        self.active.load(Ordering::SeqCst)
    }
}

/// GET /socket: upgrade to a WebSocket.
pub async fn socket_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, state.realtime))
}

async fn handle_socket(mut socket: WebSocket, hub: RealtimeHub) {
    let mut conn = hub.connect();
    while let Some(msg) = socket.recv().await {
        match msg {
            Ok(Message::Text(text)) => {
                debug!(connection_id = %conn.id, len = text.len(), "ignoring text frame");
            }
            Ok(Message::Close(_)) => break,
            Ok(_) => {}
            Err(e) => {
                warn!(connection_id = %conn.id, error = %e, "socket error");
                break;
            }
        }
    }
    hub.disconnect(&mut conn);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connect_then_disconnect() {
        let hub = RealtimeHub::new();
        let mut a = hub.connect();
        let mut b = hub.connect();
        assert_ne!(a.id, b.id);
        assert_eq!(a.state(), ConnectionState::Connected);
        assert_eq!(hub.active_connections(), 2);

        hub.disconnect(&mut a);
        assert_eq!(a.state(), ConnectionState::Disconnected);
        assert_eq!(hub.active_connections(), 1);

        hub.disconnect(&mut a);
        assert_eq!(hub.active_connections(), 1);
        hub.disconnect(&mut b);
        assert_eq!(hub.active_connections(), 0);
    }

    #[test]
    fn clones_share_the_count() {
        let hub = RealtimeHub::new();
        let other = hub.clone();
        let _c = other.connect();
        assert_eq!(hub.active_connections(), 1);
    }
}
