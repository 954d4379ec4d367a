//! WebSocket Real-Time Streaming
//!
//! Pushes dashboard updates to connected clients on every sampler tick.
//!
//! ## Architecture
//!
//! - **ConnectionHub**: Manages all active connections and subscriptions
//! - **Handler**: Handles WebSocket upgrade and message processing
//! - **Relay**: Turns each published snapshot into an `update` message
//! - **Messages**: Defines client and server message formats
//!
//! ## Usage
//!
//! Clients connect to `/api/v1/ws` and can subscribe to topics:
//! - `readings` - A full dashboard update per new reading
//! - `system` - Server lifecycle notices
//!
//! ## Example
//!
//! ```javascript
//! const ws = new WebSocket('ws://localhost:8085/api/v1/ws');
//!
//! ws.onopen = () => {
//!   ws.send(JSON.stringify({type: 'subscribe', topics: ['readings']}));
//! };
//!
//! ws.onmessage = (event) => {
//!   const msg = JSON.parse(event.data);
//!   if (msg.type === 'update') console.log(msg.comparison_text);
//! };
//! ```

mod handler;
mod hub;
mod messages;
mod relay;

pub use handler::websocket_handler;
pub use hub::{ConnectionHub, ConnectionId, HubConfig, HubError};
pub use messages::{ClientMessage, ServerMessage, WsEvent, READINGS_TOPIC, SYSTEM_TOPIC};
pub use relay::spawn_relay;
