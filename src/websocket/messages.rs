//! WebSocket Message Types
//!
//! Defines all message types for WebSocket communication between
//! dashboards and the Polarwatch server.

use serde::{Deserialize, Serialize};

use crate::sampler::Snapshot;
use crate::views::DashboardView;

/// Topic carrying a dashboard update for every new reading
pub const READINGS_TOPIC: &str = "readings";

/// Topic carrying server lifecycle notices
pub const SYSTEM_TOPIC: &str = "system";

/// Messages sent from client to server
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// Subscribe to topics for real-time updates
    Subscribe {
        /// List of topics to subscribe to (e.g., "readings")
        topics: Vec<String>,
    },
    /// Unsubscribe from topics
    Unsubscribe {
        /// List of topics to unsubscribe from
        topics: Vec<String>,
    },
    /// Ping for keepalive
    Ping,
}

/// Messages sent from server to client
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// Every derived view of the newest snapshot
    Update(Box<DashboardView>),
    /// Server lifecycle notice
    System {
        message: String,
    },
    /// Subscription confirmed
    Subscribed {
        /// Topics successfully subscribed to
        topics: Vec<String>,
    },
    /// Unsubscription confirmed
    Unsubscribed {
        /// Topics successfully unsubscribed from
        topics: Vec<String>,
    },
    /// Pong response to ping
    Pong,
    /// Error message
    Error {
        /// Error description
        message: String,
    },
    /// Connection established
    Connected {
        /// Unique connection identifier
        connection_id: String,
    },
}

impl ServerMessage {
    /// Update carrying the views of a snapshot
    pub fn update(snapshot: &Snapshot) -> Self {
        ServerMessage::Update(Box::new(DashboardView::from_snapshot(snapshot)))
    }
}

/// Internal event for broadcasting through the hub
#[derive(Debug, Clone)]
pub struct WsEvent {
    /// Topic this event belongs to
    pub topic: String,
    /// The message to send to subscribers
    pub message: ServerMessage,
}

impl WsEvent {
    /// Dashboard update for a new snapshot
    pub fn update(snapshot: &Snapshot) -> Self {
        Self {
            topic: READINGS_TOPIC.to_string(),
            message: ServerMessage::update(snapshot),
        }
    }

    /// Create a system event
    pub fn system(message: &str) -> Self {
        Self {
            topic: SYSTEM_TOPIC.to_string(),
            message: ServerMessage::System {
                message: message.to_string(),
            },
        }
    }
}
