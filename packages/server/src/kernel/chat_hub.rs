//! In-process pub/sub hub for real-time chat delivery.
//!
//! Every persisted message is published to its chat's broadcast channel;
//! the SSE route subscribes and forwards events to connected clients.
//!
//! Producers (domain actions):
//!   hub.publish(chat_id, json!({"type": "message", "id": "..."})).await;
//!
//! Consumers (SSE endpoint):
//!   let rx = hub.subscribe(chat_id).await;

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{broadcast, RwLock};

use crate::common::ChatId;

/// Per-chat broadcast channels.
///
/// Thread-safe, cloneable. Payloads are `serde_json::Value` — the chats
/// domain serializes its own message shape.
#[derive(Clone)]
pub struct ChatHub {
    channels: Arc<RwLock<HashMap<ChatId, broadcast::Sender<serde_json::Value>>>>,
    capacity: usize,
}

impl ChatHub {
    /// Create a new hub with default capacity (128 events per chat).
    pub fn new() -> Self {
        Self::with_capacity(128)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            channels: Arc::new(RwLock::new(HashMap::new())),
            capacity,
        }
    }

    /// Publish an event to a chat. No-op if no subscribers.
    pub async fn publish(&self, chat_id: ChatId, value: serde_json::Value) {
        let channels = self.channels.read().await;
        if let Some(tx) = channels.get(&chat_id) {
            // Ignore send errors (no active receivers)
            let _ = tx.send(value);
        }
    }

    /// Subscribe to a chat. Creates the channel if it doesn't exist.
    pub async fn subscribe(&self, chat_id: ChatId) -> broadcast::Receiver<serde_json::Value> {
        let mut channels = self.channels.write().await;
        let tx = channels
            .entry(chat_id)
            .or_insert_with(|| broadcast::channel(self.capacity).0);
        tx.subscribe()
    }

    /// Remove channels with zero subscribers (housekeeping).
    pub async fn cleanup(&self) {
        let mut channels = self.channels.write().await;
        channels.retain(|_, tx| tx.receiver_count() > 0);
    }
}

impl Default for ChatHub {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_publish_subscribe_roundtrip() {
        let hub = ChatHub::new();
        let chat_id = ChatId::new();
        let mut rx = hub.subscribe(chat_id).await;

        let value = serde_json::json!({"type": "message", "content": "hello"});
        hub.publish(chat_id, value.clone()).await;

        let received = rx.recv().await.unwrap();
        assert_eq!(received, value);
    }

    #[tokio::test]
    async fn test_publish_no_subscribers_is_noop() {
        let hub = ChatHub::new();
        // Should not panic
        hub.publish(ChatId::new(), serde_json::json!({"dropped": true}))
            .await;
    }

    #[tokio::test]
    async fn test_cleanup_removes_empty_channels() {
        let hub = ChatHub::new();
        let chat_id = ChatId::new();
        let rx = hub.subscribe(chat_id).await;

        assert_eq!(hub.channels.read().await.len(), 1);

        drop(rx);
        hub.cleanup().await;

        assert_eq!(hub.channels.read().await.len(), 0);
    }

    #[tokio::test]
    async fn test_channels_are_isolated_per_chat() {
        let hub = ChatHub::new();
        let chat_a = ChatId::new();
        let chat_b = ChatId::new();
        let mut rx_a = hub.subscribe(chat_a).await;
        let mut rx_b = hub.subscribe(chat_b).await;

        hub.publish(chat_a, serde_json::json!({"for": "a"})).await;

        assert_eq!(
            rx_a.recv().await.unwrap(),
            serde_json::json!({"for": "a"})
        );
        assert!(rx_b.try_recv().is_err());
    }
}
