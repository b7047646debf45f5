use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{SecondsFormat, Utc};
use tokio::sync::RwLock;

use crate::models::broadcast::{BroadcastId, BroadcastMessage};

/// In-memory home of the current broadcast on the reference server.
/// Publishing supersedes the previous message; nothing is ever edited.
#[derive(Default)]
pub struct BroadcastStore {
    current: RwLock<Option<BroadcastMessage>>,
    last_id: AtomicI64,
}

impl BroadcastStore {
    pub async fn current(&self) -> Option<BroadcastMessage> {
        self.current.read().await.clone()
    }

    pub async fn publish(&self, message: String) -> BroadcastMessage {
        let id = self.last_id.fetch_add(1, Ordering::SeqCst) + 1;
        let record = BroadcastMessage {
            id: BroadcastId::Number(id),
            message,
            created_at: Some(Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)),
        };
        *self.current.write().await = Some(record.clone());
        record
    }
}
