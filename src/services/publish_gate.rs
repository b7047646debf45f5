use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::{info, warn};

use crate::{
    error::ClientError,
    models::broadcast::{AdminCredential, PublishResponse},
    services::{api::ApiClient, broadcast_sync::BroadcastSync, in_flight::InFlight},
};

/// Admin-side write path: holds the message draft, submits it with a
/// credential and re-reads the canonical broadcast on success.
///
/// The gate never writes the broadcast cache itself; it only asks the sync
/// client to refresh.
pub struct PublishGate {
    api: ApiClient,
    sync: BroadcastSync,
    draft: Mutex<String>,
    sending: InFlight,
}

impl PublishGate {
    pub fn new(api: ApiClient, sync: BroadcastSync) -> Self {
        Self {
            api,
            sync,
            draft: Mutex::new(String::new()),
            sending: InFlight::default(),
        }
    }

    pub fn set_draft(&self, text: impl Into<String>) {
        *self.draft_slot() = text.into();
    }

    pub fn draft(&self) -> String {
        self.draft_slot().clone()
    }

    pub fn is_sending(&self) -> bool {
        self.sending.is_set()
    }

    /// Publish the current draft.
    ///
    /// The credential is consumed by the attempt and goes out only in the
    /// `X-Admin-Key` header. On rejection or transport failure the draft is
    /// kept so the admin can fix the key and resubmit; nothing is retried
    /// automatically. On success the draft is cleared and exactly one
    /// refresh runs before this returns.
    pub async fn publish(&self, credential: AdminCredential) -> Result<PublishResponse, ClientError> {
        let message = self.draft();
        if message.trim().is_empty() {
            return Err(ClientError::Validation("message"));
        }

        let sending = self.sending.begin()?;
        let result = self.api.publish_broadcast(&message, &credential).await;
        drop(credential);
        drop(sending);

        match result {
            Ok(response) => {
                info!("Broadcast published ({} chars)", message.chars().count());
                self.draft_slot().clear();
                self.sync.refresh().await;
                Ok(response)
            }
            Err(e) => {
                warn!("Broadcast publish failed: {}", e);
                Err(e)
            }
        }
    }

    fn draft_slot(&self) -> MutexGuard<'_, String> {
        self.draft.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
