use tokio::sync::watch;
use tracing::{info, warn};

use crate::{
    error::ClientError,
    services::{api::ApiClient, in_flight::InFlight},
};

/// Turns a prompt into an image URL and holds the last good one for display.
pub struct ImageGenerator {
    api: ApiClient,
    displayed: watch::Sender<Option<String>>,
    generating: InFlight,
}

impl ImageGenerator {
    pub fn new(api: ApiClient) -> Self {
        let (displayed, _) = watch::channel(None);
        Self {
            api,
            displayed,
            generating: InFlight::default(),
        }
    }

    /// Request one image. Only a response with `success: true` and a URL
    /// replaces the displayed image; anything else leaves it as it was.
    pub async fn generate(&self, prompt: &str) -> Result<String, ClientError> {
        if prompt.trim().is_empty() {
            return Err(ClientError::Validation("prompt"));
        }

        let _generating = self.generating.begin()?;
        let response = self.api.generate_image(prompt).await.map_err(|e| {
            warn!("Image generation request failed: {}", e);
            e
        })?;

        match response.into_image_url() {
            Some(url) => {
                info!("Image generated: {}", url);
                self.displayed.send_replace(Some(url.clone()));
                Ok(url)
            }
            None => {
                warn!("Image generation reported failure");
                Err(ClientError::GenerationFailed)
            }
        }
    }

    pub fn displayed(&self) -> Option<String> {
        self.displayed.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<String>> {
        self.displayed.subscribe()
    }

    pub fn is_generating(&self) -> bool {
        self.generating.is_set()
    }
}
