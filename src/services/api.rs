use reqwest::{header::HeaderValue, Client};

use crate::{
    config::ClientConfig,
    error::ClientError,
    models::{
        broadcast::{AdminCredential, BroadcastEnvelope, BroadcastMessage, PublishRequest, PublishResponse},
        image::{GenerateImageRequest, GenerateImageResponse},
    },
};

/// Header carrying the admin credential on broadcast writes.
pub const ADMIN_KEY_HEADER: &str = "X-Admin-Key";

/// Thin HTTP layer over the broadcast and image-generation resources.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    broadcast_url: String,
    image_url: Option<String>,
}

impl ApiClient {
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let client = Client::builder().timeout(config.request_timeout).build()?;
        Ok(Self {
            client,
            broadcast_url: config.broadcast_url.clone(),
            image_url: config.image_url.clone(),
        })
    }

    /// GET the broadcast resource. `Ok(None)` means the service has nothing
    /// current.
    pub async fn fetch_broadcast(&self) -> Result<Option<BroadcastMessage>, ClientError> {
        let envelope: BroadcastEnvelope = self
            .client
            .get(&self.broadcast_url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(envelope.message)
    }

    /// POST a new broadcast. The credential only travels in the
    /// `X-Admin-Key` header; a key that is not a legal header value is a
    /// validation error and nothing is sent.
    pub async fn publish_broadcast(
        &self,
        message: &str,
        credential: &AdminCredential,
    ) -> Result<PublishResponse, ClientError> {
        let mut admin_key = HeaderValue::from_str(credential.expose())
            .map_err(|_| ClientError::Validation("admin key"))?;
        admin_key.set_sensitive(true);

        let response = self
            .client
            .post(&self.broadcast_url)
            .header(ADMIN_KEY_HEADER, admin_key)
            .json(&PublishRequest {
                message: message.to_string(),
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Authorization {
                status: status.as_u16(),
            });
        }

        let body: PublishResponse = response.json().await?;
        if !body.success {
            return Err(ClientError::Authorization {
                status: status.as_u16(),
            });
        }
        Ok(body)
    }

    pub async fn generate_image(&self, prompt: &str) -> Result<GenerateImageResponse, ClientError> {
        let url = self
            .image_url
            .as_deref()
            .ok_or(ClientError::NotConfigured("IMAGE_API_URL"))?;

        let response = self
            .client
            .post(url)
            .json(&GenerateImageRequest {
                prompt: prompt.to_string(),
            })
            .send()
            .await?;

        if !response.status().is_success() {
            tracing::warn!("Image generation returned {}", response.status());
            return Err(ClientError::GenerationFailed);
        }

        Ok(response.json().await?)
    }
}
