use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct GenerateImageRequest {
    #[serde(default)]
    pub prompt: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateImageResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
}

impl GenerateImageResponse {
    /// The image URL, only when the service reported success and sent one.
    pub fn into_image_url(self) -> Option<String> {
        if !self.success {
            return None;
        }
        self.image_url.filter(|url| !url.is_empty())
    }
}

/// Reply from the upstream image model.
#[derive(Debug, Deserialize)]
pub struct UpstreamImageResponse {
    #[serde(default)]
    pub url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_url_requires_success_flag() {
        let ok: GenerateImageResponse =
            serde_json::from_str(r#"{"success":true,"imageUrl":"https://x/y.png"}"#).unwrap();
        assert_eq!(ok.into_image_url().as_deref(), Some("https://x/y.png"));

        let failed: GenerateImageResponse =
            serde_json::from_str(r#"{"success":false,"imageUrl":"https://x/y.png"}"#).unwrap();
        assert!(failed.into_image_url().is_none());

        let empty: GenerateImageResponse =
            serde_json::from_str(r#"{"success":true,"imageUrl":""}"#).unwrap();
        assert!(empty.into_image_url().is_none());
    }
}
