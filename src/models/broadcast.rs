use std::fmt;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// Service-assigned identifier. The broadcast service hands out integers,
/// but the client treats the value as opaque.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BroadcastId {
    Number(i64),
    Text(String),
}

impl fmt::Display for BroadcastId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BroadcastId::Number(n) => write!(f, "{n}"),
            BroadcastId::Text(s) => f.write_str(s),
        }
    }
}

/// The single shared announcement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BroadcastMessage {
    pub id: BroadcastId,
    pub message: String,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl BroadcastMessage {
    /// Publication time, when the service sent an ISO-8601 timestamp.
    /// Naive timestamps are read as UTC.
    pub fn published_at(&self) -> Option<DateTime<Utc>> {
        let raw = self.created_at.as_deref()?;
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(dt.with_timezone(&Utc));
        }
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
            .ok()
            .map(|naive| naive.and_utc())
    }
}

/// Body of `GET` on the broadcast resource. An absent or null `message`
/// means the service has nothing current.
#[derive(Debug, Default, Deserialize)]
pub struct BroadcastEnvelope {
    #[serde(default)]
    pub message: Option<BroadcastMessage>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PublishRequest {
    #[serde(default)]
    pub message: String,
}

/// Body returned by `POST` on the broadcast resource.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<BroadcastId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

/// Admin secret for one publish attempt. Moved into the call that uses it
/// and dropped afterwards; `Debug` never prints the value.
#[derive(Clone)]
pub struct AdminCredential(String);

impl AdminCredential {
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    pub(crate) fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AdminCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AdminCredential(***)")
    }
}
