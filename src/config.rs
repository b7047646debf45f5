use std::env;
use std::time::Duration;

/// Settings for the client side: where the two remote resources live and how
/// often to poll.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub broadcast_url: String,
    pub image_url: Option<String>,
    pub poll_interval: Duration,
    pub request_timeout: Duration,
}

impl ClientConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            broadcast_url: required("BROADCAST_API_URL")?,
            image_url: env::var("IMAGE_API_URL").ok().filter(|s| !s.is_empty()),
            poll_interval: parse_poll_interval(
                &env::var("BROADCAST_POLL_INTERVAL_MS").unwrap_or_else(|_| "5000".into()),
            )?,
            request_timeout: Duration::from_secs(
                env::var("HTTP_TIMEOUT_SECS")
                    .unwrap_or_else(|_| "60".into())
                    .parse()?,
            ),
        })
    }
}

/// Settings for the reference broadcast server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub admin_key: String,
    pub image_generation_api_url: Option<String>,
    pub upstream_timeout: Duration,
}

impl ServerConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let admin_key = required("ADMIN_KEY")?;
        if admin_key.trim().is_empty() {
            anyhow::bail!("ADMIN_KEY must not be empty");
        }

        Ok(Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".into())
                .parse()?,
            admin_key,
            image_generation_api_url: env::var("IMAGE_GENERATION_API_URL")
                .ok()
                .filter(|s| !s.is_empty()),
            upstream_timeout: Duration::from_secs(
                env::var("UPSTREAM_TIMEOUT_SECS")
                    .unwrap_or_else(|_| "60".into())
                    .parse()?,
            ),
        })
    }
}

fn parse_poll_interval(raw: &str) -> anyhow::Result<Duration> {
    let millis: u64 = raw.trim().parse()?;
    if millis == 0 {
        anyhow::bail!("BROADCAST_POLL_INTERVAL_MS must be greater than 0");
    }
    Ok(Duration::from_millis(millis))
}

fn required(key: &str) -> anyhow::Result<String> {
    env::var(key).map_err(|_| anyhow::anyhow!("Missing required env var: {}", key))
}
