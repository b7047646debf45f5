//! Client components talking to the reference server over a real socket.

use std::time::Duration;

use megaphone::{
    config::{ClientConfig, ServerConfig},
    error::ClientError,
    models::broadcast::AdminCredential,
    routes, AppState,
    services::{
        api::ApiClient, broadcast_sync::BroadcastSync, image_generation::ImageGenerator,
        publish_gate::PublishGate,
    },
};

const ADMIN_KEY: &str = "e2e-admin-key";

async fn spawn_server(upstream: Option<String>) -> String {
    let config = ServerConfig {
        host: "127.0.0.1".into(),
        port: 0,
        admin_key: ADMIN_KEY.into(),
        image_generation_api_url: upstream,
        upstream_timeout: Duration::from_secs(5),
    };
    let app = routes::router(AppState::new(config).unwrap());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

fn client_config(base: &str, poll_interval: Duration) -> ClientConfig {
    ClientConfig {
        broadcast_url: format!("{base}/broadcast"),
        image_url: Some(format!("{base}/generate-image")),
        poll_interval,
        request_timeout: Duration::from_secs(5),
    }
}

#[tokio::test]
async fn publish_reaches_every_polling_client() {
    let base = spawn_server(None).await;
    let config = client_config(&base, Duration::from_millis(100));

    let admin_api = ApiClient::new(&config).unwrap();
    let admin_sync = BroadcastSync::new(admin_api.clone(), config.poll_interval);
    let gate = PublishGate::new(admin_api, admin_sync.clone());

    let viewer = BroadcastSync::new(ApiClient::new(&config).unwrap(), config.poll_interval);
    viewer.activate();
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(viewer.current().is_none());

    gate.set_draft("Maintenance at 22:00");
    gate.publish(AdminCredential::new(ADMIN_KEY)).await.unwrap();

    assert_eq!(gate.draft(), "");
    assert_eq!(admin_sync.current().unwrap().message, "Maintenance at 22:00");

    tokio::time::sleep(Duration::from_millis(300)).await;
    let seen = viewer.current().unwrap();
    assert_eq!(seen.message, "Maintenance at 22:00");
    assert_eq!(Some(seen), admin_sync.current());

    viewer.deactivate();
}

#[tokio::test]
async fn wrong_key_is_rejected_and_nothing_changes() {
    let base = spawn_server(None).await;
    let config = client_config(&base, Duration::from_secs(60));
    let api = ApiClient::new(&config).unwrap();
    let sync = BroadcastSync::new(api.clone(), config.poll_interval);
    let gate = PublishGate::new(api, sync.clone());

    gate.set_draft("sneaky");
    let err = gate.publish(AdminCredential::new("guess")).await.unwrap_err();

    assert!(matches!(err, ClientError::Authorization { status: 403 }));
    assert_eq!(gate.draft(), "sneaky");
    sync.refresh().await;
    assert!(sync.current().is_none());
}

#[tokio::test]
async fn image_generation_round_trip_through_server() {
    let upstream = wiremock::MockServer::start().await;
    wiremock::Mock::given(wiremock::matchers::method("POST"))
        .respond_with(
            wiremock::ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "url": "https://x/y.png" })),
        )
        .mount(&upstream)
        .await;

    let base = spawn_server(Some(upstream.uri())).await;
    let config = client_config(&base, Duration::from_secs(60));
    let generator = ImageGenerator::new(ApiClient::new(&config).unwrap());

    assert_eq!(generator.generate("robot").await.unwrap(), "https://x/y.png");
    assert_eq!(generator.displayed().as_deref(), Some("https://x/y.png"));
}
