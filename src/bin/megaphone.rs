/// Command-line client for the broadcast and image-generation services.
///
/// Usage:
///   megaphone watch              : follow the current broadcast until Ctrl-C
///   megaphone publish MESSAGE    : publish a broadcast (admin key from
///                                  MEGAPHONE_ADMIN_KEY, else read from stdin)
///   megaphone generate PROMPT    : generate an image and print its URL

use std::io::{self, BufRead, Write};

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use megaphone::{
    config::ClientConfig,
    models::broadcast::{AdminCredential, BroadcastMessage},
    services::{
        api::ApiClient, broadcast_sync::BroadcastSync, image_generation::ImageGenerator,
        publish_gate::PublishGate,
    },
};

#[derive(Parser)]
#[command(name = "megaphone", about = "Follow and publish broadcast announcements")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Poll the broadcast service and print every update
    Watch,
    /// Publish a new broadcast (admin only)
    Publish {
        message: String,
    },
    /// Generate an image from a text prompt
    Generate {
        prompt: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let args = Args::parse();
    let config = ClientConfig::from_env()?;
    let api = ApiClient::new(&config)?;

    match args.command {
        Command::Watch => watch(BroadcastSync::new(api, config.poll_interval)).await,
        Command::Publish { message } => {
            let sync = BroadcastSync::new(api.clone(), config.poll_interval);
            let gate = PublishGate::new(api, sync.clone());
            gate.set_draft(message);

            gate.publish(read_credential()?).await?;
            if let Some(current) = sync.current() {
                println!("{}", render(&current));
            }
            Ok(())
        }
        Command::Generate { prompt } => {
            let url = ImageGenerator::new(api).generate(&prompt).await?;
            println!("{url}");
            Ok(())
        }
    }
}

async fn watch(sync: BroadcastSync) -> anyhow::Result<()> {
    let mut updates = sync.subscribe();
    sync.activate();

    loop {
        tokio::select! {
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
                if let Some(current) = updates.borrow_and_update().as_ref() {
                    println!("{}", render(current));
                }
            }
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    sync.deactivate();
    Ok(())
}

fn read_credential() -> anyhow::Result<AdminCredential> {
    if let Ok(key) = std::env::var("MEGAPHONE_ADMIN_KEY") {
        if !key.is_empty() {
            return Ok(AdminCredential::new(key));
        }
    }

    eprint!("Admin key: ");
    io::stderr().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(AdminCredential::new(line.trim_end_matches(['\r', '\n'])))
}

fn render(message: &BroadcastMessage) -> String {
    match message.published_at() {
        Some(at) => format!("[{}] {}", at.format("%Y-%m-%d %H:%M"), message.message),
        None => message.message.clone(),
    }
}
