use lazy_static::lazy_static;
use prometheus::{register_int_counter, register_int_counter_vec, IntCounter, IntCounterVec};

lazy_static! {
    pub static ref BROADCASTS_PUBLISHED: IntCounter = register_int_counter!(
        "megaphone_broadcasts_published_total",
        "Broadcasts accepted by the server"
    ).unwrap();

    pub static ref BROADCASTS_REJECTED: IntCounterVec = register_int_counter_vec!(
        "megaphone_broadcasts_rejected_total",
        "Broadcast writes refused, by reason",
        &["reason"]
    ).unwrap();

    pub static ref IMAGE_GENERATIONS: IntCounterVec = register_int_counter_vec!(
        "megaphone_image_generations_total",
        "Image generation requests, by outcome",
        &["status"]
    ).unwrap();
}
