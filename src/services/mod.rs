pub mod api;
pub mod broadcast_store;
pub mod broadcast_sync;
pub mod image_generation;
pub mod in_flight;
pub mod metrics;
pub mod publish_gate;
