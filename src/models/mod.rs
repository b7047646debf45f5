pub mod broadcast;
pub mod image;
