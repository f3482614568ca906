pub mod config;
pub mod events;
pub mod pie;
