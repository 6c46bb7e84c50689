//! Infrastructure layer - HTTP surface, provider clients, configuration

pub mod config;
pub mod http;
pub mod image_store;
pub mod providers;
pub mod state;
