//! Application layer - Use cases and ports
//!
//! Services here implement the generation pipeline (selection, fallback
//! orchestration, normalization, suggestions) against outbound ports; the
//! concrete HTTP clients live in the infrastructure layer.

pub mod ports;
pub mod services;
