//! Domain layer - Core game vocabulary with no external service dependencies
//!
//! This layer contains:
//! - Value Objects: characters, generation settings, provider identities,
//!   narrative results
//! - Domain Services: pure game logic such as the XP policy

pub mod services;
pub mod value_objects;
