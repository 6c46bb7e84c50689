//! Domain services - pure business logic operations

mod xp_policy;

pub use xp_policy::XpPolicy;
