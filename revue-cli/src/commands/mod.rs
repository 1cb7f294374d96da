//! CLI command implementations

pub mod review;

pub use review::ReviewArgs;
