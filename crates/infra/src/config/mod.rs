//! Configuration loading

pub mod loader;

pub use loader::{from_lookup, load};
