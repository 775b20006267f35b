//! instdir-rs
//! =========
//!
//! Umbrella crate for the institution directory workspace. Everything lives
//! in [`instdir_core`]; this crate re-exports it and hosts the demos:
//!
//! ```text
//! cargo run --example basic_usage
//! cargo run --example advanced_filtering
//! cargo run --example error_handling
//! ```
//!
//! The HTTP surface is the `instdir-server` binary and the terminal one is
//! `instdir-cli`.

pub use instdir_core::*;
