//! Recos Client - Client library for the Recos catalog backend
//!
//! This crate provides:
//! - `CatalogApi`: the four remote operations the session core depends on
//! - `CatalogClient`: the HTTP implementation of `CatalogApi`
//! - Wire types and client configuration

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod types;

pub use api::*;
pub use client::*;
pub use config::*;
pub use error::*;
pub use types::*;
