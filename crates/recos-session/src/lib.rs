//! Recos Session - Request orchestration for the product discovery screen
//!
//! This crate provides:
//! - Independent controllers for search, selection-derived views and analytics
//! - `Screen`: composition of the controllers plus the local filter inputs
//! - `BackendHandle`: a background runtime that executes remote calls
//! - Display helpers shared by every front end

pub mod analytics;
pub mod backend;
pub mod config;
pub mod display;
pub mod error;
pub mod screen;
pub mod search;
pub mod selection;

pub use analytics::*;
pub use backend::*;
pub use config::*;
pub use display::*;
pub use error::*;
pub use screen::*;
pub use search::*;
pub use selection::*;
