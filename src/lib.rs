//! Library exports for the form submission service
//!
//! The binary in `main.rs` wires these together; tests drive them directly.

pub mod config;
pub mod database;
pub mod error;
pub mod handler;
pub mod middleware;
pub mod model;
pub mod pagination;
pub mod route;
pub mod state;
