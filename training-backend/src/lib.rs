// src/lib.rs
pub mod api;
pub mod config;
pub mod domain;
pub mod error;
pub mod gateway;
pub mod hierarchy;
pub mod logging;
pub mod service;
pub mod utils;

// Re-export commonly used types
pub use error::{AppError, AppResult};
