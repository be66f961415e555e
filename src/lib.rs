pub mod api;
pub mod config;
pub mod constants;
pub mod engine;
pub mod error;
pub mod model;
pub mod provider;
pub mod service;
pub mod storage;
pub mod tracing;

pub use engine::*;
pub use error::*;
