//! HTTP boundary for todosimple.
//!
//! # Responsibility
//! - Translate REST requests into user/task service calls.
//! - Map domain outcomes to status codes and JSON error bodies.
//!
//! # Invariants
//! - Handlers never touch SQL; all storage access goes through core services.
//! - Blocking database work runs on tokio's blocking pool.

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;

pub use config::{Config, ConfigError};
pub use error::ApiError;
pub use routes::create_router;
pub use server::serve;
pub use state::AppState;
