//! HTTP hosting subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware stack)
//!     → request.rs (client IP, User-Agent for the logger)
//!     → handlers
//! ```

pub mod request;
pub mod server;

pub use request::{client_ip, user_agent};
pub use server::HttpServer;
