//! `erpdesk-client`
//!
//! **Responsibility:** talking to the ERP REST API on behalf of the UI.
//!
//! This crate provides:
//! - Client configuration (base URL, refresh endpoint, auth endpoints)
//! - A `Transport` seam with a reqwest implementation that owns the cookie jar
//! - `ApiClient`: JSON requests with one transparent session refresh + retry
//! - `AuthService` / `SessionContext`: login, logout, session restore
//!
//! The backend is the authority for every business rule; this crate only
//! moves JSON and reports structured failures.

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod session;
pub mod transport;

#[cfg(any(test, feature = "test-util"))]
pub mod testing;

pub use auth::{Ack, AuthService, Credentials, PasswordResetConfirm, Registration, User};
pub use client::ApiClient;
pub use config::{AuthPaths, ClientConfig, ConfigError};
pub use error::{ApiError, ErrorKind};
pub use session::SessionContext;
pub use transport::{ApiRequest, ApiResponse, HttpTransport, Method, Transport, TransportError};
