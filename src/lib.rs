//! # trolley
//!
//! A shopping list REST API server with JWT session authentication, built on
//! Axum and libsql.
//!
//! ## Overview
//!
//! trolley can be used in two ways:
//!
//! 1. **As a standalone server** - Run the `trolley-server` binary
//! 2. **As a library** - Mount [`api::routes::create_router`] inside your own
//!    Axum application
//!
//! ## Quick Start (Library Usage)
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use trolley::{AppState, auth::jwt::AuthService, db::Store, utils::config::Config};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env().expect("configuration");
//!     let store = Store::open(&config.database.path).await?;
//!     let auth = AuthService::new(config.auth.jwt_secret.clone(), config.auth.token_ttl);
//!
//!     let state = AppState {
//!         config: Arc::new(config),
//!         store: Arc::new(store),
//!         auth: Arc::new(auth),
//!     };
//!     let app = trolley::api::routes::create_router(state);
//!
//!     let listener = tokio::net::TcpListener::bind("127.0.0.1:3000").await?;
//!     axum::serve(listener, app).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Authentication model
//!
//! Login issues an HS256-signed JWT carrying the user id. Every protected
//! request passes through the authentication gate, which verifies signature
//! and expiry and then checks the append-only revoked-token ledger. Logout
//! writes the exact token string into the ledger, invalidating it forever.

/// HTTP API layer (handlers, routes, OpenAPI doc).
pub mod api;
/// JWT codec, password hashing, and the authentication gate.
pub mod auth;
/// libsql persistence for users, the token ledger, and lists.
pub mod db;
/// Shared wire types and the error taxonomy.
pub mod types;
/// Configuration and validation helpers.
pub mod utils;

use crate::{auth::jwt::AuthService, db::Store, utils::config::Config};
use std::sync::Arc;

/// Shared application state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub store: Arc<Store>,
    pub auth: Arc<AuthService>,
}
