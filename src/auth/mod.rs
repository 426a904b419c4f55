//! JWT Authentication and Middleware
//!
//! Authentication infrastructure for the trolley API: JWT session token
//! encoding/decoding, Argon2 password hashing, and the Axum middleware that
//! gates every protected route.
//!
//! # Module Structure
//!
//! - [`auth::jwt`](crate::auth::jwt) - Token codec and password hashing
//! - [`auth::middleware`](crate::auth::middleware) - Request gate and extractors
//!
//! # Token Lifecycle
//!
//! A token is issued at login and stays valid until its expiry, unless it is
//! explicitly revoked first. Logout writes the exact token string into the
//! `revoked_tokens` ledger; the ledger is append-only and consulted on every
//! authenticated request, after signature and expiry have been verified.
//!
//! # Usage
//!
//! ```ignore
//! use trolley::auth::jwt::AuthService;
//!
//! let auth = AuthService::new(config.auth.jwt_secret.clone(), config.auth.token_ttl);
//! let token = auth.encode_token(user.id)?;
//! let claims = auth.decode_token(&token)?;
//! ```

/// JWT token codec and Argon2 password hashing.
pub mod jwt;
/// Authentication middleware and extractors for protected routes.
pub mod middleware;
