//! Persistence layer.
//!
//! A single embedded libsql database holds user accounts, the revoked-token
//! ledger, and shopping list data. All mutation is single-row inserts or
//! updates; no multi-row transactions are required.

/// libsql-backed store and row types.
pub mod store;

pub use store::{ListItem, ShoppingList, Store, User};
