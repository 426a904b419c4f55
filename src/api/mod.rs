//! HTTP API Handlers and Routes
//!
//! The REST API layer for trolley, built on the Axum web framework.
//!
//! # Module Structure
//!
//! - [`api::handlers`](crate::api::handlers) - Request handlers for each endpoint
//! - [`api::routes`](crate::api::routes) - Route definitions and router configuration
//!
//! # API Endpoints
//!
//! ## Authentication (`/v1/auth`)
//! - `POST /v1/auth/register` - Register new user
//! - `POST /v1/auth/login` - Login and receive JWT session token
//! - `POST /v1/auth/logout` - Revoke the presented token
//!
//! ## Account (`/v1`)
//! - `POST /v1/resetpassword` - Security-question gated password reset
//! - `GET /v1/user` - Account info
//! - `PUT /v1/user` - Update username/email (password required)
//!
//! ## Shopping lists (`/v1/shoppinglists`)
//! - `GET /v1/shoppinglists` - List (pagination via `page`/`per_page`)
//! - `POST /v1/shoppinglists` - Create
//! - `GET|PUT|DELETE /v1/shoppinglists/{id}` - Single list
//! - `GET|POST /v1/shoppinglists/{id}/items` - Items on a list
//! - `GET|PUT|DELETE /v1/shoppinglists/{id}/items/{item_id}` - Single item
//!
//! ## Search (`/v1/search`)
//! - `GET /v1/search?q=` - Search list titles
//! - `GET /v1/search/{id}?q=` - Search item titles within a list
//!
//! ## Documentation
//! - `GET /v1/openapi.json` - Generated OpenAPI document
//!
//! # Authentication
//!
//! Every endpoint except register/login/welcome requires a valid JWT in the
//! `Authorization` header:
//! ```text
//! Authorization: Bearer <token>
//! ```

/// Request and response handlers for all API endpoints.
pub mod handlers;
/// Router configuration and route definitions.
pub mod routes;

use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::auth::register,
        handlers::auth::login,
        handlers::auth::logout,
        handlers::user::reset_password,
        handlers::user::get_account,
        handlers::user::update_account,
        handlers::lists::list_lists,
        handlers::lists::create_list,
        handlers::lists::get_list,
        handlers::lists::update_list,
        handlers::lists::delete_list,
        handlers::lists::search_lists,
        handlers::items::list_items,
        handlers::items::create_item,
        handlers::items::get_item,
        handlers::items::update_item,
        handlers::items::delete_item,
        handlers::items::search_items,
    ),
    components(schemas(
        crate::types::RegisterRequest,
        crate::types::RegisterResponse,
        crate::types::LoginRequest,
        crate::types::LoginResponse,
        crate::types::ResetPasswordRequest,
        crate::types::UpdateAccountRequest,
        crate::types::ShoppingListRequest,
        crate::types::ShoppingListResponse,
        crate::types::ItemRequest,
        crate::types::ItemResponse,
        crate::types::ItemListResponse,
        crate::types::PageMeta,
    )),
    tags(
        (name = "auth", description = "Registration, login, and logout"),
        (name = "user", description = "Account management"),
        (name = "shoppinglists", description = "Shopping list CRUD"),
        (name = "items", description = "List item CRUD"),
        (name = "search", description = "Title substring search")
    )
)]
pub struct ApiDoc;
