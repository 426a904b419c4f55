use crate::AppState;
use axum::{
    middleware,
    routing::{get, post},
    Json, Router,
};
use utoipa::OpenApi;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Builds the application router.
///
/// Public routes (welcome, register, login) are merged with protected routes
/// wrapped by the authentication gate; everything is mounted under `/v1`.
/// Serves the generated OpenAPI document.
async fn openapi_spec() -> Json<utoipa::openapi::OpenApi> {
    Json(crate::api::ApiDoc::openapi())
}

pub fn create_router(state: AppState) -> Router {
    let public_routes = Router::new()
        // Public routes (no auth required)
        .route("/", get(crate::api::handlers::auth::welcome))
        .route("/auth/register", post(crate::api::handlers::auth::register))
        .route("/auth/login", post(crate::api::handlers::auth::login))
        .route("/openapi.json", get(openapi_spec));

    let gate_state = state.clone();
    let protected_routes = Router::new()
        // Protected routes (auth required)
        .route("/auth/logout", post(crate::api::handlers::auth::logout))
        .route(
            "/resetpassword",
            post(crate::api::handlers::user::reset_password),
        )
        .route(
            "/user",
            get(crate::api::handlers::user::get_account)
                .put(crate::api::handlers::user::update_account),
        )
        .route("/search", get(crate::api::handlers::lists::search_lists))
        .route(
            "/search/{id}",
            get(crate::api::handlers::items::search_items),
        )
        .route(
            "/shoppinglists",
            get(crate::api::handlers::lists::list_lists)
                .post(crate::api::handlers::lists::create_list),
        )
        .route(
            "/shoppinglists/{id}",
            get(crate::api::handlers::lists::get_list)
                .put(crate::api::handlers::lists::update_list)
                .delete(crate::api::handlers::lists::delete_list),
        )
        .route(
            "/shoppinglists/{id}/items",
            get(crate::api::handlers::items::list_items)
                .post(crate::api::handlers::items::create_item),
        )
        .route(
            "/shoppinglists/{id}/items/{item_id}",
            get(crate::api::handlers::items::get_item)
                .put(crate::api::handlers::items::update_item)
                .delete(crate::api::handlers::items::delete_item),
        )
        .layer(middleware::from_fn(move |req, next| {
            crate::auth::middleware::auth_middleware(gate_state.clone(), req, next)
        }));

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .nest("/v1", public_routes.merge(protected_routes))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
