//! Shopping list CRUD and search handlers.

use crate::{
    auth::middleware::AuthUser,
    db::ShoppingList,
    types::{AppError, Result, ShoppingListRequest, ShoppingListResponse},
    utils::validate::validate_field,
    AppState,
};
use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;

use super::parse_page_params;

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub page: Option<String>,
    pub per_page: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
}

impl From<ShoppingList> for ShoppingListResponse {
    fn from(l: ShoppingList) -> Self {
        Self {
            id: l.id,
            owner_id: l.owner_id,
            title: l.title,
            description: l.description,
            created_at: l.created_at,
            updated_at: l.updated_at,
        }
    }
}

/// List the caller's shopping lists, optionally paginated.
#[utoipa::path(
    get,
    path = "/v1/shoppinglists",
    responses(
        (status = 200, description = "Shopping lists", body = Vec<ShoppingListResponse>),
        (status = 400, description = "Invalid pagination parameters"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "shoppinglists",
    security(("bearer" = []))
)]
pub async fn list_lists(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Query(query): Query<PageQuery>,
) -> Result<Json<Vec<ShoppingListResponse>>> {
    let page = parse_page_params(query.page.as_deref(), query.per_page.as_deref())?;
    let lists = state.store.get_lists(claims.sub, page).await?;

    Ok(Json(
        lists.into_iter().map(ShoppingListResponse::from).collect(),
    ))
}

/// Create a shopping list.
#[utoipa::path(
    post,
    path = "/v1/shoppinglists",
    request_body = ShoppingListRequest,
    responses(
        (status = 200, description = "Shopping list created", body = ShoppingListResponse),
        (status = 400, description = "Invalid input"),
        (status = 409, description = "Title already in use"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "shoppinglists",
    security(("bearer" = []))
)]
pub async fn create_list(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Json(payload): Json<ShoppingListRequest>,
) -> Result<Json<ShoppingListResponse>> {
    validate_field("title", &payload.title, 1)?;

    // Titles are lowercased and unique per owner
    let title = payload.title.to_lowercase();

    if state
        .store
        .get_list_by_title(claims.sub, &title)
        .await?
        .is_some()
    {
        return Err(AppError::Duplicate(format!(
            "Shopping List {} already exists",
            title
        )));
    }

    let id = state
        .store
        .create_list(claims.sub, &title, &payload.description)
        .await?;

    let list = state
        .store
        .get_list(claims.sub, id)
        .await?
        .ok_or_else(|| AppError::Internal("created list not found".to_string()))?;

    Ok(Json(list.into()))
}

/// Fetch a single shopping list.
#[utoipa::path(
    get,
    path = "/v1/shoppinglists/{id}",
    params(("id" = i64, Path, description = "Shopping list ID")),
    responses(
        (status = 200, description = "Shopping list", body = ShoppingListResponse),
        (status = 404, description = "Not found"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "shoppinglists",
    security(("bearer" = []))
)]
pub async fn get_list(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<ShoppingListResponse>> {
    let list = state
        .store
        .get_list(claims.sub, id)
        .await?
        .ok_or_else(|| AppError::NotFound(id.to_string()))?;

    Ok(Json(list.into()))
}

/// Update a shopping list's title and description.
#[utoipa::path(
    put,
    path = "/v1/shoppinglists/{id}",
    params(("id" = i64, Path, description = "Shopping list ID")),
    request_body = ShoppingListRequest,
    responses(
        (status = 200, description = "Shopping list updated", body = ShoppingListResponse),
        (status = 404, description = "Not found"),
        (status = 409, description = "Title already in use"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "shoppinglists",
    security(("bearer" = []))
)]
pub async fn update_list(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Path(id): Path<i64>,
    Json(payload): Json<ShoppingListRequest>,
) -> Result<Json<ShoppingListResponse>> {
    validate_field("title", &payload.title, 1)?;
    let title = payload.title.to_lowercase();

    state
        .store
        .get_list(claims.sub, id)
        .await?
        .ok_or_else(|| AppError::NotFound(id.to_string()))?;

    // A rename must not collide with another of the owner's lists
    if let Some(existing) = state.store.get_list_by_title(claims.sub, &title).await? {
        if existing.id != id {
            return Err(AppError::Duplicate(format!(
                "Shopping List {} already exists",
                title
            )));
        }
    }

    state
        .store
        .update_list(claims.sub, id, &title, &payload.description)
        .await?;

    let list = state
        .store
        .get_list(claims.sub, id)
        .await?
        .ok_or_else(|| AppError::NotFound(id.to_string()))?;

    Ok(Json(list.into()))
}

/// Delete a shopping list and its items.
#[utoipa::path(
    delete,
    path = "/v1/shoppinglists/{id}",
    params(("id" = i64, Path, description = "Shopping list ID")),
    responses(
        (status = 200, description = "Shopping list deleted"),
        (status = 404, description = "Not found"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "shoppinglists",
    security(("bearer" = []))
)]
pub async fn delete_list(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>> {
    let list = state
        .store
        .get_list(claims.sub, id)
        .await?
        .ok_or_else(|| AppError::NotFound(id.to_string()))?;

    state.store.delete_list(claims.sub, id).await?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "message": format!("Shopping List '{}' deleted successfully", list.title)
    })))
}

/// Search the caller's shopping lists by title substring.
#[utoipa::path(
    get,
    path = "/v1/search",
    responses(
        (status = 200, description = "Matching shopping lists", body = Vec<ShoppingListResponse>),
        (status = 400, description = "Missing search keyword"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "search",
    security(("bearer" = []))
)]
pub async fn search_lists(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<ShoppingListResponse>>> {
    let q = query
        .q
        .as_deref()
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .ok_or_else(|| AppError::Validation("Please provide a search keyword".to_string()))?;

    let lists = state.store.search_lists(claims.sub, q).await?;

    Ok(Json(
        lists.into_iter().map(ShoppingListResponse::from).collect(),
    ))
}
