//! List item CRUD and search handlers.
//!
//! Every operation is scoped to the authenticated owner; the parent list
//! must exist and belong to the caller or the request 404s.

use crate::{
    auth::middleware::AuthUser,
    db::ListItem,
    types::{AppError, ItemListResponse, ItemRequest, ItemResponse, PageMeta, Result},
    utils::validate::validate_field,
    AppState,
};
use axum::{
    extract::{Path, Query, State},
    Json,
};

use super::lists::{PageQuery, SearchQuery};
use super::parse_page_params;

impl From<ListItem> for ItemResponse {
    fn from(i: ListItem) -> Self {
        Self {
            id: i.id,
            list_id: i.list_id,
            owner_id: i.owner_id,
            title: i.title,
            description: i.description,
            created_at: i.created_at,
            updated_at: i.updated_at,
        }
    }
}

/// List the items on a shopping list, newest first, optionally paginated.
#[utoipa::path(
    get,
    path = "/v1/shoppinglists/{id}/items",
    params(("id" = i64, Path, description = "Shopping list ID")),
    responses(
        (status = 200, description = "Items with pagination metadata", body = ItemListResponse),
        (status = 400, description = "Invalid pagination parameters"),
        (status = 404, description = "Shopping list not found"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "items",
    security(("bearer" = []))
)]
pub async fn list_items(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Path(list_id): Path<i64>,
    Query(query): Query<PageQuery>,
) -> Result<Json<ItemListResponse>> {
    state
        .store
        .get_list(claims.sub, list_id)
        .await?
        .ok_or_else(|| AppError::NotFound(list_id.to_string()))?;

    let page = parse_page_params(query.page.as_deref(), query.per_page.as_deref())?;
    let items = state.store.get_items(claims.sub, list_id, page).await?;

    let pagination = match page {
        Some((page, per_page)) => {
            let total_items = state.store.count_items(claims.sub, list_id).await?;
            let number_of_pages = (total_items + per_page - 1) / per_page;
            Some(PageMeta {
                has_next: page < number_of_pages,
                has_prev: page > 1,
                total_items,
                number_of_pages,
            })
        }
        None => None,
    };

    Ok(Json(ItemListResponse {
        items: items.into_iter().map(ItemResponse::from).collect(),
        pagination,
    }))
}

/// Add an item to a shopping list.
#[utoipa::path(
    post,
    path = "/v1/shoppinglists/{id}/items",
    params(("id" = i64, Path, description = "Shopping list ID")),
    request_body = ItemRequest,
    responses(
        (status = 200, description = "Item created", body = ItemResponse),
        (status = 400, description = "Invalid input"),
        (status = 404, description = "Shopping list not found"),
        (status = 409, description = "Item title already in use"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "items",
    security(("bearer" = []))
)]
pub async fn create_item(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Path(list_id): Path<i64>,
    Json(payload): Json<ItemRequest>,
) -> Result<Json<ItemResponse>> {
    state
        .store
        .get_list(claims.sub, list_id)
        .await?
        .ok_or_else(|| AppError::NotFound(list_id.to_string()))?;

    validate_field("title", &payload.title, 1)?;
    let title = payload.title.to_lowercase();

    if state
        .store
        .get_item_by_title(claims.sub, &title)
        .await?
        .is_some()
    {
        return Err(AppError::Duplicate(format!(
            "Shopping list item {} already exists",
            title
        )));
    }

    let id = state
        .store
        .create_item(claims.sub, list_id, &title, &payload.description)
        .await?;

    let item = state
        .store
        .get_item(claims.sub, list_id, id)
        .await?
        .ok_or_else(|| AppError::Internal("created item not found".to_string()))?;

    Ok(Json(item.into()))
}

/// Fetch a single item.
#[utoipa::path(
    get,
    path = "/v1/shoppinglists/{id}/items/{item_id}",
    params(
        ("id" = i64, Path, description = "Shopping list ID"),
        ("item_id" = i64, Path, description = "Item ID")
    ),
    responses(
        (status = 200, description = "Item", body = ItemResponse),
        (status = 404, description = "Not found"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "items",
    security(("bearer" = []))
)]
pub async fn get_item(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Path((list_id, item_id)): Path<(i64, i64)>,
) -> Result<Json<ItemResponse>> {
    state
        .store
        .get_list(claims.sub, list_id)
        .await?
        .ok_or_else(|| AppError::NotFound(list_id.to_string()))?;

    let item = state
        .store
        .get_item(claims.sub, list_id, item_id)
        .await?
        .ok_or_else(|| AppError::NotFound(item_id.to_string()))?;

    Ok(Json(item.into()))
}

/// Update an item's title and description.
#[utoipa::path(
    put,
    path = "/v1/shoppinglists/{id}/items/{item_id}",
    params(
        ("id" = i64, Path, description = "Shopping list ID"),
        ("item_id" = i64, Path, description = "Item ID")
    ),
    request_body = ItemRequest,
    responses(
        (status = 200, description = "Item updated", body = ItemResponse),
        (status = 404, description = "Not found"),
        (status = 409, description = "Item title already in use"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "items",
    security(("bearer" = []))
)]
pub async fn update_item(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Path((list_id, item_id)): Path<(i64, i64)>,
    Json(payload): Json<ItemRequest>,
) -> Result<Json<ItemResponse>> {
    state
        .store
        .get_list(claims.sub, list_id)
        .await?
        .ok_or_else(|| AppError::NotFound(list_id.to_string()))?;

    state
        .store
        .get_item(claims.sub, list_id, item_id)
        .await?
        .ok_or_else(|| AppError::NotFound(item_id.to_string()))?;

    validate_field("title", &payload.title, 1)?;
    let title = payload.title.to_lowercase();

    if let Some(existing) = state.store.get_item_by_title(claims.sub, &title).await? {
        if existing.id != item_id {
            return Err(AppError::Duplicate(format!(
                "Shopping list item {} already exists",
                title
            )));
        }
    }

    state
        .store
        .update_item(claims.sub, list_id, item_id, &title, &payload.description)
        .await?;

    let item = state
        .store
        .get_item(claims.sub, list_id, item_id)
        .await?
        .ok_or_else(|| AppError::NotFound(item_id.to_string()))?;

    Ok(Json(item.into()))
}

/// Delete an item.
#[utoipa::path(
    delete,
    path = "/v1/shoppinglists/{id}/items/{item_id}",
    params(
        ("id" = i64, Path, description = "Shopping list ID"),
        ("item_id" = i64, Path, description = "Item ID")
    ),
    responses(
        (status = 200, description = "Item deleted"),
        (status = 404, description = "Not found"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "items",
    security(("bearer" = []))
)]
pub async fn delete_item(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Path((list_id, item_id)): Path<(i64, i64)>,
) -> Result<Json<serde_json::Value>> {
    state
        .store
        .get_list(claims.sub, list_id)
        .await?
        .ok_or_else(|| AppError::NotFound(list_id.to_string()))?;

    let item = state
        .store
        .get_item(claims.sub, list_id, item_id)
        .await?
        .ok_or_else(|| AppError::NotFound(item_id.to_string()))?;

    state.store.delete_item(claims.sub, list_id, item_id).await?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "message": format!("Shopping list item '{}' deleted successfully", item.title)
    })))
}

/// Search one list's items by title substring.
#[utoipa::path(
    get,
    path = "/v1/search/{id}",
    params(("id" = i64, Path, description = "Shopping list ID")),
    responses(
        (status = 200, description = "Matching items", body = Vec<ItemResponse>),
        (status = 400, description = "Missing search keyword"),
        (status = 404, description = "Shopping list not found"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "search",
    security(("bearer" = []))
)]
pub async fn search_items(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Path(list_id): Path<i64>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<ItemResponse>>> {
    state
        .store
        .get_list(claims.sub, list_id)
        .await?
        .ok_or_else(|| AppError::NotFound(list_id.to_string()))?;

    let q = query
        .q
        .as_deref()
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .ok_or_else(|| AppError::Validation("Please provide a search keyword".to_string()))?;

    let items = state.store.search_items(claims.sub, list_id, q).await?;

    Ok(Json(items.into_iter().map(ItemResponse::from).collect()))
}
