use axum::{
    extract::{Path, State},
    Extension, Json,
};
use serde::Serialize;
use serde_json::Value;
use shelf_core::CatalogItem;

use crate::middleware::RequestId;

use super::{ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Serialize)]
pub(super) struct BooksData {
    books: Vec<CatalogItem>,
    count: usize,
}

/// The whole snapshot, in stored order. Filtering happens on the client.
pub(super) async fn list_books(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Json<ApiResponse<BooksData>> {
    let books = state.books.as_ref().clone();
    tracing::debug!(request_id = %req_id.0, count = books.len(), "listing books");

    Json(ApiResponse {
        data: BooksData {
            count: books.len(),
            books,
        },
        meta: ResponseMeta::new(req_id.0),
    })
}

pub(super) async fn get_book(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<CatalogItem>>, ApiError> {
    let book = state
        .books
        .iter()
        .find(|book| book.identifier().is_some_and(|value| id_matches(value, &id)))
        .cloned()
        .ok_or_else(|| ApiError::new(req_id.0.clone(), "not_found", format!("book {id} not found")))?;

    Ok(Json(ApiResponse {
        data: book,
        meta: ResponseMeta::new(req_id.0),
    }))
}

/// String ids compare as-is; numeric ids by their decimal rendering.
fn id_matches(value: &Value, id: &str) -> bool {
    match value {
        Value::String(s) => s == id,
        Value::Number(n) => n.to_string() == id,
        _ => false,
    }
}
