//! Cheat Sheet HTTP Routes
//!
//! CRUD endpoints over the document store. Bodies are taken as raw bytes and
//! parsed here so that empty or invalid JSON maps onto 400 responses.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{error, warn};

use crate::document_store::{CheatSheetStore, Content, Document, StoreError};

pub const MSG_NOT_FOUND: &str = "Cheat sheet not found.";
pub const MSG_INVALID_DATA: &str = "Invalid data.";
pub const MSG_NAME_REQUIRED: &str = "Cheat sheet name is required.";

// ==================
// Shared State
// ==================

/// Cheat sheet state shared across handlers
pub struct CheatSheetState {
    pub store: CheatSheetStore,
}

impl CheatSheetState {
    pub fn new(store: CheatSheetStore) -> Self {
        Self { store }
    }
}

// ==================
// Request/Response Types
// ==================

#[derive(Debug, Serialize)]
pub struct CheatSheetListResponse {
    pub cheatsheets: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct CheatSheetResponse {
    pub name: String,
    pub columns: Value,
    pub categories: Value,
    pub data: Value,
}

impl From<Document> for CheatSheetResponse {
    fn from(doc: Document) -> Self {
        Self {
            columns: doc.columns(),
            categories: doc.categories(),
            name: doc.name,
            data: Value::Object(doc.content),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

type ApiError = (StatusCode, Json<ErrorResponse>);
type ApiResult<T> = Result<T, ApiError>;

// ==================
// Cheat Sheet Routes
// ==================

/// Create cheat sheet routes
pub fn cheatsheet_routes(state: Arc<CheatSheetState>) -> Router {
    Router::new()
        .route("/cheatsheets", get(list_handler))
        .route("/cheatsheets/", post(create_handler))
        .route(
            "/cheatsheets/:name",
            get(get_handler)
                .post(save_handler)
                .put(update_handler)
                .delete(delete_handler),
        )
        .with_state(state)
}

// ==================
// Helper Functions
// ==================

fn error_response(status: StatusCode, message: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
            code: status.as_u16(),
        }),
    )
}

fn bad_request(message: &str) -> ApiError {
    error_response(StatusCode::BAD_REQUEST, message)
}

fn message(text: &str) -> Json<MessageResponse> {
    Json(MessageResponse {
        message: text.to_string(),
    })
}

fn store_error(err: StoreError) -> ApiError {
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    match err {
        StoreError::NotFound(_) => error_response(status, MSG_NOT_FOUND),
        StoreError::InvalidName(_) => {
            warn!(error = %err, "rejected cheat sheet name");
            error_response(status, err.to_string())
        }
        StoreError::Malformed { .. } | StoreError::IoError(_) => {
            error!(error = %err, "cheat sheet storage failure");
            error_response(status, "Internal server error.")
        }
    }
}

/// Parse a request body. `None` means the body was empty.
fn parse_body(body: &Bytes) -> ApiResult<Option<Value>> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }
    serde_json::from_slice(body)
        .map(Some)
        .map_err(|_| bad_request(MSG_INVALID_DATA))
}

/// Content from a `data` field; absent or null means an empty mapping
fn data_field(value: Option<Value>) -> ApiResult<Content> {
    match value {
        None | Some(Value::Null) => Ok(Map::new()),
        Some(Value::Object(map)) => Ok(map),
        Some(_) => Err(bad_request(MSG_INVALID_DATA)),
    }
}

// ==================
// Handlers
// ==================

async fn list_handler(
    State(state): State<Arc<CheatSheetState>>,
) -> ApiResult<Json<CheatSheetListResponse>> {
    let cheatsheets = state.store.list_all().map_err(store_error)?;
    Ok(Json(CheatSheetListResponse { cheatsheets }))
}

async fn get_handler(
    State(state): State<Arc<CheatSheetState>>,
    Path(name): Path<String>,
) -> ApiResult<Json<CheatSheetResponse>> {
    let document = state.store.load(&name).map_err(store_error)?;
    Ok(Json(CheatSheetResponse::from(document)))
}

/// Full replace using the whole body as content
async fn save_handler(
    State(state): State<Arc<CheatSheetState>>,
    Path(name): Path<String>,
    body: Bytes,
) -> ApiResult<(StatusCode, Json<MessageResponse>)> {
    let content = match parse_body(&body)? {
        Some(Value::Object(map)) if !map.is_empty() => map,
        _ => return Err(bad_request(MSG_INVALID_DATA)),
    };

    state.store.save(&name, content).map_err(store_error)?;
    Ok((
        StatusCode::CREATED,
        message("Cheat sheet saved successfully."),
    ))
}

/// Create with the name taken from the body
async fn create_handler(
    State(state): State<Arc<CheatSheetState>>,
    body: Bytes,
) -> ApiResult<(StatusCode, Json<MessageResponse>)> {
    let mut request = match parse_body(&body)? {
        Some(Value::Object(map)) => map,
        _ => return Err(bad_request(MSG_NAME_REQUIRED)),
    };

    let name = match request.get("name") {
        Some(Value::String(name)) if !name.is_empty() => name.clone(),
        _ => return Err(bad_request(MSG_NAME_REQUIRED)),
    };
    let content = data_field(request.remove("data"))?;

    state.store.save(&name, content).map_err(store_error)?;
    Ok((
        StatusCode::CREATED,
        message("Cheat sheet created successfully."),
    ))
}

/// Upsert with content from the body's `data` field
async fn update_handler(
    State(state): State<Arc<CheatSheetState>>,
    Path(name): Path<String>,
    body: Bytes,
) -> ApiResult<Json<MessageResponse>> {
    let content = match parse_body(&body)? {
        None => Map::new(),
        Some(Value::Object(mut request)) => data_field(request.remove("data"))?,
        Some(_) => return Err(bad_request(MSG_INVALID_DATA)),
    };

    state.store.save(&name, content).map_err(store_error)?;
    Ok(message("Cheat sheet updated successfully."))
}

async fn delete_handler(
    State(state): State<Arc<CheatSheetState>>,
    Path(name): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    state.store.delete(&name).map_err(store_error)?;
    Ok(message("Cheat sheet deleted successfully."))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_body_empty_is_none() {
        assert!(parse_body(&Bytes::from_static(b"")).unwrap().is_none());
        assert!(parse_body(&Bytes::from_static(b"  \n")).unwrap().is_none());
    }

    #[test]
    fn test_parse_body_invalid_is_bad_request() {
        let (status, Json(body)) = parse_body(&Bytes::from_static(b"{not json")).unwrap_err();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.error, MSG_INVALID_DATA);
        assert_eq!(body.code, 400);
    }

    #[test]
    fn test_data_field() {
        assert!(data_field(None).unwrap().is_empty());
        assert!(data_field(Some(Value::Null)).unwrap().is_empty());
        assert_eq!(
            data_field(Some(json!({"columns": 2}))).unwrap().get("columns"),
            Some(&json!(2))
        );
        assert!(data_field(Some(json!([1, 2]))).is_err());
    }

    #[test]
    fn test_store_error_mapping() {
        let (status, Json(body)) = store_error(StoreError::NotFound("git".into()));
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body.error, MSG_NOT_FOUND);

        let (status, _) = store_error(StoreError::InvalidName("a/b".into()));
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, Json(body)) = store_error(StoreError::IoError("denied".into()));
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!body.error.contains("denied"));
    }

    #[test]
    fn test_response_defaults_from_document() {
        let response = CheatSheetResponse::from(Document::new("empty", Map::new()));
        assert_eq!(response.name, "empty");
        assert_eq!(response.columns, json!(1));
        assert_eq!(response.categories, json!([]));
        assert_eq!(response.data, json!({}));
    }
}
