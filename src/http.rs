//! HTTP transport for boards.
//!
//! Requires the `http` feature. Uses axum for routing; every service call
//! runs on tokio's blocking pool since board locks block the calling thread.
//!
//! ## Routes (under `/api/v1/blackboard`)
//!
//! - `POST /create` - body `{ "name", "ttlSeconds" }`, returns the board.
//! - `PUT /display/:name` - body `{ "data" }`, returns the board.
//! - `PUT /clear/:name` - 204.
//! - `GET /read/:name` - returns the board.
//! - `GET /list` - returns every board.
//! - `DELETE /delete/:name` - 200.
//! - `DELETE /delete/all` - 200.
//!
//! Errors are returned as `{ "message": ..., "details": [...] }` with
//! 400 for validation, 404 for unknown boards, 409 for duplicate names
//! and 500 otherwise.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post, put};
use axum::{Json, Router};
use serde::Serialize;
use tracing::error;

use crate::board::Board;
use crate::clock::Clock;
use crate::error::BoardError;
use crate::service::BoardService;
use crate::store::BoardStore;
use crate::validation::{CreateBoardRequest, DisplayDataRequest, ValidationError, Validator};

pub const BASE_PATH: &str = "/api/v1/blackboard";

/// Shared handler state.
pub struct HttpState<S, C> {
    service: Arc<BoardService<S, C>>,
    validator: Validator,
}

/// Error body sent to clients.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub message: String,
    pub details: Vec<String>,
}

/// Everything a handler can fail with, mapped onto a status and an `ErrorResponse`.
#[derive(Debug)]
pub enum ApiError {
    Validation(ValidationError),
    Board(BoardError),
    Internal(String),
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::Validation(err)
    }
}

impl From<BoardError> for ApiError {
    fn from(err: BoardError) -> Self {
        ApiError::Board(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Validation(ValidationError {
            details: vec![rejection.body_text()],
        })
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message, details) = match self {
            ApiError::Validation(e) => (StatusCode::BAD_REQUEST, "Validation failed", e.details),
            ApiError::Board(e) => {
                let status = StatusCode::from_u16(e.status_code())
                    .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
                let message = match &e {
                    BoardError::NotFound(_) => "Resource not found",
                    BoardError::AlreadyExists(_) => "Blackboard already exists",
                    BoardError::Store(_) => "Internal error",
                };
                (status, message, vec![e.to_string()])
            }
            ApiError::Internal(detail) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal error",
                vec![detail],
            ),
        };

        if status.is_server_error() {
            error!(?details, "request failed");
        }

        let body = ErrorResponse {
            message: message.to_string(),
            details,
        };
        (status, Json(body)).into_response()
    }
}

/// Build an axum `Router` exposing the board operations of `service`.
pub fn router<S, C>(service: Arc<BoardService<S, C>>, validator: Validator) -> Router
where
    S: BoardStore + 'static,
    C: Clock + 'static,
{
    let state = Arc::new(HttpState { service, validator });

    let routes = Router::new()
        .route("/create", post(create_handler::<S, C>))
        .route("/display/:name", put(display_handler::<S, C>))
        .route("/clear/:name", put(clear_handler::<S, C>))
        .route("/read/:name", get(read_handler::<S, C>))
        .route("/list", get(list_handler::<S, C>))
        .route("/delete/all", delete(delete_all_handler::<S, C>))
        .route("/delete/:name", delete(delete_handler::<S, C>))
        .with_state(state);

    Router::new().nest(BASE_PATH, routes)
}

/// Serve the board API over HTTP at the given address (e.g. `"0.0.0.0:8080"`).
pub async fn serve<S, C>(
    service: Arc<BoardService<S, C>>,
    validator: Validator,
    addr: &str,
) -> Result<(), std::io::Error>
where
    S: BoardStore + 'static,
    C: Clock + 'static,
{
    let app = router(service, validator);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await
}

type SharedState<S, C> = State<Arc<HttpState<S, C>>>;

async fn create_handler<S, C>(
    State(state): SharedState<S, C>,
    payload: Result<Json<CreateBoardRequest>, JsonRejection>,
) -> Result<Json<Board>, ApiError>
where
    S: BoardStore + 'static,
    C: Clock + 'static,
{
    let Json(request) = payload?;
    let ttl_seconds = state.validator.create(&request)?;
    let board = blocking(state, move |service| service.create(&request.name, ttl_seconds)).await?;
    Ok(Json(board))
}

async fn display_handler<S, C>(
    State(state): SharedState<S, C>,
    Path(name): Path<String>,
    payload: Result<Json<DisplayDataRequest>, JsonRejection>,
) -> Result<Json<Board>, ApiError>
where
    S: BoardStore + 'static,
    C: Clock + 'static,
{
    let Json(request) = payload?;
    state.validator.display(&request)?;
    let board = blocking(state, move |service| service.refresh(&name, &request.data)).await?;
    Ok(Json(board))
}

async fn clear_handler<S, C>(
    State(state): SharedState<S, C>,
    Path(name): Path<String>,
) -> Result<StatusCode, ApiError>
where
    S: BoardStore + 'static,
    C: Clock + 'static,
{
    blocking(state, move |service| service.clear(&name)).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn read_handler<S, C>(
    State(state): SharedState<S, C>,
    Path(name): Path<String>,
) -> Result<Json<Board>, ApiError>
where
    S: BoardStore + 'static,
    C: Clock + 'static,
{
    let board = blocking(state, move |service| service.read(&name)).await?;
    Ok(Json(board))
}

async fn list_handler<S, C>(State(state): SharedState<S, C>) -> Result<Json<Vec<Board>>, ApiError>
where
    S: BoardStore + 'static,
    C: Clock + 'static,
{
    let boards = blocking(state, |service| service.list_all()).await?;
    Ok(Json(boards))
}

async fn delete_handler<S, C>(
    State(state): SharedState<S, C>,
    Path(name): Path<String>,
) -> Result<StatusCode, ApiError>
where
    S: BoardStore + 'static,
    C: Clock + 'static,
{
    blocking(state, move |service| service.delete(&name)).await?;
    Ok(StatusCode::OK)
}

async fn delete_all_handler<S, C>(State(state): SharedState<S, C>) -> Result<StatusCode, ApiError>
where
    S: BoardStore + 'static,
    C: Clock + 'static,
{
    blocking(state, |service| service.delete_all()).await?;
    Ok(StatusCode::OK)
}

/// Run a service call on the blocking pool.
async fn blocking<S, C, T, F>(state: Arc<HttpState<S, C>>, call: F) -> Result<T, ApiError>
where
    S: BoardStore + 'static,
    C: Clock + 'static,
    T: Send + 'static,
    F: FnOnce(&BoardService<S, C>) -> Result<T, BoardError> + Send + 'static,
{
    let service = Arc::clone(&state.service);
    tokio::task::spawn_blocking(move || call(&service))
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))?
        .map_err(ApiError::from)
}
