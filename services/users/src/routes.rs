use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use dto::{CreateUserRequest, UpdateUserRequest, UserDetail};
use serde::Deserialize;

use crate::error::ApiError;
use crate::service::UserService;

#[derive(Clone)]
pub struct AppState {
    users: UserService,
}

impl AppState {
    pub fn new(users: UserService) -> Self {
        Self { users }
    }

    fn users(&self) -> &UserService {
        &self.users
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/v1/users", get(list_users).post(create_user))
        .route(
            "/api/v1/users/:id",
            get(get_user).put(update_user).delete(delete_user),
        )
        .with_state(state)
}

/// Lightweight health probe used by readiness checks.
async fn health() -> &'static str {
    "ok"
}

#[derive(Debug, Deserialize)]
struct DetailParams {
    #[serde(default)]
    detail: bool,
}

async fn create_user(
    State(state): State<AppState>,
    Json(req): Json<CreateUserRequest>,
) -> Result<Json<UserDetail>, ApiError> {
    tracing::info!("HTTP POST /api/v1/users");

    if req.name.trim().is_empty() || req.surname.trim().is_empty() || req.person_id.trim().is_empty()
    {
        return Err(ApiError::InvalidRequest(
            "name, surname and personID must be non-blank",
        ));
    }

    let detail = state.users().create(req).await?;
    Ok(Json(detail))
}

async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(params): Query<DetailParams>,
) -> Result<Response, ApiError> {
    tracing::info!(id, detail = params.detail, "HTTP GET /api/v1/users/:id");

    if params.detail {
        Ok(Json(state.users().get_detail(id).await?).into_response())
    } else {
        Ok(Json(state.users().get(id).await?).into_response())
    }
}

async fn list_users(
    State(state): State<AppState>,
    Query(params): Query<DetailParams>,
) -> Result<Response, ApiError> {
    tracing::info!(detail = params.detail, "HTTP GET /api/v1/users");

    if params.detail {
        Ok(Json(state.users().get_all_detail().await?).into_response())
    } else {
        Ok(Json(state.users().get_all().await?).into_response())
    }
}

async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateUserRequest>,
) -> Result<StatusCode, ApiError> {
    tracing::info!(id, "HTTP PUT /api/v1/users/:id");

    state.users().update(id, req).await?;
    Ok(StatusCode::OK)
}

async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    tracing::info!(id, "HTTP DELETE /api/v1/users/:id");

    state.users().delete(id).await?;
    Ok(StatusCode::OK)
}
