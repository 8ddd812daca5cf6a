use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    Json,
};
use serde::Serialize;
use service::{StoreError, User, UserInput};
use tracing::{error, info};

use crate::errors::JsonApiError;
use crate::state::ServerState;

#[derive(Debug, Serialize)]
pub struct DeletedUser {
    pub message: String,
    pub user: User,
}

#[utoipa::path(
    get, path = "/users", tag = "users",
    responses(
        (status = 200, description = "All stored users", body = [crate::openapi::UserDoc]),
        (status = 500, description = "Store failure", body = crate::openapi::ErrorBodyDoc)
    )
)]
pub async fn list_users(State(state): State<ServerState>) -> Result<Json<Vec<User>>, JsonApiError> {
    match state.users.list().await {
        Ok(users) => {
            info!(count = users.len(), "listed users");
            Ok(Json(users))
        }
        Err(e) => {
            error!(err = %e, "failed to list users");
            Err(state.internal_error("Failed to list users", &e))
        }
    }
}

/// An undecodable body is handed back the same way as a store rejection.
#[utoipa::path(
    post, path = "/users", tag = "users",
    request_body = crate::openapi::UserInputDoc,
    responses(
        (status = 201, description = "Created", body = crate::openapi::UserDoc),
        (status = 500, description = "Rejected or store failure", body = crate::openapi::ErrorBodyDoc)
    )
)]
pub async fn create_user(
    State(state): State<ServerState>,
    payload: Result<Json<UserInput>, JsonRejection>,
) -> Result<(StatusCode, Json<User>), JsonApiError> {
    let input = match payload {
        Ok(Json(input)) => input,
        Err(rejection) => {
            let e = StoreError::Rejected(rejection.body_text());
            error!(err = %e, "failed to create user");
            return Err(state.internal_error("Failed to create user", &e));
        }
    };

    match state.users.create(input).await {
        Ok(user) => {
            info!(id = %user.id, name = %user.name, "created user");
            Ok((StatusCode::CREATED, Json(user)))
        }
        Err(e) => {
            error!(err = %e, "failed to create user");
            Err(state.internal_error("Failed to create user", &e))
        }
    }
}

#[utoipa::path(
    delete, path = "/users/{id}", tag = "users",
    params(("id" = String, Path, description = "User identifier")),
    responses(
        (status = 200, description = "Deleted", body = crate::openapi::DeletedUserDoc),
        (status = 404, description = "No user with this identifier", body = crate::openapi::ErrorBodyDoc),
        (status = 500, description = "Store failure", body = crate::openapi::ErrorBodyDoc)
    )
)]
pub async fn delete_user(
    State(state): State<ServerState>,
    id: Result<Path<String>, PathRejection>,
) -> Result<Json<DeletedUser>, JsonApiError> {
    // a segment that does not decode to text cannot name a user
    let Ok(Path(id)) = id else {
        info!("undecodable user id for delete");
        return Err(JsonApiError::not_found("User not found"));
    };
    match state.users.delete(&id).await {
        Ok(Some(user)) => {
            info!(id = %user.id, "deleted user");
            Ok(Json(DeletedUser { message: "User deleted successfully".into(), user }))
        }
        Ok(None) => {
            info!(%id, "user not found for delete");
            Err(JsonApiError::not_found("User not found"))
        }
        Err(e) => {
            error!(%id, err = %e, "failed to delete user");
            Err(state.internal_error("Failed to delete user", &e))
        }
    }
}
