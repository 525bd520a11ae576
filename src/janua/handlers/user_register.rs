use crate::janua::{
    auth::register_user, handlers::validate_registration, outcome::Outcome,
    password::PasswordHasher, store::UserStore, token::TokenSigner,
};
use axum::{
    extract::Extension,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, error, instrument};
use utoipa::ToSchema;

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct RegisterRequest {
    name: String,
    username: String,
    password: String,
}

#[utoipa::path(
    post,
    path= "/auth/register",
    request_body = RegisterRequest,
    responses (
        (status = 201, description = "Registration successful", content_type = "application/json"),
        (status = 422, description = "Invalid input or username already exists"),
        (status = 500, description = "Internal error"),
    ),
    tag= "auth"
)]
// axum handler for registration
#[instrument(skip_all)]
pub async fn register(
    store: Extension<Arc<dyn UserStore>>,
    hasher: Extension<PasswordHasher>,
    signer: Extension<Arc<TokenSigner>>,
    payload: Option<Json<RegisterRequest>>,
) -> Response {
    let user: RegisterRequest = match payload {
        Some(Json(payload)) => payload,
        None => return (StatusCode::BAD_REQUEST, "Missing payload".to_string()).into_response(),
    };

    debug!("registration attempt for username {}", user.username);

    let errors = validate_registration(&user.name, &user.username, &user.password);
    if !errors.is_empty() {
        return Outcome::validation("Validation Error", errors)
            .into_response(StatusCode::CREATED);
    }

    match register_user(
        &*store.0,
        &hasher.0,
        &signer.0,
        &user.name,
        &user.username,
        &user.password,
    )
    .await
    {
        Ok(outcome) => outcome.into_response(StatusCode::CREATED),
        Err(err) => {
            error!("Registration failed: {err:?}");

            Outcome::internal().into_response(StatusCode::CREATED)
        }
    }
}
