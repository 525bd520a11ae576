use crate::janua::{
    auth::login_user, handlers::validate_login, outcome::Outcome, password::PasswordHasher,
    store::UserStore, token::TokenSigner,
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
pub struct LoginRequest {
    username: String,
    password: String,
}

#[utoipa::path(
    post,
    path= "/auth/login",
    request_body = LoginRequest,
    responses (
        (status = 200, description = "Login successful", content_type = "application/json"),
        (status = 422, description = "Invalid input or wrong credentials"),
        (status = 500, description = "Internal error"),
    ),
    tag= "auth"
)]
// axum handler for login
#[instrument(skip_all)]
pub async fn login(
    store: Extension<Arc<dyn UserStore>>,
    hasher: Extension<PasswordHasher>,
    signer: Extension<Arc<TokenSigner>>,
    payload: Option<Json<LoginRequest>>,
) -> Response {
    let user: LoginRequest = match payload {
        Some(Json(payload)) => payload,
        None => return (StatusCode::BAD_REQUEST, "Missing payload".to_string()).into_response(),
    };

    debug!("login attempt for username {}", user.username);

    let errors = validate_login(&user.username, &user.password);
    if !errors.is_empty() {
        return Outcome::validation("Validation Error", errors).into_response(StatusCode::OK);
    }

    match login_user(&*store.0, &hasher.0, &signer.0, &user.username, &user.password).await {
        Ok(outcome) => outcome.into_response(StatusCode::OK),
        Err(err) => {
            error!("Login failed: {err:?}");

            Outcome::internal().into_response(StatusCode::OK)
        }
    }
}
