use crate::janua::{
    auth::user_profile, handlers::bearer_token, outcome::Outcome, store::UserStore,
    token::TokenSigner,
};
use axum::{
    extract::Extension,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use tracing::{debug, error, instrument};

#[utoipa::path(
    get,
    path= "/users/profile",
    params(
        ("Authorization" = String, Header, description = "Bearer access token")
    ),
    responses (
        (status = 200, description = "User profile", content_type = "application/json"),
        (status = 401, description = "Missing or invalid access token"),
        (status = 404, description = "No record matches the token subject"),
        (status = 500, description = "Internal error"),
    ),
    tag= "users"
)]
// axum handler for the authenticated profile
#[instrument(skip_all)]
pub async fn profile(
    headers: HeaderMap,
    store: Extension<Arc<dyn UserStore>>,
    signer: Extension<Arc<TokenSigner>>,
) -> Response {
    let Some(token) = bearer_token(&headers) else {
        return (StatusCode::UNAUTHORIZED, "Missing bearer token".to_string()).into_response();
    };

    let claims = match signer.verify(token) {
        Ok(claims) => claims,
        Err(err) => {
            debug!("token rejected: {err:?}");

            return (StatusCode::UNAUTHORIZED, "Invalid token".to_string()).into_response();
        }
    };

    match user_profile(&*store.0, &claims).await {
        Ok(outcome) => outcome.into_response(StatusCode::OK),
        Err(err) => {
            error!("Profile lookup failed: {err:?}");

            Outcome::internal().into_response(StatusCode::OK)
        }
    }
}
