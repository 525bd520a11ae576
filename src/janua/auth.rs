//! Registration, login and profile flows. Collaborators (store, hasher,
//! signer) are passed in explicitly so tests can substitute them.

use crate::janua::{
    outcome::{FieldError, Outcome},
    password::PasswordHasher,
    store::{NewUser, StoreError, UserRecord, UserStore},
    token::{Claims, TokenSigner},
};
use anyhow::Result;
use serde_json::{json, Value};
use tracing::debug;

fn username_taken() -> Outcome {
    // Literal messages preserved for compatibility with existing clients
    Outcome::validation(
        "Validation Error",
        vec![FieldError::new("username", "Username is already exists")],
    )
}

fn authentication_failed() -> Outcome {
    // Unknown username and wrong password are indistinguishable on purpose
    Outcome::authentication(
        "Authentication Failed",
        vec![FieldError::new(
            "username",
            "Username or password was incorrect",
        )],
    )
}

fn user_data(user: &UserRecord, access_token: &str) -> Value {
    json!({
        "id": user.id,
        "username": user.username,
        "name": user.name,
        "createdAt": user.created_at,
        "updatedAt": user.updated_at,
        "accessToken": access_token,
    })
}

/// Register a new user and issue an access token.
///
/// The username lookup is advisory; the unique constraint on
/// `users.username` is the source of truth, so a conflicting concurrent
/// insert surfaces as the same validation failure.
pub async fn register_user(
    store: &dyn UserStore,
    hasher: &PasswordHasher,
    signer: &TokenSigner,
    name: &str,
    username: &str,
    password: &str,
) -> Result<Outcome> {
    if store.find_by_username(username).await?.is_some() {
        debug!("username {username} already registered");

        return Ok(username_taken());
    }

    let password_hash = hasher.hash(password).await?;

    let user = match store
        .insert(NewUser {
            name: name.to_string(),
            username: username.to_string(),
            password_hash,
        })
        .await
    {
        Ok(user) => user,
        Err(StoreError::UniqueViolation) => {
            debug!("username {username} lost registration race");

            return Ok(username_taken());
        }
        Err(err) => return Err(err.into()),
    };

    let access_token = signer.sign(&user)?;

    Ok(Outcome::success(
        "Successfully registered.",
        user_data(&user, &access_token),
    ))
}

/// Verify credentials and issue an access token.
pub async fn login_user(
    store: &dyn UserStore,
    hasher: &PasswordHasher,
    signer: &TokenSigner,
    username: &str,
    password: &str,
) -> Result<Outcome> {
    let Some(user) = store.find_by_username(username).await? else {
        return Ok(authentication_failed());
    };

    if !hasher.verify(password, &user.password_hash).await? {
        return Ok(authentication_failed());
    }

    let access_token = signer.sign(&user)?;

    Ok(Outcome::success(
        "Authentication Success",
        user_data(&user, &access_token),
    ))
}

/// Look up the profile for a verified identity claim. The id and password
/// are projected out of the response.
pub async fn user_profile(store: &dyn UserStore, claims: &Claims) -> Result<Outcome> {
    let Some(user) = store.find_by_id(claims.sub).await? else {
        return Ok(Outcome::not_found("User not found"));
    };

    Ok(Outcome::success(
        "User Profile",
        json!({
            "username": user.username,
            "name": user.name,
            "createdAt": user.created_at,
            "updatedAt": user.updated_at,
        }),
    ))
}
