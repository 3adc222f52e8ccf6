use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use tracing::{info, instrument, warn};

use crate::{
    auth::{
        dto::{
            ChangePasswordRequest, LoginRequest, MessageResponse, ProfilePictureResponse,
            RegisterRequest, TokenResponse, UpdateProfileRequest, UploadProfilePictureRequest,
            UserView,
        },
        jwt::{AuthUser, JwtKeys},
        password::{hash_password, verify_password},
        repo::User,
        services::{avatar_placeholder_url, is_valid_email, MIN_PASSWORD_LEN, MIN_USERNAME_LEN},
    },
    error::ApiError,
    extract::AppJson,
    state::AppState,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
}

pub fn profile_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/profile", get(get_profile).put(update_profile))
        .route("/auth/change-password", put(change_password))
        .route("/auth/upload-profile-picture", post(upload_profile_picture))
}

pub fn user_routes() -> Router<AppState> {
    Router::new().route("/users", get(list_users))
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    AppJson(mut payload): AppJson<RegisterRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    payload.username = payload.username.trim().to_string();
    payload.email = payload.email.trim().to_lowercase();

    if payload.username.len() < MIN_USERNAME_LEN {
        warn!(username = %payload.username, "username too short");
        return Err(ApiError::Validation(
            "Username must be at least 3 characters".into(),
        ));
    }
    if !is_valid_email(&payload.email) {
        warn!(email = %payload.email, "invalid email");
        return Err(ApiError::Validation("Invalid email".into()));
    }
    if payload.password.len() < MIN_PASSWORD_LEN {
        warn!("password too short");
        return Err(ApiError::Validation(
            "Password should be at least 6 characters long".into(),
        ));
    }

    // Pre-checks give the field-specific message; the unique constraints
    // remain the authoritative check if a concurrent insert wins the race.
    if User::email_taken(&state.db, &payload.email, None).await? {
        warn!(email = %payload.email, "email already registered");
        return Err(ApiError::Conflict("Email already registered".into()));
    }
    if User::username_taken(&state.db, &payload.username, None).await? {
        warn!(username = %payload.username, "username already taken");
        return Err(ApiError::Conflict("Username already taken".into()));
    }

    let hash = hash_password(&payload.password)?;
    let user = User::create(&state.db, &payload.username, &payload.email, &hash).await?;

    info!(user_id = %user.id, username = %user.username, "user registered");
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("User created successfully")),
    ))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    AppJson(mut payload): AppJson<LoginRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    payload.email = payload.email.trim().to_lowercase();

    if !is_valid_email(&payload.email) {
        warn!(email = %payload.email, "invalid email");
        return Err(ApiError::Validation("Invalid email".into()));
    }

    // Unknown email and wrong password answer identically; the difference
    // is only visible in the logs.
    let Some(user) = User::find_by_email(&state.db, &payload.email).await? else {
        warn!(email = %payload.email, "login unknown email");
        return Err(ApiError::Unauthorized("Invalid credentials".into()));
    };

    if !verify_password(&payload.password, &user.password_hash)? {
        warn!(user_id = %user.id, "login invalid password");
        return Err(ApiError::Unauthorized("Invalid credentials".into()));
    }

    let keys = JwtKeys::from_ref(&state);
    let token = keys.sign(user.id)?;

    info!(user_id = %user.id, "user logged in");
    Ok(Json(TokenResponse { token }))
}

#[instrument(skip(state))]
pub async fn get_profile(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<UserView>, ApiError> {
    let user = User::find_by_id(&state.db, user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".into()))?;
    Ok(Json(user.into()))
}

#[instrument(skip(state, payload))]
pub async fn update_profile(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    AppJson(payload): AppJson<UpdateProfileRequest>,
) -> Result<Json<UserView>, ApiError> {
    let username = payload
        .username
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty());
    let email = payload
        .email
        .map(|e| e.trim().to_lowercase())
        .filter(|e| !e.is_empty());

    if let Some(username) = username {
        if username.len() < MIN_USERNAME_LEN {
            return Err(ApiError::Validation(
                "Username must be at least 3 characters".into(),
            ));
        }
        // Uniqueness check excludes the caller's own row.
        if User::username_taken(&state.db, username, Some(user_id)).await? {
            warn!(%username, "username already taken");
            return Err(ApiError::Conflict("Username already taken".into()));
        }
    }
    if let Some(email) = &email {
        if !is_valid_email(email) {
            return Err(ApiError::Validation("Invalid email".into()));
        }
        if User::email_taken(&state.db, email, Some(user_id)).await? {
            warn!(%email, "email already registered");
            return Err(ApiError::Conflict("Email already registered".into()));
        }
    }

    let user = User::update_profile(&state.db, user_id, username, email.as_deref())
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".into()))?;

    info!(user_id = %user.id, "profile updated");
    Ok(Json(user.into()))
}

#[instrument(skip(state, payload))]
pub async fn change_password(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    AppJson(payload): AppJson<ChangePasswordRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    if payload.new_password.len() < MIN_PASSWORD_LEN {
        return Err(ApiError::Validation(
            "Password should be at least 6 characters long".into(),
        ));
    }

    let user = User::find_by_id(&state.db, user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".into()))?;

    let ok = verify_password(&payload.current_password, &user.password_hash)?;
    if !ok {
        warn!(user_id = %user.id, "change password with wrong current password");
        return Err(ApiError::Unauthorized("Current password is incorrect".into()));
    }

    let hash = hash_password(&payload.new_password)?;
    if !User::set_password(&state.db, user_id, &hash).await? {
        return Err(ApiError::NotFound("User not found".into()));
    }

    info!(user_id = %user.id, "password changed");
    Ok(Json(MessageResponse::new("Password updated successfully")))
}

#[instrument(skip(state, payload))]
pub async fn upload_profile_picture(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    payload: Option<AppJson<UploadProfilePictureRequest>>,
) -> Result<Json<ProfilePictureResponse>, ApiError> {
    // No real upload pipeline; derive a placeholder avatar from the
    // submitted display name.
    let name = payload
        .and_then(|AppJson(p)| p.username)
        .unwrap_or_else(|| "User".into());
    let url = avatar_placeholder_url(&name);

    if !User::set_profile_picture(&state.db, user_id, &url).await? {
        return Err(ApiError::NotFound("User not found".into()));
    }

    info!(user_id = %user_id, "profile picture updated");
    Ok(Json(ProfilePictureResponse {
        profile_picture: url,
    }))
}

#[instrument(skip(state))]
pub async fn list_users(
    State(state): State<AppState>,
    AuthUser(_user_id): AuthUser,
) -> Result<Json<Vec<UserView>>, ApiError> {
    let users = User::list_all(&state.db).await?;
    Ok(Json(users.into_iter().map(UserView::from).collect()))
}
