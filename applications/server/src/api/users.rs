/// Listener account API routes
use crate::{
    error::{Result, ServerError},
    middleware::AuthenticatedUser,
    state::AppState,
};
use axum::{extract::State, http::StatusCode, Json};
use axum_extra::extract::cookie::CookieJar;
use cadence_core::{CreateUser, Role, User};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

#[derive(Debug, Serialize)]
pub struct UserSummary {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub message: String,
    pub user: UserSummary,
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
}

#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    pub access_token: String,
    pub token_type: String,
}

impl RegisterRequest {
    fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() || self.email.trim().is_empty() || self.password.is_empty() {
            return Err(ServerError::BadRequest(
                "Name, email and password are required".to_string(),
            ));
        }
        Ok(())
    }
}

/// Hash the password and store a new account with `role`
pub(crate) async fn create_account(
    app_state: &AppState,
    req: &RegisterRequest,
    role: Role,
) -> Result<User> {
    req.validate()?;

    let password_hash = app_state.auth_service.hash_password(&req.password)?;
    let user = cadence_storage::users::create(
        app_state.db.pool(),
        CreateUser {
            name: req.name.trim().to_string(),
            email: req.email.trim().to_string(),
            password_hash,
            role,
        },
    )
    .await?;

    tracing::info!(user_id = %user.id, role = %user.role, "Account created");
    Ok(user)
}

/// Issue tokens for `user` and attach the session cookie
pub(crate) fn start_session(
    app_state: &AppState,
    jar: CookieJar,
    user: &User,
) -> Result<(CookieJar, LoginResponse)> {
    let access_token = app_state.auth_service.create_access_token(user)?;
    let refresh_token = app_state.auth_service.create_refresh_token(user)?;
    let jar = jar.add(app_state.auth_service.session_cookie(access_token.clone()));

    Ok((
        jar,
        LoginResponse {
            message: "Login successful".to_string(),
            user: UserSummary::from(user),
            access_token,
            refresh_token,
            token_type: "Bearer".to_string(),
        },
    ))
}

/// POST /api/v1/user/register
pub async fn register(
    State(app_state): State<AppState>,
    jar: CookieJar,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, CookieJar, Json<LoginResponse>)> {
    let user = create_account(&app_state, &req, Role::User).await?;
    let (jar, mut response) = start_session(&app_state, jar, &user)?;
    response.message = "User registered and logged in successfully".to_string();

    Ok((StatusCode::CREATED, jar, Json(response)))
}

/// POST /api/v1/user/login
pub async fn login(
    State(app_state): State<AppState>,
    jar: CookieJar,
    Json(req): Json<LoginRequest>,
) -> Result<(CookieJar, Json<LoginResponse>)> {
    let invalid = || ServerError::BadRequest("Invalid credentials".to_string());

    let (user, password_hash) =
        cadence_storage::users::get_credentials_by_email(app_state.db.pool(), req.email.trim())
            .await?
            .ok_or_else(invalid)?;

    if !app_state
        .auth_service
        .verify_password(&req.password, &password_hash)?
    {
        return Err(invalid());
    }

    let (jar, response) = start_session(&app_state, jar, &user)?;
    Ok((jar, Json(response)))
}

/// POST /api/v1/user/refresh
pub async fn refresh(
    State(app_state): State<AppState>,
    jar: CookieJar,
    Json(req): Json<RefreshRequest>,
) -> Result<(CookieJar, Json<RefreshResponse>)> {
    let claims = app_state
        .auth_service
        .verify_refresh_token(&req.refresh_token)?;

    // Re-read the account so a changed role or a deleted user is honoured
    let user = cadence_storage::users::get_by_id(app_state.db.pool(), &claims.user_id())
        .await?
        .ok_or_else(|| ServerError::Auth("Account no longer exists".to_string()))?;

    let access_token = app_state.auth_service.create_access_token(&user)?;
    let jar = jar.add(app_state.auth_service.session_cookie(access_token.clone()));

    Ok((
        jar,
        Json(RefreshResponse {
            access_token,
            token_type: "Bearer".to_string(),
        }),
    ))
}

/// GET /api/v1/user/profile
pub async fn profile(
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
) -> Result<Json<UserSummary>> {
    let user = cadence_storage::users::get_by_id(app_state.db.pool(), auth.user_id())
        .await?
        .ok_or_else(|| ServerError::NotFound("User not found".to_string()))?;

    Ok(Json(UserSummary::from(&user)))
}

/// POST /api/v1/user/logout
pub async fn logout(
    State(app_state): State<AppState>,
    _auth: AuthenticatedUser,
    jar: CookieJar,
) -> (CookieJar, Json<Value>) {
    let jar = jar.remove(app_state.auth_service.removal_cookie());
    (jar, Json(json!({ "message": "Logged out successfully" })))
}
