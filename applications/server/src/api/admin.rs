/// Admin account API routes
use super::users::{create_account, start_session, LoginRequest, LoginResponse, RegisterRequest, UserSummary};
use crate::{
    error::{Result, ServerError},
    middleware::{AdminUser, MaybeUser},
    state::AppState,
};
use axum::{extract::State, http::StatusCode, Json};
use axum_extra::extract::cookie::CookieJar;
use cadence_core::Role;
use serde::Serialize;
use serde_json::{json, Value};

#[derive(Debug, Serialize)]
pub struct AdminCreatedResponse {
    pub message: String,
    pub admin: UserSummary,
}

/// POST /api/v1/admin/register
///
/// Open while no admin exists; afterwards only admins may add admins.
pub async fn register(
    State(app_state): State<AppState>,
    caller: MaybeUser,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AdminCreatedResponse>)> {
    let admins = cadence_storage::users::count_with_role(app_state.db.pool(), Role::Admin).await?;
    let caller_is_admin = caller.0.as_ref().is_some_and(|user| user.is_admin());

    if admins > 0 && !caller_is_admin {
        return Err(ServerError::Forbidden("Admin access required".to_string()));
    }

    let admin = create_account(&app_state, &req, Role::Admin).await?;

    Ok((
        StatusCode::CREATED,
        Json(AdminCreatedResponse {
            message: "Admin registered".to_string(),
            admin: UserSummary::from(&admin),
        }),
    ))
}

/// POST /api/v1/admin/login
pub async fn login(
    State(app_state): State<AppState>,
    jar: CookieJar,
    Json(req): Json<LoginRequest>,
) -> Result<(CookieJar, Json<LoginResponse>)> {
    let (admin, password_hash) =
        cadence_storage::users::get_credentials_by_email(app_state.db.pool(), req.email.trim())
            .await?
            .filter(|(user, _)| user.is_admin())
            .ok_or_else(|| ServerError::NotFound("Admin not found".to_string()))?;

    if !app_state
        .auth_service
        .verify_password(&req.password, &password_hash)?
    {
        return Err(ServerError::BadRequest("Invalid credentials".to_string()));
    }

    let (jar, response) = start_session(&app_state, jar, &admin)?;
    Ok((jar, Json(response)))
}

/// GET /api/v1/admin/profile
pub async fn profile(
    State(app_state): State<AppState>,
    AdminUser(auth): AdminUser,
) -> Result<Json<UserSummary>> {
    let admin = cadence_storage::users::get_by_id(app_state.db.pool(), auth.user_id())
        .await?
        .ok_or_else(|| ServerError::NotFound("Admin not found".to_string()))?;

    Ok(Json(UserSummary::from(&admin)))
}

/// POST /api/v1/admin/logout
pub async fn logout(
    State(app_state): State<AppState>,
    _admin: AdminUser,
    jar: CookieJar,
) -> (CookieJar, Json<Value>) {
    let jar = jar.remove(app_state.auth_service.removal_cookie());
    (jar, Json(json!({ "message": "Logged out successfully" })))
}
