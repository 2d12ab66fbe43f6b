//! HTTP Handlers

use axum::Json;
use axum::extract::{Extension, Path, State};
use axum::http::{HeaderMap, StatusCode};
use std::sync::Arc;

use platform::bearer::extract_bearer;

use crate::application::config::AuthConfig;
use crate::application::{
    CheckSessionUseCase, CreateUserInput, SignInInput, SignInUseCase, SignOutUseCase, SignUpInput,
    SignUpUseCase, UpdateUserInput, UserAdminUseCase,
};
use crate::domain::repository::{SessionRegistry, UserRepository};
use crate::domain::value_object::UserRole;
use crate::error::{AuthError, AuthResult};
use crate::presentation::dto::{
    CreateUserRequest, LoginRequest, LoginResponse, MessageResponse, RegisterRequest,
    RegisterResponse, UpdateUserRequest, UserListEntry, UserResponse, ValidateResponse,
};
use crate::presentation::middleware::CurrentUser;

/// Shared state for auth handlers
#[derive(Clone)]
pub struct AuthAppState<U, S>
where
    U: UserRepository + Clone + Send + Sync + 'static,
    S: SessionRegistry + Clone + Send + Sync + 'static,
{
    pub users: Arc<U>,
    pub sessions: Arc<S>,
    pub config: Arc<AuthConfig>,
}

// ============================================================================
// Login
// ============================================================================

/// POST /api/login
pub async fn login<U, S>(
    State(state): State<AuthAppState<U, S>>,
    Json(req): Json<LoginRequest>,
) -> AuthResult<Json<LoginResponse>>
where
    U: UserRepository + Clone + Send + Sync + 'static,
    S: SessionRegistry + Clone + Send + Sync + 'static,
{
    let use_case = SignInUseCase::new(
        state.users.clone(),
        state.sessions.clone(),
        state.config.clone(),
    );

    let output = use_case
        .execute(SignInInput {
            username: req.username,
            password: req.password,
            remember: req.remember,
        })
        .await?;

    Ok(Json(LoginResponse {
        token: output.token,
        role: output.role.code().to_string(),
        expires_at: output.expires_at_ms,
    }))
}

// ============================================================================
// Register
// ============================================================================

/// POST /api/register
pub async fn register<U, S>(
    State(state): State<AuthAppState<U, S>>,
    Json(req): Json<RegisterRequest>,
) -> AuthResult<(StatusCode, Json<RegisterResponse>)>
where
    U: UserRepository + Clone + Send + Sync + 'static,
    S: SessionRegistry + Clone + Send + Sync + 'static,
{
    let use_case = SignUpUseCase::new(state.users.clone(), state.config.clone());

    let output = use_case
        .execute(SignUpInput {
            username: req.username,
            password: req.password,
            request_admin: req.request_admin,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            username: output.username,
            role: output.role.code().to_string(),
            request_admin: output.request_admin,
        }),
    ))
}

// ============================================================================
// Logout
// ============================================================================

/// POST /api/logout
pub async fn logout<U, S>(
    State(state): State<AuthAppState<U, S>>,
    headers: HeaderMap,
) -> AuthResult<StatusCode>
where
    U: UserRepository + Clone + Send + Sync + 'static,
    S: SessionRegistry + Clone + Send + Sync + 'static,
{
    let token = extract_bearer(&headers).ok_or(AuthError::Unauthorized)?;

    let use_case = SignOutUseCase::new(state.sessions.clone(), state.config.clone());
    use_case.execute(&token).await?;

    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Validate
// ============================================================================

/// GET /api/validate
pub async fn validate<U, S>(
    State(state): State<AuthAppState<U, S>>,
    headers: HeaderMap,
) -> AuthResult<Json<ValidateResponse>>
where
    U: UserRepository + Clone + Send + Sync + 'static,
    S: SessionRegistry + Clone + Send + Sync + 'static,
{
    let token = extract_bearer(&headers).ok_or(AuthError::Unauthorized)?;

    let use_case = CheckSessionUseCase::new(state.sessions.clone(), state.config.clone());
    let session = use_case.execute(&token).await?;

    Ok(Json(ValidateResponse {
        username: session.username.as_str().to_string(),
        role: session.role.code().to_string(),
        expires_at: session.expires_at_ms,
    }))
}

// ============================================================================
// User management (admin-gated by the router's role guard)
// ============================================================================

/// GET /api/users
pub async fn list_users<U, S>(
    State(state): State<AuthAppState<U, S>>,
) -> AuthResult<Json<Vec<UserListEntry>>>
where
    U: UserRepository + Clone + Send + Sync + 'static,
    S: SessionRegistry + Clone + Send + Sync + 'static,
{
    let use_case = UserAdminUseCase::new(state.users.clone(), state.config.clone());
    let users = use_case.list().await?;

    Ok(Json(users.into_iter().map(UserListEntry::from).collect()))
}

/// POST /api/users
pub async fn create_user<U, S>(
    State(state): State<AuthAppState<U, S>>,
    Extension(current): Extension<CurrentUser>,
    Json(req): Json<CreateUserRequest>,
) -> AuthResult<(StatusCode, Json<UserResponse>)>
where
    U: UserRepository + Clone + Send + Sync + 'static,
    S: SessionRegistry + Clone + Send + Sync + 'static,
{
    let role = parse_role(&req.role)?;

    let use_case = UserAdminUseCase::new(state.users.clone(), state.config.clone());
    let user = use_case
        .create(
            &current.username,
            CreateUserInput {
                username: req.username,
                password: req.password,
                role,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(UserResponse::from(&user))))
}

/// PUT /api/users/{username}
pub async fn update_user<U, S>(
    State(state): State<AuthAppState<U, S>>,
    Extension(current): Extension<CurrentUser>,
    Path(username): Path<String>,
    Json(req): Json<UpdateUserRequest>,
) -> AuthResult<Json<UserResponse>>
where
    U: UserRepository + Clone + Send + Sync + 'static,
    S: SessionRegistry + Clone + Send + Sync + 'static,
{
    let role = req.role.as_deref().map(parse_role).transpose()?;

    let use_case = UserAdminUseCase::new(state.users.clone(), state.config.clone());
    let user = use_case
        .update(
            &current.username,
            &username,
            UpdateUserInput {
                password: req.password,
                role,
            },
        )
        .await?;

    Ok(Json(UserResponse::from(&user)))
}

/// DELETE /api/users/{username}
pub async fn delete_user<U, S>(
    State(state): State<AuthAppState<U, S>>,
    Extension(current): Extension<CurrentUser>,
    Path(username): Path<String>,
) -> AuthResult<Json<MessageResponse>>
where
    U: UserRepository + Clone + Send + Sync + 'static,
    S: SessionRegistry + Clone + Send + Sync + 'static,
{
    let use_case = UserAdminUseCase::new(state.users.clone(), state.config.clone());
    use_case.delete(&current.username, &username).await?;

    Ok(Json(MessageResponse {
        message: format!("User {username} deleted"),
    }))
}

// ============================================================================
// Helper Functions
// ============================================================================

fn parse_role(code: &str) -> AuthResult<UserRole> {
    UserRole::from_code(code)
        .ok_or_else(|| AuthError::InvalidInput(format!("unknown role: {code}")))
}
