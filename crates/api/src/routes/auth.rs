//! Login page, registration and logout routes.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect},
    Json,
};
use domain::models::{Language, LoginForm, RegistrationForm, User};
use serde::Serialize;

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::LOGIN_PATH;
use crate::routes::run_blocking;

/// Current session as seen by the login page and the shell.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub authenticated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
}

impl SessionResponse {
    fn from_user(user: Option<User>) -> Self {
        Self {
            authenticated: user.is_some(),
            user,
        }
    }
}

/// Login page state.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginPageResponse {
    pub session: SessionResponse,
    pub language: Language,
}

/// Body returned after a successful login or registration.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub user: User,
    pub redirect_to: String,
}

impl AuthResponse {
    fn new(user: User) -> Self {
        Self {
            user,
            redirect_to: "/home".to_string(),
        }
    }
}

/// GET /login
pub async fn login_page(State(state): State<AppState>) -> Result<Json<LoginPageResponse>, ApiError> {
    Ok(Json(LoginPageResponse {
        session: SessionResponse::from_user(state.session.current_user()),
        language: state.preferences.language()?,
    }))
}

/// Log in with email and password.
///
/// POST /login
pub async fn login(
    State(state): State<AppState>,
    Json(form): Json<LoginForm>,
) -> Result<Json<AuthResponse>, ApiError> {
    form.check()?;
    let user = run_blocking(move || Ok(state.session.login(&form.email, &form.password)?)).await?;
    Ok(Json(AuthResponse::new(user)))
}

/// Register a new user and open a session for them.
///
/// POST /login/register
pub async fn register(
    State(state): State<AppState>,
    Json(form): Json<RegistrationForm>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    form.check()?;
    let user = run_blocking(move || {
        Ok(state
            .session
            .register(&form.email, &form.password, &form.name)?)
    })
    .await?;
    Ok((StatusCode::CREATED, Json(AuthResponse::new(user))))
}

/// POST /logout
pub async fn logout(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    run_blocking(move || Ok(state.session.logout()?)).await?;
    Ok(Redirect::to(LOGIN_PATH))
}

/// GET /api/session
pub async fn session_status(State(state): State<AppState>) -> Json<SessionResponse> {
    Json(SessionResponse::from_user(state.session.current_user()))
}
