//! Settings page, theme and language routes.

use axum::{extract::State, Extension, Json};
use domain::models::{Language, PasswordChange, ProfileForm, SettingsView, Theme, User};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::routes::run_blocking;

/// The settings form as submitted: profile fields plus an optional
/// password change.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveSettingsRequest {
    #[serde(flatten)]
    pub profile: ProfileForm,
    #[serde(flatten)]
    pub password: PasswordChange,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveSettingsResponse {
    pub user: User,
    pub password_change_requested: bool,
}

#[derive(Debug, Deserialize)]
pub struct LanguageRequest {
    pub language: String,
}

#[derive(Debug, Serialize)]
pub struct LanguageResponse {
    pub language: Language,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ThemeBody {
    pub theme: Theme,
}

/// GET /settings
pub async fn settings_page(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
) -> Result<Json<SettingsView>, ApiError> {
    Ok(Json(SettingsView {
        profile: ProfileForm::from_user(&user),
        language: state.preferences.language()?,
        theme: state.preferences.theme(),
    }))
}

/// Save the profile and, when confirmed, request a password change.
///
/// PUT /settings
pub async fn save_settings(
    State(state): State<AppState>,
    Json(request): Json<SaveSettingsRequest>,
) -> Result<Json<SaveSettingsResponse>, ApiError> {
    request.profile.validate()?;

    let session = state.session.clone();
    let profile = request.profile;
    let user = run_blocking(move || Ok(session.update_profile(&profile)?))
        .await?
        .ok_or_else(|| ApiError::Conflict("sessionExpired".to_string()))?;
    let password_change_requested = state
        .preferences
        .request_password_change(&request.password);

    Ok(Json(SaveSettingsResponse {
        user,
        password_change_requested,
    }))
}

/// GET /settings/theme
pub async fn get_theme(State(state): State<AppState>) -> Json<ThemeBody> {
    Json(ThemeBody {
        theme: state.preferences.theme(),
    })
}

/// PUT /settings/theme
pub async fn set_theme(
    State(state): State<AppState>,
    Json(body): Json<ThemeBody>,
) -> Json<ThemeBody> {
    Json(ThemeBody {
        theme: state.preferences.set_theme(body.theme),
    })
}

/// POST /settings/theme/toggle
pub async fn toggle_theme(State(state): State<AppState>) -> Json<ThemeBody> {
    Json(ThemeBody {
        theme: state.preferences.toggle_theme(),
    })
}

/// GET /language
pub async fn get_language(State(state): State<AppState>) -> Result<Json<LanguageResponse>, ApiError> {
    Ok(Json(LanguageResponse {
        language: state.preferences.language()?,
    }))
}

/// PUT /language
pub async fn set_language(
    State(state): State<AppState>,
    Json(request): Json<LanguageRequest>,
) -> Result<Json<LanguageResponse>, ApiError> {
    let language = Language::from_str(&request.language)
        .map_err(|_| ApiError::Validation("unsupportedLanguage".to_string()))?;
    let language = run_blocking(move || Ok(state.preferences.set_language(language)?)).await?;
    Ok(Json(LanguageResponse { language }))
}
