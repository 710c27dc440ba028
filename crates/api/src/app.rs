use axum::{
    middleware,
    routing::{get, patch, post},
    Router,
};
use persistence::repositories::{CredentialStore, PreferenceRepository};
use persistence::{KeyValueStore, StoreError};
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::Config;
use crate::middleware::{
    metrics_handler, metrics_middleware, require_session, trace_id, unmatched_route,
};
use crate::routes::{auth, devices, health, home, reports, settings};
use crate::services::{ControlPanel, DeviceRegistry, PreferenceService, SessionManager};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub session: Arc<SessionManager>,
    pub devices: Arc<DeviceRegistry>,
    pub preferences: Arc<PreferenceService>,
    pub controls: Arc<ControlPanel>,
}

impl AppState {
    /// Builds every service over the given store. The session is restored
    /// from the store; the device registry starts from its seed.
    pub fn new(config: Config, store: Arc<dyn KeyValueStore>) -> Result<Self, StoreError> {
        let session = SessionManager::new(CredentialStore::new(store.clone()))?;
        let preferences = PreferenceService::new(PreferenceRepository::new(store));

        Ok(Self {
            config: Arc::new(config),
            session: Arc::new(session),
            devices: Arc::new(DeviceRegistry::new()),
            preferences: Arc::new(preferences),
            controls: Arc::new(ControlPanel::new()),
        })
    }
}

fn cors_layer(config: &Config) -> CorsLayer {
    if config.security.cors_origins.is_empty() {
        // Same-origin only
        CorsLayer::new()
    } else {
        let origins: Vec<_> = config
            .security
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    }
}

pub fn create_app(state: AppState) -> Router {
    let config = state.config.clone();

    // Pages behind the login guard
    let guarded_routes = Router::new()
        .route("/", get(home::index))
        .route("/home", get(home::home_page))
        .route(
            "/home/controls",
            get(home::get_controls).put(home::update_controls),
        )
        .route("/home/controls/water", post(home::water_now))
        .route("/home/controls/fan", post(home::apply_fan_settings))
        .route(
            "/devices",
            get(devices::list_devices).post(devices::add_device),
        )
        .route(
            "/devices/:device_id",
            get(devices::get_device).delete(devices::delete_device),
        )
        .route("/devices/:device_id/name", patch(devices::rename_device))
        .route("/devices/:device_id/status", post(devices::toggle_status))
        .route("/devices/:device_id/data", patch(devices::update_data))
        .route("/reports", get(reports::reports_page))
        .route(
            "/settings",
            get(settings::settings_page).put(settings::save_settings),
        )
        .route("/settings/theme", get(settings::get_theme).put(settings::set_theme))
        .route("/settings/theme/toggle", post(settings::toggle_theme))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_session,
        ));

    let public_routes = Router::new()
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/login/register", post(auth::register))
        .route("/logout", post(auth::logout))
        .route(
            "/language",
            get(settings::get_language).put(settings::set_language),
        )
        .route("/api/session", get(auth::session_status))
        .route("/api/health", get(health::health_check))
        .route("/metrics", get(metrics_handler));

    Router::new()
        .merge(public_routes)
        .merge(guarded_routes)
        .fallback(unmatched_route)
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(trace_id))
        .layer(cors_layer(&config))
        .with_state(state)
}
