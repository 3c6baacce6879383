//! Web server for secfolio.
//!
//! Renders the site with the current appearance and layout, and exposes the
//! theme and layout mutations plus the contact form as a JSON API.
//!
//! # Endpoints
//!
//! - `GET /health` - Health check
//! - `GET /` - Rendered site using the current layout
//! - `GET /layouts/{id}` - Rendered site using `id`, without persisting it
//! - `GET /theme.css` - Current styling surface as CSS custom properties
//! - `GET /assets/{*path}` - Embedded stylesheet and script
//! - `GET /api/appearance` - Current palette, mode, and resolved colors
//! - `PUT /api/appearance/palette` - Select a palette by name
//! - `PUT /api/appearance/mode` - Select dark or light mode
//! - `POST /api/appearance/mode/toggle` - Flip the mode
//! - `GET /api/palettes` - Palette registry
//! - `GET /api/layout` / `PUT /api/layout` - Current layout
//! - `GET /api/layouts` - Available layouts
//! - `POST /api/contact` - Submit the contact form
//! - `GET /api/contact/status` - Contact form status

pub mod static_files;

use std::collections::BTreeMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::Config;
use crate::contact::{
    ContactError, ContactForm, ContactSubmission, EmailRelay, FormStatus, HttpEmailRelay,
    RelayError,
};
use crate::models::{ColorSet, LayoutVariant, Mode, PaletteName, SiteContent, PALETTES};
use crate::presentation::{self, render_page, Page, Section, COMPOSITIONS};
use crate::storage::DurableStore;
use crate::theme::{AppearanceState, SiteContext};

// ============================================================================
// Application State
// ============================================================================

/// Shared application state for the web server.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration
    config: Arc<Config>,
    /// Page content (immutable after load)
    content: Arc<SiteContent>,
    /// Appearance and layout selections
    context: Arc<RwLock<SiteContext>>,
    /// Contact form status
    form: Arc<Mutex<ContactForm>>,
    /// Email relay used by the contact form
    relay: Arc<dyn EmailRelay>,
}

impl AppState {
    /// Creates the state from configuration, loading content and talking to
    /// the real relay.
    pub fn new(config: Config, store: Arc<dyn DurableStore>) -> anyhow::Result<Self> {
        let content = SiteContent::load(config.paths.content.as_deref())?;
        Ok(Self::with_parts(
            config,
            content,
            store,
            Arc::new(HttpEmailRelay::new()),
        ))
    }

    /// Creates the state from explicit parts. Activates the site context.
    #[must_use]
    pub fn with_parts(
        config: Config,
        content: SiteContent,
        store: Arc<dyn DurableStore>,
        relay: Arc<dyn EmailRelay>,
    ) -> Self {
        let default = AppearanceState::new(
            PaletteName::default(),
            config.appearance.initial_mode.resolve(),
        );
        let mut context = SiteContext::with_default_appearance(store, default);
        context.activate();

        let form = ContactForm::new(config.contact.clone(), content.contact_email.clone());
        if let Some(notice) = form.blocked_notice() {
            warn!("{notice}");
        }

        Self {
            config: Arc::new(config),
            content: Arc::new(content),
            context: Arc::new(RwLock::new(context)),
            form: Arc::new(Mutex::new(form)),
            relay,
        }
    }

    /// Returns the configuration the server was started with.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    fn read_context(&self) -> RwLockReadGuard<'_, SiteContext> {
        self.context.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_context(&self) -> RwLockWriteGuard<'_, SiteContext> {
        self.context.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_form(&self) -> MutexGuard<'_, ContactForm> {
        lock_form(&self.form)
    }
}

fn lock_form(form: &Mutex<ContactForm>) -> MutexGuard<'_, ContactForm> {
    form.lock().unwrap_or_else(PoisonError::into_inner)
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Current health status (e.g., "healthy").
    pub status: String,
    /// Application version.
    pub version: String,
}

/// Current appearance with resolved colors.
#[derive(Debug, Serialize)]
pub struct AppearanceResponse {
    /// Selected palette
    pub palette: PaletteName,
    /// Selected mode
    pub mode: Mode,
    /// Styling slot to hex color
    pub colors: BTreeMap<String, String>,
    /// Styling surface generation
    pub generation: u64,
}

/// Palette selection request.
#[derive(Debug, Deserialize)]
pub struct PaletteRequest {
    /// Palette name (e.g., "ocean")
    pub palette: String,
}

/// Mode selection request.
#[derive(Debug, Deserialize)]
pub struct ModeRequest {
    /// "dark" or "light"
    pub mode: String,
}

/// Palette registry entry.
#[derive(Debug, Serialize)]
pub struct PaletteSummary {
    /// Registry identifier
    pub name: PaletteName,
    /// Human-readable label
    pub display_name: &'static str,
    /// Dark mode colors
    pub dark: ColorSet,
    /// Light mode colors
    pub light: ColorSet,
}

/// Palette list response.
#[derive(Debug, Serialize)]
pub struct PaletteListResponse {
    /// Every registered palette
    pub palettes: Vec<PaletteSummary>,
}

/// Layout selection request.
#[derive(Debug, Deserialize)]
pub struct LayoutRequest {
    /// Layout identifier (e.g., "terminal")
    pub layout: String,
}

/// Current layout.
#[derive(Debug, Serialize)]
pub struct LayoutResponse {
    /// Layout identifier
    pub layout: LayoutVariant,
    /// Human-readable label
    pub display_name: &'static str,
}

/// Layout list entry.
#[derive(Debug, Serialize)]
pub struct LayoutSummary {
    /// Layout identifier
    pub id: LayoutVariant,
    /// Human-readable label
    pub display_name: &'static str,
    /// One-line description
    pub description: &'static str,
    /// Sections in render order
    pub sections: &'static [Section],
}

/// Layout list response.
#[derive(Debug, Serialize)]
pub struct LayoutListResponse {
    /// Every layout in dispatch order
    pub layouts: Vec<LayoutSummary>,
    /// Currently selected layout
    pub current: LayoutVariant,
}

/// Successful contact submission.
#[derive(Debug, Serialize)]
pub struct ContactResponse {
    /// Always "sent"
    pub status: &'static str,
    /// Submission reference
    pub reference: Uuid,
}

/// Contact form status response.
#[derive(Debug, Serialize)]
pub struct ContactStatusResponse {
    /// Whether the relay credentials are set
    pub configured: bool,
    /// Current status
    #[serde(flatten)]
    pub status: FormStatus,
}

/// API error response.
#[derive(Debug, Serialize)]
pub struct ApiError {
    /// Error message.
    pub error: String,
    /// Optional additional details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
        }
    }

    fn with_details(error: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: Some(details.into()),
        }
    }
}

type ApiResult<T> = Result<T, (StatusCode, Json<ApiError>)>;

fn bad_request(error: &str, details: impl ToString) -> (StatusCode, Json<ApiError>) {
    (
        StatusCode::BAD_REQUEST,
        Json(ApiError::with_details(error, details.to_string())),
    )
}

fn appearance_response(context: &SiteContext) -> AppearanceResponse {
    let appearance = context.appearance();
    let snapshot = context.surface_snapshot();
    AppearanceResponse {
        palette: appearance.palette,
        mode: appearance.mode,
        colors: snapshot
            .slots
            .iter()
            .map(|(slot, color)| (slot.clone(), color.to_hex()))
            .collect(),
        generation: snapshot.generation,
    }
}

fn layout_response(variant: LayoutVariant) -> LayoutResponse {
    LayoutResponse {
        layout: variant,
        display_name: presentation::composition(variant).display_name,
    }
}

// ============================================================================
// Page Handlers
// ============================================================================

/// GET /health - Health check endpoint.
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

fn render(state: &AppState, variant: Option<LayoutVariant>) -> ApiResult<Html<String>> {
    let notice = state.lock_form().blocked_notice();
    let context = state.read_context();
    let surface = context.surface_snapshot();
    let variant = variant.unwrap_or_else(|| context.layout());

    render_page(&Page {
        content: &state.content,
        composition: presentation::composition(variant),
        surface: &surface,
        appearance: context.appearance(),
        contact_notice: notice.as_deref(),
    })
    .map(Html)
    .map_err(|e| {
        warn!(layout = %variant, error = %e, "Page render failed");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiError::with_details("Failed to render page", e.to_string())),
        )
    })
}

/// GET / - Renders the site with the current layout.
async fn index(State(state): State<AppState>) -> ApiResult<Html<String>> {
    render(&state, None)
}

/// GET /layouts/{id} - Renders a layout preview without persisting it.
async fn preview_layout(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Html<String>> {
    let variant = id.parse::<LayoutVariant>().map_err(|e| {
        (
            StatusCode::NOT_FOUND,
            Json(ApiError::with_details("Layout not found", e.to_string())),
        )
    })?;
    render(&state, Some(variant))
}

/// GET /theme.css - Current styling surface.
///
/// Carries a strong `ETag` over the CSS text; a matching `If-None-Match`
/// gets 304.
async fn theme_css(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let css = state.read_context().surface_snapshot().to_css();
    let etag = format!("\"{:x}\"", Sha256::digest(css.as_bytes()));

    let unchanged = headers
        .get(header::IF_NONE_MATCH)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == etag);

    if unchanged {
        return (StatusCode::NOT_MODIFIED, [(header::ETAG, etag)]).into_response();
    }

    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/css; charset=utf-8".to_string()),
            (header::CACHE_CONTROL, "no-cache".to_string()),
            (header::ETAG, etag),
        ],
        css,
    )
        .into_response()
}

// ============================================================================
// Appearance Handlers
// ============================================================================

/// GET /api/appearance - Current palette and mode.
async fn get_appearance(State(state): State<AppState>) -> Json<AppearanceResponse> {
    Json(appearance_response(&state.read_context()))
}

/// PUT /api/appearance/palette - Select a palette.
async fn set_palette(
    State(state): State<AppState>,
    Json(request): Json<PaletteRequest>,
) -> ApiResult<Json<AppearanceResponse>> {
    let mut context = state.write_context();
    context
        .set_palette_named(&request.palette)
        .map_err(|e| bad_request("Unknown palette", e))?;
    Ok(Json(appearance_response(&context)))
}

/// PUT /api/appearance/mode - Select a mode.
async fn set_mode(
    State(state): State<AppState>,
    Json(request): Json<ModeRequest>,
) -> ApiResult<Json<AppearanceResponse>> {
    let mode = request
        .mode
        .parse::<Mode>()
        .map_err(|e| bad_request("Unknown mode", e))?;
    let mut context = state.write_context();
    context.set_mode(mode);
    Ok(Json(appearance_response(&context)))
}

/// POST /api/appearance/mode/toggle - Flip between dark and light.
async fn toggle_mode(State(state): State<AppState>) -> Json<AppearanceResponse> {
    let mut context = state.write_context();
    context.toggle_mode();
    Json(appearance_response(&context))
}

/// GET /api/palettes - Palette registry.
async fn list_palettes() -> Json<PaletteListResponse> {
    Json(PaletteListResponse {
        palettes: PALETTES
            .iter()
            .map(|p| PaletteSummary {
                name: p.name,
                display_name: p.display_name,
                dark: p.dark,
                light: p.light,
            })
            .collect(),
    })
}

// ============================================================================
// Layout Handlers
// ============================================================================

/// GET /api/layout - Current layout.
async fn get_layout(State(state): State<AppState>) -> Json<LayoutResponse> {
    Json(layout_response(state.read_context().layout()))
}

/// PUT /api/layout - Select a layout.
async fn set_layout(
    State(state): State<AppState>,
    Json(request): Json<LayoutRequest>,
) -> ApiResult<Json<LayoutResponse>> {
    let mut context = state.write_context();
    context
        .set_layout_named(&request.layout)
        .map_err(|e| bad_request("Unknown layout", e))?;
    Ok(Json(layout_response(context.layout())))
}

/// GET /api/layouts - Dispatch table listing.
async fn list_layouts(State(state): State<AppState>) -> Json<LayoutListResponse> {
    Json(LayoutListResponse {
        layouts: COMPOSITIONS
            .iter()
            .map(|c| LayoutSummary {
                id: c.variant,
                display_name: c.display_name,
                description: c.description,
                sections: c.sections,
            })
            .collect(),
        current: state.read_context().layout(),
    })
}

// ============================================================================
// Contact Handlers
// ============================================================================

/// POST /api/contact - Submit the contact form.
///
/// The relay call and the status update run together on the blocking pool,
/// so the form still records the outcome if the client goes away. The form
/// lock is only held to start and finish the submission.
async fn submit_contact(
    State(state): State<AppState>,
    Json(submission): Json<ContactSubmission>,
) -> ApiResult<Json<ContactResponse>> {
    let pending = {
        let mut form = state.lock_form();
        form.begin(&submission).map_err(|e| match e {
            ContactError::Misconfigured(_) => (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ApiError::with_details(
                    form.blocked_notice().unwrap_or_else(|| e.to_string()),
                    e.to_string(),
                )),
            ),
            ContactError::Invalid(ref invalid) => bad_request("Invalid submission", invalid),
            ContactError::Busy => (StatusCode::CONFLICT, Json(ApiError::new(e.to_string()))),
            ContactError::Relay(ref relay) => (
                StatusCode::BAD_GATEWAY,
                Json(ApiError::new(relay.user_message())),
            ),
        })?
    };

    let reference = pending.message.reference;
    let relay = Arc::clone(&state.relay);
    let form = Arc::clone(&state.form);
    let outcome = tokio::task::spawn_blocking(move || {
        let result = pending.send(relay.as_ref());
        lock_form(&form).finish(reference, result)
    })
    .await
    .unwrap_or_else(|e| {
        state
            .lock_form()
            .finish(reference, Err(RelayError::Transport(e.to_string())))
    });

    match outcome {
        Ok(reference) => Ok(Json(ContactResponse {
            status: "sent",
            reference,
        })),
        Err(ContactError::Relay(e)) => Err((
            StatusCode::BAD_GATEWAY,
            Json(ApiError::new(e.user_message())),
        )),
        Err(e) => Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiError::new(e.to_string())),
        )),
    }
}

/// GET /api/contact/status - Contact form status.
async fn contact_status(State(state): State<AppState>) -> Json<ContactStatusResponse> {
    let mut form = state.lock_form();
    Json(ContactStatusResponse {
        configured: form.config().is_configured(),
        status: form.status(),
    })
}

// ============================================================================
// Router
// ============================================================================

/// Creates the Axum router with all routes configured.
pub fn create_router(state: AppState) -> Router {
    // The server is a local preview; any origin may call the API.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_check))
        // Pages
        .route("/", get(index))
        .route("/layouts/{id}", get(preview_layout))
        .route("/theme.css", get(theme_css))
        .route("/assets/{*path}", get(static_files::serve_asset))
        // Appearance
        .route("/api/appearance", get(get_appearance))
        .route("/api/appearance/palette", put(set_palette))
        .route("/api/appearance/mode", put(set_mode))
        .route("/api/appearance/mode/toggle", post(toggle_mode))
        .route("/api/palettes", get(list_palettes))
        // Layout
        .route("/api/layout", get(get_layout).put(set_layout))
        .route("/api/layouts", get(list_layouts))
        // Contact
        .route("/api/contact", post(submit_contact))
        .route("/api/contact/status", get(contact_status))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Starts the web server.
///
/// # Arguments
///
/// * `state` - Application state
/// * `addr` - Socket address to bind to
pub async fn run_server(state: AppState, addr: SocketAddr) -> anyhow::Result<()> {
    let app = create_router(state);

    info!("Starting secfolio web server on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
