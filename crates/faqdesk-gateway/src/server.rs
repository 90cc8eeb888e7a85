//! HTTP server implementation using Axum.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::HeaderValue,
    routing::{get, post},
};
use faqdesk_core::config::FaqDeskConfig;
use faqdesk_core::error::{FaqError, Result};
use faqdesk_core::traits::{FaqRepository, Oracle};
use faqdesk_store::{FaqStore, JsonFileRepository};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::chat::Responder;
use crate::session::SessionKeys;

/// Shared state for the gateway server.
#[derive(Clone)]
pub struct AppState {
    pub store: FaqStore,
    pub responder: Responder,
    pub sessions: SessionKeys,
    /// Plain admin password. Empty disables login.
    pub admin_password: String,
    pub body_limit: usize,
    pub start_time: std::time::Instant,
}

impl AppState {
    /// Wire state from an explicit repository and oracle.
    pub fn new(
        config: &FaqDeskConfig,
        repo: Arc<dyn FaqRepository>,
        oracle: Option<Arc<dyn Oracle>>,
    ) -> Self {
        let store = FaqStore::new(repo);
        let responder = Responder::new(store.clone(), oracle, config);
        Self {
            store,
            responder,
            sessions: SessionKeys::new(
                &config.server.session_secret,
                config.server.session_ttl_hours,
            ),
            admin_password: config.admin.password.clone(),
            body_limit: config.server.body_limit,
            start_time: std::time::Instant::now(),
        }
    }

    /// JSON file store at `server.faq_file` plus the configured oracle.
    pub fn from_config(config: &FaqDeskConfig) -> Result<Self> {
        let repo = Arc::new(JsonFileRepository::new(config.faq_path()));
        let oracle = faqdesk_providers::create_oracle(&config.fallback)?;
        let state = Self::new(config, repo, oracle);

        tracing::info!("📚 FAQ store: {}", state.store.describe());
        match state.store.sections() {
            Ok(sections) => {
                let entries: usize = sections.iter().map(|s| s.entries.len()).sum();
                tracing::info!("📚 Loaded {} sections, {entries} FAQs", sections.len());
            }
            Err(e) => tracing::warn!("⚠️ FAQ store not readable yet: {e}"),
        }
        match &config.fallback {
            f if !f.enabled => tracing::info!("🔮 Fallback oracle disabled"),
            f => tracing::info!("🔮 Fallback oracle: {} (keywords: {:?})", f.provider, f.keywords),
        }
        if state.admin_password.is_empty() {
            tracing::warn!("⚠️ No admin password set (ADMIN_PASSWORD); admin login is disabled");
        }
        if state.sessions.is_ephemeral() {
            tracing::warn!("⚠️ No session secret configured; admin sessions end on restart");
        }
        Ok(state)
    }
}

/// Build the Axum router with all routes.
pub fn build_router(state: AppState) -> Router {
    build_router_from_arc(Arc::new(state))
}

pub fn build_router_from_arc(shared: Arc<AppState>) -> Router {
    // Protected routes: require an admin session
    let protected = Router::new()
        .route("/admin", get(crate::admin::admin_page))
        .route("/admin/add", post(crate::admin::add_faq))
        .route(
            "/admin/delete/{section}/{faq_id}",
            post(crate::admin::delete_faq),
        )
        .route("/admin/edit/{section}/{faq_id}", post(crate::admin::edit_faq))
        .route(
            "/admin/entries/{id}/delete",
            post(crate::admin::delete_entry_by_id),
        )
        .route(
            "/admin/entries/{id}/edit",
            post(crate::admin::edit_entry_by_id),
        )
        .route_layer(axum::middleware::from_fn_with_state(
            shared.clone(),
            crate::admin::require_admin,
        ));

    // Public routes
    let public = Router::new()
        .route("/", get(crate::routes::index))
        .route("/chat", post(crate::routes::chat))
        .route(
            "/login",
            get(crate::admin::login_page).post(crate::admin::login),
        )
        .route("/logout", get(crate::admin::logout))
        .route("/sections", get(crate::routes::sections))
        .route("/questions", get(crate::routes::questions))
        .route(
            "/contact",
            get(crate::routes::contact_page).post(crate::routes::contact_submit),
        )
        .route("/health", get(crate::routes::health_check));

    protected
        .merge(public)
        .layer(axum::middleware::from_fn(security_headers))
        .layer(DefaultBodyLimit::max(shared.body_limit))
        .layer(TraceLayer::new_for_http())
        .with_state(shared)
}

/// Security headers on every response.
async fn security_headers(
    req: axum::http::Request<axum::body::Body>,
    next: axum::middleware::Next,
) -> axum::response::Response {
    let mut response = next.run(req).await;
    let headers = response.headers_mut();
    headers.insert("X-Content-Type-Options", HeaderValue::from_static("nosniff"));
    headers.insert("X-Frame-Options", HeaderValue::from_static("SAMEORIGIN"));
    headers.insert(
        "Referrer-Policy",
        HeaderValue::from_static("strict-origin-when-cross-origin"),
    );
    response
}

/// Serve until Ctrl-C.
pub async fn start(state: AppState, host: &str, port: u16) -> Result<()> {
    let app = build_router(state);
    let addr = format!("{host}:{port}");

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| FaqError::Gateway(format!("Bind error on {addr}: {e}")))?;
    tracing::info!("🌐 FAQ Desk running at http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| FaqError::Gateway(format!("Server error: {e}")))?;

    tracing::info!("👋 FAQ Desk stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
}
