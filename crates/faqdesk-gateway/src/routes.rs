//! Public route handlers: chat, listings, contact.

use axum::{
    Form, Json,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;
use std::sync::Arc;

use crate::pages;
use crate::server::AppState;
use crate::session::Flash;

/// Render a page with the pending flash and consume it.
pub(crate) fn render_with_flash(
    headers: &HeaderMap,
    render: impl FnOnce(Option<&Flash>) -> String,
) -> Response {
    let jar = CookieJar::from_headers(headers);
    let flash = Flash::from_jar(&jar);
    let html = Html(render(flash.as_ref()));
    (Flash::clear(jar), html).into_response()
}

/// Redirect carrying a flash for the next page.
pub(crate) fn redirect_with_flash(to: &str, flash: Flash) -> Response {
    (flash.set(CookieJar::new()), Redirect::to(to)).into_response()
}

/// Health check endpoint.
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "service": "faqdesk",
        "version": env!("CARGO_PKG_VERSION"),
        "uptime_secs": state.start_time.elapsed().as_secs(),
    }))
}

/// Chat UI.
pub async fn index(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Response {
    let admin = state.sessions.is_admin(&headers);
    render_with_flash(&headers, |flash| pages::chat_page(flash, admin))
}

#[derive(Deserialize)]
pub struct ChatForm {
    pub question: String,
}

/// Answer a question. Always 200 with `{"answer": ...}`.
pub async fn chat(
    State(state): State<Arc<AppState>>,
    Form(form): Form<ChatForm>,
) -> Json<serde_json::Value> {
    let answer = state.responder.answer(&form.question).await;
    Json(serde_json::json!({ "answer": answer }))
}

/// Section names and questions, answers withheld.
pub async fn sections(State(state): State<Arc<AppState>>) -> Response {
    match state.store.question_index() {
        Ok(index) => Json(index).into_response(),
        Err(e) => {
            tracing::error!("[sections] {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({"error": "FAQ list is unavailable"})),
            )
                .into_response()
        }
    }
}

/// Public FAQ listing.
pub async fn questions(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Response {
    let admin = state.sessions.is_admin(&headers);
    let sections = state.store.sections().unwrap_or_else(|e| {
        tracing::error!("[questions] {e}");
        Vec::new()
    });
    render_with_flash(&headers, |flash| {
        pages::questions_page(&sections, flash, admin)
    })
}

pub async fn contact_page(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Response {
    let admin = state.sessions.is_admin(&headers);
    render_with_flash(&headers, |flash| pages::contact_page(flash, admin))
}

#[derive(Deserialize)]
pub struct ContactForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub message: String,
}

/// Contact form submission. Nothing is stored or forwarded.
pub async fn contact_submit(Form(form): Form<ContactForm>) -> Response {
    tracing::info!(
        "📨 Contact form from '{}' <{}> ({} chars)",
        form.name,
        form.email,
        form.message.chars().count()
    );
    redirect_with_flash(
        "/contact",
        Flash::success("Thank you for contacting us! We have received your message."),
    )
}
