//! Admin login and FAQ curation handlers.

use axum::{
    Form,
    extract::{Path, State, rejection::PathRejection},
    http::HeaderMap,
    response::{Html, IntoResponse, Redirect, Response},
};
use faqdesk_core::error::{FaqError, Result};
use serde::Deserialize;
use sha2::{Digest, Sha256};
use std::sync::Arc;

use crate::pages;
use crate::routes::{redirect_with_flash, render_with_flash};
use crate::server::AppState;
use crate::session::{Flash, SessionKeys};

const WRITE_FAILED: &str = "Could not save the FAQ list. Please try again.";

/// Admin session middleware: anything else goes to the login page.
pub async fn require_admin(
    State(state): State<Arc<AppState>>,
    req: axum::http::Request<axum::body::Body>,
    next: axum::middleware::Next,
) -> Response {
    if state.sessions.is_admin(req.headers()) {
        return next.run(req).await;
    }
    tracing::debug!("admin request without session: {}", req.uri());
    Redirect::to("/login").into_response()
}

/// Compare digests so the check does not short-circuit on the first
/// differing byte. An unset password never matches.
fn check_password(expected: &str, given: &str) -> Result<()> {
    if expected.is_empty() {
        return Err(FaqError::Auth("admin login is disabled".into()));
    }
    if Sha256::digest(expected.as_bytes()) == Sha256::digest(given.as_bytes()) {
        Ok(())
    } else {
        Err(FaqError::Auth("incorrect password".into()))
    }
}

pub async fn login_page(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Response {
    if state.sessions.is_admin(&headers) {
        return Redirect::to("/admin").into_response();
    }
    render_with_flash(&headers, |flash| pages::login_page(None, flash))
}

#[derive(Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub password: String,
}

pub async fn login(State(state): State<Arc<AppState>>, Form(form): Form<LoginForm>) -> Response {
    match check_password(&state.admin_password, &form.password) {
        Ok(()) => {
            tracing::info!("🔐 Admin logged in");
            (state.sessions.login(), Redirect::to("/admin")).into_response()
        }
        Err(e) => {
            tracing::warn!("🔐 Admin login rejected: {e}");
            Html(pages::login_page(Some("Incorrect password. Try again."), None)).into_response()
        }
    }
}

pub async fn logout(headers: HeaderMap) -> Response {
    tracing::info!("🔐 Admin logged out");
    (SessionKeys::logout(&headers), Redirect::to("/")).into_response()
}

pub async fn admin_page(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Response {
    match state.store.sections() {
        Ok(sections) => render_with_flash(&headers, |flash| pages::admin_page(&sections, flash)),
        Err(e) => {
            tracing::error!("[admin] {e}");
            let flash = Flash::error("The FAQ list could not be loaded.");
            Html(pages::admin_page(&[], Some(&flash))).into_response()
        }
    }
}

#[derive(Deserialize)]
pub struct AddForm {
    pub section: String,
    pub question: String,
    pub answer: String,
}

#[derive(Deserialize)]
pub struct EditForm {
    pub question: String,
    pub answer: String,
}

/// Section name and position from an index route. Anything that does not
/// parse goes back to the admin page.
fn index_path(
    context: &str,
    path: std::result::Result<Path<(String, usize)>, PathRejection>,
) -> std::result::Result<(String, usize), Response> {
    path.map(|Path(parts)| parts).map_err(|e| {
        tracing::warn!("[{context}] bad FAQ path: {e}");
        redirect_with_flash("/admin", Flash::error("That FAQ entry does not exist."))
    })
}

/// Back to the admin page, with an error flash if the write failed.
fn after_write<T>(context: &str, result: Result<T>) -> Response {
    match result {
        Ok(_) => Redirect::to("/admin").into_response(),
        Err(e) => {
            tracing::error!("[{context}] {e}");
            redirect_with_flash("/admin", Flash::error(WRITE_FAILED))
        }
    }
}

pub async fn add_faq(State(state): State<Arc<AppState>>, Form(form): Form<AddForm>) -> Response {
    after_write(
        "add",
        state
            .store
            .add_entry(&form.section, &form.question, &form.answer),
    )
}

pub async fn edit_faq(
    State(state): State<Arc<AppState>>,
    path: std::result::Result<Path<(String, usize)>, PathRejection>,
    Form(form): Form<EditForm>,
) -> Response {
    let (section, faq_id) = match index_path("edit", path) {
        Ok(parts) => parts,
        Err(resp) => return resp,
    };
    after_write(
        "edit",
        state
            .store
            .edit_entry(&section, faq_id, &form.question, &form.answer),
    )
}

pub async fn delete_faq(
    State(state): State<Arc<AppState>>,
    path: std::result::Result<Path<(String, usize)>, PathRejection>,
) -> Response {
    let (section, faq_id) = match index_path("delete", path) {
        Ok(parts) => parts,
        Err(resp) => return resp,
    };
    after_write("delete", state.store.delete_entry(&section, faq_id))
}

pub async fn edit_entry_by_id(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Form(form): Form<EditForm>,
) -> Response {
    after_write(
        "edit",
        state
            .store
            .edit_entry_by_id(&id, &form.question, &form.answer),
    )
}

pub async fn delete_entry_by_id(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Response {
    after_write("delete", state.store.delete_entry_by_id(&id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::server::build_router;
    use axum::Router;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use faqdesk_core::config::FaqDeskConfig;
    use faqdesk_core::traits::FaqRepository;
    use faqdesk_core::types::{Entry, Section};
    use faqdesk_store::{JsonFileRepository, MemoryRepository};
    use tower::ServiceExt;

    fn cards() -> Vec<Section> {
        let mut cards = Section::new("Cards");
        cards.entries.push(Entry {
            id: "pan-1".into(),
            question: "how to apply for pan card".into(),
            answer: "Visit the nearest office.".into(),
        });
        cards.entries.push(Entry {
            id: "voter-1".into(),
            question: "how to get a voter card".into(),
            answer: "Apply online.".into(),
        });
        vec![cards]
    }

    fn config(password: &str) -> FaqDeskConfig {
        let mut config = FaqDeskConfig::default();
        config.admin.password = password.into();
        config.server.session_secret = "test-secret".into();
        config.fallback.enabled = false;
        config
    }

    /// Router plus a handle on its repository.
    fn test_app(password: &str) -> (Router, Arc<MemoryRepository>, AppState) {
        let repo = Arc::new(MemoryRepository::new(cards()));
        let state = AppState::new(&config(password), repo.clone(), None);
        (build_router(state.clone()), repo, state)
    }

    fn session_cookie(state: &AppState) -> HeaderMap {
        crate::session::cookie_header(state.sessions.login())
    }

    fn admin_get(state: &AppState, uri: &str) -> Request<Body> {
        let mut req = Request::get(uri).body(Body::empty()).unwrap();
        req.headers_mut().extend(session_cookie(state));
        req
    }

    fn admin_post(state: &AppState, uri: &str, body: &str) -> Request<Body> {
        let mut req = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap();
        req.headers_mut().extend(session_cookie(state));
        req
    }

    fn login_post(password: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/login")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(format!("password={password}")))
            .unwrap()
    }

    async fn body_string(resp: Response) -> String {
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[test]
    fn test_check_password() {
        assert!(check_password("letmein", "letmein").is_ok());
        assert!(matches!(
            check_password("letmein", "nope"),
            Err(FaqError::Auth(_))
        ));
        assert!(check_password("", "").is_err());
    }

    #[tokio::test]
    async fn test_admin_requires_login() {
        let (app, _, _) = test_app("letmein");
        let resp = app
            .oneshot(Request::get("/admin").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert!(resp.status().is_redirection());
        assert_eq!(resp.headers()[header::LOCATION], "/login");
    }

    #[tokio::test]
    async fn test_unauthenticated_write_is_ignored() {
        let (app, repo, _) = test_app("letmein");
        let resp = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/admin/delete/Cards/0")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.headers()[header::LOCATION], "/login");
        assert_eq!(repo.load().unwrap(), cards());
    }

    #[tokio::test]
    async fn test_login_success_sets_session() {
        let (app, _, state) = test_app("letmein");
        let resp = app.oneshot(login_post("letmein")).await.unwrap();
        assert!(resp.status().is_redirection());
        assert_eq!(resp.headers()[header::LOCATION], "/admin");
        assert!(state.sessions.is_admin(&crate::session::cookie_header(resp)));
    }

    #[tokio::test]
    async fn test_login_failure_rerenders() {
        let (app, _, _) = test_app("letmein");
        let resp = app.oneshot(login_post("wrong")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert!(resp.headers().get(header::SET_COOKIE).is_none());
        assert!(body_string(resp).await.contains("Incorrect password. Try again."));
    }

    #[tokio::test]
    async fn test_login_disabled_without_password() {
        let (app, _, _) = test_app("");
        let resp = app.oneshot(login_post("")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert!(resp.headers().get(header::SET_COOKIE).is_none());
    }

    #[tokio::test]
    async fn test_logout_clears_session() {
        let (app, _, state) = test_app("letmein");
        let resp = app.oneshot(admin_get(&state, "/logout")).await.unwrap();
        assert_eq!(resp.headers()[header::LOCATION], "/");
        let cookie = resp.headers()[header::SET_COOKIE].to_str().unwrap();
        assert!(cookie.starts_with("faqdesk_session=;"));
        assert!(cookie.contains("Max-Age=0"));
    }

    #[tokio::test]
    async fn test_admin_page_lists_entries() {
        let (app, _, state) = test_app("letmein");
        let resp = app.oneshot(admin_get(&state, "/admin")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let html = body_string(resp).await;
        assert!(html.contains("Visit the nearest office."));
        assert!(html.contains("/admin/entries/pan-1/delete"));
    }

    #[tokio::test]
    async fn test_add_creates_section() {
        let (app, repo, state) = test_app("letmein");
        let resp = app
            .oneshot(admin_post(
                &state,
                "/admin/add",
                "section=Banking&question=open+account&answer=Bring+ID",
            ))
            .await
            .unwrap();
        assert_eq!(resp.headers()[header::LOCATION], "/admin");
        let sections = repo.load().unwrap();
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[1].name, "Banking");
        assert_eq!(sections[1].entries[0].question, "open account");
        assert_eq!(sections[1].entries[0].answer, "Bring ID");
    }

    #[tokio::test]
    async fn test_edit_and_delete_by_index() {
        let (app, repo, state) = test_app("letmein");
        app.clone()
            .oneshot(admin_post(
                &state,
                "/admin/edit/Cards/1",
                "question=voter+id&answer=Visit+the+portal",
            ))
            .await
            .unwrap();
        let sections = repo.load().unwrap();
        assert_eq!(sections[0].entries[1].id, "voter-1");
        assert_eq!(sections[0].entries[1].answer, "Visit the portal");

        app.oneshot(admin_post(&state, "/admin/delete/Cards/0", ""))
            .await
            .unwrap();
        let sections = repo.load().unwrap();
        assert_eq!(sections[0].entries.len(), 1);
        assert_eq!(sections[0].entries[0].id, "voter-1");
    }

    #[tokio::test]
    async fn test_out_of_range_index_is_noop() {
        let (app, repo, state) = test_app("letmein");
        let resp = app
            .clone()
            .oneshot(admin_post(&state, "/admin/delete/Cards/7", ""))
            .await
            .unwrap();
        assert_eq!(resp.headers()[header::LOCATION], "/admin");
        app.oneshot(admin_post(
            &state,
            "/admin/edit/Nowhere/0",
            "question=x&answer=y",
        ))
        .await
        .unwrap();
        assert_eq!(repo.load().unwrap(), cards());
    }

    #[tokio::test]
    async fn test_edit_and_delete_by_id() {
        let (app, repo, state) = test_app("letmein");
        app.clone()
            .oneshot(admin_post(
                &state,
                "/admin/entries/pan-1/edit",
                "question=pan+card&answer=Apply+online",
            ))
            .await
            .unwrap();
        assert_eq!(repo.load().unwrap()[0].entries[0].answer, "Apply online");

        app.clone()
            .oneshot(admin_post(&state, "/admin/entries/voter-1/delete", ""))
            .await
            .unwrap();
        app.oneshot(admin_post(&state, "/admin/entries/missing/delete", ""))
            .await
            .unwrap();
        let sections = repo.load().unwrap();
        assert_eq!(sections[0].entries.len(), 1);
        assert_eq!(sections[0].entries[0].id, "pan-1");
    }

    #[tokio::test]
    async fn test_write_failure_flashes_error() {
        struct ReadOnly;
        impl FaqRepository for ReadOnly {
            fn describe(&self) -> String {
                "read-only".into()
            }
            fn load(&self) -> Result<Vec<Section>> {
                Ok(cards())
            }
            fn save(&self, _: &[Section]) -> Result<()> {
                Err(FaqError::Storage("disk full".into()))
            }
        }
        let state = AppState::new(&config("letmein"), Arc::new(ReadOnly), None);
        let app = build_router(state.clone());
        let resp = app
            .oneshot(admin_post(
                &state,
                "/admin/add",
                "section=Cards&question=q&answer=a",
            ))
            .await
            .unwrap();
        assert_eq!(resp.headers()[header::LOCATION], "/admin");
        let cookie = resp.headers()[header::SET_COOKIE].to_str().unwrap();
        assert!(cookie.starts_with("faqdesk_flash=error."));
    }

    #[tokio::test]
    async fn test_non_numeric_index_redirects_to_admin() {
        let (app, repo, state) = test_app("letmein");
        let resp = app
            .clone()
            .oneshot(admin_post(&state, "/admin/delete/Cards/abc", ""))
            .await
            .unwrap();
        assert!(resp.status().is_redirection());
        assert_eq!(resp.headers()[header::LOCATION], "/admin");
        let cookie = resp.headers()[header::SET_COOKIE].to_str().unwrap();
        assert!(cookie.starts_with("faqdesk_flash=error."));

        let resp = app
            .oneshot(admin_post(
                &state,
                "/admin/edit/Cards/-1",
                "question=x&answer=y",
            ))
            .await
            .unwrap();
        assert_eq!(resp.headers()[header::LOCATION], "/admin");
        assert_eq!(repo.load().unwrap(), cards());
    }

    /// Rendered form action of the first admin entry.
    fn first_action(html: &str, prefix: &str) -> String {
        let start = html.find(prefix).unwrap();
        let end = start + html[start..].find('"').unwrap();
        html[start..end].to_string()
    }

    #[tokio::test]
    async fn test_admin_links_work_on_document_without_ids() {
        let dir = std::env::temp_dir().join(format!("faqdesk-admin-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("faqs.json");
        let original = r#"[
  {
    "section": "Cards",
    "faqs": [
      {
        "question": "how to apply for pan card",
        "answer": "Visit the nearest office."
      },
      {
        "question": "how to get a voter card",
        "answer": "Apply online."
      }
    ]
  }
]"#;
        std::fs::write(&path, original).unwrap();

        let repo = Arc::new(JsonFileRepository::new(&path));
        let state = AppState::new(&config("letmein"), repo, None);
        let app = build_router(state.clone());

        let resp = app.clone().oneshot(admin_get(&state, "/admin")).await.unwrap();
        let html = body_string(resp).await;
        // Viewing the admin page leaves the document alone
        assert_eq!(std::fs::read_to_string(&path).unwrap(), original);

        let edit = first_action(&html, "/admin/edit/");
        assert_eq!(edit, "/admin/edit/Cards/0");
        let resp = app
            .clone()
            .oneshot(admin_post(
                &state,
                &edit,
                "question=pan+card&answer=Apply+online",
            ))
            .await
            .unwrap();
        assert_eq!(resp.headers()[header::LOCATION], "/admin");
        assert!(resp.headers().get(header::SET_COOKIE).is_none());

        let resp = app.clone().oneshot(admin_get(&state, "/admin")).await.unwrap();
        let html = body_string(resp).await;
        let delete = first_action(&html, "/admin/delete/");
        app.oneshot(admin_post(&state, &delete, "")).await.unwrap();

        let saved: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        let faqs = saved[0]["faqs"].as_array().unwrap();
        assert_eq!(faqs.len(), 1);
        assert_eq!(faqs[0]["question"], "how to get a voter card");
        assert!(faqs[0].get("id").is_none());
        std::fs::remove_dir_all(&dir).ok();
    }
}
