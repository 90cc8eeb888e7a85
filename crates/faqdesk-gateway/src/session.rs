//! Signed admin session cookie and one-shot flash messages.
//!
//! The session cookie holds `admin:<issued unix secs>` inside an
//! `axum-extra` signed jar. Without a configured secret the key is random per
//! process, so a restart invalidates every session.

use axum::http::HeaderMap;
use axum_extra::extract::cookie::{Cookie, CookieJar, Key, SameSite, SignedCookieJar};
use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD as B64};
use sha2::{Digest, Sha512};

pub const SESSION_COOKIE: &str = "faqdesk_session";
pub const FLASH_COOKIE: &str = "faqdesk_flash";

/// Session signing key and lifetime.
#[derive(Clone)]
pub struct SessionKeys {
    key: Key,
    ttl_secs: i64,
    ephemeral: bool,
}

impl SessionKeys {
    /// Empty `secret` → random key for this process only. Any other secret is
    /// stretched to the 64-byte master key the signed jar needs.
    pub fn new(secret: &str, ttl_hours: u32) -> Self {
        let ephemeral = secret.is_empty();
        let key = if ephemeral {
            Key::generate()
        } else {
            Key::from(Sha512::digest(secret.as_bytes()).as_slice())
        };
        Self {
            key,
            ttl_secs: i64::from(ttl_hours) * 3600,
            ephemeral,
        }
    }

    pub fn is_ephemeral(&self) -> bool {
        self.ephemeral
    }

    /// Jar carrying a fresh admin session.
    pub fn login(&self) -> SignedCookieJar {
        self.login_at(chrono::Utc::now().timestamp())
    }

    fn login_at(&self, issued: i64) -> SignedCookieJar {
        let cookie = Cookie::build((SESSION_COOKIE, format!("admin:{issued}")))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax);
        SignedCookieJar::new(self.key.clone()).add(cookie)
    }

    /// Jar that drops the session the request carries, if any.
    pub fn logout(headers: &HeaderMap) -> CookieJar {
        CookieJar::from_headers(headers).remove(Cookie::build(SESSION_COOKIE).path("/"))
    }

    /// Whether the request carries a valid, unexpired admin session.
    pub fn is_admin(&self, headers: &HeaderMap) -> bool {
        self.is_admin_at(headers, chrono::Utc::now().timestamp())
    }

    fn is_admin_at(&self, headers: &HeaderMap, now: i64) -> bool {
        SignedCookieJar::from_headers(headers, self.key.clone())
            .get(SESSION_COOKIE)
            .and_then(|c| c.value().strip_prefix("admin:")?.parse::<i64>().ok())
            .is_some_and(|issued| issued <= now + 60 && now - issued <= self.ttl_secs)
    }
}

/// Message shown once on the next rendered page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flash {
    pub category: FlashKind,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashKind {
    Success,
    Error,
    Info,
}

impl FlashKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
            Self::Info => "info",
        }
    }

    fn parse(s: &str) -> Self {
        match s {
            "success" => Self::Success,
            "error" => Self::Error,
            _ => Self::Info,
        }
    }
}

impl Flash {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            category: FlashKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            category: FlashKind::Error,
            message: message.into(),
        }
    }

    /// Add this flash to `jar`. The message is base64 so any text survives
    /// cookie value rules.
    pub fn set(self, jar: CookieJar) -> CookieJar {
        let value = format!("{}.{}", self.category.as_str(), B64.encode(&self.message));
        jar.add(
            Cookie::build((FLASH_COOKIE, value))
                .path("/")
                .http_only(true)
                .same_site(SameSite::Lax),
        )
    }

    /// Flash pending in the request's jar, if any.
    pub fn from_jar(jar: &CookieJar) -> Option<Self> {
        let cookie = jar.get(FLASH_COOKIE)?;
        let (kind, msg_b64) = cookie.value().split_once('.')?;
        let message = String::from_utf8(B64.decode(msg_b64).ok()?).ok()?;
        Some(Self {
            category: FlashKind::parse(kind),
            message,
        })
    }

    /// Consume the pending flash.
    pub fn clear(jar: CookieJar) -> CookieJar {
        jar.remove(Cookie::build(FLASH_COOKIE).path("/"))
    }
}

/// Turn the `Set-Cookie` headers of a response into a request `Cookie` header.
#[cfg(test)]
pub(crate) fn cookie_header(resp: impl axum::response::IntoResponse) -> HeaderMap {
    use axum::http::HeaderValue;
    use axum::http::header::{COOKIE, SET_COOKIE};

    let resp = resp.into_response();
    let pairs: Vec<&str> = resp
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok()?.split(';').next())
        .collect();
    let mut headers = HeaderMap::new();
    headers.insert(COOKIE, HeaderValue::from_str(&pairs.join("; ")).unwrap());
    headers
}
