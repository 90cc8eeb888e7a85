//! # FAQ Desk Gateway
//!
//! Axum HTTP surface: the chat endpoint, server-rendered pages, and the
//! session-protected admin area for curating the FAQ set.

pub mod admin;
pub mod chat;
pub mod pages;
pub mod routes;
pub mod server;
pub mod session;

pub use chat::Responder;
pub use server::{AppState, build_router, start};
