//! Roster web server: login and student-roster administration.
//!
//! # Pages
//! - `/`: email/password sign-in
//! - `/students`: the roster table with its view/edit/add modal
//!
//! `POST /logout` ends the session. Pages other than `/` redirect there
//! when the request carries no live session.

pub mod config;
pub mod error;
pub mod render;
pub mod routes;
pub mod screens;
pub mod session;
pub mod shell;

use axum::{Router, routing::{get, post}};
use roster_gateway::Backend;
use session::SessionRegistry;
use shell::{LOGOUT_PATH, Route};
use std::sync::Arc;

/// State shared by every request handler.
pub struct AppState {
    pub registry: SessionRegistry,
}

impl AppState {
    pub fn new(backend: Arc<dyn Backend>) -> Arc<Self> {
        Arc::new(Self {
            registry: SessionRegistry::new(backend),
        })
    }
}

/// Build the HTTP router over `state`.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route(Route::Login.path(), get(routes::login_page).post(routes::login_submit))
        .route(Route::Students.path(), get(routes::students_page).post(routes::students_action))
        .route(LOGOUT_PATH, post(routes::logout))
        .with_state(state)
}
